use std::{fmt, str::FromStr};

use tracing_subscriber::EnvFilter;

use crate::logger::error::LoggerError;

/// Validated `EnvFilter` directive string, e.g. `info` or `info,isocomp_core=debug`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerLevel(String);

impl LoggerLevel {
    pub fn new(level: impl Into<String>) -> Result<Self, LoggerError> {
        let level = level.into();
        EnvFilter::try_new(&level).map_err(|_| LoggerError::InvalidFilter(level.clone()))?;
        Ok(Self(level))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn filter(&self) -> Result<EnvFilter, LoggerError> {
        EnvFilter::try_new(&self.0).map_err(|_| LoggerError::InvalidFilter(self.0.clone()))
    }
}

impl Default for LoggerLevel {
    fn default() -> Self {
        Self("info".to_string())
    }
}

impl FromStr for LoggerLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim())
    }
}

impl fmt::Display for LoggerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_directives() {
        assert!(LoggerLevel::new("debug").is_ok());
        assert_eq!(
            "info,isocomp_core=trace".parse::<LoggerLevel>().unwrap().as_str(),
            "info,isocomp_core=trace"
        );
    }

    #[test]
    fn rejects_bad_level() {
        assert_eq!(
            LoggerLevel::new("isocomp_core=loud"),
            Err(LoggerError::InvalidFilter("isocomp_core=loud".into()))
        );
    }

    #[test]
    fn default_is_info() {
        assert_eq!(LoggerLevel::default().to_string(), "info");
    }
}
