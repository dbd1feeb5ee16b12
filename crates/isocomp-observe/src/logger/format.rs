use std::{fmt, str::FromStr};

use crate::logger::error::LoggerError;

const JOURNALD_AVAILABLE: bool = cfg!(all(target_os = "linux", feature = "journald"));

/// Output form of the log stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoggerFormat {
    /// Human-readable lines, optionally coloured.
    #[default]
    Text,
    /// One JSON object per event, including the current span.
    Json,
    /// Native systemd journal fields.
    Journald,
}

impl LoggerFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoggerFormat::Text => "text",
            LoggerFormat::Json => "json",
            LoggerFormat::Journald => "journald",
        }
    }
}

impl fmt::Display for LoggerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoggerFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LoggerFormat::Text),
            "json" => Ok(LoggerFormat::Json),
            "journald" if JOURNALD_AVAILABLE => Ok(LoggerFormat::Journald),
            "journald" => Err(LoggerError::JournaldUnavailable),
            _ => Err(LoggerError::UnknownFormat(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(" JSON ".parse::<LoggerFormat>(), Ok(LoggerFormat::Json));
        assert_eq!("Text".parse::<LoggerFormat>(), Ok(LoggerFormat::Text));
    }

    #[test]
    fn display_matches_parse() {
        for format in [LoggerFormat::Text, LoggerFormat::Json] {
            assert_eq!(format.to_string().parse::<LoggerFormat>(), Ok(format));
        }
    }

    #[test]
    fn rejects_unknown_format() {
        assert_eq!(
            "yaml".parse::<LoggerFormat>(),
            Err(LoggerError::UnknownFormat("yaml".into()))
        );
    }

    #[test]
    fn journald_depends_on_build() {
        let parsed = "journald".parse::<LoggerFormat>();
        if JOURNALD_AVAILABLE {
            assert_eq!(parsed, Ok(LoggerFormat::Journald));
        } else {
            assert_eq!(parsed, Err(LoggerError::JournaldUnavailable));
        }
    }
}
