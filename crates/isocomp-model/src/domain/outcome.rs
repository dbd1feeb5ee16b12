use serde::{Deserialize, Serialize};

/// Terminal result of a compilation task as seen by the coordinator.
///
/// Remote death and explicit failure both map to [`Outcome::Failed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Succeeded,
    Failed,
}

impl Outcome {
    #[inline]
    pub fn from_succeeded(succeeded: bool) -> Self {
        if succeeded {
            Outcome::Succeeded
        } else {
            Outcome::Failed
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded)
    }
}
