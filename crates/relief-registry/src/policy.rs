use relief_core::{ErrorCode, ReliefError, ReportStatus};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which status changes `update_status` accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Any status may be overwritten with any other.
    #[default]
    Permissive,
    /// pending -> in-progress -> completed, plus reopening to pending.
    Strict,
}

impl TransitionPolicy {
    pub fn allows(self, from: ReportStatus, to: ReportStatus) -> bool {
        match self {
            Self::Permissive => true,
            Self::Strict => matches!(
                (from, to),
                (_, ReportStatus::Pending)
                    | (ReportStatus::Pending, ReportStatus::InProgress)
                    | (ReportStatus::InProgress, ReportStatus::InProgress)
                    | (ReportStatus::InProgress, ReportStatus::Completed)
                    | (ReportStatus::Completed, ReportStatus::Completed)
            ),
        }
    }

    pub fn check(self, from: ReportStatus, to: ReportStatus) -> Result<(), ReliefError> {
        if self.allows(from, to) {
            Ok(())
        } else {
            Err(ReliefError::invalid_transition(from, to))
        }
    }
}

impl FromStr for TransitionPolicy {
    type Err = ReliefError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "strict" => Ok(Self::Strict),
            other => Err(ReliefError::new(
                ErrorCode::InvalidInput,
                format!("unknown transition policy '{other}'"),
            )),
        }
    }
}
