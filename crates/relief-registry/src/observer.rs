use relief_core::{DisasterReport, EpochMillis, ReportId, ReportStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RegistryEvent {
    ReportCreated {
        report: DisasterReport,
    },
    StatusChanged {
        id: ReportId,
        from: ReportStatus,
        to: ReportStatus,
        at_ms: EpochMillis,
    },
}

impl RegistryEvent {
    pub fn report_id(&self) -> &ReportId {
        match self {
            Self::ReportCreated { report } => &report.id,
            Self::StatusChanged { id, .. } => id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::ReportCreated { .. } => "report_created",
            Self::StatusChanged { .. } => "status_changed",
        }
    }
}

/// Receives registry changes after they are committed. Implementations must
/// return quickly; anything slow belongs on a background task.
pub trait RegistryObserver: Send {
    fn on_event(&self, event: &RegistryEvent);
}
