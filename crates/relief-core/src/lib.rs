pub mod domain;
pub mod error;
pub mod ids;
pub mod time;

pub use domain::{
    deserialize_people_count, estimate_wait_time, DisasterReport, NewReport, ReportField,
    ReportStatus, Urgency, DISASTER_TYPES, UNASSESSED_WAIT_TIME,
};
pub use error::{ErrorCode, ReliefError, ReliefResult};
pub use ids::{MessageId, ReportId};
pub use time::{minutes_before, now_epoch_millis, EpochMillis, MINUTE_MS};
