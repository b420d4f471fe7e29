use std::time::{SystemTime, UNIX_EPOCH};

pub type EpochMillis = u64;

pub const MINUTE_MS: EpochMillis = 60_000;

pub fn now_epoch_millis() -> EpochMillis {
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    duration.as_millis() as EpochMillis
}

/// Instant `minutes` before `now`, clamped at the epoch.
pub fn minutes_before(now: EpochMillis, minutes: u64) -> EpochMillis {
    now.saturating_sub(minutes.saturating_mul(MINUTE_MS))
}
