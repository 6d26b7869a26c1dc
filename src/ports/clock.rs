use chrono::{DateTime, Utc};

/// Source of the current instant
///
/// Commands read it once per call, so every computation within that call sees the same day.
#[mockall::automock]
pub trait ClockPort {
    fn now(&self) -> DateTime<Utc>;
}
