//! Subscription expiration and fine computation
//!
//! Every comparison happens on epoch days: whole days elapsed since 1970-01-01T00:00:00Z.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;

use super::{SubscriptionAssessment, SubscriptionRecord, SubscriptionTier};

pub const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

/// Longest grace period a policy may grant, about a century
pub const MAX_GRACE_DAYS: i64 = 36_500;

/// Date-only formats accepted by [`parse_date`], taken as UTC midnight
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The value could not be parsed into an instant
    #[error("invalid date: {0:?}")]
    InvalidDate(String),

    /// The value is not one of `Basic`, `Standard` or `Premium`
    #[error("unknown subscription tier: {0:?}")]
    UnknownSubscriptionTier(String),

    /// A policy grants a grace period outside `0..=MAX_GRACE_DAYS`
    #[error("invalid grace period for {tier}: {days} days")]
    InvalidGracePeriod { tier: SubscriptionTier, days: i64 },
}

/// Parse a stored date into an instant
pub fn parse_date(value: &str) -> Result<DateTime<Utc>, Error> {
    let trimmed = value.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(date.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Utc.from_utc_datetime(&date));
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| Utc.from_utc_datetime(&date))
        .ok_or_else(|| Error::InvalidDate(value.to_string()))
}

/// Whole days elapsed since the epoch, rounded down
pub fn to_epoch_days(instant: DateTime<Utc>) -> i64 {
    instant.timestamp_millis().div_euclid(MILLIS_PER_DAY)
}

/// Last active day of a subscription started on `start_day`
pub fn expiration_day(start_day: i64, tier: SubscriptionTier) -> i64 {
    SubscriptionPolicy::default().expiration_day(start_day, tier)
}

/// Assess a subscription with the default policy
pub fn assess(record: &SubscriptionRecord, now: DateTime<Utc>) -> SubscriptionAssessment {
    SubscriptionPolicy::default().assess(record, now)
}

/// Grace periods and fine amounts
///
/// The default values are the library's standard rules. Missing keys fall back to them when the
/// policy is deserialized.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SubscriptionPolicy {
    pub basic_grace_days: i64,
    pub standard_grace_days: i64,
    pub premium_grace_days: i64,
    /// Fine for an overdue book while the subscription is still active
    pub overdue_fine: u32,
    /// Fine for an overdue book once the subscription has run out
    pub expired_overdue_fine: u32,
}

impl Default for SubscriptionPolicy {
    fn default() -> Self {
        Self {
            basic_grace_days: SubscriptionTier::Basic.grace_days(),
            standard_grace_days: SubscriptionTier::Standard.grace_days(),
            premium_grace_days: SubscriptionTier::Premium.grace_days(),
            overdue_fine: 100,
            expired_overdue_fine: 200,
        }
    }
}

impl SubscriptionPolicy {
    pub fn grace_days(&self, tier: SubscriptionTier) -> i64 {
        match tier {
            SubscriptionTier::Basic => self.basic_grace_days,
            SubscriptionTier::Standard => self.standard_grace_days,
            SubscriptionTier::Premium => self.premium_grace_days,
        }
    }

    /// Check every grace period is within `0..=MAX_GRACE_DAYS`
    pub fn validate(&self) -> Result<(), Error> {
        [
            SubscriptionTier::Basic,
            SubscriptionTier::Standard,
            SubscriptionTier::Premium,
        ]
        .into_iter()
        .map(|tier| (tier, self.grace_days(tier)))
        .find(|(_, days)| !(0..=MAX_GRACE_DAYS).contains(days))
        .map_or(Ok(()), |(tier, days)| {
            Err(Error::InvalidGracePeriod { tier, days })
        })
    }

    pub fn expiration_day(&self, start_day: i64, tier: SubscriptionTier) -> i64 {
        start_day.saturating_add(self.grace_days(tier))
    }

    /// Assess a subscription as of `now`
    ///
    /// A subscription expiring on the current day reports no days left but is not yet expired.
    /// The fine uses the days-left boundary, so an overdue book on that day owes the expired fine.
    pub fn assess(
        &self,
        record: &SubscriptionRecord,
        now: DateTime<Utc>,
    ) -> SubscriptionAssessment {
        let current_day = to_epoch_days(now);
        let start_day = to_epoch_days(record.subscription_date);
        let expiry = self.expiration_day(start_day, record.subscription_type);

        let subscription_expired = expiry < current_day;
        let days_left_for_expiration = if expiry <= current_day {
            0
        } else {
            expiry.abs_diff(current_day)
        };

        let overdue = record
            .return_date
            .map(|return_date| to_epoch_days(return_date) < current_day)
            .unwrap_or(false);
        let fine = match (overdue, expiry <= current_day) {
            (false, _) => 0,
            (true, false) => self.overdue_fine,
            (true, true) => self.expired_overdue_fine,
        };

        SubscriptionAssessment {
            subscription_expired,
            days_left_for_expiration,
            fine,
        }
    }
}
