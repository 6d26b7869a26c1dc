use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod subscription;

use subscription::{parse_date, Error};

/// Subscription plan of a user
///
/// The tier decides how long the subscription stays active after it starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SubscriptionTier {
    Basic,
    Standard,
    Premium,
}

impl SubscriptionTier {
    /// Default grace period in days
    pub const fn grace_days(&self) -> i64 {
        match self {
            SubscriptionTier::Basic => 90,
            SubscriptionTier::Standard => 180,
            SubscriptionTier::Premium => 365,
        }
    }
}

impl FromStr for SubscriptionTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Basic" => Ok(SubscriptionTier::Basic),
            "Standard" => Ok(SubscriptionTier::Standard),
            "Premium" => Ok(SubscriptionTier::Premium),
            other => Err(Error::UnknownSubscriptionTier(other.to_string())),
        }
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionTier::Basic => write!(f, "Basic"),
            SubscriptionTier::Standard => write!(f, "Standard"),
            SubscriptionTier::Premium => write!(f, "Premium"),
        }
    }
}

/// User as kept by the data store
///
/// Tier and dates are stored as raw strings. They are only validated when the user is turned into
/// a [`SubscriptionRecord`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub subscription_type: String,
    pub subscription_date: String,
    /// Identifier of the book currently borrowed by the user, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_book: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub name: String,
    pub author: String,
    pub genre: String,
    pub price: String,
    pub publisher: String,
}

/// A book together with who borrowed it and when
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedBook {
    #[serde(flatten)]
    pub book: Book,
    /// Name of the borrowing user
    pub issued_by: String,
    pub issued_date: Option<String>,
    pub return_date: Option<String>,
}

/// Validated snapshot of the subscription-related fields of a user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscriptionRecord {
    pub subscription_type: SubscriptionTier,
    pub subscription_date: DateTime<Utc>,
    /// Date the borrowed book is due back
    ///
    /// `None` when the user has nothing to return.
    pub return_date: Option<DateTime<Utc>>,
}

impl TryFrom<&User> for SubscriptionRecord {
    type Error = Error;

    fn try_from(user: &User) -> Result<Self, Self::Error> {
        Ok(Self {
            subscription_type: user.subscription_type.parse()?,
            subscription_date: parse_date(&user.subscription_date)?,
            return_date: user.return_date.as_deref().map(parse_date).transpose()?,
        })
    }
}

/// Outcome of assessing a subscription at a given day
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionAssessment {
    pub subscription_expired: bool,
    pub days_left_for_expiration: u64,
    pub fine: u32,
}
