//! The persisted waitlist record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::NewSignup;

/// One stored sign-up: name, normalized email, and first-insertion time.
///
/// Created exactly once per distinct email and never mutated or deleted.
/// Both backends persist this exact shape, with `createdAt` as a
/// millisecond-precision RFC 3339 string
/// (e.g. `2024-01-01T00:00:00.000Z`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistEntry {
    /// Display name as submitted (trimmed).
    pub name: String,
    /// Normalized email, the uniqueness key.
    pub email: String,
    /// Timestamp captured at first successful insertion.
    #[serde(rename = "createdAt", with = "rfc3339_millis")]
    pub created_at: DateTime<Utc>,
}

impl WaitlistEntry {
    /// Builds an entry from a validated submission, stamping it with the
    /// current time.
    #[must_use]
    pub fn new(signup: NewSignup) -> Self {
        Self {
            name: signup.name.into_inner(),
            email: signup.email.into_inner(),
            created_at: Utc::now(),
        }
    }
}

/// Serde adapter pinning `createdAt` to millisecond-precision RFC 3339
/// with a `Z` suffix, the format the backing file has always used.
mod rfc3339_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}
