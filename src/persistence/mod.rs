//! Persistence layer: MongoDB primary store and JSON-file fallback.
//!
//! Both stores expose the same insert-if-absent operation over
//! [`crate::domain::WaitlistEntry`]. The MongoDB store is safe under
//! concurrency (unique index plus atomic upsert); the file store serializes
//! its read-modify-write behind a mutex.

pub mod file;
pub mod mongo;

use serde::Serialize;
use utoipa::ToSchema;

pub use file::FileStore;
pub use mongo::MongoStore;

/// Which backend ultimately persisted a sign-up. Reported verbatim in the
/// success response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// The MongoDB primary store.
    Mongodb,
    /// The JSON-file fallback store.
    File,
}

impl StorageKind {
    /// Returns the wire name of the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mongodb => "mongodb",
            Self::File => "file",
        }
    }
}

impl std::fmt::Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
