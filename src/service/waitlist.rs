//! Waitlist service: orchestrates the primary→fallback persistence chain.

use crate::domain::{NewSignup, WaitlistEntry};
use crate::error::ApiError;
use crate::persistence::{FileStore, MongoStore, StorageKind};

/// Outcome of a recorded sign-up.
#[derive(Debug, Clone, Copy)]
pub struct SignupReceipt {
    /// Backend that handled the sign-up.
    pub storage: StorageKind,
    /// `false` when an entry with the same email already existed.
    pub newly_added: bool,
}

/// Orchestration layer for waitlist sign-ups.
///
/// Owns the configured backends and applies the degradation policy: try
/// the primary store when configured, inspect the outcome, and branch to
/// the file store on any primary failure. Primary failures are logged and
/// never surfaced to the caller; only fallback failures propagate.
#[derive(Debug)]
pub struct WaitlistService {
    mongo: Option<MongoStore>,
    file: FileStore,
}

impl WaitlistService {
    /// Creates a new `WaitlistService`. A `None` primary store routes every
    /// sign-up straight to the file backend.
    #[must_use]
    pub fn new(mongo: Option<MongoStore>, file: FileStore) -> Self {
        Self { mongo, file }
    }

    /// Records a validated sign-up, inserting it into exactly one backend
    /// unless an entry with the same email already exists there.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] only when the fallback store fails;
    /// primary-store failures are absorbed by falling back.
    pub async fn record_signup(&self, signup: NewSignup) -> Result<SignupReceipt, ApiError> {
        let entry = WaitlistEntry::new(signup);

        if let Some(mongo) = &self.mongo {
            match mongo.insert_if_absent(&entry).await {
                Ok(newly_added) => {
                    tracing::info!(email = %entry.email, newly_added, storage = "mongodb", "sign-up recorded");
                    return Ok(SignupReceipt {
                        storage: StorageKind::Mongodb,
                        newly_added,
                    });
                }
                Err(err) => {
                    tracing::warn!(error = %err, "primary waitlist backend unavailable, falling back to file store");
                }
            }
        }

        let newly_added = self.file.insert_if_absent(&entry).await?;
        tracing::info!(email = %entry.email, newly_added, storage = "file", "sign-up recorded");
        Ok(SignupReceipt {
            storage: StorageKind::File,
            newly_added,
        })
    }

    /// Releases backend resources. Called once on graceful shutdown.
    pub async fn shutdown(&self) {
        if let Some(mongo) = &self.mongo {
            mongo.teardown().await;
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn file_only_service(dir: &tempfile::TempDir) -> WaitlistService {
        let file = FileStore::new(dir.path().join("waitlist.json"));
        WaitlistService::new(None, file)
    }

    fn signup(name: &str, email: &str) -> NewSignup {
        let Ok(signup) = NewSignup::parse(name, email) else {
            panic!("expected valid signup");
        };
        signup
    }

    #[tokio::test]
    async fn unconfigured_primary_reports_file_storage() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let service = file_only_service(&dir);

        let Ok(receipt) = service.record_signup(signup("Jane", "jane@example.com")).await else {
            panic!("record failed");
        };
        assert_eq!(receipt.storage, StorageKind::File);
        assert!(receipt.newly_added);
    }

    #[tokio::test]
    async fn repeated_submissions_store_one_entry() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let service = file_only_service(&dir);

        let Ok(first) = service.record_signup(signup("Jane", "jane@example.com")).await else {
            panic!("record failed");
        };
        assert!(first.newly_added);

        let Ok(second) = service.record_signup(signup("Jane", "jane@example.com")).await else {
            panic!("record failed");
        };
        assert!(!second.newly_added);
    }

    #[tokio::test]
    async fn email_comparison_is_case_insensitive() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let service = file_only_service(&dir);

        let Ok(first) = service.record_signup(signup("Jane", "jane@example.com")).await else {
            panic!("record failed");
        };
        assert!(first.newly_added);

        let Ok(second) = service
            .record_signup(signup("Jane", "Jane@Example.com"))
            .await
        else {
            panic!("record failed");
        };
        assert!(!second.newly_added);
    }

    #[tokio::test]
    async fn unreachable_primary_falls_back_to_file() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        // Deliberately unresolvable host with a short selection timeout so
        // the primary attempt fails fast.
        let mongo = MongoStore::new(
            "mongodb://host.invalid:27017/waitlist?serverSelectionTimeoutMS=200".to_string(),
            None,
            "waitlist".to_string(),
        );
        let file = FileStore::new(dir.path().join("waitlist.json"));
        let service = WaitlistService::new(Some(mongo), file);

        let Ok(receipt) = service.record_signup(signup("Jane", "jane@example.com")).await else {
            panic!("record failed");
        };
        assert_eq!(receipt.storage, StorageKind::File);
        assert!(receipt.newly_added);
    }
}
