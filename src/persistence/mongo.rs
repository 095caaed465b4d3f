//! MongoDB implementation of the primary waitlist store.
//!
//! The connection is established lazily on first use and cached
//! process-wide, keyed by (connection string, database name); a key change
//! or an empty cache triggers a fresh connection. On every fresh connection
//! the unique index on `email` is (re-)ensured, which is idempotent and
//! makes the insert-if-absent below safe under concurrent identical
//! submissions.

use std::fmt;

use chrono::SecondsFormat;
use mongodb::bson::{Document, doc};
use mongodb::options::IndexOptions;
use mongodb::{Client, Database, IndexModel};
use tokio::sync::Mutex;

use crate::domain::WaitlistEntry;
use crate::error::ApiError;

/// A live connection plus the key it was established for.
struct CachedConn {
    uri: String,
    db_name: Option<String>,
    client: Client,
    db: Database,
}

/// MongoDB-backed waitlist store with a cached connection.
pub struct MongoStore {
    uri: String,
    db_name: Option<String>,
    collection: String,
    cached: Mutex<Option<CachedConn>>,
}

impl fmt::Debug for MongoStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MongoStore")
            .field("db_name", &self.db_name)
            .field("collection", &self.collection)
            .finish_non_exhaustive()
    }
}

impl MongoStore {
    /// Creates a store for the given connection target. No connection is
    /// attempted until the first insert.
    #[must_use]
    pub fn new(uri: String, db_name: Option<String>, collection: String) -> Self {
        Self {
            uri,
            db_name,
            collection,
            cached: Mutex::new(None),
        }
    }

    /// Inserts the entry unless one with the same normalized email already
    /// exists. Returns `true` when a new document was created.
    ///
    /// This is a single atomic `$setOnInsert` upsert keyed by email, not a
    /// read-then-write, so concurrent identical submissions cannot create
    /// duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BackendUnavailable`] on connection or query
    /// failure; the caller is expected to absorb it and fall back to the
    /// file store.
    pub async fn insert_if_absent(&self, entry: &WaitlistEntry) -> Result<bool, ApiError> {
        let db = self.database().await?;
        let coll = db.collection::<Document>(&self.collection);

        let filter = doc! { "email": entry.email.as_str() };
        let update = doc! {
            "$setOnInsert": {
                "name": entry.name.as_str(),
                "email": entry.email.as_str(),
                "createdAt": entry
                    .created_at
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            }
        };

        let result = coll
            .update_one(filter, update)
            .upsert(true)
            .await
            .map_err(|e| ApiError::BackendUnavailable(format!("waitlist upsert: {e}")))?;

        Ok(result.upserted_id.is_some())
    }

    /// Resolves the cached database handle, connecting afresh when the
    /// cache is empty or was established for a different target.
    async fn database(&self) -> Result<Database, ApiError> {
        let mut cached = self.cached.lock().await;

        // Reuse the cached connection only while it still matches the target.
        if let Some(conn) = cached.as_ref() {
            if conn.uri == self.uri && conn.db_name == self.db_name {
                return Ok(conn.db.clone());
            }
        }

        let client = Client::with_uri_str(&self.uri)
            .await
            .map_err(|e| ApiError::BackendUnavailable(format!("connect: {e}")))?;

        let db = match &self.db_name {
            Some(name) => client.database(name),
            None => client.default_database().ok_or_else(|| {
                ApiError::BackendUnavailable(
                    "no database name configured and none in the connection string".to_string(),
                )
            })?,
        };

        self.ensure_unique_email_index(&db).await?;

        *cached = Some(CachedConn {
            uri: self.uri.clone(),
            db_name: self.db_name.clone(),
            client,
            db: db.clone(),
        });

        Ok(db)
    }

    /// Ensures the uniqueness constraint on `email`. Safe to repeat.
    async fn ensure_unique_email_index(&self, db: &Database) -> Result<(), ApiError> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        db.collection::<Document>(&self.collection)
            .create_index(index)
            .await
            .map_err(|e| ApiError::BackendUnavailable(format!("ensure email index: {e}")))?;
        Ok(())
    }

    /// Closes the cached connection, if any. Called on graceful shutdown.
    pub async fn teardown(&self) {
        let conn = self.cached.lock().await.take();
        if let Some(conn) = conn {
            conn.client.shutdown().await;
            tracing::debug!("mongodb connection closed");
        }
    }
}
