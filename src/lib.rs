//! # launchlist
//!
//! Landing page and waitlist sign-up service.
//!
//! Serves a static marketing page and a single ingestion endpoint
//! (`POST /api/waitlist`) that validates a name/email pair and performs an
//! idempotent insert-if-absent. MongoDB is the primary backend when a
//! connection string is configured; a local JSON file is the fallback when it
//! is not, or when the primary attempt fails.
//!
//! ## Architecture
//!
//! ```text
//! Browser (static landing page, sign-up form)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── WaitlistService (service/)
//!     │       try primary → inspect outcome → fall back
//!     │
//!     ├── MongoStore (persistence/)   unique email index, atomic upsert
//!     └── FileStore (persistence/)    mutex-serialized JSON collection
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
