//! Service layer: business logic orchestration.
//!
//! [`WaitlistService`] applies the persistence policy: primary store when
//! configured, explicit fallback to the file store on any primary failure.

pub mod waitlist;

pub use waitlist::{SignupReceipt, WaitlistService};
