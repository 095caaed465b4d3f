//! Domain layer: validated sign-up input and the persisted entry.
//!
//! This module contains the server-side domain model: parse-don't-validate
//! newtypes for the submitted name and email, the bundled [`NewSignup`]
//! submission, and the immutable [`WaitlistEntry`] record both backends
//! persist.

pub mod entry;
pub mod signup;

pub use entry::WaitlistEntry;
pub use signup::{NewSignup, SignupEmail, SignupName};
