//! Validated sign-up input types.
//!
//! [`SignupName`] and [`SignupEmail`] are parse-don't-validate newtypes:
//! once constructed they are guaranteed normalized (trimmed, and lowercased
//! for emails) and well-formed. [`NewSignup`] bundles both into a fully
//! validated submission that the service layer can persist without
//! re-checking.

use std::fmt;

/// A waitlist member's display name: trimmed, guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupName(String);

impl SignupName {
    /// Parses and normalizes a raw name.
    ///
    /// # Errors
    ///
    /// Returns an error when the trimmed input is empty.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("name must not be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Consumes the newtype, returning the normalized inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for SignupName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SignupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A waitlist member's email: trimmed, lowercased, shape-checked.
///
/// The normalized form is the uniqueness key across both backends, so all
/// comparisons against stored entries are effectively case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupEmail(String);

impl SignupEmail {
    /// Parses and normalizes a raw email address.
    ///
    /// Accepts the `local@domain.tld` shape: no whitespace, exactly one
    /// `@` with a non-empty local part, and a dot inside the domain with
    /// at least one character on each side.
    ///
    /// # Errors
    ///
    /// Returns an error when the normalized input does not match that shape.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let normalized = raw.trim().to_lowercase();
        if is_valid_email(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(format!("`{}` is not a valid email address", raw.trim()))
        }
    }

    /// Consumes the newtype, returning the normalized inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for SignupEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SignupEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fully validated waitlist submission.
#[derive(Debug, Clone)]
pub struct NewSignup {
    /// Validated display name.
    pub name: SignupName,
    /// Validated, normalized email.
    pub email: SignupEmail,
}

impl NewSignup {
    /// Parses both fields of a raw submission.
    ///
    /// # Errors
    ///
    /// Returns the first field-level validation error.
    pub fn parse(raw_name: &str, raw_email: &str) -> Result<Self, String> {
        let name = SignupName::parse(raw_name)?;
        let email = SignupEmail::parse(raw_email)?;
        Ok(Self { name, email })
    }
}

/// Shape check matching `^[^\s@]+@[^\s@]+\.[^\s@]+$`.
fn is_valid_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // The domain needs a dot with at least one character on each side.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + c.len_utf8() < domain.len())
}
