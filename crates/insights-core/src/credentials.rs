//! Login credentials type.

use std::fmt;

/// Login credentials for the Flex Insights account API.
///
/// Holds the account login (usually an email address) and its password. The
/// value is consumed by the login step and not kept afterwards.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use insights_core::Credentials;
///
/// let creds = Credentials::new("me@example.com", "hunter2");
/// assert_eq!(creds.identifier(), "me@example.com");
/// ```
#[derive(Clone)]
pub struct Credentials {
    identifier: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            password: password.into(),
        }
    }

    /// Returns the login identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the password.
    ///
    /// # Security
    ///
    /// Use this only when constructing the login request body.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// True when either half of the pair is blank.
    pub fn is_incomplete(&self) -> bool {
        self.identifier.trim().is_empty() || self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
