//! Account profile reference type.

use std::fmt;

/// URI-like reference to the logged-in account profile, as returned by login
/// (for example `/gdc/account/profile/abc123`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileReference(String);

impl ProfileReference {
    /// Create a new profile reference.
    pub fn new(profile: impl Into<String>) -> Self {
        Self(profile.into())
    }

    /// Returns the full reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The profile id: everything after the last `/`.
    ///
    /// Returns `None` when that suffix is empty.
    pub fn profile_id(&self) -> Option<&str> {
        let id = match self.0.rfind('/') {
            Some(idx) => &self.0[idx + 1..],
            None => self.0.as_str(),
        };
        (!id.is_empty()).then_some(id)
    }
}

impl fmt::Display for ProfileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_id_is_last_segment() {
        let profile = ProfileReference::new("/gdc/account/profile/abc123");
        assert_eq!(profile.profile_id(), Some("abc123"));
    }

    #[test]
    fn bare_id_is_its_own_profile_id() {
        assert_eq!(ProfileReference::new("abc123").profile_id(), Some("abc123"));
    }

    #[test]
    fn trailing_slash_has_no_profile_id() {
        assert_eq!(ProfileReference::new("/gdc/account/profile/").profile_id(), None);
        assert_eq!(ProfileReference::new("").profile_id(), None);
    }
}
