// Copyright 2026 Oxide Computer Company

//! Canonical content identifiers.

use std::fmt;

/// The canonical identifier git assigns to an object, used as a cache key.
///
/// This is whatever `git rev-parse` printed, minus its trailing newline. No
/// validation is performed: SHA-1 and SHA-256 repositories (and any future
/// object format) are handled alike.
///
/// # Examples
///
/// ```
/// use git_link::ContentHash;
///
/// let hash = ContentHash::new("0123456789abcdef0123456789abcdef01234567");
/// assert_eq!(hash.as_str().len(), 40);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    /// Wraps a resolver-produced identifier.
    pub fn new(hash: impl Into<String>) -> Self {
        ContentHash(hash.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
