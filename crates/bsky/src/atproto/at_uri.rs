//! AT URI type and parsing.
//!
//! AT URIs identify records in the AT Protocol. Format: `at://<authority>/<collection>/<rkey>`
//! Example: `at://did:plc:z72i7hdynmk6r22z27h6tvur/app.bsky.feed.post/3jzfcijpj2z2a`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{AtUriError, Did};

/// URI scheme prefix
const SCHEME: &str = "at://";

/// Collection NSID for Bluesky posts
pub const POST_COLLECTION: &str = "app.bsky.feed.post";

/// An AT Protocol URI
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AtUri(String);

impl AtUri {
    /// Parse an AT URI, checking the scheme and authority.
    ///
    /// # Errors
    /// Returns an error if the scheme is not `at://` or the authority is empty.
    pub fn new(s: impl Into<String>) -> Result<Self, AtUriError> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Build the URI of a post record.
    pub fn post(did: &Did, rkey: &str) -> Self {
        Self::make(did.as_str(), POST_COLLECTION, rkey)
    }

    /// Build a URI from its components.
    pub fn make(authority: &str, collection: &str, rkey: &str) -> Self {
        Self(format!("{SCHEME}{authority}/{collection}/{rkey}"))
    }

    fn validate(s: &str) -> Result<(), AtUriError> {
        let Some(rest) = s.strip_prefix(SCHEME) else {
            return Err(AtUriError::InvalidAtUri(format!(
                "must start with '{SCHEME}': {s}"
            )));
        };
        let mut parts = rest.split('/');
        if parts.next().is_none_or(str::is_empty) {
            return Err(AtUriError::InvalidAtUri("authority cannot be empty".into()));
        }
        if parts.any(str::is_empty) {
            return Err(AtUriError::InvalidAtUri(format!("empty path segment: {s}")));
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn segments(&self) -> impl Iterator<Item = &str> {
        self.0[SCHEME.len()..].split('/')
    }

    /// The authority (DID or handle)
    pub fn authority(&self) -> &str {
        self.segments().next().unwrap_or_default()
    }

    /// The collection NSID, if present
    pub fn collection(&self) -> Option<&str> {
        self.segments().nth(1)
    }

    /// The record key, if present
    pub fn rkey(&self) -> Option<&str> {
        self.segments().nth(2)
    }

    /// Map a post URI back to the web app's public URL layout.
    ///
    /// Returns `None` for URIs that do not point at a post record.
    pub fn to_https_url(&self, base: &str) -> Option<String> {
        if self.collection() != Some(POST_COLLECTION) {
            return None;
        }
        let rkey = self.rkey()?;
        Some(format!(
            "{}/profile/{}/post/{}",
            base.trim_end_matches('/'),
            self.authority(),
            rkey
        ))
    }
}

impl fmt::Display for AtUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AtUri {
    type Err = AtUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AtUri {
    type Error = AtUriError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<AtUri> for String {
    fn from(uri: AtUri) -> Self {
        uri.0
    }
}

impl AsRef<str> for AtUri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
