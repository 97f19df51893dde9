//! Account identifiers: DIDs and handles.
//!
//! A post URL names its author either by DID (`did:plc:...`, `did:web:...`)
//! or by handle (`alice.bsky.social`). Handles are mutable and must be
//! resolved to a DID before building an AT URI.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::AtUriError;

/// Prefix shared by every DID
const DID_PREFIX: &str = "did:";

/// A Decentralized Identifier, the stable account id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Did(String);

impl Did {
    /// Create a DID, checking for the `did:<method>:<id>` shape.
    ///
    /// # Errors
    /// Returns an error if the string is not DID-shaped.
    pub fn new(s: impl Into<String>) -> Result<Self, AtUriError> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Check the `did:<method>:<id>` shape without allocating.
    ///
    /// Method-specific syntax is left to the resolver.
    pub fn validate(s: &str) -> Result<(), AtUriError> {
        let Some(rest) = s.strip_prefix(DID_PREFIX) else {
            return Err(AtUriError::InvalidDid(format!("must start with '{DID_PREFIX}': {s}")));
        };
        match rest.split_once(':') {
            Some((method, id))
                if !method.is_empty()
                    && method.chars().all(|c| c.is_ascii_lowercase())
                    && !id.is_empty() =>
            {
                Ok(())
            }
            _ => Err(AtUriError::InvalidDid(format!(
                "must have a method and identifier: {s}"
            ))),
        }
    }

    /// The DID method (`plc`, `web`, ...)
    pub fn method(&self) -> &str {
        self.0[DID_PREFIX.len()..]
            .split(':')
            .next()
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Did {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Did {
    type Err = AtUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Did {
    type Error = AtUriError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Did> for String {
    fn from(did: Did) -> Self {
        did.0
    }
}

/// A user-facing, domain-shaped account name
///
/// Only emptiness is checked here; whether a handle actually exists is
/// decided by the resolving service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    pub fn new(s: impl Into<String>) -> Result<Self, AtUriError> {
        let s = s.into();
        if s.is_empty() {
            return Err(AtUriError::InvalidHandle("handle cannot be empty".into()));
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The author segment of a post URL: a DID or a handle
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Did(Did),
    Handle(Handle),
}

impl Identifier {
    /// Classify a path segment.
    ///
    /// Anything starting with `did:` is treated as a DID and must be well
    /// formed; everything else is a handle to be resolved.
    pub fn parse(s: &str) -> Result<Self, AtUriError> {
        if s.starts_with(DID_PREFIX) {
            Ok(Self::Did(Did::new(s)?))
        } else {
            Ok(Self::Handle(Handle::new(s)?))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Did(did) => did.as_str(),
            Self::Handle(handle) => handle.as_str(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
