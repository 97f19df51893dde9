//! Public post URLs
//!
//! The web app addresses a post as `https://<host>/profile/<handle_or_did>/post/<rkey>`.
//! The host is not checked, so mirrors sharing that layout are accepted too.

use url::Url;

use super::{AtUri, Did, Identifier, UrlError};

/// A post URL split into its author identifier and record key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostUrl {
    pub identifier: Identifier,
    pub rkey: String,
}

impl PostUrl {
    /// Parse a public post URL.
    ///
    /// # Errors
    /// - [`UrlError::InvalidUrl`] if the string is not an absolute URL
    /// - [`UrlError::InvalidFormat`] if the path is not `/profile/{id}/post/{rkey}`
    /// - [`UrlError::InvalidDid`] if the author segment is a malformed DID
    pub fn parse(url: &str) -> Result<Self, UrlError> {
        let parsed = Url::parse(url).map_err(|_| UrlError::InvalidUrl(url.to_string()))?;
        let pathname = parsed.path();

        let segments: Vec<&str> = pathname.split('/').filter(|s| !s.is_empty()).collect();
        let [profile, identifier, post, rkey] = segments.as_slice() else {
            return Err(UrlError::InvalidFormat(pathname.to_string()));
        };
        if *profile != "profile" || *post != "post" {
            return Err(UrlError::InvalidFormat(pathname.to_string()));
        }

        let identifier = Identifier::parse(identifier)
            .map_err(|_| UrlError::InvalidDid(identifier.to_string()))?;

        Ok(Self {
            identifier,
            rkey: rkey.to_string(),
        })
    }

    /// Build the post's AT URI once the author DID is known.
    pub fn to_at_uri(&self, did: &Did) -> AtUri {
        AtUri::post(did, &self.rkey)
    }
}
