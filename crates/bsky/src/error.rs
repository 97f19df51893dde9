//! Error types for thread fetching
//!
//! Every variant renders a message suitable for showing to an end user.

use thiserror::Error;

use crate::atproto::AtUri;

/// Malformed identifier or AT URI
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AtUriError {
    #[error("invalid DID: {0}")]
    InvalidDid(String),

    #[error("invalid handle: {0}")]
    InvalidHandle(String),

    #[error("invalid AT URI: {0}")]
    InvalidAtUri(String),
}

/// A post URL that cannot be converted to an AT URI
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    /// Not an absolute URL at all
    #[error("Invalid URL provided: {0}")]
    InvalidUrl(String),

    /// Path does not follow `/profile/{handle_or_did}/post/{rkey}`; holds the path
    #[error(
        "Invalid Bluesky URL format. Expected '/profile/{{handle_or_did}}/post/{{rkey}}', got: {0}"
    )]
    InvalidFormat(String),

    /// Author segment starts with `did:` but is not a DID
    #[error("Invalid DID in Bluesky URL: {0}")]
    InvalidDid(String),
}

/// Failure talking to an XRPC service
#[derive(Debug, Error)]
pub enum XrpcError {
    /// The request never produced a response
    #[error("request failed: {0}")]
    Transport(#[from] ureq::Error),

    /// Non-success status, with the decoded XRPC error body when present
    #[error("{}", status_detail(.error, .message))]
    Status {
        status: u16,
        error: Option<String>,
        message: Option<String>,
    },

    /// The response body did not match the expected schema
    #[error("invalid response body: {0}")]
    InvalidResponse(String),
}

fn status_detail<'a>(error: &'a Option<String>, message: &'a Option<String>) -> &'a str {
    message
        .as_deref()
        .or(error.as_deref())
        .unwrap_or("Unknown error")
}

impl XrpcError {
    /// The XRPC error name (e.g. `NotFound`), if the service sent one
    pub fn error_name(&self) -> Option<&str> {
        match self {
            Self::Status { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    /// Human-readable detail, falling back to `Unknown error`
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Whether the service reported that the requested post does not exist
    pub fn is_post_not_found(&self) -> bool {
        let Self::Status { error, message, .. } = self else {
            return false;
        };
        matches!(error.as_deref(), Some("NotFound" | "PostNotFound"))
            || message
                .as_deref()
                .is_some_and(|m| m.contains("PostNotFound"))
    }
}

/// Failure of [`get_post_data_from_https_url`](crate::get_post_data_from_https_url)
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Url(#[from] UrlError),

    #[error("Failed to resolve handle \"{handle}\": {message}")]
    HandleResolution { handle: String, message: String },

    #[error("Post not found: {0}")]
    PostNotFound(AtUri),

    /// The service answered, but not with a viewable post at the root
    ///
    /// Reported on its own rather than wrapped as [`FetchError::Api`], so the
    /// message reads `Invalid thread data received for <uri>` and not
    /// `API error fetching post <uri>: Invalid thread data received for <uri>`.
    /// A `#notFoundPost` root is reported as [`FetchError::PostNotFound`].
    #[error("Invalid thread data received for {0}")]
    InvalidThreadData(AtUri),

    #[error("API error fetching post {uri}: {message}")]
    Api { uri: AtUri, message: String },
}

impl FetchError {
    /// The AT URI the failure relates to, once conversion succeeded
    pub fn uri(&self) -> Option<&AtUri> {
        match self {
            Self::PostNotFound(uri) | Self::InvalidThreadData(uri) | Self::Api { uri, .. } => {
                Some(uri)
            }
            Self::Url(_) | Self::HandleResolution { .. } => None,
        }
    }
}
