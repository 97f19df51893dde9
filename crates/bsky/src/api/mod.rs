//! XRPC API integration
//!
//! This module provides:
//! - The [`BskyApi`] trait, the seam between thread fetching and transport
//! - A blocking HTTP client for public AppView endpoints
//! - Request and response types for the two queries used

mod client;

pub use client::BskyClient;

use crate::atproto::{AtUri, Did, Handle};
use crate::error::XrpcError;
use response::GetPostThreadResponse;

/// Optional knobs for `app.bsky.feed.getPostThread`
///
/// `None` leaves the service default in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThreadParams {
    /// How many levels of replies to include
    pub depth: Option<u16>,
    /// How many levels of parents to include
    pub parent_height: Option<u16>,
}

/// Queries needed to turn a post URL into a thread view
///
/// Implemented by [`BskyClient`]; callers may supply their own
/// (pre-configured, authenticated, or fake) implementation.
pub trait BskyApi: Send + Sync {
    /// Resolve a handle to its DID (`com.atproto.identity.resolveHandle`)
    fn resolve_handle(&self, handle: &Handle) -> Result<Did, XrpcError>;

    /// Fetch a post and its context (`app.bsky.feed.getPostThread`)
    fn get_post_thread(
        &self,
        uri: &AtUri,
        params: &ThreadParams,
    ) -> Result<GetPostThreadResponse, XrpcError>;
}

/// XRPC response types
pub mod response {
    use serde::{Deserialize, Serialize};

    use crate::atproto::Did;
    use crate::models::ThreadNode;

    /// Response from `com.atproto.identity.resolveHandle`
    #[derive(Debug, Deserialize)]
    pub struct ResolveHandleResponse {
        pub did: Did,
    }

    /// Response from `app.bsky.feed.getPostThread`
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct GetPostThreadResponse {
        pub thread: Option<ThreadNode>,
    }

    /// Body of a non-success XRPC response
    #[derive(Debug, Default, Deserialize)]
    pub struct XrpcErrorBody {
        pub error: Option<String>,
        pub message: Option<String>,
    }
}
