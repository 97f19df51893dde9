//! Bsky crate - Fetch Bluesky post threads from public post URLs
//!
//! This crate provides platform-independent thread fetching including:
//! - AT Protocol identifiers (DID, handle, AT URI) and post URL parsing
//! - A blocking XRPC client for the public AppView
//! - Thread view models (posts, not-found and blocked placeholders)
//! - The URL-to-thread helper used by front ends
//!
//! This crate has zero UI dependencies.

pub mod api;
pub mod atproto;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;

pub use api::{BskyApi, BskyClient, ThreadParams, response::GetPostThreadResponse};
pub use atproto::{AtUri, Did, Handle, Identifier, POST_COLLECTION, PostUrl};
pub use crate::config::ServiceConfig;
pub use error::{AtUriError, FetchError, UrlError, XrpcError};
pub use fetch::{GetPostOptions, convert_https_url_to_at_uri, fetch_thread, get_post_data_from_https_url};
pub use models::{
    BlockedAuthor, BlockedPost, NotFoundPost, PostRecord, PostView, ProfileViewBasic, ReplyUnion,
    ThreadNode, ThreadViewPost,
};
