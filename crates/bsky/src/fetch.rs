//! Post URL to thread view
//!
//! Converts a public post URL into an AT URI (resolving the author's handle
//! when the URL does not already carry a DID) and fetches the thread once.

use log::{debug, warn};
use std::sync::Arc;

use crate::api::response::GetPostThreadResponse;
use crate::api::{BskyApi, BskyClient, ThreadParams};
use crate::atproto::{AtUri, Identifier, PostUrl};
use crate::error::FetchError;
use crate::models::{ThreadNode, ThreadViewPost};

/// How [`get_post_data_from_https_url`] reaches the network
#[derive(Clone, Default)]
pub struct GetPostOptions {
    /// Pre-configured API to use; takes precedence over `service`
    pub agent: Option<Arc<dyn BskyApi>>,
    /// Service base URL for a fresh [`BskyClient`] when no agent is given
    pub service: Option<String>,
    /// Reply depth and parent height forwarded to the thread query
    pub params: ThreadParams,
}

impl GetPostOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_agent(mut self, agent: Arc<dyn BskyApi>) -> Self {
        self.agent = Some(agent);
        self
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn with_depth(mut self, depth: u16) -> Self {
        self.params.depth = Some(depth);
        self
    }

    pub fn with_parent_height(mut self, parent_height: u16) -> Self {
        self.params.parent_height = Some(parent_height);
        self
    }
}

impl std::fmt::Debug for GetPostOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GetPostOptions")
            .field("agent", &self.agent.as_ref().map(|_| "<dyn BskyApi>"))
            .field("service", &self.service)
            .field("params", &self.params)
            .finish()
    }
}

/// Fetch the thread for a public post URL
///
/// Uses `options.agent` if provided, otherwise a new client for
/// `options.service` (or the public AppView).
///
/// # Arguments
/// * `post_url` - e.g. `https://bsky.app/profile/alice.bsky.social/post/3kabc`
/// * `options` - Agent, service and thread-shape overrides
///
/// # Errors
/// - [`FetchError::Url`] if the URL is malformed or not a post URL
/// - [`FetchError::HandleResolution`] if the author's handle cannot be resolved
/// - [`FetchError::PostNotFound`] if the service reports the post missing
/// - [`FetchError::InvalidThreadData`] if the root is not a visible post
/// - [`FetchError::Api`] for any other service or transport failure
pub fn get_post_data_from_https_url(
    post_url: &str,
    options: &GetPostOptions,
) -> Result<ThreadViewPost, FetchError> {
    let fresh_client;
    let api: &dyn BskyApi = match &options.agent {
        Some(agent) => agent.as_ref(),
        None => {
            fresh_client = BskyClient::new(
                options
                    .service
                    .as_deref()
                    .unwrap_or(BskyClient::DEFAULT_SERVICE),
            );
            &fresh_client
        }
    };

    let uri = convert_https_url_to_at_uri(post_url, api)?;
    debug!("Converted {} to {}", post_url, uri);

    fetch_thread(api, &uri, &options.params)
}

/// Convert a public post URL into the post's AT URI
///
/// Handles are resolved through `api`; DIDs are used as-is.
pub fn convert_https_url_to_at_uri(url: &str, api: &dyn BskyApi) -> Result<AtUri, FetchError> {
    let post_url = PostUrl::parse(url)?;

    let did = match &post_url.identifier {
        Identifier::Did(did) => did.clone(),
        Identifier::Handle(handle) => {
            api.resolve_handle(handle)
                .map_err(|e| FetchError::HandleResolution {
                    handle: handle.to_string(),
                    message: e.message(),
                })?
        }
    };

    Ok(post_url.to_at_uri(&did))
}

/// Fetch a thread by AT URI, requiring a visible post at the root
pub fn fetch_thread(
    api: &dyn BskyApi,
    uri: &AtUri,
    params: &ThreadParams,
) -> Result<ThreadViewPost, FetchError> {
    match api.get_post_thread(uri, params) {
        Ok(GetPostThreadResponse {
            thread: Some(ThreadNode::Post(thread)),
        }) => Ok(thread),
        Ok(GetPostThreadResponse {
            thread: Some(ThreadNode::NotFound(_)),
        }) => {
            debug!("Post not found for URI: {}", uri);
            Err(FetchError::PostNotFound(uri.clone()))
        }
        Ok(_) => {
            warn!("Could not parse thread structure for URI: {}", uri);
            Err(FetchError::InvalidThreadData(uri.clone()))
        }
        Err(e) if e.is_post_not_found() => {
            debug!("Post not found via API for URI: {}", uri);
            Err(FetchError::PostNotFound(uri.clone()))
        }
        Err(e) => {
            debug!("Error fetching post thread for {}: {}", uri, e);
            Err(FetchError::Api {
                uri: uri.clone(),
                message: e.message(),
            })
        }
    }
}
