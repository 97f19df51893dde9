//! XRPC HTTP client
//!
//! Provides unauthenticated access to the public AppView queries.
//! Uses synchronous HTTP (ureq) to be executor-agnostic.

use log::debug;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::io::Read;
use std::time::Duration;
use ureq::http::Response;
use ureq::{Agent, Body};

use super::response::{GetPostThreadResponse, ResolveHandleResponse, XrpcErrorBody};
use super::{BskyApi, ThreadParams};
use crate::atproto::{AtUri, Did, Handle};
use crate::error::XrpcError;

/// Blocking client for a single XRPC service
pub struct BskyClient {
    agent: Agent,
    service: String,
}

impl BskyClient {
    /// Public Bluesky AppView, no authentication required
    pub const DEFAULT_SERVICE: &'static str = "https://public.api.bsky.app";

    /// Overall deadline for one request
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Largest success body that will be decoded
    pub const MAX_RESPONSE_BYTES: u64 = 32 * 1024 * 1024;

    /// Create a client for the given service base URL
    pub fn new(service: impl Into<String>) -> Self {
        Self::with_timeout(service, Self::DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(service: impl Into<String>, timeout: Duration) -> Self {
        // Error statuses are decoded as XRPC error bodies rather than surfaced by ureq
        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .into();

        Self {
            agent,
            service: service.into().trim_end_matches('/').to_string(),
        }
    }

    /// The service base URL, without a trailing slash
    pub fn service(&self) -> &str {
        &self.service
    }

    fn endpoint(&self, nsid: &str) -> String {
        format!("{}/xrpc/{}", self.service, nsid)
    }
}

impl Default for BskyClient {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SERVICE)
    }
}

impl BskyApi for BskyClient {
    fn resolve_handle(&self, handle: &Handle) -> Result<Did, XrpcError> {
        let url = self.endpoint("com.atproto.identity.resolveHandle");
        debug!("Resolving handle {} via {}", handle, url);

        let response = self
            .agent
            .get(&url)
            .query("handle", handle.as_str())
            .call()?;

        let resolved: ResolveHandleResponse = read_response(response)?;
        Ok(resolved.did)
    }

    fn get_post_thread(
        &self,
        uri: &AtUri,
        params: &ThreadParams,
    ) -> Result<GetPostThreadResponse, XrpcError> {
        let url = self.endpoint("app.bsky.feed.getPostThread");
        debug!("Fetching thread {} via {}", uri, url);

        let mut request = self.agent.get(&url).query("uri", uri.as_str());
        if let Some(depth) = params.depth {
            request = request.query("depth", depth.to_string());
        }
        if let Some(parent_height) = params.parent_height {
            request = request.query("parentHeight", parent_height.to_string());
        }

        read_response(request.call()?)
    }
}

/// Decode a success body as `T`, or an error status as [`XrpcError::Status`]
fn read_response<T: DeserializeOwned>(mut response: Response<Body>) -> Result<T, XrpcError> {
    let status = response.status();

    if status.is_success() {
        let reader = response
            .body_mut()
            .with_config()
            .limit(BskyClient::MAX_RESPONSE_BYTES)
            .reader();
        return decode_json(reader).map_err(|e| XrpcError::InvalidResponse(e.to_string()));
    }

    // Proxies may answer with non-JSON bodies; keep the status regardless
    let body: XrpcErrorBody = response.body_mut().read_json().unwrap_or_default();
    debug!(
        "XRPC error status {}: {:?} {:?}",
        status, body.error, body.message
    );

    Err(XrpcError::Status {
        status: status.as_u16(),
        error: body.error,
        message: body.message,
    })
}

/// Decode JSON of any nesting depth
///
/// Every parent in a thread adds one level of nesting and every reply level
/// adds two, so long threads exceed serde_json's default recursion limit.
/// The stack grows on demand instead.
fn decode_json<T: DeserializeOwned>(reader: impl Read) -> Result<T, serde_json::Error> {
    let mut de = serde_json::Deserializer::from_reader(reader);
    de.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}
