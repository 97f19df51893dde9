//! Application state and command handlers

use anyhow::Result;
use bsky::{
    AtUri, BskyApi, BskyClient, FetchError, GetPostOptions, ServiceConfig, ThreadViewPost,
    convert_https_url_to_at_uri, get_post_data_from_https_url,
};
use log::info;
use std::sync::Arc;

use crate::components::RenderOnce;
use crate::views::ThreadView;

/// How a fetched thread is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text { max_depth: usize },
    Json,
}

/// Holds the API client shared by every command
pub struct SkythreadApp {
    api: Arc<dyn BskyApi>,
}

impl SkythreadApp {
    /// Create the app against `service`, or the configured default service
    pub fn new(service: Option<String>) -> Result<Self> {
        let service = match service {
            Some(service) => ServiceConfig::new(service)?.service,
            None => ServiceConfig::load()?.service,
        };
        info!("Using service {}", service);

        Ok(Self::with_api(Arc::new(BskyClient::new(service))))
    }

    /// Create the app around an existing API implementation
    pub fn with_api(api: Arc<dyn BskyApi>) -> Self {
        Self { api }
    }

    /// Fetch the thread behind a post URL
    pub fn load_thread(
        &self,
        url: &str,
        depth: Option<u16>,
        parent_height: Option<u16>,
    ) -> Result<ThreadViewPost, FetchError> {
        let mut options = GetPostOptions::new().with_agent(self.api.clone());
        options.params.depth = depth;
        options.params.parent_height = parent_height;

        info!("Fetching thread for {}", url);
        get_post_data_from_https_url(url, &options)
    }

    /// Convert a post URL to its AT URI without fetching the thread
    pub fn resolve_uri(&self, url: &str) -> Result<AtUri, FetchError> {
        convert_https_url_to_at_uri(url, self.api.as_ref())
    }
}

/// Render a thread in the requested format
pub fn render_thread(thread: &ThreadViewPost, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text { max_depth } => Ok(ThreadView::new(thread, max_depth).to_text()),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(thread)?;
            json.push('\n');
            Ok(json)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bsky::api::response::GetPostThreadResponse;
    use bsky::{Did, Handle, ThreadParams, XrpcError};

    /// Serves a single-post thread for any URI
    struct StaticApi;

    impl BskyApi for StaticApi {
        fn resolve_handle(&self, _handle: &Handle) -> Result<Did, XrpcError> {
            Ok(Did::new("did:plc:static").unwrap())
        }

        fn get_post_thread(
            &self,
            uri: &AtUri,
            _params: &ThreadParams,
        ) -> Result<GetPostThreadResponse, XrpcError> {
            Ok(serde_json::from_value(serde_json::json!({
                "thread": {
                    "$type": "app.bsky.feed.defs#threadViewPost",
                    "post": {
                        "uri": uri.as_str(),
                        "cid": "bafy",
                        "author": {"did": uri.authority(), "handle": "static.example"},
                        "record": {"text": "static post"},
                        "indexedAt": "2024-05-01T12:00:00.000Z"
                    }
                }
            }))
            .unwrap())
        }
    }

    fn app() -> SkythreadApp {
        SkythreadApp::with_api(Arc::new(StaticApi))
    }

    #[test]
    fn test_invalid_service_override_rejected() {
        let err = SkythreadApp::new(Some("nonsense".to_string())).err().unwrap();
        assert!(format!("{err:#}").contains("Invalid service URL: nonsense"));
    }

    #[test]
    fn test_resolve_uri() {
        let uri = app()
            .resolve_uri("https://bsky.app/profile/static.example/post/3kabc")
            .unwrap();
        assert_eq!(uri.as_str(), "at://did:plc:static/app.bsky.feed.post/3kabc");
    }

    #[test]
    fn test_load_and_render_text() {
        let thread = app()
            .load_thread("https://bsky.app/profile/static.example/post/3kabc", None, None)
            .unwrap();
        let text = render_thread(&thread, OutputFormat::Text { max_depth: 2 }).unwrap();
        assert!(text.contains("static post"));
    }

    #[test]
    fn test_render_json_roundtrips() {
        let thread = app()
            .load_thread("https://bsky.app/profile/did:plc:abc/post/3kabc", None, None)
            .unwrap();
        let json = render_thread(&thread, OutputFormat::Json).unwrap();
        let parsed: ThreadViewPost = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, thread);
    }
}
