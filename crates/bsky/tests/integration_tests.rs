//! Integration tests for the bsky crate
//!
//! These tests verify the complete flow from post URL to thread view
//! against an in-memory API.

use bsky::api::response::GetPostThreadResponse;
use bsky::{
    AtUri, BskyApi, Did, FetchError, GetPostOptions, Handle, ThreadNode, ThreadParams, UrlError,
    XrpcError, convert_https_url_to_at_uri, get_post_data_from_https_url,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type ThreadResponder = fn(&AtUri) -> Result<GetPostThreadResponse, XrpcError>;

/// In-memory API that records every call it receives
struct FakeApi {
    handles: HashMap<String, String>,
    responder: ThreadResponder,
    calls: Mutex<Vec<String>>,
    last_params: Mutex<Option<ThreadParams>>,
}

impl FakeApi {
    fn new(responder: ThreadResponder) -> Self {
        let mut handles = HashMap::new();
        handles.insert(
            "alice.bsky.social".to_string(),
            "did:plc:alice".to_string(),
        );
        Self {
            handles,
            responder,
            calls: Mutex::new(Vec::new()),
            last_params: Mutex::new(None),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl BskyApi for FakeApi {
    fn resolve_handle(&self, handle: &Handle) -> Result<Did, XrpcError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("resolveHandle {handle}"));
        match self.handles.get(handle.as_str()) {
            Some(did) => Ok(Did::new(did.as_str()).unwrap()),
            None => Err(XrpcError::Status {
                status: 400,
                error: Some("InvalidRequest".to_string()),
                message: Some("Unable to resolve handle".to_string()),
            }),
        }
    }

    fn get_post_thread(
        &self,
        uri: &AtUri,
        params: &ThreadParams,
    ) -> Result<GetPostThreadResponse, XrpcError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("getPostThread {uri}"));
        *self.last_params.lock().unwrap() = Some(*params);
        (self.responder)(uri)
    }
}

/// Helper to build a thread response with one reply for the requested URI
fn thread_for(uri: &AtUri) -> Result<GetPostThreadResponse, XrpcError> {
    let json = serde_json::json!({
        "thread": {
            "$type": "app.bsky.feed.defs#threadViewPost",
            "post": {
                "uri": uri.as_str(),
                "cid": "bafyroot",
                "author": {"did": uri.authority(), "handle": "alice.bsky.social", "displayName": "Alice"},
                "record": {"text": "root post", "createdAt": "2024-05-01T12:00:00.000Z"},
                "replyCount": 1,
                "indexedAt": "2024-05-01T12:00:00.000Z"
            },
            "replies": [{
                "$type": "app.bsky.feed.defs#notFoundPost",
                "uri": "at://did:plc:gone/app.bsky.feed.post/1",
                "notFound": true
            }]
        }
    });
    Ok(serde_json::from_value(json).unwrap())
}

fn not_found(_: &AtUri) -> Result<GetPostThreadResponse, XrpcError> {
    Err(XrpcError::Status {
        status: 400,
        error: Some("NotFound".to_string()),
        message: Some("Post not found: at://did:plc:alice/app.bsky.feed.post/3kabc".to_string()),
    })
}

fn blocked_root(uri: &AtUri) -> Result<GetPostThreadResponse, XrpcError> {
    let json = serde_json::json!({
        "thread": {
            "$type": "app.bsky.feed.defs#blockedPost",
            "uri": uri.as_str(),
            "blocked": true,
            "author": {"did": uri.authority()}
        }
    });
    Ok(serde_json::from_value(json).unwrap())
}

fn not_found_root(uri: &AtUri) -> Result<GetPostThreadResponse, XrpcError> {
    let json = serde_json::json!({
        "thread": {
            "$type": "app.bsky.feed.defs#notFoundPost",
            "uri": uri.as_str(),
            "notFound": true
        }
    });
    Ok(serde_json::from_value(json).unwrap())
}

fn empty_body(_: &AtUri) -> Result<GetPostThreadResponse, XrpcError> {
    Ok(GetPostThreadResponse { thread: None })
}

fn server_error(_: &AtUri) -> Result<GetPostThreadResponse, XrpcError> {
    Err(XrpcError::Status {
        status: 502,
        error: None,
        message: None,
    })
}

fn options(api: &Arc<FakeApi>) -> GetPostOptions {
    GetPostOptions::new().with_agent(api.clone())
}

#[test]
fn test_fetch_by_handle_resolves_then_fetches() {
    let api = Arc::new(FakeApi::new(thread_for));

    let thread = get_post_data_from_https_url(
        "https://bsky.app/profile/alice.bsky.social/post/3kabc",
        &options(&api),
    )
    .unwrap();

    assert_eq!(
        thread.post.uri.as_str(),
        "at://did:plc:alice/app.bsky.feed.post/3kabc"
    );
    assert_eq!(thread.post.author.display(), "Alice");
    assert_eq!(thread.replies.len(), 1);
    assert!(matches!(thread.replies[0], ThreadNode::NotFound(_)));
    assert_eq!(
        api.calls(),
        vec![
            "resolveHandle alice.bsky.social".to_string(),
            "getPostThread at://did:plc:alice/app.bsky.feed.post/3kabc".to_string(),
        ]
    );
}

#[test]
fn test_fetch_by_did_skips_resolution() {
    let api = Arc::new(FakeApi::new(thread_for));

    get_post_data_from_https_url(
        "https://bsky.app/profile/did:plc:bob/post/3kxyz",
        &options(&api),
    )
    .unwrap();

    assert_eq!(
        api.calls(),
        vec!["getPostThread at://did:plc:bob/app.bsky.feed.post/3kxyz".to_string()]
    );
}

#[test]
fn test_thread_params_are_forwarded() {
    let api = Arc::new(FakeApi::new(thread_for));
    let opts = options(&api).with_depth(3).with_parent_height(10);

    get_post_data_from_https_url("https://bsky.app/profile/did:plc:bob/post/3kxyz", &opts)
        .unwrap();

    assert_eq!(
        *api.last_params.lock().unwrap(),
        Some(ThreadParams {
            depth: Some(3),
            parent_height: Some(10),
        })
    );
}

#[test]
fn test_invalid_url_makes_no_calls() {
    let api = Arc::new(FakeApi::new(thread_for));

    let err = get_post_data_from_https_url("bsky.app/profile/x/post/y", &options(&api)).unwrap_err();
    assert!(matches!(err, FetchError::Url(UrlError::InvalidUrl(_))));
    assert_eq!(
        err.to_string(),
        "Invalid URL provided: bsky.app/profile/x/post/y"
    );

    let err = get_post_data_from_https_url(
        "https://bsky.app/profile/alice.bsky.social",
        &options(&api),
    )
    .unwrap_err();
    assert!(matches!(err, FetchError::Url(UrlError::InvalidFormat(_))));

    assert!(api.calls().is_empty());
}

#[test]
fn test_unresolvable_handle() {
    let api = Arc::new(FakeApi::new(thread_for));

    let err = get_post_data_from_https_url(
        "https://bsky.app/profile/nobody.example/post/3kabc",
        &options(&api),
    )
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Failed to resolve handle \"nobody.example\": Unable to resolve handle"
    );
    assert_eq!(api.calls().len(), 1);
}

#[test]
fn test_post_not_found_error() {
    let api = Arc::new(FakeApi::new(not_found));

    let err = get_post_data_from_https_url(
        "https://bsky.app/profile/alice.bsky.social/post/3kabc",
        &options(&api),
    )
    .unwrap_err();

    assert!(matches!(err, FetchError::PostNotFound(_)));
    assert_eq!(
        err.to_string(),
        "Post not found: at://did:plc:alice/app.bsky.feed.post/3kabc"
    );
}

#[test]
fn test_not_found_root_node() {
    let api = Arc::new(FakeApi::new(not_found_root));

    let err = get_post_data_from_https_url(
        "https://bsky.app/profile/did:plc:bob/post/3kxyz",
        &options(&api),
    )
    .unwrap_err();

    assert!(matches!(err, FetchError::PostNotFound(_)));
}

#[test]
fn test_non_post_root_is_invalid_thread_data() {
    for responder in [blocked_root as ThreadResponder, empty_body] {
        let api = Arc::new(FakeApi::new(responder));

        let err = get_post_data_from_https_url(
            "https://bsky.app/profile/did:plc:bob/post/3kxyz",
            &options(&api),
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Invalid thread data received for at://did:plc:bob/app.bsky.feed.post/3kxyz"
        );
    }
}

#[test]
fn test_other_api_errors() {
    let api = Arc::new(FakeApi::new(server_error));

    let err = get_post_data_from_https_url(
        "https://bsky.app/profile/did:plc:bob/post/3kxyz",
        &options(&api),
    )
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "API error fetching post at://did:plc:bob/app.bsky.feed.post/3kxyz: Unknown error"
    );
    assert_eq!(
        err.uri().map(AtUri::as_str),
        Some("at://did:plc:bob/app.bsky.feed.post/3kxyz")
    );
}

#[test]
fn test_convert_only() {
    let api = FakeApi::new(thread_for);

    let uri = convert_https_url_to_at_uri(
        "https://bsky.app/profile/alice.bsky.social/post/3kabc",
        &api,
    )
    .unwrap();

    assert_eq!(uri.as_str(), "at://did:plc:alice/app.bsky.feed.post/3kabc");
    assert_eq!(
        uri.to_https_url("https://bsky.app").as_deref(),
        Some("https://bsky.app/profile/did:plc:alice/post/3kabc")
    );
}
