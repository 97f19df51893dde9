//! Placeholder components for states other than a visible post

use bsky::{BlockedPost, FetchError, NotFoundPost};

use super::{Canvas, RenderOnce};

/// Status line shown while a thread is being fetched
pub struct LoadingIndicator<'a> {
    url: &'a str,
}

impl<'a> LoadingIndicator<'a> {
    pub fn new(url: &'a str) -> Self {
        Self { url }
    }
}

impl RenderOnce for LoadingIndicator<'_> {
    fn render(self, canvas: &mut Canvas) {
        canvas.line(format!("Loading thread for {}...", self.url));
    }
}

/// A post that was deleted or never existed
pub struct NotFoundPlaceholder<'a> {
    post: &'a NotFoundPost,
}

impl<'a> NotFoundPlaceholder<'a> {
    pub fn new(post: &'a NotFoundPost) -> Self {
        Self { post }
    }
}

impl RenderOnce for NotFoundPlaceholder<'_> {
    fn render(self, canvas: &mut Canvas) {
        canvas.line("[Post not found]");
        log::debug!("Missing post in thread: {}", self.post.uri);
    }
}

/// A post hidden by a block
pub struct BlockedPlaceholder<'a> {
    post: &'a BlockedPost,
}

impl<'a> BlockedPlaceholder<'a> {
    pub fn new(post: &'a BlockedPost) -> Self {
        Self { post }
    }
}

impl RenderOnce for BlockedPlaceholder<'_> {
    fn render(self, canvas: &mut Canvas) {
        canvas.line("[Blocked post]");
        log::debug!(
            "Blocked post in thread: {} by {}",
            self.post.uri,
            self.post.author.did
        );
    }
}

/// A failed fetch
pub struct ErrorDisplay<'a> {
    error: &'a FetchError,
}

impl<'a> ErrorDisplay<'a> {
    pub fn new(error: &'a FetchError) -> Self {
        Self { error }
    }

    fn title(&self) -> &'static str {
        match self.error {
            FetchError::Url(_) => "Not a Bluesky post URL",
            FetchError::HandleResolution { .. } => "Unknown account",
            FetchError::PostNotFound(_) => "Post not found",
            FetchError::InvalidThreadData(_) => "Post unavailable",
            FetchError::Api { .. } => "Could not load thread",
        }
    }
}

impl RenderOnce for ErrorDisplay<'_> {
    fn render(self, canvas: &mut Canvas) {
        canvas.line(format!("Error: {}", self.title()));
        canvas.nested(|c| c.line(self.error.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bsky::{AtUri, UrlError};

    #[test]
    fn test_error_display() {
        let uri = AtUri::make("did:plc:abc", "app.bsky.feed.post", "1");
        let error = FetchError::PostNotFound(uri);
        assert_eq!(
            ErrorDisplay::new(&error).to_text(),
            "Error: Post not found\n  Post not found: at://did:plc:abc/app.bsky.feed.post/1\n"
        );

        let error = FetchError::Url(UrlError::InvalidUrl("nope".into()));
        assert!(ErrorDisplay::new(&error).to_text().starts_with("Error: Not a Bluesky post URL"));
    }

    #[test]
    fn test_placeholders() {
        let not_found: NotFoundPost = serde_json::from_str(
            r#"{"uri": "at://did:plc:abc/app.bsky.feed.post/1", "notFound": true}"#,
        )
        .unwrap();
        assert_eq!(NotFoundPlaceholder::new(&not_found).to_text(), "[Post not found]\n");

        let blocked: BlockedPost = serde_json::from_str(
            r#"{"uri": "at://did:plc:abc/app.bsky.feed.post/1", "blocked": true, "author": {"did": "did:plc:abc"}}"#,
        )
        .unwrap();
        assert_eq!(BlockedPlaceholder::new(&blocked).to_text(), "[Blocked post]\n");
    }
}
