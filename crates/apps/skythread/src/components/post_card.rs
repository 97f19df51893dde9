//! Post card component - displays a single post

use bsky::PostView;
use chrono::Local;

use super::{Canvas, RenderOnce};

/// Web app used for "open in browser" links
pub const WEB_BASE: &str = "https://bsky.app";

/// Props for PostCard
pub struct PostCard<'a> {
    post: &'a PostView,
    /// Full cards show counts and a link; compact cards are used for context and replies
    compact: bool,
}

impl<'a> PostCard<'a> {
    pub fn new(post: &'a PostView) -> Self {
        Self {
            post,
            compact: false,
        }
    }

    pub fn compact(post: &'a PostView) -> Self {
        Self {
            post,
            compact: true,
        }
    }

    fn format_date(&self) -> String {
        let local = self.post.timestamp().with_timezone(&Local);
        local.format("%b %d, %Y at %H:%M").to_string()
    }

    fn author_line(&self) -> String {
        let author = &self.post.author;
        let name = author.display();
        if name == author.handle {
            format!("@{} · {}", author.handle, self.format_date())
        } else {
            format!("{} (@{}) · {}", name, author.handle, self.format_date())
        }
    }

    fn embed_hint(&self) -> Option<&'static str> {
        let kind = self.post.embed_type()?;
        let hint = match kind.split('#').next().unwrap_or(kind) {
            "app.bsky.embed.images" => "[images]",
            "app.bsky.embed.video" => "[video]",
            "app.bsky.embed.external" => "[link card]",
            "app.bsky.embed.record" => "[quoted post]",
            "app.bsky.embed.recordWithMedia" => "[quoted post with media]",
            _ => "[embed]",
        };
        Some(hint)
    }

    fn counts_line(&self) -> String {
        let post = self.post;
        format!(
            "{} · {} · {} · {}",
            plural(post.reply_count, "reply", "replies"),
            plural(post.repost_count, "repost", "reposts"),
            plural(post.quote_count, "quote", "quotes"),
            plural(post.like_count, "like", "likes"),
        )
    }
}

fn plural(count: u64, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

impl RenderOnce for PostCard<'_> {
    fn render(self, canvas: &mut Canvas) {
        canvas.line(self.author_line());
        canvas.line(&self.post.record.text);
        if let Some(hint) = self.embed_hint() {
            canvas.line(hint);
        }

        if self.compact {
            return;
        }

        canvas.line(self.counts_line());
        if let Some(link) = self.post.uri.to_https_url(WEB_BASE) {
            canvas.line(link);
        }
    }
}
