//! Post and author views as returned by the AppView

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::atproto::{AtUri, Did};

/// Minimal author profile attached to every post view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileViewBasic {
    pub did: Did,
    pub handle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl ProfileViewBasic {
    /// Display name when set and non-blank, otherwise the handle
    pub fn display(&self) -> &str {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(self.handle.as_str())
    }
}

/// The `app.bsky.feed.post` record body
///
/// Only the fields needed for display are decoded; facets, embeds and
/// reply refs are kept out of the typed view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    #[serde(default)]
    pub text: String,
    /// Author-supplied timestamp; not guaranteed to be well formed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub langs: Vec<String>,
}

impl PostRecord {
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        self.created_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
    }
}

/// A hydrated post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub uri: AtUri,
    pub cid: String,
    pub author: ProfileViewBasic,
    #[serde(default)]
    pub record: PostRecord,
    /// Raw embed view (images, links, quotes); rendered as a hint only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed: Option<serde_json::Value>,
    #[serde(default)]
    pub reply_count: u64,
    #[serde(default)]
    pub repost_count: u64,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub quote_count: u64,
    pub indexed_at: DateTime<Utc>,
}

impl PostView {
    /// When the post was written, falling back to when it was indexed
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.record
            .created_at()
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or(self.indexed_at)
    }

    /// The embed's `$type`, e.g. `app.bsky.embed.images#view`
    pub fn embed_type(&self) -> Option<&str> {
        self.embed.as_ref()?.get("$type")?.as_str()
    }
}
