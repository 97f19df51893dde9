//! Thread view model (`app.bsky.feed.defs#threadViewPost` and friends)

use serde::{Deserialize, Deserializer, Serialize};

use super::PostView;
use crate::atproto::{AtUri, Did};

/// One node of a thread tree, discriminated by `$type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "$type")]
pub enum ThreadNode {
    #[serde(rename = "app.bsky.feed.defs#threadViewPost")]
    Post(ThreadViewPost),
    #[serde(rename = "app.bsky.feed.defs#notFoundPost")]
    NotFound(NotFoundPost),
    #[serde(rename = "app.bsky.feed.defs#blockedPost")]
    Blocked(BlockedPost),
    /// A node type this crate does not know about
    #[serde(other)]
    Unknown,
}

/// What a reply slot may hold
pub type ReplyUnion = ThreadNode;

impl ThreadNode {
    pub fn uri(&self) -> Option<&AtUri> {
        match self {
            Self::Post(post) => Some(&post.post.uri),
            Self::NotFound(not_found) => Some(&not_found.uri),
            Self::Blocked(blocked) => Some(&blocked.uri),
            Self::Unknown => None,
        }
    }

    pub fn as_post(&self) -> Option<&ThreadViewPost> {
        match self {
            Self::Post(post) => Some(post),
            _ => None,
        }
    }
}

/// A visible post with its surrounding thread context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadViewPost {
    pub post: PostView,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_nested"
    )]
    pub parent: Option<Box<ThreadNode>>,
    #[serde(default, deserialize_with = "deserialize_nested")]
    pub replies: Vec<ThreadNode>,
}

/// Decode a nested thread level, growing the stack when it runs low
///
/// Tagged nodes are buffered before decoding, so long parent chains and deep
/// reply trees recurse once per level regardless of the outer deserializer.
fn deserialize_nested<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    stacker::maybe_grow(64 * 1024, 1024 * 1024, || T::deserialize(deserializer))
}

impl ThreadViewPost {
    /// Parent chain, root first, ending with the direct parent
    pub fn ancestors(&self) -> Vec<&ThreadNode> {
        let mut chain = Vec::new();
        let mut next = self.parent.as_deref();
        while let Some(node) = next {
            chain.push(node);
            next = node.as_post().and_then(|p| p.parent.as_deref());
        }
        chain.reverse();
        chain
    }

    /// Number of reply nodes loaded below this post, at any depth
    pub fn loaded_reply_count(&self) -> usize {
        self.replies
            .iter()
            .map(|reply| 1 + reply.as_post().map_or(0, Self::loaded_reply_count))
            .sum()
    }
}

/// Placeholder for a post that was deleted or never existed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundPost {
    pub uri: AtUri,
    #[serde(default)]
    pub not_found: bool,
}

/// Placeholder for a post hidden by a block relationship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedPost {
    pub uri: AtUri,
    #[serde(default)]
    pub blocked: bool,
    pub author: BlockedAuthor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockedAuthor {
    pub did: Did,
}
