//! Domain models for thread views

mod post;
mod thread;

pub use post::{PostRecord, PostView, ProfileViewBasic};
pub use thread::{BlockedAuthor, BlockedPost, NotFoundPost, ReplyUnion, ThreadNode, ThreadViewPost};
