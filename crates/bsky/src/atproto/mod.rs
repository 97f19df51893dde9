//! AT Protocol primitives
//!
//! This module provides:
//! - DID and handle identifiers
//! - AT URI construction and inspection
//! - Public post URL parsing

mod at_uri;
mod identifier;
mod post_url;

pub use crate::error::{AtUriError, UrlError};
pub use at_uri::{AtUri, POST_COLLECTION};
pub use identifier::{Did, Handle, Identifier};
pub use post_url::PostUrl;
