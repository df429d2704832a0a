//! believr - media URL normalization and post projection
//!
//! Protocol records reach the front-end in loosely-typed, evolving shapes.
//! This crate turns them into what every rendering surface (feed, profile,
//! post detail, search) needs: fetchable URLs and one uniform post shape.
//!
//! # Architecture
//!
//! Leaves first:
//! - `media::url`: `ipfs://`, `ar://` and relative paths to fetchable URLs
//! - `media::extract`: heterogeneous media values to a single URL
//! - `post`: metadata variants and actions to a `PostProjection`
//!
//! All of these are pure: no I/O, no global state, identical input gives
//! identical output. Only `config` and `cli` touch the outside world.
//!
//! # Usage
//!
//! ```bash
//! # Normalize URLs
//! believr normalize ipfs://bafy... ar://tx images/logo.png
//!
//! # Project a post record
//! believr project --input post.json --pretty
//!
//! # Project a feed page
//! cat feed.json | believr feed
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod media;
pub mod post;

// Re-export main types at crate root for convenience
pub use config::ResolvedConfig;
pub use error::{Error, Result};
pub use media::{extract_media_url, normalize, MediaExtractor, MediaValue, UrlNormalizer};
pub use post::{
    project, project_feed, Feed, FeedEntry, Post, PostAction, PostMetadata, PostProjection,
    PostProjector,
};
