//! Post records and their display projection.
//!
//! # Flow
//!
//! ```text
//! JSON ──► Post { metadata, actions } ──► PostProjector ──► PostProjection
//! ```
//!
//! Decoding is total: a record that parses as JSON always yields a `Post`,
//! and projecting a `Post` always yields a `PostProjection`.

pub mod metadata;
pub mod projection;
pub mod record;

pub use metadata::{PostAction, PostMetadata};
pub use projection::{
    project, project_feed, FeedEntry, PostProjection, PostProjector, UNTITLED_POST,
};
pub use record::{Feed, Post};
