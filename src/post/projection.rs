//! Uniform display projection of posts.
//!
//! Feed, profile, post detail and search all render the same
//! `PostProjection`, whatever metadata variant the post carries.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::metadata::{PostAction, PostMetadata};
use super::record::Post;
use crate::media::MediaExtractor;

/// Title shown when a post has no usable title
pub const UNTITLED_POST: &str = "Untitled Post";

/// Display fields of a post, normalized across metadata variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostProjection {
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub video_url: String,

    /// `None` when the post has no cover at all, as opposed to an unusable one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_poster_url: Option<String>,

    pub audio_url: String,
    pub is_collectible: bool,

    /// Only set for collectible posts; `None` also means unlimited
    pub collect_limit: Option<u64>,
}

/// A projected post with its id, as rendered in a feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(flatten)]
    pub projection: PostProjection,
}

/// Projects post records into [`PostProjection`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostProjector {
    extractor: MediaExtractor,
    untitled: String,
}

impl Default for PostProjector {
    fn default() -> Self {
        Self::new(MediaExtractor::default())
    }
}

impl PostProjector {
    /// Create a projector using the given media extractor
    pub fn new(extractor: MediaExtractor) -> Self {
        Self {
            extractor,
            untitled: UNTITLED_POST.to_string(),
        }
    }

    /// Override the fallback title
    pub fn with_untitled(mut self, untitled: impl Into<String>) -> Self {
        self.untitled = untitled.into();
        self
    }

    /// The fallback title for posts without one
    pub fn untitled(&self) -> &str {
        &self.untitled
    }

    /// Project a full post
    pub fn project(&self, post: &Post) -> PostProjection {
        self.project_metadata(&post.metadata, &post.actions)
    }

    /// Project metadata and its action list
    pub fn project_metadata(
        &self,
        metadata: &PostMetadata,
        actions: &[PostAction],
    ) -> PostProjection {
        let collect_limit = collect_action(actions);

        PostProjection {
            title: self.title(metadata),
            content: metadata.content().to_string(),
            image_url: self.image_url(metadata),
            video_url: self.video_url(metadata),
            video_poster_url: self.video_poster_url(metadata),
            audio_url: self.audio_url(metadata),
            is_collectible: collect_limit.is_some(),
            collect_limit: collect_limit.flatten(),
        }
    }

    /// Project a page of posts, keeping feed order
    pub fn project_feed(&self, posts: &[Post]) -> Vec<FeedEntry> {
        posts
            .iter()
            .map(|post| FeedEntry {
                id: post.id.clone(),
                projection: self.project(post),
            })
            .collect()
    }

    fn title(&self, metadata: &PostMetadata) -> String {
        match metadata.title() {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => self.untitled.clone(),
        }
    }

    fn image_url(&self, metadata: &PostMetadata) -> String {
        match metadata {
            PostMetadata::Image {
                image: Some(image), ..
            } => self.extractor.extract(image),
            _ => String::new(),
        }
    }

    fn video_url(&self, metadata: &PostMetadata) -> String {
        match metadata {
            PostMetadata::Video {
                video: Some(video), ..
            } => self.extractor.extract(video),
            _ => String::new(),
        }
    }

    fn video_poster_url(&self, metadata: &PostMetadata) -> Option<String> {
        match metadata {
            PostMetadata::Video { cover, .. } => cover.as_ref().map(|c| self.extractor.extract(c)),
            _ => None,
        }
    }

    fn audio_url(&self, metadata: &PostMetadata) -> String {
        match metadata {
            PostMetadata::Audio {
                audio: Some(audio), ..
            } => self.extractor.extract(audio),
            _ => String::new(),
        }
    }
}

/// The first collect action's limit: outer `None` if not collectible,
/// inner `None` if collectible without a limit.
fn collect_action(actions: &[PostAction]) -> Option<Option<u64>> {
    let limit = actions.iter().find_map(|action| match action {
        PostAction::SimpleCollect { collect_limit } => Some(*collect_limit),
        PostAction::Other { .. } => None,
    });

    if limit.is_none() && !actions.is_empty() {
        debug!(actions = actions.len(), "Post has actions but none is a collect");
    }
    limit
}

/// Project a post with the default gateways and fallback title
pub fn project(post: &Post) -> PostProjection {
    PostProjector::default().project(post)
}

/// Project a page of posts with the default gateways and fallback title
pub fn project_feed(posts: &[Post]) -> Vec<FeedEntry> {
    PostProjector::default().project_feed(posts)
}
