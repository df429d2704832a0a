//! Post records and feed pages as delivered by the protocol client.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::metadata::{PostAction, PostMetadata};

/// A post: its content metadata plus the actions attached to it.
///
/// Decodes from any JSON value; a non-object becomes `Post::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Post {
    /// Protocol post id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Content variant
    pub metadata: PostMetadata,

    /// Open actions; absent and `null` both decode as empty
    pub actions: Vec<PostAction>,
}

impl Post {
    /// Create a post with no id and no actions
    pub fn new(metadata: PostMetadata) -> Self {
        Self {
            id: None,
            metadata,
            actions: Vec::new(),
        }
    }

    /// Set the post id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Append an action
    pub fn with_action(mut self, action: PostAction) -> Self {
        self.actions.push(action);
        self
    }
}

impl From<&Value> for Post {
    fn from(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            debug!("Post record is not an object");
            return Self::default();
        };

        let id = match map.get("id") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        let actions = match map.get("actions") {
            Some(Value::Array(items)) => items.iter().map(PostAction::from).collect(),
            _ => Vec::new(),
        };

        Self {
            id,
            metadata: map.get("metadata").map(PostMetadata::from).unwrap_or_default(),
            actions,
        }
    }
}

impl From<Value> for Post {
    fn from(value: Value) -> Self {
        Self::from(&value)
    }
}

/// A page of posts.
///
/// Accepts either a bare array or the paginated `{ "items": [...] }` shape.
/// Anything else, including `{ "items": null }`, is an empty page; a
/// malformed element becomes a default post without affecting the others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub struct Feed {
    posts: Vec<Post>,
}

impl Feed {
    /// Create a feed from posts in order
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    /// Posts in feed order
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Consume the feed, yielding its posts
    pub fn into_posts(self) -> Vec<Post> {
        self.posts
    }
}

impl From<&Value> for Feed {
    fn from(value: &Value) -> Self {
        let items = match value {
            Value::Array(items) => Some(items),
            Value::Object(map) => map.get("items").and_then(Value::as_array),
            _ => None,
        };

        match items {
            Some(items) => Self::new(items.iter().map(Post::from).collect()),
            None => {
                debug!("Feed holds no post list");
                Self::default()
            }
        }
    }
}

impl From<Value> for Feed {
    fn from(value: Value) -> Self {
        Self::from(&value)
    }
}
