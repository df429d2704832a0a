//! Post metadata variants and post actions.
//!
//! Records arrive tagged by `__typename`. Decoding never fails on shape:
//! unknown tags land in `Unknown`/`Other`, missing strings become `""`, and
//! mistyped fields are treated as absent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::media::MediaValue;

const TYPENAME: &str = "__typename";

/// Post content, discriminated by the metadata variant tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum PostMetadata {
    /// `TextOnlyMetadata`
    TextOnly { content: String },

    /// `ArticleMetadata`
    Article {
        title: Option<String>,
        content: String,
    },

    /// `ImageMetadata`
    Image {
        content: String,
        image: Option<MediaValue>,
    },

    /// `VideoMetadata`
    Video {
        title: Option<String>,
        content: String,
        video: Option<MediaValue>,
        /// Poster frame; not every upstream producer sets it
        cover: Option<MediaValue>,
    },

    /// `AudioMetadata`
    Audio {
        title: Option<String>,
        content: String,
        audio: Option<MediaValue>,
    },

    /// Any other or absent tag
    Unknown { typename: Option<String> },
}

impl Default for PostMetadata {
    fn default() -> Self {
        Self::Unknown { typename: None }
    }
}

impl PostMetadata {
    /// The upstream `__typename` of this variant, if known
    pub fn typename(&self) -> Option<&str> {
        match self {
            Self::TextOnly { .. } => Some("TextOnlyMetadata"),
            Self::Article { .. } => Some("ArticleMetadata"),
            Self::Image { .. } => Some("ImageMetadata"),
            Self::Video { .. } => Some("VideoMetadata"),
            Self::Audio { .. } => Some("AudioMetadata"),
            Self::Unknown { typename } => typename.as_deref(),
        }
    }

    /// Body text, or `""` for unknown variants
    pub fn content(&self) -> &str {
        match self {
            Self::TextOnly { content }
            | Self::Article { content, .. }
            | Self::Image { content, .. }
            | Self::Video { content, .. }
            | Self::Audio { content, .. } => content,
            Self::Unknown { .. } => "",
        }
    }

    /// Explicit title, for the variants that carry one
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Article { title, .. } | Self::Video { title, .. } | Self::Audio { title, .. } => {
                title.as_deref()
            }
            Self::TextOnly { .. } | Self::Image { .. } | Self::Unknown { .. } => None,
        }
    }
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

fn media_field(map: &Map<String, Value>, key: &str) -> Option<MediaValue> {
    match map.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => Some(MediaValue::from(value)),
    }
}

impl From<&Value> for PostMetadata {
    fn from(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            debug!("Post metadata is not an object");
            return Self::default();
        };

        let typename = string_field(map, TYPENAME);
        let content = string_field(map, "content").unwrap_or_default();

        match typename.as_deref() {
            Some("TextOnlyMetadata") => Self::TextOnly { content },
            Some("ArticleMetadata") => Self::Article {
                title: string_field(map, "title"),
                content,
            },
            Some("ImageMetadata") => Self::Image {
                content,
                image: media_field(map, "image"),
            },
            Some("VideoMetadata") => Self::Video {
                title: string_field(map, "title"),
                content,
                video: media_field(map, "video"),
                cover: media_field(map, "cover"),
            },
            Some("AudioMetadata") => Self::Audio {
                title: string_field(map, "title"),
                content,
                audio: media_field(map, "audio"),
            },
            other => {
                debug!(typename = ?other, "Unrecognized post metadata variant");
                Self::Unknown {
                    typename: other.map(str::to_string),
                }
            }
        }
    }
}

impl From<Value> for PostMetadata {
    fn from(value: Value) -> Self {
        Self::from(&value)
    }
}

impl From<PostMetadata> for Value {
    fn from(metadata: PostMetadata) -> Self {
        let mut map = Map::new();
        if let Some(typename) = metadata.typename() {
            map.insert(TYPENAME.into(), Value::String(typename.to_string()));
        }

        let mut put = |key: &str, value: Option<Value>| {
            if let Some(value) = value {
                map.insert(key.into(), value);
            }
        };

        match metadata {
            PostMetadata::TextOnly { content } => {
                put("content", Some(Value::String(content)));
            }
            PostMetadata::Article { title, content } => {
                put("title", title.map(Value::String));
                put("content", Some(Value::String(content)));
            }
            PostMetadata::Image { content, image } => {
                put("content", Some(Value::String(content)));
                put("image", image.map(Value::from));
            }
            PostMetadata::Video {
                title,
                content,
                video,
                cover,
            } => {
                put("title", title.map(Value::String));
                put("content", Some(Value::String(content)));
                put("video", video.map(Value::from));
                put("cover", cover.map(Value::from));
            }
            PostMetadata::Audio {
                title,
                content,
                audio,
            } => {
                put("title", title.map(Value::String));
                put("content", Some(Value::String(content)));
                put("audio", audio.map(Value::from));
            }
            PostMetadata::Unknown { .. } => {}
        }

        Value::Object(map)
    }
}

/// An entry in a post's action list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum PostAction {
    /// `SimpleCollectAction`; `collect_limit` of `None` means unlimited
    SimpleCollect { collect_limit: Option<u64> },

    /// Any other action tag
    Other { typename: Option<String> },
}

impl PostAction {
    /// Returns true for the collect action
    pub fn is_collect(&self) -> bool {
        matches!(self, Self::SimpleCollect { .. })
    }
}

/// Reads a limit given as a JSON number or a numeric string.
///
/// Float encodings of whole numbers (`50.0`) are accepted. Anything that is
/// not a whole non-negative number is treated as no limit.
fn limit_field(map: &Map<String, Value>, key: &str) -> Option<u64> {
    let limit = match map.get(key)? {
        Value::Null => return None,
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(whole_limit)),
        Value::String(s) => {
            let s = s.trim();
            s.parse()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole_limit))
        }
        _ => None,
    };

    if limit.is_none() {
        debug!(value = ?map.get(key), "Malformed collect limit");
    }
    limit
}

fn whole_limit(value: f64) -> Option<u64> {
    // 2^64 is the first float past u64::MAX
    let in_range = value >= 0.0 && value < 18_446_744_073_709_551_616.0;
    (in_range && value.fract() == 0.0).then(|| value as u64)
}

impl From<&Value> for PostAction {
    fn from(value: &Value) -> Self {
        let map = value.as_object();
        let typename = map.and_then(|m| string_field(m, TYPENAME));

        let is_collect = typename.as_deref() == Some("SimpleCollectAction");
        match map {
            Some(map) if is_collect => Self::SimpleCollect {
                collect_limit: limit_field(map, "collectLimit"),
            },
            _ => Self::Other { typename },
        }
    }
}

impl From<Value> for PostAction {
    fn from(value: Value) -> Self {
        Self::from(&value)
    }
}

impl From<PostAction> for Value {
    fn from(action: PostAction) -> Self {
        match action {
            PostAction::SimpleCollect { collect_limit } => serde_json::json!({
                TYPENAME: "SimpleCollectAction",
                "collectLimit": collect_limit,
            }),
            PostAction::Other { typename } => match typename {
                Some(typename) => serde_json::json!({ TYPENAME: typename }),
                None => Value::Object(Map::new()),
            },
        }
    }
}
