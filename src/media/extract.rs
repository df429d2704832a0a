//! Media field extraction.
//!
//! The protocol has returned media in several shapes over time. A media
//! value is either a bare URL string or an object holding one of:
//!
//! ```text
//! { "optimized": { "uri": "..." } }   // resized/transcoded copy
//! { "raw":       { "uri": "..." } }   // original upload
//! { "original":  { "url": "..." } }   // legacy shape
//! { "item":      "..." }              // current metadata standard
//! ```
//!
//! Shapes are tried in `MEDIA_SHAPES` order and the first non-empty hit wins.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::url::UrlNormalizer;

/// A loosely-shaped media value as found in upstream records.
///
/// Built from any JSON value without failing; values that cannot hold a
/// URL become [`MediaValue::Empty`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum MediaValue {
    /// Null, false, zero, empty string or any non-media JSON value
    #[default]
    Empty,

    /// A bare URL string
    Url(String),

    /// An object that may carry one or more known shapes
    Object(MediaObject),
}

/// The known nested shapes of an object media value.
///
/// Every field is optional; an object may carry several at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaObject {
    /// `optimized.uri`
    pub optimized_uri: Option<String>,

    /// `raw.uri`
    pub raw_uri: Option<String>,

    /// `original.url`
    pub original_url: Option<String>,

    /// `item`
    pub item: Option<String>,
}

impl MediaObject {
    fn from_map(map: &serde_json::Map<String, Value>) -> Self {
        let nested = |outer: &str, inner: &str| {
            map.get(outer)
                .and_then(|v| v.get(inner))
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Self {
            optimized_uri: nested("optimized", "uri"),
            raw_uri: nested("raw", "uri"),
            original_url: nested("original", "url"),
            item: map.get("item").and_then(Value::as_str).map(str::to_string),
        }
    }

    fn to_value(&self) -> Value {
        let mut map = serde_json::Map::new();
        if let Some(uri) = &self.optimized_uri {
            map.insert("optimized".into(), serde_json::json!({ "uri": uri }));
        }
        if let Some(uri) = &self.raw_uri {
            map.insert("raw".into(), serde_json::json!({ "uri": uri }));
        }
        if let Some(url) = &self.original_url {
            map.insert("original".into(), serde_json::json!({ "url": url }));
        }
        if let Some(item) = &self.item {
            map.insert("item".into(), Value::String(item.clone()));
        }
        Value::Object(map)
    }
}

impl MediaValue {
    /// Create a media value from a bare URL
    pub fn url(url: impl Into<String>) -> Self {
        let url = url.into();
        if url.is_empty() {
            Self::Empty
        } else {
            Self::Url(url)
        }
    }

    /// Create an object media value holding only `item`
    pub fn item(item: impl Into<String>) -> Self {
        Self::Object(MediaObject {
            item: Some(item.into()),
            ..Default::default()
        })
    }

    /// Returns true if this value cannot yield a URL at all
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<&Value> for MediaValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::url(s.as_str()),
            Value::Object(map) => Self::Object(MediaObject::from_map(map)),
            // null, booleans, numbers and arrays never hold a usable URL
            _ => Self::Empty,
        }
    }
}

impl From<Value> for MediaValue {
    fn from(value: Value) -> Self {
        Self::from(&value)
    }
}

impl From<MediaValue> for Value {
    fn from(media: MediaValue) -> Self {
        match media {
            MediaValue::Empty => Value::Null,
            MediaValue::Url(url) => Value::String(url),
            MediaValue::Object(object) => object.to_value(),
        }
    }
}

/// A named accessor for one known media shape
pub type ShapeAccessor = fn(&MediaObject) -> Option<&str>;

/// Known object shapes in priority order: most recent API shape first.
pub const MEDIA_SHAPES: &[(&str, ShapeAccessor)] = &[
    ("optimized.uri", optimized_uri),
    ("raw.uri", raw_uri),
    ("original.url", original_url),
    ("item", item),
];

fn optimized_uri(m: &MediaObject) -> Option<&str> {
    m.optimized_uri.as_deref()
}

fn raw_uri(m: &MediaObject) -> Option<&str> {
    m.raw_uri.as_deref()
}

fn original_url(m: &MediaObject) -> Option<&str> {
    m.original_url.as_deref()
}

fn item(m: &MediaObject) -> Option<&str> {
    m.item.as_deref()
}

/// Extracts a single fetchable URL from a media value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaExtractor {
    normalizer: UrlNormalizer,
}

impl MediaExtractor {
    /// Create an extractor that normalizes with the given normalizer
    pub fn new(normalizer: UrlNormalizer) -> Self {
        Self { normalizer }
    }

    /// The normalizer applied to every extracted URL
    pub fn normalizer(&self) -> &UrlNormalizer {
        &self.normalizer
    }

    /// Extract and normalize the URL, or `""` if nothing usable is present
    pub fn extract(&self, media: &MediaValue) -> String {
        match media {
            MediaValue::Empty => String::new(),
            MediaValue::Url(url) => self.normalizer.normalize(url),
            MediaValue::Object(object) => match first_shape(object) {
                Some((shape, url)) => {
                    debug!(shape, "Matched media shape");
                    self.normalizer.normalize(url)
                }
                None => {
                    debug!("Media object matched no known shape");
                    self.normalizer.normalize("")
                }
            },
        }
    }
}

/// The first shape in priority order holding a non-empty URL
pub fn first_shape(object: &MediaObject) -> Option<(&'static str, &str)> {
    MEDIA_SHAPES.iter().find_map(|(name, accessor)| {
        accessor(object)
            .filter(|url| !url.is_empty())
            .map(|url| (*name, url))
    })
}

/// Extract a URL from a media value using the default gateways
pub fn extract_media_url(media: &MediaValue) -> String {
    MediaExtractor::default().extract(media)
}
