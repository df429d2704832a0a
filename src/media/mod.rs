//! Media references: URL normalization and media field extraction.
//!
//! ```text
//! MediaValue ──► MediaExtractor ──► UrlNormalizer ──► fetchable URL
//!  (any shape)    (shape priority)    (ipfs/ar/relative)
//! ```

pub mod extract;
pub mod url;

pub use extract::{extract_media_url, MediaExtractor, MediaObject, MediaValue, MEDIA_SHAPES};
pub use url::{
    is_http_url, normalize, Gateways, UrlNormalizer, DEFAULT_ARWEAVE_GATEWAY, DEFAULT_IPFS_GATEWAY,
};
