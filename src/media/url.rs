//! URL normalization for protocol media references.
//!
//! Upstream records point at content with a mix of schemes:
//! - `ipfs://<cid>` content-addressed on IPFS
//! - `ar://<tx>` content-addressed on Arweave
//! - plain `http(s)://` URLs
//! - bare relative paths served by the front-end itself
//!
//! Everything is rewritten into something an `<img>`/`<video>` tag can fetch.

use serde::{Deserialize, Serialize};

/// Default IPFS gateway base
pub const DEFAULT_IPFS_GATEWAY: &str = "https://gateway.ipfscdn.io/ipfs/";

/// Default Arweave gateway base
pub const DEFAULT_ARWEAVE_GATEWAY: &str = "https://arweave.net/";

const IPFS_SCHEME: &str = "ipfs://";
const ARWEAVE_SCHEME: &str = "ar://";

/// Gateway bases used to resolve content-addressed URIs.
///
/// Each base is expected to end with `/`; the hash is appended verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gateways {
    /// Base for `ipfs://` URIs
    #[serde(default = "default_ipfs")]
    pub ipfs: String,

    /// Base for `ar://` URIs
    #[serde(default = "default_arweave")]
    pub arweave: String,
}

fn default_ipfs() -> String {
    DEFAULT_IPFS_GATEWAY.to_string()
}

fn default_arweave() -> String {
    DEFAULT_ARWEAVE_GATEWAY.to_string()
}

impl Default for Gateways {
    fn default() -> Self {
        Self {
            ipfs: default_ipfs(),
            arweave: default_arweave(),
        }
    }
}

impl Gateways {
    /// Create gateways from explicit bases, adding a trailing `/` where missing
    pub fn new(ipfs: impl Into<String>, arweave: impl Into<String>) -> Self {
        Self {
            ipfs: with_trailing_slash(ipfs.into()),
            arweave: with_trailing_slash(arweave.into()),
        }
    }
}

fn with_trailing_slash(mut base: String) -> String {
    if !base.ends_with('/') {
        base.push('/');
    }
    base
}

/// Returns true for absolute `http://` or `https://` URLs
pub fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Rewrites media references into fetchable URLs using a fixed set of gateways.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlNormalizer {
    gateways: Gateways,
}

impl UrlNormalizer {
    /// Create a normalizer for the given gateways
    pub fn new(gateways: Gateways) -> Self {
        Self { gateways }
    }

    /// The gateways this normalizer resolves against
    pub fn gateways(&self) -> &Gateways {
        &self.gateways
    }

    /// Normalize a single URL. Total over all inputs.
    pub fn normalize(&self, url: &str) -> String {
        if url.is_empty() {
            return String::new();
        }

        if let Some(hash) = url.strip_prefix(IPFS_SCHEME) {
            return format!("{}{}", self.gateways.ipfs, hash);
        }

        if let Some(hash) = url.strip_prefix(ARWEAVE_SCHEME) {
            return format!("{}{}", self.gateways.arweave, hash);
        }

        if is_http_url(url) || url.starts_with('/') {
            return url.to_string();
        }

        format!("/{}", url)
    }
}

/// Normalize a URL against the default gateways.
///
/// ```
/// use believr::normalize;
///
/// assert_eq!(normalize("ipfs://abc"), "https://gateway.ipfscdn.io/ipfs/abc");
/// assert_eq!(normalize("foo/bar"), "/foo/bar");
/// ```
pub fn normalize(url: &str) -> String {
    UrlNormalizer::default().normalize(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stays_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_content_addressed_schemes() {
        assert_eq!(normalize("ipfs://abc"), "https://gateway.ipfscdn.io/ipfs/abc");
        assert_eq!(normalize("ar://xyz"), "https://arweave.net/xyz");
        // Scheme with nothing after it still resolves to the gateway root
        assert_eq!(normalize("ipfs://"), "https://gateway.ipfscdn.io/ipfs/");
    }

    #[test]
    fn test_http_passthrough() {
        assert_eq!(normalize("https://x.com/y"), "https://x.com/y");
        assert_eq!(normalize("http://x.com/y?q=1"), "http://x.com/y?q=1");
    }

    #[test]
    fn test_relative_paths_are_rooted() {
        assert_eq!(normalize("foo/bar"), "/foo/bar");
        assert_eq!(normalize("/already/rooted"), "/already/rooted");
    }

    #[test]
    fn test_custom_gateways() {
        let normalizer = UrlNormalizer::new(Gateways::new(
            "https://ipfs.example.org/ipfs",
            "https://ar.example.org/",
        ));

        assert_eq!(
            normalizer.normalize("ipfs://cid"),
            "https://ipfs.example.org/ipfs/cid"
        );
        assert_eq!(normalizer.normalize("ar://tx"), "https://ar.example.org/tx");
    }

    #[test]
    fn test_gateways_deserialize_with_defaults() {
        let gateways: Gateways = serde_json::from_str(r#"{"arweave":"https://a/"}"#).unwrap();
        assert_eq!(gateways.ipfs, DEFAULT_IPFS_GATEWAY);
        assert_eq!(gateways.arweave, "https://a/");
    }
}
