//! URL Normalization Integration Tests
//!
//! Scheme rewriting, passthrough, relative paths and idempotence.

use believr::media::{Gateways, UrlNormalizer};
use believr::normalize;

const SAMPLES: &[&str] = &[
    "",
    "ipfs://abc",
    "ipfs://bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi/1.png",
    "ar://xyz",
    "https://x.com/y",
    "http://insecure.example/img.jpg",
    "foo/bar",
    "/rooted/path",
    "avatar.png",
];

#[test]
fn test_documented_cases() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize("ipfs://abc"), "https://gateway.ipfscdn.io/ipfs/abc");
    assert_eq!(normalize("ar://xyz"), "https://arweave.net/xyz");
    assert_eq!(normalize("https://x.com/y"), "https://x.com/y");
    assert_eq!(normalize("foo/bar"), "/foo/bar");
}

#[test]
fn test_idempotent() {
    for url in SAMPLES {
        let once = normalize(url);
        assert_eq!(normalize(&once), once, "re-normalizing {:?}", url);
    }
}

#[test]
fn test_idempotent_with_custom_gateways() {
    let gateways = Gateways::new("https://ipfs.local/ipfs", "http://ar.local");
    let normalizer = UrlNormalizer::new(gateways);

    for url in SAMPLES {
        let once = normalizer.normalize(url);
        assert_eq!(normalizer.normalize(&once), once, "re-normalizing {:?}", url);
    }
}

#[test]
fn test_pure_across_threads() {
    let expected: Vec<String> = SAMPLES.iter().map(|u| normalize(u)).collect();

    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| SAMPLES.iter().map(|u| normalize(u)).collect::<Vec<_>>()))
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_scheme_must_be_a_prefix() {
    // Scheme text appearing mid-string is a relative path, not a reference
    assert_eq!(normalize("see ipfs://abc"), "/see ipfs://abc");
    assert_eq!(normalize("IPFS://abc"), "/IPFS://abc");
}
