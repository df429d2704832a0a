//! Media Extraction Integration Tests
//!
//! Shape priority and tolerance of partially-shaped upstream values.

use believr::extract_media_url;
use believr::media::{MediaExtractor, MediaValue};
use serde_json::{json, Value};

fn extract(value: Value) -> String {
    let media: MediaValue = serde_json::from_value(value).unwrap();
    extract_media_url(&media)
}

#[test]
fn test_null_is_empty() {
    assert_eq!(extract(json!(null)), "");
}

#[test]
fn test_string_is_normalized() {
    assert_eq!(extract(json!("ipfs://h")), "https://gateway.ipfscdn.io/ipfs/h");
    assert_eq!(extract(json!("covers/1.jpg")), "/covers/1.jpg");
}

#[test]
fn test_optimized_uri() {
    assert_eq!(extract(json!({ "optimized": { "uri": "https://a" } })), "https://a");
}

#[test]
fn test_raw_only_when_optimized_absent() {
    assert_eq!(extract(json!({ "raw": { "uri": "https://b" } })), "https://b");
    assert_eq!(
        extract(json!({
            "optimized": { "uri": "https://a" },
            "raw": { "uri": "https://b" },
        })),
        "https://a"
    );
}

#[test]
fn test_original_url() {
    assert_eq!(
        extract(json!({
            "original": { "url": "ar://o" },
            "item": "https://c",
        })),
        "https://arweave.net/o"
    );
}

#[test]
fn test_item_only_when_higher_shapes_absent() {
    assert_eq!(extract(json!({ "item": "https://c" })), "https://c");
    assert_eq!(
        extract(json!({ "raw": { "uri": "https://b" }, "item": "https://c" })),
        "https://b"
    );
}

#[test]
fn test_unrecognized_objects_are_empty() {
    assert_eq!(extract(json!({})), "");
    assert_eq!(extract(json!({ "uri": "https://nope" })), "");
    assert_eq!(extract(json!({ "optimized": null, "raw": { "url": "x" } })), "");
}

#[test]
fn test_non_media_json_is_empty() {
    for value in [json!(true), json!(12), json!(["https://a"])] {
        assert_eq!(extract(value), "");
    }
}

#[test]
fn test_repeat_calls_are_identical() {
    let extractor = MediaExtractor::default();
    let media: MediaValue =
        serde_json::from_value(json!({ "raw": { "uri": "ipfs://r" }, "item": "x" })).unwrap();

    let first = extractor.extract(&media);
    for _ in 0..10 {
        assert_eq!(extractor.extract(&media), first);
    }
}
