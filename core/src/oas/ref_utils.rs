#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Splitting `$ref` strings into document and fragment parts, and walking
//! JSON Pointers into raw documents.

use percent_encoding::percent_decode_str;
use serde_json::Value;
use url::Url;

/// A `$ref` split at the first `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParsedReference<'a> {
    /// Everything before `#` (empty for local references).
    pub document: &'a str,
    /// Everything after `#`, if a `#` is present.
    pub fragment: Option<&'a str>,
}

impl ParsedReference<'_> {
    /// True for references into the current document (`#/...`).
    pub fn is_local(&self) -> bool {
        self.document.is_empty()
    }
}

/// Splits a reference string into document and fragment.
pub(crate) fn parse_reference(ref_str: &str) -> ParsedReference<'_> {
    match ref_str.split_once('#') {
        Some((document, fragment)) => ParsedReference {
            document,
            fragment: Some(fragment),
        },
        None => ParsedReference {
            document: ref_str,
            fragment: None,
        },
    }
}

/// Decodes a JSON Pointer segment (handles `~1`, `~0` and percent-encoding).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = percent_decode_str(segment).decode_utf8_lossy();
    decoded.replace("~1", "/").replace("~0", "~")
}

/// Resolves a JSON Pointer fragment against a document.
///
/// `None` or an empty fragment addresses the document root.
pub(crate) fn resolve_pointer<'a>(root: &'a Value, fragment: Option<&str>) -> Option<&'a Value> {
    let pointer = match fragment {
        None | Some("") => return Some(root),
        Some(p) => p,
    };
    if !pointer.starts_with('/') {
        return None;
    }

    pointer[1..]
        .split('/')
        .try_fold(root, |node, segment| {
            let key = decode_pointer_segment(segment);
            match node {
                Value::Object(map) => map.get(&key),
                Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            }
        })
}

/// Resolves the document part of a reference against the referring document.
///
/// Falls back to the raw document string when no usable base is known.
pub(crate) fn resolve_document_uri(document: &str, base: Option<&str>) -> String {
    if let Ok(absolute) = Url::parse(document) {
        return absolute.to_string();
    }
    base.and_then(|b| Url::parse(b).ok())
        .and_then(|b| b.join(document).ok())
        .map(|u| u.to_string())
        .unwrap_or_else(|| document.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_reference_parts() {
        let local = parse_reference("#/definitions/Pet");
        assert!(local.is_local());
        assert_eq!(local.fragment, Some("/definitions/Pet"));

        let external = parse_reference("common.yaml#/Error");
        assert!(!external.is_local());
        assert_eq!(external.document, "common.yaml");
        assert_eq!(external.fragment, Some("/Error"));

        let whole = parse_reference("schemas/pet.json");
        assert_eq!(whole.document, "schemas/pet.json");
        assert_eq!(whole.fragment, None);
    }

    #[test]
    fn test_decode_pointer_segment() {
        assert_eq!(decode_pointer_segment("a~1b"), "a/b");
        assert_eq!(decode_pointer_segment("a~0b"), "a~b");
        assert_eq!(decode_pointer_segment("~01"), "~1");
        assert_eq!(decode_pointer_segment("a%20b"), "a b");
    }

    #[test]
    fn test_resolve_pointer() {
        let doc = json!({
            "paths": { "/pets/{id}": { "get": { "tags": ["a", "b"] } } }
        });
        assert_eq!(resolve_pointer(&doc, None), Some(&doc));
        assert_eq!(resolve_pointer(&doc, Some("")), Some(&doc));
        assert_eq!(
            resolve_pointer(&doc, Some("/paths/~1pets~1{id}/get/tags/1")),
            Some(&json!("b"))
        );
        assert_eq!(resolve_pointer(&doc, Some("/paths/missing")), None);
        assert_eq!(resolve_pointer(&doc, Some("no-slash")), None);
    }

    #[test]
    fn test_resolve_document_uri() {
        assert_eq!(
            resolve_document_uri("common.json", Some("file:///specs/api.json")),
            "file:///specs/common.json"
        );
        assert_eq!(
            resolve_document_uri("../shared/a.yaml", Some("file:///specs/v1/api.yaml")),
            "file:///specs/shared/a.yaml"
        );
        assert_eq!(
            resolve_document_uri("https://example.com/x.json", Some("file:///specs/api.json")),
            "https://example.com/x.json"
        );
        assert_eq!(resolve_document_uri("common.json", None), "common.json");
    }
}
