//! Get and set attribute values by dotted or bracketed path.
//!
//! Paths address nested mappings and sequences: `"banner.header"`,
//! `"items.0.title"`, `"items[0].title"`. Bracketed segments are normalized
//! to dotted segments before traversal, and a leading dot is stripped.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::Attr;

lazy_static! {
    static ref BRACKET_SEGMENT_REGEX: Regex = Regex::new(r"\[(\w+)\]").unwrap();
}

fn segments(path: &str) -> Vec<String> {
    let normalized = BRACKET_SEGMENT_REGEX.replace_all(path, ".$1");
    normalized
        .trim_start_matches('.')
        .split('.')
        .map(str::to_string)
        .collect()
}

fn is_index(segment: &str) -> bool {
    segment.parse::<usize>().is_ok()
}

/// Resolves `path` against an attribute tree.
///
/// Returns `None` when any intermediate segment is absent or lands on a
/// value that cannot hold children. Embedded models are traversed like
/// mappings over their live attributes.
pub fn get<'a>(root: &'a BTreeMap<String, Attr>, path: &str) -> Option<&'a Attr> {
    let segments = segments(path);
    let (first, rest) = segments.split_first()?;
    let mut current = root.get(first.as_str())?;
    for segment in rest {
        current = child(current, segment)?;
    }
    Some(current)
}

fn child<'a>(attr: &'a Attr, segment: &str) -> Option<&'a Attr> {
    match attr {
        Attr::Object(map) => map.get(segment),
        Attr::Model(model) => model.attrs.get(segment),
        Attr::Array(items) => items.get(segment.parse::<usize>().ok()?),
        Attr::Null | Attr::Text(_) => None,
    }
}

/// Writes `value` at `path`, creating missing intermediate containers.
///
/// A numeric-looking next segment vivifies a sequence, anything else a
/// mapping; sequences are extended with `Attr::Null` up to the target
/// index. An existing intermediate that cannot hold the next segment is
/// replaced with a fresh container.
pub fn set(root: &mut BTreeMap<String, Attr>, path: &str, value: Attr) {
    let segments = segments(path);
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    if first.is_empty() {
        return;
    }
    let slot = root.entry(first.clone()).or_insert(Attr::Null);
    set_in(slot, rest, value);
}

fn set_in(attr: &mut Attr, segments: &[String], value: Attr) {
    let Some((segment, rest)) = segments.split_first() else {
        *attr = value;
        return;
    };

    match attr {
        Attr::Object(map) => {
            let child = map.entry(segment.clone()).or_insert(Attr::Null);
            set_in(child, rest, value);
        }
        Attr::Model(model) => {
            let child = model.attrs.entry(segment.clone()).or_insert(Attr::Null);
            set_in(child, rest, value);
        }
        Attr::Array(items) if is_index(segment) => {
            let index: usize = segment.parse().unwrap_or_default();
            if index >= items.len() {
                items.resize(index + 1, Attr::Null);
            }
            set_in(&mut items[index], rest, value);
        }
        other => {
            *other = if is_index(segment) {
                Attr::Array(Vec::new())
            } else {
                Attr::Object(BTreeMap::new())
            };
            set_in(other, segments, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_with(path: &str, value: &str) -> BTreeMap<String, Attr> {
        let mut root = BTreeMap::new();
        set(&mut root, path, Attr::from(value));
        root
    }

    #[test]
    fn test_set_and_get_top_level() {
        let root = root_with("header", "hello");
        assert_eq!(get(&root, "header").unwrap().as_text(), Some("hello"));
    }

    #[test]
    fn test_get_missing_path_is_none() {
        let root = root_with("header", "hello");
        assert!(get(&root, "missing").is_none());
        assert!(get(&root, "header.deeper").is_none());
    }

    #[test]
    fn test_set_vivifies_nested_mapping() {
        let root = root_with("banner.title", "hi");
        let banner = get(&root, "banner").unwrap().as_object().unwrap();
        assert_eq!(banner["title"].as_text(), Some("hi"));
    }

    #[test]
    fn test_set_vivifies_sequence_for_numeric_segment() {
        let root = root_with("items.1.title", "second");
        let items = get(&root, "items").unwrap().as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], Attr::Null);
        assert_eq!(get(&root, "items.1.title").unwrap().as_text(), Some("second"));
    }

    #[test]
    fn test_bracket_segments_normalize() {
        let root = root_with("items[0].title", "first");
        assert_eq!(get(&root, "items.0.title").unwrap().as_text(), Some("first"));
        assert_eq!(get(&root, "items[0].title").unwrap().as_text(), Some("first"));
    }

    #[test]
    fn test_leading_dot_is_stripped() {
        let root = root_with(".header", "hello");
        assert_eq!(get(&root, "header").unwrap().as_text(), Some("hello"));
    }

    #[test]
    fn test_set_replaces_scalar_intermediate() {
        let mut root = root_with("banner", "i am text");
        set(&mut root, "banner.title", Attr::from("hi"));
        assert_eq!(get(&root, "banner.title").unwrap().as_text(), Some("hi"));
    }

    #[test]
    fn test_set_overwrites_existing_value() {
        let mut root = root_with("header", "old");
        set(&mut root, "header", Attr::from("new"));
        assert_eq!(get(&root, "header").unwrap().as_text(), Some("new"));
    }

    #[test]
    fn test_numeric_segment_on_existing_mapping_uses_string_key() {
        let mut root = root_with("config.retries", "3");
        set(&mut root, "config.0", Attr::from("zeroth"));
        let config = get(&root, "config").unwrap().as_object().unwrap();
        assert_eq!(config["0"].as_text(), Some("zeroth"));
    }

    #[test]
    fn test_get_traverses_embedded_model() {
        use crate::model::Model;

        let mut child = Model::new();
        child.set("header", "nested");
        let mut root = BTreeMap::new();
        root.insert("child".to_string(), Attr::from(child));
        assert_eq!(get(&root, "child.header").unwrap().as_text(), Some("nested"));
    }

    #[test]
    fn test_array_index_out_of_bounds_get_is_none() {
        let root = root_with("items.0.title", "first");
        assert!(get(&root, "items.5.title").is_none());
    }
}
