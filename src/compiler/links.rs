//! Link rewriting over the renderer's document tree.
//!
//! Internal links are written against the source layout (`pages/a.md` links
//! to `pages/b.html`). Before encoding, every link and image target whose
//! first path segment names a `[[path_map]]` base is moved to the mapped URL:
//!
//! ```text
//! base = "pages", url = "p/", site url = "https://x/"
//!
//! pages/foo.html   ──►  https://x/p/foo.html
//! other/foo.html   ──►  other/foo.html        (no matching base)
//! foo.html         ──►  foo.html              (single segment)
//! ```

use crate::config::PathMapEntry;
use crate::data::Node;
use std::collections::BTreeMap;

/// Rewrite all link targets in `node` in place.
pub fn rewrite_links(node: &mut Node, path_map: &[PathMapEntry], site_url: &str) {
    match node {
        Node::Scalar(_) => {}
        Node::Sequence(items) => {
            for item in items {
                rewrite_links(item, path_map, site_url);
            }
        }
        Node::Object(map) => {
            let tag = map.get("t").and_then(Node::as_str);
            let is_para = tag == Some("Para");
            let is_link = matches!(tag, Some("Link" | "Image"));

            if is_para {
                if let Some(content) = map.get_mut("c") {
                    rewrite_links(content, path_map, site_url);
                }
            } else if is_link {
                rewrite_target(map, path_map, site_url);
            } else {
                for value in map.values_mut() {
                    rewrite_links(value, path_map, site_url);
                }
            }
        }
    }
}

/// The target of a link-like element is the first entry of the last
/// element of `c`: `{"t": "Link", "c": [attr, inlines, [url, title]]}`.
fn rewrite_target(element: &mut BTreeMap<String, Node>, path_map: &[PathMapEntry], site_url: &str) {
    let Some(Node::Sequence(content)) = element.get_mut("c") else {
        return;
    };
    let Some(Node::Sequence(target)) = content.last_mut() else {
        return;
    };
    let Some(url) = target.first_mut() else {
        return;
    };

    if let Some(link) = url.as_str()
        && let Some(mapped) = replace_root(link, path_map, site_url)
    {
        *url = Node::string(mapped);
    }
}

/// Map the first segment of `link` through the path map.
///
/// Returns `None` when the link has a single segment or its root is not
/// mapped.
pub fn replace_root(link: &str, path_map: &[PathMapEntry], site_url: &str) -> Option<String> {
    let (root, rest) = link.split_once('/')?;
    let entry = path_map.iter().find(|e| e.base == root)?;

    let prefix = if entry.absolute {
        entry.url.clone()
    } else {
        format!("{site_url}{}", entry.url)
    };

    Some(if prefix.is_empty() {
        rest.to_owned()
    } else if prefix.ends_with('/') {
        format!("{prefix}{rest}")
    } else {
        format!("{prefix}/{rest}")
    })
}

/// [`replace_root`], keeping `link` unchanged when nothing maps.
pub fn map_link(link: &str, path_map: &[PathMapEntry], site_url: &str) -> String {
    replace_root(link, path_map, site_url).unwrap_or_else(|| link.to_owned())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(base: &str, url: &str, absolute: bool) -> PathMapEntry {
        PathMapEntry {
            base: base.into(),
            url: url.into(),
            absolute,
        }
    }

    fn link(target: &str) -> serde_json::Value {
        json!({"t": "Link", "c": [["", [], []], [{"t": "Str", "c": "x"}], [target, ""]]})
    }

    fn rewrite(value: serde_json::Value, map: &[PathMapEntry]) -> serde_json::Value {
        let mut node = Node::from(value);
        rewrite_links(&mut node, map, "https://x/");
        serde_json::Value::from(node)
    }

    #[test]
    fn test_replace_root_relative_entry() {
        let map = [entry("pages", "p/", false)];
        assert_eq!(
            replace_root("pages/foo.html", &map, "https://x/").as_deref(),
            Some("https://x/p/foo.html")
        );
        assert_eq!(
            replace_root("pages/sub/foo.html", &map, "https://x/").as_deref(),
            Some("https://x/p/sub/foo.html")
        );
    }

    #[test]
    fn test_replace_root_absolute_entry() {
        let map = [entry("ext", "https://cdn.example.com", true)];
        assert_eq!(
            replace_root("ext/lib.js", &map, "https://x/").as_deref(),
            Some("https://cdn.example.com/lib.js")
        );
    }

    #[test]
    fn test_replace_root_empty_prefix() {
        let map = [entry("pages", "", true)];
        assert_eq!(replace_root("pages/a.html", &map, "").as_deref(), Some("a.html"));
    }

    #[test]
    fn test_replace_root_passthrough() {
        let map = [entry("pages", "p/", false)];
        assert_eq!(replace_root("other/foo.html", &map, "https://x/"), None);
        assert_eq!(replace_root("foo.html", &map, "https://x/"), None);
        assert_eq!(replace_root("https://y/pages/a", &map, "https://x/"), None);
        assert_eq!(map_link("foo.html", &map, "https://x/"), "foo.html");
    }

    #[test]
    fn test_rewrite_nested_in_para_and_blocks() {
        let map = [entry("pages", "p/", false)];
        let doc = json!({
            "pandoc-api-version": [1, 23],
            "meta": {},
            "blocks": [
                {"t": "Para", "c": [link("pages/a.html")]},
                {"t": "BulletList", "c": [[{"t": "Plain", "c": [link("pages/b.html")]}]]},
                {"t": "Para", "c": [{"t": "Image", "c": [["", [], []], [], ["pages/i.png", ""]]}]}
            ]
        });

        let out = rewrite(doc, &map);
        assert_eq!(out["blocks"][0]["c"][0]["c"][2][0], "https://x/p/a.html");
        assert_eq!(out["blocks"][1]["c"][0][0]["c"][0]["c"][2][0], "https://x/p/b.html");
        assert_eq!(out["blocks"][2]["c"][0]["c"][2][0], "https://x/p/i.png");
    }

    #[test]
    fn test_rewrite_unknown_root_is_idempotent() {
        let map = [entry("pages", "p/", false)];
        let doc = json!([{"t": "Para", "c": [link("docs/a.html"), link("a.html")]}]);
        assert_eq!(rewrite(doc.clone(), &map), doc);
        assert_eq!(rewrite(rewrite(doc.clone(), &map), &map), doc);
    }

    #[test]
    fn test_rewrite_ignores_malformed_links() {
        let map = [entry("pages", "p/", false)];
        let doc = json!([
            {"t": "Link", "c": []},
            {"t": "Link", "c": [[1, "pages/a.html"]]},
            {"t": "Link"},
            {"t": "Link", "c": "pages/a.html"}
        ]);
        assert_eq!(rewrite(doc.clone(), &map), doc);
    }
}
