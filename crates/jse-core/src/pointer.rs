//! # JSON Pointer
//!
//! RFC 6901 paths identifying a position inside a document, e.g.
//! `/database/port` or `/tags/0`. The root is the empty pointer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An RFC 6901 JSON pointer.
///
/// Built incrementally while walking a document: each step returns a new
/// pointer, so a parent path can be reused for every child.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonPointer(String);

impl JsonPointer {
    /// The pointer addressing the whole document.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Pointer to the member `key` of the object at `self`.
    ///
    /// `~` and `/` inside the key are escaped as `~0` and `~1`.
    pub fn child_key(&self, key: &str) -> Self {
        let mut out = String::with_capacity(self.0.len() + key.len() + 1);
        out.push_str(&self.0);
        out.push('/');
        for c in key.chars() {
            match c {
                '~' => out.push_str("~0"),
                '/' => out.push_str("~1"),
                other => out.push(other),
            }
        }
        Self(out)
    }

    /// Pointer to element `index` of the array at `self`.
    pub fn child_index(&self, index: usize) -> Self {
        Self(format!("{}/{}", self.0, index))
    }

    /// Take existing pointer text such as `/definitions/endpoint`.
    ///
    /// Returns `None` unless the text is empty or starts with `/`.
    pub fn parse(text: &str) -> Option<Self> {
        (text.is_empty() || text.starts_with('/')).then(|| Self(text.to_string()))
    }

    /// Raw pointer text; the root is `""`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the root pointer.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("(root)")
        } else {
            f.write_str(&self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_empty_and_displays_as_root() {
        let root = JsonPointer::root();
        assert_eq!(root.as_str(), "");
        assert!(root.is_root());
        assert_eq!(root.to_string(), "(root)");
    }

    #[test]
    fn nested_paths() {
        let p = JsonPointer::root().child_key("database").child_key("port");
        assert_eq!(p.as_str(), "/database/port");
        let p = JsonPointer::root().child_key("tags").child_index(3);
        assert_eq!(p.to_string(), "/tags/3");
    }

    #[test]
    fn special_characters_are_escaped() {
        let p = JsonPointer::root().child_key("a/b").child_key("m~n");
        assert_eq!(p.as_str(), "/a~1b/m~0n");
    }

    #[test]
    fn parse_accepts_only_rooted_text() {
        assert_eq!(JsonPointer::parse(""), Some(JsonPointer::root()));
        assert_eq!(
            JsonPointer::parse("/definitions/endpoint"),
            Some(JsonPointer::root().child_key("definitions").child_key("endpoint"))
        );
        assert_eq!(JsonPointer::parse("definitions"), None);
    }

    #[test]
    fn pointer_agrees_with_serde_json_lookup() {
        let doc = serde_json::json!({"a/b": {"list": [10, 20]}});
        let p = JsonPointer::root()
            .child_key("a/b")
            .child_key("list")
            .child_index(1);
        assert_eq!(doc.pointer(p.as_str()), Some(&serde_json::json!(20)));
    }
}
