//! Semantic element-type aliases.
//!
//! Keywords accept friendly element types such as `"text field"`. They are
//! normalized to a concrete tag plus attribute constraints:
//!
//! | Alias | Tag | Constraint |
//! |-------|-----|------------|
//! | `link` | `a` | |
//! | `image` | `img` | |
//! | `list` | `select` | |
//! | `text area` | `textarea` | |
//! | `radio button` | `input` | `type=radio` |
//! | `checkbox` | `input` | `type=checkbox` |
//! | `text field` | `input` | `type=text` |
//! | `file upload` | `input` | `type=file` |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// NormalizedTag
// ============================================================================

/// Concrete tag name and the attribute values an element must carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTag {
    /// Lower-case tag name.
    pub tag: String,
    /// Attribute name to required value, in name order.
    pub constraints: BTreeMap<String, String>,
}

/// Normalizes an element type to a tag and constraints.
///
/// The input is lower-cased first. Anything outside the alias table passes
/// through unchanged with no constraints.
#[must_use]
pub fn normalize(tag: &str) -> NormalizedTag {
    let tag = tag.to_lowercase();

    let (name, constraint) = match tag.as_str() {
        "link" => ("a", None),
        "image" => ("img", None),
        "list" => ("select", None),
        "text area" => ("textarea", None),
        "radio button" => ("input", Some("radio")),
        "checkbox" => ("input", Some("checkbox")),
        "text field" => ("input", Some("text")),
        "file upload" => ("input", Some("file")),
        _ => {
            return NormalizedTag {
                tag,
                constraints: BTreeMap::new(),
            };
        }
    };

    NormalizedTag {
        tag: name.to_string(),
        constraints: constraint
            .map(|value| BTreeMap::from([("type".to_string(), value.to_string())]))
            .unwrap_or_default(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_tag_is_unchanged() {
        let n = normalize("input");
        assert_eq!(n.tag, "input");
        assert!(n.constraints.is_empty());
    }

    #[test]
    fn test_checkbox_adds_type_constraint() {
        let n = normalize("checkbox");
        assert_eq!(n.tag, "input");
        assert_eq!(n.constraints.get("type").map(String::as_str), Some("checkbox"));
        assert_eq!(n.constraints.len(), 1);
    }

    #[test]
    fn test_aliases_are_case_insensitive() {
        assert_eq!(normalize("Text Field").tag, "input");
        assert_eq!(normalize("LINK").tag, "a");
    }

    #[test]
    fn test_simple_aliases() {
        assert_eq!(normalize("image").tag, "img");
        assert_eq!(normalize("list").tag, "select");
        assert_eq!(normalize("text area").tag, "textarea");
    }

    #[test]
    fn test_input_aliases() {
        for (alias, kind) in [
            ("radio button", "radio"),
            ("text field", "text"),
            ("file upload", "file"),
        ] {
            let n = normalize(alias);
            assert_eq!(n.tag, "input");
            assert_eq!(n.constraints["type"], kind);
        }
    }

    #[test]
    fn test_unknown_tag_lowercased_only() {
        let n = normalize("UIAButton");
        assert_eq!(n.tag, "uiabutton");
        assert!(n.constraints.is_empty());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize("file upload");
        let twice = normalize(&once.tag);
        assert_eq!(twice.tag, once.tag);
    }
}
