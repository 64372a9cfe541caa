//! Item data model module
//!
//! Defines the persisted item record, its size enumeration, and the
//! partially-specified draft that create and update requests deserialize into.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Item size, persisted as a single-letter code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemSize {
    #[serde(rename = "s")]
    Small,
    #[serde(rename = "m")]
    Medium,
    #[serde(rename = "l")]
    Large,
}

impl ItemSize {
    /// Parse a size code; anything outside {s, m, l} is rejected
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "s" => Some(Self::Small),
            "m" => Some(Self::Medium),
            "l" => Some(Self::Large),
            _ => None,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Small => "s",
            Self::Medium => "m",
            Self::Large => "l",
        }
    }
}

impl fmt::Display for ItemSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A persisted item record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub size: ItemSize,
}

/// Incoming item attributes for create and update requests
///
/// Every field is optional so JSON syntax errors stay distinct from
/// field-level validation failures. `size` is kept as a raw code here;
/// the store validates it against the enum.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ItemDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub size: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_codes() {
        assert_eq!(ItemSize::from_code("s"), Some(ItemSize::Small));
        assert_eq!(ItemSize::from_code("m"), Some(ItemSize::Medium));
        assert_eq!(ItemSize::from_code("l"), Some(ItemSize::Large));
        assert_eq!(ItemSize::from_code("xl"), None);
        assert_eq!(ItemSize::from_code(""), None);
        assert_eq!(ItemSize::Large.code(), "l");
    }

    #[test]
    fn test_item_serialization_uses_single_letter_codes() {
        let item = Item {
            id: "1700000000000".to_string(),
            name: "Tee".to_string(),
            price: 20.0,
            size: ItemSize::Medium,
        };
        let json = serde_json::to_string(&item).expect("serialize item");
        assert!(json.contains(r#""size":"m""#));

        let back: Item = serde_json::from_str(&json).expect("deserialize item");
        assert_eq!(back, item);
    }

    #[test]
    fn test_draft_accepts_partial_bodies() {
        let draft: ItemDraft = serde_json::from_str(r#"{"price":5}"#).expect("partial draft");
        assert!(draft.name.is_none());
        assert_eq!(draft.price, Some(5.0));
        assert!(draft.size.is_none());
    }

    #[test]
    fn test_draft_ignores_unknown_fields() {
        let draft: ItemDraft =
            serde_json::from_str(r#"{"name":"Tee","color":"red"}"#).expect("draft");
        assert_eq!(draft.name.as_deref(), Some("Tee"));
    }

    #[test]
    fn test_draft_keeps_invalid_size_code_for_validation() {
        let draft: ItemDraft = serde_json::from_str(r#"{"size":"xl"}"#).expect("draft");
        assert_eq!(draft.size.as_deref(), Some("xl"));
        assert_eq!(ItemSize::from_code("xl"), None);
    }
}
