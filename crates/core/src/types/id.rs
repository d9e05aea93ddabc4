//! Opaque product identifiers.
//!
//! The public catalog uses integer ids, but nothing in the cart depends on
//! that: an id is compared for equality and otherwise carried through as-is.
//! Both JSON numbers and JSON strings are accepted and written back in the
//! same shape they arrived in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a catalog product.
///
/// Serialized untagged, so `1` and `"sku-1"` are both valid ids. Two ids are
/// equal only if they have the same shape and value (`1 != "1"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Numeric id, as used by the public catalog.
    Number(i64),
    /// Free-form string id.
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

/// Error parsing a [`ProductId`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("product id must not be empty")]
pub struct EmptyProductId;

impl FromStr for ProductId {
    type Err = EmptyProductId;

    /// Parse an id from a path segment or form field.
    ///
    /// Integers written the way they display (`42`, `-3`) become
    /// [`ProductId::Number`]; anything else, including `007` and `+5`, is kept
    /// verbatim as [`ProductId::Text`]. Surrounding whitespace is ignored.
    ///
    /// Text cannot say which shape an id had in JSON, so `"42"` parses as a
    /// number. Use `CartState::resolve_id` to match it against a cart line
    /// stored with a string id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EmptyProductId);
        }
        match trimmed.parse::<i64>() {
            Ok(n) if n.to_string() == trimmed => Ok(Self::Number(n)),
            _ => Ok(Self::Text(trimmed.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_id() {
        assert_eq!("42".parse::<ProductId>().unwrap(), ProductId::Number(42));
        assert_eq!(" 7 ".parse::<ProductId>().unwrap(), ProductId::Number(7));
    }

    #[test]
    fn test_parse_text_id() {
        assert_eq!(
            "sku-12".parse::<ProductId>().unwrap(),
            ProductId::Text("sku-12".to_string())
        );
    }

    #[test]
    fn test_parse_non_canonical_integer_stays_text() {
        assert_eq!("007".parse::<ProductId>().unwrap(), ProductId::from("007"));
        assert_eq!("+5".parse::<ProductId>().unwrap(), ProductId::from("+5"));
        assert_eq!("-3".parse::<ProductId>().unwrap(), ProductId::Number(-3));
    }

    #[test]
    fn test_parse_empty_id() {
        assert_eq!("  ".parse::<ProductId>(), Err(EmptyProductId));
    }

    #[test]
    fn test_json_shape_is_preserved() {
        let ids: Vec<ProductId> = serde_json::from_str(r#"[1, "a"]"#).unwrap();
        assert_eq!(ids, vec![ProductId::Number(1), ProductId::from("a")]);
        assert_eq!(serde_json::to_string(&ids).unwrap(), r#"[1,"a"]"#);
    }

    #[test]
    fn test_number_and_text_are_distinct() {
        assert_ne!(ProductId::Number(1), ProductId::from("1"));
    }

    #[test]
    fn test_display() {
        assert_eq!(ProductId::Number(3).to_string(), "3");
        assert_eq!(ProductId::from("abc").to_string(), "abc");
    }
}
