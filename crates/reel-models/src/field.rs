use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Wire value used for any field the upstream could not supply.
pub const UNAVAILABLE: &str = "N/A";

/// An optional text field that is never silently dropped.
///
/// Upstreams leave plenty of detail fields blank. Instead of `null`, every
/// canonical field is either populated or explicitly `Unavailable`, which
/// serializes as `"N/A"` so renderers can filter on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Field {
    Available(String),
    #[default]
    Unavailable,
}

impl Field {
    /// Build a field from raw upstream text. Blank text and `"N/A"` collapse
    /// to `Unavailable`.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == UNAVAILABLE {
            Field::Unavailable
        } else if trimmed.len() == value.len() {
            Field::Available(value)
        } else {
            Field::Available(trimmed.to_string())
        }
    }

    pub fn from_option(value: Option<String>) -> Self {
        value.map(Field::new).unwrap_or(Field::Unavailable)
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Field::Available(_))
    }

    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Field::Available(value) => Some(value.as_str()),
            Field::Unavailable => None,
        }
    }

    /// The string sent over the wire: the value itself, or `"N/A"`.
    pub fn as_wire(&self) -> &str {
        self.as_deref().unwrap_or(UNAVAILABLE)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl From<Option<String>> for Field {
    fn from(value: Option<String>) -> Self {
        Field::from_option(value)
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::new(value)
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Field::from_option(Option::<String>::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_na_are_unavailable() {
        assert_eq!(Field::new(""), Field::Unavailable);
        assert_eq!(Field::new("   "), Field::Unavailable);
        assert_eq!(Field::new("N/A"), Field::Unavailable);
        assert_eq!(Field::from_option(None), Field::Unavailable);
    }

    #[test]
    fn test_available_value_is_trimmed() {
        assert_eq!(Field::new(" Drama "), Field::Available("Drama".to_string()));
        assert_eq!(Field::new("Drama").as_deref(), Some("Drama"));
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&Field::Unavailable).unwrap();
        assert_eq!(json, "\"N/A\"");

        let field: Field = serde_json::from_str("null").unwrap();
        assert_eq!(field, Field::Unavailable);

        let field: Field = serde_json::from_str("\"148 min\"").unwrap();
        assert_eq!(field.as_deref(), Some("148 min"));
    }
}
