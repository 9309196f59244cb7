use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A decoded KeyValues value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseNode {
    String(String),
    Number(f64),
    Bool(bool),
    Null,
    /// The literal `"undefined"`. Serializes as a missing entry.
    Absent,
    Map(Mapping),
}

impl ParseNode {
    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Look up a direct child. Returns `None` for primitives.
    pub fn get(&self, key: &str) -> Option<&ParseNode> {
        self.as_map().and_then(|m| m.get(key))
    }

    /// Follow a chain of keys, e.g. `["lang", "Tokens"]`.
    pub fn path(&self, keys: &[&str]) -> Option<&ParseNode> {
        keys.iter().try_fold(self, |node, key| node.get(key))
    }

    /// Render a primitive back to display text.
    ///
    /// Coercion turns locale strings like `"1"` into numbers; consumers that
    /// only want text use this to get them back. `Absent` and maps yield
    /// `None`.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Number(n) => Some(n.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Null => Some("null".to_string()),
            Self::Absent | Self::Map(_) => None,
        }
    }
}

/// An insertion-ordered string-keyed mapping.
///
/// Re-inserting an existing key replaces the value but keeps the key's
/// original position.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: Vec<(String, ParseNode)>,
    index: HashMap<String, usize>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the value it replaced.
    pub fn insert(&mut self, key: String, value: ParseNode) -> Option<ParseNode> {
        if let Some(&i) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[i].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    pub fn get(&self, key: &str) -> Option<&ParseNode> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParseNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl IntoIterator for Mapping {
    type Item = (String, ParseNode);
    type IntoIter = std::vec::IntoIter<(String, ParseNode)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for ParseNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(s) => serializer.serialize_str(s),
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Null | Self::Absent => serializer.serialize_unit(),
            Self::Map(m) => m.serialize(serializer),
        }
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let present = self.entries.iter().filter(|(_, v)| !v.is_absent());
        let mut map = serializer.serialize_map(Some(present.clone().count()))?;
        for (k, v) in present {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
