use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tf_itemdb_vdf::{ParseNode, decode};

use crate::error::StoreError;

/// Path to the token table inside a TF2 resource file.
const TOKENS_PATH: [&str; 2] = ["lang", "Tokens"];

/// Localized display text extracted from `tf_english.txt` and
/// `tf_proto_obj_defs_english.txt`.
///
/// Proto-object-definition tokens keep their source order: warpaint name
/// resolution takes the first match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocaleTable {
    pub tokens: BTreeMap<String, String>,
    #[serde(rename = "protoObjDefTokens")]
    pub proto_obj_def_tokens: Vec<(String, String)>,
}

impl LocaleTable {
    /// Decode both resource files and extract their token tables.
    pub fn from_vdf(tokens_text: &str, proto_obj_defs_text: &str) -> Result<Self, StoreError> {
        let tokens_doc = decode(tokens_text)?;
        let proto_doc = decode(proto_obj_defs_text)?;
        Self::from_documents(&tokens_doc, &proto_doc)
    }

    /// Build the table from already-decoded resource files.
    ///
    /// Display text for numeric tokens is not preserved byte-for-byte. The
    /// decoder coerces numerals to numbers, so `"1.50"` comes back as `"1.5"`
    /// and `"007"` as `"7"`.
    pub fn from_documents(tokens_doc: &ParseNode, proto_doc: &ParseNode) -> Result<Self, StoreError> {
        let tokens = token_entries(tokens_doc, "token file")?.collect();
        let proto_obj_def_tokens = token_entries(proto_doc, "proto object definitions file")?.collect();
        Ok(Self {
            tokens,
            proto_obj_def_tokens,
        })
    }

    /// Look up a display string by token id. A leading `#` is ignored.
    pub fn token(&self, id: &str) -> Option<&str> {
        let id = id.strip_prefix('#').unwrap_or(id);
        self.tokens.get(id).map(String::as_str)
    }
}

/// Iterate `lang.Tokens` as text pairs, skipping nested objects and absent values.
fn token_entries<'a>(
    doc: &'a ParseNode,
    what: &str,
) -> Result<impl Iterator<Item = (String, String)> + 'a, StoreError> {
    let tokens = doc
        .path(&TOKENS_PATH)
        .and_then(ParseNode::as_map)
        .ok_or_else(|| StoreError::invalid(format!("{what} has no lang.Tokens section")))?;
    Ok(tokens
        .iter()
        .filter_map(|(k, v)| v.to_text().map(|text| (k.to_string(), text))))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKENS: &str = r#"
"lang"
{
    "Language" "English"
    "Tokens"
    {
        "TF_SupplyCrate" "Mann Co. Supply Crate"
        "TF_Number" "42"
        "TF_Nested" { "x" "y" }
    }
}
"#;

    const PROTO: &str = r#"
"lang"
{
    "Language" "English"
    "Tokens"
    {
        "9_102_field { field_number: 2 }" "Night Owl"
        "9_100_field { field_number: 2 }" "Aqua Marine"
    }
}
"#;

    #[test]
    fn test_from_vdf() {
        let table = LocaleTable::from_vdf(TOKENS, PROTO).unwrap();
        assert_eq!(table.token("#TF_SupplyCrate"), Some("Mann Co. Supply Crate"));
        assert_eq!(table.token("TF_SupplyCrate"), Some("Mann Co. Supply Crate"));
        assert_eq!(table.token("TF_Number"), Some("42"));
        assert_eq!(table.token("TF_Nested"), None);
        assert_eq!(table.token("TF_Missing"), None);
    }

    #[test]
    fn test_numeric_token_text_is_rerendered() {
        let tokens = r#""lang" { "Tokens" { "A" "1.50" "B" "007" "C" "1." } }"#;
        let table = LocaleTable::from_vdf(tokens, PROTO).unwrap();
        assert_eq!(table.token("A"), Some("1.5"));
        assert_eq!(table.token("B"), Some("7"));
        assert_eq!(table.token("C"), Some("1."));
    }

    #[test]
    fn test_proto_tokens_keep_source_order() {
        let table = LocaleTable::from_vdf(TOKENS, PROTO).unwrap();
        let names: Vec<&str> = table
            .proto_obj_def_tokens
            .iter()
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(names, vec!["Night Owl", "Aqua Marine"]);
    }

    #[test]
    fn test_missing_tokens_section() {
        let err = LocaleTable::from_vdf(r#""lang" { "Language" "English" }"#, PROTO).unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)));
    }

    #[test]
    fn test_malformed_text_is_format_error() {
        let err = LocaleTable::from_vdf("}", PROTO).unwrap_err();
        assert!(matches!(err, StoreError::Format(_)));
    }

    #[test]
    fn test_json_roundtrip_keeps_order() {
        let table = LocaleTable::from_vdf(TOKENS, PROTO).unwrap();
        let json = serde_json::to_string(&table).unwrap();
        assert!(json.contains("\"protoObjDefTokens\""));
        let back: LocaleTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }
}
