//! Content map: an article's per-field values keyed by block id, and its
//! JSON codec (the article `content` string).

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::layout::block::Block;
use crate::layout::error::{json_type_name, DecodeError};

/// Field values of one article, keyed by block id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentMap(BTreeMap<String, String>);

impl ContentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict decode: the input must be a JSON object. Every value is
    /// coerced to text with [`coerce_to_string`].
    pub fn try_decode(content_json: &str) -> Result<Self, DecodeError> {
        match serde_json::from_str::<Value>(content_json)? {
            Value::Object(fields) => Ok(Self(
                fields
                    .into_iter()
                    .map(|(id, value)| {
                        let text = coerce_to_string(&value);
                        (id, text)
                    })
                    .collect(),
            )),
            other => Err(DecodeError::NotAnObject(json_type_name(&other))),
        }
    }

    /// Lenient decode: garbled or legacy (non-JSON) content yields an empty map.
    pub fn decode(content_json: &str) -> Self {
        Self::try_decode(content_json).unwrap_or_else(|e| {
            debug!("Treating undecodable article content as empty: {e}");
            Self::default()
        })
    }

    /// Encodes as a JSON object whose values are all strings.
    pub fn encode(&self) -> String {
        Value::Object(
            self.0
                .iter()
                .map(|(id, value)| (id.clone(), Value::String(value.clone())))
                .collect(),
        )
        .to_string()
    }

    /// Builds the editor state for `blocks`: one entry per block, taken from
    /// `source` or empty when the block has no stored value.
    pub fn for_blocks(blocks: &[Block], source: &ContentMap) -> Self {
        blocks
            .iter()
            .map(|block| (block.id().to_string(), source.value_for(block.id()).to_string()))
            .collect()
    }

    /// Copy restricted to the ids of `blocks`.
    pub fn retain_blocks(&self, blocks: &[Block]) -> Self {
        blocks
            .iter()
            .filter_map(|block| {
                self.get(block.id())
                    .map(|value| (block.id().to_string(), value.to_string()))
            })
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    /// Stored value for `id`, or `""` when absent.
    pub fn value_for(&self, id: &str) -> &str {
        self.get(id).unwrap_or("")
    }

    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.0.insert(id.into(), value.into());
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for ContentMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Text form of a stored content value. Strings pass through, numbers and
/// booleans use their JSON spelling, `null` becomes empty, and nested
/// arrays/objects keep their compact JSON text.
pub fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(pairs: &[(&str, &str)]) -> ContentMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_round_trip_preserves_keys_and_values() {
        let original = map(&[
            ("t1", "Hello \"world\""),
            ("i1", "/uploads/1700000000000_cat.jpg"),
            ("empty", ""),
            ("unicode", "naïve café ✓"),
        ]);
        let restored = ContentMap::decode(&original.encode());
        assert_eq!(restored, original);
    }

    #[test]
    fn test_scalars_are_coerced_to_text() {
        let decoded = ContentMap::decode(r#"{"a":1,"b":true}"#);
        assert_eq!(decoded, map(&[("a", "1"), ("b", "true")]));
    }

    #[test]
    fn test_coerce_to_string() {
        assert_eq!(coerce_to_string(&json!(null)), "");
        assert_eq!(coerce_to_string(&json!("x")), "x");
        assert_eq!(coerce_to_string(&json!(2.5)), "2.5");
        assert_eq!(coerce_to_string(&json!(-3)), "-3");
        assert_eq!(coerce_to_string(&json!(false)), "false");
        assert_eq!(coerce_to_string(&json!([1, "a"])), r#"[1,"a"]"#);
    }

    #[test]
    fn test_garbled_content_decodes_empty() {
        for input in ["", "plain legacy article text", "[1,2]", "null", "\"str\""] {
            assert!(ContentMap::decode(input).is_empty(), "input: {input:?}");
        }
    }

    #[test]
    fn test_try_decode_reports_non_object() {
        assert!(matches!(
            ContentMap::try_decode("[]"),
            Err(DecodeError::NotAnObject("array"))
        ));
        assert!(matches!(ContentMap::try_decode("{"), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_encode_produces_string_values() {
        let encoded = map(&[("a", "1")]).encode();
        let value: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value, json!({"a": "1"}));
    }

    #[test]
    fn test_absent_id_reads_as_empty() {
        let content = map(&[("t1", "hi")]);
        assert_eq!(content.value_for("t1"), "hi");
        assert_eq!(content.value_for("missing"), "");
        assert_eq!(content.get("missing"), None);
    }

    #[test]
    fn test_for_blocks_initialises_every_block() {
        let blocks = vec![Block::text("t1"), Block::image("i1"), Block::text("t2")];
        let stored = map(&[("t1", "hi"), ("stale", "old")]);
        let inputs = ContentMap::for_blocks(&blocks, &stored);

        assert_eq!(inputs, map(&[("t1", "hi"), ("i1", ""), ("t2", "")]));
    }

    #[test]
    fn test_retain_blocks_drops_foreign_ids() {
        let blocks = vec![Block::text("t1")];
        let content = map(&[("t1", "a"), ("other", "b")]);
        assert_eq!(content.retain_blocks(&blocks), map(&[("t1", "a")]));
    }
}
