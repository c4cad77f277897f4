//! Layout codec. Converts a template's block list to and from the
//! `layoutJson` string stored on the server.
//!
//! # Wire format
//! A JSON array of `{ "type": "text" | "image", "id": "...", "label": "..." }`.
//! Position and placement are not part of the format, so every decoded block
//! comes back as a free block at the origin.
//!
//! # Decode policy
//! Entries with an unknown `type`, a missing `id`, or a repeated `id` are
//! dropped with a warning; the remaining entries are kept in order.

use std::collections::HashSet;

use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::layout::block::{Block, BlockKind, BlockPayload, Placement};
use crate::layout::error::{json_type_name, DecodeError};

#[derive(Debug, Error)]
enum SkipReason {
    #[error("entry is a JSON {0}, not an object")]
    NotAnObject(&'static str),
    #[error("field '{0}' is missing or not a string")]
    MissingField(&'static str),
    #[error("unknown block type '{0}'")]
    UnknownType(String),
}

/// Strict decode. Fails on invalid JSON, a non-array top level, or an empty
/// array; individual bad entries are skipped rather than failing the decode.
pub fn decode_layout(layout_json: &str) -> Result<Vec<Block>, DecodeError> {
    let entries = match serde_json::from_str::<Value>(layout_json)? {
        Value::Array(entries) => entries,
        other => return Err(DecodeError::NotAnArray(json_type_name(&other))),
    };
    if entries.is_empty() {
        return Err(DecodeError::Empty);
    }

    let mut seen = HashSet::with_capacity(entries.len());
    let mut blocks = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let block = match decode_entry(entry) {
            Ok(block) => block,
            Err(reason) => {
                warn!(index, %reason, "Skipping layout entry");
                continue;
            }
        };
        if !seen.insert(block.id().to_string()) {
            warn!(index, id = block.id(), "Skipping layout entry with duplicate id");
            continue;
        }
        blocks.push(block);
    }
    Ok(blocks)
}

/// Strict decode of a layout that may be absent. `None` reports
/// [`DecodeError::Missing`].
pub fn decode_optional_layout(layout_json: Option<&str>) -> Result<Vec<Block>, DecodeError> {
    match layout_json {
        Some(json) => decode_layout(json),
        None => Err(DecodeError::Missing),
    }
}

/// Lenient decode used by every consumer: any [`DecodeError`] yields an
/// empty block list.
pub fn parse_blocks(layout_json: Option<&str>) -> Vec<Block> {
    decode_optional_layout(layout_json).unwrap_or_else(|e| {
        match e {
            DecodeError::Missing | DecodeError::Empty => debug!("Layout has no blocks: {e}"),
            _ => warn!("Treating undecodable layout as empty: {e}"),
        }
        Vec::new()
    })
}

/// Serializes blocks in order. Only `type`, `id` and `label` are written.
pub fn encode_layout(blocks: &[Block]) -> String {
    Value::Array(
        blocks
            .iter()
            .map(|block| {
                json!({
                    "type": block.payload().wire_type(),
                    "id": block.id(),
                    "label": block.label(),
                })
            })
            .collect(),
    )
    .to_string()
}

fn decode_entry(entry: &Value) -> Result<Block, SkipReason> {
    let obj = entry
        .as_object()
        .ok_or_else(|| SkipReason::NotAnObject(json_type_name(entry)))?;

    let tag = string_field(obj, "type").ok_or(SkipReason::MissingField("type"))?;
    let payload =
        BlockPayload::from_wire_type(tag).ok_or_else(|| SkipReason::UnknownType(tag.to_string()))?;
    let id = string_field(obj, "id")
        .filter(|id| !id.is_empty())
        .ok_or(SkipReason::MissingField("id"))?;
    let label = string_field(obj, "label").unwrap_or(payload.default_label());

    Ok(Block::with_kind(
        id,
        label,
        BlockKind::new(Placement::Free, payload),
    ))
}

fn string_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}
