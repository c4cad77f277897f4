use serde_json::Value;
use thiserror::Error;

/// Failure to decode a layout or content JSON string.
///
/// The lenient entry points ([`parse_blocks`](super::codec::parse_blocks),
/// [`ContentMap::decode`](super::content::ContentMap::decode)) recover from
/// every variant by substituting an empty value.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("no JSON document was provided")]
    Missing,

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array, found {0}")]
    NotAnArray(&'static str),

    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("layout contains no blocks")]
    Empty,
}

/// Rule violations raised while authoring a template or filling an article.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("Template name and at least one block required.")]
    IncompleteTemplate,

    #[error("Duplicate block id '{0}'")]
    DuplicateBlockId(String),

    #[error("Unknown block '{0}'")]
    UnknownBlock(String),

    #[error("Block '{0}' is not an image block")]
    NotAnImageBlock(String),

    #[error("Title is required.")]
    MissingTitle,

    #[error("Please fill all template fields.")]
    MissingFields(Vec<String>),
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
