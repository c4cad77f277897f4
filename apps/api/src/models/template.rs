use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::layout::block::Block;
use crate::layout::codec::parse_blocks;

/// A named, reusable layout. `layout_json` is the persisted form of the block
/// list (see [`crate::layout::codec`]); [`Template::blocks`] is the working form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub layout_json: String,
}

impl Template {
    /// Decoded block list; empty when the layout cannot be decoded.
    pub fn blocks(&self) -> Vec<Block> {
        parse_blocks(Some(&self.layout_json))
    }
}
