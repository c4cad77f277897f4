//! Interactive template authoring: append, remove, relabel and drag blocks,
//! then encode the result once on save.

use std::collections::HashSet;

use tracing::debug;
use uuid::Uuid;

use crate::layout::block::{Block, BlockKind, Placement};
use crate::layout::codec::{decode_layout, encode_layout};
use crate::layout::error::LayoutError;
use crate::models::template::Template;

pub const NEW_TEXT_BLOCK_LABEL: &str = "Text Block";
pub const NEW_IMAGE_BLOCK_LABEL: &str = "Image Block";

/// Working copy of a template while it is being edited.
#[derive(Debug, Clone, Default)]
pub struct TemplateBuilder {
    id: Option<i64>,
    name: String,
    blocks: Vec<Block>,
}

impl TemplateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts editing an existing template. Its id is carried through to
    /// [`build`](Self::build) so the result updates rather than duplicates.
    pub fn from_template(template: &Template) -> Self {
        Self {
            id: template.id,
            name: template.name.clone(),
            blocks: template.blocks(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id() == id)
    }

    /// Appends a free text block with a fresh id and returns that id.
    pub fn add_text_block(&mut self) -> String {
        self.append_new(NEW_TEXT_BLOCK_LABEL, BlockKind::FreeText)
    }

    /// Appends a free image block with a fresh id and returns that id.
    pub fn add_image_block(&mut self) -> String {
        self.append_new(NEW_IMAGE_BLOCK_LABEL, BlockKind::FreeImage)
    }

    /// Appends a caller-built block, rejecting an id already in use.
    pub fn push_block(&mut self, block: Block) -> Result<(), LayoutError> {
        if self.block(block.id()).is_some() {
            return Err(LayoutError::DuplicateBlockId(block.id().to_string()));
        }
        self.blocks.push(block);
        Ok(())
    }

    pub fn remove_block(&mut self, id: &str) -> Result<Block, LayoutError> {
        let index = self.index_of(id)?;
        Ok(self.blocks.remove(index))
    }

    pub fn rename_block(&mut self, id: &str, label: impl Into<String>) -> Result<(), LayoutError> {
        self.block_mut(id)?.set_label(label);
        Ok(())
    }

    /// Drag result for one block. Fixed blocks only take the `y` offset.
    pub fn move_block(&mut self, id: &str, x: f32, y: f32) -> Result<(), LayoutError> {
        self.block_mut(id)?.move_to(x, y);
        Ok(())
    }

    pub fn set_placement(&mut self, id: &str, placement: Placement) -> Result<(), LayoutError> {
        self.block_mut(id)?.set_placement(placement);
        Ok(())
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        validate_template_parts(&self.name, &self.blocks)
    }

    /// Validates and encodes the block list into a [`Template`].
    pub fn build(&self) -> Result<Template, LayoutError> {
        self.validate()?;
        Ok(Template {
            id: self.id,
            name: self.name.trim().to_string(),
            layout_json: encode_layout(&self.blocks),
        })
    }

    fn append_new(&mut self, label: &str, kind: BlockKind) -> String {
        let id = Uuid::new_v4().to_string();
        self.blocks.push(Block::with_kind(id.clone(), label, kind));
        id
    }

    fn index_of(&self, id: &str) -> Result<usize, LayoutError> {
        self.blocks
            .iter()
            .position(|b| b.id() == id)
            .ok_or_else(|| LayoutError::UnknownBlock(id.to_string()))
    }

    fn block_mut(&mut self, id: &str) -> Result<&mut Block, LayoutError> {
        let index = self.index_of(id)?;
        Ok(&mut self.blocks[index])
    }
}

/// A template needs a non-blank name, at least one block, and unique ids.
pub fn validate_template_parts(name: &str, blocks: &[Block]) -> Result<(), LayoutError> {
    if name.trim().is_empty() || blocks.is_empty() {
        return Err(LayoutError::IncompleteTemplate);
    }
    let mut seen = HashSet::with_capacity(blocks.len());
    for block in blocks {
        if !seen.insert(block.id()) {
            return Err(LayoutError::DuplicateBlockId(block.id().to_string()));
        }
    }
    Ok(())
}

/// Checks a template received from a client. The layout must decode to at
/// least one block; it is otherwise accepted as sent.
pub fn validate_template(template: &Template) -> Result<Vec<Block>, LayoutError> {
    let blocks = decode_layout(&template.layout_json).unwrap_or_else(|e| {
        debug!(name = %template.name, "Rejecting template layout: {e}");
        Vec::new()
    });
    validate_template_parts(&template.name, &blocks)?;
    Ok(blocks)
}
