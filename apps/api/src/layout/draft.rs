//! Article editor state: a title, an optional template, and one input per
//! template block.

use crate::layout::block::Block;
use crate::layout::content::ContentMap;
use crate::layout::error::LayoutError;
use crate::models::article::{Article, ArticleCreateRequest};
use crate::models::template::Template;

#[derive(Debug, Clone, Default)]
pub struct ArticleDraft {
    title: String,
    template: Option<Template>,
    blocks: Vec<Block>,
    inputs: ContentMap,
}

impl ArticleDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Opens an existing article for editing. Every block of its template
    /// gets an input, taken from the stored content or left empty.
    pub fn from_article(article: &Article) -> Self {
        let blocks = article
            .template
            .as_ref()
            .map(Template::blocks)
            .unwrap_or_default();
        let inputs = ContentMap::for_blocks(&blocks, &article.content_map());
        Self {
            title: article.title.clone(),
            template: article.template.clone(),
            blocks,
            inputs,
        }
    }

    /// Switches template. Inputs are reset to one empty value per block.
    pub fn select_template(&mut self, template: Template) {
        self.blocks = template.blocks();
        self.inputs = ContentMap::for_blocks(&self.blocks, &ContentMap::new());
        self.template = Some(template);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn inputs(&self) -> &ContentMap {
        &self.inputs
    }

    pub fn value(&self, block_id: &str) -> &str {
        self.inputs.value_for(block_id)
    }

    pub fn set_value(&mut self, block_id: &str, value: impl Into<String>) -> Result<(), LayoutError> {
        self.find_block(block_id)?;
        self.inputs.insert(block_id, value);
        Ok(())
    }

    /// Records the url returned by the upload endpoint for an image block.
    pub fn attach_uploaded_image(
        &mut self,
        block_id: &str,
        url: impl Into<String>,
    ) -> Result<(), LayoutError> {
        if !self.find_block(block_id)?.is_image() {
            return Err(LayoutError::NotAnImageBlock(block_id.to_string()));
        }
        self.inputs.insert(block_id, url);
        Ok(())
    }

    /// Labels of text blocks still blank. Image blocks are optional.
    pub fn missing_fields(&self) -> Vec<String> {
        missing_text_fields(&self.blocks, &self.inputs)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.title.trim().is_empty() {
            return Err(LayoutError::MissingTitle);
        }
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(LayoutError::MissingFields(missing));
        }
        Ok(())
    }

    /// Validates and produces the create/update body. Only inputs belonging to
    /// the current template's blocks are encoded.
    pub fn to_request(&self) -> Result<ArticleCreateRequest, LayoutError> {
        self.validate()?;
        Ok(ArticleCreateRequest {
            title: self.title.trim().to_string(),
            content: self.inputs.retain_blocks(&self.blocks).encode(),
            template: self.template.clone(),
        })
    }

    fn find_block(&self, block_id: &str) -> Result<&Block, LayoutError> {
        self.blocks
            .iter()
            .find(|b| b.id() == block_id)
            .ok_or_else(|| LayoutError::UnknownBlock(block_id.to_string()))
    }
}

/// Labels of the text blocks whose content value is blank or absent.
pub fn missing_text_fields(blocks: &[Block], content: &ContentMap) -> Vec<String> {
    blocks
        .iter()
        .filter(|b| b.is_text() && content.value_for(b.id()).trim().is_empty())
        .map(|b| b.label().to_string())
        .collect()
}
