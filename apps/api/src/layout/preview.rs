//! Feed card data derived from a template and an article's content:
//! the thumbnail (first filled image field) and the preview snippet
//! (first filled text field).

use serde::Serialize;

use crate::layout::block::Block;
use crate::layout::codec::parse_blocks;
use crate::layout::content::ContentMap;
use crate::models::template::Template;

/// Maximum preview length, in characters (not bytes).
pub const PREVIEW_CHAR_LIMIT: usize = 100;

pub const NO_PREVIEW: &str = "No preview available";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePreview {
    /// Stored image value, unresolved. `None` when no image field is filled.
    pub thumbnail_url: Option<String>,
    pub preview_text: String,
}

/// Derives the preview for an article. A missing template means no blocks,
/// so the result is no thumbnail and the fallback text.
pub fn extract_preview(template: Option<&Template>, content: &ContentMap) -> ArticlePreview {
    let blocks = parse_blocks(template.map(|t| t.layout_json.as_str()));
    preview_from_blocks(&blocks, content)
}

pub fn preview_from_blocks(blocks: &[Block], content: &ContentMap) -> ArticlePreview {
    ArticlePreview {
        thumbnail_url: thumbnail_url(blocks, content).map(str::to_string),
        preview_text: preview_text(blocks, content),
    }
}

/// Value of the first image block, in block order, whose value is not blank.
pub fn thumbnail_url<'a>(blocks: &[Block], content: &'a ContentMap) -> Option<&'a str> {
    first_filled(blocks, content, Block::is_image)
}

/// Value of the first filled text block, cut to [`PREVIEW_CHAR_LIMIT`]
/// characters, or [`NO_PREVIEW`].
pub fn preview_text(blocks: &[Block], content: &ContentMap) -> String {
    first_filled(blocks, content, Block::is_text)
        .map(|text| truncate_chars(text, PREVIEW_CHAR_LIMIT).to_string())
        .unwrap_or_else(|| NO_PREVIEW.to_string())
}

fn first_filled<'a>(
    blocks: &[Block],
    content: &'a ContentMap,
    wanted: fn(&Block) -> bool,
) -> Option<&'a str> {
    blocks
        .iter()
        .filter(|block| wanted(block))
        .filter_map(|block| content.get(block.id()))
        .find(|value| !value.trim().is_empty())
}

fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::codec::encode_layout;

    fn content(pairs: &[(&str, &str)]) -> ContentMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn template(blocks: &[Block]) -> Template {
        Template {
            id: Some(1),
            name: "Post".to_string(),
            layout_json: encode_layout(blocks),
        }
    }

    #[test]
    fn test_blank_text_falls_back_and_image_is_thumbnail() {
        let t = template(&[Block::text("t1"), Block::image("i1")]);
        let preview = extract_preview(
            Some(&t),
            &content(&[("t1", ""), ("i1", "http://x/y.jpg")]),
        );
        assert_eq!(preview.thumbnail_url.as_deref(), Some("http://x/y.jpg"));
        assert_eq!(preview.preview_text, NO_PREVIEW);
    }

    #[test]
    fn test_long_text_is_truncated_to_limit() {
        let blocks = [Block::text("t1")];
        let long = "a".repeat(150);
        let text = preview_text(&blocks, &content(&[("t1", long.as_str())]));
        assert_eq!(text.chars().count(), 100);
        assert_eq!(text, "a".repeat(100));
    }

    #[test]
    fn test_truncation_counts_code_points() {
        let blocks = [Block::text("t1")];
        let long = "é".repeat(120);
        let text = preview_text(&blocks, &content(&[("t1", long.as_str())]));
        assert_eq!(text.chars().count(), 100);
        assert_eq!(text.len(), 200);
    }

    #[test]
    fn test_short_text_is_untouched() {
        let blocks = [Block::text("t1")];
        assert_eq!(preview_text(&blocks, &content(&[("t1", "Hi there")])), "Hi there");
    }

    #[test]
    fn test_scans_follow_block_order() {
        let blocks = [
            Block::image("i2"),
            Block::text("t2"),
            Block::image("i1"),
            Block::text("t1"),
        ];
        let c = content(&[("i1", "one.png"), ("i2", "two.png"), ("t1", "first"), ("t2", "second")]);
        assert_eq!(thumbnail_url(&blocks, &c), Some("two.png"));
        assert_eq!(preview_text(&blocks, &c), "second");
    }

    #[test]
    fn test_whitespace_only_values_are_skipped() {
        let blocks = [Block::image("i1"), Block::image("i2"), Block::text("t1"), Block::text("t2")];
        let c = content(&[("i1", "   "), ("i2", "b.png"), ("t1", "\n\t"), ("t2", "  body ")]);
        assert_eq!(thumbnail_url(&blocks, &c), Some("b.png"));
        assert_eq!(preview_text(&blocks, &c), "  body ");
    }

    #[test]
    fn test_text_values_never_become_thumbnails() {
        let blocks = [Block::text("t1")];
        assert_eq!(thumbnail_url(&blocks, &content(&[("t1", "http://x/y.jpg")])), None);
    }

    #[test]
    fn test_no_template_means_no_preview() {
        let preview = extract_preview(None, &content(&[("t1", "orphaned")]));
        assert_eq!(preview.thumbnail_url, None);
        assert_eq!(preview.preview_text, NO_PREVIEW);
    }

    #[test]
    fn test_garbled_layout_means_no_preview() {
        let t = Template {
            id: None,
            name: "Broken".to_string(),
            layout_json: "{oops".to_string(),
        };
        let preview = extract_preview(Some(&t), &content(&[("t1", "x")]));
        assert_eq!(preview.preview_text, NO_PREVIEW);
    }
}
