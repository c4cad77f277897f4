//! Template layouts and article content.
//! Pure data and validation; nothing here touches the database or storage.

pub mod block;
pub mod builder;
pub mod codec;
pub mod content;
pub mod draft;
pub mod error;
pub mod preview;

pub use block::{Block, BlockKind, BlockPayload, Placement};
pub use builder::{validate_template, TemplateBuilder};
pub use codec::{decode_layout, encode_layout, parse_blocks};
pub use content::ContentMap;
pub use draft::ArticleDraft;
pub use error::{DecodeError, LayoutError};
pub use preview::{extract_preview, ArticlePreview};
