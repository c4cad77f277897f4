//! Block model: the fields a template is made of.
//!
//! A block is either a text field or an image field (its *payload*), placed
//! either as a full-width stacked row (*fixed*) or anywhere on a 2D canvas
//! (*free*). The four combinations form [`BlockKind`].

use serde::{Deserialize, Serialize};

pub const DEFAULT_TEXT_LABEL: &str = "Text";
pub const DEFAULT_IMAGE_LABEL: &str = "Image";

/// What a block holds: free text, or a reference to an uploaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockPayload {
    Text,
    Image,
}

impl BlockPayload {
    /// The `type` tag used in the persisted layout JSON.
    pub fn wire_type(self) -> &'static str {
        match self {
            BlockPayload::Text => "text",
            BlockPayload::Image => "image",
        }
    }

    pub fn from_wire_type(tag: &str) -> Option<Self> {
        match tag {
            "text" => Some(BlockPayload::Text),
            "image" => Some(BlockPayload::Image),
            _ => None,
        }
    }

    pub fn default_label(self) -> &'static str {
        match self {
            BlockPayload::Text => DEFAULT_TEXT_LABEL,
            BlockPayload::Image => DEFAULT_IMAGE_LABEL,
        }
    }
}

/// How a block is positioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Stacked full width; only `y` is meaningful.
    Fixed,
    /// Freely positioned; `x` and `y` are both meaningful.
    Free,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockKind {
    FixedText,
    FixedImage,
    FreeText,
    FreeImage,
}

impl BlockKind {
    pub fn new(placement: Placement, payload: BlockPayload) -> Self {
        match (placement, payload) {
            (Placement::Fixed, BlockPayload::Text) => BlockKind::FixedText,
            (Placement::Fixed, BlockPayload::Image) => BlockKind::FixedImage,
            (Placement::Free, BlockPayload::Text) => BlockKind::FreeText,
            (Placement::Free, BlockPayload::Image) => BlockKind::FreeImage,
        }
    }

    pub fn placement(self) -> Placement {
        match self {
            BlockKind::FixedText | BlockKind::FixedImage => Placement::Fixed,
            BlockKind::FreeText | BlockKind::FreeImage => Placement::Free,
        }
    }

    pub fn payload(self) -> BlockPayload {
        match self {
            BlockKind::FixedText | BlockKind::FreeText => BlockPayload::Text,
            BlockKind::FixedImage | BlockKind::FreeImage => BlockPayload::Image,
        }
    }

    pub fn is_fixed(self) -> bool {
        self.placement() == Placement::Fixed
    }
}

/// One field of a template layout.
///
/// Placement and payload are stored separately so a block's kind can never
/// disagree with the widget it renders as. `id` is set at construction and
/// never reassigned; it is the join key into an article's content map.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    id: String,
    label: String,
    x: f32,
    y: f32,
    placement: Placement,
    payload: BlockPayload,
}

impl Block {
    /// A free-form text block at the origin with the default label.
    pub fn text(id: impl Into<String>) -> Self {
        Self::with_kind(id, DEFAULT_TEXT_LABEL, BlockKind::FreeText)
    }

    /// A free-form image block at the origin with the default label.
    pub fn image(id: impl Into<String>) -> Self {
        Self::with_kind(id, DEFAULT_IMAGE_LABEL, BlockKind::FreeImage)
    }

    pub fn with_kind(id: impl Into<String>, label: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            x: 0.0,
            y: 0.0,
            placement: kind.placement(),
            payload: kind.payload(),
        }
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.move_to(x, y);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn kind(&self) -> BlockKind {
        BlockKind::new(self.placement, self.payload)
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn payload(&self) -> BlockPayload {
        self.payload
    }

    pub fn is_text(&self) -> bool {
        self.payload == BlockPayload::Text
    }

    pub fn is_image(&self) -> bool {
        self.payload == BlockPayload::Image
    }

    /// Moves the block. Fixed blocks only follow the vertical axis and stay
    /// pinned to `x = 0`.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.x = match self.placement {
            Placement::Fixed => 0.0,
            Placement::Free => x,
        };
        self.y = y;
    }

    /// Switches between stacked and free placement, keeping the payload.
    pub fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
        if placement == Placement::Fixed {
            self.x = 0.0;
        }
    }
}
