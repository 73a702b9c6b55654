//! Glyph atlas and text batching.

pub mod atlas;
pub mod batch;

pub use atlas::{GlyphAtlas, GlyphCell, GlyphUv};
pub use batch::TextBatch;
