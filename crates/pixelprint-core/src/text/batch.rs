//! Per-frame text accumulation.
//!
//! Text calls append quads to a [`TextBatch`]. Nothing is reset implicitly:
//! the owner clears the batch once per frame before emitting that frame's
//! text, otherwise geometry keeps growing.

use glam::Vec2;

use super::atlas::{GLYPH_SIZE, GlyphCell};

/// Horizontal advance and quad size of every glyph, in logical units.
pub const GLYPH_ADVANCE: f32 = GLYPH_SIZE as f32;

/// Vertices, UVs and triangle indices for a run of text quads.
#[derive(Debug, Default)]
pub struct TextBatch {
    vertices: Vec<Vec2>,
    uvs: Vec<Vec2>,
    indices: Vec<u32>,
    /// Index of the first vertex of the next quad.
    base_index: u32,
    dirty: bool,
}

impl TextBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all geometry and mark the batch dirty.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.uvs.clear();
        self.indices.clear();
        self.base_index = 0;
        self.dirty = true;
    }

    /// Append `text` at device pixel position `(x, y)`.
    ///
    /// The position is divided by `scale` so callers place text in device
    /// pixels whatever the zoom. Spaces advance the cursor without geometry;
    /// characters outside `'!'..='}'` are dropped without advancing.
    ///
    /// Returns the logical cursor after the last character. The batch is
    /// marked dirty even when nothing was appended.
    pub fn push_text(&mut self, x: i32, y: i32, text: &str, scale: u32) -> Vec2 {
        let scale = scale.max(1) as f32;
        let mut cursor = Vec2::new(x as f32 / scale, y as f32 / scale);

        for c in text.chars() {
            if c == ' ' {
                cursor.x += GLYPH_ADVANCE;
                continue;
            }

            let Some(cell) = GlyphCell::for_char(c) else {
                continue;
            };

            self.push_quad(cursor, cell);
            cursor.x += GLYPH_ADVANCE;
        }

        self.dirty = true;
        cursor
    }

    fn push_quad(&mut self, position: Vec2, cell: GlyphCell) {
        let size = Vec2::splat(GLYPH_ADVANCE);

        // Y grows downwards in overlay space.
        self.vertices.extend_from_slice(&[
            position,
            Vec2::new(position.x + size.x, position.y),
            position + size,
            Vec2::new(position.x, position.y + size.y),
        ]);
        self.uvs.extend_from_slice(&cell.uv().corners());

        let base = self.base_index;
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        self.base_index += 4;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_leaves_empty_dirty_batch() {
        let mut batch = TextBatch::new();
        batch.push_text(0, 0, "abc", 1);
        batch.mark_clean();

        batch.clear();

        assert!(batch.vertices().is_empty());
        assert!(batch.uvs().is_empty());
        assert!(batch.indices().is_empty());
        assert!(batch.is_dirty());
    }

    #[test]
    fn test_two_glyphs() {
        let mut batch = TextBatch::new();
        let cursor = batch.push_text(0, 0, "AB", 1);

        assert_eq!(batch.quad_count(), 2);
        assert_eq!(batch.vertices().len(), 8);
        assert_eq!(batch.uvs().len(), 8);
        assert_eq!(batch.indices().len(), 12);
        assert_eq!(cursor, Vec2::new(16.0, 0.0));
        assert_eq!(batch.indices(), &[0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn test_counts_scale_with_length() {
        let text = "Hello,World!{}";
        let n = text.len();
        let mut batch = TextBatch::new();
        let cursor = batch.push_text(0, 0, text, 1);

        assert_eq!(batch.vertices().len(), 4 * n);
        assert_eq!(batch.uvs().len(), 4 * n);
        assert_eq!(batch.indices().len(), 6 * n);
        assert_eq!(cursor.x, 8.0 * n as f32);
    }

    #[test]
    fn test_space_advances_without_geometry() {
        let mut batch = TextBatch::new();
        let cursor = batch.push_text(0, 0, " ", 1);
        assert!(batch.is_empty());
        assert_eq!(cursor.x, 8.0);

        let cursor = batch.push_text(0, 0, "A B", 1);
        assert_eq!(batch.quad_count(), 2);
        assert_eq!(cursor.x, 24.0);
        assert_eq!(batch.vertices()[4], Vec2::new(16.0, 0.0));
    }

    #[test]
    fn test_out_of_range_skipped_without_advance() {
        let mut batch = TextBatch::new();
        let cursor = batch.push_text(0, 0, "\t~\u{7f}\n", 1);
        assert!(batch.is_empty());
        assert_eq!(cursor.x, 0.0);

        let cursor = batch.push_text(0, 0, "A~B", 1);
        assert_eq!(batch.quad_count(), 2);
        assert_eq!(cursor.x, 16.0);
        // 'B' sits directly after 'A'
        assert_eq!(batch.vertices()[4], Vec2::new(8.0, 0.0));
    }

    #[test]
    fn test_empty_text_still_marks_dirty() {
        let mut batch = TextBatch::new();
        batch.mark_clean();
        batch.push_text(5, 5, "", 1);
        assert!(batch.is_dirty());
        assert!(batch.is_empty());
    }

    #[test]
    fn test_quad_layout() {
        let mut batch = TextBatch::new();
        batch.push_text(10, 20, "A", 1);

        assert_eq!(
            batch.vertices(),
            &[
                Vec2::new(10.0, 20.0),
                Vec2::new(18.0, 20.0),
                Vec2::new(18.0, 28.0),
                Vec2::new(10.0, 28.0),
            ]
        );
        assert_eq!(batch.uvs(), &GlyphCell::for_char('A').unwrap().uv().corners());
    }

    #[test]
    fn test_position_divided_by_scale() {
        let mut batch = TextBatch::new();
        batch.push_text(32, 16, "A", 4);
        assert_eq!(batch.vertices()[0], Vec2::new(8.0, 4.0));
        // Glyph size stays 8 logical units; the transform applies the scale.
        assert_eq!(batch.vertices()[2], Vec2::new(16.0, 12.0));
    }

    #[test]
    fn test_accumulates_without_clear() {
        let mut batch = TextBatch::new();
        batch.push_text(0, 0, "AB", 1);
        batch.push_text(0, 0, "AB", 1);

        assert_eq!(batch.quad_count(), 4);
        assert_eq!(&batch.indices()[12..18], &[8, 9, 10, 8, 10, 11]);
    }
}
