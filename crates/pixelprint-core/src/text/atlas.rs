//! Embedded 8x8 bitmap font atlas.
//!
//! The atlas is a 128x128 image holding printable ASCII from `' '` onwards in
//! a 16 column grid of 8x8 cells. Cell lookup is pure arithmetic, so
//! [`GlyphCell::for_char`] works without decoding the image.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use glam::Vec2;

use crate::error::{OverlayError, OverlayResult};

/// Width and height of one glyph cell in texels.
pub const GLYPH_SIZE: u32 = 8;
/// Width and height of the atlas texture in texels.
pub const ATLAS_SIZE: u32 = 128;
/// Number of cells per atlas row.
pub const ATLAS_COLUMNS: u32 = ATLAS_SIZE / GLYPH_SIZE;
/// Character stored in cell 0.
pub const FIRST_CHAR: char = ' ';
/// Last character that produces a glyph.
pub const LAST_CHAR: char = '}';

/// 1-bit palette PNG, white glyphs on a transparent background.
const ENCODED_ATLAS: &str = "iVBORw0KGgoAAAANSUhEUgAAAIAAAACAAQMAAAD58POIAAAABlBMVEUAAAD///+l2Z/dAAAAAXRSTlMAQObYZgAAAd1JREFUSMftkCGOG0EQRb8CFhVY2MDaM5SigAFWzlJaRa0FDYxGBQbkADlADpIDNGpUWrjIsowGroxWA1q9qR47JqaB/jOaGT39qf+7gJASY5Ag6HoAtilNJQlzZAfkAC3bkCVsOwj9ThpGSPisqOAOGvEeF8c6KS3R0GcwOK+/cBnRUxz8xFX//BOrbupQVbtZFGVnts1iZtxnGF6ZKC2ZOpAaCAceBqMl6ARkUMAHCzUyNupDA2Nms+63wMyVPaVWfVJl3TF7Ct/U8B51u7S2NX2aT6UMKBpjen6OxhTlfU44WMzx5SU7SNI+ioMpR9VcmVTawUFdHa/Glp7fXguy9RniM/yjlAS1nnL6bqpz6yk3quqXWSnWNOsjEC3anxUUkTCs4MgOkv0SDsmr27Rz8DZokBAKIPu0cdAG/ioU4EB7BX1PHOWhg9NmVq1cijb9orjRJxhHbDDgyHTcOXEgICR/XvYXVJRUxrSjyLYoQN7ETjYyJW5m3ixmq2KRSc/AolmWyf2J3zoY9zrqiWa1WYtdmyyA4qpHrNqE44hVfHkF3gP7cT9N64KqA8fRxtz3key3n2EFUdd9GJ8d0yT0zbSl6ccZCJ2WMHIqVD2lL+jp2uSuu+66667/qL/ccRo2jKF3OQAAAABJRU5ErkJggg==";

/// A glyph's location in the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphCell {
    pub column: u32,
    pub row: u32,
}

/// Normalized texture coordinates of a glyph cell.
///
/// `v` is the top edge and `vv` the bottom edge. V runs upwards, so
/// `vv = v - 8/128`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphUv {
    pub u: f32,
    pub v: f32,
    pub uu: f32,
    pub vv: f32,
}

impl GlyphUv {
    /// Corners in quad order: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.u, self.v),
            Vec2::new(self.uu, self.v),
            Vec2::new(self.uu, self.vv),
            Vec2::new(self.u, self.vv),
        ]
    }
}

impl GlyphCell {
    /// Look up the cell for `c`, or `None` outside `' '..='}'`.
    pub fn for_char(c: char) -> Option<Self> {
        if !(FIRST_CHAR..=LAST_CHAR).contains(&c) {
            return None;
        }

        let index = c as u32 - FIRST_CHAR as u32;
        Some(Self {
            column: index % ATLAS_COLUMNS,
            row: index / ATLAS_COLUMNS,
        })
    }

    /// Top-left texel of the cell, counted from the top of the image.
    pub fn texel_origin(&self) -> (u32, u32) {
        (self.column * GLYPH_SIZE, self.row * GLYPH_SIZE)
    }

    pub fn uv(&self) -> GlyphUv {
        let (x, y) = self.texel_origin();
        let m = 1.0 / ATLAS_SIZE as f32;

        let u = x as f32 * m;
        let uu = (x + GLYPH_SIZE) as f32 * m;
        // Image rows count downwards, texture V counts upwards.
        let v = 1.0 - y as f32 * m;
        let vv = 1.0 - (y + GLYPH_SIZE) as f32 * m;

        GlyphUv { u, v, uu, vv }
    }
}

/// Decoded atlas pixels, ready for upload.
pub struct GlyphAtlas {
    /// RGBA8, bottom image row first so that V = 0 is the bottom edge.
    pixels: Vec<u8>,
}

impl GlyphAtlas {
    /// Decode the embedded atlas.
    pub fn load() -> OverlayResult<Self> {
        let bytes = STANDARD.decode(ENCODED_ATLAS)?;
        let image = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png)?;

        if image.width() != ATLAS_SIZE || image.height() != ATLAS_SIZE {
            return Err(OverlayError::AtlasSize {
                width: image.width(),
                height: image.height(),
            });
        }

        let rgba = image::imageops::flip_vertical(&image.to_rgba8());
        tracing::debug!("Decoded {}x{} glyph atlas", ATLAS_SIZE, ATLAS_SIZE);

        Ok(Self {
            pixels: rgba.into_raw(),
        })
    }

    pub fn cell(&self, c: char) -> Option<GlyphCell> {
        GlyphCell::for_char(c)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        ATLAS_SIZE
    }

    pub fn height(&self) -> u32 {
        ATLAS_SIZE
    }

    /// Alpha of the texel at `(x, y)`, with `y` counted from the top of the image.
    ///
    /// `None` outside the atlas.
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= ATLAS_SIZE || y >= ATLAS_SIZE {
            return None;
        }

        let row = ATLAS_SIZE - 1 - y;
        self.pixels
            .get(((row * ATLAS_SIZE + x) * 4 + 3) as usize)
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn opaque_texels(atlas: &GlyphAtlas, cell: GlyphCell) -> usize {
        let (x0, y0) = cell.texel_origin();
        (0..GLYPH_SIZE)
            .flat_map(|y| (0..GLYPH_SIZE).map(move |x| (x0 + x, y0 + y)))
            .filter(|&(x, y)| atlas.alpha_at(x, y).unwrap_or(0) > 0)
            .count()
    }

    #[test]
    fn test_cell_grid_position() {
        let cell = GlyphCell::for_char('A').unwrap();
        // 'A' = 65, index 33
        assert_eq!(cell, GlyphCell { column: 1, row: 2 });
        assert_eq!(cell.texel_origin(), (8, 16));

        assert_eq!(GlyphCell::for_char(' ').unwrap().texel_origin(), (0, 0));
        assert_eq!(
            GlyphCell::for_char('}').unwrap(),
            GlyphCell { column: 13, row: 5 }
        );
    }

    #[test]
    fn test_out_of_range_has_no_cell() {
        assert!(GlyphCell::for_char('~').is_none());
        assert!(GlyphCell::for_char('\n').is_none());
        assert!(GlyphCell::for_char('\u{1f}').is_none());
        assert!(GlyphCell::for_char('é').is_none());
    }

    #[test]
    fn test_uv_flip() {
        for c in '!'..='}' {
            let cell = GlyphCell::for_char(c).unwrap();
            let uv = cell.uv();
            let index = c as u32 - 32;

            assert!((uv.uu - (uv.u + 8.0 / 128.0)).abs() < EPS);
            assert!((uv.vv - (uv.v - 8.0 / 128.0)).abs() < EPS);
            assert!((uv.u - ((index % 16) * 8) as f32 / 128.0).abs() < EPS);
            assert!((uv.v - (1.0 - ((index / 16) * 8) as f32 / 128.0)).abs() < EPS);
        }
    }

    #[test]
    fn test_uv_corners_order() {
        let uv = GlyphCell::for_char('!').unwrap().uv();
        let [tl, tr, br, bl] = uv.corners();
        assert_eq!(tl, Vec2::new(uv.u, uv.v));
        assert_eq!(tr, Vec2::new(uv.uu, uv.v));
        assert_eq!(br, Vec2::new(uv.uu, uv.vv));
        assert_eq!(bl, Vec2::new(uv.u, uv.vv));
    }

    #[test]
    fn test_embedded_atlas_decodes() {
        let atlas = GlyphAtlas::load().unwrap();
        assert_eq!(atlas.pixels().len(), (ATLAS_SIZE * ATLAS_SIZE * 4) as usize);

        let space = atlas.cell(' ').unwrap();
        assert_eq!(opaque_texels(&atlas, space), 0);

        let a = atlas.cell('A').unwrap();
        assert_eq!(opaque_texels(&atlas, a), 28);
        // Top row of 'A' is "..##...."
        let (x, y) = a.texel_origin();
        assert_eq!(atlas.alpha_at(x + 2, y), Some(255));
        assert_eq!(atlas.alpha_at(x, y), Some(0));
    }

    #[test]
    fn test_alpha_outside_atlas() {
        let atlas = GlyphAtlas::load().unwrap();
        assert_eq!(atlas.alpha_at(0, ATLAS_SIZE), None);
        assert_eq!(atlas.alpha_at(ATLAS_SIZE, 0), None);
        assert_eq!(atlas.alpha_at(u32::MAX, u32::MAX), None);
        assert!(atlas.alpha_at(ATLAS_SIZE - 1, ATLAS_SIZE - 1).is_some());
    }

    #[test]
    fn test_uv_addresses_flipped_pixels() {
        let atlas = GlyphAtlas::load().unwrap();
        let a = atlas.cell('A').unwrap();
        let uv = a.uv();

        // Texel just below the top edge of the glyph, sampled the way the GPU would.
        let tx = ((uv.u * 128.0) as u32) + 2;
        let ty_from_bottom = (uv.v * 128.0) as u32 - 1;
        let index = ((ty_from_bottom * ATLAS_SIZE + tx) * 4 + 3) as usize;
        assert_eq!(atlas.pixels()[index], 255);
    }
}
