//! Overlay-space to camera-space transformation.
//!
//! Overlay space has its origin at the top-left of the surface with Y growing
//! downwards, in logical units. The overlay camera is centered on the surface
//! with Y growing upwards, in pixels. The transform is
//!
//! ```text
//! camera_pos = (local.x * scale - width / 2, -local.y * scale + height / 2)
//! ```
//!
//! so raising the scale enlarges glyphs while [`TextBatch`](crate::TextBatch)
//! divides positions by the same factor, keeping them where the caller put them.

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::geometry::Size;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTransform {
    matrix: Mat4,
    surface: Size<u32>,
    scale: u32,
}

impl ScreenTransform {
    pub fn new(surface: Size<u32>, scale: u32) -> Self {
        let (half_width, half_height) = surface.half_extents();
        let s = scale.max(1) as f32;

        let matrix = Mat4::from_scale_rotation_translation(
            Vec3::new(s, -s, 1.0),
            Quat::IDENTITY,
            Vec3::new(-half_width, half_height, 0.0),
        );

        Self {
            matrix,
            surface,
            scale,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Map an overlay-space point to camera space.
    pub fn apply(&self, local: Vec2) -> Vec2 {
        self.matrix.transform_point3(local.extend(0.0)).truncate()
    }

    /// Surface size the transform was computed for.
    pub fn surface(&self) -> Size<u32> {
        self.surface
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }
}
