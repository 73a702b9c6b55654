//! Orthographic camera the overlay is drawn through.
//!
//! The camera is centered on the surface and spans one pixel per unit. Its
//! vertical half extent is only refreshed by the viewport tracker, while the
//! horizontal extent follows the live aspect ratio of the surface.

use glam::Mat4;

use crate::geometry::Size;

/// Whether the overlay pass clears the target before drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearMode {
    /// Keep the scene that was rendered before the overlay.
    DontClear,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayCamera {
    half_height: f32,
    near: f32,
    far: f32,
    clear: ClearMode,
    draw_order: i32,
}

impl OverlayCamera {
    pub fn new(surface: Size<u32>, draw_order: i32) -> Self {
        Self {
            half_height: surface.height as f32 * 0.5,
            near: 0.0,
            far: 1.0,
            clear: ClearMode::DontClear,
            draw_order,
        }
    }

    /// Refit the vertical extent to a new surface height.
    pub fn set_half_height(&mut self, half_height: f32) {
        self.half_height = half_height;
    }

    pub fn half_height(&self) -> f32 {
        self.half_height
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn clear_mode(&self) -> ClearMode {
        self.clear
    }

    pub fn draw_order(&self) -> i32 {
        self.draw_order
    }

    /// Projection for the surface as it is right now.
    pub fn projection(&self, surface: Size<u32>) -> Mat4 {
        let aspect = surface.width.max(1) as f32 / surface.height.max(1) as f32;
        let half_height = self.half_height.max(0.5);
        let half_width = half_height * aspect;

        Mat4::orthographic_rh(
            -half_width,
            half_width,
            -half_height,
            half_height,
            self.near,
            self.far,
        )
    }
}
