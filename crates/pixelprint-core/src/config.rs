/// Configuration for a [`DebugPrint`](crate::DebugPrint) overlay.
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// Initial integer zoom factor. Values below 1 are clamped to 1.
    pub scale: u32,
    /// Which surface dimensions trigger a screen transform refresh.
    pub resize_tracking: ResizeTracking,
    /// Priority of the overlay pass among overlay passes. Higher draws later.
    pub draw_order: i32,
    /// Prefix for GPU resource labels.
    pub label: &'static str,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        OverlayConfig {
            scale: 1,
            resize_tracking: ResizeTracking::WidthAndHeight,
            draw_order: 200,
            label: "Pixelprint Overlay",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeTracking {
    /// Only a height change refreshes the transform.
    ///
    /// A width-only resize leaves the horizontal origin stale until the
    /// height changes too.
    HeightOnly,
    /// Any change of width or height refreshes the transform.
    WidthAndHeight,
}
