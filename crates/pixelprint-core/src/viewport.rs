//! Detects output surface resizes between ticks.

use crate::config::ResizeTracking;
use crate::geometry::Size;

#[derive(Debug, Clone)]
pub struct ViewportTracker {
    tracking: ResizeTracking,
    /// Size at the last refresh.
    last: Size<u32>,
    /// Most recently observed size, refreshed or not.
    current: Size<u32>,
}

impl ViewportTracker {
    pub fn new(initial: Size<u32>, tracking: ResizeTracking) -> Self {
        Self {
            tracking,
            last: initial,
            current: initial,
        }
    }

    /// Record the surface size for this tick.
    ///
    /// Returns `true` when a tracked dimension differs from the last refresh.
    pub fn observe(&mut self, size: Size<u32>) -> bool {
        self.current = size;

        let changed = match self.tracking {
            ResizeTracking::HeightOnly => size.height != self.last.height,
            ResizeTracking::WidthAndHeight => size != self.last,
        };

        if changed {
            tracing::debug!(
                "Overlay viewport resized: {}x{} -> {}x{}",
                self.last.width,
                self.last.height,
                size.width,
                size.height
            );
            self.last = size;
        }
        changed
    }

    pub fn current(&self) -> Size<u32> {
        self.current
    }

    pub fn tracking(&self) -> ResizeTracking {
        self.tracking
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_only_ignores_width() {
        let mut tracker = ViewportTracker::new(Size::new(800, 600), ResizeTracking::HeightOnly);
        assert!(!tracker.observe(Size::new(800, 600)));
        assert!(!tracker.observe(Size::new(1024, 600)));
        assert_eq!(tracker.current(), Size::new(1024, 600));
        assert!(tracker.observe(Size::new(1024, 768)));
        assert!(!tracker.observe(Size::new(1024, 768)));
    }

    #[test]
    fn test_width_and_height() {
        let mut tracker =
            ViewportTracker::new(Size::new(800, 600), ResizeTracking::WidthAndHeight);
        assert!(tracker.observe(Size::new(1024, 600)));
        assert!(!tracker.observe(Size::new(1024, 600)));
        assert!(tracker.observe(Size::new(1024, 700)));
    }
}
