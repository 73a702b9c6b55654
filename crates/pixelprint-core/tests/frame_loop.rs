//! Drives the overlay through several host frames.

use glam::Vec3;
use pixelprint_core::geometry::Size;
use pixelprint_core::{DebugPrint, OverlayConfig, ResizeTracking, logging, print_text, profiling};

#[test]
fn test_frame_loop() {
    logging::try_init();

    let mut overlay = DebugPrint::new(OverlayConfig::default());
    overlay.initialize(Size::new(640, 480)).unwrap();

    let mut revisions = Vec::new();
    for frame in 0..3u32 {
        profiling::new_frame();
        overlay.clear();
        print_text!(overlay, 0, 0, "frame {}", frame).unwrap();
        overlay.value(0, 8, None::<u32>).unwrap();

        let outcome = overlay.update(Size::new(640, 480));
        assert!(outcome.rebuilt);
        assert!(!outcome.resized);
        // "frame N" = 6 glyphs, "null" = 4 glyphs
        assert_eq!(overlay.mesh().indices().len(), 10 * 6);
        revisions.push(overlay.mesh().revision());
    }
    assert_eq!(revisions, vec![1, 2, 3]);

    // No text calls this tick: nothing to rebuild.
    assert!(!overlay.update(Size::new(640, 480)).rebuilt);
}

#[test]
fn test_glyphs_land_on_device_pixels() {
    let mut overlay = DebugPrint::new(OverlayConfig {
        scale: 2,
        ..Default::default()
    });
    overlay.initialize(Size::new(640, 480)).unwrap();
    overlay.text(64, 32, "A").unwrap();
    overlay.update(Size::new(640, 480));

    let clip = overlay.clip_matrix().unwrap();
    let mesh = overlay.mesh();

    // Top-left corner sits at device pixel (64, 32); the quad is 16 pixels wide.
    let top_left = clip.project_point3(mesh.vertices()[0].extend(0.0));
    let bottom_right = clip.project_point3(mesh.vertices()[2].extend(0.0));

    let to_pixels = |p: Vec3| ((p.x + 1.0) * 320.0, (1.0 - p.y) * 240.0);
    let (x0, y0) = to_pixels(top_left);
    let (x1, y1) = to_pixels(bottom_right);
    assert!((x0 - 64.0).abs() < 1e-3 && (y0 - 32.0).abs() < 1e-3);
    assert!((x1 - 80.0).abs() < 1e-3 && (y1 - 48.0).abs() < 1e-3);
}

#[test]
fn test_width_only_resize_by_tracking_mode() {
    for (tracking, expect_resize) in [
        (ResizeTracking::HeightOnly, false),
        (ResizeTracking::WidthAndHeight, true),
    ] {
        let mut overlay = DebugPrint::new(OverlayConfig {
            resize_tracking: tracking,
            ..Default::default()
        });
        overlay.initialize(Size::new(640, 480)).unwrap();
        assert_eq!(overlay.update(Size::new(800, 480)).resized, expect_resize);
    }
}
