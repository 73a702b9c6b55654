//! Pixelprint Core
//!
//! CPU side of the pixelprint debug text overlay: the embedded 8x8 glyph
//! atlas, the per-frame text batch, the overlay mesh and the screen-space
//! transform that keeps glyphs pixel-aligned at any integer scale.
//!
//! The GPU presenter lives in `pixelprint-render`.
//!
//! # Example
//!
//! ```
//! use pixelprint_core::{DebugPrint, OverlayConfig, geometry::Size};
//!
//! let mut overlay = DebugPrint::new(OverlayConfig::default());
//! overlay.initialize(Size::new(800, 600)).unwrap();
//!
//! // Once per frame
//! overlay.clear();
//! overlay.text(10, 10, "hello").unwrap();
//! pixelprint_core::print_text!(overlay, 10, 20, "frame {}", 42).unwrap();
//!
//! let outcome = overlay.update(Size::new(800, 600));
//! assert!(outcome.rebuilt);
//! ```

pub mod camera;
pub mod config;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod mesh;
pub mod overlay;
pub mod profiling;
pub mod text;
pub mod transform;
pub mod viewport;

pub use camera::{ClearMode, OverlayCamera};
pub use config::{OverlayConfig, ResizeTracking};
pub use error::{OverlayError, OverlayResult};
pub use mesh::{Bounds, OverlayMesh};
pub use overlay::{DebugPrint, PresenterClaim, UpdateOutcome};
pub use text::{GlyphAtlas, GlyphCell, GlyphUv, TextBatch};
pub use transform::ScreenTransform;
pub use viewport::ViewportTracker;
