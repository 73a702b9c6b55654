//! The overlay context object owned by the host's render loop.
//!
//! A frame looks like:
//!
//! 1. [`DebugPrint::clear`] then any number of [`text`](DebugPrint::text),
//!    [`format`](DebugPrint::format) and [`value`](DebugPrint::value) calls.
//! 2. [`DebugPrint::update`] once per tick: resize check, then mesh rebuild
//!    if the text changed.
//! 3. After the scene is rendered, the presenter from `pixelprint-render`
//!    draws [`DebugPrint::mesh`] with [`DebugPrint::clip_matrix`].

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use glam::Mat4;

use crate::camera::OverlayCamera;
use crate::config::OverlayConfig;
use crate::error::{OverlayError, OverlayResult};
use crate::geometry::Size;
use crate::mesh::OverlayMesh;
use crate::profiling::profile_function;
use crate::text::{GlyphAtlas, TextBatch};
use crate::transform::ScreenTransform;
use crate::viewport::ViewportTracker;

/// Text emitted by [`DebugPrint::value`] for an absent value.
pub const NULL_PLACEHOLDER: &str = "null";

/// State that only exists once the overlay has been initialized.
struct Surface {
    atlas: GlyphAtlas,
    camera: OverlayCamera,
    tracker: ViewportTracker,
    transform: ScreenTransform,
}

/// What happened during an [`update`](DebugPrint::update) tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// The surface size changed and the transform was recomputed.
    pub resized: bool,
    /// The mesh was rebuilt from new text.
    pub rebuilt: bool,
}

/// Proof that a presenter is attached to an overlay.
///
/// Only one claim can be alive per overlay. Dropping it frees the slot.
#[derive(Debug)]
pub struct PresenterClaim {
    slot: Arc<AtomicBool>,
}

impl PresenterClaim {
    /// `true` when this claim was handed out by `overlay`.
    pub fn belongs_to(&self, overlay: &DebugPrint) -> bool {
        Arc::ptr_eq(&self.slot, &overlay.presenter_slot)
    }
}

impl Drop for PresenterClaim {
    fn drop(&mut self) {
        self.slot.store(false, Ordering::Release);
    }
}

/// Immediate-mode debug text overlay.
///
/// All state lives here rather than in globals, so tests can run several
/// independent overlays side by side.
pub struct DebugPrint {
    config: OverlayConfig,
    scale: u32,
    batch: TextBatch,
    mesh: OverlayMesh,
    surface: Option<Surface>,
    presenter_slot: Arc<AtomicBool>,
}

impl DebugPrint {
    /// Create an overlay. It must be [`initialize`](Self::initialize)d before use.
    pub fn new(config: OverlayConfig) -> Self {
        let scale = config.scale.max(1);
        Self {
            config,
            scale,
            batch: TextBatch::new(),
            mesh: OverlayMesh::new(),
            surface: None,
            presenter_slot: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Decode the atlas and fit the camera and transform to `surface`.
    ///
    /// A second call is logged and rejected; the existing setup is kept.
    pub fn initialize(&mut self, surface: Size<u32>) -> OverlayResult<()> {
        if self.surface.is_some() {
            tracing::error!("Overlay is already initialized, ignoring initialize()");
            return Err(OverlayError::AlreadyInitialized);
        }

        let atlas = GlyphAtlas::load()?;
        self.surface = Some(Surface {
            atlas,
            camera: OverlayCamera::new(surface, self.config.draw_order),
            tracker: ViewportTracker::new(surface, self.config.resize_tracking),
            transform: ScreenTransform::new(surface, self.scale),
        });

        tracing::info!(
            "Initialized debug overlay at {}x{} (scale {})",
            surface.width,
            surface.height,
            self.scale
        );
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.surface.is_some()
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Set the zoom factor, clamped to at least 1, and refresh the transform.
    pub fn set_scale(&mut self, scale: u32) {
        self.scale = scale.max(1);

        if let Some(surface) = &mut self.surface {
            surface.transform = ScreenTransform::new(surface.tracker.current(), self.scale);
        }
    }

    /// Start a new frame's text. Nothing is cleared automatically.
    pub fn clear(&mut self) {
        self.batch.clear();
    }

    /// Draw `text` with its top-left corner at device pixel `(x, y)`.
    pub fn text(&mut self, x: i32, y: i32, text: &str) -> OverlayResult<()> {
        if self.surface.is_none() {
            return Err(OverlayError::NotInitialized);
        }

        self.batch.push_text(x, y, text, self.scale);
        Ok(())
    }

    /// Format `args` and draw the result. See also [`print_text!`](crate::print_text).
    pub fn format(&mut self, x: i32, y: i32, args: fmt::Arguments<'_>) -> OverlayResult<()> {
        match args.as_str() {
            Some(text) => self.text(x, y, text),
            None => self.text(x, y, &args.to_string()),
        }
    }

    /// Draw the `Display` form of `value`, or `"null"` when there is none.
    pub fn value<T: fmt::Display>(&mut self, x: i32, y: i32, value: Option<T>) -> OverlayResult<()> {
        match value {
            Some(value) => self.text(x, y, &value.to_string()),
            None => self.text(x, y, NULL_PLACEHOLDER),
        }
    }

    /// Per-tick update: resize check first, then mesh rebuild if dirty.
    pub fn update(&mut self, surface_size: Size<u32>) -> UpdateOutcome {
        profile_function!();

        let mut outcome = UpdateOutcome::default();

        if let Some(surface) = &mut self.surface {
            if surface.tracker.observe(surface_size) {
                surface
                    .camera
                    .set_half_height(surface_size.height as f32 * 0.5);
                surface.transform = ScreenTransform::new(surface_size, self.scale);
                outcome.resized = true;
            }
        }

        outcome.rebuilt = self.mesh.build(&mut self.batch);
        outcome
    }

    /// Reserve the single presenter slot. `None` if a presenter already holds it.
    pub fn claim_presenter(&self) -> Option<PresenterClaim> {
        self.presenter_slot
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| PresenterClaim {
                slot: self.presenter_slot.clone(),
            })
    }

    /// Overlay space to clip space for the current surface.
    pub fn clip_matrix(&self) -> OverlayResult<Mat4> {
        let surface = self.surface.as_ref().ok_or(OverlayError::NotInitialized)?;
        Ok(surface.camera.projection(surface.tracker.current()) * surface.transform.matrix())
    }

    pub fn atlas(&self) -> Option<&GlyphAtlas> {
        self.surface.as_ref().map(|s| &s.atlas)
    }

    pub fn camera(&self) -> Option<&OverlayCamera> {
        self.surface.as_ref().map(|s| &s.camera)
    }

    pub fn transform(&self) -> Option<&ScreenTransform> {
        self.surface.as_ref().map(|s| &s.transform)
    }

    pub fn batch(&self) -> &TextBatch {
        &self.batch
    }

    pub fn mesh(&self) -> &OverlayMesh {
        &self.mesh
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }
}

/// Format and draw text on a [`DebugPrint`].
///
/// ```
/// # use pixelprint_core::{DebugPrint, OverlayConfig, geometry::Size, print_text};
/// # let mut overlay = DebugPrint::new(OverlayConfig::default());
/// # overlay.initialize(Size::new(640, 480)).unwrap();
/// let fps = 60;
/// print_text!(overlay, 4, 4, "fps {}", fps).unwrap();
/// ```
#[macro_export]
macro_rules! print_text {
    ($overlay:expr, $x:expr, $y:expr, $($arg:tt)*) => {
        $overlay.format($x, $y, format_args!($($arg)*))
    };
}
