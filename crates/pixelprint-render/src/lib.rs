//! wgpu presenter for the pixelprint debug text overlay.
//!
//! The host keeps rendering its scene as usual and calls
//! [`OverlayPresenter::present`] after the scene pass, before submitting the
//! frame. The presenter never owns the render loop.
//!
//! ```ignore
//! let context = GraphicsContext::new_owned_sync()?;
//! let mut overlay = DebugPrint::new(OverlayConfig::default());
//! overlay.initialize(Size::new(width, height))?;
//!
//! let mut presenter = OverlayPresenter::new(
//!     context.clone(),
//!     &overlay,
//!     PresentTarget::secondary(surface_format),
//! )?;
//!
//! // every frame
//! overlay.clear();
//! overlay.text(4, 4, "hello")?;
//! overlay.update(Size::new(width, height));
//! // ... render the scene into `view` ...
//! presenter.present(&mut encoder, &view, &overlay);
//! ```

pub mod context;
pub mod presenter;
pub mod renderer;

pub use context::{GraphicsContext, GraphicsContextDescriptor};
pub use presenter::{OverlayPresenter, PresentTarget, TargetRole};
pub use renderer::OverlayRenderer;
