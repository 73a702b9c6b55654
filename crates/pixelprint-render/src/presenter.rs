//! Draws the overlay on top of an already rendered frame.

use std::sync::Arc;

use pixelprint_core::profiling::profile_function;
use pixelprint_core::{DebugPrint, OverlayError, OverlayResult, PresenterClaim};

use crate::GraphicsContext;
use crate::renderer::OverlayRenderer;

/// Which surface the presenter draws into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRole {
    /// The host's main scene target. Works, but overlays belong on a
    /// secondary pass.
    Primary,
    /// A dedicated overlay pass composited after the scene.
    Secondary,
}

#[derive(Debug, Clone, Copy)]
pub struct PresentTarget {
    pub format: wgpu::TextureFormat,
    pub role: TargetRole,
}

impl PresentTarget {
    pub fn secondary(format: wgpu::TextureFormat) -> Self {
        Self {
            format,
            role: TargetRole::Secondary,
        }
    }
}

struct Active {
    renderer: OverlayRenderer,
    claim: PresenterClaim,
}

/// Presents a [`DebugPrint`] overlay once per frame.
///
/// Only one presenter can be attached to an overlay at a time. Creating a
/// second one logs an error and yields an inert presenter whose
/// [`present`](Self::present) does nothing.
pub struct OverlayPresenter {
    active: Option<Active>,
    draw_order: i32,
}

impl OverlayPresenter {
    /// Attach a presenter to `overlay`.
    ///
    /// Fails only when the overlay has not been initialized.
    pub fn new(
        context: Arc<GraphicsContext>,
        overlay: &DebugPrint,
        target: PresentTarget,
    ) -> OverlayResult<Self> {
        let atlas = overlay.atlas().ok_or(OverlayError::NotInitialized)?;
        let draw_order = overlay.config().draw_order;

        let Some(claim) = overlay.claim_presenter() else {
            tracing::error!("Cannot attach two presenters to the same debug overlay!");
            return Ok(Self {
                active: None,
                draw_order,
            });
        };

        if target.role == TargetRole::Primary {
            tracing::warn!(
                "Debug overlay presenter should not draw on the primary target. It should be on a secondary pass"
            );
        }

        let renderer = OverlayRenderer::new(context, atlas, target.format, overlay.config().label);

        Ok(Self {
            active: Some(Active {
                renderer,
                claim,
            }),
            draw_order,
        })
    }

    /// `true` for a rejected duplicate presenter.
    pub fn is_inert(&self) -> bool {
        self.active.is_none()
    }

    /// Position among overlay passes; the host draws higher values later.
    pub fn draw_order(&self) -> i32 {
        self.draw_order
    }

    /// Draw the overlay's current mesh into `view`.
    ///
    /// Call after the scene pass has been recorded into `encoder`. The pass
    /// loads the existing contents, so the scene stays underneath.
    ///
    /// Returns `true` when a draw was recorded. Presenting an overlay other
    /// than the one this presenter was attached to logs an error and draws
    /// nothing.
    pub fn present(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        overlay: &DebugPrint,
    ) -> bool {
        profile_function!();

        let Some(active) = &mut self.active else {
            return false;
        };
        if !active.claim.belongs_to(overlay) {
            tracing::error!("Debug overlay presenter was given an overlay it is not attached to");
            return false;
        }
        let Ok(clip) = overlay.clip_matrix() else {
            return false;
        };

        active.renderer.prepare(overlay.mesh());
        if active.renderer.index_count() == 0 {
            return false;
        }
        active.renderer.set_clip_matrix(clip);

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(overlay.config().label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    // The overlay camera never clears.
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        active.renderer.render(&mut pass);
        true
    }
}
