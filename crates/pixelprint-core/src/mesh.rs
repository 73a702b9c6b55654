//! Drawable overlay mesh, rebuilt from a [`TextBatch`] only when it changed.

use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec2;

use crate::profiling::profile_function;
use crate::text::TextBatch;

/// Axis-aligned bounds of the mesh in overlay space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

static NEXT_MESH_ID: AtomicU64 = AtomicU64::new(1);

/// CPU copy of the geometry the presenter draws.
#[derive(Debug)]
pub struct OverlayMesh {
    /// Unique per mesh. GPU copies key uploads on `(id, revision)`.
    id: u64,
    vertices: Vec<Vec2>,
    uvs: Vec<Vec2>,
    indices: Vec<u32>,
    bounds: Option<Bounds>,
    /// Bumped on every rebuild so GPU copies know when to re-upload.
    revision: u64,
}

impl Default for OverlayMesh {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayMesh {
    pub fn new() -> Self {
        Self {
            id: NEXT_MESH_ID.fetch_add(1, Ordering::Relaxed),
            vertices: Vec::new(),
            uvs: Vec::new(),
            indices: Vec::new(),
            bounds: None,
            revision: 0,
        }
    }

    /// Copy the batch into the mesh if the batch is dirty.
    ///
    /// Returns `true` when a rebuild happened.
    pub fn build(&mut self, batch: &mut TextBatch) -> bool {
        if !batch.is_dirty() {
            return false;
        }

        profile_function!();

        self.vertices.clear();
        self.vertices.extend_from_slice(batch.vertices());
        self.uvs.clear();
        self.uvs.extend_from_slice(batch.uvs());
        self.indices.clear();
        self.indices.extend_from_slice(batch.indices());
        self.bounds = Bounds::from_points(&self.vertices);
        self.revision += 1;

        batch.mark_clean();

        tracing::trace!(
            "Rebuilt overlay mesh: {} vertices, {} indices",
            self.vertices.len(),
            self.indices.len()
        );
        true
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// `None` while the mesh is empty.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
