//! Reference-counted, per-[`MeshKind`] shared buffer sets.
//!
//! The first object of a kind to [`acquire`](BufferRegistry::acquire) runs
//! the mesh generator and uploads the result; every later instance of the
//! same kind only bumps a counter.  The last
//! [`release`](BufferRegistry::release) hands the buffers back to the
//! allocator.  A kind therefore has buffers exactly while its count is
//! non-zero.
//!
//! The registry itself never touches the GPU.  [`BufferAllocator`] is the
//! seam: [`WgpuAllocator`](crate::gpu_mesh::WgpuAllocator) creates real
//! buffers, tests plug in a counting fake.

use std::collections::HashMap;

use nullspace_core::mesh::{self, MeshCreateInfo, MeshData, MeshKind};

use crate::error::RenderError;

/// Turns generated mesh arrays into backend buffers and back.
pub trait BufferAllocator {
    /// Whatever the backend needs to draw one mesh kind.
    type Buffers;

    fn upload(&mut self, kind: MeshKind, mesh: &MeshData) -> Result<Self::Buffers, RenderError>;

    fn free(&mut self, kind: MeshKind, buffers: Self::Buffers);
}

struct Entry<B> {
    buffers: B,
    ref_count: u32,
}

pub struct BufferRegistry<A: BufferAllocator> {
    allocator: A,
    entries: HashMap<MeshKind, Entry<A::Buffers>>,
    generations: HashMap<MeshKind, u32>,
}

impl<A: BufferAllocator> BufferRegistry<A> {
    pub fn new(allocator: A) -> Self {
        Self {
            allocator,
            entries: HashMap::new(),
            generations: HashMap::new(),
        }
    }

    /// Adds a reference to the buffers for `info.kind()` and returns the new
    /// count.
    ///
    /// Only the first reference generates and uploads.  Size parameters of
    /// later requests are ignored: the kind shares whatever was uploaded
    /// first.  On failure nothing is recorded and the count stays at zero.
    pub fn acquire(&mut self, info: &MeshCreateInfo) -> Result<u32, RenderError> {
        let kind = info.kind();
        if let Some(entry) = self.entries.get_mut(&kind) {
            entry.ref_count += 1;
            return Ok(entry.ref_count);
        }

        let mesh = mesh::generate(info)?;
        mesh.validate()?;
        let buffers = self.allocator.upload(kind, &mesh)?;

        *self.generations.entry(kind).or_default() += 1;
        log::info!(
            "{kind:?} buffers allocated ({} vertices, {} indices)",
            mesh.vertices.len(),
            mesh.indices.len()
        );

        self.entries.insert(
            kind,
            Entry {
                buffers,
                ref_count: 1,
            },
        );
        Ok(1)
    }

    /// Drops one reference to `kind`.  Returns `true` when that was the last
    /// one and the buffers were freed.
    ///
    /// Releasing a kind with no live references is logged and ignored.
    pub fn release(&mut self, kind: MeshKind) -> bool {
        let Some(entry) = self.entries.get_mut(&kind) else {
            log::warn!("release of {kind:?} without a live reference ignored");
            return false;
        };

        entry.ref_count -= 1;
        if entry.ref_count > 0 {
            return false;
        }

        if let Some(entry) = self.entries.remove(&kind) {
            self.allocator.free(kind, entry.buffers);
            log::info!("{kind:?} buffers freed");
        }
        true
    }

    /// Buffers for `kind`, if any instance currently holds them.
    pub fn get(&self, kind: MeshKind) -> Option<&A::Buffers> {
        self.entries.get(&kind).map(|e| &e.buffers)
    }

    pub fn ref_count(&self, kind: MeshKind) -> u32 {
        self.entries.get(&kind).map_or(0, |e| e.ref_count)
    }

    #[inline]
    pub fn is_allocated(&self, kind: MeshKind) -> bool {
        self.entries.contains_key(&kind)
    }

    /// How many times `kind` has been generated and uploaded so far.
    pub fn generation_count(&self, kind: MeshKind) -> u32 {
        self.generations.get(&kind).copied().unwrap_or(0)
    }

    /// Number of kinds currently holding buffers.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// Frees every kind regardless of its count.
    pub fn clear(&mut self) {
        for (kind, entry) in self.entries.drain() {
            log::debug!("{kind:?} buffers freed with {} live references", entry.ref_count);
            self.allocator.free(kind, entry.buffers);
        }
    }
}

impl<A: BufferAllocator> Drop for BufferRegistry<A> {
    fn drop(&mut self) {
        if !self.entries.is_empty() {
            log::warn!("buffer registry dropped with {} kinds still referenced", self.entries.len());
            self.clear();
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use glam::Vec3;

    /// Allocator that hands out numbered tokens and records every call.
    #[derive(Default)]
    pub(crate) struct CountingAllocator {
        pub uploads: Vec<(MeshKind, usize)>,
        pub frees: Vec<(MeshKind, u32)>,
        pub fail_next: bool,
        next_token: u32,
    }

    impl CountingAllocator {
        /// Rejects the next upload, then behaves normally.
        pub(crate) fn failing() -> Self {
            Self {
                fail_next: true,
                ..Self::default()
            }
        }
    }

    impl BufferAllocator for CountingAllocator {
        type Buffers = u32;

        fn upload(&mut self, kind: MeshKind, mesh: &MeshData) -> Result<u32, RenderError> {
            if std::mem::take(&mut self.fail_next) {
                return Err(RenderError::Upload {
                    kind,
                    reason: "out of memory".into(),
                });
            }
            self.uploads.push((kind, mesh.vertices.len()));
            self.next_token += 1;
            Ok(self.next_token)
        }

        fn free(&mut self, kind: MeshKind, buffers: u32) {
            self.frees.push((kind, buffers));
        }
    }

    fn cube() -> MeshCreateInfo {
        MeshCreateInfo::Cube {
            half_extents: Vec3::splat(0.5),
        }
    }

    fn sphere() -> MeshCreateInfo {
        MeshCreateInfo::Sphere {
            diameter: 2.0,
            latitudes: 8,
            longitudes: 8,
        }
    }

    #[test]
    fn uploads_once_per_kind() {
        let mut reg = BufferRegistry::new(CountingAllocator::default());
        assert_eq!(reg.acquire(&cube()).unwrap(), 1);
        assert_eq!(reg.acquire(&cube()).unwrap(), 2);
        assert_eq!(reg.acquire(&cube()).unwrap(), 3);
        assert_eq!(reg.acquire(&sphere()).unwrap(), 1);

        assert_eq!(reg.allocator().uploads, vec![(MeshKind::Cube, 8), (MeshKind::Sphere, 128)]);
        assert_eq!(reg.generation_count(MeshKind::Cube), 1);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get(MeshKind::Cube), Some(&1));
    }

    #[test]
    fn last_release_frees() {
        let mut reg = BufferRegistry::new(CountingAllocator::default());
        reg.acquire(&cube()).unwrap();
        reg.acquire(&cube()).unwrap();

        assert!(!reg.release(MeshKind::Cube));
        assert!(reg.is_allocated(MeshKind::Cube));
        assert_eq!(reg.ref_count(MeshKind::Cube), 1);

        assert!(reg.release(MeshKind::Cube));
        assert!(!reg.is_allocated(MeshKind::Cube));
        assert_eq!(reg.ref_count(MeshKind::Cube), 0);
        assert_eq!(reg.allocator().frees, vec![(MeshKind::Cube, 1)]);
        assert!(reg.get(MeshKind::Cube).is_none());
    }

    #[test]
    fn reacquire_after_free_regenerates() {
        let mut reg = BufferRegistry::new(CountingAllocator::default());
        reg.acquire(&cube()).unwrap();
        reg.release(MeshKind::Cube);
        reg.acquire(&cube()).unwrap();

        assert_eq!(reg.generation_count(MeshKind::Cube), 2);
        assert_eq!(reg.get(MeshKind::Cube), Some(&2));
    }

    #[test]
    fn unmatched_release_does_not_underflow() {
        let mut reg = BufferRegistry::new(CountingAllocator::default());
        assert!(!reg.release(MeshKind::Quad));
        assert_eq!(reg.ref_count(MeshKind::Quad), 0);
        assert!(reg.allocator().frees.is_empty());
    }

    #[test]
    fn failed_upload_leaves_count_at_zero() {
        let mut reg = BufferRegistry::new(CountingAllocator::failing());
        assert!(matches!(
            reg.acquire(&cube()),
            Err(RenderError::Upload {
                kind: MeshKind::Cube,
                ..
            })
        ));
        assert_eq!(reg.ref_count(MeshKind::Cube), 0);
        assert_eq!(reg.generation_count(MeshKind::Cube), 0);

        assert_eq!(reg.acquire(&cube()).unwrap(), 1);
    }

    #[test]
    fn generator_errors_propagate() {
        let mut reg = BufferRegistry::new(CountingAllocator::default());
        assert!(matches!(
            reg.acquire(&MeshCreateInfo::Torus),
            Err(RenderError::Mesh(_))
        ));
        assert!(matches!(
            reg.acquire(&MeshCreateInfo::Grid { x_dim: 3, z_dim: 4 }),
            Err(RenderError::Mesh(_))
        ));
        assert!(reg.is_empty());
        assert!(reg.allocator().uploads.is_empty());
    }

    #[test]
    fn clear_frees_everything() {
        let mut reg = BufferRegistry::new(CountingAllocator::default());
        reg.acquire(&cube()).unwrap();
        reg.acquire(&cube()).unwrap();
        reg.acquire(&sphere()).unwrap();
        reg.clear();
        assert!(reg.is_empty());
        let mut freed: Vec<_> = reg.allocator().frees.iter().map(|(k, _)| *k).collect();
        freed.sort_by_key(|k| format!("{k:?}"));
        assert_eq!(freed, vec![MeshKind::Cube, MeshKind::Sphere]);
    }
}
