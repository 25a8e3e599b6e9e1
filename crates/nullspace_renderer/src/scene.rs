//! Live objects plus the shared buffers they draw with.
//!
//! `Scene` owns the [`BufferRegistry`]: spawning an object acquires its
//! mesh kind, despawning releases it, so buffer lifetimes follow the
//! objects without any global state.

use glam::{Mat3, Mat4, Vec3};
use nullspace_core::{DrawStyle, MeshKind, SceneObject};

use crate::error::RenderError;
use crate::registry::{BufferAllocator, BufferRegistry};

/// Stable handle returned by [`Scene::spawn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

/// Everything needed to draw one object this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub id: ObjectId,
    pub kind: MeshKind,
    pub style: DrawStyle,
    /// `projection * view * model`.
    pub mvp: Mat4,
    /// Inverse-transpose of the model's upper 3x3.
    pub normal: Mat4,
}

struct Spawned {
    id: ObjectId,
    kind: MeshKind,
    object: Box<dyn SceneObject>,
}

pub struct Scene<A: BufferAllocator> {
    registry: BufferRegistry<A>,
    objects: Vec<Spawned>,
    next_id: u32,
}

impl<A: BufferAllocator> Scene<A> {
    pub fn new(allocator: A) -> Self {
        Self {
            registry: BufferRegistry::new(allocator),
            objects: Vec::new(),
            next_id: 0,
        }
    }

    /// Runs `object.setup(position)` and takes a reference on its mesh.
    ///
    /// If the mesh cannot be generated or uploaded the object is dropped and
    /// the error returned.
    pub fn spawn<O>(&mut self, mut object: O, position: Vec3) -> Result<ObjectId, RenderError>
    where
        O: SceneObject + 'static,
    {
        object.setup(position);
        let info = object.mesh_info();
        let refs = self.registry.acquire(&info)?;

        let id = ObjectId(self.next_id);
        self.next_id += 1;
        log::debug!("spawned {} {id:?} at {position} ({refs} sharing)", object.name());

        self.objects.push(Spawned {
            id,
            kind: info.kind(),
            object: Box::new(object),
        });
        Ok(id)
    }

    /// Removes the object and releases its mesh reference.  Returns `false`
    /// for unknown ids.
    pub fn despawn(&mut self, id: ObjectId) -> bool {
        let Some(index) = self.objects.iter().position(|s| s.id == id) else {
            return false;
        };
        let spawned = self.objects.remove(index);
        self.registry.release(spawned.kind);
        log::debug!("despawned {} {id:?}", spawned.object.name());
        true
    }

    /// Steps every object by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        for spawned in &mut self.objects {
            spawned.object.update(dt);
        }
    }

    /// Per-object transforms for this frame, in spawn order.
    pub fn draw_list(&self, view: Mat4, proj: Mat4) -> Vec<DrawItem> {
        let view_proj = proj * view;
        self.objects
            .iter()
            .map(|s| {
                let model = s.object.model_matrix();
                DrawItem {
                    id: s.id,
                    kind: s.kind,
                    style: s.object.draw_style(),
                    mvp: view_proj * model,
                    normal: normal_matrix(model),
                }
            })
            .collect()
    }

    /// Despawns everything.  Every mesh kind ends with a zero count and its
    /// buffers freed.
    pub fn teardown(&mut self) {
        let count = self.objects.len();
        for spawned in self.objects.drain(..) {
            self.registry.release(spawned.kind);
        }
        log::info!("scene torn down ({count} objects)");
    }

    pub fn get(&self, id: ObjectId) -> Option<&dyn SceneObject> {
        self.objects
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.object.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &dyn SceneObject)> + '_ {
        self.objects.iter().map(|s| (s.id, s.object.as_ref()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn registry(&self) -> &BufferRegistry<A> {
        &self.registry
    }
}

/// `transpose(inverse(mat3(model)))`, widened back to 4x4 for the uniform.
pub fn normal_matrix(model: Mat4) -> Mat4 {
    Mat4::from_mat3(Mat3::from_mat4(model).inverse().transpose())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::tests::CountingAllocator;
    use nullspace_core::{Cube, Sphere};

    fn scene() -> Scene<CountingAllocator> {
        Scene::new(CountingAllocator::default())
    }

    #[test]
    fn one_upload_per_kind() {
        let mut scene = scene();
        for x in 0..5 {
            scene.spawn(Cube::new(), Vec3::new(x as f32, 0.0, 0.0)).unwrap();
        }
        scene.spawn(Sphere::new(), Vec3::new(0.0, 5.0, 0.0)).unwrap();
        scene.spawn(Sphere::new(), Vec3::new(3.0, 8.0, 0.0)).unwrap();

        let reg = scene.registry();
        assert_eq!(reg.allocator().uploads.len(), 2);
        assert_eq!(reg.ref_count(MeshKind::Cube), 5);
        assert_eq!(reg.ref_count(MeshKind::Sphere), 2);
        assert_eq!(scene.len(), 7);
    }

    #[test]
    fn teardown_frees_every_kind() {
        let mut scene = scene();
        scene.spawn(Cube::new(), Vec3::ZERO).unwrap();
        scene.spawn(Cube::new(), Vec3::X).unwrap();
        scene.spawn(Sphere::new(), Vec3::Y).unwrap();

        scene.teardown();
        let reg = scene.registry();
        assert!(scene.is_empty());
        assert!(reg.is_empty());
        assert_eq!(reg.ref_count(MeshKind::Cube), 0);
        assert_eq!(reg.allocator().frees.len(), 2);
    }

    #[test]
    fn despawn_releases_one_reference() {
        let mut scene = scene();
        let a = scene.spawn(Cube::new(), Vec3::ZERO).unwrap();
        let b = scene.spawn(Cube::new(), Vec3::X).unwrap();

        assert!(scene.despawn(a));
        assert!(!scene.despawn(a));
        assert!(scene.registry().is_allocated(MeshKind::Cube));
        assert!(scene.get(a).is_none());
        assert!(scene.get(b).is_some());

        assert!(scene.despawn(b));
        assert!(!scene.registry().is_allocated(MeshKind::Cube));
    }

    #[test]
    fn failed_spawn_keeps_scene_unchanged() {
        let mut scene = Scene::new(CountingAllocator::failing());
        assert!(scene.spawn(Cube::new(), Vec3::ZERO).is_err());
        assert!(scene.is_empty());
        assert!(scene.registry().is_empty());

        // the allocator recovers; the next spawn uploads normally
        let id = scene.spawn(Cube::new(), Vec3::ZERO).unwrap();
        assert_eq!(scene.registry().ref_count(MeshKind::Cube), 1);
        assert!(scene.get(id).is_some());
    }

    #[test]
    fn draw_list_composes_transforms() {
        let mut scene = scene();
        let id = scene.spawn(Sphere::new(), Vec3::new(1.0, 5.0, -2.0)).unwrap();
        scene.update(0.01);

        let view = Mat4::look_at_rh(Vec3::new(0.0, 2.0, 10.0), Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(45f32.to_radians(), 1.5, 1.0, 1000.0);
        let items = scene.draw_list(view, proj);

        assert_eq!(items.len(), 1);
        let item = items[0];
        assert_eq!(item.id, id);
        assert_eq!(item.kind, MeshKind::Sphere);
        assert_eq!(item.style, DrawStyle::WireLoop);

        let model = scene.get(id).unwrap().model_matrix();
        assert!(item.mvp.abs_diff_eq(proj * view * model, 1e-5));
        // translation-only model: the normal matrix is identity
        assert!(item.normal.abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn update_reaches_every_object() {
        let mut scene = scene();
        let cube = scene.spawn(Cube::new(), Vec3::ZERO).unwrap();
        let sphere = scene.spawn(Sphere::new(), Vec3::new(0.0, 5.0, 0.0)).unwrap();
        scene.update(std::f32::consts::FRAC_PI_2);

        assert!((scene.get(cube).unwrap().position().y - 2.0).abs() < 1e-6);
        assert!(scene.get(sphere).unwrap().position().y < 5.0);
    }

    #[test]
    fn normal_matrix_undoes_scale() {
        let model = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let n = normal_matrix(model);
        assert!(n.abs_diff_eq(Mat4::from_scale(Vec3::new(0.5, 1.0, 1.0)), 1e-6));
    }
}
