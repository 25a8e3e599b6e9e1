use anyhow::Context as _;
use nullspace_app::{AppContext, Cube, KeyCode, ObjectId, SandboxApp, Sphere, Vec3};
use nullspace_core::mesh::{self, MeshCreateInfo};

/// Spawn positions for the demo scene.
pub struct Layout {
    pub cubes: Vec<Vec3>,
    pub spheres: Vec<Vec3>,
}

impl Default for Layout {
    /// A row of five cubes in front of the camera and three spheres dropped
    /// from different heights behind them.
    fn default() -> Self {
        Self {
            cubes: (-2..=2)
                .map(|i| Vec3::new(i as f32 * 2.0, 0.0, -6.0))
                .collect(),
            spheres: vec![
                Vec3::new(-4.0, 5.0, -10.0),
                Vec3::new(0.0, 8.0, -10.0),
                Vec3::new(4.0, 12.0, -10.0),
            ],
        }
    }
}

/// Demo driver: cubes bob in place, spheres fall onto the floor.  `R`
/// drops the spheres again.
#[derive(Default)]
pub struct Demo {
    layout: Layout,
    spheres: Vec<ObjectId>,
}

impl Demo {
    fn drop_spheres(&mut self, ctx: &mut AppContext) -> anyhow::Result<()> {
        for id in self.spheres.drain(..) {
            ctx.renderer.despawn(id);
        }
        for &pos in &self.layout.spheres {
            self.spheres.push(ctx.renderer.spawn(Sphere::new(), pos)?);
        }
        Ok(())
    }
}

impl SandboxApp for Demo {
    fn setup(&mut self, ctx: &mut AppContext) -> anyhow::Result<()> {
        // generator smoke check before any GPU work
        let quad = mesh::generate(&MeshCreateInfo::Quad {
            length: 2.0,
            breadth: 2.0,
        })?;
        log::debug!("quad check: {} vertices, {} indices", quad.vertices.len(), quad.indices.len());

        for (i, &pos) in self.layout.cubes.iter().enumerate() {
            ctx.renderer.spawn(Cube::with_phase(i as f32 * 0.5), pos)?;
        }
        self.drop_spheres(ctx)?;

        log::info!(
            "demo ready: {} cubes, {} spheres",
            self.layout.cubes.len(),
            self.spheres.len()
        );
        Ok(())
    }

    fn on_key(&mut self, key: KeyCode, pressed: bool, ctx: &mut AppContext) -> anyhow::Result<()> {
        if key == KeyCode::KeyR && pressed {
            self.drop_spheres(ctx).context("respawning spheres")?;
        }
        Ok(())
    }

    fn teardown(&mut self, _ctx: &mut AppContext) {
        log::info!("demo teardown");
        self.spheres.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_stays_on_the_grid() {
        let layout = Layout::default();
        assert_eq!(layout.cubes.len(), 5);
        assert_eq!(layout.spheres.len(), 3);
        assert!(layout.cubes.iter().all(|p| p.x.abs() <= 8.0 && p.z.abs() <= 8.0));
        assert!(layout.spheres.iter().all(|p| p.x.abs() <= 8.0));
    }

    #[test]
    fn spheres_start_above_contact_height() {
        // contact begins below y = 2 for a unit sphere
        assert!(Layout::default().spheres.iter().all(|p| p.y > 2.0));
    }
}
