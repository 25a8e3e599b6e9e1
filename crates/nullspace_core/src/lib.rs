//! `nullspace_core` — CPU-side building blocks for the Nullspace sandbox.
//!
//! # Module layout
//!
//! | Module    | Responsibility                                              |
//! |-----------|-------------------------------------------------------------|
//! | `mesh`    | `MeshCreateInfo`, `MeshData`, procedural primitive builders |
//! | `camera`  | Free-fly / showreel `FlyCamera`                             |
//! | `physics` | Ground plane and the explicit-Euler `Body` integrator       |
//! | `scene`   | `SceneObject` trait and the `Cube` / `Sphere` variants      |
//! | `time`    | Frame clock producing `Time` snapshots                      |
//! | `input`   | winit key → camera action bindings (feature `input`)        |
//!
//! Nothing in here touches the GPU; `nullspace_renderer` turns the output of
//! these modules into buffers and draw calls.

pub mod camera;
pub mod mesh;
pub mod physics;
pub mod scene;
pub mod time;

#[cfg(feature = "input")]
pub mod input;

pub use camera::{CameraAction, CameraConfig, CameraInput, FlyCamera};
pub use mesh::{MeshCreateInfo, MeshData, MeshError, MeshKind};
pub use physics::{Body, GroundPlane};
pub use scene::{Cube, DrawStyle, SceneObject, Sphere};
pub use time::{Time, TimeClock};

#[cfg(feature = "input")]
pub use input::{KeyBindings, KeyCode};

// glam is part of the public API (positions, matrices); re-export it so
// downstream crates stay on the same version.
pub use glam;
