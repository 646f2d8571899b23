//! nebula-one
//!
//! An animated 3D landing scene for native windows and the browser. A small
//! subject (a humanoid mascot or an abstract torus-knot core) floats inside a
//! tilted ring and a shell of particles, lit by one ambient and one point light
//! and softened by distance fog.
//!
//! High-level modules
//! - `camera`: perspective camera, viewport maths and the camera uniform
//! - `clock`: elapsed time since the render loop started
//! - `config`: scene variant, particle count, pixel ratio cap and seed
//! - `context`: GPU device, queue and surface plus the shared uniforms
//! - `data_structures`: scene graph, transforms, materials and render targets
//! - `flow`: winit event loop and the window/canvas host
//! - `lifecycle`: mount, per-frame animation, resize and teardown
//! - `pipelines`: render pipelines for opaque, transparent and point geometry
//! - `render`: the wgpu renderer with offscreen capture
//! - `resources`: procedural geometry, the particle field and GPU upload
//! - `scenes`: construction and animation of both variants
//!

pub mod camera;
pub mod clock;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod lifecycle;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scenes;

// Re-exports commonly used types for convenience in downstream code.
pub use config::{SceneConfig, Variant};
pub use flow::run;
pub use lifecycle::{Host, Mount, RenderBackend};
pub use render::Renderer;
