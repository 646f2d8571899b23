//! Engine data structures: transforms, materials, textures and the scene graph.
//!
//! - `instance` holds per-node transformation data and its GPU layout
//! - `material` describes surface appearance of meshes and particles
//! - `scene_graph` owns every node, geometry and material of one mount
//! - `texture` wraps the depth buffer and offscreen capture targets

pub mod instance;
pub mod material;
pub mod scene_graph;
pub mod texture;
