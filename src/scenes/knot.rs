use crate::{
    data_structures::{
        instance::Transform,
        material::StandardMaterial,
        scene_graph::{NodeId, Scene},
    },
    resources::geometry::{self, Geometry},
};

pub const SPIN_RATE: f32 = 0.45;
pub const TUMBLE_RATE: f32 = 0.2;
pub const BOB_AMPLITUDE: f32 = 0.08;
pub const BOB_FREQUENCY: f32 = 1.4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnotRig {
    pub core: NodeId,
}

impl KnotRig {
    pub fn animate(&self, scene: &mut Scene, elapsed: f32) {
        let core = scene.transform_mut(self.core);
        core.rotation.y = elapsed * SPIN_RATE;
        core.rotation.x = elapsed * TUMBLE_RATE;
        core.position.y = (elapsed * BOB_FREQUENCY).sin() * BOB_AMPLITUDE;
    }
}

pub fn build(scene: &mut Scene) -> KnotRig {
    let material = scene.add_material(
        StandardMaterial::new(0x9d82ff)
            .emissive(0x1d0f3f)
            .roughness(0.4)
            .metalness(0.5),
    );
    let knot = scene.add_geometry(Geometry::Mesh(geometry::torus_knot(0.9, 0.28, 160, 20, 2, 3)));
    let core = scene.add_mesh("core", None, Transform::new(), knot, material);
    KnotRig { core }
}
