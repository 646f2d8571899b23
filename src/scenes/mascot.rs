use std::f32::consts::PI;

use crate::{
    data_structures::{
        instance::Transform,
        material::StandardMaterial,
        scene_graph::{NodeId, Scene},
    },
    resources::geometry::{self, Geometry},
};

/// Turn rate of the whole figure around Y, in radians per second.
pub const SPIN_RATE: f32 = 0.45;
pub const BOB_AMPLITUDE: f32 = 0.08;
pub const BOB_FREQUENCY: f32 = 1.4;
pub const STRIDE_FREQUENCY: f32 = 2.0;
pub const ARM_SWING: f32 = 0.35;
pub const LEG_SWING: f32 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MascotRig {
    pub character: NodeId,
    pub left_arm: NodeId,
    pub right_arm: NodeId,
    pub left_leg: NodeId,
    pub right_leg: NodeId,
}

impl MascotRig {
    pub fn animate(&self, scene: &mut Scene, elapsed: f32) {
        let stride = (elapsed * STRIDE_FREQUENCY).sin();

        let character = scene.transform_mut(self.character);
        character.rotation.y = elapsed * SPIN_RATE;
        character.position.y = (elapsed * BOB_FREQUENCY).sin() * BOB_AMPLITUDE;

        // Arms and legs swing in opposite phase
        scene.transform_mut(self.left_arm).rotation.x = stride * ARM_SWING;
        scene.transform_mut(self.right_arm).rotation.x = -stride * ARM_SWING;
        scene.transform_mut(self.left_leg).rotation.x = -stride * LEG_SWING;
        scene.transform_mut(self.right_leg).rotation.x = stride * LEG_SWING;
    }
}

pub fn build(scene: &mut Scene) -> MascotRig {
    let body = scene.add_material(
        StandardMaterial::new(0x7ef9ff)
            .emissive(0x0f3b6f)
            .roughness(0.35)
            .metalness(0.6),
    );
    let accent = scene.add_material(
        StandardMaterial::new(0x9d82ff)
            .emissive(0x1d0f3f)
            .roughness(0.4)
            .metalness(0.5),
    );
    let dark = scene.add_material(StandardMaterial::new(0x0b0f1f).roughness(0.6).metalness(0.2));

    let head_geometry = scene.add_geometry(Geometry::Mesh(geometry::sphere(0.55, 32, 32)));
    let body_geometry = scene.add_geometry(Geometry::Mesh(geometry::capsule(0.45, 0.9, 12, 24)));
    let limb_geometry = scene.add_geometry(Geometry::Mesh(geometry::capsule(0.18, 0.55, 6, 16)));
    let eye_geometry = scene.add_geometry(Geometry::Mesh(geometry::sphere(0.08, 16, 16)));
    let antenna_geometry =
        scene.add_geometry(Geometry::Mesh(geometry::cylinder(0.06, 0.08, 0.4, 16)));
    let orb_geometry = scene.add_geometry(Geometry::Mesh(geometry::sphere(0.12, 16, 16)));

    let character = scene.add_group("character", None, Transform::new());
    let parent = Some(character);

    scene.add_mesh("head", parent, Transform::at(0.0, 1.25, 0.0), head_geometry, accent);
    scene.add_mesh("body", parent, Transform::at(0.0, 0.35, 0.0), body_geometry, body);
    let left_arm = scene.add_mesh(
        "left_arm",
        parent,
        Transform::at(-0.7, 0.5, 0.0).rotated(0.0, 0.0, PI * 0.12),
        limb_geometry,
        body,
    );
    let right_arm = scene.add_mesh(
        "right_arm",
        parent,
        Transform::at(0.7, 0.5, 0.0).rotated(0.0, 0.0, -PI * 0.12),
        limb_geometry,
        body,
    );
    let left_leg = scene.add_mesh(
        "left_leg",
        parent,
        Transform::at(-0.25, -0.65, 0.0).rotated(0.0, 0.0, PI * 0.05),
        limb_geometry,
        accent,
    );
    let right_leg = scene.add_mesh(
        "right_leg",
        parent,
        Transform::at(0.25, -0.65, 0.0).rotated(0.0, 0.0, -PI * 0.05),
        limb_geometry,
        accent,
    );
    scene.add_mesh("left_eye", parent, Transform::at(-0.18, 1.32, 0.48), eye_geometry, dark);
    scene.add_mesh("right_eye", parent, Transform::at(0.18, 1.32, 0.48), eye_geometry, dark);
    scene.add_mesh("antenna", parent, Transform::at(0.0, 1.7, -0.05), antenna_geometry, body);
    scene.add_mesh("antenna_orb", parent, Transform::at(0.0, 1.95, -0.05), orb_geometry, accent);

    MascotRig {
        character,
        left_arm,
        right_arm,
        left_leg,
        right_leg,
    }
}
