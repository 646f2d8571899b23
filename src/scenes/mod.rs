//! Scene construction and the per-frame animation of each variant.
//!
//! Both variants share the same stage: fog, camera, an ambient and a point
//! light, a tilted ring and a particle shell. Only the subject in the middle
//! differs:
//!
//! - [`mascot`]: a humanoid figure that turns, bobs and swings its limbs
//! - [`knot`]: a torus-knot core that tumbles and bobs
//!
//! [`Staged::animate`] is the whole render-loop update: a pure function of the
//! elapsed time that only writes transforms.

pub mod knot;
pub mod mascot;

use std::f32::consts::PI;

use cgmath::{Point3, Vector3};
use rand::Rng;

use crate::{
    camera::PerspectiveCamera,
    config::{SceneConfig, Variant},
    data_structures::{
        instance::Transform,
        material::{Colour, PointsMaterial, StandardMaterial},
        scene_graph::{AmbientLight, Fog, NodeId, PointLight, Scene},
    },
    resources::{
        geometry::{self, Geometry},
        particles::ParticleField,
    },
};

pub const RING_SPIN: f32 = 0.35;
pub const PARTICLE_SPIN: f32 = 0.15;
pub const CAMERA_BASE_HEIGHT: f32 = 0.3;
pub const CAMERA_SWAY: f32 = 0.2;
pub const CAMERA_SWAY_FREQUENCY: f32 = 0.4;

/// Nodes animated the same way in every variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Backdrop {
    pub ring: NodeId,
    pub particles: NodeId,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rig {
    Mascot(mascot::MascotRig),
    Core(knot::KnotRig),
}

/// A fully built scene with its camera and the handles the animation needs.
#[derive(Clone, Debug, PartialEq)]
pub struct Staged {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub rig: Rig,
    pub backdrop: Backdrop,
}

impl Staged {
    /// Applies the transforms for `elapsed` seconds since the loop started.
    pub fn animate(&mut self, elapsed: f32) {
        match &self.rig {
            Rig::Mascot(rig) => rig.animate(&mut self.scene, elapsed),
            Rig::Core(rig) => rig.animate(&mut self.scene, elapsed),
        }
        self.scene.transform_mut(self.backdrop.ring).rotation.z = elapsed * RING_SPIN;
        self.scene.transform_mut(self.backdrop.particles).rotation.y = elapsed * PARTICLE_SPIN;
        self.camera.position.y =
            (elapsed * CAMERA_SWAY_FREQUENCY).sin() * CAMERA_SWAY + CAMERA_BASE_HEIGHT;
    }
}

pub fn build<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Staged {
    let mut scene = Scene::new(
        Fog {
            colour: Colour::from_hex(0x0b0f1f),
            near: 6.0,
            far: 18.0,
        },
        AmbientLight {
            colour: Colour::from_hex(0x9db3ff),
            intensity: 0.6,
        },
        PointLight {
            colour: Colour::from_hex(0x7ef9ff),
            intensity: 1.2,
            distance: 20.0,
            position: Vector3::new(4.0, 2.0, 6.0),
        },
    );

    let mut camera = PerspectiveCamera::new(50.0, 1.0, 0.1, 100.0);
    camera.position = Point3::new(0.0, 0.5, 7.0);

    let rig = match config.variant {
        Variant::Mascot => Rig::Mascot(mascot::build(&mut scene)),
        Variant::Core => Rig::Core(knot::build(&mut scene)),
    };
    let field = ParticleField::generate(config.particle_count, rng);
    let backdrop = add_backdrop(&mut scene, field);

    log::debug!(
        "built {} scene: {} nodes, {} particles",
        config.variant,
        scene.node_count(),
        config.particle_count
    );

    Staged {
        scene,
        camera,
        rig,
        backdrop,
    }
}

fn add_backdrop(scene: &mut Scene, field: ParticleField) -> Backdrop {
    let ring_geometry = scene.add_geometry(Geometry::Mesh(geometry::torus(1.4, 0.06, 16, 100)));
    let ring_material = scene.add_material(
        StandardMaterial::new(0x9d82ff)
            .emissive(0x1d0f3f)
            .roughness(0.4)
            .metalness(0.7)
            .opacity(0.6),
    );
    let mut ring_transform = Transform::at(0.0, 0.2, 0.0);
    ring_transform.rotation.x = PI * 0.35;
    let ring = scene.add_mesh("ring", None, ring_transform, ring_geometry, ring_material);

    let particle_geometry = scene.add_geometry(Geometry::Points(field.into_points()));
    let particle_material = scene.add_material(PointsMaterial::new(0x8ae4ff, 0.04).opacity(0.75));
    let particles = scene.add_points(
        "particles",
        None,
        Transform::new(),
        particle_geometry,
        particle_material,
    );

    Backdrop { ring, particles }
}
