//! Procedural geometry.
//!
//! Every shape in the scene is generated here rather than loaded from disk.
//! Triangles wind counter-clockwise when seen from outside so back faces can
//! be culled.

use std::f32::consts::{PI, TAU};

use cgmath::{InnerSpace, Vector3};

pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex for MeshVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Indexed triangle list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    fn push(&mut self, position: Vector3<f32>, normal: Vector3<f32>) {
        self.vertices.push(MeshVertex {
            position: position.into(),
            normal: normal.into(),
        });
    }

    fn quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Shape definition owned by a scene.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Mesh(MeshData),
    Points(Vec<[f32; 3]>),
}

/// UV sphere centred at the origin.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let mut mesh = MeshData::default();
    let row = width_segments + 1;

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let normal = Vector3::new(
                -(u * TAU).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * TAU).sin() * (v * PI).sin(),
            );
            mesh.push(normal * radius, normal);
        }
    }

    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            // The poles collapse one triangle of each quad
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

/// Rotates a 2D profile `(x, y, normal_x, normal_y)` around the Y axis.
fn lathe(profile: &[(f32, f32, f32, f32)], segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let points = profile.len() as u32;

    for i in 0..=segments {
        let phi = i as f32 / segments as f32 * TAU;
        let (sin, cos) = phi.sin_cos();
        for &(x, y, nx, ny) in profile {
            let normal = Vector3::new(nx * sin, ny, nx * cos);
            let normal = if normal.magnitude2() > 0.0 {
                normal.normalize()
            } else {
                Vector3::unit_y()
            };
            mesh.push(Vector3::new(x * sin, y, x * cos), normal);
        }
    }

    for i in 0..segments {
        for j in 0..points - 1 {
            let base = j + i * points;
            let a = base;
            let b = base + points;
            let c = base + points + 1;
            let d = base + 1;
            mesh.indices.extend_from_slice(&[a, b, d, c, d, b]);
        }
    }
    mesh
}

/// Cylinder of `length` capped by two hemispheres, standing on the Y axis.
/// Total height is `length + 2 * radius`.
pub fn capsule(radius: f32, length: f32, cap_segments: u32, radial_segments: u32) -> MeshData {
    let cap_segments = cap_segments.max(1);
    let half = length / 2.0;
    let mut profile = Vec::with_capacity(2 * (cap_segments as usize + 1));

    for k in 0..=cap_segments {
        let theta = -PI / 2.0 + k as f32 / cap_segments as f32 * PI / 2.0;
        let (sin, cos) = theta.sin_cos();
        profile.push((radius * cos, -half + radius * sin, cos, sin));
    }
    for k in 0..=cap_segments {
        let theta = k as f32 / cap_segments as f32 * PI / 2.0;
        let (sin, cos) = theta.sin_cos();
        profile.push((radius * cos, half + radius * sin, cos, sin));
    }

    lathe(&profile, radial_segments.max(3))
}

/// Closed cylinder (or truncated cone) centred at the origin.
pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> MeshData {
    let radial_segments = radial_segments.max(3);
    let half = height / 2.0;
    let slope = (radius_bottom - radius_top) / height;
    let mut mesh = MeshData::default();
    let row = radial_segments + 1;

    for (y, radius) in [(half, radius_top), (-half, radius_bottom)] {
        for x in 0..=radial_segments {
            let theta = x as f32 / radial_segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            mesh.push(
                Vector3::new(radius * sin, y, radius * cos),
                Vector3::new(sin, slope, cos).normalize(),
            );
        }
    }
    for x in 0..radial_segments {
        mesh.quad(x, row + x, row + x + 1, x + 1);
    }

    for (top, y, radius) in [(true, half, radius_top), (false, -half, radius_bottom)] {
        let normal = Vector3::new(0.0, y.signum(), 0.0);
        let centre_start = mesh.vertices.len() as u32;
        for _ in 0..radial_segments {
            mesh.push(Vector3::new(0.0, y, 0.0), normal);
        }
        let ring_start = mesh.vertices.len() as u32;
        for x in 0..=radial_segments {
            let theta = x as f32 / radial_segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            mesh.push(Vector3::new(radius * sin, y, radius * cos), normal);
        }
        for x in 0..radial_segments {
            let c = centre_start + x;
            let i = ring_start + x;
            if top {
                mesh.indices.extend_from_slice(&[i, i + 1, c]);
            } else {
                mesh.indices.extend_from_slice(&[i + 1, i, c]);
            }
        }
    }
    mesh
}

/// Ring lying in the XY plane around the Z axis.
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let radial_segments = radial_segments.max(3);
    let tubular_segments = tubular_segments.max(3);
    let mut mesh = MeshData::default();
    let row = tubular_segments + 1;

    for j in 0..=radial_segments {
        let v = j as f32 / radial_segments as f32 * TAU;
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;
            let position = Vector3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let centre = Vector3::new(radius * u.cos(), radius * u.sin(), 0.0);
            mesh.push(position, (position - centre).normalize());
        }
    }

    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            mesh.quad(a, b, c, d);
        }
    }
    mesh
}

fn knot_point(u: f32, p: u32, q: u32, radius: f32) -> Vector3<f32> {
    let qu_over_p = q as f32 / p as f32 * u;
    let cs = qu_over_p.cos();
    Vector3::new(
        radius * (2.0 + cs) * 0.5 * u.cos(),
        radius * (2.0 + cs) * 0.5 * u.sin(),
        radius * qu_over_p.sin() * 0.5,
    )
}

/// Tube swept along a `(p, q)` torus knot.
pub fn torus_knot(
    radius: f32,
    tube: f32,
    tubular_segments: u32,
    radial_segments: u32,
    p: u32,
    q: u32,
) -> MeshData {
    let tubular_segments = tubular_segments.max(3);
    let radial_segments = radial_segments.max(3);
    let p = p.max(1);
    let mut mesh = MeshData::default();
    let row = radial_segments + 1;

    for i in 0..=tubular_segments {
        let u = i as f32 / tubular_segments as f32 * p as f32 * TAU;
        let p1 = knot_point(u, p, q, radius);
        let p2 = knot_point(u + 0.01, p, q, radius);
        // Frenet-like frame from two close samples on the curve
        let t = p2 - p1;
        let n = p2 + p1;
        let b = t.cross(n).normalize();
        let n = b.cross(t).normalize();

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            let position = p1 + n * cx + b * cy;
            mesh.push(position, (position - p1).normalize());
        }
    }

    for j in 1..=tubular_segments {
        for i in 1..=radial_segments {
            let a = row * (j - 1) + (i - 1);
            let b = row * j + (i - 1);
            let c = row * j + i;
            let d = row * (j - 1) + i;
            mesh.quad(a, b, c, d);
        }
    }
    mesh
}
