use anyhow::Context as _;
use wgpu::util::DeviceExt;

use crate::{
    data_structures::{
        instance::InstanceRaw,
        material::Material,
        scene_graph::{GeometryId, MaterialId, NodeId, NodeKind, Scene},
    },
    pipelines::{
        self, Pipelines,
        basic::MaterialUniform,
        points::{PointRaw, PointsUniform},
    },
    resources::geometry::{Geometry, MeshData},
};

/// Vertex and index buffers of one mesh geometry.
#[derive(Debug)]
pub struct GpuMesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

impl GpuMesh {
    pub fn new(device: &wgpu::Device, name: &str, data: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", name)),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Index Buffer", name)),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            name: name.to_string(),
            vertex_buffer,
            index_buffer,
            num_elements: data.indices.len() as u32,
        }
    }
}

/// Particle positions, one instance each.
#[derive(Debug)]
pub struct GpuPoints {
    pub buffer: wgpu::Buffer,
    pub count: u32,
}

impl GpuPoints {
    pub fn new(device: &wgpu::Device, name: &str, points: &[[f32; 3]]) -> Self {
        let raw = points
            .iter()
            .map(|&position| PointRaw { position })
            .collect::<Vec<_>>();
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Points Buffer", name)),
            contents: bytemuck::cast_slice(&raw),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            buffer,
            count: points.len() as u32,
        }
    }
}

#[derive(Debug)]
pub enum GpuGeometry {
    Mesh(GpuMesh),
    Points(GpuPoints),
}

/// Uniform buffer and bind group of a standard material.
#[derive(Debug)]
pub struct GpuMaterial {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub transparent: bool,
}

/// A mesh node: which geometry and material to draw, and where.
#[derive(Debug)]
pub struct MeshNode {
    pub node: NodeId,
    pub geometry: GeometryId,
    pub material: MaterialId,
    pub instance_buffer: wgpu::Buffer,
}

/// A points node owns its uniform since the world matrix lives there.
#[derive(Debug)]
pub struct PointsNode {
    pub node: NodeId,
    pub geometry: GeometryId,
    pub material: MaterialId,
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

/// Everything a scene needs on the GPU. Dropping it frees the buffers.
#[derive(Debug)]
pub struct SceneResources {
    pub geometries: Vec<GpuGeometry>,
    pub materials: Vec<Option<GpuMaterial>>,
    pub meshes: Vec<MeshNode>,
    pub points: Vec<PointsNode>,
}

impl SceneResources {
    pub fn upload(
        device: &wgpu::Device,
        pipelines: &Pipelines,
        scene: &Scene,
    ) -> anyhow::Result<Self> {
        let geometries = scene
            .geometries()
            .map(|(id, geometry)| {
                let name = format!("geometry {}", id.index());
                match geometry {
                    Geometry::Mesh(data) => GpuGeometry::Mesh(GpuMesh::new(device, &name, data)),
                    Geometry::Points(points) => {
                        GpuGeometry::Points(GpuPoints::new(device, &name, points))
                    }
                }
            })
            .collect::<Vec<_>>();

        let materials = scene
            .materials()
            .map(|(_, material)| match material {
                Material::Standard(standard) => {
                    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("Material Buffer"),
                        contents: bytemuck::cast_slice(&[MaterialUniform::from(standard)]),
                        usage: wgpu::BufferUsages::UNIFORM,
                    });
                    let bind_group = pipelines::mk_uniform_bind_group(
                        device,
                        &pipelines.material_layout,
                        &buffer,
                        "material_bind_group",
                    );
                    Some(GpuMaterial {
                        buffer,
                        bind_group,
                        transparent: standard.transparent,
                    })
                }
                // Points materials are folded into the per-node uniform.
                Material::Points(_) => None,
            })
            .collect::<Vec<_>>();

        let world = scene.world_matrices();
        let mut meshes = Vec::new();
        let mut points = Vec::new();
        for (id, node) in scene.nodes() {
            let idx = id.index();
            match node.kind {
                NodeKind::Group => (),
                NodeKind::Mesh { geometry, material } => {
                    match geometries.get(geometry.index()) {
                        Some(GpuGeometry::Mesh(_)) => (),
                        _ => anyhow::bail!("mesh node {:?} does not reference a mesh geometry", node.name),
                    }
                    materials
                        .get(material.index())
                        .and_then(Option::as_ref)
                        .with_context(|| {
                            format!("mesh node {:?} does not reference a standard material", node.name)
                        })?;
                    let instance_buffer =
                        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                            label: Some(&format!("{:?} Instance Buffer", node.name)),
                            contents: bytemuck::cast_slice(&[InstanceRaw::from_world(world[idx])]),
                            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                        });
                    meshes.push(MeshNode {
                        node: id,
                        geometry,
                        material,
                        instance_buffer,
                    });
                }
                NodeKind::Points { geometry, material } => {
                    match geometries.get(geometry.index()) {
                        Some(GpuGeometry::Points(_)) => (),
                        _ => anyhow::bail!("points node {:?} does not reference a point geometry", node.name),
                    }
                    let Material::Points(points_material) = scene.material(material) else {
                        anyhow::bail!("points node {:?} does not reference a points material", node.name);
                    };
                    let uniform_buffer =
                        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                            label: Some(&format!("{:?} Points Uniform", node.name)),
                            contents: bytemuck::cast_slice(&[PointsUniform::new(
                                world[idx],
                                points_material,
                            )]),
                            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                        });
                    let bind_group = pipelines::mk_uniform_bind_group(
                        device,
                        &pipelines.points_layout,
                        &uniform_buffer,
                        "points_bind_group",
                    );
                    points.push(PointsNode {
                        node: id,
                        geometry,
                        material,
                        uniform_buffer,
                        bind_group,
                    });
                }
            }
        }

        log::debug!(
            "uploaded {} geometries, {} mesh nodes and {} point clouds",
            geometries.len(),
            meshes.len(),
            points.len()
        );
        Ok(Self {
            geometries,
            materials,
            meshes,
            points,
        })
    }

    /// Pushes the current world matrices of every drawn node to the GPU.
    pub fn write_transforms(&self, queue: &wgpu::Queue, scene: &Scene) {
        let world = scene.world_matrices();
        for mesh in &self.meshes {
            let raw = InstanceRaw::from_world(world[mesh.node.index()]);
            queue.write_buffer(&mesh.instance_buffer, 0, bytemuck::cast_slice(&[raw]));
        }
        for node in &self.points {
            if let Material::Points(material) = scene.material(node.material) {
                let uniform = PointsUniform::new(world[node.node.index()], material);
                queue.write_buffer(&node.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
            }
        }
    }

    pub fn mesh(&self, id: GeometryId) -> Option<&GpuMesh> {
        match self.geometries.get(id.index()) {
            Some(GpuGeometry::Mesh(mesh)) => Some(mesh),
            _ => None,
        }
    }

    pub fn point_cloud(&self, id: GeometryId) -> Option<&GpuPoints> {
        match self.geometries.get(id.index()) {
            Some(GpuGeometry::Points(points)) => Some(points),
            _ => None,
        }
    }

    pub fn material(&self, id: MaterialId) -> Option<&GpuMaterial> {
        self.materials.get(id.index()).and_then(Option::as_ref)
    }
}
