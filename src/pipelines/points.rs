use cgmath::Matrix4;

use crate::{
    data_structures::{material::PointsMaterial, texture::Texture},
    pipelines::basic::{DepthMode, mk_render_pipeline},
};

pub const DEPTH_MODE: DepthMode = DepthMode::TestOnly;

/// One particle position, stepped per instance; the sprite corners come from the vertex index.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointRaw {
    pub position: [f32; 3],
}

impl PointRaw {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointRaw>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

/// World matrix of the points node plus its material.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointsUniform {
    model: [[f32; 4]; 4],
    // rgb: linear colour, a: opacity
    colour: [f32; 4],
    // x: sprite size
    size: [f32; 4],
}

impl PointsUniform {
    pub fn new(world: Matrix4<f32>, material: &PointsMaterial) -> Self {
        let [r, g, b] = material.colour.to_linear();
        Self {
            model: world.into(),
            colour: [r, g, b, material.opacity],
            size: [material.size, 0.0, 0.0, 0.0],
        }
    }
}

/// Vertices drawn per particle: two triangles forming a square.
pub const VERTICES_PER_POINT: u32 = 6;

pub fn mk_points_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
    light_bind_group_layout: &wgpu::BindGroupLayout,
    points_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Points Pipeline Layout"),
        bind_group_layouts: &[
            camera_bind_group_layout,
            light_bind_group_layout,
            points_bind_group_layout,
        ],
        push_constant_ranges: &[],
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Points Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("points.wgsl").into()),
    };
    mk_render_pipeline(
        device,
        &layout,
        color_format,
        Some(wgpu::BlendState::ALPHA_BLENDING),
        Some((Texture::DEPTH_FORMAT, DEPTH_MODE)),
        None,
        &[PointRaw::desc()],
        shader,
    )
}
