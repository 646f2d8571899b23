//! Render pipelines.
//!
//! - `basic` draws opaque meshes with the standard material shader
//! - `transparent` draws alpha-blended meshes with the same shader
//! - `points` draws particle fields as camera-facing square sprites
//! - `light` holds the ambient/point light and fog uniform shared by all of them
//!
//! Bind group slots are the same everywhere: 0 camera, 1 lights and fog,
//! 2 per-material (or per-points-node) data.

pub mod basic;
pub mod light;
pub mod points;
pub mod transparent;

#[derive(Debug)]
pub struct Pipelines {
    pub basic: wgpu::RenderPipeline,
    pub transparent: wgpu::RenderPipeline,
    pub points: wgpu::RenderPipeline,
    pub material_layout: wgpu::BindGroupLayout,
    pub points_layout: wgpu::BindGroupLayout,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        light_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let material_layout = mk_uniform_layout(device, "material_bind_group_layout");
        let points_layout = mk_uniform_layout(device, "points_bind_group_layout");
        let basic = basic::mk_basic_pipeline(
            device,
            color_format,
            camera_bind_group_layout,
            light_bind_group_layout,
            &material_layout,
        );
        let transparent = transparent::mk_transparent_pipeline(
            device,
            color_format,
            camera_bind_group_layout,
            light_bind_group_layout,
            &material_layout,
        );
        let points = points::mk_points_pipeline(
            device,
            color_format,
            camera_bind_group_layout,
            light_bind_group_layout,
            &points_layout,
        );
        Self {
            basic,
            transparent,
            points,
            material_layout,
            points_layout,
        }
    }
}

/// Layout for a single uniform buffer visible to both shader stages.
pub fn mk_uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some(label),
    })
}

pub fn mk_uniform_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
        label: Some(label),
    })
}
