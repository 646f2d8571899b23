use crate::{
    data_structures::{instance::InstanceRaw, texture::Texture},
    pipelines::basic::{DepthMode, mk_render_pipeline, mk_standard_layout, standard_shader},
    resources::geometry::{MeshVertex, Vertex},
};

pub const DEPTH_MODE: DepthMode = DepthMode::TestOnly;

/**
 * Same shader and layout as the basic pipeline, but alpha blended so the
 * material's opacity shows through. Drawn after every opaque mesh.
 */
pub fn mk_transparent_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
    light_bind_group_layout: &wgpu::BindGroupLayout,
    material_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = mk_standard_layout(
        device,
        camera_bind_group_layout,
        light_bind_group_layout,
        material_bind_group_layout,
    );
    mk_render_pipeline(
        device,
        &layout,
        color_format,
        Some(wgpu::BlendState::ALPHA_BLENDING),
        Some((Texture::DEPTH_FORMAT, DEPTH_MODE)),
        Some(wgpu::Face::Back),
        &[MeshVertex::desc(), InstanceRaw::desc()],
        standard_shader(),
    )
}
