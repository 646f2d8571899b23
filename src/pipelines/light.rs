use wgpu::util::DeviceExt;

use crate::{data_structures::scene_graph::Scene, pipelines};

pub struct LightResources {
    pub uniform: LightUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl LightResources {
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform = LightUniform::default();
        let buffer = mk_buffer(device, uniform);
        let bind_group_layout = pipelines::mk_uniform_layout(device, "light_bind_group_layout");
        let bind_group =
            pipelines::mk_uniform_bind_group(device, &bind_group_layout, &buffer, "light_bind_group");
        Self {
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    pub fn write(&mut self, queue: &wgpu::Queue, scene: &Scene) {
        self.uniform = LightUniform::from(scene);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

impl std::fmt::Debug for LightResources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LightResources")
            .field("uniform", &self.uniform)
            .finish_non_exhaustive()
    }
}

/// Lights and fog of a scene. Every field is a vec4 so no manual padding is needed.
#[repr(C)]
#[derive(Debug, Default, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    // rgb: colour * intensity
    ambient: [f32; 4],
    // xyz: position, w: cut-off distance (0 = infinite)
    point_position: [f32; 4],
    // rgb: colour * intensity
    point_colour: [f32; 4],
    fog_colour: [f32; 4],
    // x: near, y: far
    fog_range: [f32; 4],
}

impl From<&Scene> for LightUniform {
    fn from(scene: &Scene) -> Self {
        let scaled = |rgb: [f32; 3], k: f32| [rgb[0] * k, rgb[1] * k, rgb[2] * k, 1.0];
        let [fr, fg, fb] = scene.fog.colour.to_linear();
        let p = scene.point.position;
        Self {
            ambient: scaled(scene.ambient.colour.to_linear(), scene.ambient.intensity),
            point_position: [p.x, p.y, p.z, scene.point.distance],
            point_colour: scaled(scene.point.colour.to_linear(), scene.point.intensity),
            fog_colour: [fr, fg, fb, 1.0],
            fog_range: [scene.fog.near, scene.fog.far, 0.0, 0.0],
        }
    }
}

pub fn mk_buffer(device: &wgpu::Device, light_uniform: LightUniform) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Light Buffer"),
        contents: bytemuck::cast_slice(&[light_uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}
