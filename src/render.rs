//! wgpu rendering of a [`Scene`].
//!
//! [`Renderer`] is the [`RenderBackend`] used by the window and canvas hosts.
//! Each frame is drawn in three batches so that blending composes correctly:
//!
//! - opaque meshes with the `basic` pipeline
//! - transparent meshes (the ring) with the `transparent` pipeline
//! - point clouds with the `points` pipeline
//!
//! A headless renderer draws into an offscreen texture instead of a surface and
//! returns the pixels through [`Renderer::capture`].

use std::{iter, sync::Arc, time::Duration};

use anyhow::Context as _;
use winit::window::Window;

use crate::{
    camera::PerspectiveCamera,
    context::Context,
    data_structures::{scene_graph::Scene, texture::Texture},
    lifecycle::RenderBackend,
    pipelines::{Pipelines, points::VERTICES_PER_POINT},
    resources::mesh::{GpuGeometry, GpuMesh, GpuPoints, SceneResources},
};

/// One mesh draw: geometry, material and the instance buffer holding its world matrix.
pub struct Instanced<'a> {
    pub mesh: &'a GpuMesh,
    pub material: &'a wgpu::BindGroup,
    pub instance: &'a wgpu::Buffer,
}

/// One point cloud draw.
pub struct Sprites<'a> {
    pub points: &'a GpuPoints,
    pub group: &'a wgpu::BindGroup,
}

/// Draw lists of one frame, sorted by pipeline.
#[derive(Default)]
pub struct Batches<'a> {
    pub basics: Vec<Instanced<'a>>,
    pub trans: Vec<Instanced<'a>>,
    pub sprites: Vec<Sprites<'a>>,
}

impl<'a> From<&'a SceneResources> for Batches<'a> {
    fn from(resources: &'a SceneResources) -> Self {
        let mut batches = Batches::default();
        for node in &resources.meshes {
            let (Some(mesh), Some(material)) =
                (resources.mesh(node.geometry), resources.material(node.material))
            else {
                continue;
            };
            let instanced = Instanced {
                mesh,
                material: &material.bind_group,
                instance: &node.instance_buffer,
            };
            if material.transparent {
                batches.trans.push(instanced);
            } else {
                batches.basics.push(instanced);
            }
        }
        for node in &resources.points {
            if let Some(points) = resources
                .point_cloud(node.geometry)
                .filter(|points| points.count > 0)
            {
                batches.sprites.push(Sprites {
                    points,
                    group: &node.bind_group,
                });
            }
        }
        batches
    }
}

fn draw_instanced(render_pass: &mut wgpu::RenderPass<'_>, instanced: &Instanced<'_>) {
    render_pass.set_bind_group(2, instanced.material, &[]);
    render_pass.set_vertex_buffer(0, instanced.mesh.vertex_buffer.slice(..));
    render_pass.set_vertex_buffer(1, instanced.instance.slice(..));
    render_pass.set_index_buffer(
        instanced.mesh.index_buffer.slice(..),
        wgpu::IndexFormat::Uint32,
    );
    render_pass.draw_indexed(0..instanced.mesh.num_elements, 0, 0..1);
}

#[derive(Debug)]
pub struct Renderer {
    pub ctx: Context,
    pipelines: Pipelines,
    resources: Option<SceneResources>,
}

impl Renderer {
    /// Renderer presenting into `window`.
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        Ok(Self::from_context(Context::new(window).await?))
    }

    /// Renderer without a surface. Only [`capture`](Self::capture) produces output.
    pub async fn headless(width: u32, height: u32) -> anyhow::Result<Self> {
        Ok(Self::from_context(Context::headless(width, height).await?))
    }

    pub fn from_context(ctx: Context) -> Self {
        let pipelines = Pipelines::new(
            &ctx.device,
            ctx.config.format,
            &ctx.camera.bind_group_layout,
            &ctx.light.bind_group_layout,
        );
        Self {
            ctx,
            pipelines,
            resources: None,
        }
    }

    pub fn is_uploaded(&self) -> bool {
        self.resources.is_some()
    }

    /// What the next frame will draw, `None` before an upload.
    pub fn batches(&self) -> Option<Batches<'_>> {
        self.resources.as_ref().map(Batches::from)
    }

    /// Size of the drawing buffer in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.ctx.config.width, self.ctx.config.height)
    }

    pub fn set_clear_colour(&mut self, colour: wgpu::Color) {
        self.ctx.clear_colour = colour;
    }

    fn prepare(&mut self, scene: &Scene, camera: &PerspectiveCamera) {
        self.ctx.camera.uniform.update_view_proj(camera);
        self.ctx.queue.write_buffer(
            &self.ctx.camera.buffer,
            0,
            bytemuck::cast_slice(&[self.ctx.camera.uniform]),
        );
        if let Some(resources) = &self.resources {
            resources.write_transforms(&self.ctx.queue, scene);
        }
    }

    fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        depth: &wgpu::TextureView,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        let Some(resources) = &self.resources else {
            return;
        };
        let batches = Batches::from(resources);

        render_pass.set_bind_group(0, &self.ctx.camera.bind_group, &[]);
        render_pass.set_bind_group(1, &self.ctx.light.bind_group, &[]);

        render_pass.set_pipeline(&self.pipelines.basic);
        for instanced in &batches.basics {
            draw_instanced(&mut render_pass, instanced);
        }

        render_pass.set_pipeline(&self.pipelines.transparent);
        for instanced in &batches.trans {
            draw_instanced(&mut render_pass, instanced);
        }

        render_pass.set_pipeline(&self.pipelines.points);
        for sprites in &batches.sprites {
            render_pass.set_bind_group(2, sprites.group, &[]);
            render_pass.set_vertex_buffer(0, sprites.points.buffer.slice(..));
            render_pass.draw(0..VERTICES_PER_POINT, 0..sprites.points.count);
        }
    }

    /// Renders one frame offscreen at the current drawing buffer size and reads it back.
    pub async fn capture(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
    ) -> anyhow::Result<image::RgbaImage> {
        let (width, height) = self.size();
        let format = self.ctx.config.format;
        let swap_red_blue = match format {
            wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb => false,
            wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb => true,
            other => anyhow::bail!("cannot capture frames in {:?}", other),
        };

        self.prepare(scene, camera);
        let target = Texture::create_capture_target(&self.ctx.device, [width, height], format);
        let depth =
            Texture::create_depth_texture(&self.ctx.device, [width, height], "capture_depth_texture");

        // Rows of a texture copy must be aligned to 256 bytes.
        let unpadded_bytes_per_row = 4 * width;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_bytes_per_row = unpadded_bytes_per_row.div_ceil(align) * align;
        let output_buffer = self.ctx.device.create_buffer(&wgpu::BufferDescriptor {
            size: (padded_bytes_per_row * height) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            label: Some("Capture Buffer"),
            mapped_at_creation: false,
        });

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Capture Encoder"),
            });
        self.encode(&mut encoder, &target.view, &depth.view);
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &target.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &output_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self.ctx.queue.submit(iter::once(encoder.finish()));

        let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
        let buffer_slice = output_buffer.slice(..);
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        self.ctx
            .device
            .poll(wgpu::PollType::Wait {
                submission_index: None,
                timeout: Some(Duration::from_secs(3)),
            })
            .map_err(|e| anyhow::anyhow!("device poll failed: {:?}", e))?;
        rx.receive()
            .await
            .context("capture buffer was dropped before it was mapped")?
            .context("cannot map the capture buffer")?;

        let mut pixels = Vec::with_capacity((unpadded_bytes_per_row * height) as usize);
        {
            let data = buffer_slice.get_mapped_range();
            for row in data.chunks(padded_bytes_per_row as usize) {
                pixels.extend_from_slice(&row[..unpadded_bytes_per_row as usize]);
            }
        }
        output_buffer.unmap();

        if swap_red_blue {
            pixels.chunks_exact_mut(4).for_each(|px| px.swap(0, 2));
        }
        image::RgbaImage::from_raw(width, height, pixels)
            .context("captured frame does not match the drawing buffer size")
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn capture_blocking(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
    ) -> anyhow::Result<image::RgbaImage> {
        futures::executor::block_on(self.capture(scene, camera))
    }
}

impl RenderBackend for Renderer {
    fn upload(&mut self, scene: &Scene) -> anyhow::Result<()> {
        let resources = SceneResources::upload(&self.ctx.device, &self.pipelines, scene)?;
        self.ctx.light.write(&self.ctx.queue, scene);
        self.resources = Some(resources);
        Ok(())
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.ctx.resize(width, height);
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> anyhow::Result<()> {
        // We can't render unless the surface is configured
        if !self.ctx.is_surface_configured() {
            return Ok(());
        }
        let Some(surface) = &self.ctx.surface else {
            anyhow::bail!("renderer has no surface to present to");
        };
        let output = match surface.get_current_texture() {
            Ok(output) => output,
            // Reconfigure the surface if it's lost or outdated
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.ctx.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(e).context("cannot acquire the next frame"),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.prepare(scene, camera);
        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        self.encode(&mut encoder, &view, &self.ctx.depth_texture.view);
        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn release(&mut self) {
        if let Some(resources) = self.resources.take() {
            log::debug!(
                "releasing {} geometries and {} materials",
                resources.geometries.len(),
                resources.materials.len()
            );
            for geometry in &resources.geometries {
                match geometry {
                    GpuGeometry::Mesh(mesh) => {
                        mesh.vertex_buffer.destroy();
                        mesh.index_buffer.destroy();
                    }
                    GpuGeometry::Points(points) => points.buffer.destroy(),
                }
            }
            for material in resources.materials.iter().flatten() {
                material.buffer.destroy();
            }
        }
    }
}
