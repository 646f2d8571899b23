//! Mount lifecycle: build on mount, animate per frame, resize, tear down.
//!
//! [`Mount`] drives everything through two seams:
//!
//! - [`Host`] is the environment that owns the drawing surface: it schedules
//!   frame callbacks, delivers resize notifications and reports the container
//!   size (a winit window or a browser canvas, see [`crate::flow`])
//! - [`RenderBackend`] is the graphics library that uploads and draws the scene
//!   (wgpu, see [`crate::render::Renderer`])
//!
//! The state machine is `Unmounted -> mount -> Running -> unmount -> Unmounted`.
//! Everything allocated by a mount lives in one `Running` value that is taken
//! out exactly once on unmount, so nothing outlives or is shared across mounts.

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    camera::{PerspectiveCamera, Viewport},
    clock::Clock,
    config::SceneConfig,
    data_structures::scene_graph::Scene,
    scenes::{self, Staged},
};

/// Identifies one scheduled frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Identifies one registered resize listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

pub trait Host {
    /// Size of the surface's container, `None` if it is detached.
    fn container_size(&self) -> Option<Viewport>;

    /// Physical pixels per unit of [`Host::container_size`].
    fn device_pixel_ratio(&self) -> f32;

    /// Schedules one frame callback. The host later calls [`Mount::frame`] with the handle.
    fn request_frame(&mut self) -> FrameHandle;

    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Starts delivering size-change notifications, answered with [`Mount::resize`].
    fn add_resize_listener(&mut self) -> ListenerId;

    fn remove_resize_listener(&mut self, listener: ListenerId);
}

pub trait RenderBackend {
    /// Allocates GPU resources for every geometry and material in `scene`.
    fn upload(&mut self, scene: &Scene) -> anyhow::Result<()>;

    /// Resizes the drawing surface to `width` x `height` physical pixels.
    fn set_size(&mut self, width: u32, height: u32);

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> anyhow::Result<()>;

    /// Frees everything `upload` allocated. Calling it again is a no-op.
    fn release(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Unmounted,
    Running,
}

struct Running<B> {
    backend: B,
    staged: Staged,
    clock: Clock,
    pixel_ratio: f32,
    frame: Option<FrameHandle>,
    listener: Option<ListenerId>,
}

impl<B: RenderBackend> Running<B> {
    fn tick<H: Host>(&mut self, host: &mut H) {
        let elapsed = self.clock.elapsed_secs();
        self.staged.animate(elapsed);
        if let Err(e) = self.backend.render(&self.staged.scene, &self.staged.camera) {
            log::error!("Unable to render frame: {:#}", e);
        }
        self.frame = Some(host.request_frame());
    }

    fn resize<H: Host>(&mut self, host: &H) -> bool {
        let viewport = match host.container_size() {
            Some(viewport) if !viewport.is_empty() => viewport,
            _ => return false,
        };
        let camera = &mut self.staged.camera;
        camera.aspect = viewport.aspect();
        camera.update_projection_matrix();
        let (width, height) = viewport.drawing_buffer_size(self.pixel_ratio);
        self.backend.set_size(width, height);
        log::debug!(
            "resized to {}x{} ({}x{} physical)",
            viewport.width,
            viewport.height,
            width,
            height
        );
        true
    }
}

/// One mountable instance of the landing scene.
pub struct Mount<B: RenderBackend> {
    config: SceneConfig,
    running: Option<Running<B>>,
}

impl<B: RenderBackend> Mount<B> {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            running: None,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        match self.running {
            Some(_) => Phase::Running,
            None => Phase::Unmounted,
        }
    }

    /// Builds the scene, uploads it, sizes it, starts listening for resizes and
    /// renders the first frame.
    ///
    /// `backend` is `None` when the host has no drawing surface yet; construction
    /// is then skipped without touching the host and `Ok(false)` is returned.
    pub fn mount<H: Host>(&mut self, host: &mut H, backend: Option<B>) -> anyhow::Result<bool> {
        if self.running.is_some() {
            log::warn!("mount called on a running scene, ignoring");
            return Ok(false);
        }
        let Some(mut backend) = backend else {
            log::info!("no rendering surface available, skipping scene construction");
            return Ok(false);
        };

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let staged = scenes::build(&self.config, &mut rng);

        if let Err(e) = backend.upload(&staged.scene) {
            backend.release();
            return Err(e.context("failed to upload the scene"));
        }

        let mut running = Running {
            backend,
            staged,
            clock: Clock::start(),
            pixel_ratio: self.config.pixel_ratio(host.device_pixel_ratio()),
            frame: None,
            listener: None,
        };
        running.resize(&*host);
        running.listener = Some(host.add_resize_listener());
        running.tick(host);

        log::info!(
            "mounted {} scene at pixel ratio {}",
            self.config.variant,
            running.pixel_ratio
        );
        self.running = Some(running);
        Ok(true)
    }

    /// Frame callback. Ignored unless `handle` is the frame this mount is waiting for.
    pub fn frame<H: Host>(&mut self, host: &mut H, handle: FrameHandle) -> bool {
        let Some(running) = self.running.as_mut() else {
            return false;
        };
        if running.frame != Some(handle) {
            log::trace!("dropping stale frame {:?}", handle);
            return false;
        }
        running.frame = None;
        running.tick(host);
        true
    }

    /// Resize notification. A no-op when unmounted or when the container has no area.
    pub fn resize<H: Host>(&mut self, host: &H) -> bool {
        match self.running.as_mut() {
            Some(running) => running.resize(host),
            None => false,
        }
    }

    /// Cancels the pending frame, removes the resize listener and releases every
    /// resource. Returns `false` when there was nothing to tear down.
    pub fn unmount<H: Host>(&mut self, host: &mut H) -> bool {
        let Some(mut running) = self.running.take() else {
            return false;
        };
        if let Some(frame) = running.frame.take() {
            host.cancel_frame(frame);
        }
        if let Some(listener) = running.listener.take() {
            host.remove_resize_listener(listener);
        }
        running.backend.release();
        log::info!("unmounted {} scene", self.config.variant);
        true
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.running.as_ref().and_then(|r| r.frame)
    }

    pub fn staged(&self) -> Option<&Staged> {
        self.running.as_ref().map(|r| &r.staged)
    }

    pub fn backend(&self) -> Option<&B> {
        self.running.as_ref().map(|r| &r.backend)
    }

    pub fn backend_mut(&mut self) -> Option<&mut B> {
        self.running.as_mut().map(|r| &mut r.backend)
    }

    pub fn pixel_ratio(&self) -> Option<f32> {
        self.running.as_ref().map(|r| r.pixel_ratio)
    }
}
