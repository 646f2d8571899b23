#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use nebula_one::{
    camera::{PerspectiveCamera, Viewport},
    data_structures::scene_graph::Scene,
    lifecycle::{FrameHandle, Host, ListenerId, RenderBackend},
};

/// Host that keeps every scheduled frame and registered listener so tests can
/// check what a mount leaves behind.
#[derive(Debug)]
pub(crate) struct RecordingHost {
    pub size: Option<Viewport>,
    pub dpr: f32,
    next_id: u64,
    pending: Vec<FrameHandle>,
    listeners: Vec<ListenerId>,
    frame_requests: u32,
    listener_additions: u32,
}

impl RecordingHost {
    pub fn new(width: u32, height: u32, dpr: f32) -> Self {
        Self {
            size: Some(Viewport::new(width, height)),
            dpr,
            next_id: 0,
            pending: Vec::new(),
            listeners: Vec::new(),
            frame_requests: 0,
            listener_additions: 0,
        }
    }

    pub fn detached() -> Self {
        Self {
            size: None,
            ..Self::new(0, 0, 1.0)
        }
    }

    /// Fires the oldest scheduled frame the way a browser would.
    pub fn next_frame(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    pub fn pending_frames(&self) -> usize {
        self.pending.len()
    }

    pub fn listeners(&self) -> usize {
        self.listeners.len()
    }

    /// Every call that schedules or registers something on the host.
    pub fn mutations(&self) -> u32 {
        self.frame_requests + self.listener_additions
    }

    pub fn frame_requests(&self) -> u32 {
        self.frame_requests
    }
}

impl Host for RecordingHost {
    fn container_size(&self) -> Option<Viewport> {
        self.size
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.dpr
    }

    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        self.frame_requests += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
    }

    fn add_resize_listener(&mut self) -> ListenerId {
        self.next_id += 1;
        self.listener_additions += 1;
        let listener = ListenerId(self.next_id);
        self.listeners.push(listener);
        listener
    }

    fn remove_resize_listener(&mut self, listener: ListenerId) {
        self.listeners.retain(|l| *l != listener);
    }
}

/// What a [`RecordingBackend`] was asked to do. Shared so it survives the
/// backend being dropped on unmount.
#[derive(Debug, Default)]
pub(crate) struct BackendLog {
    pub uploads: u32,
    pub renders: u32,
    pub releases: u32,
    pub sizes: Vec<(u32, u32)>,
    pub rendered_aspects: Vec<f32>,
    pub uploaded_nodes: usize,
}

#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    log: Rc<RefCell<BackendLog>>,
    fail_upload: bool,
}

impl RecordingBackend {
    pub fn new() -> (Self, Rc<RefCell<BackendLog>>) {
        let log = Rc::new(RefCell::new(BackendLog::default()));
        (
            Self {
                log: log.clone(),
                fail_upload: false,
            },
            log,
        )
    }

    pub fn failing() -> (Self, Rc<RefCell<BackendLog>>) {
        let (mut backend, log) = Self::new();
        backend.fail_upload = true;
        (backend, log)
    }
}

impl RenderBackend for RecordingBackend {
    fn upload(&mut self, scene: &Scene) -> anyhow::Result<()> {
        if self.fail_upload {
            anyhow::bail!("out of GPU memory");
        }
        let mut log = self.log.borrow_mut();
        log.uploads += 1;
        log.uploaded_nodes = scene.node_count();
        Ok(())
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.log.borrow_mut().sizes.push((width, height));
    }

    fn render(&mut self, _: &Scene, camera: &PerspectiveCamera) -> anyhow::Result<()> {
        let mut log = self.log.borrow_mut();
        log.renders += 1;
        log.rendered_aspects.push(camera.aspect);
        Ok(())
    }

    fn release(&mut self) {
        self.log.borrow_mut().releases += 1;
    }
}

pub(crate) fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-5,
        "expected {} but got {}",
        expected,
        actual
    );
}

/// Renders a seeded scene offscreen and returns the captured frame, or `None`
/// when no adapter is available on this machine.
#[cfg(feature = "integration-tests")]
pub(crate) fn capture(
    config: &nebula_one::SceneConfig,
    elapsed: f32,
    width: u32,
    height: u32,
) -> Option<image::RgbaImage> {
    use nebula_one::{Renderer, scenes};
    use rand::{SeedableRng, rngs::StdRng};

    let mut renderer = match futures::executor::block_on(Renderer::headless(width, height)) {
        Ok(renderer) => renderer,
        Err(e) => {
            println!("Skipping GPU test: {:#}", e);
            return None;
        }
    };
    renderer.set_clear_colour(config.clear_colour);
    let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or(0));
    let mut staged = scenes::build(config, &mut rng);
    staged.camera.aspect = width as f32 / height as f32;
    staged.camera.update_projection_matrix();
    staged.animate(elapsed);
    renderer
        .upload(&staged.scene)
        .expect("Failed to upload the scene.");
    let image = renderer
        .capture_blocking(&staged.scene, &staged.camera)
        .expect("Failed to capture a frame.");
    renderer.release();
    Some(image)
}
