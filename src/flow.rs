//! Application event loop.
//!
//! This module connects the platform to a [`Mount`]: winit supplies the window
//! (or the browser canvas), the redraw requests that act as frame callbacks and
//! the resize notifications.
//!
//! # User-facing types
//!
//! - [`WindowHost`] implements [`Host`] on top of a winit window
//! - [`run`] starts the event loop and mounts the configured scene
//!
//! # Lifecycle Flow
//!
//! 1. `resumed` creates the window (or binds the canvas) and a [`Renderer`]
//! 2. the renderer is handed to [`Mount::mount`]; without a surface nothing is built
//! 3. every `RedrawRequested` delivers the pending frame handle to [`Mount::frame`]
//! 4. `Resized` is forwarded to [`Mount::resize`] while the listener is registered
//! 5. closing the window or leaving the loop calls [`Mount::unmount`]

use std::sync::Arc;

use anyhow::Context as _;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    camera::Viewport,
    config::SceneConfig,
    lifecycle::{FrameHandle, Host, ListenerId, Mount},
    render::Renderer,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// [`Host`] backed by a winit window.
///
/// Frame callbacks map onto `request_redraw`: the last requested handle is held
/// until the next `RedrawRequested` and cancelling it simply forgets it.
#[derive(Debug, Default)]
pub struct WindowHost {
    window: Option<Arc<Window>>,
    next_frame: u64,
    pending: Option<FrameHandle>,
    next_listener: u64,
    listeners: Vec<ListenerId>,
}

impl WindowHost {
    pub fn new(window: Option<Arc<Window>>) -> Self {
        Self {
            window,
            ..Default::default()
        }
    }

    pub fn window(&self) -> Option<&Arc<Window>> {
        self.window.as_ref()
    }

    pub fn set_window(&mut self, window: Arc<Window>) {
        self.window = Some(window);
    }

    /// Hands out the frame requested last, if it hasn't been cancelled.
    pub fn take_due_frame(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn is_listening(&self) -> bool {
        !self.listeners.is_empty()
    }

    #[cfg(target_arch = "wasm32")]
    fn canvas_container_size(window: &Window) -> Option<Viewport> {
        use winit::platform::web::WindowExtWebSys;

        let canvas = window.canvas()?;
        let container = canvas.parent_element()?;
        Some(Viewport::new(
            container.client_width().max(0) as u32,
            container.client_height().max(0) as u32,
        ))
    }
}

/// Container size and pixel ratio of a native window.
///
/// The window is the surface, so its extent is reported in physical pixels at a
/// ratio of 1: the drawing buffer then matches the window exactly and the pixel
/// ratio cap only applies to canvases.
pub fn native_window_metrics(size: PhysicalSize<u32>) -> (Viewport, f32) {
    (Viewport::new(size.width, size.height), 1.0)
}

impl Host for WindowHost {
    fn container_size(&self) -> Option<Viewport> {
        let window = self.window.as_ref()?;
        #[cfg(target_arch = "wasm32")]
        {
            Self::canvas_container_size(window)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Some(native_window_metrics(window.inner_size()).0)
        }
    }

    fn device_pixel_ratio(&self) -> f32 {
        #[cfg(target_arch = "wasm32")]
        {
            self.window
                .as_ref()
                .map_or(1.0, |window| window.scale_factor() as f32)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.window
                .as_ref()
                .map_or(1.0, |window| native_window_metrics(window.inner_size()).1)
        }
    }

    fn request_frame(&mut self) -> FrameHandle {
        self.next_frame += 1;
        let handle = FrameHandle(self.next_frame);
        self.pending = Some(handle);
        if let Some(window) = &self.window {
            window.request_redraw();
        }
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }

    fn add_resize_listener(&mut self) -> ListenerId {
        self.next_listener += 1;
        let listener = ListenerId(self.next_listener);
        self.listeners.push(listener);
        listener
    }

    fn remove_resize_listener(&mut self, listener: ListenerId) {
        self.listeners.retain(|l| *l != listener);
    }
}

pub enum FlowEvent {
    /// The renderer finished initialising asynchronously; `None` when it couldn't.
    #[allow(dead_code)]
    Initialized(Option<Renderer>),
}

impl std::fmt::Debug for FlowEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized(renderer) => f
                .debug_tuple("Initialized")
                .field(&renderer.is_some())
                .finish(),
        }
    }
}

pub struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[allow(dead_code)]
    proxy: winit::event_loop::EventLoopProxy<FlowEvent>,
    host: WindowHost,
    mount: Mount<Renderer>,
    started: bool,
}

impl App {
    fn new(event_loop: &EventLoop<FlowEvent>, config: SceneConfig) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        #[cfg(not(target_arch = "wasm32"))]
        let async_runtime =
            tokio::runtime::Runtime::new().context("cannot start the async runtime")?;
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            host: WindowHost::new(None),
            mount: Mount::new(config),
            started: false,
        })
    }

    fn start(&mut self, renderer: Option<Renderer>) {
        let clear_colour = self.mount.config().clear_colour;
        let renderer = renderer.map(|mut renderer| {
            renderer.set_clear_colour(clear_colour);
            renderer
        });
        if let Err(e) = self.mount.mount(&mut self.host, renderer) {
            log::error!("Unable to mount the scene: {:#}", e);
        }
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Arc<Window>> {
        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title("nebula-one");

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            let canvas_id = &self.mount.config().canvas_id;
            let canvas = wgpu::web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id(canvas_id))
                .with_context(|| format!("no element with id {:?} on the page", canvas_id))?;
            let html_canvas_element = canvas
                .dyn_into::<wgpu::web_sys::HtmlCanvasElement>()
                .map_err(|_| anyhow::anyhow!("element {:?} is not a canvas", canvas_id))?;
            window_attributes = window_attributes.with_canvas(Some(html_canvas_element));
        }

        let window = event_loop
            .create_window(window_attributes)
            .context("cannot create the window")?;
        Ok(Arc::new(window))
    }
}

impl ApplicationHandler<FlowEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.started {
            return;
        }
        self.started = true;

        let window = match self.create_window(event_loop) {
            Ok(window) => window,
            Err(e) => {
                log::warn!("{:#}", e);
                self.start(None);
                return;
            }
        };
        self.host.set_window(window.clone());

        let init_future = async move {
            match Renderer::new(window).await {
                Ok(renderer) => Some(renderer),
                Err(e) => {
                    log::error!("Unable to create the renderer: {:#}", e);
                    None
                }
            }
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            let renderer = self.async_runtime.block_on(init_future);
            self.start(renderer);
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let renderer = init_future.await;
                if proxy.send_event(FlowEvent::Initialized(renderer)).is_err() {
                    log::warn!("event loop closed before the renderer was ready");
                }
            });
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: FlowEvent) {
        match event {
            // This is the message from our wasm `spawn_local`
            FlowEvent::Initialized(renderer) => self.start(renderer),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.mount.unmount(&mut self.host);
                event_loop.exit();
            }
            WindowEvent::Resized(_) => {
                if self.host.is_listening() {
                    self.mount.resize(&self.host);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(handle) = self.host.take_due_frame() {
                    self.mount.frame(&mut self.host, handle);
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.mount.unmount(&mut self.host);
    }
}

/// Installs the platform logger. A logger that is already installed is kept and
/// the returned warning is shown instead.
pub fn init_logger() -> Option<String> {
    let warning = |e: &dyn std::fmt::Display| format!("Warning: Could not initialize logger: {}", e);

    #[cfg(not(target_arch = "wasm32"))]
    {
        env_logger::try_init().err().map(|e| warning(&e))
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_log::init_with_level(log::Level::Info)
            .err()
            .map(|e| warning(&e))
    }
}

/// Opens a window (or binds the page's canvas) and runs the scene until it is closed.
pub fn run(config: SceneConfig) -> anyhow::Result<()> {
    if let Some(warning) = init_logger() {
        #[cfg(not(target_arch = "wasm32"))]
        println!("{}", warning);
        #[cfg(target_arch = "wasm32")]
        web_sys::console::warn_1(&warning.into());
    }

    let event_loop: EventLoop<FlowEvent> = EventLoop::with_user_event().build()?;
    let mut app = App::new(&event_loop, config)?;
    event_loop.run_app(&mut app)?;
    Ok(())
}

/// Browser entry point: mounts `variant` (`"mascot"` or `"core"`) onto the canvas `canvas_id`.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start(canvas_id: String, variant: String) -> Result<(), wasm_bindgen::JsValue> {
    let variant = variant
        .parse()
        .map_err(|e: anyhow::Error| JsValue::from_str(&format!("{:#}", e)))?;
    let config = SceneConfig {
        canvas_id,
        ..SceneConfig::default().with_variant(variant)
    };
    run(config).map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}
