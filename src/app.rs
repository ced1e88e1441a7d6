use anyhow::Result;
use glam::Vec2;
use log::{error, info};
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Handle;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::camera::{render_preview, MapCamera};
use crate::config::Config;
use crate::core::{Canvas, SurfaceRenderer};
use crate::error::{ModelLoadError, PipelineError};
use crate::geo::Route;
use crate::loaders::{Model, ModelLoader};
use crate::map::MapState;
use crate::scene::{RouteTicket, SceneController, SceneGraph, SceneStatus};
use crate::services::google::GoogleRouteFetcher;
use crate::traits::MapView;

const WINDOW_TITLE: &str = "Route Walker";

/// Results delivered from async tasks back to the event loop
#[derive(Debug)]
pub enum AppEvent {
    Route(Result<Route, PipelineError>),
    Model {
        ticket: RouteTicket,
        result: Result<Model, ModelLoadError>,
    },
}

/// Windowed preview. All scene state lives on the event-loop thread; async
/// work runs on the tokio runtime and reports back through the proxy.
pub struct App {
    config: Config,
    runtime: Handle,
    proxy: EventLoopProxy<AppEvent>,
    fetcher: Arc<GoogleRouteFetcher>,
    loader: ModelLoader,
    controller: SceneController<SceneGraph>,
    map: MapState,
    window: Option<Arc<Window>>,
    renderer: Option<SurfaceRenderer>,
    canvas: Canvas,
    shown_status: Option<SceneStatus>,
}

impl App {
    pub fn new(config: Config, runtime: Handle, proxy: EventLoopProxy<AppEvent>) -> Result<Self> {
        let (width, height) = config.window_size;
        Ok(Self {
            fetcher: Arc::new(config.route_fetcher()?),
            loader: config.model_loader()?,
            controller: config.scene_controller(Vec2::new(width as f32, height as f32)),
            map: MapState::new(config.map.clone()),
            canvas: Canvas::new(width, height),
            config,
            runtime,
            proxy,
            window: None,
            renderer: None,
            shown_status: None,
        })
    }

    /// Geocode both addresses and fetch directions in the background
    fn request_route(&self) {
        let fetcher = self.fetcher.clone();
        let proxy = self.proxy.clone();
        let origin = self.config.origin.clone();
        let destination = self.config.destination.clone();

        self.runtime.spawn(async move {
            let result = fetcher.fetch(&origin, &destination).await;
            let _ = proxy.send_event(AppEvent::Route(result));
        });
    }

    fn request_model(&self, ticket: RouteTicket) {
        let loader = self.loader.clone();
        let proxy = self.proxy.clone();
        let source = self.config.model.clone();

        self.runtime.spawn(async move {
            let result = loader.load(&source).await;
            let _ = proxy.send_event(AppEvent::Model { ticket, result });
        });
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if let Some(renderer) = &mut self.renderer {
            renderer.resize(width, height);
        }
        self.canvas.resize(width, height);
        self.controller
            .scene_mut()
            .set_viewport_size(Vec2::new(width as f32, height as f32));
    }

    fn redraw(&mut self) {
        self.controller.tick(Instant::now());

        let camera = MapCamera::new(
            self.controller.projector(),
            self.map.center(),
            self.map.zoom(),
            self.map.heading(),
            self.canvas.size(),
        );
        render_preview(self.controller.scene(), &camera, &mut self.canvas);

        if let Some(renderer) = &self.renderer {
            if let Err(e) = renderer.present(&self.canvas) {
                error!("Render error: {:#}", e);
            }
        }
    }

    fn update_title(&mut self) {
        let status = self.controller.status();
        if self.shown_status.as_ref() == Some(status) {
            return;
        }
        if let Some(window) = &self.window {
            window.set_title(&format!("{} - {}", WINDOW_TITLE, status.label()));
        }
        self.shown_status = Some(status.clone());
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (width, height) = self.config.window_size;
        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title(WINDOW_TITLE)
                .with_inner_size(winit::dpi::PhysicalSize::new(width, height)),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match SurfaceRenderer::new(window.clone()) {
            Ok(r) => r,
            Err(e) => {
                error!("Failed to initialize renderer: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        let (width, height) = renderer.dimensions();
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.resize(width, height);
        self.update_title();

        self.request_route();
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            AppEvent::Route(Ok(route)) => {
                let ticket = self.controller.set_route(&route, &mut self.map);
                self.request_model(ticket);
            }
            AppEvent::Route(Err(e)) => self.controller.report_failure(&e),
            AppEvent::Model { ticket, result } => {
                if let Ok(model) = &result {
                    info!("Model ready: {} triangles", model.triangle_count());
                }
                self.controller.attach_model(ticket, result);
            }
        }
        self.update_title();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                self.controller.teardown();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.controller.scene_mut().take_redraw_request() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}

/// Runs the windowed preview until the window closes
pub fn run(config: Config, runtime: Handle) -> Result<()> {
    let event_loop = EventLoop::<AppEvent>::with_user_event().build()?;
    if let Some(map_id) = &config.map.map_id {
        info!("Map style {}", map_id);
    }

    let mut app = App::new(config, runtime, event_loop.create_proxy())?;
    event_loop.run_app(&mut app)?;

    Ok(())
}
