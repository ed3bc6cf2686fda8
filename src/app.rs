use std::sync::Arc;

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes},
};

use crate::config::AppConfig;
use crate::gfx::{
    camera::FixedCamera,
    rendering::RenderEngine,
    scene::Scene,
};

/// Windowed host for the desk scene
pub struct DeskSceneApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

struct AppState {
    config: AppConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    camera: Option<FixedCamera>,
    scene: Scene,
    error: Option<anyhow::Error>,
}

impl DeskSceneApp {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;

        Ok(Self {
            event_loop,
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                camera: None,
                scene: Scene::desk(),
                error: None,
            },
        })
    }

    /// Runs until the window is closed or Escape is pressed
    pub fn run(mut self) -> anyhow::Result<()> {
        // Nothing moves; frames are drawn only when the window asks
        self.event_loop.set_control_flow(ControlFlow::Wait);
        self.event_loop
            .run_app(&mut self.app_state)
            .context("event loop terminated abnormally")?;

        match self.app_state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn start(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_config = &self.config.window;
        let window = event_loop
            .create_window(
                WindowAttributes::default()
                    .with_title(window_config.title.clone())
                    .with_inner_size(PhysicalSize::new(window_config.width, window_config.height)),
            )
            .context("failed to create window")?;
        let window_handle = Arc::new(window);
        self.window = Some(window_handle.clone());

        let (width, height) = window_handle.inner_size().into();
        let vsync = window_config.vsync;
        let mut renderer = pollster::block_on(RenderEngine::new(
            window_handle.clone(),
            width,
            height,
            vsync,
        ))?;

        let report = renderer.prepare_scene(&mut self.scene, &self.config.assets.texture_dir);
        if !report.is_complete() {
            log::warn!(
                "scene set up with {} missing textures and {} unresolved references",
                report.failed.len(),
                report.unresolved.len()
            );
        }

        self.camera = Some(FixedCamera::from_config(&self.config.camera, width, height));
        self.render_engine = Some(renderer);
        window_handle.request_redraw();
        Ok(())
    }

    fn teardown(&mut self) {
        if let Some(render_engine) = self.render_engine.as_mut() {
            render_engine.teardown_scene(&mut self.scene);
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{:#}", err);
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.start(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let (Some(render_engine), Some(camera)) =
            (self.render_engine.as_mut(), self.camera.as_mut())
        else {
            return;
        };

        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            }
            | WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                camera.resize(width, height);
                render_engine.resize(width, height);
            }
            WindowEvent::RedrawRequested => {
                let uniform = camera.uniform();
                match render_engine.render_frame(&self.scene, &uniform) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_engine.reconfigure();
                        if let Some(window) = self.window.as_ref() {
                            window.request_redraw();
                        }
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        self.fail(event_loop, anyhow::anyhow!("the GPU ran out of memory"));
                    }
                    Err(err) => log::warn!("frame skipped: {}", err),
                }
            }
            _ => (),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.teardown();
    }
}
