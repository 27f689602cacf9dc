// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The application-facing API of Umbra.
//!
//! Implement [`Application`] and hand it to [`Engine::run`], which creates
//! the window and render system, then drives resize, update and render from
//! the `winit` event loop.

#![warn(missing_docs)]

pub mod telemetry;

use std::time::Duration;

use anyhow::{anyhow, Result};
use umbra_core::camera::PerspectiveCamera;
use umbra_core::clock::Clock;
use umbra_core::platform::input::InputEvent;
use umbra_core::platform::window::ViewerWindow;
use umbra_core::renderer::{RenderSettings, RenderSystem};
use umbra_core::scene::Scene;
use umbra_core::viewport::Viewport;
use umbra_infra::{translate_winit_input, WgpuRenderSystem, WinitWindow, WinitWindowBuilder};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::WindowId;

pub use telemetry::FrameTelemetry;

/// Commonly used types, re-exported for applications.
pub mod prelude {
    pub use umbra_core::camera::PerspectiveCamera;
    pub use umbra_core::controls::{OrbitControls, OrbitControlsSettings};
    pub use umbra_core::math::{Euler, LinearRgba, Vec3};
    pub use umbra_core::platform::input::{InputEvent, MouseButton};
    pub use umbra_core::renderer::{RenderSettings, ShadowFilter, ShadowSettings};
    pub use umbra_core::scene::*;
    pub use umbra_core::viewport::Viewport;
}

/// Window and renderer options fixed for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Window title.
    pub title: String,
    /// Initial window width in logical units.
    pub width: f64,
    /// Initial window height in logical units.
    pub height: f64,
    /// Render system options.
    pub render: RenderSettings,
    /// How often frame statistics are logged. Zero disables them.
    pub telemetry_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "Umbra".to_string(),
            width: 1280.0,
            height: 720.0,
            render: RenderSettings::default(),
            telemetry_interval: Duration::from_secs(1),
        }
    }
}

/// User logic driven by the engine.
pub trait Application: Sized + 'static {
    /// Whatever the application needs to build itself.
    type Config;

    /// Called once the window and render system exist.
    fn new(config: Self::Config, viewport: &Viewport) -> Self;

    /// Called on every viewport change, and once before the first frame.
    fn resize(&mut self, viewport: &Viewport);

    /// Advances the application by `delta` seconds.
    fn update(&mut self, delta: f32);

    /// Called for each pointer event over the window.
    fn on_input(&mut self, _event: &InputEvent, _viewport: &Viewport) {}

    /// The scene to draw.
    fn scene(&self) -> &Scene;

    /// The camera to draw it through.
    fn camera(&self) -> &PerspectiveCamera;
}

/// Engine state owned by the `winit` event loop.
struct EngineState<A: Application> {
    config: EngineConfig,
    app_config: Option<A::Config>,
    app: Option<A>,
    window: Option<WinitWindow>,
    renderer: Option<Box<dyn RenderSystem>>,
    clock: Option<Clock>,
    viewport: Viewport,
    telemetry: FrameTelemetry,
    setup_error: Option<anyhow::Error>,
}

impl<A: Application> EngineState<A> {
    fn new(config: EngineConfig, app_config: A::Config) -> Self {
        let telemetry = FrameTelemetry::new(config.telemetry_interval);
        Self {
            config,
            app_config: Some(app_config),
            app: None,
            window: None,
            renderer: None,
            clock: None,
            viewport: Viewport::new(0.0, 0.0, 1.0),
            telemetry,
            setup_error: None,
        }
    }

    fn setup(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = WinitWindowBuilder::new()
            .with_title(self.config.title.clone())
            .with_logical_size(self.config.width, self.config.height)
            .build(event_loop)?;

        self.attach(&window, Box::new(WgpuRenderSystem::new()))?;
        window.request_redraw();
        self.window = Some(window);
        Ok(())
    }

    /// Initializes `renderer` for `window`, creates the application and runs
    /// the first resize pass. Nothing renders until this has succeeded.
    fn attach(&mut self, window: &dyn ViewerWindow, mut renderer: Box<dyn RenderSystem>) -> Result<()> {
        renderer.init(window, &self.config.render)?;
        if let Some(info) = renderer.adapter_info() {
            log::info!("Rendering with {} ({})", info.name, info.backend);
        }

        let app_config = self
            .app_config
            .take()
            .ok_or_else(|| anyhow!("application was already created"))?;
        let viewport = window.viewport();
        let mut app = A::new(app_config, &viewport);

        Self::apply_viewport(&mut app, renderer.as_mut(), &viewport);
        self.viewport = viewport;

        self.clock = Some(Clock::start());
        self.app = Some(app);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn apply_viewport(app: &mut A, renderer: &mut dyn RenderSystem, viewport: &Viewport) {
        let (width, height) = viewport.render_target_size();
        log::debug!(
            "Viewport {}x{} @{} -> {width}x{height}",
            viewport.logical_width,
            viewport.logical_height,
            viewport.pixel_ratio
        );
        renderer.resize(width, height);
        app.resize(viewport);
    }

    fn redraw(&mut self) {
        let (Some(app), Some(renderer), Some(clock)) =
            (self.app.as_mut(), self.renderer.as_mut(), self.clock.as_mut())
        else {
            return;
        };
        app.update(clock.delta());
        match renderer.render(app.scene(), app.camera()) {
            Ok(stats) => self.telemetry.record(&stats),
            Err(e) => log::error!("Rendering error: {e}"),
        }
    }
}

impl<A: Application> Drop for EngineState<A> {
    fn drop(&mut self) {
        if let Some(mut renderer) = self.renderer.take() {
            log::info!("Shutting down engine systems...");
            renderer.shutdown();
        }
    }
}

impl<A: Application> ApplicationHandler for EngineState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.setup_error.is_some() {
            return;
        }
        log::info!("Application resumed. Initializing window and render system...");
        if let Err(e) = self.setup(event_loop) {
            log::error!("Setup failed: {e:#}");
            self.setup_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        if window.winit_id() != id {
            return;
        }
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting event loop...");
                event_loop.exit();
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                let viewport = window.viewport();
                if viewport == self.viewport {
                    return;
                }
                self.viewport = viewport;
                if let (Some(app), Some(renderer)) = (self.app.as_mut(), self.renderer.as_mut()) {
                    Self::apply_viewport(app, renderer.as_mut(), &viewport);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            other => {
                if let (Some(input), Some(app)) = (translate_winit_input(&other), self.app.as_mut()) {
                    log::trace!("Input event: {input:?}");
                    app.on_input(&input, &self.viewport);
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// The entry point of an Umbra application.
pub struct Engine;

impl Engine {
    /// Opens a window, creates `A` from `app_config` and runs the event loop
    /// until the window is closed.
    ///
    /// Fails if the window or render system cannot be created.
    pub fn run<A: Application>(config: EngineConfig, app_config: A::Config) -> Result<()> {
        log::info!("Umbra: starting...");
        let event_loop = EventLoop::new()?;
        let mut state = EngineState::<A>::new(config, app_config);
        event_loop.run_app(&mut state)?;

        match state.setup_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raw_window_handle::{
        DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, WindowHandle,
    };
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;
    use umbra_core::platform::window::ViewerWindowHandle;
    use umbra_core::renderer::{RenderError, RenderStats, RendererAdapterInfo};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Init,
        Resize(u32, u32),
        AppResize(f32, f32),
        Update,
        Render,
        Shutdown,
    }

    type CallLog = Rc<RefCell<Vec<Call>>>;

    #[derive(Debug, Clone)]
    struct FakeWindow {
        size: (u32, u32),
        scale: f64,
    }

    impl HasWindowHandle for FakeWindow {
        fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
            Err(HandleError::NotSupported)
        }
    }

    impl HasDisplayHandle for FakeWindow {
        fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
            Err(HandleError::NotSupported)
        }
    }

    impl ViewerWindow for FakeWindow {
        fn inner_size(&self) -> (u32, u32) {
            self.size
        }
        fn scale_factor(&self) -> f64 {
            self.scale
        }
        fn request_redraw(&self) {}
        fn clone_handle_arc(&self) -> ViewerWindowHandle {
            Arc::new(self.clone())
        }
        fn id(&self) -> u64 {
            1
        }
    }

    #[derive(Debug)]
    struct RecordingRenderer {
        calls: CallLog,
        fail_init: bool,
    }

    impl RenderSystem for RecordingRenderer {
        fn init(&mut self, _window: &dyn ViewerWindow, _settings: &RenderSettings) -> Result<(), RenderError> {
            if self.fail_init {
                return Err(RenderError::InitializationFailed("no adapter".to_string()));
            }
            self.calls.borrow_mut().push(Call::Init);
            Ok(())
        }
        fn resize(&mut self, width: u32, height: u32) {
            self.calls.borrow_mut().push(Call::Resize(width, height));
        }
        fn render(&mut self, _scene: &Scene, _camera: &PerspectiveCamera) -> Result<RenderStats, RenderError> {
            self.calls.borrow_mut().push(Call::Render);
            Ok(RenderStats::default())
        }
        fn surface_size(&self) -> (u32, u32) {
            (0, 0)
        }
        fn adapter_info(&self) -> Option<RendererAdapterInfo> {
            None
        }
        fn shutdown(&mut self) {
            self.calls.borrow_mut().push(Call::Shutdown);
        }
    }

    struct RecordingApp {
        calls: CallLog,
        scene: Scene,
        camera: PerspectiveCamera,
    }

    impl Application for RecordingApp {
        type Config = CallLog;

        fn new(calls: CallLog, _viewport: &Viewport) -> Self {
            Self {
                calls,
                scene: Scene::new(),
                camera: PerspectiveCamera::new(70.0, 1.0, 0.1, 1000.0),
            }
        }
        fn resize(&mut self, viewport: &Viewport) {
            self.calls
                .borrow_mut()
                .push(Call::AppResize(viewport.logical_width, viewport.logical_height));
        }
        fn update(&mut self, _delta: f32) {
            self.calls.borrow_mut().push(Call::Update);
        }
        fn scene(&self) -> &Scene {
            &self.scene
        }
        fn camera(&self) -> &PerspectiveCamera {
            &self.camera
        }
    }

    fn state(calls: &CallLog) -> EngineState<RecordingApp> {
        EngineState::new(EngineConfig::default(), calls.clone())
    }

    fn renderer(calls: &CallLog, fail_init: bool) -> Box<dyn RenderSystem> {
        Box::new(RecordingRenderer {
            calls: calls.clone(),
            fail_init,
        })
    }

    const HIDPI_WINDOW: FakeWindow = FakeWindow {
        size: (3840, 2160),
        scale: 2.0,
    };

    #[test]
    fn test_first_resize_runs_before_any_frame() {
        let calls = CallLog::default();
        let mut state = state(&calls);
        state.attach(&HIDPI_WINDOW, renderer(&calls, false)).unwrap();
        state.redraw();
        state.redraw();

        assert_eq!(
            *calls.borrow(),
            vec![
                Call::Init,
                Call::Resize(3840, 2160),
                Call::AppResize(1920.0, 1080.0),
                Call::Update,
                Call::Render,
                Call::Update,
                Call::Render,
            ]
        );
        assert_eq!(state.viewport, Viewport::new(1920.0, 1080.0, 2.0));
    }

    #[test]
    fn test_redraw_before_setup_does_nothing() {
        let calls = CallLog::default();
        let mut state = state(&calls);
        state.redraw();
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_failed_renderer_init_creates_no_app() {
        let calls = CallLog::default();
        let mut state = state(&calls);
        let err = state.attach(&HIDPI_WINDOW, renderer(&calls, true)).unwrap_err();
        assert!(err.to_string().contains("no adapter"));
        assert!(state.app.is_none());
        assert!(state.renderer.is_none());

        state.redraw();
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_drop_shuts_renderer_down() {
        let calls = CallLog::default();
        {
            let mut state = state(&calls);
            state.attach(&HIDPI_WINDOW, renderer(&calls, false)).unwrap();
        }
        assert_eq!(calls.borrow().last(), Some(&Call::Shutdown));
    }
}
