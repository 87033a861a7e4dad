//! Window setup and event routing.

use pointerkit_core::config::ConfigError;
use pointerkit_core::{Capabilities, EnrichedSample, InputConfig, PointerInput};
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::error::EventLoopError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Event loop error: {0}")]
    EventLoop(#[from] EventLoopError),
    #[error("Unknown argument: {0}")]
    UnknownArgument(String),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub input: InputConfig,
    /// Print every enriched sample to stdout as a JSON line.
    pub json_output: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "PointerKit".to_string(),
            width: 1024,
            height: 768,
            input: InputConfig::default(),
            json_output: false,
        }
    }
}

impl AppConfig {
    /// Build the configuration from `[config.json] [--json]`.
    pub fn from_args<I>(args: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        for arg in args {
            match arg.as_str() {
                "--json" => config.json_output = true,
                flag if flag.starts_with("--") => return Err(AppError::UnknownArgument(flag.to_string())),
                path => config.input = InputConfig::load(path)?,
            }
        }
        Ok(config)
    }
}

/// Main application state.
pub struct App {
    config: AppConfig,
    window: Option<Window>,
    input: PointerInput,
}

impl App {
    /// Create the application, detecting input capabilities once.
    pub fn new(config: AppConfig) -> Self {
        let json_output = config.json_output;
        let input = PointerInput::new(&config.input, Capabilities::detect(), move |sample| {
            report(sample, json_output)
        });
        Self {
            config,
            window: None,
            input,
        }
    }

    /// Run the application until the window is closed.
    pub fn run(config: AppConfig) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        let mut app = App::new(config);
        event_loop.run_app(&mut app)?;
        Ok(())
    }
}

fn report(sample: &EnrichedSample, json_output: bool) {
    log::info!(
        "{:?} x{} center=({}, {}) delta=({}, {}) dir={:?} scale={:.3} rot={:.1}{}",
        sample.kind(),
        sample.pointer_count(),
        sample.center.x,
        sample.center.y,
        sample.delta_x,
        sample.delta_y,
        sample.direction,
        sample.scale,
        sample.rotation,
        if sample.is_final { " [final]" } else { "" }
    );

    if json_output {
        match serde_json::to_string(sample) {
            Ok(line) => println!("{}", line),
            Err(e) => log::error!("Failed to serialize sample: {}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        log::info!("Creating window...");
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        match event_loop.create_window(window_attrs) {
            Ok(window) => {
                self.window = Some(window);
                self.input.start();
            }
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.input.stop();
                event_loop.exit();
            }
            event => {
                self.input.handle_window_event(&event);
            }
        }
    }
}
