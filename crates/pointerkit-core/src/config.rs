//! Input configuration and platform capability detection.

use crate::enrich::VelocityMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default window after a touch ends during which nearby mouse events are
/// treated as emulated and dropped.
pub const DEFAULT_DEDUP_TIMEOUT_MS: f64 = 2500.0;
/// Default radius around the last touch for the same suppression.
pub const DEFAULT_DEDUP_DISTANCE: f64 = 25.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Which adapter translates platform events into samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterKind {
    Mouse,
    Touch,
    /// Touch and mouse together, with emulated mouse events filtered out.
    Hybrid,
}

impl AdapterKind {
    /// Pick the adapter for the detected capabilities.
    pub fn select(capabilities: Capabilities) -> Self {
        match (capabilities.touch, capabilities.mouse) {
            (true, true) => AdapterKind::Hybrid,
            (true, false) => AdapterKind::Touch,
            (false, _) => AdapterKind::Mouse,
        }
    }
}

/// Input devices the platform can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub touch: bool,
    pub mouse: bool,
}

impl Capabilities {
    /// Detect capabilities for the compilation target.
    ///
    /// Mobile targets only report touch; everything else may see both.
    pub fn detect() -> Self {
        let mobile = cfg!(any(target_os = "android", target_os = "ios"));
        let capabilities = Self {
            touch: true,
            mouse: !mobile,
        };
        log::debug!("Detected input capabilities: {:?}", capabilities);
        capabilities
    }
}

/// Tunables for the input pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub velocity: VelocityMode,
    /// Treat a cancel that lifts the last pointer as the end of the gesture.
    pub cancel_is_final: bool,
    /// Force an adapter instead of selecting one from capabilities.
    pub adapter: Option<AdapterKind>,
    pub dedup_timeout_ms: f64,
    pub dedup_distance: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            velocity: VelocityMode::default(),
            cancel_is_final: false,
            adapter: None,
            dedup_timeout_ms: DEFAULT_DEDUP_TIMEOUT_MS,
            dedup_distance: DEFAULT_DEDUP_DISTANCE,
        }
    }
}

impl InputConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded input config from {:?}", path);
        Ok(config)
    }

    /// Check that the dedup window is usable.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.dedup_timeout_ms.is_finite() || self.dedup_timeout_ms < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "dedup_timeout_ms must be a non-negative number, got {}",
                self.dedup_timeout_ms
            )));
        }
        if !self.dedup_distance.is_finite() || self.dedup_distance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "dedup_distance must be a non-negative number, got {}",
                self.dedup_distance
            )));
        }
        Ok(())
    }

    /// Adapter to use given the detected capabilities.
    pub fn adapter_kind(&self, capabilities: Capabilities) -> AdapterKind {
        self.adapter.unwrap_or_else(|| AdapterKind::select(capabilities))
    }
}
