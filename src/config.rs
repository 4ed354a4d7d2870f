//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority
//! (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`SPC_SECTION__KEY`)

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use spacectl_view::NavSettings;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Device connection configuration
    #[serde(default)]
    pub device: DeviceConfig,
    /// Navigation configuration
    #[serde(default)]
    pub navigation: NavigationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            device: DeviceConfig::default(),
            navigation: NavigationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`SPC_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        // Load default config (required)
        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // SPC_NAVIGATION__INVERT_X=true -> navigation.invert_x = true
        figment = figment.merge(Env::prefixed("SPC_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Device connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Application identity reported to the driver (ASCII)
    pub app_name: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            app_name: "spacectl".to_string(),
        }
    }
}

/// Navigation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Scale factor for translation (tx, ty, tz)
    pub move_sensitivity: f32,
    /// Scale factor for rotation (rx, ry, rz)
    pub rotate_sensitivity: f32,
    /// Invert X movement
    pub invert_x: bool,
    /// Invert Y movement
    pub invert_y: bool,
    /// Invert Z movement
    pub invert_z: bool,
    /// Apply controller rotation to the 3D view
    pub enable_rotation: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            move_sensitivity: 0.001,
            rotate_sensitivity: 0.0005,
            invert_x: false,
            invert_y: false,
            invert_z: false,
            enable_rotation: true,
        }
    }
}

impl NavigationConfig {
    /// Smallest accepted sensitivity
    pub const MIN_SENSITIVITY: f32 = 0.00001;
    /// Largest accepted sensitivity
    pub const MAX_SENSITIVITY: f32 = 0.1;

    /// Convert to per-cycle settings, clamping both sensitivities into
    /// their declared bounds
    pub fn to_nav_settings(&self) -> NavSettings {
        NavSettings {
            move_sensitivity: self
                .move_sensitivity
                .clamp(Self::MIN_SENSITIVITY, Self::MAX_SENSITIVITY),
            rotate_sensitivity: self
                .rotate_sensitivity
                .clamp(Self::MIN_SENSITIVITY, Self::MAX_SENSITIVITY),
            invert_x: self.invert_x,
            invert_y: self.invert_y,
            invert_z: self.invert_z,
            enable_rotation: self.enable_rotation,
        }
    }
}

/// Configuration error
#[derive(Debug, Error)]
#[error("configuration error: {0}")]
pub struct ConfigError(#[from] figment::Error);
