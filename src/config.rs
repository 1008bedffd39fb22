//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`ORRERY_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Simulation configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Free-roam ship configuration
    #[serde(default)]
    pub ship: ShipConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Body catalog configuration
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`ORRERY_*`)
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
        // ORRERY_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("ORRERY_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Orrery - Solar System Explorer".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Orbit camera starting position [x, y, z]
    pub start_position: [f32; 3],
    /// Orbit camera field of view in degrees
    pub fov: f32,
    /// Cockpit camera field of view in degrees
    pub cockpit_fov: f32,
    /// Selection flight duration in seconds
    pub flight_duration: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, 25.0, 40.0],
            fov: 75.0,
            cockpit_fov: 40.0,
            flight_duration: 6.0,
        }
    }
}

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Simulation tick rate in ticks per second
    pub tick_rate: f64,
    /// Initial speed slider value (modifier is 2^value)
    pub speed_slider: f32,
    /// Start with orbital trails visible
    pub trails_visible: bool,
    /// Speed modifier applied while following a moon
    pub moon_speed_modifier: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            speed_slider: 0.0,
            trails_visible: true,
            moon_speed_modifier: 0.3,
        }
    }
}

/// Free-roam ship configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipConfig {
    /// Translation speed (units per second)
    pub move_speed: f32,
    /// Yaw rate per tick (radians)
    pub yaw_rate: f32,
    /// Cockpit shake amplitude
    pub shake_amplitude: f32,
    /// Path to the ship model (RON mesh)
    pub model_path: String,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            yaw_rate: 0.015,
            shake_amplitude: 0.00002,
            model_path: "assets/ship.ron".to_string(),
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
    /// Ambient light strength
    pub ambient_strength: f32,
    /// Diffuse light strength
    pub diffuse_strength: f32,
    /// Seed for belt and starfield generation
    pub scatter_seed: u64,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.0, 0.0, 0.02, 1.0],
            ambient_strength: 0.2,
            diffuse_strength: 0.8,
            scatter_seed: 42,
        }
    }
}

/// Body catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the RON body catalog
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: "assets/bodies.ron".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.camera.fov, 75.0);
        assert_eq!(config.simulation.moon_speed_modifier, 0.3);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("tick_rate"));
    }

    #[test]
    fn test_missing_dir_falls_back_to_env_and_defaults() {
        let config = AppConfig::load_from("/nonexistent/config").unwrap();
        assert_eq!(config.simulation.tick_rate, 60.0);
    }
}
