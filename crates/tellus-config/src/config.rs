//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Orbit camera settings.
    pub orbit: OrbitConfig,
    /// Globe geometry and layer settings.
    pub globe: GlobeConfig,
    /// Remote texture URLs.
    pub textures: TextureConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    /// Window title.
    pub title: String,
}

/// Orbit camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrbitConfig {
    /// Damping factor for drag input (fraction of pending delta applied per update).
    pub damping_factor: f32,
    /// Minimum camera distance from the globe center in globe radii.
    pub min_distance: f32,
    /// Maximum camera distance from the globe center in globe radii.
    pub max_distance: f32,
    /// Camera starting distance from the globe center.
    pub start_distance: f32,
    /// Auto-rotate angular speed: 2.0 is one revolution per 30 seconds
    /// at 60 updates per second.
    pub auto_rotate_speed: f32,
    /// Drag-to-rotate sensitivity in radians per logical pixel.
    pub rotate_sensitivity: f32,
    /// Zoom factor applied per scroll line.
    pub zoom_sensitivity: f32,
}

/// Globe geometry and layer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlobeConfig {
    /// Sphere tessellation: segments along both longitude and latitude.
    pub segments: u32,
    /// Bump map displacement strength.
    pub bump_scale: f32,
    /// Specular highlight exponent.
    pub shininess: f32,
    /// Cloud shell opacity (0.0 - 1.0).
    pub cloud_opacity: f32,
    /// Atmosphere shell radius as a multiple of the globe radius.
    pub atmosphere_scale: f32,
    /// Cloud shell radius as a multiple of the globe radius.
    pub cloud_scale: f32,
    /// Number of stars in the backdrop point cloud.
    pub star_count: u32,
    /// Seed for deterministic starfield generation.
    pub star_seed: u64,
}

/// Remote texture URLs, fetched in order at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextureConfig {
    /// Color (albedo) map URL.
    pub color_url: String,
    /// Bump (topology height) map URL.
    pub bump_url: String,
    /// Specular (water mask) map URL.
    pub specular_url: String,
    /// Cloud layer map URL.
    pub clouds_url: String,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Show the FPS readout in the HUD.
    pub show_fps: bool,
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            vsync: true,
            title: "Tellus".to_string(),
        }
    }
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.05,
            min_distance: 1.5,
            max_distance: 10.0,
            start_distance: 3.0,
            auto_rotate_speed: 0.5,
            rotate_sensitivity: 0.005,
            zoom_sensitivity: 0.1,
        }
    }
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            segments: 128,
            bump_scale: 0.05,
            shininess: 10.0,
            cloud_opacity: 0.4,
            atmosphere_scale: 1.01,
            cloud_scale: 1.005,
            star_count: 10_000,
            star_seed: 42,
        }
    }
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            color_url: "https://unpkg.com/three-globe/example/img/earth-blue-marble.jpg"
                .to_string(),
            bump_url: "https://unpkg.com/three-globe/example/img/earth-topology.png".to_string(),
            specular_url: "https://unpkg.com/three-globe/example/img/earth-water.png".to_string(),
            clouds_url: "https://unpkg.com/three-globe/example/img/earth-clouds.png".to_string(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            show_fps: true,
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
