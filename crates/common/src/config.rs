//! Engine configuration.
//!
//! Configuration is plain data: the strategy kinds listed here are mapped
//! to concrete trackers, zoomers and shakers by `pixcam-motion`.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PixcamError, PixcamResult};

/// Full camera engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Logical (low-resolution) game resolution.
    pub resolution: ResolutionConfig,

    /// Update and tick rates.
    pub timing: TimingConfig,

    /// Projection settings.
    pub presentation: PresentationConfig,

    /// Zoom level applied at construction.
    pub initial_zoom: f64,

    /// Strategies created lazily when none are set explicitly.
    pub strategies: StrategyConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Logical resolution in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionConfig {
    pub width: u32,
    pub height: u32,
}

/// Update-rate settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Host updates per second.
    pub updates_per_second: u32,

    /// Ticks advanced per update, in `[1, 256]`.
    pub tick_rate: u32,
}

/// How the logical canvas is projected to the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationConfig {
    pub filter: ScalingFilter,

    /// Fill the whole display, ignoring the logical aspect ratio.
    pub stretching: bool,

    /// Only project when a redraw is pending.
    pub redraw_managed: bool,
}

/// Default strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub tracker: TrackerKind,
    pub zoomer: ZoomerKind,
    pub shaker: ShakerKind,

    /// Seed for shaker randomness. Unset means seeded from entropy.
    pub shaker_seed: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "pixcam_camera=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Include module targets in text output.
    pub with_target: bool,
}

/// Up-scaling filter used when projecting the logical canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingFilter {
    /// Anti-aliased sampling with soft edges.
    #[default]
    AaSamplingSoft,
    /// Anti-aliased sampling with sharp edges.
    AaSamplingSharp,
    Nearest,
    Hermite,
    Bicubic,
    Bilinear,
    /// Naive source-space variants, for comparison.
    SrcHermite,
    SrcBicubic,
    SrcBilinear,
}

impl ScalingFilter {
    /// Every filter, in declaration order.
    pub const ALL: [ScalingFilter; 9] = [
        ScalingFilter::AaSamplingSoft,
        ScalingFilter::AaSamplingSharp,
        ScalingFilter::Nearest,
        ScalingFilter::Hermite,
        ScalingFilter::Bicubic,
        ScalingFilter::Bilinear,
        ScalingFilter::SrcHermite,
        ScalingFilter::SrcBicubic,
        ScalingFilter::SrcBilinear,
    ];
}

impl fmt::Display for ScalingFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalingFilter::AaSamplingSoft => "AASamplingSoft",
            ScalingFilter::AaSamplingSharp => "AASamplingSharp",
            ScalingFilter::Nearest => "Nearest",
            ScalingFilter::Hermite => "Hermite",
            ScalingFilter::Bicubic => "Bicubic",
            ScalingFilter::Bilinear => "Bilinear",
            ScalingFilter::SrcHermite => "SrcHermite",
            ScalingFilter::SrcBicubic => "SrcBicubic",
            ScalingFilter::SrcBilinear => "SrcBilinear",
        };
        f.write_str(name)
    }
}

/// Tracker strategies available from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerKind {
    Frozen,
    Instant,
    #[default]
    Linear,
    Parametrized,
    Spring,
    Tailer,
    SpringTailer,
}

/// Zoomer strategies available from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomerKind {
    Constant,
    #[default]
    Quadratic,
    SmoothLinear,
    RoughLinear,
    Spring,
}

/// Shaker strategies available from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShakerKind {
    #[default]
    Random,
    Balanced,
    Quake,
    Spring,
    Combo,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            resolution: ResolutionConfig::default(),
            timing: TimingConfig::default(),
            presentation: PresentationConfig::default(),
            initial_zoom: 1.0,
            strategies: StrategyConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 180,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            updates_per_second: 60,
            tick_rate: 1,
        }
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            filter: ScalingFilter::default(),
            stretching: false,
            redraw_managed: false,
        }
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerKind::default(),
            zoomer: ZoomerKind::default(),
            shaker: ShakerKind::default(),
            shaker_seed: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            with_target: true,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(content: &str) -> PixcamResult<Self> {
        let config: EngineConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from `path`, falling back to defaults when the file is
    /// missing or invalid.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match Self::from_json_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> PixcamResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Check every value the camera relies on.
    pub fn validate(&self) -> PixcamResult<()> {
        if self.resolution.width < 1 || self.resolution.height < 1 {
            return Err(PixcamError::config(format!(
                "game resolution must be at least (1, 1), got ({}, {})",
                self.resolution.width, self.resolution.height
            )));
        }
        if self.timing.updates_per_second == 0 {
            return Err(PixcamError::config("updates per second must be > 0"));
        }
        if !(1..=crate::clock::MAX_TICK_RATE).contains(&self.timing.tick_rate) {
            return Err(PixcamError::config(format!(
                "tick rate must be within [1, {}], got {}",
                crate::clock::MAX_TICK_RATE,
                self.timing.tick_rate
            )));
        }
        if !self.initial_zoom.is_finite() || self.initial_zoom <= 0.0 {
            return Err(PixcamError::config(format!(
                "initial zoom must be a positive number, got {}",
                self.initial_zoom
            )));
        }
        Ok(())
    }
}
