//! Tunable game constants.
//!
//! Values come from the built-in defaults, then an optional JSON file, then
//! command-line overrides. The result is validated once at startup and passed
//! by reference from there on.

use crate::constants::*;
use crate::game::types::{CollisionPolicy, Point, Size};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("config field `{field}` {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Every knob a deployment may override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Surface width in logical units.
    pub width: f64,
    /// Surface height in logical units.
    pub height: f64,
    /// Tree scroll per frame.
    pub scroll_speed: f64,
    /// Velocity added per frame.
    pub gravity: f64,
    /// Upward velocity set by a flap.
    pub flap_power: f64,
    /// Bird's fixed horizontal center.
    pub bird_x: f64,
    /// Horizontal distance between consecutive tree spawns.
    pub spawn_interval: f64,
    /// Smallest tree height.
    pub min_pipe_height: f64,
    /// Frames per bird animation step.
    pub animation_speed: u32,
    /// Fixed sleep at the end of every frame.
    pub frame_delay_ms: u64,
    pub collision: CollisionPolicy,
    /// Count trees passed.
    pub scoring: bool,
    /// Show the title screen before the first session.
    pub start_screen: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            scroll_speed: SCROLL_SPEED,
            gravity: GRAVITY,
            flap_power: FLAP_POWER,
            bird_x: BIRD_X,
            spawn_interval: SPAWN_INTERVAL,
            min_pipe_height: MIN_PIPE_HEIGHT,
            animation_speed: ANIMATION_SPEED,
            frame_delay_ms: FRAME_DELAY_MS,
            collision: CollisionPolicy::default(),
            scoring: true,
            start_screen: true,
        }
    }
}

impl GameConfig {
    /// Parse a JSON document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `explicit` if given (it must exist), else the per-user config
    /// file if present, else the defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match paths::default_config_path() {
            Ok(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {}", value),
                })
            }
        }
        fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be zero or positive, got {}", value),
                })
            }
        }

        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("scroll_speed", self.scroll_speed)?;
        positive("spawn_interval", self.spawn_interval)?;
        non_negative("gravity", self.gravity)?;
        non_negative("flap_power", self.flap_power)?;
        non_negative("min_pipe_height", self.min_pipe_height)?;

        if !(self.bird_x.is_finite() && self.bird_x >= 0.0 && self.bird_x < self.width) {
            return Err(ConfigError::Invalid {
                field: "bird_x",
                reason: format!("must lie within [0, {}), got {}", self.width, self.bird_x),
            });
        }
        if self.min_pipe_height > self.height {
            return Err(ConfigError::Invalid {
                field: "min_pipe_height",
                reason: format!("must not exceed height {}", self.height),
            });
        }
        if self.animation_speed == 0 {
            return Err(ConfigError::Invalid {
                field: "animation_speed",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn surface(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }
}

/// Command-line overrides. `None` leaves the loaded value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub gravity: Option<f64>,
    pub flap_power: Option<f64>,
    pub scroll_speed: Option<f64>,
    pub spawn_interval: Option<f64>,
    pub frame_delay_ms: Option<u64>,
    pub collision: Option<CollisionPolicy>,
    pub no_scoring: bool,
    pub no_start_screen: bool,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut GameConfig) {
        if let Some(v) = self.gravity {
            config.gravity = v;
        }
        if let Some(v) = self.flap_power {
            config.flap_power = v;
        }
        if let Some(v) = self.scroll_speed {
            config.scroll_speed = v;
        }
        if let Some(v) = self.spawn_interval {
            config.spawn_interval = v;
        }
        if let Some(v) = self.frame_delay_ms {
            config.frame_delay_ms = v;
        }
        if let Some(v) = self.collision {
            config.collision = v;
        }
        if self.no_scoring {
            config.scoring = false;
        }
        if self.no_start_screen {
            config.start_screen = false;
        }
    }
}
