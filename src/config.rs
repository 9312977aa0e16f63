//! Game configuration.
//!
//! Every size, speed and rate the simulation uses lives here and is passed
//! into `Wave` / `Session` constructors.  Coordinates are y-up: the origin is
//! the bottom-left corner of the screen.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    pub ship: ShipConfig,
    pub aliens: AlienConfig,
    pub bolts: BoltConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
    /// y-coordinate of the defense line.
    pub defense_line: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    pub width: f32,
    pub height: f32,
    /// Center y of a freshly spawned ship.
    pub bottom: f32,
    /// Horizontal distance moved per frame while a direction key is held.
    pub movement: f32,
    /// Lives at the start of a session.
    pub lives: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlienConfig {
    pub width: f32,
    pub height: f32,
    /// Horizontal gap between columns; also the size of a sideways step.
    pub h_sep: f32,
    /// Vertical gap between rows; also the size of a down step.
    pub v_sep: f32,
    /// Distance from the top of the screen to the first row.
    pub ceiling: f32,
    pub rows: usize,
    pub columns: usize,
    /// Seconds between formation steps in wave 1.
    pub step_interval: f32,
    /// Multiplier applied to the step interval for each later wave.
    pub speedup: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoltConfig {
    pub width: f32,
    pub height: f32,
    /// Vertical distance travelled per frame.
    pub speed: f32,
    /// Upper bound of the random number of formation steps between alien shots.
    pub max_fire_steps: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 700.0,
            defense_line: 100.0,
        }
    }
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            width: 44.0,
            height: 44.0,
            bottom: 32.0,
            movement: 5.0,
            lives: 3,
        }
    }
}

impl Default for AlienConfig {
    fn default() -> Self {
        Self {
            width: 33.0,
            height: 33.0,
            h_sep: 16.0,
            v_sep: 16.0,
            ceiling: 100.0,
            rows: 5,
            columns: 12,
            step_interval: 1.0,
            speedup: 0.75,
        }
    }
}

impl Default for BoltConfig {
    fn default() -> Self {
        Self {
            width: 4.0,
            height: 16.0,
            speed: 10.0,
            max_fire_steps: 5,
        }
    }
}

impl GameConfig {
    /// Load a TOML configuration file.  Keys missing from the file keep their
    /// default values.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("screen.width", self.screen.width),
            ("screen.height", self.screen.height),
            ("ship.width", self.ship.width),
            ("ship.height", self.ship.height),
            ("ship.movement", self.ship.movement),
            ("aliens.width", self.aliens.width),
            ("aliens.height", self.aliens.height),
            ("aliens.h_sep", self.aliens.h_sep),
            ("aliens.v_sep", self.aliens.v_sep),
            ("aliens.step_interval", self.aliens.step_interval),
            ("bolts.width", self.bolts.width),
            ("bolts.height", self.bolts.height),
            ("bolts.speed", self.bolts.speed),
        ];
        for (name, value) in positive {
            // NaN fails this comparison too
            if !(value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        if self.aliens.rows == 0 || self.aliens.columns == 0 {
            return Err(ConfigError::Invalid(format!(
                "formation must have at least one slot, got {}x{}",
                self.aliens.rows, self.aliens.columns
            )));
        }
        if self.ship.lives == 0 {
            return Err(ConfigError::Invalid("ship.lives must be at least 1".into()));
        }
        if self.bolts.max_fire_steps == 0 {
            return Err(ConfigError::Invalid("bolts.max_fire_steps must be at least 1".into()));
        }
        if !(self.aliens.speedup > 0.0 && self.aliens.speedup <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "aliens.speedup must be in (0, 1], got {}",
                self.aliens.speedup
            )));
        }
        if !(self.screen.defense_line >= 0.0 && self.screen.defense_line < self.screen.height) {
            return Err(ConfigError::Invalid(format!(
                "screen.defense_line must lie inside the screen, got {}",
                self.screen.defense_line
            )));
        }
        Ok(())
    }

    /// Seconds between formation steps for the given (1-based) wave.
    pub fn step_interval(&self, wave_number: u32) -> f32 {
        let exponent = wave_number.saturating_sub(1) as i32;
        self.aliens.step_interval * self.aliens.speedup.powi(exponent)
    }

    /// Center of the alien slot at `(row, col)` when a wave starts.
    pub fn alien_origin(&self, row: usize, col: usize) -> (f32, f32) {
        let a = &self.aliens;
        let x = a.h_sep * (col as f32 + 1.0) + a.width * (col as f32 + 0.5);
        let y = self.screen.height
            - (a.ceiling + (row as f32 + 0.5) * a.height + row as f32 * a.v_sep);
        (x, y)
    }
}
