/// Gameplay tuning.
///
/// Every constant the simulation and renderer depend on lives in `Tuning`.
/// The defaults give the classic arcade feel; a TOML file may override
/// any subset of them under a `[tuning]` table.  All speeds and timers are in
/// ticks, never wall-clock time, so behaviour stays frame-rate driven.

use std::path::Path;

use serde::Deserialize;

/// Largest canvas edge accepted, in pixels.
pub const MAX_CANVAS: f32 = 4096.0;

// ── Tuning table ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Raster canvas size in pixels.
    pub canvas_width: f32,
    pub canvas_height: f32,

    pub player_width: f32,
    pub player_height: f32,
    /// Pixels per tick while a direction key is held.
    pub player_speed: f32,
    /// Distance from the bottom edge to the player's top edge.
    pub player_bottom_offset: f32,

    /// Magnitude of every bullet's vertical speed.
    pub bullet_speed: f32,

    pub enemy_width: f32,
    pub enemy_height: f32,
    /// Horizontal pixels per formation step.
    pub enemy_speed: f32,
    pub enemy_rows: usize,
    pub enemy_cols: usize,
    /// Distance between neighbouring enemy origins, both axes.
    pub enemy_spacing: f32,
    pub enemy_start_x: f32,
    pub enemy_start_y: f32,
    /// Vertical drop applied when the formation reverses.
    pub formation_drop: f32,
    /// Ticks between formation steps.
    pub formation_interval: u32,
    /// Ticks between enemy shots.
    pub enemy_shoot_interval: u32,

    pub points_per_enemy: u32,

    pub particles_per_explosion: usize,
    /// Each velocity component is drawn from `[-spread/2, spread/2)`.
    pub particle_spread: f32,
    pub particle_decay: f32,

    pub star_count: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,

            player_width: 50.0,
            player_height: 30.0,
            player_speed: 5.0,
            player_bottom_offset: 50.0,

            bullet_speed: 7.0,

            enemy_width: 40.0,
            enemy_height: 30.0,
            enemy_speed: 1.0,
            enemy_rows: 5,
            enemy_cols: 10,
            enemy_spacing: 60.0,
            enemy_start_x: 50.0,
            enemy_start_y: 50.0,
            formation_drop: 20.0,
            formation_interval: 30,
            enemy_shoot_interval: 60,

            points_per_enemy: 10,

            particles_per_explosion: 15,
            particle_spread: 8.0,
            particle_decay: 0.02,

            star_count: 100,
        }
    }
}

/// On-disk layout: `[tuning]` table, everything optional.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    tuning: Tuning,
}

impl Tuning {
    /// Parse a TOML document.  Missing fields keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        file.tuning.validate()?;
        Ok(file.tuning)
    }

    /// Load and validate a TOML tuning file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_toml_str(&contents)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject values that would make the simulation meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_speed", self.player_speed),
            ("player_bottom_offset", self.player_bottom_offset),
            ("bullet_speed", self.bullet_speed),
            ("enemy_width", self.enemy_width),
            ("enemy_height", self.enemy_height),
            ("enemy_speed", self.enemy_speed),
            ("enemy_spacing", self.enemy_spacing),
            ("particle_decay", self.particle_decay),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive")));
            }
        }
        let non_negative = [
            ("enemy_start_x", self.enemy_start_x),
            ("enemy_start_y", self.enemy_start_y),
            ("formation_drop", self.formation_drop),
            ("particle_spread", self.particle_spread),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be zero or more")));
            }
        }
        if self.canvas_width > MAX_CANVAS || self.canvas_height > MAX_CANVAS {
            return Err(ConfigError::Invalid(format!(
                "canvas larger than {MAX_CANVAS}×{MAX_CANVAS}"
            )));
        }
        if self.player_bottom_offset < self.player_height
            || self.player_bottom_offset >= self.canvas_height
        {
            return Err(ConfigError::Invalid(
                "player_bottom_offset must keep the ship on the canvas".into(),
            ));
        }
        if self.formation_interval == 0 || self.enemy_shoot_interval == 0 {
            return Err(ConfigError::Invalid("timer intervals must be non-zero".into()));
        }
        if self.enemy_rows == 0 || self.enemy_cols == 0 {
            return Err(ConfigError::Invalid("formation must have at least one enemy".into()));
        }

        let grid_right = self.enemy_start_x
            + (self.enemy_cols - 1) as f32 * self.enemy_spacing
            + self.enemy_width;
        let grid_bottom = self.enemy_start_y
            + (self.enemy_rows - 1) as f32 * self.enemy_spacing
            + self.enemy_height;
        if grid_right > self.canvas_width || grid_bottom >= self.player_y() {
            return Err(ConfigError::Invalid("formation does not fit the canvas".into()));
        }
        if self.player_width > self.canvas_width {
            return Err(ConfigError::Invalid("player wider than canvas".into()));
        }
        Ok(())
    }

    /// Fixed vertical position of the player's top edge.
    pub fn player_y(&self) -> f32 {
        self.canvas_height - self.player_bottom_offset
    }

    /// Player x at game start: horizontally centred.
    pub fn player_start_x(&self) -> f32 {
        self.canvas_width / 2.0 - self.player_width / 2.0
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid tuning: {0}")]
    Invalid(String),
}
