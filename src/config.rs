use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

use crate::entities::{ENEMY_SIZE, PLAYER_SIZE};

/// Most lives a game may start with; the HUD draws one heart per life
pub const MAX_LIVES: u32 = 99;

/// Command-line options
#[derive(Parser, Debug, Clone)]
#[command(name = "galaxy-defense")]
#[command(about = "Arcade shooter for the terminal")]
pub struct Args {
    /// Canvas width in game units
    #[arg(long, default_value_t = 800.0)]
    pub width: f32,

    /// Canvas height in game units
    #[arg(long, default_value_t = 600.0)]
    pub height: f32,

    /// Lives at the start of each game
    #[arg(long, default_value_t = 5)]
    pub lives: u32,

    /// Ticks between enemy spawns
    #[arg(long, default_value_t = 60)]
    pub spawn_interval: u64,

    /// Seed for enemy placement; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Target frames per second
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Disable sound effects
    #[arg(long)]
    pub mute: bool,

    /// Where log output goes (the terminal is busy drawing the game)
    #[arg(long, default_value = "galaxy-defense.log")]
    pub log_file: PathBuf,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("canvas {width}x{height} must have finite dimensions")]
    NonFiniteCanvas { width: f32, height: f32 },
    #[error("canvas {width}x{height} is too small to hold the player and an enemy")]
    CanvasTooSmall { width: f32, height: f32 },
    #[error("spawn interval must be at least one tick")]
    ZeroSpawnInterval,
    #[error("a game needs at least one life")]
    ZeroLives,
    #[error("{lives} lives is more than the maximum of {max}")]
    TooManyLives { lives: u32, max: u32 },
    #[error("frame rate must be at least 1 fps")]
    ZeroFrameRate,
}

/// Rules of a single game
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub starting_lives: u32,
    pub spawn_interval: u64,
    /// Alpha of the black wash laid over the previous frame
    pub trail_fade: f32,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            starting_lives: 5,
            spawn_interval: 60,
            trail_fade: 0.3,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width.is_infinite() || self.canvas_height.is_infinite() {
            return Err(ConfigError::NonFiniteCanvas {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        let min_side = ENEMY_SIZE.max(PLAYER_SIZE);
        // Negated so NaN dimensions are rejected too
        if !(self.canvas_width >= min_side && self.canvas_height >= min_side) {
            return Err(ConfigError::CanvasTooSmall {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if self.spawn_interval == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::ZeroLives);
        }
        if self.starting_lives > MAX_LIVES {
            return Err(ConfigError::TooManyLives {
                lives: self.starting_lives,
                max: MAX_LIVES,
            });
        }
        Ok(())
    }
}

impl Args {
    /// Builds the validated game rules from the command line.
    pub fn game_config(&self) -> Result<GameConfig, ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        let config = GameConfig {
            canvas_width: self.width,
            canvas_height: self.height,
            starting_lives: self.lives,
            spawn_interval: self.spawn_interval,
            seed: self.seed,
            ..GameConfig::default()
        };
        config.validate()?;
        Ok(config)
    }
}
