// Library exports for testing
pub use config::{Args, ConfigError, GameConfig};
pub use entities::{Enemy, Player, Projectile};
pub use geometry::Aabb;
pub use input::{InputAction, InputManager, InputState, Key};
pub use screen::{FrameHandle, FrameScheduler, GamePhase, Panels, ScreenController};
pub use surface::{FrameBuffer, Rgba, Surface, TextAlign};
pub use world::{TickEvent, TickReport, World};

pub mod app;
pub mod audio;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod hud;
pub mod input;
pub mod renderer;
pub mod screen;
pub mod surface;
pub mod world;
