mod enemy;
mod player;
mod projectile;

pub use enemy::{ENEMY_MAX_SPEED, ENEMY_MIN_SPEED, ENEMY_SIZE, Enemy};
pub use player::{FIRE_COOLDOWN, PLAYER_SIZE, PLAYER_SPEED, Player};
pub use projectile::{PROJECTILE_RADIUS, PROJECTILE_SPEED, Projectile};
