use rand::Rng;

use crate::geometry::Aabb;
use crate::surface::{Rgba, Surface};

pub const ENEMY_SIZE: f32 = 40.0;
pub const ENEMY_MIN_SPEED: f32 = 2.0;
pub const ENEMY_MAX_SPEED: f32 = 4.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Enemy {
    pub fn new(x: f32, y: f32, speed: f32) -> Self {
        Self {
            x,
            y,
            width: ENEMY_SIZE,
            height: ENEMY_SIZE,
            speed,
        }
    }

    /// Spawns just above the canvas at a random column with a random speed.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, canvas_width: f32) -> Self {
        let max_x = (canvas_width - ENEMY_SIZE).max(0.0);
        let x = if max_x > 0.0 {
            rng.random_range(0.0..max_x)
        } else {
            0.0
        };
        let speed = rng.random_range(ENEMY_MIN_SPEED..ENEMY_MAX_SPEED);
        Self::new(x, -ENEMY_SIZE, speed)
    }

    pub fn update(&mut self) {
        self.y += self.speed;
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.x, self.y, self.width, self.height, Rgba::RED);
        // Eyes
        surface.fill_rect(self.x + 10.0, self.y + 10.0, 5.0, 5.0, Rgba::BLACK);
        surface.fill_rect(self.x + 25.0, self.y + 10.0, 5.0, 5.0, Rgba::BLACK);
    }

    /// Slipped past the bottom edge
    pub fn has_escaped(&self, canvas_height: f32) -> bool {
        self.y > canvas_height
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }
}
