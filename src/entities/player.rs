use super::projectile::Projectile;
use crate::geometry::Aabb;
use crate::input::InputState;
use crate::surface::{Rgba, Surface};

pub const PLAYER_SIZE: f32 = 30.0;
pub const PLAYER_SPEED: f32 = 8.0;
/// Ticks between shots while fire is held
pub const FIRE_COOLDOWN: i32 = 15;
/// Distance of the spawn point above the bottom edge
const SPAWN_OFFSET_Y: f32 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub fire_cooldown: i32,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            speed: PLAYER_SPEED,
            fire_cooldown: 0,
        }
    }

    /// Centred horizontally, near the bottom of the canvas
    pub fn spawn(canvas_width: f32, canvas_height: f32) -> Self {
        let x = canvas_width / 2.0 - PLAYER_SIZE / 2.0;
        let y = (canvas_height - SPAWN_OFFSET_Y).max(0.0);
        Self::new(x, y)
    }

    /// Moves according to held keys and fires if the cooldown allows.
    pub fn update(
        &mut self,
        input: &InputState,
        canvas_width: f32,
        canvas_height: f32,
    ) -> Option<Projectile> {
        let max_x = (canvas_width - self.width).max(0.0);
        let max_y = (canvas_height - self.height).max(0.0);

        if input.up() && self.y > 0.0 {
            self.y -= self.speed;
        }
        if input.down() && self.y < max_y {
            self.y += self.speed;
        }
        if input.left() && self.x > 0.0 {
            self.x -= self.speed;
        }
        if input.right() && self.x < max_x {
            self.x += self.speed;
        }
        self.x = self.x.clamp(0.0, max_x);
        self.y = self.y.clamp(0.0, max_y);

        let shot = if input.fire() && self.can_fire() {
            self.fire_cooldown = FIRE_COOLDOWN;
            Some(Projectile::new(self.nose_x(), self.y))
        } else {
            None
        };

        self.update_cooldown();
        shot
    }

    pub fn can_fire(&self) -> bool {
        self.fire_cooldown <= 0
    }

    pub fn update_cooldown(&mut self) {
        if self.fire_cooldown > 0 {
            self.fire_cooldown -= 1;
        }
    }

    fn nose_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_triangle(
            (self.nose_x(), self.y),
            (self.x, self.y + self.height),
            (self.x + self.width, self.y + self.height),
            Rgba::CYAN,
        );
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }
}
