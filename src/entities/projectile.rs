use crate::geometry::Aabb;
use crate::surface::{Rgba, Surface};

pub const PROJECTILE_RADIUS: f32 = 4.0;
pub const PROJECTILE_SPEED: f32 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub speed: f32,
}

impl Projectile {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            radius: PROJECTILE_RADIUS,
            speed: PROJECTILE_SPEED,
        }
    }

    pub fn update(&mut self) {
        self.y -= self.speed;
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.x, self.y, self.radius, Rgba::YELLOW);
    }

    /// Fully above the playfield
    pub fn is_off_top(&self) -> bool {
        self.y + self.radius < 0.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::around_circle(self.x, self.y, self.radius)
    }
}
