//! Owned game state and the per-tick simulation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::config::GameConfig;
use crate::entities::{Enemy, Player, Projectile};
use crate::hud;
use crate::input::InputState;
use crate::surface::{Rgba, Surface, TextAlign};

/// Something that happened during a tick and is applied at its end.
///
/// Indices refer to the collections as they stood while the tick ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    ProjectileExpired { projectile: usize },
    PlayerCollision { enemy: usize },
    EnemyEscaped { enemy: usize },
    EnemyShot { enemy: usize, projectile: usize },
}

/// Outcome of a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub events: Vec<TickEvent>,
    pub fired: bool,
    pub spawned: bool,
    pub lives_lost: u32,
    pub points: u32,
    pub game_over: bool,
}

pub struct World {
    config: GameConfig,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    score: u32,
    lives: u32,
    frame_count: u64,
    rng: StdRng,
}

impl World {
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            player: Player::spawn(config.canvas_width, config.canvas_height),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            lives: config.starting_lives,
            frame_count: 0,
            rng,
            config,
        }
    }

    /// Starts over with a fresh player, no entities, full lives.
    ///
    /// A seeded world replays the same enemy sequence after every reset.
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn is_game_over(&self) -> bool {
        self.lives == 0
    }

    /// Advances the simulation by one frame and draws it.
    pub fn tick(&mut self, input: &InputState, surface: &mut dyn Surface) -> TickReport {
        let (width, height) = (self.config.canvas_width, self.config.canvas_height);
        let mut report = TickReport::default();

        surface.fade(self.config.trail_fade);
        self.draw_lives(surface);

        if let Some(shot) = self.player.update(input, width, height) {
            self.projectiles.push(shot);
            report.fired = true;
        }
        self.player.draw(surface);

        // A projectile takes part in at most one event per tick
        let mut spent = vec![false; self.projectiles.len()];
        for (p_idx, projectile) in self.projectiles.iter_mut().enumerate() {
            projectile.update();
            projectile.draw(surface);
            if projectile.is_off_top() {
                spent[p_idx] = true;
                report
                    .events
                    .push(TickEvent::ProjectileExpired { projectile: p_idx });
            }
        }

        let player_box = self.player.bounds();
        for (e_idx, enemy) in self.enemies.iter_mut().enumerate() {
            enemy.update();
            enemy.draw(surface);

            let enemy_box = enemy.bounds();
            if enemy_box.overlaps(&player_box) {
                report.events.push(TickEvent::PlayerCollision { enemy: e_idx });
                continue;
            }
            if enemy.has_escaped(height) {
                report.events.push(TickEvent::EnemyEscaped { enemy: e_idx });
                continue;
            }
            let hit = self
                .projectiles
                .iter()
                .enumerate()
                .find(|(p_idx, p)| !spent[*p_idx] && p.bounds().overlaps(&enemy_box))
                .map(|(p_idx, _)| p_idx);
            if let Some(p_idx) = hit {
                spent[p_idx] = true;
                report.events.push(TickEvent::EnemyShot {
                    enemy: e_idx,
                    projectile: p_idx,
                });
            }
        }

        self.frame_count += 1;
        if self.frame_count.is_multiple_of(self.config.spawn_interval) {
            let enemy = Enemy::spawn(&mut self.rng, width);
            debug!(x = enemy.x, speed = enemy.speed, frame = self.frame_count, "enemy spawned");
            self.enemies.push(enemy);
            report.spawned = true;
        }

        self.resolve(&mut report);
        report
    }

    /// Applies the tick's events: score and lives first, then removals.
    fn resolve(&mut self, report: &mut TickReport) {
        let mut projectiles_to_remove = Vec::new();
        let mut enemies_to_remove = Vec::new();

        for event in &report.events {
            match *event {
                TickEvent::ProjectileExpired { projectile } => {
                    projectiles_to_remove.push(projectile);
                }
                TickEvent::PlayerCollision { enemy } | TickEvent::EnemyEscaped { enemy } => {
                    report.lives_lost += 1;
                    enemies_to_remove.push(enemy);
                }
                TickEvent::EnemyShot { enemy, projectile } => {
                    report.points += 1;
                    enemies_to_remove.push(enemy);
                    projectiles_to_remove.push(projectile);
                }
            }
        }

        self.score += report.points;
        if report.lives_lost > 0 {
            self.lives = self.lives.saturating_sub(report.lives_lost);
            debug!(lost = report.lives_lost, lives = self.lives, "lives lost");
        }
        if report.points > 0 {
            debug!(points = report.points, score = self.score, "enemies shot down");
        }

        // Remove in reverse order to avoid index issues
        projectiles_to_remove.sort_unstable();
        projectiles_to_remove.dedup();
        for idx in projectiles_to_remove.into_iter().rev() {
            if idx < self.projectiles.len() {
                self.projectiles.remove(idx);
            }
        }

        enemies_to_remove.sort_unstable();
        enemies_to_remove.dedup();
        for idx in enemies_to_remove.into_iter().rev() {
            if idx < self.enemies.len() {
                self.enemies.remove(idx);
            }
        }

        report.game_over = self.is_game_over();
    }

    fn draw_lives(&self, surface: &mut dyn Surface) {
        surface.fill_text(
            &hud::lives_label(self.lives),
            self.config.canvas_width - 20.0,
            40.0,
            TextAlign::Right,
            Rgba::CYAN,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::surface::FrameBuffer;

    fn seeded_world() -> World {
        World::new(GameConfig {
            seed: Some(1),
            ..GameConfig::default()
        })
    }

    fn surface() -> FrameBuffer {
        FrameBuffer::new(800.0, 600.0, 80, 60)
    }

    #[test]
    fn test_new_world_state() {
        let world = seeded_world();
        assert_eq!(world.score(), 0);
        assert_eq!(world.lives(), 5);
        assert_eq!(world.frame_count(), 0);
        assert!(world.enemies.is_empty());
        assert!(world.projectiles.is_empty());
        assert!(!world.is_game_over());
    }

    #[test]
    fn test_expired_projectile_removed() {
        let mut world = seeded_world();
        let mut fb = surface();
        world.projectiles.push(Projectile::new(100.0, 5.0));

        let report = world.tick(&InputState::new(), &mut fb);
        assert_eq!(
            report.events,
            vec![TickEvent::ProjectileExpired { projectile: 0 }]
        );
        assert!(world.projectiles.is_empty());
    }

    #[test]
    fn test_first_match_wins_per_enemy() {
        let mut world = seeded_world();
        let mut fb = surface();
        // Sits on the player and on a projectile at the same time
        let (px, py) = (world.player.x, world.player.y);
        world.enemies.push(Enemy::new(px, py, 0.0));
        world.projectiles.push(Projectile::new(px + 20.0, py + 30.0));

        let report = world.tick(&InputState::new(), &mut fb);
        assert_eq!(report.events, vec![TickEvent::PlayerCollision { enemy: 0 }]);
        assert_eq!(world.lives(), 4);
        assert_eq!(world.score(), 0);
        assert!(world.enemies.is_empty());
        // The projectile was never consumed
        assert_eq!(world.projectiles.len(), 1);
    }

    #[test]
    fn test_one_projectile_destroys_one_enemy() {
        let mut world = seeded_world();
        let mut fb = surface();
        world.enemies.push(Enemy::new(100.0, 100.0, 0.0));
        world.enemies.push(Enemy::new(110.0, 100.0, 0.0));
        world.projectiles.push(Projectile::new(130.0, 130.0));

        let report = world.tick(&InputState::new(), &mut fb);
        assert_eq!(report.points, 1);
        assert_eq!(world.score(), 1);
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.enemies[0].x, 110.0);
        assert!(world.projectiles.is_empty());
    }

    #[test]
    fn test_removal_keeps_survivor_order() {
        let mut world = seeded_world();
        let mut fb = surface();
        for (i, x) in [0.0, 100.0, 200.0, 300.0, 400.0].into_iter().enumerate() {
            // Odd indices slip past the bottom this tick
            let y = if i % 2 == 1 { 601.0 } else { 50.0 };
            world.enemies.push(Enemy::new(x, y, 0.0));
        }

        let report = world.tick(&InputState::new(), &mut fb);
        assert_eq!(report.lives_lost, 2);
        let xs: Vec<f32> = world.enemies.iter().map(|e| e.x).collect();
        assert_eq!(xs, vec![0.0, 200.0, 400.0]);
    }

    #[test]
    fn test_lives_saturate_at_zero() {
        let mut world = World::new(GameConfig {
            starting_lives: 2,
            seed: Some(1),
            ..GameConfig::default()
        });
        let mut fb = surface();
        for x in [0.0, 100.0, 200.0] {
            world.enemies.push(Enemy::new(x, 700.0, 0.0));
        }

        let report = world.tick(&InputState::new(), &mut fb);
        assert_eq!(report.lives_lost, 3);
        assert_eq!(world.lives(), 0);
        assert!(report.game_over);
    }

    #[test]
    fn test_fired_projectile_moves_same_tick() {
        let mut world = seeded_world();
        let mut fb = surface();
        let mut input = InputState::new();
        input.press(Key::Space);

        let report = world.tick(&input, &mut fb);
        assert!(report.fired);
        assert_eq!(world.projectiles.len(), 1);
        assert_eq!(world.projectiles[0].y, world.player.y - 10.0);
    }

    #[test]
    fn test_lives_indicator_drawn_each_tick() {
        let mut world = seeded_world();
        let mut fb = surface();
        world.tick(&InputState::new(), &mut fb);
        assert_eq!(fb.labels().len(), 1);
        assert_eq!(fb.labels()[0].text, "Lives: ♥♥♥♥♥");
        assert_eq!(fb.labels()[0].align, TextAlign::Right);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut world = seeded_world();
        let mut fb = surface();
        world.enemies.push(Enemy::new(0.0, 700.0, 0.0));
        for _ in 0..61 {
            world.tick(&InputState::new(), &mut fb);
        }
        world.reset();
        assert_eq!(world.lives(), 5);
        assert_eq!(world.frame_count(), 0);
        assert!(world.enemies.is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_input() -> impl Strategy<Value = InputState> {
            prop::collection::vec(prop::sample::select(Key::ALL.to_vec()), 0..4).prop_map(
                |keys| {
                    let mut input = InputState::new();
                    for key in keys {
                        input.press(key);
                    }
                    input
                },
            )
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn test_lives_and_score_are_monotonic(
                seed in any::<u64>(),
                inputs in prop::collection::vec(any_input(), 1..400)
            ) {
                let mut world = World::new(GameConfig {
                    seed: Some(seed),
                    spawn_interval: 10,
                    ..GameConfig::default()
                });
                let mut fb = FrameBuffer::new(800.0, 600.0, 40, 30);
                for input in inputs {
                    let (lives, score) = (world.lives(), world.score());
                    let report = world.tick(&input, &mut fb);
                    prop_assert!(world.lives() <= lives);
                    prop_assert!(world.score() >= score);
                    prop_assert_eq!(world.score() - score, report.points);
                    if world.is_game_over() {
                        break;
                    }
                }
            }
        }
    }
}
