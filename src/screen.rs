//! Start / playing / game-over lifecycle and frame scheduling.

use tracing::info;

use crate::config::GameConfig;
use crate::hud::Hud;
use crate::input::InputState;
use crate::surface::Surface;
use crate::world::{TickReport, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Start panel shown, nothing simulated
    Idle,
    Running,
    /// Loop stopped, final score shown
    GameOver,
}

/// Ticket for one scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(u64);

/// Hands out frame tickets; only the newest uncancelled ticket is live.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    generation: u64,
    current: Option<FrameHandle>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self) -> FrameHandle {
        self.generation += 1;
        let handle = FrameHandle(self.generation);
        self.current = Some(handle);
        handle
    }

    pub fn cancel(&mut self) {
        self.current = None;
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.current
    }

    pub fn is_current(&self, handle: FrameHandle) -> bool {
        self.current == Some(handle)
    }
}

/// Which presentational panels are visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panels {
    pub start: bool,
    pub game_over: bool,
}

pub struct ScreenController {
    phase: GamePhase,
    panels: Panels,
    world: World,
    scheduler: FrameScheduler,
    hud: Hud,
    final_score: Option<u32>,
    game_overs: u32,
}

impl ScreenController {
    pub fn new(config: GameConfig) -> Self {
        let world = World::new(config);
        let mut hud = Hud::new();
        hud.publish(world.score(), world.lives());
        Self {
            phase: GamePhase::Idle,
            panels: Panels {
                start: true,
                game_over: false,
            },
            world,
            scheduler: FrameScheduler::new(),
            hud,
            final_score: None,
            game_overs: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn panels(&self) -> Panels {
        self.panels
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct access for staging scenarios
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    /// Number of game-over transitions since construction
    pub fn game_overs(&self) -> u32 {
        self.game_overs
    }

    /// The frame the display loop should run next, if any
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.scheduler.pending()
    }

    pub fn start_game(&mut self) {
        self.world.reset();
        self.hud.publish(self.world.score(), self.world.lives());
        self.final_score = None;
        self.panels = Panels {
            start: false,
            game_over: false,
        };
        self.phase = GamePhase::Running;
        self.scheduler.schedule();
        info!(lives = self.world.lives(), "game started");
    }

    pub fn show_menu(&mut self, surface: &mut dyn Surface) {
        self.scheduler.cancel();
        self.phase = GamePhase::Idle;
        self.panels = Panels {
            start: true,
            game_over: false,
        };
        surface.clear();
        info!("menu shown");
    }

    fn game_over(&mut self) {
        self.scheduler.cancel();
        self.phase = GamePhase::GameOver;
        self.final_score = Some(self.world.score());
        self.panels.game_over = true;
        self.game_overs += 1;
        info!(score = self.world.score(), frames = self.world.frame_count(), "game over");
    }

    /// Runs one tick for `handle`.
    ///
    /// Stale or cancelled handles do nothing and return `None`.
    pub fn run_frame(
        &mut self,
        handle: FrameHandle,
        input: &InputState,
        surface: &mut dyn Surface,
    ) -> Option<TickReport> {
        if self.phase != GamePhase::Running || !self.scheduler.is_current(handle) {
            return None;
        }

        let report = self.world.tick(input, surface);
        self.hud.publish(self.world.score(), self.world.lives());

        if report.game_over {
            self.game_over();
        } else {
            self.scheduler.schedule();
        }
        Some(report)
    }
}
