use color_eyre::Result;
use ratatui::{Terminal, backend::Backend, layout::Rect};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::audio::AudioManager;
use crate::config::GameConfig;
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};
use crate::screen::{GamePhase, ScreenController};
use crate::surface::FrameBuffer;

/// The main application which holds the state and logic of the application.
pub struct App {
    running: bool,
    screen: ScreenController,
    canvas: FrameBuffer,
    /// Frame pacing
    frame_interval: Duration,
    last_frame_time: Instant,
    fps: u32,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(
        config: GameConfig,
        target_fps: u32,
        release_events: bool,
        audio_manager: AudioManager,
    ) -> Self {
        let canvas = FrameBuffer::new(config.canvas_width, config.canvas_height, 0, 0);
        Self {
            running: true,
            screen: ScreenController::new(config),
            canvas,
            frame_interval: Duration::from_secs(1) / target_fps.max(1),
            last_frame_time: Instant::now(),
            fps: 0,
            input_manager: InputManager::new(release_events),
            renderer: GameRenderer::new(),
            audio_manager,
        }
    }

    /// Run the application's main loop.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while self.running {
            let frame_start = Instant::now();
            let frame_time = frame_start.duration_since(self.last_frame_time);
            self.last_frame_time = frame_start;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            let size = terminal.size()?;
            let (columns, pixel_rows) =
                GameRenderer::canvas_resolution(Rect::new(0, 0, size.width, size.height));
            self.canvas.resize(columns, pixel_rows);

            // Input lands between ticks only
            let actions = self.input_manager.poll_events(self.screen.phase())?;
            self.process_actions(&actions);
            if !self.running {
                break;
            }

            self.step();

            terminal.draw(|frame| {
                let view = RenderView {
                    phase: self.screen.phase(),
                    panels: self.screen.panels(),
                    canvas: &self.canvas,
                    hud: self.screen.hud(),
                    final_score: self.screen.final_score(),
                    area: frame.area(),
                    fps: self.fps,
                };
                self.renderer.render(frame, &view);
            })?;

            if let Some(remaining) = self.frame_interval.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(remaining);
            }
        }
        Ok(())
    }

    /// Runs the scheduled frame, if there is one.
    fn step(&mut self) {
        let Some(handle) = self.screen.pending_frame() else {
            return;
        };
        if let Some(report) =
            self.screen
                .run_frame(handle, self.input_manager.state(), &mut self.canvas)
        {
            self.audio_manager.play_report(&report);
        }
        self.input_manager.end_tick();
    }

    /// Process input actions and update game state accordingly
    fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match action {
                InputAction::Quit => {
                    debug!("quit requested");
                    self.running = false;
                }
                InputAction::StartGame => {
                    self.input_manager.reset();
                    self.screen.start_game();
                }
                InputAction::ShowMenu => {
                    if self.screen.phase() != GamePhase::Idle {
                        self.screen.show_menu(&mut self.canvas);
                    }
                }
            }
        }
    }
}
