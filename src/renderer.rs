use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::hud::Hud;
use crate::screen::{GamePhase, Panels};
use crate::surface::{FrameBuffer, Rgba};

/// Upper half block: foreground paints the top pixel, background the bottom
const HALF_BLOCK: char = '▀';

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub phase: GamePhase,
    pub panels: Panels,
    pub canvas: &'a FrameBuffer,
    pub hud: &'a Hud,
    pub final_score: Option<u32>,
    pub area: Rect,
    pub fps: u32,
}

/// Handles all rendering responsibilities for the game
#[derive(Debug, Default)]
pub struct GameRenderer;

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Screen region the canvas is drawn into: everything between the
    /// header and footer lines.
    pub fn playfield(area: Rect) -> Rect {
        Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height.saturating_sub(2),
        }
    }

    /// Pixel resolution of the canvas for a terminal area
    pub fn canvas_resolution(area: Rect) -> (u16, u16) {
        let playfield = Self::playfield(area);
        (playfield.width, playfield.height.saturating_mul(2))
    }

    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        let playfield = Self::playfield(view.area);
        self.render_canvas(frame, view.canvas, playfield);
        self.render_header(frame, view);
        self.render_footer(frame, view);

        if view.panels.start {
            self.render_start_panel(frame, playfield);
        }
        if view.panels.game_over {
            self.render_game_over_panel(frame, playfield, view.final_score.unwrap_or(0));
        }
    }

    /// Blits the frame buffer two pixel rows per cell, then overlays labels
    fn render_canvas(&self, frame: &mut Frame, canvas: &FrameBuffer, playfield: Rect) {
        let buffer = frame.buffer_mut();
        for row in 0..playfield.height {
            for col in 0..playfield.width {
                let top = canvas.pixel(col, row * 2);
                let bottom = canvas.pixel(col, row * 2 + 1);
                if let Some(cell) = buffer.cell_mut((playfield.x + col, playfield.y + row)) {
                    cell.set_char(HALF_BLOCK)
                        .set_fg(to_color(top))
                        .set_bg(to_color(bottom));
                }
            }
        }

        for label in canvas.labels() {
            let (col, row) = canvas.label_cell(label);
            if col < playfield.width && row < playfield.height {
                buffer.set_string(
                    playfield.x + col,
                    playfield.y + row,
                    &label.text,
                    Style::default()
                        .fg(to_color(Some(label.color)))
                        .bg(Color::Black)
                        .add_modifier(Modifier::BOLD),
                );
            }
        }
    }

    fn render_header(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let stats = Line::from(vec![
            Span::styled(
                view.hud.score_text().to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Lives: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                view.hud.lives_text().to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  FPS: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.fps),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: area.height.min(1),
        };
        frame.render_widget(Clear, stats_area);
        frame.render_widget(Paragraph::new(stats), stats_area);
    }

    fn render_footer(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        if area.height < 2 {
            return;
        }
        let hint = match view.phase {
            GamePhase::Idle => "[Enter: Start] [Q: Quit]",
            GamePhase::Running => "[WASD/Arrows: Move] [Space: Fire] [M: Menu] [Q: Quit]",
            GamePhase::GameOver => "[Enter/R: Play again] [M: Menu] [Q: Quit]",
        };
        let controls = Line::from(vec![Span::styled(
            hint,
            Style::default().fg(Color::DarkGray),
        )]);

        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height - 1,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Clear, controls_area);
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    fn render_start_panel(&self, frame: &mut Frame, playfield: Rect) {
        let text = vec![
            Line::from(""),
            Line::from("GALAXY DEFENSE").centered().bold().cyan(),
            Line::from(""),
            Line::from("Shoot the invaders before they get past you").centered().white(),
            Line::from(""),
            Line::from("Press Enter to start").centered().yellow(),
            Line::from("Press Q to quit").centered().white(),
        ];
        let panel = centered(playfield, 50, 9);
        frame.render_widget(Clear, panel);
        frame.render_widget(
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Cyan)),
                )
                .alignment(Alignment::Center),
            panel,
        );
    }

    fn render_game_over_panel(&self, frame: &mut Frame, playfield: Rect, score: u32) {
        let text = vec![
            Line::from(""),
            Line::from("╔═══════════════════════════╗").centered().red(),
            Line::from("║         GAME OVER!        ║")
                .centered()
                .red()
                .bold(),
            Line::from("╚═══════════════════════════╝").centered().red(),
            Line::from(""),
            Line::from(format!("Final Score: {}", score))
                .centered()
                .yellow()
                .bold(),
            Line::from(""),
            Line::from("Press R or Enter to play again").centered().white(),
            Line::from("Press M for the menu").centered().white(),
        ];
        let panel = centered(playfield, 40, 11);
        frame.render_widget(Clear, panel);
        frame.render_widget(
            Paragraph::new(text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            panel,
        );
    }
}

fn to_color(pixel: Option<Rgba>) -> Color {
    match pixel {
        Some(p) => Color::Rgb(p.r, p.g, p.b),
        None => Color::Black,
    }
}

/// A `width × height` rect centred in `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
