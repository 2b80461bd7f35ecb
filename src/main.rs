use clap::Parser;
use color_eyre::Result;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::File;
use std::io::stdout;
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use galaxy_defense::app::App;
use galaxy_defense::audio::AudioManager;
use galaxy_defense::config::Args;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let config = args.game_config()?;

    // The terminal belongs to the game, so logs go to a file
    let log_file = File::create(&args.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    info!(
        width = config.canvas_width,
        height = config.canvas_height,
        lives = config.starting_lives,
        seed = ?config.seed,
        "starting galaxy defense"
    );

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    debug!(supports_keyboard_enhancement, "keyboard enhancement support");

    let audio = AudioManager::from_settings(args.mute);

    // Setup terminal manually for full control
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Release events need the enhancement flags, pushed inside the alternate screen
    if supports_keyboard_enhancement {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let result = App::new(config, args.fps, supports_keyboard_enhancement, audio).run(&mut terminal);

    // Cleanup
    if supports_keyboard_enhancement {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("exiting");
    result
}
