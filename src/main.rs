//! Terminal Tetris runner (default binary).

use anyhow::Result;
use log::info;

use console_tetris::config::Config;
use console_tetris::core::Session;
use console_tetris::input::KeyStateTracker;
use console_tetris::runner::{run_session, Outcome, SystemClock};
use console_tetris::terminal::{TerminalInput, TerminalScreen};

fn main() -> Result<()> {
    let config = Config::from_env();
    config.init_logging()?;

    let mut screen = TerminalScreen::new();
    let result = match screen.enter() {
        Ok(release_events) => run(&config, &mut screen, release_events),
        Err(e) => Err(e),
    };

    // Always try to restore terminal state.
    let _ = screen.exit();

    let outcome = result?;
    println!("GAME OVER!! Score: {}", outcome.score);
    Ok(())
}

fn run(config: &Config, screen: &mut TerminalScreen, release_events: bool) -> Result<Outcome> {
    let mut session = match config.seed {
        Some(seed) => {
            info!("seed {}", seed);
            Session::new(seed)
        }
        None => Session::from_entropy(),
    };

    let keys = KeyStateTracker::new()
        .with_release_events(release_events)
        .with_key_release_timeout_ms(config.key_release_timeout_ms);
    let mut input = TerminalInput::new(keys);

    run_session(&mut session, &mut input, screen, &mut SystemClock)
}
