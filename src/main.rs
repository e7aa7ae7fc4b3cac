//! Flipper Jump entry point
//!
//! Sets up logging and the terminal, then hands a fresh run to the host loop.

use std::io;
use std::time::{SystemTime, UNIX_EPOCH};

use flipper_jump::Settings;
use flipper_jump::host::terminal::{TerminalInput, TerminalSession, TerminalSink};
use flipper_jump::host::{self, FixedPacer, HostError};
use flipper_jump::sim::GameState;

fn main() {
    // Logs go to stderr; redirect it (`2>log.txt`) to keep the screen clean
    env_logger::init();

    if let Err(err) = play() {
        log::error!("{}", err);
        eprintln!("flipper-jump: {err}");
        std::process::exit(1);
    }
}

fn play() -> Result<(), HostError> {
    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!("Flipper Jump starting with seed {}", seed);

    let mut state = GameState::new(seed);
    let score = {
        let session = TerminalSession::enter()?;
        let mut input = TerminalInput::new(session.keyboard_enhanced());
        let mut sink = TerminalSink::new(io::stdout(), settings.show_score);
        let mut pacer = FixedPacer::new(settings.frame_interval());
        host::run(&mut state, &mut input, &mut sink, &mut pacer)?
    };

    println!("Final score: {score}");
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
