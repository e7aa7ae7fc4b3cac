//! Headless run trace
//!
//! Usage: `trace [seed] [ticks]`. Runs without input and prints one JSON
//! snapshot per line, starting with the initial state.

use std::io::{self, Write};
use std::str::FromStr;

use flipper_jump::host::HostError;
use flipper_jump::sim::{GameState, tick};

fn parse_arg<T: FromStr>(arg: Option<String>, name: &str, default: T) -> Result<T, HostError> {
    match arg {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| HostError::InvalidArgument(format!("{name}: {raw}"))),
    }
}

fn main() -> Result<(), HostError> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = parse_arg(args.next(), "seed", 1)?;
    let ticks: u64 = parse_arg(args.next(), "ticks", 600)?;

    let mut state = GameState::new(seed);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "{}", serde_json::to_string(&state.snapshot())?)?;
    for _ in 0..ticks {
        if !state.is_running() {
            break;
        }
        tick(&mut state)?;
        writeln!(out, "{}", serde_json::to_string(&state.snapshot())?)?;
    }

    log::info!(
        "Traced {} ticks, score {}, phase {:?}",
        state.time_ticks,
        state.score,
        state.phase
    );
    Ok(())
}
