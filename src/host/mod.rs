//! Host layer
//!
//! The simulation never draws, reads keys, or sleeps. The host loop calls into
//! three small capabilities instead:
//! - `InputSource`: discrete key events, applied as intent flags
//! - `RenderSink`: presents a snapshot after every frame
//! - `FramePacer`: waits for the next frame

pub mod frame;
pub mod framebuffer;
pub mod terminal;

use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::sim::{GamePhase, GameState, RandomSource, SimError, Snapshot, tick};

#[derive(Debug, Error)]
pub enum HostError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Sim(#[from] SimError),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// The three keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Press,
    Repeat,
    Release,
    /// Complete short press (press and release)
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub key: Key,
    pub kind: InputKind,
}

impl InputEvent {
    pub fn new(key: Key, kind: InputKind) -> Self {
        Self { key, kind }
    }
}

pub trait InputSource {
    /// Events received since the last poll, oldest first
    fn poll(&mut self) -> Result<Vec<InputEvent>, HostError>;
}

pub trait RenderSink {
    fn present(&mut self, snapshot: &Snapshot) -> Result<(), HostError>;
}

pub trait FramePacer {
    fn wait(&mut self);
}

/// Sleeps so frames start a fixed interval apart
#[derive(Debug)]
pub struct FixedPacer {
    interval: Duration,
    last: Instant,
}

impl FixedPacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Instant::now(),
        }
    }
}

impl FramePacer for FixedPacer {
    fn wait(&mut self) {
        let deadline = self.last + self.interval;
        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        }
        self.last = Instant::now();
    }
}

/// Apply one input event to the run.
///
/// Directions are last-write-wins intent flags read by the next tick. A short
/// Back press quits a running game or dismisses the game-over screen.
pub fn apply_input<R>(state: &mut GameState<R>, event: InputEvent) {
    match (event.key, event.kind) {
        (Key::Left, InputKind::Press | InputKind::Repeat) => state.move_left = true,
        (Key::Left, InputKind::Release) => state.move_left = false,
        (Key::Right, InputKind::Press | InputKind::Repeat) => state.move_right = true,
        (Key::Right, InputKind::Release) => state.move_right = false,
        (Key::Back, InputKind::Short) => {
            let result = match state.phase {
                GamePhase::Running => state.quit(),
                GamePhase::GameOver => state.acknowledge(),
                GamePhase::Exited => Ok(GamePhase::Exited),
            };
            if let Err(err) = result {
                log::warn!("Ignoring back press: {}", err);
            }
        }
        _ => {}
    }
}

/// Drive a run until it exits. Returns the final score.
pub fn run<R, I, S, P>(
    state: &mut GameState<R>,
    input: &mut I,
    sink: &mut S,
    pacer: &mut P,
) -> Result<u32, HostError>
where
    R: RandomSource,
    I: InputSource,
    S: RenderSink,
    P: FramePacer,
{
    log::info!("Run started");
    loop {
        for event in input.poll()? {
            apply_input(state, event);
        }
        if state.phase == GamePhase::Exited {
            break;
        }

        if state.is_running() {
            let events = tick(state)?;
            if events.scored {
                log::debug!(
                    "Highest platform now at y {}",
                    state.platforms.highest().y
                );
            }
            if events.game_over() {
                log::info!("Waiting for acknowledgment");
            }
        }

        sink.present(&state.snapshot())?;
        pacer.wait();
    }
    Ok(state.score)
}
