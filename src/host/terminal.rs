//! Terminal front end (crossterm)
//!
//! Two pixel rows share one character cell using half-block glyphs, so the
//! 128x64 canvas needs a 128x32 terminal.

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{cursor, execute, queue, style::Print, terminal};

use super::frame::rasterize;
use super::framebuffer::{Framebuffer, HEIGHT, WIDTH};
use super::{HostError, InputEvent, InputKind, InputSource, Key, RenderSink};
use crate::sim::Snapshot;

/// Hold time after a first press, covering the delay before auto-repeat starts
const PRESS_HOLD: Duration = Duration::from_millis(600);
/// Hold time once auto-repeat events are flowing
const REPEAT_HOLD: Duration = Duration::from_millis(150);

/// Raw mode + alternate screen, restored on drop
pub struct TerminalSession {
    out: Stdout,
    enhanced: bool,
}

impl TerminalSession {
    pub fn enter() -> Result<Self, HostError> {
        terminal::enable_raw_mode()?;
        // From here on, dropping the session restores the terminal
        let mut session = Self {
            out: io::stdout(),
            enhanced: false,
        };
        execute!(
            session.out,
            terminal::EnterAlternateScreen,
            terminal::Clear(terminal::ClearType::All),
            cursor::Hide
        )?;

        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                session.out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            session.enhanced = true;
        }
        log::info!("Terminal ready (release events: {})", session.enhanced);

        Ok(session)
    }

    /// Whether the terminal reports key releases
    pub fn keyboard_enhanced(&self) -> bool {
        self.enhanced
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.enhanced {
            let _ = execute!(self.out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Map a terminal key event to a game input event
pub fn translate(key: &KeyEvent) -> Option<InputEvent> {
    let target = match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Key::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Key::Right,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Key::Back,
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => Key::Back,
        _ => return None,
    };

    let kind = match (target, key.kind) {
        (Key::Back, KeyEventKind::Press) => InputKind::Short,
        (Key::Back, _) => return None,
        (_, KeyEventKind::Press) => InputKind::Press,
        (_, KeyEventKind::Repeat) => InputKind::Repeat,
        (_, KeyEventKind::Release) => InputKind::Release,
    };
    Some(InputEvent::new(target, kind))
}

/// A direction held on a terminal without release events
#[derive(Debug, Clone, Copy)]
struct Hold {
    last_seen: Instant,
    /// A second key event arrived, so auto-repeat is running
    repeating: bool,
}

impl Hold {
    fn window(&self) -> Duration {
        if self.repeating { REPEAT_HOLD } else { PRESS_HOLD }
    }
}

/// Keyboard input from crossterm's event queue.
///
/// Most terminals only report presses, and send auto-repeat as more presses.
/// Without release events a direction counts as held until its window passes
/// with no new event: `PRESS_HOLD` after the first press, then `REPEAT_HOLD`
/// once repeats arrive.
pub struct TerminalInput {
    release_events: bool,
    /// Left and Right
    held: [Option<Hold>; 2],
}

impl TerminalInput {
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            held: [None; 2],
        }
    }

    fn track(&mut self, event: InputEvent, now: Instant) {
        let slot = match event.key {
            Key::Left => 0,
            Key::Right => 1,
            Key::Back => return,
        };
        self.held[slot] = match event.kind {
            InputKind::Press | InputKind::Repeat => Some(Hold {
                last_seen: now,
                repeating: event.kind == InputKind::Repeat || self.held[slot].is_some(),
            }),
            _ => None,
        };
    }

    /// Synthesized releases for directions whose hold window ran out
    fn expire(&mut self, now: Instant) -> Vec<InputEvent> {
        let mut released = Vec::new();
        for (slot, key) in [Key::Left, Key::Right].into_iter().enumerate() {
            if let Some(hold) = self.held[slot] {
                if now.duration_since(hold.last_seen) >= hold.window() {
                    self.held[slot] = None;
                    released.push(InputEvent::new(key, InputKind::Release));
                }
            }
        }
        released
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Result<Vec<InputEvent>, HostError> {
        let now = Instant::now();
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if let Some(input) = translate(&key) {
                    if !self.release_events {
                        self.track(input, now);
                    }
                    events.push(input);
                }
            }
        }
        if !self.release_events {
            events.extend(self.expire(now));
        }
        Ok(events)
    }
}

/// Convert the canvas into `HEIGHT / 2` lines of half-block glyphs
pub fn half_block_lines(fb: &Framebuffer) -> Vec<String> {
    (0..HEIGHT as i32 / 2)
        .map(|row| {
            (0..WIDTH as i32)
                .map(|x| match (fb.get(x, row * 2), fb.get(x, row * 2 + 1)) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                })
                .collect()
        })
        .collect()
}

/// Draws snapshots to a terminal (or any writer)
pub struct TerminalSink<W: Write> {
    out: W,
    framebuffer: Framebuffer,
    show_score: bool,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, show_score: bool) -> Self {
        Self {
            out,
            framebuffer: Framebuffer::new(),
            show_score,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSink for TerminalSink<W> {
    fn present(&mut self, snapshot: &Snapshot) -> Result<(), HostError> {
        rasterize(&mut self.framebuffer, snapshot, self.show_score);
        for (row, line) in half_block_lines(&self.framebuffer).iter().enumerate() {
            queue!(self.out, cursor::MoveTo(0, row as u16), Print(line))?;
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameState, SequenceRandom};

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    #[test]
    fn test_translate_directions() {
        assert_eq!(
            translate(&key(KeyCode::Left, KeyEventKind::Press)),
            Some(InputEvent::new(Key::Left, InputKind::Press))
        );
        assert_eq!(
            translate(&key(KeyCode::Char('d'), KeyEventKind::Repeat)),
            Some(InputEvent::new(Key::Right, InputKind::Repeat))
        );
        assert_eq!(
            translate(&key(KeyCode::Right, KeyEventKind::Release)),
            Some(InputEvent::new(Key::Right, InputKind::Release))
        );
        assert_eq!(translate(&key(KeyCode::Up, KeyEventKind::Press)), None);
    }

    #[test]
    fn test_translate_back_only_on_press() {
        assert_eq!(
            translate(&key(KeyCode::Esc, KeyEventKind::Press)),
            Some(InputEvent::new(Key::Back, InputKind::Short))
        );
        assert_eq!(translate(&key(KeyCode::Char('q'), KeyEventKind::Release)), None);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            translate(&ctrl_c),
            Some(InputEvent::new(Key::Back, InputKind::Short))
        );
        assert_eq!(translate(&key(KeyCode::Char('c'), KeyEventKind::Press)), None);
    }

    #[test]
    fn test_hold_window_synthesizes_release() {
        let mut input = TerminalInput::new(false);
        let start = Instant::now();
        input.track(InputEvent::new(Key::Left, InputKind::Press), start);

        assert!(input.expire(start + Duration::from_millis(300)).is_empty());
        assert_eq!(
            input.expire(start + PRESS_HOLD),
            vec![InputEvent::new(Key::Left, InputKind::Release)]
        );
        // Already released
        assert!(input.expire(start + PRESS_HOLD * 2).is_empty());
    }

    #[test]
    fn test_held_key_survives_autorepeat_delay() {
        let mut input = TerminalInput::new(false);
        let start = Instant::now();
        let at = |ms: u64| start + Duration::from_millis(ms);
        input.track(InputEvent::new(Key::Right, InputKind::Press), start);

        // Auto-repeat starts at 250 ms and then fires every 33 ms until 900 ms;
        // the host expires holds once per 30 ms frame
        let mut next_repeat = 250;
        for frame in (0..=900).step_by(30) {
            while next_repeat <= frame {
                input.track(InputEvent::new(Key::Right, InputKind::Press), at(next_repeat));
                next_repeat += 33;
            }
            assert!(input.expire(at(frame)).is_empty(), "released at {frame} ms");
        }

        // Once repeats stop, the short window applies
        let last = next_repeat - 33;
        assert!(input.expire(at(last) + REPEAT_HOLD / 2).is_empty());
        assert_eq!(
            input.expire(at(last) + REPEAT_HOLD),
            vec![InputEvent::new(Key::Right, InputKind::Release)]
        );
    }

    #[test]
    fn test_repeat_kind_switches_to_short_window() {
        let mut input = TerminalInput::new(false);
        let start = Instant::now();
        input.track(InputEvent::new(Key::Left, InputKind::Repeat), start);
        assert_eq!(
            input.expire(start + REPEAT_HOLD),
            vec![InputEvent::new(Key::Left, InputKind::Release)]
        );
    }

    #[test]
    fn test_half_block_lines() {
        let mut fb = Framebuffer::new();
        fb.put(0, 0, true);
        fb.put(1, 1, true);
        fb.put(2, 0, true);
        fb.put(2, 1, true);

        let lines = half_block_lines(&fb);
        assert_eq!(lines.len(), HEIGHT / 2);
        assert_eq!(lines[0].chars().count(), WIDTH);
        assert!(lines[0].starts_with("▀▄█ "));
        assert!(lines[1].chars().all(|c| c == ' '));
    }

    #[test]
    fn test_sink_writes_frame() {
        let state = GameState::with_rng(SequenceRandom::new(vec![17, 90, 41]));
        let mut sink = TerminalSink::new(Vec::new(), true);
        sink.present(&state.snapshot()).unwrap();

        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert!(written.contains('█'));
    }
}
