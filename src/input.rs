/// Keyboard state tracking.
///
/// Instead of acting on each key event individually, `InputState` records the
/// frame number of the last press/repeat event for every key.  Two classes of
/// terminal are handled:
///
/// * **Keyboard-enhancement capable** (kitty protocol): real `Press` /
///   `Repeat` / `Release` events.  A key stays held until its release.
/// * **Classic terminals**: only `Press` events, OS key-repeat shows up as
///   repeated presses.  Keys expire after `HOLD_WINDOW` frames of silence,
///   which is longer than the OS repeat interval.

use std::collections::HashMap;
use std::sync::mpsc::{Receiver, TryRecvError};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::compute::TickInput;

/// Frames (16 ms each) a key stays held after its last press/repeat event
/// when the terminal never reports releases.
pub const HOLD_WINDOW: u64 = 8;

/// Discrete actions produced by key-down edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Fire,
    Restart,
    Quit,
}

#[derive(Clone, Debug, Default)]
pub struct InputState {
    /// Key → frame it was last seen pressed or repeating.
    key_frame: HashMap<KeyCode, u64>,
    /// The terminal sends `Release` events, so held keys never expire.
    releases_reported: bool,
}

fn is_left(code: &KeyCode) -> bool {
    matches!(code, KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A'))
}

fn is_right(code: &KeyCode) -> bool {
    matches!(code, KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D'))
}

impl InputState {
    pub fn new(releases_reported: bool) -> Self {
        Self {
            key_frame: HashMap::new(),
            releases_reported,
        }
    }

    fn fresh(&self, last: u64, frame: u64) -> bool {
        self.releases_reported || frame.saturating_sub(last) <= HOLD_WINDOW
    }

    /// Whether `key` is down: pressed and not released, or on classic
    /// terminals seen within the last `HOLD_WINDOW` frames.
    pub fn is_held(&self, key: &KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(key)
            .map(|&last| self.fresh(last, frame))
            .unwrap_or(false)
    }

    /// Record a key event at `frame`.  Returns the action for a key-down edge,
    /// if any.  `game_over` suppresses fire and enables restart.
    pub fn handle(&mut self, event: KeyEvent, frame: u64, game_over: bool) -> Option<Action> {
        let KeyEvent {
            code,
            kind,
            modifiers,
            ..
        } = event;
        match kind {
            KeyEventKind::Press => {
                let edge = !self.is_held(&code, frame);
                self.key_frame.insert(code, frame);
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        Some(Action::Quit)
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') if game_over => Some(Action::Restart),
                    KeyCode::Char(' ') if edge && !game_over => Some(Action::Fire),
                    _ => None,
                }
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, frame);
                None
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
                None
            }
        }
    }

    /// Movement keys currently held, folded across their aliases.
    pub fn movement(&self, frame: u64) -> TickInput {
        let mut input = TickInput::default();
        for (code, &last) in &self.key_frame {
            if !self.fresh(last, frame) {
                continue;
            }
            input.left |= is_left(code);
            input.right |= is_right(code);
        }
        input
    }

    /// Forget every key, e.g. when a new game starts.
    pub fn clear(&mut self) {
        self.key_frame.clear();
    }
}

/// Pull every pending event off the reader channel without blocking.
/// `None` once the reader has gone away.
pub fn drain_events<T>(rx: &Receiver<T>) -> Option<Vec<T>> {
    let mut pending = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(ev) => pending.push(ev),
            Err(TryRecvError::Empty) => return Some(pending),
            Err(TryRecvError::Disconnected) => return None,
        }
    }
}
