use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::screen::GamePhase;

/// Ticks a key stays held after its first press when the terminal never
/// reports releases. Covers the keyboard's delay before auto-repeat starts.
pub const PRESS_HOLD_TICKS: u8 = 30;

/// Ticks an auto-repeat keeps the key held
pub const REPEAT_HOLD_TICKS: u8 = 6;

/// Logical keys the game reads every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
    Space,
}

impl Key {
    pub const ALL: [Key; 9] = [
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::W,
        Key::A,
        Key::S,
        Key::D,
        Key::Space,
    ];

    pub fn from_key_code(code: KeyCode) -> Option<Key> {
        match code {
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            KeyCode::Left => Some(Key::Left),
            KeyCode::Right => Some(Key::Right),
            KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::W),
            KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::A),
            KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::S),
            KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::D),
            KeyCode::Char(' ') => Some(Key::Space),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Pressed/released map over the logical keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pressed: [bool; 9],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.pressed[key.index()] = true;
    }

    pub fn release(&mut self, key: Key) {
        self.pressed[key.index()] = false;
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed[key.index()]
    }

    pub fn release_all(&mut self) {
        self.pressed = [false; 9];
    }

    pub fn up(&self) -> bool {
        self.is_pressed(Key::Up) || self.is_pressed(Key::W)
    }

    pub fn down(&self) -> bool {
        self.is_pressed(Key::Down) || self.is_pressed(Key::S)
    }

    pub fn left(&self) -> bool {
        self.is_pressed(Key::Left) || self.is_pressed(Key::A)
    }

    pub fn right(&self) -> bool {
        self.is_pressed(Key::Right) || self.is_pressed(Key::D)
    }

    pub fn fire(&self) -> bool {
        self.is_pressed(Key::Space)
    }
}

/// Lifecycle requests raised by key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    StartGame,
    ShowMenu,
    Quit,
}

/// Drains terminal events into [`InputState`] and lifecycle actions
pub struct InputManager {
    state: InputState,
    /// Whether the terminal reports key releases (keyboard enhancement)
    release_events: bool,
    /// Remaining hold ticks per key when releases are not reported
    hold: [u8; 9],
}

impl InputManager {
    pub fn new(release_events: bool) -> Self {
        Self {
            state: InputState::new(),
            release_events,
            hold: [0; 9],
        }
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Polls all pending terminal events without blocking.
    pub fn poll_events(&mut self, phase: GamePhase) -> color_eyre::Result<Vec<InputAction>> {
        let mut actions = Vec::new();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                if let Some(action) = self.handle_key_event(key_event, phase) {
                    actions.push(action);
                }
            }
        }
        Ok(actions)
    }

    /// Applies one key event; returns a lifecycle action if the key maps to one.
    pub fn handle_key_event(&mut self, key_event: KeyEvent, phase: GamePhase) -> Option<InputAction> {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, phase),
            KeyEventKind::Repeat => {
                self.hold_key(key_event.code, REPEAT_HOLD_TICKS);
                None
            }
            KeyEventKind::Release => {
                if let Some(key) = Key::from_key_code(key_event.code) {
                    self.state.release(key);
                    self.hold[key.index()] = 0;
                }
                None
            }
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, phase: GamePhase) -> Option<InputAction> {
        if matches!(key_event.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
            || (matches!(key_event.code, KeyCode::Char('c') | KeyCode::Char('C'))
                && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            return Some(InputAction::Quit);
        }

        match (phase, key_event.code) {
            (
                GamePhase::Idle | GamePhase::GameOver,
                KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R'),
            ) => return Some(InputAction::StartGame),
            (GamePhase::Running | GamePhase::GameOver, KeyCode::Char('m') | KeyCode::Char('M')) => {
                return Some(InputAction::ShowMenu);
            }
            _ => {}
        }

        self.hold_key(key_event.code, PRESS_HOLD_TICKS);
        None
    }

    fn hold_key(&mut self, code: KeyCode, ticks: u8) {
        if let Some(key) = Key::from_key_code(code) {
            self.state.press(key);
            if !self.release_events {
                self.hold[key.index()] = ticks;
            }
        }
    }

    /// Ages held keys after a tick has consumed the input state.
    pub fn end_tick(&mut self) {
        if self.release_events {
            return;
        }
        for key in Key::ALL {
            let remaining = &mut self.hold[key.index()];
            if *remaining > 0 {
                *remaining -= 1;
                if *remaining == 0 {
                    self.state.release(key);
                }
            }
        }
    }

    /// Forgets every held key, e.g. when a new game begins.
    pub fn reset(&mut self) {
        self.state.release_all();
        self.hold = [0; 9];
    }
}
