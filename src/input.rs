use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Up,
    Down,
    Left,
    Right,
    ConfirmRestart,
    Quit,
}

impl InputEvent {
    pub fn direction(self) -> Option<Direction> {
        match self {
            InputEvent::Up => Some(Direction::Up),
            InputEvent::Down => Some(Direction::Down),
            InputEvent::Left => Some(Direction::Left),
            InputEvent::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Anything that yields the events that arrived since the last frame.
pub trait InputSource {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>>;
}

/// Keyboard input from the terminal.
pub struct TermInput;

impl InputSource for TermInput {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0)).context("polling terminal events")? {
            if let Event::Key(ev) = read().context("reading terminal event")? {
                events.extend(map_key(&ev));
            }
        }

        events.dedup();
        Ok(events)
    }
}

pub fn map_key(ev: &KeyEvent) -> Option<InputEvent> {
    if is_ctrl_c(ev) {
        return Some(InputEvent::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(InputEvent::Up),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(InputEvent::Left),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(InputEvent::Down),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(InputEvent::Right),
        KeyCode::Enter => Some(InputEvent::ConfirmRestart),
        KeyCode::Esc => Some(InputEvent::Quit),
        _ => None,
    }
}

/// Ctrl+C, also with shift or caps lock held.
fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.modifiers.contains(KeyModifiers::CONTROL) && matches!(ev.code, KeyCode::Char('c') | KeyCode::Char('C'))
}
