//! Event types for the TUI event loop.

use crossterm::event::KeyEvent;

use crate::commands::Outcome;

#[derive(Debug)]
pub enum TuiEvent {
    Input(KeyEvent),
    Resize { width: u16, height: u16 },
    /// A spawned request finished.
    Completed(Box<Outcome>),
}
