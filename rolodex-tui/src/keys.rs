//! Keybinding definitions for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rolodex_core::ContactField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    PrevPage,
    NextPage,
    CyclePageSize,
    SortBy(ContactField),
    FocusForm,
    FocusTable,
    EditItem,
    DeleteItem,
    Refresh,
    Input(char),
    Backspace,
    NextField,
    PrevField,
    Confirm,
    Cancel,
}

/// Which key table applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Moving around the table.
    Navigate,
    /// Typing into a form.
    Editing,
    /// The delete confirmation is open.
    Confirming,
}

pub fn map_key(event: KeyEvent, mode: InputMode) -> Option<Action> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Refresh),
            _ => None,
        };
    }

    match mode {
        InputMode::Confirming => match code {
            KeyCode::Enter | KeyCode::Char('y') => Some(Action::Confirm),
            KeyCode::Esc | KeyCode::Char('n') => Some(Action::Cancel),
            _ => None,
        },
        InputMode::Editing => match code {
            KeyCode::Enter => Some(Action::Confirm),
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Tab | KeyCode::Down => Some(Action::NextField),
            KeyCode::BackTab | KeyCode::Up => Some(Action::PrevField),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
        InputMode::Navigate => match code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('a') | KeyCode::Tab => Some(Action::FocusForm),
            KeyCode::Esc => Some(Action::FocusTable),
            KeyCode::Char('e') | KeyCode::Enter => Some(Action::EditItem),
            KeyCode::Char('d') | KeyCode::Delete => Some(Action::DeleteItem),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('p') => Some(Action::CyclePageSize),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
            KeyCode::Left | KeyCode::Char('h') => Some(Action::PrevPage),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::NextPage),
            KeyCode::Char(c @ '1'..='6') => {
                let index = c as usize - '1' as usize;
                Some(Action::SortBy(ContactField::ALL[index]))
            }
            _ => None,
        },
    }
}
