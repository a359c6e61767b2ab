//! Maps crossterm key events to chat view actions.

use crossterm::event::{ KeyCode, KeyEvent, KeyEventKind, KeyModifiers };

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Submit,
    InsertNewline,
    InsertChar(char),
    DeleteChar,
    DeleteForward,
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorHome,
    MoveCursorEnd,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Exit,
    None,
}

pub fn map_key_event(event: &KeyEvent) -> InputAction {
    if event.kind == KeyEventKind::Release {
        return InputAction::None;
    }

    match (event.code, event.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => InputAction::Exit,
        (KeyCode::Esc, _) => InputAction::Exit,

        // Shift+Enter needs keyboard enhancement; Alt+Enter and Ctrl+J work everywhere.
        (KeyCode::Enter, m) if m.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) => {
            InputAction::InsertNewline
        }
        (KeyCode::Char('j'), KeyModifiers::CONTROL) => InputAction::InsertNewline,
        (KeyCode::Enter, _) => InputAction::Submit,

        (KeyCode::Up, KeyModifiers::NONE) => InputAction::ScrollUp,
        (KeyCode::Down, KeyModifiers::NONE) => InputAction::ScrollDown,
        (KeyCode::PageUp, _) => InputAction::PageUp,
        (KeyCode::PageDown, _) => InputAction::PageDown,
        (KeyCode::Left, _) => InputAction::MoveCursorLeft,
        (KeyCode::Right, _) => InputAction::MoveCursorRight,
        (KeyCode::Home, _) => InputAction::MoveCursorHome,
        (KeyCode::End, _) => InputAction::MoveCursorEnd,

        (KeyCode::Backspace, _) => InputAction::DeleteChar,
        (KeyCode::Delete, _) => InputAction::DeleteForward,
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => InputAction::InsertChar(c),

        _ => InputAction::None,
    }
}
