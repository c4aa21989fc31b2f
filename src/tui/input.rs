use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Represents the result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Leave the session (may ask about purging first)
    Quit,
    /// Keep the current item
    Keep,
    /// Move the current item to quarantine
    Delete,
    /// Undo the last decision
    Undo,
    /// Open the current item in the default player
    Play,
    /// Toggle help overlay
    Help,
    /// Purge the quarantine folder
    ConfirmPurge,
    /// Leave the quarantine folder in place
    CancelPurge,
    /// No action
    None,
}

/// Maps keyboard events to actions. Several keys map to the same action.
pub fn handle_key_event(key: KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => KeyAction::Quit,
            KeyCode::Char('z') => KeyAction::Undo,
            _ => KeyAction::None,
        };
    }

    if key.modifiers.contains(KeyModifiers::ALT) {
        return KeyAction::None;
    }

    match key.code {
        // Quit: q or Esc
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,

        // Keep: d or Right arrow
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => KeyAction::Keep,

        // Delete: a or Left arrow
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => KeyAction::Delete,

        // Undo: z, u or Backspace
        KeyCode::Char('z') | KeyCode::Char('Z') | KeyCode::Char('u') | KeyCode::Backspace => {
            KeyAction::Undo
        }

        KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::Play,

        KeyCode::Char('?') => KeyAction::Help,

        _ => KeyAction::None,
    }
}

/// Maps keyboard events while the help overlay is open.
///
/// Any key closes the overlay (`Help`); `Ctrl+C` still quits.
pub fn handle_help_input(key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        _ => KeyAction::Help,
    }
}

/// Maps keyboard events while the purge confirmation is open
pub fn handle_confirm_input(key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => KeyAction::ConfirmPurge,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => KeyAction::CancelPurge,
        _ => KeyAction::None,
    }
}
