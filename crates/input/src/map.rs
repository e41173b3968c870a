//! Key mapping from terminal events to game signals.

use crate::types::Signal;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key to the signal it drives.
pub fn map_key(code: KeyCode) -> Option<Signal> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Signal::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Signal::MoveRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Signal::SoftDrop),
        KeyCode::Up
        | KeyCode::Char(' ')
        | KeyCode::Char('r')
        | KeyCode::Char('R')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(Signal::Rotate),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(map_key(KeyCode::Left), Some(Signal::MoveLeft));
        assert_eq!(map_key(KeyCode::Right), Some(Signal::MoveRight));
        assert_eq!(map_key(KeyCode::Down), Some(Signal::SoftDrop));

        assert_eq!(map_key(KeyCode::Char('A')), Some(Signal::MoveLeft));
        assert_eq!(map_key(KeyCode::Char('d')), Some(Signal::MoveRight));
        assert_eq!(map_key(KeyCode::Char('S')), Some(Signal::SoftDrop));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(map_key(KeyCode::Up), Some(Signal::Rotate));
        assert_eq!(map_key(KeyCode::Char('r')), Some(Signal::Rotate));
        assert_eq!(map_key(KeyCode::Char('W')), Some(Signal::Rotate));
        assert_eq!(map_key(KeyCode::Char(' ')), Some(Signal::Rotate));
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(map_key(KeyCode::Char('x')), None);
        assert_eq!(map_key(KeyCode::Enter), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
