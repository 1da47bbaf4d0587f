//! Key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Seconds added or removed by Shift+Up / Shift+Down.
pub const SMALL_STEP_SECS: i64 = 60;
/// Seconds added or removed by Shift+Right / Shift+Left.
pub const LARGE_STEP_SECS: i64 = 600;

/// What a key press asks the driver to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Toggle,
    Reset,
    Skip,
    EditConfig,
    /// Shift the active session by this many seconds.
    Adjust(i64),
    Quit,
}

/// Maps a key event to an action. Releases and repeats are ignored.
pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        KeyCode::Char('c') if ctrl => Some(Action::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ') => Some(Action::Toggle),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('s') => Some(Action::Skip),
        KeyCode::Char('c') => Some(Action::EditConfig),
        KeyCode::Up if shift => Some(Action::Adjust(SMALL_STEP_SECS)),
        KeyCode::Down if shift => Some(Action::Adjust(-SMALL_STEP_SECS)),
        KeyCode::Right if shift => Some(Action::Adjust(LARGE_STEP_SECS)),
        KeyCode::Left if shift => Some(Action::Adjust(-LARGE_STEP_SECS)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    mod binding_tests {
        use super::*;

        #[test]
        fn test_basic_bindings() {
            assert_eq!(action_for(press(KeyCode::Char(' '))), Some(Action::Toggle));
            assert_eq!(action_for(press(KeyCode::Char('r'))), Some(Action::Reset));
            assert_eq!(action_for(press(KeyCode::Char('s'))), Some(Action::Skip));
            assert_eq!(action_for(press(KeyCode::Char('c'))), Some(Action::EditConfig));
        }

        #[test]
        fn test_quit_bindings() {
            assert_eq!(action_for(press(KeyCode::Char('q'))), Some(Action::Quit));
            assert_eq!(action_for(press(KeyCode::Esc)), Some(Action::Quit));
            assert_eq!(
                action_for(with(KeyCode::Char('c'), KeyModifiers::CONTROL)),
                Some(Action::Quit)
            );
        }

        #[test]
        fn test_shift_arrows_adjust() {
            assert_eq!(
                action_for(with(KeyCode::Up, KeyModifiers::SHIFT)),
                Some(Action::Adjust(60))
            );
            assert_eq!(
                action_for(with(KeyCode::Down, KeyModifiers::SHIFT)),
                Some(Action::Adjust(-60))
            );
            assert_eq!(
                action_for(with(KeyCode::Right, KeyModifiers::SHIFT)),
                Some(Action::Adjust(600))
            );
            assert_eq!(
                action_for(with(KeyCode::Left, KeyModifiers::SHIFT)),
                Some(Action::Adjust(-600))
            );
        }

        #[test]
        fn test_plain_arrows_do_nothing() {
            assert_eq!(action_for(press(KeyCode::Up)), None);
            assert_eq!(action_for(press(KeyCode::Left)), None);
        }

        #[test]
        fn test_unbound_keys() {
            assert_eq!(action_for(press(KeyCode::Char('x'))), None);
            assert_eq!(action_for(press(KeyCode::Enter)), None);
        }
    }

    mod kind_tests {
        use super::*;

        #[test]
        fn test_release_is_ignored() {
            let key = KeyEvent::new_with_kind_and_state(
                KeyCode::Char(' '),
                KeyModifiers::NONE,
                KeyEventKind::Release,
                KeyEventState::NONE,
            );
            assert_eq!(action_for(key), None);
        }

        #[test]
        fn test_repeat_is_ignored() {
            let key = KeyEvent::new_with_kind(
                KeyCode::Char('s'),
                KeyModifiers::NONE,
                KeyEventKind::Repeat,
            );
            assert_eq!(action_for(key), None);
        }
    }
}
