//! crossterm key events to engine input commands.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use savanna_engine::{InputCommand, Key, TriggerState};

/// Translates a crossterm key event. Keys the game has no name for yield `None`.
pub fn input_command(event: &KeyEvent) -> Option<InputCommand> {
    let key = match event.code {
        KeyCode::Char(c) => Key::char(c),
        KeyCode::Esc => Key::Escape,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::F(n) if (1..=12).contains(&n) => Key::F(n),
        _ => return None,
    };
    let trigger = match event.kind {
        KeyEventKind::Press => TriggerState::Pressed,
        KeyEventKind::Repeat => TriggerState::Repeated,
        KeyEventKind::Release => TriggerState::Released,
    };
    Some(InputCommand::new(key, trigger))
}

/// Ctrl-C, which raw mode delivers as a key instead of a signal.
pub fn is_interrupt(event: &KeyEvent) -> bool {
    event.kind == KeyEventKind::Press
        && event.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(event.code, KeyCode::Char('c') | KeyCode::Char('C'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn event(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_translates_keys_and_triggers() {
        let cmd = input_command(&event(KeyCode::Char('Q'), KeyEventKind::Press));
        assert_eq!(cmd, Some(InputCommand::new(Key::Char('q'), TriggerState::Pressed)));

        let cmd = input_command(&event(KeyCode::Char('1'), KeyEventKind::Repeat));
        assert_eq!(cmd, Some(InputCommand::new(Key::Char('1'), TriggerState::Repeated)));

        let cmd = input_command(&event(KeyCode::Esc, KeyEventKind::Release));
        assert_eq!(cmd, Some(InputCommand::new(Key::Escape, TriggerState::Released)));

        let cmd = input_command(&event(KeyCode::F(1), KeyEventKind::Press));
        assert_eq!(cmd.map(|c| c.key), Some(Key::F(1)));

        let cmd = input_command(&event(KeyCode::Char(' '), KeyEventKind::Press));
        assert_eq!(cmd.map(|c| c.key), Some(Key::Space));
    }

    #[test]
    fn test_unnamed_keys_are_dropped() {
        assert_eq!(input_command(&event(KeyCode::Home, KeyEventKind::Press)), None);
        assert_eq!(input_command(&event(KeyCode::F(20), KeyEventKind::Press)), None);
    }

    #[test]
    fn test_ctrl_c_is_interrupt() {
        let mut ctrl_c = event(KeyCode::Char('c'), KeyEventKind::Press);
        ctrl_c.modifiers = KeyModifiers::CONTROL;
        assert!(is_interrupt(&ctrl_c));
        assert!(!is_interrupt(&event(KeyCode::Char('c'), KeyEventKind::Press)));
    }
}
