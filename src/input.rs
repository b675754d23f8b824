//! Keyboard and mouse bindings for exhibit navigation.

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// What a raw input event means to the exhibit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NavCommand {
    /// Next page.
    Advance,
    /// Previous page (clamped at the first).
    Retreat,
    /// Step back through the session history.
    HistoryBack,
    /// Step forward through the session history.
    HistoryForward,
    Quit,
}

/// Keyboard mapping. Alt turns the arrow keys into history navigation,
/// matching the usual browser shortcuts.
pub fn command_for_key(code: KeyCode, alt_held: bool) -> Option<NavCommand> {
    match (code, alt_held) {
        (KeyCode::ArrowLeft, true) => Some(NavCommand::HistoryBack),
        (KeyCode::ArrowRight, true) => Some(NavCommand::HistoryForward),
        (KeyCode::ArrowRight | KeyCode::Space | KeyCode::Enter, false) => {
            Some(NavCommand::Advance)
        }
        (KeyCode::ArrowLeft, false) => Some(NavCommand::Retreat),
        (KeyCode::Escape, _) => Some(NavCommand::Quit),
        _ => None,
    }
}

/// Mouse side buttons map to history, like a browser.
pub fn command_for_mouse(button: MouseButton) -> Option<NavCommand> {
    match button {
        MouseButton::Back => Some(NavCommand::HistoryBack),
        MouseButton::Forward => Some(NavCommand::HistoryForward),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_page_without_alt() {
        assert_eq!(
            command_for_key(KeyCode::ArrowRight, false),
            Some(NavCommand::Advance)
        );
        assert_eq!(
            command_for_key(KeyCode::ArrowLeft, false),
            Some(NavCommand::Retreat)
        );
    }

    #[test]
    fn test_alt_arrows_walk_history() {
        assert_eq!(
            command_for_key(KeyCode::ArrowLeft, true),
            Some(NavCommand::HistoryBack)
        );
        assert_eq!(
            command_for_key(KeyCode::ArrowRight, true),
            Some(NavCommand::HistoryForward)
        );
    }

    #[test]
    fn test_space_and_enter_advance() {
        assert_eq!(
            command_for_key(KeyCode::Space, false),
            Some(NavCommand::Advance)
        );
        assert_eq!(
            command_for_key(KeyCode::Enter, false),
            Some(NavCommand::Advance)
        );
        // With Alt held they do nothing, rather than advancing.
        assert_eq!(command_for_key(KeyCode::Space, true), None);
    }

    #[test]
    fn test_escape_always_quits() {
        assert_eq!(command_for_key(KeyCode::Escape, false), Some(NavCommand::Quit));
        assert_eq!(command_for_key(KeyCode::Escape, true), Some(NavCommand::Quit));
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        assert_eq!(command_for_key(KeyCode::KeyW, false), None);
        assert_eq!(command_for_key(KeyCode::Tab, false), None);
    }

    #[test]
    fn test_mouse_side_buttons() {
        assert_eq!(
            command_for_mouse(MouseButton::Back),
            Some(NavCommand::HistoryBack)
        );
        assert_eq!(
            command_for_mouse(MouseButton::Forward),
            Some(NavCommand::HistoryForward)
        );
        assert_eq!(command_for_mouse(MouseButton::Left), None);
    }
}
