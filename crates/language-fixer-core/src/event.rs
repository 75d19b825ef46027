use crate::hotkey::{Hotkey, Key, MOD_ALT, MOD_CMD, MOD_CTRL, MOD_SHORTCUT};

/// Why every keystroke buffer was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Return,
    Tab,
    Escape,
    /// Arrows, Home/End, PageUp/PageDown, forward Delete.
    Navigation,
    /// A command/control shortcut that matched no hotkey (paste, undo, app switch).
    Shortcut,
    /// Mouse click. Focus changes go through here or through `Shortcut`
    /// (cmd+tab), so there is no separate focus event.
    Pointer,
}

/// One event from the OS key stream, already classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// A printable character was typed.
    Typed(char),
    Backspace,
    Boundary(Boundary),
    /// A key pressed while Command, Control or Option is held, or a function
    /// key. `text` is what the press would type, if anything.
    Chord { hotkey: Hotkey, text: Option<char> },
}

impl KeyEvent {
    /// Classifies a raw key press.
    ///
    /// `text` is the character the active layout produced for the press.
    /// Returns `None` for presses that neither type nor invalidate anything.
    pub fn from_press(key: Key, mods: u32, text: Option<char>) -> Option<Self> {
        let text = text.filter(|ch| !ch.is_control());

        if mods & (MOD_CMD | MOD_CTRL | MOD_ALT) != 0 || matches!(key, Key::F(_)) {
            return Some(Self::Chord {
                hotkey: Hotkey::new(mods, key),
                text,
            });
        }

        match key {
            Key::Return => Some(Self::Boundary(Boundary::Return)),
            Key::Tab => Some(Self::Boundary(Boundary::Tab)),
            Key::Escape => Some(Self::Boundary(Boundary::Escape)),
            Key::Backspace => Some(Self::Backspace),
            k if k.is_navigation() => Some(Self::Boundary(Boundary::Navigation)),
            Key::Space => Some(Self::Typed(text.unwrap_or(' '))),
            _ => text.map(Self::Typed),
        }
    }

    /// Classifies a press of a key the listener has no name for.
    ///
    /// Keys that type something still count as typed; everything else is
    /// treated as caret movement, since the screen may have changed in a way
    /// the buffer can not follow.
    pub fn from_unmapped(mods: u32, text: Option<char>) -> Self {
        if mods & MOD_SHORTCUT != 0 {
            return Self::Boundary(Boundary::Shortcut);
        }
        match text.filter(|ch| !ch.is_control()) {
            Some(ch) => Self::Typed(ch),
            None => Self::Boundary(Boundary::Navigation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hotkey::MOD_SHIFT;

    #[test]
    fn plain_and_shifted_letters_are_typed() {
        assert_eq!(
            KeyEvent::from_press(Key::Char('h'), 0, Some('י')),
            Some(KeyEvent::Typed('י'))
        );
        assert_eq!(
            KeyEvent::from_press(Key::Char('h'), MOD_SHIFT, Some('H')),
            Some(KeyEvent::Typed('H'))
        );
    }

    #[test]
    fn space_is_typed_even_without_text() {
        assert_eq!(
            KeyEvent::from_press(Key::Space, 0, None),
            Some(KeyEvent::Typed(' '))
        );
    }

    #[test]
    fn editing_keys_are_boundaries() {
        assert_eq!(
            KeyEvent::from_press(Key::Return, 0, Some('\r')),
            Some(KeyEvent::Boundary(Boundary::Return))
        );
        assert_eq!(
            KeyEvent::from_press(Key::Left, MOD_SHIFT, None),
            Some(KeyEvent::Boundary(Boundary::Navigation))
        );
        assert_eq!(
            KeyEvent::from_press(Key::Backspace, 0, Some('\u{8}')),
            Some(KeyEvent::Backspace)
        );
    }

    #[test]
    fn modified_presses_become_chords() {
        let ev = KeyEvent::from_press(Key::Char('h'), MOD_CMD | MOD_ALT, Some('˙'));
        assert_eq!(
            ev,
            Some(KeyEvent::Chord {
                hotkey: Hotkey::new(MOD_CMD | MOD_ALT, Key::Char('h')),
                text: Some('˙'),
            })
        );
    }

    #[test]
    fn unnamed_keys_type_their_text_or_break_the_buffer() {
        assert_eq!(KeyEvent::from_unmapped(0, Some('1')), KeyEvent::Typed('1'));
        assert_eq!(
            KeyEvent::from_unmapped(MOD_ALT, Some('¡')),
            KeyEvent::Typed('¡')
        );
        assert_eq!(
            KeyEvent::from_unmapped(0, None),
            KeyEvent::Boundary(Boundary::Navigation)
        );
        assert_eq!(
            KeyEvent::from_unmapped(0, Some('\r')),
            KeyEvent::Boundary(Boundary::Navigation)
        );
        assert_eq!(
            KeyEvent::from_unmapped(MOD_CMD, Some('1')),
            KeyEvent::Boundary(Boundary::Shortcut)
        );
    }

    #[test]
    fn keys_without_text_are_ignored() {
        assert_eq!(KeyEvent::from_press(Key::Char('a'), 0, None), None);
    }
}
