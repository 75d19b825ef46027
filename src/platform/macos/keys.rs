use language_fixer_core::{Key, MOD_ALT, MOD_CMD, MOD_CTRL, MOD_SHIFT};
use rdev::Key as RKey;

/// Physical modifier keys, one bit per side.
const MODIFIERS: [(RKey, u32, u32); 8] = [
    (RKey::MetaLeft, 1 << 0, MOD_CMD),
    (RKey::MetaRight, 1 << 1, MOD_CMD),
    (RKey::ControlLeft, 1 << 2, MOD_CTRL),
    (RKey::ControlRight, 1 << 3, MOD_CTRL),
    (RKey::Alt, 1 << 4, MOD_ALT),
    (RKey::AltGr, 1 << 5, MOD_ALT),
    (RKey::ShiftLeft, 1 << 6, MOD_SHIFT),
    (RKey::ShiftRight, 1 << 7, MOD_SHIFT),
];

fn modifier_bit(key: RKey) -> Option<u32> {
    MODIFIERS
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, bit, _)| *bit)
}

#[derive(Debug, Default, Clone, Copy)]
pub(super) struct ModState {
    down: u32,
}

impl ModState {
    /// Returns `true` if `key` is a modifier.
    pub(super) fn press(&mut self, key: RKey) -> bool {
        modifier_bit(key).map(|bit| self.down |= bit).is_some()
    }

    pub(super) fn release(&mut self, key: RKey) -> bool {
        modifier_bit(key).map(|bit| self.down &= !bit).is_some()
    }

    /// Held modifiers as `MOD_*` flags.
    pub(super) fn mask(self) -> u32 {
        MODIFIERS
            .iter()
            .filter(|(_, bit, _)| self.down & bit != 0)
            .fold(0, |acc, (_, _, m)| acc | m)
    }
}

/// First printable character of the text the OS produced for a key press.
pub(super) fn typed_char(name: Option<&str>) -> Option<char> {
    name?.chars().next().filter(|ch| !ch.is_control())
}

/// Maps a physical key to the key used for hotkey matching.
///
/// Letter keys report their US-QWERTY letter, so `cmd+alt+h` matches the same
/// physical key whatever layout is active.
pub(super) fn to_key(key: RKey) -> Option<Key> {
    let key = match key {
        RKey::KeyA => Key::Char('a'),
        RKey::KeyB => Key::Char('b'),
        RKey::KeyC => Key::Char('c'),
        RKey::KeyD => Key::Char('d'),
        RKey::KeyE => Key::Char('e'),
        RKey::KeyF => Key::Char('f'),
        RKey::KeyG => Key::Char('g'),
        RKey::KeyH => Key::Char('h'),
        RKey::KeyI => Key::Char('i'),
        RKey::KeyJ => Key::Char('j'),
        RKey::KeyK => Key::Char('k'),
        RKey::KeyL => Key::Char('l'),
        RKey::KeyM => Key::Char('m'),
        RKey::KeyN => Key::Char('n'),
        RKey::KeyO => Key::Char('o'),
        RKey::KeyP => Key::Char('p'),
        RKey::KeyQ => Key::Char('q'),
        RKey::KeyR => Key::Char('r'),
        RKey::KeyS => Key::Char('s'),
        RKey::KeyT => Key::Char('t'),
        RKey::KeyU => Key::Char('u'),
        RKey::KeyV => Key::Char('v'),
        RKey::KeyW => Key::Char('w'),
        RKey::KeyX => Key::Char('x'),
        RKey::KeyY => Key::Char('y'),
        RKey::KeyZ => Key::Char('z'),
        RKey::Num0 => Key::Char('0'),
        RKey::Num1 => Key::Char('1'),
        RKey::Num2 => Key::Char('2'),
        RKey::Num3 => Key::Char('3'),
        RKey::Num4 => Key::Char('4'),
        RKey::Num5 => Key::Char('5'),
        RKey::Num6 => Key::Char('6'),
        RKey::Num7 => Key::Char('7'),
        RKey::Num8 => Key::Char('8'),
        RKey::Num9 => Key::Char('9'),
        RKey::Minus => Key::Char('-'),
        RKey::Equal => Key::Char('='),
        RKey::LeftBracket => Key::Char('['),
        RKey::RightBracket => Key::Char(']'),
        RKey::SemiColon => Key::Char(';'),
        RKey::Quote => Key::Char('\''),
        RKey::BackSlash | RKey::IntlBackslash => Key::Char('\\'),
        RKey::Comma => Key::Char(','),
        RKey::Dot => Key::Char('.'),
        RKey::Slash => Key::Char('/'),
        RKey::BackQuote => Key::Char('`'),
        RKey::Space => Key::Space,
        RKey::Return => Key::Return,
        RKey::Tab => Key::Tab,
        RKey::Escape => Key::Escape,
        RKey::Backspace => Key::Backspace,
        RKey::LeftArrow => Key::Left,
        RKey::RightArrow => Key::Right,
        RKey::UpArrow => Key::Up,
        RKey::DownArrow => Key::Down,
        RKey::F1 => Key::F(1),
        RKey::F2 => Key::F(2),
        RKey::F3 => Key::F(3),
        RKey::F4 => Key::F(4),
        RKey::F5 => Key::F(5),
        RKey::F6 => Key::F(6),
        RKey::F7 => Key::F(7),
        RKey::F8 => Key::F(8),
        RKey::F9 => Key::F(9),
        RKey::F10 => Key::F(10),
        RKey::F11 => Key::F(11),
        RKey::F12 => Key::F(12),
        RKey::Unknown(code) => return unnamed_key(code),
        _ => return None,
    };
    Some(key)
}

// Virtual keycodes (`kVK_*`) that rdev reports as `Key::Unknown` on macOS.
const VK_KEYPAD_ENTER: u32 = 0x4C;
const VK_HOME: u32 = 0x73;
const VK_PAGE_UP: u32 = 0x74;
const VK_FORWARD_DELETE: u32 = 0x75;
const VK_END: u32 = 0x77;
const VK_PAGE_DOWN: u32 = 0x79;

/// Keypad keys and the characters they type.
const KEYPAD: [(u32, char); 16] = [
    (0x52, '0'),
    (0x53, '1'),
    (0x54, '2'),
    (0x55, '3'),
    (0x56, '4'),
    (0x57, '5'),
    (0x58, '6'),
    (0x59, '7'),
    (0x5B, '8'),
    (0x5C, '9'),
    (0x41, '.'),
    (0x43, '*'),
    (0x45, '+'),
    (0x4B, '/'),
    (0x4E, '-'),
    (0x51, '='),
];

fn unnamed_key(code: u32) -> Option<Key> {
    let key = match code {
        VK_KEYPAD_ENTER => Key::Return,
        VK_HOME => Key::Home,
        VK_END => Key::End,
        VK_PAGE_UP => Key::PageUp,
        VK_PAGE_DOWN => Key::PageDown,
        VK_FORWARD_DELETE => Key::Delete,
        _ => return keypad_char(code).map(Key::Char),
    };
    Some(key)
}

fn keypad_char(code: u32) -> Option<char> {
    KEYPAD
        .iter()
        .find(|(vk, _)| *vk == code)
        .map(|(_, ch)| *ch)
}

/// Text typed by a press: what the OS reported, or the keypad character when
/// the OS reported nothing.
pub(super) fn press_text(key: RKey, name: Option<&str>) -> Option<char> {
    typed_char(name).or_else(|| match key {
        RKey::Unknown(code) => keypad_char(code),
        _ => None,
    })
}

/// Keys that change neither the text nor the caret.
pub(super) fn is_inert(key: RKey) -> bool {
    matches!(key, RKey::CapsLock | RKey::Function)
}

#[cfg(test)]
mod tests {
    use language_fixer_core::KeyEvent;

    use super::*;

    #[test]
    fn modifier_sides_merge_into_one_flag() {
        let mut mods = ModState::default();
        assert!(mods.press(RKey::MetaLeft));
        assert!(mods.press(RKey::MetaRight));
        assert!(mods.release(RKey::MetaLeft));
        assert_eq!(mods.mask(), MOD_CMD);

        assert!(mods.release(RKey::MetaRight));
        assert_eq!(mods.mask(), 0);
    }

    #[test]
    fn letters_are_not_modifiers() {
        let mut mods = ModState::default();
        assert!(!mods.press(RKey::KeyA));
        assert_eq!(mods.mask(), 0);
    }

    #[test]
    fn typed_char_skips_control_text() {
        assert_eq!(typed_char(Some("ש")), Some('ש'));
        assert_eq!(typed_char(Some("\r")), None);
        assert_eq!(typed_char(Some("")), None);
        assert_eq!(typed_char(None), None);
    }

    #[test]
    fn keys_map_to_us_positions() {
        assert_eq!(to_key(RKey::KeyH), Some(Key::Char('h')));
        assert_eq!(to_key(RKey::SemiColon), Some(Key::Char(';')));
        assert_eq!(to_key(RKey::F12), Some(Key::F(12)));
        assert_eq!(to_key(RKey::CapsLock), None);
    }

    #[test]
    fn unnamed_navigation_keys_map_by_keycode() {
        assert_eq!(to_key(RKey::Unknown(115)), Some(Key::Home));
        assert_eq!(to_key(RKey::Unknown(119)), Some(Key::End));
        assert_eq!(to_key(RKey::Unknown(116)), Some(Key::PageUp));
        assert_eq!(to_key(RKey::Unknown(121)), Some(Key::PageDown));
        assert_eq!(to_key(RKey::Unknown(117)), Some(Key::Delete));
        assert_eq!(to_key(RKey::Unknown(76)), Some(Key::Return));
        assert_eq!(to_key(RKey::Unknown(999)), None);
    }

    #[test]
    fn keypad_digits_type_even_without_name() {
        assert_eq!(to_key(RKey::Unknown(83)), Some(Key::Char('1')));
        assert_eq!(to_key(RKey::Unknown(92)), Some(Key::Char('9')));
        assert_eq!(press_text(RKey::Unknown(83), None), Some('1'));
        assert_eq!(press_text(RKey::Unknown(83), Some("1")), Some('1'));
        assert_eq!(press_text(RKey::Unknown(115), None), None);
        assert_eq!(press_text(RKey::KeyA, None), None);
    }

    #[test]
    fn keypad_press_enters_the_buffer() {
        let key = to_key(RKey::Unknown(83)).unwrap();
        let text = press_text(RKey::Unknown(83), None);
        assert_eq!(
            KeyEvent::from_press(key, 0, text),
            Some(KeyEvent::Typed('1'))
        );
    }

    #[test]
    fn lock_and_fn_keys_are_inert() {
        assert!(is_inert(RKey::CapsLock));
        assert!(is_inert(RKey::Function));
        assert!(!is_inert(RKey::Unknown(115)));
    }
}
