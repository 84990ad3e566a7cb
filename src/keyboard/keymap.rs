//! Key identity and US-layout mapping from the event source

use device_query::Keycode;
use std::fmt;

/// Non-printable keys the event source can name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Backspace,
    Delete,
    Enter,
    Tab,
    Space,
    Up,
    Down,
    Left,
    Right,
    Alt,
    AltLeft,
    AltRight,
    Ctrl,
    CtrlLeft,
    CtrlRight,
    Shift,
    ShiftLeft,
    ShiftRight,
    Meta,
    MetaLeft,
    MetaRight,
    Escape,
    CapsLock,
    /// Function row key, F1 = 1
    F(u8),
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    /// A key the source reports but cannot name
    Unidentified,
}

impl NamedKey {
    pub fn name(&self) -> String {
        match self {
            Self::Backspace => "Backspace".into(),
            Self::Delete => "Delete".into(),
            Self::Enter => "Enter".into(),
            Self::Tab => "Tab".into(),
            Self::Space => "Space".into(),
            Self::Up => "Up".into(),
            Self::Down => "Down".into(),
            Self::Left => "Left".into(),
            Self::Right => "Right".into(),
            Self::Alt => "Alt".into(),
            Self::AltLeft => "LeftAlt".into(),
            Self::AltRight => "RightAlt".into(),
            Self::Ctrl => "Ctrl".into(),
            Self::CtrlLeft => "LeftCtrl".into(),
            Self::CtrlRight => "RightCtrl".into(),
            Self::Shift => "Shift".into(),
            Self::ShiftLeft => "LeftShift".into(),
            Self::ShiftRight => "RightShift".into(),
            Self::Meta => "Meta".into(),
            Self::MetaLeft => "LeftMeta".into(),
            Self::MetaRight => "RightMeta".into(),
            Self::Escape => "Escape".into(),
            Self::CapsLock => "CapsLock".into(),
            Self::F(n) => format!("F{}", n),
            Self::Home => "Home".into(),
            Self::End => "End".into(),
            Self::PageUp => "PageUp".into(),
            Self::PageDown => "PageDown".into(),
            Self::Insert => "Insert".into(),
            Self::Unidentified => "Unknown".into(),
        }
    }

    /// Alt, Ctrl, Shift or Meta on either side
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            Self::Alt
                | Self::AltLeft
                | Self::AltRight
                | Self::Ctrl
                | Self::CtrlLeft
                | Self::CtrlRight
                | Self::Shift
                | Self::ShiftLeft
                | Self::ShiftRight
                | Self::Meta
                | Self::MetaLeft
                | Self::MetaRight
        )
    }

    pub fn is_arrow(&self) -> bool {
        matches!(self, Self::Up | Self::Down | Self::Left | Self::Right)
    }
}

/// Opaque identity of a key as delivered with an event.
///
/// Printable keys carry the character produced under the shift state at press
/// time, so `Char('a')` and `Char('A')` are different identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyId {
    Char(char),
    Named(NamedKey),
}

impl From<char> for KeyId {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl From<NamedKey> for KeyId {
    fn from(key: NamedKey) -> Self {
        Self::Named(key)
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "'{}'", c),
            Self::Named(key) => write!(f, "{}", key.name()),
        }
    }
}

/// Whether a source keycode is one of the shift keys
pub fn is_shift(keycode: &Keycode) -> bool {
    matches!(keycode, Keycode::LShift | Keycode::RShift)
}

/// Resolve a source keycode to a key identity under the given shift state
pub fn key_id_for(keycode: Keycode, shifted: bool) -> KeyId {
    use Keycode as DK;

    // (unshifted, shifted) pairs on a US layout
    let printable = |plain: char, upper: char| {
        KeyId::Char(if shifted { upper } else { plain })
    };

    match keycode {
        DK::A => printable('a', 'A'),
        DK::B => printable('b', 'B'),
        DK::C => printable('c', 'C'),
        DK::D => printable('d', 'D'),
        DK::E => printable('e', 'E'),
        DK::F => printable('f', 'F'),
        DK::G => printable('g', 'G'),
        DK::H => printable('h', 'H'),
        DK::I => printable('i', 'I'),
        DK::J => printable('j', 'J'),
        DK::K => printable('k', 'K'),
        DK::L => printable('l', 'L'),
        DK::M => printable('m', 'M'),
        DK::N => printable('n', 'N'),
        DK::O => printable('o', 'O'),
        DK::P => printable('p', 'P'),
        DK::Q => printable('q', 'Q'),
        DK::R => printable('r', 'R'),
        DK::S => printable('s', 'S'),
        DK::T => printable('t', 'T'),
        DK::U => printable('u', 'U'),
        DK::V => printable('v', 'V'),
        DK::W => printable('w', 'W'),
        DK::X => printable('x', 'X'),
        DK::Y => printable('y', 'Y'),
        DK::Z => printable('z', 'Z'),

        DK::Key1 => printable('1', '!'),
        DK::Key2 => printable('2', '@'),
        DK::Key3 => printable('3', '#'),
        DK::Key4 => printable('4', '$'),
        DK::Key5 => printable('5', '%'),
        DK::Key6 => printable('6', '^'),
        DK::Key7 => printable('7', '&'),
        DK::Key8 => printable('8', '*'),
        DK::Key9 => printable('9', '('),
        DK::Key0 => printable('0', ')'),
        DK::Minus => printable('-', '_'),
        DK::Equal => printable('=', '+'),
        DK::LeftBracket => printable('[', '{'),
        DK::RightBracket => printable(']', '}'),
        DK::BackSlash => printable('\\', '|'),
        DK::Semicolon => printable(';', ':'),
        DK::Apostrophe => printable('\'', '"'),
        DK::Grave => printable('`', '~'),
        DK::Comma => printable(',', '<'),
        DK::Dot => printable('.', '>'),
        DK::Slash => printable('/', '?'),

        // Numpad ignores shift
        DK::Numpad0 => KeyId::Char('0'),
        DK::Numpad1 => KeyId::Char('1'),
        DK::Numpad2 => KeyId::Char('2'),
        DK::Numpad3 => KeyId::Char('3'),
        DK::Numpad4 => KeyId::Char('4'),
        DK::Numpad5 => KeyId::Char('5'),
        DK::Numpad6 => KeyId::Char('6'),
        DK::Numpad7 => KeyId::Char('7'),
        DK::Numpad8 => KeyId::Char('8'),
        DK::Numpad9 => KeyId::Char('9'),
        DK::NumpadSubtract => KeyId::Char('-'),
        DK::NumpadAdd => KeyId::Char('+'),
        DK::NumpadDivide => KeyId::Char('/'),
        DK::NumpadMultiply => KeyId::Char('*'),

        DK::Backspace => NamedKey::Backspace.into(),
        DK::Delete => NamedKey::Delete.into(),
        DK::Enter => NamedKey::Enter.into(),
        DK::Tab => NamedKey::Tab.into(),
        DK::Space => NamedKey::Space.into(),
        DK::Up => NamedKey::Up.into(),
        DK::Down => NamedKey::Down.into(),
        DK::Left => NamedKey::Left.into(),
        DK::Right => NamedKey::Right.into(),
        DK::LAlt => NamedKey::AltLeft.into(),
        DK::RAlt => NamedKey::AltRight.into(),
        DK::LControl => NamedKey::CtrlLeft.into(),
        DK::RControl => NamedKey::CtrlRight.into(),
        DK::LShift => NamedKey::ShiftLeft.into(),
        DK::RShift => NamedKey::ShiftRight.into(),
        DK::LMeta => NamedKey::MetaLeft.into(),
        DK::RMeta => NamedKey::MetaRight.into(),
        DK::Escape => NamedKey::Escape.into(),
        DK::CapsLock => NamedKey::CapsLock.into(),
        DK::F1 => NamedKey::F(1).into(),
        DK::F2 => NamedKey::F(2).into(),
        DK::F3 => NamedKey::F(3).into(),
        DK::F4 => NamedKey::F(4).into(),
        DK::F5 => NamedKey::F(5).into(),
        DK::F6 => NamedKey::F(6).into(),
        DK::F7 => NamedKey::F(7).into(),
        DK::F8 => NamedKey::F(8).into(),
        DK::F9 => NamedKey::F(9).into(),
        DK::F10 => NamedKey::F(10).into(),
        DK::F11 => NamedKey::F(11).into(),
        DK::F12 => NamedKey::F(12).into(),
        DK::Home => NamedKey::Home.into(),
        DK::End => NamedKey::End.into(),
        DK::PageUp => NamedKey::PageUp.into(),
        DK::PageDown => NamedKey::PageDown.into(),
        DK::Insert => NamedKey::Insert.into(),
        _ => NamedKey::Unidentified.into(),
    }
}
