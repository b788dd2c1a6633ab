//! Engine key codes.
//!
//! The host translates its own key events into these single-byte codes
//! before writing `K` records. Printable keys are sent as their lowercase
//! ASCII value.

#![allow(missing_docs)]

pub const KEY_RIGHTARROW: u8 = 0xae;
pub const KEY_LEFTARROW: u8 = 0xac;
pub const KEY_UPARROW: u8 = 0xad;
pub const KEY_DOWNARROW: u8 = 0xaf;
pub const KEY_STRAFE_L: u8 = 0xa0;
pub const KEY_STRAFE_R: u8 = 0xa1;
pub const KEY_USE: u8 = 0xa2;
pub const KEY_FIRE: u8 = 0xa3;
pub const KEY_ESCAPE: u8 = 27;
pub const KEY_ENTER: u8 = 13;
pub const KEY_TAB: u8 = 9;
pub const KEY_BACKSPACE: u8 = 0x7f;
pub const KEY_EQUALS: u8 = 0x3d;
pub const KEY_MINUS: u8 = 0x2d;

pub const KEY_RSHIFT: u8 = 0x80 + 0x36;
pub const KEY_RCTRL: u8 = 0x80 + 0x1d;
pub const KEY_RALT: u8 = 0x80 + 0x38;

pub const KEY_F1: u8 = 0x80 + 0x3b;
pub const KEY_F2: u8 = 0x80 + 0x3c;
pub const KEY_F3: u8 = 0x80 + 0x3d;
pub const KEY_F4: u8 = 0x80 + 0x3e;
pub const KEY_F5: u8 = 0x80 + 0x3f;
pub const KEY_F6: u8 = 0x80 + 0x40;
pub const KEY_F7: u8 = 0x80 + 0x41;
pub const KEY_F8: u8 = 0x80 + 0x42;
pub const KEY_F9: u8 = 0x80 + 0x43;
pub const KEY_F10: u8 = 0x80 + 0x44;
pub const KEY_F11: u8 = 0x80 + 0x57;
pub const KEY_F12: u8 = 0x80 + 0x58;

/// Code for a printable character, or `None` if it has no single-byte code.
pub const fn printable(c: char) -> Option<u8> {
    if c.is_ascii_graphic() || c == ' ' {
        Some(c.to_ascii_lowercase() as u8)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_keys_are_contiguous() {
        assert_eq!(KEY_F1, 0xbb);
        assert_eq!(KEY_F10, 0xc4);
        assert_eq!(KEY_F10 - KEY_F1, 9);
    }

    #[test]
    fn test_printable() {
        assert_eq!(printable('Y'), Some(b'y'));
        assert_eq!(printable('n'), Some(b'n'));
        assert_eq!(printable('\n'), None);
        assert_eq!(printable('日'), None);
    }
}
