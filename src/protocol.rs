//! Wire format shared with the host process.
//!
//! Two record kinds travel over the pipes:
//!
//! ```text
//! core -> host (stdout), once per tick:
//!   [0..4)   b"DOOM"
//!   [4..8)   frame counter, u32, native byte order
//!   [8..)    width * height * 4 pixel bytes, copied verbatim
//!
//! host -> core (stdin), once per key transition:
//!   [0]      b'K'
//!   [1]      pressed flag (nonzero = down)
//!   [2]      engine key code
//! ```
//!
//! There is no handshake and no version byte. The counter is written in
//! native order since both ends share a machine.

use crate::error::ProtocolError;

/// Magic tag opening every frame record.
pub const FRAME_MAGIC: [u8; 4] = *b"DOOM";

/// Bytes before the pixel payload (magic + counter).
pub const FRAME_HEADER_LEN: usize = 8;

/// Tag byte opening every key record.
pub const KEY_TAG: u8 = b'K';

/// Size of one key record.
pub const KEY_RECORD_LEN: usize = 3;

/// Bytes per pixel in the framebuffer.
pub const BYTES_PER_PIXEL: usize = 4;

/// Pixel payload size for a `width` x `height` framebuffer.
#[inline]
pub const fn pixel_len(width: usize, height: usize) -> usize {
    width * height * BYTES_PER_PIXEL
}

/// Total record size for one frame.
#[inline]
pub const fn frame_len(width: usize, height: usize) -> usize {
    FRAME_HEADER_LEN + pixel_len(width, height)
}

/// One key-down or key-up transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyEvent {
    /// `true` for key-down.
    pub pressed: bool,
    /// Engine key code (see [`crate::keys`]).
    pub code: u8,
}

impl KeyEvent {
    /// Create a new key event.
    #[inline]
    pub const fn new(pressed: bool, code: u8) -> Self {
        Self { pressed, code }
    }

    /// Key-down for `code`.
    #[inline]
    pub const fn down(code: u8) -> Self {
        Self::new(true, code)
    }

    /// Key-up for `code`.
    #[inline]
    pub const fn up(code: u8) -> Self {
        Self::new(false, code)
    }

    /// Pack into the queue slot layout: pressed in the high byte, code low.
    #[inline]
    pub const fn pack(self) -> u16 {
        ((self.pressed as u16) << 8) | self.code as u16
    }

    /// Inverse of [`KeyEvent::pack`].
    #[inline]
    pub const fn unpack(slot: u16) -> Self {
        Self {
            pressed: (slot >> 8) != 0,
            code: (slot & 0xFF) as u8,
        }
    }

    /// Encode as a host -> core key record.
    #[inline]
    pub const fn to_record(self) -> [u8; KEY_RECORD_LEN] {
        [KEY_TAG, self.pressed as u8, self.code]
    }
}

/// Decode one key record. Returns `None` when the tag byte is not `'K'`.
#[inline]
pub const fn decode_key_record(record: &[u8; KEY_RECORD_LEN]) -> Option<KeyEvent> {
    if record[0] != KEY_TAG {
        return None;
    }
    Some(KeyEvent::new(record[1] != 0, record[2]))
}

/// The fixed eight-byte prefix of a frame record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Frame counter snapshot.
    pub frame: u32,
}

impl FrameHeader {
    /// Header for frame number `frame`.
    #[inline]
    pub const fn new(frame: u32) -> Self {
        Self { frame }
    }

    /// Serialize as magic followed by the native-endian counter.
    pub fn encode(self) -> [u8; FRAME_HEADER_LEN] {
        let mut out = [0u8; FRAME_HEADER_LEN];
        out[..4].copy_from_slice(&FRAME_MAGIC);
        out[4..].copy_from_slice(&self.frame.to_ne_bytes());
        out
    }

    /// Parse the header at the start of `bytes`.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::Truncated`] if fewer than eight bytes are given,
    /// [`ProtocolError::BadMagic`] if the tag is not `DOOM`.
    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolError> {
        if bytes.len() < FRAME_HEADER_LEN {
            return Err(ProtocolError::Truncated(bytes.len()));
        }
        let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
        if magic != FRAME_MAGIC {
            return Err(ProtocolError::BadMagic(magic));
        }
        let frame = u32::from_ne_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        Ok(Self { frame })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_layout() {
        assert_eq!(KeyEvent::down(0x2A).pack(), 0x012A);
        assert_eq!(KeyEvent::up(0xAE).pack(), 0x00AE);
        assert_eq!(KeyEvent::unpack(0x01AD), KeyEvent::down(0xAD));
    }

    #[test]
    fn test_decode_key_record() {
        assert_eq!(decode_key_record(&[b'K', 1, 0x2A]), Some(KeyEvent::down(0x2A)));
        assert_eq!(decode_key_record(&[b'K', 0, 13]), Some(KeyEvent::up(13)));
        // Any nonzero flag counts as pressed.
        assert_eq!(decode_key_record(&[b'K', 0xFF, 9]), Some(KeyEvent::down(9)));
        assert_eq!(decode_key_record(&[b'X', 1, 9]), None);
    }

    #[test]
    fn test_key_record_encoding() {
        assert_eq!(KeyEvent::down(0xA3).to_record(), [0x4B, 1, 0xA3]);
        assert_eq!(KeyEvent::up(27).to_record(), [0x4B, 0, 27]);
    }

    #[test]
    fn test_frame_header() {
        let bytes = FrameHeader::new(7).encode();
        assert_eq!(&bytes[..4], b"DOOM");
        assert_eq!(&bytes[4..], &7u32.to_ne_bytes());
        assert_eq!(FrameHeader::decode(&bytes), Ok(FrameHeader::new(7)));
    }

    #[test]
    fn test_frame_header_errors() {
        assert_eq!(FrameHeader::decode(b"DOO"), Err(ProtocolError::Truncated(3)));
        assert_eq!(
            FrameHeader::decode(b"DOOr\0\0\0\0"),
            Err(ProtocolError::BadMagic(*b"DOOr"))
        );
    }

    #[test]
    fn test_frame_len() {
        assert_eq!(frame_len(4, 4), 8 + 64);
        assert_eq!(frame_len(640, 400), 8 + 1_024_000);
    }
}
