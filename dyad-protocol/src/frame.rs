//! Frame encoding and decoding for the split link.
//!
//! Frame format:
//! - PREAMBLE (1 byte): 0x69 synchronization byte
//! - KC LO (1 byte): keycode low 8 bits
//! - KC HI (1 byte): keycode high 8 bits
//! - PRESSED (1 byte): 0 = release, nonzero = press
//! - CHECKSUM (1 byte): sum of the first four bytes, mod 256

/// Frame synchronization byte
pub const PREAMBLE: u8 = 0x69;

/// Length of a complete frame in bytes
pub const FRAME_LEN: usize = 5;

/// Sum all bytes, truncated to 8 bits.
///
/// Deliberately weak compared to a CRC: every single-bit error is caught
/// (a flip changes one byte by a power of two, which is never 0 mod 256),
/// but corruption that cancels out across bytes is not. Good enough for a
/// short cable carrying five-byte frames; not to be silently strengthened.
pub fn checksum8(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |sum, &b| sum.wrapping_add(b))
}

/// Errors that can occur while receiving or decoding a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// A byte arrived while hunting for a preamble and was not one
    SyncLoss { byte: u8 },
    /// Frame byte 0 is not the preamble
    PreambleMismatch { found: u8 },
    /// Frame checksum does not match its contents
    ///
    /// Carries the raw frame and the computed sum for diagnostics; the
    /// received sum is the frame's final byte.
    ChecksumMismatch { frame: [u8; FRAME_LEN], computed: u8 },
}

/// A single key press or release carried over the link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    /// 16-bit keycode, see [`crate::keycode`] for the value bands
    pub keycode: u16,
    /// true for press, false for release
    pub pressed: bool,
}

impl KeyEvent {
    /// Create a press event
    pub const fn press(keycode: u16) -> Self {
        Self {
            keycode,
            pressed: true,
        }
    }

    /// Create a release event
    pub const fn release(keycode: u16) -> Self {
        Self {
            keycode,
            pressed: false,
        }
    }

    /// Encode this event into a wire frame
    ///
    /// Encoding never fails and accepts any keycode value; whether a code
    /// belongs on the wire is the caller's concern (see
    /// [`crate::keycode::classify`]).
    pub fn encode(&self) -> [u8; FRAME_LEN] {
        let [kc_lo, kc_hi] = self.keycode.to_le_bytes();
        let mut frame = [PREAMBLE, kc_lo, kc_hi, self.pressed as u8, 0];
        frame[FRAME_LEN - 1] = checksum8(&frame[..FRAME_LEN - 1]);
        frame
    }

    /// Decode and validate a received wire frame
    pub fn decode(frame: &[u8; FRAME_LEN]) -> Result<Self, FrameError> {
        if frame[0] != PREAMBLE {
            return Err(FrameError::PreambleMismatch { found: frame[0] });
        }
        let computed = checksum8(&frame[..FRAME_LEN - 1]);
        if computed != frame[FRAME_LEN - 1] {
            return Err(FrameError::ChecksumMismatch {
                frame: *frame,
                computed,
            });
        }
        Ok(Self {
            keycode: u16::from_le_bytes([frame[1], frame[2]]),
            pressed: frame[3] != 0,
        })
    }
}

/// State machine that reassembles frames from a raw byte stream
///
/// The parser owns a single frame slot and an index into it. While the
/// index is 0 it hunts for a preamble byte; once locked it fills the slot
/// and decodes when the fifth byte lands. The index resets after every
/// completed frame, valid or not, so a corrupted frame costs at most five
/// bytes before the hunt resumes.
///
/// Re-locking on the next preamble-valued byte can false-lock on a data
/// byte that happens to equal the preamble; the checksum screens most such
/// frames, and the stream realigns on the frame after. A partial frame
/// persists until its remaining bytes arrive. There is no staleness
/// timeout; callers that want one can [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct FrameParser {
    buf: [u8; FRAME_LEN],
    idx: usize,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a parser hunting for a preamble
    pub const fn new() -> Self {
        Self {
            buf: [0; FRAME_LEN],
            idx: 0,
        }
    }

    /// Drop any partial frame and hunt for the next preamble
    pub fn reset(&mut self) {
        self.idx = 0;
    }

    /// True while the parser holds a partial frame
    pub fn in_frame(&self) -> bool {
        self.idx != 0
    }

    /// Feed a single received byte
    ///
    /// Returns `Ok(Some(event))` when the byte completes a valid frame,
    /// `Ok(None)` when more bytes are needed, or the frame error otherwise.
    /// Never blocks. Errors are recovered locally: feeding further bytes
    /// continues the hunt for the next preamble.
    pub fn feed(&mut self, byte: u8) -> Result<Option<KeyEvent>, FrameError> {
        if self.idx == 0 && byte != PREAMBLE {
            return Err(FrameError::SyncLoss { byte });
        }
        self.buf[self.idx] = byte;
        if self.idx == FRAME_LEN - 1 {
            self.idx = 0;
            return KeyEvent::decode(&self.buf).map(Some);
        }
        self.idx += 1;
        Ok(None)
    }
}
