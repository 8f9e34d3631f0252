//! Keycode classification for the split link.
//!
//! The 16-bit keycode space is carved into three disjoint bands:
//!
//! - `0x0000` and `0x00FF` are null/sentinel values, never carried.
//! - `0x0001..=0x00FE` are standard HID keycodes.
//! - `0xFFF0..=0xFFFF`, the topmost 16 codes, are remote macros 1 to 16.
//!
//! Codes between the HID ceiling and the macro band classify as invalid.
//! Unreachable from real keymaps, but classification must stay total.

/// First keycode of the remote macro band
pub const REMOTE_MACRO_BASE: u16 = 0xFFF0;

/// Number of remote macros in the band
pub const REMOTE_MACRO_COUNT: u16 = 16;

// Remote macro keycodes, for use in keymaps on the sending half
pub const RM_1: u16 = REMOTE_MACRO_BASE;
pub const RM_2: u16 = REMOTE_MACRO_BASE + 1;
pub const RM_3: u16 = REMOTE_MACRO_BASE + 2;
pub const RM_4: u16 = REMOTE_MACRO_BASE + 3;
pub const RM_5: u16 = REMOTE_MACRO_BASE + 4;
pub const RM_6: u16 = REMOTE_MACRO_BASE + 5;
pub const RM_7: u16 = REMOTE_MACRO_BASE + 6;
pub const RM_8: u16 = REMOTE_MACRO_BASE + 7;
pub const RM_9: u16 = REMOTE_MACRO_BASE + 8;
pub const RM_10: u16 = REMOTE_MACRO_BASE + 9;
pub const RM_11: u16 = REMOTE_MACRO_BASE + 10;
pub const RM_12: u16 = REMOTE_MACRO_BASE + 11;
pub const RM_13: u16 = REMOTE_MACRO_BASE + 12;
pub const RM_14: u16 = REMOTE_MACRO_BASE + 13;
pub const RM_15: u16 = REMOTE_MACRO_BASE + 14;
pub const RM_16: u16 = REMOTE_MACRO_BASE + 15;

/// Classification of a 16-bit keycode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyClass {
    /// Null, sentinel, or out-of-band value
    Invalid,
    /// Standard HID keycode
    StandardKey,
    /// Remote macro, numbered 1 to 16
    RemoteMacro(u8),
}

impl KeyClass {
    /// True for classes the slave half forwards over the link
    pub fn is_forwardable(&self) -> bool {
        matches!(self, KeyClass::StandardKey | KeyClass::RemoteMacro(_))
    }
}

/// Classify a keycode into its band
///
/// Total over all 16-bit values; anything outside the HID range and the
/// macro band comes back [`KeyClass::Invalid`].
pub fn classify(code: u16) -> KeyClass {
    match code {
        0x0000 | 0x00FF => KeyClass::Invalid,
        0x0001..=0x00FE => KeyClass::StandardKey,
        REMOTE_MACRO_BASE..=u16::MAX => {
            KeyClass::RemoteMacro((code - REMOTE_MACRO_BASE) as u8 + 1)
        }
        _ => KeyClass::Invalid,
    }
}
