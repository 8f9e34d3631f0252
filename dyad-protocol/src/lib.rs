//! Dyad Split Link Protocol
//!
//! This crate defines the serial protocol between the two halves of a Dyad
//! split keyboard. The slave half forwards its key events to the master
//! half, which owns the USB host connection and injects them into the
//! combined keystream.
//!
//! # Protocol Overview
//!
//! Every key event travels as a single fixed-length binary frame:
//! ```text
//! ┌──────────┬───────┬───────┬─────────┬──────────┐
//! │ PREAMBLE │ KC LO │ KC HI │ PRESSED │ CHECKSUM │
//! │ 1B       │ 1B    │ 1B    │ 1B      │ 1B       │
//! └──────────┴───────┴───────┴─────────┴──────────┘
//! ```
//!
//! The link is deliberately simple, with no acknowledgements and no flow
//! control. A corrupted frame is dropped and the receiver re-locks
//! on the next preamble byte. For a continuously scanned keyboard a dropped
//! keystroke beats a wedged link.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod keycode;

pub use frame::{checksum8, FrameError, FrameParser, KeyEvent, FRAME_LEN, PREAMBLE};
pub use keycode::{classify, KeyClass, REMOTE_MACRO_BASE, REMOTE_MACRO_COUNT};
