//! Role-gated link engine for the Dyad split keyboard
//!
//! This crate contains the half-agnostic link logic that sits between the
//! wire protocol ([`dyad_protocol`]) and the hardware-specific code of a
//! keyboard firmware:
//!
//! - Collaborator traits (byte transport, host keyboard, diagnostics)
//! - Role selection (master/slave, optionally probed from VBUS)
//! - The role-gated dispatcher driven by the scan loop
//!
//! Everything is instance-owned state; a firmware constructs one
//! [`SplitLink`] at startup, and host tests construct as many as they like.

#![no_std]
#![deny(unsafe_code)]

pub mod link;
pub mod role;
pub mod traits;

pub use link::SplitLink;
pub use role::{Role, VbusDetect};
pub use traits::{HostKeyboard, LinkDiagnostics, LinkTransport};
