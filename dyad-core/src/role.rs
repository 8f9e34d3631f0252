//! Link role selection

/// One-shot probe for USB host presence
///
/// The master half is the one with a live USB connection, which shows up
/// electrically on the VBUS pad. The electrical details belong to the
/// implementation; the engine consumes the answer once, at startup.
pub trait VbusDetect {
    /// True if VBUS is present
    fn vbus_present(&mut self) -> bool;
}

/// Which half of the split this device is
///
/// Fixed for the whole session: chosen by the firmware outright, or
/// resolved once at startup with [`Role::detect`]. The engine never
/// re-evaluates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Role {
    /// Owns the USB host connection and consumes inbound frames
    Master,
    /// Originates frames from local key events
    Slave,
}

impl Role {
    /// Resolve the role from a one-shot VBUS probe
    pub fn detect<P: VbusDetect>(probe: &mut P) -> Self {
        if probe.vbus_present() {
            Role::Master
        } else {
            Role::Slave
        }
    }

    /// True for the master half
    pub fn is_master(&self) -> bool {
        matches!(self, Role::Master)
    }
}
