//! Host-side key handling trait

/// Host keyboard state and event pipeline on the master half
///
/// The link engine funnels decoded key traffic into whatever implements
/// application key handling. Remote macros arrive as synthetic events via
/// [`raise_key_event`](Self::raise_key_event) and their meaning stays with
/// the application; standard keys mutate the held-key state directly.
pub trait HostKeyboard {
    /// Deliver a key event to the application layer
    fn raise_key_event(&mut self, keycode: u16, pressed: bool);

    /// Press a standard key in the host's held-key state
    fn assert_key(&mut self, keycode: u16);

    /// Release a standard key from the host's held-key state
    fn release_key(&mut self, keycode: u16);
}
