//! Role-gated link dispatcher

use dyad_protocol::{classify, FrameError, FrameParser, KeyClass, KeyEvent};

use crate::role::Role;
use crate::traits::{HostKeyboard, LinkDiagnostics, LinkTransport};

/// The link engine for one keyboard half
///
/// Owns the role, the receive state machine, and the collaborator
/// endpoints, so independent instances can coexist and be tested freely.
/// Driven entirely from the firmware's scan loop: [`poll`](Self::poll) on
/// every tick, [`key_event`](Self::key_event) from local key processing.
/// Nothing here blocks or allocates.
///
/// Today the link is one-directional. The master consumes frames and never
/// originates them; the slave originates frames and never consumes them.
/// The unused direction on each half is reserved for a future reverse link
/// rather than missing.
pub struct SplitLink<T, H, D> {
    role: Role,
    parser: FrameParser,
    transport: T,
    host: H,
    diag: D,
}

impl<T: LinkTransport, H: HostKeyboard, D: LinkDiagnostics> SplitLink<T, H, D> {
    /// Create a link engine with a fixed role
    pub fn new(role: Role, transport: T, host: H, diag: D) -> Self {
        Self {
            role,
            parser: FrameParser::new(),
            transport,
            host,
            diag,
        }
    }

    /// The role this engine was constructed with
    pub fn role(&self) -> Role {
        self.role
    }

    /// Scan-tick hook
    ///
    /// The master drains every byte the transport currently holds, so a
    /// tick never leaves buffered input behind, and never waits for bytes
    /// that have not arrived. The slave does not poll.
    pub fn poll(&mut self) {
        match self.role {
            Role::Master => self.drain_inbound(),
            Role::Slave => {}
        }
    }

    /// Local key event hook
    ///
    /// The slave forwards standard keys and remote macros immediately as a
    /// synchronous write, with no outbound queue; null and out-of-band
    /// keycodes stay local. The master ignores local events here.
    pub fn key_event(&mut self, keycode: u16, pressed: bool) {
        match self.role {
            Role::Master => {}
            Role::Slave => {
                if classify(keycode).is_forwardable() {
                    let frame = KeyEvent { keycode, pressed }.encode();
                    self.transport.write_frame(&frame);
                }
            }
        }
    }

    fn drain_inbound(&mut self) {
        while self.transport.bytes_available() {
            let byte = self.transport.read_byte();
            match self.parser.feed(byte) {
                Ok(Some(event)) => self.dispatch(event),
                Ok(None) => {}
                Err(FrameError::SyncLoss { byte }) => self.diag.sync_error(byte),
                Err(FrameError::PreambleMismatch { found }) => self.diag.sync_error(found),
                Err(FrameError::ChecksumMismatch { frame, computed }) => {
                    self.diag.checksum_mismatch(&frame, computed);
                }
            }
        }
    }

    fn dispatch(&mut self, event: KeyEvent) {
        match classify(event.keycode) {
            KeyClass::RemoteMacro(_) => self.host.raise_key_event(event.keycode, event.pressed),
            KeyClass::StandardKey => {
                if event.pressed {
                    self.host.assert_key(event.keycode);
                } else {
                    self.host.release_key(event.keycode);
                }
            }
            // A frame can carry a null keycode under a valid checksum;
            // there is nothing to do with it.
            KeyClass::Invalid => {}
        }
    }

    /// Get access to the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get mutable access to the underlying transport
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Get access to the host keyboard endpoint
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Get access to the diagnostic sink
    pub fn diagnostics(&self) -> &D {
        &self.diag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dyad_protocol::keycode::{RM_16, RM_3};
    use dyad_protocol::FRAME_LEN;
    use heapless::Deque;

    // Fake wire: reads pop a preloaded queue, writes append to a record of
    // transmitted bytes.
    struct FakeWire {
        rx: Deque<u8, 64>,
        tx: heapless::Vec<u8, 64>,
    }

    impl FakeWire {
        fn new() -> Self {
            Self {
                rx: Deque::new(),
                tx: heapless::Vec::new(),
            }
        }

        fn preload(&mut self, bytes: &[u8]) {
            for &byte in bytes {
                self.rx.push_back(byte).unwrap();
            }
        }
    }

    impl LinkTransport for FakeWire {
        fn bytes_available(&mut self) -> bool {
            !self.rx.is_empty()
        }

        fn read_byte(&mut self) -> u8 {
            self.rx.pop_front().unwrap_or(0)
        }

        fn write_byte(&mut self, byte: u8) {
            self.tx.push(byte).unwrap();
        }
    }

    #[derive(Default)]
    struct RecordingHost {
        raised: heapless::Vec<(u16, bool), 8>,
        asserted: heapless::Vec<u16, 8>,
        released: heapless::Vec<u16, 8>,
    }

    impl HostKeyboard for RecordingHost {
        fn raise_key_event(&mut self, keycode: u16, pressed: bool) {
            self.raised.push((keycode, pressed)).unwrap();
        }

        fn assert_key(&mut self, keycode: u16) {
            self.asserted.push(keycode).unwrap();
        }

        fn release_key(&mut self, keycode: u16) {
            self.released.push(keycode).unwrap();
        }
    }

    #[derive(Default)]
    struct CountingDiag {
        sync_errors: usize,
        checksum_mismatches: usize,
        last_computed: Option<u8>,
    }

    impl LinkDiagnostics for CountingDiag {
        fn sync_error(&mut self, _byte: u8) {
            self.sync_errors += 1;
        }

        fn checksum_mismatch(&mut self, _frame: &[u8; FRAME_LEN], computed: u8) {
            self.checksum_mismatches += 1;
            self.last_computed = Some(computed);
        }
    }

    fn link(role: Role) -> SplitLink<FakeWire, RecordingHost, CountingDiag> {
        SplitLink::new(
            role,
            FakeWire::new(),
            RecordingHost::default(),
            CountingDiag::default(),
        )
    }

    #[test]
    fn test_master_asserts_standard_key_press() {
        let mut link = link(Role::Master);
        link.transport_mut().preload(&[0x69, 0x04, 0x00, 0x01, 0x6E]);
        link.poll();
        assert_eq!(link.host().asserted.as_slice(), &[4]);
        assert!(link.host().raised.is_empty());
        assert!(link.host().released.is_empty());
    }

    #[test]
    fn test_master_releases_standard_key() {
        let mut link = link(Role::Master);
        link.transport_mut().preload(&KeyEvent::release(4).encode());
        link.poll();
        assert_eq!(link.host().released.as_slice(), &[4]);
        assert!(link.host().asserted.is_empty());
    }

    #[test]
    fn test_corrupted_frame_yields_one_diagnostic_and_no_events() {
        let mut link = link(Role::Master);
        link.transport_mut().preload(&[0x69, 0x04, 0x00, 0x01, 0x00]);
        link.poll();
        assert!(link.host().asserted.is_empty());
        assert!(link.host().raised.is_empty());
        assert_eq!(link.diagnostics().checksum_mismatches, 1);
        assert_eq!(link.diagnostics().last_computed, Some(0x6E));
    }

    #[test]
    fn test_remote_macro_raises_synthetic_event() {
        let mut link = link(Role::Master);
        link.transport_mut().preload(&KeyEvent::press(RM_3).encode());
        link.poll();
        assert_eq!(link.host().raised.as_slice(), &[(RM_3, true)]);
        assert!(link.host().asserted.is_empty());
    }

    #[test]
    fn test_valid_frame_with_null_keycode_is_dropped() {
        let mut link = link(Role::Master);
        link.transport_mut().preload(&KeyEvent::press(0).encode());
        link.poll();
        assert!(link.host().raised.is_empty());
        assert!(link.host().asserted.is_empty());
        assert_eq!(link.diagnostics().sync_errors, 0);
        assert_eq!(link.diagnostics().checksum_mismatches, 0);
    }

    #[test]
    fn test_master_drains_everything_available() {
        let mut link = link(Role::Master);
        link.transport_mut().preload(&KeyEvent::press(4).encode());
        link.transport_mut().preload(&KeyEvent::press(RM_16).encode());
        link.transport_mut().preload(&KeyEvent::release(4).encode());
        link.poll();
        assert_eq!(link.host().asserted.as_slice(), &[4]);
        assert_eq!(link.host().raised.as_slice(), &[(RM_16, true)]);
        assert_eq!(link.host().released.as_slice(), &[4]);
        assert!(!link.transport_mut().bytes_available());
    }

    #[test]
    fn test_garbage_before_frame_counts_sync_errors() {
        let mut link = link(Role::Master);
        link.transport_mut().preload(&[0x00, 0x42]);
        link.transport_mut().preload(&KeyEvent::press(4).encode());
        link.poll();
        assert_eq!(link.diagnostics().sync_errors, 2);
        assert_eq!(link.host().asserted.as_slice(), &[4]);
    }

    #[test]
    fn test_partial_frame_spans_polls() {
        let frame = KeyEvent::press(4).encode();
        let mut link = link(Role::Master);
        link.transport_mut().preload(&frame[..3]);
        link.poll();
        assert!(link.host().asserted.is_empty());

        link.transport_mut().preload(&frame[3..]);
        link.poll();
        assert_eq!(link.host().asserted.as_slice(), &[4]);
    }

    #[test]
    fn test_slave_forwards_standard_key() {
        let mut link = link(Role::Slave);
        link.key_event(4, true);
        assert_eq!(link.transport().tx.as_slice(), &[0x69, 0x04, 0x00, 0x01, 0x6E]);
    }

    #[test]
    fn test_slave_forwards_remote_macro_release() {
        let mut link = link(Role::Slave);
        link.key_event(RM_16, false);
        assert_eq!(
            link.transport().tx.as_slice(),
            &KeyEvent::release(RM_16).encode()
        );
    }

    #[test]
    fn test_slave_drops_unforwardable_keycodes() {
        let mut link = link(Role::Slave);
        link.key_event(0x0000, true);
        link.key_event(0x00FF, true);
        link.key_event(0x1234, true);
        assert!(link.transport().tx.is_empty());
    }

    #[test]
    fn test_slave_never_polls_inbound() {
        let mut link = link(Role::Slave);
        link.transport_mut().preload(&KeyEvent::press(4).encode());
        link.poll();
        assert!(link.transport_mut().bytes_available());
        assert!(link.host().asserted.is_empty());
    }

    #[test]
    fn test_master_ignores_local_key_events() {
        let mut link = link(Role::Master);
        link.key_event(4, true);
        assert!(link.transport().tx.is_empty());
    }
}
