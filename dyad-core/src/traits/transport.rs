//! Byte-oriented transport trait for the split link

use dyad_protocol::FRAME_LEN;

/// Byte stream carrying frames between the two halves
///
/// Implementations wrap whatever moves bytes across the interconnect
/// cable, typically a hardware or PIO UART. The engine checks availability
/// before every read and never blocks; buffering and backpressure are the
/// transport's problem. Bit errors are expected, reordering is not.
pub trait LinkTransport {
    /// True when at least one received byte is waiting
    fn bytes_available(&mut self) -> bool;

    /// Take the next received byte
    ///
    /// Only called after [`bytes_available`](Self::bytes_available) returns
    /// true.
    fn read_byte(&mut self) -> u8;

    /// Queue a single byte for transmission
    ///
    /// Expected to complete or buffer internally; the engine performs no
    /// retry or flow control of its own.
    fn write_byte(&mut self, byte: u8);

    /// Transmit a complete frame, byte by byte, in order
    fn write_frame(&mut self, frame: &[u8; FRAME_LEN]) {
        for &byte in frame {
            self.write_byte(byte);
        }
    }
}
