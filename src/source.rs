//! Input side: the [`ByteSource`] trait.

use heapless::Deque;

/// Trait for abstracting the serial receive path.
///
/// Implement this for your UART driver or receive buffer. The controller
/// drains it once per iteration and never waits for more input.
pub trait ByteSource {
    /// Returns the next queued byte, or `None` when nothing is available right now.
    fn read_byte(&mut self) -> Option<u8>;
}

/// Ring buffer filled from a receive interrupt.
impl<const N: usize> ByteSource for Deque<u8, N> {
    fn read_byte(&mut self) -> Option<u8> {
        self.pop_front()
    }
}

impl<B: ByteSource + ?Sized> ByteSource for &mut B {
    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }
}
