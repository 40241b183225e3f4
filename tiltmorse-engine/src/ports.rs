//! Leaf collaborators the engine is wired to.
//!
//! Implementations live with the board support code. Pauses between tones
//! use [`embedded_hal_async::delay::DelayNs`] directly.

use crate::tilt::MotionSample;
use heapless::spsc::Consumer;

/// Six axis motion sensor with a temperature channel.
pub trait TiltSensor {
    type Error;

    fn read(&mut self) -> Result<MotionSample, Self::Error>;
}

/// Text output.
pub trait DisplayPort {
    fn clear(&mut self);

    /// Shows `text` byte for byte, without assuming any encoding.
    fn write_text(&mut self, text: &[u8]);
}

/// Tone generator.
pub trait TonePort {
    /// Plays a tone and only returns once `duration_ms` has passed.
    async fn play(&mut self, frequency_hz: u32, duration_ms: u32);
}

/// Receiving half of the serial link.
pub trait SerialRx {
    /// Never waits, returns `None` if nothing arrived.
    fn try_read_byte(&mut self) -> Option<u8>;
}

/// Bytes queued up by an interrupt handler, oldest first.
impl<const N: usize> SerialRx for Consumer<'_, u8, N> {
    fn try_read_byte(&mut self) -> Option<u8> {
        self.dequeue()
    }
}

/// Transmitting half of the serial link.
pub trait SerialTx {
    type Error;

    /// Writes `line` as is. The caller supplies the line terminator.
    async fn write_line(&mut self, line: &str) -> Result<(), Self::Error>;
}
