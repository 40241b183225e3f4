use crate::{
    config::INBOUND_CAPACITY,
    message::{InboundMessage, INBOUND_TERMINATOR},
    ports::SerialRx,
    state::{StateCell, SystemState, Transition},
};
use core::mem::take;

/// What a receiver cycle did.
#[derive(Debug, PartialEq, Eq)]
pub enum ReceiveOutcome<const N: usize = INBOUND_CAPACITY> {
    /// Nothing arrived.
    Nothing,
    Stored(u8),
    /// The byte arrived but the buffer is full.
    Overflow(u8),
    /// The byte arrived while the device was busy and got dropped.
    Busy(SystemState, u8),
    /// A line is complete and handed out for playback.
    Completed(InboundMessage<N>),
}

/// Sole writer of the [`InboundMessage`].
#[derive(Debug)]
pub struct Receiver<'a, const N: usize = INBOUND_CAPACITY> {
    state: &'a StateCell,
    message: InboundMessage<N>,
}

impl<'a, const N: usize> Receiver<'a, N> {
    #[must_use]
    pub const fn new(state: &'a StateCell) -> Self {
        Self {
            state,
            message: InboundMessage::new(),
        }
    }

    /// The partial line received so far.
    #[must_use]
    pub fn message(&self) -> &InboundMessage<N> {
        &self.message
    }

    /// One polling cycle, consuming at most one byte.
    pub fn poll<S>(&mut self, serial: &mut S) -> ReceiveOutcome<N>
    where
        S: SerialRx,
    {
        serial
            .try_read_byte()
            .map_or(ReceiveOutcome::Nothing, |byte| self.accept(byte))
    }

    /// Applies a single received byte.
    ///
    /// Once the buffer is full, every further byte up to the terminator is
    /// dropped.
    pub fn accept(&mut self, byte: u8) -> ReceiveOutcome<N> {
        match self.state.apply(Transition::CharReceived) {
            Ok(SystemState::Idle) => self.message.clear(),
            Ok(_) => {}
            Err(other) => return ReceiveOutcome::Busy(other, byte),
        }

        if byte == INBOUND_TERMINATOR {
            return match self.state.apply(Transition::LineTerminated) {
                Ok(_) => ReceiveOutcome::Completed(take(&mut self.message)),
                Err(other) => ReceiveOutcome::Busy(other, byte),
            };
        }

        if self.message.push(byte) {
            ReceiveOutcome::Stored(byte)
        } else {
            ReceiveOutcome::Overflow(byte)
        }
    }
}
