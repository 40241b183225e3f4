use crate::{
    config::SENT_CONFIRMATION,
    message::OutboundMessage,
    ports::{DisplayPort, SerialTx},
    state::{StateCell, SystemState, Transition},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendError<E> {
    /// The serial link refused the line. The message is gone nonetheless.
    Link(E),
    /// A message showed up outside of [`SystemState::Sending`].
    UnexpectedState(SystemState),
}

/// Writes finalized messages to the serial link, then clears them.
pub struct Sender<'a, S, D> {
    state: &'a StateCell,
    serial: S,
    display: D,
}

impl<'a, S, D> Sender<'a, S, D>
where
    S: SerialTx,
    D: DisplayPort,
{
    #[must_use]
    pub fn new(state: &'a StateCell, serial: S, display: D) -> Self {
        Self {
            state,
            serial,
            display,
        }
    }

    /// Transmits `message` as a single line, clears it, confirms on the
    /// display and returns the device to [`SystemState::Idle`].
    ///
    /// There are no retries, a failing link still ends the sending phase.
    pub async fn transmit<const N: usize>(
        &mut self,
        message: &mut OutboundMessage<N>,
    ) -> Result<(), SendError<S::Error>> {
        let current = self.state.get();
        if current != SystemState::Sending {
            message.clear();
            return Err(SendError::UnexpectedState(current));
        }

        let written = self.serial.write_line(message.as_str()).await;
        message.clear();

        self.display.clear();
        self.display.write_text(SENT_CONFIRMATION.as_bytes());

        self.state
            .apply(Transition::SendComplete)
            .map_err(SendError::UnexpectedState)?;
        written.map_err(SendError::Link)
    }
}
