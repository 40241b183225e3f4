//! The system wide state machine.

use core::sync::atomic::{AtomicU8, Ordering};

/// Phase the device is currently in.
///
/// Exactly one phase is current at any instant. The phase acts as the
/// mutual exclusion token between the button interrupt and the tasks: each of
/// them only acts while the phase permits it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SystemState {
    Idle = 0,
    Recording = 1,
    Sending = 2,
    Receiving = 3,
    DisplayUpdate = 4,
}

/// Events driving [`SystemState`] from one phase to the next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// The symbol button got pressed.
    SymbolPressed,
    /// The finalize button got pressed on a non-empty recording.
    FinalizePressed,
    /// The outbound message has been written to the serial link.
    SendComplete,
    /// A character arrived on the serial link.
    CharReceived,
    /// A line terminator arrived on the serial link.
    LineTerminated,
    /// Playback of the inbound message is done.
    DisplayComplete,
}

impl SystemState {
    /// All phases, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Idle,
        Self::Recording,
        Self::Sending,
        Self::Receiving,
        Self::DisplayUpdate,
    ];

    /// Looks up the transition table.
    ///
    /// Returns `None` for every `(state, transition)` pair the table does not
    /// define, those pairs are no-ops.
    #[must_use]
    pub const fn next(self, transition: Transition) -> Option<Self> {
        match (self, transition) {
            (Self::Idle, Transition::SymbolPressed) => Some(Self::Recording),
            (Self::Recording, Transition::FinalizePressed) => Some(Self::Sending),
            (Self::Sending, Transition::SendComplete)
            | (Self::DisplayUpdate, Transition::DisplayComplete) => Some(Self::Idle),
            (Self::Idle | Self::Receiving, Transition::CharReceived) => Some(Self::Receiving),
            (Self::Receiving, Transition::LineTerminated) => Some(Self::DisplayUpdate),
            _ => None,
        }
    }

    const fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Self::Recording,
            2 => Self::Sending,
            3 => Self::Receiving,
            4 => Self::DisplayUpdate,
            // only values written by `StateCell` ever end up in here
            _ => Self::Idle,
        }
    }
}

/// Shared, lock-free home of the current [`SystemState`].
///
/// Meant to be placed in static memory and handed out by shared reference to
/// the interrupt handler and every task.
#[derive(Debug)]
pub struct StateCell(AtomicU8);

impl StateCell {
    /// Creates a cell starting out in [`SystemState::Idle`].
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicU8::new(SystemState::Idle as u8))
    }

    #[must_use]
    pub fn get(&self) -> SystemState {
        SystemState::from_raw(self.0.load(Ordering::Acquire))
    }

    /// Applies `transition` to the current phase.
    ///
    /// Checking the table and storing the new phase happen in one atomic
    /// step. On success the phase that was left is returned, otherwise the
    /// (unchanged) current phase is handed back as error.
    pub fn apply(&self, transition: Transition) -> Result<SystemState, SystemState> {
        self.0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |raw| {
                SystemState::from_raw(raw)
                    .next(transition)
                    .map(|next| next as u8)
            })
            .map(SystemState::from_raw)
            .map_err(SystemState::from_raw)
    }
}

impl Default for StateCell {
    fn default() -> Self {
        Self::new()
    }
}
