use crate::{
    config::OUTBOUND_CAPACITY,
    input::ButtonEvent,
    message::OutboundMessage,
    state::{StateCell, SystemState, Transition},
    tilt::TiltClass,
};
use core::mem::take;

/// What applying a [`ButtonEvent`] did.
#[derive(Debug, PartialEq, Eq)]
pub enum RecordOutcome<const N: usize = OUTBOUND_CAPACITY> {
    /// A new recording started without appending anything.
    Started,
    /// A symbol got appended, `started` tells whether this press opened the
    /// recording.
    Appended { symbol: char, started: bool },
    /// Recording, but the latched tilt was [`TiltClass::Unknown`].
    Unclassified,
    /// No room left for another symbol.
    Full,
    /// Finalize pressed on an empty recording.
    NothingToSend,
    /// The recording is closed and handed out for transmission.
    Finalized(OutboundMessage<N>),
    /// The current phase does not accept this event.
    Ignored(SystemState),
}

/// Sole writer of the [`OutboundMessage`] while a recording is in progress.
#[derive(Debug)]
pub struct Recorder<'a, const N: usize = OUTBOUND_CAPACITY> {
    state: &'a StateCell,
    message: OutboundMessage<N>,
}

impl<'a, const N: usize> Recorder<'a, N> {
    #[must_use]
    pub const fn new(state: &'a StateCell) -> Self {
        Self {
            state,
            message: OutboundMessage::new(),
        }
    }

    /// The recording so far.
    #[must_use]
    pub fn message(&self) -> &OutboundMessage<N> {
        &self.message
    }

    pub fn handle(&mut self, event: ButtonEvent) -> RecordOutcome<N> {
        match event {
            ButtonEvent::Symbol(tilt) => self.record_symbol(tilt),
            ButtonEvent::Finalize => self.finalize(),
        }
    }

    fn record_symbol(&mut self, tilt: TiltClass) -> RecordOutcome<N> {
        // The press opening a recording also records its own symbol.
        let started = match self.state.apply(Transition::SymbolPressed) {
            Ok(_) => {
                self.message.clear();
                true
            }
            Err(SystemState::Recording) => false,
            Err(other) => return RecordOutcome::Ignored(other),
        };

        let Some(symbol) = tilt.symbol() else {
            return if started {
                RecordOutcome::Started
            } else {
                RecordOutcome::Unclassified
            };
        };

        if self.message.push_symbol(symbol) {
            RecordOutcome::Appended { symbol, started }
        } else {
            RecordOutcome::Full
        }
    }

    fn finalize(&mut self) -> RecordOutcome<N> {
        match self.state.get() {
            SystemState::Recording => {}
            other => return RecordOutcome::Ignored(other),
        }
        if self.message.is_empty() {
            return RecordOutcome::NothingToSend;
        }
        if !self.message.has_room_for_terminator() {
            return RecordOutcome::Full;
        }

        // Only this recorder ever leaves `Recording`, so the phase checked
        // above still holds.
        if let Err(other) = self.state.apply(Transition::FinalizePressed) {
            return RecordOutcome::Ignored(other);
        }
        let terminated = self.message.terminate();
        debug_assert!(terminated);
        RecordOutcome::Finalized(take(&mut self.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(tilt: TiltClass) -> ButtonEvent {
        ButtonEvent::Symbol(tilt)
    }

    #[test]
    fn first_press_opens_the_recording() {
        let state = StateCell::new();
        let mut recorder = Recorder::<16>::new(&state);

        assert_eq!(
            recorder.handle(symbol(TiltClass::Unknown)),
            RecordOutcome::Started
        );
        assert_eq!(state.get(), SystemState::Recording);
        assert!(recorder.message().is_empty());
    }

    #[test]
    fn opening_press_records_its_latched_tilt() {
        let state = StateCell::new();
        let mut recorder = Recorder::<16>::new(&state);

        assert_eq!(
            recorder.handle(symbol(TiltClass::Right)),
            RecordOutcome::Appended {
                symbol: '-',
                started: true
            }
        );
        assert_eq!(recorder.message().as_str(), "-");
    }

    #[test]
    fn unknown_tilt_appends_nothing() {
        let state = StateCell::new();
        let mut recorder = Recorder::<16>::new(&state);
        recorder.handle(symbol(TiltClass::Unknown));

        assert_eq!(
            recorder.handle(symbol(TiltClass::Unknown)),
            RecordOutcome::Unclassified
        );
        assert!(recorder.message().is_empty());
    }

    #[test]
    fn symbols_follow_the_latched_tilts() {
        let state = StateCell::new();
        let mut recorder = Recorder::<16>::new(&state);
        recorder.handle(symbol(TiltClass::Unknown));

        for tilt in [TiltClass::Left, TiltClass::Middle, TiltClass::Right] {
            recorder.handle(symbol(tilt));
        }

        assert_eq!(recorder.message().as_str(), ". -");
    }

    #[test]
    fn symbols_are_truncated_at_capacity() {
        let state = StateCell::new();
        let mut recorder = Recorder::<6>::new(&state);
        recorder.handle(symbol(TiltClass::Unknown));

        let outcomes: [_; 4] =
            core::array::from_fn(|_| recorder.handle(symbol(TiltClass::Left)));

        assert!(matches!(outcomes[0], RecordOutcome::Appended { .. }));
        assert!(matches!(outcomes[1], RecordOutcome::Appended { .. }));
        assert_eq!(outcomes[2], RecordOutcome::Full);
        assert_eq!(outcomes[3], RecordOutcome::Full);
        assert_eq!(recorder.message().as_str(), "..");
    }

    #[test]
    fn finalize_while_idle_is_ignored() {
        let state = StateCell::new();
        let mut recorder = Recorder::<16>::new(&state);

        assert_eq!(
            recorder.handle(ButtonEvent::Finalize),
            RecordOutcome::Ignored(SystemState::Idle)
        );
        assert_eq!(state.get(), SystemState::Idle);
    }

    #[test]
    fn finalize_on_an_empty_recording_is_ignored() {
        let state = StateCell::new();
        let mut recorder = Recorder::<16>::new(&state);
        recorder.handle(symbol(TiltClass::Unknown));

        assert_eq!(
            recorder.handle(ButtonEvent::Finalize),
            RecordOutcome::NothingToSend
        );
        assert_eq!(state.get(), SystemState::Recording);
    }

    #[test]
    fn finalize_hands_out_a_terminated_line() {
        let state = StateCell::new();
        let mut recorder = Recorder::<16>::new(&state);
        recorder.handle(symbol(TiltClass::Unknown));
        recorder.handle(symbol(TiltClass::Left));
        recorder.handle(symbol(TiltClass::Right));

        let RecordOutcome::Finalized(message) = recorder.handle(ButtonEvent::Finalize) else {
            panic!("recording should have been finalized");
        };

        assert_eq!(message.as_str(), ".-  \n");
        assert_eq!(state.get(), SystemState::Sending);
        assert!(recorder.message().is_empty());
    }

    #[test]
    fn presses_during_other_phases_are_ignored() {
        let state = StateCell::new();
        let mut recorder = Recorder::<16>::new(&state);
        state.apply(Transition::CharReceived).unwrap();

        assert_eq!(
            recorder.handle(symbol(TiltClass::Left)),
            RecordOutcome::Ignored(SystemState::Receiving)
        );
        assert_eq!(
            recorder.handle(ButtonEvent::Finalize),
            RecordOutcome::Ignored(SystemState::Receiving)
        );
        assert!(recorder.message().is_empty());
    }

    #[test]
    fn presses_while_sending_leave_the_handed_out_line_alone() {
        let state = StateCell::new();
        let mut recorder = Recorder::<16>::new(&state);
        recorder.handle(symbol(TiltClass::Left));
        let RecordOutcome::Finalized(message) = recorder.handle(ButtonEvent::Finalize) else {
            panic!("recording should have been finalized");
        };

        assert_eq!(
            recorder.handle(symbol(TiltClass::Right)),
            RecordOutcome::Ignored(SystemState::Sending)
        );
        assert_eq!(
            recorder.handle(ButtonEvent::Finalize),
            RecordOutcome::Ignored(SystemState::Sending)
        );
        assert_eq!(message.as_str(), ".  \n");
        assert!(recorder.message().is_empty());
        assert_eq!(state.get(), SystemState::Sending);
    }

    #[test]
    fn presses_while_displaying_are_ignored() {
        let state = StateCell::new();
        let mut recorder = Recorder::<16>::new(&state);
        state.apply(Transition::CharReceived).unwrap();
        state.apply(Transition::LineTerminated).unwrap();

        assert_eq!(
            recorder.handle(symbol(TiltClass::Left)),
            RecordOutcome::Ignored(SystemState::DisplayUpdate)
        );
        assert_eq!(
            recorder.handle(ButtonEvent::Finalize),
            RecordOutcome::Ignored(SystemState::DisplayUpdate)
        );
        assert!(recorder.message().is_empty());
        assert_eq!(state.get(), SystemState::DisplayUpdate);
    }

    #[test]
    fn a_new_recording_starts_from_scratch() {
        let state = StateCell::new();
        let mut recorder = Recorder::<16>::new(&state);
        recorder.handle(symbol(TiltClass::Left));
        recorder.handle(ButtonEvent::Finalize);
        state.apply(Transition::SendComplete).unwrap();

        recorder.handle(symbol(TiltClass::Right));

        assert_eq!(recorder.message().as_str(), "-");
    }
}
