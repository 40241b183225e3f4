//! Interrupt side of the button handling.
//!
//! [`InputCaptor`] runs inside the edge interrupt. It debounces, latches the
//! current tilt and produces a [`ButtonEvent`] for the recording task. It
//! never blocks, allocates or touches a message buffer.

use crate::{
    config::DEBOUNCE_WINDOW,
    tilt::{TiltCell, TiltClass},
};

/// Millisecond timestamp as handed out by a 1 kHz monotonic.
pub type Instant = fugit::TimerInstantU32<1000>;

/// Millisecond duration matching [`Instant`].
pub type Duration = fugit::TimerDurationU32<1000>;

/// The physical input an edge originates from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonSource {
    Symbol,
    Finalize,
}

/// Accepted edge, ready to be applied by the recording task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Symbol press, carrying the tilt class latched at the edge.
    Symbol(TiltClass),
    Finalize,
}

/// Suppresses edges following an accepted one too closely.
#[derive(Clone, Copy, Debug)]
pub struct Debouncer {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl Debouncer {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    /// Accepts `now` if at least the window has elapsed since the last
    /// accepted edge. The very first edge is always accepted.
    pub fn accept(&mut self, now: Instant) -> bool {
        let accepted = self.last_accepted.map_or(true, |last| {
            now.checked_duration_since(last)
                .map_or(true, |elapsed| elapsed >= self.window)
        });
        if accepted {
            self.last_accepted = Some(now);
        }
        accepted
    }
}

/// Debounces both buttons independently and turns accepted edges into events.
#[derive(Debug)]
pub struct InputCaptor<'a> {
    symbol: Debouncer,
    finalize: Debouncer,
    tilt: &'a TiltCell,
}

impl<'a> InputCaptor<'a> {
    #[must_use]
    pub const fn new(tilt: &'a TiltCell) -> Self {
        Self::with_window(tilt, DEBOUNCE_WINDOW)
    }

    #[must_use]
    pub const fn with_window(tilt: &'a TiltCell, window: Duration) -> Self {
        Self {
            symbol: Debouncer::new(window),
            finalize: Debouncer::new(window),
            tilt,
        }
    }

    /// Handles a falling edge of `source` observed at `now`.
    ///
    /// Returns `None` if the edge bounced.
    pub fn capture(&mut self, source: ButtonSource, now: Instant) -> Option<ButtonEvent> {
        match source {
            ButtonSource::Symbol => self
                .symbol
                .accept(now)
                .then(|| ButtonEvent::Symbol(self.tilt.get())),
            ButtonSource::Finalize => self.finalize.accept(now).then_some(ButtonEvent::Finalize),
        }
    }
}
