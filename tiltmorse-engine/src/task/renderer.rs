use crate::{
    config::PLAYBACK,
    message::InboundMessage,
    ports::{DisplayPort, TonePort},
    state::{StateCell, SystemState, Transition},
};
use embedded_hal_async::delay::DelayNs;

/// Tone and pause lengths of the audible playback, all in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlaybackTiming {
    pub frequency_hz: u32,
    pub dot_ms: u32,
    pub dash_ms: u32,
    /// Silence following every tone.
    pub gap_ms: u32,
    /// Silence standing in for a space.
    pub space_ms: u32,
    /// How long the text stays on the display after playback.
    pub dwell_ms: u32,
}

impl PlaybackTiming {
    pub const DEFAULT: Self = Self {
        frequency_hz: 1000,
        dot_ms: 100,
        dash_ms: 300,
        gap_ms: 100,
        space_ms: 700,
        dwell_ms: 1500,
    };
}

impl Default for PlaybackTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderError {
    /// A message showed up outside of [`SystemState::DisplayUpdate`].
    UnexpectedState(SystemState),
}

/// Shows and plays back received messages, then clears them.
pub struct Renderer<'a, D, T, W> {
    state: &'a StateCell,
    display: D,
    tone: T,
    delay: W,
    timing: PlaybackTiming,
}

impl<'a, D, T, W> Renderer<'a, D, T, W>
where
    D: DisplayPort,
    T: TonePort,
    W: DelayNs,
{
    #[must_use]
    pub fn new(state: &'a StateCell, display: D, tone: T, delay: W) -> Self {
        Self::with_timing(state, display, tone, delay, PLAYBACK)
    }

    #[must_use]
    pub fn with_timing(
        state: &'a StateCell,
        display: D,
        tone: T,
        delay: W,
        timing: PlaybackTiming,
    ) -> Self {
        Self {
            state,
            display,
            tone,
            delay,
            timing,
        }
    }

    /// Renders `message`, clears it and returns the device to
    /// [`SystemState::Idle`].
    ///
    /// Outside of [`SystemState::DisplayUpdate`] the message is cleared
    /// without being shown.
    pub async fn render<const N: usize>(
        &mut self,
        message: &mut InboundMessage<N>,
    ) -> Result<(), RenderError> {
        let current = self.state.get();
        if current != SystemState::DisplayUpdate {
            message.clear();
            return Err(RenderError::UnexpectedState(current));
        }

        self.display.clear();
        self.display.write_text(message.as_bytes());
        self.play(message.as_bytes()).await;
        self.delay.delay_ms(self.timing.dwell_ms).await;

        message.clear();
        self.state
            .apply(Transition::DisplayComplete)
            .map(|_| ())
            .map_err(RenderError::UnexpectedState)
    }

    async fn play(&mut self, text: &[u8]) {
        let PlaybackTiming {
            frequency_hz,
            dot_ms,
            dash_ms,
            gap_ms,
            space_ms,
            ..
        } = self.timing;

        for &symbol in text {
            match symbol {
                b'.' => {
                    self.tone.play(frequency_hz, dot_ms).await;
                    self.delay.delay_ms(gap_ms).await;
                }
                b'-' => {
                    self.tone.play(frequency_hz, dash_ms).await;
                    self.delay.delay_ms(gap_ms).await;
                }
                b' ' => self.delay.delay_ms(space_ms).await,
                _ => {}
            }
        }
    }
}
