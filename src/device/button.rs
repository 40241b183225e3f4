use core::marker::PhantomData;
use microbit::{
    gpio::{BTN_A, BTN_B},
    hal::{
        gpio::{Floating, Input, Pin},
        gpiote::Gpiote,
    },
};
use rtic_sync::channel::{Sender, TrySendError};
use tiltmorse_engine::{
    config::BUTTON_MAILBOX_CAPACITY, input::Instant, ButtonEvent, ButtonSource, InputCaptor,
};

pub struct Started;

pub struct Stopped;

/// Button A (symbol) on GPIOTE channel 0, button B (finalize) on channel 1.
pub struct ButtonResources {
    gpiote: Gpiote,
    symbol: Pin<Input<Floating>>,
    finalize: Pin<Input<Floating>>,
}

impl ButtonResources {
    #[must_use]
    pub fn new(gpiote: Gpiote, button_a: BTN_A, button_b: BTN_B) -> Self {
        Self {
            gpiote,
            symbol: button_a.degrade(),
            finalize: button_b.degrade(),
        }
    }
}

/// Interrupt side of the input handling, turning falling edges of both
/// buttons into [`ButtonEvent`]s.
pub struct ButtonDriver<'a, S> {
    res: ButtonResources,
    captor: InputCaptor<'a>,
    command_pipe: Sender<'a, ButtonEvent, BUTTON_MAILBOX_CAPACITY>,
    s: PhantomData<S>,
}

impl<'a> ButtonDriver<'a, Stopped> {
    #[must_use]
    pub fn new(
        res: ButtonResources,
        captor: InputCaptor<'a>,
        mailbox: Sender<'a, ButtonEvent, BUTTON_MAILBOX_CAPACITY>,
    ) -> Self {
        res.gpiote
            .channel0()
            .input_pin(&res.symbol)
            .hi_to_lo()
            .disable_interrupt();
        res.gpiote
            .channel1()
            .input_pin(&res.finalize)
            .hi_to_lo()
            .disable_interrupt();
        res.gpiote.reset_events();

        Self {
            res,
            captor,
            command_pipe: mailbox,
            s: PhantomData,
        }
    }

    #[must_use]
    pub fn start(self) -> ButtonDriver<'a, Started> {
        self.res
            .gpiote
            .channel0()
            .input_pin(&self.res.symbol)
            .enable_interrupt();
        self.res
            .gpiote
            .channel1()
            .input_pin(&self.res.finalize)
            .enable_interrupt();
        ButtonDriver {
            res: self.res,
            captor: self.captor,
            command_pipe: self.command_pipe,
            s: PhantomData,
        }
    }
}

impl<'a> ButtonDriver<'a, Started> {
    /// Handles a pending GPIOTE interrupt.
    ///
    /// Edges rejected by the debouncer are dropped, accepted ones are posted
    /// without waiting.
    pub fn handle_button_event(&mut self, now: Instant) -> Result<(), TrySendError<ButtonEvent>> {
        // There is a single GPIOTE IRQ for all channels, so check both of them.
        for (source, triggered) in [
            (ButtonSource::Symbol, self.res.gpiote.channel0().is_event_triggered()),
            (
                ButtonSource::Finalize,
                self.res.gpiote.channel1().is_event_triggered(),
            ),
        ] {
            if !triggered {
                continue;
            }
            match source {
                ButtonSource::Symbol => self.res.gpiote.channel0().reset_events(),
                ButtonSource::Finalize => self.res.gpiote.channel1().reset_events(),
            }

            match self.captor.capture(source, now) {
                Some(event) => self.command_pipe.try_send(event)?,
                None => defmt::trace!("Ignoring bouncing {} edge.", source),
            }
        }
        Ok(())
    }
}
