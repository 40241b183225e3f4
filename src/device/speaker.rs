use crate::time::Mono;
use microbit::hal::{
    gpio::{Output, Pin, PushPull},
    pwm::{Channel, Instance, Prescaler, Pwm},
    time::Hertz,
};
use rtic_monotonics::systick::prelude::*;
use tiltmorse_engine::ports::TonePort;

/// The on-board speaker, driven by a PWM square wave at 50% duty.
pub struct Speaker<T: Instance> {
    pwm: Pwm<T>,
}

impl<T> Speaker<T>
where
    T: Instance,
{
    #[must_use]
    pub fn new(pwm: T, pin: Pin<Output<PushPull>>) -> Self {
        let pwm = Pwm::new(pwm);
        pwm.set_output_pin(Channel::C0, pin)
            .set_prescaler(Prescaler::Div4);
        pwm.disable();
        Self { pwm }
    }
}

impl<T> TonePort for Speaker<T>
where
    T: Instance,
{
    async fn play(&mut self, frequency_hz: u32, duration_ms: u32) {
        if frequency_hz > 0 {
            self.pwm.set_period(Hertz(frequency_hz));
            self.pwm.set_duty_on_common(self.pwm.max_duty() / 2);
            self.pwm.enable();
        }
        Mono::delay(duration_ms.millis()).await;
        self.pwm.disable();
    }
}
