//! Time base shared by all tasks.

use embedded_hal_async::delay::DelayNs;
use rtic_monotonics::systick::prelude::*;

systick_monotonic!(Mono, 1_000);

/// Core clock feeding the SysTick.
pub const SYSCLK_HZ: u32 = 64_000_000;

/// [`DelayNs`] backed by [`Mono`], rounding up to whole milliseconds.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonoDelay;

impl DelayNs for MonoDelay {
    async fn delay_ns(&mut self, ns: u32) {
        Mono::delay(ns.div_ceil(1_000_000).millis()).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        Mono::delay(ms.millis()).await;
    }
}
