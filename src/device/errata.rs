//! Known errata of the micro:bit v2.

use microbit::{
    hal::{
        prelude::_embedded_hal_blocking_delay_DelayUs as DelayUs,
        twim::{Error, Instance, Pins, Twim},
    },
    pac::twim0::frequency::FREQUENCY_A,
};

/// Address of the interface MCU on the internal I2C bus.
const INTERFACE_MCU_ADDRESS: u8 = 0x70;

/// The interface MCU holds the shared internal I2C interrupt line low until
/// someone reads from it, which keeps the LSM303AGR from being talked to.
/// See
/// <https://zephyrproject.org/missing-interrupts-with-zephyr-rtos-on-the-microbit-v2-21/>
/// for details.
///
/// The bus is handed back in any case, a failed read is reported alongside.
pub fn clear_int_i2c_interrupt_line<T, P, D>(
    twim: T,
    bus_pins: P,
    delay: &mut D,
) -> ((T, Pins), Result<(), Error>)
where
    T: Instance,
    P: Into<Pins>,
    D: DelayUs<u32>,
{
    let mut i2c = Twim::new(twim, bus_pins.into(), FREQUENCY_A::K100);

    // the interface MCU needs a second after reset before it answers
    delay.delay_us(1_000_000);
    let mut status = [0; 5];
    let read = i2c.read(INTERFACE_MCU_ADDRESS, &mut status);
    (i2c.free(), read)
}
