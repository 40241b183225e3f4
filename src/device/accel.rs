use lsm303agr::{
    interface::I2cInterface, mode::MagOneShot, AccelMode, AccelOutputDataRate, AccelScale,
    Lsm303agr,
};
use microbit::{
    hal::{
        prelude::_embedded_hal_blocking_delay_DelayUs as DelayUs,
        twim::{Instance, Pins, Twim},
    },
    pac::twim0::frequency::FREQUENCY_A,
};
use tiltmorse_engine::{ports::TiltSensor, MotionSample};

#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub enum AccelError {
    /// The LSM303AGR did not come up, tilt input is unavailable.
    Init,
    /// A single read went wrong.
    Read,
}

/// The LSM303AGR's accelerometer and temperature sensor, polled over the
/// internal I2C bus.
///
/// The LSM303AGR has no gyroscope, its angular rate is always reported as zero.
pub struct Lsm303Sensor<T> {
    accel: Lsm303agr<I2cInterface<Twim<T>>, MagOneShot>,
}

impl<T> Lsm303Sensor<T>
where
    T: Instance,
{
    /// Brings up the accelerometer at 50 Hz with a ±2 g range.
    pub fn new<D, P>(twim: T, bus_pins: P, delay: &mut D) -> Result<Self, AccelError>
    where
        P: Into<Pins>,
        D: DelayUs<u32>,
    {
        defmt::trace!("Lsm303Sensor::new() enter");

        let i2c = Twim::new(twim, bus_pins.into(), FREQUENCY_A::K100);
        let mut accel = Lsm303agr::new_with_i2c(i2c);
        accel.init().map_err(|_| AccelError::Init)?;

        defmt::trace!("accel init done");

        accel
            .set_accel_scale(AccelScale::G2)
            .map_err(|_| AccelError::Init)?;
        accel
            .set_accel_mode_and_odr(delay, AccelMode::Normal, AccelOutputDataRate::Hz50)
            .map_err(|_| AccelError::Init)?;
        accel.acc_enable_temp().map_err(|_| AccelError::Init)?;

        defmt::trace!("Lsm303Sensor::new() leave");

        Ok(Self { accel })
    }
}

#[allow(clippy::cast_precision_loss)]
fn milli_g_to_g(milli_g: i32) -> f32 {
    milli_g as f32 / 1000.0
}

impl<T> TiltSensor for Lsm303Sensor<T>
where
    T: Instance,
{
    type Error = AccelError;

    fn read(&mut self) -> Result<MotionSample, AccelError> {
        let acceleration = self.accel.acceleration().map_err(|_| AccelError::Read)?;
        let temperature = self.accel.temperature().map_err(|_| AccelError::Read)?;

        Ok(MotionSample {
            ax: milli_g_to_g(acceleration.x_mg()),
            ay: milli_g_to_g(acceleration.y_mg()),
            az: milli_g_to_g(acceleration.z_mg()),
            gx: 0.0,
            gy: 0.0,
            gz: 0.0,
            temperature: temperature.degrees_celsius(),
        })
    }
}
