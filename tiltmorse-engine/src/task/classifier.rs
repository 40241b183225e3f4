use crate::{
    config::TILT_THRESHOLDS,
    ports::TiltSensor,
    state::{StateCell, SystemState},
    tilt::{Thresholds, TiltCell, TiltClass},
};

/// Samples the motion sensor and publishes the resulting [`TiltClass`].
pub struct TiltClassifier<'a, S> {
    sensor: S,
    thresholds: Thresholds,
    state: &'a StateCell,
    tilt: &'a TiltCell,
}

impl<'a, S> TiltClassifier<'a, S>
where
    S: TiltSensor,
{
    #[must_use]
    pub fn new(sensor: S, state: &'a StateCell, tilt: &'a TiltCell) -> Self {
        Self::with_thresholds(sensor, TILT_THRESHOLDS, state, tilt)
    }

    #[must_use]
    pub fn with_thresholds(
        sensor: S,
        thresholds: Thresholds,
        state: &'a StateCell,
        tilt: &'a TiltCell,
    ) -> Self {
        Self {
            sensor,
            thresholds,
            state,
            tilt,
        }
    }

    /// One sampling cycle.
    ///
    /// Outside of [`SystemState::Recording`] the sensor is left alone and
    /// `Ok(None)` is returned. A failed read keeps the previously published
    /// class.
    pub fn step(&mut self) -> Result<Option<TiltClass>, S::Error> {
        if self.state.get() != SystemState::Recording {
            return Ok(None);
        }

        let sample = self.sensor.read()?;
        let class = self.thresholds.classify(sample.ax);
        self.tilt.set(class);
        Ok(Some(class))
    }
}
