//! Tilt classes and the values they are derived from.

use core::sync::atomic::{AtomicU8, Ordering};

/// Discrete bucket the accelerometer's X axis falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TiltClass {
    Left = 0,
    Middle = 1,
    Right = 2,
    /// Nothing has been classified yet, or the sensor is unavailable.
    Unknown = 3,
}

impl TiltClass {
    /// The symbol recorded for this class, if any.
    #[must_use]
    pub const fn symbol(self) -> Option<char> {
        match self {
            Self::Left => Some('.'),
            Self::Middle => Some(' '),
            Self::Right => Some('-'),
            Self::Unknown => None,
        }
    }

    const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Left,
            1 => Self::Middle,
            2 => Self::Right,
            _ => Self::Unknown,
        }
    }
}

/// Two bounds partitioning the X axis into left, middle and right.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    lower: f32,
    upper: f32,
}

impl Thresholds {
    /// `lower` is expected not to exceed `upper`.
    #[must_use]
    pub const fn new(lower: f32, upper: f32) -> Self {
        Self { lower, upper }
    }

    #[must_use]
    pub const fn lower(&self) -> f32 {
        self.lower
    }

    #[must_use]
    pub const fn upper(&self) -> f32 {
        self.upper
    }

    /// Values strictly below the lower bound are left, values strictly above
    /// the upper bound are right, everything else (including NaN) is middle.
    #[must_use]
    pub fn classify(&self, x: f32) -> TiltClass {
        if x < self.lower {
            TiltClass::Left
        } else if x > self.upper {
            TiltClass::Right
        } else {
            TiltClass::Middle
        }
    }
}

/// One reading of the motion sensor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionSample {
    /// Acceleration in g.
    pub ax: f32,
    pub ay: f32,
    pub az: f32,
    /// Angular rate in degrees per second.
    pub gx: f32,
    pub gy: f32,
    pub gz: f32,
    /// Die temperature in degrees Celsius.
    pub temperature: f32,
}

/// Shared home of the most recently classified [`TiltClass`].
///
/// Written by the classifier task, read by the button interrupt at the
/// instant of an edge.
#[derive(Debug)]
pub struct TiltCell(AtomicU8);

impl TiltCell {
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicU8::new(TiltClass::Unknown as u8))
    }

    #[must_use]
    pub fn get(&self) -> TiltClass {
        TiltClass::from_raw(self.0.load(Ordering::Acquire))
    }

    pub fn set(&self, class: TiltClass) {
        self.0.store(class as u8, Ordering::Release);
    }
}

impl Default for TiltCell {
    fn default() -> Self {
        Self::new()
    }
}
