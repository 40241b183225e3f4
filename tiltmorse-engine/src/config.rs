//! Compile-time configuration.
//!
//! The device has no runtime configuration store, all tunables are fixed at
//! build time and collected here.

use crate::{
    input::Duration,
    task::renderer::PlaybackTiming,
    tilt::Thresholds,
};

/// Capacity of the outbound message in bytes, including the line terminator.
pub const OUTBOUND_CAPACITY: usize = 2048;

/// Capacity of the inbound message in bytes.
pub const INBOUND_CAPACITY: usize = 127;

/// Bounds on the accelerometer X axis (in g) separating left, middle and right.
pub const TILT_THRESHOLDS: Thresholds = Thresholds::new(-0.3, 0.3);

/// Minimum time between two accepted edges of the same button.
pub const DEBOUNCE_WINDOW: Duration = Duration::millis(200);

/// Debounce window used by the calibration utility.
pub const CALIBRATION_DEBOUNCE_WINDOW: Duration = Duration::millis(300);

/// Sampling period of the tilt classifier.
pub const CLASSIFIER_PERIOD: Duration = Duration::millis(50);

/// Polling period of the serial receiver.
pub const RECEIVER_PERIOD: Duration = Duration::millis(10);

/// Tone and pause lengths used when playing back a received message.
pub const PLAYBACK: PlaybackTiming = PlaybackTiming::DEFAULT;

/// Number of button events that may be queued between the interrupt and the
/// recording task.
pub const BUTTON_MAILBOX_CAPACITY: usize = 4;

/// Text shown on the display once a message went out.
pub const SENT_CONFIRMATION: &str = "Msg sent!";
