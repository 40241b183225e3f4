//! Platform agnostic core of `tiltmorse`.
//!
//! The engine turns button edges, accelerometer samples and incoming serial
//! bytes into a consistent sequence of [`SystemState`]s and two bounded
//! message buffers. It never touches hardware directly, everything it needs
//! from the board is reached through the traits in [`ports`].
//!
//! Ownership of the buffers is explicit:
//!
//! - [`Recorder`] is the only writer of an [`OutboundMessage`]. On
//!   finalization the buffer is moved out and handed to a [`Sender`], which
//!   is the only one to ever clear it.
//! - [`Receiver`] is the only writer of an [`InboundMessage`]. On line
//!   termination the buffer is moved out and handed to a [`Renderer`], which
//!   clears it once playback is done.
//!
//! [`SystemState`] lives in a [`StateCell`] shared by reference. Every
//! transition is a single compare-and-swap, so checking the state and
//! leaving it can never be torn apart by a preempting context.

#![cfg_attr(not(test), no_std)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
// The following lints are disabled (=`allow`ed) for the moment being. Turn them
// active once you start documenting the public interface properly.
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]
// the port traits are implemented on a single core executor, `Send` bounds
// on the returned futures are of no use there
#![allow(async_fn_in_trait)]

pub mod calibration;
pub mod config;
pub mod input;
pub mod message;
pub mod ports;
pub mod state;
pub mod task;
pub mod tilt;

pub use input::{ButtonEvent, ButtonSource, Debouncer, InputCaptor};
pub use message::{InboundMessage, OutboundMessage};
pub use state::{StateCell, SystemState, Transition};
pub use task::{
    classifier::TiltClassifier,
    receiver::{ReceiveOutcome, Receiver},
    recorder::{RecordOutcome, Recorder},
    renderer::{PlaybackTiming, RenderError, Renderer},
    sender::{SendError, Sender},
};
pub use tilt::{MotionSample, Thresholds, TiltCell, TiltClass};
