//! Task bodies.
//!
//! Each type in here holds the state of one firmware task and exposes the
//! work of a single iteration. Scheduling (periods, channels, priorities) is
//! left to the firmware.

pub mod classifier;
pub mod receiver;
pub mod recorder;
pub mod renderer;
pub mod sender;
