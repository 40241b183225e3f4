//! Adapters binding the engine's ports to micro:bit v2 peripherals.

pub mod accel;
pub mod button;
pub mod display;
pub mod errata;
pub mod serial;
pub mod speaker;
