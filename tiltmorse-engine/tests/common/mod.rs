//! Recording stand-ins for the board's leaf collaborators.

#![allow(dead_code)]

use embedded_hal_async::delay::DelayNs;
use std::{cell::RefCell, collections::VecDeque, rc::Rc};
use tiltmorse_engine::ports::{DisplayPort, SerialRx, SerialTx, TonePort};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Clear,
    Text(String),
    Tone { frequency_hz: u32, duration_ms: u32 },
    Pause(u32),
    Line(String),
}

/// Every call made to any of the mocks, in order.
#[derive(Clone, Debug, Default)]
pub struct Timeline(Rc<RefCell<Vec<Call>>>);

impl Timeline {
    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub fn tones(&self) -> Vec<u32> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Tone { duration_ms, .. } => Some(duration_ms),
                _ => None,
            })
            .collect()
    }

    pub fn lines(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Line(line) => Some(line),
                _ => None,
            })
            .collect()
    }

    fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }
}

pub struct Display(pub Timeline);

impl DisplayPort for Display {
    fn clear(&mut self) {
        self.0.push(Call::Clear);
    }

    fn write_text(&mut self, text: &[u8]) {
        self.0.push(Call::Text(String::from_utf8_lossy(text).into_owned()));
    }
}

pub struct Speaker(pub Timeline);

impl TonePort for Speaker {
    async fn play(&mut self, frequency_hz: u32, duration_ms: u32) {
        self.0.push(Call::Tone {
            frequency_hz,
            duration_ms,
        });
    }
}

pub struct Clock(pub Timeline);

impl DelayNs for Clock {
    async fn delay_ns(&mut self, ns: u32) {
        self.0.push(Call::Pause(ns / 1_000_000));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.0.push(Call::Pause(ms));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkDown;

/// Loop-back serial link: written lines are recorded and can be fed back
/// into the receiving half.
pub struct Link {
    timeline: Timeline,
    incoming: VecDeque<u8>,
    pub down: bool,
}

impl Link {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            incoming: VecDeque::new(),
            down: false,
        }
    }

    pub fn feed(&mut self, bytes: impl AsRef<[u8]>) {
        self.incoming.extend(bytes.as_ref());
    }
}

impl SerialRx for Link {
    fn try_read_byte(&mut self) -> Option<u8> {
        self.incoming.pop_front()
    }
}

impl SerialTx for Link {
    type Error = LinkDown;

    async fn write_line(&mut self, line: &str) -> Result<(), LinkDown> {
        if self.down {
            return Err(LinkDown);
        }
        self.timeline.push(Call::Line(line.to_owned()));
        Ok(())
    }
}
