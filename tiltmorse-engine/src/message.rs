//! The two bounded message buffers.
//!
//! Mutating methods are crate private. Outside of the engine, a buffer can
//! only be read, and only the tasks owning a buffer ever write or clear it.

use crate::config::{INBOUND_CAPACITY, OUTBOUND_CAPACITY};
use heapless::{String, Vec};

/// Appended to a recording when it gets finalized.
pub const LINE_TERMINATOR: &str = "  \n";

/// Ends an inbound line, never stored.
pub const INBOUND_TERMINATOR: u8 = b'\n';

/// Message being recorded, and later sent, by this device.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutboundMessage<const N: usize = OUTBOUND_CAPACITY> {
    text: String<N>,
}

impl<const N: usize> OutboundMessage<N> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the [`LINE_TERMINATOR`] has already been appended.
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.text.ends_with(LINE_TERMINATOR)
    }

    /// Whether another symbol fits while still leaving room for the terminator.
    #[must_use]
    pub fn has_room_for_symbol(&self) -> bool {
        self.text.len() + 1 + LINE_TERMINATOR.len() <= N
    }

    #[must_use]
    pub fn has_room_for_terminator(&self) -> bool {
        self.text.len() + LINE_TERMINATOR.len() <= N
    }

    /// Appends one symbol, returns `false` if the reserve would be violated.
    pub(crate) fn push_symbol(&mut self, symbol: char) -> bool {
        debug_assert!(symbol.is_ascii());
        self.has_room_for_symbol() && self.text.push(symbol).is_ok()
    }

    pub(crate) fn terminate(&mut self) -> bool {
        self.has_room_for_terminator() && self.text.push_str(LINE_TERMINATOR).is_ok()
    }

    pub(crate) fn clear(&mut self) {
        self.text.clear();
    }
}

/// Message received over the serial link, waiting to be played back.
///
/// Holds the bytes as they came off the wire, one byte per slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InboundMessage<const N: usize = INBOUND_CAPACITY> {
    bytes: Vec<u8, N>,
}

impl<const N: usize> InboundMessage<N> {
    #[must_use]
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.bytes.is_full()
    }

    pub(crate) fn push(&mut self, byte: u8) -> bool {
        self.bytes.push(byte).is_ok()
    }

    pub(crate) fn clear(&mut self) {
        self.bytes.clear();
    }
}
