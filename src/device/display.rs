use tiny_led_matrix::{Render, MAX_BRIGHTNESS};

const MATRIX_WIDTH: usize = 5;

const DOT_BRIGHTNESS: u8 = 3;
const OTHER_BRIGHTNESS: u8 = 6;

/// Lays out text on the 5x5 matrix, one byte per LED in row-major order.
/// Bytes past the 25th are cut off.
///
/// Dots are dim, dashes are bright, spaces stay dark and any other
/// byte sits in between.
pub struct TextRenderer<'a>(&'a [u8]);

impl<'a> TextRenderer<'a> {
    #[must_use]
    pub fn new(text: &'a [u8]) -> Self {
        Self(text)
    }

    fn brightness_of(byte: u8) -> u8 {
        match byte {
            b'.' => DOT_BRIGHTNESS,
            b'-' => MAX_BRIGHTNESS,
            b' ' => 0,
            _ => OTHER_BRIGHTNESS,
        }
    }
}

impl Render for TextRenderer<'_> {
    fn brightness_at(&self, x: usize, y: usize) -> u8 {
        self.0
            .get(y * MATRIX_WIDTH + x)
            .map_or(0, |&byte| Self::brightness_of(byte))
    }
}
