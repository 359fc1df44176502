//! Mapping a horizontal pixel position to a character offset.

/// Font metrics the console needs to place the cursor from a click.
pub trait CursorLocator {
    /// X coordinate where the first glyph starts.
    fn origin(&self) -> f32;

    /// Horizontal advance of `c`.
    fn advance(&self, c: char) -> f32;

    /// The glyph boundary nearest to `x`.
    ///
    /// Left of the text maps to 0 and right of it to `text.len()`. A click
    /// exactly halfway across a glyph lands after it.
    fn offset_at(&self, text: &str, x: f32) -> usize {
        let mut left = self.origin();
        if x < left {
            return 0;
        }
        for (offset, c) in text.char_indices() {
            let right = left + self.advance(c);
            if x <= right {
                return if x - left < right - x {
                    offset
                } else {
                    offset + c.len_utf8()
                };
            }
            left = right;
        }
        text.len()
    }
}

/// Every glyph has the same advance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceLocator {
    pub origin: f32,
    pub advance: f32,
}

impl MonospaceLocator {
    pub fn new(origin: f32, advance: f32) -> Self {
        Self { origin, advance }
    }
}

impl CursorLocator for MonospaceLocator {
    fn origin(&self) -> f32 {
        self.origin
    }

    fn advance(&self, _c: char) -> f32 {
        self.advance
    }
}
