use crate::foundation::core::{Point, Rect};
use crate::surface::Text;

/// Font metrics expressed as fractions of the font size.
///
/// A single average advance is used for every character, which keeps layout deterministic and
/// independent of installed fonts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// Horizontal advance per character.
    pub advance_em: f64,
    /// Distance from the top of the line box to the baseline.
    pub ascent_em: f64,
    /// Height of the line box.
    pub line_height_em: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            advance_em: 0.6,
            ascent_em: 0.9,
            line_height_em: 1.2,
        }
    }
}

impl TextMetrics {
    /// Line box of `text` with its top-left corner at `origin`.
    pub fn bounds(&self, origin: Point, text: &Text) -> Rect {
        let width = self.advance_em * text.size * text.char_count() as f64;
        let height = self.line_height_em * text.size;
        Rect::new(origin.x, origin.y, origin.x + width, origin.y + height)
    }

    /// Baseline y for a line whose top sits at `top`.
    pub fn baseline(&self, top: f64, size: f64) -> f64 {
        top + self.ascent_em * size
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/metrics.rs"]
mod tests;
