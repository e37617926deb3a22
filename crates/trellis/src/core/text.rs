//! Text measurement.

use unicode_width::UnicodeWidthStr;

use crate::geom::Vec2;

/// Measures text for intrinsic sizing.
pub trait TextMetrics {
    /// Size of `text` drawn at `size` points.
    fn measure(&self, text: &str, size: f32) -> Vec2;
}

/// Monospace metrics: every display column advances by the same fraction of
/// the text size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Monospace {
    /// Horizontal advance per display column, as a fraction of text size.
    pub advance: f32,
    /// Line height, as a fraction of text size.
    pub line_height: f32,
}

impl Default for Monospace {
    fn default() -> Self {
        Self {
            advance: 0.6,
            line_height: 1.2,
        }
    }
}

impl TextMetrics for Monospace {
    fn measure(&self, text: &str, size: f32) -> Vec2 {
        if text.is_empty() {
            return Vec2::ZERO;
        }
        let (columns, lines) = text
            .split('\n')
            .fold((0usize, 0usize), |(w, n), line| (w.max(line.width()), n + 1));
        Vec2::new(
            columns as f32 * size * self.advance,
            lines as f32 * size * self.line_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monospace() {
        let m = Monospace {
            advance: 0.5,
            line_height: 1.0,
        };
        assert_eq!(m.measure("", 20.0), Vec2::ZERO);
        assert_eq!(m.measure("abcd", 20.0), Vec2::new(40.0, 20.0));
        assert_eq!(m.measure("ab\nabcdef", 10.0), Vec2::new(30.0, 20.0));
        // Wide characters take two columns.
        assert_eq!(m.measure("日本", 10.0), Vec2::new(20.0, 10.0));
    }
}
