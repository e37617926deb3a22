//! Label widget.

use super::{Tick, run_tick};
use crate::{
    Context, ViewContext,
    error::Result,
    geom::Vec2,
    layout::{Layout, SizeMode},
    render::{Render, TextStyle},
    style::{Color, Paint},
    text::TextMetrics,
    widget::Widget,
};

/// Static text. Sizes itself to its text by default.
pub struct Label {
    /// Text to display.
    text: String,
    /// Text size.
    text_size: f32,
    /// Text color.
    text_color: Color,
    /// Logical font filename.
    font: Option<String>,
    /// Background fill. Transparent draws no background.
    fill: Color,
    /// Background outline color.
    border: Color,
    /// Background outline thickness.
    border_thickness: f32,
    /// Number of fractional digits shown for numbers in the text.
    decimals: Option<usize>,
    /// Per-frame callback.
    on_tick: Option<Tick<Self>>,
}

impl Label {
    /// Construct a label.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            text_size: 18.0,
            text_color: Color::BLACK,
            font: None,
            fill: Color::TRANSPARENT,
            border: Color::BLACK,
            border_thickness: 0.0,
            decimals: None,
            on_tick: None,
        }
    }

    /// Set the text size.
    pub fn text_size(mut self, size: f32) -> Self {
        self.text_size = size;
        self
    }

    /// Set the text color.
    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// Draw with a named font.
    pub fn font(mut self, name: impl Into<String>) -> Self {
        self.font = Some(name.into());
        self
    }

    /// Draw a background.
    pub fn fill(mut self, color: Color) -> Self {
        self.fill = color;
        self
    }

    /// Outline the background.
    pub fn border(mut self, thickness: f32, color: Color) -> Self {
        self.border_thickness = thickness;
        self.border = color;
        self
    }

    /// Cut numbers in the text to at most `n` fractional digits (up to 6).
    pub fn decimals(mut self, n: usize) -> Self {
        self.decimals = Some(n.min(6));
        self
    }

    /// Per-frame callback.
    pub fn on_tick(
        mut self,
        f: impl FnMut(&mut Self, &mut dyn Context, f32) -> Result<()> + 'static,
    ) -> Self {
        self.on_tick = Some(Box::new(f));
        self
    }

    /// The raw text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. The node is invalidated if the text changed, since
    /// its measured size may have.
    pub fn set_text(&mut self, text: impl Into<String>, ctx: &mut dyn Context) {
        let text = text.into();
        if text != self.text {
            self.text = text;
            ctx.mark_dirty();
        }
    }

    /// The text as drawn.
    pub fn display_text(&self) -> String {
        match self.decimals {
            Some(n) => truncate_decimals(&self.text, n),
            None => self.text.clone(),
        }
    }

    /// The text style.
    fn style(&self) -> TextStyle {
        let style = TextStyle::new(self.text_size, self.text_color);
        match &self.font {
            Some(font) => style.font(font.clone()),
            None => style,
        }
    }
}

/// Keep at most `n` digits after each decimal point that follows a digit.
/// With `n == 0` the point goes too.
fn truncate_decimals(text: &str, n: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let is_point = c == '.'
            && i > 0
            && chars[i - 1].is_ascii_digit()
            && chars.get(i + 1).is_some_and(char::is_ascii_digit);
        if !is_point {
            out.push(c);
            i += 1;
            continue;
        }
        let digits = chars[i + 1..]
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .count();
        if n > 0 {
            out.push('.');
            out.extend(&chars[i + 1..i + 1 + digits.min(n)]);
        }
        i += 1 + digits;
    }
    out
}

impl Widget for Label {
    fn layout(&self) -> Layout {
        Layout::new().size_mode(SizeMode::FitContent)
    }

    fn measure(&self, metrics: &dyn TextMetrics) -> Option<Vec2> {
        Some(metrics.measure(&self.display_text(), self.text_size))
    }

    fn render(&mut self, r: &mut Render<'_>, ctx: &dyn ViewContext) -> Result<()> {
        if self.fill.a > 0 {
            let mut paint = Paint::fill(self.fill);
            if self.border_thickness > 0.0 {
                paint = paint.outline(self.border, self.border_thickness);
            }
            r.rect(ctx.rect(), paint)?;
        }
        let at = ctx.position() + ctx.layout().padding;
        r.text(&self.display_text(), at, &self.style())
    }

    fn update(&mut self, dt: f32, ctx: &mut dyn Context) -> Result<()> {
        run_tick(self, ctx, dt, |l| &mut l.on_tick)
    }
}
