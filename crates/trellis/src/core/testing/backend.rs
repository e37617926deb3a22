use crate::{
    assets::Font,
    error::{Error, Result},
    geom::{Rect, Vec2},
    render::{Surface, TextStyle, View},
    style::Paint,
};

/// A draw call captured by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// A rectangle.
    Rect {
        /// Rectangle drawn.
        rect: Rect,
        /// Paint used.
        paint: Paint,
    },
    /// A run of text.
    Text {
        /// Text drawn.
        text: String,
        /// Top-left corner.
        at: Vec2,
        /// Text size.
        size: f32,
        /// Name of the loaded font, if one was used.
        font: Option<String>,
    },
    /// A convex polygon.
    Polygon {
        /// Vertices in order.
        points: Vec<Vec2>,
        /// Paint used.
        paint: Paint,
    },
}

/// A [`Surface`] that records every draw call and view change instead of
/// drawing.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    /// Draw calls in order.
    pub ops: Vec<DrawOp>,
    /// Every view set, in order.
    pub views: Vec<View>,
    /// The current view.
    view: View,
    /// The screen-space view.
    default_view: View,
    /// Fail every draw call after this many have succeeded.
    fail_after: Option<usize>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(Rect::new(0.0, 0.0, 800.0, 600.0))
    }
}

impl RecordingSurface {
    /// A surface whose screen-space view covers `screen`.
    pub fn new(screen: Rect) -> Self {
        let view = View::new(screen);
        Self {
            ops: Vec::new(),
            views: Vec::new(),
            view,
            default_view: view,
            fail_after: None,
        }
    }

    /// Make every draw call fail once `n` calls have been recorded.
    pub fn fail_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }

    /// Forget recorded calls.
    pub fn clear(&mut self) {
        self.ops.clear();
        self.views.clear();
    }

    /// All recorded text runs, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Does any recorded text run contain `needle`?
    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }

    /// Record an op, or fail if the failure threshold was reached.
    fn record(&mut self, op: DrawOp) -> Result<()> {
        if self.fail_after.is_some_and(|n| self.ops.len() >= n) {
            return Err(Error::Render("recording surface failure".into()));
        }
        self.ops.push(op);
        Ok(())
    }
}

impl Surface for RecordingSurface {
    fn rect(&mut self, rect: Rect, paint: &Paint) -> Result<()> {
        self.record(DrawOp::Rect {
            rect,
            paint: *paint,
        })
    }

    fn text(&mut self, text: &str, at: Vec2, style: &TextStyle, font: Option<&Font>) -> Result<()> {
        self.record(DrawOp::Text {
            text: text.to_string(),
            at,
            size: style.size,
            font: font.map(|f| f.name.clone()),
        })
    }

    fn polygon(&mut self, points: &[Vec2], paint: &Paint) -> Result<()> {
        self.record(DrawOp::Polygon {
            points: points.to_vec(),
            paint: *paint,
        })
    }

    fn view(&self) -> View {
        self.view
    }

    fn default_view(&self) -> View {
        self.default_view
    }

    fn set_view(&mut self, view: View) {
        self.views.push(view);
        self.view = view;
    }
}
