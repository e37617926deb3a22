//! Single-line text input.

use std::{cell::RefCell, rc::Rc};

use super::{Tick, run_tick};
use crate::{
    Context, ViewContext,
    error::Result,
    event::{Event, is_printable, key::KeyCode},
    geom::Vec2,
    render::{Render, TextStyle},
    style::{Color, Paint},
    widget::{EventOutcome, Widget},
};

/// Callback receiving the field's current value.
pub type ValueCallback = Box<dyn FnMut(&str, &mut dyn Context) -> Result<()>>;

/// Seconds between cursor blinks.
const BLINK: f32 = 0.5;

/// Focus ring color.
const FOCUS: Color = Color::rgb(60, 160, 255);

/// A text input. A pointer press inside focuses the field and a press
/// anywhere else blurs it. While focused, printable text appends,
/// Backspace deletes, and Enter blurs and fires `on_enter`.
pub struct TextField {
    /// Current value.
    value: String,
    /// Shared binding kept in sync with the value.
    binding: Option<Rc<RefCell<String>>>,
    /// Shown while the value is empty.
    placeholder: String,
    /// Text size.
    text_size: f32,
    /// Text color.
    text_color: Color,
    /// Placeholder color.
    placeholder_color: Color,
    /// Logical font filename.
    font: Option<String>,
    /// Background fill.
    fill: Color,
    /// Border color when blurred.
    border: Color,
    /// Border thickness when blurred.
    border_thickness: f32,
    /// Receiving text input.
    focused: bool,
    /// Cursor currently drawn.
    show_cursor: bool,
    /// Time since the last blink.
    blink_timer: f32,
    /// Fired after every edit.
    on_change: Option<ValueCallback>,
    /// Fired on Enter.
    on_enter: Option<ValueCallback>,
    /// Per-frame callback.
    on_tick: Option<Tick<Self>>,
}

impl Default for TextField {
    fn default() -> Self {
        Self::new()
    }
}

impl TextField {
    /// Construct an empty field.
    pub fn new() -> Self {
        Self {
            value: String::new(),
            binding: None,
            placeholder: String::new(),
            text_size: 18.0,
            text_color: Color::BLACK,
            placeholder_color: Color::rgba(120, 120, 120, 120),
            font: None,
            fill: Color::WHITE,
            border: Color::BLACK,
            border_thickness: 2.0,
            focused: false,
            show_cursor: false,
            blink_timer: 0.0,
            on_change: None,
            on_enter: None,
            on_tick: None,
        }
    }

    /// Set the initial value.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.push_binding();
        self
    }

    /// Share the value through `binding`. The field takes the binding's
    /// current contents, and edits on either side are visible to the other.
    pub fn bind(mut self, binding: Rc<RefCell<String>>) -> Self {
        self.value = binding.borrow().clone();
        self.binding = Some(binding);
        self
    }

    /// Text shown while the value is empty.
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
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

    /// Set the background fill.
    pub fn fill(mut self, color: Color) -> Self {
        self.fill = color;
        self
    }

    /// Set the border.
    pub fn border(mut self, thickness: f32, color: Color) -> Self {
        self.border_thickness = thickness;
        self.border = color;
        self
    }

    /// Callback fired with the new value after every edit.
    pub fn on_change(
        mut self,
        f: impl FnMut(&str, &mut dyn Context) -> Result<()> + 'static,
    ) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Callback fired with the value when Enter is pressed.
    pub fn on_enter(
        mut self,
        f: impl FnMut(&str, &mut dyn Context) -> Result<()> + 'static,
    ) -> Self {
        self.on_enter = Some(Box::new(f));
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

    /// The current value.
    pub fn text(&self) -> String {
        match &self.binding {
            Some(b) => b.borrow().clone(),
            None => self.value.clone(),
        }
    }

    /// Replace the value without firing callbacks.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.value = text.into();
        self.push_binding();
    }

    /// Clear the value without firing callbacks.
    pub fn clear(&mut self) {
        self.set_text("");
    }

    /// Is the field receiving input?
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Is the cursor currently drawn?
    pub fn cursor_visible(&self) -> bool {
        self.show_cursor
    }

    /// Take the binding's contents if it was changed elsewhere.
    fn pull_binding(&mut self) {
        if let Some(b) = &self.binding {
            let bound = b.borrow();
            if *bound != self.value {
                self.value.clone_from(&bound);
            }
        }
    }

    /// Publish the value to the binding.
    fn push_binding(&self) {
        if let Some(b) = &self.binding {
            b.borrow_mut().clone_from(&self.value);
        }
    }

    /// Apply an edit and notify.
    fn edited(&mut self, ctx: &mut dyn Context) -> Result<()> {
        self.push_binding();
        match self.on_change.as_mut() {
            Some(cb) => cb(&self.value, ctx),
            None => Ok(()),
        }
    }

    /// The text style.
    fn style(&self, color: Color) -> TextStyle {
        let style = TextStyle::new(self.text_size, color);
        match &self.font {
            Some(font) => style.font(font.clone()),
            None => style,
        }
    }
}

impl Widget for TextField {
    fn render(&mut self, r: &mut Render<'_>, ctx: &dyn ViewContext) -> Result<()> {
        self.pull_binding();
        let rect = ctx.rect();
        let (border, thickness) = if self.focused {
            r.rect(
                rect.outset(Vec2::splat(4.0)),
                Paint::fill(Color::rgba(FOCUS.r, FOCUS.g, FOCUS.b, 40)),
            )?;
            (FOCUS, self.border_thickness + 2.5)
        } else {
            (self.border, self.border_thickness)
        };
        let fill = if self.focused {
            self.fill.blend(Color::WHITE, 0.1)
        } else {
            self.fill
        };
        r.rect(rect, Paint::fill(fill).outline(border, thickness))?;

        let mut shown = self.value.clone();
        if self.focused && self.show_cursor {
            shown.push('|');
        }
        let (text, style) = if shown.is_empty() {
            if self.placeholder.is_empty() {
                return Ok(());
            }
            (self.placeholder.clone(), self.style(self.placeholder_color))
        } else {
            (shown, self.style(self.text_color))
        };
        let height = ctx.metrics().measure(&text, self.text_size).y;
        let at = Vec2::new(rect.tl.x + 5.0, rect.tl.y + (rect.h - height) / 2.0);
        r.text(&text, at, &style)
    }

    fn on_event(&mut self, event: &Event, ctx: &mut dyn Context) -> Result<EventOutcome> {
        self.pull_binding();
        if let Event::PointerDown { pos, button } = *event {
            if !button.is_primary() {
                return Ok(EventOutcome::Ignore);
            }
            self.focused = ctx.rect().contains_point(pos);
            return Ok(if self.focused {
                EventOutcome::Handle
            } else {
                EventOutcome::Ignore
            });
        }
        if !self.focused {
            return Ok(EventOutcome::Ignore);
        }
        match *event {
            Event::Text(c) if is_printable(c) => {
                self.value.push(c);
                self.edited(ctx)?;
            }
            Event::KeyDown(k) if k.key == KeyCode::Backspace => {
                if self.value.pop().is_some() {
                    self.edited(ctx)?;
                }
            }
            Event::KeyDown(k) if k.key == KeyCode::Enter => {
                self.focused = false;
                if let Some(cb) = self.on_enter.as_mut() {
                    cb(&self.value, ctx)?;
                }
            }
            _ => return Ok(EventOutcome::Ignore),
        }
        Ok(EventOutcome::Handle)
    }

    fn update(&mut self, dt: f32, ctx: &mut dyn Context) -> Result<()> {
        run_tick(self, ctx, dt, |t| &mut t.on_tick)?;
        if self.focused {
            self.blink_timer += dt;
            if self.blink_timer > BLINK {
                self.show_cursor = !self.show_cursor;
                self.blink_timer = 0.0;
            }
        } else {
            self.show_cursor = false;
            self.blink_timer = 0.0;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Core, NodeId, event::mouse::Button as MouseButton, widgets::Root};

    fn setup(field: TextField) -> (Core, NodeId, NodeId) {
        let mut core = Core::new();
        let root = core.add(Root::new()).id();
        core.add_root(root).unwrap();
        let field = core.add(field).id();
        core.add_child(root, field).unwrap();
        core.compute_layout(root).unwrap();
        (core, root, field)
    }

    fn press(core: &mut Core, root: NodeId, x: f32, y: f32) {
        let ev = Event::PointerDown {
            pos: Vec2::new(x, y),
            button: MouseButton::Left,
        };
        core.dispatch(root, &ev).unwrap();
    }

    #[test]
    fn typing_and_binding() {
        let bound = Rc::new(RefCell::new(String::from("ab")));
        let changes = Rc::new(RefCell::new(Vec::new()));
        let entered = Rc::new(RefCell::new(None));
        let c = changes.clone();
        let e = entered.clone();
        let field = TextField::new()
            .bind(bound.clone())
            .on_change(move |v, _| {
                c.borrow_mut().push(v.to_string());
                Ok(())
            })
            .on_enter(move |v, _| {
                *e.borrow_mut() = Some(v.to_string());
                Ok(())
            });
        let (mut core, root, id) = setup(field);

        // Unfocused fields ignore text.
        core.dispatch(root, &Event::Text('x')).unwrap();
        assert_eq!(*bound.borrow(), "ab");

        press(&mut core, root, 5.0, 5.0);
        assert!(core.widget::<TextField>(id).unwrap().is_focused());
        core.dispatch(root, &Event::Text('c')).unwrap();
        core.dispatch(root, &Event::KeyDown(KeyCode::Backspace.into()))
            .unwrap();
        core.dispatch(root, &Event::KeyDown(KeyCode::Backspace.into()))
            .unwrap();
        assert_eq!(*bound.borrow(), "a");
        assert_eq!(*changes.borrow(), vec!["abc", "ab", "a"]);

        *bound.borrow_mut() = String::from("zz");
        core.dispatch(root, &Event::KeyDown(KeyCode::Enter.into()))
            .unwrap();
        assert_eq!(entered.borrow().as_deref(), Some("zz"));
        assert!(!core.widget::<TextField>(id).unwrap().is_focused());
    }

    #[test]
    fn press_outside_blurs() {
        let (mut core, root, id) = setup(TextField::new());
        press(&mut core, root, 5.0, 5.0);
        press(&mut core, root, 390.0, 290.0);
        assert!(!core.widget::<TextField>(id).unwrap().is_focused());
    }

    #[test]
    fn secondary_press_keeps_focus() {
        let (mut core, root, id) = setup(TextField::new());
        press(&mut core, root, 5.0, 5.0);
        let right = Event::PointerDown {
            pos: Vec2::new(390.0, 290.0),
            button: MouseButton::Right,
        };
        core.dispatch(root, &right).unwrap();
        assert!(core.widget::<TextField>(id).unwrap().is_focused());
    }

    #[test]
    fn cursor_blinks_while_focused() {
        let (mut core, root, id) = setup(TextField::new());
        press(&mut core, root, 5.0, 5.0);
        core.update(root, 0.3).unwrap();
        assert!(!core.widget::<TextField>(id).unwrap().cursor_visible());
        core.update(root, 0.3).unwrap();
        assert!(core.widget::<TextField>(id).unwrap().cursor_visible());
        core.update(root, 0.6).unwrap();
        assert!(!core.widget::<TextField>(id).unwrap().cursor_visible());

        press(&mut core, root, 390.0, 290.0);
        core.update(root, 0.6).unwrap();
        assert!(!core.widget::<TextField>(id).unwrap().cursor_visible());
    }
}
