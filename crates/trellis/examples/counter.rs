//! A scripted counter window. Drives a few frames of pointer and keyboard
//! input through the engine and prints each frame's draw calls.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use trellis::{
    Gui, NodeId,
    assets::Font,
    dump::dump_plain,
    error::{Error, Result},
    event::{Event, mouse},
    geom::{Rect, Vec2},
    layout::SizeMode,
    render::{Surface, TextStyle, View},
    style::Paint,
    widgets::{Button, Label, List, Root, Slider, TextField},
};
use tracing::Level;
use tracing_subscriber::fmt;

/// A surface that prints draw calls as lines of text.
struct PrintSurface {
    /// Lines drawn this frame.
    lines: Vec<String>,
    /// Current view.
    view: View,
    /// Screen view.
    screen: View,
}

impl PrintSurface {
    /// A surface over an 800x600 screen.
    fn new() -> Self {
        let screen = View::new(Rect::new(0.0, 0.0, 800.0, 600.0));
        Self {
            lines: Vec::new(),
            view: screen,
            screen,
        }
    }

    /// Print and forget this frame's lines.
    fn flush(&mut self, frame: usize) {
        println!("-- frame {frame} --");
        for line in self.lines.drain(..) {
            println!("{line}");
        }
    }
}

impl Surface for PrintSurface {
    fn rect(&mut self, rect: Rect, paint: &Paint) -> Result<()> {
        if paint.fill.is_some_and(|c| c.a > 0) {
            self.lines.push(format!(
                "rect  {:>6.1},{:>6.1} {:>6.1}x{:<6.1}",
                rect.tl.x, rect.tl.y, rect.w, rect.h
            ));
        }
        Ok(())
    }

    fn text(&mut self, text: &str, at: Vec2, style: &TextStyle, _font: Option<&Font>) -> Result<()> {
        self.lines
            .push(format!("text  {:>6.1},{:>6.1} [{}] {text:?}", at.x, at.y, style.size));
        Ok(())
    }

    fn polygon(&mut self, points: &[Vec2], _paint: &Paint) -> Result<()> {
        self.lines.push(format!("poly  {} points", points.len()));
        Ok(())
    }

    fn view(&self) -> View {
        self.view
    }

    fn default_view(&self) -> View {
        self.screen
    }

    fn set_view(&mut self, view: View) {
        self.view = view;
    }
}

/// Center of a node's resolved rectangle.
fn center_of(gui: &Gui, id: NodeId) -> Result<Vec2> {
    gui.core
        .node(id)
        .map(|n| n.rect().center())
        .ok_or(Error::NodeNotFound(id))
}

/// Press and release the primary button at `pos`.
fn click(pos: Vec2) -> Vec<Event> {
    let button = mouse::Button::Left;
    vec![
        Event::PointerMove { pos },
        Event::PointerDown { pos, button },
        Event::PointerUp { pos, button },
    ]
}

/// Press at `from`, move to `to` in four steps, release.
fn drag(from: Vec2, to: Vec2) -> Vec<Event> {
    let button = mouse::Button::Left;
    let mut events = vec![Event::PointerDown { pos: from, button }];
    events.extend((1..=4).map(|i| Event::PointerMove {
        pos: from + (to - from) * (i as f32 / 4.0),
    }));
    events.push(Event::PointerUp { pos: to, button });
    events
}

/// Build the window. Returns the ids the script pokes at.
fn build(gui: &mut Gui, count: &Rc<Cell<i32>>, level: &Rc<Cell<f32>>) -> Result<[NodeId; 4]> {
    let root = gui.create_root(Root::new().title("Counter"))?;
    gui.build(root)
        .offset(40.0, 60.0)
        .padding(10.0, 10.0)
        .size_mode(SizeMode::FitContent)
        .done()?;
    let list = gui.create(root, List::new())?;
    gui.build(list).spacing(8.0).done()?;

    let shown = count.clone();
    gui.create_named(
        list,
        "count",
        Label::new("Count: 0").on_tick(move |label, ctx, _| {
            label.set_text(format!("Count: {}", shown.get()), ctx);
            Ok(())
        }),
    )?;

    let up = count.clone();
    let plus = gui.create(
        list,
        Button::new("+").on_click(move |_| {
            up.set(up.get() + 1);
            Ok(())
        }),
    )?;
    let down = count.clone();
    gui.create(
        list,
        Button::new("-").on_click(move |_| {
            down.set(down.get() - 1);
            Ok(())
        }),
    )?;

    let slider = gui.create(list, Slider::new().bind(level.clone()).step(0.5))?;
    gui.build(slider).size(200.0, 20.0).done()?;
    let read = level.clone();
    gui.create(
        list,
        Label::new("").decimals(1).on_tick(move |label, ctx, _| {
            label.set_text(format!("Level: {}", read.get() / 3.0), ctx);
            Ok(())
        }),
    )?;

    let name = Rc::new(RefCell::new(String::from("anon")));
    let field = gui.create(list, TextField::new().bind(name).placeholder("name"))?;

    Ok([root.id(), plus.id(), slider.id(), field.id()])
}

fn main() -> Result<()> {
    fmt()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .init();

    let mut gui = Gui::new();
    let count = Rc::new(Cell::new(0));
    let level = Rc::new(Cell::new(30.0));
    let [root, plus, slider, field] = build(&mut gui, &count, &level)?;
    let mut surface = PrintSurface::new();

    let mut frame = 0;
    let mut step = |gui: &mut Gui, surface: &mut PrintSurface| -> Result<()> {
        gui.update(1.0 / 60.0)?;
        gui.render(surface)?;
        surface.flush(frame);
        frame += 1;
        Ok(())
    };
    step(&mut gui, &mut surface)?;

    let p = center_of(&gui, plus)?;
    for e in (0..3).flat_map(|_| click(p)) {
        gui.handle_event(&e)?;
    }
    step(&mut gui, &mut surface)?;

    let s = center_of(&gui, slider)?;
    let f = center_of(&gui, field)?;
    let typed = "!?".chars().filter_map(Event::text);
    for e in drag(s, s + Vec2::new(60.0, 0.0)).into_iter().chain(click(f)).chain(typed) {
        gui.handle_event(&e)?;
    }
    step(&mut gui, &mut surface)?;

    println!("{}", dump_plain(&gui.core, root)?);
    println!("count = {}, level = {}", count.get(), level.get());
    Ok(())
}
