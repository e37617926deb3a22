//! Integration tests for event, update and render traversal.

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use trellis::{
        Context, EventOutcome, NodeId, Widget,
        error::{Error, Result},
        event::Event,
        geom::Vec2,
        testing::{Harness, Probe},
        widgets::{Button, Label, List, Root},
    };

    type Log = Rc<RefCell<Vec<String>>>;

    fn log() -> Log {
        Rc::default()
    }

    fn push(log: &Log, entry: &str) {
        log.borrow_mut().push(entry.to_string());
    }

    /// Appends a probe beside itself the first time it sees an event.
    struct Spawner {
        /// The probe to append.
        pending: Option<Probe>,
    }

    impl Widget for Spawner {
        fn on_event(&mut self, _event: &Event, ctx: &mut dyn Context) -> Result<EventOutcome> {
            if let (Some(probe), Some(parent)) = (self.pending.take(), ctx.parent()) {
                let id = ctx.add_boxed(Box::new(probe));
                ctx.add_child(parent, id)?;
            }
            Ok(EventOutcome::Handle)
        }
    }

    /// Removes a node, possibly itself, on the first event.
    struct Remover {
        /// The node to remove.
        target: Option<NodeId>,
    }

    impl Widget for Remover {
        fn on_event(&mut self, _event: &Event, ctx: &mut dyn Context) -> Result<EventOutcome> {
            let target = self.target.take().unwrap_or_else(|| ctx.node_id());
            ctx.remove_subtree(target)?;
            Ok(EventOutcome::Handle)
        }
    }

    fn button(log: &Log) -> Button {
        let (a, b, c, d, e) = (log.clone(), log.clone(), log.clone(), log.clone(), log.clone());
        Button::new("ok")
            .on_press(move |_| {
                push(&a, "press");
                Ok(())
            })
            .on_click(move |_| {
                push(&b, "click");
                Ok(())
            })
            .on_release(move |_| {
                push(&c, "release");
                Ok(())
            })
            .on_hover(move |_| {
                push(&d, "hover");
                Ok(())
            })
            .on_leave(move |_| {
                push(&e, "leave");
                Ok(())
            })
    }

    fn harness_with_root() -> Result<(Harness, NodeId)> {
        let mut h = Harness::new();
        let root = h.gui.create_root(Root::new())?.id();
        Ok((h, root))
    }

    #[test]
    fn button_press_click_release() -> Result<()> {
        let (mut h, root) = harness_with_root()?;
        let log = log();
        h.gui.create(root, button(&log))?;
        h.frame(0.0)?;

        h.pointer_move(20.0, 20.0)?;
        h.click(20.0, 20.0)?;
        h.press(20.0, 20.0)?;
        h.pointer_move(300.0, 200.0)?;
        h.release(300.0, 200.0)?;
        assert_eq!(
            *log.borrow(),
            vec!["hover", "press", "click", "release", "press", "leave", "release"]
        );
        Ok(())
    }

    #[test]
    fn disabled_nodes_see_no_events_or_updates() -> Result<()> {
        let (mut h, root) = harness_with_root()?;
        let log = log();
        let b = h.gui.create(root, button(&log))?;
        let gate = Probe::container();
        let inner = Probe::leaf();
        let (gc, ic) = (gate.counts(), inner.counts());
        let gate = h.gui.create(root, gate)?;
        h.gui.create(gate, inner)?;
        h.gui.core.set_enabled(b, false)?;
        h.gui.core.set_enabled(gate, false)?;

        h.frame(0.1)?;
        h.click(20.0, 20.0)?;
        h.key('x')?;
        h.frame(0.1)?;

        assert!(log.borrow().is_empty());
        for c in [&gc, &ic] {
            assert_eq!(c.events.get(), 0);
            assert_eq!(c.updates.get(), 0);
            assert_eq!(c.renders.get(), 2);
        }
        assert!(h.surface.contains_text("ok"));
        Ok(())
    }

    #[test]
    fn hidden_nodes_still_handle_events() -> Result<()> {
        let (mut h, root) = harness_with_root()?;
        let probe = Probe::leaf();
        let counts = probe.counts();
        let probe = h.gui.create(root, probe)?;
        h.gui.core.set_visible(probe, false)?;

        h.frame(0.1)?;
        h.click(5.0, 5.0)?;
        assert_eq!(counts.renders.get(), 0);
        assert_eq!(counts.events.get(), 2);
        assert_eq!(counts.updates.get(), 1);
        Ok(())
    }

    #[test]
    fn hidden_container_still_renders_children() -> Result<()> {
        let (mut h, root) = harness_with_root()?;
        let panel = Probe::container();
        let child = Probe::leaf();
        let (pc, cc) = (panel.counts(), child.counts());
        let panel = h.gui.create(root, panel)?;
        h.gui.create(panel, child)?;
        h.gui.core.set_visible(panel, false)?;

        h.frame(0.1)?;
        assert_eq!(pc.renders.get(), 0);
        assert_eq!(cc.renders.get(), 1);
        Ok(())
    }

    #[test]
    fn failing_handler_does_not_stop_fan_out() -> Result<()> {
        let (mut h, root) = harness_with_root()?;
        let failing = Button::new("x").on_press(|_| Err(Error::Invalid("press".into())));
        h.gui.create(root, failing)?;
        let after = Probe::leaf();
        let counts = after.counts();
        h.gui.create(root, after)?;
        let other = Probe::leaf();
        let other_counts = other.counts();
        h.gui.create_root(other)?;
        h.frame(0.0)?;

        assert!(matches!(h.press(20.0, 20.0), Err(Error::Invalid(_))));
        assert_eq!(counts.events.get(), 1);
        assert_eq!(other_counts.events.get(), 1);
        Ok(())
    }

    #[test]
    fn failing_tick_does_not_stop_update() -> Result<()> {
        let (mut h, root) = harness_with_root()?;
        h.gui.create(
            root,
            Label::new("x").on_tick(|_, _, _| Err(Error::Invalid("tick".into()))),
        )?;
        let after = Probe::leaf();
        let counts = after.counts();
        h.gui.create(root, after)?;

        assert!(h.gui.update(0.1).is_err());
        assert_eq!(counts.updates.get(), 1);
        Ok(())
    }

    #[test]
    fn consume_stops_children_not_siblings() -> Result<()> {
        let (mut h, root) = harness_with_root()?;
        let wall = Probe::container().outcome(EventOutcome::Consume);
        let behind = Probe::leaf();
        let sibling = Probe::leaf();
        let (wc, bc, sc) = (wall.counts(), behind.counts(), sibling.counts());
        let wall = h.gui.create(root, wall)?;
        h.gui.create(wall, behind)?;
        h.gui.create(root, sibling)?;

        h.pointer_move(1.0, 1.0)?;
        assert_eq!(wc.events.get(), 1);
        assert_eq!(bc.events.get(), 0);
        assert_eq!(sc.events.get(), 1);
        Ok(())
    }

    #[test]
    fn handled_events_still_fan_out() -> Result<()> {
        let (mut h, root) = harness_with_root()?;
        let first = Probe::leaf().outcome(EventOutcome::Handle);
        let second = Probe::leaf();
        let (fc, sc) = (first.counts(), second.counts());
        h.gui.create(root, first)?;
        h.gui.create(root, second)?;

        let outcome = h.gui.handle_event(&Event::Text('a'))?;
        assert_eq!(outcome, EventOutcome::Handle);
        assert_eq!((fc.events.get(), sc.events.get()), (1, 1));
        Ok(())
    }

    #[test]
    fn outcomes_from_children_reach_the_top() -> Result<()> {
        let (mut h, root) = harness_with_root()?;
        let panel = h.gui.create(root, Probe::container())?;
        h.gui.create(panel, Probe::leaf().outcome(EventOutcome::Consume))?;
        h.gui.create(root, Probe::leaf().outcome(EventOutcome::Handle))?;

        let outcome = h.gui.handle_event(&Event::Text('a'))?;
        assert_eq!(outcome, EventOutcome::Consume);

        let mut quiet = Harness::new();
        quiet.gui.create_root(Probe::leaf())?;
        assert_eq!(quiet.gui.handle_event(&Event::Text('a'))?, EventOutcome::Ignore);
        Ok(())
    }

    #[test]
    fn appended_sibling_waits_for_next_event() -> Result<()> {
        let (mut h, root) = harness_with_root()?;
        let spawned = Probe::leaf();
        let counts = spawned.counts();
        h.gui.create(
            root,
            Spawner {
                pending: Some(spawned),
            },
        )?;

        h.pointer_move(1.0, 1.0)?;
        assert_eq!(h.gui.core.node(root).map(|n| n.children().len()), Some(2));
        assert_eq!(counts.events.get(), 0);
        h.pointer_move(2.0, 2.0)?;
        assert_eq!(counts.events.get(), 1);
        Ok(())
    }

    #[test]
    fn removed_sibling_is_skipped() -> Result<()> {
        let (mut h, root) = harness_with_root()?;
        let remover = h.gui.create(root, Remover { target: None })?.id();
        let doomed = Probe::leaf();
        let survivor = Probe::leaf();
        let (dc, sc) = (doomed.counts(), survivor.counts());
        let doomed = h.gui.create(root, doomed)?.id();
        h.gui.create(root, survivor)?;
        h.gui
            .with_widget(remover, |w: &mut Remover, _| w.target = Some(doomed))?;

        h.pointer_move(1.0, 1.0)?;
        assert_eq!(dc.events.get(), 0);
        assert_eq!(sc.events.get(), 1);
        assert!(!h.gui.core.contains(doomed));

        // With no target left, the remover takes itself out.
        h.pointer_move(2.0, 2.0)?;
        assert!(!h.gui.core.contains(remover));
        assert_eq!(sc.events.get(), 2);
        h.frame(0.1)?;
        Ok(())
    }

    #[test]
    fn update_runs_children_first() -> Result<()> {
        let mut h = Harness::new();
        let order = log();
        let (a, b, c) = (order.clone(), order.clone(), order.clone());
        let root = h.gui.create_root(Root::new().on_tick(move |_, _, _| {
            push(&a, "root");
            Ok(())
        }))?;
        let list = h.gui.create(
            root,
            List::new().on_tick(move |_, _, _| {
                push(&b, "list");
                Ok(())
            }),
        )?;
        h.gui.create(
            list,
            Label::new("x").on_tick(move |_, _, _| {
                push(&c, "label");
                Ok(())
            }),
        )?;

        h.gui.update(0.016)?;
        assert_eq!(*order.borrow(), vec!["label", "list", "root"]);
        Ok(())
    }

    #[test]
    fn update_sees_resolved_layout() -> Result<()> {
        let mut h = Harness::new();
        let seen = Rc::new(RefCell::new(Vec2::ZERO));
        let s = seen.clone();
        let root = h.gui.create_root(Root::new())?;
        h.gui.build(root).offset(10.0, 20.0).size(300.0, 200.0).done()?;
        h.gui.create(
            root,
            Label::new("x").on_tick(move |_, ctx, _| {
                *s.borrow_mut() = ctx.position();
                Ok(())
            }),
        )?;

        h.gui.update(0.0)?;
        assert_eq!(*seen.borrow(), Vec2::new(10.0, 20.0));
        Ok(())
    }
}
