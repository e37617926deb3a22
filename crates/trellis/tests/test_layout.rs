//! Integration tests for layout resolution.

#[cfg(test)]
mod tests {
    use trellis::{
        Core, NodeId,
        error::{Error, Result},
        geom::Vec2,
        layout::{Layout, LayoutMode, SizeMode},
        testing::Probe,
    };

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    fn position(core: &Core, id: impl Into<NodeId>) -> Result<Vec2> {
        let id = id.into();
        Ok(core.node(id).ok_or(Error::NodeNotFound(id))?.position())
    }

    fn size(core: &Core, id: impl Into<NodeId>) -> Result<Vec2> {
        let id = id.into();
        Ok(core.node(id).ok_or(Error::NodeNotFound(id))?.size())
    }

    #[test]
    fn fit_content_without_children_is_twice_padding() -> Result<()> {
        let mut core = Core::new();
        let c = core.add(Probe::container().with_layout(
            Layout::new()
                .padding(7.0, 3.0)
                .size_mode(SizeMode::FitContent),
        ));
        core.add_root(c)?;
        core.compute_layout(c)?;
        assert_eq!(size(&core, c)?, Vec2::new(14.0, 6.0));
        Ok(())
    }

    #[test]
    fn stacking_order() -> Result<()> {
        let mut core = Core::new();
        let list = core.add(Probe::stack().with_layout(
            Layout::new()
                .offset(20.0, 30.0)
                .size(150.0, 200.0)
                .padding(0.0, 10.0)
                .spacing(5.0),
        ));
        core.add_root(list)?;
        let mut kids = Vec::new();
        for h in [50.0, 30.0, 20.0] {
            let kid = core.add(Probe::leaf().with_layout(Layout::new().size(100.0, h)));
            core.add_child(list, kid)?;
            kids.push(kid);
        }
        core.compute_layout(list)?;

        let base = position(&core, list)?.y;
        assert_eq!(base, 30.0);
        let ys: Vec<f32> = kids
            .iter()
            .map(|k| position(&core, *k).map(|p| p.y))
            .collect::<Result<_>>()?;
        assert_eq!(ys, vec![base + 10.0, base + 10.0 + 55.0, base + 10.0 + 90.0]);

        // Growing the first child pushes its siblings down on the next pass.
        core.with_layout_of(kids[0], |l| l.size.y = 60.0)?;
        core.compute_layout(list)?;
        assert_eq!(position(&core, kids[1])?.y, base + 10.0 + 65.0);
        assert_eq!(position(&core, kids[2])?.y, base + 10.0 + 100.0);
        Ok(())
    }

    #[test]
    fn stacking_fit_content_allows_overlap() -> Result<()> {
        let mut core = Core::new();
        let list = core.add(Probe::stack().with_layout(
            Layout::new()
                .spacing(-10.0)
                .size_mode(SizeMode::FitContent),
        ));
        core.add_root(list)?;
        let a = core.add(Probe::leaf().with_layout(Layout::new().size(80.0, 50.0)));
        let b = core.add(Probe::leaf().with_layout(Layout::new().size(60.0, 30.0)));
        core.add_child(list, a)?;
        core.add_child(list, b)?;
        core.compute_layout(list)?;

        assert_eq!(position(&core, a)?.y, 0.0);
        assert_eq!(position(&core, b)?.y, 40.0);
        assert_eq!(size(&core, list)?, Vec2::new(80.0, 70.0));
        Ok(())
    }

    #[test]
    fn root_fits_offset_child() -> Result<()> {
        let mut core = Core::new();
        let root = core.add(Probe::container().with_layout(
            Layout::new()
                .offset(5.0, 5.0)
                .padding(10.0, 15.0)
                .size_mode(SizeMode::FitContent),
        ));
        core.add_root(root)?;
        let child = core.add(Probe::leaf().with_layout(
            Layout::new()
                .size(150.0, 50.0)
                .offset(0.0, 80.0)
                .layout_mode(LayoutMode::Relative),
        ));
        core.add_child(root, child)?;
        core.compute_layout(root)?;

        let rp = position(&core, root)?;
        assert_eq!(position(&core, child)?, rp + Vec2::new(10.0, 15.0) + Vec2::new(0.0, 80.0));
        let rs = size(&core, root)?;
        assert!(rs.x >= 160.0 && rs.y >= 145.0);
        assert_eq!(rs, Vec2::new(180.0, 175.0));
        Ok(())
    }

    #[test]
    fn percent_and_fill_parent() -> Result<()> {
        let mut core = Core::new();
        let parent = core.add(Probe::container().with_layout(
            Layout::new()
                .offset(100.0, 50.0)
                .size(220.0, 120.0)
                .padding(10.0, 10.0),
        ));
        core.add_root(parent)?;
        let pct = core.add(Probe::leaf().with_layout(
            Layout::new()
                .offset(150.0, -10.0)
                .size(50.0, 200.0)
                .layout_mode(LayoutMode::Percent)
                .size_mode(SizeMode::Percent),
        ));
        let fill = core.add(Probe::leaf().with_layout(
            Layout::new()
                .offset(5.0, 5.0)
                .size_mode(SizeMode::FillParent),
        ));
        let fixed = core.add(Probe::leaf().with_layout(
            Layout::new()
                .offset(1.0, 2.0)
                .layout_mode(LayoutMode::Static),
        ));
        core.add_child(parent, pct)?;
        core.add_child(parent, fill)?;
        core.add_child(parent, fixed)?;
        core.compute_layout(parent)?;

        // Percentages are not clamped.
        assert!(approx(position(&core, pct)?, Vec2::new(410.0, 50.0)));
        assert!(approx(size(&core, pct)?, Vec2::new(100.0, 200.0)));
        assert_eq!(position(&core, fill)?, Vec2::new(115.0, 65.0));
        assert_eq!(size(&core, fill)?, Vec2::new(195.0, 95.0));
        assert_eq!(position(&core, fixed)?, Vec2::new(1.0, 2.0));

        // Resolving again never compounds percentages.
        core.mark_subtree_dirty(parent);
        core.compute_layout(parent)?;
        assert!(approx(size(&core, pct)?, Vec2::new(100.0, 200.0)));
        Ok(())
    }

    #[test]
    fn second_pass_is_a_noop() -> Result<()> {
        let mut core = Core::new();
        let root = core.add(Probe::container());
        core.add_root(root)?;
        let child = Probe::leaf();
        let counts = child.counts();
        let child = core.add(child);
        core.add_child(root, child)?;

        core.compute_layout(root)?;
        assert_eq!(counts.layouts.get(), 1);
        let before = (position(&core, child)?, size(&core, child)?);

        core.compute_layout(root)?;
        assert_eq!(counts.layouts.get(), 1);
        assert_eq!((position(&core, child)?, size(&core, child)?), before);
        Ok(())
    }

    #[test]
    fn only_followers_are_invalidated() -> Result<()> {
        let mut core = Core::new();
        let root = core.add(Probe::container().with_layout(Layout::new().size(500.0, 500.0)));
        core.add_root(root)?;
        let fit = core.add(Probe::container().with_layout(Layout::new().size_mode(SizeMode::FitContent)));
        core.add_child(root, fit)?;

        let grow = Probe::leaf().with_layout(Layout::new().size(100.0, 40.0));
        let fixed = Probe::leaf().with_layout(
            Layout::new()
                .size(10.0, 10.0)
                .layout_mode(LayoutMode::Static),
        );
        let follower = Probe::leaf().with_layout(
            Layout::new()
                .size(10.0, 10.0)
                .layout_mode(LayoutMode::Percent),
        );
        let (cg, cf, cw) = (grow.counts(), fixed.counts(), follower.counts());
        let grow = core.add(grow);
        let fixed = core.add(fixed);
        let follower = core.add(follower);
        core.add_child(fit, grow)?;
        core.add_child(fit, fixed)?;
        core.add_child(fit, follower)?;
        core.compute_layout(root)?;
        for c in [&cg, &cf, &cw] {
            c.reset();
        }

        core.with_layout_of(grow, |l| l.size = Vec2::new(120.0, 60.0))?;
        core.compute_layout(root)?;
        assert_eq!(size(&core, fit)?, Vec2::new(120.0, 60.0));
        assert_eq!(cg.layouts.get(), 1);
        assert_eq!(cf.layouts.get(), 0);
        assert_eq!(cw.layouts.get(), 1);
        Ok(())
    }

    #[test]
    fn unsupported_fit_content_keeps_size() -> Result<()> {
        let mut core = Core::new();
        let root = core.add(Probe::stack().with_layout(Layout::new().size(400.0, 400.0)));
        core.add_root(root)?;
        let bad = core.add(Probe::leaf().with_layout(
            Layout::new()
                .size(30.0, 20.0)
                .size_mode(SizeMode::FitContent),
        ));
        let measured = core.add(
            Probe::leaf()
                .intrinsic(Vec2::new(12.0, 8.0))
                .with_layout(Layout::new().padding(1.0, 1.0).size_mode(SizeMode::FitContent)),
        );
        core.add_child(root, bad)?;
        core.add_child(root, measured)?;
        core.compute_layout(root)?;

        assert_eq!(size(&core, bad)?, Vec2::new(30.0, 20.0));
        assert_eq!(size(&core, measured)?, Vec2::new(14.0, 10.0));
        assert_eq!(position(&core, measured)?.y, 20.0);
        let errors = core.take_layout_errors();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            Error::UnsupportedSizeMode { mode: SizeMode::FitContent, .. }
        ));
        assert!(core.take_layout_errors().is_empty());
        Ok(())
    }

    #[test]
    fn hidden_and_disabled_nodes_still_lay_out() -> Result<()> {
        let mut core = Core::new();
        let root = core.add(Probe::stack().with_layout(Layout::new().size(400.0, 400.0)));
        core.add_root(root)?;
        let hidden = core.add(Probe::leaf());
        let disabled = core.add(Probe::leaf());
        let last = core.add(Probe::leaf());
        for id in [hidden.id(), disabled.id(), last.id()] {
            core.add_child(root, id)?;
        }
        core.set_visible(hidden, false)?;
        core.set_enabled(disabled, false)?;
        core.compute_layout(root)?;
        assert_eq!(position(&core, last)?.y, 100.0);
        Ok(())
    }

    #[test]
    fn stale_ids_are_not_found() -> Result<()> {
        let mut core = Core::new();
        let gone = core.add(Probe::leaf());
        core.remove_subtree(gone)?;
        assert!(matches!(core.compute_layout(gone), Err(Error::NodeNotFound(_))));
        assert!(core.node(gone).is_none());
        Ok(())
    }
}
