//! Property tests for dirty tracking: any sequence of layout edits followed
//! by one layout pass leaves the tree clean and resolved exactly as a fresh
//! tree built from the final inputs.

#[cfg(test)]
mod tests {
    use std::result;

    use proptest::{collection::vec, prelude::*};
    use trellis::{
        Core, NodeId,
        error::{Error, Result},
        geom::Vec2,
        layout::{Layout, LayoutMode, SizeMode},
        testing::Probe,
    };

    /// Nodes: root, a stacking panel, a fit-content stack, three leaves in
    /// the panel and two in the fit-content stack.
    const NODES: usize = 8;

    #[derive(Debug, Clone)]
    enum Change {
        Offset(f32, f32),
        Size(f32, f32),
        Padding(f32, f32),
        Spacing(f32),
        Position(usize),
        Sizing(usize),
        Settle,
    }

    fn change() -> impl Strategy<Value = Change> {
        prop_oneof![
            (-50f32..50.0, -50f32..50.0).prop_map(|(x, y)| Change::Offset(x, y)),
            (0f32..300.0, 0f32..300.0).prop_map(|(w, h)| Change::Size(w, h)),
            (0f32..20.0, 0f32..20.0).prop_map(|(x, y)| Change::Padding(x, y)),
            (-10f32..10.0).prop_map(Change::Spacing),
            (0usize..3).prop_map(Change::Position),
            (0usize..4).prop_map(Change::Sizing),
            Just(Change::Settle),
        ]
    }

    // Modes are restricted so that no node's size depends on a parent that
    // sizes itself from its content.
    fn position_modes(node: usize) -> &'static [LayoutMode] {
        match node {
            6 | 7 => &[LayoutMode::Static, LayoutMode::Relative],
            _ => &[LayoutMode::Static, LayoutMode::Relative, LayoutMode::Percent],
        }
    }

    fn size_modes(node: usize) -> &'static [SizeMode] {
        match node {
            0 => &[SizeMode::Absolute],
            1 => &[SizeMode::Absolute, SizeMode::FillParent, SizeMode::Percent],
            2 => &[SizeMode::FitContent],
            6 | 7 => &[SizeMode::Absolute, SizeMode::FitContent],
            _ => &[
                SizeMode::Absolute,
                SizeMode::FitContent,
                SizeMode::FillParent,
                SizeMode::Percent,
            ],
        }
    }

    fn initial() -> [Layout; NODES] {
        let leaf = Layout::new().size(60.0, 20.0);
        [
            Layout::new().size(400.0, 300.0),
            Layout::new().size(200.0, 150.0).padding(4.0, 4.0).spacing(2.0),
            Layout::new()
                .offset(210.0, 0.0)
                .padding(3.0, 3.0)
                .size_mode(SizeMode::FitContent),
            leaf,
            leaf,
            leaf,
            leaf,
            leaf,
        ]
    }

    fn tree(layouts: &[Layout; NODES]) -> Result<(Core, Vec<NodeId>)> {
        let mut core = Core::new();
        let root = core.add(Probe::container().with_layout(layouts[0])).id();
        let panel = core.add(Probe::stack().with_layout(layouts[1])).id();
        let fit = core.add(Probe::stack().with_layout(layouts[2])).id();
        core.add_root(root)?;
        core.add_child(root, panel)?;
        core.add_child(root, fit)?;

        let mut ids = vec![root, panel, fit];
        for (i, layout) in layouts.iter().enumerate().skip(3) {
            let leaf = Probe::leaf()
                .intrinsic(Vec2::new(40.0, 12.0))
                .with_layout(*layout);
            let id = core.add(leaf).id();
            core.add_child(if i < 6 { panel } else { fit }, id)?;
            ids.push(id);
        }
        Ok((core, ids))
    }

    fn apply(core: &mut Core, ids: &[NodeId], node: usize, change: &Change) -> Result<()> {
        let id = ids[node];
        match change {
            Change::Settle => core.compute_layout(ids[0]),
            Change::Offset(x, y) => core.with_layout_of(id, |l| l.offset = Vec2::new(*x, *y)),
            Change::Size(w, h) => core.with_layout_of(id, |l| l.size = Vec2::new(*w, *h)),
            Change::Padding(x, y) => core.with_layout_of(id, |l| l.padding = Vec2::new(*x, *y)),
            Change::Spacing(s) => core.with_layout_of(id, |l| l.spacing = *s),
            Change::Position(i) => {
                let modes = position_modes(node);
                core.with_layout_of(id, |l| l.layout_mode = modes[i % modes.len()])
            }
            Change::Sizing(i) => {
                let modes = size_modes(node);
                core.with_layout_of(id, |l| l.size_mode = modes[i % modes.len()])
            }
        }
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    fn check(changes: &[(usize, Change)]) -> result::Result<(), TestCaseError> {
        let fail = |e: Error| TestCaseError::fail(e.to_string());

        let (mut core, ids) = tree(&initial()).map_err(fail)?;
        core.compute_layout(ids[0]).map_err(fail)?;
        for (node, change) in changes {
            apply(&mut core, &ids, *node, change).map_err(fail)?;
        }
        core.compute_layout(ids[0]).map_err(fail)?;

        let mut layouts = initial();
        for (i, id) in ids.iter().enumerate() {
            let node = core.node(*id).ok_or_else(|| TestCaseError::fail("node lost"))?;
            prop_assert!(!node.dirty(), "node {} left dirty", i);
            layouts[i] = node.layout();
        }

        let (mut fresh, fresh_ids) = tree(&layouts).map_err(fail)?;
        fresh.compute_layout(fresh_ids[0]).map_err(fail)?;
        for (i, (a, b)) in ids.iter().zip(&fresh_ids).enumerate() {
            let (Some(a), Some(b)) = (core.node(*a), fresh.node(*b)) else {
                return Err(TestCaseError::fail("node lost"));
            };
            prop_assert!(
                close(a.position(), b.position()),
                "node {} position {:?} != {:?}",
                i,
                a.position(),
                b.position()
            );
            prop_assert!(
                close(a.size(), b.size()),
                "node {} size {:?} != {:?}",
                i,
                a.size(),
                b.size()
            );
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn edits_settle_to_direct_resolution(
            changes in vec((0usize..NODES, change()), 0..24),
        ) {
            check(&changes)?;
        }
    }

    #[test]
    fn untouched_tree_stays_clean() -> Result<()> {
        let (mut core, ids) = tree(&initial())?;
        core.compute_layout(ids[0])?;
        assert!(ids.iter().all(|id| core.node(*id).is_some_and(|n| !n.dirty())));

        core.mark_dirty(ids[6]);
        assert!(core.node(ids[2]).is_some_and(|n| n.dirty()));
        assert!(core.node(ids[0]).is_some_and(|n| n.dirty()));
        assert!(core.node(ids[1]).is_some_and(|n| !n.dirty()));
        core.compute_layout(ids[0])?;
        assert!(ids.iter().all(|id| core.node(*id).is_some_and(|n| !n.dirty())));
        Ok(())
    }
}
