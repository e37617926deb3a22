use crossterm::event as cevent;
use scopeguard::guard;
use tracing::{debug, warn};

use super::{
    backend::crossterm::translate,
    builder::NodeBuilder,
    id::{NodeId, TypedId},
    options::Options,
    world::{Core, keep_first},
};
use crate::{
    Context,
    assets::Assets,
    error::{Error, Result},
    event::Event,
    render::{Render, RenderState, Surface},
    widget::{EventOutcome, Widget},
};

/// The tree registry. Owns the node arena, the ordered root list and the
/// asset cache, and drives each frame: events, then update, then layout and
/// render.
pub struct Gui {
    /// Node arena and layout engine.
    pub core: Core,
    /// Font and texture cache.
    assets: Assets,
    /// Layout passes allowed per root per frame.
    max_layout_passes: usize,
}

impl Default for Gui {
    fn default() -> Self {
        Self::new()
    }
}

impl Gui {
    /// A registry with default options.
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// A registry configured by `options`.
    pub fn with_options(options: Options) -> Self {
        Self {
            core: Core::with_metrics(options.metrics),
            assets: Assets::new(options.asset_dir),
            max_layout_passes: options.max_layout_passes.max(1),
        }
    }

    /// The asset cache.
    pub fn assets(&mut self) -> &mut Assets {
        &mut self.assets
    }

    /// Create a node for `widget` and register it as a root.
    pub fn create_root<W: Widget + 'static>(&mut self, widget: W) -> Result<TypedId<W>> {
        let id = self.core.add(widget);
        self.core.add_root(id)?;
        Ok(id)
    }

    /// Create a node for `widget` and attach it under `parent`. Under a leaf
    /// parent the node is created but stays detached.
    pub fn create<W: Widget + 'static>(
        &mut self,
        parent: impl Into<NodeId>,
        widget: W,
    ) -> Result<TypedId<W>> {
        let parent = parent.into();
        if !self.core.contains(parent) {
            return Err(Error::NodeNotFound(parent));
        }
        let id = self.core.add(widget);
        self.core.add_child(parent, id)?;
        Ok(id)
    }

    /// Like [`Gui::create`], with an explicit node name.
    pub fn create_named<W: Widget + 'static>(
        &mut self,
        parent: impl Into<NodeId>,
        name: &str,
        widget: W,
    ) -> Result<TypedId<W>> {
        let parent = parent.into();
        if !self.core.contains(parent) {
            return Err(Error::NodeNotFound(parent));
        }
        let id = self.core.add_named(name, widget)?;
        self.core.add_child(parent, id)?;
        Ok(id)
    }

    /// Configure a node fluently.
    pub fn build(&mut self, id: impl Into<NodeId>) -> NodeBuilder<'_> {
        self.core.build(id)
    }

    /// Find a node by name: roots in order, each searched pre-order.
    pub fn get_by_name(&self, name: &str) -> Option<NodeId> {
        self.core.find(name)
    }

    /// Borrow a widget of type `W` for inspection.
    pub fn widget<W: Widget + 'static>(&self, id: impl Into<NodeId>) -> Option<&W> {
        self.core.widget(id)
    }

    /// Mutate a widget of type `W` through a context for its node.
    pub fn with_widget<W, R>(
        &mut self,
        id: impl Into<NodeId>,
        f: impl FnOnce(&mut W, &mut dyn Context) -> R,
    ) -> Result<R>
    where
        W: Widget + 'static,
    {
        self.core.with_widget(id, f)
    }

    /// Remove every root whose name is exactly `name`, with its subtree.
    /// Nodes below the roots are not searched. Returns how many roots were
    /// removed.
    pub fn remove_root_by_name(&mut self, name: &str) -> Result<usize> {
        let doomed: Vec<NodeId> = self
            .core
            .roots()
            .iter()
            .copied()
            .filter(|r| self.core.node(*r).is_some_and(|n| n.name() == name))
            .collect();
        for root in &doomed {
            self.core.remove_subtree(*root)?;
            debug!(name, "root removed");
        }
        Ok(doomed.len())
    }

    /// Force every root's subtree to lay out again on the next frame.
    pub fn refresh_layout(&mut self) {
        for root in self.core.roots().to_vec() {
            self.core.mark_subtree_dirty(root);
        }
    }

    /// Drain configuration errors reported by layout.
    pub fn take_layout_errors(&mut self) -> Vec<Error> {
        self.core.take_layout_errors()
    }

    /// Lay out a root until it is clean, within the pass budget.
    fn resolve(&mut self, root: NodeId) -> Result<()> {
        let mut passes = 0;
        while self.core.node(root).is_some_and(|n| n.dirty()) {
            if passes == self.max_layout_passes {
                warn!(passes, root = ?root, "layout did not settle");
                break;
            }
            self.core.compute_layout(root)?;
            passes += 1;
        }
        Ok(())
    }

    /// Resolve every root's layout, then advance each root's subtree by
    /// `dt` seconds.
    pub fn update(&mut self, dt: f32) -> Result<()> {
        for root in self.core.roots().to_vec() {
            if !self.core.contains(root) {
                continue;
            }
            self.resolve(root)?;
            self.core.update(root, dt)?;
        }
        Ok(())
    }

    /// Draw every root in order. Stale layout is resolved first. The
    /// surface is switched to its default view for the frame and its
    /// previous view restored afterwards, also on error.
    pub fn render(&mut self, surface: &mut dyn Surface) -> Result<()> {
        let saved = surface.view();
        let default = surface.default_view();
        surface.set_view(default);
        let mut surface = guard(surface, move |s| s.set_view(saved));

        for root in self.core.roots().to_vec() {
            if !self.core.contains(root) {
                continue;
            }
            self.resolve(root)?;
            let mut r = Render::new(&mut **surface, &mut self.assets, RenderState::default());
            self.core.render(root, &mut r)?;
        }
        Ok(())
    }

    /// Deliver an event to every root in order. Returns the strongest
    /// outcome reported anywhere in the tree. Every root receives the event
    /// even if an earlier one fails; the first error is returned.
    pub fn handle_event(&mut self, event: &Event) -> Result<EventOutcome> {
        let mut outcome = EventOutcome::Ignore;
        let mut first_err = None;
        for root in self.core.roots().to_vec() {
            if !self.core.roots().contains(&root) {
                continue;
            }
            let r = self.core.dispatch(root, event);
            if let Some(o) = keep_first(&mut first_err, r) {
                outcome = outcome.merge(o);
            }
        }
        first_err.map_or(Ok(outcome), Err)
    }

    /// Translate a native terminal event and deliver the result in order.
    pub fn process_native_event(&mut self, event: &cevent::Event) -> Result<()> {
        for e in translate(event) {
            self.handle_event(&e)?;
        }
        Ok(())
    }
}
