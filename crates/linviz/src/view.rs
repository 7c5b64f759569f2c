#![forbid(unsafe_code)]

//! One visualized structure: store, layout, animation and render model.
//!
//! # Lifecycle
//!
//! ```text
//!   insert/delete/modify --> store applies the immediate half
//!                        --> animator starts the sweep and parks the commit
//!   tick(dt)             --> due commits are applied to the store
//!   frame()              --> repack + derive when anything changed
//! ```
//!
//! Everything runs on the caller's thread. Time only moves through
//! [`Visualizer::tick`].
//!
//! # Pending commits
//!
//! Under [`RestartPolicy::KeepPending`] a new mutation does not cancel the
//! commit of an earlier one. Array commits address slots by position, so a
//! second mutation issued while the first is pending can see its target
//! shifted underneath it. Chain commits address nodes by handle and are
//! dropped when the node is gone. [`RestartPolicy::FlushPending`] applies the
//! pending commits before every mutation instead, even one that is then
//! rejected.

use std::time::Duration;

use linviz_core::event::{MouseButton, PointerEvent, ViewEvent};
use linviz_core::{MutationError, Size};
use linviz_layout::{LayoutFrame, PackStrategy, Packer};
use linviz_render::{CellScale, FrameInput, HitTarget, Palette, RenderFrame, derive_frame, paint};
use linviz_runtime::{AnimationState, MutationAnimator, RestartPolicy};
use linviz_store::{CommitTiming, DeferredCommit, NodeChain, SlotArray, Structure};
use tracing::{debug, trace, warn};

use crate::config::ViewConfig;

/// View over the slot array.
pub type ArrayView = Visualizer<SlotArray>;

/// View over the linked list.
pub type ListView = Visualizer<NodeChain>;

/// What a [`Visualizer::tick`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Commits applied to the store.
    pub applied: usize,
    /// Commits whose target no longer existed.
    pub dropped: usize,
    /// Whether the sweep is still running.
    pub animating: bool,
    /// Whether the frame must be drawn again.
    pub redraw: bool,
}

/// A structure together with its layout, animation and render model.
#[derive(Debug)]
pub struct Visualizer<S: Structure> {
    store: S,
    packer: Packer,
    animator: MutationAnimator<S::Commit>,
    palette: Palette,
    canvas: Size,
    frame: RenderFrame,
    dirty: bool,
    events: Vec<ViewEvent>,
}

impl<S: Structure + Default> Default for Visualizer<S> {
    fn default() -> Self {
        Self::new(ViewConfig::default())
    }
}

impl<S: Structure + Default> Visualizer<S> {
    /// A view over a default store with no canvas yet.
    pub fn new(config: ViewConfig) -> Self {
        Self::with_store(S::default(), config)
    }
}

impl<S: Structure> Visualizer<S> {
    /// A view over an existing store.
    pub fn with_store(store: S, config: ViewConfig) -> Self {
        Self {
            store,
            packer: Packer::new(config.packer_for(S::KIND)),
            animator: MutationAnimator::new(config.animator),
            palette: config.palette,
            canvas: Size::default(),
            frame: RenderFrame::empty(S::KIND, Size::default()),
            dirty: true,
            events: Vec::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// Set the canvas size.
    pub fn resize(&mut self, width: i32, height: i32) {
        let canvas = Size::new(width, height);
        if canvas != self.canvas {
            trace!(kind = %S::KIND, width, height, "canvas resized");
            self.canvas = canvas;
            self.dirty = true;
        }
    }

    /// Replace the contents with `len` default elements.
    ///
    /// Pending commits are cancelled and the sweep stops.
    pub fn initialize_len(&mut self, len: isize) {
        self.animator.reset();
        self.store.initialize_len(len);
        self.dirty = true;
    }

    /// Replace the contents with `values`.
    ///
    /// Pending commits are cancelled and the sweep stops.
    pub fn initialize_values<V: AsRef<str>>(&mut self, values: &[V]) {
        self.animator.reset();
        self.store.initialize_values(values);
        self.dirty = true;
    }

    /// Insert `value` after `after` (`-1` for the front). Returns the
    /// position the sweep targets.
    pub fn try_insert(
        &mut self,
        after: isize,
        value: impl Into<String>,
    ) -> Result<usize, MutationError> {
        let value = value.into();
        self.mutate("insert", |store| store.insert(after, value))
    }

    /// Delete the element at `index`. Returns the position the sweep targets.
    pub fn try_delete(&mut self, index: isize) -> Result<usize, MutationError> {
        self.mutate("delete", |store| store.delete(index))
    }

    /// Replace the value at `index`. Returns the position the sweep targets.
    pub fn try_modify(
        &mut self,
        index: isize,
        value: impl Into<String>,
    ) -> Result<usize, MutationError> {
        let value = value.into();
        self.mutate("modify", |store| store.modify(index, value))
    }

    /// [`try_insert`](Self::try_insert) reporting only success.
    pub fn insert(&mut self, after: isize, value: impl Into<String>) -> bool {
        self.try_insert(after, value).is_ok()
    }

    /// [`try_delete`](Self::try_delete) reporting only success.
    pub fn delete(&mut self, index: isize) -> bool {
        self.try_delete(index).is_ok()
    }

    /// [`try_modify`](Self::try_modify) reporting only success.
    pub fn modify(&mut self, index: isize, value: impl Into<String>) -> bool {
        self.try_modify(index, value).is_ok()
    }

    fn mutate<F>(&mut self, op: &'static str, f: F) -> Result<usize, MutationError>
    where
        F: FnOnce(&mut S) -> Result<DeferredCommit<S::Commit>, MutationError>,
    {
        if self.animator.config().restart == RestartPolicy::FlushPending {
            self.flush_pending();
        }
        let deferred = f(&mut self.store).inspect_err(|err| {
            debug!(kind = %S::KIND, op, %err, "mutation rejected");
        })?;
        let config = self.animator.config();
        let delay = match deferred.timing {
            CommitTiming::Settle => config.settle_delay,
            CommitTiming::Apply => config.commit_delay,
        };
        let index = deferred.anim_index;
        self.animator.start(index, deferred.commit, delay);
        self.dirty = true;
        debug!(kind = %S::KIND, op, index, "mutation started");
        Ok(index)
    }

    fn flush_pending(&mut self) {
        let pending = self.animator.take_pending();
        if pending.is_empty() {
            return;
        }
        let count = pending.len();
        let applied = pending
            .into_iter()
            .map(|commit| self.store.apply(commit))
            .filter(|ok| *ok)
            .count();
        debug!(kind = %S::KIND, count, applied, "pending commits flushed");
        self.dirty = true;
    }

    /// Values in display order, holes skipped.
    pub fn values(&self) -> Vec<String> {
        self.store.values()
    }

    pub fn size(&self) -> usize {
        self.store.size()
    }

    /// Whether a sweep is running or a commit is pending.
    pub fn is_busy(&self) -> bool {
        self.animator.is_busy()
    }

    /// Time until the next commit fires.
    pub fn next_commit_in(&self) -> Option<Duration> {
        self.animator.next_commit_in()
    }

    /// Advance time by `dt` and apply the commits that came due.
    pub fn tick(&mut self, dt: Duration) -> TickOutcome {
        let was_running = self.animator.state().running;
        let mut outcome = TickOutcome::default();
        for commit in self.animator.tick(dt) {
            if self.store.apply(commit) {
                outcome.applied += 1;
            } else {
                outcome.dropped += 1;
            }
        }
        outcome.animating = self.animator.state().running;
        if was_running || outcome.applied > 0 {
            self.dirty = true;
        }
        outcome.redraw = self.dirty;
        outcome
    }

    pub fn animation(&self) -> &AnimationState {
        self.animator.state()
    }

    /// Current layout, repacked first if the store or canvas changed.
    pub fn layout(&mut self) -> &LayoutFrame {
        self.refresh();
        self.packer.frame()
    }

    /// Current render frame, derived again if anything changed.
    pub fn frame(&mut self) -> &RenderFrame {
        self.refresh();
        &self.frame
    }

    fn refresh(&mut self) {
        if !self.dirty {
            return;
        }
        let count = self.store.layout_count();
        if self.packer.repack(self.canvas, count)
            && self.packer.frame().strategy == PackStrategy::Fallback
        {
            warn!(
                kind = %S::KIND,
                canvas = ?self.canvas,
                count,
                "canvas too small, using fallback layout"
            );
        }
        let elements = self.store.elements();
        self.frame = derive_frame(&FrameInput {
            kind: S::KIND,
            canvas: self.canvas,
            layout: self.packer.frame(),
            elements: &elements,
            animation: self.animator.state(),
            bump_height: self.animator.config().bump_height,
            palette: &self.palette,
        });
        self.dirty = false;
    }

    /// Resolve a pointer press.
    ///
    /// A left press on an occupied slot or a data node returns
    /// [`ViewEvent::ElementClicked`] and also queues it for
    /// [`drain_events`](Self::drain_events). Holes, the sentinel and other
    /// buttons produce nothing.
    pub fn pointer(&mut self, event: PointerEvent) -> Option<ViewEvent> {
        if event.button != MouseButton::Left {
            return None;
        }
        match self.frame().hit_test(event.position) {
            HitTarget::Element(index) => {
                debug!(kind = %S::KIND, index, "element clicked");
                let clicked = ViewEvent::ElementClicked { index };
                self.events.push(clicked.clone());
                Some(clicked)
            }
            target => {
                trace!(kind = %S::KIND, ?target, "click ignored");
                None
            }
        }
    }

    /// Take the queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.events)
    }

    /// Rasterize the current frame onto a character grid.
    pub fn paint(&mut self, scale: CellScale) -> Vec<String> {
        paint(self.frame(), scale)
    }
}

impl Visualizer<SlotArray> {
    /// Number of occupied slots.
    pub fn occupied_count(&self) -> usize {
        self.store.occupied_count()
    }
}
