use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::warn;

use revue_core::{
    ChangeCallback, DispatchOutcome, Interaction, ItemSlot, ListAdapter, ListChange, TemplateId,
};

/// Shared recorder for [`ListChange`] notifications.
///
/// Register [`ChangeLog::observer`] on an adapter, then drain with
/// [`ChangeLog::take`] wherever the assertions live. Clones share the same
/// underlying log.
#[derive(Default)]
pub struct ChangeLog {
    entries: Rc<RefCell<Vec<ListChange>>>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The callback to hand to `ListAdapter::add_change_callback`.
    pub fn observer(&self) -> ChangeCallback {
        let entries = Rc::clone(&self.entries);
        Rc::new(move |change: &ListChange| entries.borrow_mut().push(*change))
    }

    /// Drains everything recorded so far.
    pub fn take(&self) -> Vec<ListChange> {
        self.entries.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Clone for ChangeLog {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
        }
    }
}

/// Default cap on parked containers per template, matching the reuse-pool
/// sizing of comparable list toolkits.
const DEFAULT_MAX_POOLED_PER_TEMPLATE: usize = 5;

/// Sizing knobs for the harness reuse pool.
#[derive(Debug, Clone, Copy)]
pub struct SlotPoolSpec {
    max_per_template: usize,
}

impl SlotPoolSpec {
    pub fn new() -> Self {
        Self {
            max_per_template: DEFAULT_MAX_POOLED_PER_TEMPLATE,
        }
    }

    /// Caps how many scrolled-out containers are kept per template before
    /// overflow gets evicted outright.
    pub fn max_per_template(mut self, cap: usize) -> Self {
        self.max_per_template = cap;
        self
    }
}

impl Default for SlotPoolSpec {
    fn default() -> Self {
        Self::new()
    }
}

/// What one [`ListHarness::pump`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PumpStats {
    /// Notifications drained from the change log.
    pub changes: usize,
    /// Bind calls performed while applying them.
    pub binds: usize,
    /// Containers newly created through the factory.
    pub created: usize,
    /// Containers taken from the reuse pool instead.
    pub reused: usize,
}

/// Cumulative harness counters, for asserting on recycling behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarnessStats {
    /// Containers currently bound into the visible window.
    pub shown: usize,
    /// Containers parked in the reuse pool.
    pub pooled: usize,
    /// Containers created through the factory so far.
    pub created: usize,
    /// Binds that reused a pooled container instead of creating one.
    pub reused: usize,
    /// Containers released for good, by pool overflow or explicit eviction.
    pub evicted: usize,
}

/// Headless stand-in for the host toolkit's list view.
///
/// The harness plays the recycler role against a live [`ListAdapter`]: it
/// keeps one container per collection position in a window, parks
/// scrolled-out containers in a bounded per-template pool, and applies each
/// change notification as narrowly as the notification allows. Tests drive
/// it step by step:
///
/// ```rust,ignore
/// let mut harness = ListHarness::new(&adapter);
/// adapter.append_all(records);
/// let pump = harness.pump();
/// assert_eq!(pump.binds, 3);          // only the inserted range was bound
/// harness.tap(0);
/// ```
///
/// Tail inserts bind exactly the inserted positions. A full invalidation
/// recycles the whole window and lays every position out again, so per-pump
/// bind counts expose whether a mutation paid the minimal price. Changes are
/// applied in arrival order against the live collection: a pump that mixes
/// an invalidation with later inserts may bind some positions twice, and an
/// insert outrun by a shrinking mutation later in the same batch falls back
/// to a full relayout instead of binding positions the collection no longer
/// has.
pub struct ListHarness<D: Clone + 'static> {
    adapter: ListAdapter<D>,
    changes: ChangeLog,
    observer_id: u64,
    window: Vec<Option<ItemSlot<D>>>,
    pool: HashMap<TemplateId, Vec<ItemSlot<D>>>,
    max_pooled_per_template: usize,
    created: usize,
    reused: usize,
    evicted: usize,
}

impl<D: Clone + 'static> ListHarness<D> {
    /// Attaches to `adapter` with the default pool sizing and performs the
    /// initial layout of whatever the collection already holds.
    pub fn new(adapter: &ListAdapter<D>) -> Self {
        Self::with_pool(adapter, SlotPoolSpec::default())
    }

    pub fn with_pool(adapter: &ListAdapter<D>, spec: SlotPoolSpec) -> Self {
        let changes = ChangeLog::new();
        let observer_id = adapter.add_change_callback(changes.observer());
        let mut harness = Self {
            adapter: adapter.clone(),
            changes,
            observer_id,
            window: Vec::new(),
            pool: HashMap::new(),
            max_pooled_per_template: spec.max_per_template,
            created: 0,
            reused: 0,
            evicted: 0,
        };
        harness.rebuild_window();
        harness
    }

    pub fn adapter(&self) -> &ListAdapter<D> {
        &self.adapter
    }

    /// Notifications recorded since the last pump.
    pub fn pending_changes(&self) -> usize {
        self.changes.len()
    }

    /// Drains pending change notifications and applies each one.
    pub fn pump(&mut self) -> PumpStats {
        let changes = self.changes.take();
        let created_before = self.created;
        let reused_before = self.reused;
        let mut binds = 0;
        for change in &changes {
            binds += self.apply(change);
        }
        PumpStats {
            changes: changes.len(),
            binds,
            created: self.created - created_before,
            reused: self.reused - reused_before,
        }
    }

    fn apply(&mut self, change: &ListChange) -> usize {
        match *change {
            ListChange::Inserted { index }
                if index == self.window.len() && index < self.adapter.len() =>
            {
                self.mount_position(index);
                1
            }
            ListChange::InsertedRange { start, count }
                if start == self.window.len() && start + count <= self.adapter.len() =>
            {
                for position in start..start + count {
                    self.mount_position(position);
                }
                count
            }
            ListChange::Inserted { .. } | ListChange::InsertedRange { .. } => {
                // The adapter only emits tail inserts, and binding is only
                // narrow while the live collection still backs the inserted
                // positions; an insert outrun by a shrinking mutation later
                // in the same batch lands here as well.
                warn!("stale or non-tail insert {change:?}; rebinding the window");
                self.rebuild_window()
            }
            ListChange::Invalidated => self.rebuild_window(),
        }
    }

    /// Sends the scrolled-out container at `position` to the reuse pool.
    /// The position stays empty until [`ListHarness::show`] or a full
    /// invalidation brings it back.
    pub fn scroll_out(&mut self, position: usize) {
        let slot = self.take_shown(position, "scroll_out");
        self.pool_slot(slot);
    }

    /// Permanently evicts the container at `position`, releasing its surface.
    pub fn evict(&mut self, position: usize) {
        let slot = self.take_shown(position, "evict");
        self.adapter.release_surface(slot.surface_id());
        self.evicted += 1;
    }

    /// Re-shows a previously scrolled-out position, reusing a pooled
    /// container when one matches the template.
    pub fn show(&mut self, position: usize) {
        assert!(
            position < self.window.len(),
            "show: position {position} outside the window (len {})",
            self.window.len()
        );
        if self.window[position].is_some() {
            return;
        }
        self.mount_position(position);
    }

    pub fn is_shown(&self, position: usize) -> bool {
        self.window.get(position).map_or(false, Option::is_some)
    }

    pub fn slot(&self, position: usize) -> Option<&ItemSlot<D>> {
        self.window.get(position).and_then(Option::as_ref)
    }

    pub fn tap(&mut self, position: usize) -> DispatchOutcome {
        self.raise(position, Interaction::Tap)
    }

    pub fn long_press(&mut self, position: usize) -> DispatchOutcome {
        self.raise(position, Interaction::LongPress)
    }

    pub fn stats(&self) -> HarnessStats {
        HarnessStats {
            shown: self.window.iter().flatten().count(),
            pooled: self.pool.values().map(Vec::len).sum(),
            created: self.created,
            reused: self.reused,
            evicted: self.evicted,
        }
    }

    /// Unhooks the harness from the adapter's change notifications.
    pub fn detach(self) {
        self.adapter.remove_change_callback(self.observer_id);
    }

    fn raise(&mut self, position: usize, interaction: Interaction) -> DispatchOutcome {
        let surface = match self.window.get(position).and_then(Option::as_ref) {
            Some(slot) => slot.surface_id(),
            None => panic!("{interaction:?}: no container shown at position {position}"),
        };
        self.adapter.dispatch_interaction(surface, interaction)
    }

    fn mount_position(&mut self, position: usize) {
        let template = self.adapter.template_at(position);
        let slot = self.acquire(template);
        self.adapter.bind(&slot, position);
        if position == self.window.len() {
            self.window.push(Some(slot));
        } else {
            self.window[position] = Some(slot);
        }
    }

    fn acquire(&mut self, template: TemplateId) -> ItemSlot<D> {
        if let Some(slot) = self.pool.get_mut(&template).and_then(Vec::pop) {
            self.reused += 1;
            slot
        } else {
            self.created += 1;
            self.adapter.create_container(template)
        }
    }

    fn pool_slot(&mut self, slot: ItemSlot<D>) {
        let pooled = self.pool.entry(slot.template()).or_default();
        if pooled.len() < self.max_pooled_per_template {
            pooled.push(slot);
        } else {
            self.adapter.release_surface(slot.surface_id());
            self.evicted += 1;
        }
    }

    fn take_shown(&mut self, position: usize, op: &str) -> ItemSlot<D> {
        match self.window.get_mut(position).and_then(Option::take) {
            Some(slot) => slot,
            None => panic!("{op}: no container shown at position {position}"),
        }
    }

    fn rebuild_window(&mut self) -> usize {
        let slots: Vec<ItemSlot<D>> = self.window.drain(..).flatten().collect();
        for slot in slots {
            self.pool_slot(slot);
        }
        let len = self.adapter.len();
        for position in 0..len {
            self.mount_position(position);
        }
        len
    }
}

#[cfg(test)]
#[path = "tests/harness_tests.rs"]
mod tests;
