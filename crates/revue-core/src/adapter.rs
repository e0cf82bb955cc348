//! The list adapter engine: collection ownership, minimal change
//! notifications, container binding, and reverse interaction dispatch.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, trace, warn};

use crate::collections::map::HashMap;
use crate::events::{DispatchOutcome, Interaction, InteractionListener};
use crate::notify::{ChangeCallback, ChangeObservers, ListChange};
use crate::slot::{ItemContent, ItemSlot, SlotState};
use crate::surface::SurfaceId;
use crate::template::{TemplateId, TemplateResolver};

/// Builds the content half of a container for a template.
///
/// The factory is the only place application code instantiates rendering
/// surfaces for list items; the engine wraps whatever it returns in an
/// [`ItemSlot`] and wires the reverse-lookup and update paths around it.
///
/// A template id outside the factory's space is a programming error (the
/// resolver and factory must agree on one id space), so implementations
/// panic on an unknown id rather than improvise a fallback layout.
pub trait SlotFactory<D> {
    fn create(&mut self, template: TemplateId) -> Box<dyn ItemContent<D>>;
}

/// Any `FnMut(TemplateId) -> Box<dyn ItemContent<D>>` closure is a factory.
impl<D, F> SlotFactory<D> for F
where
    F: FnMut(TemplateId) -> Box<dyn ItemContent<D>>,
{
    fn create(&mut self, template: TemplateId) -> Box<dyn ItemContent<D>> {
        self(template)
    }
}

/// Collaborator receiving record self-update requests; see
/// [`ItemSlot::request_update`].
pub type UpdateHandler<D> = Rc<dyn Fn(D, &ItemSlot<D>)>;

// ─────────────────────────────────────────────────────────────────────────────
// Shared engine state
// ─────────────────────────────────────────────────────────────────────────────

/// Interior of the engine, shared between the [`ListAdapter`] handles and the
/// weak back-references held by containers.
///
/// The resolver is pure and only ever needs `&self`; the factory runs user
/// code under `&mut self` and gets its own cell so that code may re-enter the
/// adapter; everything else lives behind the `state` cell.
pub(crate) struct AdapterShared<D> {
    resolver: Box<dyn TemplateResolver<D>>,
    factory: RefCell<Box<dyn SlotFactory<D>>>,
    pub(crate) state: RefCell<AdapterState<D>>,
}

pub(crate) struct AdapterState<D> {
    records: Vec<D>,
    listener: Option<Rc<dyn InteractionListener<D>>>,
    pub(crate) update_handler: Option<UpdateHandler<D>>,
    /// Reverse-lookup side table; weak on purpose, the host's recycling pool
    /// owns the containers.
    surfaces: HashMap<SurfaceId, Weak<RefCell<SlotState<D>>>>,
    observers: ChangeObservers,
}

// ─────────────────────────────────────────────────────────────────────────────
// ListAdapter - engine handle
// ─────────────────────────────────────────────────────────────────────────────

/// The list adapter engine.
///
/// Owns the ordered record collection and mediates everything between it and
/// the host toolkit: mutations go in through [`append`](Self::append) /
/// [`append_all`](Self::append_all) / [`clear`](Self::clear) /
/// [`replace_all`](Self::replace_all) and come out as minimal [`ListChange`]
/// notifications; the toolkit drives
/// [`create_container`](Self::create_container) and [`bind`](Self::bind) for
/// the positions it shows; interaction events raised on a surface come back
/// through
/// [`dispatch_interaction`](Self::dispatch_interaction) to the single
/// registered [`InteractionListener`].
///
/// Cheap to clone; all clones drive the same engine. Single-threaded by
/// construction (`Rc` interior), matching the cooperative UI-event model the
/// engine is designed for: no call blocks, suspends, or locks.
///
/// Position-based queries (`record_at`, `template_at`, `bind`) treat an
/// out-of-range position as a programming error and panic.
pub struct ListAdapter<D> {
    shared: Rc<AdapterShared<D>>,
}

impl<D> Clone for ListAdapter<D> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<D: Clone + 'static> ListAdapter<D> {
    /// Creates an empty adapter from its two strategies: the resolver that
    /// assigns templates and the factory that builds containers for them.
    pub fn new(
        resolver: impl TemplateResolver<D> + 'static,
        factory: impl SlotFactory<D> + 'static,
    ) -> Self {
        Self {
            shared: Rc::new(AdapterShared {
                resolver: Box::new(resolver),
                factory: RefCell::new(Box::new(factory)),
                state: RefCell::new(AdapterState {
                    records: Vec::new(),
                    listener: None,
                    update_handler: None,
                    surfaces: HashMap::default(),
                    observers: ChangeObservers::new(),
                }),
            }),
        }
    }

    /// Number of records, always equal to the owned collection's length.
    pub fn len(&self) -> usize {
        self.shared.state.borrow().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.state.borrow().records.is_empty()
    }

    /// The record at `position`.
    ///
    /// Returns a clone: the collection is never handed out mutably, since
    /// mutating it outside the notification-emitting operations would break
    /// the contract with the host toolkit.
    pub fn record_at(&self, position: usize) -> D {
        let state = self.shared.state.borrow();
        match state.records.get(position) {
            Some(record) => record.clone(),
            None => panic!(
                "record_at: position {position} out of range (len {})",
                state.records.len()
            ),
        }
    }

    /// Resolves the template for `position` against the current collection.
    pub fn template_at(&self, position: usize) -> TemplateId {
        let state = self.shared.state.borrow();
        match state.records.get(position) {
            Some(record) => self.shared.resolver.resolve(position, record),
            None => panic!(
                "template_at: position {position} out of range (len {})",
                state.records.len()
            ),
        }
    }

    /// Appends one record; notifies a single insert at the new last index.
    pub fn append(&self, record: D) {
        let index = {
            let mut state = self.shared.state.borrow_mut();
            state.records.push(record);
            state.records.len() - 1
        };
        trace!("append: new record at {index}");
        self.notify(ListChange::Inserted { index });
    }

    /// Appends all records preserving their order; notifies one range insert
    /// covering exactly the new tail. Empty input is a no-op: no mutation,
    /// no notification.
    pub fn append_all(&self, records: impl IntoIterator<Item = D>) {
        // Collect before borrowing so the caller's iterator may touch the
        // adapter.
        let records: Vec<D> = records.into_iter().collect();
        if records.is_empty() {
            trace!("append_all: empty input, no-op");
            return;
        }
        let (start, count) = {
            let mut state = self.shared.state.borrow_mut();
            let start = state.records.len();
            let count = records.len();
            state.records.extend(records);
            (start, count)
        };
        debug!("append_all: {count} records at [{start}, {})", start + count);
        self.notify(ListChange::InsertedRange { start, count });
    }

    /// Empties the collection; notifies a full invalidation.
    pub fn clear(&self) {
        let len = {
            let mut state = self.shared.state.borrow_mut();
            let len = state.records.len();
            state.records.clear();
            len
        };
        debug!("clear: dropped {len} records");
        self.notify(ListChange::Invalidated);
    }

    /// Atomically replaces the whole collection; notifies a full
    /// invalidation. Replacing with an empty input yields an empty
    /// collection and is still notified, unlike an empty `append_all`.
    pub fn replace_all(&self, records: impl IntoIterator<Item = D>) {
        let records: Vec<D> = records.into_iter().collect();
        {
            let mut state = self.shared.state.borrow_mut();
            debug!(
                "replace_all: {} -> {} records",
                state.records.len(),
                records.len()
            );
            state.records = records;
        }
        self.notify(ListChange::Invalidated);
    }

    /// Registers the interaction listener; a previous listener is plainly
    /// overwritten.
    pub fn set_listener(&self, listener: impl InteractionListener<D> + 'static) {
        let replaced = {
            let mut state = self.shared.state.borrow_mut();
            state.listener.replace(Rc::new(listener)).is_some()
        };
        debug!("listener registered (replaced previous: {replaced})");
    }

    /// Removes the interaction listener; later taps are absorbed and later
    /// long-presses report unconsumed.
    pub fn clear_listener(&self) {
        self.shared.state.borrow_mut().listener = None;
        debug!("listener cleared");
    }

    /// Registers the collaborator receiving [`ItemSlot::request_update`]
    /// requests, overwriting any previous one.
    pub fn set_update_handler(&self, handler: UpdateHandler<D>) {
        self.shared.state.borrow_mut().update_handler = Some(handler);
    }

    /// Adds a change observer; returns an id for [`Self::remove_change_callback`].
    pub fn add_change_callback(&self, callback: ChangeCallback) -> u64 {
        self.shared.state.borrow_mut().observers.add(callback)
    }

    /// Removes a change observer.
    pub fn remove_change_callback(&self, id: u64) {
        self.shared.state.borrow_mut().observers.remove(id);
    }

    /// Creates a fresh container for `template` and returns it fully wired:
    /// content built by the factory, surface indexed for reverse dispatch,
    /// update path linked back to this engine.
    ///
    /// The caller (the host toolkit's pool) owns the returned slot; the
    /// engine keeps only a weak entry. Index entries whose container was
    /// dropped without [`release_surface`](Self::release_surface) are swept
    /// on each creation.
    pub fn create_container(&self, template: TemplateId) -> ItemSlot<D> {
        let content = self.shared.factory.borrow_mut().create(template);
        let slot = ItemSlot::new(content, template, Rc::downgrade(&self.shared));
        let surface = slot.surface_id();
        let (replaced, swept) = {
            let mut state = self.shared.state.borrow_mut();
            let before = state.surfaces.len();
            state.surfaces.retain(|_, entry| entry.strong_count() > 0);
            let swept = before - state.surfaces.len();
            let replaced = state
                .surfaces
                .insert(surface, Rc::downgrade(&slot.state))
                .is_some();
            (replaced, swept)
        };
        if swept > 0 {
            debug!("swept {swept} dead entries from the surface index");
        }
        if replaced {
            warn!("surface {surface:?} re-registered while still indexed");
        }
        debug!("created container for template {template:?} on surface {surface:?}");
        slot
    }

    /// Binds the record at `position` into `slot`.
    ///
    /// A rebind fully overwrites the slot's previous binding; no stale record
    /// stays observable. The slot's content hook runs after the collection
    /// borrow is released, so it may query or mutate this adapter.
    pub fn bind(&self, slot: &ItemSlot<D>, position: usize) {
        let record = {
            let state = self.shared.state.borrow();
            match state.records.get(position) {
                Some(record) => record.clone(),
                None => panic!(
                    "bind: position {position} out of range (len {})",
                    state.records.len()
                ),
            }
        };
        trace!("bind: position {position} -> surface {:?}", slot.surface_id());
        slot.bind_internal(position, record);
    }

    /// Drops the reverse-lookup entry for `surface`.
    ///
    /// The host calls this when it evicts the container from its pool;
    /// eviction is terminal, later events on the surface are absorbed.
    pub fn release_surface(&self, surface: SurfaceId) {
        let removed = self
            .shared
            .state
            .borrow_mut()
            .surfaces
            .remove(&surface)
            .is_some();
        if removed {
            debug!("surface {surface:?} released");
        } else {
            warn!("release_surface: surface {surface:?} was not indexed");
        }
    }

    /// Routes an interaction raised on `surface` back to the bound record.
    ///
    /// Reverse-looks-up the owning container, reads its current binding, and
    /// forwards `(container, record)` to the listener: `on_item_click` for a
    /// tap, `on_item_long_click` for a long press. Without a listener the
    /// event is absorbed and reported unconsumed; only the long-press path
    /// acts on that distinction, via the toolkit's fallback gesture handling.
    /// Events on unknown or already-evicted surfaces are absorbed likewise.
    pub fn dispatch_interaction(
        &self,
        surface: SurfaceId,
        interaction: Interaction,
    ) -> DispatchOutcome {
        let (slot, listener) = {
            let mut state = self.shared.state.borrow_mut();
            let alive = state.surfaces.get(&surface).and_then(Weak::upgrade);
            match alive {
                Some(slot_state) => (ItemSlot { state: slot_state }, state.listener.clone()),
                None => {
                    // Dead weak entries are pruned here; eviction already
                    // happened on the host side.
                    state.surfaces.remove(&surface);
                    warn!("{interaction:?} on unknown or evicted surface {surface:?}; dropped");
                    return DispatchOutcome::NotConsumed;
                }
            }
        };

        let Some(record) = slot.record() else {
            warn!("{interaction:?} on never-bound surface {surface:?}; dropped");
            return DispatchOutcome::NotConsumed;
        };
        let Some(listener) = listener else {
            trace!("{interaction:?} on surface {surface:?}: no listener registered");
            return DispatchOutcome::NotConsumed;
        };

        trace!(
            "{interaction:?} on surface {surface:?} -> position {:?}",
            slot.position()
        );
        match interaction {
            Interaction::Tap => listener.on_item_click(&slot, &record),
            Interaction::LongPress => listener.on_item_long_click(&slot, &record),
        }
        DispatchOutcome::Consumed
    }

    /// Emits `change` to every observer, in registration order, with no
    /// engine borrow held.
    fn notify(&self, change: ListChange) {
        let callbacks = self.shared.state.borrow().observers.snapshot();
        for callback in callbacks.iter() {
            callback(&change);
        }
    }
}

#[cfg(test)]
#[path = "tests/adapter_tests.rs"]
mod tests;
