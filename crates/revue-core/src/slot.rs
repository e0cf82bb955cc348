//! Reusable view containers: one rendering surface, one bound record.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::debug;

use crate::adapter::AdapterShared;
use crate::surface::SurfaceId;
use crate::template::TemplateId;

/// Subtype-specific half of a view container.
///
/// Implementations own the concrete rendering surface for one template and
/// know how to render a record into it. Everything else a container needs
/// (current binding, reverse lookup, self-update) lives in [`ItemSlot`] and
/// is wired by the engine when the container is created.
pub trait ItemContent<D> {
    /// Id of the rendering surface this content draws into.
    ///
    /// Must stay stable for the content's lifetime; the engine indexes the
    /// container under this id once, at creation.
    fn surface_id(&self) -> SurfaceId;

    /// Renders `record` into the surface. Called on every (re)bind.
    ///
    /// Runs while the container's own state is mid-update: render from the
    /// passed `record`, not by reading back through a stored [`ItemSlot`]
    /// handle. Queries against the owning
    /// [`ListAdapter`](crate::ListAdapter) are fine; mutations are too, as
    /// long as no change observer synchronously rebinds the container
    /// currently being bound.
    fn bind(&mut self, record: &D);
}

pub(crate) struct SlotState<D> {
    pub(crate) content: Box<dyn ItemContent<D>>,
    pub(crate) surface: SurfaceId,
    pub(crate) template: TemplateId,
    pub(crate) record: Option<D>,
    pub(crate) position: Option<usize>,
    pub(crate) adapter: Weak<AdapterShared<D>>,
}

/// Handle to one reusable view container.
///
/// Cheap to clone; all clones share the same container state. The host
/// toolkit's recycling pool keeps a handle per pooled container while the
/// engine keeps only a weak reverse-lookup entry, so dropping the host's
/// last handle is what actually evicts the container.
///
/// Lifecycle: unbound after [`ListAdapter::create_container`], bound (and
/// rebound, fully overwriting the previous binding) through
/// [`ListAdapter::bind`], evicted when the host releases the surface and
/// drops its handles. Eviction is terminal; a fresh container comes from a
/// fresh `create_container` call.
///
/// [`ListAdapter::create_container`]: crate::ListAdapter::create_container
/// [`ListAdapter::bind`]: crate::ListAdapter::bind
pub struct ItemSlot<D> {
    pub(crate) state: Rc<RefCell<SlotState<D>>>,
}

impl<D> Clone for ItemSlot<D> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<D: Clone + 'static> ItemSlot<D> {
    pub(crate) fn new(
        content: Box<dyn ItemContent<D>>,
        template: TemplateId,
        adapter: Weak<AdapterShared<D>>,
    ) -> Self {
        let surface = content.surface_id();
        Self {
            state: Rc::new(RefCell::new(SlotState {
                content,
                surface,
                template,
                record: None,
                position: None,
                adapter,
            })),
        }
    }

    /// Id of the rendering surface this container wraps.
    pub fn surface_id(&self) -> SurfaceId {
        self.state.borrow().surface
    }

    /// The template this container was created for.
    pub fn template(&self) -> TemplateId {
        self.state.borrow().template
    }

    /// The record currently bound, or `None` before the first bind.
    pub fn record(&self) -> Option<D> {
        self.state.borrow().record.clone()
    }

    /// The position of the current binding, or `None` before the first bind.
    pub fn position(&self) -> Option<usize> {
        self.state.borrow().position
    }

    pub fn is_bound(&self) -> bool {
        self.state.borrow().record.is_some()
    }

    /// Asks the engine to treat this container's bound record as updated.
    ///
    /// The engine forwards `record` together with this container to the
    /// registered update handler and touches nothing else. In particular it
    /// does not search the collection, because only the handler knows how to
    /// re-derive the record's position correctly. With no handler registered
    /// the request is dropped.
    pub fn request_update(&self, record: D) {
        let adapter = self.state.borrow().adapter.upgrade();
        let Some(shared) = adapter else {
            debug!(
                "update request from surface {:?} after adapter drop; dropped",
                self.surface_id()
            );
            return;
        };
        let handler = shared.state.borrow().update_handler.clone();
        match handler {
            Some(handler) => handler(record, self),
            None => debug!(
                "update request from surface {:?} dropped: no handler registered",
                self.surface_id()
            ),
        }
    }

    /// Stores the new binding and runs the content's bind hook.
    pub(crate) fn bind_internal(&self, position: usize, record: D) {
        let mut state = self.state.borrow_mut();
        state.record = Some(record.clone());
        state.position = Some(position);
        state.content.bind(&record);
    }
}
