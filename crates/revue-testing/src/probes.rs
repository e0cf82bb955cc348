use std::cell::RefCell;
use std::rc::Rc;

use revue_core::{
    Interaction, InteractionListener, ItemContent, ItemSlot, SlotFactory, SurfaceId, TemplateId,
};
use revue_shell::ContentHost;

/// One observed bind: which template's surface received which record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindRecord<D> {
    pub template: TemplateId,
    pub surface: SurfaceId,
    pub record: D,
}

/// Content stand-in that appends a [`BindRecord`] to a shared log on every
/// bind. Tests never construct these directly; [`ProbeFactory`] hands them
/// out with freshly minted surface ids.
pub struct ProbeContent<D> {
    surface: SurfaceId,
    template: TemplateId,
    binds: Rc<RefCell<Vec<BindRecord<D>>>>,
}

impl<D: Clone> ItemContent<D> for ProbeContent<D> {
    fn surface_id(&self) -> SurfaceId {
        self.surface
    }

    fn bind(&mut self, record: &D) {
        self.binds.borrow_mut().push(BindRecord {
            template: self.template,
            surface: self.surface,
            record: record.clone(),
        });
    }
}

/// Factory that accepts every template id, mints a real surface per
/// container, and records what it created and what got bound.
///
/// Clones share the same logs, so keep one clone outside the adapter for
/// assertions:
///
/// ```rust,ignore
/// let factory = ProbeFactory::new();
/// let probe = factory.clone();
/// let adapter = ListAdapter::new(resolver, factory);
/// // ... drive the adapter ...
/// assert_eq!(probe.created_count(), 2);
/// ```
pub struct ProbeFactory<D> {
    created: Rc<RefCell<Vec<TemplateId>>>,
    binds: Rc<RefCell<Vec<BindRecord<D>>>>,
}

impl<D> ProbeFactory<D> {
    pub fn new() -> Self {
        Self {
            created: Rc::new(RefCell::new(Vec::new())),
            binds: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Templates passed to `create`, in call order.
    pub fn created(&self) -> Vec<TemplateId> {
        self.created.borrow().clone()
    }

    pub fn created_count(&self) -> usize {
        self.created.borrow().len()
    }

    /// Drains the bind log.
    pub fn take_binds(&self) -> Vec<BindRecord<D>> {
        self.binds.borrow_mut().drain(..).collect()
    }

    pub fn bind_count(&self) -> usize {
        self.binds.borrow().len()
    }
}

impl<D> Default for ProbeFactory<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Clone for ProbeFactory<D> {
    fn clone(&self) -> Self {
        Self {
            created: Rc::clone(&self.created),
            binds: Rc::clone(&self.binds),
        }
    }
}

impl<D: Clone + 'static> SlotFactory<D> for ProbeFactory<D> {
    fn create(&mut self, template: TemplateId) -> Box<dyn ItemContent<D>> {
        self.created.borrow_mut().push(template);
        Box::new(ProbeContent {
            surface: SurfaceId::next(),
            template,
            binds: Rc::clone(&self.binds),
        })
    }
}

/// Listener that appends `(interaction, record)` pairs to a shared log.
/// Clones share the log; register one clone, assert through another.
pub struct RecordingListener<D> {
    events: Rc<RefCell<Vec<(Interaction, D)>>>,
}

impl<D> RecordingListener<D> {
    pub fn new() -> Self {
        Self {
            events: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Drains the recorded events.
    pub fn take(&self) -> Vec<(Interaction, D)> {
        self.events.borrow_mut().drain(..).collect()
    }

    pub fn event_count(&self) -> usize {
        self.events.borrow().len()
    }
}

impl<D> Default for RecordingListener<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Clone for RecordingListener<D> {
    fn clone(&self) -> Self {
        Self {
            events: Rc::clone(&self.events),
        }
    }
}

impl<D: Clone> InteractionListener<D> for RecordingListener<D> {
    fn on_item_click(&self, _slot: &ItemSlot<D>, record: &D) {
        self.events
            .borrow_mut()
            .push((Interaction::Tap, record.clone()));
    }

    fn on_item_long_click(&self, _slot: &ItemSlot<D>, record: &D) {
        self.events
            .borrow_mut()
            .push((Interaction::LongPress, record.clone()));
    }
}

/// [`ContentHost`] for shell tests: mounts succeed unconditionally and every
/// call lands in a public log.
#[derive(Debug, Default)]
pub struct TestContentHost {
    mounted: Vec<(TemplateId, SurfaceId)>,
    detached: Vec<SurfaceId>,
    unmounted: Vec<SurfaceId>,
}

impl TestContentHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mounted(&self) -> &[(TemplateId, SurfaceId)] {
        &self.mounted
    }

    pub fn detached(&self) -> &[SurfaceId] {
        &self.detached
    }

    pub fn unmounted(&self) -> &[SurfaceId] {
        &self.unmounted
    }

    /// Surfaces mounted and not yet unmounted.
    pub fn live_count(&self) -> usize {
        self.mounted.len() - self.unmounted.len()
    }
}

impl ContentHost for TestContentHost {
    fn mount(&mut self, template: TemplateId) -> SurfaceId {
        let surface = SurfaceId::next();
        self.mounted.push((template, surface));
        surface
    }

    fn detach_from_parent(&mut self, surface: SurfaceId) {
        self.detached.push(surface);
    }

    fn unmount(&mut self, surface: SurfaceId) {
        self.unmounted.push(surface);
    }
}
