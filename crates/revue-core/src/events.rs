//! Interaction kinds, dispatch outcomes, and the item listener contract.

use crate::slot::ItemSlot;

/// The two gesture kinds the engine routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interaction {
    /// A short press on an item's surface.
    Tap,
    /// A long press on an item's surface.
    LongPress,
}

/// What the host toolkit is told after a dispatch.
///
/// Only long-press acts on it: a consumed long-press suppresses the
/// toolkit's fallback gesture handling, an unconsumed one lets it proceed.
/// Taps have no fallback, so hosts ignore the outcome for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A listener received the event.
    Consumed,
    /// Nobody handled the event.
    NotConsumed,
}

impl DispatchOutcome {
    pub fn is_consumed(self) -> bool {
        matches!(self, DispatchOutcome::Consumed)
    }
}

/// Receives interaction events together with the container that raised them
/// and the record it is bound to.
///
/// An adapter holds at most one listener; registering a new one overwrites
/// the old without any queuing.
pub trait InteractionListener<D> {
    /// A tap landed on the container currently bound to `record`.
    fn on_item_click(&self, slot: &ItemSlot<D>, record: &D);

    /// A long press landed on the container currently bound to `record`.
    fn on_item_long_click(&self, slot: &ItemSlot<D>, record: &D);
}
