//! Change notifications emitted by the adapter's mutation API.

use std::rc::Rc;

use smallvec::SmallVec;

/// Minimal description of one collection mutation.
///
/// The granularity is a performance contract, not a convenience: the host
/// toolkit uses it to re-bind only the affected positions, so an append must
/// surface as a single insert, a bulk append as a range insert, and only
/// clear/replace as a full invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListChange {
    /// One record was inserted at `index`.
    Inserted { index: usize },
    /// `count` records were inserted at `[start, start + count)`.
    InsertedRange { start: usize, count: usize },
    /// Any position may have changed; re-bind everything visible.
    Invalidated,
}

/// Callback receiving every [`ListChange`] in emission order.
pub type ChangeCallback = Rc<dyn Fn(&ListChange)>;

/// Registry of change observers.
///
/// Most adapters have one or two observers (the host toolkit, maybe a test
/// probe), hence the inline capacity.
pub(crate) struct ChangeObservers {
    callbacks: SmallVec<[(u64, ChangeCallback); 2]>,
    next_id: u64,
}

impl ChangeObservers {
    pub(crate) fn new() -> Self {
        Self {
            callbacks: SmallVec::new(),
            next_id: 1,
        }
    }

    pub(crate) fn add(&mut self, callback: ChangeCallback) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.callbacks.push((id, callback));
        id
    }

    pub(crate) fn remove(&mut self, id: u64) {
        self.callbacks.retain(|(cb_id, _)| *cb_id != id);
    }

    /// Clones the callbacks so the caller can invoke them with no engine
    /// borrow held; an observer may re-enter the adapter freely.
    pub(crate) fn snapshot(&self) -> SmallVec<[ChangeCallback; 2]> {
        self.callbacks.iter().map(|(_, cb)| Rc::clone(cb)).collect()
    }
}
