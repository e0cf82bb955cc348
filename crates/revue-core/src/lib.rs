//! Generic list-adapter engine: an ordered, mutable collection of records
//! projected onto a recycled pool of view containers.
//!
//! The engine side of the contract lives in [`ListAdapter`]: it owns the
//! record collection, emits minimal [`ListChange`] notifications on mutation,
//! resolves which template renders each position, (re)binds containers to
//! records, and routes tap / long-press events raised on a surface back to
//! the record that produced them. The host toolkit keeps the other side of
//! the contract: it owns the containers' lifetimes (creation via
//! [`ListAdapter::create_container`], recycling, eviction), decides which
//! positions are visible, and raises interaction events by [`SurfaceId`].
//!
//! Application code plugs in two strategies: a [`TemplateResolver`] choosing
//! a [`TemplateId`] per `(position, record)`, and a [`SlotFactory`] building
//! the [`ItemContent`] (rendering surface plus bind hook) for a template.
//!
//! All state is `Rc`/`RefCell` based and confined to the thread driving the
//! host toolkit's event loop; handles are cheap to clone and `!Send`.
//!
//! # Example
//!
//! ```rust,ignore
//! let adapter = ListAdapter::new(
//!     |_pos, record: &Contact| {
//!         if record.is_header { HEADER } else { ROW }
//!     },
//!     ContactFactory::new(),
//! );
//! adapter.set_listener(OpenChatOnClick::new());
//! adapter.append_all(contacts);
//!
//! // Host toolkit side:
//! let slot = adapter.create_container(adapter.template_at(0));
//! adapter.bind(&slot, 0);
//! adapter.dispatch_interaction(slot.surface_id(), Interaction::Tap);
//! ```

pub mod adapter;
pub mod collections;
pub mod events;
pub mod notify;
pub mod slot;
pub mod surface;
pub mod template;

pub use adapter::{ListAdapter, SlotFactory, UpdateHandler};
pub use events::{DispatchOutcome, Interaction, InteractionListener};
pub use notify::{ChangeCallback, ListChange};
pub use slot::{ItemContent, ItemSlot};
pub use surface::SurfaceId;
pub use template::{TemplateId, TemplateResolver};
