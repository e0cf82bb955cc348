//! Screen and fragment lifecycle scaffolding around the revue list adapter.
//!
//! [`revue_core`] answers "which record is shown where"; this crate answers
//! "when does a screen come up, wire its widgets, load its data, and tear
//! itself down". The split mirrors how an embedding shell drives the adapter:
//! the shell owns windows and navigation, the adapter owns list content.
//!
//! A [`Screen`] is launched through [`ScreenHost::launch`], which walks the
//! fixed creation sequence (window setup, argument validation, content mount,
//! widget wiring, data load) and refuses to come up when the arguments are
//! rejected. [`Fragment`]s attach to a live screen through
//! [`ScreenHost::attach_fragment`] and keep their content surface cached
//! across detach/reattach cycles. Back navigation is offered to fragments
//! first, in attach order; the screen finishes only when nobody consumes it.
//!
//! Typed launch arguments travel in a [`Bundle`]; lookups that must succeed
//! return [`ArgError`] when the value is absent or of the wrong kind.
//!
//! Nothing here touches a real window system. The [`ContentHost`] trait is
//! the seam: the embedding toolkit implements mount/detach/unmount against
//! its actual surface tree, and everything in this crate stays host-agnostic.

pub mod args;
pub mod fragment;
pub mod host;
pub mod screen;

pub use args::{ArgError, ArgValue, Bundle};
pub use fragment::{Fragment, FragmentHost};
pub use host::ContentHost;
pub use screen::{Screen, ScreenHost};
