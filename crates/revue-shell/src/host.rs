//! The mounting seam between the shell and the host toolkit.

use revue_core::{SurfaceId, TemplateId};

/// What the shell needs from the surrounding toolkit to place content.
///
/// Screens and fragments never render; they name a template and the embedder
/// turns it into a mounted surface. The three operations mirror a view
/// hierarchy's life: inflate-and-attach, detach-keeping-alive, tear down.
pub trait ContentHost {
    /// Inflates `template` and attaches it to the window; returns the root
    /// surface of what was mounted.
    fn mount(&mut self, template: TemplateId) -> SurfaceId;

    /// Detaches `surface` from its current parent without destroying it, so
    /// it can be attached elsewhere. Cached fragment roots pass through here
    /// on re-attach.
    fn detach_from_parent(&mut self, surface: SurfaceId);

    /// Destroys a previously mounted surface.
    fn unmount(&mut self, surface: SurfaceId);
}
