//! Embeddable fragments: lifecycle hooks plus a driver caching the root view.

use log::debug;
use revue_core::{SurfaceId, TemplateId};

use crate::args::Bundle;
use crate::host::ContentHost;

/// Overridable lifecycle of an embeddable view fragment.
///
/// Only `content_template` is mandatory; every hook defaults to a no-op so a
/// fragment implements exactly what it cares about.
pub trait Fragment {
    /// The template mounted as this fragment's root view.
    fn content_template(&self) -> TemplateId;

    /// Parses attach-time arguments. Runs on every attach.
    fn init_args(&mut self, args: &Bundle) {
        let _ = args;
    }

    /// Wires widgets under the freshly mounted root. Runs once per root
    /// creation, never on re-attach (the root is cached).
    fn init_widget(&mut self, root: SurfaceId) {
        let _ = root;
    }

    /// Kicks off data loading once the view is in place. Runs on every
    /// attach.
    fn init_data(&mut self) {}

    /// Back-press hook: `true` consumes the event and keeps the host screen
    /// alive, `false` passes it on (and the screen finishes if nobody
    /// consumes).
    fn on_back_pressed(&mut self) -> bool {
        false
    }
}

/// Drives one [`Fragment`] through attach, view creation, and teardown,
/// caching the root surface across re-attachment.
pub struct FragmentHost {
    fragment: Box<dyn Fragment>,
    root: Option<SurfaceId>,
    in_parent: bool,
}

impl FragmentHost {
    pub fn new(fragment: impl Fragment + 'static) -> Self {
        Self {
            fragment: Box::new(fragment),
            root: None,
            in_parent: false,
        }
    }

    /// Attach-time entry: hands the arguments to the fragment.
    pub fn attach(&mut self, args: &Bundle) {
        self.fragment.init_args(args);
    }

    /// Creates the fragment's root view, or reuses the cached one.
    ///
    /// First creation mounts the content template and runs `init_widget`.
    /// Re-attachment hands back the cached root (detached from its previous
    /// parent first if it still has one) and skips `init_widget`.
    pub fn create_view(&mut self, host: &mut dyn ContentHost) -> SurfaceId {
        match self.root {
            Some(root) => {
                if self.in_parent {
                    host.detach_from_parent(root);
                }
                self.in_parent = true;
                debug!("fragment root {root:?} reused");
                root
            }
            None => {
                let root = host.mount(self.fragment.content_template());
                self.fragment.init_widget(root);
                self.root = Some(root);
                self.in_parent = true;
                debug!("fragment root {root:?} created");
                root
            }
        }
    }

    /// Post-attach entry: the view is in place, load data.
    pub fn view_created(&mut self) {
        self.fragment.init_data();
    }

    pub fn back_pressed(&mut self) -> bool {
        self.fragment.on_back_pressed()
    }

    pub fn root(&self) -> Option<SurfaceId> {
        self.root
    }

    /// Takes the root out of its parent, keeping it cached for a later
    /// re-attach.
    pub(crate) fn detach_root(&mut self, host: &mut dyn ContentHost) {
        if let Some(root) = self.root {
            if self.in_parent {
                host.detach_from_parent(root);
                self.in_parent = false;
            }
        }
    }

    /// Destroys the cached root for good.
    pub(crate) fn destroy_view(&mut self, host: &mut dyn ContentHost) {
        if let Some(root) = self.root.take() {
            host.unmount(root);
            self.in_parent = false;
        }
    }
}
