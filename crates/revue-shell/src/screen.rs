//! Screens: lifecycle hooks plus the host driving creation, navigation, and
//! back-press delegation.

use log::{debug, warn};
use revue_core::{SurfaceId, TemplateId};

use crate::args::Bundle;
use crate::fragment::FragmentHost;
use crate::host::ContentHost;

/// Overridable lifecycle of one screen.
///
/// The creation sequence is fixed by [`ScreenHost::launch`]: window setup,
/// argument validation, content mount, widget wiring, data load. A screen
/// overrides the steps it needs; only the content template is mandatory.
pub trait Screen {
    /// The template mounted as this screen's content.
    fn content_template(&self) -> TemplateId;

    /// Window setup that runs before anything is mounted.
    fn init_window(&mut self) {}

    /// Validates launch arguments; returning `false` aborts the launch and
    /// the screen finishes without mounting.
    fn init_args(&mut self, args: &Bundle) -> bool {
        let _ = args;
        true
    }

    /// Wires widgets under the mounted content root.
    fn init_widget(&mut self, root: SurfaceId) {
        let _ = root;
    }

    /// Kicks off data loading.
    fn init_data(&mut self) {}
}

/// Drives one [`Screen`] and the fragments attached to it.
///
/// Owns the creation sequence, up-navigation, the back-press delegation
/// chain (fragments first, in attach order, first consumer wins), and final
/// teardown. A host whose screen rejected its arguments is born finished.
pub struct ScreenHost<S: Screen> {
    screen: S,
    fragments: Vec<FragmentHost>,
    root: Option<SurfaceId>,
    finished: bool,
}

impl<S: Screen> ScreenHost<S> {
    /// Runs the creation sequence and returns the host.
    ///
    /// `init_window` always runs first; if `init_args` rejects `args` the
    /// screen finishes immediately and nothing is mounted, otherwise the
    /// content template is mounted and `init_widget` / `init_data` run
    /// against the fresh root.
    pub fn launch(mut screen: S, args: &Bundle, host: &mut dyn ContentHost) -> Self {
        screen.init_window();
        if !screen.init_args(args) {
            debug!("screen rejected its launch arguments; finishing before mount");
            return Self {
                screen,
                fragments: Vec::new(),
                root: None,
                finished: true,
            };
        }
        let root = host.mount(screen.content_template());
        screen.init_widget(root);
        screen.init_data();
        debug!("screen launched with root {root:?}");
        Self {
            screen,
            fragments: Vec::new(),
            root: Some(root),
            finished: false,
        }
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut S {
        &mut self.screen
    }

    /// Root surface of the mounted content, `None` once finished (or never
    /// mounted).
    pub fn root(&self) -> Option<SurfaceId> {
        self.root
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Attaches a fragment: arguments, view creation (cached root reused if
    /// the fragment was attached before), then the view-created step.
    pub fn attach_fragment(
        &mut self,
        mut fragment: FragmentHost,
        args: &Bundle,
        host: &mut dyn ContentHost,
    ) {
        if self.finished {
            warn!("attach_fragment on a finished screen; ignored");
            return;
        }
        fragment.attach(args);
        fragment.create_view(host);
        fragment.view_created();
        self.fragments.push(fragment);
    }

    /// Detaches and returns the fragment at `index`, keeping its cached root
    /// alive for a later re-attach. Panics if `index` is out of range.
    pub fn detach_fragment(&mut self, index: usize, host: &mut dyn ContentHost) -> FragmentHost {
        let mut fragment = self.fragments.remove(index);
        fragment.detach_root(host);
        fragment
    }

    /// Up-navigation finishes the screen.
    pub fn navigate_up(&mut self, host: &mut dyn ContentHost) {
        debug!("navigate up");
        self.finish(host);
    }

    /// Offers the back press to attached fragments in attach order; the
    /// first one consuming it wins and the screen stays alive. If nobody
    /// consumes, the screen finishes. Returns whether a fragment consumed
    /// the event.
    pub fn back_pressed(&mut self, host: &mut dyn ContentHost) -> bool {
        if self.finished {
            warn!("back press on a finished screen; ignored");
            return false;
        }
        for fragment in &mut self.fragments {
            if fragment.back_pressed() {
                debug!("back press consumed by a fragment");
                return true;
            }
        }
        self.finish(host);
        false
    }

    /// Tears the screen down: fragment views first, then the content root.
    /// Finishing twice is a no-op.
    pub fn finish(&mut self, host: &mut dyn ContentHost) {
        if self.finished {
            warn!("finish on an already finished screen; ignored");
            return;
        }
        self.finished = true;
        for fragment in &mut self.fragments {
            fragment.destroy_view(host);
        }
        if let Some(root) = self.root.take() {
            host.unmount(root);
        }
        debug!("screen finished");
    }
}

#[cfg(test)]
#[path = "tests/screen_tests.rs"]
mod tests;
