use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::fragment::Fragment;

const MAIN: TemplateId = TemplateId(10);
const PANEL: TemplateId = TemplateId(11);

struct RecordingHost {
    mounted: Vec<(TemplateId, SurfaceId)>,
    detached: Vec<SurfaceId>,
    unmounted: Vec<SurfaceId>,
}

impl RecordingHost {
    fn new() -> Self {
        Self {
            mounted: Vec::new(),
            detached: Vec::new(),
            unmounted: Vec::new(),
        }
    }
}

impl ContentHost for RecordingHost {
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

struct ProbeScreen {
    log: Rc<RefCell<Vec<&'static str>>>,
    accept_args: bool,
}

impl Screen for ProbeScreen {
    fn content_template(&self) -> TemplateId {
        MAIN
    }

    fn init_window(&mut self) {
        self.log.borrow_mut().push("init_window");
    }

    fn init_args(&mut self, _args: &Bundle) -> bool {
        self.log.borrow_mut().push("init_args");
        self.accept_args
    }

    fn init_widget(&mut self, _root: SurfaceId) {
        self.log.borrow_mut().push("init_widget");
    }

    fn init_data(&mut self) {
        self.log.borrow_mut().push("init_data");
    }
}

struct ProbeFragment {
    name: &'static str,
    log: Rc<RefCell<Vec<String>>>,
    consume_back: bool,
}

impl Fragment for ProbeFragment {
    fn content_template(&self) -> TemplateId {
        PANEL
    }

    fn on_back_pressed(&mut self) -> bool {
        self.log.borrow_mut().push(format!("back:{}", self.name));
        self.consume_back
    }
}

fn probe_screen(log: &Rc<RefCell<Vec<&'static str>>>, accept_args: bool) -> ProbeScreen {
    ProbeScreen {
        log: Rc::clone(log),
        accept_args,
    }
}

#[test]
fn launch_runs_creation_sequence_in_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut host = RecordingHost::new();

    let screen = ScreenHost::launch(probe_screen(&log, true), &Bundle::new(), &mut host);

    assert_eq!(
        *log.borrow(),
        vec!["init_window", "init_args", "init_widget", "init_data"]
    );
    assert!(!screen.is_finished());
    assert_eq!(host.mounted.len(), 1);
    assert_eq!(host.mounted[0].0, MAIN);
    assert_eq!(screen.root(), Some(host.mounted[0].1));
}

#[test]
fn rejected_args_finish_before_mount() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut host = RecordingHost::new();

    let screen = ScreenHost::launch(probe_screen(&log, false), &Bundle::new(), &mut host);

    assert!(screen.is_finished());
    assert_eq!(screen.root(), None);
    assert!(host.mounted.is_empty());
    // Widget wiring and data load never ran.
    assert_eq!(*log.borrow(), vec!["init_window", "init_args"]);
}

#[test]
fn navigate_up_finishes_and_unmounts_root() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut host = RecordingHost::new();
    let mut screen = ScreenHost::launch(probe_screen(&log, true), &Bundle::new(), &mut host);
    let root = screen.root().unwrap();

    screen.navigate_up(&mut host);

    assert!(screen.is_finished());
    assert_eq!(screen.root(), None);
    assert_eq!(host.unmounted, vec![root]);
}

#[test]
fn back_press_without_fragments_finishes() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut host = RecordingHost::new();
    let mut screen = ScreenHost::launch(probe_screen(&log, true), &Bundle::new(), &mut host);

    let consumed = screen.back_pressed(&mut host);

    assert!(!consumed);
    assert!(screen.is_finished());
}

#[test]
fn back_press_stops_at_first_consuming_fragment() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let back_log = Rc::new(RefCell::new(Vec::new()));
    let mut host = RecordingHost::new();
    let mut screen = ScreenHost::launch(probe_screen(&log, true), &Bundle::new(), &mut host);

    for (name, consume) in [("a", false), ("b", true), ("c", false)] {
        screen.attach_fragment(
            FragmentHost::new(ProbeFragment {
                name,
                log: Rc::clone(&back_log),
                consume_back: consume,
            }),
            &Bundle::new(),
            &mut host,
        );
    }

    let consumed = screen.back_pressed(&mut host);

    assert!(consumed);
    assert!(!screen.is_finished());
    // Offered in attach order; "c" was never asked.
    assert_eq!(*back_log.borrow(), vec!["back:a", "back:b"]);
}

#[test]
fn back_press_finishes_when_all_fragments_decline() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let back_log = Rc::new(RefCell::new(Vec::new()));
    let mut host = RecordingHost::new();
    let mut screen = ScreenHost::launch(probe_screen(&log, true), &Bundle::new(), &mut host);

    for name in ["a", "b"] {
        screen.attach_fragment(
            FragmentHost::new(ProbeFragment {
                name,
                log: Rc::clone(&back_log),
                consume_back: false,
            }),
            &Bundle::new(),
            &mut host,
        );
    }

    let consumed = screen.back_pressed(&mut host);

    assert!(!consumed);
    assert!(screen.is_finished());
    assert_eq!(*back_log.borrow(), vec!["back:a", "back:b"]);
}

#[test]
fn finish_tears_down_fragment_views_before_the_root() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut host = RecordingHost::new();
    let mut screen = ScreenHost::launch(probe_screen(&log, true), &Bundle::new(), &mut host);
    let root = screen.root().unwrap();

    screen.attach_fragment(
        FragmentHost::new(ProbeFragment {
            name: "a",
            log: Rc::new(RefCell::new(Vec::new())),
            consume_back: false,
        }),
        &Bundle::new(),
        &mut host,
    );
    let fragment_root = host.mounted[1].1;

    screen.finish(&mut host);
    // Finishing twice changes nothing.
    screen.finish(&mut host);

    assert_eq!(host.unmounted, vec![fragment_root, root]);
}

#[test]
fn attach_fragment_on_finished_screen_is_ignored() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut host = RecordingHost::new();
    let mut screen = ScreenHost::launch(probe_screen(&log, false), &Bundle::new(), &mut host);

    screen.attach_fragment(
        FragmentHost::new(ProbeFragment {
            name: "a",
            log: Rc::new(RefCell::new(Vec::new())),
            consume_back: false,
        }),
        &Bundle::new(),
        &mut host,
    );

    assert_eq!(screen.fragment_count(), 0);
    assert!(host.mounted.is_empty());
}

#[test]
fn detached_fragment_reattaches_with_cached_root() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut host = RecordingHost::new();
    let mut screen = ScreenHost::launch(probe_screen(&log, true), &Bundle::new(), &mut host);

    screen.attach_fragment(
        FragmentHost::new(ProbeFragment {
            name: "a",
            log: Rc::new(RefCell::new(Vec::new())),
            consume_back: false,
        }),
        &Bundle::new(),
        &mut host,
    );
    let fragment_root = host.mounted[1].1;

    let detached = screen.detach_fragment(0, &mut host);
    assert_eq!(screen.fragment_count(), 0);
    assert_eq!(host.detached, vec![fragment_root]);

    screen.attach_fragment(detached, &Bundle::new(), &mut host);
    assert_eq!(screen.fragment_count(), 1);
    // Still only the two original mounts: screen root + first fragment view.
    assert_eq!(host.mounted.len(), 2);
}

#[test]
fn screen_mut_lets_the_host_update_screen_state() {
    struct TallyScreen {
        refreshes: usize,
    }

    impl Screen for TallyScreen {
        fn content_template(&self) -> TemplateId {
            MAIN
        }
    }

    let mut host = RecordingHost::new();
    let mut screen = ScreenHost::launch(TallyScreen { refreshes: 0 }, &Bundle::new(), &mut host);

    screen.screen_mut().refreshes += 1;
    screen.screen_mut().refreshes += 1;

    assert_eq!(screen.screen().refreshes, 2);
}
