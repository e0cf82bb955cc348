use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use log::{debug, info, warn};

use revue_core::{
    DispatchOutcome, Interaction, InteractionListener, ItemContent, ItemSlot, ListAdapter,
    ListChange, SurfaceId, TemplateId,
};
use revue_shell::{Bundle, ContentHost, Screen, ScreenHost};

const ROSTER_ROOT: TemplateId = TemplateId(0);
const HEADER: TemplateId = TemplateId(1);
const PERSON: TemplateId = TemplateId(2);

#[derive(Debug, Clone, PartialEq, Eq)]
enum RosterEntry {
    Header(String),
    Person { name: String, online: bool },
}

fn person(name: &str, online: bool) -> RosterEntry {
    RosterEntry::Person {
        name: name.to_string(),
        online,
    }
}

fn resolve_template(_position: usize, entry: &RosterEntry) -> TemplateId {
    match entry {
        RosterEntry::Header(_) => HEADER,
        RosterEntry::Person { .. } => PERSON,
    }
}

struct HeaderLine {
    surface: SurfaceId,
}

impl ItemContent<RosterEntry> for HeaderLine {
    fn surface_id(&self) -> SurfaceId {
        self.surface
    }

    fn bind(&mut self, entry: &RosterEntry) {
        match entry {
            RosterEntry::Header(title) => println!("-- {title} --"),
            other => warn!("header layout bound to {other:?}"),
        }
    }
}

struct PersonRow {
    surface: SurfaceId,
}

impl ItemContent<RosterEntry> for PersonRow {
    fn surface_id(&self) -> SurfaceId {
        self.surface
    }

    fn bind(&mut self, entry: &RosterEntry) {
        match entry {
            RosterEntry::Person { name, online } => {
                println!("{} {name}", if *online { "[*]" } else { "[ ]" });
            }
            other => warn!("person layout bound to {other:?}"),
        }
    }
}

fn roster_factory(template: TemplateId) -> Box<dyn ItemContent<RosterEntry>> {
    match template {
        HEADER => Box::new(HeaderLine {
            surface: SurfaceId::next(),
        }),
        PERSON => Box::new(PersonRow {
            surface: SurfaceId::next(),
        }),
        other => panic!("no layout registered for template {other:?}"),
    }
}

/// Taps flip a person's presence through the container's own update hook;
/// long presses only print. Headers swallow both.
struct PresenceToggler;

impl InteractionListener<RosterEntry> for PresenceToggler {
    fn on_item_click(&self, slot: &ItemSlot<RosterEntry>, record: &RosterEntry) {
        if let RosterEntry::Person { name, online } = record {
            info!("tap on {name}; toggling presence");
            slot.request_update(RosterEntry::Person {
                name: name.clone(),
                online: !online,
            });
        }
    }

    fn on_item_long_click(&self, _slot: &ItemSlot<RosterEntry>, record: &RosterEntry) {
        if let RosterEntry::Person { name, .. } = record {
            println!("(long press) {name} pinned to the top of your roster");
        }
    }
}

/// Routes container update requests back into the collection: the slot says
/// which position it is showing, the collection swaps that record and lets
/// the refresh notification redraw everything.
fn wire_presence_updates(adapter: &ListAdapter<RosterEntry>) {
    let collection = adapter.clone();
    adapter.set_update_handler(Rc::new(move |entry, slot| {
        let Some(position) = slot.position() else {
            warn!("update request from an unbound container");
            return;
        };
        if position >= collection.len() {
            warn!("update request for position {position} after the roster shrank");
            return;
        }
        let mut entries: Vec<RosterEntry> = (0..collection.len())
            .map(|i| collection.record_at(i))
            .collect();
        entries[position] = entry;
        collection.replace_all(entries);
    }));
}

/// The demo's stand-in for a list widget: one container per position,
/// "rendering" by letting each bind print its line.
struct RosterView {
    adapter: ListAdapter<RosterEntry>,
    window: Vec<ItemSlot<RosterEntry>>,
}

impl RosterView {
    fn attach(adapter: &ListAdapter<RosterEntry>) -> Rc<RefCell<RosterView>> {
        let view = Rc::new(RefCell::new(RosterView {
            adapter: adapter.clone(),
            window: Vec::new(),
        }));
        let hook = Rc::downgrade(&view);
        adapter.add_change_callback(Rc::new(move |change: &ListChange| {
            if let Some(view) = hook.upgrade() {
                view.borrow_mut().apply(change);
            }
        }));
        view
    }

    fn surface_at(&self, position: usize) -> Option<SurfaceId> {
        self.window.get(position).map(ItemSlot::surface_id)
    }

    fn apply(&mut self, change: &ListChange) {
        match *change {
            ListChange::Inserted { index } if index == self.window.len() => self.mount(index),
            ListChange::InsertedRange { start, count } if start == self.window.len() => {
                for position in start..start + count {
                    self.mount(position);
                }
            }
            _ => self.redraw(),
        }
    }

    fn mount(&mut self, position: usize) {
        let template = self.adapter.template_at(position);
        let slot = self.adapter.create_container(template);
        self.adapter.bind(&slot, position);
        self.window.push(slot);
    }

    fn redraw(&mut self) {
        let mut spare: Vec<ItemSlot<RosterEntry>> = self.window.drain(..).collect();
        for position in 0..self.adapter.len() {
            let template = self.adapter.template_at(position);
            let slot = match spare.iter().position(|slot| slot.template() == template) {
                Some(i) => spare.swap_remove(i),
                None => self.adapter.create_container(template),
            };
            self.adapter.bind(&slot, position);
            self.window.push(slot);
        }
        for unused in spare {
            self.adapter.release_surface(unused.surface_id());
        }
    }
}

struct TerminalHost;

impl ContentHost for TerminalHost {
    fn mount(&mut self, template: TemplateId) -> SurfaceId {
        let surface = SurfaceId::next();
        debug!("mounted {surface:?} for template {template:?}");
        surface
    }

    fn detach_from_parent(&mut self, surface: SurfaceId) {
        debug!("detached {surface:?}");
    }

    fn unmount(&mut self, surface: SurfaceId) {
        debug!("unmounted {surface:?}");
    }
}

struct RosterScreen {
    title: String,
    adapter: ListAdapter<RosterEntry>,
    view: Option<Rc<RefCell<RosterView>>>,
}

impl RosterScreen {
    fn new(adapter: ListAdapter<RosterEntry>) -> Self {
        Self {
            title: String::new(),
            adapter,
            view: None,
        }
    }

    fn surface_at(&self, position: usize) -> Option<SurfaceId> {
        self.view
            .as_ref()
            .and_then(|view| view.borrow().surface_at(position))
    }
}

impl Screen for RosterScreen {
    fn content_template(&self) -> TemplateId {
        ROSTER_ROOT
    }

    fn init_args(&mut self, args: &Bundle) -> bool {
        match args.require_text("title") {
            Ok(title) => {
                self.title = title.to_string();
                true
            }
            Err(err) => {
                warn!("roster screen rejected launch: {err}");
                false
            }
        }
    }

    fn init_widget(&mut self, root: SurfaceId) {
        debug!("roster widgets wired under {root:?}");
        self.view = Some(RosterView::attach(&self.adapter));
        self.adapter.set_listener(PresenceToggler);
        wire_presence_updates(&self.adapter);
    }

    fn init_data(&mut self) {
        println!("== {} ==", self.title);
        self.adapter
            .append(RosterEntry::Header("Favorites".to_string()));
        self.adapter
            .append_all([person("Ada", true), person("Gus", false)]);
        self.adapter
            .append(RosterEntry::Header("Everyone".to_string()));
        self.adapter
            .append_all([person("Liv", true), person("Mark", false)]);
    }
}

fn gesture(
    screen: &ScreenHost<RosterScreen>,
    adapter: &ListAdapter<RosterEntry>,
    position: usize,
    interaction: Interaction,
) -> Result<DispatchOutcome> {
    let surface = screen
        .screen()
        .surface_at(position)
        .with_context(|| format!("no visible row at position {position}"))?;
    Ok(adapter.dispatch_interaction(surface, interaction))
}

pub fn run() -> Result<()> {
    let adapter = ListAdapter::new(resolve_template, roster_factory);
    let mut host = TerminalHost;

    let args = Bundle::new().with_text("title", "Team roster");
    let mut screen = ScreenHost::launch(RosterScreen::new(adapter.clone()), &args, &mut host);
    anyhow::ensure!(
        !screen.is_finished(),
        "roster screen refused its launch arguments"
    );

    println!();
    let outcome = gesture(&screen, &adapter, 1, Interaction::Tap)?;
    info!("tap on row 1 -> {outcome:?}");

    println!();
    gesture(&screen, &adapter, 2, Interaction::Tap)?;

    println!();
    let outcome = gesture(&screen, &adapter, 4, Interaction::LongPress)?;
    info!("long press on row 4 -> {outcome:?}");

    // A fresh roster arrives from the feed; existing rows get rebound.
    println!();
    adapter.replace_all([
        RosterEntry::Header("Everyone".to_string()),
        person("Nia", true),
        person("Liv", true),
        person("Mark", false),
    ]);

    let consumed = screen.back_pressed(&mut host);
    info!("back press consumed by a fragment: {consumed}");
    Ok(())
}
