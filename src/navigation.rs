use std::collections::HashMap;

use dioxus::prelude::*;
use submission_form::{Coordinates, EntityKind, Navigator, SubmissionForm};

/// Open forms keyed by kind; a draft lives here while its screens are shown
pub type Drafts = HashMap<EntityKind, SubmissionForm>;

/// Screen navigation for the app
#[derive(Clone, PartialEq, Debug)]
pub enum Screen {
    Home,
    Sightings,
    FloraSightings,
    NearestParks,
    /// `location` is handed back by the select-spot screen
    Register {
        kind: EntityKind,
        location: Option<Coordinates>,
    },
    SelectSpot(EntityKind),
    Settings,
}

impl Screen {
    pub fn register(kind: EntityKind) -> Self {
        Screen::Register {
            kind,
            location: None,
        }
    }

    pub fn route(&self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Sightings => "sightings",
            Screen::FloraSightings => "flora_sightings",
            Screen::NearestParks => "nearest_parks",
            Screen::Register { kind, .. } => match kind {
                EntityKind::Sighting => "register_sighting",
                EntityKind::Flora => "register_flora",
                EntityKind::Park => "register_park",
            },
            Screen::SelectSpot(kind) => kind.descriptor().select_spot_route,
            Screen::Settings => "settings",
        }
    }

    pub fn from_route(route: &str) -> Option<Self> {
        let screen = match route {
            "home" => Screen::Home,
            "sightings" => Screen::Sightings,
            "flora_sightings" => Screen::FloraSightings,
            "nearest_parks" => Screen::NearestParks,
            "register_sighting" => Screen::register(EntityKind::Sighting),
            "register_flora" => Screen::register(EntityKind::Flora),
            "register_park" => Screen::register(EntityKind::Park),
            "select_sighting_spot" => Screen::SelectSpot(EntityKind::Sighting),
            "select_flora_spot" => Screen::SelectSpot(EntityKind::Flora),
            "select_park_spot" => Screen::SelectSpot(EntityKind::Park),
            "settings" => Screen::Settings,
            _ => return None,
        };
        Some(screen)
    }

    /// Kind whose draft must survive while this screen is shown
    pub fn draft_kind(&self) -> Option<EntityKind> {
        match self {
            Screen::Register { kind, .. } | Screen::SelectSpot(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// Keeps the drafts in step with a screen change.
///
/// Drafts of other kinds are discarded. Coordinates handed back from the
/// select-spot screen land in the matching draft.
pub fn apply_navigation(drafts: &mut Drafts, screen: &Screen) {
    let keep = screen.draft_kind();
    drafts.retain(|kind, _| Some(*kind) == keep);

    if let Screen::Register {
        kind,
        location: Some(location),
    } = screen
    {
        drafts
            .entry(*kind)
            .or_insert_with(|| SubmissionForm::new(*kind))
            .receive_location(*location);
    }
}

/// Routes named by the submission workflow onto the screen handler
#[derive(Clone, Copy)]
pub struct ScreenNavigator {
    on_navigate: EventHandler<Screen>,
}

impl ScreenNavigator {
    pub fn new(on_navigate: EventHandler<Screen>) -> Self {
        Self { on_navigate }
    }
}

impl Navigator for ScreenNavigator {
    fn navigate(&self, route: &str) {
        match Screen::from_route(route) {
            Some(screen) => self.on_navigate.call(screen),
            None => log::warn!("Unknown route '{}'", route),
        }
    }
}
