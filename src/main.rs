use dioxus::prelude::*;

mod camera;
mod components;
mod database;
mod error;
mod models;
mod navigation;
mod services;

use components::{
    HomeScreen, NavigationBar, NearestParksScreen, RegisterScreen, SelectSpotScreen,
    SettingsScreen, SightingListScreen,
};
use navigation::{apply_navigation, Drafts};
pub use navigation::Screen;
use services::SightingTable;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn init_logging() {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Debug)
            .with_tag("wildwatch"),
    );

    #[cfg(not(target_os = "android"))]
    {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init();
    }
}

fn main() {
    init_logging();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let mut current_screen = use_signal(|| Screen::Home);
    let mut drafts = use_context_provider(|| Signal::new(Drafts::new()));

    let mut navigate = move |screen: Screen| {
        log::debug!("Navigate to {}", screen.route());
        apply_navigation(&mut drafts.write(), &screen);
        current_screen.set(screen);
    };

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        div { style: "display: flex; flex-direction: column; height: 100vh; font-family: sans-serif;",

            // Main Content
            div { style: "flex: 1; overflow-y: auto;",
                match current_screen() {
                    Screen::Home => rsx! {
                        HomeScreen { on_navigate: move |s| navigate(s) }
                    },
                    Screen::Sightings => rsx! {
                        SightingListScreen {
                            key: "{\"sightings\"}",
                            table: SightingTable::Fauna,
                            on_navigate: move |s| navigate(s),
                        }
                    },
                    Screen::FloraSightings => rsx! {
                        SightingListScreen {
                            key: "{\"flora_sightings\"}",
                            table: SightingTable::Flora,
                            on_navigate: move |s| navigate(s),
                        }
                    },
                    Screen::NearestParks => rsx! {
                        NearestParksScreen { on_navigate: move |s| navigate(s) }
                    },
                    Screen::Register { kind, .. } => rsx! {
                        RegisterScreen {
                            key: "{kind.as_str()}",
                            kind,
                            on_navigate: move |s| navigate(s),
                        }
                    },
                    Screen::SelectSpot(kind) => rsx! {
                        SelectSpotScreen {
                            key: "{kind.as_str()}",
                            kind,
                            on_navigate: move |s| navigate(s),
                        }
                    },
                    Screen::Settings => rsx! {
                        SettingsScreen { on_navigate: move |s| navigate(s) }
                    },
                }
            }

            // Bottom Navigation Bar
            NavigationBar {
                current_screen: current_screen(),
                on_navigate: move |screen| navigate(screen),
            }
        }
    }
}
