use crate::Screen;
use dioxus::prelude::*;

const ACTIVE: &str = "flex: 1; padding: 12px; margin: 0 4px; border: none; border-radius: 8px; cursor: pointer; font-size: 13px; text-align: center; background: #2e7d32; color: #ffffff;";
const INACTIVE: &str = "flex: 1; padding: 12px; margin: 0 4px; border: none; border-radius: 8px; cursor: pointer; font-size: 13px; text-align: center; background: #ffffff; color: #333;";

#[component]
pub fn NavigationBar(current_screen: Screen, on_navigate: EventHandler<Screen>) -> Element {
    let nav_style = "display: flex; justify-content: space-around; padding: 10px; background: #f0f0f0; border-top: 1px solid #ddd;";

    rsx! {
        div {
            style: "{nav_style}",

            button {
                style: if matches!(current_screen, Screen::Home) { ACTIVE } else { INACTIVE },
                onclick: move |_| on_navigate.call(Screen::Home),
                "🏠 Início"
            }

            button {
                style: if matches!(current_screen, Screen::Sightings) { ACTIVE } else { INACTIVE },
                onclick: move |_| on_navigate.call(Screen::Sightings),
                "🐾 Fauna"
            }

            button {
                style: if matches!(current_screen, Screen::FloraSightings) { ACTIVE } else { INACTIVE },
                onclick: move |_| on_navigate.call(Screen::FloraSightings),
                "🌳 Flora"
            }

            button {
                style: if matches!(current_screen, Screen::NearestParks) { ACTIVE } else { INACTIVE },
                onclick: move |_| on_navigate.call(Screen::NearestParks),
                "🏞️ Parques"
            }

            button {
                style: if matches!(current_screen, Screen::Settings) { ACTIVE } else { INACTIVE },
                onclick: move |_| on_navigate.call(Screen::Settings),
                "⚙️"
            }
        }
    }
}
