use crate::database;
use crate::models::Sighting;
use crate::services::{self, SightingTable};
use crate::Screen;
use chrono::Local;
use dioxus::prelude::*;
use submission_form::EntityKind;

/// Listing of fauna or flora sightings, newest first
#[component]
pub fn SightingListScreen(table: SightingTable, on_navigate: EventHandler<Screen>) -> Element {
    let mut sightings = use_signal(Vec::<Sighting>::new);
    let mut error = use_signal(|| None::<String>);

    use_effect(move || {
        match database::init_database().and_then(|conn| services::list_sightings(&conn, table)) {
            Ok(list) => sightings.set(list),
            Err(e) => {
                log::error!("Loading {} failed: {}", table.table_name(), e);
                error.set(Some(e.user_message()));
            }
        }
    });

    let (title, kind) = match table {
        SightingTable::Fauna => ("🐾 Avistamentos", EntityKind::Sighting),
        SightingTable::Flora => ("🌳 Flora", EntityKind::Flora),
    };

    rsx! {
        div { style: "padding: 16px; max-width: 600px; margin: 0 auto; min-height: 100vh; background: #f5f5f5;",
            div { style: "display: flex; align-items: center; justify-content: space-between; margin-bottom: 24px;",
                h1 { style: "color: #2e7d32; font-size: 24px; font-weight: 700; margin: 0;", "{title}" }
                button {
                    class: "btn-primary",
                    style: "padding: 8px 16px;",
                    onclick: move |_| on_navigate.call(Screen::register(kind)),
                    "➕ Novo"
                }
            }

            if let Some(err) = error() {
                div { class: "alert-error", "⚠️ {err}" }
            }

            if sightings().is_empty() && error().is_none() {
                div { class: "card", style: "text-align: center; color: #888;",
                    "Nenhum registro ainda."
                }
            }

            for sighting in sightings() {
                SightingCard { key: "{sighting.uuid}", sighting: sighting.clone() }
            }
        }
    }
}

#[component]
fn SightingCard(sighting: Sighting) -> Element {
    let date = sighting
        .date
        .with_timezone(&Local)
        .format("%d/%m/%Y %H:%M")
        .to_string();
    let position = format!("📍 {:.4}, {:.4}", sighting.latitude, sighting.longitude);

    rsx! {
        div { class: "card",
            div { style: "display: flex; justify-content: space-between; margin-bottom: 8px;",
                strong { style: "font-size: 16px; color: #333;", "{sighting.display_name()}" }
                span { style: "font-size: 12px; color: #888;", "{date}" }
            }
            p { style: "font-size: 14px; color: #555; margin: 0 0 8px 0;", "{sighting.description}" }
            div { style: "font-size: 12px; color: #888;", "{position}" }
            if let Some(photo) = sighting.photo.clone() {
                img { src: "{photo}", style: "width: 100%; margin-top: 8px; border-radius: 8px;" }
            }
        }
    }
}
