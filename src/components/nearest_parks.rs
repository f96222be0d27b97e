use crate::components::select_spot::parse_coordinates;
use crate::database;
use crate::models::Park;
use crate::services;
use crate::Screen;
use dioxus::prelude::*;
use submission_form::EntityKind;

const NEAREST_LIMIT: usize = 10;

fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0} m", km * 1000.0)
    } else {
        format!("{:.1} km", km)
    }
}

/// Parks sorted by distance from a typed origin; all parks by name until one is given
#[component]
pub fn NearestParksScreen(on_navigate: EventHandler<Screen>) -> Element {
    // Distance is known only after a search
    let mut parks = use_signal(Vec::<(Park, Option<f64>)>::new);
    let mut latitude = use_signal(String::new);
    let mut longitude = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);

    use_effect(move || {
        match database::init_database().and_then(|conn| services::list_parks(&conn)) {
            Ok(list) => parks.set(list.into_iter().map(|park| (park, None)).collect()),
            Err(e) => {
                log::error!("Loading parks failed: {}", e);
                error.set(Some(e.user_message()));
            }
        }
    });

    let search = move |_| {
        error.set(None);
        let origin = match parse_coordinates(&latitude(), &longitude()) {
            Ok(origin) => origin,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };

        match database::init_database()
            .and_then(|conn| services::nearest_parks(&conn, origin, NEAREST_LIMIT))
        {
            Ok(list) => parks.set(
                list.into_iter()
                    .map(|nearby| (nearby.park, Some(nearby.distance_km)))
                    .collect(),
            ),
            Err(e) => error.set(Some(e.user_message())),
        }
    };

    rsx! {
        div { style: "padding: 16px; max-width: 600px; margin: 0 auto; min-height: 100vh; background: #f5f5f5;",
            div { style: "display: flex; align-items: center; justify-content: space-between; margin-bottom: 24px;",
                h1 { style: "color: #2e7d32; font-size: 24px; font-weight: 700; margin: 0;", "🏞️ Parques" }
                button {
                    class: "btn-primary",
                    style: "padding: 8px 16px;",
                    onclick: move |_| on_navigate.call(Screen::register(EntityKind::Park)),
                    "➕ Novo"
                }
            }

            div { class: "card",
                div { style: "display: flex; gap: 8px; margin-bottom: 12px;",
                    input {
                        r#type: "text",
                        class: "input",
                        inputmode: "decimal",
                        placeholder: "Latitude",
                        value: "{latitude}",
                        oninput: move |e| latitude.set(e.value()),
                    }
                    input {
                        r#type: "text",
                        class: "input",
                        inputmode: "decimal",
                        placeholder: "Longitude",
                        value: "{longitude}",
                        oninput: move |e| longitude.set(e.value()),
                    }
                }
                button {
                    class: "btn-secondary",
                    style: "width: 100%; padding: 10px;",
                    onclick: search,
                    "🔎 Parques mais próximos"
                }
            }

            if let Some(err) = error() {
                div { class: "alert-error", "⚠️ {err}" }
            }

            if parks().is_empty() && error().is_none() {
                div { class: "card", style: "text-align: center; color: #888;",
                    "Nenhum parque cadastrado."
                }
            }

            for (park, distance) in parks() {
                div { class: "card", key: "{park.uuid}",
                    div { style: "display: flex; justify-content: space-between; margin-bottom: 8px;",
                        strong { style: "font-size: 16px; color: #333;", "{park.name}" }
                        if let Some(km) = distance {
                            span { style: "font-size: 12px; color: #2e7d32;", "{format_distance(km)}" }
                        }
                    }
                    p { style: "font-size: 14px; color: #555; margin: 0;", "{park.description}" }
                }
            }
        }
    }
}
