use crate::navigation::Drafts;
use crate::Screen;
use dioxus::prelude::*;
use submission_form::{Coordinates, EntityKind};

/// Parses user-typed coordinates; accepts a decimal comma
pub(crate) fn parse_coordinates(latitude: &str, longitude: &str) -> Result<Coordinates, String> {
    let parse = |value: &str, name: &str| {
        value
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .map_err(|_| format!("{} inválida", name))
    };

    let coordinates = Coordinates::new(parse(latitude, "Latitude")?, parse(longitude, "Longitude")?);
    if !coordinates.is_valid() {
        return Err("Coordenadas fora do intervalo válido".to_string());
    }
    Ok(coordinates)
}

/// Location picking for one register form; the chosen spot goes back as a
/// screen parameter
#[component]
pub fn SelectSpotScreen(kind: EntityKind, on_navigate: EventHandler<Screen>) -> Element {
    let drafts = use_context::<Signal<Drafts>>();

    // Start from the spot already in the draft, if any
    let current = drafts
        .peek()
        .get(&kind)
        .and_then(|form| form.draft().location);
    let mut latitude = use_signal(|| current.map(|c| c.latitude.to_string()).unwrap_or_default());
    let mut longitude = use_signal(|| current.map(|c| c.longitude.to_string()).unwrap_or_default());
    let mut error = use_signal(|| None::<String>);

    let confirm = move |_| match parse_coordinates(&latitude(), &longitude()) {
        Ok(location) => {
            log::debug!("Selected spot {:?} for {}", location, kind.as_str());
            on_navigate.call(Screen::Register {
                kind,
                location: Some(location),
            });
        }
        Err(e) => error.set(Some(e)),
    };

    rsx! {
        div { style: "padding: 16px; max-width: 600px; margin: 0 auto; min-height: 100vh; background: #f5f5f5;",
            div { style: "display: flex; align-items: center; margin-bottom: 24px;",
                button {
                    class: "btn-secondary",
                    style: "margin-right: 12px; padding: 8px 16px;",
                    onclick: move |_| on_navigate.call(Screen::register(kind)),
                    "← Voltar"
                }
                h1 { style: "color: #2e7d32; font-size: 24px; font-weight: 700; margin: 0;",
                    "Selecionar local"
                }
            }

            if let Some(err) = error() {
                div { class: "alert-error", "⚠️ {err}" }
            }

            div { class: "card",
                div { style: "margin-bottom: 20px;",
                    label { style: "display: block; margin-bottom: 6px; font-weight: 600; color: #333; font-size: 14px;",
                        "Latitude"
                    }
                    input {
                        r#type: "text",
                        class: "input",
                        inputmode: "decimal",
                        placeholder: "-15.7939",
                        value: "{latitude}",
                        oninput: move |e| latitude.set(e.value()),
                    }
                }
                div { style: "margin-bottom: 20px;",
                    label { style: "display: block; margin-bottom: 6px; font-weight: 600; color: #333; font-size: 14px;",
                        "Longitude"
                    }
                    input {
                        r#type: "text",
                        class: "input",
                        inputmode: "decimal",
                        placeholder: "-47.8828",
                        value: "{longitude}",
                        oninput: move |e| longitude.set(e.value()),
                    }
                }
                button {
                    class: "btn-primary",
                    style: "width: 100%; padding: 14px;",
                    onclick: confirm,
                    "📍 Confirmar local"
                }
            }
        }
    }
}
