use crate::database;
use crate::services::{self, SightingTable};
use crate::Screen;
use dioxus::prelude::*;
use submission_form::EntityKind;

#[derive(Clone, Copy, PartialEq, Default)]
struct Counts {
    sightings: i64,
    flora: i64,
    parks: i64,
}

fn load_counts() -> Result<Counts, crate::error::AppError> {
    let conn = database::init_database()?;
    Ok(Counts {
        sightings: services::count_sightings(&conn, SightingTable::Fauna)?,
        flora: services::count_sightings(&conn, SightingTable::Flora)?,
        parks: services::count_parks(&conn)?,
    })
}

#[component]
pub fn HomeScreen(on_navigate: EventHandler<Screen>) -> Element {
    let mut counts = use_signal(Counts::default);
    let mut db_status = use_signal(|| None::<String>);

    // Initialize database on mount
    use_effect(move || match load_counts() {
        Ok(c) => counts.set(c),
        Err(e) => {
            log::error!("Home: loading counts failed: {}", e);
            db_status.set(Some(e.user_message()));
        }
    });

    let c = counts();

    rsx! {
        div { style: "padding: 16px; max-width: 600px; margin: 0 auto; min-height: 100vh; background: #f5f5f5;",
            h1 { style: "color: #2e7d32; text-align: center; margin-bottom: 24px; margin-top: 48px; font-size: 28px; font-weight: 700;",
                "🦜 WildWatch"
            }
            if let Some(status) = db_status() {
                div { class: "card-header",
                    h2 { style: "margin: 0 0 12px 0; font-size: 18px; color: #333;", "Status" }
                    p { style: "font-size: 14px; color: #555; margin: 0;", "⚠️ {status}" }
                }
            }

            div { class: "card",
                h2 { style: "margin: 0 0 16px 0; font-size: 18px; color: #333;", "Registros" }
                div { style: "display: flex; justify-content: space-around; text-align: center;",
                    div {
                        div { class: "stat-value", "{c.sightings}" }
                        div { class: "stat-label", "Fauna" }
                    }
                    div {
                        div { class: "stat-value", "{c.flora}" }
                        div { class: "stat-label", "Flora" }
                    }
                    div {
                        div { class: "stat-value", "{c.parks}" }
                        div { class: "stat-label", "Parques" }
                    }
                }
            }

            // Quick Actions
            div { class: "card", style: "margin-bottom: 128px;",
                h2 { style: "margin: 0 0 16px 0; font-size: 18px; color: #333;", "Novo registro" }
                div { style: "display: flex; flex-direction: column; gap: 12px;",
                    button {
                        class: "btn-primary",
                        style: "padding: 16px; font-size: 16px;",
                        onclick: move |_| on_navigate.call(Screen::register(EntityKind::Sighting)),
                        "🐾 Registrar avistamento"
                    }
                    button {
                        class: "btn-success",
                        style: "padding: 16px; font-size: 16px;",
                        onclick: move |_| on_navigate.call(Screen::register(EntityKind::Flora)),
                        "🌳 Registrar flora"
                    }
                    button {
                        class: "btn-secondary",
                        style: "padding: 16px; font-size: 16px;",
                        onclick: move |_| on_navigate.call(Screen::register(EntityKind::Park)),
                        "🏞️ Cadastrar parque"
                    }
                }
            }

            div { style: "background: #f8f9fa; padding: 16px; margin: 16px 0; border-radius: 8px; border: 1px solid #e0e0e0;",
                h3 { style: "margin: 0 0 12px 0; font-size: 14px; color: #666; font-weight: 600;",
                    "ℹ️ Sistema"
                }
                p { style: "font-size: 12px; color: #666; margin: 4px 0;",
                    "OS: {std::env::consts::OS}"
                }
                p { style: "font-size: 11px; color: #888; margin: 4px 0; word-break: break-all;",
                    "DB: {database::get_database_path().display()}"
                }
            }
        }
    }
}
