use crate::database;
use crate::models::StorageSettings;
use crate::services::{storage_service, WebDavBlobStore};
use crate::Screen;
use dioxus::prelude::*;

#[derive(Clone, PartialEq)]
enum ConnectionStatus {
    Checking,
    Connected,
    Failed(String),
}

/// Photo storage configuration (WebDAV / Nextcloud)
#[component]
pub fn SettingsScreen(on_navigate: EventHandler<Screen>) -> Element {
    let mut server_url = use_signal(|| String::from("https://"));
    let mut username = use_signal(String::new);
    let mut app_password = use_signal(String::new);
    let mut remote_path = use_signal(|| String::from("/WildWatch"));
    let mut public_base_url = use_signal(|| String::from("https://"));
    let mut enabled = use_signal(|| true);
    let mut configured = use_signal(|| false);
    let mut status_message = use_signal(String::new);
    let mut connection_status = use_signal(|| None::<ConnectionStatus>);

    // Load existing settings on mount
    use_effect(move || {
        match database::init_database().and_then(|conn| storage_service::load_storage_settings(&conn)) {
            Ok(Some(settings)) => {
                server_url.set(settings.server_url);
                username.set(settings.username);
                app_password.set(settings.app_password);
                remote_path.set(settings.remote_path);
                public_base_url.set(settings.public_base_url);
                enabled.set(settings.enabled);
                configured.set(true);
            }
            Ok(None) => configured.set(false),
            Err(e) => {
                log::error!("Settings: loading storage settings failed: {}", e);
                status_message.set(format!("❌ {}", e.user_message()));
            }
        }
    });

    let current = move || {
        let mut settings = StorageSettings::new(
            server_url(),
            username(),
            app_password(),
            remote_path(),
            public_base_url(),
        );
        settings.enabled = enabled();
        settings
    };

    let save_settings = move |_| {
        let settings = current();
        match database::init_database()
            .and_then(|conn| storage_service::save_storage_settings(&conn, &settings))
        {
            Ok(_) => {
                log::info!("Settings: storage settings saved");
                configured.set(true);
                status_message.set("✅ Configurações salvas".to_string());
            }
            Err(e) => status_message.set(format!("⚠️ {}", e.user_message())),
        }
    };

    let test_connection = move |_| {
        let settings = current();
        connection_status.set(Some(ConnectionStatus::Checking));
        spawn(async move {
            match WebDavBlobStore::check_connection(&settings).await {
                Ok(()) => connection_status.set(Some(ConnectionStatus::Connected)),
                Err(e) => {
                    log::warn!("Settings: connection check failed: {}", e);
                    connection_status.set(Some(ConnectionStatus::Failed(e.to_string())));
                }
            }
        });
    };

    let delete_settings = move |_| match database::init_database()
        .and_then(|conn| storage_service::delete_storage_settings(&conn))
    {
        Ok(()) => {
            configured.set(false);
            connection_status.set(None);
            status_message.set("✅ Configurações removidas".to_string());
        }
        Err(e) => status_message.set(format!("⚠️ {}", e.user_message())),
    };

    rsx! {
        div { style: "padding: 16px; max-width: 600px; margin: 0 auto;",
            div { style: "display: flex; align-items: center; margin-bottom: 24px;",
                button {
                    class: "btn-back",
                    onclick: move |_| on_navigate.call(Screen::Home),
                    "← Voltar"
                }
                h1 { style: "flex: 1; text-align: center; margin: 0; font-size: 24px; color: #2e7d32;",
                    "⚙️ Configurações"
                }
                div { style: "width: 80px;" }
            }

            if !status_message().is_empty() {
                div { style: "padding: 12px; margin-bottom: 16px; background: #f0f0f0; border-radius: 8px; border-left: 4px solid #2e7d32;",
                    "{status_message}"
                }
            }

            div { class: "card",
                h2 { style: "margin: 0 0 12px 0; font-size: 18px; color: #333;",
                    "📷 Armazenamento de fotos"
                    if configured() {
                        span { style: "color: green; margin-left: 8px;", "✓" }
                    }
                }
                p { style: "font-size: 13px; color: #666; margin: 0 0 16px 0;",
                    "As fotos são enviadas para uma pasta WebDAV (por exemplo Nextcloud) antes de salvar o registro."
                }

                SettingsField { label: "Servidor", value: server_url, placeholder: "https://cloud.exemplo.org" }
                SettingsField { label: "Usuário", value: username, placeholder: "" }
                div { style: "margin-bottom: 16px;",
                    label { style: "display: block; margin-bottom: 6px; font-weight: 600; color: #333; font-size: 14px;",
                        "Senha de app"
                    }
                    input {
                        r#type: "password",
                        class: "input",
                        value: "{app_password}",
                        oninput: move |e| app_password.set(e.value()),
                    }
                }
                SettingsField { label: "Pasta remota", value: remote_path, placeholder: "/WildWatch" }
                SettingsField { label: "URL pública", value: public_base_url, placeholder: "https://fotos.exemplo.org/wildwatch/" }

                label { style: "display: flex; align-items: center; gap: 8px; margin-bottom: 16px; font-size: 14px;",
                    input {
                        r#type: "checkbox",
                        checked: enabled(),
                        onchange: move |_| {
                            let next = !enabled();
                            enabled.set(next);
                            // Saved settings take effect right away
                            if configured() {
                                if let Err(e) = database::init_database()
                                    .and_then(|conn| storage_service::set_storage_enabled(&conn, next))
                                {
                                    status_message.set(format!("⚠️ {}", e.user_message()));
                                }
                            }
                        },
                    }
                    "Enviar fotos"
                }

                match connection_status() {
                    Some(ConnectionStatus::Checking) => rsx! {
                        p { style: "font-size: 13px;", "⏳ Testando conexão…" }
                    },
                    Some(ConnectionStatus::Connected) => rsx! {
                        p { style: "font-size: 13px; color: green;", "✓ Conexão OK" }
                    },
                    Some(ConnectionStatus::Failed(err)) => rsx! {
                        p { style: "font-size: 13px; color: red; word-break: break-all;", "⚠️ {err}" }
                    },
                    None => rsx! {},
                }

                div { style: "display: flex; gap: 12px;",
                    button { class: "btn-primary", style: "flex: 1;", onclick: save_settings, "💾 Salvar" }
                    button { class: "btn-secondary", style: "flex: 1;", onclick: test_connection, "🔌 Testar" }
                }
                if configured() {
                    button {
                        class: "btn-danger",
                        style: "width: 100%; margin-top: 12px;",
                        onclick: delete_settings,
                        "🗑️ Remover configuração"
                    }
                }
            }
        }
    }
}

#[component]
fn SettingsField(label: &'static str, value: Signal<String>, placeholder: &'static str) -> Element {
    let mut value = value;

    rsx! {
        div { style: "margin-bottom: 16px;",
            label { style: "display: block; margin-bottom: 6px; font-weight: 600; color: #333; font-size: 14px;",
                "{label}"
            }
            input {
                r#type: "text",
                class: "input",
                placeholder: placeholder,
                value: "{value}",
                oninput: move |e| value.set(e.value()),
            }
        }
    }
}
