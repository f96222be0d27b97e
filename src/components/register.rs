use std::rc::Rc;

use crate::camera;
use crate::navigation::{Drafts, ScreenNavigator};
use crate::services::{build_coordinator, AppCoordinator};
use crate::Screen;
use dioxus::prelude::*;
use submission_form::{DraftRecord, EntityKind, Field, SubmissionForm, SubmitError, UploadError};

fn with_form<R>(
    mut drafts: Signal<Drafts>,
    kind: EntityKind,
    f: impl FnOnce(&mut SubmissionForm) -> R,
) -> R {
    let mut map = drafts.write();
    f(map.entry(kind).or_insert_with(|| SubmissionForm::new(kind)))
}

/// Banner text for a failed attempt; field errors and the location prompt
/// are shown on the form itself
fn failure_message(error: &SubmitError) -> Option<String> {
    match error {
        SubmitError::InFlight | SubmitError::Invalid(_) | SubmitError::LocationMissing(_) => None,
        SubmitError::Upload(UploadError::NotConfigured) => Some(
            "Configure o armazenamento de fotos nas configurações ou remova a foto.".to_string(),
        ),
        SubmitError::Upload(UploadError::Read { .. }) => {
            Some("A foto selecionada não pôde ser lida. Escolha outra.".to_string())
        }
        SubmitError::Upload(e) => Some(format!("Não foi possível enviar a foto: {}", e)),
        SubmitError::Persistence(e) => Some(format!("Não foi possível salvar: {}", e.message())),
    }
}

/// One register form for sightings, flora and parks
#[component]
pub fn RegisterScreen(kind: EntityKind, on_navigate: EventHandler<Screen>) -> Element {
    let drafts = use_context::<Signal<Drafts>>();
    let coordinator: Rc<AppCoordinator> = use_hook(|| Rc::new(build_coordinator(kind)));
    let mut submitting = use_signal(|| false);
    let mut picking = use_signal(|| false);
    let mut failure = use_signal(|| None::<String>);
    let mut photo_path_input = use_signal(String::new);

    let form = drafts
        .read()
        .get(&kind)
        .cloned()
        .unwrap_or_else(|| SubmissionForm::new(kind));
    let descriptor = form.descriptor();
    let labels = &descriptor.labels;
    let species_state = form.species_field();
    let draft = form.draft().clone();
    let species_error = form.errors().get(Field::Species).map(str::to_string);
    let description_error = form.errors().get(Field::Description).map(str::to_string);
    let prompt_visible = form.location_prompt_visible();
    let location_text = draft
        .location
        .map(|l| format!("📍 {:.5}, {:.5}", l.latitude, l.longitude));

    let on_submit = move |_| {
        if submitting() {
            return;
        }

        let coordinator = coordinator.clone();
        let draft = drafts
            .peek()
            .get(&kind)
            .map(|f| f.draft().clone())
            .unwrap_or_else(DraftRecord::new);

        failure.set(None);
        submitting.set(true);

        spawn(async move {
            let navigator = ScreenNavigator::new(on_navigate);
            let outcome = coordinator.submit(&draft, &navigator).await;

            // On success the navigator already left the screen and the draft
            // was discarded with it
            if let Err(e) = &outcome {
                if !matches!(e, SubmitError::InFlight) {
                    with_form(drafts, kind, |f| f.apply_outcome(&outcome));
                }
                failure.set(failure_message(e));
            }
            submitting.set(false);
        });
    };

    rsx! {
        div { style: "padding: 16px; max-width: 600px; margin: 0 auto; min-height: 100vh; background: #f5f5f5;",

            div { style: "display: flex; align-items: center; margin-bottom: 24px;",
                button {
                    class: "btn-secondary",
                    style: "margin-right: 12px; padding: 8px 16px;",
                    onclick: move |_| on_navigate.call(Screen::Home),
                    "← Voltar"
                }
                h1 { style: "color: #2e7d32; font-size: 24px; font-weight: 700; margin: 0;",
                    "{labels.title}"
                }
            }

            if let Some(err) = failure() {
                div { class: "alert-error", "⚠️ {err}" }
            }

            div { class: "card",

                if let Some(checkbox) = labels.identified_checkbox {
                    label { style: "display: flex; align-items: center; gap: 8px; margin-bottom: 12px; font-size: 14px; color: #333;",
                        input {
                            r#type: "checkbox",
                            checked: draft.identified,
                            onchange: move |_| with_form(drafts, kind, |f| f.toggle_identified()),
                        }
                        "{checkbox}"
                    }
                }

                div { style: "margin-bottom: 20px;",
                    input {
                        r#type: "text",
                        class: "input",
                        placeholder: labels.species_placeholder,
                        value: "{draft.species}",
                        disabled: !species_state.editable,
                        oninput: move |e| {
                            with_form(drafts, kind, |f| f.set_species(&e.value()));
                        },
                    }
                    if let Some(msg) = species_error {
                        div { class: "field-error", "{msg}" }
                    }
                }

                div { style: "margin-bottom: 20px;",
                    textarea {
                        class: "input",
                        rows: "4",
                        placeholder: labels.description_placeholder,
                        value: "{draft.description}",
                        oninput: move |e| with_form(drafts, kind, |f| f.set_description(&e.value())),
                    }
                    if let Some(msg) = description_error {
                        div { class: "field-error", "{msg}" }
                    }
                }

                if descriptor.accepts_photo {
                    div { style: "margin-bottom: 20px;",
                        label { style: "display: block; margin-bottom: 6px; font-weight: 600; color: #333; font-size: 14px;",
                            "Foto (opcional)"
                        }
                        if let Some(path) = draft.photo_local_ref.clone() {
                            div { style: "display: flex; align-items: center; gap: 12px; padding: 12px; background: #f0f0f0; border-radius: 8px; margin-bottom: 12px;",
                                div { style: "font-size: 32px;", "📷" }
                                div { style: "flex: 1; font-size: 12px; color: #666; word-break: break-all;",
                                    "{path}"
                                }
                                button {
                                    class: "btn-secondary",
                                    style: "padding: 6px 12px; font-size: 12px;",
                                    onclick: move |_| with_form(drafts, kind, |f| f.clear_photo()),
                                    "🗑️"
                                }
                            }
                        }
                        if cfg!(target_os = "android") {
                            button {
                                class: "btn-secondary",
                                style: "width: 100%; padding: 10px; font-size: 14px;",
                                disabled: picking(),
                                onclick: move |_| {
                                    picking.set(true);
                                    failure.set(None);
                                    spawn(async move {
                                        match camera::pick_image() {
                                            Ok(result) => {
                                                with_form(drafts, kind, |f| f.receive_image(result));
                                            }
                                            Err(e) => {
                                                log::error!("Image picker failed: {}", e);
                                                failure.set(Some(e.user_message()));
                                            }
                                        }
                                        picking.set(false);
                                    });
                                },
                                if picking() { "⏳ Carregando…" } else { "🖼️ Escolher da galeria" }
                            }
                        } else {
                            div { style: "display: flex; gap: 8px;",
                                input {
                                    r#type: "text",
                                    class: "input",
                                    placeholder: "Caminho da imagem",
                                    value: "{photo_path_input}",
                                    oninput: move |e| photo_path_input.set(e.value()),
                                }
                                button {
                                    class: "btn-secondary",
                                    style: "padding: 10px;",
                                    onclick: move |_| {
                                        let result = camera::pick_from_path(&photo_path_input());
                                        with_form(drafts, kind, |f| f.receive_image(result));
                                        photo_path_input.set(String::new());
                                    },
                                    "📎"
                                }
                            }
                        }
                    }
                }

                div { style: "margin-bottom: 20px;",
                    if let Some(text) = location_text {
                        div { style: "font-size: 13px; color: #555; margin-bottom: 8px;", "{text}" }
                    }
                    button {
                        class: "btn-secondary",
                        style: "width: 100%; padding: 10px; font-size: 14px;",
                        onclick: move |_| on_navigate.call(Screen::SelectSpot(kind)),
                        "{labels.location_button}"
                    }
                }

                button {
                    class: "btn-primary",
                    style: "width: 100%; padding: 14px;",
                    disabled: submitting(),
                    onclick: on_submit,
                    if submitting() { "⏳ Enviando…" } else { "{labels.submit_button}" }
                }
            }

            if prompt_visible {
                div { class: "modal-backdrop",
                    div { class: "modal",
                        p { style: "font-size: 16px; color: #333; margin: 0 0 16px 0;",
                            "{labels.location_prompt}"
                        }
                        div { style: "display: flex; gap: 12px;",
                            button {
                                class: "btn-primary",
                                style: "flex: 1; padding: 12px;",
                                onclick: move |_| on_navigate.call(Screen::SelectSpot(kind)),
                                "{labels.location_button}"
                            }
                            button {
                                class: "btn-secondary",
                                style: "flex: 1; padding: 12px;",
                                onclick: move |_| with_form(drafts, kind, |f| f.dismiss_location_prompt()),
                                "Fechar"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use submission_form::{FieldErrors, LocationMissing, PersistenceError};

    #[test]
    fn test_failure_message() {
        assert_eq!(failure_message(&SubmitError::InFlight), None);
        assert_eq!(failure_message(&SubmitError::Invalid(FieldErrors::new())), None);
        assert_eq!(
            failure_message(&SubmitError::LocationMissing(LocationMissing)),
            None
        );

        let msg = failure_message(&SubmitError::Upload(UploadError::NotConfigured)).unwrap();
        assert!(msg.contains("armazenamento"));

        let msg = failure_message(&SubmitError::Persistence(PersistenceError::new(
            "database is locked",
        )))
        .unwrap();
        assert_eq!(msg, "Não foi possível salvar: database is locked");
    }
}
