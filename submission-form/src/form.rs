use crate::coordinator::{Navigator, SubmitCoordinator, SubmitError};
use crate::kind::{EntityDescriptor, EntityKind};
use crate::models::{Coordinates, DraftRecord, SubmittedRecord};
use crate::picker::PickResult;
use crate::save_hook::RecordStore;
use crate::species_field::{ConditionalFieldController, SpeciesFieldState};
use crate::upload::{BlobStore, ImageSource};
use crate::validation::{Field, FieldErrors};

/// One form instance: the draft, its inline errors and the location prompt.
///
/// Location and image picking happen on other screens; their results come
/// back through [`SubmissionForm::receive_location`] and
/// [`SubmissionForm::receive_image`].
#[derive(Debug, Clone)]
pub struct SubmissionForm {
    descriptor: &'static EntityDescriptor,
    controller: ConditionalFieldController,
    draft: DraftRecord,
    errors: FieldErrors,
    location_prompt_visible: bool,
}

impl SubmissionForm {
    pub fn new(kind: EntityKind) -> Self {
        let descriptor = kind.descriptor();

        Self {
            descriptor,
            controller: ConditionalFieldController::new(descriptor),
            draft: DraftRecord::new(),
            errors: FieldErrors::new(),
            location_prompt_visible: false,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.descriptor.kind
    }

    pub fn descriptor(&self) -> &'static EntityDescriptor {
        self.descriptor
    }

    pub fn draft(&self) -> &DraftRecord {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn species_field(&self) -> SpeciesFieldState {
        self.controller.state(self.draft.identified)
    }

    pub fn location_prompt_visible(&self) -> bool {
        self.location_prompt_visible
    }

    pub fn dismiss_location_prompt(&mut self) {
        self.location_prompt_visible = false;
    }

    /// Flips the "identified" checkbox; no-op for forms without one
    pub fn toggle_identified(&mut self) {
        let next = !self.draft.identified;
        self.set_identified(next);
    }

    pub fn set_identified(&mut self, identified: bool) {
        if self.descriptor.labels.identified_checkbox.is_none() {
            return;
        }

        let derived = self.controller.set_identified(&mut self.draft, identified);
        self.errors.sync_field(Field::Species, &derived);
    }

    /// Returns false when the species field is read-only
    pub fn set_species(&mut self, value: &str) -> bool {
        match self.controller.set_species(&mut self.draft, value) {
            Some(derived) => {
                self.errors.sync_field(Field::Species, &derived);
                true
            }
            None => false,
        }
    }

    pub fn set_description(&mut self, value: &str) {
        self.draft.description = value.to_string();

        if !value.trim().is_empty() {
            self.errors.remove(Field::Description);
        }
    }

    pub fn receive_location(&mut self, location: Coordinates) {
        self.draft.location = Some(location);
        self.location_prompt_visible = false;
    }

    /// Keeps the first picked asset. A canceled pick keeps the previous photo.
    pub fn receive_image(&mut self, result: PickResult) -> bool {
        if !self.descriptor.accepts_photo {
            return false;
        }

        match result.first_asset() {
            Some(local_ref) => {
                self.draft.photo_local_ref = Some(local_ref);
                true
            }
            None => false,
        }
    }

    pub fn clear_photo(&mut self) {
        self.draft.photo_local_ref = None;
    }

    /// Discards the draft
    pub fn reset(&mut self) {
        self.draft = DraftRecord::new();
        self.errors = FieldErrors::new();
        self.location_prompt_visible = false;
    }

    /// Updates form state from a finished submit attempt.
    ///
    /// Success discards the draft. Every failure keeps it so the user can
    /// retry.
    pub fn apply_outcome(&mut self, outcome: &Result<SubmittedRecord, SubmitError>) {
        match outcome {
            Ok(_) => self.reset(),
            Err(SubmitError::InFlight) => {}
            Err(SubmitError::Invalid(errors)) => self.errors = errors.clone(),
            Err(SubmitError::LocationMissing(_)) => {
                self.errors = FieldErrors::new();
                self.location_prompt_visible = true;
            }
            Err(SubmitError::Upload(_)) | Err(SubmitError::Persistence(_)) => {
                self.errors = FieldErrors::new();
            }
        }
    }

    pub async fn submit<I, B, S, N>(
        &mut self,
        coordinator: &SubmitCoordinator<I, B, S>,
        navigator: &N,
    ) -> Result<SubmittedRecord, SubmitError>
    where
        I: ImageSource,
        B: BlobStore,
        S: RecordStore,
        N: Navigator + ?Sized,
    {
        debug_assert_eq!(coordinator.descriptor().kind, self.kind());

        let draft = self.draft.clone();
        let outcome = coordinator.submit(&draft, navigator).await;
        self.apply_outcome(&outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{
        CallLog, MockBlobStore, MockImageSource, MockRecordStore, RecordingNavigator,
    };
    use std::path::PathBuf;

    fn coordinator(
        kind: EntityKind,
        log: &CallLog,
    ) -> SubmitCoordinator<MockImageSource, MockBlobStore, MockRecordStore> {
        SubmitCoordinator::new(
            kind,
            MockImageSource::new(log.clone()),
            MockBlobStore::new(log.clone()),
            MockRecordStore::new(log.clone()),
        )
    }

    #[test]
    fn test_toggle_clears_species_both_ways() {
        let mut form = SubmissionForm::new(EntityKind::Flora);

        form.toggle_identified();
        assert!(form.set_species("Ipê"));
        form.toggle_identified();
        assert_eq!(form.draft().species, "");
        assert!(!form.species_field().editable);

        form.toggle_identified();
        assert_eq!(form.draft().species, "");
        assert_eq!(form.errors().get(Field::Species), Some("A espécie é obrigatória"));
    }

    #[test]
    fn test_park_has_no_checkbox() {
        let mut form = SubmissionForm::new(EntityKind::Park);
        assert!(form.set_species("Parque Ibirapuera"));

        form.toggle_identified();
        assert!(!form.draft().identified);
        assert_eq!(form.draft().species, "Parque Ibirapuera");
    }

    #[test]
    fn test_image_hand_off() {
        let mut form = SubmissionForm::new(EntityKind::Sighting);
        let picked = PickResult::Picked(vec![PathBuf::from("/a.jpg"), PathBuf::from("/b.jpg")]);

        assert!(form.receive_image(picked));
        assert!(!form.receive_image(PickResult::Canceled));
        assert_eq!(form.draft().photo_local_ref.as_deref(), Some("/a.jpg"));

        form.clear_photo();
        assert_eq!(form.draft().photo_local_ref, None);

        let mut park = SubmissionForm::new(EntityKind::Park);
        assert!(!park.receive_image(PickResult::Picked(vec![PathBuf::from("/c.jpg")])));
    }

    #[tokio::test]
    async fn test_missing_location_shows_prompt() {
        let log = CallLog::default();
        let coordinator = coordinator(EntityKind::Sighting, &log);
        let navigator = RecordingNavigator::default();

        let mut form = SubmissionForm::new(EntityKind::Sighting);
        form.set_description("Bando de araras");

        assert!(form.submit(&coordinator, &navigator).await.is_err());
        assert!(form.location_prompt_visible());
        assert_eq!(form.draft().description, "Bando de araras");

        form.receive_location(Coordinates::new(-15.0, -47.0));
        assert!(!form.location_prompt_visible());

        form.submit(&coordinator, &navigator).await.unwrap();
        assert_eq!(form.draft(), &DraftRecord::new());
        assert_eq!(navigator.routes(), vec!["sightings"]);
    }

    #[tokio::test]
    async fn test_invalid_submit_shows_inline_errors() {
        let log = CallLog::default();
        let coordinator = coordinator(EntityKind::Flora, &log);
        let navigator = RecordingNavigator::default();

        let mut form = SubmissionForm::new(EntityKind::Flora);
        form.receive_location(Coordinates::new(-15.0, -47.0));

        assert!(form.submit(&coordinator, &navigator).await.is_err());
        assert_eq!(form.errors().get(Field::Description), Some("A descrição é obrigatória"));

        form.set_description("Árvore com flores roxas");
        assert!(form.errors().is_empty());
    }
}
