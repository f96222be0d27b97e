//! Submit coordinator
//!
//! Runs one submission attempt through
//! `Idle → Validating → (Invalid | LocationMissing | [Uploading →] Persisting → Success) | Failed`.
//! Validation and the location gate run before any I/O. Upload and
//! persistence are awaited strictly in sequence because the record embeds the
//! uploaded photo URL. The save hook's loading flag is held for the whole
//! attempt; a submit pressed while it is raised returns
//! [`SubmitError::InFlight`] without touching any collaborator.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::kind::{EntityDescriptor, EntityKind, SpeciesRule};
use crate::location::{LocationGate, LocationMissing};
use crate::models::{DraftRecord, SubmittedRecord};
use crate::save_hook::{PersistenceError, RecordStore, SaveHook};
use crate::upload::{BlobStore, ImageSource, ImageUploadSequencer, UploadError};
use crate::validation::{validate, FieldErrors};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Validating,
    Invalid(FieldErrors),
    LocationMissing,
    Uploading,
    Persisting,
    Success,
    Failed(String),
}

impl SubmitState {
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            SubmitState::Validating | SubmitState::Uploading | SubmitState::Persisting
        )
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("a submission is already in progress")]
    InFlight,

    #[error("the form has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),

    #[error(transparent)]
    LocationMissing(#[from] LocationMissing),

    #[error("image upload failed: {0}")]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Named-route transitions requested after a successful submission
pub trait Navigator {
    fn navigate(&self, route: &str);
}

pub struct SubmitCoordinator<I, B, S> {
    descriptor: &'static EntityDescriptor,
    uploader: ImageUploadSequencer<I, B>,
    hook: SaveHook<S>,
    state: Mutex<SubmitState>,
    clock: fn() -> DateTime<Utc>,
}

impl<I: ImageSource, B: BlobStore, S: RecordStore> SubmitCoordinator<I, B, S> {
    pub fn new(kind: EntityKind, source: I, store: B, records: S) -> Self {
        Self {
            descriptor: kind.descriptor(),
            uploader: ImageUploadSequencer::new(source, store),
            hook: SaveHook::new(records),
            state: Mutex::new(SubmitState::Idle),
            clock: Utc::now,
        }
    }

    /// Replaces the clock used for the record date and the photo name
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn descriptor(&self) -> &'static EntityDescriptor {
        self.descriptor
    }

    pub fn uploader(&self) -> &ImageUploadSequencer<I, B> {
        &self.uploader
    }

    pub fn hook(&self) -> &SaveHook<S> {
        &self.hook
    }

    pub fn state(&self) -> SubmitState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn loading(&self) -> bool {
        self.hook.loading()
    }

    pub fn error(&self) -> Option<String> {
        self.hook.error()
    }

    fn transition(&self, next: SubmitState) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        log::debug!(
            "{} submission: {:?} -> {:?}",
            self.descriptor.kind.as_str(),
            *state,
            next
        );
        *state = next;
    }

    fn fail(&self, message: String) {
        self.hook.set_error(Some(message.clone()));
        self.transition(SubmitState::Failed(message));
    }

    pub async fn submit<N: Navigator + ?Sized>(
        &self,
        draft: &DraftRecord,
        navigator: &N,
    ) -> Result<SubmittedRecord, SubmitError> {
        let _loading = match self.hook.begin() {
            Some(guard) => guard,
            None => {
                log::debug!(
                    "Ignoring {} submit while another one is in flight",
                    self.descriptor.kind.as_str()
                );
                return Err(SubmitError::InFlight);
            }
        };

        self.hook.set_error(None);
        self.transition(SubmitState::Validating);

        if let Err(errors) = validate(draft, self.descriptor) {
            self.transition(SubmitState::Invalid(errors.clone()));
            return Err(SubmitError::Invalid(errors));
        }

        let location = match LocationGate::check(draft.location) {
            Ok(location) => location,
            Err(e) => {
                self.transition(SubmitState::LocationMissing);
                return Err(e.into());
            }
        };

        let now = (self.clock)();

        let photo = match self.photo_to_upload(draft) {
            Some(local_ref) => {
                self.transition(SubmitState::Uploading);
                match self.uploader.upload(self.descriptor, local_ref, now).await {
                    Ok(url) => Some(url.to_string()),
                    Err(e) => {
                        log::error!("Photo upload failed: {}", e);
                        self.fail(e.to_string());
                        return Err(e.into());
                    }
                }
            }
            None => None,
        };

        let identified =
            draft.identified || self.descriptor.species_rule == SpeciesRule::AlwaysRequired;
        let record = SubmittedRecord::new(
            draft.species.trim(),
            draft.description.trim(),
            identified,
            location,
            photo,
            now,
        );

        self.transition(SubmitState::Persisting);
        if let Err(e) = self.hook.save(self.descriptor.kind, &record).await {
            self.fail(e.to_string());
            return Err(e.into());
        }

        self.transition(SubmitState::Success);
        navigator.navigate(self.descriptor.listing_route);

        Ok(record)
    }

    fn photo_to_upload<'d>(&self, draft: &'d DraftRecord) -> Option<&'d str> {
        if !self.descriptor.accepts_photo {
            return None;
        }

        draft.photo_local_ref.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{
        CallLog, MockBlobStore, MockImageSource, MockRecordStore, RecordingNavigator,
    };
    use crate::models::Coordinates;
    use crate::validation::Field;
    use chrono::TimeZone;

    type TestCoordinator = SubmitCoordinator<MockImageSource, MockBlobStore, MockRecordStore>;

    fn fixed_clock() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    fn coordinator(kind: EntityKind, log: &CallLog) -> TestCoordinator {
        SubmitCoordinator::new(
            kind,
            MockImageSource::new(log.clone()),
            MockBlobStore::new(log.clone()),
            MockRecordStore::new(log.clone()),
        )
        .with_clock(fixed_clock)
    }

    fn ipe_draft() -> DraftRecord {
        DraftRecord {
            species: "Ipê".to_string(),
            description: "Yellow flowering tree".to_string(),
            identified: true,
            photo_local_ref: None,
            location: Some(Coordinates::new(-15.7939, -47.8828)),
        }
    }

    #[tokio::test]
    async fn test_missing_location_has_no_side_effects() {
        let log = CallLog::default();
        let coordinator = coordinator(EntityKind::Flora, &log);
        let navigator = RecordingNavigator::default();

        let mut draft = ipe_draft();
        draft.location = None;
        draft.photo_local_ref = Some("/photos/ipe.jpg".to_string());

        let err = coordinator.submit(&draft, &navigator).await.unwrap_err();
        assert!(matches!(err, SubmitError::LocationMissing(_)));
        assert_eq!(coordinator.state(), SubmitState::LocationMissing);
        assert!(log.calls().is_empty());
        assert!(navigator.routes().is_empty());
        assert!(!coordinator.loading());
    }

    #[tokio::test]
    async fn test_invalid_draft_has_no_side_effects() {
        let log = CallLog::default();
        let coordinator = coordinator(EntityKind::Sighting, &log);
        let navigator = RecordingNavigator::default();

        let mut draft = ipe_draft();
        draft.species = String::new();
        draft.description = "  ".to_string();

        let err = coordinator.submit(&draft, &navigator).await.unwrap_err();
        match err {
            SubmitError::Invalid(errors) => {
                assert!(errors.contains(Field::Species));
                assert!(errors.contains(Field::Description));
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(matches!(coordinator.state(), SubmitState::Invalid(_)));
        assert!(log.calls().is_empty());
    }

    #[tokio::test]
    async fn test_submit_without_photo() {
        let log = CallLog::default();
        let coordinator = coordinator(EntityKind::Flora, &log);
        let navigator = RecordingNavigator::default();

        let record = coordinator.submit(&ipe_draft(), &navigator).await.unwrap();

        assert_eq!(record.species(), "Ipê");
        assert_eq!(record.description(), "Yellow flowering tree");
        assert!(record.identified_species());
        assert_eq!(record.location(), Coordinates::new(-15.7939, -47.8828));
        assert_eq!(record.photo(), None);
        assert_eq!(record.date(), fixed_clock());

        assert_eq!(log.calls(), vec!["save:flora"]);
        assert_eq!(coordinator.hook().store().saved(), vec![(EntityKind::Flora, record)]);
        assert_eq!(navigator.routes(), vec!["flora_sightings"]);
        assert_eq!(coordinator.state(), SubmitState::Success);
        assert!(!coordinator.loading());
    }

    #[tokio::test]
    async fn test_photo_uploaded_before_save() {
        let log = CallLog::default();
        let coordinator = coordinator(EntityKind::Sighting, &log);
        let navigator = RecordingNavigator::default();

        let mut draft = ipe_draft();
        draft.photo_local_ref = Some("/photos/tucano.jpg".to_string());

        let record = coordinator.submit(&draft, &navigator).await.unwrap();

        assert_eq!(
            log.calls(),
            vec![
                "read:/photos/tucano.jpg",
                "put:images/sighting-1700000000000.jpg",
                "url:images/sighting-1700000000000.jpg",
                "save:sighting",
            ]
        );
        assert_eq!(
            record.photo(),
            Some("https://storage.example.org/images/sighting-1700000000000.jpg")
        );
        assert_eq!(navigator.routes(), vec!["sightings"]);
    }

    #[tokio::test]
    async fn test_upload_failure_skips_persistence() {
        let log = CallLog::default();
        let coordinator = SubmitCoordinator::new(
            EntityKind::Flora,
            MockImageSource::new(log.clone()),
            MockBlobStore::failing(log.clone()),
            MockRecordStore::new(log.clone()),
        );
        let navigator = RecordingNavigator::default();

        let mut draft = ipe_draft();
        draft.photo_local_ref = Some("/photos/ipe.jpg".to_string());

        let err = coordinator.submit(&draft, &navigator).await.unwrap_err();
        assert!(matches!(err, SubmitError::Upload(_)));
        assert_eq!(log.count("save:"), 0);
        assert!(navigator.routes().is_empty());
        assert!(matches!(coordinator.state(), SubmitState::Failed(_)));
        assert!(coordinator.error().is_some());
        assert!(!coordinator.loading());
    }

    #[tokio::test]
    async fn test_persistence_failure_allows_retry() {
        let log = CallLog::default();
        let coordinator = SubmitCoordinator::new(
            EntityKind::Sighting,
            MockImageSource::new(log.clone()),
            MockBlobStore::new(log.clone()),
            MockRecordStore::failing_times(log.clone(), 1),
        );
        let navigator = RecordingNavigator::default();
        let draft = ipe_draft();

        let err = coordinator.submit(&draft, &navigator).await.unwrap_err();
        assert!(matches!(err, SubmitError::Persistence(_)));
        assert!(navigator.routes().is_empty());
        assert_eq!(
            coordinator.error().as_deref(),
            Some("could not save record: database is locked")
        );

        coordinator.submit(&draft, &navigator).await.unwrap();
        assert_eq!(coordinator.error(), None);
        assert_eq!(navigator.routes(), vec!["sightings"]);
        assert_eq!(coordinator.hook().store().saved().len(), 1);
    }

    #[tokio::test]
    async fn test_unidentified_species_is_blanked() {
        let log = CallLog::default();
        let coordinator = coordinator(EntityKind::Sighting, &log);
        let navigator = RecordingNavigator::default();

        let mut draft = ipe_draft();
        draft.identified = false;
        draft.species = "leftover".to_string();

        let record = coordinator.submit(&draft, &navigator).await.unwrap();
        assert_eq!(record.species(), "");
        assert!(!record.identified_species());
    }

    #[tokio::test]
    async fn test_park_ignores_photo_and_counts_as_identified() {
        let log = CallLog::default();
        let coordinator = coordinator(EntityKind::Park, &log);
        let navigator = RecordingNavigator::default();

        let draft = DraftRecord {
            species: "Parque da Cidade".to_string(),
            description: "Asa Sul".to_string(),
            identified: false,
            photo_local_ref: Some("/photos/parque.jpg".to_string()),
            location: Some(Coordinates::new(-15.80, -47.90)),
        };

        let record = coordinator.submit(&draft, &navigator).await.unwrap();
        assert_eq!(record.species(), "Parque da Cidade");
        assert!(record.identified_species());
        assert_eq!(record.photo(), None);
        assert_eq!(log.calls(), vec!["save:park"]);
        assert_eq!(navigator.routes(), vec!["nearest_parks"]);
    }

    #[tokio::test]
    async fn test_concurrent_submit_is_suppressed() {
        let log = CallLog::default();
        let coordinator = coordinator(EntityKind::Flora, &log);
        let navigator = RecordingNavigator::default();

        let mut draft = ipe_draft();
        draft.photo_local_ref = Some("/photos/ipe.jpg".to_string());

        let (first, second) = futures::join!(
            coordinator.submit(&draft, &navigator),
            coordinator.submit(&draft, &navigator)
        );

        assert!(first.is_ok());
        assert!(matches!(second, Err(SubmitError::InFlight)));
        assert_eq!(log.count("put:"), 1);
        assert_eq!(log.count("save:"), 1);
        assert_eq!(navigator.routes().len(), 1);

        // the flag is released once the attempt finishes
        coordinator.submit(&draft, &navigator).await.unwrap();
        assert_eq!(log.count("save:"), 2);
    }
}
