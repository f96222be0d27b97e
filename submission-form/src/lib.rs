//! # Submission Form
//!
//! The submission workflow shared by the fauna sighting, flora sighting and
//! park registration forms.
//!
//! This crate provides:
//! - Entity-kind descriptors (labels, species rule, routes, image prefix)
//! - A pure validator and the conditional species field controller
//! - The location gate and the image upload sequencer
//! - The submit coordinator state machine with its loading-flag gate
//!
//! ## Platform Separation
//!
//! Nothing in here renders UI, talks to a database or opens a network
//! connection. Persistence, blob storage, navigation and reading local images
//! are traits implemented by the application crate.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use submission_form::{EntityKind, SubmissionForm, SubmitCoordinator, FsImageSource};
//!
//! let coordinator = SubmitCoordinator::new(EntityKind::Flora, FsImageSource, blob_store, record_store);
//! let mut form = SubmissionForm::new(EntityKind::Flora);
//!
//! form.toggle_identified();
//! form.set_species("Ipê");
//! form.set_description("Yellow flowering tree");
//! form.receive_location(Coordinates::new(-15.79, -47.88));
//!
//! let result = form.submit(&coordinator, &navigator).await;
//! ```

pub mod coordinator;
pub mod form;
pub mod kind;
pub mod location;
pub mod models;
pub mod picker;
pub mod save_hook;
pub mod species_field;
pub mod upload;
pub mod validation;

#[cfg(test)]
pub(crate) mod mock;

pub use coordinator::{Navigator, SubmitCoordinator, SubmitError, SubmitState};
pub use form::SubmissionForm;
pub use kind::{EntityDescriptor, EntityKind, FieldLabels, SpeciesRule};
pub use location::{LocationGate, LocationMissing};
pub use models::{Coordinates, DraftRecord, SubmittedRecord};
pub use picker::PickResult;
pub use save_hook::{PersistenceError, RecordStore, SaveHook};
pub use species_field::{ConditionalFieldController, SpeciesFieldState};
pub use upload::{remote_name, BlobStore, FsImageSource, ImageSource, ImageUploadSequencer, UploadError};
pub use validation::{derive_errors, validate, Field, FieldErrors};
