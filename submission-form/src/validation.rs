use std::collections::BTreeMap;

use crate::kind::EntityDescriptor;
use crate::models::DraftRecord;

/// Form fields that can carry an inline error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Species,
    Description,
}

/// Field → message map rendered inline under each input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// Replaces the entry for `field` with whatever `other` has for it
    pub fn sync_field(&mut self, field: Field, other: &FieldErrors) {
        match other.get(field) {
            Some(message) => self.insert(field, message),
            None => self.remove(field),
        }
    }
}

/// Derives the species error from the checkbox and the current species value.
///
/// Called on every change to either input, so the error always reflects the
/// latest state.
pub fn derive_errors(identified: bool, species: &str, descriptor: &EntityDescriptor) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if descriptor.species_required(identified) && species.trim().is_empty() {
        errors.insert(Field::Species, descriptor.labels.species_required);
    }

    errors
}

/// Validates a draft. Pure and synchronous.
pub fn validate(draft: &DraftRecord, descriptor: &EntityDescriptor) -> Result<(), FieldErrors> {
    let mut errors = derive_errors(draft.identified, &draft.species, descriptor);

    if draft.description.trim().is_empty() {
        errors.insert(Field::Description, descriptor.labels.description_required);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
