use crate::kind::EntityDescriptor;
use crate::models::DraftRecord;
use crate::validation::{derive_errors, FieldErrors};

/// How the species input should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeciesFieldState {
    pub editable: bool,
    pub required: bool,
}

/// Keeps the species slot consistent with the "identified" checkbox.
///
/// Every transition returns the freshly derived species error set, so callers
/// never depend on a watcher firing in the right order.
#[derive(Debug, Clone, Copy)]
pub struct ConditionalFieldController {
    descriptor: &'static EntityDescriptor,
}

impl ConditionalFieldController {
    pub fn new(descriptor: &'static EntityDescriptor) -> Self {
        Self { descriptor }
    }

    pub fn state(&self, identified: bool) -> SpeciesFieldState {
        SpeciesFieldState {
            editable: self.descriptor.species_editable(identified),
            required: self.descriptor.species_required(identified),
        }
    }

    /// Applies a checkbox change. Any flip clears the species value.
    pub fn set_identified(&self, draft: &mut DraftRecord, identified: bool) -> FieldErrors {
        if draft.identified != identified {
            draft.identified = identified;
            draft.species.clear();
        }

        self.errors(draft)
    }

    /// Applies a species edit. Returns `None` when the field is read-only.
    pub fn set_species(&self, draft: &mut DraftRecord, value: &str) -> Option<FieldErrors> {
        if !self.state(draft.identified).editable {
            return None;
        }

        draft.species = value.to_string();
        Some(self.errors(draft))
    }

    pub fn errors(&self, draft: &DraftRecord) -> FieldErrors {
        derive_errors(draft.identified, &draft.species, self.descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::EntityKind;
    use crate::validation::Field;

    #[test]
    fn test_toggle_on_clears_and_requires() {
        let controller = ConditionalFieldController::new(EntityKind::Sighting.descriptor());
        let mut draft = DraftRecord::new();
        draft.species = "stale".to_string();

        let errors = controller.set_identified(&mut draft, true);
        assert_eq!(draft.species, "");
        assert_eq!(errors.get(Field::Species), Some("A espécie é obrigatória"));
        assert_eq!(
            controller.state(true),
            SpeciesFieldState {
                editable: true,
                required: true
            }
        );
    }

    #[test]
    fn test_toggle_off_clears_value_and_error() {
        let controller = ConditionalFieldController::new(EntityKind::Flora.descriptor());
        let mut draft = DraftRecord::new();
        controller.set_identified(&mut draft, true);
        controller.set_species(&mut draft, "Ipê");

        let errors = controller.set_identified(&mut draft, false);
        assert_eq!(draft.species, "");
        assert!(errors.is_empty());
        assert!(!controller.state(false).editable);
    }

    #[test]
    fn test_species_edits_rederive_error() {
        let controller = ConditionalFieldController::new(EntityKind::Flora.descriptor());
        let mut draft = DraftRecord::new();
        controller.set_identified(&mut draft, true);

        let errors = controller.set_species(&mut draft, "Ipê").unwrap();
        assert!(errors.is_empty());

        let errors = controller.set_species(&mut draft, "").unwrap();
        assert!(errors.contains(Field::Species));
    }

    #[test]
    fn test_read_only_species_ignores_edits() {
        let controller = ConditionalFieldController::new(EntityKind::Sighting.descriptor());
        let mut draft = DraftRecord::new();
        assert!(controller.set_species(&mut draft, "Tucano").is_none());
        assert_eq!(draft.species, "");
    }

    #[test]
    fn test_same_value_keeps_species() {
        let controller = ConditionalFieldController::new(EntityKind::Sighting.descriptor());
        let mut draft = DraftRecord::new();
        controller.set_identified(&mut draft, true);
        controller.set_species(&mut draft, "Tucano");

        controller.set_identified(&mut draft, true);
        assert_eq!(draft.species, "Tucano");
    }
}
