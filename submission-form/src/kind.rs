use serde::{Deserialize, Serialize};

/// The three entities users can register
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Sighting,
    Flora,
    Park,
}

/// How the species slot is validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeciesRule {
    /// Required only while the "identified" checkbox is ticked
    Conditional,
    /// Always editable and required; there is no checkbox
    AlwaysRequired,
}

/// User-facing wording for one form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLabels {
    pub title: &'static str,
    pub species_placeholder: &'static str,
    pub species_required: &'static str,
    pub description_placeholder: &'static str,
    pub description_required: &'static str,
    pub identified_checkbox: Option<&'static str>,
    pub location_button: &'static str,
    pub location_prompt: &'static str,
    pub submit_button: &'static str,
}

/// Everything that differs between the sighting, flora and park forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDescriptor {
    pub kind: EntityKind,
    pub labels: FieldLabels,
    pub species_rule: SpeciesRule,
    pub accepts_photo: bool,
    pub image_prefix: &'static str,
    pub listing_route: &'static str,
    pub select_spot_route: &'static str,
}

impl EntityDescriptor {
    /// Whether the species slot must be filled for the given checkbox value
    pub fn species_required(&self, identified: bool) -> bool {
        match self.species_rule {
            SpeciesRule::Conditional => identified,
            SpeciesRule::AlwaysRequired => true,
        }
    }

    /// Whether the species slot accepts input for the given checkbox value
    pub fn species_editable(&self, identified: bool) -> bool {
        self.species_required(identified)
    }
}

const LOCATION_PROMPT: &str = "Por favor informe o local do avistamento!";

static SIGHTING: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Sighting,
    labels: FieldLabels {
        title: "Registrar avistamento",
        species_placeholder: "Qual é a espécie?",
        species_required: "A espécie é obrigatória",
        description_placeholder: "Como é o animal que foi avistado? Busque descrever dados relevantes para identificar o animal, como tamanho, tipo de pele, coloração, presença de cauda ou asas etc.",
        description_required: "A descrição é obrigatória",
        identified_checkbox: Some("Espécie identificada"),
        location_button: "SELECIONAR LOCALIZAÇÃO DO AVISTAMENTO",
        location_prompt: LOCATION_PROMPT,
        submit_button: "REGISTRAR AVISTAMENTO",
    },
    species_rule: SpeciesRule::Conditional,
    accepts_photo: true,
    image_prefix: "sighting",
    listing_route: "sightings",
    select_spot_route: "select_sighting_spot",
};

static FLORA: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Flora,
    labels: FieldLabels {
        title: "Registrar flora",
        species_placeholder: "Qual é a espécie?",
        species_required: "A espécie é obrigatória",
        description_placeholder: "Como é a planta que foi avistada? Descreva folhas, flores, frutos, altura e outros dados que ajudem a identificá-la.",
        description_required: "A descrição é obrigatória",
        identified_checkbox: Some("Flora identificada"),
        location_button: "SELECIONAR LOCALIZAÇÃO DA FLORA",
        location_prompt: LOCATION_PROMPT,
        submit_button: "REGISTRAR FLORA",
    },
    species_rule: SpeciesRule::Conditional,
    accepts_photo: true,
    image_prefix: "flora",
    listing_route: "flora_sightings",
    select_spot_route: "select_flora_spot",
};

static PARK: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Park,
    labels: FieldLabels {
        title: "Registrar parque",
        species_placeholder: "Qual é o nome do parque?",
        species_required: "O nome do parque é obrigatório",
        description_placeholder: "Onde fica o parque? Informe pelo menos o bairro.",
        description_required: "Informe pelo menos o bairro onde fica o parque!",
        identified_checkbox: None,
        location_button: "SELECIONAR LOCALIZAÇÃO DO PARQUE",
        location_prompt: "Por favor informe o local do parque!",
        submit_button: "REGISTRAR PARQUE",
    },
    species_rule: SpeciesRule::AlwaysRequired,
    accepts_photo: false,
    image_prefix: "park",
    listing_route: "nearest_parks",
    select_spot_route: "select_park_spot",
};

impl EntityKind {
    pub fn descriptor(self) -> &'static EntityDescriptor {
        match self {
            EntityKind::Sighting => &SIGHTING,
            EntityKind::Flora => &FLORA,
            EntityKind::Park => &PARK,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EntityKind::Sighting => "sighting",
            EntityKind::Flora => "flora",
            EntityKind::Park => "park",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "sighting" => Some(EntityKind::Sighting),
            "flora" => Some(EntityKind::Flora),
            "park" => Some(EntityKind::Park),
            _ => None,
        }
    }

    pub fn all() -> &'static [EntityKind] {
        static ALL: [EntityKind; 3] = [EntityKind::Sighting, EntityKind::Flora, EntityKind::Park];
        &ALL
    }
}
