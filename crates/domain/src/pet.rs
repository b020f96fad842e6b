use chrono::NaiveDate;
use petcare_core::{AppError, AppResult, RecordId};
use serde::{Deserialize, Serialize};

use crate::fields::{
    contains_ignore_case, optional_reference, optional_text, required_reference, required_text,
};
use crate::listing::RecordTimestamps;

/// Species accepted for pets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    /// Dog.
    #[serde(rename = "CACHORRO")]
    Dog,
    /// Cat.
    #[serde(rename = "GATO")]
    Cat,
    /// Any other species.
    #[serde(rename = "OUTRO")]
    Other,
}

impl Species {
    /// Returns the storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dog => "CACHORRO",
            Self::Cat => "GATO",
            Self::Other => "OUTRO",
        }
    }

    /// Parses a storage value.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "CACHORRO" => Ok(Self::Dog),
            "GATO" => Ok(Self::Cat),
            "OUTRO" => Ok(Self::Other),
            _ => Err(AppError::Validation(format!("Unknown species '{value}'"))),
        }
    }
}

/// Projection of a stored pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    /// Pet identifier.
    pub id: RecordId,
    /// Pet name.
    pub name: String,
    /// Pet species.
    pub species: Species,
    /// Breed description.
    pub breed: Option<String>,
    /// Date of birth.
    pub birth_date: Option<NaiveDate>,
    /// Identity owning the pet.
    pub owner_id: RecordId,
    /// Clinic the pet is registered with.
    pub clinic_id: Option<RecordId>,
    /// Creation and update instants.
    pub timestamps: RecordTimestamps,
}

impl Pet {
    /// Returns whether the pet passes the listing filter and search term.
    #[must_use]
    pub fn matches(&self, filter: &PetFilter, search: Option<&str>) -> bool {
        filter
            .owner_id
            .as_ref()
            .is_none_or(|owner_id| &self.owner_id == owner_id)
            && filter
                .clinic_id
                .as_ref()
                .is_none_or(|clinic_id| self.clinic_id.as_ref() == Some(clinic_id))
            && filter
                .species
                .is_none_or(|species| self.species == species)
            && search.is_none_or(|term| contains_ignore_case(&self.name, term))
    }
}

/// Raw pet creation input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewPet {
    /// Pet name.
    pub name: String,
    /// Species storage value.
    pub species: String,
    /// Breed description.
    pub breed: Option<String>,
    /// Date of birth.
    pub birth_date: Option<NaiveDate>,
    /// Identity owning the pet.
    pub owner_id: String,
    /// Clinic the pet is registered with.
    pub clinic_id: Option<String>,
}

/// Validated pet ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetDraft {
    name: String,
    species: Species,
    breed: Option<String>,
    birth_date: Option<NaiveDate>,
    owner_id: RecordId,
    clinic_id: Option<RecordId>,
}

impl PetDraft {
    /// Validates raw pet input; `today` bounds the birth date.
    pub fn new(input: NewPet, today: NaiveDate) -> AppResult<Self> {
        let name = required_text("Name", &input.name, 120)?;
        if input.species.trim().is_empty() {
            return Err(AppError::Validation("Species is required".to_owned()));
        }
        let species = Species::parse(&input.species)?;
        let breed = optional_text("Breed", input.breed, 120)?;

        if let Some(birth_date) = input.birth_date
            && birth_date > today
        {
            return Err(AppError::Validation(
                "Birth date cannot be in the future".to_owned(),
            ));
        }

        let owner_id = required_reference("Owner", &input.owner_id)?;

        Ok(Self {
            name,
            species,
            breed,
            birth_date: input.birth_date,
            owner_id,
            clinic_id: optional_reference(input.clinic_id),
        })
    }

    /// Returns the pet name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the species.
    #[must_use]
    pub fn species(&self) -> Species {
        self.species
    }

    /// Returns the breed.
    #[must_use]
    pub fn breed(&self) -> Option<&str> {
        self.breed.as_deref()
    }

    /// Returns the date of birth.
    #[must_use]
    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    /// Returns the owning identity.
    #[must_use]
    pub fn owner_id(&self) -> &RecordId {
        &self.owner_id
    }

    /// Returns the clinic reference.
    #[must_use]
    pub fn clinic_id(&self) -> Option<&RecordId> {
        self.clinic_id.as_ref()
    }

    /// Builds the stored projection for this draft.
    #[must_use]
    pub fn into_record(self, id: RecordId, timestamps: RecordTimestamps) -> Pet {
        Pet {
            id,
            name: self.name,
            species: self.species,
            breed: self.breed,
            birth_date: self.birth_date,
            owner_id: self.owner_id,
            clinic_id: self.clinic_id,
            timestamps,
        }
    }
}

/// Equality filters accepted by pet listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetFilter {
    /// Restricts to pets of this owner.
    pub owner_id: Option<RecordId>,
    /// Restricts to pets registered with this clinic.
    pub clinic_id: Option<RecordId>,
    /// Restricts to one species.
    pub species: Option<Species>,
}
