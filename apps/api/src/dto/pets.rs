use petcare_application::ListRequest;
use petcare_core::{AppError, AppResult};
use petcare_domain::{NewPet, Pet, PetFilter, Species};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::common::{id_filter, list_request, non_blank, optional_date, timestamp};

/// Incoming payload for pet creation.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-pet-request.ts"
)]
pub struct CreatePetRequest {
    pub name: String,
    pub species: String,
    #[serde(default)]
    pub breed: Option<String>,
    /// Calendar date formatted as `YYYY-MM-DD`.
    #[serde(default)]
    pub birth_date: Option<String>,
    pub owner_id: String,
    #[serde(default)]
    pub clinic_id: Option<String>,
}

impl TryFrom<CreatePetRequest> for NewPet {
    type Error = AppError;

    fn try_from(payload: CreatePetRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            birth_date: optional_date("Birth date", payload.birth_date)?,
            name: payload.name,
            species: payload.species,
            breed: payload.breed,
            owner_id: payload.owner_id,
            clinic_id: payload.clinic_id,
        })
    }
}

/// API representation of a pet.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/pet-response.ts"
)]
pub struct PetResponse {
    pub id: String,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub birth_date: Option<String>,
    pub owner_id: String,
    pub clinic_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Pet> for PetResponse {
    fn from(pet: Pet) -> Self {
        Self {
            id: pet.id.to_string(),
            name: pet.name,
            species: pet.species.as_str().to_owned(),
            breed: pet.breed,
            birth_date: pet.birth_date.map(|date| date.to_string()),
            owner_id: pet.owner_id.to_string(),
            clinic_id: pet.clinic_id.map(|clinic_id| clinic_id.to_string()),
            created_at: timestamp(pet.timestamps.created_at),
            updated_at: timestamp(pet.timestamps.updated_at),
        }
    }
}

/// Envelope for a single pet.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/single-pet-response.ts"
)]
pub struct SinglePetResponse {
    pub success: bool,
    pub pet: PetResponse,
}

impl From<Pet> for SinglePetResponse {
    fn from(pet: Pet) -> Self {
        Self {
            success: true,
            pet: PetResponse::from(pet),
        }
    }
}

/// Query-string parameters for pet listings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub owner_id: Option<String>,
    pub clinic_id: Option<String>,
    pub species: Option<String>,
}

impl PetListQuery {
    pub fn into_parts(self) -> AppResult<(ListRequest, PetFilter)> {
        let request = list_request(self.page, self.limit, self.search)?;
        let filter = PetFilter {
            owner_id: id_filter(self.owner_id)?,
            clinic_id: id_filter(self.clinic_id)?,
            species: non_blank(self.species)
                .map(|species| Species::parse(species.as_str()))
                .transpose()?,
        };

        Ok((request, filter))
    }
}
