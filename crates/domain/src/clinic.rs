use petcare_core::{AppError, AppResult, RecordId};
use serde::{Deserialize, Serialize};

use crate::fields::{contains_ignore_case, optional_text, required_text};
use crate::listing::RecordTimestamps;
use crate::user::EmailAddress;

/// Projection of a stored clinic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clinic {
    /// Clinic identifier.
    pub id: RecordId,
    /// Trading name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// City name.
    pub city: Option<String>,
    /// Two-letter state code.
    pub state: Option<String>,
    /// Creation and update instants.
    pub timestamps: RecordTimestamps,
}

impl Clinic {
    /// Returns whether the clinic passes the listing filter and search term.
    #[must_use]
    pub fn matches(&self, filter: &ClinicFilter, search: Option<&str>) -> bool {
        let city_matches = filter.city.as_deref().is_none_or(|city| {
            self.city
                .as_deref()
                .is_some_and(|stored| stored.eq_ignore_ascii_case(city))
        });

        city_matches && search.is_none_or(|term| contains_ignore_case(&self.name, term))
    }
}

/// Raw clinic creation input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewClinic {
    /// Trading name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// City name.
    pub city: Option<String>,
    /// Two-letter state code.
    pub state: Option<String>,
}

/// Validated clinic ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClinicDraft {
    name: String,
    email: Option<EmailAddress>,
    phone: Option<String>,
    address: Option<String>,
    city: Option<String>,
    state: Option<String>,
}

impl ClinicDraft {
    /// Validates raw clinic input.
    pub fn new(input: NewClinic) -> AppResult<Self> {
        let name = required_text("Name", &input.name, 120)?;
        let email = optional_text("Email", input.email, 254)?
            .map(EmailAddress::new)
            .transpose()?;
        let phone = optional_text("Phone", input.phone, 30)?;
        let address = optional_text("Address", input.address, 255)?;
        let city = optional_text("City", input.city, 120)?;
        let state = optional_text("State", input.state, 2)?
            .map(|state| {
                if state.chars().count() == 2 && state.chars().all(|c| c.is_ascii_alphabetic()) {
                    Ok(state.to_ascii_uppercase())
                } else {
                    Err(AppError::Validation(
                        "State must be a two-letter code".to_owned(),
                    ))
                }
            })
            .transpose()?;

        Ok(Self {
            name,
            email,
            phone,
            address,
            city,
            state,
        })
    }

    /// Returns the clinic name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the contact email.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_ref().map(EmailAddress::as_str)
    }

    /// Returns the contact phone.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the street address.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Returns the city.
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    /// Returns the state code.
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    /// Builds the stored projection for this draft.
    #[must_use]
    pub fn into_record(self, id: RecordId, timestamps: RecordTimestamps) -> Clinic {
        Clinic {
            id,
            name: self.name,
            email: self.email.map(String::from),
            phone: self.phone,
            address: self.address,
            city: self.city,
            state: self.state,
            timestamps,
        }
    }
}

/// Equality filters accepted by clinic listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClinicFilter {
    /// Restricts to clinics in this city (case-insensitive).
    pub city: Option<String>,
}
