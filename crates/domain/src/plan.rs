use petcare_core::{AppError, AppResult, RecordId};
use serde::{Deserialize, Serialize};

use crate::fields::{contains_ignore_case, optional_text, required_text};
use crate::listing::RecordTimestamps;

/// Commercial status of a care plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlanStatus {
    /// Plan can be subscribed to.
    #[default]
    #[serde(rename = "ATIVO")]
    Active,
    /// Plan is withdrawn from sale.
    #[serde(rename = "INATIVO")]
    Inactive,
}

impl PlanStatus {
    /// Returns the storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ATIVO",
            Self::Inactive => "INATIVO",
        }
    }

    /// Parses a storage value.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ATIVO" => Ok(Self::Active),
            "INATIVO" => Ok(Self::Inactive),
            _ => Err(AppError::Validation(format!(
                "Unknown plan status '{value}'"
            ))),
        }
    }
}

/// Projection of a stored care plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Plan identifier.
    pub id: RecordId,
    /// Commercial name.
    pub name: String,
    /// Marketing description.
    pub description: Option<String>,
    /// Price in cents.
    pub price: i64,
    /// Length of one care period, in days.
    pub care_period_days: i32,
    /// Commercial status.
    pub status: PlanStatus,
    /// Creation and update instants.
    pub timestamps: RecordTimestamps,
}

impl Plan {
    /// Returns whether the plan passes the listing filter and search term.
    #[must_use]
    pub fn matches(&self, filter: &PlanFilter, search: Option<&str>) -> bool {
        filter.status.is_none_or(|status| self.status == status)
            && search.is_none_or(|term| contains_ignore_case(&self.name, term))
    }
}

/// Raw plan creation input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewPlan {
    /// Commercial name.
    pub name: String,
    /// Marketing description.
    pub description: Option<String>,
    /// Price in cents.
    pub price: i64,
    /// Length of one care period, in days.
    pub care_period_days: i32,
    /// Status storage value; defaults to `ATIVO`.
    pub status: Option<String>,
}

/// Validated plan ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDraft {
    name: String,
    description: Option<String>,
    price: i64,
    care_period_days: i32,
    status: PlanStatus,
}

impl PlanDraft {
    /// Validates raw plan input.
    pub fn new(input: NewPlan) -> AppResult<Self> {
        let name = required_text("Name", &input.name, 120)?;
        let description = optional_text("Description", input.description, 2000)?;

        if input.price < 0 {
            return Err(AppError::Validation(
                "Price must not be negative".to_owned(),
            ));
        }

        if input.care_period_days < 1 {
            return Err(AppError::Validation(
                "Care period must be at least 1 day".to_owned(),
            ));
        }

        let status = input
            .status
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(PlanStatus::parse)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            name,
            description,
            price: input.price,
            care_period_days: input.care_period_days,
            status,
        })
    }

    /// Returns the plan name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the price in cents.
    #[must_use]
    pub fn price(&self) -> i64 {
        self.price
    }

    /// Returns the care period in days.
    #[must_use]
    pub fn care_period_days(&self) -> i32 {
        self.care_period_days
    }

    /// Returns the status.
    #[must_use]
    pub fn status(&self) -> PlanStatus {
        self.status
    }

    /// Builds the stored projection for this draft.
    #[must_use]
    pub fn into_record(self, id: RecordId, timestamps: RecordTimestamps) -> Plan {
        Plan {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            care_period_days: self.care_period_days,
            status: self.status,
            timestamps,
        }
    }
}

/// Equality filters accepted by plan listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanFilter {
    /// Restricts to plans with this status.
    pub status: Option<PlanStatus>,
}
