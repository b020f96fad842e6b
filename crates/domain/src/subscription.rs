use chrono::NaiveDate;
use petcare_core::{AppError, AppResult, RecordId};
use serde::{Deserialize, Serialize};

use crate::fields::required_reference;
use crate::listing::RecordTimestamps;

/// Lifecycle status of a plan subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SubscriptionStatus {
    /// Subscription is in force.
    #[default]
    #[serde(rename = "ATIVA")]
    Active,
    /// Subscription was cancelled before its end date.
    #[serde(rename = "CANCELADA")]
    Cancelled,
    /// Subscription reached its end date.
    #[serde(rename = "EXPIRADA")]
    Expired,
}

impl SubscriptionStatus {
    /// Returns the storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ATIVA",
            Self::Cancelled => "CANCELADA",
            Self::Expired => "EXPIRADA",
        }
    }

    /// Parses a storage value.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ATIVA" => Ok(Self::Active),
            "CANCELADA" => Ok(Self::Cancelled),
            "EXPIRADA" => Ok(Self::Expired),
            _ => Err(AppError::Validation(format!(
                "Unknown subscription status '{value}'"
            ))),
        }
    }
}

/// Projection of a stored subscription of a pet to a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscription identifier.
    pub id: RecordId,
    /// Subscribed pet.
    pub pet_id: RecordId,
    /// Subscribed plan.
    pub plan_id: RecordId,
    /// Lifecycle status.
    pub status: SubscriptionStatus,
    /// First day of coverage.
    pub start_date: NaiveDate,
    /// Last day of coverage, if bounded.
    pub end_date: Option<NaiveDate>,
    /// Creation and update instants.
    pub timestamps: RecordTimestamps,
}

impl Subscription {
    /// Returns whether the subscription passes the listing filter.
    ///
    /// Subscriptions carry no free text, so the search term is ignored.
    #[must_use]
    pub fn matches(&self, filter: &SubscriptionFilter, _search: Option<&str>) -> bool {
        filter
            .pet_id
            .as_ref()
            .is_none_or(|pet_id| &self.pet_id == pet_id)
            && filter
                .plan_id
                .as_ref()
                .is_none_or(|plan_id| &self.plan_id == plan_id)
            && filter.status.is_none_or(|status| self.status == status)
    }
}

/// Raw subscription creation input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewSubscription {
    /// Subscribed pet.
    pub pet_id: String,
    /// Subscribed plan.
    pub plan_id: String,
    /// Status storage value; defaults to `ATIVA`.
    pub status: Option<String>,
    /// First day of coverage.
    pub start_date: NaiveDate,
    /// Last day of coverage.
    pub end_date: Option<NaiveDate>,
}

/// Validated subscription ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionDraft {
    pet_id: RecordId,
    plan_id: RecordId,
    status: SubscriptionStatus,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
}

impl SubscriptionDraft {
    /// Validates raw subscription input.
    pub fn new(input: NewSubscription) -> AppResult<Self> {
        let pet_id = required_reference("Pet", &input.pet_id)?;
        let plan_id = required_reference("Plan", &input.plan_id)?;
        let status = input
            .status
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(SubscriptionStatus::parse)
            .transpose()?
            .unwrap_or_default();

        if let Some(end_date) = input.end_date
            && end_date < input.start_date
        {
            return Err(AppError::Validation(
                "End date cannot be before start date".to_owned(),
            ));
        }

        Ok(Self {
            pet_id,
            plan_id,
            status,
            start_date: input.start_date,
            end_date: input.end_date,
        })
    }

    /// Returns the pet reference.
    #[must_use]
    pub fn pet_id(&self) -> &RecordId {
        &self.pet_id
    }

    /// Returns the plan reference.
    #[must_use]
    pub fn plan_id(&self) -> &RecordId {
        &self.plan_id
    }

    /// Returns the status.
    #[must_use]
    pub fn status(&self) -> SubscriptionStatus {
        self.status
    }

    /// Returns the first day of coverage.
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the last day of coverage.
    #[must_use]
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Builds the stored projection for this draft.
    #[must_use]
    pub fn into_record(self, id: RecordId, timestamps: RecordTimestamps) -> Subscription {
        Subscription {
            id,
            pet_id: self.pet_id,
            plan_id: self.plan_id,
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
            timestamps,
        }
    }
}

/// Equality filters accepted by subscription listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionFilter {
    /// Restricts to subscriptions of this pet.
    pub pet_id: Option<RecordId>,
    /// Restricts to subscriptions of this plan.
    pub plan_id: Option<RecordId>,
    /// Restricts to one status.
    pub status: Option<SubscriptionStatus>,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{NewSubscription, SubscriptionDraft, SubscriptionStatus};

    fn input() -> NewSubscription {
        NewSubscription {
            pet_id: "pet-1".to_owned(),
            plan_id: "plan-1".to_owned(),
            status: None,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default(),
            end_date: None,
        }
    }

    #[test]
    fn subscription_defaults_to_active() {
        let draft = SubscriptionDraft::new(input())
            .unwrap_or_else(|error| panic!("subscription should be valid: {error}"));
        assert_eq!(draft.status(), SubscriptionStatus::Active);
    }

    #[test]
    fn subscription_rejects_inverted_dates() {
        let result = SubscriptionDraft::new(NewSubscription {
            end_date: NaiveDate::from_ymd_opt(2025, 12, 31),
            ..input()
        });
        assert_eq!(
            result.err().map(|error| error.message().to_owned()),
            Some("End date cannot be before start date".to_owned())
        );
    }

    #[test]
    fn subscription_requires_plan_reference() {
        let result = SubscriptionDraft::new(NewSubscription {
            plan_id: String::new(),
            ..input()
        });
        assert_eq!(
            result.err().map(|error| error.message().to_owned()),
            Some("Plan is required".to_owned())
        );
    }
}
