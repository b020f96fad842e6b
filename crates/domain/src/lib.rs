//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod clinic;
mod fields;
mod listing;
mod pet;
mod plan;
mod security;
mod subscription;
mod user;

pub use clinic::{Clinic, ClinicDraft, ClinicFilter, NewClinic};
pub use fields::contains_ignore_case;
pub use listing::{ListQuery, MAX_PAGE_LIMIT, Page, RecordTimestamps};
pub use pet::{NewPet, Pet, PetDraft, PetFilter, Species};
pub use plan::{NewPlan, Plan, PlanDraft, PlanFilter, PlanStatus};
pub use security::{Permission, PermissionSnapshot, RecordScope, Role};
pub use subscription::{
    NewSubscription, Subscription, SubscriptionDraft, SubscriptionFilter, SubscriptionStatus,
};
pub use user::{EmailAddress, NewUser, User, UserDraft, UserFilter};
