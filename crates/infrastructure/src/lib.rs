//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_entity_repository;
mod postgres_clinic_repository;
mod postgres_pet_repository;
mod postgres_plan_repository;
mod postgres_subscription_repository;
mod postgres_user_repository;
mod query_support;
mod store_errors;

pub use in_memory_entity_repository::InMemoryEntityRepository;
pub use postgres_clinic_repository::PostgresClinicRepository;
pub use postgres_pet_repository::PostgresPetRepository;
pub use postgres_plan_repository::PostgresPlanRepository;
pub use postgres_subscription_repository::PostgresSubscriptionRepository;
pub use postgres_user_repository::PostgresUserRepository;
