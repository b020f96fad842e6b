use axum::http::HeaderName;
use petcare_application::{AuthorizationService, EntityService, UserAccountService};
use petcare_domain::{Clinic, Pet, Plan, Subscription, User};
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub clinic_service: EntityService<Clinic>,
    pub pet_service: EntityService<Pet>,
    pub plan_service: EntityService<Plan>,
    pub subscription_service: EntityService<Subscription>,
    pub user_service: EntityService<User>,
    pub user_account_service: UserAccountService,
    pub authorization_service: AuthorizationService,
    pub postgres_pool: PgPool,
    pub frontend_url: String,
    /// Header the upstream identity provider uses to forward the caller's id.
    pub identity_header: HeaderName,
}
