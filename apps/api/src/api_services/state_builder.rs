use std::sync::Arc;

use petcare_application::{
    AuthorizationService, EntityService, PermissionResolver, UserAccountService,
};
use petcare_infrastructure::{
    PostgresClinicRepository, PostgresPetRepository, PostgresPlanRepository,
    PostgresSubscriptionRepository, PostgresUserRepository,
};
use sqlx::PgPool;

use crate::api_config::ApiConfig;
use crate::state::AppState;

pub fn build_app_state(pool: PgPool, config: &ApiConfig) -> AppState {
    let user_repository = Arc::new(PostgresUserRepository::new(pool.clone()));
    let authorization_service =
        AuthorizationService::new(PermissionResolver::new(user_repository.clone()));

    AppState {
        clinic_service: EntityService::new(
            Arc::new(PostgresClinicRepository::new(pool.clone())),
            authorization_service.clone(),
        ),
        pet_service: EntityService::new(
            Arc::new(PostgresPetRepository::new(pool.clone())),
            authorization_service.clone(),
        ),
        plan_service: EntityService::new(
            Arc::new(PostgresPlanRepository::new(pool.clone())),
            authorization_service.clone(),
        ),
        subscription_service: EntityService::new(
            Arc::new(PostgresSubscriptionRepository::new(pool.clone())),
            authorization_service.clone(),
        ),
        user_service: EntityService::new(user_repository.clone(), authorization_service.clone()),
        user_account_service: UserAccountService::new(
            user_repository.clone(),
            user_repository,
            authorization_service.clone(),
        ),
        authorization_service,
        postgres_pool: pool,
        frontend_url: config.frontend_url.clone(),
        identity_header: config.identity_header.clone(),
    }
}
