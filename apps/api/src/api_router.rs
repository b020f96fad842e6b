mod cors;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, put};
use petcare_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route(
            "/api/clinics",
            get(handlers::clinics::list_clinics_handler)
                .post(handlers::clinics::create_clinic_handler),
        )
        .route(
            "/api/clinics/{clinic_id}",
            get(handlers::clinics::get_clinic_handler)
                .delete(handlers::clinics::delete_clinic_handler),
        )
        .route(
            "/api/pets",
            get(handlers::pets::list_pets_handler).post(handlers::pets::create_pet_handler),
        )
        .route(
            "/api/pets/{pet_id}",
            get(handlers::pets::get_pet_handler).delete(handlers::pets::delete_pet_handler),
        )
        .route(
            "/api/plans",
            get(handlers::plans::list_plans_handler).post(handlers::plans::create_plan_handler),
        )
        .route(
            "/api/plans/{plan_id}",
            get(handlers::plans::get_plan_handler).delete(handlers::plans::delete_plan_handler),
        )
        .route(
            "/api/subscriptions",
            get(handlers::subscriptions::list_subscriptions_handler)
                .post(handlers::subscriptions::create_subscription_handler),
        )
        .route(
            "/api/subscriptions/{subscription_id}",
            get(handlers::subscriptions::get_subscription_handler)
                .delete(handlers::subscriptions::delete_subscription_handler),
        )
        .route(
            "/api/users",
            get(handlers::users::list_users_handler).post(handlers::users::create_user_handler),
        )
        .route(
            "/api/users/{user_id}",
            get(handlers::users::get_user_handler).delete(handlers::users::delete_user_handler),
        )
        .route(
            "/api/users/{user_id}/status",
            put(handlers::users::update_user_status_handler),
        )
        .route(
            "/api/me/permissions",
            get(handlers::me::my_permissions_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_auth,
        ));

    let cors_layer = cors::build_cors_layer(frontend_url, &app_state.identity_header)?;

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
