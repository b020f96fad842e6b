mod clinics;
mod common;
mod permissions;
mod pets;
mod plans;
mod subscriptions;
mod users;

pub use clinics::{ClinicListQuery, ClinicResponse, CreateClinicRequest, SingleClinicResponse};
pub use common::{DeleteResponse, HealthResponse, ListResponse};
pub use permissions::PermissionsResponse;
pub use pets::{CreatePetRequest, PetListQuery, PetResponse, SinglePetResponse};
pub use plans::{CreatePlanRequest, PlanListQuery, PlanResponse, SinglePlanResponse};
pub use subscriptions::{
    CreateSubscriptionRequest, SingleSubscriptionResponse, SubscriptionListQuery,
    SubscriptionResponse,
};
pub use users::{
    CreateUserRequest, SingleUserResponse, UpdateUserStatusRequest, UserListQuery, UserResponse,
};
