//! Application services and ports.

#![forbid(unsafe_code)]

mod authorization_service;
mod entity_kinds;
mod entity_ports;
mod entity_service;
mod permission_resolver;
mod user_account_service;

pub use authorization_service::AuthorizationService;
pub use entity_ports::{EntityKind, EntityRepository};
pub use entity_service::{EntityService, ListRequest};
pub use permission_resolver::{IdentityRepository, PermissionResolver};
pub use user_account_service::UserAccountService;
