use std::str::FromStr;

use petcare_core::AppError;
use serde::{Deserialize, Serialize};

/// Permissions enforced by application policy checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Allows reading clinics.
    ClinicRead,
    /// Allows creating and deleting clinics.
    ClinicManage,
    /// Allows reading pets.
    PetRead,
    /// Allows creating and deleting pets.
    PetManage,
    /// Allows reading care plans.
    PlanRead,
    /// Allows creating and deleting care plans.
    PlanManage,
    /// Allows reading plan subscriptions.
    SubscriptionRead,
    /// Allows creating and deleting plan subscriptions.
    SubscriptionManage,
    /// Allows reading user accounts.
    UserRead,
    /// Allows creating, deleting and (de)activating user accounts.
    UserManage,
}

impl Permission {
    /// Returns a stable storage value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClinicRead => "clinic.read",
            Self::ClinicManage => "clinic.manage",
            Self::PetRead => "pet.read",
            Self::PetManage => "pet.manage",
            Self::PlanRead => "plan.read",
            Self::PlanManage => "plan.manage",
            Self::SubscriptionRead => "subscription.read",
            Self::SubscriptionManage => "subscription.manage",
            Self::UserRead => "user.read",
            Self::UserManage => "user.manage",
        }
    }

    /// Returns the denial sentence shown when a caller lacks this permission.
    #[must_use]
    pub fn denial_message(&self) -> &'static str {
        match self {
            Self::ClinicRead => "You do not have permission to view clinics",
            Self::ClinicManage => "You do not have permission to manage clinics",
            Self::PetRead => "You do not have permission to view pets",
            Self::PetManage => "You do not have permission to manage pets",
            Self::PlanRead => "You do not have permission to view plans",
            Self::PlanManage => "You do not have permission to manage plans",
            Self::SubscriptionRead => "You do not have permission to view subscriptions",
            Self::SubscriptionManage => "You do not have permission to manage subscriptions",
            Self::UserRead => "You do not have permission to view users",
            Self::UserManage => "You do not have permission to manage users",
        }
    }

    /// Returns all known permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
            Permission::ClinicRead,
            Permission::ClinicManage,
            Permission::PetRead,
            Permission::PetManage,
            Permission::PlanRead,
            Permission::PlanManage,
            Permission::SubscriptionRead,
            Permission::SubscriptionManage,
            Permission::UserRead,
            Permission::UserManage,
        ];

        ALL
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|permission| permission.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown permission value '{value}'")))
    }
}

/// Closed set of roles an identity can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Platform administrator.
    #[serde(rename = "ADMIN")]
    Admin,
    /// Veterinarian working at a clinic.
    #[serde(rename = "VETERINARIO")]
    Veterinarian,
    /// Front-desk staff handling pets and subscriptions.
    #[serde(rename = "RECEPCIONISTA")]
    Receptionist,
    /// Pet owner using the customer portal.
    #[serde(rename = "TUTOR")]
    Tutor,
}

impl Role {
    /// Returns the storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Veterinarian => "VETERINARIO",
            Self::Receptionist => "RECEPCIONISTA",
            Self::Tutor => "TUTOR",
        }
    }

    /// Parses a role name, ignoring surrounding whitespace and case.
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "VETERINARIO" => Ok(Self::Veterinarian),
            "RECEPCIONISTA" => Ok(Self::Receptionist),
            "TUTOR" => Ok(Self::Tutor),
            _ => Err(AppError::Validation(format!("Unknown role '{value}'"))),
        }
    }

    /// Returns the permissions granted to this role.
    #[must_use]
    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            Self::Admin => Permission::all(),
            Self::Veterinarian => &[
                Permission::ClinicRead,
                Permission::PetRead,
                Permission::PetManage,
                Permission::PlanRead,
                Permission::SubscriptionRead,
                Permission::UserRead,
            ],
            Self::Receptionist => &[
                Permission::ClinicRead,
                Permission::PetRead,
                Permission::PetManage,
                Permission::PlanRead,
                Permission::SubscriptionRead,
                Permission::SubscriptionManage,
                Permission::UserRead,
            ],
            Self::Tutor => &[Permission::PetRead, Permission::PlanRead],
        }
    }

    /// Returns whether the role grants the permission.
    #[must_use]
    pub fn grants(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    /// Returns which records the role may see through a granted permission.
    #[must_use]
    pub fn record_scope(&self, permission: Permission) -> RecordScope {
        match (self, permission) {
            (Self::Tutor, Permission::PetRead) => RecordScope::Own,
            _ => RecordScope::All,
        }
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

/// Visibility of records reachable through a permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordScope {
    /// Every record of the entity.
    All,
    /// Only records owned by the caller.
    Own,
}

/// Point-in-time projection of an identity used for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSnapshot {
    /// Role currently held by the identity.
    pub role: Role,
    /// Whether the identity is currently active.
    pub is_active: bool,
}
