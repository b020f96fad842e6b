//! User domain types and validation rules.
//!
//! A user row doubles as the identity record read by permission checks:
//! its `role` and `is_active` columns form the permission snapshot.

use petcare_core::{AppError, AppResult, RecordId};
use serde::{Deserialize, Serialize};

use crate::fields::{contains_ignore_case, optional_reference, required_text};
use crate::listing::RecordTimestamps;
use crate::security::{PermissionSnapshot, Role};

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Performs basic structural validation: non-empty, contains exactly one `@`,
    /// local part and domain are non-empty, domain contains at least one `.`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim().to_lowercase();

        if trimmed.is_empty() {
            return Err(AppError::Validation("Email is required".to_owned()));
        }

        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(AppError::Validation(
                "Email must contain exactly one '@'".to_owned(),
            ));
        };

        if domain.contains('@') {
            return Err(AppError::Validation(
                "Email must contain exactly one '@'".to_owned(),
            ));
        }

        if local.is_empty() {
            return Err(AppError::Validation(
                "Email local part must not be empty".to_owned(),
            ));
        }

        if domain.is_empty() || !domain.contains('.') {
            return Err(AppError::Validation(
                "Email domain must contain at least one '.'".to_owned(),
            ));
        }

        if trimmed.len() > 254 {
            return Err(AppError::Validation(
                "Email must not exceed 254 characters".to_owned(),
            ));
        }

        Ok(Self(trimmed))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Projection of a stored user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identity id issued by the identity provider.
    pub id: RecordId,
    /// Full name.
    pub name: String,
    /// Canonical (lowercased) email.
    pub email: String,
    /// Role held by the account.
    pub role: Role,
    /// Whether the account may currently act.
    pub is_active: bool,
    /// Clinic the account works at, for staff.
    pub clinic_id: Option<RecordId>,
    /// Creation and update instants.
    pub timestamps: RecordTimestamps,
}

impl User {
    /// Returns the permission snapshot carried by this account.
    #[must_use]
    pub fn permission_snapshot(&self) -> PermissionSnapshot {
        PermissionSnapshot {
            role: self.role,
            is_active: self.is_active,
        }
    }

    /// Returns whether the user passes the listing filter and search term.
    #[must_use]
    pub fn matches(&self, filter: &UserFilter, search: Option<&str>) -> bool {
        filter.role.is_none_or(|role| self.role == role)
            && filter
                .clinic_id
                .as_ref()
                .is_none_or(|clinic_id| self.clinic_id.as_ref() == Some(clinic_id))
            && filter
                .is_active
                .is_none_or(|is_active| self.is_active == is_active)
            && search.is_none_or(|term| {
                contains_ignore_case(&self.name, term) || contains_ignore_case(&self.email, term)
            })
    }
}

/// Raw user creation input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role storage value.
    pub role: String,
    /// Active flag; defaults to `true`.
    pub is_active: Option<bool>,
    /// Clinic reference.
    pub clinic_id: Option<String>,
}

/// Validated user ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    name: String,
    email: EmailAddress,
    role: Role,
    is_active: bool,
    clinic_id: Option<RecordId>,
}

impl UserDraft {
    /// Validates raw user input.
    pub fn new(input: NewUser) -> AppResult<Self> {
        let name = required_text("Name", &input.name, 120)?;
        let email = EmailAddress::new(input.email)?;
        if input.role.trim().is_empty() {
            return Err(AppError::Validation("Role is required".to_owned()));
        }
        let role = Role::parse(input.role.trim())?;

        Ok(Self {
            name,
            email,
            role,
            is_active: input.is_active.unwrap_or(true),
            clinic_id: optional_reference(input.clinic_id),
        })
    }

    /// Returns the full name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the canonical email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns the role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the active flag.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the clinic reference.
    #[must_use]
    pub fn clinic_id(&self) -> Option<&RecordId> {
        self.clinic_id.as_ref()
    }

    /// Builds the stored projection for this draft.
    #[must_use]
    pub fn into_record(self, id: RecordId, timestamps: RecordTimestamps) -> User {
        User {
            id,
            name: self.name,
            email: self.email.into(),
            role: self.role,
            is_active: self.is_active,
            clinic_id: self.clinic_id,
            timestamps,
        }
    }
}

/// Equality filters accepted by user listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Restricts to one role.
    pub role: Option<Role>,
    /// Restricts to one clinic.
    pub clinic_id: Option<RecordId>,
    /// Restricts by active flag.
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use petcare_core::RecordId;

    use super::*;

    #[test]
    fn valid_email_is_accepted() {
        let email = EmailAddress::new("USER@Example.COM");
        assert!(email.is_ok());
        assert_eq!(
            email.unwrap_or_else(|_| panic!("test")).as_str(),
            "user@example.com"
        );
    }

    #[test]
    fn email_with_two_at_signs_is_rejected() {
        assert!(EmailAddress::new("a@b@example.com").is_err());
        assert!(EmailAddress::new("@example.com").is_err());
        assert!(EmailAddress::new("user@localhost").is_err());
    }

    #[test]
    fn user_defaults_to_active() {
        let draft = UserDraft::new(NewUser {
            name: "Ana".to_owned(),
            email: "ana@petcare.com".to_owned(),
            role: "VETERINARIO".to_owned(),
            ..NewUser::default()
        })
        .unwrap_or_else(|error| panic!("user should be valid: {error}"));

        assert!(draft.is_active());
        assert_eq!(draft.role(), Role::Veterinarian);
    }

    #[test]
    fn user_requires_known_role() {
        let result = UserDraft::new(NewUser {
            name: "Ana".to_owned(),
            email: "ana@petcare.com".to_owned(),
            role: "SUPERUSER".to_owned(),
            ..NewUser::default()
        });
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn inactive_user_keeps_role_in_snapshot() {
        let draft = UserDraft::new(NewUser {
            name: "Bia".to_owned(),
            email: "bia@petcare.com".to_owned(),
            role: "RECEPCIONISTA".to_owned(),
            is_active: Some(false),
            clinic_id: None,
        })
        .unwrap_or_else(|error| panic!("user should be valid: {error}"));
        let user = draft.into_record(
            RecordId::generate(),
            RecordTimestamps::created_at(Utc::now()),
        );

        assert_eq!(
            user.permission_snapshot(),
            PermissionSnapshot {
                role: Role::Receptionist,
                is_active: false,
            }
        );
        assert!(user.matches(&UserFilter::default(), Some("PETCARE.COM")));
        assert!(!user.matches(
            &UserFilter {
                is_active: Some(true),
                ..UserFilter::default()
            },
            None
        ));
    }
}
