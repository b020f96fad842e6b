use serde::{Deserialize, Serialize};

use crate::RecordId;

/// Caller identity forwarded by the external identity provider.
///
/// Carries nothing but the identity id; role and active status are resolved
/// from storage on every permission check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    subject: RecordId,
}

impl UserIdentity {
    /// Creates a user identity from the identity provider subject.
    #[must_use]
    pub fn new(subject: RecordId) -> Self {
        Self { subject }
    }

    /// Returns the stable subject claim from the identity provider.
    #[must_use]
    pub fn subject(&self) -> &RecordId {
        &self.subject
    }
}
