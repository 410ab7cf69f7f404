//! User record for identity management.
//!
//! A user carries its credentials and exactly one [`Role`]. The record is plain
//! data; gating on who may change it lives in the access-control service.

use serde::Serialize;

use keyward_core::{Entity, UserId};

use crate::Role;

// ─────────────────────────────────────────────────────────────────────────────
// User
// ─────────────────────────────────────────────────────────────────────────────

/// User record.
///
/// # Invariants
/// - Every user has exactly one role at all times.
/// - `email` is the lookup key; uniqueness is enforced by the service, not here.
/// - `password` is stored as given (no hashing) and never serialized or printed.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
}

impl User {
    pub fn new(
        id: impl Into<UserId>,
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn update_profile(&mut self, name: impl Into<String>, email: impl Into<String>) {
        self.name = name.into();
        self.email = email.into();
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl core::fmt::Debug for User {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User::new("1", "Alice", "alice@example.com", "Secret123", Role::RegularUser)
    }

    #[test]
    fn role_can_be_reassigned() {
        let mut user = alice();
        user.set_role(Role::Moderator);
        assert_eq!(user.role(), Role::Moderator);
        assert_eq!(user.id(), &UserId::from("1"));
    }

    #[test]
    fn debug_output_hides_password() {
        let rendered = format!("{:?}", alice());
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("Secret123"));
    }

    #[test]
    fn serialization_skips_password() {
        let json = serde_json::to_value(alice()).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "regular_user");
        assert_eq!(json["email"], "alice@example.com");
    }

    #[test]
    fn profile_update_replaces_name_and_email() {
        let mut user = alice();
        user.update_profile("Alice B.", "alice.b@example.com");
        assert_eq!(user.name, "Alice B.");
        assert_eq!(user.email, "alice.b@example.com");
    }
}
