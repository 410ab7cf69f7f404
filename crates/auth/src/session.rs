use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AuthProvider, Role, User};

/// Identity of one successful authentication.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for SessionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Authenticated session.
///
/// A value produced by [`AuthProvider::authenticate`] and handed by the caller
/// to every access-control operation. It holds a snapshot of the user taken at
/// authentication time: a role change takes effect on the next authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub id: SessionId,
    pub user: User,
    pub provider: AuthProvider,
    pub issued_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user: User, provider: AuthProvider, issued_at: DateTime<Utc>) -> Self {
        Self {
            id: SessionId::new(),
            user,
            provider,
            issued_at,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn provider(&self) -> AuthProvider {
        self.provider
    }

    pub fn is_administrator(&self) -> bool {
        self.user.role.is_administrator()
    }
}
