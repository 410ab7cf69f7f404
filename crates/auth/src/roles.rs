use core::str::FromStr;

use serde::{Deserialize, Serialize};

use keyward_core::{DomainError, ValueObject};

use crate::resources;

/// Role assigned to a user.
///
/// The set of roles is closed: each variant carries a fixed access rule over
/// resource names. Roles are stateless, so one value can be shared by any
/// number of users.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access to every resource.
    Administrator,
    /// Manages content, but not users or system configuration.
    Moderator,
    /// Everything except the admin panel and user management.
    RegularUser,
    /// Public content and the login page only.
    Guest,
}

impl Role {
    /// All roles, most privileged first.
    pub const ALL: [Role; 4] = [
        Role::Administrator,
        Role::Moderator,
        Role::RegularUser,
        Role::Guest,
    ];

    /// Display label.
    pub fn name(&self) -> &'static str {
        match self {
            Role::Administrator => "Administrator",
            Role::Moderator => "Moderator",
            Role::RegularUser => "User",
            Role::Guest => "Guest",
        }
    }

    /// Numeric access level (1 = low, 3 = high). Informational only.
    pub fn access_level(&self) -> u8 {
        match self {
            Role::Administrator => 3,
            Role::Moderator | Role::RegularUser => 2,
            Role::Guest => 1,
        }
    }

    pub fn is_administrator(&self) -> bool {
        matches!(self, Role::Administrator)
    }

    /// Decide whether this role may access `resource`.
    ///
    /// Total over all strings; unknown resources follow the variant's default
    /// (allow for blacklist roles, deny for the guest whitelist).
    pub fn can_access(&self, resource: &str) -> bool {
        match self {
            Role::Administrator => true,
            Role::Moderator => !matches!(
                resource,
                resources::USER_MANAGEMENT | resources::SYSTEM_CONFIG
            ),
            Role::RegularUser => !matches!(
                resource,
                resources::ADMIN_PANEL | resources::USER_MANAGEMENT
            ),
            Role::Guest => matches!(resource, resources::PUBLIC_CONTENT | resources::LOGIN),
        }
    }
}

impl ValueObject for Role {}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "administrator" | "admin" => Ok(Role::Administrator),
            "moderator" | "mod" => Ok(Role::Moderator),
            "user" | "regular_user" | "regularuser" => Ok(Role::RegularUser),
            "guest" => Ok(Role::Guest),
            other => Err(DomainError::validation(format!("unknown role '{other}'"))),
        }
    }
}
