use serde::Serialize;

use keyward_core::UserId;

use crate::{Role, Session, resources};

/// Decide whether the session's user may access `resource`.
///
/// No session means no access. Never fails.
pub fn can_access(session: Option<&Session>, resource: &str) -> bool {
    session.is_some_and(|s| s.role().can_access(resource))
}

// ─────────────────────────────────────────────────────────────────────────────
// Access Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an access decision.
#[derive(Debug, Clone, Serialize)]
pub struct AccessExplanation {
    /// The resource that was being checked.
    pub resource: String,

    /// Whether access was granted.
    pub granted: bool,

    /// Human-readable reason for the decision.
    pub reason: String,

    /// The authenticated user, if any.
    pub subject: Option<SubjectState>,

    /// If denied, this explains what was missing.
    pub denial_reason: Option<DenialReason>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectState {
    pub user_id: UserId,
    pub role: Role,
    pub access_level: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct DenialReason {
    pub kind: DenialKind,
    pub message: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    NoSession,
    RoleDenied,
}

/// Explain why an access decision was made (or would be made).
///
/// `granted` always agrees with [`can_access`] for the same inputs.
pub fn explain_access(session: Option<&Session>, resource: &str) -> AccessExplanation {
    let Some(session) = session else {
        return AccessExplanation {
            resource: resource.to_string(),
            granted: false,
            reason: "No authenticated session".to_string(),
            subject: None,
            denial_reason: Some(DenialReason {
                kind: DenialKind::NoSession,
                message: "Access checks require an authenticated user".to_string(),
                suggestions: vec!["Authenticate before requesting access".to_string()],
            }),
        };
    };

    let role = session.role();
    let subject = SubjectState {
        user_id: session.user.id.clone(),
        role,
        access_level: role.access_level(),
    };

    if role.can_access(resource) {
        return AccessExplanation {
            resource: resource.to_string(),
            granted: true,
            reason: format!("Role '{}' permits '{}'", role, resource),
            subject: Some(subject),
            denial_reason: None,
        };
    }

    let granting: Vec<String> = Role::ALL
        .iter()
        .filter(|r| r.can_access(resource))
        .map(|r| r.name().to_string())
        .collect();

    let mut suggestions = vec![format!(
        "Ask an administrator to assign a role that permits '{}'",
        resource
    )];
    if !granting.is_empty() {
        suggestions.push(format!("Roles that permit this resource: {:?}", granting));
    }

    AccessExplanation {
        resource: resource.to_string(),
        granted: false,
        reason: format!("Role '{}' does not permit '{}'", role, resource),
        subject: Some(subject),
        denial_reason: Some(DenialReason {
            kind: DenialKind::RoleDenied,
            message: format!("Resource '{}' is outside role '{}'", resource, role),
            suggestions,
        }),
    }
}

/// Role definition with its decisions over the well-known resources (for audit/display).
#[derive(Debug, Clone, Serialize)]
pub struct RoleDefinition {
    pub role: Role,
    pub name: &'static str,
    pub access_level: u8,
    pub allowed: Vec<&'static str>,
    pub denied: Vec<&'static str>,
}

/// Catalog of every role, most privileged first.
pub fn role_catalog() -> Vec<RoleDefinition> {
    Role::ALL
        .iter()
        .map(|&role| {
            let (allowed, denied): (Vec<&'static str>, Vec<&'static str>) =
                resources::ALL.iter().copied().partition(|r| role.can_access(r));
            RoleDefinition {
                role,
                name: role.name(),
                access_level: role.access_level(),
                allowed,
                denied,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{AuthProvider, User};

    fn session_for(role: Role) -> Session {
        let user = User::new("7", "Test", "t@example.com", "Secret123", role);
        Session::new(user, AuthProvider::Password, Utc::now())
    }

    #[test]
    fn no_session_is_denied_with_reason() {
        assert!(!can_access(None, resources::PUBLIC_CONTENT));

        let explanation = explain_access(None, resources::PUBLIC_CONTENT);
        assert!(!explanation.granted);
        assert_eq!(explanation.denial_reason.unwrap().kind, DenialKind::NoSession);
    }

    #[test]
    fn role_denial_lists_granting_roles() {
        let session = session_for(Role::Guest);
        let explanation = explain_access(Some(&session), resources::ADMIN_PANEL);

        assert!(!explanation.granted);
        assert_eq!(explanation.subject.as_ref().unwrap().role, Role::Guest);
        let denial = explanation.denial_reason.unwrap();
        assert_eq!(denial.kind, DenialKind::RoleDenied);
        assert!(denial.suggestions.iter().any(|s| s.contains("Administrator")));
        assert!(denial.suggestions.iter().any(|s| s.contains("Moderator")));
    }

    #[test]
    fn explanation_agrees_with_decision() {
        for role in Role::ALL {
            let session = session_for(role);
            for resource in resources::ALL {
                assert_eq!(
                    explain_access(Some(&session), resource).granted,
                    can_access(Some(&session), resource),
                );
            }
        }
    }

    #[test]
    fn catalog_covers_every_role() {
        let catalog = role_catalog();
        assert_eq!(catalog.len(), 4);

        let guest = catalog.iter().find(|d| d.role == Role::Guest).unwrap();
        assert_eq!(guest.allowed, vec![resources::PUBLIC_CONTENT, resources::LOGIN]);

        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(json[0]["name"], "Administrator");
    }
}
