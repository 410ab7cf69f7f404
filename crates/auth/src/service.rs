//! Access-control service: admin, self-service and read operations.
//!
//! Every operation takes the caller's session explicitly. Gates run before any
//! business rule: admin operations need an administrator session, self-service
//! operations need any session, reads never fail.

use tracing::Span;

use keyward_core::UserId;

use crate::authorize::{self, AccessExplanation};
use crate::config::{MutationMode, ServiceConfig};
use crate::error::{AccessError, ValidationError};
use crate::password::{PasswordValidator, StrongPasswordPolicy};
use crate::{Role, Session, User, UserRepository};

pub struct AccessControlService<R, V = StrongPasswordPolicy> {
    repository: R,
    validator: V,
    config: ServiceConfig,
    span: Span,
}

impl<R> AccessControlService<R, StrongPasswordPolicy>
where
    R: UserRepository,
{
    /// Build with the strong password policy sized by `config.min_password_length`.
    pub fn from_config(repository: R, config: ServiceConfig, span: Span) -> Self {
        let validator = StrongPasswordPolicy::with_min_length(config.min_password_length);
        Self::new(repository, validator, config, span)
    }
}

impl<R, V> AccessControlService<R, V>
where
    R: UserRepository,
    V: PasswordValidator,
{
    /// `span` is the logging sink: every event the service emits is recorded inside it.
    pub fn new(repository: R, validator: V, config: ServiceConfig, span: Span) -> Self {
        Self {
            repository,
            validator,
            config,
            span,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Admin operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a new user. Email uniqueness is checked before password strength.
    pub fn create_user(&self, session: Option<&Session>, user: User) -> Result<(), AccessError> {
        let _entered = self.span.enter();
        let actor = self.require_admin(session, "create users")?;

        if self.repository.exists_by_email(&user.email) {
            tracing::info!(actor = %actor.id, email = %user.email, "create_user rejected: email taken");
            return Err(ValidationError::DuplicateEmail(user.email).into());
        }
        self.check_password(&user.password)?;

        tracing::info!(actor = %actor.id, user_id = %user.id, role = %user.role, "user created");
        self.repository.save(user);
        Ok(())
    }

    pub fn delete_user(&self, session: Option<&Session>, id: &UserId) -> Result<(), AccessError> {
        let _entered = self.span.enter();
        let actor = self.require_admin(session, "delete users")?;

        match self.config.mutation_mode {
            MutationMode::Apply => {
                self.repository
                    .remove(id)
                    .ok_or_else(|| AccessError::NotFound(id.clone()))?;
                tracing::info!(actor = %actor.id, user_id = %id, "user deleted");
            }
            MutationMode::AuditOnly => {
                tracing::info!(actor = %actor.id, user_id = %id, "user deletion recorded (audit only)");
            }
        }
        Ok(())
    }

    pub fn change_role(
        &self,
        session: Option<&Session>,
        id: &UserId,
        role: Role,
    ) -> Result<(), AccessError> {
        let _entered = self.span.enter();
        let actor = self.require_admin(session, "change roles")?;

        match self.config.mutation_mode {
            MutationMode::Apply => {
                let mut target = self
                    .repository
                    .find_by_id(id)
                    .ok_or_else(|| AccessError::NotFound(id.clone()))?;
                let previous = target.role;
                target.set_role(role);
                self.repository.save(target);
                tracing::info!(actor = %actor.id, user_id = %id, %previous, %role, "role changed");
            }
            MutationMode::AuditOnly => {
                tracing::info!(actor = %actor.id, user_id = %id, %role, "role change recorded (audit only)");
            }
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Self-service operations
    // ─────────────────────────────────────────────────────────────────────────

    pub fn change_password(
        &self,
        session: Option<&Session>,
        new_password: &str,
    ) -> Result<(), AccessError> {
        let _entered = self.span.enter();
        let actor = Self::require_session(session)?;
        self.check_password(new_password)?;

        match self.config.mutation_mode {
            MutationMode::Apply => {
                let mut me = self.stored_self(actor)?;
                me.set_password(new_password);
                self.repository.save(me);
                tracing::info!(user_id = %actor.id, "password changed");
            }
            MutationMode::AuditOnly => {
                tracing::info!(user_id = %actor.id, "password change recorded (audit only)");
            }
        }
        Ok(())
    }

    /// Update the caller's own name and email. The new email must not belong
    /// to another user.
    pub fn update_profile(
        &self,
        session: Option<&Session>,
        name: &str,
        email: &str,
    ) -> Result<(), AccessError> {
        let _entered = self.span.enter();
        let actor = Self::require_session(session)?;

        match self.config.mutation_mode {
            MutationMode::Apply => {
                if let Some(owner) = self.repository.find_by_email(email) {
                    if owner.id != actor.id {
                        return Err(ValidationError::DuplicateEmail(email.to_string()).into());
                    }
                }
                let mut me = self.stored_self(actor)?;
                me.update_profile(name, email);
                self.repository.save(me);
                tracing::info!(user_id = %actor.id, "profile updated");
            }
            MutationMode::AuditOnly => {
                tracing::info!(user_id = %actor.id, "profile update recorded (audit only)");
            }
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read operations
    // ─────────────────────────────────────────────────────────────────────────

    /// The caller's profile, or `None` without a session.
    ///
    /// Prefers the stored record so profile and role changes are visible; falls
    /// back to the session snapshot if the record is gone.
    pub fn view_profile(&self, session: Option<&Session>) -> Option<User> {
        let session = session?;
        Some(
            self.repository
                .find_by_id(&session.user.id)
                .unwrap_or_else(|| session.user.clone()),
        )
    }

    pub fn can_access(&self, session: Option<&Session>, resource: &str) -> bool {
        let _entered = self.span.enter();
        let granted = authorize::can_access(session, resource);
        tracing::debug!(
            user_id = session.map(|s| s.user.id.as_str()),
            resource,
            granted,
            "access check"
        );
        granted
    }

    pub fn explain_access(&self, session: Option<&Session>, resource: &str) -> AccessExplanation {
        authorize::explain_access(session, resource)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Gates
    // ─────────────────────────────────────────────────────────────────────────

    fn require_admin<'s>(
        &self,
        session: Option<&'s Session>,
        operation: &'static str,
    ) -> Result<&'s User, AccessError> {
        match session {
            Some(s) if s.is_administrator() => Ok(&s.user),
            _ => {
                tracing::warn!(
                    user_id = session.map(|s| s.user.id.as_str()),
                    operation,
                    "admin gate denied"
                );
                Err(AccessError::Unauthorized { operation })
            }
        }
    }

    fn require_session(session: Option<&Session>) -> Result<&User, AccessError> {
        match session {
            Some(s) => Ok(&s.user),
            None => {
                tracing::warn!("authentication gate denied");
                Err(AccessError::Unauthenticated)
            }
        }
    }

    fn check_password(&self, password: &str) -> Result<(), AccessError> {
        if self.validator.is_valid(password) {
            return Ok(());
        }
        Err(ValidationError::WeakPassword(self.validator.violations(password)).into())
    }

    fn stored_self(&self, actor: &User) -> Result<User, AccessError> {
        self.repository
            .find_by_id(&actor.id)
            .ok_or_else(|| AccessError::NotFound(actor.id.clone()))
    }
}
