//! Authentication providers.
//!
//! A provider resolves a user by email and checks the second credential. The
//! stateless primitive is [`AuthProvider::authenticate`], which returns a
//! [`Session`] value; [`Authenticator`] binds a provider to a repository and
//! remembers the last successful session.

use std::sync::RwLock;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Session, User, UserRepository};

/// Prefix a credential must carry to pass the OAuth token check.
pub const OAUTH_TOKEN_PREFIX: &str = "oauth_";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthnError {
    #[error("no user registered with this email")]
    UnknownUser,

    #[error("credential rejected")]
    InvalidCredential,
}

/// Strategy used to check a user's credential.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthProvider {
    /// Credential must equal the stored password exactly.
    Password,
    /// Credential must start with [`OAUTH_TOKEN_PREFIX`]. Not real token verification.
    OAuthToken,
}

impl AuthProvider {
    /// Whether `credential` is acceptable for `user` under this strategy.
    pub fn verify(&self, user: &User, credential: &str) -> bool {
        match self {
            AuthProvider::Password => user.password == credential,
            AuthProvider::OAuthToken => credential.starts_with(OAUTH_TOKEN_PREFIX),
        }
    }

    pub fn authenticate<R>(
        &self,
        repository: &R,
        email: &str,
        credential: &str,
    ) -> Result<Session, AuthnError>
    where
        R: UserRepository + ?Sized,
    {
        let user = repository
            .find_by_email(email)
            .ok_or(AuthnError::UnknownUser)?;

        if !self.verify(&user, credential) {
            return Err(AuthnError::InvalidCredential);
        }

        Ok(Session::new(user, *self, Utc::now()))
    }
}

impl core::fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AuthProvider::Password => f.write_str("password"),
            AuthProvider::OAuthToken => f.write_str("oauth_token"),
        }
    }
}

/// A provider bound to a repository, holding at most one current session.
///
/// A failed `authenticate` leaves the previous session in place; use
/// [`Authenticator::logout`] to clear it. Separate instances over the same
/// repository keep independent sessions.
#[derive(Debug)]
pub struct Authenticator<R> {
    provider: AuthProvider,
    repository: R,
    current: RwLock<Option<Session>>,
}

impl<R> Authenticator<R>
where
    R: UserRepository,
{
    pub fn new(provider: AuthProvider, repository: R) -> Self {
        Self {
            provider,
            repository,
            current: RwLock::new(None),
        }
    }

    pub fn password(repository: R) -> Self {
        Self::new(AuthProvider::Password, repository)
    }

    pub fn oauth(repository: R) -> Self {
        Self::new(AuthProvider::OAuthToken, repository)
    }

    pub fn provider(&self) -> AuthProvider {
        self.provider
    }

    /// Authenticate and, on success, replace the current session.
    pub fn authenticate(&self, email: &str, credential: &str) -> bool {
        match self.provider.authenticate(&self.repository, email, credential) {
            Ok(session) => {
                tracing::info!(
                    user_id = %session.user.id,
                    provider = %self.provider,
                    session_id = %session.id,
                    "authenticated"
                );
                if let Ok(mut slot) = self.current.write() {
                    *slot = Some(session);
                    true
                } else {
                    false
                }
            }
            Err(err) => {
                tracing::info!(email, provider = %self.provider, reason = %err, "authentication failed");
                false
            }
        }
    }

    pub fn current_session(&self) -> Option<Session> {
        self.current.read().ok()?.clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.current_session().map(|s| s.user)
    }

    /// Clear the current session, returning it if there was one.
    pub fn logout(&self) -> Option<Session> {
        let mut slot = self.current.write().ok()?;
        let previous = slot.take();
        if let Some(session) = &previous {
            tracing::info!(user_id = %session.user.id, session_id = %session.id, "logged out");
        }
        previous
    }
}
