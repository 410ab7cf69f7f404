//! `keyward-auth` — authentication and role-based access control.
//!
//! Pure and synchronous: no IO beyond an injected repository, no global state.
//! Callers authenticate through an [`AuthProvider`] (or an [`Authenticator`]
//! holding the current session) and pass the resulting [`Session`] to every
//! [`AccessControlService`] operation.

pub mod authn;
pub mod authorize;
pub mod config;
pub mod error;
pub mod password;
pub mod repository;
pub mod resources;
pub mod roles;
pub mod service;
pub mod session;
pub mod user;

pub use authn::{AuthProvider, Authenticator, AuthnError, OAUTH_TOKEN_PREFIX};
pub use authorize::{AccessExplanation, DenialKind, explain_access, role_catalog};
pub use config::{MutationMode, ServiceConfig};
pub use error::{AccessError, ErrorKind, ValidationError};
pub use password::{PasswordRule, PasswordValidator, StrongPasswordPolicy};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use roles::Role;
pub use service::AccessControlService;
pub use session::{Session, SessionId};
pub use user::User;

pub use keyward_core::UserId;
