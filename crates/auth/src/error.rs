use serde::Serialize;
use thiserror::Error;

use keyward_core::{DomainError, UserId};

use crate::PasswordRule;

/// Broad class of an access-control failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Session missing or role insufficient. Re-authenticate or escalate.
    Authorization,
    /// Business rule violated. Retry with corrected input.
    Validation,
    /// Target record does not exist.
    NotFound,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("email '{0}' is already registered")]
    DuplicateEmail(String),

    #[error("password does not meet requirements: {}", join_rules(.0))]
    WeakPassword(Vec<PasswordRule>),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("no authenticated user")]
    Unauthenticated,

    #[error("only administrators may {operation}")]
    Unauthorized { operation: &'static str },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("user '{0}' not found")]
    NotFound(UserId),
}

impl AccessError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccessError::Unauthenticated | AccessError::Unauthorized { .. } => {
                ErrorKind::Authorization
            }
            AccessError::Validation(_) => ErrorKind::Validation,
            AccessError::NotFound(_) => ErrorKind::NotFound,
        }
    }
}

impl From<AccessError> for DomainError {
    fn from(value: AccessError) -> Self {
        match &value {
            AccessError::Unauthenticated | AccessError::Unauthorized { .. } => {
                DomainError::unauthorized(value.to_string())
            }
            AccessError::Validation(ValidationError::DuplicateEmail(_)) => {
                DomainError::conflict(value.to_string())
            }
            AccessError::Validation(ValidationError::WeakPassword(_)) => {
                DomainError::validation(value.to_string())
            }
            AccessError::NotFound(id) => DomainError::not_found(format!("user {id}")),
        }
    }
}

fn join_rules(rules: &[PasswordRule]) -> String {
    rules
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
