//! Access-control service configuration.

use core::str::FromStr;

use keyward_core::DomainError;

use crate::password::DEFAULT_MIN_LENGTH;

pub const MUTATION_MODE_ENV: &str = "KEYWARD_MUTATION_MODE";
pub const MIN_PASSWORD_LENGTH_ENV: &str = "KEYWARD_MIN_PASSWORD_LENGTH";

/// What the admin and self-service operations do once their gate passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationMode {
    /// Write to the repository; unknown target ids fail with `NotFound`.
    #[default]
    Apply,
    /// Record the action in the log and leave the repository untouched.
    /// `create_user` still saves.
    AuditOnly,
}

impl FromStr for MutationMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "apply" => Ok(MutationMode::Apply),
            "audit_only" | "audit-only" | "audit" => Ok(MutationMode::AuditOnly),
            other => Err(DomainError::validation(format!("unknown mutation mode '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub mutation_mode: MutationMode,
    pub min_password_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            mutation_mode: MutationMode::Apply,
            min_password_length: DEFAULT_MIN_LENGTH,
        }
    }
}

impl ServiceConfig {
    /// Load from `KEYWARD_MUTATION_MODE` / `KEYWARD_MIN_PASSWORD_LENGTH`.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let mutation_mode = match lookup(MUTATION_MODE_ENV) {
            Some(raw) => raw.parse::<MutationMode>().unwrap_or_else(|err| {
                tracing::warn!(%err, "{} invalid; using default", MUTATION_MODE_ENV);
                defaults.mutation_mode
            }),
            None => defaults.mutation_mode,
        };

        let min_password_length = match lookup(MIN_PASSWORD_LENGTH_ENV) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    tracing::warn!(value = %raw, "{} invalid; using default", MIN_PASSWORD_LENGTH_ENV);
                    defaults.min_password_length
                }
            },
            None => defaults.min_password_length,
        };

        Self {
            mutation_mode,
            min_password_length,
        }
    }
}
