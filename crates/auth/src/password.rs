//! Password strength policy.

use serde::Serialize;

/// Default minimum password length (in characters).
pub const DEFAULT_MIN_LENGTH: usize = 8;

/// Predicate deciding whether a candidate password is strong enough.
///
/// Implementations must be pure: an absent or weak password yields `false`,
/// never an error or panic.
pub trait PasswordValidator: Send + Sync {
    fn validate(&self, password: Option<&str>) -> bool;

    fn is_valid(&self, password: &str) -> bool {
        self.validate(Some(password))
    }

    /// Rules broken by `password`; empty when it is valid.
    ///
    /// The default only knows "valid or not"; policies with named rules override it.
    fn violations(&self, password: &str) -> Vec<PasswordRule> {
        if self.is_valid(password) {
            Vec::new()
        } else {
            vec![PasswordRule::Policy]
        }
    }
}

/// A single password rule that a candidate failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordRule {
    Empty,
    TooShort { min: usize },
    MissingUppercase,
    MissingDigit,
    /// Rejected by a validator that does not name its rules.
    Policy,
}

impl core::fmt::Display for PasswordRule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PasswordRule::Empty => f.write_str("password is empty"),
            PasswordRule::TooShort { min } => write!(f, "password shorter than {min} characters"),
            PasswordRule::MissingUppercase => f.write_str("password has no uppercase letter"),
            PasswordRule::MissingDigit => f.write_str("password has no digit"),
            PasswordRule::Policy => f.write_str("password rejected by policy"),
        }
    }
}

/// Non-empty, at least `min_length` characters, one ASCII uppercase letter and
/// one ASCII digit. No special-character requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrongPasswordPolicy {
    min_length: usize,
}

impl StrongPasswordPolicy {
    pub fn new() -> Self {
        Self::with_min_length(DEFAULT_MIN_LENGTH)
    }

    pub fn with_min_length(min_length: usize) -> Self {
        Self { min_length }
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }
}

impl Default for StrongPasswordPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordValidator for StrongPasswordPolicy {
    fn validate(&self, password: Option<&str>) -> bool {
        password.is_some_and(|p| self.violations(p).is_empty())
    }

    fn violations(&self, password: &str) -> Vec<PasswordRule> {
        let mut broken = Vec::new();
        if password.is_empty() {
            broken.push(PasswordRule::Empty);
        }
        if password.chars().count() < self.min_length {
            broken.push(PasswordRule::TooShort { min: self.min_length });
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            broken.push(PasswordRule::MissingUppercase);
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            broken.push(PasswordRule::MissingDigit);
        }
        broken
    }
}
