use thiserror::Error;

/// Token accepted when no other is configured.
pub const DEFAULT_TOKEN: &str = "valid-token";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is empty")]
    Empty,

    #[error("token is not recognised")]
    Unrecognised,
}

/// Decides whether a presented credential grants access.
///
/// Implementations receive the raw `Authorization` header value. A real
/// verifier (signature check, introspection) slots in behind this trait
/// without touching the HTTP layer.
pub trait TokenValidator: Send + Sync {
    fn validate(&self, token: &str) -> Result<(), TokenError>;
}

/// Accepts exactly one configured token, compared verbatim.
#[derive(Debug, Clone)]
pub struct StaticTokenValidator {
    expected: String,
}

impl StaticTokenValidator {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }
}

impl Default for StaticTokenValidator {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN)
    }
}

impl TokenValidator for StaticTokenValidator {
    fn validate(&self, token: &str) -> Result<(), TokenError> {
        if token.is_empty() {
            return Err(TokenError::Empty);
        }
        if token != self.expected {
            return Err(TokenError::Unrecognised);
        }
        Ok(())
    }
}
