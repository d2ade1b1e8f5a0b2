//! Error module for the Sabq domain layer.

use thiserror::Error;

use sabq_core::CoreError;

use crate::settings::SettingsError;
use crate::theming::ThemingError;

/// A general Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// The primary error type for the domain layer.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Theming(#[from] ThemingError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_convert_transparently() {
        let err: DomainError = ThemingError::ThemeNotFound { theme_id: "x".to_string() }.into();
        assert_eq!(err.to_string(), "Theme with ID 'x' not found");

        let err: DomainError = CoreError::InvalidInput("bad backend".to_string()).into();
        assert!(matches!(err, DomainError::Core(_)));
        assert_eq!(err.to_string(), "Invalid Input: bad backend");
    }
}
