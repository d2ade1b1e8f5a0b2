use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThemingError {
    #[error("Theme document is not valid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("Theme document must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("Theme is missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("Theme field '{field}' is invalid: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Theme with ID '{theme_id}' not found")]
    ThemeNotFound { theme_id: String },

    #[error("Failed to serialize theme '{theme_id}': {source}")]
    SerializationError {
        theme_id: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ThemingError {
    /// The offending field for import validation errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            ThemingError::MissingField { field } => Some(field),
            ThemingError::InvalidField { field, .. } => Some(field),
            _ => None,
        }
    }
}
