use thiserror::Error;

#[derive(Error, Debug)]
pub enum HbnbError {
    #[error("** class doesn't exist **")]
    ClassDoesNotExist(String),

    #[error("** no instance found **")]
    NoInstanceFound(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid field {field}: expected {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Attribute '{0}' is reserved and cannot be assigned")]
    ReservedAttribute(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HbnbError>;
