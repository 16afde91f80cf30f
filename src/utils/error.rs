use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid timestamp in field `{field}`: {message}")]
    TimestampError { field: String, message: String },

    #[error("Field `{field}` has an unexpected type: {message}")]
    FieldTypeError { field: String, message: String },

    #[error("Rehydration mapping carries no `__class__` tag")]
    MissingClassError,

    #[error("No rehydrator registered for class `{class}`")]
    UnknownClassError { class: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
