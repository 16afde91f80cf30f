pub mod file_storage;

pub use crate::domain::model::BaseModel;
pub use crate::domain::ports::StorageEngine;
pub use crate::domain::registry::ModelRegistry;
pub use crate::utils::error::Result;
