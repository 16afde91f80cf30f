pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::StoreConfig;
pub use core::file_storage::FileStorage;
pub use domain::model::{BaseModel, CLASS_KEY, TIMESTAMP_FORMAT};
pub use domain::ports::StorageEngine;
pub use domain::registry::ModelRegistry;
pub use utils::error::{ModelError, Result};
pub use utils::logger::init_logger;
