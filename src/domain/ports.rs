use crate::domain::model::BaseModel;
use crate::utils::error::Result;

/// Storage collaborator contract. Engines keep an in-memory index keyed by
/// `Class.id` and persist it on demand; models receive one by injection
/// instead of constructing their own.
pub trait StorageEngine {
    /// Adds or replaces the object in the in-memory index. Idempotent.
    fn register(&mut self, object: &BaseModel) -> Result<()>;

    /// Persists the entire index to durable storage.
    fn flush(&mut self) -> Result<()>;
}
