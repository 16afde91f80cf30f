use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::domain::model::{BaseModel, CLASS_KEY};
use crate::utils::error::{ModelError, Result};

/// Rehydration constructor for one concrete model type.
pub type Rehydrator = fn(&Map<String, Value>) -> Result<BaseModel>;

/// Maps `__class__` tags to rehydration constructors so serialized mappings
/// can be dispatched back to the right model type. `BaseModel` itself is
/// pre-registered.
pub struct ModelRegistry {
    constructors: HashMap<String, Rehydrator>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            constructors: HashMap::new(),
        };
        registry.register("BaseModel", |map| BaseModel::from_dict("BaseModel", map));
        registry
    }

    pub fn register(&mut self, class: &str, rehydrator: Rehydrator) {
        self.constructors.insert(class.to_string(), rehydrator);
    }

    /// Reads the `__class__` tag out of the mapping and dispatches to the
    /// registered constructor for that type.
    pub fn rehydrate(&self, map: &Map<String, Value>) -> Result<BaseModel> {
        let class = map
            .get(CLASS_KEY)
            .and_then(Value::as_str)
            .ok_or(ModelError::MissingClassError)?;
        let rehydrator =
            self.constructors
                .get(class)
                .ok_or_else(|| ModelError::UnknownClassError {
                    class: class.to_string(),
                })?;
        rehydrator(map)
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rehydrates_base_model_by_tag() {
        let registry = ModelRegistry::new();
        let dict = BaseModel::new().to_dict();

        let model = registry.rehydrate(&dict).unwrap();
        assert_eq!(model.class_name(), "BaseModel");
        assert_eq!(model.to_dict(), dict);
    }

    #[test]
    fn test_dispatches_to_registered_type() {
        let mut registry = ModelRegistry::new();
        registry.register("User", |map| BaseModel::from_dict("User", map));

        let dict = BaseModel::with_class("User").to_dict();
        let model = registry.rehydrate(&dict).unwrap();
        assert_eq!(model.class_name(), "User");
    }

    #[test]
    fn test_missing_tag_is_an_error() {
        let registry = ModelRegistry::new();
        let map = Map::new();

        assert!(matches!(
            registry.rehydrate(&map),
            Err(ModelError::MissingClassError)
        ));
    }

    #[test]
    fn test_unknown_tag_is_an_error() {
        let registry = ModelRegistry::new();
        let mut map = Map::new();
        map.insert(CLASS_KEY.to_string(), Value::String("Ghost".to_string()));

        assert!(matches!(
            registry.rehydrate(&map),
            Err(ModelError::UnknownClassError { ref class }) if class == "Ghost"
        ));
    }
}
