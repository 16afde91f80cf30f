use modelstore::{BaseModel, FileStorage, ModelRegistry, StoreConfig, CLASS_KEY};
use serde_json::Value;
use tempfile::TempDir;

#[test]
fn test_end_to_end_save_and_rehydrate() {
    let temp_dir = TempDir::new().unwrap();
    let store_path = temp_dir.path().join("file.json");

    let config = StoreConfig {
        file_path: store_path.to_str().unwrap().to_string(),
    };

    // One engine for the whole session, injected into every save.
    let mut storage = FileStorage::new(&config.file_path);

    let mut base = BaseModel::new();
    base.set("note", Value::String("first object".to_string()));

    let mut user = BaseModel::with_class("User");
    user.set("email", Value::String("betty@example.com".to_string()));
    user.set("age", Value::from(30));

    base.save(&mut storage).unwrap();
    user.save(&mut storage).unwrap();

    assert!(store_path.exists());
    assert_eq!(storage.all().len(), 2);

    // Fresh process: reopen the store and rehydrate everything.
    let mut reopened = FileStorage::new(&config.file_path);
    reopened.reload().unwrap();

    let mut registry = ModelRegistry::new();
    registry.register("User", |map| BaseModel::from_dict("User", map));

    let mut models = reopened.rehydrate_all(&registry).unwrap();
    models.sort_by(|a, b| a.class_name().cmp(b.class_name()));
    assert_eq!(models.len(), 2);

    let restored_base = &models[0];
    assert_eq!(restored_base.id(), base.id());
    assert_eq!(restored_base.created_at(), base.created_at());
    assert_eq!(restored_base.updated_at(), base.updated_at());
    assert_eq!(restored_base.get("note"), base.get("note"));

    let restored_user = &models[1];
    assert_eq!(restored_user.class_name(), "User");
    assert_eq!(restored_user.to_dict(), user.to_dict());
}

#[test]
fn test_persisted_document_shape() {
    let temp_dir = TempDir::new().unwrap();
    let store_path = temp_dir.path().join("file.json");

    let mut storage = FileStorage::new(&store_path);
    let mut model = BaseModel::with_class("Review");
    model.set("text", Value::String("great stay".to_string()));
    model.save(&mut storage).unwrap();

    let raw = std::fs::read_to_string(&store_path).unwrap();
    let document: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let key = format!("Review.{}", model.id());
    let entry = &document[&key];
    assert_eq!(entry[CLASS_KEY], Value::String("Review".to_string()));
    assert_eq!(entry["id"], Value::String(model.id().to_string()));
    assert_eq!(entry["text"], Value::String("great stay".to_string()));
}

#[test]
fn test_save_against_unwritable_destination() {
    let temp_dir = TempDir::new().unwrap();
    // A directory at the store path makes the write fail.
    let store_path = temp_dir.path().join("file.json");
    std::fs::create_dir(&store_path).unwrap();

    let mut storage = FileStorage::new(&store_path);
    let mut model = BaseModel::new();
    let before = model.updated_at();

    let result = model.save(&mut storage);
    assert!(result.is_err());
    // The timestamp mutation is not rolled back.
    assert!(model.updated_at() >= before);
}
