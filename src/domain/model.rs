use std::collections::BTreeMap;
use std::fmt;

use chrono::{Local, NaiveDateTime, Timelike};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::ports::StorageEngine;
use crate::utils::error::{ModelError, Result};

/// Discriminator key carried in serialized mappings. Consumed during
/// rehydration dispatch, never stored as an attribute.
pub const CLASS_KEY: &str = "__class__";

/// ISO-8601 with microsecond precision, local time, no offset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Base persistence object: a generated identity, two timestamps, and an
/// ordered side-mapping for whatever extra attributes a concrete model type
/// attaches. Serializes to a plain string-keyed mapping and back.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseModel {
    class: String,
    id: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    attributes: BTreeMap<String, Value>,
}

impl BaseModel {
    pub fn new() -> Self {
        Self::with_class("BaseModel")
    }

    /// Fresh construction under a concrete type tag. Both timestamps come
    /// from a single clock reading, so `created_at == updated_at` exactly.
    pub fn with_class(class: impl Into<String>) -> Self {
        let now = now_micros();
        Self {
            class: class.into(),
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            attributes: BTreeMap::new(),
        }
    }

    /// Rehydrates an instance from a serialized mapping. Fixed fields are
    /// overwritten from the mapping when present (timestamps parsed from
    /// ISO-8601 text), the `__class__` key is skipped, and every other key
    /// lands in the attribute side-mapping unchanged.
    pub fn from_dict(class: impl Into<String>, map: &Map<String, Value>) -> Result<Self> {
        let mut model = Self::with_class(class);
        for (key, value) in map {
            match key.as_str() {
                CLASS_KEY => {}
                "id" => {
                    model.id = value
                        .as_str()
                        .map(str::to_string)
                        .ok_or_else(|| ModelError::FieldTypeError {
                            field: "id".to_string(),
                            message: "expected a string".to_string(),
                        })?;
                }
                "created_at" => model.created_at = parse_timestamp("created_at", value)?,
                "updated_at" => model.updated_at = parse_timestamp("updated_at", value)?,
                _ => {
                    model.attributes.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(model)
    }

    pub fn class_name(&self) -> &str {
        &self.class
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.attributes.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Composite index key used by storage engines, `Class.id`.
    pub fn storage_key(&self) -> String {
        format!("{}.{}", self.class, self.id)
    }

    /// Serializes the instance into a fresh mapping: every attribute, the
    /// fixed fields with timestamps rendered as ISO-8601 text, plus the
    /// `__class__` tag. The instance itself is left untouched.
    pub fn to_dict(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".to_string(), Value::String(self.id.clone()));
        map.insert(
            "created_at".to_string(),
            Value::String(self.created_at.format(TIMESTAMP_FORMAT).to_string()),
        );
        map.insert(
            "updated_at".to_string(),
            Value::String(self.updated_at.format(TIMESTAMP_FORMAT).to_string()),
        );
        for (key, value) in &self.attributes {
            map.insert(key.clone(), value.clone());
        }
        map.insert(CLASS_KEY.to_string(), Value::String(self.class.clone()));
        map
    }

    /// Stamps `updated_at`, registers the instance with the engine, then
    /// flushes the engine to durable storage. Engine failures propagate and
    /// the timestamp mutation is not rolled back.
    pub fn save<S: StorageEngine>(&mut self, engine: &mut S) -> Result<()> {
        self.updated_at = now_micros();
        engine.register(self)?;
        engine.flush()
    }
}

impl Default for BaseModel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BaseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] ({}) {}",
            self.class,
            self.id,
            Value::Object(self.to_dict())
        )
    }
}

// Current local time truncated to microseconds, so a round trip through
// the ISO text form is lossless.
fn now_micros() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(now.nanosecond() / 1000 * 1000).unwrap_or(now)
}

fn parse_timestamp(field: &str, value: &Value) -> Result<NaiveDateTime> {
    let text = value.as_str().ok_or_else(|| ModelError::TimestampError {
        field: field.to_string(),
        message: "expected ISO-8601 text".to_string(),
    })?;
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).map_err(|e| {
        ModelError::TimestampError {
            field: field.to_string(),
            message: e.to_string(),
        }
    })
}
