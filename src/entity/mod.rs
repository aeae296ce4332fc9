mod base_model;
mod repr;
pub mod timestamp;
mod user;

pub use base_model::BaseModel;
pub use timestamp::TIME_FORMAT;
pub use user::User;

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{HbnbError, Result};
use crate::storage::{storage_key, Storage};

/// Serialized form of an entity: attribute name to value, in insertion order.
pub type Record = serde_json::Map<String, Value>;

/// Discriminator key carrying the class name in the serialized form.
pub const CLASS_KEY: &str = "__class__";

/// Keys managed by the entity itself rather than the attribute bag
pub const RESERVED_KEYS: [&str; 4] = ["id", "created_at", "updated_at", CLASS_KEY];

/// Current local time at microsecond precision.
pub(crate) fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(6)
}

/// Serialize an entity and tag it with its class name.
pub(crate) fn to_record<T: Serialize>(entity: &T, class_name: &str) -> Result<Record> {
    let mut record: Record = serde_json::from_value(serde_json::to_value(entity)?)?;
    record.insert(CLASS_KEY.to_string(), Value::String(class_name.to_string()));
    Ok(record)
}

/// Deserialize an entity from its record; the class discriminator is ignored.
pub(crate) fn from_record<T: DeserializeOwned>(record: &Record) -> Result<T> {
    let mut fields = record.clone();
    fields.shift_remove(CLASS_KEY);
    Ok(serde_json::from_value(Value::Object(fields))?)
}

/// Behavior shared by every persisted entity.
///
/// Implementors only expose their class name and embedded [`BaseModel`];
/// serialization, the string form and `save` come for free.
pub trait Model {
    fn class_name(&self) -> &'static str;

    fn base(&self) -> &BaseModel;

    fn base_mut(&mut self) -> &mut BaseModel;

    fn id(&self) -> Uuid {
        self.base().id()
    }

    /// Key under which the entity is tracked by storage: `<Class>.<id>`
    fn storage_key(&self) -> String {
        storage_key(self.class_name(), &self.id().to_string())
    }

    /// Serialize into a fresh [`Record`], timestamps rendered as text.
    fn to_dict(&self) -> Result<Record> {
        to_record(self.base(), self.class_name())
    }

    /// Console form: `[<Class>] (<id>) {<attributes>}`
    fn describe(&self) -> String {
        format!(
            "[{}] ({}) {}",
            self.class_name(),
            self.id(),
            repr::attribute_mapping(self.base())
        )
    }

    /// Stamp `updated_at`, then hand the entity to storage and flush it.
    ///
    /// Storage failures are returned unchanged.
    fn save(&mut self, storage: &mut dyn Storage) -> Result<()> {
        self.base_mut().touch();
        let key = self.storage_key();
        let record = self.to_dict()?;
        tracing::debug!(key = %key, "saving entity");
        storage.track(key, record);
        storage.flush()
    }
}

/// Classes known to the console and the object store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    BaseModel,
    User,
}

impl ModelKind {
    pub const ALL: [ModelKind; 2] = [ModelKind::BaseModel, ModelKind::User];

    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::BaseModel => "BaseModel",
            ModelKind::User => "User",
        }
    }

    /// Build a fresh, unsaved instance of this class
    pub fn create(&self) -> Box<dyn Model> {
        match self {
            ModelKind::BaseModel => Box::new(BaseModel::new()),
            ModelKind::User => Box::new(User::new()),
        }
    }

    /// Rebuild an instance of this class from its serialized form
    pub fn restore(&self, record: &Record) -> Result<Box<dyn Model>> {
        Ok(match self {
            ModelKind::BaseModel => Box::new(BaseModel::from_dict(record)?),
            ModelKind::User => Box::new(User::from_dict(record)?),
        })
    }

    /// Read the class discriminator of a serialized record
    pub fn of(record: &Record) -> Result<Self> {
        match record.get(CLASS_KEY) {
            Some(Value::String(name)) => name.parse(),
            Some(_) => Err(HbnbError::InvalidField {
                field: CLASS_KEY,
                expected: "string",
            }),
            None => Err(HbnbError::MissingField(CLASS_KEY)),
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ModelKind {
    type Err = HbnbError;

    fn from_str(s: &str) -> Result<Self> {
        ModelKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| HbnbError::ClassDoesNotExist(s.to_string()))
    }
}
