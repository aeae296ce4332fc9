mod file_store;

pub use file_store::FileStorage;

use crate::entity::Record;
use crate::error::Result;

/// What an entity needs from persistence when it is saved.
///
/// Passed explicitly to [`crate::entity::Model::save`]; entities never hold
/// on to it.
pub trait Storage {
    /// Register or replace the serialized entity under `key`.
    fn track(&mut self, key: String, record: Record);

    /// Persist every tracked entity to the backing store.
    fn flush(&self) -> Result<()>;
}

/// Storage key of an entity: `<Class>.<id>`
pub fn storage_key(class_name: &str, id: &str) -> String {
    format!("{}.{}", class_name, id)
}
