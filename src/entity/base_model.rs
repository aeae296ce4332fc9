//! The base entity every persisted object is built on.

use std::fmt;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{from_record, now, timestamp, Model, Record, RESERVED_KEYS};
use crate::error::{HbnbError, Result};

/// Identity, creation/update timestamps and a free-form attribute bag.
///
/// Serializes flat: the three fixed fields first, then the bag in
/// assignment order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseModel {
    id: Uuid,
    #[serde(with = "timestamp")]
    created_at: NaiveDateTime,
    #[serde(with = "timestamp")]
    updated_at: NaiveDateTime,
    #[serde(flatten)]
    pub(super) attributes: Record,
}

impl BaseModel {
    /// Fresh entity with a new v4 id and both timestamps set to now.
    pub fn new() -> Self {
        let now = now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            attributes: Record::new(),
        }
    }

    /// Restore an entity from its serialized form.
    ///
    /// `id`, `created_at` and `updated_at` are required; `__class__` is
    /// dropped and every other key lands in the attribute bag as-is.
    pub fn from_dict(record: &Record) -> Result<Self> {
        from_record(record)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    /// Dynamic attributes in assignment order
    pub fn attributes(&self) -> &Record {
        &self.attributes
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Assign a dynamic attribute, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Result<Option<Value>> {
        let name = name.into();
        if RESERVED_KEYS.contains(&name.as_str()) {
            return Err(HbnbError::ReservedAttribute(name));
        }
        Ok(self.attributes.insert(name, value.into()))
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.attributes.shift_remove(name)
    }

    /// Move `updated_at` forward to now, or one microsecond past its
    /// previous value when the clock has not advanced.
    pub(crate) fn touch(&mut self) {
        let now = now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }
}

impl Default for BaseModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for BaseModel {
    fn class_name(&self) -> &'static str {
        "BaseModel"
    }

    fn base(&self) -> &BaseModel {
        self
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        self
    }
}

impl fmt::Display for BaseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::TIME_FORMAT;
    use crate::storage::Storage;
    use chrono::{Datelike, Timelike};
    use serde_json::json;
    use std::cell::RefCell;
    use std::io;
    use std::thread;
    use std::time::Duration as StdDuration;

    /// Storage double that logs every call made to it, in order
    #[derive(Default)]
    struct RecordingStorage {
        calls: RefCell<Vec<&'static str>>,
        tracked: Vec<(String, Record)>,
        fail_flush: bool,
    }

    impl Storage for RecordingStorage {
        fn track(&mut self, key: String, record: Record) {
            self.calls.borrow_mut().push("track");
            self.tracked.push((key, record));
        }

        fn flush(&self) -> Result<()> {
            self.calls.borrow_mut().push("flush");
            if self.fail_flush {
                return Err(io::Error::new(io::ErrorKind::Other, "disk full").into());
            }
            Ok(())
        }
    }

    fn is_canonical_uuid(text: &str) -> bool {
        text.len() == 36
            && text.char_indices().all(|(i, c)| match i {
                8 | 13 | 18 | 23 => c == '-',
                _ => c.is_ascii_digit() || ('a'..='f').contains(&c),
            })
    }

    fn console_datetime(ts: NaiveDateTime) -> String {
        let micros = ts.nanosecond() / 1_000;
        let mut text = format!(
            "datetime.datetime({}, {}, {}, {}, {}",
            ts.year(),
            ts.month(),
            ts.day(),
            ts.hour(),
            ts.minute()
        );
        if ts.second() != 0 || micros != 0 {
            text.push_str(&format!(", {}", ts.second()));
        }
        if micros != 0 {
            text.push_str(&format!(", {}", micros));
        }
        text.push(')');
        text
    }

    fn sample_record() -> Record {
        json!({
            "id": "56d43177-cc5f-4d6c-a0c1-e167f8c27337",
            "created_at": "2017-09-28T21:03:54.052298",
            "updated_at": "2017-09-28T21:03:54.052302",
            "name": "Holberton",
            "my_number": 89,
            "__class__": "BaseModel"
        })
        .as_object()
        .unwrap()
        .clone()
    }

    fn assert_json_error(result: Result<BaseModel>, needle: &str) {
        match result {
            Err(HbnbError::Json(e)) => assert!(e.to_string().contains(needle), "{}", e),
            other => panic!("expected JSON error containing {:?}, got {:?}", needle, other),
        }
    }

    #[test]
    fn test_instantiation_with_attributes() {
        let mut model = BaseModel::new();
        model.set("name", "Holberton").unwrap();
        model.set("number", 89).unwrap();

        assert_eq!(model.get("name"), Some(&json!("Holberton")));
        assert_eq!(model.get("number"), Some(&json!(89)));
        assert!(model.get("number").unwrap().is_i64());
    }

    #[test]
    fn test_id_is_canonical_uuid() {
        let first = BaseModel::new();
        let second = BaseModel::new();

        for model in [&first, &second] {
            let id = model.id().to_string();
            assert!(is_canonical_uuid(&id), "bad id {}", id);
        }
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_timestamps_at_construction() {
        let before = now();
        let first = BaseModel::new();
        let after = now();

        assert!(before <= first.created_at() && first.created_at() <= after);
        assert_eq!(first.created_at(), first.updated_at());

        thread::sleep(StdDuration::from_millis(1));
        let second = BaseModel::new();

        assert_eq!(second.created_at(), second.updated_at());
        assert_ne!(first.created_at(), second.created_at());
        assert_ne!(first.updated_at(), second.updated_at());
    }

    #[test]
    fn test_to_dict_keys() {
        let mut model = BaseModel::new();
        model.set("name", "Holberton").unwrap();
        model.set("my_number", 89).unwrap();

        let dict = model.to_dict().unwrap();
        let keys: Vec<&str> = dict.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["id", "created_at", "updated_at", "name", "my_number", "__class__"]
        );
        assert_eq!(dict["id"], json!(model.id().to_string()));
        assert_eq!(dict["__class__"], json!("BaseModel"));
        assert_eq!(dict["name"], json!("Holberton"));
        assert_eq!(dict["my_number"], json!(89));
    }

    #[test]
    fn test_to_dict_timestamps_are_text() {
        let model = BaseModel::new();
        let dict = model.to_dict().unwrap();

        let created = dict["created_at"].as_str().unwrap();
        let updated = dict["updated_at"].as_str().unwrap();
        assert_eq!(created, model.created_at().format(TIME_FORMAT).to_string());
        assert_eq!(
            NaiveDateTime::parse_from_str(created, TIME_FORMAT).unwrap(),
            model.created_at()
        );
        assert_eq!(
            NaiveDateTime::parse_from_str(updated, TIME_FORMAT).unwrap(),
            model.updated_at()
        );
    }

    #[test]
    fn test_to_dict_does_not_mutate() {
        let model = BaseModel::new();
        let before = model.clone();
        let _ = model.to_dict().unwrap();
        assert_eq!(model, before);
        assert!(model.attributes().is_empty());
    }

    #[test]
    fn test_reserved_attributes_rejected() {
        let mut model = BaseModel::new();
        for key in RESERVED_KEYS {
            assert!(matches!(
                model.set(key, "x"),
                Err(HbnbError::ReservedAttribute(_))
            ));
        }
        assert!(model.attributes().is_empty());
    }

    #[test]
    fn test_set_and_remove_keep_order() {
        let mut model = BaseModel::new();
        model.set("a", 1).unwrap();
        model.set("b", 2).unwrap();
        model.set("c", 3).unwrap();
        assert_eq!(model.set("a", 10).unwrap(), Some(json!(1)));
        assert_eq!(model.remove("b"), Some(json!(2)));

        let keys: Vec<&str> = model.attributes().keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "c"]);
    }

    #[test]
    fn test_str_of_fresh_instance() {
        let model = BaseModel::new();
        let id = model.id();

        let expected = format!(
            "[BaseModel] ({}) {{'id': '{}', 'created_at': {}, 'updated_at': {}}}",
            id,
            id,
            console_datetime(model.created_at()),
            console_datetime(model.updated_at())
        );
        assert_eq!(model.to_string(), expected);
        assert_eq!(model.describe(), expected);
    }

    #[test]
    fn test_str_of_restored_instance() {
        let model = BaseModel::from_dict(&sample_record()).unwrap();
        assert_eq!(
            model.to_string(),
            "[BaseModel] (56d43177-cc5f-4d6c-a0c1-e167f8c27337) \
             {'id': '56d43177-cc5f-4d6c-a0c1-e167f8c27337', \
             'created_at': datetime.datetime(2017, 9, 28, 21, 3, 54, 52298), \
             'updated_at': datetime.datetime(2017, 9, 28, 21, 3, 54, 52302), \
             'name': 'Holberton', 'my_number': 89}"
        );
    }

    #[test]
    fn test_save_updates_timestamp_and_calls_storage() {
        let mut storage = RecordingStorage::default();
        let mut model = BaseModel::new();
        let created = model.created_at();
        let updated = model.updated_at();

        model.save(&mut storage).unwrap();

        assert_eq!(model.created_at(), created);
        assert_ne!(model.updated_at(), updated);
        assert!(model.updated_at() > updated);
        assert_eq!(*storage.calls.borrow(), ["track", "flush"]);

        let (key, record) = &storage.tracked[0];
        assert_eq!(key, &format!("BaseModel.{}", model.id()));
        assert_eq!(record, &model.to_dict().unwrap());
    }

    #[test]
    fn test_repeated_saves_are_monotonic() {
        let mut storage = RecordingStorage::default();
        let mut model = BaseModel::new();
        let mut last = model.updated_at();

        for _ in 0..5 {
            model.save(&mut storage).unwrap();
            assert!(model.updated_at() > last);
            last = model.updated_at();
        }
        assert_eq!(storage.tracked.len(), 5);
        assert_eq!(*storage.calls.borrow(), ["track", "flush"].repeat(5));
    }

    #[test]
    fn test_save_propagates_storage_failure() {
        let mut storage = RecordingStorage {
            fail_flush: true,
            ..Default::default()
        };
        let mut model = BaseModel::new();

        let result = model.save(&mut storage);
        assert!(matches!(result, Err(HbnbError::Io(_))));
        assert_eq!(*storage.calls.borrow(), ["track", "flush"]);
    }

    #[test]
    fn test_from_dict_restores_everything() {
        let record = sample_record();
        let model = BaseModel::from_dict(&record).unwrap();

        assert_eq!(model.id().to_string(), "56d43177-cc5f-4d6c-a0c1-e167f8c27337");
        assert_eq!(
            model.created_at(),
            NaiveDateTime::parse_from_str("2017-09-28T21:03:54.052298", TIME_FORMAT).unwrap()
        );
        assert_eq!(model.get("name"), Some(&json!("Holberton")));
        assert!(model.get("__class__").is_none());
        assert_eq!(model.to_dict().unwrap(), record);
    }

    #[test]
    fn test_from_dict_round_trips_fresh_instance() {
        let mut model = BaseModel::new();
        model.set("tags", json!(["a", "b"])).unwrap();
        model.set("ratio", 0.25).unwrap();

        let restored = BaseModel::from_dict(&model.to_dict().unwrap()).unwrap();
        assert_eq!(restored, model);
    }

    #[test]
    fn test_from_dict_short_fraction() {
        let mut record = sample_record();
        record.insert("created_at".to_string(), json!("2017-09-28T21:03:54.5"));

        let model = BaseModel::from_dict(&record).unwrap();
        assert_eq!(model.created_at().nanosecond(), 500_000_000);
    }

    #[test]
    fn test_from_dict_missing_field() {
        let mut record = sample_record();
        record.shift_remove("created_at");
        assert_json_error(BaseModel::from_dict(&record), "missing field `created_at`");
    }

    #[test]
    fn test_from_dict_malformed_fields() {
        let mut record = sample_record();
        record.insert("updated_at".to_string(), json!("2017-09-28 21:03:54"));
        assert_json_error(BaseModel::from_dict(&record), "invalid timestamp");

        let mut record = sample_record();
        record.insert("created_at".to_string(), json!("2017-09-28T21:03:54"));
        assert_json_error(BaseModel::from_dict(&record), "invalid timestamp");

        let mut record = sample_record();
        record.insert("id".to_string(), json!(42));
        assert!(matches!(BaseModel::from_dict(&record), Err(HbnbError::Json(_))));

        let mut record = sample_record();
        record.insert("id".to_string(), json!("not-a-uuid"));
        assert!(matches!(BaseModel::from_dict(&record), Err(HbnbError::Json(_))));
    }
}
