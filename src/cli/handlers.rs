use std::path::Path;

use serde_json::Value;

use crate::config::StorageConfig;
use crate::entity::{Model, ModelKind};
use crate::error::{HbnbError, Result};
use crate::storage::{FileStorage, Storage};

fn open_store(file: &Path) -> Result<FileStorage> {
    FileStorage::open(&StorageConfig::at(file))
}

/// Interpret a console value: JSON numbers and booleans keep their type,
/// a JSON string is unquoted, anything else is taken as raw text.
fn parse_value(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ (Value::Number(_) | Value::Bool(_) | Value::String(_))) => value,
        _ => Value::String(raw.to_string()),
    }
}

fn load(store: &FileStorage, kind: ModelKind, id: &str) -> Result<Box<dyn Model>> {
    let record = store
        .get(kind.name(), id)
        .ok_or_else(|| HbnbError::NoInstanceFound(id.to_string()))?;
    kind.restore(record)
}

pub fn handle_create(file: &Path, class: &str) -> Result<()> {
    let kind: ModelKind = class.parse()?;
    let mut store = open_store(file)?;

    let mut model = kind.create();
    model.save(&mut store)?;
    tracing::info!(key = %model.storage_key(), "created");

    println!("{}", model.id());
    Ok(())
}

pub fn handle_show(file: &Path, class: &str, id: &str) -> Result<()> {
    let kind: ModelKind = class.parse()?;
    let store = open_store(file)?;

    let model = load(&store, kind, id)?;
    println!("{}", model.describe());
    Ok(())
}

pub fn handle_destroy(file: &Path, class: &str, id: &str) -> Result<()> {
    let kind: ModelKind = class.parse()?;
    let mut store = open_store(file)?;

    store
        .remove(kind.name(), id)
        .ok_or_else(|| HbnbError::NoInstanceFound(id.to_string()))?;
    store.flush()?;
    tracing::info!(class = %kind, id, "destroyed");
    Ok(())
}

pub fn handle_all(file: &Path, class: Option<&str>) -> Result<()> {
    let filter = class.map(str::parse::<ModelKind>).transpose()?;
    let store = open_store(file)?;

    for record in store.all().values() {
        let kind = ModelKind::of(record)?;
        if filter.is_some_and(|wanted| wanted != kind) {
            continue;
        }
        println!("{}", kind.restore(record)?.describe());
    }
    Ok(())
}

pub fn handle_count(file: &Path, class: &str) -> Result<()> {
    let kind: ModelKind = class.parse()?;
    let store = open_store(file)?;

    println!("{}", store.count(kind.name()));
    Ok(())
}

pub fn handle_update(file: &Path, class: &str, id: &str, attribute: &str, value: &str) -> Result<()> {
    let kind: ModelKind = class.parse()?;
    let mut store = open_store(file)?;

    let mut model = load(&store, kind, id)?;
    model.base_mut().set(attribute, parse_value(value))?;
    model.save(&mut store)?;
    tracing::info!(key = %model.storage_key(), attribute, "updated");
    Ok(())
}
