// src/entity/user.rs
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{from_record, BaseModel, Model, Record};
use crate::error::Result;

const USER_FIELDS: [&str; 4] = ["email", "password", "first_name", "last_name"];

/// An account holder. Profile fields live in the base attribute bag and
/// start out empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    base: BaseModel,
}

impl User {
    pub fn new() -> Self {
        let mut base = BaseModel::new();
        for field in USER_FIELDS {
            base.attributes
                .insert(field.to_string(), Value::String(String::new()));
        }
        Self { base }
    }

    pub fn from_dict(record: &Record) -> Result<Self> {
        from_record(record)
    }

    pub fn email(&self) -> &str {
        self.text(USER_FIELDS[0])
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.set_text(USER_FIELDS[0], email.into());
    }

    pub fn password(&self) -> &str {
        self.text(USER_FIELDS[1])
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.set_text(USER_FIELDS[1], password.into());
    }

    pub fn first_name(&self) -> &str {
        self.text(USER_FIELDS[2])
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) {
        self.set_text(USER_FIELDS[2], first_name.into());
    }

    pub fn last_name(&self) -> &str {
        self.text(USER_FIELDS[3])
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) {
        self.set_text(USER_FIELDS[3], last_name.into());
    }

    fn text(&self, field: &str) -> &str {
        self.base.get(field).and_then(Value::as_str).unwrap_or_default()
    }

    fn set_text(&mut self, field: &str, value: String) {
        self.base
            .attributes
            .insert(field.to_string(), Value::String(value));
    }
}

impl Default for User {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for User {
    fn class_name(&self) -> &'static str {
        "User"
    }

    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
