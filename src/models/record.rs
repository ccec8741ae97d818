use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ContactsError, Result};

/// A single contact entry
#[derive(Debug, Clone, Serialize, Deserialize, Encode, Decode, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl Record {
    /// Create a new contact record
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Record {
            name: name.into(),
            address: address.into(),
            phone: phone.into(),
        }
    }
}

/// Convert a parsed JSON value into a list of records
/// The value must be an array of objects with string `name`, `address` and `phone`
/// Any other keys on an object are ignored
pub fn records_from_json(value: Value) -> Result<Vec<Record>> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ContactsError::InvalidData(format!(
                "expected a list of contacts, found {}",
                json_kind(&other)
            )));
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(ContactsError::InvalidData(format!(
                    "contact {} must be an object, found {}",
                    index + 1,
                    json_kind(&item)
                )));
            }
            serde_json::from_value(item).map_err(|e| {
                ContactsError::InvalidData(format!("contact {}: {}", index + 1, e))
            })
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
