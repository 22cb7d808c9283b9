// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde_json::Map;
use serde_json::Value;

use crate::CliError;

/// A JSON object request body assembled from payload flags, or taken whole
/// from `--json`
#[derive(Debug, Default)]
pub struct Payload {
    fields: Map<String, Value>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `raw` as the JSON object given to `--{flag}`
    pub fn from_json(flag: &'static str, raw: &str) -> Result<Self, CliError> {
        Ok(Self { fields: parse_object(flag, raw)? })
    }

    /// Set a top-level field when the flag was given
    pub fn set<V: Into<Value>>(&mut self, key: &str, value: Option<V>) {
        self.set_path(&[key], value);
    }

    /// Set a nested field, creating intermediate objects as needed
    pub fn set_path<V: Into<Value>>(&mut self, path: &[&str], value: Option<V>) {
        if let Some(value) = value {
            insert_path(&mut self.fields, path, value.into());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The serialized body. Used for updates, where an empty body is
    /// pointless.
    pub fn into_non_empty_body(self) -> Result<String, CliError> {
        if self.is_empty() {
            return Err(CliError::usage(
                "nothing to update: pass at least one field flag or --json",
            ));
        }

        Ok(self.into_body())
    }

    pub fn into_body(self) -> String {
        Value::Object(self.fields).to_string()
    }
}

/// Parse a flag value that must be a JSON object
pub fn parse_object(
    flag: &'static str,
    raw: &str,
) -> Result<Map<String, Value>, CliError> {
    match serde_json::from_str(raw) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(CliError::usage(format!("--{flag} must be a JSON object"))),
        Err(source) => Err(CliError::InvalidJson { flag, source }),
    }
}

fn insert_path(fields: &mut Map<String, Value>, path: &[&str], value: Value) {
    match path {
        [] => {}

        [key] => {
            fields.insert(key.to_string(), value);
        }

        [key, rest @ ..] => {
            let entry = fields
                .entry(key.to_string())
                .or_insert_with(|| Value::Object(Map::new()));

            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }

            if let Value::Object(inner) = entry {
                insert_path(inner, rest, value);
            }
        }
    }
}
