//! Runtime attributes that make up a connection identity

use std::collections::HashMap;

use serde_json::Value;

use super::encoding::{bracketed, jvm_double, jvm_float, write_utf};
use super::error::IdentityError;

/// Input arguments as reported by the runtime metrics source.
///
/// Every variant renders to the same bracketed, comma-separated text before
/// hashing. In practice sources report `Strings`; the numeric variants exist
/// for sources that hand over typed arrays.
#[derive(Debug, Clone, PartialEq)]
pub enum InputArguments {
    Strings(Vec<String>),
    Booleans(Vec<bool>),
    Bytes(Vec<i8>),
    Chars(Vec<char>),
    Shorts(Vec<i16>),
    Ints(Vec<i32>),
    Longs(Vec<i64>),
    Floats(Vec<f32>),
    Doubles(Vec<f64>),
    /// Arbitrary objects by their text form; `None` renders as `null`
    Objects(Vec<Option<String>>),
}

impl InputArguments {
    pub fn render(&self) -> String {
        match self {
            InputArguments::Strings(v) => bracketed(v, |s| s.clone()),
            InputArguments::Booleans(v) => bracketed(v, |b| b.to_string()),
            InputArguments::Bytes(v) => bracketed(v, |b| b.to_string()),
            InputArguments::Chars(v) => bracketed(v, |c| c.to_string()),
            InputArguments::Shorts(v) => bracketed(v, |n| n.to_string()),
            InputArguments::Ints(v) => bracketed(v, |n| n.to_string()),
            InputArguments::Longs(v) => bracketed(v, |n| n.to_string()),
            InputArguments::Floats(v) => bracketed(v, |f| jvm_float(*f)),
            InputArguments::Doubles(v) => bracketed(v, |f| jvm_double(*f)),
            InputArguments::Objects(v) => {
                bracketed(v, |o| o.clone().unwrap_or_else(|| "null".to_string()))
            }
        }
    }

    /// Infer the element type of a JSON array reported by a discovery layer
    pub fn from_json(value: &Value) -> Result<Self, IdentityError> {
        let items = match value {
            Value::Array(items) => items,
            Value::Null => return Ok(InputArguments::Strings(Vec::new())),
            other => {
                return Err(IdentityError::UnsupportedAttribute(format!(
                    "InputArguments must be an array, got {other}"
                )))
            }
        };

        if let Some(strings) = items
            .iter()
            .map(|v| v.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
        {
            return Ok(InputArguments::Strings(strings));
        }
        if let Some(bools) = items.iter().map(Value::as_bool).collect::<Option<Vec<_>>>() {
            return Ok(InputArguments::Booleans(bools));
        }
        if let Some(longs) = items.iter().map(Value::as_i64).collect::<Option<Vec<_>>>() {
            return Ok(InputArguments::Longs(longs));
        }
        if let Some(doubles) = items.iter().map(Value::as_f64).collect::<Option<Vec<_>>>() {
            return Ok(InputArguments::Doubles(doubles));
        }

        items
            .iter()
            .map(|v| match v {
                Value::Null => Ok(None),
                Value::String(s) => Ok(Some(s.clone())),
                Value::Bool(_) | Value::Number(_) => Ok(Some(v.to_string())),
                Value::Array(_) | Value::Object(_) => Err(IdentityError::UnsupportedAttribute(
                    format!("nested value in InputArguments: {v}"),
                )),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(InputArguments::Objects)
    }
}

impl Default for InputArguments {
    fn default() -> Self {
        InputArguments::Strings(Vec::new())
    }
}

/// The fixed attribute tuple an identity is derived from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuntimeAttributes {
    pub class_path: String,
    pub name: String,
    pub input_arguments: InputArguments,
    pub library_path: String,
    pub vm_vendor: String,
    pub vm_version: String,
    /// Runtime start time, epoch milliseconds
    pub start_time: i64,
}

impl RuntimeAttributes {
    /// Attribute names as reported by a runtime management interface
    pub const CLASS_PATH: &'static str = "ClassPath";
    pub const NAME: &'static str = "Name";
    pub const INPUT_ARGUMENTS: &'static str = "InputArguments";
    pub const LIBRARY_PATH: &'static str = "LibraryPath";
    pub const VM_VENDOR: &'static str = "VmVendor";
    pub const VM_VERSION: &'static str = "VmVersion";
    pub const START_TIME: &'static str = "StartTime";

    /// Build the tuple from a raw attribute map handed over by discovery.
    ///
    /// Missing string attributes are treated as empty and a missing
    /// `InputArguments` as an empty list; a missing `StartTime` is an error.
    pub fn from_attribute_map(map: &HashMap<String, Value>) -> Result<Self, IdentityError> {
        let text = |name: &str| -> Result<String, IdentityError> {
            match map.get(name) {
                None | Some(Value::Null) => Ok(String::new()),
                Some(Value::String(s)) => Ok(s.clone()),
                Some(other) => Err(IdentityError::UnsupportedAttribute(format!(
                    "{name} must be a string, got {other}"
                ))),
            }
        };

        let start_time = match map.get(Self::START_TIME) {
            Some(value) => value.as_i64().ok_or_else(|| {
                IdentityError::UnsupportedAttribute(format!(
                    "{} must be an integer, got {value}",
                    Self::START_TIME
                ))
            })?,
            None => {
                return Err(IdentityError::MetricsUnavailable(format!(
                    "{} missing from attribute map",
                    Self::START_TIME
                )))
            }
        };

        Ok(Self {
            class_path: text(Self::CLASS_PATH)?,
            name: text(Self::NAME)?,
            input_arguments: map
                .get(Self::INPUT_ARGUMENTS)
                .map(InputArguments::from_json)
                .transpose()?
                .unwrap_or_default(),
            library_path: text(Self::LIBRARY_PATH)?,
            vm_vendor: text(Self::VM_VENDOR)?,
            vm_version: text(Self::VM_VERSION)?,
            start_time,
        })
    }

    /// Serialize the tuple in its fixed order: six length-prefixed strings
    /// (input arguments rendered as text) then the 8-byte big-endian start time.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, IdentityError> {
        let mut out = Vec::new();
        write_utf(&mut out, Self::CLASS_PATH, &self.class_path)?;
        write_utf(&mut out, Self::NAME, &self.name)?;
        write_utf(&mut out, Self::INPUT_ARGUMENTS, &self.input_arguments.render())?;
        write_utf(&mut out, Self::LIBRARY_PATH, &self.library_path)?;
        write_utf(&mut out, Self::VM_VENDOR, &self.vm_vendor)?;
        write_utf(&mut out, Self::VM_VERSION, &self.vm_version)?;
        out.extend_from_slice(&self.start_time.to_be_bytes());
        Ok(out)
    }
}
