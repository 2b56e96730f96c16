//! Named, typed values attached to an element.
//!
//! Editors put here everything that has no dedicated field: beaming
//! groups, stem directions, text of lyrics etc. The core never looks
//! into them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PropertyError {
    #[error("No property named `{0}`")]
    NotFound(String),
    #[error("Property `{name}` holds {found}, expected {expected}")]
    WrongType {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}
pub type PropertyResult<T> = Result<T, PropertyError>;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum PropertyValue {
    Int(i64),
    Bool(bool),
    Str(String),
}
impl PropertyValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "Int",
            Self::Bool(_) => "Bool",
            Self::Str(_) => "Str",
        }
    }
}
impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}
impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}
impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct Properties {
    values: HashMap<String, PropertyValue>,
}
impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the previous value, if any.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        self.values.insert(name.into(), value.into())
    }
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.values.get(name)
    }
    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
    pub fn remove(&mut self, name: &str) -> Option<PropertyValue> {
        self.values.remove(name)
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get_int(&self, name: &str) -> PropertyResult<i64> {
        match self.typed(name, "Int")? {
            PropertyValue::Int(value) => Ok(*value),
            other => Err(wrong_type(name, "Int", other)),
        }
    }
    pub fn get_bool(&self, name: &str) -> PropertyResult<bool> {
        match self.typed(name, "Bool")? {
            PropertyValue::Bool(value) => Ok(*value),
            other => Err(wrong_type(name, "Bool", other)),
        }
    }
    pub fn get_str(&self, name: &str) -> PropertyResult<&str> {
        match self.typed(name, "Str")? {
            PropertyValue::Str(value) => Ok(value.as_str()),
            other => Err(wrong_type(name, "Str", other)),
        }
    }

    fn typed(
        &self,
        name: &str,
        expected: &'static str,
    ) -> PropertyResult<&PropertyValue> {
        let value = self
            .values
            .get(name)
            .ok_or(PropertyError::NotFound(name.to_string()))?;
        log::trace!("reading {expected} property `{name}`");
        Ok(value)
    }
}

fn wrong_type(
    name: &str,
    expected: &'static str,
    found: &PropertyValue,
) -> PropertyError {
    PropertyError::WrongType {
        name: name.to_string(),
        expected,
        found: found.type_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::{PropertyError, PropertyValue, Properties};

    #[test]
    fn typed_access() {
        let mut props = Properties::new();
        assert!(props.is_empty());
        props.set("stem-up", true);
        props.set("beam-group", 3_i64);
        props.set("lyric", "la");
        assert_eq!(props.len(), 3);
        assert_eq!(props.get_bool("stem-up"), Ok(true));
        assert_eq!(props.get_int("beam-group"), Ok(3));
        assert_eq!(props.get_str("lyric"), Ok("la"));
        assert_eq!(
            props.get_int("lyric"),
            Err(PropertyError::WrongType {
                name: "lyric".to_string(),
                expected: "Int",
                found: "Str"
            })
        );
        assert_eq!(
            props.get_bool("missing"),
            Err(PropertyError::NotFound("missing".to_string()))
        );
    }

    #[test]
    fn replace_and_remove() {
        let mut props = Properties::new();
        assert_eq!(props.set("x", 1_i64), None);
        assert_eq!(props.set("x", 2_i64), Some(PropertyValue::Int(1)));
        assert!(props.has("x"));
        assert_eq!(props.remove("x"), Some(PropertyValue::Int(2)));
        assert!(!props.has("x"));
    }
}
