use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

use crate::git::operation::Operation;

/// A single default argument
///
/// `Omit` declares that an operation has no flag for this label by default.
/// It is the only value the command assembler drops; an empty `Arg` is
/// passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Arg(String),
    Omit,
}

impl OptionValue {
    pub fn as_arg(&self) -> Option<&str> {
        match self {
            OptionValue::Arg(arg) => Some(arg),
            OptionValue::Omit => None,
        }
    }
}

impl From<&str> for OptionValue {
    fn from(arg: &str) -> Self {
        OptionValue::Arg(arg.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(arg: String) -> Self {
        OptionValue::Arg(arg)
    }
}

// In configuration files an argument is a string and the omit marker is `false`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawOptionValue {
    Arg(String),
    Flag(bool),
}

impl<'de> Deserialize<'de> for OptionValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawOptionValue::deserialize(deserializer)? {
            RawOptionValue::Arg(arg) => Ok(OptionValue::Arg(arg)),
            RawOptionValue::Flag(false) => Ok(OptionValue::Omit),
            RawOptionValue::Flag(true) => Err(de::Error::custom(
                "option value must be an argument string or `false` to omit it",
            )),
        }
    }
}

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OptionValue::Arg(arg) => serializer.serialize_str(arg),
            OptionValue::Omit => serializer.serialize_bool(false),
        }
    }
}

/// Labelled default arguments for one operation, kept in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultOptions {
    entries: Vec<(String, OptionValue)>,
}

impl DefaultOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`DefaultOptions::insert`]
    pub fn with(mut self, label: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(label, value);
        self
    }

    /// Declare `label` as having no argument by default
    pub fn omit(self, label: impl Into<String>) -> Self {
        self.with(label, OptionValue::Omit)
    }

    /// Set the value for `label`
    ///
    /// A label that already exists keeps its position; new labels go last.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<OptionValue>) {
        let label = label.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((label, value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&OptionValue> {
        self.entries.iter().find(|(l, _)| l == label).map(|(_, v)| v)
    }

    pub fn remove(&mut self, label: &str) -> Option<OptionValue> {
        let index = self.entries.iter().position(|(l, _)| l == label)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), v))
    }

    /// Values in declaration order, omit markers included
    pub fn values(&self) -> impl Iterator<Item = &OptionValue> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<L: Into<String>, V: Into<OptionValue>> FromIterator<(L, V)> for DefaultOptions {
    fn from_iter<I: IntoIterator<Item = (L, V)>>(iter: I) -> Self {
        let mut options = DefaultOptions::new();
        for (label, value) in iter {
            options.insert(label, value);
        }
        options
    }
}

impl Serialize for DefaultOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

struct DefaultOptionsVisitor;

impl<'de> Visitor<'de> for DefaultOptionsVisitor {
    type Value = DefaultOptions;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a table of option labels to argument strings")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut options = DefaultOptions::new();
        while let Some((label, value)) = access.next_entry::<String, OptionValue>()? {
            options.insert(label, value);
        }
        Ok(options)
    }
}

impl<'de> Deserialize<'de> for DefaultOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DefaultOptionsVisitor)
    }
}

/// Per-operation default arguments consulted before every command assembly
#[derive(Debug, Clone, Default)]
pub struct OptionOverlay {
    defaults: HashMap<Operation, DefaultOptions>,
}

impl OptionOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current defaults for `operation`; empty when never customized
    pub fn get(&self, operation: Operation) -> DefaultOptions {
        self.defaults.get(&operation).cloned().unwrap_or_default()
    }

    /// Borrowing form of [`OptionOverlay::get`]
    pub fn defaults_for(&self, operation: Operation) -> Option<&DefaultOptions> {
        self.defaults.get(&operation)
    }

    /// Replace the whole default set for `operation`
    pub fn set(&mut self, operation: Operation, options: DefaultOptions) {
        self.defaults.insert(operation, options);
    }
}

impl FromIterator<(Operation, DefaultOptions)> for OptionOverlay {
    fn from_iter<I: IntoIterator<Item = (Operation, DefaultOptions)>>(iter: I) -> Self {
        Self {
            defaults: iter.into_iter().collect(),
        }
    }
}
