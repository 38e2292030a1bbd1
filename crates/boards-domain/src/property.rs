//! Card property schema and property values.
//!
//! A board carries an ordered list of [`PropertyTemplate`]s. Each card stores
//! one [`PropertyValue`] per template id.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    Text,
    Number,
    Select,
    MultiSelect,
    Date,
    Person,
    MultiPerson,
    Checkbox,
    Url,
    Email,
    Phone,
    CreatedTime,
    CreatedBy,
    UpdatedTime,
    UpdatedBy,
    Card,
    File,
    #[serde(other)]
    Unknown,
}

impl PropertyType {
    pub fn is_timestamp(self) -> bool {
        matches!(self, Self::CreatedTime | Self::UpdatedTime)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyOption {
    pub id: String,
    pub value: String,
    #[serde(default)]
    pub color: String,
}

impl PropertyOption {
    pub fn new(id: impl Into<String>, value: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            color: color.into(),
        }
    }
}

/// A template for card properties attached to a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyTemplate {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(default)]
    pub options: Vec<PropertyOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl PropertyTemplate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, property_type: PropertyType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            property_type,
            options: Vec::new(),
            index: None,
        }
    }

    pub fn with_options(mut self, options: Vec<PropertyOption>) -> Self {
        self.options = options;
        self
    }

    pub fn find_option(&self, option_id: &str) -> Option<&PropertyOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    pub fn with_index(&self, index: usize) -> Self {
        Self {
            index: Some(index),
            ..self.clone()
        }
    }

    /// Compares every scalar field and the options as a set keyed by id.
    pub fn is_property_equal(&self, other: &PropertyTemplate) -> bool {
        if self.id != other.id
            || self.name != other.name
            || self.property_type != other.property_type
            || self.index != other.index
        {
            return false;
        }

        if self.options.len() != other.options.len() {
            return false;
        }

        self.options
            .iter()
            .all(|opt| other.find_option(&opt.id).is_some_and(|o| o == opt))
    }
}

pub fn find_template<'a>(
    templates: &'a [PropertyTemplate],
    id: &str,
) -> Option<&'a PropertyTemplate> {
    templates.iter().find(|t| t.id == id)
}

/// A stored card property value: a single string, or a list for the
/// multi-valued types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Text(String),
    List(Vec<String>),
}

impl PropertyValue {
    /// Empty strings are unset; lists always count as set, even when empty.
    pub fn is_set(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::List(_) => true,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Text(s) => s.len(),
            Self::List(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// Whether `candidate` is the value (scalars) or one of its elements (lists).
    pub fn includes(&self, candidate: &str) -> bool {
        match self {
            Self::Text(s) => s == candidate,
            Self::List(items) => items.iter().any(|item| item == candidate),
        }
    }

    /// Non-empty entries, treating a scalar as a one-element list.
    pub fn entries(&self) -> Vec<&str> {
        match self {
            Self::Text(s) if s.is_empty() => Vec::new(),
            Self::Text(s) => vec![s.as_str()],
            Self::List(items) => items
                .iter()
                .map(String::as_str)
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::List(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}
