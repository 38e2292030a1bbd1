//! Filter tree model.
//!
//! A [`FilterGroup`] combines [`FilterNode`]s with a boolean operation; leaves
//! are [`FilterClause`]s. Nodes carry an explicit `kind` discriminant in JSON.

use boards_core::BoardsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterCondition {
    Includes,
    NotIncludes,
    IsEmpty,
    IsNotEmpty,
    IsSet,
    IsNotSet,
    Is,
    Contains,
    NotContains,
    StartsWith,
    NotStartsWith,
    EndsWith,
    NotEndsWith,
    IsBefore,
    IsAfter,
}

impl FilterCondition {
    pub const ALL: [FilterCondition; 15] = [
        Self::Includes,
        Self::NotIncludes,
        Self::IsEmpty,
        Self::IsNotEmpty,
        Self::IsSet,
        Self::IsNotSet,
        Self::Is,
        Self::Contains,
        Self::NotContains,
        Self::StartsWith,
        Self::NotStartsWith,
        Self::EndsWith,
        Self::NotEndsWith,
        Self::IsBefore,
        Self::IsAfter,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Includes => "includes",
            Self::NotIncludes => "notIncludes",
            Self::IsEmpty => "isEmpty",
            Self::IsNotEmpty => "isNotEmpty",
            Self::IsSet => "isSet",
            Self::IsNotSet => "isNotSet",
            Self::Is => "is",
            Self::Contains => "contains",
            Self::NotContains => "notContains",
            Self::StartsWith => "startsWith",
            Self::NotStartsWith => "notStartsWith",
            Self::EndsWith => "endsWith",
            Self::NotEndsWith => "notEndsWith",
            Self::IsBefore => "isBefore",
            Self::IsAfter => "isAfter",
        }
    }

    /// Conditions that test presence only and never read `values`.
    pub fn is_presence_check(self) -> bool {
        matches!(
            self,
            Self::IsEmpty | Self::IsNotEmpty | Self::IsSet | Self::IsNotSet
        )
    }
}

impl fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterCondition {
    type Err = BoardsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| BoardsError::Validation(format!("Invalid filter condition {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperation {
    And,
    Or,
}

impl FromStr for FilterOperation {
    type Err = BoardsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "and" => Ok(Self::And),
            "or" => Ok(Self::Or),
            _ => Err(BoardsError::Validation(format!(
                "Invalid filter operation {}",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterClause {
    pub property_id: String,
    pub condition: FilterCondition,
    #[serde(default)]
    pub values: Vec<String>,
}

impl FilterClause {
    pub fn new(
        property_id: impl Into<String>,
        condition: FilterCondition,
        values: Vec<String>,
    ) -> Self {
        Self {
            property_id: property_id.into(),
            condition,
            values,
        }
    }

    pub fn first_value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FilterNode {
    Clause(FilterClause),
    Group(FilterGroup),
}

impl FilterNode {
    pub fn as_clause(&self) -> Option<&FilterClause> {
        match self {
            Self::Clause(clause) => Some(clause),
            Self::Group(_) => None,
        }
    }
}

impl From<FilterClause> for FilterNode {
    fn from(clause: FilterClause) -> Self {
        Self::Clause(clause)
    }
}

impl From<FilterGroup> for FilterNode {
    fn from(group: FilterGroup) -> Self {
        Self::Group(group)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterGroup {
    pub operation: FilterOperation,
    #[serde(default)]
    pub filters: Vec<FilterNode>,
}

impl FilterGroup {
    pub fn new(operation: FilterOperation, filters: Vec<FilterNode>) -> Self {
        Self {
            operation,
            filters,
        }
    }

    pub fn and(filters: Vec<FilterNode>) -> Self {
        Self::new(FilterOperation::And, filters)
    }

    pub fn or(filters: Vec<FilterNode>) -> Self {
        Self::new(FilterOperation::Or, filters)
    }

    /// Top-level clauses, skipping nested groups.
    pub fn clauses(&self) -> impl Iterator<Item = &FilterClause> {
        self.filters.iter().filter_map(FilterNode::as_clause)
    }

    pub fn from_json(json: &str) -> Result<Self, BoardsError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for FilterGroup {
    fn default() -> Self {
        Self::and(Vec::new())
    }
}
