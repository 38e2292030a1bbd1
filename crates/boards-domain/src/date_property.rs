//! Stored encoding of `date` property values.
//!
//! A value is either a bare epoch-millisecond string (a single day) or a JSON
//! object carrying a range and/or time-of-day flag.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateProperty {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_time: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl DateProperty {
    pub fn instant(millis: i64) -> Self {
        Self {
            from: Some(millis),
            ..Self::default()
        }
    }

    pub fn range(from: i64, to: i64) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            ..Self::default()
        }
    }

    /// Never fails: anything that is neither a number nor a date object
    /// yields an empty property.
    pub fn parse(value: &str) -> Self {
        if value.is_empty() {
            return Self::default();
        }

        if let Some(millis) = parse_epoch_millis(value) {
            return Self::instant(millis);
        }

        serde_json::from_str(value).unwrap_or_else(|e| {
            tracing::debug!("Unparseable date property {:?}: {}", value, e);
            Self::default()
        })
    }

    /// A bound of zero counts as unset, as in the stored format.
    pub fn from_bound(&self) -> Option<i64> {
        self.from.filter(|&v| v != 0)
    }

    pub fn to_bound(&self) -> Option<i64> {
        self.to.filter(|&v| v != 0)
    }

    pub fn is_range(&self) -> bool {
        self.from_bound().is_some() && self.to_bound().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.from_bound().is_none() && self.to_bound().is_none()
    }

    /// Serialized form written back to the card: empty when no bound is set.
    pub fn to_property_value(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn parse_epoch_millis(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    let number: f64 = trimmed.parse().ok()?;
    // Representable dates span +/- 8.64e15 ms around the epoch.
    if !number.is_finite() || number.abs() > 8.64e15 {
        return None;
    }
    Some(number.trunc() as i64)
}

/// Parses the leading integer of a filter value, ignoring trailing text.
pub(crate) fn parse_int_prefix(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}
