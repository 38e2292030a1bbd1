//! Filter tree evaluation against a single card.

use crate::date_property::{parse_int_prefix, DateProperty};
use crate::linked_card::extract_card_ids;
use crate::property::{find_template, PropertyTemplate, PropertyType, PropertyValue};
use crate::Card;

use super::filter_group::{FilterClause, FilterCondition, FilterGroup, FilterNode, FilterOperation};

/// Property id that addresses the card title instead of a stored property.
pub const TITLE_PROPERTY_ID: &str = "title";

/// Created/updated timestamps carry a time of day while filter values are day
/// granular, so comparisons against them are widened by half a day.
const HALF_DAY_MS: i64 = 12 * 60 * 60 * 1000;

/// Empty groups are met by every card, whatever the operation.
pub fn is_filter_group_met(
    group: &FilterGroup,
    templates: &[PropertyTemplate],
    card: &Card,
) -> bool {
    if group.filters.is_empty() {
        return true;
    }

    let node_met = |node: &FilterNode| match node {
        FilterNode::Group(inner) => is_filter_group_met(inner, templates, card),
        FilterNode::Clause(clause) => is_clause_met(clause, templates, card),
    };

    match group.operation {
        FilterOperation::Or => group.filters.iter().any(node_met),
        FilterOperation::And => group.filters.iter().all(node_met),
    }
}

/// Cards meeting `group`, in input order.
pub fn apply_filter_group<'a>(
    group: &FilterGroup,
    templates: &[PropertyTemplate],
    cards: &'a [Card],
) -> Vec<&'a Card> {
    cards
        .iter()
        .filter(|card| is_filter_group_met(group, templates, card))
        .collect()
}

/// The value a clause compares against, after title and metadata lookups.
#[derive(Debug, Default)]
struct ResolvedValue {
    value: Option<PropertyValue>,
    date: Option<DateProperty>,
    card_ids: Option<Vec<String>>,
}

impl ResolvedValue {
    fn resolve(clause: &FilterClause, template: Option<&PropertyTemplate>, card: &Card) -> Self {
        let mut value = if clause.property_id == TITLE_PROPERTY_ID {
            Some(PropertyValue::Text(card.title.to_lowercase()))
        } else {
            card.property(&clause.property_id).cloned()
        };

        let property_type = template.map(|t| t.property_type);
        let mut date = (property_type == Some(PropertyType::Date))
            .then(|| DateProperty::parse(text_of(value.as_ref())));

        if !value.as_ref().is_some_and(PropertyValue::is_set) {
            match property_type {
                Some(PropertyType::CreatedBy) => {
                    value = Some(PropertyValue::Text(card.created_by.clone()));
                }
                Some(PropertyType::UpdatedBy) => {
                    value = Some(PropertyValue::Text(card.modified_by.clone()));
                }
                Some(PropertyType::CreatedTime) => {
                    let stamp = card.create_at.to_string();
                    date = Some(DateProperty::parse(&stamp));
                    value = Some(PropertyValue::Text(stamp));
                }
                Some(PropertyType::UpdatedTime) => {
                    let stamp = card.update_at.to_string();
                    date = Some(DateProperty::parse(&stamp));
                    value = Some(PropertyValue::Text(stamp));
                }
                _ => {}
            }
        }

        let card_ids = (property_type == Some(PropertyType::Card))
            .then(|| extract_card_ids(text_of(value.as_ref())));

        Self {
            value,
            date,
            card_ids,
        }
    }

    fn is_set(&self) -> bool {
        self.value.as_ref().is_some_and(PropertyValue::is_set)
    }

    fn is_empty(&self) -> bool {
        match &self.card_ids {
            Some(ids) => ids.is_empty(),
            None => self.value.as_ref().map_or(0, PropertyValue::len) == 0,
        }
    }

    fn includes_any(&self, candidates: &[String]) -> bool {
        match (&self.card_ids, &self.value) {
            (Some(ids), _) => candidates.iter().any(|c| ids.contains(c)),
            (None, Some(value)) => candidates.iter().any(|c| value.includes(c)),
            (None, None) => false,
        }
    }

    /// String predicates test the value, or any element of a list value.
    fn matches_text(&self, predicate: impl Fn(&str) -> bool) -> bool {
        match &self.value {
            Some(PropertyValue::List(items)) => items.iter().any(|item| predicate(item)),
            Some(PropertyValue::Text(text)) => predicate(text),
            None => predicate(""),
        }
    }
}

fn text_of(value: Option<&PropertyValue>) -> &str {
    value.and_then(PropertyValue::as_text).unwrap_or_default()
}

pub fn is_clause_met(clause: &FilterClause, templates: &[PropertyTemplate], card: &Card) -> bool {
    let template = find_template(templates, &clause.property_id);
    let resolved = ResolvedValue::resolve(clause, template, card);
    let is_timestamp = template.is_some_and(|t| t.property_type.is_timestamp());

    // Clauses that need a value but have none are ignored, i.e. always met.
    if clause.values.is_empty() && !clause.condition.is_presence_check() {
        return true;
    }
    let first = clause.first_value().unwrap_or_default();
    let needle = first.to_lowercase();

    match clause.condition {
        FilterCondition::Includes => resolved.includes_any(&clause.values),
        FilterCondition::NotIncludes => !resolved.includes_any(&clause.values),
        FilterCondition::IsEmpty => resolved.is_empty(),
        FilterCondition::IsNotEmpty => !resolved.is_empty(),
        FilterCondition::IsSet => resolved.is_set(),
        FilterCondition::IsNotSet => !resolved.is_set(),
        FilterCondition::Is => match &resolved.date {
            Some(date) => date_is(date, parse_int_prefix(first), is_timestamp),
            None => {
                resolved.value.as_ref().and_then(PropertyValue::as_text) == Some(needle.as_str())
            }
        },
        FilterCondition::Contains => resolved.matches_text(|text| text.contains(needle.as_str())),
        FilterCondition::NotContains => {
            !resolved.matches_text(|text| text.contains(needle.as_str()))
        }
        FilterCondition::StartsWith => {
            resolved.matches_text(|text| text.starts_with(needle.as_str()))
        }
        FilterCondition::NotStartsWith => {
            !resolved.matches_text(|text| text.starts_with(needle.as_str()))
        }
        FilterCondition::EndsWith => resolved.matches_text(|text| text.ends_with(needle.as_str())),
        FilterCondition::NotEndsWith => {
            !resolved.matches_text(|text| text.ends_with(needle.as_str()))
        }
        FilterCondition::IsBefore => resolved
            .date
            .as_ref()
            .is_some_and(|date| date_is_before(date, parse_int_prefix(first), is_timestamp)),
        FilterCondition::IsAfter => resolved
            .date
            .as_ref()
            .is_some_and(|date| date_is_after(date, parse_int_prefix(first), is_timestamp)),
    }
}

fn date_is(date: &DateProperty, filter: Option<i64>, is_timestamp: bool) -> bool {
    let Some(filter) = filter else {
        return false;
    };
    if is_timestamp {
        let (low, high) = (
            filter.saturating_sub(HALF_DAY_MS),
            filter.saturating_add(HALF_DAY_MS),
        );
        return date.from_bound().is_some_and(|from| from > low && from < high);
    }
    match (date.from_bound(), date.to_bound()) {
        (Some(from), Some(to)) => from <= filter && to >= filter,
        _ => date.from == Some(filter),
    }
}

fn date_is_before(date: &DateProperty, filter: Option<i64>, is_timestamp: bool) -> bool {
    let (Some(filter), Some(from)) = (filter, date.from_bound()) else {
        return false;
    };
    if is_timestamp {
        from < filter.saturating_sub(HALF_DAY_MS)
    } else {
        from < filter
    }
}

fn date_is_after(date: &DateProperty, filter: Option<i64>, is_timestamp: bool) -> bool {
    let Some(filter) = filter else {
        return false;
    };
    if is_timestamp {
        return date
            .from_bound()
            .is_some_and(|from| from > filter.saturating_add(HALF_DAY_MS));
    }
    match (date.to_bound(), date.from_bound()) {
        (Some(to), _) => to > filter,
        (None, Some(from)) => from > filter,
        (None, None) => false,
    }
}
