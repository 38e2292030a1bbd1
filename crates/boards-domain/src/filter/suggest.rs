//! Property values that make a new card meet the active filter.

use std::collections::BTreeMap;

use crate::board::Board;
use crate::property::{find_template, PropertyTemplate, PropertyType};
use crate::Card;

use super::filter_group::{FilterClause, FilterCondition, FilterGroup, FilterOperation};

/// Suggests one value per top-level clause of `group`; nested groups are not
/// considered. For `or` groups only the first clause needs to hold.
pub fn properties_that_meet_filter_group(
    group: Option<&FilterGroup>,
    templates: &[PropertyTemplate],
) -> BTreeMap<String, String> {
    let Some(group) = group else {
        return BTreeMap::new();
    };

    let clauses: Vec<&FilterClause> = match group.operation {
        FilterOperation::Or => group.clauses().take(1).collect(),
        FilterOperation::And => group.clauses().collect(),
    };

    clauses
        .into_iter()
        .filter_map(|clause| {
            property_that_meets_filter_clause(clause, templates)
                .filter(|value| !value.is_empty())
                .map(|value| (clause.property_id.clone(), value))
        })
        .collect()
}

/// A value for the clause's property that satisfies it, when one can be
/// derived.
pub fn property_that_meets_filter_clause(
    clause: &FilterClause,
    templates: &[PropertyTemplate],
) -> Option<String> {
    let Some(template) = find_template(templates, &clause.property_id) else {
        tracing::warn!(
            property_id = %clause.property_id,
            "Cannot find template for filter clause"
        );
        return None;
    };

    if matches!(
        template.property_type,
        PropertyType::CreatedBy | PropertyType::UpdatedBy
    ) {
        return None;
    }

    match clause.condition {
        FilterCondition::Includes => clause.first_value().map(str::to_string),
        FilterCondition::IsNotEmpty if template.property_type == PropertyType::Select => {
            template.options.first().map(|option| option.id.clone())
        }
        _ => None,
    }
}

/// A new card on `board` pre-populated to meet `group`.
pub fn card_matching_filter_group(
    board: &Board,
    group: Option<&FilterGroup>,
    title: String,
) -> Card {
    let mut card = Card::new(board.id.clone(), title);
    for (property_id, value) in properties_that_meet_filter_group(group, &board.card_properties) {
        card.set_property(property_id, value);
    }
    card
}
