//! Groups keyed by the card's own value rather than by template options.

use std::collections::HashMap;

use crate::linked_card::LinkedCards;
use crate::property::{PropertyOption, PropertyTemplate, PropertyType, PropertyValue};
use crate::Card;

use super::{empty_group_label, BoardGroup, VisibleAndHiddenGroups};

/// One group per distinct option id in first-seen order; groups whose id is
/// listed in `hidden_option_ids` are hidden.
pub(super) fn group_by_key<'a>(
    cards: &'a [Card],
    hidden_option_ids: &[String],
    option_of: impl Fn(&Card) -> PropertyOption,
) -> VisibleAndHiddenGroups<'a> {
    let mut groups: Vec<BoardGroup<'a>> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for card in cards {
        let option = option_of(card);
        match positions.get(&option.id) {
            Some(&position) => groups[position].cards.push(card),
            None => {
                positions.insert(option.id.clone(), groups.len());
                groups.push(BoardGroup {
                    option,
                    cards: vec![card],
                });
            }
        }
    }

    let (hidden, visible): (Vec<_>, Vec<_>) = groups
        .into_iter()
        .partition(|group| hidden_option_ids.contains(&group.option.id));

    VisibleAndHiddenGroups { visible, hidden }
}

fn value_of<'c>(card: &'c Card, group_by: &PropertyTemplate) -> Option<&'c PropertyValue> {
    card.property(&group_by.id)
}

/// Sorted, de-duplicated entries of a multi-valued property.
fn sorted_entries<'c>(card: &'c Card, group_by: &PropertyTemplate) -> Vec<&'c str> {
    let mut entries = value_of(card, group_by).map_or_else(Vec::new, PropertyValue::entries);
    entries.sort_unstable();
    entries.dedup();
    entries
}

fn empty_option(group_by: &PropertyTemplate) -> PropertyOption {
    PropertyOption::new("", empty_group_label(group_by), "")
}

/// Labels equal the user id; resolving display names is left to the caller.
pub(super) fn person_option(card: &Card, group_by: &PropertyTemplate) -> PropertyOption {
    let key = match group_by.property_type {
        PropertyType::CreatedBy => card.created_by.clone(),
        PropertyType::UpdatedBy => card.modified_by.clone(),
        _ => value_of(card, group_by)
            .map(PropertyValue::to_string)
            .unwrap_or_default(),
    };
    PropertyOption::new(key.clone(), key, "")
}

pub(super) fn multi_person_option(card: &Card, group_by: &PropertyTemplate) -> PropertyOption {
    let people = sorted_entries(card, group_by);
    if people.is_empty() {
        return empty_option(group_by);
    }
    let key = people.join(",");
    PropertyOption::new(key.clone(), key, "")
}

pub(super) fn linked_card_option(card: &Card, group_by: &PropertyTemplate) -> PropertyOption {
    let value = value_of(card, group_by)
        .and_then(PropertyValue::as_text)
        .unwrap_or_default();
    let mut linked = LinkedCards::parse(value).selected_cards;
    if linked.is_empty() {
        return empty_option(group_by);
    }

    linked.sort_by(|a, b| a.id.cmp(&b.id));
    let key = linked
        .iter()
        .map(|c| format!("{}:{}", c.id, c.title))
        .collect::<Vec<_>>()
        .join(",");
    let label = linked
        .iter()
        .map(|c| c.title.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    PropertyOption::new(key, label, "")
}

/// Deleted options fall back to their raw id as label.
pub(super) fn multi_select_option(card: &Card, group_by: &PropertyTemplate) -> PropertyOption {
    let selected = sorted_entries(card, group_by);
    if selected.is_empty() {
        return empty_option(group_by);
    }

    let color = selected
        .iter()
        .find_map(|id| group_by.find_option(id))
        .map(|option| option.color.clone())
        .unwrap_or_default();
    let label = selected
        .iter()
        .map(|id| group_by.find_option(id).map_or(*id, |option| option.value.as_str()))
        .collect::<Vec<_>>()
        .join(", ");
    PropertyOption::new(selected.join(","), label, color)
}
