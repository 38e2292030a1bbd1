//! Groups driven by a template's option list (select and scalar types).

use crate::property::{PropertyOption, PropertyTemplate, PropertyValue};
use crate::Card;

use super::{empty_group_label, BoardGroup, VisibleAndHiddenGroups};

/// Options missing from both lists are appended to the visible ones, and the
/// empty group leads unless the caller placed it.
pub(super) fn get_option_groups<'a>(
    cards: &'a [Card],
    visible_option_ids: &[String],
    hidden_option_ids: &[String],
    group_by: &PropertyTemplate,
) -> VisibleAndHiddenGroups<'a> {
    let unassigned = group_by
        .options
        .iter()
        .filter(|o| !visible_option_ids.contains(&o.id) && !hidden_option_ids.contains(&o.id))
        .map(|o| o.id.clone());

    let mut all_visible_option_ids: Vec<String> =
        visible_option_ids.iter().cloned().chain(unassigned).collect();

    let empty_placed = all_visible_option_ids
        .iter()
        .chain(hidden_option_ids)
        .any(String::is_empty);
    if !empty_placed {
        all_visible_option_ids.insert(0, String::new());
    }

    VisibleAndHiddenGroups {
        visible: group_cards_by_options(cards, &all_visible_option_ids, group_by),
        hidden: group_cards_by_options(cards, hidden_option_ids, group_by),
    }
}

fn option_id_of<'c>(card: &'c Card, group_by: &PropertyTemplate) -> Option<&'c str> {
    card.property(&group_by.id)
        .and_then(PropertyValue::as_text)
        .filter(|id| !id.is_empty())
}

fn group_cards_by_options<'a>(
    cards: &'a [Card],
    option_ids: &[String],
    group_by: &PropertyTemplate,
) -> Vec<BoardGroup<'a>> {
    option_ids
        .iter()
        .filter_map(|option_id| {
            if option_id.is_empty() {
                // Values naming a deleted option count as empty.
                let cards = cards
                    .iter()
                    .filter(|card| {
                        option_id_of(card, group_by)
                            .map_or(true, |id| group_by.find_option(id).is_none())
                    })
                    .collect();
                return Some(BoardGroup {
                    option: PropertyOption::new("", empty_group_label(group_by), ""),
                    cards,
                });
            }

            let Some(option) = group_by.find_option(option_id) else {
                tracing::debug!(option_id = %option_id, "Skipping deleted option");
                return None;
            };
            let cards = cards
                .iter()
                .filter(|card| option_id_of(card, group_by) == Some(option_id.as_str()))
                .collect();
            Some(BoardGroup {
                option: option.clone(),
                cards,
            })
        })
        .collect()
}
