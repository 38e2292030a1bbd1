//! Card grouping for board views.
//!
//! Partitions cards into visible and hidden [`BoardGroup`]s by the value of a
//! grouping property. Select-like properties are driven by the explicit option
//! id lists; person, multi-valued and linked-card properties produce one group
//! per distinct value in first-seen order.

mod keyed;
mod options;

use serde::Serialize;

use crate::property::{PropertyOption, PropertyTemplate, PropertyType};
use crate::Card;

/// A bucket of cards sharing a grouping value. Cards keep input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardGroup<'a> {
    pub option: PropertyOption,
    pub cards: Vec<&'a Card>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VisibleAndHiddenGroups<'a> {
    pub visible: Vec<BoardGroup<'a>>,
    pub hidden: Vec<BoardGroup<'a>>,
}

impl<'a> VisibleAndHiddenGroups<'a> {
    /// Visible groups first, then hidden ones.
    pub fn groups(&self) -> impl Iterator<Item = &BoardGroup<'a>> {
        self.visible.iter().chain(self.hidden.iter())
    }

    pub fn card_count(&self) -> usize {
        self.groups().map(|group| group.cards.len()).sum()
    }
}

pub fn get_visible_and_hidden_groups<'a>(
    cards: &'a [Card],
    visible_option_ids: &[String],
    hidden_option_ids: &[String],
    group_by: &PropertyTemplate,
) -> VisibleAndHiddenGroups<'a> {
    match group_by.property_type {
        PropertyType::CreatedBy | PropertyType::UpdatedBy | PropertyType::Person => {
            keyed::group_by_key(cards, hidden_option_ids, |card| {
                keyed::person_option(card, group_by)
            })
        }
        PropertyType::MultiPerson => keyed::group_by_key(cards, hidden_option_ids, |card| {
            keyed::multi_person_option(card, group_by)
        }),
        PropertyType::Card => keyed::group_by_key(cards, hidden_option_ids, |card| {
            keyed::linked_card_option(card, group_by)
        }),
        PropertyType::MultiSelect => keyed::group_by_key(cards, hidden_option_ids, |card| {
            keyed::multi_select_option(card, group_by)
        }),
        _ => options::get_option_groups(cards, visible_option_ids, hidden_option_ids, group_by),
    }
}

/// Label of the group collecting cards without a value.
pub(crate) fn empty_group_label(group_by: &PropertyTemplate) -> String {
    format!("No {}", group_by.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linked_card::{LinkedCard, LinkedCards};
    use std::collections::HashSet;

    fn card(id: &str) -> Card {
        let mut card = Card::new("b1".to_string(), format!("Card {}", id));
        card.id = id.to_string();
        card
    }

    fn ids(group: &BoardGroup<'_>) -> Vec<String> {
        group.cards.iter().map(|c| c.id.clone()).collect()
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn assert_complete(cards: &[Card], groups: &VisibleAndHiddenGroups<'_>) {
        let seen: Vec<&str> = groups
            .groups()
            .flat_map(|g| g.cards.iter().map(|c| c.id.as_str()))
            .collect();
        let unique: HashSet<&str> = seen.iter().copied().collect();
        assert_eq!(seen.len(), cards.len(), "card lost or duplicated");
        assert_eq!(unique.len(), cards.len());
    }

    #[test]
    fn test_select_with_auto_empty_group() {
        let template = PropertyTemplate::new("p", "p", PropertyType::Select)
            .with_options(vec![PropertyOption::new("optA", "A", "")]);
        let cards = vec![
            card("1").with_property("p", "optA"),
            card("2").with_property("p", "optA"),
            card("3"),
        ];

        let groups = get_visible_and_hidden_groups(&cards, &strings(&["optA"]), &[], &template);

        assert_eq!(groups.visible.len(), 2);
        assert_eq!(groups.visible[0].option, PropertyOption::new("", "No p", ""));
        assert_eq!(ids(&groups.visible[0]), vec!["3"]);
        assert_eq!(groups.visible[1].option.id, "optA");
        assert_eq!(ids(&groups.visible[1]), vec!["1", "2"]);
        assert!(groups.hidden.is_empty());
    }

    fn status_template() -> PropertyTemplate {
        PropertyTemplate::new("status", "Status", PropertyType::Select).with_options(vec![
            PropertyOption::new("todo", "To Do", "gray"),
            PropertyOption::new("doing", "Doing", "blue"),
            PropertyOption::new("done", "Done", "green"),
        ])
    }

    #[test]
    fn test_select_hidden_unassigned_and_stale_options() {
        let template = status_template();
        let cards = vec![
            card("1").with_property("status", "done"),
            card("2").with_property("status", "doing"),
            card("3").with_property("status", "deleted-option"),
            card("4").with_property("status", "todo"),
        ];

        let groups = get_visible_and_hidden_groups(
            &cards,
            &strings(&["doing", "deleted-option"]),
            &strings(&["done"]),
            &template,
        );

        let visible: Vec<&str> = groups.visible.iter().map(|g| g.option.id.as_str()).collect();
        assert_eq!(visible, vec!["", "doing", "todo"]);
        assert_eq!(ids(&groups.visible[0]), vec!["3"]);
        assert_eq!(ids(&groups.visible[2]), vec!["4"]);

        assert_eq!(groups.hidden.len(), 1);
        assert_eq!(groups.hidden[0].option.value, "Done");
        assert_eq!(ids(&groups.hidden[0]), vec!["1"]);
        assert_complete(&cards, &groups);
    }

    #[test]
    fn test_select_explicit_empty_group_position() {
        let template = status_template();
        let cards = vec![card("1"), card("2").with_property("status", "todo")];

        let groups = get_visible_and_hidden_groups(
            &cards,
            &strings(&["todo", "", "doing", "done"]),
            &[],
            &template,
        );
        let visible: Vec<&str> = groups.visible.iter().map(|g| g.option.id.as_str()).collect();
        assert_eq!(visible, vec!["todo", "", "doing", "done"]);

        let hidden_empty =
            get_visible_and_hidden_groups(&cards, &strings(&["todo"]), &strings(&[""]), &template);
        assert!(hidden_empty.visible.iter().all(|g| !g.option.id.is_empty()));
        assert_eq!(hidden_empty.hidden.len(), 1);
        assert_eq!(ids(&hidden_empty.hidden[0]), vec!["1"]);
        assert_complete(&cards, &hidden_empty);
    }

    #[test]
    fn test_person_groups_first_seen_order() {
        let template = PropertyTemplate::new("owner", "Owner", PropertyType::Person);
        let cards = vec![
            card("1").with_property("owner", "u2"),
            card("2").with_property("owner", "u1"),
            card("3").with_property("owner", "u2"),
        ];

        let groups = get_visible_and_hidden_groups(&cards, &[], &strings(&["u1"]), &template);
        assert_eq!(groups.visible.len(), 1);
        assert_eq!(groups.visible[0].option, PropertyOption::new("u2", "u2", ""));
        assert_eq!(ids(&groups.visible[0]), vec!["1", "3"]);
        assert_eq!(groups.hidden.len(), 1);
        assert_eq!(ids(&groups.hidden[0]), vec!["2"]);
    }

    #[test]
    fn test_created_by_and_updated_by_groups() {
        let mut a = card("1");
        a.created_by = "alice".to_string();
        a.modified_by = "bob".to_string();
        let mut b = card("2");
        b.created_by = "bob".to_string();
        b.modified_by = "bob".to_string();
        let cards = vec![a, b];

        let created = PropertyTemplate::new("c", "Created By", PropertyType::CreatedBy);
        let groups = get_visible_and_hidden_groups(&cards, &[], &[], &created);
        let keys: Vec<&str> = groups.visible.iter().map(|g| g.option.id.as_str()).collect();
        assert_eq!(keys, vec!["alice", "bob"]);

        let updated = PropertyTemplate::new("u", "Updated By", PropertyType::UpdatedBy);
        let groups = get_visible_and_hidden_groups(&cards, &[], &[], &updated);
        assert_eq!(groups.visible.len(), 1);
        assert_eq!(ids(&groups.visible[0]), vec!["1", "2"]);
    }

    #[test]
    fn test_multi_person_groups_ignore_order() {
        let template = PropertyTemplate::new("team", "Team", PropertyType::MultiPerson);
        let cards = vec![
            card("1").with_property("team", strings(&["u2", "u1"])),
            card("2").with_property("team", strings(&["u1", "u2"])),
            card("3"),
            card("4").with_property("team", "u3"),
        ];

        let groups = get_visible_and_hidden_groups(&cards, &[], &[], &template);
        assert_eq!(groups.visible.len(), 3);
        assert_eq!(groups.visible[0].option.id, "u1,u2");
        assert_eq!(ids(&groups.visible[0]), vec!["1", "2"]);
        assert_eq!(groups.visible[1].option, PropertyOption::new("", "No Team", ""));
        assert_eq!(groups.visible[2].option.id, "u3");
        assert_complete(&cards, &groups);
    }

    #[test]
    fn test_linked_card_groups() {
        let template = PropertyTemplate::new("rel", "Related", PropertyType::Card);
        let forward =
            LinkedCards::new("lb", vec![LinkedCard::new("c1", "One"), LinkedCard::new("c2", "Two")]);
        let reversed =
            LinkedCards::new("lb", vec![LinkedCard::new("c2", "Two"), LinkedCard::new("c1", "One")]);
        let cards = vec![
            card("1").with_property("rel", forward.to_property_value()),
            card("2").with_property("rel", "lb|"),
            card("3").with_property("rel", reversed.to_property_value()),
            card("4").with_property("rel", "lb:c9:Legacy: title"),
        ];

        let groups = get_visible_and_hidden_groups(&cards, &[], &strings(&[""]), &template);
        assert_eq!(groups.visible.len(), 2);
        assert_eq!(groups.visible[0].option.id, "c1:One,c2:Two");
        assert_eq!(groups.visible[0].option.value, "One, Two");
        assert_eq!(ids(&groups.visible[0]), vec!["1", "3"]);
        assert_eq!(groups.visible[1].option.value, "Legacy: title");

        assert_eq!(groups.hidden.len(), 1);
        assert_eq!(groups.hidden[0].option, PropertyOption::new("", "No Related", ""));
        assert_complete(&cards, &groups);
    }

    #[test]
    fn test_multi_select_groups() {
        let template = PropertyTemplate::new("tags", "Tags", PropertyType::MultiSelect)
            .with_options(vec![
                PropertyOption::new("bug", "Bug", "red"),
                PropertyOption::new("api", "API", "blue"),
            ]);
        let cards = vec![
            card("1").with_property("tags", strings(&["bug", "api"])),
            card("2").with_property("tags", strings(&["api", "bug"])),
            card("3").with_property("tags", strings(&["gone"])),
            card("4").with_property("tags", Vec::<String>::new()),
        ];

        let groups = get_visible_and_hidden_groups(&cards, &[], &[], &template);
        assert_eq!(groups.visible.len(), 3);

        let combined = &groups.visible[0];
        assert_eq!(combined.option, PropertyOption::new("api,bug", "API, Bug", "blue"));
        assert_eq!(ids(combined), vec!["1", "2"]);

        assert_eq!(groups.visible[1].option, PropertyOption::new("gone", "gone", ""));
        assert_eq!(groups.visible[2].option, PropertyOption::new("", "No Tags", ""));
        assert_complete(&cards, &groups);
    }

    #[test]
    fn test_multi_select_color_skips_deleted_options() {
        let template = PropertyTemplate::new("tags", "Tags", PropertyType::MultiSelect)
            .with_options(vec![PropertyOption::new("bug", "Bug", "red")]);
        let cards = vec![card("1").with_property("tags", strings(&["bug", "archived"]))];

        let groups = get_visible_and_hidden_groups(&cards, &[], &[], &template);
        assert_eq!(
            groups.visible[0].option,
            PropertyOption::new("archived,bug", "archived, Bug", "red")
        );
    }

    #[test]
    fn test_every_card_lands_in_exactly_one_group() {
        let cards = vec![
            card("1").with_property("g", "todo"),
            card("2").with_property("g", strings(&["u1", "todo"])),
            card("3").with_property("g", "lb|c1:X"),
            card("4"),
            card("5").with_property("g", "done"),
        ];
        for property_type in [
            PropertyType::Select,
            PropertyType::Text,
            PropertyType::Person,
            PropertyType::MultiPerson,
            PropertyType::MultiSelect,
            PropertyType::Card,
            PropertyType::CreatedBy,
            PropertyType::UpdatedBy,
        ] {
            let template = PropertyTemplate::new("g", "G", property_type).with_options(vec![
                PropertyOption::new("todo", "To Do", ""),
                PropertyOption::new("done", "Done", ""),
            ]);
            let groups = get_visible_and_hidden_groups(
                &cards,
                &strings(&["todo"]),
                &strings(&["done", "todo,u1"]),
                &template,
            );
            assert_complete(&cards, &groups);
            assert_eq!(groups.card_count(), cards.len());
        }
    }
}
