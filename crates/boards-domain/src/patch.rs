//! Update/undo patch generation for boards.
//!
//! Every edit produces a pair of patches: one that moves the stored board to
//! the edited version and one that moves it back.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::board::{Board, BoardType, MemberRole};
use crate::property::{find_template, PropertyTemplate, PropertyValue};

/// A partial update of a board. Unset scalar fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub board_type: Option<BoardType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_role: Option<MemberRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_description: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_template: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_version: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_at: Option<i64>,
    #[serde(default)]
    pub updated_properties: BTreeMap<String, PropertyValue>,
    #[serde(default)]
    pub deleted_properties: Vec<String>,
    #[serde(default)]
    pub updated_card_properties: Vec<PropertyTemplate>,
    #[serde(default)]
    pub deleted_card_properties: Vec<String>,
}

fn changed<T: PartialEq + Clone>(from: &T, to: &T) -> Option<T> {
    (from != to).then(|| to.clone())
}

fn set_if_some<T: Clone>(field: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *field = value.clone();
    }
}

impl BoardPatch {
    /// Scalar fields of `to` that differ from `from`.
    fn scalar_changes(from: &Board, to: &Board) -> Self {
        Self {
            team_id: changed(&from.team_id, &to.team_id),
            channel_id: changed(&from.channel_id, &to.channel_id),
            created_by: changed(&from.created_by, &to.created_by),
            modified_by: changed(&from.modified_by, &to.modified_by),
            board_type: changed(&from.board_type, &to.board_type),
            minimum_role: changed(&from.minimum_role, &to.minimum_role),
            title: changed(&from.title, &to.title),
            description: changed(&from.description, &to.description),
            icon: changed(&from.icon, &to.icon),
            show_description: changed(&from.show_description, &to.show_description),
            is_template: changed(&from.is_template, &to.is_template),
            template_version: changed(&from.template_version, &to.template_version),
            create_at: changed(&from.create_at, &to.create_at),
            update_at: changed(&from.update_at, &to.update_at),
            delete_at: changed(&from.delete_at, &to.delete_at),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the patch the way the server stores it.
    pub fn apply_to(&self, board: &mut Board) {
        set_if_some(&mut board.team_id, &self.team_id);
        set_if_some(&mut board.channel_id, &self.channel_id);
        set_if_some(&mut board.created_by, &self.created_by);
        set_if_some(&mut board.modified_by, &self.modified_by);
        set_if_some(&mut board.board_type, &self.board_type);
        set_if_some(&mut board.minimum_role, &self.minimum_role);
        set_if_some(&mut board.title, &self.title);
        set_if_some(&mut board.description, &self.description);
        set_if_some(&mut board.icon, &self.icon);
        set_if_some(&mut board.show_description, &self.show_description);
        set_if_some(&mut board.is_template, &self.is_template);
        set_if_some(&mut board.template_version, &self.template_version);
        set_if_some(&mut board.create_at, &self.create_at);
        set_if_some(&mut board.update_at, &self.update_at);
        set_if_some(&mut board.delete_at, &self.delete_at);

        for key in &self.deleted_properties {
            board.properties.remove(key);
        }
        for (key, value) in &self.updated_properties {
            board.properties.insert(key.clone(), value.clone());
        }

        if !self.updated_card_properties.is_empty() || !self.deleted_card_properties.is_empty() {
            self.apply_card_properties(&mut board.card_properties);
        }
    }

    fn apply_card_properties(&self, card_properties: &mut Vec<PropertyTemplate>) {
        let deleted: HashSet<&str> = self
            .deleted_card_properties
            .iter()
            .map(String::as_str)
            .collect();
        card_properties.retain(|p| !deleted.contains(p.id.as_str()));

        for updated in &self.updated_card_properties {
            match card_properties.iter_mut().find(|p| p.id == updated.id) {
                Some(existing) => *existing = updated.clone(),
                None => card_properties.push(updated.clone()),
            }
        }

        // Placing in ascending index order keeps earlier placements stable.
        let mut positioned: Vec<(usize, &str)> = self
            .updated_card_properties
            .iter()
            .filter_map(|p| p.index.map(|index| (index, p.id.as_str())))
            .collect();
        positioned.sort_by_key(|(index, _)| *index);

        for (index, id) in positioned {
            if let Some(current) = card_properties.iter().position(|p| p.id == id) {
                let template = card_properties.remove(current);
                let target = index.min(card_properties.len());
                card_properties.insert(target, template);
            }
        }
    }
}

/// Keys of `from` missing from `to`, in key order.
fn missing_keys(
    from: &BTreeMap<String, PropertyValue>,
    to: &BTreeMap<String, PropertyValue>,
) -> Vec<String> {
    from.keys().filter(|k| !to.contains_key(*k)).cloned().collect()
}

/// Entries of `to` whose value differs from (or is absent in) `from`.
fn changed_entries(
    from: &BTreeMap<String, PropertyValue>,
    to: &BTreeMap<String, PropertyValue>,
) -> BTreeMap<String, PropertyValue> {
    to.iter()
        .filter(|(key, value)| from.get(*key) != Some(*value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn with_indices(templates: &[PropertyTemplate]) -> Vec<PropertyTemplate> {
    templates
        .iter()
        .enumerate()
        .map(|(index, template)| template.with_index(index))
        .collect()
}

/// Templates of `from` that are new or differ in `against`, with their index.
fn changed_templates(
    from: &[PropertyTemplate],
    against: &[PropertyTemplate],
) -> Vec<PropertyTemplate> {
    from.iter()
        .enumerate()
        .filter(|(_, template)| {
            find_template(against, &template.id)
                .map_or(true, |other| !template.is_property_equal(other))
        })
        .map(|(index, template)| template.with_index(index))
        .collect()
}

fn missing_ids(from: &[PropertyTemplate], to: &[PropertyTemplate]) -> Vec<String> {
    let present: HashSet<&str> = to.iter().map(|p| p.id.as_str()).collect();
    from.iter()
        .filter(|p| !present.contains(p.id.as_str()))
        .map(|p| p.id.clone())
        .collect()
}

/// Builds the `(update, undo)` pair for a card property schema edit.
///
/// Any change in the id sequence re-sends the whole list with indices,
/// otherwise only templates whose content changed are sent.
pub fn create_card_properties_patches(
    new_card_properties: &[PropertyTemplate],
    old_card_properties: &[PropertyTemplate],
) -> (BoardPatch, BoardPatch) {
    let order_changed = !new_card_properties
        .iter()
        .map(|p| &p.id)
        .eq(old_card_properties.iter().map(|p| &p.id));

    let deleted_in_new = missing_ids(old_card_properties, new_card_properties);
    let deleted_in_old = missing_ids(new_card_properties, old_card_properties);

    let (updated_new, updated_old) = if order_changed {
        tracing::debug!(
            "Card property order changed; sending {} templates",
            new_card_properties.len()
        );
        (
            with_indices(new_card_properties),
            with_indices(old_card_properties),
        )
    } else {
        (
            changed_templates(new_card_properties, old_card_properties),
            changed_templates(old_card_properties, new_card_properties),
        )
    };

    (
        BoardPatch {
            updated_card_properties: updated_new,
            deleted_card_properties: deleted_in_new,
            ..BoardPatch::default()
        },
        BoardPatch {
            updated_card_properties: updated_old,
            deleted_card_properties: deleted_in_old,
            ..BoardPatch::default()
        },
    )
}

/// Builds the `(update, undo)` pair that moves `old_board` to `new_board` and
/// back.
pub fn create_patches_from_boards(new_board: &Board, old_board: &Board) -> (BoardPatch, BoardPatch) {
    let (card_properties_patch, card_properties_undo_patch) =
        create_card_properties_patches(&new_board.card_properties, &old_board.card_properties);

    let mut update = BoardPatch::scalar_changes(old_board, new_board);
    update.updated_properties = changed_entries(&old_board.properties, &new_board.properties);
    update.deleted_properties = missing_keys(&old_board.properties, &new_board.properties);
    update.updated_card_properties = card_properties_patch.updated_card_properties;
    update.deleted_card_properties = card_properties_patch.deleted_card_properties;

    let mut undo = BoardPatch::scalar_changes(new_board, old_board);
    undo.updated_properties = changed_entries(&new_board.properties, &old_board.properties);
    undo.deleted_properties = missing_keys(&new_board.properties, &old_board.properties);
    undo.updated_card_properties = card_properties_undo_patch.updated_card_properties;
    undo.deleted_card_properties = card_properties_undo_patch.deleted_card_properties;

    tracing::debug!(
        board_id = %new_board.id,
        update_empty = update.is_empty(),
        "Created board patches"
    );

    (update, undo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{PropertyOption, PropertyType};

    fn template(id: &str, name: &str) -> PropertyTemplate {
        PropertyTemplate::new(id, name, PropertyType::Text)
    }

    fn board_with(card_properties: Vec<PropertyTemplate>) -> Board {
        let mut board = Board::new("Board".to_string());
        board.id = "b1".to_string();
        board.create_at = 100;
        board.update_at = 100;
        board.card_properties = card_properties;
        board
    }

    fn ids(templates: &[PropertyTemplate]) -> Vec<&str> {
        templates.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_no_change_yields_empty_patches() {
        let board = board_with(vec![template("a", "A")]);
        let (update, undo) = create_patches_from_boards(&board, &board.clone());
        assert!(update.is_empty());
        assert!(undo.is_empty());
    }

    #[test]
    fn test_scalar_fields() {
        let old = board_with(vec![]);
        let mut new = old.clone();
        new.title = "Renamed".to_string();
        new.show_description = true;
        new.board_type = BoardType::Open;

        let (update, undo) = create_patches_from_boards(&new, &old);
        assert_eq!(update.title.as_deref(), Some("Renamed"));
        assert_eq!(update.show_description, Some(true));
        assert_eq!(update.board_type, Some(BoardType::Open));
        assert_eq!(update.description, None);

        assert_eq!(undo.title.as_deref(), Some("Board"));
        assert_eq!(undo.show_description, Some(false));
        assert_eq!(undo.board_type, Some(BoardType::Private));
    }

    #[test]
    fn test_properties_map() {
        let mut old = board_with(vec![]);
        old.properties.insert("keep".to_string(), "same".into());
        old.properties.insert("edit".to_string(), "before".into());
        old.properties.insert("gone".to_string(), "x".into());
        let mut new = old.clone();
        new.properties.remove("gone");
        new.properties.insert("edit".to_string(), "after".into());
        new.properties.insert("added".to_string(), "y".into());

        let (update, undo) = create_patches_from_boards(&new, &old);
        assert_eq!(update.deleted_properties, vec!["gone".to_string()]);
        assert_eq!(update.updated_properties.len(), 2);
        assert_eq!(update.updated_properties["edit"], PropertyValue::from("after"));
        assert_eq!(update.updated_properties["added"], PropertyValue::from("y"));

        assert_eq!(undo.deleted_properties, vec!["added".to_string()]);
        assert_eq!(undo.updated_properties.len(), 2);
        assert_eq!(undo.updated_properties["edit"], PropertyValue::from("before"));
        assert_eq!(undo.updated_properties["gone"], PropertyValue::from("x"));
    }

    #[test]
    fn test_reorder_sends_full_lists() {
        let old = vec![template("A", "a"), template("B", "b"), template("C", "c")];
        let new = vec![template("B", "b"), template("A", "a"), template("C", "c")];

        let (update, undo) = create_card_properties_patches(&new, &old);
        assert_eq!(ids(&update.updated_card_properties), vec!["B", "A", "C"]);
        let indices: Vec<_> = update
            .updated_card_properties
            .iter()
            .map(|t| t.index)
            .collect();
        assert_eq!(indices, vec![Some(0), Some(1), Some(2)]);
        assert!(update.deleted_card_properties.is_empty());

        assert_eq!(ids(&undo.updated_card_properties), vec!["A", "B", "C"]);
        assert!(undo.deleted_card_properties.is_empty());
    }

    #[test]
    fn test_addition_counts_as_order_change() {
        let old = vec![template("A", "a")];
        let new = vec![template("A", "a"), template("B", "b")];

        let (update, undo) = create_card_properties_patches(&new, &old);
        assert_eq!(ids(&update.updated_card_properties), vec!["A", "B"]);
        assert!(update.deleted_card_properties.is_empty());
        assert_eq!(ids(&undo.updated_card_properties), vec!["A"]);
        assert_eq!(undo.deleted_card_properties, vec!["B".to_string()]);
    }

    #[test]
    fn test_removal_deletes_in_update() {
        let old = vec![template("A", "a"), template("B", "b")];
        let new = vec![template("A", "a")];

        let (update, undo) = create_card_properties_patches(&new, &old);
        assert_eq!(update.deleted_card_properties, vec!["B".to_string()]);
        assert!(undo.deleted_card_properties.is_empty());
        assert_eq!(ids(&undo.updated_card_properties), vec!["A", "B"]);
    }

    #[test]
    fn test_content_change_is_targeted() {
        let old = vec![
            template("A", "a"),
            template("B", "b").with_options(vec![PropertyOption::new("o1", "One", "red")]),
            template("C", "c"),
        ];
        let mut new = old.clone();
        new[1].options[0].color = "blue".to_string();

        let (update, undo) = create_card_properties_patches(&new, &old);
        assert_eq!(update.updated_card_properties.len(), 1);
        assert_eq!(update.updated_card_properties[0].id, "B");
        assert_eq!(update.updated_card_properties[0].index, Some(1));
        assert_eq!(update.updated_card_properties[0].options[0].color, "blue");

        assert_eq!(undo.updated_card_properties.len(), 1);
        assert_eq!(undo.updated_card_properties[0].options[0].color, "red");
        assert!(update.deleted_card_properties.is_empty());
        assert!(undo.deleted_card_properties.is_empty());
    }

    #[test]
    fn test_option_reorder_is_not_a_change() {
        let options = vec![
            PropertyOption::new("o1", "One", "red"),
            PropertyOption::new("o2", "Two", "blue"),
        ];
        let old = vec![template("A", "a").with_options(options.clone())];
        let mut reversed = options;
        reversed.reverse();
        let new = vec![template("A", "a").with_options(reversed)];

        let (update, undo) = create_card_properties_patches(&new, &old);
        assert!(update.updated_card_properties.is_empty());
        assert!(undo.updated_card_properties.is_empty());
    }

    fn strip_indices(templates: &[PropertyTemplate]) -> Vec<PropertyTemplate> {
        templates
            .iter()
            .map(|t| PropertyTemplate {
                index: None,
                ..t.clone()
            })
            .collect()
    }

    #[test]
    fn test_patch_round_trip() {
        let mut old = board_with(vec![
            template("A", "a"),
            template("B", "b"),
            template("C", "c"),
        ]);
        old.description = "before".to_string();
        old.properties.insert("k1".to_string(), "v1".into());
        old.properties.insert("k2".to_string(), PropertyValue::List(vec!["x".to_string()]));

        let mut new = old.clone();
        new.description = "after".to_string();
        new.minimum_role = MemberRole::Editor;
        new.update_at = 200;
        new.properties.remove("k1");
        new.properties.insert("k3".to_string(), "v3".into());
        new.card_properties = vec![template("C", "c renamed"), template("D", "d"), template("A", "a")];

        let (update, undo) = create_patches_from_boards(&new, &old);

        let mut patched = old.clone();
        update.apply_to(&mut patched);
        assert_eq!(patched.description, new.description);
        assert_eq!(patched.minimum_role, new.minimum_role);
        assert_eq!(patched.update_at, new.update_at);
        assert_eq!(patched.properties, new.properties);
        assert_eq!(strip_indices(&patched.card_properties), new.card_properties);

        undo.apply_to(&mut patched);
        assert_eq!(patched.description, old.description);
        assert_eq!(patched.minimum_role, old.minimum_role);
        assert_eq!(patched.update_at, old.update_at);
        assert_eq!(patched.properties, old.properties);
        assert_eq!(strip_indices(&patched.card_properties), old.card_properties);
    }

    #[test]
    fn test_patches_mirror_each_other() {
        let mut old = board_with(vec![]);
        old.properties.insert("a".to_string(), "1".into());
        old.properties.insert("b".to_string(), "2".into());
        let mut new = board_with(vec![]);
        new.properties.insert("b".to_string(), "3".into());
        new.properties.insert("c".to_string(), "4".into());

        let (update, undo) = create_patches_from_boards(&new, &old);

        let old_only: Vec<&String> = old
            .properties
            .keys()
            .filter(|k| !new.properties.contains_key(*k))
            .collect();
        let update_deleted: Vec<&String> = update.deleted_properties.iter().collect();
        assert_eq!(update_deleted, old_only);
        assert!(update
            .deleted_properties
            .iter()
            .all(|k| undo.updated_properties.contains_key(k)));
        assert!(undo
            .deleted_properties
            .iter()
            .all(|k| update.updated_properties.contains_key(k)));
    }

    #[test]
    fn test_patch_json_shape() {
        let old = board_with(vec![]);
        let mut new = old.clone();
        new.title = "T".to_string();
        let (update, _) = create_patches_from_boards(&new, &old);

        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["title"], "T");
        assert!(value.get("description").is_none());
        assert_eq!(value["deletedProperties"], serde_json::json!([]));
        assert_eq!(value["updatedCardProperties"], serde_json::json!([]));
    }
}
