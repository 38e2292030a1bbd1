pub mod board;
pub mod card;
pub mod date_property;
pub mod filter;
pub mod group;
pub mod linked_card;
pub mod patch;
pub mod property;

pub use board::{Board, BoardId, BoardType, MemberRole};
pub use card::{Card, CardFields, CardId};
pub use date_property::DateProperty;
pub use filter::{
    apply_filter_group, is_filter_group_met, properties_that_meet_filter_group, CardFilter,
    FilterClause, FilterCondition, FilterGroup, FilterGroupMatcher, FilterNode, FilterOperation,
};
pub use group::{get_visible_and_hidden_groups, BoardGroup, VisibleAndHiddenGroups};
pub use linked_card::{LinkedCard, LinkedCards};
pub use patch::{create_card_properties_patches, create_patches_from_boards, BoardPatch};
pub use property::{PropertyOption, PropertyTemplate, PropertyType, PropertyValue};
