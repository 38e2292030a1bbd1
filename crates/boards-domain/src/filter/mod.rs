//! Card filtering functionality.
//!
//! Filter trees of clauses and and/or groups, their evaluation against cards,
//! and the property values that make a new card meet a filter.

pub mod card_filter;
pub mod evaluator;
pub mod filter_group;
pub mod suggest;

pub use card_filter::{CardFilter, FilterGroupMatcher};
pub use evaluator::{apply_filter_group, is_clause_met, is_filter_group_met, TITLE_PROPERTY_ID};
pub use filter_group::{FilterClause, FilterCondition, FilterGroup, FilterNode, FilterOperation};
pub use suggest::{
    card_matching_filter_group, properties_that_meet_filter_group,
    property_that_meets_filter_clause,
};
