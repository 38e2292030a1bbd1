//! Card filter trait and the filter-tree implementation of it.

use crate::property::PropertyTemplate;
use crate::Card;

use super::evaluator::is_filter_group_met;
use super::filter_group::FilterGroup;

/// Trait for filtering cards by various criteria.
pub trait CardFilter {
    /// Returns true if the card matches the filter criteria.
    fn matches(&self, card: &Card) -> bool;

    /// Matching cards in input order.
    fn filter<'a>(&self, cards: &'a [Card]) -> Vec<&'a Card> {
        cards.iter().filter(|card| self.matches(card)).collect()
    }
}

/// Evaluates a filter tree against cards of one board.
pub struct FilterGroupMatcher<'a> {
    group: &'a FilterGroup,
    templates: &'a [PropertyTemplate],
}

impl<'a> FilterGroupMatcher<'a> {
    pub fn new(group: &'a FilterGroup, templates: &'a [PropertyTemplate]) -> Self {
        Self { group, templates }
    }
}

impl CardFilter for FilterGroupMatcher<'_> {
    fn matches(&self, card: &Card) -> bool {
        is_filter_group_met(self.group, self.templates, card)
    }
}
