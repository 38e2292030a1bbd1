//! Stored encoding of `card` (linked card) property values.
//!
//! Current format: `<boardId>|<cardId>:<title>,<cardId>:<title>,...`
//! Legacy format:  `<boardId>:<cardId>:<title>` (a single card).

use serde::{Deserialize, Serialize};
use std::fmt;

pub const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedCard {
    pub id: String,
    pub title: String,
}

impl LinkedCard {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }

    fn parse_entry(entry: &str) -> Self {
        match entry.split_once(':') {
            Some((id, title)) => Self::new(id, non_empty_title(title)),
            None => Self::new(entry, UNTITLED),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedCards {
    pub board_id: String,
    pub selected_cards: Vec<LinkedCard>,
}

impl LinkedCards {
    pub fn new(board_id: impl Into<String>, selected_cards: Vec<LinkedCard>) -> Self {
        Self {
            board_id: board_id.into(),
            selected_cards,
        }
    }

    /// Reads both encodings. Values matching neither yield no cards.
    pub fn parse(value: &str) -> Self {
        if value.is_empty() {
            return Self::default();
        }

        if let Some((board_id, cards)) = value.split_once('|') {
            let selected_cards = cards
                .split(',')
                .filter(|entry| !entry.is_empty())
                .map(LinkedCard::parse_entry)
                .filter(|card| !card.id.is_empty())
                .collect();
            return Self::new(board_id, selected_cards);
        }

        // Legacy values carry exactly one card and need all three parts.
        let mut parts = value.splitn(3, ':');
        let board_id = parts.next().unwrap_or_default();
        match (parts.next(), parts.next()) {
            (Some(card_id), Some(title)) => {
                Self::new(board_id, vec![LinkedCard::new(card_id, title)])
            }
            _ => Self::new(board_id, Vec::new()),
        }
    }

    pub fn card_ids(&self) -> Vec<&str> {
        self.selected_cards.iter().map(|c| c.id.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_cards.is_empty()
    }

    /// Always writes the current format; `""` when no board is selected.
    pub fn to_property_value(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LinkedCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.board_id.is_empty() {
            return Ok(());
        }
        write!(f, "{}|", self.board_id)?;
        for (i, card) in self.selected_cards.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}:{}", card.id, card.title)?;
        }
        Ok(())
    }
}

/// Linked card ids of a stored value, in stored order.
pub fn extract_card_ids(value: &str) -> Vec<String> {
    LinkedCards::parse(value)
        .selected_cards
        .into_iter()
        .map(|c| c.id)
        .collect()
}

fn non_empty_title(title: &str) -> &str {
    if title.is_empty() {
        UNTITLED
    } else {
        title
    }
}
