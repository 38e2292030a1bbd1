use crate::cli::FilterArgs;
use crate::input::read_json;
use crate::output::OutputFormat;
use boards_domain::{Board, Card, CardFilter, FilterGroup, FilterGroupMatcher};

pub fn handle(format: OutputFormat, args: FilterArgs) -> anyhow::Result<()> {
    let board: Board = read_json(&args.board)?;
    let cards: Vec<Card> = read_json(&args.cards)?;
    let group: FilterGroup = read_json(&args.filter)?;

    let matcher = FilterGroupMatcher::new(&group, &board.card_properties);
    let matched = matcher.filter(&cards);
    tracing::debug!(total = cards.len(), matched = matched.len(), "Filtered cards");

    format.list(matched)
}
