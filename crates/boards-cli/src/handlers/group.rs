use crate::cli::GroupArgs;
use crate::input::read_json;
use crate::output::OutputFormat;
use boards_core::BoardsError;
use boards_domain::{get_visible_and_hidden_groups, Board, Card};

pub fn handle(format: OutputFormat, args: GroupArgs) -> anyhow::Result<()> {
    let board: Board = read_json(&args.board)?;
    let cards: Vec<Card> = read_json(&args.cards)?;

    let group_by = board
        .find_card_property(&args.property)
        .ok_or_else(|| BoardsError::NotFound(format!("Card property {}", args.property)))?;

    let groups = get_visible_and_hidden_groups(&cards, &args.visible, &args.hidden, group_by);
    format.success(groups)
}
