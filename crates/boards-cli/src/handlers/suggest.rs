use crate::cli::SuggestArgs;
use crate::input::read_json;
use crate::output::OutputFormat;
use boards_domain::{properties_that_meet_filter_group, Board, FilterGroup};

pub fn handle(format: OutputFormat, args: SuggestArgs) -> anyhow::Result<()> {
    let board: Board = read_json(&args.board)?;
    let group: FilterGroup = read_json(&args.filter)?;

    let properties = properties_that_meet_filter_group(Some(&group), &board.card_properties);
    format.success(properties)
}
