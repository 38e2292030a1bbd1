use crate::cli::DiffArgs;
use crate::input::read_json;
use crate::output::OutputFormat;
use boards_domain::{create_patches_from_boards, Board, BoardPatch};
use serde::Serialize;

#[derive(Serialize)]
struct DiffResult {
    update: BoardPatch,
    undo: BoardPatch,
}

pub fn handle(format: OutputFormat, args: DiffArgs) -> anyhow::Result<()> {
    let old_board: Board = read_json(&args.old)?;
    let new_board: Board = read_json(&args.new)?;

    if old_board.id != new_board.id {
        tracing::warn!(
            old = %old_board.id,
            new = %new_board.id,
            "Diffing boards with different ids"
        );
    }

    let (update, undo) = create_patches_from_boards(&new_board, &old_board);
    format.success(DiffResult { update, undo })
}
