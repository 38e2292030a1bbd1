use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "boards")]
#[command(about = "Board undo patches, card filters and card grouping", long_about = None)]
#[command(version, arg_required_else_help = true)]
pub struct Cli {
    /// Pretty-print JSON output (overrides the config file)
    #[arg(long, global = true, env = "BOARDS_PRETTY")]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the update and undo patches between two versions of a board
    Diff(DiffArgs),
    /// List the cards that meet a filter
    Filter(FilterArgs),
    /// Suggest property values that make a new card meet a filter
    Suggest(SuggestArgs),
    /// Group cards by a board property
    Group(GroupArgs),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct DiffArgs {
    /// Board JSON before the edit
    #[arg(long, value_name = "FILE")]
    pub old: PathBuf,
    /// Board JSON after the edit
    #[arg(long, value_name = "FILE")]
    pub new: PathBuf,
}

#[derive(Args)]
pub struct FilterArgs {
    #[arg(long, value_name = "FILE")]
    pub board: PathBuf,
    /// JSON array of cards
    #[arg(long, value_name = "FILE")]
    pub cards: PathBuf,
    /// Filter group JSON
    #[arg(long, value_name = "FILE")]
    pub filter: PathBuf,
}

#[derive(Args)]
pub struct SuggestArgs {
    #[arg(long, value_name = "FILE")]
    pub board: PathBuf,
    /// Filter group JSON
    #[arg(long, value_name = "FILE")]
    pub filter: PathBuf,
}

#[derive(Args)]
pub struct GroupArgs {
    #[arg(long, value_name = "FILE")]
    pub board: PathBuf,
    /// JSON array of cards
    #[arg(long, value_name = "FILE")]
    pub cards: PathBuf,
    /// Id of the card property to group by
    #[arg(long)]
    pub property: String,
    /// Option ids shown as visible groups, in order
    #[arg(long, value_delimiter = ',')]
    pub visible: Vec<String>,
    /// Option ids shown as hidden groups, in order
    #[arg(long, value_delimiter = ',')]
    pub hidden: Vec<String>,
}
