use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use pantry_core::VERSION;

/// Pantry - track what's on the shelf, one item at a time
#[derive(Parser)]
#[command(name = "pantry")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the store file
    #[arg(short, long, global = true, env = "PANTRY_STORE")]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the store will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Directory that receives captured photos (default: <store dir>/blobs)
    #[arg(long, value_name = "DIR")]
    pub blob_dir: Option<String>,

    /// Public URL the photo directory is served from
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// How item names map to keys (verbatim, lowercase)
    #[arg(long, value_name = "POLICY")]
    pub key_policy: Option<String>,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Item name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Attach a photo read from an image file
    #[arg(long, value_name = "FILE", conflicts_with = "photo_data")]
    pub photo: Option<PathBuf>,

    /// Attach a photo given as a data URL or base64 ("-" reads stdin)
    #[arg(long, value_name = "DATA")]
    pub photo_data: Option<String>,
}

/// Arguments for the `remove` command
#[derive(Args)]
pub struct RemoveArgs {
    /// Item name
    #[arg(value_name = "NAME")]
    pub name: String,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Only show items whose name contains this text (case-insensitive)
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT", conflicts_with = "json")]
    pub format: Option<String>,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Item name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new store and write the config file
    Init(InitArgs),

    /// Add one unit of an item, optionally with a photo
    Add(AddArgs),

    /// Remove one unit of an item
    Remove(RemoveArgs),

    /// List items in the inventory
    List(ListArgs),

    /// Show a single item
    Show(ShowArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_photo_flags_conflict() {
        let result = Cli::try_parse_from([
            "pantry",
            "add",
            "Apple",
            "--photo",
            "a.png",
            "--photo-data",
            "data:image/png;base64,AAAA",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_list_json_conflicts_with_format() {
        let result = Cli::try_parse_from(["pantry", "list", "--json", "--format", "plain"]);
        let err = result.err().expect("conflicting flags rejected");
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::try_parse_from(["pantry", "-vv", "list"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
