pub mod add;
pub mod generate;
pub mod list;
pub mod measure;
pub mod tags;
pub mod ui;
pub mod utils;

pub use add::handle_add;
pub use generate::handle_generate;
pub use list::handle_list;
pub use measure::handle_measure;
pub use tags::handle_tags;
pub use ui::handle_ui;

use clap::{Parser, Subcommand};
use pipegeo_core::Coordinate;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pipegeo")]
#[command(about = "browse, filter and measure geographic pipe networks")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to .pipegeo.{toml,yml,yaml,json} if present)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Pipe store location, overriding store.path
    #[arg(long, value_name = "PATH", global = true)]
    pub store: Option<PathBuf>,

    /// Read pipes from a remote pipe API instead of the local store
    #[arg(long, value_name = "URL", global = true)]
    pub remote: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replace the local store with a synthetic pipe network
    Generate {
        /// Number of pipes (defaults to generator.count)
        count: Option<usize>,

        /// Seed for a reproducible network
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List pipes
    List {
        /// Only pipes carrying this tag
        #[arg(long)]
        tag: Option<String>,

        /// Maximum number of pipes (0 for no limit)
        #[arg(long)]
        limit: Option<usize>,

        /// Print the JSON wire format
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Create a pipe
    Add {
        #[arg(long)]
        name: String,

        /// Start point as LAT,LNG
        #[arg(long, value_parser = utils::parse_coordinate, allow_hyphen_values = true)]
        start: Coordinate,

        /// End point as LAT,LNG
        #[arg(long, value_parser = utils::parse_coordinate, allow_hyphen_values = true)]
        end: Coordinate,

        /// Display color, e.g. #2196F3 (defaults to store.default_color)
        #[arg(long)]
        color: Option<String>,

        /// Tag, may be repeated
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Show every tag in use
    Tags,
    /// Measure pipes by id, in the given order
    Measure {
        #[arg(required = true)]
        ids: Vec<u64>,

        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Open the terminal UI
    Ui {
        /// Number of pipes to load (defaults to view.default_limit)
        #[arg(long)]
        limit: Option<usize>,
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
    fn test_parse_add_with_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "pipegeo", "add", "--name", "South", "--start", "-33.86,151.20", "--end",
            "-33.87,151.21", "--tag", "water", "--tag", "main",
        ])
        .unwrap();
        match cli.command {
            Commands::Add {
                name, start, tags, ..
            } => {
                assert_eq!(name, "South");
                assert_eq!(start, Coordinate::new(-33.86, 151.20));
                assert_eq!(tags, vec!["water", "main"]);
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["pipegeo", "tags", "--remote", "http://localhost:4000"])
            .unwrap();
        assert_eq!(cli.remote.as_deref(), Some("http://localhost:4000"));
        assert!(matches!(cli.command, Commands::Tags));
    }

    #[test]
    fn test_measure_requires_ids() {
        assert!(Cli::try_parse_from(["pipegeo", "measure"]).is_err());
        let cli = Cli::try_parse_from(["pipegeo", "measure", "3", "1"]).unwrap();
        assert!(matches!(cli.command, Commands::Measure { ref ids, .. } if ids == &vec![3, 1]));
    }
}
