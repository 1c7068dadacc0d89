//! CLI definitions for chatsweep.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// chatsweep CLI.
#[derive(Parser)]
#[command(name = "chatsweep")]
#[command(about = "Multi-select and batch actions for chat-history sidebars")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.chatsweep/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level filter, overrides the configuration
    #[arg(long, global = true, env = "CHATSWEEP_LOG")]
    pub log_level: Option<String>,

    /// DevTools endpoint, overrides `browser.endpoint`
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// URL substring choosing the tab, overrides `browser.page_match`
    #[arg(long, global = true)]
    pub page: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List debuggable tabs
    Pages,

    /// List the effective platform table
    Platforms,

    /// List selectable items of the chosen tab
    Items,

    /// Delete matching conversations
    Delete {
        #[command(flatten)]
        target: TargetArgs,

        /// Only list what would be deleted
        #[arg(long)]
        dry_run: bool,
    },

    /// Move matching conversations into a project or folder
    Move {
        /// Destination name as shown in the host's menu
        #[arg(long = "to")]
        destination: String,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Inject the selection UI and drive it until Ctrl-C
    Watch,

    /// Validate the configuration
    CheckConfig,
}

/// Which items a headless batch acts on.
#[derive(Args, Debug, Clone)]
pub(crate) struct TargetArgs {
    /// Regular expression matched against item titles
    #[arg(long = "match", value_name = "REGEX", conflicts_with = "all")]
    pub pattern: Option<String>,

    /// Act on every visible item
    #[arg(long)]
    pub all: bool,

    /// Skip the terminal confirmation
    #[arg(short, long)]
    pub yes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_delete() {
        let cli = Cli::parse_from(["chatsweep", "delete", "--match", "^draft", "--yes"]);
        match cli.command {
            Commands::Delete { target, dry_run } => {
                assert_eq!(target.pattern.as_deref(), Some("^draft"));
                assert!(target.yes);
                assert!(!target.all);
                assert!(!dry_run);
            }
            _ => panic!("expected delete"),
        }
    }

    #[test]
    fn test_parse_move_requires_destination() {
        assert!(Cli::try_parse_from(["chatsweep", "move", "--all"]).is_err());
        let cli = Cli::try_parse_from(["chatsweep", "move", "--to", "Work", "--all"]).unwrap();
        assert!(matches!(cli.command, Commands::Move { ref destination, .. } if destination == "Work"));
    }

    #[test]
    fn test_match_conflicts_with_all() {
        assert!(Cli::try_parse_from(["chatsweep", "delete", "--all", "--match", "x"]).is_err());
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::parse_from(["chatsweep", "items", "--endpoint", "http://127.0.0.1:9333"]);
        assert_eq!(cli.endpoint.as_deref(), Some("http://127.0.0.1:9333"));
    }
}
