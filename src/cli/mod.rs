pub mod build;
pub mod completions;
pub mod init;
pub mod show;
pub mod validate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::discovery::{discover, discover_paths, DiscoveryResult};
use crate::error::Result;

/// lcdc - LCD widget schema extractor for layered documents
#[derive(Parser, Debug)]
#[command(name = "lcdc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract widget schemas and layer images from documents
    Build(build::BuildArgs),

    /// Initialize an lcdc project (generates lcdc.yaml)
    Init(init::InitArgs),

    /// Validate documents without writing anything
    Validate(validate::ValidateArgs),

    /// Show which layers a widget lights for a value
    Show(show::ShowArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Explicit paths if any were given, otherwise the project in the current directory.
pub(crate) fn discover_documents(paths: &[PathBuf]) -> Result<DiscoveryResult> {
    if paths.is_empty() {
        discover(".")
    } else {
        discover_paths(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_show_accepts_negative_values() {
        let cli = Cli::try_parse_from([
            "lcdc", "show", "dash.yml", "temp", "-12.5", "--decimals", "1",
        ])
        .unwrap();
        let Commands::Show(args) = cli.command else {
            panic!("expected show command");
        };
        assert_eq!(args.value, "-12.5");
        assert_eq!(args.decimals, Some(1));
    }

    #[test]
    fn test_build_output_flag() {
        let cli = Cli::try_parse_from(["lcdc", "build", "art", "-o", "out"]).unwrap();
        let Commands::Build(args) = cli.command else {
            panic!("expected build command");
        };
        assert_eq!(args.paths, vec![PathBuf::from("art")]);
        assert_eq!(args.output, Some(PathBuf::from("out")));
    }
}
