// ⚙️ Command-line configuration
//
// No config files: nothing outlives the process. Everything is set per run.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "patron-registry")]
#[command(version, about = "In-memory library patron records with bulk import")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Import this file before the interactive menu starts
    #[arg(long, value_name = "FILE")]
    pub preload: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Import a patron file, print the summary and the resulting patrons, then exit
    Import {
        /// Text file with one `id-name-address-fine` record per line
        file: PathBuf,

        /// Print the summary and patrons as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_runs_menu() {
        let config = CliConfig::try_parse_from(["patron-registry"]).unwrap();

        assert!(config.command.is_none());
        assert!(config.preload.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn test_preload_and_verbose() {
        let config =
            CliConfig::try_parse_from(["patron-registry", "--preload", "patrons.txt", "-v"])
                .unwrap();

        assert_eq!(config.preload, Some(PathBuf::from("patrons.txt")));
        assert!(config.verbose);
    }

    #[test]
    fn test_import_subcommand() {
        let config =
            CliConfig::try_parse_from(["patron-registry", "import", "patrons.txt", "--json", "--verbose"])
                .unwrap();

        match config.command {
            Some(Command::Import { file, json }) => {
                assert_eq!(file, PathBuf::from("patrons.txt"));
                assert!(json);
            }
            None => panic!("expected import subcommand"),
        }
        assert!(config.verbose);
    }

    #[test]
    fn test_import_requires_file() {
        assert!(CliConfig::try_parse_from(["patron-registry", "import"]).is_err());
    }
}
