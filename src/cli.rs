//! Command line arguments.

use clap::{Args, Parser, Subcommand, ValueEnum};
use dreimeta_catalog::models::CollectionType;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "dreimeta", version, about = "Maintain the ordered metadata catalog and its web pages")]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(long, global = true, env = "DREIMETA_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Export the stored catalog as a JSON document.
    Export(ExportArgs),
    /// Store a JSON document, replacing the current catalog.
    Import(ImportArgs),
    /// Decode and validate a JSON document without storing it.
    Check(CheckArgs),
    /// Generate the HTML page of one or all collections from a template.
    #[command(name = "webbuild")]
    WebBuild(WebBuildArgs),
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// SQLite database file
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Output file, `-` for standard output
    #[arg(long, short = 'o', default_value = "-")]
    pub output: PathBuf,

    /// Write keys without their ordering prefix
    #[arg(long)]
    pub plain_keys: bool,

    /// Write the document on a single line
    #[arg(long)]
    pub compact: bool,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// JSON document to import
    pub json: PathBuf,

    /// SQLite database file
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Decode, validate and run the import without committing it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// JSON document to check
    pub json: PathBuf,
}

#[derive(Debug, Args)]
pub struct WebBuildArgs {
    /// The collection type to generate the page for
    #[arg(value_enum)]
    pub collection: Selection,

    /// Template file (default: `<templates_dir>/<collection>.html`)
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Output file (default: `<web_dir>/<collection>.html`)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// SQLite database file
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Base URL of the web data directory, used for absolute links
    #[arg(long)]
    pub web_data_url: Option<String>,
}

/// Collection types accepted by `webbuild`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Selection {
    Serie,
    Spezial,
    Kurzgeschichten,
    #[value(name = "die_dr3i")]
    DieDr3i,
    All,
}
impl Selection {
    pub fn collections(&self) -> Vec<CollectionType> {
        match self {
            Selection::Serie => vec![CollectionType::Series],
            Selection::Spezial => vec![CollectionType::Special],
            Selection::Kurzgeschichten => vec![CollectionType::ShortStories],
            Selection::DieDr3i => vec![CollectionType::Spinoff],
            Selection::All => CollectionType::ALL.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case("serie", vec![CollectionType::Series])]
    #[case("die_dr3i", vec![CollectionType::Spinoff])]
    #[case("all", CollectionType::ALL.to_vec())]
    fn test_selection(#[case] arg: &str, #[case] expected: Vec<CollectionType>) {
        let cli = Cli::try_parse_from(["dreimeta", "webbuild", arg]).unwrap();
        let Command::WebBuild(args) = cli.command else { panic!("expected webbuild") };
        assert_eq!(args.collection.collections(), expected);
    }

    #[test]
    fn test_unknown_selection() {
        assert!(Cli::try_parse_from(["dreimeta", "webbuild", "hörbuch"]).is_err());
    }

    #[test]
    fn test_export_defaults_to_stdout() {
        let cli = Cli::try_parse_from(["dreimeta", "export", "--plain-keys"]).unwrap();
        let Command::Export(args) = cli.command else { panic!("expected export") };
        assert_eq!(args.output, PathBuf::from("-"));
        assert!(args.plain_keys);
        assert!(!args.compact);
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["dreimeta", "check", "metadata.json", "--config", "site.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("site.toml")));
    }
}
