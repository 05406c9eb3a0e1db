use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "codeagg")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Bundle a web source tree into a single annotated text file")]
#[command(
    long_about = "codeagg walks a directory, picks every .ts, .tsx, .js, .jsx, .css and .html \
                  file, and writes each file's relative path and contents into one text file \
                  for review or sharing."
)]
#[command(after_help = "EXAMPLES:\n  \
    codeagg ./src\n  \
    codeagg ./src review/bundle.txt --verbose\n  \
    codeagg ./frontend --dry-run\n  \
    codeagg ./src --output-format json --no-progress")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Directory to scan
    #[arg(required_unless_present_any = ["generate_config", "list_extensions"])]
    pub root: Option<PathBuf>,

    /// Output file (defaults to aggregated_code.txt)
    pub output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, env = "CODEAGG_CONFIG", help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Descend into symlinked directories
    #[arg(long)]
    pub follow_links: bool,

    /// Keep raw directory order instead of sorting entries by name
    #[arg(long)]
    pub unsorted: bool,

    /// Hide the progress spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be written without creating the output file)
    #[arg(long, help = "List the files that would be aggregated without writing anything")]
    pub dry_run: bool,

    /// Print the extensions that are aggregated
    #[arg(long)]
    pub list_extensions: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    /// Only flags that were actually given override the config file.
    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_follow_links(self.follow_links.then_some(true))
            .with_sort_entries(self.unsorted.then_some(false))
            .with_show_progress((self.no_progress || self.quiet).then_some(false))
    }

    pub fn resolve_output_path(&self, config: &Config) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| config.output.default_path.clone())
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_OUTPUT_FILE;

    #[test]
    fn test_positional_arguments() {
        let cli = Cli::try_parse_from(["codeagg", "src", "bundle.txt"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("src")));
        assert_eq!(cli.output, Some(PathBuf::from("bundle.txt")));
    }

    #[test]
    fn test_default_output_path() {
        let cli = Cli::try_parse_from(["codeagg", "src"]).unwrap();
        let config = Config::default();
        assert_eq!(cli.resolve_output_path(&config), PathBuf::from(DEFAULT_OUTPUT_FILE));
    }

    #[test]
    fn test_root_is_required_for_aggregation() {
        assert!(Cli::try_parse_from(["codeagg", "--dry-run"]).is_err());
        assert!(Cli::try_parse_from(["codeagg", "--list-extensions"]).is_ok());
        assert!(Cli::try_parse_from(["codeagg", "--generate-config"]).is_ok());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["codeagg", "src", "-q", "-v"]).is_err());

        let cli = Cli::try_parse_from(["codeagg", "src", "-vv"]).unwrap();
        assert_eq!(cli.verbosity_level(), 2);
    }

    #[test]
    fn test_overrides_only_set_given_flags() {
        let cli = Cli::try_parse_from(["codeagg", "src"]).unwrap();
        let overrides = cli.create_cli_overrides();
        assert_eq!(overrides.follow_links, None);
        assert_eq!(overrides.sort_entries, None);
        assert_eq!(overrides.show_progress, None);

        let cli =
            Cli::try_parse_from(["codeagg", "src", "--follow-links", "--unsorted", "-q"]).unwrap();
        let overrides = cli.create_cli_overrides();
        assert_eq!(overrides.follow_links, Some(true));
        assert_eq!(overrides.sort_entries, Some(false));
        assert_eq!(overrides.show_progress, Some(false));
    }

    #[test]
    fn test_output_format_parsing() {
        let cli = Cli::try_parse_from(["codeagg", "src", "--output-format", "json"]).unwrap();
        assert!(matches!(cli.output_format, OutputFormat::Json));
        assert!(Cli::try_parse_from(["codeagg", "src", "--output-format", "xml"]).is_err());
    }
}
