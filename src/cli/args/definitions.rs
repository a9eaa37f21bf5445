use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, ColorChoice, Parser};

use super::options::OutputFormat;
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `histmerge` binary.
#[derive(Parser, Debug)]
#[command(
    name = "histmerge",
    version,
    long_version = long_version(),
    about = "Merge visit metadata and browsing history into address-bar suggestions",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
pub(crate) struct CliArgs {
    #[arg(
        value_name = "QUERY",
        help = "Queries fed to the provider in order, as if typed one after another"
    )]
    pub(crate) queries: Vec<String>,
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "HISTMERGE_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        short = 's',
        long,
        value_name = "FILE",
        help = "History snapshot to query (default: history.json in the data directory)"
    )]
    pub(crate) snapshot: Option<PathBuf>,
    #[arg(
        short = 'l',
        long,
        value_name = "NUM",
        help = "Maximum number of suggestions per query (default: 5)"
    )]
    pub(crate) limit: Option<usize>,
    #[arg(
        long = "host",
        value_name = "URL",
        help = "Only suggest destinations on this site (default: any site)"
    )]
    pub(crate) host_filter: Option<String>,
    #[arg(
        long,
        value_name = "TEXT",
        help = "Header label attached to every suggestion (default: none)"
    )]
    pub(crate) header: Option<String>,
    #[arg(
        short = 'e',
        long,
        value_parser = BoolishValueParser::new(),
        help = "Mark suggestions as editable (default: enabled)"
    )]
    pub(crate) editable: Option<bool>,
    #[arg(
        short = 'a',
        long,
        help = "Print suggestions for every query instead of only the last (default: disabled)"
    )]
    pub(crate) all: bool,
    #[arg(
        short = 'p',
        long = "print-config",
        help = "Print the resolved configuration before running (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[arg(
        short = 'v',
        long,
        action = ArgAction::Count,
        help = "Increase log verbosity; repeat for more detail"
    )]
    pub(crate) verbose: u8,
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t = OutputFormat::Plain,
        help = "Choose how to print the suggestions"
    )]
    pub(crate) output: OutputFormat,
}
