//! Command-line interface definitions for the configuration checker.

use std::path::PathBuf;

use clap::Parser;



/// Command-line arguments.
#[derive(Parser)]
#[command(
    name = "relay-config-check",
    author,
    about = "Loads and validates a drone telemetry relay configuration file.",
    version
)]
pub struct CLIArgs {
    /// This is the path to the configuration file to use.
    /// If unspecified, this defaults to `./configs/relay.toml`.
    #[arg(
        short = 'c',
        long = "configuration-file-path",
        help = "Path to the configuration file to use. Defaults to ./configs/relay.toml"
    )]
    pub configuration_file_path: Option<PathBuf>,
}
