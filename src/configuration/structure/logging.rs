use std::path::PathBuf;

use serde::Deserialize;
use tracing_subscriber::{filter::ParseError, EnvFilter};

use crate::configuration::{
    defaults::{string_or_default, DEFAULT_LOG_FORMAT, DEFAULT_LOG_LEVEL, DEFAULT_LOG_OUTPUT},
    traits::ResolvableConfiguration,
    ConfigurationError,
};


#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub(super) struct UnresolvedLoggingConfiguration {
    level: String,

    format: String,

    output: String,

    file: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfiguration {
    /// Level filter directive, e.g. `info` or `warn,drone_relay_config=debug`.
    pub level: String,

    /// `text` or `json`.
    pub format: String,

    /// `stdout`, `stderr` or `file`.
    pub output: String,

    /// Log file, used when `output` is `file`.
    pub file: Option<PathBuf>,
}

impl ResolvableConfiguration for UnresolvedLoggingConfiguration {
    type Resolved = LoggingConfiguration;
    type Error = ConfigurationError;

    fn resolve(self) -> Result<Self::Resolved, Self::Error> {
        Ok(LoggingConfiguration {
            level: string_or_default(self.level, DEFAULT_LOG_LEVEL),
            format: string_or_default(self.format, DEFAULT_LOG_FORMAT),
            output: string_or_default(self.output, DEFAULT_LOG_OUTPUT),
            file: (!self.file.is_empty()).then(|| PathBuf::from(self.file)),
        })
    }
}

impl LoggingConfiguration {
    /// Parses `level` into a tracing filter.
    ///
    /// The level is not checked while loading; whoever sets up logging finds out here.
    pub fn level_filter(&self) -> Result<EnvFilter, ParseError> {
        EnvFilter::try_new(&self.level)
    }
}
