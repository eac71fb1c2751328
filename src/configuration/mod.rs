//! This module contains all configuration-relevant code, including
//! the full configuration structure as well as methods needed to load
//! and validate it.
//!
//! Your starting point should probably be [`Configuration::load_from_path`].
//!
//! # Internals
//! The entire configuration structure is based on the concept of
//! unvalidated ("unresolved") and validated configuration structures.
//!
//! For example, even though we're interacting with [`Configuration`],
//! it internally expands environment variable references in the file,
//! deserializes it into the `UnresolvedConfiguration` structure and then calls its
//! [`resolve`][traits::ResolvableConfigurationWithContext::resolve] method,
//! which recursively turns it (and its fields) into validated ("resolved") versions.
//!
//! Resolution is where endpoints are validated (invalid ones are skipped with a warning),
//! the MAVLink dialect is looked up and unset fields receive their defaults.

#![allow(rustdoc::private_intra_doc_links)]

mod defaults;
mod error;
mod structure;
mod traits;
mod utilities;

use std::fs;
use std::path::{Path, PathBuf};

pub use defaults::{
    DEFAULT_DIALECT_NAME,
    DEFAULT_LOG_FORMAT,
    DEFAULT_LOG_LEVEL,
    DEFAULT_LOG_OUTPUT,
    DEFAULT_RELAY_BUFFER_SIZE,
};
pub use error::*;
pub use structure::*;
use traits::ResolvableConfigurationWithContext;
pub use utilities::{expand_environment_variables, expand_environment_variables_with};
use utilities::get_default_configuration_file_path;


impl Configuration {
    /// Load the configuration from a specific file path.
    pub fn load_from_path<S: AsRef<Path>>(
        configuration_file_path: S,
    ) -> Result<Self, ConfigurationError> {
        let configuration_file_path = configuration_file_path.as_ref();

        // Read the configuration file into memory; the file is closed before we go on.
        let configuration_string = fs::read_to_string(configuration_file_path).map_err(|error| {
            ConfigurationError::FileAccess {
                path: configuration_file_path.to_path_buf(),
                source: error,
            }
        })?;

        let configuration_file_path = dunce::canonicalize(configuration_file_path).map_err(|error| {
            ConfigurationError::FileAccess {
                path: configuration_file_path.to_path_buf(),
                source: error,
            }
        })?;

        Self::load_from_str(&configuration_string, configuration_file_path)
    }

    /// Load the configuration from text that was already read from `configuration_file_path`.
    pub fn load_from_str(
        configuration_string: &str,
        configuration_file_path: PathBuf,
    ) -> Result<Self, ConfigurationError> {
        let expanded_configuration_string = expand_environment_variables(configuration_string);


        // Parse the string into the `UnresolvedConfiguration` structure and then resolve it.
        let unresolved_configuration =
            match toml::from_str::<UnresolvedConfiguration>(&expanded_configuration_string) {
                Ok(unresolved_configuration) => unresolved_configuration,
                Err(error) => {
                    return Err(ConfigurationError::Parse {
                        path: configuration_file_path,
                        source: Box::new(error),
                    });
                }
            };

        unresolved_configuration.resolve(configuration_file_path)
    }

    /// Load the configuration from the default path (`./configs/relay.toml`).
    pub fn load_from_default_path() -> Result<Self, ConfigurationError> {
        let configuration_file_path =
            get_default_configuration_file_path().map_err(|error| ConfigurationError::FileAccess {
                path: PathBuf::from("configs/relay.toml"),
                source: error,
            })?;

        Self::load_from_path(configuration_file_path)
    }
}
