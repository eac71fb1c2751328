use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;


/// Terminal errors of a configuration load.
///
/// When one of these is returned, no configuration is produced.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigurationError {
    #[error("failed to read configuration file {}", path.display())]
    #[diagnostic(
        code(relay::configuration::file_access),
        help("check that the file exists and is readable by the relay")
    )]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse configuration file {}", path.display())]
    #[diagnostic(code(relay::configuration::parse))]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },

    #[error("no MAVLink endpoints configured")]
    #[diagnostic(
        code(relay::configuration::no_endpoints),
        help("add at least one [[mavlink.endpoints]] table")
    )]
    NoEndpoints,

    #[error("no valid MAVLink endpoints ({rejected} configured endpoint(s) were invalid)")]
    #[diagnostic(
        code(relay::configuration::no_valid_endpoints),
        help("see the preceding warnings for why each endpoint was skipped")
    )]
    NoValidEndpoints { rejected: usize },

    #[error("invalid MAVLink dialect \"{name}\"")]
    #[diagnostic(
        code(relay::configuration::invalid_dialect),
        help(
            "supported dialects: common, minimal, ardupilot (ardupilotmega, apm), \
             paparazzi, standard, all, development (px4)"
        )
    )]
    InvalidDialect {
        name: String,
        #[source]
        source: UnknownDialectError,
    },
}


/// Why a single endpoint was rejected. These never abort a load on their own:
/// the endpoint is skipped with a warning.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum EndpointValidationError {
    #[error("invalid mode: {0}")]
    #[diagnostic(code(relay::endpoint::invalid_mode), help("mode must be \"1:1\""))]
    InvalidMode(String),

    #[error("drone_id is required for 1:1 mode")]
    #[diagnostic(code(relay::endpoint::drone_id_required))]
    DroneIdRequired,

    #[error("multi mode is not supported yet")]
    #[diagnostic(code(relay::endpoint::multi_mode_not_supported))]
    MultiModeNotSupported,

    #[error("invalid protocol: {0}")]
    #[diagnostic(
        code(relay::endpoint::invalid_protocol),
        help("protocol must be one of \"udp\", \"tcp\" or \"serial\"")
    )]
    InvalidProtocol(String),

    #[error("invalid port: {0}")]
    #[diagnostic(code(relay::endpoint::invalid_port), help("port must be between 1 and 65535"))]
    InvalidPort(i64),

    #[error("invalid baud rate: {0}")]
    #[diagnostic(code(relay::endpoint::invalid_baud_rate))]
    InvalidBaudRate(i64),
}


#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown dialect: {name}")]
pub struct UnknownDialectError {
    pub name: String,
}
