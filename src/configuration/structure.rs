use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

pub use self::dialect::{resolve_dialect, Dialect};
pub use self::endpoint::{EndpointConfiguration, EndpointMode, EndpointProtocol, RejectedEndpoint};
pub use self::logging::LoggingConfiguration;
use self::logging::UnresolvedLoggingConfiguration;
pub use self::mavlink::MavlinkConfiguration;
use self::mavlink::UnresolvedMavlinkConfiguration;
pub use self::relay::RelayConfiguration;
use self::relay::UnresolvedRelayConfiguration;
pub use self::sinks::*;
use self::sinks::UnresolvedSinksConfiguration;
use super::traits::{ResolvableConfiguration, ResolvableConfigurationWithContext};
use super::ConfigurationError;

mod dialect;
mod endpoint;
mod logging;
mod mavlink;
mod relay;
mod sinks;



#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct UnresolvedConfiguration {
    /// Relay internals.
    relay: UnresolvedRelayConfiguration,

    /// Dialect and endpoints.
    mavlink: UnresolvedMavlinkConfiguration,

    /// Downstream sinks.
    sinks: UnresolvedSinksConfiguration,

    /// Logging-related configuration.
    logging: UnresolvedLoggingConfiguration,
}


/// The entire configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// This is the file path this `Configuration` instance was loaded from.
    pub file_path: PathBuf,

    pub relay: RelayConfiguration,

    pub mavlink: MavlinkConfiguration,

    pub sinks: SinksConfiguration,

    /// Logging-related configuration.
    pub logging: LoggingConfiguration,
}


impl ResolvableConfigurationWithContext for UnresolvedConfiguration {
    type Resolved = Configuration;
    type Context = PathBuf;
    type Error = ConfigurationError;

    fn resolve(self, context: Self::Context) -> Result<Self::Resolved, Self::Error> {
        let mavlink = self.mavlink.resolve()?;
        let relay = self.relay.resolve()?;
        let sinks = self.sinks.resolve()?;
        let logging = self.logging.resolve()?;


        debug!(
            file_path = %context.display(),
            buffer_size = relay.buffer_size.get(),
            dialect = %mavlink.dialect,
            endpoints = mavlink.endpoints.len(),
            sinks = sinks.len(),
            "Configuration resolved."
        );

        Ok(Configuration {
            file_path: context,
            relay,
            mavlink,
            sinks,
            logging,
        })
    }
}
