use serde::Deserialize;
use tracing::warn;

use super::dialect::{resolve_dialect, Dialect};
use super::endpoint::{partition_endpoints, EndpointConfiguration, UnresolvedEndpointConfiguration};
use crate::configuration::{
    defaults::{string_or_default, DEFAULT_DIALECT_NAME},
    traits::ResolvableConfiguration,
    ConfigurationError,
};


#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub(super) struct UnresolvedMavlinkConfiguration {
    dialect: String,

    endpoints: Vec<UnresolvedEndpointConfiguration>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MavlinkConfiguration {
    /// Dialect name as written in the configuration file (`common` if it was left out).
    pub dialect_name: String,

    pub dialect: Dialect,

    /// Valid endpoints, in configuration file order. Never empty.
    pub endpoints: Vec<EndpointConfiguration>,
}


impl ResolvableConfiguration for UnresolvedMavlinkConfiguration {
    type Resolved = MavlinkConfiguration;
    type Error = ConfigurationError;

    fn resolve(self) -> Result<Self::Resolved, Self::Error> {
        if self.endpoints.is_empty() {
            return Err(ConfigurationError::NoEndpoints);
        }

        let (endpoints, rejected_endpoints) = partition_endpoints(self.endpoints);

        for rejected_endpoint in &rejected_endpoints {
            warn!(
                endpoint = %rejected_endpoint.name,
                error = %rejected_endpoint.error,
                "Invalid MAVLink endpoint, skipping it."
            );
        }

        if endpoints.is_empty() {
            return Err(ConfigurationError::NoValidEndpoints {
                rejected: rejected_endpoints.len(),
            });
        }


        let dialect_name = string_or_default(self.dialect, DEFAULT_DIALECT_NAME);
        let dialect = resolve_dialect(&dialect_name).map_err(|error| {
            ConfigurationError::InvalidDialect {
                name: dialect_name.clone(),
                source: error,
            }
        })?;


        Ok(MavlinkConfiguration {
            dialect_name,
            dialect,
            endpoints,
        })
    }
}
