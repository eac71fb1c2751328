use std::num::NonZeroUsize;

use serde::Deserialize;

use crate::configuration::{
    defaults::buffer_size_or_default,
    traits::ResolvableConfiguration,
    ConfigurationError,
};


#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub(super) struct UnresolvedRelayConfiguration {
    buffer_size: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayConfiguration {
    /// Capacity of the internal fan-out channels.
    pub buffer_size: NonZeroUsize,
}

impl ResolvableConfiguration for UnresolvedRelayConfiguration {
    type Resolved = RelayConfiguration;
    type Error = ConfigurationError;

    fn resolve(self) -> Result<Self::Resolved, Self::Error> {
        Ok(RelayConfiguration {
            buffer_size: buffer_size_or_default(self.buffer_size),
        })
    }
}
