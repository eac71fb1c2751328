use std::fmt::{self, Display, Formatter};

use serde::Deserialize;

use crate::configuration::{traits::ResolvableConfiguration, EndpointValidationError};


/// Transport an endpoint connects over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointProtocol {
    Udp,
    Tcp,
    Serial,
}

impl EndpointProtocol {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "udp" => Some(Self::Udp),
            "tcp" => Some(Self::Tcp),
            "serial" => Some(Self::Serial),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Udp => "udp",
            Self::Tcp => "tcp",
            Self::Serial => "serial",
        }
    }
}

impl Display for EndpointProtocol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


/// How drones are bound to an endpoint's connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointMode {
    /// `"1:1"`: one drone per connection, identified by `drone_id`.
    OneToOne,
    /// `"multi"`: several drones sharing one connection. Recognized, but not supported yet.
    Multi,
}

impl EndpointMode {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "1:1" => Some(Self::OneToOne),
            "multi" => Some(Self::Multi),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneToOne => "1:1",
            Self::Multi => "multi",
        }
    }
}

impl Display for EndpointMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}



#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub(crate) struct UnresolvedEndpointConfiguration {
    pub(crate) name: String,

    drone_id: String,

    protocol: String,

    mode: String,

    port: i64,

    baud_rate: i64,
}

/// A single validated MAVLink link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointConfiguration {
    pub name: String,

    /// Never empty for [`EndpointMode::OneToOne`].
    pub drone_id: String,

    pub protocol_name: String,

    pub protocol: EndpointProtocol,

    pub mode_name: String,

    pub mode: EndpointMode,

    /// Listening / connecting port (udp and tcp).
    pub port: Option<u16>,

    /// Serial line speed (serial).
    pub baud_rate: Option<u32>,
}


impl ResolvableConfiguration for UnresolvedEndpointConfiguration {
    type Resolved = EndpointConfiguration;
    type Error = EndpointValidationError;

    fn resolve(self) -> Result<Self::Resolved, Self::Error> {
        // The mode is checked first, so a bad mode hides a bad protocol.
        let mode = match EndpointMode::from_token(&self.mode) {
            Some(EndpointMode::OneToOne) if self.drone_id.is_empty() => {
                return Err(EndpointValidationError::DroneIdRequired);
            }
            Some(EndpointMode::OneToOne) => EndpointMode::OneToOne,
            Some(EndpointMode::Multi) => {
                return Err(EndpointValidationError::MultiModeNotSupported);
            }
            None => return Err(EndpointValidationError::InvalidMode(self.mode)),
        };

        let Some(protocol) = EndpointProtocol::from_token(&self.protocol) else {
            return Err(EndpointValidationError::InvalidProtocol(self.protocol));
        };

        let port = match self.port {
            0 => None,
            port => Some(
                u16::try_from(port).map_err(|_| EndpointValidationError::InvalidPort(port))?,
            ),
        };

        let baud_rate = match self.baud_rate {
            0 => None,
            baud_rate => Some(
                u32::try_from(baud_rate)
                    .map_err(|_| EndpointValidationError::InvalidBaudRate(baud_rate))?,
            ),
        };

        Ok(EndpointConfiguration {
            name: self.name,
            drone_id: self.drone_id,
            protocol_name: self.protocol,
            protocol,
            mode_name: self.mode,
            mode,
            port,
            baud_rate,
        })
    }
}


/// An endpoint that was left out of the configuration, and why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedEndpoint {
    pub name: String,
    pub error: EndpointValidationError,
}

/// Validates every endpoint, keeping the valid ones in their original order.
pub(crate) fn partition_endpoints(
    endpoints: Vec<UnresolvedEndpointConfiguration>,
) -> (Vec<EndpointConfiguration>, Vec<RejectedEndpoint>) {
    endpoints.into_iter().fold(
        (Vec::new(), Vec::new()),
        |(mut accepted, mut rejected), endpoint| {
            let name = endpoint.name.clone();

            match endpoint.resolve() {
                Ok(resolved_endpoint) => accepted.push(resolved_endpoint),
                Err(error) => rejected.push(RejectedEndpoint { name, error }),
            }

            (accepted, rejected)
        },
    )
}
