use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::configuration::UnknownDialectError;


/// A MAVLink dialect, i.e. the message set the protocol library should decode with.
///
/// Only the identifier crosses over to the protocol library; the message
/// tables themselves live there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Common,
    Minimal,
    ArdupilotMega,
    Paparazzi,
    Standard,
    All,
    /// Common plus the in-development messages PX4 relies on.
    Development,
}

/// Every accepted (lower-case) dialect name and what it resolves to.
const DIALECT_NAMES: [(&str, Dialect); 10] = [
    ("common", Dialect::Common),
    ("minimal", Dialect::Minimal),
    ("ardupilot", Dialect::ArdupilotMega),
    ("ardupilotmega", Dialect::ArdupilotMega),
    ("apm", Dialect::ArdupilotMega),
    ("paparazzi", Dialect::Paparazzi),
    ("standard", Dialect::Standard),
    ("all", Dialect::All),
    ("px4", Dialect::Development),
    ("development", Dialect::Development),
];


/// Resolves a dialect name (case-insensitive, aliases included) to its [`Dialect`].
pub fn resolve_dialect(name: &str) -> Result<Dialect, UnknownDialectError> {
    let lowercase_name = name.to_lowercase();

    DIALECT_NAMES
        .iter()
        .find(|(accepted_name, _)| *accepted_name == lowercase_name)
        .map(|(_, dialect)| *dialect)
        .ok_or_else(|| UnknownDialectError {
            name: name.to_string(),
        })
}


impl Dialect {
    /// Canonical identifier, as used by the MAVLink dialect definitions.
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Minimal => "minimal",
            Self::ArdupilotMega => "ardupilotmega",
            Self::Paparazzi => "paparazzi",
            Self::Standard => "standard",
            Self::All => "all",
            Self::Development => "development",
        }
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for Dialect {
    type Err = UnknownDialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve_dialect(s)
    }
}
