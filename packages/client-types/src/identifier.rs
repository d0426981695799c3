//! ICS-24 identifiers for clients, connections, ports and channels.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IdentifierError;

/// Identifier of the client tracking the host chain itself
pub const LOCALHOST_CLIENT_ID: &str = "localhost";

fn is_valid_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '+' | '-' | '#' | '[' | ']' | '<' | '>')
}

fn validate_identifier(id: &str, min: usize, max: usize) -> Result<(), IdentifierError> {
    if id.is_empty() {
        return Err(IdentifierError::Empty);
    }
    if !(min..=max).contains(&id.len()) {
        return Err(IdentifierError::InvalidLength {
            id: id.to_owned(),
            length: id.len(),
            min,
            max,
        });
    }
    if !id.chars().all(is_valid_char) {
        return Err(IdentifierError::InvalidCharacter { id: id.to_owned() });
    }
    Ok(())
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident, $min:expr, $max:expr) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Minimum length of the identifier
            pub const MIN_LENGTH: usize = $min;
            /// Maximum length of the identifier
            pub const MAX_LENGTH: usize = $max;

            /// Returns the identifier as a string slice
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the identifier as bytes
            #[must_use]
            pub fn as_bytes(&self) -> &[u8] {
                self.0.as_bytes()
            }
        }

        impl FromStr for $name {
            type Err = IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                validate_identifier(s, $min, $max)?;
                Ok(Self(s.to_owned()))
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentifierError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                validate_identifier(&s, $min, $max)?;
                Ok(Self(s))
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

identifier!(
    /// Identifier of a light client on the host chain
    ClientId,
    9,
    64
);
identifier!(
    /// Identifier of a connection end
    ConnectionId,
    10,
    64
);
identifier!(
    /// Identifier of a port
    PortId,
    2,
    128
);
identifier!(
    /// Identifier of a channel end
    ChannelId,
    8,
    64
);

impl ClientId {
    /// The identifier reserved for the localhost client
    #[must_use]
    pub fn localhost() -> Self {
        Self(LOCALHOST_CLIENT_ID.to_owned())
    }
}
