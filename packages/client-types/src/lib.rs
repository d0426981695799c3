//! Types shared by every IBC light client: the epoch-qualified [`Height`], the closed
//! [`ClientType`] registry, ICS-24 identifiers and commitment paths, and the ics23
//! Merkle proof verification engine.
#![deny(missing_docs, clippy::nursery, clippy::pedantic, warnings, unused_crate_dependencies)]

/// Ensure that a condition is true, otherwise return an error.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}

pub mod base64;
pub mod client_type;
pub mod commitment;
pub mod error;
pub mod height;
pub mod identifier;
pub mod path;
pub mod proto;
pub mod specs;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use client_type::ClientType;
pub use height::Height;
