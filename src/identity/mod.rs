//! Stable connection identity
//!
//! A [`ConnectionIdentity`] is the SHA-256 digest of a runtime's attribute
//! tuple, URL-safe base64 encoded without padding. The same runtime yields
//! the same identity across reconnects even though its connection handle
//! changes; there is no way back from an identity to the attributes.

pub mod attributes;
pub mod encoding;
pub mod error;
pub mod local;

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub use attributes::{InputArguments, RuntimeAttributes};
pub use error::IdentityError;
pub use local::{LocalRuntime, RuntimeMetricsSource};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionIdentity(String);

impl ConnectionIdentity {
    /// Derive the identity of `attributes`. Pure.
    pub fn from_attributes(attributes: &RuntimeAttributes) -> Result<Self, IdentityError> {
        let bytes = attributes.canonical_bytes()?;
        let digest = Sha256::digest(&bytes);
        let encoded = URL_SAFE_NO_PAD.encode(digest);
        tracing::debug!(identity = %encoded, runtime = %attributes.name, "Derived connection identity");
        Ok(Self(encoded.trim().to_string()))
    }

    pub fn from_source(source: &dyn RuntimeMetricsSource) -> Result<Self, IdentityError> {
        Self::from_attributes(&source.runtime_attributes()?)
    }

    /// Identity of the current process
    pub fn from_local_runtime() -> Result<Self, IdentityError> {
        Self::from_source(&LocalRuntime)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ConnectionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ConnectionIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
