//! Shared-credential handling with redacted Debug output.

use crate::{ErrorLocation, ExposureError};

use std::fmt;

use serde::ser::Error;
use zeroize::Zeroize;

/// The shared secret sent with every IPC request.
///
/// The value never appears in logs or debug output, is wiped from memory
/// on drop, and cannot be serialized by accident - the request envelope
/// copies it out explicitly via [`SecretKey::expose`] at send time.
#[derive(Clone)]
pub struct SecretKey {
    inner: String,
}

impl SecretKey {
    /// Wrap a credential string.
    pub fn new(key: impl Into<String>) -> Self {
        Self { inner: key.into() }
    }

    /// Get the actual credential for transmission.
    ///
    /// # Security Note
    /// Only call this at the point the value goes on the wire.
    #[inline]
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// Get the credential length (safe to log).
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if the credential is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey([REDACTED])")
    }
}

impl fmt::Display for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED SECRET]")
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

// Prevent accidental serialization
impl serde::Serialize for SecretKey {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(ExposureError::Serialization {
            message: String::from("SecretKey cannot be serialized - use expose() explicitly"),
            location: ErrorLocation::here(),
        }))
    }
}
