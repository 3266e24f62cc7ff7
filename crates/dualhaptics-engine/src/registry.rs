//! Registry of audio endpoints bound to live sessions.
//!
//! Two sessions must never drive the same audio endpoint. Sessions claim
//! their source's endpoint at start; the returned [`EndpointClaim`] releases
//! it when dropped.

use std::collections::HashSet;
use std::sync::Arc;

use dualhaptics_errors::SourceError;
use parking_lot::Mutex;

/// Shared set of audio endpoint ids in use.
///
/// Cloning yields another handle to the same registry.
#[derive(Debug, Clone, Default)]
pub struct AudioEndpointRegistry {
    in_use: Arc<Mutex<HashSet<String>>>,
}

impl AudioEndpointRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim an endpoint exclusively.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::EndpointBusy`] if the endpoint is already claimed.
    ///
    /// # Example
    ///
    /// ```
    /// use dualhaptics_engine::AudioEndpointRegistry;
    ///
    /// let registry = AudioEndpointRegistry::new();
    /// let claim = registry.claim("hw:2,0")?;
    /// assert!(registry.claim("hw:2,0").is_err());
    /// drop(claim);
    /// assert!(!registry.is_in_use("hw:2,0"));
    /// # Ok::<(), dualhaptics_errors::SourceError>(())
    /// ```
    pub fn claim(&self, endpoint: &str) -> Result<EndpointClaim, SourceError> {
        let mut in_use = self.in_use.lock();
        if !in_use.insert(endpoint.to_owned()) {
            return Err(SourceError::endpoint_busy(endpoint));
        }
        Ok(EndpointClaim {
            in_use: Arc::clone(&self.in_use),
            endpoint: endpoint.to_owned(),
        })
    }

    /// Whether an endpoint is currently claimed.
    pub fn is_in_use(&self, endpoint: &str) -> bool {
        self.in_use.lock().contains(endpoint)
    }

    /// Number of claimed endpoints.
    pub fn len(&self) -> usize {
        self.in_use.lock().len()
    }

    /// Whether no endpoint is claimed.
    pub fn is_empty(&self) -> bool {
        self.in_use.lock().is_empty()
    }
}

/// Exclusive hold on one audio endpoint. Released on drop.
#[derive(Debug)]
pub struct EndpointClaim {
    in_use: Arc<Mutex<HashSet<String>>>,
    endpoint: String,
}

impl EndpointClaim {
    /// The claimed endpoint id.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Drop for EndpointClaim {
    fn drop(&mut self) {
        self.in_use.lock().remove(&self.endpoint);
    }
}
