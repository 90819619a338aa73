//! Timeout configuration for Atlas client operations.

use std::time::Duration;

/// Timeout configuration for Atlas client operations.
///
/// # Examples
///
/// ```rust
/// use atlas_link::AtlasLinkTimeouts;
/// use std::time::Duration;
///
/// // Use defaults (recommended for most cases)
/// let timeouts = AtlasLinkTimeouts::default();
///
/// // Custom timeouts for high-latency environments
/// let timeouts = AtlasLinkTimeouts::builder()
///     .connection_timeout(Duration::from_secs(60))
///     .receive_timeout(Duration::from_secs(120))
///     .build();
///
/// // Aggressive timeouts for local development
/// let timeouts = AtlasLinkTimeouts::fast();
/// ```
#[derive(Debug, Clone)]
pub struct AtlasLinkTimeouts {
    /// Timeout for establishing connections (TCP + TLS handshake).
    /// Default: 10 seconds
    pub connection_timeout: Duration,

    /// Timeout for receiving a JSON response after a request is sent.
    /// Default: 30 seconds
    pub receive_timeout: Duration,

    /// Timeout for sending data to the server.
    /// Default: 10 seconds
    pub send_timeout: Duration,

    /// Per-request cap for binary media downloads, which can be much
    /// larger than any JSON payload.
    /// Default: 60 seconds
    pub media_timeout: Duration,
}

impl Default for AtlasLinkTimeouts {
    fn default() -> Self {
        Self {
            connection_timeout: Duration::from_secs(10),
            receive_timeout: Duration::from_secs(30),
            send_timeout: Duration::from_secs(10),
            media_timeout: Duration::from_secs(60),
        }
    }
}

impl AtlasLinkTimeouts {
    /// Create a new builder for custom timeout configuration.
    pub fn builder() -> AtlasLinkTimeoutsBuilder {
        AtlasLinkTimeoutsBuilder::new()
    }

    /// Create timeouts optimized for fast local development.
    pub fn fast() -> Self {
        Self {
            connection_timeout: Duration::from_secs(2),
            receive_timeout: Duration::from_secs(5),
            send_timeout: Duration::from_secs(2),
            media_timeout: Duration::from_secs(15),
        }
    }

    /// Create timeouts optimized for high-latency or unreliable networks.
    pub fn relaxed() -> Self {
        Self {
            connection_timeout: Duration::from_secs(30),
            receive_timeout: Duration::from_secs(120),
            send_timeout: Duration::from_secs(30),
            media_timeout: Duration::from_secs(300),
        }
    }
}

/// Builder for creating custom [`AtlasLinkTimeouts`] configurations.
#[derive(Debug, Clone)]
pub struct AtlasLinkTimeoutsBuilder {
    timeouts: AtlasLinkTimeouts,
}

impl AtlasLinkTimeoutsBuilder {
    fn new() -> Self {
        Self {
            timeouts: AtlasLinkTimeouts::default(),
        }
    }

    /// Set the connection timeout (TCP + TLS handshake).
    pub fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.connection_timeout = timeout;
        self
    }

    /// Set the connection timeout in seconds.
    pub fn connection_timeout_secs(self, secs: u64) -> Self {
        self.connection_timeout(Duration::from_secs(secs))
    }

    /// Set the receive timeout (waiting for data after request).
    pub fn receive_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.receive_timeout = timeout;
        self
    }

    /// Set the receive timeout in seconds.
    pub fn receive_timeout_secs(self, secs: u64) -> Self {
        self.receive_timeout(Duration::from_secs(secs))
    }

    /// Set the send timeout (writing data to socket).
    pub fn send_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.send_timeout = timeout;
        self
    }

    /// Set the send timeout in seconds.
    pub fn send_timeout_secs(self, secs: u64) -> Self {
        self.send_timeout(Duration::from_secs(secs))
    }

    /// Set the media download timeout.
    pub fn media_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.media_timeout = timeout;
        self
    }

    /// Set the media download timeout in seconds.
    pub fn media_timeout_secs(self, secs: u64) -> Self {
        self.media_timeout(Duration::from_secs(secs))
    }

    /// Build the timeout configuration.
    pub fn build(self) -> AtlasLinkTimeouts {
        self.timeouts
    }
}
