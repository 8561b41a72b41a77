use crate::DEFAULT_HOST;
use crate::ipc::client::IpcClient;

use common::SecretKey;

/// Builder for [`IpcClient`] instances.
///
/// Provides a fluent API over the five configuration values. By contract
/// construction performs no validation and no network activity: a missing
/// secret is accepted silently, and a missing port with `use_port`
/// enabled is accepted here and surfaces as a connection error at request
/// time. [`IpcClientBuilder::build`] is therefore infallible.
#[derive(Debug)]
pub struct IpcClientBuilder {
    host: String,
    port: Option<u16>,
    secret_key: Option<SecretKey>,
    ssl_mode: bool,
    use_port: bool,
}

impl Default for IpcClientBuilder {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: None,
            secret_key: None,
            ssl_mode: false,
            use_port: true,
        }
    }
}

impl IpcClientBuilder {
    /// Target hostname or IP of the IPC server.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Target port; required in practice whenever `use_port` is left on.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Credential placed in the outbound `Authorization` header field.
    /// Must match the server's secret or requests will be rejected there.
    pub fn with_secret_key(mut self, secret_key: SecretKey) -> Self {
        self.secret_key = Some(secret_key);
        self
    }

    /// Select `wss` over `ws`.
    pub fn with_ssl_mode(mut self, ssl_mode: bool) -> Self {
        self.ssl_mode = ssl_mode;
        self
    }

    /// Whether the derived URL includes an explicit port segment. Turn off
    /// when the server sits behind a reverse proxy or on a scheme-default
    /// port.
    pub fn with_use_port(mut self, use_port: bool) -> Self {
        self.use_port = use_port;
        self
    }

    pub fn build(self) -> IpcClient {
        IpcClient {
            host: self.host,
            port: self.port,
            secret_key: self.secret_key,
            ssl_mode: self.ssl_mode,
            use_port: self.use_port,
        }
    }
}
