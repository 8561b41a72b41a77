use crate::error::IpcError;
use crate::ipc::builder::IpcClientBuilder;
use crate::ipc::envelope::RequestEnvelope;
use crate::{INSECURE_SCHEME, SECURE_SCHEME};

use common::{ErrorLocation, SecretKey};

use futures_util::{SinkExt, StreamExt};
use log::{debug, info, warn};
use serde_json::{Map, Value};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

/// Handles webserver side requests to the bot process.
///
/// Holds the five connection parameters and nothing else: there is no
/// persistent connection, no pooling, and no shared state between
/// requests. Every call to [`IpcClient::request`] opens its own
/// WebSocket connection, exchanges exactly one frame in each direction,
/// and closes it again, so a single client can be shared freely across
/// concurrent tasks.
#[derive(Debug, Clone)]
pub struct IpcClient {
    pub(crate) host: String,
    pub(crate) port: Option<u16>,
    pub(crate) secret_key: Option<SecretKey>,
    pub(crate) ssl_mode: bool,
    pub(crate) use_port: bool,
}

impl IpcClient {
    /// Start configuring a client. Defaults: host `localhost`, no port,
    /// no secret, `ws` scheme, port segment included.
    pub fn builder() -> IpcClientBuilder {
        IpcClientBuilder::default()
    }

    /// Derive the target URL from the configuration.
    ///
    /// Pure function of the stored values, evaluated per request:
    /// `{scheme}://{host}:{port}` with the port segment omitted entirely
    /// when `use_port` is off. No escaping or validation of host or port
    /// is performed. When `use_port` is on but no port was configured the
    /// port segment is left empty, which is never a dialable target;
    /// [`IpcClient::request`] reports that as a connection error.
    pub fn url(&self) -> String {
        let scheme = if self.ssl_mode {
            SECURE_SCHEME
        } else {
            INSECURE_SCHEME
        };

        if self.use_port {
            match self.port {
                Some(port) => format!("{scheme}://{}:{port}", self.host),
                None => format!("{scheme}://{}:", self.host),
            }
        } else {
            format!("{scheme}://{}", self.host)
        }
    }

    /// Make a request to the IPC server process.
    ///
    /// Opens a new WebSocket connection to the derived URL, sends the
    /// request envelope as one JSON text frame, suspends until exactly one
    /// reply frame arrives on the same connection, and returns the reply
    /// decoded as JSON. The connection is torn down on every exit path,
    /// error paths included.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - The endpoint to request on the server
    /// * `data` - The data to send to the endpoint
    ///
    /// # Errors
    ///
    /// - [`IpcError::Connection`] - the host is unreachable, TLS or the
    ///   WebSocket handshake failed, the socket broke mid-exchange, or the
    ///   configuration asks for an explicit port but has none
    /// - [`IpcError::Protocol`] - the connection closed, or an unexpected
    ///   frame kind arrived, before a reply was received
    /// - [`IpcError::Decode`] - the reply payload is not valid JSON
    ///
    /// Nothing is retried; every failure propagates to the caller. No
    /// deadline is applied either - callers needing bounded latency wrap
    /// the returned future in `tokio::time::timeout`, which drops the
    /// future and with it the connection.
    pub async fn request(
        &self,
        endpoint: &str,
        data: Map<String, Value>,
    ) -> Result<Value, IpcError> {
        let url = self.url();

        // A configuration that asks for an explicit port but never
        // received one cannot name a dialable target.
        if self.use_port && self.port.is_none() {
            return Err(IpcError::Connection {
                message: format!("cannot dial {url}: no port configured"),
                location: ErrorLocation::here(),
            });
        }

        info!("Requesting IPC server for {:?} with {:?}", endpoint, data);

        let envelope = RequestEnvelope::new(endpoint, data, self.secret_key.as_ref());
        let frame = envelope.to_json()?;

        let (mut stream, _) = connect_async(url.as_str()).await?;

        debug!("Client > {:?}", envelope);
        stream.send(Message::Text(frame.into())).await?;

        let reply: Value = loop {
            match stream.next().await {
                Some(Ok(Message::Text(text))) => break serde_json::from_str(text.as_str())?,
                Some(Ok(Message::Binary(data))) => break serde_json::from_slice(&data)?,
                Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {
                    // Control frames are not the reply; tungstenite answers
                    // pings on its own.
                    continue;
                }
                Some(Ok(Message::Close(_))) | None => {
                    warn!("IPC connection to {} closed before a reply", url);
                    return Err(IpcError::Protocol {
                        message: format!("connection to {url} closed before a reply was received"),
                        location: ErrorLocation::here(),
                    });
                }
                Some(Ok(other)) => {
                    return Err(IpcError::Protocol {
                        message: format!("unexpected frame kind in reply: {other:?}"),
                        location: ErrorLocation::here(),
                    });
                }
                Some(Err(error)) => return Err(IpcError::from(error)),
            }
        };

        debug!("Client < {:?}", reply);

        // Best-effort close handshake; the peer may already be gone, and
        // dropping the stream releases the socket regardless.
        let _ = stream.close(None).await;

        Ok(reply)
    }
}
