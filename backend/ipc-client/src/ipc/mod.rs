//! IPC (Inter-Process Communication) layer for webserver-to-bot communication.
//!
//! This module implements the WebSocket request/response protocol. It
//! provides:
//!
//! - [`IpcClient`] - one-shot request client (one connection per request)
//! - [`IpcClientBuilder`] - constructor-time configuration surface
//! - [`RequestEnvelope`] - the outbound wire entity
//!
//! # Protocol
//!
//! Each request opens a fresh WebSocket connection, sends one JSON text
//! frame:
//!
//! ```json
//! {"endpoint": "...", "data": {...}, "headers": {"Authorization": "..."}}
//! ```
//!
//! then awaits exactly one reply frame, decodes it as JSON, and closes the
//! connection. The reply schema is server-defined and returned to the
//! caller as-is.
//!
//! # Security
//!
//! - The shared secret travels verbatim in the envelope's `Authorization`
//!   field; there is no cryptographic handshake.
//! - The secret is held as a [`common::SecretKey`] and never appears in
//!   logs or `Debug` output.

pub mod builder;
pub mod client;
pub mod envelope;

pub use builder::IpcClientBuilder;
pub use client::IpcClient;
pub use envelope::{RequestEnvelope, RequestHeaders};
