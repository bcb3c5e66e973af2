// Copyright (c) 2026 Restate Software, Inc., Restate GmbH.
// All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Minimal JSON-RPC 2.0 client over a websocket.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, trace};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("connecting to {uri} timed out after {timeout:?}")]
    ConnectTimeout { uri: String, timeout: Duration },
    #[error(transparent)]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("malformed message: {0}")]
    Codec(#[from] serde_json::Error),
    #[error("connection closed by the server")]
    Closed,
    #[error("{}", .0.reason())]
    Fault(RpcFault),
}

/// The `error` member of a JSON-RPC response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RpcFault {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<FaultData>,
}

/// Error details attached by the management daemon.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FaultData {
    /// errno of the failure, if it maps to one
    #[serde(default)]
    pub error: Option<i32>,
    #[serde(default)]
    pub errname: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub trace: Option<FaultTrace>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FaultTrace {
    #[serde(default)]
    pub class: Option<String>,
}

impl RpcFault {
    /// The daemon's own explanation if it sent one, the JSON-RPC message otherwise.
    pub fn reason(&self) -> &str {
        self.data
            .as_ref()
            .and_then(|data| data.reason.as_deref())
            .unwrap_or(&self.message)
    }
}

#[derive(Serialize)]
struct Request<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: &'a [Value],
}

#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcFault>,
}

pub struct JsonRpcClient {
    uri: String,
    stream: Mutex<WsStream>,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub async fn connect(uri: &str, timeout: Duration) -> Result<Self, RpcError> {
        info!("Connecting to {uri}");
        let (stream, _response) =
            tokio::time::timeout(timeout, tokio_tungstenite::connect_async(uri))
                .await
                .map_err(|_| RpcError::ConnectTimeout {
                    uri: uri.to_owned(),
                    timeout,
                })??;

        Ok(Self {
            uri: uri.to_owned(),
            stream: Mutex::new(stream),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Sends one request and waits for the response carrying the same id. Anything else
    /// arriving in between (event notifications, late answers to abandoned calls) is
    /// skipped.
    pub async fn call(&self, method: &str, params: &[Value]) -> Result<Value, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = serde_json::to_string(&Request {
            jsonrpc: "2.0",
            id,
            method,
            params,
        })?;

        let mut stream = self.stream.lock().await;
        debug!(%method, id, "Sending request");
        stream.send(Message::Text(payload)).await?;

        while let Some(message) = stream.next().await {
            let text = match message? {
                Message::Text(text) => text,
                Message::Close(_) => return Err(RpcError::Closed),
                _ => continue,
            };
            let response: Response = serde_json::from_str(&text)?;
            if response.id != Some(id) {
                trace!(got = ?response.id, expected = id, "Skipping unrelated message");
                continue;
            }

            return match (response.error, response.result) {
                (Some(fault), _) => Err(RpcError::Fault(fault)),
                (None, result) => Ok(result.unwrap_or(Value::Null)),
            };
        }

        Err(RpcError::Closed)
    }
}
