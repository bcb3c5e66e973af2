// Copyright (c) 2026 Restate Software, Inc., Restate GmbH.
// All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! In-process stand-in for the management daemon.

use futures::{SinkExt, StreamExt};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;

/// Answers each request with what `handler` returns (an object holding `result` or
/// `error`), or not at all for `None`. Every answer is preceded by an unrelated
/// notification.
pub async fn serve(handler: fn(&str, &Value) -> Option<Value>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();

        while let Some(Ok(message)) = ws.next().await {
            let Message::Text(text) = message else {
                continue;
            };
            let request: Value = serde_json::from_str(&text).unwrap();
            let method = request["method"].as_str().unwrap_or_default();

            let Some(Value::Object(answer)) = handler(method, &request["params"]) else {
                continue;
            };
            let notification = json!({"jsonrpc": "2.0", "method": "collection_update", "params": {}});
            ws.send(Message::Text(notification.to_string())).await.unwrap();

            let mut response = Map::new();
            response.insert("jsonrpc".into(), json!("2.0"));
            response.insert("id".into(), request["id"].clone());
            response.extend(answer);
            ws.send(Message::Text(Value::Object(response).to_string()))
                .await
                .unwrap();
        }
    });

    format!("ws://{address}/api/current")
}
