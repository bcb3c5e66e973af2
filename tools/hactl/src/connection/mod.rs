// Copyright (c) 2026 Restate Software, Inc., Restate GmbH.
// All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod gateway;
mod jsonrpc;

use std::time::Duration;

use cling::{prelude::Parser, Collect};

pub use gateway::{methods, CallError, CallOptions, CallOutcome, RemoteGateway};
pub use jsonrpc::{FaultData, FaultTrace, JsonRpcClient, RpcError, RpcFault};

pub const DEFAULT_URI: &str = "ws://127.0.0.1:6000/api/current";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Parser, Collect, Debug)]
pub struct ConnectionInfo {
    /// Websocket endpoint of the local management daemon.
    #[clap(
        long,
        value_hint = clap::ValueHint::Url,
        default_value = DEFAULT_URI,
        env = "HACTL_URI",
    )]
    pub uri: String,

    /// Seconds to wait for the other node to answer once connected.
    #[clap(long, value_name = "SECONDS", default_value_t = 2)]
    pub peer_timeout: u64,

    /// Seconds to wait for a connection to the other node.
    #[clap(long, value_name = "SECONDS", default_value_t = 2)]
    pub peer_connect_timeout: u64,
}

impl ConnectionInfo {
    pub async fn connect(&self) -> Result<JsonRpcClient, RpcError> {
        JsonRpcClient::connect(&self.uri, CONNECT_TIMEOUT).await
    }

    pub fn peer_call_options(&self) -> CallOptions {
        CallOptions {
            timeout: Duration::from_secs(self.peer_timeout),
            connect_timeout: Duration::from_secs(self.peer_connect_timeout),
        }
    }
}
