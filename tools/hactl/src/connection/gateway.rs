// Copyright (c) 2026 Restate Software, Inc., Restate GmbH.
// All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::future::Future;
use std::time::Duration;

use serde_json::{json, Value};
use tracing::debug;

use super::jsonrpc::{JsonRpcClient, RpcError, RpcFault};

/// Methods of the management daemon used by this tool.
pub mod methods {
    pub const LICENSE_IS_HA: &str = "license.isHA";
    pub const CONFIG: &str = "failover.config";
    pub const STATUS: &str = "failover.status";
    pub const DISABLED_REASONS: &str = "failover.disabled.reasons";
    pub const UPDATE: &str = "failover.update";
    pub const CALL_REMOTE: &str = "failover.callRemote";
    pub const BECOME_PASSIVE: &str = "failover.becomePassive";
    pub const SYSTEM_INFO: &str = "system.info";
}

const ECONNABORTED: i32 = 103;
const ECONNRESET: i32 = 104;
const ECONNREFUSED: i32 = 111;
const EHOSTDOWN: i32 = 112;
const EHOSTUNREACH: i32 = 113;
const ENETUNREACH: i32 = 101;
const ETIMEDOUT: i32 = 110;

const CALL_TIMEOUT_CLASS: &str = "CallTimeout";

/// Extra time granted on top of the forwarded bounds before the local side gives up.
const LOCAL_DEADLINE_GRACE: Duration = Duration::from_secs(1);

/// Result of a single daemon call.
pub type CallOutcome = Result<Value, CallError>;

/// Classified failure of a daemon call. A peer that cannot be reached and a peer that
/// did not answer in time are distinct cases, operators act differently on them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallError {
    #[error("connection failed")]
    ConnectFailure,
    #[error("timed out waiting on a response")]
    Timeout,
    #[error("{0}")]
    Other(String),
}

/// Bounds for a call that is forwarded to the peer node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallOptions {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(2),
            connect_timeout: Duration::from_secs(2),
        }
    }
}

impl CallOptions {
    pub fn to_value(&self) -> Value {
        json!({
            "timeout": self.timeout.as_secs(),
            "connect_timeout": self.connect_timeout.as_secs(),
        })
    }

    /// How long the local side waits for the daemon to report back on a bounded call.
    pub fn local_deadline(&self) -> Duration {
        self.timeout + self.connect_timeout + LOCAL_DEADLINE_GRACE
    }
}

/// Call contract of the management daemon.
pub trait RemoteGateway {
    /// Performs one blocking round trip. `options` bounds the call; without them the
    /// transport's own behavior applies.
    fn invoke(
        &self,
        method: &str,
        args: Vec<Value>,
        options: Option<CallOptions>,
    ) -> impl Future<Output = CallOutcome> + Send;

    /// Asks the daemon to run `method` on the peer node.
    fn call_remote(
        &self,
        method: &str,
        args: Vec<Value>,
        options: Option<CallOptions>,
    ) -> impl Future<Output = CallOutcome> + Send {
        let mut forwarded = vec![Value::from(method), Value::Array(args)];
        if let Some(options) = &options {
            forwarded.push(options.to_value());
        }
        self.invoke(methods::CALL_REMOTE, forwarded, options)
    }
}

impl From<RpcFault> for CallError {
    fn from(fault: RpcFault) -> Self {
        let data = fault.data.as_ref();
        let errno = data.and_then(|data| data.error);
        let errname = data.and_then(|data| data.errname.as_deref());
        let trace_class = data
            .and_then(|data| data.trace.as_ref())
            .and_then(|trace| trace.class.as_deref());

        let connect_failure = matches!(
            errname,
            Some(
                "ECONNREFUSED"
                    | "ECONNABORTED"
                    | "ECONNRESET"
                    | "EHOSTUNREACH"
                    | "EHOSTDOWN"
                    | "ENETUNREACH"
            )
        ) || matches!(
            errno,
            Some(ECONNREFUSED | ECONNABORTED | ECONNRESET | EHOSTUNREACH | EHOSTDOWN | ENETUNREACH)
        );
        if connect_failure {
            return CallError::ConnectFailure;
        }

        if trace_class == Some(CALL_TIMEOUT_CLASS)
            || errname == Some("ETIMEDOUT")
            || errno == Some(ETIMEDOUT)
        {
            return CallError::Timeout;
        }

        CallError::Other(fault.reason().to_owned())
    }
}

impl From<RpcError> for CallError {
    fn from(err: RpcError) -> Self {
        match err {
            RpcError::Fault(fault) => CallError::from(fault),
            other => CallError::Other(other.to_string()),
        }
    }
}

impl RemoteGateway for JsonRpcClient {
    async fn invoke(
        &self,
        method: &str,
        args: Vec<Value>,
        options: Option<CallOptions>,
    ) -> CallOutcome {
        let call = self.call(method, &args);
        let result = match options {
            Some(options) => {
                match tokio::time::timeout(options.local_deadline(), call).await {
                    Ok(result) => result,
                    Err(_) => {
                        debug!(%method, "No answer within {:?}", options.local_deadline());
                        return Err(CallError::Timeout);
                    }
                }
            }
            None => call.await,
        };

        result.map_err(|err| {
            let err = CallError::from(err);
            debug!(%method, ?err, "Call failed");
            err
        })
    }
}
