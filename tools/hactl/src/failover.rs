// Copyright (c) 2026 Restate Software, Inc., Restate GmbH.
// All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Typed access to the daemon's failover API.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::catalog::{DisabledReason, NodeRole};
use crate::connection::{methods, CallError, CallOptions, RemoteGateway};
use crate::error::HactlError;

/// Administrative failover settings. Fields other than `disabled` are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FailoverConfig {
    pub disabled: bool,
}

pub struct FailoverClient<'a, G> {
    gateway: &'a G,
}

impl<'a, G> FailoverClient<'a, G>
where
    G: RemoteGateway + Sync,
{
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    pub async fn is_ha_licensed(&self) -> Result<bool, HactlError> {
        self.fetch("HA license status", methods::LICENSE_IS_HA).await
    }

    pub async fn config(&self) -> Result<FailoverConfig, HactlError> {
        self.fetch("failover configuration", methods::CONFIG).await
    }

    pub async fn role(&self) -> Result<NodeRole, HactlError> {
        let identifier: String = self.fetch("failover status", methods::STATUS).await?;
        let role = NodeRole::from_identifier(&identifier);
        debug!(%identifier, ?role, "Local failover role");
        Ok(role)
    }

    pub async fn disabled_reasons(&self) -> Result<Vec<DisabledReason>, HactlError> {
        self.fetch("failover disabled reasons", methods::DISABLED_REASONS)
            .await
    }

    /// Serial number of the other node, queried through the local daemon.
    pub async fn peer_serial(&self, options: CallOptions) -> Result<String, CallError> {
        let info = self
            .gateway
            .call_remote(methods::SYSTEM_INFO, Vec::new(), Some(options))
            .await?;
        info.get("system_serial")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| CallError::Other("remote node did not report a serial number".into()))
    }

    pub async fn set_disabled(&self, disabled: bool) -> Result<(), CallError> {
        self.gateway
            .invoke(methods::UPDATE, vec![json!({ "disabled": disabled })], None)
            .await
            .map(drop)
    }

    /// Demotes this node.
    pub async fn become_passive(&self) -> Result<(), CallError> {
        self.gateway
            .invoke(methods::BECOME_PASSIVE, Vec::new(), None)
            .await
            .map(drop)
    }

    /// Demotes the other node, so that this one takes over.
    pub async fn peer_become_passive(&self) -> Result<(), CallError> {
        self.gateway
            .call_remote(methods::BECOME_PASSIVE, Vec::new(), None)
            .await
            .map(drop)
    }

    async fn fetch<T>(&self, what: &'static str, method: &str) -> Result<T, HactlError>
    where
        T: DeserializeOwned,
    {
        let value = self
            .gateway
            .invoke(method, Vec::new(), None)
            .await
            .map_err(|source| HactlError::Fetch { what, source })?;

        serde_json::from_value(value).map_err(|err| HactlError::Fetch {
            what,
            source: CallError::Other(format!("unexpected response: {err}")),
        })
    }
}
