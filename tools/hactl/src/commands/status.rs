// Copyright (c) 2026 Restate Software, Inc., Restate GmbH.
// All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::catalog::{DisabledReason, NodeRole};
use crate::connection::{CallError, CallOptions, RemoteGateway};
use crate::error::HactlError;
use crate::failover::FailoverClient;
use crate::host::SerialNumberSource;

/// Renders the node and failover status report.
pub struct StatusReporter<'a, 'b, G> {
    failover: &'b FailoverClient<'a, G>,
    serials: &'b dyn SerialNumberSource,
    peer_options: CallOptions,
}

impl<'a, 'b, G> StatusReporter<'a, 'b, G>
where
    G: RemoteGateway + Sync,
{
    pub fn new(
        failover: &'b FailoverClient<'a, G>,
        serials: &'b dyn SerialNumberSource,
        peer_options: CallOptions,
    ) -> Self {
        Self {
            failover,
            serials,
            peer_options,
        }
    }

    /// Only the local reason fetch can fail the report; problems reaching the other node
    /// are rendered in place of its serial.
    pub async fn render(&self, role: NodeRole) -> Result<String, HactlError> {
        let mut lines = vec![format!("Node status: {role}")];

        let local_serial = match self.serials.serial_number() {
            Ok(serial) => serial,
            Err(err) => format!("Unknown ({err})"),
        };
        lines.push(format!("This node serial: {local_serial}"));

        let peer_serial = match self.failover.peer_serial(self.peer_options).await {
            Ok(serial) => serial,
            Err(err) => describe_peer_failure(&err, &self.peer_options),
        };
        lines.push(format!("Other node serial: {peer_serial}"));

        let reasons = self.failover.disabled_reasons().await?;
        render_reasons(&reasons, &mut lines);

        lines.push(String::new());
        Ok(lines.join("\n") + "\n")
    }
}

pub fn describe_peer_failure(err: &CallError, options: &CallOptions) -> String {
    match err {
        CallError::ConnectFailure => format!(
            "Failed to connect to remote node after {} seconds.",
            options.connect_timeout.as_secs()
        ),
        CallError::Timeout => format!(
            "Timed out after {} seconds waiting on response from remote node.",
            options.timeout.as_secs()
        ),
        CallError::Other(message) => message.clone(),
    }
}

fn render_reasons(reasons: &[DisabledReason], lines: &mut Vec<String>) {
    match reasons {
        [] => lines.push("Failover status: Failover is healthy.".to_owned()),
        [reason] => lines.push(format!("Failover status: {reason}")),
        _ => {
            lines.push("Failover status: ".to_owned());
            lines.extend(
                reasons
                    .iter()
                    .enumerate()
                    .map(|(idx, reason)| format!("    {}: {reason}", idx + 1)),
            );
        }
    }
}
