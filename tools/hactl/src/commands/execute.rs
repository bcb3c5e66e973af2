// Copyright (c) 2026 Restate Software, Inc., Restate GmbH.
// All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt;

use hactl_cli_util::c_warn;
use tracing::info;

use crate::confirm::{Confirm, PROMPT};
use crate::connection::RemoteGateway;
use crate::error::HactlError;
use crate::failover::FailoverClient;
use crate::host::Reboot;

use super::Action;

/// What a successfully executed command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Executed {
    Enabled,
    Disabled,
    TakeoverRequested,
    GivebackRequested,
}

impl fmt::Display for Executed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Executed::Enabled => "Failover enabled.",
            Executed::Disabled => "Failover disabled.",
            Executed::TakeoverRequested => {
                "Takeover requested. The other node will now become passive."
            }
            Executed::GivebackRequested => "Giveback requested. This node will now reboot.",
        })
    }
}

/// Carries out a command the guard allowed.
pub struct CommandExecutor<'a, 'b, G> {
    failover: &'b FailoverClient<'a, G>,
    rebooter: &'b dyn Reboot,
    confirm: &'b mut dyn Confirm,
}

impl<'a, 'b, G> CommandExecutor<'a, 'b, G>
where
    G: RemoteGateway + Sync,
{
    pub fn new(
        failover: &'b FailoverClient<'a, G>,
        rebooter: &'b dyn Reboot,
        confirm: &'b mut dyn Confirm,
    ) -> Self {
        Self {
            failover,
            rebooter,
            confirm,
        }
    }

    pub async fn execute(&mut self, action: Action) -> Result<Executed, HactlError> {
        match action {
            Action::Enable => {
                self.failover
                    .set_disabled(false)
                    .await
                    .map_err(HactlError::Mutation)?;
                Ok(Executed::Enabled)
            }
            Action::Disable => {
                self.failover
                    .set_disabled(true)
                    .await
                    .map_err(HactlError::Mutation)?;
                Ok(Executed::Disabled)
            }
            Action::Takeover => {
                self.confirm_or_cancel(action, "This will likely cause the other node to reboot.")?;
                info!("Asking the other node to become passive");
                self.failover
                    .peer_become_passive()
                    .await
                    .map_err(HactlError::Mutation)?;
                Ok(Executed::TakeoverRequested)
            }
            Action::Giveback => {
                self.confirm_or_cancel(action, "This will cause this node to reboot.")?;
                info!("Asking this node to become passive");
                self.failover
                    .become_passive()
                    .await
                    .map_err(HactlError::Mutation)?;
                self.rebooter
                    .trigger_reboot()
                    .map_err(HactlError::Reboot)?;
                Ok(Executed::GivebackRequested)
            }
        }
    }

    fn confirm_or_cancel(&mut self, action: Action, warning: &str) -> Result<(), HactlError> {
        c_warn!("{warning}");
        if self.confirm.confirm(PROMPT) {
            Ok(())
        } else {
            Err(HactlError::Cancelled(action))
        }
    }
}
