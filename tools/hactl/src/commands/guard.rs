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
use crate::failover::FailoverConfig;

use super::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Failover already enabled.")]
    AlreadyEnabled,
    #[error("Failover already disabled.")]
    AlreadyDisabled,
    #[error("This command can only be run on the Active node.")]
    NotActiveForToggle,
    #[error("Failover must be enabled before running this command.")]
    FailoverDisabled,
    #[error("This command can only be run on the standby node.")]
    NotStandby,
    #[error("This command can only be run on the active node.")]
    NotActive,
    #[error("This command can only be run when HA is healthy.")]
    Unhealthy,
}

/// Decides whether a mutating command may run, given the role and configuration captured
/// at startup. Does no I/O.
pub struct CommandGuard<'a> {
    role: NodeRole,
    config: &'a FailoverConfig,
}

impl<'a> CommandGuard<'a> {
    pub fn new(role: NodeRole, config: &'a FailoverConfig) -> Self {
        CommandGuard { role, config }
    }

    /// Full decision. `live_reasons` only matters for takeover and giveback and has to be
    /// fetched right before the call. Without them those two are refused.
    pub fn decide(
        &self,
        action: Action,
        live_reasons: Option<&[DisabledReason]>,
    ) -> Result<(), Rejection> {
        self.check_snapshot(action)?;
        if action.requires_healthy_failover() {
            self.check_health(live_reasons.ok_or(Rejection::Unhealthy)?)?;
        }
        Ok(())
    }

    /// The checks that only need the startup snapshot. First failing rule wins.
    pub fn check_snapshot(&self, action: Action) -> Result<(), Rejection> {
        match action {
            Action::Enable => {
                if !self.config.disabled {
                    return Err(Rejection::AlreadyEnabled);
                }
                if self.role != NodeRole::Active {
                    return Err(Rejection::NotActiveForToggle);
                }
            }
            Action::Disable => {
                if self.config.disabled {
                    return Err(Rejection::AlreadyDisabled);
                }
                if self.role != NodeRole::Active {
                    return Err(Rejection::NotActiveForToggle);
                }
            }
            Action::Takeover => {
                if self.config.disabled {
                    return Err(Rejection::FailoverDisabled);
                }
                if self.role != NodeRole::Standby {
                    return Err(Rejection::NotStandby);
                }
            }
            Action::Giveback => {
                if self.config.disabled {
                    return Err(Rejection::FailoverDisabled);
                }
                if self.role != NodeRole::Active {
                    return Err(Rejection::NotActive);
                }
            }
        }
        Ok(())
    }

    pub fn check_health(&self, live_reasons: &[DisabledReason]) -> Result<(), Rejection> {
        if live_reasons.is_empty() {
            Ok(())
        } else {
            Err(Rejection::Unhealthy)
        }
    }
}
