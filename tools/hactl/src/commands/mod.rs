// Copyright (c) 2026 Restate Software, Inc., Restate GmbH.
// All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod execute;
mod guard;
mod status;

use std::fmt;

use clap::ValueEnum;
use tracing::debug;

use crate::confirm::Confirm;
use crate::connection::{CallOptions, RemoteGateway};
use crate::error::HactlError;
use crate::failover::FailoverClient;
use crate::host::{Reboot, SerialNumberSource};

pub use execute::{CommandExecutor, Executed};
pub use guard::{CommandGuard, Rejection};
pub use status::{describe_peer_failure, StatusReporter};

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Command {
    /// Show the failover role of this node and why failover may be disabled
    #[default]
    Status,
    /// Administratively enable failover
    Enable,
    /// Administratively disable failover
    Disable,
    /// Make this (standby) node the active one
    Takeover,
    /// Make this (active) node hand over to the other node and reboot
    Giveback,
}

impl Command {
    /// The state-changing action behind this command, `None` for `status`.
    pub fn action(self) -> Option<Action> {
        match self {
            Command::Status => None,
            Command::Enable => Some(Action::Enable),
            Command::Disable => Some(Action::Disable),
            Command::Takeover => Some(Action::Takeover),
            Command::Giveback => Some(Action::Giveback),
        }
    }
}

/// Commands that change cluster state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Enable,
    Disable,
    Takeover,
    Giveback,
}

impl Action {
    /// Takeover and giveback disrupt service, they re-check failover health right before
    /// running.
    pub fn requires_healthy_failover(self) -> bool {
        matches!(self, Action::Takeover | Action::Giveback)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Enable => "enable",
            Action::Disable => "disable",
            Action::Takeover => "takeover",
            Action::Giveback => "giveback",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Report(String),
    Executed(Executed),
}

/// Takes the cluster snapshot once and routes the command.
pub struct Dispatcher<'a, G> {
    pub gateway: &'a G,
    pub serials: &'a dyn SerialNumberSource,
    pub rebooter: &'a dyn Reboot,
    pub confirm: &'a mut dyn Confirm,
    pub peer_options: CallOptions,
}

impl<G> Dispatcher<'_, G>
where
    G: RemoteGateway + Sync,
{
    pub async fn dispatch(self, command: Command) -> Result<Outcome, HactlError> {
        let failover = FailoverClient::new(self.gateway);

        if !failover.is_ha_licensed().await? {
            return Err(HactlError::NotHaNode);
        }
        let config = failover.config().await?;
        let role = failover.role().await?;
        debug!(?command, ?role, ?config, "Cluster snapshot taken");

        let Some(action) = command.action() else {
            return StatusReporter::new(&failover, self.serials, self.peer_options)
                .render(role)
                .await
                .map(Outcome::Report);
        };

        let guard = CommandGuard::new(role, &config);
        guard.check_snapshot(action)?;
        if action.requires_healthy_failover() {
            let live_reasons = failover.disabled_reasons().await?;
            guard.check_health(&live_reasons)?;
        }

        CommandExecutor::new(&failover, self.rebooter, self.confirm)
            .execute(action)
            .await
            .map(Outcome::Executed)
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use serde_json::{json, Value};

    use super::*;
    use crate::connection::methods;
    use crate::test_util::{CountingReboot, FixedSerial, MockGateway, ScriptedConfirm};

    fn cluster(licensed: bool, role: &str, disabled: bool) -> MockGateway {
        MockGateway::default()
            .respond(methods::LICENSE_IS_HA, json!(licensed))
            .respond(methods::CONFIG, json!({"disabled": disabled, "timeout": 0}))
            .respond(methods::STATUS, json!(role))
    }

    struct Harness {
        rebooter: CountingReboot,
        confirm: ScriptedConfirm,
    }

    impl Harness {
        fn new(answer: bool) -> Self {
            Self {
                rebooter: CountingReboot::default(),
                confirm: ScriptedConfirm::answering(answer),
            }
        }

        async fn run(&mut self, gateway: &MockGateway, command: Command) -> std::result::Result<Outcome, HactlError> {
            Dispatcher {
                gateway,
                serials: &FixedSerial("A-0001"),
                rebooter: &self.rebooter,
                confirm: &mut self.confirm,
                peer_options: CallOptions::default(),
            }
            .dispatch(command)
            .await
        }
    }

    #[test_log::test(tokio::test)]
    async fn non_ha_system_stops_after_license_check() {
        let gateway = cluster(false, "SINGLE", false);

        let result = Harness::new(true).run(&gateway, Command::Enable).await;

        let err = result.expect_err("not an HA system");
        assert_that!(err.to_string(), eq("Node status: Not an HA node"));
        assert_that!(
            gateway.called_methods(),
            elements_are![eq(methods::LICENSE_IS_HA)]
        );
    }

    #[test_log::test(tokio::test)]
    async fn status_renders_report() {
        let gateway = cluster(true, "BACKUP", false)
            .respond(methods::DISABLED_REASONS, json!([]))
            .fail_remote(methods::SYSTEM_INFO, crate::connection::CallError::Timeout);

        let outcome = Harness::new(false).run(&gateway, Command::Status).await;

        assert_that!(
            outcome,
            ok(eq(Outcome::Report(
                "Node status: Standby\n\
                 This node serial: A-0001\n\
                 Other node serial: Timed out after 2 seconds waiting on response from remote node.\n\
                 Failover status: Failover is healthy.\n\
                 \n"
                    .to_owned()
            )))
        );
    }

    #[test_log::test(tokio::test)]
    async fn snapshot_is_taken_once() {
        let gateway = cluster(true, "MASTER", true).respond(methods::UPDATE, Value::Null);

        let outcome = Harness::new(false).run(&gateway, Command::Enable).await;

        assert_that!(outcome, ok(eq(Outcome::Executed(Executed::Enabled))));
        assert_that!(
            gateway.called_methods(),
            elements_are![
                eq(methods::LICENSE_IS_HA),
                eq(methods::CONFIG),
                eq(methods::STATUS),
                eq(methods::UPDATE)
            ]
        );
    }

    #[test_log::test(tokio::test)]
    async fn rejected_enable_skips_mutation() {
        let gateway = cluster(true, "BACKUP", false);

        let result = Harness::new(true).run(&gateway, Command::Enable).await;

        assert_that!(
            result,
            err(predicate(|e: &HactlError| matches!(
                e,
                HactlError::Rejected(Rejection::AlreadyEnabled)
            )))
        );
        assert_that!(gateway.called_methods().len(), eq(3));
    }

    #[test_log::test(tokio::test)]
    async fn takeover_rechecks_health_before_asking() {
        let gateway = cluster(true, "BACKUP", false)
            .respond(methods::DISABLED_REASONS, json!(["NO_PONG"]));
        let mut harness = Harness::new(true);

        let result = harness.run(&gateway, Command::Takeover).await;

        let err = result.expect_err("failover is unhealthy");
        assert_that!(
            err.to_string(),
            eq("This command can only be run when HA is healthy.")
        );
        assert_that!(harness.confirm.asked, eq(0));
        let called = gateway.called_methods();
        assert_that!(called.last(), some(eq(methods::DISABLED_REASONS)));
    }

    #[test_log::test(tokio::test)]
    async fn healthy_takeover_runs() {
        let gateway = cluster(true, "BACKUP", false)
            .respond(methods::DISABLED_REASONS, json!([]))
            .respond_remote(methods::BECOME_PASSIVE, Value::Null);
        let mut harness = Harness::new(true);

        let outcome = harness.run(&gateway, Command::Takeover).await;

        assert_that!(outcome, ok(eq(Outcome::Executed(Executed::TakeoverRequested))));
        assert_that!(harness.confirm.asked, eq(1));
        assert_that!(harness.rebooter.count(), eq(0));
    }

    #[test_log::test(tokio::test)]
    async fn giveback_on_standby_is_rejected_without_fetching_reasons() {
        let gateway = cluster(true, "BACKUP", false);
        let mut harness = Harness::new(true);

        let result = harness.run(&gateway, Command::Giveback).await;

        let err = result.expect_err("giveback needs the active node");
        assert_that!(
            err.to_string(),
            eq("This command can only be run on the active node.")
        );
        assert_that!(
            gateway.called_methods(),
            not(contains(eq(methods::DISABLED_REASONS)))
        );
        assert_that!(harness.rebooter.count(), eq(0));
    }

    #[test_log::test(tokio::test)]
    async fn snapshot_failure_is_reported() {
        let gateway = MockGateway::default()
            .respond(methods::LICENSE_IS_HA, json!(true))
            .respond(methods::CONFIG, json!("garbage"));

        let result = Harness::new(true).run(&gateway, Command::Status).await;

        let err = result.expect_err("config is malformed");
        assert_that!(
            err.to_string(),
            starts_with("Failed to fetch failover configuration: unexpected response")
        );
    }
}
