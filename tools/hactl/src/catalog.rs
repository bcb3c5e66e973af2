// Copyright (c) 2026 Restate Software, Inc., Restate GmbH.
// All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Human readable text for failover roles and disablement reasons.
//!
//! Both lookups are total: identifiers the daemon adds in later releases render as
//! `Unknown` / `UNKNOWN` instead of failing the command.

use std::fmt;

use serde::Deserialize;

/// Label used for disablement reasons missing from [`REASONS`].
pub const UNKNOWN_REASON: &str = "UNKNOWN";

/// Failover role of the local node, as reported by `failover.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    NotHA,
    Active,
    Standby,
    Electing,
    ImportingActive,
    Faulted,
    Unknown,
}

impl NodeRole {
    pub fn from_identifier(identifier: &str) -> Self {
        match identifier {
            "SINGLE" => NodeRole::NotHA,
            "MASTER" => NodeRole::Active,
            "BACKUP" => NodeRole::Standby,
            "ELECTING" => NodeRole::Electing,
            "IMPORTING" => NodeRole::ImportingActive,
            "ERROR" => NodeRole::Faulted,
            _ => NodeRole::Unknown,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            NodeRole::NotHA => "Not an HA node",
            NodeRole::Active => "Active",
            NodeRole::Standby => "Standby",
            NodeRole::Electing => "Electing active node",
            NodeRole::ImportingActive => "Becoming active node",
            NodeRole::Faulted => "Faulted",
            NodeRole::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A coded cause keeping failover from being healthy. The set of codes is owned by the
/// daemon, so this wraps the raw identifier instead of enumerating it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct DisabledReason(String);

impl DisabledReason {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn describe(&self) -> &'static str {
        REASONS
            .iter()
            .find(|(code, _)| *code == self.0)
            .map(|(_, text)| *text)
            .unwrap_or(UNKNOWN_REASON)
    }
}

impl fmt::Display for DisabledReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

static REASONS: &[(&str, &str)] = &[
    ("NO_VOLUME", "No zpools have been configured."),
    ("NO_VIP", "No interfaces have been configured with a Virtual IP."),
    (
        "NO_SYSTEM_READY",
        "Other storage controller has not finished booting.",
    ),
    ("NO_PONG", "Unable to contact remote node via the heartbeat interface."),
    ("NO_FAILOVER", "Failover is administratively disabled."),
    ("NO_LICENSE", "Other storage controller has no license."),
    (
        "DISAGREE_VIP",
        "Nodes Virtual IP states do not agree.",
    ),
    (
        "MISMATCH_DISKS",
        "The storage controllers do not have the same quantity of disks.",
    ),
    (
        "MISMATCH_VERSIONS",
        "Software versions do not match between storage controllers.",
    ),
    (
        "MISMATCH_NICS",
        "Network interfaces do not match between storage controllers.",
    ),
    (
        "NO_CRITICAL_INTERFACES",
        "No network interfaces are marked critical for failover.",
    ),
    ("NO_FENCED", "Fenced is not running."),
    (
        "NO_HEARTBEAT_IFACE",
        "Local heartbeat interface does not exist.",
    ),
    (
        "NO_CARRIER_ON_HEARTBEAT",
        "Local heartbeat interface is down.",
    ),
    (
        "LOC_FIPS_REBOOT_REQ",
        "This node needs to be rebooted to apply FIPS configuration.",
    ),
    (
        "REM_FIPS_REBOOT_REQ",
        "Other node needs to be rebooted to apply FIPS configuration.",
    ),
    (
        "LOC_UPGRADE_REBOOT_REQ",
        "This node needs to be rebooted to finish a software upgrade.",
    ),
    (
        "REM_UPGRADE_REBOOT_REQ",
        "Other node needs to be rebooted to finish a software upgrade.",
    ),
    ("LOC_SYSTEMD_SHUTDOWN", "This node is shutting down."),
    ("REM_SYSTEMD_SHUTDOWN", "Other node is shutting down."),
    (
        "LOC_FAILOVER_ONGOING",
        "This node is currently processing a failover event.",
    ),
    (
        "REM_FAILOVER_ONGOING",
        "Other node is currently processing a failover event.",
    ),
];

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    #[test]
    fn roles_parse_from_daemon_identifiers() {
        let parsed: Vec<NodeRole> = ["SINGLE", "MASTER", "BACKUP", "ELECTING", "IMPORTING", "ERROR"]
            .iter()
            .map(|id| NodeRole::from_identifier(id))
            .collect();

        assert_that!(
            parsed,
            elements_are![
                eq(NodeRole::NotHA),
                eq(NodeRole::Active),
                eq(NodeRole::Standby),
                eq(NodeRole::Electing),
                eq(NodeRole::ImportingActive),
                eq(NodeRole::Faulted)
            ]
        );
    }

    #[test]
    fn unknown_roles_fall_back() {
        for id in ["UNKNOWN", "", "master", "SPLIT_BRAIN"] {
            let role = NodeRole::from_identifier(id);
            assert_that!(role, eq(NodeRole::Unknown));
            assert_that!(role.to_string(), eq("Unknown"));
        }
    }

    #[test]
    fn reasons_map_or_degrade_to_unknown() {
        assert_that!(
            DisabledReason::new("NO_FAILOVER").describe(),
            eq("Failover is administratively disabled.")
        );
        assert_that!(DisabledReason::new("LOC_FLD").describe(), eq(UNKNOWN_REASON));
    }

    #[test]
    fn reason_codes_are_unique() {
        let mut codes: Vec<_> = REASONS.iter().map(|(code, _)| *code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_that!(codes.len(), eq(REASONS.len()));
    }

    #[test]
    fn reasons_deserialize_from_plain_strings() {
        let reasons: Vec<DisabledReason> =
            serde_json::from_str(r#"["NO_PONG", "BRAND_NEW"]"#).unwrap();
        assert_that!(
            reasons,
            elements_are![
                eq(DisabledReason::new("NO_PONG")),
                eq(DisabledReason::new("BRAND_NEW"))
            ]
        );
    }
}
