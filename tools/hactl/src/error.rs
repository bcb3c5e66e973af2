// Copyright (c) 2026 Restate Software, Inc., Restate GmbH.
// All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::io;

use crate::catalog::NodeRole;
use crate::commands::{Action, Rejection};
use crate::connection::{CallError, RpcError};

/// Everything that ends a run with a nonzero exit code. The `Display` output is what the
/// operator gets to see.
#[derive(Debug, thiserror::Error)]
pub enum HactlError {
    #[error("Unexpected failure enumerating websocket client: {0}")]
    ConnectionSetup(#[source] RpcError),
    #[error("Node status: {}", NodeRole::NotHA)]
    NotHaNode,
    #[error("Failed to fetch {what}: {source}")]
    Fetch {
        what: &'static str,
        #[source]
        source: CallError,
    },
    #[error(transparent)]
    Rejected(#[from] Rejection),
    #[error("{0}")]
    Mutation(#[source] CallError),
    #[error("Command: '{0}' cancelled.")]
    Cancelled(Action),
    #[error("Failed to reboot this node: {0}")]
    Reboot(#[source] io::Error),
}
