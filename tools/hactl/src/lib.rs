// Copyright (c) 2026 Restate Software, Inc., Restate GmbH.
// All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Operator control for a two-node high-availability storage cluster.
//!
//! The tool never implements failover itself. It reads the failover role, configuration
//! and disablement reasons from the local management daemon, checks the preconditions of
//! the requested command against that snapshot and forwards state changes to the daemon.

mod app;
pub mod catalog;
pub mod commands;
pub mod confirm;
pub mod connection;
mod error;
pub mod failover;
pub mod host;

#[cfg(test)]
mod test_util;

pub use app::CliApp;
pub use error::HactlError;
