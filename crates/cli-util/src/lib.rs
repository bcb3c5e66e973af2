// Copyright (c) 2023 - 2026 Restate Software, Inc., Restate GmbH.
// All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Shared plumbing for the operator command line tools.
//!
//! - [`CliContext`] holds process-wide settings (colors, auto-confirmation) and installs
//!   the tracing subscriber.
//! - [`CommonOpts`] are the flags every tool flattens into its argument struct.
//! - [`ui`] provides the `c_*` output macros and semantic styles.
//!
//! ```ignore
//! use hactl_cli_util::{c_println, c_warn, CliContext, CommonOpts};
//!
//! CliContext::new(opts).set_as_global();
//! c_warn!("This will cause this node to reboot.");
//! c_println!("Node status: {}", role);
//! ```

mod context;
mod opts;
pub mod ui;

pub use context::CliContext;
pub use opts::CommonOpts;

// Re-exported for the c_warn! macro
#[doc(hidden)]
pub use comfy_table as _comfy_table;
