// Copyright (c) 2024 - 2026 Restate Software, Inc., Restate GmbH.
// All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use clap::{ArgAction, Args};
use cling::Collect;
use tracing_subscriber::filter::LevelFilter;

#[derive(Args, Debug, Clone, Default)]
pub(crate) struct Verbosity {
    /// Log to stderr. Repeat for more detail (-v errors ... -vvvvv traces)
    #[arg(long, short, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl Verbosity {
    /// Silent unless asked for.
    pub fn level_filter(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::OFF,
            1 => LevelFilter::ERROR,
            2 => LevelFilter::WARN,
            3 => LevelFilter::INFO,
            4 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub(crate) struct ConfirmMode {
    /// Auto answer "yes" to confirmation prompts. Takeover and giveback will proceed
    /// without asking.
    #[arg(name = "yes", long, short, global = true)]
    pub yes: bool,
}

#[derive(Args, Collect, Debug, Clone, Default)]
pub struct CommonOpts {
    #[clap(flatten)]
    pub(crate) verbosity: Verbosity,
    #[clap(flatten)]
    pub(crate) confirm: ConfirmMode,
}
