// Copyright (c) 2023 - 2026 Restate Software, Inc., Restate GmbH.
// All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Process-wide CLI settings.
//!
//! Colors are enabled only when stdout is a terminal, `TERM` is not `dumb` and
//! `NO_COLOR` is unset or `0`. `CLICOLOR_FORCE` (anything but `0`) overrides all of that.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;
use tracing::{info, warn};

use crate::opts::CommonOpts;

static GLOBAL_CLI_CONTEXT: OnceLock<ArcSwap<CliContext>> = OnceLock::new();

pub struct CliContext {
    auto_confirm: bool,
    colors_enabled: bool,
    loaded_dotenv: Option<PathBuf>,
}

impl Default for CliContext {
    fn default() -> Self {
        Self {
            auto_confirm: false,
            colors_enabled: true,
            loaded_dotenv: None,
        }
    }
}

impl CliContext {
    /// Builds the context from the process environment, loads `.env` and installs the
    /// tracing subscriber. Call [`set_as_global`](Self::set_as_global) afterwards.
    pub fn new(opts: CommonOpts) -> Self {
        let loaded_dotenv = dotenvy::dotenv().ok();
        let ctx = Self::with_env(
            |key| std::env::var(key).ok(),
            std::io::stdout().is_terminal(),
            &opts,
        )
        .with_dotenv(loaded_dotenv);

        // Setup logging from RUST_LOG, falling back to -v .. -vvvvv
        let filter = tracing_subscriber::EnvFilter::builder()
            .with_default_directive(opts.verbosity.level_filter().into())
            .from_env_lossy();
        if let Err(err) = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .with_ansi(ctx.colors_enabled)
            .try_init()
        {
            warn!("Failed to initialize tracing subscriber: {}", err);
        }

        match &ctx.loaded_dotenv {
            Some(path) => info!("Loaded .env file from: {}", path.display()),
            None => info!("Didn't load '.env' file"),
        };

        ctx
    }

    /// Builds the context without touching the process environment or the tracing
    /// subscriber.
    pub fn with_env<F>(lookup: F, is_terminal: bool, opts: &CommonOpts) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let colors_enabled = detect_colors(&lookup, is_terminal);
        dialoguer::console::set_colors_enabled(colors_enabled);
        dialoguer::console::set_colors_enabled_stderr(colors_enabled);

        Self {
            auto_confirm: opts.confirm.yes,
            colors_enabled,
            loaded_dotenv: None,
        }
    }

    fn with_dotenv(mut self, path: Option<PathBuf>) -> Self {
        self.loaded_dotenv = path;
        self
    }

    /// Returns the global context, or defaults if none was set yet.
    pub fn get() -> arc_swap::Guard<Arc<CliContext>> {
        GLOBAL_CLI_CONTEXT.get_or_init(Default::default).load()
    }

    pub fn set_as_global(self) {
        GLOBAL_CLI_CONTEXT
            .get_or_init(Default::default)
            .store(Arc::new(self));
    }

    /// True only when `--yes` was passed.
    pub fn auto_confirm(&self) -> bool {
        self.auto_confirm
    }

    pub fn colors_enabled(&self) -> bool {
        self.colors_enabled
    }
}

fn detect_colors<F>(lookup: &F, is_terminal: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    // See http://bixense.com/clicolors/
    if lookup("CLICOLOR_FORCE").is_some_and(|v| v != "0") {
        return true;
    }
    let no_color = lookup("NO_COLOR").is_some_and(|v| v != "0");
    let dumb_term = lookup("TERM").is_some_and(|v| v == "dumb");

    is_terminal && !no_color && !dumb_term
}
