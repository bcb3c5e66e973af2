// Copyright (c) 2026 Restate Software, Inc., Restate GmbH.
// All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use cling::prelude::*;
use tracing::info;

use hactl_cli_util::ui::console::Styled;
use hactl_cli_util::ui::stylesheet::Style;
use hactl_cli_util::{c_eprintln, c_print, c_println, CliContext, CommonOpts};

use crate::commands::{Command, Dispatcher, Outcome};
use crate::confirm::{AutoConfirm, Confirm, TerminalConfirm};
use crate::connection::ConnectionInfo;
use crate::error::HactlError;
use crate::host::LocalHost;

/// Show and control the failover state of this node.
#[derive(Run, Parser, Collect, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[cling(run = "run")]
pub struct CliApp {
    #[clap(flatten)]
    pub common_opts: CommonOpts,

    #[clap(flatten)]
    pub connection: ConnectionInfo,

    #[arg(value_enum, default_value_t = Command::Status)]
    pub command: Command,

    /// Print nothing when this is not an HA system. The exit code is still 1.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Every failure has printed its one-line message before `CliError::Failed` is returned,
/// `main` only turns it into the exit code.
async fn run(app: &CliApp) -> Result<(), CliError> {
    CliContext::new(app.common_opts.clone()).set_as_global();

    let gateway = match app.connection.connect().await {
        Ok(gateway) => gateway,
        Err(err) => {
            c_eprintln!("{}", Styled(Style::Danger, HactlError::ConnectionSetup(err)));
            return Err(CliError::Failed);
        }
    };
    info!("Connected to {}", gateway.uri());

    let host = LocalHost::default();
    let mut confirm: Box<dyn Confirm> = if CliContext::get().auto_confirm() {
        Box::new(AutoConfirm)
    } else {
        Box::new(TerminalConfirm::stdio())
    };

    let result = Dispatcher {
        gateway: &gateway,
        serials: &host,
        rebooter: &host,
        confirm: &mut *confirm,
        peer_options: app.connection.peer_call_options(),
    }
    .dispatch(app.command)
    .await;

    match result {
        Ok(Outcome::Report(report)) => {
            c_print!("{report}");
            Ok(())
        }
        Ok(Outcome::Executed(executed)) => {
            c_println!("{}", Styled(Style::Success, executed));
            Ok(())
        }
        Err(HactlError::NotHaNode) => {
            if !app.quiet {
                c_println!("{}", HactlError::NotHaNode);
            }
            Err(CliError::Failed)
        }
        Err(err) => {
            c_eprintln!("{}", Styled(Style::Danger, err));
            Err(CliError::Failed)
        }
    }
}
