// Copyright (c) 2026 Restate Software, Inc., Restate GmbH.
// All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::io::Write;
use std::process::ExitCode;

use cling::prelude::*;
use hactl::CliApp;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _ = ctrlc::set_handler(move || {
        // Showing cursor again in case the prompt hid it.
        let _ = dialoguer::console::Term::stdout().show_cursor();

        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr);
        let _ = writeln!(stderr, "Ctrl-C pressed, aborting...");

        std::process::exit(1);
    });

    let finished: ClingFinished<CliApp> = Cling::parse_and_run().await;
    match finished.result() {
        Ok(()) => ExitCode::SUCCESS,
        // The handler already told the operator what went wrong.
        Err(CliError::Failed) => ExitCode::FAILURE,
        Err(err) => {
            let _ = err.print();
            ExitCode::from(err.exit_code())
        }
    }
}
