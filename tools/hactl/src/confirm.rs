// Copyright (c) 2026 Restate Software, Inc., Restate GmbH.
// All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::io::{self, BufRead, BufReader, Write};

use hactl_cli_util::c_println;
use hactl_cli_util::ui::console::Styled;
use hactl_cli_util::ui::stylesheet::Style;

pub const PROMPT: &str = "Are you sure you want to proceed? (y/n): ";
pub const INVALID_INPUT: &str = "Invalid input";

/// Asks the operator to approve a disruptive action.
pub trait Confirm: Send {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Line based yes/no question. Keeps asking until it gets `y`, `yes`, `n` or `no`
/// (case-insensitive). Running out of input counts as a "no".
pub struct TerminalConfirm<R, W> {
    input: R,
    output: W,
}

impl TerminalConfirm<BufReader<io::Stdin>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R, W> TerminalConfirm<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self, prompt: &str) -> io::Result<bool> {
        let mut line = String::new();
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(false);
            }

            match line.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "{INVALID_INPUT}")?,
            }
        }
    }
}

impl<R, W> Confirm for TerminalConfirm<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self.ask(prompt).unwrap_or(false)
    }
}

/// Used with `--yes`.
#[derive(Default)]
pub struct AutoConfirm;

impl Confirm for AutoConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        c_println!(
            "{}{}",
            prompt,
            Styled(Style::Warn, "Auto-confirming --yes is set.")
        );
        true
    }
}
