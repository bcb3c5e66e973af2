// Copyright (c) 2023 - 2026 Restate Software, Inc., Restate GmbH.
// All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Terminal output helpers. Use these instead of `println!()`.
//!
//! `hactl status | head -n1` must not panic when stdout turns into a broken pipe, so
//! every macro here drops write errors on the floor.

use std::fmt::{Display, Formatter};
use std::io;

use dialoguer::console::Style as DStyle;

use super::stylesheet::Style;
use crate::context::CliContext;

/// Emoji that falls back to a plain string if colors are disabled.
#[derive(Copy, Clone)]
pub struct Icon<'a, 'b>(pub &'a str, pub &'b str);

impl Display for Icon<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if CliContext::get().colors_enabled() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "{}", self.1)
        }
    }
}

/// Text with a style that is dropped if colors are disabled.
#[derive(Copy, Clone)]
pub struct Styled<T: ?Sized>(pub Style, pub T);

impl<T> Display for Styled<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if CliContext::get().colors_enabled() {
            write!(f, "{}", DStyle::from(self.0).apply_to(&self.1))
        } else {
            write!(f, "{}", self.1)
        }
    }
}

#[doc(hidden)]
pub fn _stdout() -> io::StdoutLock<'static> {
    io::stdout().lock()
}

#[doc(hidden)]
pub fn _stderr() -> io::StderrLock<'static> {
    io::stderr().lock()
}

#[macro_export]
#[doc(hidden)]
macro_rules! _gecho {
    (@empty_line, $where:ident) => {{
        use std::io::Write;
        let mut _lock = $crate::ui::console::$where();
        let _ = writeln!(_lock);
    }};
    (@newline, $where:ident, $($arg:tt)*) => {{
        use std::io::Write;
        let mut _lock = $crate::ui::console::$where();
        let _ = writeln!(_lock, $($arg)*);
    }};
    (@bare, $where:ident, $($arg:tt)*) => {{
        use std::io::Write;
        let mut _lock = $crate::ui::console::$where();
        let _ = write!(_lock, $($arg)*);
        let _ = _lock.flush();
    }};
}

#[macro_export]
macro_rules! c_println {
    () => {
        $crate::_gecho!(@empty_line, _stdout)
    };
    ($($arg:tt)*) => {
        $crate::_gecho!(@newline, _stdout, $($arg)*)
    };
}

#[macro_export]
macro_rules! c_print {
    ($($arg:tt)*) => {
        $crate::_gecho!(@bare, _stdout, $($arg)*)
    };
}

#[macro_export]
macro_rules! c_eprintln {
    () => {
        $crate::_gecho!(@empty_line, _stderr)
    };
    ($($arg:tt)*) => {
        $crate::_gecho!(@newline, _stderr, $($arg)*)
    };
}

/// Bordered warning box on stderr.
#[macro_export]
macro_rules! c_warn {
    ($($arg:tt)*) => {{
        let mut table = $crate::_comfy_table::Table::new();
        table.load_preset($crate::_comfy_table::presets::UTF8_BORDERS_ONLY);
        table.set_content_arrangement($crate::_comfy_table::ContentArrangement::Dynamic);
        table.set_width(100);
        if !$crate::CliContext::get().colors_enabled() {
            table.force_no_tty();
        }
        let formatted = format!($($arg)*);
        table.add_row(vec![
            $crate::_comfy_table::Cell::new(format!(" {} ", $crate::ui::stylesheet::WARN_ICON))
                .set_alignment($crate::_comfy_table::CellAlignment::Center),
            $crate::_comfy_table::Cell::new(formatted)
                .add_attribute($crate::_comfy_table::Attribute::Bold)
                .fg($crate::_comfy_table::Color::Yellow),
        ]);
        $crate::c_eprintln!("{}", table);
    }};
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;
    use crate::CommonOpts;

    #[test]
    fn styles_are_dropped_without_colors() {
        CliContext::with_env(|_| None, false, &CommonOpts::default()).set_as_global();

        assert_that!(
            Styled(Style::Danger, "Faulted").to_string(),
            eq("Faulted")
        );
        assert_that!(
            crate::ui::stylesheet::WARN_ICON.to_string(),
            eq("[WARNING]:")
        );
    }
}
