// Copyright (c) 2023 - 2026 Restate Software, Inc., Restate GmbH.
// All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::console::Icon;

pub const WARN_ICON: Icon = Icon("⚠️", "[WARNING]:");

/// Semantic text styles. Prefer these over picking colors at the call site.
#[derive(Copy, Clone, Debug)]
pub enum Style {
    /// Red + bold: errors, rejected commands
    Danger,
    /// Magenta: caution
    Warn,
    /// Green: completed actions
    Success,
}

impl From<Style> for dialoguer::console::Style {
    fn from(style: Style) -> Self {
        use dialoguer::console::Style as DStyle;

        match style {
            Style::Danger => DStyle::new().red().bold(),
            Style::Warn => DStyle::new().magenta(),
            Style::Success => DStyle::new().green(),
        }
    }
}
