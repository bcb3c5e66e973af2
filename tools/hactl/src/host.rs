// Copyright (c) 2026 Restate Software, Inc., Restate GmbH.
// All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Side effects on the machine running the tool.

use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::info;

const DMI_SERIAL_PATH: &str = "/sys/class/dmi/id/product_serial";

pub trait SerialNumberSource: Send + Sync {
    fn serial_number(&self) -> io::Result<String>;
}

pub trait Reboot: Send + Sync {
    /// Starts a reboot of this machine without waiting for it.
    fn trigger_reboot(&self) -> io::Result<()>;
}

/// The machine this process runs on.
pub struct LocalHost {
    serial_path: PathBuf,
}

impl Default for LocalHost {
    fn default() -> Self {
        Self {
            serial_path: PathBuf::from(DMI_SERIAL_PATH),
        }
    }
}

impl SerialNumberSource for LocalHost {
    fn serial_number(&self) -> io::Result<String> {
        let serial = std::fs::read_to_string(&self.serial_path)?;
        Ok(serial.trim().to_owned())
    }
}

impl Reboot for LocalHost {
    fn trigger_reboot(&self) -> io::Result<()> {
        info!("Rebooting this node");
        // Not waited on, the reboot takes this process down with it.
        Command::new("shutdown")
            .args(["-r", "now"])
            .stdin(Stdio::null())
            .spawn()
            .map(drop)
    }
}
