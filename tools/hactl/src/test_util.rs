// Copyright (c) 2026 Restate Software, Inc., Restate GmbH.
// All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde_json::Value;

use crate::confirm::Confirm;
use crate::connection::{methods, CallError, CallOptions, CallOutcome, RemoteGateway};
use crate::host::{Reboot, SerialNumberSource};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub args: Vec<Value>,
    pub options: Option<CallOptions>,
}

/// Gateway answering from a fixed table and recording every call. Calls forwarded
/// through `failover.callRemote` are looked up by the forwarded method name.
#[derive(Default)]
pub struct MockGateway {
    local: HashMap<String, CallOutcome>,
    remote: HashMap<String, CallOutcome>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockGateway {
    pub fn respond(mut self, method: &str, value: Value) -> Self {
        self.local.insert(method.to_owned(), Ok(value));
        self
    }

    pub fn fail(mut self, method: &str, err: CallError) -> Self {
        self.local.insert(method.to_owned(), Err(err));
        self
    }

    pub fn respond_remote(mut self, method: &str, value: Value) -> Self {
        self.remote.insert(method.to_owned(), Ok(value));
        self
    }

    pub fn fail_remote(mut self, method: &str, err: CallError) -> Self {
        self.remote.insert(method.to_owned(), Err(err));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called_methods(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|call| match call.method.as_str() {
                methods::CALL_REMOTE => format!(
                    "remote:{}",
                    call.args.first().and_then(Value::as_str).unwrap_or_default()
                ),
                _ => call.method,
            })
            .collect()
    }
}

impl RemoteGateway for MockGateway {
    async fn invoke(
        &self,
        method: &str,
        args: Vec<Value>,
        options: Option<CallOptions>,
    ) -> CallOutcome {
        let outcome = if method == methods::CALL_REMOTE {
            let forwarded = args.first().and_then(Value::as_str).unwrap_or_default();
            self.remote.get(forwarded).cloned()
        } else {
            self.local.get(method).cloned()
        };

        self.calls.lock().unwrap().push(RecordedCall {
            method: method.to_owned(),
            args,
            options,
        });

        outcome.unwrap_or_else(|| Err(CallError::Other(format!("unexpected call to {method}"))))
    }
}

pub struct FixedSerial(pub &'static str);

impl SerialNumberSource for FixedSerial {
    fn serial_number(&self) -> io::Result<String> {
        Ok(self.0.to_owned())
    }
}

#[derive(Default)]
pub struct CountingReboot {
    count: AtomicUsize,
}

impl CountingReboot {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }
}

impl Reboot for CountingReboot {
    fn trigger_reboot(&self) -> io::Result<()> {
        self.count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// Answers every prompt with the same value and counts how often it was asked.
pub struct ScriptedConfirm {
    answer: bool,
    pub asked: usize,
}

impl ScriptedConfirm {
    pub fn answering(answer: bool) -> Self {
        Self { answer, asked: 0 }
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.asked += 1;
        self.answer
    }
}
