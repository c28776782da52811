// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jr capabilities`: registered capability keys

use crate::config::Config;
use crate::output::{self, OutputFormat};
use serde::Serialize;
use std::fmt;

#[derive(Serialize)]
struct CapabilityInfo {
    key: String,
    kind: String,
    approved: bool,
}

impl fmt::Display for CapabilityInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let approved = if self.approved { "yes" } else { "no" };
        write!(f, "{:<12} {:<10} {}", self.key, self.kind, approved)
    }
}

pub fn list(config: &Config, format: OutputFormat) {
    let capabilities: Vec<CapabilityInfo> = config
        .registry()
        .capabilities()
        .into_iter()
        .map(|(key, kind, approved)| CapabilityInfo {
            key,
            kind: kind.to_string(),
            approved,
        })
        .collect();
    let header = format!("{:<12} {:<10} APPROVED", "KEY", "KIND");
    output::print_list(&capabilities, &header, "No capabilities", format);
}
