// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables read by goldfish are defined here.
//! Use these accessors instead of calling `std::env::var()` directly.

/// Generated env var name constants.
mod names {
    include!(concat!(env!("OUT_DIR"), "/env_names.rs"));
}

pub use names::*;

/// `GOLDFISH_UPDATE` — Rewrite every golden file with the observed output.
pub fn update() -> bool {
    std::env::var(names::GOLDFISH_UPDATE)
        .ok()
        .is_some_and(|v| is_truthy(&v))
}

/// `GOLDFISH_LOG` — Log filter directive for the `goldfish` binary.
pub fn log_filter() -> Option<String> {
    std::env::var(names::GOLDFISH_LOG)
        .ok()
        .filter(|v| !v.trim().is_empty())
}

/// Any non-empty value except `0`, `false`, `no` and `off` enables a switch.
fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty()
        && !["0", "false", "no", "off"]
            .iter()
            .any(|falsey| value.eq_ignore_ascii_case(falsey))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
