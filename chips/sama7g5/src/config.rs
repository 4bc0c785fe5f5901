// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Board-level settings for the clock tree.
//!
//! The PMC cannot discover what is soldered next to it: the slow clock and
//! main crystal frequencies, and whether the crystal input is driven by an
//! external oscillator, come from the board. A board crate builds a
//! [`PmcConfig`], usually by starting from [`PmcConfig::DEFAULT`]:
//!
//! ```
//! use sama7g5::PmcConfig;
//!
//! const CONFIG: PmcConfig = PmcConfig {
//!     main_xtal_hz: 12_000_000,
//!     ..PmcConfig::DEFAULT
//! };
//! # assert_eq!(CONFIG.md_slck_hz, 32_768);
//! ```

/// Settings that change the behavior of the clock tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PmcConfig {
    /// Monitoring domain slow clock (`md_slck`).
    pub md_slck_hz: u32,
    /// Timing domain slow clock (`td_slck`).
    pub td_slck_hz: u32,
    /// Main crystal (`main_xtal`).
    pub main_xtal_hz: u32,
    /// The main crystal input is driven by an external clock and the
    /// oscillator runs in bypass mode.
    pub osc_bypass: bool,
    /// Status register reads before a lock or ready wait gives up with
    /// `HardwareNotReady`.
    pub poll_retries: u32,
    /// Log every committed rate and parent change at `info` level, not just
    /// at `debug`.
    pub trace_rate_changes: bool,
}

impl PmcConfig {
    pub const DEFAULT: PmcConfig = PmcConfig {
        md_slck_hz: 32_768,
        td_slck_hz: 32_768,
        main_xtal_hz: 24_000_000,
        osc_bypass: false,
        poll_retries: 100_000,
        trace_rate_changes: false,
    };

    /// Rate of the board-supplied source `name`, if it is one.
    pub fn external_rate(&self, name: &str) -> Option<u32> {
        match name {
            "md_slck" => Some(self.md_slck_hz),
            "td_slck" => Some(self.td_slck_hz),
            "main_xtal" => Some(self.main_xtal_hz),
            _ => None,
        }
    }
}

impl Default for PmcConfig {
    fn default() -> Self {
        PmcConfig::DEFAULT
    }
}
