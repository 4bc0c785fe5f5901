// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Platform support for the Microchip SAMA7G5 family.
//!
//! Only the Power Management Controller clock tree lives here: the PLLs,
//! master clocks, programmable outputs, peripheral gates and generated
//! clocks that the secure world brings up at boot.
//!
//! <https://www.microchip.com/en-us/product/SAMA7G54>

#![crate_name = "sama7g5"]
#![crate_type = "rlib"]
#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod pmc;
pub mod sama7g5;

pub use crate::config::PmcConfig;
pub use crate::pmc::{ClockError, ClockIndex, ClockTree};
