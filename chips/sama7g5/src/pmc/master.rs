// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Master clocks.
//!
//! MCK0 is built from two stages of `PMC_MCKR`: a source selection with the
//! processor prescaler (`fclk`), followed by the `MDIV` divider (`mck0`).
//! MCK1 to MCK4 share the banked `PMC_MCR_V2` register, each with its own
//! source selection and a divider encoded like the prescaler.

use super::error::ClockError;
use super::io::RegisterAdapter;
use super::node::MasterCharacteristics;
use super::pll::div_round_closest;
use super::regs::{MCKR, MCR_V2, PMC_MCKR, PMC_MCR_V2, PMC_SR, SR};

/// Prescaler code that divides by three instead of a power of two.
pub const PRES_DIV3: u32 = 7;

/// Rate after a prescaler (or MCKx divider) with field value `code`.
pub fn pres_rate(parent_rate: u32, code: u32) -> u32 {
    if code == PRES_DIV3 {
        parent_rate / 3
    } else {
        parent_rate >> code
    }
}

/// Prescaler code for the divisor closest to `parent_rate / rate`.
///
/// Only 1, 2, 4, 8, 16, 32, 64 and 3 can be encoded.
pub fn pres_code(rate: u32, parent_rate: u32) -> Result<u32, ClockError> {
    if rate == 0 {
        return Err(ClockError::RateOutOfRange);
    }
    match div_round_closest(u64::from(parent_rate), u64::from(rate)) {
        3 => Ok(PRES_DIV3),
        div @ (1 | 2 | 4 | 8 | 16 | 32 | 64) => Ok(div.trailing_zeros()),
        _ => Err(ClockError::UnsupportedDivisor),
    }
}

/// A source and prescaler for `fclk`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresChoice {
    /// Logical parent index.
    pub parent: usize,
    pub code: u32,
    pub rate: u32,
}

/// Pick the parent and prescaler closest to `rate`.
///
/// Parents reporting no rate are skipped. On a tie the current parent
/// wins, then the lowest index.
pub fn best_pres(
    rate: u32,
    parent_rates: &[u32],
    current: usize,
) -> Result<PresChoice, ClockError> {
    let mut best: Option<PresChoice> = None;

    for (parent, &parent_rate) in parent_rates.iter().enumerate() {
        if parent_rate == 0 {
            continue;
        }
        let Ok(code) = pres_code(rate, parent_rate) else {
            continue;
        };
        let candidate = PresChoice {
            parent,
            code,
            rate: pres_rate(parent_rate, code),
        };
        let diff = candidate.rate.abs_diff(rate);
        let better = match best {
            None => true,
            Some(b) => {
                let best_diff = b.rate.abs_diff(rate);
                diff < best_diff || (diff == best_diff && parent == current)
            }
        };
        if better {
            best = Some(candidate);
        }
    }

    best.ok_or(ClockError::UnsupportedDivisor)
}

/// `MDIV` code for the exact divisor `parent_rate / rate`.
pub fn mdiv_code(
    charac: &MasterCharacteristics,
    rate: u32,
    parent_rate: u32,
) -> Result<u32, ClockError> {
    if rate == 0 {
        return Err(ClockError::RateOutOfRange);
    }
    let div = div_round_closest(u64::from(parent_rate), u64::from(rate));
    charac
        .divisors
        .iter()
        .position(|&d| u64::from(d) == div)
        .map(|code| code as u32)
        .ok_or(ClockError::UnsupportedDivisor)
}

pub fn mdiv_rate(charac: &MasterCharacteristics, parent_rate: u32, code: u32) -> u32 {
    match charac.divisors.get(code as usize) {
        Some(&div) if div != 0 => parent_rate / div,
        _ => 0,
    }
}

/// Current `(CSS, PRES, MDIV)` of MCK0.
pub(crate) fn mckr_read_back<R: RegisterAdapter>(io: &R) -> (u32, u32, u32) {
    let mckr = io.read32(PMC_MCKR);
    (
        MCKR::CSS.read(mckr),
        MCKR::PRES.read(mckr),
        MCKR::MDIV.read(mckr),
    )
}

fn wait_mck0<R: RegisterAdapter>(io: &R, retries: u32) -> Result<(), ClockError> {
    io.poll_set(PMC_SR, SR::MCKRDY::SET.value, retries)
}

/// Switch MCK0 source and prescaler in one write.
pub(crate) fn pres_commit<R: RegisterAdapter>(
    io: &R,
    css: u32,
    code: u32,
    source_changed: bool,
    retries: u32,
) -> Result<(), ClockError> {
    io.modify(PMC_MCKR, MCKR::CSS.val(css) + MCKR::PRES.val(code));
    if source_changed {
        wait_mck0(io, retries)
    } else {
        Ok(())
    }
}

pub(crate) fn mdiv_commit<R: RegisterAdapter>(
    io: &R,
    code: u32,
    retries: u32,
) -> Result<(), ClockError> {
    io.modify(PMC_MCKR, MCKR::MDIV.val(code));
    wait_mck0(io, retries)
}

/// Current `(CSS, DIV)` of MCK`id`.
pub(crate) fn mckx_read_back<R: RegisterAdapter>(io: &R, id: u32) -> (u32, u32) {
    io.write(PMC_MCR_V2, MCR_V2::ID.val(id));
    let mcr = io.read32(PMC_MCR_V2);
    (MCR_V2::CSS.read(mcr), MCR_V2::DIV.read(mcr))
}

/// Run MCK`id` from source `css` divided by `div`.
///
/// Waits for `MCKXRDY` only when the source changes.
pub(crate) fn mckx_enable<R: RegisterAdapter>(
    io: &R,
    id: u32,
    css: u32,
    div: u32,
    retries: u32,
) -> Result<(), ClockError> {
    io.write(PMC_MCR_V2, MCR_V2::ID.val(id));
    let current = io.read32(PMC_MCR_V2);

    io.modify(
        PMC_MCR_V2,
        MCR_V2::EN::SET
            + MCR_V2::CSS.val(css)
            + MCR_V2::DIV.val(div)
            + MCR_V2::CMD::SET
            + MCR_V2::ID.val(id),
    );

    if MCR_V2::CSS.read(current) != css {
        io.poll_set(PMC_SR, SR::MCKXRDY::SET.value, retries)
    } else {
        Ok(())
    }
}

pub(crate) fn mckx_disable<R: RegisterAdapter>(io: &R, id: u32) {
    io.write(PMC_MCR_V2, MCR_V2::ID.val(id));
    io.modify(
        PMC_MCR_V2,
        MCR_V2::EN::CLEAR + MCR_V2::CMD::SET + MCR_V2::ID.val(id),
    );
}
