// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Programmable clock outputs (`progN`) and the system clock gates in front
//! of them (`pckN`).

use super::error::ClockError;
use super::io::RegisterAdapter;
use super::pll::div_round_closest;
use super::regs::{pmc_pck, PCKR, PMC_SCDR, PMC_SCER, PMC_SR, SR};

/// Largest `PRES` value; the output divides by `PRES + 1`.
pub const PRES_MAX: u32 = 0xff;

/// First system clock id that gates a programmable output.
const PCK_FIRST_ID: u32 = 8;
const PCK_COUNT: u32 = 8;

/// `PRES` value for the divisor closest to `parent_rate / rate`.
pub fn prog_pres(rate: u32, parent_rate: u32) -> Result<u32, ClockError> {
    if parent_rate == 0 {
        return Err(ClockError::MissingParentRate);
    }
    if rate == 0 {
        return Err(ClockError::RateOutOfRange);
    }
    let div = div_round_closest(u64::from(parent_rate), u64::from(rate));
    if div == 0 || div > u64::from(PRES_MAX) + 1 {
        return Err(ClockError::UnsupportedDivisor);
    }
    Ok(div as u32 - 1)
}

pub fn prog_rate(parent_rate: u32, pres: u32) -> u32 {
    parent_rate / (pres + 1)
}

/// Current `(CSS, PRES)` of programmable clock `id`.
pub(crate) fn prog_read_back<R: RegisterAdapter>(io: &R, id: u32) -> (u32, u32) {
    let pck = io.read32(pmc_pck(id));
    (PCKR::CSS.read(pck), PCKR::PRES.read(pck))
}

pub(crate) fn prog_select<R: RegisterAdapter>(io: &R, id: u32, css: u32) {
    io.modify(pmc_pck(id), PCKR::CSS.val(css));
}

pub(crate) fn prog_set_pres<R: RegisterAdapter>(io: &R, id: u32, pres: u32) {
    io.modify(pmc_pck(id), PCKR::PRES.val(pres));
}

fn pck_ready_mask(id: u32) -> Option<u32> {
    if (PCK_FIRST_ID..PCK_FIRST_ID + PCK_COUNT).contains(&id) {
        Some(SR::PCKRDY.val(1 << (id - PCK_FIRST_ID)).value)
    } else {
        None
    }
}

/// Open system clock gate `id`. Gates of programmable outputs also wait for
/// the output to be ready.
pub(crate) fn system_enable<R: RegisterAdapter>(
    io: &R,
    id: u32,
    retries: u32,
) -> Result<(), ClockError> {
    io.write32(PMC_SCER, 1 << id);
    match pck_ready_mask(id) {
        Some(mask) => io.poll_set(PMC_SR, mask, retries),
        None => Ok(()),
    }
}

pub(crate) fn system_disable<R: RegisterAdapter>(io: &R, id: u32) {
    io.write32(PMC_SCDR, 1 << id);
}
