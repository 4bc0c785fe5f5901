// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Main clock sources: the 12 MHz RC oscillator, the crystal oscillator and
//! the `mainck` selector between them.
//!
//! Every write to `CKGR_MOR` must carry the `0x37` key or the controller
//! ignores it.

use super::error::ClockError;
use super::io::RegisterAdapter;
use super::regs::{CKGR_MOR, MOSCXT_STARTUP_COUNT, PMC_SR, SR};

fn status<R: RegisterAdapter>(io: &R) -> u32 {
    io.read32(PMC_SR)
}

pub(crate) fn rc_enable<R: RegisterAdapter>(io: &R, retries: u32) -> Result<(), ClockError> {
    if SR::MOSCRCS.is_set(status(io)) {
        return Ok(());
    }
    io.modify(CKGR_MOR, CKGR_MOR::KEY::PASSWD + CKGR_MOR::MOSCRCEN::SET);
    io.poll_set(PMC_SR, SR::MOSCRCS::SET.value, retries)
}

pub(crate) fn rc_disable<R: RegisterAdapter>(io: &R) {
    io.modify(CKGR_MOR, CKGR_MOR::KEY::PASSWD + CKGR_MOR::MOSCRCEN::CLEAR);
}

/// Start the crystal oscillator, or put it in bypass when the board drives
/// the crystal input with a clock.
pub(crate) fn osc_enable<R: RegisterAdapter>(
    io: &R,
    bypass: bool,
    retries: u32,
) -> Result<(), ClockError> {
    if bypass {
        io.modify(
            CKGR_MOR,
            CKGR_MOR::KEY::PASSWD + CKGR_MOR::MOSCXTBY::SET + CKGR_MOR::MOSCXTEN::CLEAR,
        );
        return Ok(());
    }

    let mor = io.read32(CKGR_MOR);
    if CKGR_MOR::MOSCXTEN.is_set(mor) && SR::MOSCXTS.is_set(status(io)) {
        return Ok(());
    }
    io.modify(
        CKGR_MOR,
        CKGR_MOR::KEY::PASSWD
            + CKGR_MOR::MOSCXTBY::CLEAR
            + CKGR_MOR::MOSCXTEN::SET
            + CKGR_MOR::MOSCXTST.val(MOSCXT_STARTUP_COUNT),
    );
    io.poll_set(PMC_SR, SR::MOSCXTS::SET.value, retries)
}

pub(crate) fn osc_disable<R: RegisterAdapter>(io: &R, bypass: bool) {
    if bypass {
        return;
    }
    io.modify(CKGR_MOR, CKGR_MOR::KEY::PASSWD + CKGR_MOR::MOSCXTEN::CLEAR);
}

/// Select code of the source currently feeding `mainck`.
pub(crate) fn mux_read_back<R: RegisterAdapter>(io: &R) -> u32 {
    io.read_field(CKGR_MOR, CKGR_MOR::MOSCSEL)
}

pub(crate) fn mux_select<R: RegisterAdapter>(
    io: &R,
    code: u32,
    retries: u32,
) -> Result<(), ClockError> {
    io.modify(CKGR_MOR, CKGR_MOR::KEY::PASSWD + CKGR_MOR::MOSCSEL.val(code));
    io.poll_set(PMC_SR, SR::MOSCSELS::SET.value, retries)
}
