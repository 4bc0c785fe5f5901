// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Peripheral clock gates and generated clocks.
//!
//! Both live in `PMC_PCR`, which is banked by peripheral id. Writing `PID`
//! alone selects the bank so the next read returns its configuration; a
//! write with `CMD` set updates the bank named by `PID`.

use super::error::ClockError;
use super::io::RegisterAdapter;
use super::node::ClockRange;
use super::regs::{PCR, PMC_PCR};

/// Largest `GCKDIV` value; the generated clock divides by `GCKDIV + 1`.
pub const GCKDIV_MAX: u32 = 0xff;

fn select<R: RegisterAdapter>(io: &R, pid: u32) {
    io.write(PMC_PCR, PCR::PID.val(pid));
}

pub(crate) fn periph_enable<R: RegisterAdapter>(io: &R, pid: u32) {
    select(io, pid);
    io.modify(
        PMC_PCR,
        PCR::CMD::SET + PCR::EN::SET + PCR::PID.val(pid),
    );
}

pub(crate) fn periph_disable<R: RegisterAdapter>(io: &R, pid: u32) {
    select(io, pid);
    io.modify(
        PMC_PCR,
        PCR::CMD::SET + PCR::EN::CLEAR + PCR::PID.val(pid),
    );
}

/// A source and divider for a generated clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GckChoice {
    /// Logical parent index.
    pub parent: usize,
    /// `GCKDIV` value.
    pub div: u32,
    pub rate: u32,
}

/// Search `candidates` (logical index and rate of each usable parent) for
/// the source and divider closest to `rate` without leaving `range`.
pub fn best_gck<I>(rate: u32, range: ClockRange, candidates: I) -> Result<GckChoice, ClockError>
where
    I: IntoIterator<Item = (usize, u32)>,
{
    let mut best: Option<GckChoice> = None;

    for (parent, parent_rate) in candidates {
        if parent_rate == 0 {
            continue;
        }
        for div in 1..=GCKDIV_MAX + 1 {
            let achieved = parent_rate / div;
            if achieved > range.max {
                continue;
            }
            if achieved < range.min {
                break;
            }
            let diff = achieved.abs_diff(rate);
            if best.map_or(true, |b| diff < b.rate.abs_diff(rate)) {
                best = Some(GckChoice {
                    parent,
                    div: div - 1,
                    rate: achieved,
                });
            }
            // Rates only fall from here on.
            if achieved <= rate {
                break;
            }
        }
        if best.is_some_and(|b| b.rate == rate) {
            break;
        }
    }

    best.ok_or(ClockError::RateOutOfRange)
}

pub fn gck_rate(parent_rate: u32, div: u32) -> u32 {
    parent_rate / (div + 1)
}

/// Current `(GCKCSS, GCKDIV)` of peripheral `pid`.
pub(crate) fn gck_read_back<R: RegisterAdapter>(io: &R, pid: u32) -> (u32, u32) {
    select(io, pid);
    let pcr = io.read32(PMC_PCR);
    (PCR::GCKCSS.read(pcr), PCR::GCKDIV.read(pcr))
}

/// Write the generated clock configuration of `pid`, with `GCKEN` set to
/// `enable`.
pub(crate) fn gck_write<R: RegisterAdapter>(io: &R, pid: u32, css: u32, div: u32, enable: bool) {
    let gcken = if enable {
        PCR::GCKEN::SET
    } else {
        PCR::GCKEN::CLEAR
    };
    select(io, pid);
    io.modify(
        PMC_PCR,
        PCR::CMD::SET + PCR::PID.val(pid) + PCR::GCKCSS.val(css) + PCR::GCKDIV.val(div) + gcken,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pmc::testing::FakePmc;

    #[test]
    fn gate_only_touches_its_own_bank() {
        let pmc = FakePmc::new();
        pmc.preset_pcr(38, PCR::GCKCSS.val(5).value + PCR::GCKEN::SET.value);

        periph_enable(&pmc, 38);
        let pcr = pmc.pcr_bank(38);
        assert!(PCR::EN.is_set(pcr));
        assert!(PCR::GCKEN.is_set(pcr));
        assert_eq!(PCR::GCKCSS.read(pcr), 5);
        assert_eq!(pmc.pcr_bank(39), 0);

        periph_disable(&pmc, 38);
        let pcr = pmc.pcr_bank(38);
        assert!(!PCR::EN.is_set(pcr));
        assert!(PCR::GCKEN.is_set(pcr));
    }

    #[test]
    fn generated_search_prefers_exact_matches() {
        let range = ClockRange::max(200_000_000);
        // syspll 800 MHz cannot make 150 MHz, baudpll 600 MHz can.
        let choice = best_gck(150_000_000, range, [(3, 800_000_000), (4, 600_000_000)]).unwrap();
        assert_eq!(
            choice,
            GckChoice {
                parent: 4,
                div: 3,
                rate: 150_000_000
            }
        );
    }

    #[test]
    fn generated_search_respects_the_range() {
        let range = ClockRange::max(100_000_000);
        let choice = best_gck(150_000_000, range, [(3, 800_000_000)]).unwrap();
        assert_eq!(choice.rate, 100_000_000);
        assert_eq!(choice.div, 7);

        let range = ClockRange::new(1_000_000, 32_768);
        assert_eq!(
            best_gck(32_768, range, [(0, 32_768)]),
            Err(ClockError::RateOutOfRange)
        );
        assert_eq!(
            best_gck(32_768, ClockRange::NONE, [(0, 0)]),
            Err(ClockError::RateOutOfRange)
        );
    }

    #[test]
    fn generated_write_sets_source_divider_and_gate() {
        let pmc = FakePmc::new();
        gck_write(&pmc, 80, 8, 3, true);
        assert_eq!(gck_read_back(&pmc, 80), (8, 3));
        assert!(PCR::GCKEN.is_set(pmc.pcr_bank(80)));

        gck_write(&pmc, 80, 8, 3, false);
        assert!(!PCR::GCKEN.is_set(pmc.pcr_bank(80)));
    }
}
