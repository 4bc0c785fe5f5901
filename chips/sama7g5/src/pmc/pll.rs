// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Fractional PLL cores and their output dividers.
//!
//! Every PLL of the PMC shares one set of banked registers. Writing a PLL id
//! to `PLL_UPDT.ID` selects which PLL `PLL_CTRL0`, `PLL_CTRL1` and
//! `PLL_ACR` refer to; values written there only reach the PLL once
//! `PLL_UPDT.UPDATE` is strobed with the same id. Lock is reported per id in
//! `PLL_ISR0`.
//!
//! The core runs at `parent * (mul + 1 + frac / 2^22)` and must stay inside
//! its core range. Each core feeds one or two output dividers that produce
//! `core / (div + 1)`.

use super::error::ClockError;
use super::io::RegisterAdapter;
use super::node::{ClockNode, ClockRange, DivPllLayout, PllCharacteristics};
use super::regs::{
    PLL_ACR, PLL_ACR_DEFAULT, PLL_ACR_DEFAULT_UPLL, PLL_CTRL0, PLL_CTRL1, PLL_UPDT, PMC_PLL_ACR,
    PMC_PLL_CTRL0, PMC_PLL_CTRL1, PMC_PLL_ISR0, PMC_PLL_UPDT,
};

/// Width of the fractional part of the multiplier.
pub const FRAC_BITS: u32 = 22;
const FRAC_ONE: u64 = 1 << FRAC_BITS;
/// Largest value of the `MUL` field.
const MUL_MAX: u64 = 0xff;
/// Settling time of the UTMI bandgap and of its regulator.
const UTMI_SETTLE_US: u32 = 10;
/// Largest value of an output divider field.
pub const DIV_MAX: u32 = 0xff;

pub(crate) fn div_round_closest(x: u64, divisor: u64) -> u64 {
    (x + divisor / 2) / divisor
}

fn saturate(rate: u64) -> u32 {
    u32::try_from(rate).unwrap_or(u32::MAX)
}

/// A multiplier setting for a fractional PLL core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FracSetting {
    /// `MUL` field value, one less than the integer multiplier.
    pub mul: u32,
    /// `FRACR` field value.
    pub frac: u32,
    /// Rate the core produces with this setting.
    pub rate: u32,
}

fn frac_output(parent_rate: u64, nmul: u64, nfrac: u64) -> u64 {
    parent_rate * nmul + div_round_closest(nfrac * parent_rate, FRAC_ONE)
}

/// Output rate of a fractional core programmed with `mul` and `frac`.
pub fn frac_rate(parent_rate: u32, mul: u32, frac: u32) -> u32 {
    saturate(frac_output(
        u64::from(parent_rate),
        u64::from(mul) + 1,
        u64::from(frac),
    ))
}

/// Find the multiplier and fractional word closest to `rate`.
///
/// The fractional word is rounded to nearest. When that lands just outside
/// the core range the word is rounded toward the range instead, so every
/// target inside the range is reachable within one fractional step.
pub fn compute_mul_frac(
    core_output: ClockRange,
    rate: u32,
    parent_rate: u32,
) -> Result<FracSetting, ClockError> {
    if !core_output.contains(rate) {
        return Err(ClockError::RateOutOfRange);
    }
    if parent_rate == 0 {
        return Err(ClockError::MissingParentRate);
    }

    let target = u64::from(rate);
    let parent = u64::from(parent_rate);
    let base_mul = target / parent;
    let remainder = target - parent * base_mul;

    let carry = |nfrac: u64| {
        if nfrac >= FRAC_ONE {
            (base_mul + 1, 0)
        } else {
            (base_mul, nfrac)
        }
    };

    let (mut nmul, mut nfrac) = carry(div_round_closest(remainder << FRAC_BITS, parent));
    let mut achieved = frac_output(parent, nmul, nfrac);
    if achieved > u64::from(core_output.max) {
        (nmul, nfrac) = carry((remainder << FRAC_BITS) / parent);
        achieved = frac_output(parent, nmul, nfrac);
    } else if achieved < u64::from(core_output.min) {
        (nmul, nfrac) = carry((remainder << FRAC_BITS).div_ceil(parent));
        achieved = frac_output(parent, nmul, nfrac);
    }

    if nmul == 0 || nmul - 1 > MUL_MAX || achieved > u64::from(u32::MAX) {
        return Err(ClockError::RateOutOfRange);
    }
    if !core_output.contains(achieved as u32) {
        return Err(ClockError::RateOutOfRange);
    }

    Ok(FracSetting {
        mul: (nmul - 1) as u32,
        frac: nfrac as u32,
        rate: achieved as u32,
    })
}

/// Divider field value that brings `parent_rate` closest to `rate`.
pub fn compute_div(rate: u32, parent_rate: u32) -> Result<u32, ClockError> {
    if parent_rate == 0 {
        return Err(ClockError::MissingParentRate);
    }
    if rate == 0 {
        return Err(ClockError::RateOutOfRange);
    }
    let div = div_round_closest(u64::from(parent_rate), u64::from(rate))
        .clamp(1, u64::from(DIV_MAX) + 1);
    Ok(div as u32 - 1)
}

pub fn div_rate(layout: &DivPllLayout, parent_rate: u32, div: u32) -> u32 {
    if layout.fixed_div2 {
        parent_rate / 2
    } else {
        parent_rate / (div + 1)
    }
}

/// Pick a divider and a new core setting that together come closest to
/// `rate`, for dividers allowed to retune their parent core.
///
/// Returns the divider field value and the core setting.
pub fn compute_div_and_core(
    core_output: ClockRange,
    rate: u32,
    core_parent_rate: u32,
) -> Result<(u32, FracSetting), ClockError> {
    if core_parent_rate == 0 {
        return Err(ClockError::MissingParentRate);
    }
    if rate == 0 {
        return Err(ClockError::RateOutOfRange);
    }

    let mut best: Option<(u32, FracSetting, u32)> = None;
    for div in 1..=DIV_MAX + 1 {
        let core_rate = u64::from(rate) * u64::from(div);
        if core_rate < u64::from(core_output.min) {
            continue;
        }
        if core_rate > u64::from(core_output.max) {
            break;
        }
        let Ok(setting) = compute_mul_frac(core_output, core_rate as u32, core_parent_rate) else {
            continue;
        };
        let diff = (setting.rate / div).abs_diff(rate);
        if best.map_or(true, |(_, _, best_diff)| diff < best_diff) {
            best = Some((div - 1, setting, diff));
        }
        if diff == 0 {
            break;
        }
    }

    best.map(|(div, setting, _)| (div, setting))
        .ok_or(ClockError::RateOutOfRange)
}

fn is_locked<R: RegisterAdapter>(io: &R, id: u32) -> bool {
    io.read32(PMC_PLL_ISR0) & (1 << id) != 0
}

fn select<R: RegisterAdapter>(io: &R, id: u32) {
    io.modify(PMC_PLL_UPDT, PLL_UPDT::ID.val(id));
}

fn update<R: RegisterAdapter>(io: &R, id: u32) {
    io.modify(PMC_PLL_UPDT, PLL_UPDT::UPDATE::SET + PLL_UPDT::ID.val(id));
}

/// Load the setting a locked core already runs with. Returns `false` when
/// the core is not running, in which case nothing is read.
pub(crate) fn frac_read_back<R: RegisterAdapter>(io: &R, id: u32, node: &ClockNode) -> bool {
    if !is_locked(io, id) {
        return false;
    }
    select(io, id);
    let ctrl1 = io.read32(PMC_PLL_CTRL1);
    node.mul.set(PLL_CTRL1::MUL.read(ctrl1));
    node.frac.set(PLL_CTRL1::FRACR.read(ctrl1));
    true
}

/// Program and lock a fractional core with the node's `mul` and `frac`.
pub(crate) fn frac_enable<R: RegisterAdapter>(
    io: &R,
    id: u32,
    charac: &PllCharacteristics,
    node: &ClockNode,
    retries: u32,
) -> Result<(), ClockError> {
    let mul = node.mul.get();
    let frac = node.frac.get();

    select(io, id);
    let ctrl0 = io.read32(PMC_PLL_CTRL0);
    let ctrl1 = io.read32(PMC_PLL_CTRL1);
    if PLL_CTRL0::ENPLL.is_set(ctrl0)
        && PLL_CTRL1::MUL.read(ctrl1) == mul
        && PLL_CTRL1::FRACR.read(ctrl1) == frac
        && is_locked(io, id)
    {
        return Ok(());
    }

    if charac.usb {
        io.write32(PMC_PLL_ACR, PLL_ACR_DEFAULT_UPLL);
    } else {
        io.write32(PMC_PLL_ACR, PLL_ACR_DEFAULT);
    }
    io.write(
        PMC_PLL_CTRL1,
        PLL_CTRL1::MUL.val(mul) + PLL_CTRL1::FRACR.val(frac),
    );

    if charac.usb {
        io.modify(PMC_PLL_ACR, PLL_ACR::UTMIBG::SET);
        io.delay_us(UTMI_SETTLE_US);
        io.modify(PMC_PLL_ACR, PLL_ACR::UTMIVR::SET);
        io.delay_us(UTMI_SETTLE_US);
    }

    update(io, id);
    io.modify(
        PMC_PLL_CTRL0,
        PLL_CTRL0::ENLOCK::SET + PLL_CTRL0::ENPLL::SET,
    );
    update(io, id);

    io.poll_set(PMC_PLL_ISR0, 1 << id, retries)
}

pub(crate) fn frac_disable<R: RegisterAdapter>(io: &R, id: u32, charac: &PllCharacteristics) {
    select(io, id);
    io.modify(PMC_PLL_CTRL0, PLL_CTRL0::ENPLL::CLEAR);
    if charac.usb {
        io.modify(PMC_PLL_ACR, PLL_ACR::UTMIBG::CLEAR + PLL_ACR::UTMIVR::CLEAR);
    }
    update(io, id);
}

pub(crate) fn div_read_back<R: RegisterAdapter>(
    io: &R,
    id: u32,
    layout: &DivPllLayout,
    node: &ClockNode,
) {
    select(io, id);
    node.div.set(layout.div.read(io.read32(PMC_PLL_CTRL0)));
}

/// Program an output divider with field value `div` and wait for lock.
pub(crate) fn div_enable<R: RegisterAdapter>(
    io: &R,
    id: u32,
    layout: &DivPllLayout,
    div: u32,
    retries: u32,
) -> Result<(), ClockError> {
    select(io, id);
    let ctrl0 = io.read32(PMC_PLL_CTRL0);
    if layout.enable.is_set(ctrl0)
        && (layout.fixed_div2 || layout.div.read(ctrl0) == div)
        && is_locked(io, id)
    {
        return Ok(());
    }

    if layout.fixed_div2 {
        io.modify(PMC_PLL_CTRL0, layout.enable.val(1));
    } else {
        io.modify(PMC_PLL_CTRL0, layout.div.val(div) + layout.enable.val(1));
    }
    update(io, id);

    io.poll_set(PMC_PLL_ISR0, 1 << id, retries)
}

pub(crate) fn div_disable<R: RegisterAdapter>(io: &R, id: u32, layout: &DivPllLayout) {
    select(io, id);
    io.modify(PMC_PLL_CTRL0, layout.enable.val(0));
    update(io, id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pmc::testing::FakePmc;
    use proptest::prelude::*;

    const CORE: ClockRange = ClockRange::new(600_000_000, 1_200_000_000);

    static CHARAC: PllCharacteristics = PllCharacteristics {
        input: ClockRange::new(12_000_000, 50_000_000),
        core_output: CORE,
        usb: false,
    };

    static USB_CHARAC: PllCharacteristics = PllCharacteristics {
        input: ClockRange::new(12_000_000, 50_000_000),
        core_output: CORE,
        usb: true,
    };

    static DIVPMC: DivPllLayout = DivPllLayout {
        div: PLL_CTRL0::DIVPMC,
        enable: PLL_CTRL0::ENPLLCK,
        fixed_div2: false,
        safe_div: 0,
    };

    fn step(parent_rate: u32) -> u32 {
        parent_rate.div_ceil(1 << FRAC_BITS)
    }

    #[test]
    fn integer_multiple_has_no_fraction() {
        let setting = compute_mul_frac(CORE, 1_200_000_000, 24_000_000).unwrap();
        assert_eq!(
            setting,
            FracSetting {
                mul: 49,
                frac: 0,
                rate: 1_200_000_000
            }
        );
    }

    #[test]
    fn fractional_part_rounds_to_nearest() {
        // 24 MHz * 41.666...: the residual 16 MHz is 2/3 of the parent and
        // the nearest fractional word overshoots by 2 Hz.
        let setting = compute_mul_frac(CORE, 1_000_000_000, 24_000_000).unwrap();
        assert_eq!(setting.mul, 40);
        assert_eq!(setting.frac, 2796203);
        assert_eq!(setting.rate, 1_000_000_002);
        assert_eq!(frac_rate(24_000_000, setting.mul, setting.frac), setting.rate);
    }

    #[test]
    fn targets_outside_the_core_are_rejected() {
        assert_eq!(
            compute_mul_frac(CORE, 599_999_999, 24_000_000),
            Err(ClockError::RateOutOfRange)
        );
        assert_eq!(
            compute_mul_frac(CORE, 1_200_000_001, 24_000_000),
            Err(ClockError::RateOutOfRange)
        );
        assert_eq!(
            compute_mul_frac(CORE, 800_000_000, 0),
            Err(ClockError::MissingParentRate)
        );
    }

    #[test]
    fn multiplier_must_fit_its_field() {
        let wide = ClockRange::new(1, u32::MAX);
        assert_eq!(
            compute_mul_frac(wide, 300_000_000, 1_000_000),
            Err(ClockError::RateOutOfRange)
        );
        assert!(compute_mul_frac(wide, 256_000_000, 1_000_000).is_ok());
    }

    proptest! {
        #[test]
        fn frac_lands_within_one_step_and_is_stable(
            parent in 12_000_000u32..=50_000_000,
            rate in 600_000_000u32..=1_200_000_000,
        ) {
            let setting = compute_mul_frac(CORE, rate, parent).unwrap();
            prop_assert!(setting.rate.abs_diff(rate) <= step(parent));
            prop_assert!(CORE.contains(setting.rate));
            prop_assert_eq!(frac_rate(parent, setting.mul, setting.frac), setting.rate);
            prop_assert_eq!(compute_mul_frac(CORE, setting.rate, parent).unwrap(), setting);
        }

        #[test]
        fn divider_output_never_grows_with_the_divisor(
            parent in 600_000_000u32..=1_200_000_000,
            a in 2_343_750u32..=1_200_000_000,
            b in 2_343_750u32..=1_200_000_000,
        ) {
            let div_a = compute_div(a, parent).unwrap();
            let div_b = compute_div(b, parent).unwrap();
            prop_assert!(div_a <= DIV_MAX && div_b <= DIV_MAX);
            if div_a <= div_b {
                prop_assert!(div_rate(&DIVPMC, parent, div_a) >= div_rate(&DIVPMC, parent, div_b));
            } else {
                prop_assert!(div_rate(&DIVPMC, parent, div_a) <= div_rate(&DIVPMC, parent, div_b));
            }
        }
    }

    #[test]
    fn divider_rounds_and_clamps() {
        assert_eq!(compute_div(400_000_000, 1_200_000_000), Ok(2));
        assert_eq!(compute_div(450_000_000, 1_000_000_000), Ok(1));
        assert_eq!(compute_div(1, 1_200_000_000), Ok(DIV_MAX));
        assert_eq!(compute_div(2_000_000_000, 1_000_000_000), Ok(0));
        assert_eq!(compute_div(0, 1_000_000_000), Err(ClockError::RateOutOfRange));
    }

    #[test]
    fn divider_retunes_its_core_for_low_rates() {
        // 100 MHz is below the core range, so the core runs at a multiple.
        let (div, setting) = compute_div_and_core(CORE, 100_000_000, 24_000_000).unwrap();
        assert_eq!(div, 5);
        assert_eq!(setting.rate, 600_000_000);
        assert_eq!(setting.rate / (div + 1), 100_000_000);

        // 1 GHz leaves the core one fractional step away.
        let (div, setting) = compute_div_and_core(CORE, 1_000_000_000, 24_000_000).unwrap();
        assert_eq!(div, 0);
        assert_eq!(setting.rate, 1_000_000_002);

        assert_eq!(
            compute_div_and_core(CORE, 1_300_000_000, 24_000_000),
            Err(ClockError::RateOutOfRange)
        );
    }

    #[test]
    fn enabling_a_core_writes_mul_frac_then_locks() {
        let pmc = FakePmc::ready();
        let node = ClockNode::new();
        node.mul.set(40);
        node.frac.set(2796203);

        assert_eq!(frac_enable(&pmc, 1, &CHARAC, &node, 10), Ok(()));

        let (ctrl0, ctrl1, acr) = pmc.pll_bank(1);
        assert_eq!(PLL_CTRL1::MUL.read(ctrl1), 40);
        assert_eq!(PLL_CTRL1::FRACR.read(ctrl1), 2796203);
        assert!(PLL_CTRL0::ENPLL.is_set(ctrl0));
        assert!(PLL_CTRL0::ENLOCK.is_set(ctrl0));
        assert_eq!(acr, PLL_ACR_DEFAULT);
        assert_eq!(pmc.updates(), [1, 1]);
        // Other PLLs are left alone.
        assert_eq!(pmc.pll_bank(0), (0, 0, 0));
    }

    #[test]
    fn enabling_a_running_core_with_the_same_setting_is_a_no_op() {
        let pmc = FakePmc::ready();
        pmc.preset_pll(2, PLL_CTRL0::ENPLL::SET.value, (40 << 24) | 17);
        pmc.set_locked(2);
        let node = ClockNode::new();
        node.mul.set(40);
        node.frac.set(17);

        assert_eq!(frac_enable(&pmc, 2, &CHARAC, &node, 10), Ok(()));
        assert!(pmc.updates().is_empty());
    }

    #[test]
    fn core_that_never_locks_reports_not_ready() {
        let pmc = FakePmc::new();
        let node = ClockNode::new();
        node.mul.set(49);
        assert_eq!(
            frac_enable(&pmc, 0, &CHARAC, &node, 50),
            Err(ClockError::HardwareNotReady)
        );
    }

    #[test]
    fn usb_core_drives_bias_and_regulator() {
        let pmc = FakePmc::ready();
        let node = ClockNode::new();
        node.mul.set(39);

        assert_eq!(frac_enable(&pmc, 3, &USB_CHARAC, &node, 10), Ok(()));
        let (_, _, acr) = pmc.pll_bank(3);
        assert!(PLL_ACR::UTMIBG.is_set(acr));
        assert!(PLL_ACR::UTMIVR.is_set(acr));
        assert_eq!(pmc.delays(), vec![10, 10]);

        frac_disable(&pmc, 3, &USB_CHARAC);
        let (ctrl0, _, acr) = pmc.pll_bank(3);
        assert!(!PLL_CTRL0::ENPLL.is_set(ctrl0));
        assert!(!PLL_ACR::UTMIBG.is_set(acr));
        assert!(!PLL_ACR::UTMIVR.is_set(acr));
        assert!(!pmc.is_locked(3));
    }

    #[test]
    fn read_back_only_from_locked_cores() {
        let pmc = FakePmc::ready();
        pmc.preset_pll(4, 0, (31 << 24) | 0x2000);
        let node = ClockNode::new();
        assert!(!frac_read_back(&pmc, 4, &node));
        assert_eq!(node.mul.get(), 0);

        pmc.set_locked(4);
        assert!(frac_read_back(&pmc, 4, &node));
        assert_eq!((node.mul.get(), node.frac.get()), (31, 0x2000));
    }

    #[test]
    fn divider_enable_programs_the_layout_field() {
        let pmc = FakePmc::ready();

        assert_eq!(div_enable(&pmc, 1, &DIVPMC, 4, 10), Ok(()));
        let (ctrl0, _, _) = pmc.pll_bank(1);
        assert_eq!(PLL_CTRL0::DIVPMC.read(ctrl0), 4);
        assert!(PLL_CTRL0::ENPLLCK.is_set(ctrl0));

        div_disable(&pmc, 1, &DIVPMC);
        let (ctrl0, _, _) = pmc.pll_bank(1);
        assert!(!PLL_CTRL0::ENPLLCK.is_set(ctrl0));
        assert_eq!(PLL_CTRL0::DIVPMC.read(ctrl0), 4);
    }
}
