// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! SAMA7G5 clock table and PMC bring-up.
//!
//! [`CLOCKS`] lists every clock the PMC produces, parents first. The names
//! follow the datasheet and the device tree bindings so consumers can look
//! clocks up by name or by `(category, id)`.
//!
//! ```rust,ignore
//! let pmc = unsafe { PmcMmio::new(sama7g5::PMC_BASE) };
//! let clocks = sama7g5::pmc_setup(pmc, PmcConfig::DEFAULT);
//! ```

use log::info;

use crate::config::PmcConfig;
use crate::pmc::regs::PLL_CTRL0;
use crate::pmc::{
    ClockDesc, ClockFlags, ClockKind, ClockRange, ClockTree, DivPllLayout,
    MasterCharacteristics, ParentDesc, PllCharacteristics, RegisterAdapter,
};

/// Physical base address of the PMC.
pub const PMC_BASE: usize = 0xE001_8000;

/// The CPU PLL cannot output exactly 1 GHz, hence the odd upper bound.
const CPU_PLL_OUTPUTS: ClockRange = ClockRange::new(2_343_750, 1_000_000_002);
const PLL_OUTPUTS: ClockRange = ClockRange::new(2_343_750, 1_200_000_000);
const PLL_CORE: ClockRange = ClockRange::new(600_000_000, 1_200_000_000);
const PLL_INPUT: ClockRange = ClockRange::new(12_000_000, 50_000_000);

static PLL: PllCharacteristics = PllCharacteristics {
    input: PLL_INPUT,
    core_output: PLL_CORE,
    usb: false,
};

static DIVPMC: DivPllLayout = DivPllLayout {
    div: PLL_CTRL0::DIVPMC,
    enable: PLL_CTRL0::ENPLLCK,
    fixed_div2: false,
    safe_div: 0,
};

/// Divide by 16 while the CPU core moves, which is safe even when switching
/// between 1 GHz and 90 MHz with the core passing 1.2 GHz.
static CPU_DIVPMC: DivPllLayout = DivPllLayout {
    div: PLL_CTRL0::DIVPMC,
    enable: PLL_CTRL0::ENPLLCK,
    fixed_div2: false,
    safe_div: 15,
};

static DIVIO: DivPllLayout = DivPllLayout {
    div: PLL_CTRL0::DIVIO,
    enable: PLL_CTRL0::ENIOPLLCK,
    fixed_div2: false,
    safe_div: 0,
};

const MCK0_OUTPUT: ClockRange = ClockRange::new(32_768, 200_000_000);

static MCK0: MasterCharacteristics = MasterCharacteristics {
    output: MCK0_OUTPUT,
    divisors: &[1, 2, 4, 3, 5],
};

const MD_SLCK: ParentDesc = ParentDesc::new("md_slck", 0);
const TD_SLCK: ParentDesc = ParentDesc::new("td_slck", 1);
const MAINCK: ParentDesc = ParentDesc::new("mainck", 2);
const SYSPLL: ParentDesc = ParentDesc::new("syspll_divpmcck", 5);
const DDRPLL: ParentDesc = ParentDesc::new("ddrpll_divpmcck", 6);
const IMGPLL: ParentDesc = ParentDesc::new("imgpll_divpmcck", 7);
const BAUDPLL: ParentDesc = ParentDesc::new("baudpll_divpmcck", 8);
const AUDIOPLL: ParentDesc = ParentDesc::new("audiopll_divpmcck", 9);
const ETHPLL: ParentDesc = ParentDesc::new("ethpll_divpmcck", 10);

static MAIN_XTAL_ONLY: [ParentDesc; 1] = [ParentDesc::new("main_xtal", 0)];
static MAINCK_SOURCES: [ParentDesc; 2] = [
    ParentDesc::new("main_rc_osc", 0),
    ParentDesc::new("main_osc", 1),
];
static MAINCK_ONLY: [ParentDesc; 1] = [ParentDesc::new("mainck", 0)];

static CPUPLL_CORE: [ParentDesc; 1] = [ParentDesc::new("cpupll_fracck", 0)];
static SYSPLL_CORE: [ParentDesc; 1] = [ParentDesc::new("syspll_fracck", 0)];
static DDRPLL_CORE: [ParentDesc; 1] = [ParentDesc::new("ddrpll_fracck", 0)];
static IMGPLL_CORE: [ParentDesc; 1] = [ParentDesc::new("imgpll_fracck", 0)];
static BAUDPLL_CORE: [ParentDesc; 1] = [ParentDesc::new("baudpll_fracck", 0)];
static AUDIOPLL_CORE: [ParentDesc; 1] = [ParentDesc::new("audiopll_fracck", 0)];
static ETHPLL_CORE: [ParentDesc; 1] = [ParentDesc::new("ethpll_fracck", 0)];

static FCLK_SOURCES: [ParentDesc; 4] = [
    MD_SLCK,
    ParentDesc::new("mainck", 1),
    ParentDesc::new("cpupll_divpmcck", 2),
    ParentDesc::new("syspll_divpmcck", 3),
];
static FCLK_ONLY: [ParentDesc; 1] = [ParentDesc::new("fclk", 0)];

const MCK0_SOURCE: ParentDesc = ParentDesc::new("mck0", 3);
static MCK1_SOURCES: [ParentDesc; 5] = [MD_SLCK, TD_SLCK, MAINCK, MCK0_SOURCE, SYSPLL];
static MCK2_SOURCES: [ParentDesc; 5] = [MD_SLCK, TD_SLCK, MAINCK, MCK0_SOURCE, DDRPLL];
static MCK3_SOURCES: [ParentDesc; 7] = [
    MD_SLCK,
    TD_SLCK,
    MAINCK,
    MCK0_SOURCE,
    SYSPLL,
    DDRPLL,
    IMGPLL,
];
static MCK4_SOURCES: [ParentDesc; 5] = [MD_SLCK, TD_SLCK, MAINCK, MCK0_SOURCE, SYSPLL];

static PROG_SOURCES: [ParentDesc; 9] = [
    MD_SLCK, TD_SLCK, MAINCK, SYSPLL, DDRPLL, IMGPLL, BAUDPLL, AUDIOPLL, ETHPLL,
];
static PROG0: [ParentDesc; 1] = [ParentDesc::new("prog0", 0)];
static PROG1: [ParentDesc; 1] = [ParentDesc::new("prog1", 0)];
static PROG2: [ParentDesc; 1] = [ParentDesc::new("prog2", 0)];
static PROG3: [ParentDesc; 1] = [ParentDesc::new("prog3", 0)];
static PROG4: [ParentDesc; 1] = [ParentDesc::new("prog4", 0)];
static PROG5: [ParentDesc; 1] = [ParentDesc::new("prog5", 0)];
static PROG6: [ParentDesc; 1] = [ParentDesc::new("prog6", 0)];
static PROG7: [ParentDesc; 1] = [ParentDesc::new("prog7", 0)];

static MCK0_ONLY: [ParentDesc; 1] = [ParentDesc::new("mck0", 0)];
static MCK1_ONLY: [ParentDesc; 1] = [ParentDesc::new("mck1", 0)];

static GCK_SLOW_ONLY: [ParentDesc; 3] = [MD_SLCK, TD_SLCK, MAINCK];
static GCK_AUDIO: [ParentDesc; 4] = [MD_SLCK, TD_SLCK, MAINCK, AUDIOPLL];
static GCK_ETH: [ParentDesc; 4] = [MD_SLCK, TD_SLCK, MAINCK, ETHPLL];
static GCK_SYS_BAUD: [ParentDesc; 5] = [MD_SLCK, TD_SLCK, MAINCK, SYSPLL, BAUDPLL];
static GCK_SYS_AUDIO: [ParentDesc; 5] = [MD_SLCK, TD_SLCK, MAINCK, SYSPLL, AUDIOPLL];
static GCK_DDR_IMG: [ParentDesc; 5] = [MD_SLCK, TD_SLCK, MAINCK, DDRPLL, IMGPLL];
static GCK_AUDIO_ETH: [ParentDesc; 5] = [MD_SLCK, TD_SLCK, MAINCK, AUDIOPLL, ETHPLL];
static GCK_SYS_IMG_AUDIO: [ParentDesc; 6] =
    [MD_SLCK, TD_SLCK, MAINCK, SYSPLL, IMGPLL, AUDIOPLL];
static GCK_ALL_PLLS: [ParentDesc; 8] = [
    MD_SLCK, TD_SLCK, MAINCK, SYSPLL, IMGPLL, BAUDPLL, AUDIOPLL, ETHPLL,
];

const CRITICAL: ClockFlags = ClockFlags::CRITICAL;
const CRITICAL_GATED: ClockFlags = ClockFlags::CRITICAL.union(ClockFlags::SET_RATE_GATE);
const RATE_GATED: ClockFlags = ClockFlags::SET_RATE_GATE;
/// Output dividers allowed to retune their core while stopped.
const RETUNABLE: ClockFlags = ClockFlags::SET_RATE_GATE
    .union(ClockFlags::SET_PARENT_GATE)
    .union(ClockFlags::SET_RATE_PARENT);
const MCKX_GATES: ClockFlags = ClockFlags::SET_RATE_GATE.union(ClockFlags::SET_PARENT_GATE);

const fn frac(
    name: &'static str,
    id: u32,
    charac: &'static PllCharacteristics,
    parents: &'static [ParentDesc],
    flags: ClockFlags,
) -> ClockDesc {
    ClockDesc::new(name, id, ClockKind::FracPll(charac), parents).flags(flags)
}

const fn div(
    name: &'static str,
    id: u32,
    layout: &'static DivPllLayout,
    parents: &'static [ParentDesc],
    range: ClockRange,
    flags: ClockFlags,
) -> ClockDesc {
    ClockDesc::new(name, id, ClockKind::DivPll(layout), parents)
        .range(range)
        .flags(flags)
}

const fn mckx(
    name: &'static str,
    id: u32,
    parents: &'static [ParentDesc],
    flags: ClockFlags,
) -> ClockDesc {
    ClockDesc::new(name, id, ClockKind::MasterX, parents).flags(flags)
}

const fn prog(name: &'static str, id: u32) -> ClockDesc {
    ClockDesc::new(name, id, ClockKind::Programmable, &PROG_SOURCES)
}

const fn pck(name: &'static str, id: u32, parents: &'static [ParentDesc]) -> ClockDesc {
    ClockDesc::new(name, id, ClockKind::System, parents)
}

const fn periph(name: &'static str, id: u32, parents: &'static [ParentDesc]) -> ClockDesc {
    ClockDesc::new(name, id, ClockKind::Peripheral, parents)
}

const fn gck(name: &'static str, id: u32, parents: &'static [ParentDesc], max: u32) -> ClockDesc {
    ClockDesc::new(name, id, ClockKind::Generated, parents)
        .range(ClockRange::max(max))
        .flags(ClockFlags::SET_PARENT_GATE)
}

/// Every PMC clock, parents before children.
pub static CLOCKS: &[ClockDesc] = &[
    // Board sources
    ClockDesc::new("md_slck", 0, ClockKind::External, &[]),
    ClockDesc::new("td_slck", 0, ClockKind::External, &[]),
    ClockDesc::new("main_xtal", 0, ClockKind::External, &[]),
    // Main clock
    ClockDesc::new("main_rc_osc", 0, ClockKind::MainRcOsc { rate: 12_000_000 }, &[]),
    ClockDesc::new("main_osc", 0, ClockKind::MainOsc, &MAIN_XTAL_ONLY),
    ClockDesc::new("mainck", 0, ClockKind::MainMux, &MAINCK_SOURCES),
    // PLLs
    frac("cpupll_fracck", 0, &PLL, &MAINCK_ONLY, CRITICAL),
    div(
        "cpupll_divpmcck",
        0,
        &CPU_DIVPMC,
        &CPUPLL_CORE,
        CPU_PLL_OUTPUTS,
        CRITICAL.union(ClockFlags::SET_RATE_PARENT),
    ),
    frac("syspll_fracck", 1, &PLL, &MAINCK_ONLY, CRITICAL_GATED),
    div("syspll_divpmcck", 1, &DIVPMC, &SYSPLL_CORE, PLL_OUTPUTS, CRITICAL_GATED),
    frac("ddrpll_fracck", 2, &PLL, &MAINCK_ONLY, CRITICAL_GATED),
    div("ddrpll_divpmcck", 2, &DIVPMC, &DDRPLL_CORE, PLL_OUTPUTS, CRITICAL_GATED),
    frac("imgpll_fracck", 3, &PLL, &MAINCK_ONLY, RATE_GATED),
    div("imgpll_divpmcck", 3, &DIVPMC, &IMGPLL_CORE, PLL_OUTPUTS, RETUNABLE),
    frac("baudpll_fracck", 4, &PLL, &MAINCK_ONLY, RATE_GATED),
    div("baudpll_divpmcck", 4, &DIVPMC, &BAUDPLL_CORE, PLL_OUTPUTS, RETUNABLE),
    frac("audiopll_fracck", 5, &PLL, &MAIN_XTAL_ONLY, RATE_GATED),
    div("audiopll_divpmcck", 5, &DIVPMC, &AUDIOPLL_CORE, PLL_OUTPUTS, RETUNABLE),
    div("audiopll_diviock", 5, &DIVIO, &AUDIOPLL_CORE, PLL_OUTPUTS, RETUNABLE),
    frac("ethpll_fracck", 6, &PLL, &MAIN_XTAL_ONLY, RATE_GATED),
    div("ethpll_divpmcck", 6, &DIVPMC, &ETHPLL_CORE, PLL_OUTPUTS, RETUNABLE),
    // Master clocks
    ClockDesc::new("fclk", 0, ClockKind::MasterPres(&MCK0), &FCLK_SOURCES),
    ClockDesc::new("mck0", 0, ClockKind::MasterDiv(&MCK0), &FCLK_ONLY).range(MCK0_OUTPUT),
    mckx("mck1", 1, &MCK1_SOURCES, MCKX_GATES.union(CRITICAL)),
    mckx("mck2", 2, &MCK2_SOURCES, MCKX_GATES.union(CRITICAL)),
    mckx(
        "mck3",
        3,
        &MCK3_SOURCES,
        MCKX_GATES.union(ClockFlags::SET_RATE_PARENT),
    )
    .changeable_parent(5),
    mckx("mck4", 4, &MCK4_SOURCES, MCKX_GATES.union(CRITICAL)),
    // Programmable outputs
    prog("prog0", 0),
    prog("prog1", 1),
    prog("prog2", 2),
    prog("prog3", 3),
    prog("prog4", 4),
    prog("prog5", 5),
    prog("prog6", 6),
    prog("prog7", 7),
    pck("pck0", 8, &PROG0),
    pck("pck1", 9, &PROG1),
    pck("pck2", 10, &PROG2),
    pck("pck3", 11, &PROG3),
    pck("pck4", 12, &PROG4),
    pck("pck5", 13, &PROG5),
    pck("pck6", 14, &PROG6),
    pck("pck7", 15, &PROG7),
    // Peripheral clocks
    periph("pioA_clk", 11, &MCK0_ONLY),
    periph("securam_clk", 18, &MCK0_ONLY),
    periph("sfr_clk", 19, &MCK1_ONLY),
    periph("hsmc_clk", 21, &MCK1_ONLY),
    periph("xdmac0_clk", 22, &MCK1_ONLY),
    periph("xdmac1_clk", 23, &MCK1_ONLY),
    periph("xdmac2_clk", 24, &MCK1_ONLY),
    periph("acc_clk", 25, &MCK1_ONLY),
    periph("aes_clk", 27, &MCK1_ONLY),
    periph("tzaesbasc_clk", 28, &MCK1_ONLY),
    periph("asrc_clk", 30, &MCK1_ONLY).range(ClockRange::max(200_000_000)),
    periph("cpkcc_clk", 32, &MCK0_ONLY),
    periph("eic_clk", 37, &MCK1_ONLY),
    periph("flex0_clk", 38, &MCK1_ONLY),
    periph("flex1_clk", 39, &MCK1_ONLY),
    periph("flex2_clk", 40, &MCK1_ONLY),
    periph("flex3_clk", 41, &MCK1_ONLY),
    periph("flex4_clk", 42, &MCK1_ONLY),
    periph("flex5_clk", 43, &MCK1_ONLY),
    periph("flex6_clk", 44, &MCK1_ONLY),
    periph("flex7_clk", 45, &MCK1_ONLY),
    periph("flex8_clk", 46, &MCK1_ONLY),
    periph("flex9_clk", 47, &MCK1_ONLY),
    periph("flex10_clk", 48, &MCK1_ONLY),
    periph("flex11_clk", 49, &MCK1_ONLY),
    periph("gmac0_clk", 51, &MCK1_ONLY),
    periph("gmac1_clk", 52, &MCK1_ONLY),
    periph("icm_clk", 55, &MCK1_ONLY),
    periph("i2smcc0_clk", 57, &MCK1_ONLY).range(ClockRange::max(200_000_000)),
    periph("i2smcc1_clk", 58, &MCK1_ONLY).range(ClockRange::max(200_000_000)),
    periph("matrix_clk", 60, &MCK1_ONLY),
    periph("mcan0_clk", 61, &MCK1_ONLY).range(ClockRange::max(200_000_000)),
    periph("mcan1_clk", 62, &MCK1_ONLY).range(ClockRange::max(200_000_000)),
    periph("mcan2_clk", 63, &MCK1_ONLY).range(ClockRange::max(200_000_000)),
    periph("mcan3_clk", 64, &MCK1_ONLY).range(ClockRange::max(200_000_000)),
    periph("mcan4_clk", 65, &MCK1_ONLY).range(ClockRange::max(200_000_000)),
    periph("mcan5_clk", 66, &MCK1_ONLY).range(ClockRange::max(200_000_000)),
    periph("pdmc0_clk", 68, &MCK1_ONLY).range(ClockRange::max(200_000_000)),
    periph("pdmc1_clk", 69, &MCK1_ONLY).range(ClockRange::max(200_000_000)),
    periph("pit64b0_clk", 70, &MCK1_ONLY),
    periph("pit64b1_clk", 71, &MCK1_ONLY),
    periph("pit64b2_clk", 72, &MCK1_ONLY),
    periph("pit64b3_clk", 73, &MCK1_ONLY),
    periph("pit64b4_clk", 74, &MCK1_ONLY),
    periph("pit64b5_clk", 75, &MCK1_ONLY),
    periph("pwm_clk", 77, &MCK1_ONLY),
    periph("qspi0_clk", 78, &MCK1_ONLY),
    periph("qspi1_clk", 79, &MCK1_ONLY),
    periph("sdmmc0_clk", 80, &MCK1_ONLY),
    periph("sdmmc1_clk", 81, &MCK1_ONLY),
    periph("sdmmc2_clk", 82, &MCK1_ONLY),
    periph("sha_clk", 83, &MCK1_ONLY),
    periph("spdifrx_clk", 84, &MCK1_ONLY).range(ClockRange::max(200_000_000)),
    periph("spdiftx_clk", 85, &MCK1_ONLY).range(ClockRange::max(200_000_000)),
    periph("ssc0_clk", 86, &MCK1_ONLY).range(ClockRange::max(200_000_000)),
    periph("ssc1_clk", 87, &MCK1_ONLY).range(ClockRange::max(200_000_000)),
    periph("tcb0_ch0_clk", 88, &MCK1_ONLY).range(ClockRange::max(200_000_000)),
    periph("tcb0_ch1_clk", 89, &MCK1_ONLY).range(ClockRange::max(200_000_000)),
    periph("tcb0_ch2_clk", 90, &MCK1_ONLY).range(ClockRange::max(200_000_000)),
    periph("tcb1_ch0_clk", 91, &MCK1_ONLY).range(ClockRange::max(200_000_000)),
    periph("tcb1_ch1_clk", 92, &MCK1_ONLY).range(ClockRange::max(200_000_000)),
    periph("tcb1_ch2_clk", 93, &MCK1_ONLY).range(ClockRange::max(200_000_000)),
    periph("tcpca_clk", 94, &MCK1_ONLY),
    periph("tcpcb_clk", 95, &MCK1_ONLY),
    periph("tdes_clk", 96, &MCK1_ONLY),
    periph("trng_clk", 97, &MCK1_ONLY),
    periph("udphsa_clk", 104, &MCK1_ONLY),
    periph("udphsb_clk", 105, &MCK1_ONLY),
    periph("uhphs_clk", 106, &MCK1_ONLY),
    // Generated clocks
    gck("adc_gclk", 26, &GCK_SYS_IMG_AUDIO, 100_000_000),
    gck("asrc_gclk", 30, &GCK_AUDIO, 200_000_000),
    gck("csi_gclk", 33, &GCK_DDR_IMG, 27_000_000),
    gck("flex0_gclk", 38, &GCK_SYS_BAUD, 200_000_000),
    gck("flex1_gclk", 39, &GCK_SYS_BAUD, 200_000_000),
    gck("flex2_gclk", 40, &GCK_SYS_BAUD, 200_000_000),
    gck("flex3_gclk", 41, &GCK_SYS_BAUD, 200_000_000),
    gck("flex4_gclk", 42, &GCK_SYS_BAUD, 200_000_000),
    gck("flex5_gclk", 43, &GCK_SYS_BAUD, 200_000_000),
    gck("flex6_gclk", 44, &GCK_SYS_BAUD, 200_000_000),
    gck("flex7_gclk", 45, &GCK_SYS_BAUD, 200_000_000),
    gck("flex8_gclk", 46, &GCK_SYS_BAUD, 200_000_000),
    gck("flex9_gclk", 47, &GCK_SYS_BAUD, 200_000_000),
    gck("flex10_gclk", 48, &GCK_SYS_BAUD, 200_000_000),
    gck("flex11_gclk", 49, &GCK_SYS_BAUD, 200_000_000),
    gck("gmac0_gclk", 51, &GCK_ETH, 125_000_000).changeable_parent(3),
    gck("gmac1_gclk", 52, &GCK_ETH, 50_000_000),
    gck("gmac0_tsu_gclk", 53, &GCK_AUDIO_ETH, 300_000_000),
    gck("gmac1_tsu_gclk", 54, &GCK_AUDIO_ETH, 300_000_000),
    gck("i2smcc0_gclk", 57, &GCK_SYS_AUDIO, 100_000_000),
    gck("i2smcc1_gclk", 58, &GCK_SYS_AUDIO, 100_000_000),
    gck("mcan0_gclk", 61, &GCK_SYS_BAUD, 200_000_000),
    gck("mcan1_gclk", 62, &GCK_SYS_BAUD, 200_000_000),
    gck("mcan2_gclk", 63, &GCK_SYS_BAUD, 200_000_000),
    gck("mcan3_gclk", 64, &GCK_SYS_BAUD, 200_000_000),
    gck("mcan4_gclk", 65, &GCK_SYS_BAUD, 200_000_000),
    gck("mcan5_gclk", 66, &GCK_SYS_BAUD, 200_000_000),
    gck("pdmc0_gclk", 68, &GCK_SYS_AUDIO, 50_000_000),
    gck("pdmc1_gclk", 69, &GCK_SYS_AUDIO, 50_000_000),
    gck("pit64b0_gclk", 70, &GCK_ALL_PLLS, 200_000_000),
    gck("pit64b1_gclk", 71, &GCK_ALL_PLLS, 200_000_000),
    gck("pit64b2_gclk", 72, &GCK_ALL_PLLS, 200_000_000),
    gck("pit64b3_gclk", 73, &GCK_ALL_PLLS, 200_000_000),
    gck("pit64b4_gclk", 74, &GCK_ALL_PLLS, 200_000_000),
    gck("pit64b5_gclk", 75, &GCK_ALL_PLLS, 200_000_000),
    gck("qspi0_gclk", 78, &GCK_SYS_BAUD, 200_000_000),
    gck("qspi1_gclk", 79, &GCK_SYS_BAUD, 200_000_000),
    gck("sdmmc0_gclk", 80, &GCK_SYS_BAUD, 208_000_000).changeable_parent(4),
    gck("sdmmc1_gclk", 81, &GCK_SYS_BAUD, 208_000_000).changeable_parent(4),
    gck("sdmmc2_gclk", 82, &GCK_SYS_BAUD, 208_000_000).changeable_parent(4),
    gck("spdifrx_gclk", 84, &GCK_SYS_AUDIO, 150_000_000),
    gck("spdiftx_gclk", 85, &GCK_SYS_AUDIO, 25_000_000),
    gck("tcb0_ch0_gclk", 88, &GCK_ALL_PLLS, 200_000_000),
    gck("tcb1_ch0_gclk", 91, &GCK_ALL_PLLS, 200_000_000),
    gck("tcpca_gclk", 94, &GCK_SLOW_ONLY, 32_768),
    gck("tcpcb_gclk", 95, &GCK_SLOW_ONLY, 32_768),
];

/// Build the clock tree from [`CLOCKS`].
///
/// The board cannot run with a partially described clock tree, so any
/// construction error is fatal.
pub fn pmc_setup<R: RegisterAdapter>(io: R, config: PmcConfig) -> ClockTree<'static, R> {
    match ClockTree::new(io, CLOCKS, config) {
        Ok(tree) => {
            info!("pmc: {} clocks registered", CLOCKS.len());
            tree
        }
        Err(err) => panic!("pmc: clock tree setup failed: {}", err),
    }
}
