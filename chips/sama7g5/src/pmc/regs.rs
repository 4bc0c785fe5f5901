// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! PMC register map.
//!
//! Offsets are relative to the PMC base. Several registers are banked: the
//! PLL control registers by the ID written to `PMC_PLL_UPDT`, `PMC_MCR_V2`
//! by its own ID field and `PMC_PCR` by its PID field.

use tock_registers::register_bitfields;

/// System Clock Enable
pub const PMC_SCER: usize = 0x00;
/// System Clock Disable
pub const PMC_SCDR: usize = 0x04;
/// System Clock Status
pub const PMC_SCSR: usize = 0x08;
/// PLL Control 0 (banked by `PLL_UPDT.ID`)
pub const PMC_PLL_CTRL0: usize = 0x0C;
/// PLL Control 1 (banked by `PLL_UPDT.ID`)
pub const PMC_PLL_CTRL1: usize = 0x10;
/// PLL Analog Control (banked by `PLL_UPDT.ID`)
pub const PMC_PLL_ACR: usize = 0x18;
/// PLL Update
pub const PMC_PLL_UPDT: usize = 0x1C;
/// Main Oscillator
pub const CKGR_MOR: usize = 0x20;
/// Main Clock Frequency
pub const CKGR_MCFR: usize = 0x24;
/// MCK0 Master Clock
pub const PMC_MCKR: usize = 0x28;
/// MCK1..4 Master Clock (banked by `MCR_V2.ID`)
pub const PMC_MCR_V2: usize = 0x30;
/// Status
pub const PMC_SR: usize = 0x68;
/// Peripheral Control (banked by `PCR.PID`)
pub const PMC_PCR: usize = 0x88;
/// PLL Interrupt Status 0
pub const PMC_PLL_ISR0: usize = 0xEC;

/// Programmable Clock `n`
pub const fn pmc_pck(n: u32) -> usize {
    0x40 + (n as usize) * 4
}

/// Size of the register window mapped for the PMC.
pub const PMC_SIZE: usize = 0x100;

/// Value of `PLL_ACR` for every PLL but the USB one.
pub const PLL_ACR_DEFAULT: u32 = 0x0002_0010;
/// Value of `PLL_ACR` for the USB (UTMI) PLL.
pub const PLL_ACR_DEFAULT_UPLL: u32 = 0x1202_0010;

register_bitfields![u32,
    pub PLL_CTRL0 [
        /// Divider of the PMC output
        DIVPMC OFFSET(0) NUMBITS(8) [],
        /// Divider of the I/O output
        DIVIO OFFSET(12) NUMBITS(8) [],
        /// Enable the PLL
        ENPLL OFFSET(28) NUMBITS(1) [],
        /// Enable the PMC output divider
        ENPLLCK OFFSET(29) NUMBITS(1) [],
        /// Enable the I/O output divider
        ENIOPLLCK OFFSET(30) NUMBITS(1) [],
        /// Enable the lock detector
        ENLOCK OFFSET(31) NUMBITS(1) []
    ],
    pub PLL_CTRL1 [
        /// Fractional part of the multiplier, in 1/2^22 steps
        FRACR OFFSET(0) NUMBITS(22) [],
        /// Multiplier minus one
        MUL OFFSET(24) NUMBITS(8) []
    ],
    pub PLL_ACR [
        /// UTMI internal regulator control
        UTMIVR OFFSET(12) NUMBITS(1) [],
        /// UTMI bandgap control
        UTMIBG OFFSET(13) NUMBITS(1) []
    ],
    pub PLL_UPDT [
        /// PLL selected by the banked registers
        ID OFFSET(0) NUMBITS(4) [],
        /// Apply the values written to the banked registers
        UPDATE OFFSET(8) NUMBITS(1) [],
        /// Start-up time
        STUPTIM OFFSET(16) NUMBITS(8) []
    ],
    pub CKGR_MOR [
        /// Main crystal oscillator enable
        MOSCXTEN OFFSET(0) NUMBITS(1) [],
        /// Main crystal oscillator bypass
        MOSCXTBY OFFSET(1) NUMBITS(1) [],
        /// Main RC oscillator enable
        MOSCRCEN OFFSET(3) NUMBITS(1) [],
        /// Main crystal oscillator start-up time, in slow clock cycles x 8
        MOSCXTST OFFSET(8) NUMBITS(8) [],
        /// Write access password
        KEY OFFSET(16) NUMBITS(8) [
            PASSWD = 0x37
        ],
        /// Main clock source selection
        MOSCSEL OFFSET(24) NUMBITS(1) [
            RcOscillator = 0,
            CrystalOscillator = 1
        ]
    ],
    pub MCKR [
        /// MCK0 source selection
        CSS OFFSET(0) NUMBITS(2) [],
        /// Processor clock prescaler
        PRES OFFSET(4) NUMBITS(3) [],
        /// MCK0 divider
        MDIV OFFSET(8) NUMBITS(3) []
    ],
    pub MCR_V2 [
        /// Master clock selected by the banked fields
        ID OFFSET(0) NUMBITS(4) [],
        /// Apply the written configuration
        CMD OFFSET(7) NUMBITS(1) [],
        /// Divider
        DIV OFFSET(8) NUMBITS(3) [],
        /// Source selection
        CSS OFFSET(16) NUMBITS(5) [],
        /// Enable
        EN OFFSET(28) NUMBITS(1) []
    ],
    pub PCKR [
        /// Source selection
        CSS OFFSET(0) NUMBITS(5) [],
        /// Prescaler, divides by PRES + 1
        PRES OFFSET(8) NUMBITS(8) []
    ],
    pub PCR [
        /// Peripheral identifier
        PID OFFSET(0) NUMBITS(7) [],
        /// Generated clock source selection
        GCKCSS OFFSET(8) NUMBITS(5) [],
        /// Generated clock divider, divides by GCKDIV + 1
        GCKDIV OFFSET(20) NUMBITS(8) [],
        /// Peripheral clock enable
        EN OFFSET(28) NUMBITS(1) [],
        /// Generated clock enable
        GCKEN OFFSET(29) NUMBITS(1) [],
        /// Write the configuration, read it otherwise
        CMD OFFSET(31) NUMBITS(1) []
    ],
    pub SR [
        /// Main crystal oscillator stable
        MOSCXTS OFFSET(0) NUMBITS(1) [],
        /// MCK0 ready
        MCKRDY OFFSET(3) NUMBITS(1) [],
        /// Programmable clock outputs ready
        PCKRDY OFFSET(8) NUMBITS(8) [],
        /// Main clock source selection done
        MOSCSELS OFFSET(16) NUMBITS(1) [],
        /// Main RC oscillator stable
        MOSCRCS OFFSET(17) NUMBITS(1) [],
        /// Generated clocks ready
        GCKRDY OFFSET(24) NUMBITS(1) [],
        /// MCK1..4 ready
        MCKXRDY OFFSET(26) NUMBITS(1) []
    ]
];

/// Start-up count programmed when enabling the main crystal oscillator.
pub const MOSCXT_STARTUP_COUNT: u32 = 61;
