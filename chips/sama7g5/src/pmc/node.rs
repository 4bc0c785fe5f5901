// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Clock descriptions and per-node runtime state.
//!
//! A [`ClockDesc`] is one row of the static platform table. The tree turns
//! every row into a [`ClockNode`] that holds the resolved parent indices and
//! the state that changes at runtime.

use core::cell::Cell;

use bitflags::bitflags;
use tock_registers::fields::Field;

use super::regs::PLL_CTRL0;

/// Most rows a tree can hold.
pub const MAX_CLOCKS: usize = 160;
/// Most candidate parents a single clock can have.
pub const MAX_PARENTS: usize = 9;

/// Inclusive frequency bounds, in Hz.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockRange {
    pub min: u32,
    pub max: u32,
}

impl ClockRange {
    pub const NONE: ClockRange = ClockRange {
        min: 0,
        max: u32::MAX,
    };

    pub const fn new(min: u32, max: u32) -> ClockRange {
        ClockRange { min, max }
    }

    /// Only an upper bound.
    pub const fn max(max: u32) -> ClockRange {
        ClockRange { min: 0, max }
    }

    pub const fn contains(&self, rate: u32) -> bool {
        rate >= self.min && rate <= self.max
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ClockFlags: u8 {
        /// Never gated in hardware, whatever the enable count.
        const CRITICAL = 1 << 0;
        /// Rate changes are refused while the clock is enabled.
        const SET_RATE_GATE = 1 << 1;
        /// Parent changes are refused while the clock is enabled, except a
        /// switch to the changeable parent.
        const SET_PARENT_GATE = 1 << 2;
        /// A rate request may be forwarded to the parent.
        const SET_RATE_PARENT = 1 << 3;
    }
}

/// Input and core bounds of a PLL. The bounds of its divided outputs are the
/// `range` of the divider rows.
#[derive(Debug)]
pub struct PllCharacteristics {
    /// Rates the core accepts from its parent.
    pub input: ClockRange,
    /// Range of the fractional core (VCO).
    pub core_output: ClockRange,
    /// USB-class PLLs also drive the UTMI bandgap and regulator.
    pub usb: bool,
}

/// Placement of a PLL output divider inside `PLL_CTRL0`.
pub struct DivPllLayout {
    pub div: Field<u32, PLL_CTRL0::Register>,
    pub enable: Field<u32, PLL_CTRL0::Register>,
    /// The output divides by two and has no programmable divider.
    pub fixed_div2: bool,
    /// Divider field value held while the parent core is reprogrammed, so
    /// the output never overshoots during the change. Zero for none.
    pub safe_div: u32,
}

/// Master clock bounds and the `MDIV` divisor table.
#[derive(Debug)]
pub struct MasterCharacteristics {
    pub output: ClockRange,
    /// Divisor applied for each `MDIV` code.
    pub divisors: &'static [u32],
}

/// What a clock is, and which registers drive it.
#[derive(Clone, Copy)]
pub enum ClockKind {
    /// A source whose rate the board supplies through `PmcConfig`.
    External,
    /// A source whose rate never changes.
    Fixed { rate: u32 },
    /// The main RC oscillator.
    MainRcOsc { rate: u32 },
    /// The main crystal oscillator, fed by the external crystal.
    MainOsc,
    /// `mainck`: selects the RC or the crystal oscillator.
    MainMux,
    /// Fractional PLL core, multiplies its parent by `mul + 1 + frac/2^22`.
    FracPll(&'static PllCharacteristics),
    /// PLL output divider.
    DivPll(&'static DivPllLayout),
    /// `fclk`: MCK0 source selection and processor prescaler.
    MasterPres(&'static MasterCharacteristics),
    /// `mck0`: MCK0 divider behind the prescaler.
    MasterDiv(&'static MasterCharacteristics),
    /// MCK1..4, configured through `PMC_MCR_V2`.
    MasterX,
    /// Programmable clock output `progN`.
    Programmable,
    /// System clock gate `pckN`.
    System,
    /// Peripheral clock gate.
    Peripheral,
    /// Generated clock of a peripheral.
    Generated,
}

/// Families of clocks, as consumers address them by hardware id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockCategory {
    Core,
    System,
    Peripheral,
    Generated,
    Programmable,
}

impl ClockKind {
    pub const fn category(&self) -> ClockCategory {
        match self {
            ClockKind::System => ClockCategory::System,
            ClockKind::Peripheral => ClockCategory::Peripheral,
            ClockKind::Generated => ClockCategory::Generated,
            ClockKind::Programmable => ClockCategory::Programmable,
            _ => ClockCategory::Core,
        }
    }

    /// Whether the parent can be chosen at runtime.
    pub const fn is_mux(&self) -> bool {
        matches!(
            self,
            ClockKind::MainMux
                | ClockKind::MasterPres(_)
                | ClockKind::MasterX
                | ClockKind::Programmable
                | ClockKind::Generated
        )
    }
}

/// A candidate parent and the hardware select code that picks it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParentDesc {
    pub name: &'static str,
    pub code: u32,
}

impl ParentDesc {
    pub const fn new(name: &'static str, code: u32) -> ParentDesc {
        ParentDesc { name, code }
    }
}

/// One row of the platform clock table.
#[derive(Clone, Copy)]
pub struct ClockDesc {
    pub name: &'static str,
    /// Hardware identifier: PLL id, master clock id, peripheral id,
    /// programmable clock index or system clock bit, depending on `kind`.
    pub id: u32,
    pub kind: ClockKind,
    /// Candidate parents in logical order.
    pub parents: &'static [ParentDesc],
    pub range: ClockRange,
    pub flags: ClockFlags,
    /// Logical index of the one parent that may be switched to while the
    /// clock runs.
    pub changeable_parent: Option<usize>,
}

impl ClockDesc {
    pub const fn new(
        name: &'static str,
        id: u32,
        kind: ClockKind,
        parents: &'static [ParentDesc],
    ) -> ClockDesc {
        ClockDesc {
            name,
            id,
            kind,
            parents,
            range: ClockRange::NONE,
            flags: ClockFlags::empty(),
            changeable_parent: None,
        }
    }

    pub const fn range(mut self, range: ClockRange) -> ClockDesc {
        self.range = range;
        self
    }

    pub const fn flags(mut self, flags: ClockFlags) -> ClockDesc {
        self.flags = flags;
        self
    }

    pub const fn changeable_parent(mut self, index: usize) -> ClockDesc {
        self.changeable_parent = Some(index);
        self
    }

    /// Position of `code` in the parent list.
    pub fn parent_index_of_code(&self, code: u32) -> Option<usize> {
        self.parents.iter().position(|p| p.code == code)
    }
}

/// Runtime state of a clock in the tree.
///
/// Which fields mean something depends on the kind: `mul` and `frac` for
/// fractional PLLs, `div` for every divider or prescaler (as the raw field
/// value), `parent` for muxes.
pub struct ClockNode {
    parents: [u8; MAX_PARENTS],
    num_parents: u8,
    pub(crate) mul: Cell<u32>,
    pub(crate) frac: Cell<u32>,
    pub(crate) div: Cell<u32>,
    pub(crate) parent: Cell<usize>,
    pub(crate) enable_count: Cell<u32>,
}

impl ClockNode {
    pub(crate) const fn new() -> ClockNode {
        ClockNode {
            parents: [0; MAX_PARENTS],
            num_parents: 0,
            mul: Cell::new(0),
            frac: Cell::new(0),
            div: Cell::new(0),
            parent: Cell::new(0),
            enable_count: Cell::new(0),
        }
    }

    pub(crate) fn set_parents(&mut self, resolved: &[u8]) {
        self.parents[..resolved.len()].copy_from_slice(resolved);
        self.num_parents = resolved.len() as u8;
    }

    /// Tree index of the candidate parent at logical position `index`.
    pub(crate) fn parent_at(&self, index: usize) -> Option<usize> {
        if index < self.num_parents() {
            Some(self.parents[index] as usize)
        } else {
            None
        }
    }

    pub(crate) fn num_parents(&self) -> usize {
        self.num_parents as usize
    }

    /// Tree index of the selected parent.
    pub(crate) fn current_parent(&self) -> Option<usize> {
        self.parent_at(self.parent.get())
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.enable_count.get() > 0
    }
}
