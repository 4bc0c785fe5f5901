// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Emulated PMC register bank for host tests.
//!
//! Plain registers are stored as written. The banked registers follow the
//! hardware selection rules: PLL registers by `PLL_UPDT.ID`, `MCR_V2` by
//! its `ID` field and `PCR` by `PID`, the last two only latching a write
//! when `CMD` is set.
//!
//! A "ready" bank behaves like silicon that locks instantly: strobing
//! `PLL_UPDT.UPDATE` locks any PLL whose enables are set and every status
//! bit of `PMC_SR` reads as set.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::vec::Vec;

use super::io::RegisterAdapter;
use super::regs::{
    MCR_V2, PCR, PLL_CTRL0, PLL_UPDT, PMC_MCR_V2, PMC_PCR, PMC_PLL_ACR, PMC_PLL_CTRL0,
    PMC_PLL_CTRL1, PMC_PLL_ISR0, PMC_PLL_UPDT, PMC_SCDR, PMC_SCER, PMC_SCSR, PMC_SR,
};

const PLL_BANKS: usize = 16;
const PCR_BANKS: usize = 128;

#[derive(Clone, Copy, Default)]
struct PllBank {
    ctrl0: u32,
    ctrl1: u32,
    acr: u32,
}

pub(crate) struct FakePmc {
    auto_ready: bool,
    regs: RefCell<HashMap<usize, u32>>,
    plls: RefCell<[PllBank; PLL_BANKS]>,
    mcrs: RefCell<[u32; PLL_BANKS]>,
    pcrs: RefCell<Vec<u32>>,
    pll_id: Cell<u32>,
    mcr_id: Cell<u32>,
    pid: Cell<u32>,
    locked: Cell<u32>,
    relock_fails: Cell<bool>,
    unlockable: Cell<u32>,
    updates: RefCell<Vec<u32>>,
    delays: RefCell<Vec<u32>>,
    writes: RefCell<Vec<(usize, u32)>>,
    reads: RefCell<HashMap<usize, usize>>,
}

impl FakePmc {
    /// A bank whose status bits only change when a test sets them.
    pub(crate) fn new() -> FakePmc {
        FakePmc {
            auto_ready: false,
            regs: RefCell::new(HashMap::new()),
            plls: RefCell::new([PllBank::default(); PLL_BANKS]),
            mcrs: RefCell::new([0; PLL_BANKS]),
            pcrs: RefCell::new(vec![0; PCR_BANKS]),
            pll_id: Cell::new(0),
            mcr_id: Cell::new(0),
            pid: Cell::new(0),
            locked: Cell::new(0),
            relock_fails: Cell::new(false),
            unlockable: Cell::new(0),
            updates: RefCell::new(Vec::new()),
            delays: RefCell::new(Vec::new()),
            writes: RefCell::new(Vec::new()),
            reads: RefCell::new(HashMap::new()),
        }
    }

    /// A bank that reports every lock and ready bit as soon as it is asked.
    pub(crate) fn ready() -> FakePmc {
        FakePmc {
            auto_ready: true,
            ..FakePmc::new()
        }
    }

    /// Set a plain register without logging a write.
    pub(crate) fn preset(&self, offset: usize, value: u32) {
        self.regs.borrow_mut().insert(offset, value);
    }

    /// Current value of a plain register, without counting a read.
    pub(crate) fn peek(&self, offset: usize) -> u32 {
        self.regs.borrow().get(&offset).copied().unwrap_or(0)
    }

    pub(crate) fn reads_of(&self, offset: usize) -> usize {
        self.reads.borrow().get(&offset).copied().unwrap_or(0)
    }

    /// Every value written to `offset`, oldest first.
    pub(crate) fn writes_to(&self, offset: usize) -> Vec<u32> {
        self.writes
            .borrow()
            .iter()
            .filter(|(o, _)| *o == offset)
            .map(|(_, v)| *v)
            .collect()
    }

    pub(crate) fn last_write(&self, offset: usize) -> Option<u32> {
        self.writes_to(offset).last().copied()
    }

    pub(crate) fn clear_log(&self) {
        self.writes.borrow_mut().clear();
        self.updates.borrow_mut().clear();
    }

    /// Ids of the PLLs whose update strobe was written, in order.
    pub(crate) fn updates(&self) -> Vec<u32> {
        self.updates.borrow().clone()
    }

    /// Every `delay_us` request, in microseconds, oldest first.
    pub(crate) fn delays(&self) -> Vec<u32> {
        self.delays.borrow().clone()
    }

    pub(crate) fn preset_pll(&self, id: u32, ctrl0: u32, ctrl1: u32) {
        let mut plls = self.plls.borrow_mut();
        plls[id as usize].ctrl0 = ctrl0;
        plls[id as usize].ctrl1 = ctrl1;
    }

    /// `(CTRL0, CTRL1, ACR)` of PLL `id`.
    pub(crate) fn pll_bank(&self, id: u32) -> (u32, u32, u32) {
        let bank = self.plls.borrow()[id as usize];
        (bank.ctrl0, bank.ctrl1, bank.acr)
    }

    pub(crate) fn set_locked(&self, id: u32) {
        self.locked.set(self.locked.get() | (1 << id));
    }

    /// From now on, a PLL whose `PLL_CTRL1` is rewritten never locks again.
    pub(crate) fn fail_relock(&self) {
        self.relock_fails.set(true);
    }

    pub(crate) fn is_locked(&self, id: u32) -> bool {
        self.locked.get() & (1 << id) != 0
    }

    /// Latched `MCR_V2` configuration of master clock `id`, ID field excluded.
    pub(crate) fn mcr_bank(&self, id: u32) -> u32 {
        self.mcrs.borrow()[id as usize]
    }

    pub(crate) fn preset_mcr(&self, id: u32, value: u32) {
        self.mcrs.borrow_mut()[id as usize] = value & !(MCR_V2::ID.mask << MCR_V2::ID.shift);
    }

    /// Latched `PCR` configuration of peripheral `pid`, PID field excluded.
    pub(crate) fn pcr_bank(&self, pid: u32) -> u32 {
        self.pcrs.borrow()[pid as usize]
    }

    pub(crate) fn preset_pcr(&self, pid: u32, value: u32) {
        self.pcrs.borrow_mut()[pid as usize] = Self::pcr_config(value);
    }

    fn pcr_config(value: u32) -> u32 {
        value
            & !(PCR::PID.mask << PCR::PID.shift)
            & !(PCR::CMD.mask << PCR::CMD.shift)
    }

    fn write_pll_updt(&self, value: u32) {
        let id = PLL_UPDT::ID.read(value);
        self.pll_id.set(id);
        if PLL_UPDT::UPDATE.is_set(value) {
            self.updates.borrow_mut().push(id);
            if self.auto_ready {
                let ctrl0 = self.plls.borrow()[id as usize].ctrl0;
                let running = PLL_CTRL0::ENPLL.is_set(ctrl0)
                    || PLL_CTRL0::ENPLLCK.is_set(ctrl0)
                    || PLL_CTRL0::ENIOPLLCK.is_set(ctrl0);
                if running && self.unlockable.get() & (1 << id) == 0 {
                    self.set_locked(id);
                } else {
                    self.locked.set(self.locked.get() & !(1 << id));
                }
            }
        }
        // UPDATE is a strobe and never reads back as set.
        self.preset(PMC_PLL_UPDT, value & !(PLL_UPDT::UPDATE.mask << PLL_UPDT::UPDATE.shift));
    }

    fn sr(&self) -> u32 {
        if self.auto_ready {
            u32::MAX
        } else {
            self.peek(PMC_SR)
        }
    }
}

impl RegisterAdapter for FakePmc {
    fn read32(&self, offset: usize) -> u32 {
        *self.reads.borrow_mut().entry(offset).or_insert(0) += 1;
        let pll = self.pll_id.get() as usize;
        match offset {
            PMC_PLL_CTRL0 => self.plls.borrow()[pll].ctrl0,
            PMC_PLL_CTRL1 => self.plls.borrow()[pll].ctrl1,
            PMC_PLL_ACR => self.plls.borrow()[pll].acr,
            PMC_PLL_ISR0 => self.locked.get(),
            PMC_MCR_V2 => self.mcrs.borrow()[self.mcr_id.get() as usize] | self.mcr_id.get(),
            PMC_PCR => self.pcrs.borrow()[self.pid.get() as usize] | self.pid.get(),
            PMC_SR => self.sr(),
            _ => self.peek(offset),
        }
    }

    fn write32(&self, offset: usize, value: u32) {
        self.writes.borrow_mut().push((offset, value));
        let pll = self.pll_id.get() as usize;
        match offset {
            PMC_PLL_CTRL0 => self.plls.borrow_mut()[pll].ctrl0 = value,
            PMC_PLL_CTRL1 => {
                self.plls.borrow_mut()[pll].ctrl1 = value;
                if self.relock_fails.get() {
                    self.unlockable.set(self.unlockable.get() | (1 << pll));
                }
            }
            PMC_PLL_ACR => self.plls.borrow_mut()[pll].acr = value,
            PMC_PLL_UPDT => self.write_pll_updt(value),
            PMC_MCR_V2 => {
                let id = MCR_V2::ID.read(value);
                self.mcr_id.set(id);
                if MCR_V2::CMD.is_set(value) {
                    self.mcrs.borrow_mut()[id as usize] = value
                        & !(MCR_V2::ID.mask << MCR_V2::ID.shift)
                        & !(MCR_V2::CMD.mask << MCR_V2::CMD.shift);
                }
            }
            PMC_PCR => {
                let pid = PCR::PID.read(value);
                self.pid.set(pid);
                if PCR::CMD.is_set(value) {
                    self.pcrs.borrow_mut()[pid as usize] = Self::pcr_config(value);
                }
            }
            PMC_SCER => self.preset(PMC_SCSR, self.peek(PMC_SCSR) | value),
            PMC_SCDR => self.preset(PMC_SCSR, self.peek(PMC_SCSR) & !value),
            _ => self.preset(offset, value),
        }
    }

    fn delay_us(&self, us: u32) {
        self.delays.borrow_mut().push(us);
    }
}
