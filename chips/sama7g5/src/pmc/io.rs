// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Register access boundary of the clock tree.
//!
//! The clock tree never maps memory itself. It is handed a
//! [`RegisterAdapter`] that reads and writes 32-bit PMC registers by offset
//! from a base established once at boot. [`PmcMmio`] is the adapter used on
//! hardware; host tests provide an emulated bank instead.

use tock_registers::fields::{Field, FieldValue};
use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::registers::ReadWrite;
use tock_registers::RegisterLongName;

use super::error::ClockError;
use super::regs::PMC_SIZE;

/// 32-bit register access relative to the PMC base.
pub trait RegisterAdapter {
    fn read32(&self, offset: usize) -> u32;

    fn write32(&self, offset: usize, value: u32);

    /// Read-modify-write: clear the bits in `clear`, then set the bits in
    /// `set`.
    fn clear_set_bits32(&self, offset: usize, clear: u32, set: u32) {
        let value = self.read32(offset);
        self.write32(offset, (value & !clear) | set);
    }

    /// Write only the fields named by `field`, leaving the rest of the
    /// register untouched.
    fn modify<R: RegisterLongName>(&self, offset: usize, field: FieldValue<u32, R>) {
        self.clear_set_bits32(offset, field.mask(), field.value);
    }

    /// Overwrite the whole register with `field`.
    fn write<R: RegisterLongName>(&self, offset: usize, field: FieldValue<u32, R>) {
        self.write32(offset, field.value);
    }

    /// Wait at least `us` microseconds.
    ///
    /// The default spins, counting on the CPU running no faster than
    /// [`MAX_CPU_HZ`]. Adapters with access to a timer should override it.
    fn delay_us(&self, us: u32) {
        let spins = u64::from(us) * u64::from(MAX_CPU_HZ / 1_000_000);
        for _ in 0..spins {
            core::hint::spin_loop();
        }
    }

    fn read_field<R: RegisterLongName>(&self, offset: usize, field: Field<u32, R>) -> u32 {
        field.read(self.read32(offset))
    }

    /// Spin until every bit of `mask` reads as set in the register at
    /// `offset`, giving up after `retries` reads. The register is always
    /// read at least once.
    fn poll_set(&self, offset: usize, mask: u32, retries: u32) -> Result<(), ClockError> {
        for _ in 0..retries.max(1) {
            if self.read32(offset) & mask == mask {
                return Ok(());
            }
            core::hint::spin_loop();
        }
        Err(ClockError::HardwareNotReady)
    }
}

impl<T: RegisterAdapter> RegisterAdapter for &T {
    fn read32(&self, offset: usize) -> u32 {
        (**self).read32(offset)
    }

    fn write32(&self, offset: usize, value: u32) {
        (**self).write32(offset, value);
    }

    fn delay_us(&self, us: u32) {
        (**self).delay_us(us);
    }
}

/// Fastest the SAMA7G5 CPU core can be clocked.
pub const MAX_CPU_HZ: u32 = 1_000_000_000;

const PMC_WORDS: usize = PMC_SIZE / 4;

/// Memory-mapped PMC.
pub struct PmcMmio {
    regs: &'static [ReadWrite<u32>; PMC_WORDS],
}

impl PmcMmio {
    /// # Safety
    ///
    /// `base` must be the address of the PMC register window, mapped
    /// device memory for the rest of the program, and not handed to any
    /// other owner.
    pub unsafe fn new(base: usize) -> PmcMmio {
        PmcMmio {
            regs: &*(base as *const [ReadWrite<u32>; PMC_WORDS]),
        }
    }
}

impl RegisterAdapter for PmcMmio {
    fn read32(&self, offset: usize) -> u32 {
        self.regs[offset / 4].get()
    }

    fn write32(&self, offset: usize, value: u32) {
        self.regs[offset / 4].set(value);
    }
}
