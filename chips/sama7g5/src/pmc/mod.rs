// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Power Management Controller clock tree.
//!
//! The PMC derives every clock of the SoC from a handful of oscillators
//! through fractional PLLs, dividers, master clocks and per-peripheral
//! gates. [`ClockTree`] models that graph from a static table of
//! [`ClockDesc`] rows, reads back what the boot loader left running, and
//! then serves rate, parent and gate requests for any node.
//!
//! Usage
//! -----
//!
//! ```rust,ignore
//! let pmc = unsafe { PmcMmio::new(sama7g5::PMC_BASE) };
//! let clocks = ClockTree::new(pmc, sama7g5::CLOCKS, PmcConfig::DEFAULT)?;
//!
//! let flexcom = clocks.find("flex3_gclk").ok_or(ClockError::UnknownParent)?;
//! clocks.set_rate(flexcom, 100_000_000)?;
//! clocks.enable(flexcom)?;
//! debug!("flexcom3 runs at {} Hz", clocks.get_rate(flexcom));
//! ```
//!
//! Every parent named by a row must come earlier in the table, so any table
//! the tree accepts is acyclic and already in dependency order. Hardware
//! state is read back in that order; PLLs that are already locked keep the
//! setting they run with.
//!
//! Enables are reference counted. Enabling a clock enables its current
//! parent chain first; the hardware is only touched on the first enable and
//! the last disable. Clocks flagged [`ClockFlags::CRITICAL`] are enabled
//! once when the tree is built and never gated in hardware.

mod error;
pub mod io;
mod main_osc;
pub mod master;
pub mod node;
pub mod peripheral;
pub mod pll;
pub mod programmable;
pub mod regs;

#[cfg(test)]
pub(crate) mod testing;

use log::{debug, log, warn, Level};

pub use self::error::ClockError;
pub use self::io::{PmcMmio, RegisterAdapter};
pub use self::node::{
    ClockCategory, ClockDesc, ClockFlags, ClockKind, ClockRange, DivPllLayout,
    MasterCharacteristics, ParentDesc, PllCharacteristics, MAX_CLOCKS, MAX_PARENTS,
};

use self::node::ClockNode;
use self::pll::FracSetting;
use crate::config::PmcConfig;

/// Longest parent chain the resolver expects to walk.
const MAX_DEPTH: usize = 16;

/// Handle to one clock of a [`ClockTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockIndex(usize);

impl ClockIndex {
    /// Position of the clock in the table the tree was built from.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Register values chosen for a rate request, not yet applied.
#[derive(Clone, Copy, Debug)]
enum RatePlan {
    Frac(FracSetting),
    Div { div: u32, rate: u32 },
    /// A divider that also retunes the fractional core feeding it.
    DivWithCore { div: u32, core: FracSetting, rate: u32 },
    Mux { parent: usize, div: u32, rate: u32 },
}

impl RatePlan {
    fn rate(&self) -> u32 {
        match *self {
            RatePlan::Frac(setting) => setting.rate,
            RatePlan::Div { rate, .. }
            | RatePlan::DivWithCore { rate, .. }
            | RatePlan::Mux { rate, .. } => rate,
        }
    }
}

pub struct ClockTree<'a, R: RegisterAdapter> {
    io: R,
    table: &'a [ClockDesc],
    nodes: [ClockNode; MAX_CLOCKS],
    config: PmcConfig,
}

impl<'a, R: RegisterAdapter> ClockTree<'a, R> {
    /// Build the tree for `table` and load the state the hardware is in.
    pub fn new(io: R, table: &'a [ClockDesc], config: PmcConfig) -> Result<Self, ClockError> {
        if table.len() > MAX_CLOCKS {
            return Err(ClockError::TooManyClocks);
        }

        const EMPTY: ClockNode = ClockNode::new();
        let mut nodes = [EMPTY; MAX_CLOCKS];

        for (index, desc) in table.iter().enumerate() {
            if table[..index].iter().any(|other| other.name == desc.name) {
                return Err(ClockError::DuplicateClock);
            }
            if desc.parents.len() > MAX_PARENTS {
                return Err(ClockError::TooManyParents);
            }
            if desc
                .changeable_parent
                .is_some_and(|parent| parent >= desc.parents.len())
            {
                return Err(ClockError::InvalidParentIndex);
            }

            let mut resolved = [0u8; MAX_PARENTS];
            for (slot, parent) in resolved.iter_mut().zip(desc.parents) {
                *slot = match table.iter().position(|other| other.name == parent.name) {
                    Some(position) if position < index => position as u8,
                    Some(_) => return Err(ClockError::InvalidTopology),
                    None => return Err(ClockError::UnknownParent),
                };
            }
            nodes[index].set_parents(&resolved[..desc.parents.len()]);
        }

        let tree = ClockTree {
            io,
            table,
            nodes,
            config,
        };

        for (index, desc) in table.iter().enumerate() {
            tree.read_back(index)?;
            debug!("pmc: {} at {} Hz", desc.name, tree.rate_of(index, 0));
        }
        for (index, desc) in table.iter().enumerate() {
            if desc.flags.contains(ClockFlags::CRITICAL) {
                tree.enable_index(index)?;
            }
        }

        Ok(tree)
    }

    pub fn find(&self, name: &str) -> Option<ClockIndex> {
        self.table
            .iter()
            .position(|desc| desc.name == name)
            .map(ClockIndex)
    }

    /// Look a clock up the way consumers name it: by family and hardware id.
    ///
    /// Core clocks share ids across kinds, so they are only found by name and
    /// `ClockCategory::Core` always returns `None`.
    pub fn find_by_id(&self, category: ClockCategory, id: u32) -> Option<ClockIndex> {
        if category == ClockCategory::Core {
            return None;
        }
        self.table
            .iter()
            .position(|desc| desc.kind.category() == category && desc.id == id)
            .map(ClockIndex)
    }

    pub fn name(&self, clk: ClockIndex) -> &'static str {
        self.table[clk.0].name
    }

    /// Every clock of the tree, in table order.
    pub fn clocks(&self) -> impl Iterator<Item = ClockIndex> {
        (0..self.table.len()).map(ClockIndex)
    }

    pub fn get_rate(&self, clk: ClockIndex) -> u32 {
        self.rate_of(clk.0, 0)
    }

    /// Rate `set_rate` would give for `rate`, without touching anything.
    pub fn round_rate(&self, clk: ClockIndex, rate: u32) -> Result<u32, ClockError> {
        self.plan_rate(clk.0, rate).map(|plan| plan.rate())
    }

    /// Retune `clk` as close to `rate` as it can get, returning the rate it
    /// now runs at.
    pub fn set_rate(&self, clk: ClockIndex, rate: u32) -> Result<u32, ClockError> {
        let desc = &self.table[clk.0];
        let node = &self.nodes[clk.0];

        if desc.flags.contains(ClockFlags::SET_RATE_GATE) && node.is_enabled() {
            return Err(ClockError::Busy);
        }
        let plan = self.plan_rate(clk.0, rate)?;
        self.commit_rate(clk.0, plan)?;

        log!(
            self.trace_level(),
            "pmc: {} set to {} Hz ({} Hz requested)",
            desc.name,
            plan.rate(),
            rate
        );
        Ok(plan.rate())
    }

    pub fn enable(&self, clk: ClockIndex) -> Result<(), ClockError> {
        self.enable_index(clk.0)
    }

    pub fn disable(&self, clk: ClockIndex) {
        self.disable_index(clk.0)
    }

    pub fn is_enabled(&self, clk: ClockIndex) -> bool {
        self.nodes[clk.0].is_enabled()
    }

    pub fn get_parent(&self, clk: ClockIndex) -> Option<ClockIndex> {
        self.nodes[clk.0].current_parent().map(ClockIndex)
    }

    /// Switch `clk` to the candidate parent at logical position `parent`.
    ///
    /// The hardware receives the select code declared for that position.
    pub fn set_parent(&self, clk: ClockIndex, parent: usize) -> Result<(), ClockError> {
        let index = clk.0;
        let desc = &self.table[index];
        let node = &self.nodes[index];

        if !desc.kind.is_mux() {
            return Err(ClockError::NotSupported);
        }
        if parent >= node.num_parents() {
            return Err(ClockError::InvalidParentIndex);
        }
        if parent == node.parent.get() {
            return Ok(());
        }
        if desc.flags.contains(ClockFlags::SET_PARENT_GATE)
            && node.is_enabled()
            && desc.changeable_parent != Some(parent)
        {
            return Err(ClockError::Busy);
        }

        let io = &self.io;
        let retries = self.config.poll_retries;
        let code = desc.parents[parent].code;
        let div = node.div.get();
        match desc.kind {
            ClockKind::MainMux => {
                self.reparent(index, parent, || main_osc::mux_select(io, code, retries))?
            }
            ClockKind::MasterPres(_) => self.reparent(index, parent, || {
                master::pres_commit(io, code, div, true, retries)
            })?,
            ClockKind::MasterX => self.reparent(index, parent, || {
                if node.is_enabled() {
                    master::mckx_enable(io, desc.id, code, div, retries)
                } else {
                    Ok(())
                }
            })?,
            ClockKind::Programmable => self.reparent(index, parent, || {
                programmable::prog_select(io, desc.id, code);
                Ok(())
            })?,
            ClockKind::Generated => self.reparent(index, parent, || {
                peripheral::gck_write(io, desc.id, code, div, node.is_enabled());
                Ok(())
            })?,
            _ => return Err(ClockError::NotSupported),
        }

        log!(
            self.trace_level(),
            "pmc: {} now fed by {}",
            desc.name,
            desc.parents[parent].name
        );
        Ok(())
    }

    fn trace_level(&self) -> Level {
        if self.config.trace_rate_changes {
            Level::Info
        } else {
            Level::Debug
        }
    }

    fn parent_rate(&self, index: usize) -> u32 {
        self.nodes[index]
            .current_parent()
            .map_or(0, |parent| self.rate_of(parent, 0))
    }

    fn candidate_rate(&self, index: usize, parent: usize) -> u32 {
        self.nodes[index]
            .parent_at(parent)
            .map_or(0, |parent| self.rate_of(parent, 0))
    }

    /// Rate feeding fractional core `index`, which must lie in its input
    /// range.
    fn core_input_rate(
        &self,
        index: usize,
        charac: &PllCharacteristics,
    ) -> Result<u32, ClockError> {
        let rate = self.parent_rate(index);
        if rate == 0 {
            return Err(ClockError::MissingParentRate);
        }
        if !charac.input.contains(rate) {
            return Err(ClockError::RateOutOfRange);
        }
        Ok(rate)
    }

    fn rate_of(&self, index: usize, depth: usize) -> u32 {
        debug_assert!(depth < MAX_DEPTH, "clock parent chain too deep");
        let parent_rate = match self.nodes[index].current_parent() {
            Some(parent) => self.rate_of(parent, depth + 1),
            None => 0,
        };
        self.recalc(index, parent_rate)
    }

    fn recalc(&self, index: usize, parent_rate: u32) -> u32 {
        let desc = &self.table[index];
        let node = &self.nodes[index];
        match desc.kind {
            ClockKind::External => self.config.external_rate(desc.name).unwrap_or(0),
            ClockKind::Fixed { rate } | ClockKind::MainRcOsc { rate } => rate,
            ClockKind::MainOsc | ClockKind::MainMux | ClockKind::System | ClockKind::Peripheral => {
                parent_rate
            }
            ClockKind::FracPll(_) => pll::frac_rate(parent_rate, node.mul.get(), node.frac.get()),
            ClockKind::DivPll(layout) => pll::div_rate(layout, parent_rate, node.div.get()),
            ClockKind::MasterPres(_) | ClockKind::MasterX => {
                master::pres_rate(parent_rate, node.div.get())
            }
            ClockKind::MasterDiv(charac) => master::mdiv_rate(charac, parent_rate, node.div.get()),
            ClockKind::Programmable => programmable::prog_rate(parent_rate, node.div.get()),
            ClockKind::Generated => peripheral::gck_rate(parent_rate, node.div.get()),
        }
    }

    /// Point `index` at the parent declared with select code `code`.
    fn select_code(&self, index: usize, code: u32) {
        let desc = &self.table[index];
        let parent = match desc.parent_index_of_code(code) {
            Some(parent) => parent,
            None => {
                warn!("pmc: {} runs from undeclared source {}", desc.name, code);
                0
            }
        };
        self.nodes[index].parent.set(parent);
    }

    fn current_code(&self, index: usize) -> u32 {
        self.table[index]
            .parents
            .get(self.nodes[index].parent.get())
            .map_or(0, |parent| parent.code)
    }

    fn read_back(&self, index: usize) -> Result<(), ClockError> {
        let desc = &self.table[index];
        let node = &self.nodes[index];
        let io = &self.io;

        match desc.kind {
            ClockKind::External => match self.config.external_rate(desc.name) {
                Some(rate) if rate != 0 => {}
                _ => return Err(ClockError::MissingParentRate),
            },
            ClockKind::Fixed { .. }
            | ClockKind::MainRcOsc { .. }
            | ClockKind::MainOsc
            | ClockKind::System
            | ClockKind::Peripheral => {}
            ClockKind::MainMux => self.select_code(index, main_osc::mux_read_back(io)),
            ClockKind::FracPll(charac) => {
                if !pll::frac_read_back(io, desc.id, node) {
                    // Not set up by the boot loader. Park the core at its
                    // lowest rate until a rate is requested.
                    let setting = pll::compute_mul_frac(
                        charac.core_output,
                        charac.core_output.min,
                        self.core_input_rate(index, charac)?,
                    )?;
                    node.mul.set(setting.mul);
                    node.frac.set(setting.frac);
                }
            }
            ClockKind::DivPll(layout) => pll::div_read_back(io, desc.id, layout, node),
            ClockKind::MasterPres(_) => {
                let (css, pres, _) = master::mckr_read_back(io);
                self.select_code(index, css);
                node.div.set(pres);
            }
            ClockKind::MasterDiv(_) => {
                let (_, _, mdiv) = master::mckr_read_back(io);
                node.div.set(mdiv);
            }
            ClockKind::MasterX => {
                let (css, div) = master::mckx_read_back(io, desc.id);
                self.select_code(index, css);
                node.div.set(div);
            }
            ClockKind::Programmable => {
                let (css, pres) = programmable::prog_read_back(io, desc.id);
                self.select_code(index, css);
                node.div.set(pres);
            }
            ClockKind::Generated => {
                let (css, div) = peripheral::gck_read_back(io, desc.id);
                self.select_code(index, css);
                node.div.set(div);
            }
        }
        Ok(())
    }

    /// The fractional core feeding divider `index`, if that is its parent.
    fn core_of(&self, index: usize) -> Option<(usize, &'static PllCharacteristics)> {
        let core = self.nodes[index].current_parent()?;
        match self.table[core].kind {
            ClockKind::FracPll(charac) => Some((core, charac)),
            _ => None,
        }
    }

    fn plan_rate(&self, index: usize, rate: u32) -> Result<RatePlan, ClockError> {
        let desc = &self.table[index];
        let node = &self.nodes[index];

        if !desc.range.contains(rate) {
            return Err(ClockError::RateOutOfRange);
        }
        let parent_rate = self.parent_rate(index);

        let plan = match desc.kind {
            ClockKind::FracPll(charac) => RatePlan::Frac(pll::compute_mul_frac(
                charac.core_output,
                rate,
                self.core_input_rate(index, charac)?,
            )?),
            ClockKind::DivPll(layout) if layout.fixed_div2 => return Err(ClockError::NotSupported),
            ClockKind::DivPll(layout) => match self.core_of(index) {
                Some((core, charac)) if desc.flags.contains(ClockFlags::SET_RATE_PARENT) => {
                    let (div, setting) = pll::compute_div_and_core(
                        charac.core_output,
                        rate,
                        self.core_input_rate(core, charac)?,
                    )?;
                    RatePlan::DivWithCore {
                        div,
                        core: setting,
                        rate: pll::div_rate(layout, setting.rate, div),
                    }
                }
                _ => {
                    let div = pll::compute_div(rate, parent_rate)?;
                    RatePlan::Div {
                        div,
                        rate: pll::div_rate(layout, parent_rate, div),
                    }
                }
            },
            ClockKind::MasterPres(_) => {
                let mut rates = [0u32; MAX_PARENTS];
                for (parent, slot) in rates.iter_mut().enumerate().take(node.num_parents()) {
                    *slot = self.candidate_rate(index, parent);
                }
                let choice =
                    master::best_pres(rate, &rates[..node.num_parents()], node.parent.get())?;
                RatePlan::Mux {
                    parent: choice.parent,
                    div: choice.code,
                    rate: choice.rate,
                }
            }
            ClockKind::MasterDiv(charac) => {
                let code = master::mdiv_code(charac, rate, parent_rate)?;
                let achieved = master::mdiv_rate(charac, parent_rate, code);
                if !charac.output.contains(achieved) {
                    return Err(ClockError::RateOutOfRange);
                }
                RatePlan::Div {
                    div: code,
                    rate: achieved,
                }
            }
            ClockKind::MasterX => {
                let code = master::pres_code(rate, parent_rate)?;
                RatePlan::Mux {
                    parent: node.parent.get(),
                    div: code,
                    rate: master::pres_rate(parent_rate, code),
                }
            }
            ClockKind::Programmable => {
                let pres = programmable::prog_pres(rate, parent_rate)?;
                RatePlan::Mux {
                    parent: node.parent.get(),
                    div: pres,
                    rate: programmable::prog_rate(parent_rate, pres),
                }
            }
            ClockKind::Generated => {
                // A running generated clock may only move to its changeable
                // parent.
                let current = node.parent.get();
                let candidates = (0..node.num_parents())
                    .filter(|&parent| {
                        !node.is_enabled()
                            || parent == current
                            || desc.changeable_parent == Some(parent)
                    })
                    .map(|parent| (parent, self.candidate_rate(index, parent)));
                let choice = peripheral::best_gck(rate, desc.range, candidates)?;
                RatePlan::Mux {
                    parent: choice.parent,
                    div: choice.div,
                    rate: choice.rate,
                }
            }
            _ => return Err(ClockError::NotSupported),
        };

        if !desc.range.contains(plan.rate()) {
            return Err(ClockError::RateOutOfRange);
        }
        Ok(plan)
    }

    fn commit_rate(&self, index: usize, plan: RatePlan) -> Result<(), ClockError> {
        let desc = &self.table[index];
        let node = &self.nodes[index];
        let io = &self.io;
        let retries = self.config.poll_retries;

        match (desc.kind, plan) {
            (ClockKind::FracPll(charac), RatePlan::Frac(setting)) => {
                node.mul.set(setting.mul);
                node.frac.set(setting.frac);
                if node.is_enabled() {
                    pll::frac_enable(io, desc.id, charac, node, retries)?;
                }
            }
            (ClockKind::DivPll(layout), RatePlan::DivWithCore { div, core: setting, .. }) => {
                let (core, charac) = self.core_of(index).ok_or(ClockError::NotSupported)?;
                let core_desc = &self.table[core];
                let core_node = &self.nodes[core];
                let retune =
                    (core_node.mul.get(), core_node.frac.get()) != (setting.mul, setting.frac);

                if retune
                    && core_node.is_enabled()
                    && core_desc.flags.contains(ClockFlags::SET_RATE_GATE)
                {
                    return Err(ClockError::Busy);
                }

                if retune {
                    if node.is_enabled() && layout.safe_div > node.div.get() {
                        // The field is written before any lock wait, so the
                        // node follows it even if a later step fails.
                        node.div.set(layout.safe_div);
                        pll::div_enable(io, desc.id, layout, layout.safe_div, retries)?;
                    }
                    core_node.mul.set(setting.mul);
                    core_node.frac.set(setting.frac);
                    if core_node.is_enabled() {
                        pll::frac_enable(io, core_desc.id, charac, core_node, retries)?;
                    }
                    log!(
                        self.trace_level(),
                        "pmc: {} retuned to {} Hz",
                        core_desc.name,
                        setting.rate
                    );
                }

                node.div.set(div);
                if node.is_enabled() {
                    pll::div_enable(io, desc.id, layout, div, retries)?;
                }
            }
            (ClockKind::DivPll(layout), RatePlan::Div { div, .. }) => {
                node.div.set(div);
                if node.is_enabled() {
                    pll::div_enable(io, desc.id, layout, div, retries)?;
                }
            }
            (ClockKind::MasterPres(_), RatePlan::Mux { parent, div, .. }) => {
                let source_changed = parent != node.parent.get();
                let css = desc.parents[parent].code;
                self.reparent(index, parent, || {
                    master::pres_commit(io, css, div, source_changed, retries)
                })?;
                node.div.set(div);
            }
            (ClockKind::MasterDiv(_), RatePlan::Div { div, .. }) => {
                master::mdiv_commit(io, div, retries)?;
                node.div.set(div);
            }
            // Only reachable while disabled; applied on the next enable.
            (ClockKind::MasterX, RatePlan::Mux { div, .. }) => node.div.set(div),
            (ClockKind::Programmable, RatePlan::Mux { div, .. }) => {
                programmable::prog_set_pres(io, desc.id, div);
                node.div.set(div);
            }
            (ClockKind::Generated, RatePlan::Mux { parent, div, .. }) => {
                let css = desc.parents[parent].code;
                self.reparent(index, parent, || {
                    peripheral::gck_write(io, desc.id, css, div, node.is_enabled());
                    Ok(())
                })?;
                node.div.set(div);
            }
            _ => return Err(ClockError::NotSupported),
        }
        Ok(())
    }

    /// Run `apply` to switch `index` to logical parent `parent`, moving the
    /// enable reference from the old parent to the new one if `index` is
    /// enabled.
    fn reparent<F>(&self, index: usize, parent: usize, apply: F) -> Result<(), ClockError>
    where
        F: FnOnce() -> Result<(), ClockError>,
    {
        let node = &self.nodes[index];
        let new = node
            .parent_at(parent)
            .ok_or(ClockError::InvalidParentIndex)?;
        let old = node.current_parent();
        let moving = node.is_enabled() && old != Some(new);

        if moving {
            self.enable_index(new)?;
        }
        if let Err(err) = apply() {
            if moving {
                self.disable_index(new);
            }
            return Err(err);
        }
        node.parent.set(parent);
        if moving {
            if let Some(old) = old {
                self.disable_index(old);
            }
        }
        Ok(())
    }

    fn enable_index(&self, index: usize) -> Result<(), ClockError> {
        let node = &self.nodes[index];
        let count = node.enable_count.get();
        if count > 0 {
            node.enable_count.set(count + 1);
            return Ok(());
        }

        let parent = node.current_parent();
        if let Some(parent) = parent {
            self.enable_index(parent)?;
        }
        if let Err(err) = self.hw_enable(index) {
            warn!("pmc: enabling {} failed: {}", self.table[index].name, err);
            if let Some(parent) = parent {
                self.disable_index(parent);
            }
            return Err(err);
        }

        node.enable_count.set(1);
        debug!("pmc: {} enabled", self.table[index].name);
        Ok(())
    }

    fn disable_index(&self, index: usize) {
        let desc = &self.table[index];
        let node = &self.nodes[index];

        match node.enable_count.get() {
            0 => warn!("pmc: {} disabled more often than enabled", desc.name),
            1 => {
                node.enable_count.set(0);
                if !desc.flags.contains(ClockFlags::CRITICAL) {
                    self.hw_disable(index);
                    debug!("pmc: {} disabled", desc.name);
                }
                if let Some(parent) = node.current_parent() {
                    self.disable_index(parent);
                }
            }
            count => node.enable_count.set(count - 1),
        }
    }

    fn hw_enable(&self, index: usize) -> Result<(), ClockError> {
        let desc = &self.table[index];
        let node = &self.nodes[index];
        let io = &self.io;
        let retries = self.config.poll_retries;

        match desc.kind {
            ClockKind::External
            | ClockKind::Fixed { .. }
            | ClockKind::MainMux
            | ClockKind::MasterPres(_)
            | ClockKind::MasterDiv(_)
            | ClockKind::Programmable => Ok(()),
            ClockKind::MainRcOsc { .. } => main_osc::rc_enable(io, retries),
            ClockKind::MainOsc => main_osc::osc_enable(io, self.config.osc_bypass, retries),
            ClockKind::FracPll(charac) => pll::frac_enable(io, desc.id, charac, node, retries),
            ClockKind::DivPll(layout) => {
                pll::div_enable(io, desc.id, layout, node.div.get(), retries)
            }
            ClockKind::MasterX => master::mckx_enable(
                io,
                desc.id,
                self.current_code(index),
                node.div.get(),
                retries,
            ),
            ClockKind::System => programmable::system_enable(io, desc.id, retries),
            ClockKind::Peripheral => {
                if self.parent_rate(index) > desc.range.max {
                    return Err(ClockError::RateOutOfRange);
                }
                peripheral::periph_enable(io, desc.id);
                Ok(())
            }
            ClockKind::Generated => {
                peripheral::gck_write(io, desc.id, self.current_code(index), node.div.get(), true);
                Ok(())
            }
        }
    }

    fn hw_disable(&self, index: usize) {
        let desc = &self.table[index];
        let io = &self.io;

        match desc.kind {
            ClockKind::MainRcOsc { .. } => main_osc::rc_disable(io),
            ClockKind::MainOsc => main_osc::osc_disable(io, self.config.osc_bypass),
            ClockKind::FracPll(charac) => pll::frac_disable(io, desc.id, charac),
            ClockKind::DivPll(layout) => pll::div_disable(io, desc.id, layout),
            ClockKind::MasterX => master::mckx_disable(io, desc.id),
            ClockKind::System => programmable::system_disable(io, desc.id),
            ClockKind::Peripheral => peripheral::periph_disable(io, desc.id),
            ClockKind::Generated => peripheral::gck_write(
                io,
                desc.id,
                self.current_code(index),
                self.nodes[index].div.get(),
                false,
            ),
            _ => {}
        }
    }
}
