//! Interrupt name table and the vector count policy applied to it.

use log::debug;
use std::collections::BTreeMap;
use std::ops::Range;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::slot::{Slot, FIRST_CORE_SLOT, LAST_CORE_SLOT, NVIC_VECTORS};

/// `max_irqn` before any entry has been stored.
pub const NONE_SEEN: i16 = -15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrqTable {
    names: BTreeMap<Slot, String>,
    max_irqn: i16,
}

impl Default for IrqTable {
    fn default() -> IrqTable {
        IrqTable {
            names: BTreeMap::new(),
            max_irqn: NONE_SEEN,
        }
    }
}

impl IrqTable {
    pub fn new() -> IrqTable {
        IrqTable::default()
    }

    /// Store `name` for `slot`, replacing any earlier name.
    pub fn insert<S: Into<String>>(&mut self, slot: Slot, name: S) -> Option<String> {
        self.max_irqn = self.max_irqn.max(slot.irqn());
        self.names.insert(slot, name.into())
    }

    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.names.get(&slot).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, &str)> {
        self.names.iter().map(|(&slot, name)| (slot, name.as_str()))
    }

    /// Highest interrupt number stored so far, `NONE_SEEN` for an empty table.
    pub fn max_irqn(&self) -> i16 {
        self.max_irqn
    }

    /// Number of NVIC interrupts the header declares.
    pub fn mcu_vectors(&self) -> u16 {
        (self.max_irqn + 1).max(0) as u16
    }

    /// Apply the vector count policy of `config`.
    pub fn resolve(self, config: &Config) -> Result<ResolvedTable> {
        let mcu_vectors = self.mcu_vectors();
        let requested = match config.requested_vectors {
            Some(count) if count > NVIC_VECTORS => return Err(Error::VectorCountOutOfRange(count)),
            Some(count) if count > mcu_vectors && !config.emit_unused => {
                debug!("clamping {} requested vectors to the {} the MCU defines", count, mcu_vectors);
                Some(mcu_vectors)
            },
            other => other,
        };
        let vector_count = requested.unwrap_or(mcu_vectors);
        debug!("resolved {} NVIC vectors ({} named entries)", vector_count, self.len());
        Ok(ResolvedTable {
            table: self,
            mcu_vectors,
            requested_vectors: requested,
            vector_count,
        })
    }
}

/// The table bounded to the vectors that will be emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTable {
    table: IrqTable,
    mcu_vectors: u16,
    requested_vectors: Option<u16>,
    vector_count: u16,
}

impl ResolvedTable {
    pub fn table(&self) -> &IrqTable {
        &self.table
    }

    pub fn mcu_vectors(&self) -> u16 {
        self.mcu_vectors
    }

    /// Requested vector count after clamping.
    pub fn requested_vectors(&self) -> Option<u16> {
        self.requested_vectors
    }

    /// Number of NVIC vectors to emit.
    pub fn vector_count(&self) -> u16 {
        self.vector_count
    }

    pub fn nvic_range(&self) -> Range<u16> {
        0..self.vector_count
    }

    /// Vendor-named core slots that appear in the vector table.
    pub fn core_names(&self) -> impl Iterator<Item = (Slot, &str)> {
        self.table
            .iter()
            .filter(|&(slot, _)| slot.index() >= FIRST_CORE_SLOT && slot.index() <= LAST_CORE_SLOT)
    }

    /// Vendor name of NVIC interrupt `index`, if it is inside the emitted range.
    pub fn nvic_name(&self, index: u16) -> Option<&str> {
        if index >= self.vector_count {
            return None;
        }
        Slot::nvic(index).and_then(|slot| self.table.get(slot))
    }
}
