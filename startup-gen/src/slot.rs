//! Vector slot numbering.
//!
//! Core exceptions use negative interrupt numbers (-16..-1) and NVIC interrupts count up from 0.
//! A `Slot` offsets both by 16 so they share one zero-based index space.

use std::fmt;

/// Offset between an interrupt number and its slot.
pub const SLOT_OFFSET: i16 = 16;

/// Number of interrupt vectors the NVIC can address.
pub const NVIC_VECTORS: u16 = 496;

/// Lowest and highest interrupt numbers a slot can hold.
pub const MIN_IRQN: i16 = -SLOT_OFFSET;
pub const MAX_IRQN: i16 = NVIC_VECTORS as i16 - 1;

/// Slots 2..=15 hold the core exceptions emitted into the vector table.
pub const FIRST_CORE_SLOT: u16 = 2;
pub const LAST_CORE_SLOT: u16 = 15;

/// Slot of the reset vector, always bound to `Reset_Handler`.
pub const RESET_SLOT: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(u16);

impl Slot {
    /// Slot for an interrupt number, or `None` outside `MIN_IRQN..=MAX_IRQN`.
    pub fn from_irqn(irqn: i64) -> Option<Slot> {
        if irqn < i64::from(MIN_IRQN) || irqn > i64::from(MAX_IRQN) {
            return None;
        }
        Some(Slot((irqn + i64::from(SLOT_OFFSET)) as u16))
    }

    pub fn nvic(index: u16) -> Option<Slot> {
        if index < NVIC_VECTORS {
            Some(Slot(index + SLOT_OFFSET as u16))
        } else {
            None
        }
    }

    /// Core slot in `0..16`.
    pub fn core(slot: u16) -> Option<Slot> {
        if slot < SLOT_OFFSET as u16 {
            Some(Slot(slot))
        } else {
            None
        }
    }

    #[inline]
    pub fn index(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn irqn(self) -> i16 {
        self.0 as i16 - SLOT_OFFSET
    }

    #[inline]
    pub fn is_core(self) -> bool {
        self.0 < SLOT_OFFSET as u16
    }

    pub fn nvic_index(self) -> Option<u16> {
        if self.is_core() {
            None
        } else {
            Some(self.0 - SLOT_OFFSET as u16)
        }
    }

    /// CMSIS short base name for the core slots that have one.
    pub fn standard_name(self) -> Option<&'static str> {
        match self.0 {
            2 => Some("NMI_"),
            4 => Some("MemManage_"),
            11 => Some("SVC_"),
            12 => Some("DebugMon_"),
            _ => None,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "slot {} (IRQn {})", self.0, self.irqn())
    }
}
