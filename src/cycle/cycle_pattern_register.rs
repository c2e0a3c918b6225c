use std::fmt;
use std::ops::{Index, IndexMut};

use enum_iterator::all;
use modular_bitfield::prelude::*;

use crate::cycle::access_type::AccessType;
use crate::memory::vram_bank::VramBank;

/// Eight 4-bit access timings. T0 is the least significant nibble of the packed value.
#[bitfield]
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct CyclePatternRegister {
    pub t0: B4,
    pub t1: B4,
    pub t2: B4,
    pub t3: B4,
    pub t4: B4,
    pub t5: B4,
    pub t6: B4,
    pub t7: B4,
}

impl CyclePatternRegister {
    pub const SLOT_COUNT: usize = 8;

    pub fn all_no_access() -> CyclePatternRegister {
        CyclePatternRegister::from_u32(0xFFFF_FFFF)
    }

    pub fn from_u32(value: u32) -> CyclePatternRegister {
        CyclePatternRegister::from_bytes(value.to_le_bytes())
    }

    pub fn to_u32(self) -> u32 {
        u32::from_le_bytes(self.into_bytes())
    }

    /// The raw 4-bit code in timing `slot`.
    pub fn code(self, slot: usize) -> u8 {
        match slot {
            0 => self.t0(),
            1 => self.t1(),
            2 => self.t2(),
            3 => self.t3(),
            4 => self.t4(),
            5 => self.t5(),
            6 => self.t6(),
            7 => self.t7(),
            _ => AccessType::NoAccess.code(),
        }
    }

    /// The access in timing `slot`, or None for a reserved code.
    pub fn slot(self, slot: usize) -> Option<AccessType> {
        AccessType::from_code(self.code(slot))
    }

    pub fn set_slot(&mut self, slot: usize, access: AccessType) {
        let code = access.code();
        match slot {
            0 => self.set_t0(code),
            1 => self.set_t1(code),
            2 => self.set_t2(code),
            3 => self.set_t3(code),
            4 => self.set_t4(code),
            5 => self.set_t5(code),
            6 => self.set_t6(code),
            7 => self.set_t7(code),
            _ => {}
        }
    }

    pub fn is_free(self, slot: usize) -> bool {
        self.slot(slot) == Some(AccessType::NoAccess)
    }

    /// Rewrites every unclaimed timing below `slot_count` as `access`.
    pub fn fill_unclaimed(&mut self, slot_count: usize, access: AccessType) {
        for slot in 0..slot_count.min(Self::SLOT_COUNT) {
            if self.is_free(slot) {
                self.set_slot(slot, access);
            }
        }
    }
}

impl fmt::Display for CyclePatternRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in (0..Self::SLOT_COUNT).rev() {
            let text = self.slot(slot).map_or("---".to_string(), |access| access.to_string());
            write!(f, "{text:<12}")?;
        }

        Ok(())
    }
}

/// One cycle pattern register per VRAM bank.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct CyclePatterns([CyclePatternRegister; 4]);

impl CyclePatterns {
    pub fn all_no_access() -> CyclePatterns {
        CyclePatterns([CyclePatternRegister::all_no_access(); 4])
    }

    pub fn from_values(values: [u32; 4]) -> CyclePatterns {
        CyclePatterns(values.map(CyclePatternRegister::from_u32))
    }

    pub fn values(&self) -> [u32; 4] {
        self.0.map(CyclePatternRegister::to_u32)
    }
}

impl Default for CyclePatterns {
    fn default() -> CyclePatterns {
        CyclePatterns::all_no_access()
    }
}

impl Index<VramBank> for CyclePatterns {
    type Output = CyclePatternRegister;

    fn index(&self, bank: VramBank) -> &CyclePatternRegister {
        &self.0[bank.to_usize()]
    }
}

impl IndexMut<VramBank> for CyclePatterns {
    fn index_mut(&mut self, bank: VramBank) -> &mut CyclePatternRegister {
        &mut self.0[bank.to_usize()]
    }
}

impl fmt::Display for CyclePatterns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<16}", "")?;
        for slot in (0..CyclePatternRegister::SLOT_COUNT).rev() {
            write!(f, "{:<12}", format!("T{slot}"))?;
        }

        writeln!(f)?;
        for bank in all::<VramBank>() {
            let register = self[bank];
            writeln!(f, "{:<16}{}", format!("{bank} 0x{:08X}", register.to_u32()), register)?;
        }

        Ok(())
    }
}
