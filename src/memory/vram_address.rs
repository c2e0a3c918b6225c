use std::fmt;
use std::str::FromStr;

use crate::memory::vram_bank::VramBank;

// Addresses are compared after dropping the cache-through bits, so 0x25E0_0000 and
// 0x05E0_0000 name the same VRAM byte.
const CACHE_THROUGH_MASK: u32 = 0x0FFF_FFFF;

pub const VRAM_START: u32 = 0x05E0_0000;
pub const CRAM_START: u32 = 0x05F0_0000;
pub const CRAM_END: u32 = 0x05F7_FFFF;

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum VramSize {
    #[default]
    FourMbit,
    EightMbit,
}

impl VramSize {
    pub const fn byte_len(self) -> u32 {
        match self {
            VramSize::FourMbit => 0x8_0000,
            VramSize::EightMbit => 0x10_0000,
        }
    }

    pub const fn end(self) -> u32 {
        VRAM_START + self.byte_len() - 1
    }

    const fn bank_shift(self) -> u32 {
        match self {
            // 128 KiB per bank.
            VramSize::FourMbit => 17,
            // 256 KiB per bank.
            VramSize::EightMbit => 18,
        }
    }
}

impl fmt::Display for VramSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VramSize::FourMbit => write!(f, "4-Mbit"),
            VramSize::EightMbit => write!(f, "8-Mbit"),
        }
    }
}

impl FromStr for VramSize {
    type Err = String;

    fn from_str(value: &str) -> Result<VramSize, String> {
        match value.to_lowercase().as_str() {
            "4" | "4mbit" | "4-mbit" => Ok(VramSize::FourMbit),
            "8" | "8mbit" | "8-mbit" => Ok(VramSize::EightMbit),
            _ => Err(format!("Invalid VRAM size: {value}")),
        }
    }
}

/// A lead address that has been proven to lie inside VRAM.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct VramAddress {
    offset: u32,
    size: VramSize,
}

impl VramAddress {
    pub fn new(raw: u32, size: VramSize) -> Option<VramAddress> {
        let masked = raw & CACHE_THROUGH_MASK;
        if (VRAM_START..=size.end()).contains(&masked) {
            Some(VramAddress { offset: masked - VRAM_START, size })
        } else {
            None
        }
    }

    /// The lead address of `offset` bytes into `bank`, the same as the VRAM_ADDR_4MBIT
    /// helper games use when laying out planes.
    pub fn in_bank(bank: VramBank, offset: u32, size: VramSize) -> Option<VramAddress> {
        let bank_base = (bank as u32) << size.bank_shift();
        if offset >= 1 << size.bank_shift() {
            return None;
        }

        VramAddress::new(VRAM_START + bank_base + offset, size)
    }

    pub fn bank(self) -> VramBank {
        VramBank::from_index(self.offset >> self.size.bank_shift())
    }

    pub fn to_u32(self) -> u32 {
        VRAM_START + self.offset
    }
}

impl fmt::Display for VramAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X} (bank {})", self.to_u32(), self.bank())
    }
}

pub fn is_cram_address(raw: u32) -> bool {
    (CRAM_START..=CRAM_END).contains(&(raw & CACHE_THROUGH_MASK))
}

#[cfg(test)]
mod tests {
    use enum_iterator::all;

    use super::*;

    #[test]
    fn bank_boundaries_4mbit() {
        let size = VramSize::FourMbit;
        assert_eq!(VramAddress::new(0x05E0_0000, size).unwrap().bank(), VramBank::A0);
        assert_eq!(VramAddress::new(0x05E1_FFFF, size).unwrap().bank(), VramBank::A0);
        assert_eq!(VramAddress::new(0x05E2_0000, size).unwrap().bank(), VramBank::A1);
        assert_eq!(VramAddress::new(0x05E4_0000, size).unwrap().bank(), VramBank::B0);
        assert_eq!(VramAddress::new(0x05E7_FFFF, size).unwrap().bank(), VramBank::B1);
    }

    #[test]
    fn bank_boundaries_8mbit() {
        let size = VramSize::EightMbit;
        assert_eq!(VramAddress::new(0x05E3_FFFF, size).unwrap().bank(), VramBank::A0);
        assert_eq!(VramAddress::new(0x05E4_0000, size).unwrap().bank(), VramBank::A1);
        assert_eq!(VramAddress::new(0x05EC_0000, size).unwrap().bank(), VramBank::B1);
    }

    #[test]
    fn cache_through_mirror_resolves() {
        let size = VramSize::FourMbit;
        assert_eq!(VramAddress::new(0x25E6_0000, size), VramAddress::new(0x05E6_0000, size));
    }

    #[test]
    fn outside_vram_is_rejected() {
        assert_eq!(VramAddress::new(0x0000_0000, VramSize::FourMbit), None);
        assert_eq!(VramAddress::new(0x05E8_0000, VramSize::FourMbit), None);
        assert!(VramAddress::new(0x05E8_0000, VramSize::EightMbit).is_some());
        assert_eq!(VramAddress::new(0x05F0_0000, VramSize::EightMbit), None);
    }

    #[test]
    fn bank_is_total_over_vram() {
        for size in [VramSize::FourMbit, VramSize::EightMbit] {
            for raw in (VRAM_START..=size.end()).step_by(0x1000) {
                let bank = VramAddress::new(raw, size).unwrap().bank();
                assert!(all::<VramBank>().any(|b| b == bank));
            }
        }
    }

    #[test]
    fn in_bank_round_trips_through_bank() {
        for bank in all::<VramBank>() {
            let address = VramAddress::in_bank(bank, 0x100, VramSize::FourMbit).unwrap();
            assert_eq!(address.bank(), bank);
        }

        assert_eq!(VramAddress::in_bank(VramBank::A0, 0x2_0000, VramSize::FourMbit), None);
    }

    #[test]
    fn parse_sizes() {
        assert_eq!("8".parse(), Ok(VramSize::EightMbit));
        assert_eq!("4-Mbit".parse(), Ok(VramSize::FourMbit));
        assert!("16".parse::<VramSize>().is_err());
    }

    #[test]
    fn cram_window() {
        assert!(is_cram_address(0x05F0_0000));
        assert!(is_cram_address(0x25F0_0200));
        assert!(!is_cram_address(0x05E0_0000));
        assert!(!is_cram_address(0x05F8_0000));
    }
}
