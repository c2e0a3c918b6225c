use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use log::info;
use splitbits::splitbits_named;

use crate::error::CycpError;
use crate::memory::vram_address::{VramAddress, VramSize};
use crate::memory::vram_bank::VramBank;
use crate::screen::screen_format::{ScreenFormat, ScreenLayout};

/*
 * 7654 3210
 * .... abcd
 *      |||+-- B1
 *      ||+--- B0
 *      |+---- A1
 *      +----- A0
 */
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct OccupancyBitmap(u8);

impl OccupancyBitmap {
    pub const EMPTY: OccupancyBitmap = OccupancyBitmap(0b0000);
    pub const ALL: OccupancyBitmap = OccupancyBitmap(0b1111);

    pub const fn from_bits(bits: u8) -> OccupancyBitmap {
        OccupancyBitmap(bits & 0b1111)
    }

    pub fn from_bank(bank: VramBank) -> OccupancyBitmap {
        OccupancyBitmap(bank_bit(bank))
    }

    pub fn from_banks(banks: &[VramBank]) -> OccupancyBitmap {
        banks.iter().fold(OccupancyBitmap::EMPTY, |bitmap, &bank| bitmap | OccupancyBitmap::from_bank(bank))
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, bank: VramBank) {
        self.0 |= bank_bit(bank);
    }

    pub fn intersects(self, other: OccupancyBitmap) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_subset_of(self, other: OccupancyBitmap) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn banks(self) -> Vec<VramBank> {
        let (a0, a1, b0, b1) = splitbits_named!(self.0, "....abcd");
        [(a0, VramBank::A0), (a1, VramBank::A1), (b0, VramBank::B0), (b1, VramBank::B1)]
            .into_iter()
            .filter_map(|(occupied, bank)| occupied.then_some(bank))
            .collect()
    }
}

fn bank_bit(bank: VramBank) -> u8 {
    1 << (3 - bank as u8)
}

impl BitOr for OccupancyBitmap {
    type Output = OccupancyBitmap;

    fn bitor(self, rhs: OccupancyBitmap) -> OccupancyBitmap {
        OccupancyBitmap(self.0 | rhs.0)
    }
}

impl BitOrAssign for OccupancyBitmap {
    fn bitor_assign(&mut self, rhs: OccupancyBitmap) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for OccupancyBitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let banks: Vec<String> = self.banks().iter().map(VramBank::to_string).collect();
        write!(f, "{{{}}}", banks.join(","))
    }
}

/// Which banks the screen's pattern name data lives in. Bitmap and disabled screens
/// have no pattern name data.
pub fn pattern_name_occupancy(format: &ScreenFormat, vram_size: VramSize) -> Result<OccupancyBitmap, CycpError> {
    if !format.enabled {
        return Ok(OccupancyBitmap::EMPTY);
    }

    let ScreenLayout::Cell(cell) = &format.layout else {
        return Ok(OccupancyBitmap::EMPTY);
    };

    let mut bitmap = OccupancyBitmap::EMPTY;
    for &raw in cell.plane_map.lead_addresses().iter().take(format.screen.plane_count()) {
        let address = VramAddress::new(raw, vram_size)
            .ok_or(CycpError::AddressOutOfRange { screen: format.screen, address: raw })?;
        bitmap.insert(address.bank());
    }

    info!(target: "occupancy", "{}: pattern name data in {}", format.screen, bitmap);
    Ok(bitmap)
}

/// The bank holding the screen's vertical cell scroll table, if it has one in VRAM.
pub fn vertical_cell_scroll_occupancy(format: &ScreenFormat, vram_size: VramSize) -> OccupancyBitmap {
    if !format.enabled {
        return OccupancyBitmap::EMPTY;
    }

    let bitmap = format.vcs_table_address(vram_size)
        .map(|address| OccupancyBitmap::from_bank(address.bank()))
        .unwrap_or(OccupancyBitmap::EMPTY);
    if !bitmap.is_empty() {
        info!(target: "occupancy", "{}: vertical cell scroll table in {}", format.screen, bitmap);
    }

    bitmap
}
