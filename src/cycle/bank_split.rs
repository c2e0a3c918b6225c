use crate::cycle::occupancy::OccupancyBitmap;
use crate::error::CycpError;
use crate::memory::vram_bank::BankSplitMode;

// Combined pattern name occupancy must fit inside one of these. Bit order is A0 A1 B0 B1.
#[rustfmt::skip]
const NO_SPLIT_PATTERNS:   &[OccupancyBitmap] = &[
    OccupancyBitmap::from_bits(0b1100),
    OccupancyBitmap::from_bits(0b0011),
];
#[rustfmt::skip]
const SPLIT_A_PATTERNS:    &[OccupancyBitmap] = &[
    OccupancyBitmap::from_bits(0b0111),
    OccupancyBitmap::from_bits(0b1100),
];
#[rustfmt::skip]
const SPLIT_B_PATTERNS:    &[OccupancyBitmap] = &[
    OccupancyBitmap::from_bits(0b1101),
    OccupancyBitmap::from_bits(0b0011),
];
#[rustfmt::skip]
const SPLIT_BOTH_PATTERNS: &[OccupancyBitmap] = &[
    OccupancyBitmap::from_bits(0b1100),
    OccupancyBitmap::from_bits(0b1001),
    OccupancyBitmap::from_bits(0b0110),
    OccupancyBitmap::from_bits(0b0011),
];

pub fn legal_patterns(mode: BankSplitMode) -> &'static [OccupancyBitmap] {
    match mode {
        BankSplitMode::NoSplit => NO_SPLIT_PATTERNS,
        BankSplitMode::SplitA => SPLIT_A_PATTERNS,
        BankSplitMode::SplitB => SPLIT_B_PATTERNS,
        BankSplitMode::SplitBoth => SPLIT_BOTH_PATTERNS,
    }
}

pub fn is_legal_pattern_name_placement(mode: BankSplitMode, occupancy: OccupancyBitmap) -> bool {
    legal_patterns(mode).iter().any(|&pattern| occupancy.is_subset_of(pattern))
}

/// Checks the OR of every enabled cell screen's pattern name occupancy. No occupancy at all
/// (only bitmap screens enabled) is always legal.
pub fn validate_pattern_name_placement(
    mode: BankSplitMode,
    occupancy: OccupancyBitmap,
) -> Result<(), CycpError> {
    if occupancy.is_empty() || is_legal_pattern_name_placement(mode, occupancy) {
        Ok(())
    } else {
        Err(CycpError::IllegalPatternNamePlacement { mode, occupancy })
    }
}

/// NBG0's and NBG1's vertical cell scroll tables have to share a bank when both are in use.
pub fn validate_vertical_cell_scroll(
    nbg0: OccupancyBitmap,
    nbg1: OccupancyBitmap,
) -> Result<(), CycpError> {
    if nbg0.is_empty() || nbg1.is_empty() || nbg0.intersects(nbg1) {
        Ok(())
    } else {
        Err(CycpError::VerticalCellScrollBankMismatch { nbg0, nbg1 })
    }
}
