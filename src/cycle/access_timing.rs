use std::fmt;

use log::info;

use crate::error::CycpError;
use crate::memory::vram_address::VramSize;
use crate::screen::screen_format::{ScreenFormat, ScreenLayout};

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Transfer {
    PatternNameData,
    CharacterPatternData,
    VerticalCellScroll,
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Transfer::PatternNameData => "pattern name data",
            Transfer::CharacterPatternData => "character pattern data",
            Transfer::VerticalCellScroll => "vertical cell scroll",
        };

        write!(f, "{text}")
    }
}

/// How many access timings a screen needs for each of its transfers.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct AccessRequirement {
    pub pnd_slots: u8,
    pub cpd_slots: u8,
    pub vcs_slots: u8,
}

impl AccessRequirement {
    pub const NONE: AccessRequirement = AccessRequirement { pnd_slots: 0, cpd_slots: 0, vcs_slots: 0 };

    pub fn total(self) -> u8 {
        self.pnd_slots + self.cpd_slots + self.vcs_slots
    }

    pub fn is_empty(self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for AccessRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PND={} CPD={} VCS={}", self.pnd_slots, self.cpd_slots, self.vcs_slots)
    }
}

const INVALID: i8 = -1;

// [pattern name size][reduction]
#[rustfmt::skip]
const PND_COUNTS: [[i8; 3]; 2] = [
    //  1   1/2  1/4
    [   1,   2,   4], // 1-word
    [   1,   2,   4], // 2-words
];

// [color depth][reduction]
#[rustfmt::skip]
const CELL_CPD_COUNTS: [[i8; 3]; 5] = [
    //     1      1/2      1/4
    [      1,       2,       4], // 16
    [      2,       4, INVALID], // 256
    [      4, INVALID, INVALID], // 2048
    [INVALID, INVALID, INVALID], // 32768
    [INVALID, INVALID, INVALID], // 16770000
];

#[rustfmt::skip]
const BITMAP_CPD_COUNTS: [[i8; 3]; 5] = [
    //     1      1/2      1/4
    [      1,       2,       4], // 16
    [      2,       4, INVALID], // 256
    [      4, INVALID, INVALID], // 2048
    [      4, INVALID, INVALID], // 32768
    [      8, INVALID, INVALID], // 16770000
];

/// Derives the screen's access timing demand from its format. A disabled screen demands
/// nothing.
pub fn requirement(format: &ScreenFormat, vram_size: VramSize) -> Result<AccessRequirement, CycpError> {
    if !format.enabled {
        return Ok(AccessRequirement::NONE);
    }

    let reduction = format.reduction.to_usize();
    let depth = format.color_depth.to_usize();
    let (pnd_count, cpd_count) = match &format.layout {
        ScreenLayout::Cell(cell) => (
            PND_COUNTS[cell.pnd_size.to_usize()][reduction],
            CELL_CPD_COUNTS[depth][reduction],
        ),
        ScreenLayout::Bitmap(_) => (0, BITMAP_CPD_COUNTS[depth][reduction]),
    };

    let pnd_slots = slot_count(format, Transfer::PatternNameData, pnd_count)?;
    let cpd_slots = slot_count(format, Transfer::CharacterPatternData, cpd_count)?;
    let vcs_slots = if format.screen.supports_vertical_cell_scroll()
        && format.vcs_table_address(vram_size).is_some()
    {
        1
    } else {
        0
    };

    let requirement = AccessRequirement { pnd_slots, cpd_slots, vcs_slots };
    info!(target: "timings", "{}: {}", format.screen, requirement);
    Ok(requirement)
}

fn slot_count(format: &ScreenFormat, transfer: Transfer, count: i8) -> Result<u8, CycpError> {
    u8::try_from(count).map_err(|_| unsupported(format, transfer))
}

fn unsupported(format: &ScreenFormat, transfer: Transfer) -> CycpError {
    CycpError::UnsupportedTiming {
        screen: format.screen,
        transfer,
        color_depth: format.color_depth,
        reduction: format.reduction,
    }
}

#[cfg(test)]
mod tests {
    use crate::screen::bitmap_format::{BitmapFormat, BitmapSize};
    use crate::screen::cell_format::{CellFormat, PatternNameSize};
    use crate::screen::color::{ColorDepth, Reduction};
    use crate::screen::scroll_screen::ScrollScreen;

    use super::*;

    const CRAM: u32 = 0x05F0_0000;

    fn cell(screen: ScrollScreen, color_depth: ColorDepth, reduction: Reduction) -> ScreenFormat {
        let cell = CellFormat::normal(0x05E0_0000, CRAM, [0x05E0_0000; 4]);
        ScreenFormat::cell(screen, color_depth, cell).with_reduction(reduction)
    }

    fn bitmap(color_depth: ColorDepth, reduction: Reduction) -> ScreenFormat {
        let bitmap = BitmapFormat::new(BitmapSize::W512H256, 0x05E4_0000, CRAM);
        ScreenFormat::bitmap(ScrollScreen::Nbg0, color_depth, bitmap).with_reduction(reduction)
    }

    #[test]
    fn palette16_cell_without_reduction() {
        let format = cell(ScrollScreen::Nbg0, ColorDepth::Palette16, Reduction::None);
        let requirement = requirement(&format, VramSize::FourMbit).unwrap();
        assert_eq!(requirement, AccessRequirement { pnd_slots: 1, cpd_slots: 1, vcs_slots: 0 });
    }

    #[test]
    fn reduction_scales_pattern_name_reads() {
        for pnd_size in [PatternNameSize::OneWord, PatternNameSize::TwoWords] {
            let cell = CellFormat::normal(0x05E0_0000, CRAM, [0x05E0_0000; 4]).with_pnd_size(pnd_size);
            let format = ScreenFormat::cell(ScrollScreen::Nbg2, ColorDepth::Palette16, cell)
                .with_reduction(Reduction::Quarter);

            let requirement = requirement(&format, VramSize::FourMbit).unwrap();
            assert_eq!(requirement.pnd_slots, 4);
            assert_eq!(requirement.cpd_slots, 4);
        }
    }

    #[test]
    fn palette2048_cell_with_reduction_is_invalid() {
        for reduction in [Reduction::Half, Reduction::Quarter] {
            let format = cell(ScrollScreen::Nbg1, ColorDepth::Palette2048, reduction);
            assert!(matches!(
                requirement(&format, VramSize::FourMbit),
                Err(CycpError::UnsupportedTiming { transfer: Transfer::CharacterPatternData, .. }),
            ));
        }

        let format = cell(ScrollScreen::Nbg1, ColorDepth::Palette2048, Reduction::None);
        assert_eq!(requirement(&format, VramSize::FourMbit).unwrap().cpd_slots, 4);
    }

    #[test]
    fn bitmap_needs_no_pattern_name_reads() {
        let rgb16m = requirement(&bitmap(ColorDepth::Rgb16M, Reduction::None), VramSize::FourMbit).unwrap();
        assert_eq!(rgb16m, AccessRequirement { pnd_slots: 0, cpd_slots: 8, vcs_slots: 0 });

        let rgb32768 = requirement(&bitmap(ColorDepth::Rgb32768, Reduction::None), VramSize::FourMbit).unwrap();
        assert_eq!(rgb32768.cpd_slots, 4);
        assert!(requirement(&bitmap(ColorDepth::Rgb16M, Reduction::Half), VramSize::FourMbit).is_err());
    }

    #[test]
    fn vertical_cell_scroll_demand() {
        let format = cell(ScrollScreen::Nbg0, ColorDepth::Palette16, Reduction::None).with_vcs_table(0x05E2_0000);
        assert_eq!(requirement(&format, VramSize::FourMbit).unwrap().vcs_slots, 1);

        let outside = cell(ScrollScreen::Nbg0, ColorDepth::Palette16, Reduction::None).with_vcs_table(0x05E8_0000);
        assert_eq!(requirement(&outside, VramSize::FourMbit).unwrap().vcs_slots, 0);
        assert_eq!(requirement(&outside, VramSize::EightMbit).unwrap().vcs_slots, 1);
    }

    #[test]
    fn disabled_screen_demands_nothing() {
        let format = cell(ScrollScreen::Nbg0, ColorDepth::Palette2048, Reduction::Quarter)
            .with_vcs_table(0x05E0_0000)
            .with_enabled(false);
        assert_eq!(requirement(&format, VramSize::FourMbit).unwrap(), AccessRequirement::NONE);
    }
}
