use std::fmt;

use strum_macros::EnumString;

use crate::screen::scroll_screen::ScrollScreen;

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum TvScreenMode {
    #[default]
    Normal,
    #[strum(serialize = "hires", serialize = "hi-res")]
    HiRes,
}

impl TvScreenMode {
    /// Access timings available per bank each cycle. Hi-res screens only have T0 to T3.
    pub fn slot_count(self) -> usize {
        match self {
            TvScreenMode::Normal => 8,
            TvScreenMode::HiRes => 4,
        }
    }
}

impl fmt::Display for TvScreenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TvScreenMode::Normal => write!(f, "normal"),
            TvScreenMode::HiRes => write!(f, "hi-res"),
        }
    }
}

// Bit n set means a character pattern read may go in Tn when the pattern name read is
// in the row's timing.
#[rustfmt::skip]
const NORMAL_CPD_RANGES: [u8; 8] = [
    0b1111_0111, // T0 -> T0 T1 T2    T4 T5 T6 T7
    0b1110_1111, // T1 -> T0 T1 T2 T3    T5 T6 T7
    0b1100_1111, // T2 -> T0 T1 T2 T3       T6 T7
    0b1000_1111, // T3 -> T0 T1 T2 T3          T7
    0b0000_1111, // T4 -> T0 T1 T2 T3
    0b0000_1110, // T5 ->    T1 T2 T3
    0b0000_1100, // T6 ->       T2 T3
    0b0000_1000, // T7 ->          T3
];

#[rustfmt::skip]
const HI_RES_CPD_RANGES: [u8; 8] = [
    0b0000_0111, // T0 -> T0 T1 T2
    0b0000_1110, // T1 ->    T1 T2 T3
    0b0000_1101, // T2 -> T0    T2 T3
    0b0000_1011, // T3 -> T0 T1    T3
    0b0000_0000,
    0b0000_0000,
    0b0000_0000,
    0b0000_0000,
];

/// Timings where a screen's character pattern data may be read, given that its pattern
/// name data is read at `pnd_slot`.
pub fn cpd_range(mode: TvScreenMode, pnd_slot: usize) -> u8 {
    let ranges = match mode {
        TvScreenMode::Normal => &NORMAL_CPD_RANGES,
        TvScreenMode::HiRes => &HI_RES_CPD_RANGES,
    };

    ranges.get(pnd_slot).copied().unwrap_or(0)
}

/// Timings where a screen's vertical cell scroll table may be read. Only NBG0 and NBG1 have
/// any; NBG0's range is inside NBG1's so NBG0 is placed first.
pub fn vcs_range(screen: ScrollScreen) -> u8 {
    match screen {
        ScrollScreen::Nbg0 => 0b0000_0011,
        ScrollScreen::Nbg1 => 0b0000_0111,
        _ => 0b0000_0000,
    }
}

pub fn in_range(range: u8, slot: usize) -> bool {
    slot < 8 && range & (1 << slot) != 0
}
