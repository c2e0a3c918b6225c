use std::fmt;

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::screen::scroll_screen::ScrollScreen;

/// The 4-bit code written into each access timing of a cycle pattern register.
/// Codes 0x8 to 0xB are reserved.
#[derive(PartialEq, Eq, Clone, Copy, Debug, FromPrimitive)]
pub enum AccessType {
    PatternNameNbg0 = 0x0,
    PatternNameNbg1 = 0x1,
    PatternNameNbg2 = 0x2,
    PatternNameNbg3 = 0x3,
    CharacterPatternNbg0 = 0x4,
    CharacterPatternNbg1 = 0x5,
    CharacterPatternNbg2 = 0x6,
    CharacterPatternNbg3 = 0x7,
    VerticalCellScrollNbg0 = 0xC,
    VerticalCellScrollNbg1 = 0xD,
    CpuReadWrite = 0xE,
    NoAccess = 0xF,
}

impl AccessType {
    pub fn from_code(code: u8) -> Option<AccessType> {
        AccessType::from_u8(code)
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn pattern_name(screen: ScrollScreen) -> Option<AccessType> {
        Self::normal_background_code(screen, 0x0)
    }

    pub fn character_pattern(screen: ScrollScreen) -> Option<AccessType> {
        Self::normal_background_code(screen, 0x4)
    }

    pub fn vertical_cell_scroll(screen: ScrollScreen) -> Option<AccessType> {
        match screen {
            ScrollScreen::Nbg0 => Some(AccessType::VerticalCellScrollNbg0),
            ScrollScreen::Nbg1 => Some(AccessType::VerticalCellScrollNbg1),
            _ => None,
        }
    }

    // Rotational backgrounds have no codes of their own.
    fn normal_background_code(screen: ScrollScreen, base: u8) -> Option<AccessType> {
        if screen.is_rotational() {
            return None;
        }

        AccessType::from_u8(base + screen.index() as u8)
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use AccessType::*;
        let text = match self {
            PatternNameNbg0 => "PNDR_NBG0",
            PatternNameNbg1 => "PNDR_NBG1",
            PatternNameNbg2 => "PNDR_NBG2",
            PatternNameNbg3 => "PNDR_NBG3",
            CharacterPatternNbg0 => "CHPNDR_NBG0",
            CharacterPatternNbg1 => "CHPNDR_NBG1",
            CharacterPatternNbg2 => "CHPNDR_NBG2",
            CharacterPatternNbg3 => "CHPNDR_NBG3",
            VerticalCellScrollNbg0 => "VCSTDR_NBG0",
            VerticalCellScrollNbg1 => "VCSTDR_NBG1",
            CpuReadWrite => "CPU_RW",
            NoAccess => "NO_ACCESS",
        };

        write!(f, "{text}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_register_values() {
        assert_eq!(AccessType::pattern_name(ScrollScreen::Nbg2), Some(AccessType::PatternNameNbg2));
        assert_eq!(AccessType::character_pattern(ScrollScreen::Nbg3).map(AccessType::code), Some(0x7));
        assert_eq!(AccessType::vertical_cell_scroll(ScrollScreen::Nbg1).map(AccessType::code), Some(0xD));
        assert_eq!(AccessType::CpuReadWrite.code(), 0xE);
        assert_eq!(AccessType::NoAccess.code(), 0xF);
    }

    #[test]
    fn reserved_codes() {
        for code in 0x8..=0xB {
            assert_eq!(AccessType::from_code(code), None);
        }

        assert_eq!(AccessType::from_code(0x10), None);
    }

    #[test]
    fn rotational_screens_have_no_codes() {
        assert_eq!(AccessType::pattern_name(ScrollScreen::Rbg0), None);
        assert_eq!(AccessType::character_pattern(ScrollScreen::Rbg1), None);
        assert_eq!(AccessType::vertical_cell_scroll(ScrollScreen::Nbg2), None);
    }

    #[test]
    fn mnemonics() {
        assert_eq!(AccessType::CharacterPatternNbg0.to_string(), "CHPNDR_NBG0");
        assert_eq!(AccessType::VerticalCellScrollNbg0.to_string(), "VCSTDR_NBG0");
    }
}
