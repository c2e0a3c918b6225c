use std::fmt;

use enum_iterator::Sequence;
use splitbits::splitbits_named;
use strum_macros::EnumString;

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, EnumString, Sequence)]
#[strum(ascii_case_insensitive)]
pub enum VramBank {
    A0,
    A1,
    B0,
    B1,
}

impl VramBank {
    pub fn from_index(index: u32) -> VramBank {
        match index & 0b11 {
            0 => VramBank::A0,
            1 => VramBank::A1,
            2 => VramBank::B0,
            3 => VramBank::B1,
            _ => unreachable!(),
        }
    }

    pub fn to_usize(self) -> usize {
        self as usize
    }
}

impl fmt::Display for VramBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            VramBank::A0 => "A0",
            VramBank::A1 => "A1",
            VramBank::B0 => "B0",
            VramBank::B1 => "B1",
        };

        write!(f, "{text}")
    }
}

/*
 * RAMCTL
 * FEDC BA98 7654 3210
 * .... ..BA .... ....
 *        |+----------- VRAM-A split into A0/A1 (VRAMD)
 *        +------------ VRAM-B split into B0/B1 (VRBMD)
 */
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, EnumString, Sequence)]
#[strum(ascii_case_insensitive)]
pub enum BankSplitMode {
    #[default]
    #[strum(serialize = "none")]
    NoSplit,
    #[strum(serialize = "a")]
    SplitA,
    #[strum(serialize = "b")]
    SplitB,
    #[strum(serialize = "both")]
    SplitBoth,
}

impl BankSplitMode {
    pub fn from_ramctl(ramctl: u16) -> BankSplitMode {
        let (split_b, split_a) = splitbits_named!(ramctl, "......ba ........");
        BankSplitMode::from_splits(split_a, split_b)
    }

    pub fn from_splits(split_a: bool, split_b: bool) -> BankSplitMode {
        match (split_a, split_b) {
            (false, false) => BankSplitMode::NoSplit,
            (true , false) => BankSplitMode::SplitA,
            (false, true ) => BankSplitMode::SplitB,
            (true , true ) => BankSplitMode::SplitBoth,
        }
    }

    pub fn is_a_split(self) -> bool {
        matches!(self, BankSplitMode::SplitA | BankSplitMode::SplitBoth)
    }

    pub fn is_b_split(self) -> bool {
        matches!(self, BankSplitMode::SplitB | BankSplitMode::SplitBoth)
    }

    /// The bank whose cycle pattern register services accesses to `bank`. An unsplit bank
    /// is driven entirely by its first half's register.
    pub fn servicing_bank(self, bank: VramBank) -> VramBank {
        match bank {
            VramBank::A1 if !self.is_a_split() => VramBank::A0,
            VramBank::B1 if !self.is_b_split() => VramBank::B0,
            _ => bank,
        }
    }
}

impl fmt::Display for BankSplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BankSplitMode::NoSplit => "neither bank split",
            BankSplitMode::SplitA => "bank A split",
            BankSplitMode::SplitB => "bank B split",
            BankSplitMode::SplitBoth => "both banks split",
        };

        write!(f, "{text}")
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn ramctl_decoding() {
        assert_eq!(BankSplitMode::from_ramctl(0x0000), BankSplitMode::NoSplit);
        assert_eq!(BankSplitMode::from_ramctl(0x0100), BankSplitMode::SplitA);
        assert_eq!(BankSplitMode::from_ramctl(0x0200), BankSplitMode::SplitB);
        assert_eq!(BankSplitMode::from_ramctl(0x0300), BankSplitMode::SplitBoth);
        assert_eq!(BankSplitMode::from_ramctl(0x3000), BankSplitMode::NoSplit);
        assert_eq!(BankSplitMode::from_ramctl(0x13FF), BankSplitMode::SplitBoth);
    }

    #[test]
    fn unsplit_banks_fold_onto_first_half() {
        let mode = BankSplitMode::SplitA;
        assert_eq!(mode.servicing_bank(VramBank::A1), VramBank::A1);
        assert_eq!(mode.servicing_bank(VramBank::B1), VramBank::B0);
        assert_eq!(BankSplitMode::NoSplit.servicing_bank(VramBank::A1), VramBank::A0);
        assert_eq!(BankSplitMode::SplitBoth.servicing_bank(VramBank::B1), VramBank::B1);
    }

    #[test]
    fn parse_mode_names() {
        assert_eq!(BankSplitMode::from_str("none"), Ok(BankSplitMode::NoSplit));
        assert_eq!(BankSplitMode::from_str("A"), Ok(BankSplitMode::SplitA));
        assert_eq!(BankSplitMode::from_str("both"), Ok(BankSplitMode::SplitBoth));
        assert!(BankSplitMode::from_str("c").is_err());
        assert_eq!(VramBank::from_str("b1"), Ok(VramBank::B1));
    }
}
