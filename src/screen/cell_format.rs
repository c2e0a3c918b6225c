use std::fmt;

use itertools::Itertools;
use strum_macros::EnumString;

use crate::screen::screen_format::RotationParameterMode;

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct CellFormat {
    pub character_size: CharacterSize,
    pub pnd_size: PatternNameSize,
    pub auxiliary_mode: AuxiliaryMode,
    pub cp_table: u32,
    pub color_palette: u32,
    pub plane_size: PlaneSize,
    pub plane_map: PlaneMap,
    pub rotation_parameter_mode: Option<RotationParameterMode>,
}

impl CellFormat {
    /// A normal background's cell layout, all four planes taken from `planes`.
    pub fn normal(cp_table: u32, color_palette: u32, planes: [u32; 4]) -> CellFormat {
        CellFormat {
            character_size: CharacterSize::OneByOne,
            pnd_size: PatternNameSize::OneWord,
            auxiliary_mode: AuxiliaryMode::Zero,
            cp_table,
            color_palette,
            plane_size: PlaneSize::OneByOne,
            plane_map: PlaneMap::new(planes.to_vec()),
            rotation_parameter_mode: None,
        }
    }

    pub fn rotational(
        cp_table: u32,
        color_palette: u32,
        planes: [u32; 16],
        rotation_parameter_mode: RotationParameterMode,
    ) -> CellFormat {
        CellFormat {
            plane_map: PlaneMap::new(planes.to_vec()),
            rotation_parameter_mode: Some(rotation_parameter_mode),
            ..CellFormat::normal(cp_table, color_palette, [cp_table; 4])
        }
    }

    pub fn with_pnd_size(mut self, pnd_size: PatternNameSize) -> CellFormat {
        self.pnd_size = pnd_size;
        self
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, EnumString)]
pub enum PatternNameSize {
    #[default]
    #[strum(serialize = "1")]
    OneWord,
    #[strum(serialize = "2")]
    TwoWords,
}

impl PatternNameSize {
    pub fn to_usize(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PatternNameSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternNameSize::OneWord => write!(f, "1-word"),
            PatternNameSize::TwoWords => write!(f, "2-words"),
        }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, EnumString, strum_macros::Display)]
pub enum CharacterSize {
    #[default]
    #[strum(serialize = "1x1")]
    OneByOne,
    #[strum(serialize = "2x2")]
    TwoByTwo,
}

// Only meaningful for 1-word pattern name data.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, EnumString, strum_macros::Display)]
pub enum AuxiliaryMode {
    #[default]
    #[strum(serialize = "0")]
    Zero,
    #[strum(serialize = "1")]
    One,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, EnumString, strum_macros::Display)]
pub enum PlaneSize {
    #[default]
    #[strum(serialize = "1x1")]
    OneByOne,
    #[strum(serialize = "2x1")]
    TwoByOne,
    #[strum(serialize = "2x2")]
    TwoByTwo,
}

/// Lead addresses of each plane, in order. Normal backgrounds map planes A to D,
/// rotational backgrounds map planes A to P.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct PlaneMap(Vec<u32>);

impl PlaneMap {
    pub fn new(lead_addresses: Vec<u32>) -> PlaneMap {
        PlaneMap(lead_addresses)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn lead_addresses(&self) -> &[u32] {
        &self.0
    }
}

impl fmt::Display for PlaneMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let planes = self.0.iter()
            .zip('a'..='p')
            .map(|(address, name)| format!("{name}=0x{address:08X}"))
            .join(", ");
        write!(f, "[{planes}]")
    }
}
