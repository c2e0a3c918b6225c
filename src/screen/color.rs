use std::fmt;

use enum_iterator::Sequence;
use strum_macros::EnumString;

// Character color count.
#[derive(PartialEq, Eq, Clone, Copy, Debug, EnumString, Sequence)]
pub enum ColorDepth {
    #[strum(serialize = "16")]
    Palette16,
    #[strum(serialize = "256")]
    Palette256,
    #[strum(serialize = "2048")]
    Palette2048,
    #[strum(serialize = "32768")]
    Rgb32768,
    #[strum(serialize = "16770000")]
    Rgb16M,
}

impl ColorDepth {
    pub fn is_rgb(self) -> bool {
        matches!(self, ColorDepth::Rgb32768 | ColorDepth::Rgb16M)
    }

    pub fn to_usize(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ColorDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ColorDepth::Palette16 => "16 colors (palette)",
            ColorDepth::Palette256 => "256 colors (palette)",
            ColorDepth::Palette2048 => "2,048 colors (palette)",
            ColorDepth::Rgb32768 => "32,768 colors (RGB)",
            ColorDepth::Rgb16M => "16,770,000 colors (RGB)",
        };

        write!(f, "{text}")
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, EnumString, Sequence)]
pub enum Reduction {
    #[default]
    #[strum(serialize = "1")]
    None,
    #[strum(serialize = "1/2")]
    Half,
    #[strum(serialize = "1/4")]
    Quarter,
}

impl Reduction {
    pub fn to_usize(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Reduction::None => "no reduction",
            Reduction::Half => "1/2 reduction",
            Reduction::Quarter => "1/4 reduction",
        };

        write!(f, "{text}")
    }
}
