use std::fmt;
use std::str::FromStr;

use crate::memory::vram_address::{VramAddress, VramSize, CRAM_START};
use crate::memory::vram_bank::VramBank;
use crate::screen::bitmap_format::{BitmapFormat, BitmapSize};
use crate::screen::cell_format::CellFormat;
use crate::screen::color::{ColorDepth, Reduction};
use crate::screen::screen_format::ScreenFormat;
use crate::screen::scroll_screen::ScrollScreen;

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum Catalogue {
    #[default]
    Example,
    Backgrounds,
}

impl Catalogue {
    pub fn formats(self) -> Vec<ScreenFormat> {
        match self {
            Catalogue::Example => vec![nbg0_example()],
            Catalogue::Backgrounds => background_formats(),
        }
    }
}

impl FromStr for Catalogue {
    type Err = String;

    fn from_str(value: &str) -> Result<Catalogue, String> {
        match value.to_lowercase().as_str() {
            "example" => Ok(Catalogue::Example),
            "backgrounds" => Ok(Catalogue::Backgrounds),
            _ => Err(format!("Invalid catalogue: {value}")),
        }
    }
}

impl fmt::Display for Catalogue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Catalogue::Example => write!(f, "example"),
            Catalogue::Backgrounds => write!(f, "backgrounds"),
        }
    }
}

/// NBG0 as a 16 color cell screen with its planes in B0 and B1, and its character
/// patterns and vertical cell scroll table at the start of A0.
pub fn nbg0_example() -> ScreenFormat {
    let planes = [
        bank_start(VramBank::B0),
        bank_start(VramBank::B0),
        bank_start(VramBank::B1),
        bank_start(VramBank::B1),
    ];
    let cell = CellFormat::normal(bank_start(VramBank::A0), CRAM_START, planes);
    ScreenFormat::cell(ScrollScreen::Nbg0, ColorDepth::Palette16, cell)
        .with_vcs_table(bank_start(VramBank::A0))
}

/// Two quarter-reduced 16 color cell backgrounds and a 512x256 bitmap, all at the
/// start of VRAM. These are layouts, not a known-good combination.
pub fn background_formats() -> Vec<ScreenFormat> {
    let vram_start = bank_start(VramBank::A0);
    let quarter_cell = |screen| {
        let cell = CellFormat::normal(vram_start, CRAM_START, [vram_start; 4]);
        ScreenFormat::cell(screen, ColorDepth::Palette16, cell)
            .with_reduction(Reduction::Quarter)
            .with_vcs_table(0)
    };

    vec![
        quarter_cell(ScrollScreen::Nbg2),
        quarter_cell(ScrollScreen::Nbg3),
        ScreenFormat::bitmap(
            ScrollScreen::Nbg1,
            ColorDepth::Palette16,
            BitmapFormat::new(BitmapSize::W512H256, vram_start, CRAM_START),
        ),
    ]
}

fn bank_start(bank: VramBank) -> u32 {
    VramAddress::in_bank(bank, 0, VramSize::FourMbit)
        .map(VramAddress::to_u32)
        .unwrap_or_default()
}
