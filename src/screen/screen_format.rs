use std::fmt;

use strum_macros::EnumString;

use crate::error::CycpError;
use crate::memory::vram_address::{is_cram_address, VramAddress, VramSize};
use crate::screen::bitmap_format::BitmapFormat;
use crate::screen::cell_format::CellFormat;
use crate::screen::color::{ColorDepth, Reduction};
use crate::screen::scroll_screen::ScrollScreen;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ScreenKind {
    Cell,
    Bitmap,
}

impl fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenKind::Cell => write!(f, "Cell"),
            ScreenKind::Bitmap => write!(f, "Bitmap"),
        }
    }
}

// RPMD
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, EnumString, strum_macros::Display)]
#[strum(ascii_case_insensitive)]
pub enum RotationParameterMode {
    #[default]
    #[strum(serialize = "a")]
    ParameterA,
    #[strum(serialize = "b")]
    ParameterB,
    #[strum(serialize = "coefficient")]
    CoefficientSwitch,
    #[strum(serialize = "window")]
    WindowSwitch,
}

/// The populated payload decides the screen's kind, so a kind/payload mismatch can't be
/// expressed.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum ScreenLayout {
    Cell(CellFormat),
    Bitmap(BitmapFormat),
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct ScreenFormat {
    pub screen: ScrollScreen,
    pub enabled: bool,
    pub color_depth: ColorDepth,
    pub reduction: Reduction,
    // Zero or absent means no vertical cell scroll table.
    pub vcs_table: Option<u32>,
    pub layout: ScreenLayout,
}

impl ScreenFormat {
    pub fn cell(screen: ScrollScreen, color_depth: ColorDepth, cell: CellFormat) -> ScreenFormat {
        ScreenFormat {
            screen,
            enabled: true,
            color_depth,
            reduction: Reduction::None,
            vcs_table: None,
            layout: ScreenLayout::Cell(cell),
        }
    }

    pub fn bitmap(screen: ScrollScreen, color_depth: ColorDepth, bitmap: BitmapFormat) -> ScreenFormat {
        ScreenFormat {
            screen,
            enabled: true,
            color_depth,
            reduction: Reduction::None,
            vcs_table: None,
            layout: ScreenLayout::Bitmap(bitmap),
        }
    }

    pub fn disabled(screen: ScrollScreen) -> ScreenFormat {
        let cell = if screen.is_rotational() {
            CellFormat::rotational(0, 0, [0; 16], RotationParameterMode::ParameterA)
        } else {
            CellFormat::normal(0, 0, [0; 4])
        };

        ScreenFormat {
            enabled: false,
            ..ScreenFormat::cell(screen, ColorDepth::Palette16, cell)
        }
    }

    pub fn with_reduction(mut self, reduction: Reduction) -> ScreenFormat {
        self.reduction = reduction;
        self
    }

    pub fn with_vcs_table(mut self, vcs_table: u32) -> ScreenFormat {
        self.vcs_table = Some(vcs_table);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> ScreenFormat {
        self.enabled = enabled;
        self
    }

    pub fn kind(&self) -> ScreenKind {
        match self.layout {
            ScreenLayout::Cell(_) => ScreenKind::Cell,
            ScreenLayout::Bitmap(_) => ScreenKind::Bitmap,
        }
    }

    pub fn cell_format(&self) -> Option<&CellFormat> {
        match &self.layout {
            ScreenLayout::Cell(cell) => Some(cell),
            ScreenLayout::Bitmap(_) => None,
        }
    }

    /// The vertical cell scroll table, if one is set and it lies in VRAM.
    pub fn vcs_table_address(&self, vram_size: VramSize) -> Option<VramAddress> {
        self.vcs_table
            .filter(|&raw| raw != 0)
            .and_then(|raw| VramAddress::new(raw, vram_size))
    }

    /// Lead address of the screen's character pattern (cell) or bitmap pattern data.
    pub fn pattern_address(&self, vram_size: VramSize) -> Option<VramAddress> {
        let raw = match &self.layout {
            ScreenLayout::Cell(cell) => cell.cp_table,
            ScreenLayout::Bitmap(bitmap) => bitmap.bitmap_pattern,
        };

        VramAddress::new(raw, vram_size)
    }

    /// Self-consistency checks. A disabled screen is never checked.
    pub fn validate(&self, vram_size: VramSize) -> Result<(), CycpError> {
        if !self.enabled {
            return Ok(());
        }

        let screen = self.screen;
        let (color_palette, rotation_parameter_mode) = match &self.layout {
            ScreenLayout::Cell(cell) => {
                if self.color_depth.is_rgb() {
                    return Err(CycpError::UnsupportedColorDepth { screen, color_depth: self.color_depth });
                }

                if cell.plane_map.len() != screen.plane_count() {
                    return Err(CycpError::PlaneCountMismatch {
                        screen,
                        expected: screen.plane_count(),
                        found: cell.plane_map.len(),
                    });
                }

                for &address in cell.plane_map.lead_addresses() {
                    require_vram(screen, address, vram_size)?;
                }

                require_vram(screen, cell.cp_table, vram_size)?;
                (cell.color_palette, cell.rotation_parameter_mode)
            }
            ScreenLayout::Bitmap(bitmap) => {
                if !screen.supports_bitmap() {
                    return Err(CycpError::BitmapUnsupported { screen });
                }

                require_vram(screen, bitmap.bitmap_pattern, vram_size)?;
                (bitmap.color_palette, bitmap.rotation_parameter_mode)
            }
        };

        if !is_cram_address(color_palette) {
            return Err(CycpError::PaletteAddressOutOfRange { screen, address: color_palette });
        }

        if rotation_parameter_mode.is_some() != screen.is_rotational() {
            return Err(CycpError::RotationParameterMismatch { screen });
        }

        if self.vcs_table_address(vram_size).is_some() && !screen.supports_vertical_cell_scroll() {
            return Err(CycpError::VerticalCellScrollUnsupported { screen });
        }

        Ok(())
    }
}

fn require_vram(screen: ScrollScreen, address: u32, vram_size: VramSize) -> Result<VramAddress, CycpError> {
    VramAddress::new(address, vram_size)
        .ok_or(CycpError::AddressOutOfRange { screen, address })
}

impl fmt::Display for ScreenFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "    scroll_screen: {}", self.screen)?;
        writeln!(f, "          enabled: {}", self.enabled)?;
        writeln!(f, "           format: {}", self.kind())?;
        writeln!(f, "         cc_count: {}", self.color_depth)?;
        writeln!(f, "        reduction: {}", self.reduction)?;
        if let Some(vcs_table) = self.vcs_table {
            writeln!(f, "        vcs_table: 0x{vcs_table:08X}")?;
        }

        match &self.layout {
            ScreenLayout::Cell(cell) => {
                writeln!(f, "   character_size: {}", cell.character_size)?;
                writeln!(f, "         pnd_size: {}", cell.pnd_size)?;
                writeln!(f, "   auxiliary_mode: {}", cell.auxiliary_mode)?;
                writeln!(f, "         cp_table: 0x{:08X}", cell.cp_table)?;
                writeln!(f, "    color_palette: 0x{:08X}", cell.color_palette)?;
                writeln!(f, "       plane_size: {}", cell.plane_size)?;
                writeln!(f, "              map: {}", cell.plane_map)?;
                if let Some(mode) = cell.rotation_parameter_mode {
                    writeln!(f, "  rotation_params: {mode}")?;
                }
            }
            ScreenLayout::Bitmap(bitmap) => {
                writeln!(f, "      bitmap_size: {}", bitmap.size)?;
                writeln!(f, "   bitmap_pattern: 0x{:08X}", bitmap.bitmap_pattern)?;
                writeln!(f, "    color_palette: 0x{:08X}", bitmap.color_palette)?;
                if let Some(mode) = bitmap.rotation_parameter_mode {
                    writeln!(f, "  rotation_params: {mode}")?;
                }
            }
        }

        Ok(())
    }
}
