use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::info;

use crate::error::CycpError;
use crate::memory::vram_address::{is_cram_address, VramAddress, VramSize};
use crate::screen::bitmap_format::{BitmapFormat, BitmapSize};
use crate::screen::cell_format::{AuxiliaryMode, CellFormat, CharacterSize, PatternNameSize, PlaneMap, PlaneSize};
use crate::screen::color::{ColorDepth, Reduction};
use crate::screen::screen_format::{RotationParameterMode, ScreenFormat};
use crate::screen::scroll_screen::ScrollScreen;

/*
 * One screen per line, comma separated. The first line is a header. Blank lines and lines
 * starting with '#' are ignored.
 *
 * screen,cell,colors,character_size,pnd_size,cp_table,color_palette,auxiliary_mode,
 *     vcs_table,reduction,plane_size,plane_a,...,plane_d[,...plane_p,rotation]
 * screen,bitmap,colors,width,height,bitmap_pattern,color_palette[,rotation]
 *
 * Addresses may be hex (0x prefix) or decimal. A vcs_table of 0 means no table.
 */
pub fn load(path: &Path) -> Result<Vec<ScreenFormat>, CycpError> {
    let text = fs::read_to_string(path)
        .map_err(|source| CycpError::Io { path: path.to_path_buf(), source })?;
    let formats = parse(&text)?;
    info!("Loaded {} screen format(s) from '{}'.", formats.len(), path.display());
    Ok(formats)
}

pub fn parse(text: &str) -> Result<Vec<ScreenFormat>, CycpError> {
    let mut formats = Vec::new();
    let mut header_seen = false;
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if !header_seen {
            header_seen = true;
            continue;
        }

        formats.push(RowParser::new(index + 1, line).screen_format()?);
    }

    Ok(formats)
}

struct RowParser<'a> {
    line: usize,
    fields: Vec<&'a str>,
    next: usize,
}

impl<'a> RowParser<'a> {
    fn new(line: usize, text: &'a str) -> RowParser<'a> {
        RowParser { line, fields: text.split(',').map(str::trim).collect(), next: 0 }
    }

    fn screen_format(mut self) -> Result<ScreenFormat, CycpError> {
        let screen: ScrollScreen = self.value("screen")?;
        let kind = self.field("format")?.to_lowercase();
        let color_depth: ColorDepth = self.value("colors")?;
        let format = match kind.as_str() {
            "cell" => self.cell(screen, color_depth)?,
            "bitmap" => self.bitmap(screen, color_depth)?,
            _ => return Err(self.error(format!("Invalid format '{kind}', expected cell or bitmap"))),
        };

        if self.next < self.fields.len() {
            return Err(self.error(format!(
                "Expected {} columns for {screen} but found {}", self.next, self.fields.len(),
            )));
        }

        Ok(format)
    }

    fn cell(&mut self, screen: ScrollScreen, color_depth: ColorDepth) -> Result<ScreenFormat, CycpError> {
        let character_size: CharacterSize = self.value("character_size")?;
        let pnd_size: PatternNameSize = self.value("pnd_size")?;
        let cp_table = self.vram_address("cp_table")?;
        let color_palette = self.cram_address("color_palette")?;
        let auxiliary_mode: AuxiliaryMode = self.value("auxiliary_mode")?;
        let vcs_table = self.address("vcs_table")?;
        if vcs_table != 0 {
            self.check_vram("vcs_table", vcs_table)?;
        }

        let reduction: Reduction = self.value("reduction")?;
        let plane_size: PlaneSize = self.value("plane_size")?;

        let mut planes = Vec::new();
        for plane in ('a'..='p').take(screen.plane_count()) {
            planes.push(self.vram_address(&format!("plane_{plane}"))?);
        }

        let rotation_parameter_mode = self.rotation_parameter_mode(screen)?;
        let cell = CellFormat {
            character_size,
            pnd_size,
            auxiliary_mode,
            cp_table,
            color_palette,
            plane_size,
            plane_map: PlaneMap::new(planes),
            rotation_parameter_mode,
        };

        Ok(ScreenFormat::cell(screen, color_depth, cell)
            .with_reduction(reduction)
            .with_vcs_table(vcs_table))
    }

    fn bitmap(&mut self, screen: ScrollScreen, color_depth: ColorDepth) -> Result<ScreenFormat, CycpError> {
        let width: u16 = self.value("width")?;
        let height: u16 = self.value("height")?;
        let size = BitmapSize::from_dimensions(width, height)
            .ok_or_else(|| self.error(format!("Invalid bitmap size {width}x{height}")))?;
        let bitmap_pattern = self.vram_address("bitmap_pattern")?;
        let color_palette = self.cram_address("color_palette")?;

        let mut bitmap = BitmapFormat::new(size, bitmap_pattern, color_palette);
        bitmap.rotation_parameter_mode = self.rotation_parameter_mode(screen)?;
        Ok(ScreenFormat::bitmap(screen, color_depth, bitmap))
    }

    fn rotation_parameter_mode(&mut self, screen: ScrollScreen) -> Result<Option<RotationParameterMode>, CycpError> {
        if screen.is_rotational() {
            self.value("rotation").map(Some)
        } else {
            Ok(None)
        }
    }

    fn field(&mut self, column: &str) -> Result<&'a str, CycpError> {
        let field = self.fields.get(self.next).copied()
            .ok_or_else(|| self.error(format!("Missing column '{column}'")))?;
        self.next += 1;
        Ok(field)
    }

    fn value<T: FromStr>(&mut self, column: &str) -> Result<T, CycpError> {
        let field = self.field(column)?;
        field.parse()
            .map_err(|_| self.error(format!("Invalid {column} '{field}'")))
    }

    fn address(&mut self, column: &str) -> Result<u32, CycpError> {
        let field = self.field(column)?;
        let parsed = match field.strip_prefix("0x").or_else(|| field.strip_prefix("0X")) {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => field.parse(),
        };

        parsed.map_err(|_| self.error(format!("Cannot convert {column} '{field}' to an address")))
    }

    // Addresses are checked against the largest VRAM here; the configured size is checked
    // when the screen is validated.
    fn vram_address(&mut self, column: &str) -> Result<u32, CycpError> {
        let address = self.address(column)?;
        self.check_vram(column, address)
    }

    fn check_vram(&self, column: &str, address: u32) -> Result<u32, CycpError> {
        if VramAddress::new(address, VramSize::EightMbit).is_none() {
            return Err(self.error(format!("{column} 0x{address:08X} is not within VRAM")));
        }

        Ok(address)
    }

    fn cram_address(&mut self, column: &str) -> Result<u32, CycpError> {
        let address = self.address(column)?;
        if !is_cram_address(address) {
            return Err(self.error(format!("{column} 0x{address:08X} is not within CRAM")));
        }

        Ok(address)
    }

    fn error(&self, message: String) -> CycpError {
        CycpError::FormatFile { line: self.line, message }
    }
}

#[cfg(test)]
mod tests {
    use crate::screen::screen_format::ScreenLayout;

    use super::*;

    const HEADER: &str = "screen,format,colors,...\n";

    #[test]
    fn cell_row() {
        let text = format!("{HEADER}NBG0, cell, 16, 1x1, 1, 0x25E00000, 0x05F00000, 0, 0x05E00000, 1/2, 1x1, \
            0x05E40000, 0x05E40000, 0x05E60000, 0x05E60000\n");
        let formats = parse(&text).unwrap();
        assert_eq!(formats.len(), 1);

        let format = &formats[0];
        assert_eq!(format.screen, ScrollScreen::Nbg0);
        assert_eq!(format.reduction, Reduction::Half);
        assert_eq!(format.vcs_table, Some(0x05E0_0000));
        let cell = format.cell_format().unwrap();
        assert_eq!(cell.cp_table, 0x25E0_0000);
        assert_eq!(cell.plane_map.lead_addresses(), &[0x05E4_0000, 0x05E4_0000, 0x05E6_0000, 0x05E6_0000]);
    }

    #[test]
    fn bitmap_row() {
        let text = format!("{HEADER}\n# backgrounds\nnbg1,bitmap,32768,512,256,0x05E20000,0x05F00200\n");
        let formats = parse(&text).unwrap();
        let ScreenLayout::Bitmap(bitmap) = &formats[0].layout else {
            panic!("Expected a bitmap layout");
        };
        assert_eq!(bitmap.size, BitmapSize::W512H256);
        assert_eq!(formats[0].color_depth, ColorDepth::Rgb32768);
    }

    #[test]
    fn rotational_row_needs_sixteen_planes_and_mode() {
        let planes = vec!["0x05E40000"; 16].join(",");
        let text = format!("{HEADER}RBG0,cell,256,2x2,2,0x05E00000,0x05F00000,1,0,1,2x2,{planes},coefficient\n");
        let formats = parse(&text).unwrap();
        let cell = formats[0].cell_format().unwrap();
        assert_eq!(cell.plane_map.len(), 16);
        assert_eq!(cell.rotation_parameter_mode, Some(RotationParameterMode::CoefficientSwitch));
        assert_eq!(formats[0].vcs_table, Some(0));
    }

    #[test]
    fn errors_carry_line_numbers() {
        let text = format!("{HEADER}NBG1,bitmap,16,640,256,0x05E00000,0x05F00000\n");
        assert!(matches!(parse(&text), Err(CycpError::FormatFile { line: 2, .. })));

        let text = format!("{HEADER}\nNBG2,cell,16,1x1,1,0x05E00000,0x05E00000,0,0,1,1x1,0,0,0,0\n");
        assert!(matches!(parse(&text), Err(CycpError::FormatFile { line: 3, .. })));
    }

    #[test]
    fn invalid_values() {
        for row in [
            "SPRITE,cell,16",
            "NBG0,tile,16",
            "NBG0,bitmap,24,512,256,0x05E00000,0x05F00000",
            "NBG0,cell,16,3x3,1,0x05E00000,0x05F00000,0,0,1,1x1,0x05E00000,0x05E00000,0x05E00000,0x05E00000",
            "NBG0,cell,16,1x1,1,0x05E00000,0x05F00000,0,0x06000000,1,1x1,0x05E00000,0x05E00000,0x05E00000,0x05E00000",
            "NBG0,cell,16,1x1,1,0x05E00000,0x05F00000,0,0,1,1x1,0x05E00000,0x05E00000,0x05E00000",
            "NBG0,bitmap,16,512,256,0x05E00000,0x05F00000,extra",
        ] {
            let text = format!("{HEADER}{row}\n");
            assert!(parse(&text).is_err(), "{row}");
        }
    }
}
