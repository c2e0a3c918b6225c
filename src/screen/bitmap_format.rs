use std::fmt;

use crate::screen::screen_format::RotationParameterMode;

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct BitmapFormat {
    pub size: BitmapSize,
    pub bitmap_pattern: u32,
    pub color_palette: u32,
    pub rotation_parameter_mode: Option<RotationParameterMode>,
}

impl BitmapFormat {
    pub fn new(size: BitmapSize, bitmap_pattern: u32, color_palette: u32) -> BitmapFormat {
        BitmapFormat { size, bitmap_pattern, color_palette, rotation_parameter_mode: None }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum BitmapSize {
    W512H256,
    W512H512,
    W1024H256,
    W1024H512,
}

impl BitmapSize {
    pub fn from_dimensions(width: u16, height: u16) -> Option<BitmapSize> {
        match (width, height) {
            (512, 256) => Some(BitmapSize::W512H256),
            (512, 512) => Some(BitmapSize::W512H512),
            (1024, 256) => Some(BitmapSize::W1024H256),
            (1024, 512) => Some(BitmapSize::W1024H512),
            _ => None,
        }
    }

    pub fn width(self) -> u16 {
        match self {
            BitmapSize::W512H256 | BitmapSize::W512H512 => 512,
            BitmapSize::W1024H256 | BitmapSize::W1024H512 => 1024,
        }
    }

    pub fn height(self) -> u16 {
        match self {
            BitmapSize::W512H256 | BitmapSize::W1024H256 => 256,
            BitmapSize::W512H512 | BitmapSize::W1024H512 => 512,
        }
    }
}

impl fmt::Display for BitmapSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width(), self.height())
    }
}
