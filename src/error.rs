use std::path::PathBuf;

use crate::cycle::access_timing::Transfer;
use crate::cycle::occupancy::OccupancyBitmap;
use crate::memory::vram_bank::{BankSplitMode, VramBank};
use crate::screen::color::{ColorDepth, Reduction};
use crate::screen::scroll_screen::ScrollScreen;

/// Every way a screen configuration can be turned down. Nothing here is fatal: each
/// variant names the screen or bank the caller has to change.
#[derive(Debug, thiserror::Error)]
pub enum CycpError {
    #[error("{screen}: lead address 0x{address:08X} is outside VRAM")]
    AddressOutOfRange { screen: ScrollScreen, address: u32 },

    #[error("{screen}: color palette address 0x{address:08X} is outside CRAM")]
    PaletteAddressOutOfRange { screen: ScrollScreen, address: u32 },

    #[error("{screen}: {color_depth} is not available to cell screens")]
    UnsupportedColorDepth { screen: ScrollScreen, color_depth: ColorDepth },

    #[error("{screen}: plane map has {found} entries but {expected} are required")]
    PlaneCountMismatch { screen: ScrollScreen, expected: usize, found: usize },

    #[error("{screen}: only NBG0 and NBG1 can use a vertical cell scroll table")]
    VerticalCellScrollUnsupported { screen: ScrollScreen },

    #[error("{screen}: rotation parameter mode must be set for rotational screens only")]
    RotationParameterMismatch { screen: ScrollScreen },

    #[error("{screen}: bitmap format is not available on this screen")]
    BitmapUnsupported { screen: ScrollScreen },

    #[error("{screen} was configured more than once")]
    DuplicateScreen { screen: ScrollScreen },

    #[error("No scroll screens are enabled")]
    NoScreensEnabled,

    #[error("Pattern name data occupying {occupancy} is illegal when {mode}")]
    IllegalPatternNamePlacement { mode: BankSplitMode, occupancy: OccupancyBitmap },

    #[error("Vertical cell scroll tables must share a bank, but NBG0 uses {nbg0} and NBG1 uses {nbg1}")]
    VerticalCellScrollBankMismatch { nbg0: OccupancyBitmap, nbg1: OccupancyBitmap },

    #[error("{screen}: {transfer} access count is undefined for {color_depth} at {reduction}")]
    UnsupportedTiming {
        screen: ScrollScreen,
        transfer: Transfer,
        color_depth: ColorDepth,
        reduction: Reduction,
    },

    #[error("Bank {bank} needs {required} access timings but only {available} are available")]
    CapacityExceeded { bank: VramBank, required: u8, available: u8 },

    #[error("{screen}: no access timing placement satisfies the adjacency ranges")]
    NoLegalPlacement { screen: ScrollScreen },

    #[error("Line {line}: {message}")]
    FormatFile { line: usize, message: String },

    #[error("Failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ErrorKind {
    Structural,
    Placement,
    Capacity,
    Adjacency,
    Input,
}

impl CycpError {
    pub fn kind(&self) -> ErrorKind {
        use CycpError::*;
        match self {
            AddressOutOfRange { .. }
            | PaletteAddressOutOfRange { .. }
            | UnsupportedColorDepth { .. }
            | PlaneCountMismatch { .. }
            | VerticalCellScrollUnsupported { .. }
            | RotationParameterMismatch { .. }
            | BitmapUnsupported { .. }
            | DuplicateScreen { .. }
            | NoScreensEnabled => ErrorKind::Structural,
            IllegalPatternNamePlacement { .. }
            | VerticalCellScrollBankMismatch { .. } => ErrorKind::Placement,
            UnsupportedTiming { .. }
            | CapacityExceeded { .. } => ErrorKind::Capacity,
            NoLegalPlacement { .. } => ErrorKind::Adjacency,
            FormatFile { .. }
            | Io { .. } => ErrorKind::Input,
        }
    }

    /// A stable negative code for callers that report results as integers.
    #[rustfmt::skip]
    pub fn code(&self) -> i32 {
        use CycpError::*;
        match self {
            AddressOutOfRange { .. }              => -1,
            PaletteAddressOutOfRange { .. }       => -2,
            UnsupportedColorDepth { .. }          => -3,
            PlaneCountMismatch { .. }             => -4,
            VerticalCellScrollUnsupported { .. }  => -5,
            RotationParameterMismatch { .. }      => -6,
            BitmapUnsupported { .. }              => -7,
            DuplicateScreen { .. }                => -8,
            NoScreensEnabled                      => -9,
            IllegalPatternNamePlacement { .. }    => -10,
            VerticalCellScrollBankMismatch { .. } => -11,
            UnsupportedTiming { .. }              => -12,
            CapacityExceeded { .. }               => -13,
            NoLegalPlacement { .. }               => -14,
            FormatFile { .. }                     => -15,
            Io { .. }                             => -16,
        }
    }
}
