use std::fmt;

use log::{info, warn};

use crate::cycle::access_timing::{requirement, AccessRequirement};
use crate::cycle::bank_split::{validate_pattern_name_placement, validate_vertical_cell_scroll};
use crate::cycle::cycle_pattern_register::CyclePatterns;
use crate::cycle::occupancy::{pattern_name_occupancy, vertical_cell_scroll_occupancy, OccupancyBitmap};
use crate::cycle::slot_allocator::{allocate, ScreenDemand};
use crate::cycle::timing_range::TvScreenMode;
use crate::error::CycpError;
use crate::memory::vram_address::VramSize;
use crate::memory::vram_bank::BankSplitMode;
use crate::screen::registry::ScreenRegistry;
use crate::screen::scroll_screen::ScrollScreen;

/// The hardware settings a registry is compiled against. These come from registers outside
/// the screen formats, so they're always passed in rather than read from anywhere.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct CompileOptions {
    pub bank_split_mode: BankSplitMode,
    pub tv_screen_mode: TvScreenMode,
    pub vram_size: VramSize,
    // Mark unclaimed timings as CPU read/write instead of no access.
    pub fill_cpu_access: bool,
}

/// What was derived for one enabled screen on the way to its registers.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct ScreenReport {
    pub screen: ScrollScreen,
    pub pnd_occupancy: OccupancyBitmap,
    pub vcs_occupancy: OccupancyBitmap,
    pub requirement: AccessRequirement,
}

impl fmt::Display for ScreenReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: PND banks {}, VCS banks {}, {}",
            self.screen, self.pnd_occupancy, self.vcs_occupancy, self.requirement)
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Compilation {
    pub screens: Vec<ScreenReport>,
    pub patterns: CyclePatterns,
}

/// Turns a registry into one cycle pattern register per bank. Either every check passes and
/// the full set of registers comes back, or nothing does.
pub fn compile(registry: &ScreenRegistry, options: &CompileOptions) -> Result<Compilation, CycpError> {
    let result = try_compile(registry, options);
    match &result {
        Ok(_) => info!("Compiled cycle patterns ({}, {} TV screen, {} VRAM)",
            options.bank_split_mode, options.tv_screen_mode, options.vram_size),
        Err(err) => warn!("Screen configuration rejected ({}): {err}", err.code()),
    }

    result
}

fn try_compile(registry: &ScreenRegistry, options: &CompileOptions) -> Result<Compilation, CycpError> {
    registry.validate(options.vram_size)?;

    let mut screens = Vec::new();
    for format in registry.enabled() {
        screens.push(ScreenReport {
            screen: format.screen,
            pnd_occupancy: pattern_name_occupancy(format, options.vram_size)?,
            vcs_occupancy: vertical_cell_scroll_occupancy(format, options.vram_size),
            requirement: AccessRequirement::NONE,
        });
    }

    let combined = screens.iter()
        .fold(OccupancyBitmap::EMPTY, |combined, report| combined | report.pnd_occupancy);
    validate_pattern_name_placement(options.bank_split_mode, combined)?;

    let vcs_of = |screen| screens.iter()
        .find(|report| report.screen == screen)
        .map_or(OccupancyBitmap::EMPTY, |report| report.vcs_occupancy);
    validate_vertical_cell_scroll(vcs_of(ScrollScreen::Nbg0), vcs_of(ScrollScreen::Nbg1))?;

    for report in &mut screens {
        report.requirement = requirement(&registry[report.screen], options.vram_size)?;
    }

    let mut demands = Vec::new();
    for report in &screens {
        let cpd_bank = registry[report.screen].pattern_address(options.vram_size)
            .map(|address| address.bank());
        let demand = ScreenDemand::new(
            report.screen,
            report.requirement,
            report.pnd_occupancy,
            cpd_bank,
            report.vcs_occupancy,
            options.bank_split_mode,
        );

        match demand {
            Some(demand) => demands.push(demand),
            None => info!(target: "allocation", "{}: rotational backgrounds aren't packed", report.screen),
        }
    }

    let patterns = allocate(&demands, options.bank_split_mode, options.tv_screen_mode, options.fill_cpu_access)?;
    Ok(Compilation { screens, patterns })
}
