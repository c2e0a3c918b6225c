use std::path::PathBuf;

use log::info;
use structopt::StructOpt;

use crate::cycle::compiler::CompileOptions;
use crate::cycle::timing_range::TvScreenMode;
use crate::error::CycpError;
use crate::format_file;
use crate::logging::logger::Logger;
use crate::memory::vram_address::VramSize;
use crate::memory::vram_bank::BankSplitMode;
use crate::screen::catalogue::Catalogue;
use crate::screen::screen_format::ScreenFormat;

pub struct Config {
    formats: Vec<ScreenFormat>,
    options: CompileOptions,
}

impl Config {
    pub fn new(opt: &Opt) -> Result<Config, CycpError> {
        let formats = if let Some(formats_path) = &opt.formats_path {
            format_file::load(formats_path)?
        } else {
            info!("Using the '{}' screen format catalogue.", opt.catalogue);
            opt.catalogue.formats()
        };

        Ok(Config { formats, options: Config::compile_options(opt) })
    }

    pub fn compile_options(opt: &Opt) -> CompileOptions {
        let bank_split_mode = match (opt.ramctl, opt.bank_split) {
            (Some(ramctl), _) => BankSplitMode::from_ramctl(ramctl),
            (None, Some(mode)) => mode,
            (None, None) => BankSplitMode::default(),
        };

        let tv_screen_mode = if opt.hi_res { TvScreenMode::HiRes } else { TvScreenMode::Normal };

        CompileOptions {
            bank_split_mode,
            tv_screen_mode,
            vram_size: opt.vram_size,
            fill_cpu_access: opt.cpu_access,
        }
    }

    pub fn formats(&self) -> &[ScreenFormat] {
        &self.formats
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    pub fn logger(opt: &Opt) -> Logger {
        Logger {
            log_occupancy: opt.log_occupancy || opt.log_all,
            log_timings: opt.log_timings || opt.log_all,
            log_allocation: opt.log_allocation || opt.log_all,
        }
    }
}

#[derive(Debug, StructOpt)]
#[structopt(name = "VDP2CYCP", about = "Computes and validates VDP2 VRAM cycle patterns.")]
pub struct Opt {
    /// Screen format file. The built-in catalogue is used when absent.
    #[structopt(name = "FORMATS", parse(from_os_str))]
    pub formats_path: Option<PathBuf>,

    #[structopt(long, default_value = "example")]
    pub catalogue: Catalogue,

    /// RAMCTL register value, in hex.
    #[structopt(long, parse(try_from_str = parse_ramctl))]
    pub ramctl: Option<u16>,

    /// none, a, b or both
    #[structopt(long, conflicts_with = "ramctl")]
    pub bank_split: Option<BankSplitMode>,

    #[structopt(long)]
    pub hi_res: bool,

    /// 4 or 8 (Mbit)
    #[structopt(long, default_value = "4")]
    pub vram_size: VramSize,

    /// Mark unclaimed timings as CPU read/write.
    #[structopt(long)]
    pub cpu_access: bool,

    #[structopt(name = "logall", long)]
    pub log_all: bool,

    #[structopt(name = "logoccupancy", long)]
    pub log_occupancy: bool,

    #[structopt(name = "logtimings", long)]
    pub log_timings: bool,

    #[structopt(name = "logallocation", long)]
    pub log_allocation: bool,
}

fn parse_ramctl(value: &str) -> Result<u16, String> {
    let digits = value.strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u16::from_str_radix(digits, 16)
        .map_err(|err| format!("Invalid RAMCTL value '{value}': {err}"))
}
