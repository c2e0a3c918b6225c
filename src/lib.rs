pub mod config;
pub mod cycle;
pub mod error;
pub mod format_file;
pub mod logging;
pub mod memory;
pub mod screen;
pub mod vdp2;
