pub mod vram_address;
pub mod vram_bank;
