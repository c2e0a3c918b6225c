pub mod bitmap_format;
pub mod catalogue;
pub mod cell_format;
pub mod color;
pub mod registry;
pub mod screen_format;
pub mod scroll_screen;
