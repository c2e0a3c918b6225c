use std::ops::Index;

use crate::error::CycpError;
use crate::memory::vram_address::VramSize;
use crate::screen::screen_format::ScreenFormat;
use crate::screen::scroll_screen::ScrollScreen;

/// One format per scroll screen, indexed by `ScrollScreen`. Screens that weren't supplied
/// are present but disabled. A registry is never edited in place: any format change
/// builds a new one.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct ScreenRegistry {
    formats: [ScreenFormat; 6],
}

impl ScreenRegistry {
    pub fn build(formats: &[ScreenFormat]) -> Result<ScreenRegistry, CycpError> {
        let mut registry = ScreenRegistry::all_disabled();
        let mut seen = [false; 6];
        for format in formats {
            let index = format.screen.index();
            if seen[index] {
                return Err(CycpError::DuplicateScreen { screen: format.screen });
            }

            seen[index] = true;
            registry.formats[index] = format.clone();
        }

        Ok(registry)
    }

    pub fn all_disabled() -> ScreenRegistry {
        ScreenRegistry { formats: ScrollScreen::ALL.map(ScreenFormat::disabled) }
    }

    /// A copy of this registry with `format` replacing its screen's current format.
    pub fn with_format(&self, format: ScreenFormat) -> ScreenRegistry {
        let mut staged = self.clone();
        let index = format.screen.index();
        staged.formats[index] = format;
        staged
    }

    pub fn format(&self, screen: ScrollScreen) -> &ScreenFormat {
        &self.formats[screen.index()]
    }

    pub fn formats(&self) -> impl Iterator<Item = &ScreenFormat> {
        self.formats.iter()
    }

    pub fn enabled(&self) -> impl Iterator<Item = &ScreenFormat> {
        self.formats.iter().filter(|format| format.enabled)
    }

    pub fn validate(&self, vram_size: VramSize) -> Result<(), CycpError> {
        if self.enabled().next().is_none() {
            return Err(CycpError::NoScreensEnabled);
        }

        self.formats.iter().try_for_each(|format| format.validate(vram_size))
    }
}

impl Index<ScrollScreen> for ScreenRegistry {
    type Output = ScreenFormat;

    fn index(&self, screen: ScrollScreen) -> &ScreenFormat {
        self.format(screen)
    }
}
