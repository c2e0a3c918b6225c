use log::info;

use crate::cycle::compiler::{compile, Compilation, CompileOptions};
use crate::cycle::cycle_pattern_register::CyclePatterns;
use crate::error::CycpError;
use crate::screen::registry::ScreenRegistry;
use crate::screen::screen_format::ScreenFormat;

/// The committed screen configuration and the cycle patterns compiled from it. Every change
/// is made to a staged copy which only replaces the committed state once it compiles, so a
/// rejected change leaves the previous configuration in place.
pub struct Vdp2 {
    options: CompileOptions,
    registry: ScreenRegistry,
    compilation: Option<Compilation>,
}

impl Vdp2 {
    pub fn new(options: CompileOptions) -> Vdp2 {
        Vdp2 {
            options,
            registry: ScreenRegistry::all_disabled(),
            compilation: None,
        }
    }

    /// Replaces every screen's format at once.
    pub fn configure(&mut self, formats: &[ScreenFormat]) -> Result<&Compilation, CycpError> {
        let staged = ScreenRegistry::build(formats)?;
        self.commit(staged, self.options)
    }

    /// Replaces one screen's format, keeping the rest of the committed registry.
    pub fn set_format(&mut self, format: ScreenFormat) -> Result<&Compilation, CycpError> {
        let staged = self.registry.with_format(format);
        self.commit(staged, self.options)
    }

    /// Recompiles the committed registry against new hardware settings.
    pub fn set_options(&mut self, options: CompileOptions) -> Result<&Compilation, CycpError> {
        let staged = self.registry.clone();
        self.commit(staged, options)
    }

    fn commit(&mut self, staged: ScreenRegistry, options: CompileOptions) -> Result<&Compilation, CycpError> {
        let compilation = compile(&staged, &options)?;
        info!("Committed {} enabled screen(s).", staged.enabled().count());
        self.options = options;
        self.registry = staged;
        Ok(self.compilation.insert(compilation))
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    pub fn registry(&self) -> &ScreenRegistry {
        &self.registry
    }

    /// The committed cycle patterns, or None before the first successful configuration.
    pub fn cycle_patterns(&self) -> Option<CyclePatterns> {
        self.compilation.as_ref().map(|compilation| compilation.patterns)
    }
}
