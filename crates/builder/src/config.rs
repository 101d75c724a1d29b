/// Output switches carried through the pipeline to the rendering surfaces.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Render the declaration sites of every entity.
    pub print_defs: bool,
    /// Render constants, attributes, and methods.
    pub print_properties: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            print_defs: true,
            print_properties: true,
        }
    }
}
