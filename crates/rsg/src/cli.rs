use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "rsg",
    version,
    about = "Ruby Scope Graph CLI",
    long_about = "Builds a merged, cross-file model of Ruby namespaces, methods, attributes, \
                  and constants, resolves mixins and superclasses, and prints the result."
)]
pub struct RsgCli {
    /// Ruby files or directories to analyze
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Do not print declaration sites
    #[arg(long)]
    pub no_defs: bool,

    /// Do not print constants, attributes, and methods
    #[arg(long)]
    pub no_properties: bool,

    /// Output model statistics as JSON. Optionally specify a file path to save to.
    #[arg(long, value_name = "FILE", num_args = 0..=1, require_equals = true)]
    pub stats: Option<Option<PathBuf>>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl RsgCli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
