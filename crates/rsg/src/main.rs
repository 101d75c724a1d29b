mod cli;

use crate::cli::RsgCli;
use anyhow::Result;
use builder::{Compiler, Config};
use model::metrics::ModelStatistics;
use model::printer::ModelPrinter;
use std::io::Write;
use tracing::info;

fn main() -> Result<()> {
    let cli = RsgCli::parse_args();
    logging::init(cli.verbose);

    let config = Config {
        print_defs: !cli.no_defs,
        print_properties: !cli.no_properties,
    };
    let compiler = Compiler::new(config);
    let files = compiler.list_files(&cli.paths);
    let model = compiler.compile_files(&files);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    ModelPrinter::new(&mut out, config.print_defs, config.print_properties).print_model(&model)?;

    if let Some(stats_output) = &cli.stats {
        let stats = ModelStatistics::collect(&model);
        match stats_output {
            Some(path) => {
                std::fs::write(path, serde_json::to_string_pretty(&stats)?)?;
                info!("statistics saved to `{}`", path.display());
            }
            None => {
                serde_json::to_writer_pretty(&mut out, &stats)?;
                writeln!(out)?;
            }
        }
    }

    Ok(())
}
