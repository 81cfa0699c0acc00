//! Converts a BDF font into GFX font source declarations.

use std::{
    fs,
    io::{self, Write},
    process,
};

use anyhow::{Context, Result};
use bdf_converter::cli;
use clap::error::ErrorKind;
use flexi_logger::Logger;

fn main() -> Result<()> {
    let config = match cli::try_get_config(std::env::args_os()) {
        Ok(config) => config,
        Err(error) if matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            error.exit()
        }
        Err(error) => {
            println!("{}", cli::usage());
            eprint!("{error}");
            process::exit(1);
        }
    };

    let _logger = Logger::try_with_env_or_str(if config.verbose { "info" } else { "warn" })?
        .log_to_stderr()
        .start()?;

    let font = fs::read(&config.input)
        .with_context(|| format!("error reading {}", config.input.display()))?;

    let mut output = Vec::new();
    let layout = bdf_converter::convert_bdf(&font, &config.options, &mut output)
        .with_context(|| format!("error converting {}", config.input.display()))?;

    match &config.output {
        Some(path) => {
            fs::write(path, &output).with_context(|| format!("error writing {}", path.display()))?
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(&output)
                .and_then(|()| stdout.flush())
                .context("error writing to standard output")?;
        }
    }

    log::info!(
        "converted {} glyphs ({} bitmap bytes) into {}",
        layout.glyphs.len(),
        layout.bitmaps.len(),
        layout.descriptor.identifier
    );

    Ok(())
}
