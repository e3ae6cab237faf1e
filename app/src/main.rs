//! # wiregrid
//!
//! Command line driver for the wiregrid geometry kernel.
//!
//! ```bash
//! wiregrid sphere --slices 32 --stacks 16 --format stl-binary --output sphere.stl
//! RUST_LOG=debug wiregrid cube --deflate --format threejs
//! ```

mod args;
mod pipeline;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use clap::Parser;
use wiregrid_core::error::Result;

use crate::args::Args;

fn open_output(args: &Args) -> Result<Box<dyn Write>> {
    Ok(match &args.output {
        Some(path) => {
            log::info!("Writing to {}", path.display());
            Box::new(BufWriter::new(File::create(path)?))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::debug!("wiregrid v{}", wiregrid_core::VERSION);

    let args = Args::parse();
    let result = open_output(&args).and_then(|mut writer| pipeline::run(&args, &mut writer));
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("wiregrid failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
