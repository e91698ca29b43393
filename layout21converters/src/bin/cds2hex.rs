//!
//! # Cadence Color Name to Hex CLI
//!
//! Rewrites a layer color table, replacing Cadence display-color names with hex values.
//!

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;

use layout21converters::cds2hex::{convert, Cds2HexOptions};

/// # Cadence Color Name to Hex CLI
/// Replaces any cell of the input table naming a Cadence color with its hex counterpart.
#[derive(Parser)]
pub struct ProgramOptions {
    /// Input File
    #[arg(short = 'i', long)]
    pub input: PathBuf,
    /// Output File
    #[arg(short = 'o', long)]
    pub output: PathBuf,
}

impl From<ProgramOptions> for Cds2HexOptions {
    fn from(opts: ProgramOptions) -> Self {
        Cds2HexOptions {
            input: opts.input,
            output: opts.output,
        }
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let options = ProgramOptions::parse();
    convert(&options.into())?;
    Ok(())
}
