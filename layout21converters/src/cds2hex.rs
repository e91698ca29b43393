//!
//! # Cadence Color Name to Hex Conversion
//! The core logic for `cds2hex`.
//!

// Std-Lib
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

// Crates.io
use log::info;

// Local Imports
use crate::ConvResult;

/// # Color Conversion Options
#[derive(Debug, Clone, Default)]
pub struct Cds2HexOptions {
    /// Input color table
    pub input: PathBuf,
    /// Output color table
    pub output: PathBuf,
}

/// Rewrite a color table, replacing Cadence color names with hex values.
/// Returns the number of cells replaced.
pub fn convert(options: &Cds2HexOptions) -> ConvResult<usize> {
    let input = File::open(&options.input)?;
    let output = BufWriter::new(File::create(&options.output)?);
    let replaced = layout21svg::cds_to_hex(input, output)?;
    info!("Replaced {} color names, wrote {:?}", replaced, options.output);
    Ok(replaced)
}
