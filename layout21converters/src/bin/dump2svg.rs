//!
//! # Layout Dump to SVG Conversion CLI
//!
//! Converts a text layout dump, or a binary layout via an external converter,
//! to an SVG document with one Inkscape layer per layout layer.
//!

use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use clap::Parser;
use log::{debug, error, LevelFilter};

// Use our own crate, note by name, not `crate::` or `super::`.
use layout21converters::dump2svg::{convert, Dump2SvgOptions};

// => The doc-comment on `ProgramOptions` here is displayed by the `clap`-generated help docs =>

/// # Layout Dump to SVG Conversion CLI
/// Converts a text layout dump, or a binary layout via an external converter, to SVG.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct ProgramOptions {
    /// Layout dump, or binary layout file
    pub input: PathBuf,
    /// Output SVG file. Defaults to the input, with extension `svg`.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Top-level cell. Defaults to the last cell defined.
    #[arg(short, long)]
    pub cell: Option<String>,
    /// Layer color table (CSV). Defaults to the configured table, or `colors.csv`.
    #[arg(long)]
    pub colors: Option<PathBuf>,
    /// Configuration file (TOML, YAML, or JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Skip fitting the canvas with the external viewer
    #[arg(long)]
    pub no_fit: bool,
    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl From<ProgramOptions> for Dump2SvgOptions {
    fn from(opts: ProgramOptions) -> Self {
        Dump2SvgOptions {
            input: opts.input,
            output: opts.output,
            cell: opts.cell,
            colors: opts.colors,
            config: opts.config,
            fit: !opts.no_fit,
        }
    }
}

/// Main entry point.
/// Parses the command-line arguments, installs the logger, and calls [`convert`].
pub fn main() {
    let options = ProgramOptions::parse();

    let level = LevelFilter::from_str(&options.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'info' instead.", options.log_level);
        LevelFilter::Info
    });
    // `RUST_LOG`, if set, takes precedence
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env(env_logger::Env::default())
        .init();
    debug!("{:?}", options);

    if let Err(err) = convert(&options.into()) {
        error!("{}", err);
        process::exit(1);
    }
}
