//!
//! # Conversion Configuration
//!
//! Loaded from TOML, YAML, or JSON, by file extension.
//! Every field has a default, so configuration files need only list what they change.
//!
//! ```toml
//! scale = 1000.0
//! colors = "techfiles/colors.csv"
//!
//! [viewer]
//! enabled = false
//! ```
//!

// Std-Lib
use std::path::{Path, PathBuf};

// Crates.io
use log::debug;
use serde::{Deserialize, Serialize};

// Local Imports
use crate::ConvResult;
use layout21svg::SvgOptions;
use layout21utils::SerializationFormat;

/// Color table used when neither the command-line nor the configuration names one
pub const DEFAULT_COLORS: &str = "colors.csv";

/// # Dump-to-SVG Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Divisor from layout database units to SVG user units
    pub scale: f64,
    /// SVG root `width` attribute
    pub width: String,
    /// SVG root `height` attribute
    pub height: String,
    /// Color table path
    pub colors: Option<PathBuf>,
    /// Input-file extensions, case-insensitive, treated as binary layout requiring conversion
    pub binary_extensions: Vec<String>,
    /// Binary-to-dump converter
    pub converter: ToolConfig,
    /// Canvas-fitting viewer
    pub viewer: ViewerConfig,
}
impl Default for Config {
    fn default() -> Self {
        let svg = SvgOptions::default();
        Self {
            scale: svg.scale,
            width: svg.width,
            height: svg.height,
            colors: None,
            binary_extensions: ["gds", "gds2", "gdsii", "strm"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            converter: ToolConfig::default(),
            viewer: ViewerConfig::default(),
        }
    }
}
impl Config {
    /// Load from file `fname`, in the format indicated by its extension
    pub fn open(fname: impl AsRef<Path>) -> ConvResult<Self> {
        let fname = fname.as_ref();
        let fmt = SerializationFormat::from_path(fname)?;
        let cfg: Config = fmt.open(fname)?;
        debug!("Loaded configuration from {:?}", fname);
        Ok(cfg)
    }
    /// Load from `fname` if provided, or the defaults otherwise
    pub fn load(fname: Option<&Path>) -> ConvResult<Self> {
        match fname {
            Some(f) => Self::open(f),
            None => Ok(Self::default()),
        }
    }
    /// Rendering options
    pub fn svg_options(&self) -> SvgOptions {
        SvgOptions {
            scale: self.scale,
            width: self.width.clone(),
            height: self.height.clone(),
        }
    }
    /// Boolean indication of whether `path` is a binary layout file, judged by extension
    pub fn is_binary(&self, path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self
                .binary_extensions
                .iter()
                .any(|b| b.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }
}

/// # External Tool Configuration
///
/// Arguments may include the placeholders `{input}` and `{output}`,
/// replaced with the paths of each invocation.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Program name, searched for on the `PATH`, or path
    pub program: String,
    /// Argument template
    pub args: Vec<String>,
}
impl Default for ToolConfig {
    /// KLayout's stream-to-text converter
    fn default() -> Self {
        Self {
            program: "strm2txt".into(),
            args: vec!["{input}".into(), "{output}".into()],
        }
    }
}

/// # Viewer Configuration
/// Invoked on the SVG output, with both its `{input}` and `{output}` placeholders set to the SVG path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub program: String,
    pub args: Vec<String>,
    pub enabled: bool,
}
impl Default for ViewerConfig {
    /// Inkscape, fitting its canvas to the drawing and saving in place
    fn default() -> Self {
        Self {
            program: "inkscape".into(),
            args: vec![
                "--actions=select-all;fit-canvas-to-selection;export-overwrite;export-do".into(),
                "{input}".into(),
            ],
            enabled: true,
        }
    }
}
impl ViewerConfig {
    pub fn tool(&self) -> ToolConfig {
        ToolConfig {
            program: self.program.clone(),
            args: self.args.clone(),
        }
    }
}
