//!
//! # Layer Color Table
//!
//! Per-layer fill, opacity, stroke, and label, read from comma-separated files of the form
//!
//! ```text
//! layer, fill, fill-opacity, stroke, label
//! 1, #ff0000, 0.5, #000000, metal1
//! 2, green, 0.5, blue, metal2
//! ```
//!
//! The first row is a header, and is skipped.
//! Rows may carry extra columns between the stroke and the label; the label is always the final column.
//!

// Std-Lib
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::Path;

// Crates.io
use csv::StringRecord;
use log::debug;
use serde::{Deserialize, Serialize};

// Local Imports
use crate::{SvgError, SvgResult};
use layout21raw::LayerNum;
use layout21utils::{enumstr, EnumStr, ErrorHelper, Unwrapper};

/// Fewest columns in a table row: layer, fill, opacity, stroke, label
pub const MIN_COLUMNS: usize = 5;

/// # Layer Style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerStyle {
    /// Fill color, as `#rrggbb`
    pub fill: String,
    /// Fill opacity, kept as written
    pub fill_opacity: String,
    /// Stroke color, as `#rrggbb`
    pub stroke: String,
    /// Layer label
    pub label: String,
}

/// # Color Table
/// Layer number to [LayerStyle] mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorTable {
    styles: BTreeMap<LayerNum, LayerStyle>,
}
impl ColorTable {
    /// Read a [ColorTable] from file `fname`
    pub fn open(fname: impl AsRef<Path>) -> SvgResult<Self> {
        let file = std::fs::File::open(fname)?;
        Self::from_reader(file)
    }
    /// Parse a [ColorTable] from string `src`
    pub fn from_str(src: &str) -> SvgResult<Self> {
        Self::from_reader(src.as_bytes())
    }
    /// Read a [ColorTable] from comma-separated content.
    /// Where a layer appears more than once, its last row wins.
    pub fn from_reader(rdr: impl Read) -> SvgResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(rdr);
        let mut table = Self::default();
        for record in reader.records() {
            let record = record?;
            let row = ColorRow::new(&record);
            let (layer, style) = row.parse()?;
            if table.styles.insert(layer, style).is_some() {
                debug!("Color table line {} redefines layer {}", row.line, layer);
            }
        }
        debug!("Read {} layer styles", table.styles.len());
        Ok(table)
    }
    /// Get the style for `layer`, if defined
    pub fn get(&self, layer: LayerNum) -> Option<&LayerStyle> {
        self.styles.get(&layer)
    }
    /// Add or replace the style for `layer`
    pub fn insert(&mut self, layer: LayerNum, style: LayerStyle) -> Option<LayerStyle> {
        self.styles.insert(layer, style)
    }
    pub fn len(&self) -> usize {
        self.styles.len()
    }
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

/// A single table row, plus its line number for error reporting
struct ColorRow<'r> {
    line: usize,
    record: &'r StringRecord,
}
impl<'r> ColorRow<'r> {
    fn new(record: &'r StringRecord) -> Self {
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        Self { line, record }
    }
    fn parse(&self) -> SvgResult<(LayerNum, LayerStyle)> {
        let n = self.record.len();
        self.assert(
            n >= MIN_COLUMNS,
            format!("expected at least {} columns, found {}", MIN_COLUMNS, n),
        )?;
        let layer = self.record[0]
            .parse::<LayerNum>()
            .unwrapper(self, format!("invalid layer number {:?}", &self.record[0]))?;
        let style = LayerStyle {
            fill: normalize_color(&self.record[1]),
            fill_opacity: self.record[2].to_string(),
            stroke: normalize_color(&self.record[3]),
            label: self.record[n - 1].to_string(),
        };
        Ok((layer, style))
    }
}
impl ErrorHelper for ColorRow<'_> {
    type Error = SvgError;
    fn err(&self, msg: impl Into<String>) -> SvgError {
        SvgError::InvalidColorTable {
            line: self.line,
            reason: msg.into(),
        }
    }
}

/// Convert a color cell to `#rrggbb` form.
/// Accepts `#rrggbb`, bare `rrggbb`, and [CdsColor] names.
/// Anything else, e.g. `none`, is returned unchanged.
pub fn normalize_color(txt: &str) -> String {
    let txt = txt.trim();
    if txt.starts_with('#') {
        return txt.to_string();
    }
    if let Some(color) = CdsColor::from_str(txt) {
        return format!("#{}", color.hex());
    }
    if txt.len() == 6 && txt.chars().all(|c| c.is_ascii_hexdigit()) {
        return format!("#{}", txt);
    }
    txt.to_string()
}

enumstr!(
    /// # Cadence Display Colors
    /// Named colors used by Cadence display resource files.
    CdsColor {
        Green: "green",
        Red: "red",
        Yellow: "yellow",
        Tan: "tan",
        Blue: "blue",
        Gold: "gold",
        Magenta: "magenta",
        Orange: "orange",
        Lilac: "lilac",
        Purple: "purple",
        Turquoise: "turquoise",
        Pink: "pink",
        Maroon: "maroon",
        LightBlue: "lightBlue",
        Violet: "violet",
        White: "white",
    }
);
impl CdsColor {
    /// Red, green, and blue components
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::Green => (0, 204, 102),
            Self::Red => (255, 0, 0),
            Self::Yellow => (255, 255, 0),
            Self::Tan => (255, 230, 191),
            Self::Blue => (0, 0, 255),
            Self::Gold => (217, 204, 0),
            Self::Magenta => (255, 0, 255),
            Self::Orange => (255, 128, 0),
            Self::Lilac => (255, 180, 250),
            Self::Purple => (153, 0, 230),
            Self::Turquoise => (43, 206, 231),
            Self::Pink => (255, 191, 242),
            Self::Maroon => (230, 31, 13),
            Self::LightBlue => (51, 179, 255),
            Self::Violet => (94, 0, 230),
            // Slightly off-white, for contrast against white backgrounds
            Self::White => (240, 240, 240),
        }
    }
    /// Lower-case hex string, without a leading `#`
    pub fn hex(&self) -> String {
        let (r, g, b) = self.rgb();
        format!("{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// Copy comma-separated content from `rdr` to `wtr`,
/// replacing every cell holding a [CdsColor] name with its bare hex value.
/// All other cells, including the header row, are copied unchanged.
/// Returns the number of cells replaced.
pub fn cds_to_hex(rdr: impl Read, wtr: impl Write) -> SvgResult<usize> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(rdr);
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(wtr);
    let mut replaced = 0;
    for record in reader.records() {
        let record = record?;
        let row: Vec<String> = record
            .iter()
            .map(|cell| match CdsColor::from_str(cell.trim()) {
                Some(color) => {
                    replaced += 1;
                    color.hex()
                }
                None => cell.to_string(),
            })
            .collect();
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(replaced)
}
