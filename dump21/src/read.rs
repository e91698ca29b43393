//!
//! # Dump Reading Module
//!
//! Facilities for reading dump content from file or string.
//! Dumps are line-oriented: each record opens with a keyword line,
//! and some records continue over further lines of numbers.
//!

// Standard Lib Imports
use std::path::Path;
use std::str::Lines;

// Crates.io Imports
use log::debug;
use serde::{Deserialize, Serialize};

// Local imports
use super::data::*;
use super::utils::{enumstr, EnumStr, ErrorHelper, Unwrapper};
use super::{DumpError, DumpResult};

/// Most points carried on a single polygon continuation line
pub const POINTS_PER_LINE: usize = 4;

/// Parse dump content from file `fname`
pub fn parse_file(fname: impl AsRef<Path>) -> DumpResult<DumpLibrary> {
    let src = std::fs::read_to_string(fname)?;
    parse_str(&src)
}
/// Parse dump content `src` from string
pub fn parse_str(src: &str) -> DumpResult<DumpLibrary> {
    DumpParser::new(src).parse_lib()
}

enumstr!(
    /// # Record Keywords
    /// The leading text of each record's first line.
    DumpKey {
        CellName: "Cell Name",
        CellInstance: "Cell Instance",
        Rectangle: "Rectangle",
        Polygon: "Polygon",
        EndCell: "End Cell Definition",
    }
);
impl DumpKey {
    /// Match the start of `line` against our keywords.
    /// Returns the keyword and the remainder of the line, with any leading colon removed.
    /// Keywords must be followed by white-space, a colon, or the end of the line.
    fn split(line: &str) -> Option<(Self, &str)> {
        let line = line.trim();
        for key in Self::VARIANTS.iter() {
            if let Some(rest) = line.strip_prefix(key.to_str()) {
                let boundary = match rest.chars().next() {
                    None => true,
                    Some(c) => c == ':' || c.is_whitespace(),
                };
                if boundary {
                    let rest = rest.trim_start();
                    let rest = rest.strip_prefix(':').unwrap_or(rest);
                    return Some((*key, rest.trim()));
                }
            }
        }
        None
    }
}

/// Split a line of numbers into its tokens.
/// White-space, commas, and parentheses all serve as separators.
fn tokens(txt: &str) -> Vec<&str> {
    txt.split(|c: char| c.is_whitespace() || c == ',' || c == '(' || c == ')')
        .filter(|s| !s.is_empty())
        .collect()
}

/// # Dump Parser
///
/// Single-pass, line-at-a-time reader of dump text.
/// Collects [DumpCell]s as their definitions close.
///
pub struct DumpParser<'src> {
    /// Source line iterator
    lines: Lines<'src>,
    /// Active line number, 1-based. Zero before the first line is read.
    line_num: usize,
    /// Active line content
    line: &'src str,
    /// Cell currently being defined, if any
    cell: Option<DumpCell>,
    /// Completed cells
    cells: Vec<DumpCell>,
}
impl<'src> DumpParser<'src> {
    /// Construct a [DumpParser] of input-text `src`
    pub fn new(src: &'src str) -> Self {
        Self {
            lines: src.lines(),
            line_num: 0,
            line: "",
            cell: None,
            cells: Vec::new(),
        }
    }
    /// Advance to the next line. Returns `false` at end of input.
    fn next_line(&mut self) -> bool {
        match self.lines.next() {
            Some(line) => {
                self.line_num += 1;
                self.line = line;
                true
            }
            None => false,
        }
    }
    /// Advance to a continuation line demanded by the current record
    fn expect_line(&mut self) -> DumpResult<()> {
        let more = self.next_line();
        self.assert(more, "unexpected end of input inside record")
    }
    /// Parse the entirety of our input into a [DumpLibrary]
    pub fn parse_lib(mut self) -> DumpResult<DumpLibrary> {
        while self.next_line() {
            let (key, rest) = match DumpKey::split(self.line) {
                Some(pair) => pair,
                None => continue, // Unrecognized lines are skipped
            };
            match key {
                DumpKey::CellName => self.parse_cell_name(rest)?,
                DumpKey::EndCell => self.close_cell(),
                DumpKey::Rectangle => {
                    let rect = self.parse_rect(rest)?;
                    self.push(rect)?;
                }
                DumpKey::Polygon => {
                    let poly = self.parse_polygon(rest)?;
                    self.push(poly)?;
                }
                DumpKey::CellInstance => {
                    let inst = self.parse_instance(rest)?;
                    self.push(inst)?;
                }
            }
        }
        self.close_cell();
        Ok(DumpLibrary { cells: self.cells })
    }
    /// Open a new cell definition, closing any still-open one
    fn parse_cell_name(&mut self, rest: &str) -> DumpResult<()> {
        self.assert(!rest.is_empty(), "missing cell name")?;
        self.close_cell();
        self.cell = Some(DumpCell::new(rest));
        Ok(())
    }
    /// Close the active cell definition, if there is one
    fn close_cell(&mut self) {
        if let Some(cell) = self.cell.take() {
            debug!("Read cell {:?}, {:?}", cell.name, cell.stats());
            self.cells.push(cell);
        }
    }
    /// Add an element to the active cell
    fn push(&mut self, elem: impl Into<DumpElement>) -> DumpResult<()> {
        let line_num = self.line_num;
        let line = self.line;
        match self.cell.as_mut() {
            Some(cell) => {
                cell.elems.push(elem.into());
                Ok(())
            }
            None => Err(DumpError::MalformedRecord {
                line: line_num,
                content: line.to_string(),
                reason: "element outside of any cell definition".into(),
            }),
        }
    }
    /// Parse a rectangle: `<layer> <x0> <y0> <x1> <y1>`
    fn parse_rect(&self, rest: &str) -> DumpResult<DumpRect> {
        let toks = tokens(rest);
        self.assert(toks.len() == 5, format!("rectangle expects 5 fields, found {}", toks.len()))?;
        Ok(DumpRect {
            layer: self.parse_layer(toks[0])?,
            p0: self.parse_point(toks[1], toks[2])?,
            p1: self.parse_point(toks[3], toks[4])?,
        })
    }
    /// Parse a polygon: `<layer> <count>`, and then continuation lines of up to [POINTS_PER_LINE] points each.
    fn parse_polygon(&mut self, rest: &str) -> DumpResult<DumpPolygon> {
        let toks = tokens(rest);
        self.assert(toks.len() == 2, format!("polygon expects 2 fields, found {}", toks.len()))?;
        let layer = self.parse_layer(toks[0])?;
        let count = toks[1]
            .parse::<usize>()
            .unwrapper(self, format!("invalid point count {:?}", toks[1]))?;
        self.assert(count > 0, "polygon declares no points")?;

        // Grows with the points actually read, never with the declared count
        let mut points = Vec::new();
        while points.len() < count {
            self.expect_line()?;
            let toks = tokens(self.line);
            let remaining = count - points.len();
            self.assert(toks.len() % 2 == 0, "odd number of coordinates")?;
            let n = toks.len() / 2;
            self.assert(
                n >= 1 && n <= POINTS_PER_LINE.min(remaining),
                format!("expected 1 to {} points, found {}", POINTS_PER_LINE.min(remaining), n),
            )?;
            for pair in toks.chunks(2) {
                points.push(self.parse_point(pair[0], pair[1])?);
            }
        }
        Ok(DumpPolygon { layer, points })
    }
    /// Parse an instance: `<cell name>`, and then a continuation line of `<x> <y> <angle> <mirror>`
    fn parse_instance(&mut self, rest: &str) -> DumpResult<DumpInstance> {
        self.assert(!rest.is_empty(), "missing instance cell name")?;
        let cell = rest.to_string();
        self.expect_line()?;
        let toks = tokens(self.line);
        self.assert(toks.len() == 4, format!("instance placement expects 4 fields, found {}", toks.len()))?;
        let loc = self.parse_point(toks[0], toks[1])?;
        let angle = toks[2]
            .parse::<f64>()
            .unwrapper(self, format!("invalid angle {:?}", toks[2]))?;
        let mirror = self.parse_flag(toks[3])?;
        Ok(DumpInstance {
            cell,
            loc,
            angle,
            mirror,
        })
    }
    fn parse_layer(&self, txt: &str) -> DumpResult<DumpLayer> {
        txt.parse::<DumpLayer>()
            .unwrapper(self, format!("invalid layer number {:?}", txt))
    }
    fn parse_point(&self, x: &str, y: &str) -> DumpResult<DumpPoint> {
        Ok(DumpPoint {
            x: self.parse_coord(x)?,
            y: self.parse_coord(y)?,
        })
    }
    fn parse_coord(&self, txt: &str) -> DumpResult<i64> {
        txt.parse::<i64>()
            .unwrapper(self, format!("invalid coordinate {:?}", txt))
    }
    /// Parse a boolean flag, in any of its accepted spellings
    fn parse_flag(&self, txt: &str) -> DumpResult<bool> {
        match txt.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "y" => Ok(true),
            "0" | "false" | "no" | "n" => Ok(false),
            _ => self.fail(format!("invalid mirror flag {:?}", txt)),
        }
    }
}
impl ErrorHelper for DumpParser<'_> {
    type Error = DumpError;
    fn err(&self, msg: impl Into<String>) -> DumpError {
        DumpError::MalformedRecord {
            line: self.line_num,
            content: self.line.to_string(),
            reason: msg.into(),
        }
    }
}
