//!
//! # SVG Emission
//!
//! [SvgEmitter] collects flattened shapes as `<path>` elements,
//! then sorts and groups them by layer into an [svg::Document].
//!

// Std-Lib
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::io::{BufWriter, Write};
use std::path::Path as FsPath;

// Crates.io
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use svg::node::element::{Group, Path};
use svg::Document;

// Local Imports
use crate::{ColorTable, SvgResult};
use layout21raw::{CellKey, FlatShape, FlatSink, Int, LayerNum, Library, Point};

/// Label and style of layers absent from the [ColorTable]
pub const UNKNOWN_LABEL: &str = "unknown";
pub const UNKNOWN_STYLE: &str = "fill:#000000;fill-opacity:0;stroke:none";

/// XML declaration, leading each document
pub const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#;

/// # Svg Rendering Options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgOptions {
    /// Divisor from layout database units to SVG user units
    pub scale: f64,
    /// Root `width` attribute
    pub width: String,
    /// Root `height` attribute
    pub height: String,
}
impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            scale: 10.0,
            width: "100%".into(),
            height: "100%".into(),
        }
    }
}

/// Expand `top` and render it into an SVG document
pub fn render(
    lib: &Library,
    top: CellKey,
    colors: &ColorTable,
    options: &SvgOptions,
) -> SvgResult<Rendered> {
    let mut emitter = SvgEmitter::new(colors, options.scale);
    lib.flatten_into(top, &mut emitter)?;
    Ok(emitter.finish(options))
}

/// # Svg Emitter
///
/// Emission buffer of `(layer, path)` pairs, plus the running shape-id counter
/// and the set of layers with no [ColorTable] entry.
///
pub struct SvgEmitter<'c> {
    colors: &'c ColorTable,
    scale: f64,
    counter: usize,
    entries: Vec<(LayerNum, Path)>,
    undefined: BTreeSet<LayerNum>,
}
impl<'c> SvgEmitter<'c> {
    pub fn new(colors: &'c ColorTable, scale: f64) -> Self {
        Self {
            colors,
            scale,
            counter: 0,
            entries: Vec::new(),
            undefined: BTreeSet::new(),
        }
    }
    /// Number of shapes collected so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    /// Layers seen without a [ColorTable] entry, in ascending order
    pub fn undefined(&self) -> impl Iterator<Item = LayerNum> + '_ {
        self.undefined.iter().copied()
    }
    /// Label for `layer`, recording it as undefined if the [ColorTable] has no entry
    fn label(&mut self, layer: LayerNum) -> String {
        match self.colors.get(layer) {
            Some(style) => style.label.clone(),
            None => {
                if self.undefined.insert(layer) {
                    warn!("Layer {} is not defined in the color table", layer);
                }
                UNKNOWN_LABEL.to_string()
            }
        }
    }
    /// Add a shape's `<path>` to the buffer
    pub fn push(&mut self, shape: &FlatShape) {
        let label = self.label(shape.layer);
        let path = Path::new()
            .set("id", format!("{}_{}", label, self.counter))
            .set("d", path_data(&shape.points, self.scale));
        self.counter += 1;
        self.entries.push((shape.layer, path));
    }
    /// Sort by layer and group into a [Rendered] document
    pub fn finish(self, options: &SvgOptions) -> Rendered {
        let Self {
            colors,
            mut entries,
            undefined,
            ..
        } = self;
        let shapes = entries.len();
        // Stable, so that shapes keep their expansion order within each layer
        entries.sort_by_key(|(layer, _)| *layer);

        let mut document = Document::new()
            .set("xmlns", "http://www.w3.org/2000/svg")
            .set("xmlns:inkscape", "http://www.inkscape.org/namespaces/inkscape")
            .set("xmlns:sodipodi", "http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd")
            .set("version", "1.1")
            .set("width", options.width.as_str())
            .set("height", options.height.as_str());

        let mut groups = 0;
        let mut entries = entries.into_iter();
        if let Some((first, path)) = entries.next() {
            let mut current_layer = first;
            let mut current_group = layer_group(colors, first).add(path);
            for (layer, path) in entries {
                if layer != current_layer {
                    document = document.add(current_group);
                    groups += 1;
                    current_layer = layer;
                    current_group = layer_group(colors, layer);
                }
                current_group = current_group.add(path);
            }
            document = document.add(current_group);
            groups += 1;
        }
        debug!("Grouped {} shapes into {} layers", shapes, groups);
        Rendered {
            document,
            shapes,
            groups,
            undefined: undefined.into_iter().collect(),
        }
    }
}
impl FlatSink for SvgEmitter<'_> {
    fn shape(&mut self, shape: FlatShape) {
        self.push(&shape)
    }
}

/// Create the (empty) `<g>` layer-group for `layer`
fn layer_group(colors: &ColorTable, layer: LayerNum) -> Group {
    let (style, label) = match colors.get(layer) {
        Some(s) => (
            format!(
                "fill:{};fill-opacity:{};stroke:{};stroke-width:0;stroke-linecap:round;stroke-linejoin:round",
                s.fill, s.fill_opacity, s.stroke
            ),
            s.label.as_str(),
        ),
        None => (UNKNOWN_STYLE.to_string(), UNKNOWN_LABEL),
    };
    Group::new()
        .set("style", style)
        .set("id", format!("{}_{}", label, layer))
        .set("inkscape:groupmode", "layer")
        .set("inkscape:label", format!("{} {}", label, layer))
}

/// Create `<path>` data `M x,y L x,y ... Z` from `points`,
/// scaled by `1/scale` and with y inverted.
pub fn path_data(points: &[Point], scale: f64) -> String {
    let mut d = String::new();
    for (idx, p) in points.iter().enumerate() {
        let cmd = if idx == 0 { "M" } else { " L" };
        // Writing to a String never fails
        let _ = write!(d, "{} {},{}", cmd, coord(p.x, scale), coord(-p.y, scale));
    }
    d.push_str(" Z");
    d
}
fn coord(v: Int, scale: f64) -> f64 {
    v as f64 / scale
}

/// # Rendered Document
/// Plus a summary of its content.
pub struct Rendered {
    pub document: Document,
    /// Number of `<path>` elements
    pub shapes: usize,
    /// Number of layer groups
    pub groups: usize,
    /// Layers without a [ColorTable] entry, ascending
    pub undefined: Vec<LayerNum>,
}
impl Rendered {
    /// Serialize to string, including the XML declaration
    pub fn to_svg_string(&self) -> String {
        let body = self.document.to_string();
        if body.starts_with("<?xml") {
            body
        } else {
            format!("{}\n{}\n", XML_DECL, body)
        }
    }
    /// Write to `writer`
    pub fn write(&self, writer: &mut impl Write) -> SvgResult<()> {
        writer.write_all(self.to_svg_string().as_bytes())?;
        writer.flush()?;
        Ok(())
    }
    /// Save to file `fname`
    pub fn save(&self, fname: impl AsRef<FsPath>) -> SvgResult<()> {
        let file = std::fs::File::create(fname)?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer)?;
        info!("Wrote {} shapes in {} layers", self.shapes, self.groups);
        Ok(())
    }
}
