//!
//! # Dump to SVG Conversion Implementation
//! The core logic for `dump2svg`.
//!

// Std-Lib
use std::path::{Path, PathBuf};

// Crates.io
use log::{debug, info, warn};

// Local Imports
use crate::config::{Config, DEFAULT_COLORS};
use crate::tools::{convert_binary, fit_canvas, ExternalTool};
use crate::ConvResult;
use layout21raw::dump::DumpImporter;
use layout21raw::LayerNum;
use layout21svg::ColorTable;

/// # Dump to SVG Conversion Options
/// The program's command-line options, without the `clap` annotations.
#[derive(Debug, Clone, Default)]
pub struct Dump2SvgOptions {
    /// Layout dump, or binary layout file
    pub input: PathBuf,
    /// Output SVG. Defaults to `input` with extension `svg`.
    pub output: Option<PathBuf>,
    /// Top-level cell name. Defaults to the last cell defined.
    pub cell: Option<String>,
    /// Color table. Defaults to the configured table, or [DEFAULT_COLORS].
    pub colors: Option<PathBuf>,
    /// Configuration file
    pub config: Option<PathBuf>,
    /// Fit the output canvas with the configured viewer
    pub fit: bool,
}

/// # Conversion Summary
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub output: PathBuf,
    pub shapes: usize,
    pub groups: usize,
    /// Layers absent from the color table
    pub undefined: Vec<LayerNum>,
}

/// Core implementation, converting an on-disk dump (or binary layout) to an on-disk SVG.
pub fn convert(options: &Dump2SvgOptions) -> ConvResult<Summary> {
    let config = Config::load(options.config.as_deref())?;

    // Locate any required converter before touching the input
    let converter = if config.is_binary(&options.input) {
        Some(ExternalTool::locate(&config.converter)?)
    } else {
        None
    };

    // Load the color table before the layout, so that table errors abort early
    let colors_path = color_table_path(options, &config);
    let colors = ColorTable::open(&colors_path)?;
    debug!("Read {} layer colors from {:?}", colors.len(), colors_path);

    let dump_path = match converter {
        Some(tool) => convert_binary(&tool, &options.input)?,
        None => options.input.clone(),
    };
    let dump = dump21::parse_file(&dump_path)?;
    info!("Read {:?}: {:?}", dump_path, dump.stats());
    let lib = DumpImporter::import(&dump, library_name(&dump_path))?;
    let top = lib.top(options.cell.as_deref())?;
    info!("Top-level cell {:?}", lib.cells[top].name);

    // Render fully before creating the output file
    let rendered = layout21svg::render(&lib, top, &colors, &config.svg_options())?;
    let output = output_path(options);
    rendered.save(&output)?;
    info!("Wrote {} shapes to {:?}", rendered.shapes, output);
    if !rendered.undefined.is_empty() {
        warn!(
            "{} layers not defined in the color table: {:?}",
            rendered.undefined.len(),
            rendered.undefined
        );
    }

    if options.fit {
        fit_canvas(&config.viewer, &output);
    }
    Ok(Summary {
        output,
        shapes: rendered.shapes,
        groups: rendered.groups,
        undefined: rendered.undefined,
    })
}

/// Color table path: the command-line's, else the configuration's, else [DEFAULT_COLORS]
fn color_table_path(options: &Dump2SvgOptions, config: &Config) -> PathBuf {
    options
        .colors
        .clone()
        .or_else(|| config.colors.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_COLORS))
}
fn output_path(options: &Dump2SvgOptions) -> PathBuf {
    options
        .output
        .clone()
        .unwrap_or_else(|| options.input.with_extension("svg"))
}
fn library_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConvError;
    use layout21raw::LayoutError;
    use layout21svg::SvgError;
    use std::fs;

    const DUMP: &str = r#"
Library Name: demo
Cell Name: inv
Rectangle: 1 0 0 100 50
Polygon: 2 4
  (0,0) (10,0) (10,10) (0,10)
Rectangle: 7 0 0 5 5
End Cell Definition
Cell Name: top
Cell Instance: inv
  (0, 0) 0 0
Cell Instance: inv
  (500, 0) 180 1
End Cell Definition
"#;
    const COLORS: &str = "layer,fill,opacity,stroke,label\n1,red,0.5,#000000,m1\n2,#00ff00,0.5,blue,m2\n";

    /// Write the test dump and color table into a new temporary directory
    fn setup(dump_name: &str) -> ConvResult<(tempfile::TempDir, Dump2SvgOptions)> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join(dump_name);
        fs::write(&input, DUMP)?;
        let colors = dir.path().join("colors.csv");
        fs::write(&colors, COLORS)?;
        let options = Dump2SvgOptions {
            input,
            colors: Some(colors),
            ..Default::default()
        };
        Ok((dir, options))
    }

    #[test]
    fn converts_dump() -> ConvResult<()> {
        let (dir, options) = setup("demo.txt")?;
        let summary = convert(&options)?;
        assert_eq!(summary.output, dir.path().join("demo.svg"));
        assert_eq!(summary.shapes, 6);
        assert_eq!(summary.groups, 3);
        assert_eq!(summary.undefined, vec![7]);

        let svg = fs::read_to_string(&summary.output)?;
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"inkscape:label="m1 1""#));
        assert!(svg.contains(r#"inkscape:label="m2 2""#));
        assert!(svg.contains(r#"inkscape:label="unknown 7""#));
        assert!(svg.contains("fill:#ff0000;fill-opacity:0.5;stroke:#000000"));
        assert!(svg.contains("M 0,0 L 0,-5 L 10,-5 L 10,0 L 0,0 Z"));
        // Second instance: rotated 180, mirrored, placed at (500, 0)
        assert!(svg.contains("M 50,0 L 50,-5 L 40,-5 L 40,0 L 50,0 Z"));
        assert_eq!(svg.matches("<path").count(), 6);
        Ok(())
    }

    #[test]
    fn selects_cell_and_output() -> ConvResult<()> {
        let (dir, mut options) = setup("demo.txt")?;
        options.cell = Some("inv".into());
        options.output = Some(dir.path().join("out.svg"));
        let summary = convert(&options)?;
        assert_eq!(summary.shapes, 3);
        assert!(dir.path().join("out.svg").exists());
        assert!(!dir.path().join("demo.svg").exists());
        Ok(())
    }

    #[test]
    fn configured_scale_and_colors() -> ConvResult<()> {
        let (dir, mut options) = setup("demo.txt")?;
        let cfg = dir.path().join("cfg.toml");
        fs::write(
            &cfg,
            format!(
                "scale = 1.0\nwidth = \"640\"\ncolors = {:?}\n",
                options.colors.take().unwrap()
            ),
        )?;
        options.config = Some(cfg);
        options.cell = Some("inv".into());
        let summary = convert(&options)?;
        let svg = fs::read_to_string(&summary.output)?;
        assert!(svg.contains("M 0,0 L 0,-50 L 100,-50 L 100,0 L 0,0 Z"));
        assert!(svg.contains(r#"width="640""#));
        Ok(())
    }

    #[test]
    fn unknown_cell() -> ConvResult<()> {
        let (dir, mut options) = setup("demo.txt")?;
        options.cell = Some("nand".into());
        match convert(&options) {
            Err(ConvError::Layout(LayoutError::UnresolvedCellReference { cell, .. })) => {
                assert_eq!(cell, "nand")
            }
            other => panic!("expected UnresolvedCellReference, got {:?}", other),
        }
        assert!(!dir.path().join("demo.svg").exists());
        Ok(())
    }

    #[test]
    fn invalid_color_table() -> ConvResult<()> {
        let (dir, options) = setup("demo.txt")?;
        fs::write(options.colors.as_ref().unwrap(), "h,h,h,h,h\n1,#fff,1\n")?;
        // The table is rejected before the (also malformed) dump is read
        fs::write(&options.input, "Cell Name: c\nRectangle: x\n")?;
        assert!(matches!(
            convert(&options),
            Err(ConvError::Svg(SvgError::InvalidColorTable { line: 2, .. }))
        ));
        assert!(!dir.path().join("demo.svg").exists());
        Ok(())
    }

    #[test]
    fn malformed_dump() -> ConvResult<()> {
        let (_dir, options) = setup("demo.txt")?;
        fs::write(&options.input, "Cell Name: c\nRectangle: 1 0 0 x 5\n")?;
        assert!(matches!(
            convert(&options),
            Err(ConvError::Dump(dump21::DumpError::MalformedRecord { line: 2, .. }))
        ));
        Ok(())
    }

    #[test]
    fn missing_converter() -> ConvResult<()> {
        let (dir, mut options) = setup("demo.GDS")?;
        let cfg = dir.path().join("cfg.json");
        fs::write(&cfg, r#"{"converter": {"program": "surely-not-a-gds-converter-21"}}"#)?;
        options.config = Some(cfg);
        // Check the converter before the (here, absent) color table
        options.colors = Some(dir.path().join("missing.csv"));
        assert!(matches!(
            convert(&options),
            Err(ConvError::MissingExternalTool { .. })
        ));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn runs_converter() -> ConvResult<()> {
        // "Convert" with a plain copy, the input already being a dump
        let (dir, mut options) = setup("demo.gds")?;
        let cfg = dir.path().join("cfg.yaml");
        fs::write(&cfg, "converter:\n  program: cp\n  args: [\"{input}\", \"{output}\"]\n")?;
        options.config = Some(cfg);
        let summary = convert(&options)?;
        assert!(dir.path().join("demo.txt").exists());
        assert_eq!(summary.output, dir.path().join("demo.svg"));
        assert_eq!(summary.shapes, 6);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn failing_converter() -> ConvResult<()> {
        let (dir, mut options) = setup("demo.gds")?;
        let cfg = dir.path().join("cfg.toml");
        fs::write(&cfg, "[converter]\nprogram = \"false\"\n")?;
        options.config = Some(cfg);
        assert!(matches!(
            convert(&options),
            Err(ConvError::ToolFailed { .. })
        ));
        assert!(!dir.path().join("demo.svg").exists());
        Ok(())
    }
}
