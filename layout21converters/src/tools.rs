//!
//! # External Tools
//!
//! Location and invocation of the binary-layout converter and the SVG viewer.
//!

// Std-Lib
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

// Crates.io
use log::{debug, info};

// Local Imports
use crate::config::{ToolConfig, ViewerConfig};
use crate::{ConvError, ConvResult};

/// Find `program` on the `PATH`.
/// Names including a path separator are instead checked as paths.
pub fn find_program(program: &str) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }
    let direct = Path::new(program);
    if direct.components().count() > 1 {
        return direct.is_file().then(|| direct.to_path_buf());
    }
    let paths = env::var_os("PATH")?;
    for dir in env::split_paths(&paths) {
        let candidate = dir.join(program);
        if candidate.is_file() {
            return Some(candidate);
        }
        if cfg!(windows) {
            let exe = candidate.with_extension("exe");
            if exe.is_file() {
                return Some(exe);
            }
        }
    }
    None
}

/// Replace the `{input}` and `{output}` placeholders of each of `args`
pub fn expand_args(args: &[String], input: &Path, output: &Path) -> Vec<String> {
    let input = input.to_string_lossy();
    let output = output.to_string_lossy();
    args.iter()
        .map(|a| a.replace("{input}", &input).replace("{output}", &output))
        .collect()
}

/// # External Tool
/// A located external program, with its argument template.
#[derive(Debug, Clone)]
pub struct ExternalTool {
    pub name: String,
    pub path: PathBuf,
    pub args: Vec<String>,
}
impl ExternalTool {
    /// Locate the program configured in `cfg`, failing with [ConvError::MissingExternalTool] if not found
    pub fn locate(cfg: &ToolConfig) -> ConvResult<Self> {
        let path = find_program(&cfg.program).ok_or_else(|| ConvError::MissingExternalTool {
            tool: cfg.program.clone(),
        })?;
        debug!("Found {:?} at {:?}", cfg.program, path);
        Ok(Self {
            name: cfg.program.clone(),
            path,
            args: cfg.args.clone(),
        })
    }
    /// Run to completion. Fails with [ConvError::ToolFailed] unless the exit status is success.
    pub fn run(&self, input: &Path, output: &Path) -> ConvResult<()> {
        let args = expand_args(&self.args, input, output);
        debug!("Running {:?} {:?}", self.path, args);
        let status = Command::new(&self.path)
            .args(&args)
            .status()
            .map_err(|e| self.failed(e.to_string()))?;
        if !status.success() {
            return Err(self.failed(status.to_string()));
        }
        Ok(())
    }
    fn failed(&self, status: String) -> ConvError {
        ConvError::ToolFailed {
            tool: self.name.clone(),
            status,
        }
    }
}

/// # Binary Layout Converter
/// Run `tool` to convert binary layout file `input` to a dump alongside it, returning the dump's path.
pub fn convert_binary(tool: &ExternalTool, input: &Path) -> ConvResult<PathBuf> {
    let output = input.with_extension("txt");
    info!("Converting {:?} to {:?} with {:?}", input, output, tool.name);
    tool.run(input, &output)?;
    Ok(output)
}

/// Fit the canvas of `svg` to its drawing with the configured viewer.
/// Any failure, including a missing viewer, is ignored.
pub fn fit_canvas(cfg: &ViewerConfig, svg: &Path) {
    if !cfg.enabled {
        return;
    }
    let result = ExternalTool::locate(&cfg.tool()).and_then(|tool| tool.run(svg, svg));
    if let Err(e) = result {
        debug!("Canvas fitting skipped: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_placeholders() {
        let args: Vec<String> = vec!["-i".into(), "{input}".into(), "--out={output}".into()];
        assert_eq!(
            expand_args(&args, Path::new("a.gds"), Path::new("a.txt")),
            vec!["-i", "a.gds", "--out=a.txt"]
        );
    }
    #[test]
    fn missing_program() {
        let cfg = ToolConfig {
            program: "surely-not-an-installed-program-21".into(),
            args: vec![],
        };
        match ExternalTool::locate(&cfg) {
            Err(ConvError::MissingExternalTool { tool }) => assert_eq!(tool, cfg.program),
            other => panic!("expected MissingExternalTool, got {:?}", other),
        }
        assert!(find_program("").is_none());
        assert!(find_program("./no/such/dir/tool").is_none());
    }
    #[test]
    fn explicit_paths() -> ConvResult<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("tool");
        std::fs::write(&path, "")?;
        assert_eq!(find_program(path.to_str().unwrap()), Some(path.clone()));
        Ok(())
    }
    #[cfg(unix)]
    #[test]
    fn runs_tools() -> ConvResult<()> {
        let ok = ExternalTool::locate(&ToolConfig {
            program: "true".into(),
            args: vec![],
        })?;
        ok.run(Path::new("a"), Path::new("b"))?;

        let bad = ExternalTool::locate(&ToolConfig {
            program: "false".into(),
            args: vec![],
        })?;
        assert!(matches!(
            bad.run(Path::new("a"), Path::new("b")),
            Err(ConvError::ToolFailed { .. })
        ));
        Ok(())
    }
    #[test]
    fn disabled_or_missing_viewer_is_quiet() {
        let mut cfg = ViewerConfig::default();
        cfg.enabled = false;
        fit_canvas(&cfg, Path::new("x.svg"));
        cfg.enabled = true;
        cfg.program = "surely-not-an-installed-viewer-21".into();
        fit_canvas(&cfg, Path::new("x.svg"));
    }
}
