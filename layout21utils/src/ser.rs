//!
//! # Serialization & Deserialization Utilities
//! (and file IO for those serialized objects)
//!

// Standard Lib Imports
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

// Crates.io Imports
use serde::de::DeserializeOwned;

/// # Enumerated First-Class-Supported Serialization Formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializationFormat {
    Json,
    Yaml,
    Toml,
}
impl SerializationFormat {
    /// Infer the format from the extension of file `fname`
    pub fn from_path(fname: impl AsRef<Path>) -> Result<Self, Error> {
        let ext = fname
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        ext.to_ascii_lowercase().parse()
    }
    /// Load from file at path `fname`
    pub fn open<T: DeserializeOwned>(&self, fname: impl AsRef<Path>) -> Result<T, Error> {
        let file = std::fs::File::open(&fname)?;
        let mut file = BufReader::new(file);
        let rv: T = match *self {
            Self::Json => serde_json::from_reader(file)?,
            Self::Yaml => serde_yaml::from_reader(file)?,
            Self::Toml => {
                let mut s = String::new();
                file.read_to_string(&mut s)?;
                toml::from_str(&s)?
            }
        };
        Ok(rv)
    }
}
impl FromStr for SerializationFormat {
    type Err = Error;
    /// Parse a format name, or a file extension, into a [SerializationFormat]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            _ => Err(Error(
                format!("Invalid format: {:?}. Must be one of (json, yaml, toml).", s).into(),
            )),
        }
    }
}

/// Wrapper over other errors
#[derive(Debug)]
pub struct Error(Box<dyn std::error::Error + Send + Sync>);
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
impl std::error::Error for Error {}
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self(Box::new(e))
    }
}
impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Self(Box::new(e))
    }
}
impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self(Box::new(e))
    }
}
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self(Box::new(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Settings {
        scale: u32,
        width: String,
    }

    #[test]
    fn format_from_path() -> Result<(), Error> {
        assert_eq!(SerializationFormat::from_path("a/b.toml")?, SerializationFormat::Toml);
        assert_eq!(SerializationFormat::from_path("c.YML")?, SerializationFormat::Yaml);
        assert_eq!(SerializationFormat::from_path("d.json")?, SerializationFormat::Json);
        assert!(SerializationFormat::from_path("noext").is_err());
        Ok(())
    }
    #[test]
    fn opens_each_format() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let expected = Settings {
            scale: 10,
            width: "100%".into(),
        };
        for (name, txt) in [
            ("s.json", r#"{"scale": 10, "width": "100%"}"#),
            ("s.yaml", "scale: 10\nwidth: \"100%\"\n"),
            ("s.toml", "scale = 10\nwidth = \"100%\"\n"),
        ] {
            let path = dir.path().join(name);
            std::fs::write(&path, txt)?;
            let s: Settings = SerializationFormat::from_path(&path)?.open(&path)?;
            assert_eq!(s, expected, "{}", name);
        }
        Ok(())
    }
    #[test]
    fn missing_file() {
        let res: Result<Settings, Error> = SerializationFormat::Toml.open("surely/not/here.toml");
        assert!(res.is_err());
    }
}
