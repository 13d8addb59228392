//! Input and output helpers for fieldhtml

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Path that stands for standard input.
pub const STDIN_PATH: &str = "-";

/// Reads text from a file, or from standard input when path is `-`.
///
/// # Errors
///
/// Returns error if the file or standard input cannot be read as UTF-8.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new(STDIN_PATH) {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read standard input")?;
        return Ok(content);
    }

    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Reads and deserializes a JSON file.
///
/// # Errors
///
/// Returns error if the file cannot be read or does not match `T`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = read_input(path)?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Serializes a value as JSON with four-space indentation.
///
/// Object keys come out sorted because `serde_json::Map` is ordered.
///
/// # Errors
///
/// Returns error if serialization fails.
pub fn to_json_string<T: Serialize>(value: &T) -> Result<String> {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut serializer)
        .context("Failed to serialize JSON")?;
    String::from_utf8(buffer).context("Serialized JSON is not valid UTF8")
}

/// Writes a value as indented JSON, creating parent directories.
///
/// # Errors
///
/// Returns error if directory creation, serialization or the write fails.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    fs::write(path, to_json_string(value)?)
        .with_context(|| format!("Failed to write {}", path.display()))
}
