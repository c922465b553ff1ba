use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Pretty-prints any serializable object as JSON.
pub fn to_json<T: Serialize>(obj: &T) -> Result<String> {
    serde_json::to_string_pretty(obj).context("serializing to JSON")
}

pub fn from_json<T: DeserializeOwned>(raw: &[u8]) -> Result<T> {
    serde_json::from_slice(raw).context("parsing JSON")
}

/// Writes an object as pretty JSON, creating parent directories as needed.
pub fn write_json<T: Serialize>(path: &str, obj: &T) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs_err::create_dir_all(parent)?;
        }
    }
    fs_err::write(path, to_json(obj)?)?;
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    let raw = fs_err::read(path)?;
    from_json(&raw).with_context(|| format!("reading {}", path))
}
