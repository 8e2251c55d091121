//! CSV File Loader Module
//! Reads an imported file as UTF-8 text for the parser.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0} is not valid UTF-8 text")]
    Encoding(PathBuf),
}

const UTF8_BOM: &str = "\u{feff}";

/// Read a data file as text, dropping a leading byte-order mark.
pub fn read_text(path: &Path) -> Result<String, ImportError> {
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|_| ImportError::Encoding(path.to_path_buf()))?;
    Ok(match text.strip_prefix(UTF8_BOM) {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}
