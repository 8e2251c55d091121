//! File dialogs as a capability supplied by the host environment.

use crate::data::{self, ImportError};
use crate::export::{ExportError, ExportFormat};
use std::path::PathBuf;

/// What the editor needs from the outside world for import and export.
/// `Ok(None)` means the user cancelled.
pub trait FileHost {
    fn open_text(&self) -> Result<Option<String>, ImportError>;
    fn save(&self, bytes: &[u8], format: ExportFormat) -> Result<Option<PathBuf>, ExportError>;
}

/// Native dialogs via `rfd`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RfdHost;

impl FileHost for RfdHost {
    fn open_text(&self) -> Result<Option<String>, ImportError> {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .add_filter("All Files", &["*"])
            .pick_file()
        else {
            return Ok(None);
        };
        log::info!("importing {}", path.display());
        data::read_text(&path).map(Some)
    }

    fn save(&self, bytes: &[u8], format: ExportFormat) -> Result<Option<PathBuf>, ExportError> {
        let Some(path) = rfd::FileDialog::new()
            .add_filter(format.label(), &[format.extension()])
            .set_file_name(format!("chart.{}", format.extension()))
            .save_file()
        else {
            return Ok(None);
        };
        std::fs::write(&path, bytes)?;
        Ok(Some(path))
    }
}
