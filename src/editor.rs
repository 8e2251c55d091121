//! Chart Editor State
//! Owns the source text, parsed points and configuration; every mutation
//! bumps a revision counter that the preview watches.

use crate::config::{ChartConfig, ConfigUpdate};
use crate::data::{parse_csv, ChartPoint, DataMode, ImportError};
use crate::export::{self, ExportError, ExportFormat};
use crate::host::FileHost;
use std::path::PathBuf;
use std::sync::Arc;

pub const SAMPLE_DATA: &str = "Label,Series 1,Series 2\nA,1,2\nB,2,3\nC,3,1";

/// Immutable configuration + points handed to the renderer.
#[derive(Debug, Clone)]
pub struct ChartSnapshot {
    pub config: ChartConfig,
    pub points: Arc<[ChartPoint]>,
}

impl ChartSnapshot {
    pub fn new(config: ChartConfig, points: impl Into<Arc<[ChartPoint]>>) -> Self {
        Self {
            config,
            points: points.into(),
        }
    }
}

pub struct ChartEditor {
    source: String,
    mode: DataMode,
    points: Arc<[ChartPoint]>,
    config: ChartConfig,
    revision: u64,
}

impl Default for ChartEditor {
    fn default() -> Self {
        Self::new(ChartConfig::default(), DataMode::Multi)
    }
}

impl ChartEditor {
    /// Starts with the bundled sample data, parsed under `mode`.
    pub fn new(config: ChartConfig, mode: DataMode) -> Self {
        let mut editor = Self {
            source: SAMPLE_DATA.to_string(),
            mode,
            points: Arc::from(Vec::new()),
            config,
            revision: 0,
        };
        editor.apply_data();
        editor
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn mode(&self) -> DataMode {
        self.mode
    }

    pub fn points(&self) -> &[ChartPoint] {
        &self.points
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the source text and re-parse it.
    pub fn set_source(&mut self, text: impl Into<String>) {
        self.source = text.into();
        self.apply_data();
    }

    /// Re-parse the current text, replacing every point.
    pub fn apply_data(&mut self) {
        let points = parse_csv(&self.source, self.mode);
        log::debug!(
            "parsed {} points from {} bytes ({})",
            points.len(),
            self.source.len(),
            self.mode.label()
        );
        self.points = points.into();
        self.revision += 1;
    }

    pub fn set_mode(&mut self, mode: DataMode) {
        self.mode = mode;
        self.apply_data();
    }

    /// Ask the host for a file. Returns whether new data was loaded.
    pub fn import(&mut self, host: &dyn FileHost) -> Result<bool, ImportError> {
        match host.open_text()? {
            Some(text) => {
                self.set_source(text);
                log::info!("imported {} points", self.points.len());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn update(&mut self, update: ConfigUpdate) {
        self.config.apply(update);
        self.revision += 1;
    }

    pub fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot::new(self.config.clone(), Arc::clone(&self.points))
    }

    /// Render the current snapshot and hand the bytes to the host.
    pub fn export(
        &self,
        format: ExportFormat,
        host: &dyn FileHost,
    ) -> Result<Option<PathBuf>, ExportError> {
        let bytes = export::render_bytes(&self.snapshot(), format)?;
        let saved = host.save(&bytes, format)?;
        if let Some(path) = &saved {
            log::info!(
                "exported {} ({} bytes) to {}",
                format.label(),
                bytes.len(),
                path.display()
            );
        }
        Ok(saved)
    }
}
