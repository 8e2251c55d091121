//! Chart Export Module
//! Turns a chart snapshot into PNG, JPEG or PDF bytes.

use crate::charts::{self, ChartView, PdfBackend, RenderError};
use crate::editor::ChartSnapshot;
use image::{ImageFormat, RgbImage};
use plotters::prelude::IntoDrawingArea;
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    #[error("Encode error: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Write error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0:?} is not a raster format")]
    NotRaster(ExportFormat),
    #[error("Pixel buffer does not match {width}x{height}")]
    BufferSize { width: u32, height: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Png, ExportFormat::Jpeg, ExportFormat::Pdf];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG",
            ExportFormat::Jpeg => "JPEG",
            ExportFormat::Pdf => "PDF",
        }
    }
}

/// Render the snapshot and encode it in the requested format.
pub fn render_bytes(
    snapshot: &ChartSnapshot,
    format: ExportFormat,
) -> Result<Vec<u8>, ExportError> {
    let view = ChartView::from_snapshot(snapshot);
    let (width, height) = view.size();

    match format {
        ExportFormat::Png | ExportFormat::Jpeg => {
            let rgb = charts::render_rgb(&view)?;
            encode_rgb(rgb, width, height, format)
        }
        ExportFormat::Pdf => {
            let mut out = Vec::new();
            {
                let root = PdfBackend::with_buffer(&mut out, (width, height)).into_drawing_area();
                charts::draw_chart(&root, &view).map_err(|e| RenderError::Draw(e.to_string()))?;
                root.present().map_err(|e| RenderError::Draw(e.to_string()))?;
            }
            Ok(out)
        }
    }
}

/// Encode a packed RGB8 buffer with the encoder defaults of the `image` crate.
pub fn encode_rgb(
    rgb: Vec<u8>,
    width: u32,
    height: u32,
    format: ExportFormat,
) -> Result<Vec<u8>, ExportError> {
    let image_format = match format {
        ExportFormat::Png => ImageFormat::Png,
        ExportFormat::Jpeg => ImageFormat::Jpeg,
        ExportFormat::Pdf => return Err(ExportError::NotRaster(format)),
    };
    let img = RgbImage::from_raw(width, height, rgb)
        .ok_or(ExportError::BufferSize { width, height })?;

    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image_format)?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChartConfig, ConfigUpdate};
    use crate::data::{parse_csv, DataMode};

    fn sample_snapshot() -> ChartSnapshot {
        ChartSnapshot::new(
            ChartConfig::default(),
            parse_csv("Label,Value\nA,1\nB,2\nC,3", DataMode::Single),
        )
    }

    #[test]
    fn test_encode_png_and_jpeg_signatures() {
        let rgb = vec![200u8; 4 * 3 * 3];
        let png = encode_rgb(rgb.clone(), 4, 3, ExportFormat::Png).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let jpeg = encode_rgb(rgb, 4, 3, ExportFormat::Jpeg).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_rejects_short_buffer() {
        let result = encode_rgb(vec![0u8; 5], 4, 3, ExportFormat::Png);
        assert!(matches!(
            result,
            Err(ExportError::BufferSize {
                width: 4,
                height: 3
            })
        ));
        assert!(matches!(
            encode_rgb(vec![0u8; 36], 4, 3, ExportFormat::Pdf),
            Err(ExportError::NotRaster(ExportFormat::Pdf))
        ));
    }

    #[test]
    fn test_pdf_uses_canvas_size() {
        let snapshot = sample_snapshot();
        let pdf = render_bytes(&snapshot, ExportFormat::Pdf).unwrap();
        let text = String::from_utf8_lossy(&pdf);
        assert!(text.starts_with("%PDF-1.4"));
        assert!(text.contains("/MediaBox [0 0 640 480]"));
        assert!(text.contains("(Sample Chart) Tj"));
        assert!(text.trim_end().ends_with("%%EOF"));
    }

    /// A chart with no text, so raster rendering needs no system fonts.
    fn textless_snapshot() -> ChartSnapshot {
        let mut config = ChartConfig::default();
        config.apply(ConfigUpdate::Title(String::new()));
        config.apply(ConfigUpdate::ShowXAxis(false));
        config.apply(ConfigUpdate::ShowYAxis(false));
        ChartSnapshot::new(
            config,
            parse_csv("Label,Value\nA,1\nB,2\nC,3", DataMode::Single),
        )
    }

    #[test]
    fn test_raster_exports_decode_at_canvas_size() {
        let snapshot = textless_snapshot();
        let canvas = snapshot.config.canvas;
        for format in [ExportFormat::Png, ExportFormat::Jpeg] {
            let bytes = render_bytes(&snapshot, format).unwrap();
            let img = image::load_from_memory(&bytes).unwrap().to_rgb8();
            assert_eq!(img.dimensions(), (canvas.width, canvas.height));
            assert!(img.pixels().any(|p| p.0 != [255, 255, 255]));
        }
    }

    #[test]
    fn test_format_metadata() {
        let extensions: Vec<_> = ExportFormat::ALL.iter().map(|f| f.extension()).collect();
        assert_eq!(extensions, vec!["png", "jpg", "pdf"]);
        assert_eq!(ExportFormat::Jpeg.label(), "JPEG");
    }
}
