//! Chart Viewer Widget
//! Central panel showing the rendered chart. The preview is drawn by the same
//! renderer as the raster exports and cached as a texture until the editor
//! revision changes.

use crate::charts::{render_rgb, ChartView};
use crate::editor::ChartEditor;
use egui::load::SizedTexture;
use egui::{Color32, ColorImage, RichText, TextureHandle, TextureOptions};

#[derive(Default)]
pub struct ChartViewer {
    texture: Option<TextureHandle>,
    /// Editor revision the texture was rendered from
    rendered: Option<u64>,
    error: Option<String>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_stale(&self, editor: &ChartEditor) -> bool {
        self.rendered != Some(editor.revision())
    }

    fn refresh(&mut self, ctx: &egui::Context, editor: &ChartEditor) {
        self.rendered = Some(editor.revision());

        let view = ChartView::from_snapshot(&editor.snapshot());
        let (width, height) = view.size();
        match render_rgb(&view) {
            Ok(rgb) => {
                let image = ColorImage::from_rgb([width as usize, height as usize], &rgb);
                match &mut self.texture {
                    Some(texture) => texture.set(image, TextureOptions::LINEAR),
                    None => {
                        self.texture =
                            Some(ctx.load_texture("chart_preview", image, TextureOptions::LINEAR))
                    }
                }
                self.error = None;
            }
            Err(e) => {
                log::warn!("preview render failed: {e}");
                self.error = Some(e.to_string());
            }
        }
    }

    /// Draw the preview, re-rendering first if the editor changed.
    pub fn show(&mut self, ctx: &egui::Context, ui: &mut egui::Ui, editor: &ChartEditor) {
        if self.is_stale(editor) {
            self.refresh(ctx, editor);
        }

        if let Some(error) = &self.error {
            ui.label(
                RichText::new(format!("⚠ {}", error))
                    .size(13.0)
                    .color(Color32::from_rgb(220, 53, 69)),
            );
        }

        let Some(texture) = &self.texture else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Preview").size(20.0));
            });
            return;
        };

        // Fit inside the panel, never upscaled
        let size = texture.size_vec2();
        let avail = ui.available_size();
        let scale = (avail.x / size.x).min(avail.y / size.y).clamp(0.1, 1.0);
        ui.centered_and_justified(|ui| {
            ui.add(egui::Image::new(SizedTexture::new(texture.id(), size * scale)));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigUpdate;

    #[test]
    fn test_stale_until_rendered_revision_matches() {
        let mut editor = ChartEditor::default();
        let mut viewer = ChartViewer::new();
        assert!(viewer.is_stale(&editor));

        viewer.rendered = Some(editor.revision());
        assert!(!viewer.is_stale(&editor));

        editor.update(ConfigUpdate::ShowLegend(false));
        assert!(viewer.is_stale(&editor));
    }
}
