//! Chart Studio Main Application
//! Main window with control panel and chart preview.

use crate::config::storage::{self, Settings};
use crate::data::distinct_series_count;
use crate::editor::ChartEditor;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::host::{FileHost, RfdHost};
use egui::SidePanel;
use std::path::PathBuf;

/// Main application window.
pub struct ChartStudioApp {
    editor: ChartEditor,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    host: Box<dyn FileHost>,
    settings_path: PathBuf,
}

impl ChartStudioApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        settings: Settings,
        settings_path: PathBuf,
    ) -> Self {
        Self::with_host(settings, settings_path, Box::new(RfdHost))
    }

    fn with_host(settings: Settings, settings_path: PathBuf, host: Box<dyn FileHost>) -> Self {
        let editor = ChartEditor::new(settings.config, settings.mode);
        let mut control_panel = ControlPanel::new();
        control_panel.sync(&editor);
        control_panel.sync_source(&editor);
        Self {
            editor,
            control_panel,
            chart_viewer: ChartViewer::new(),
            host,
            settings_path,
        }
    }

    fn handle_action(&mut self, action: ControlPanelAction) {
        match action {
            ControlPanelAction::None => return,
            ControlPanelAction::ImportCsv => self.handle_import(),
            ControlPanelAction::SourceEdited => {
                self.editor.set_source(self.control_panel.source.clone());
            }
            ControlPanelAction::ApplyData => {
                self.editor.apply_data();
                let status = self.data_summary("Parsed");
                self.control_panel.set_status(status, false);
            }
            ControlPanelAction::ModeChanged(mode) => self.editor.set_mode(mode),
            ControlPanelAction::Update(update) => self.editor.update(update),
            ControlPanelAction::Export(format) => {
                match self.editor.export(format, self.host.as_ref()) {
                    Ok(Some(path)) => self.control_panel.set_status(
                        format!("{} saved to {}", format.label(), path.display()),
                        false,
                    ),
                    Ok(None) => {}
                    Err(e) => {
                        log::warn!("{} export failed: {}", format.label(), e);
                        self.control_panel
                            .set_status(format!("Export error: {}", e), true);
                    }
                }
            }
            ControlPanelAction::SaveSettings => self.handle_save_settings(),
        }
        // Reflect clamped values in the widgets
        self.control_panel.sync(&self.editor);
    }

    fn data_summary(&self, verb: &str) -> String {
        let points = self.editor.points();
        format!(
            "{} {} points in {} series",
            verb,
            points.len(),
            distinct_series_count(points)
        )
    }

    fn handle_import(&mut self) {
        match self.editor.import(self.host.as_ref()) {
            Ok(true) => {
                self.control_panel.sync_source(&self.editor);
                let status = self.data_summary("Imported");
                self.control_panel.set_status(status, false);
            }
            Ok(false) => {}
            Err(e) => {
                log::warn!("import failed: {}", e);
                self.control_panel
                    .set_status(format!("Import error: {}", e), true);
            }
        }
    }

    fn handle_save_settings(&mut self) {
        let settings = Settings {
            config: self.editor.config().clone(),
            mode: self.editor.mode(),
        };
        match storage::save(&self.settings_path, &settings) {
            Ok(()) => {
                log::info!("saved settings to {}", self.settings_path.display());
                self.control_panel.set_status("Settings saved", false);
            }
            Err(e) => {
                log::warn!("could not save settings: {:#}", e);
                self.control_panel
                    .set_status(format!("Settings error: {}", e), true);
            }
        }
    }
}

impl eframe::App for ChartStudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(360.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);
                    self.handle_action(action);
                });
            });

        // Central panel - Chart Preview
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ctx, ui, &self.editor);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigUpdate;
    use crate::data::{DataMode, ImportError};
    use crate::export::{ExportError, ExportFormat};

    struct FailingHost;

    impl FileHost for FailingHost {
        fn open_text(&self) -> Result<Option<String>, ImportError> {
            Err(ImportError::Encoding(PathBuf::from("bad.csv")))
        }

        fn save(&self, _: &[u8], _: ExportFormat) -> Result<Option<PathBuf>, ExportError> {
            Ok(None)
        }
    }

    fn app(dir: &tempfile::TempDir) -> ChartStudioApp {
        ChartStudioApp::with_host(
            Settings::default(),
            dir.path().join("settings.json"),
            Box::new(FailingHost),
        )
    }

    #[test]
    fn test_update_syncs_clamped_draft() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.handle_action(ControlPanelAction::Update(ConfigUpdate::Opacity(0.0)));
        assert_eq!(app.editor.config().opacity, 0.2);
        assert_eq!(app.control_panel.draft.opacity, 0.2);
    }

    #[test]
    fn test_source_edit_reparses() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.control_panel.source = "L,V\nA,1".to_string();
        app.handle_action(ControlPanelAction::ModeChanged(DataMode::Single));
        app.handle_action(ControlPanelAction::SourceEdited);
        assert_eq!(app.editor.points().len(), 1);

        app.handle_action(ControlPanelAction::ApplyData);
        assert_eq!(app.control_panel.status, "Parsed 1 points in 1 series");
    }

    #[test]
    fn test_import_error_reaches_status_line() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        let source = app.control_panel.source.clone();

        app.handle_action(ControlPanelAction::ImportCsv);
        assert!(app.control_panel.status_is_error);
        assert!(app.control_panel.status.starts_with("Import error"));
        assert_eq!(app.control_panel.source, source);
    }

    #[test]
    fn test_save_settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.handle_action(ControlPanelAction::Update(ConfigUpdate::Title("Saved".into())));
        app.handle_action(ControlPanelAction::SaveSettings);
        assert!(!app.control_panel.status_is_error);

        let loaded = storage::load(&app.settings_path).unwrap();
        assert_eq!(loaded.config.title, "Saved");
    }
}
