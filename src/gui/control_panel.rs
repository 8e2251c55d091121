//! Control Panel Widget
//! Left side panel with the data source, chart settings and export buttons.

use crate::config::{
    ChartConfig, ChartKind, ConfigUpdate, DashStyle, Orientation, BAR_WIDTH_RANGE,
    CORNER_RADIUS_RANGE, OPACITY_RANGE,
};
use crate::data::DataMode;
use crate::editor::ChartEditor;
use crate::export::ExportFormat;
use egui::{Color32, ComboBox, RichText, Slider, TextEdit};

/// Width of the field labels in each settings row
const LABEL_WIDTH: f32 = 90.0;

/// Left side control panel. Widgets edit a draft copy of the editor state;
/// every change is reported back as an action.
pub struct ControlPanel {
    pub draft: ChartConfig,
    pub source: String,
    pub mode: DataMode,
    pub status: String,
    pub status_is_error: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            draft: ChartConfig::default(),
            source: String::new(),
            mode: DataMode::default(),
            status: "Ready".to_string(),
            status_is_error: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pull config and mode back from the editor, e.g. after clamping.
    pub fn sync(&mut self, editor: &ChartEditor) {
        self.draft = editor.config().clone();
        self.mode = editor.mode();
    }

    /// Replace the text box contents, e.g. after an import.
    pub fn sync_source(&mut self, editor: &ChartEditor) {
        self.source = editor.source().to_string();
    }

    pub fn set_status(&mut self, status: impl Into<String>, is_error: bool) {
        self.status = status.into();
        self.status_is_error = is_error;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Chart Studio")
                    .size(22.0)
                    .color(Color32::from_rgb(0, 122, 255)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Section =====
        ui.label(RichText::new("📁 Data").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            for mode in [DataMode::Single, DataMode::Multi] {
                if ui.radio_value(&mut self.mode, mode, mode.label()).changed() {
                    action = ControlPanelAction::ModeChanged(mode);
                }
            }
        });
        ui.add_space(5.0);

        let editor = TextEdit::multiline(&mut self.source)
            .code_editor()
            .desired_rows(8)
            .desired_width(f32::INFINITY);
        if ui.add(editor).changed() {
            action = ControlPanelAction::SourceEdited;
        }
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            if ui.button("📂 Import CSV").clicked() {
                action = ControlPanelAction::ImportCsv;
            }
            if ui.button("⟳ Apply Data").clicked() {
                action = ControlPanelAction::ApplyData;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Labels Section =====
        ui.label(RichText::new("🏷 Labels").size(14.0).strong());
        ui.add_space(5.0);

        if text_row(ui, "Title:", &mut self.draft.title) {
            action = ControlPanelAction::Update(ConfigUpdate::Title(self.draft.title.clone()));
        }
        if text_row(ui, "X Axis:", &mut self.draft.x_axis_label) {
            action = ControlPanelAction::Update(ConfigUpdate::XAxisLabel(
                self.draft.x_axis_label.clone(),
            ));
        }
        if text_row(ui, "Y Axis:", &mut self.draft.y_axis_label) {
            action = ControlPanelAction::Update(ConfigUpdate::YAxisLabel(
                self.draft.y_axis_label.clone(),
            ));
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Style Section =====
        ui.label(RichText::new("🎨 Style").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new("Chart Type:"));
            ComboBox::from_id_salt("chart_kind")
                .selected_text(self.draft.kind.label())
                .show_ui(ui, |ui| {
                    for kind in ChartKind::ALL {
                        if ui
                            .selectable_value(&mut self.draft.kind, kind, kind.label())
                            .clicked()
                        {
                            action = ControlPanelAction::Update(ConfigUpdate::Kind(kind));
                        }
                    }
                });
        });

        ui.horizontal(|ui| {
            ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new("Color:"));
            if ui
                .color_edit_button_srgb(&mut self.draft.primary_color.0)
                .changed()
            {
                action = ControlPanelAction::Update(ConfigUpdate::PrimaryColor(
                    self.draft.primary_color,
                ));
            }
        });

        ui.horizontal(|ui| {
            ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new("Corner Radius:"));
            if ui
                .add(Slider::new(&mut self.draft.corner_radius, CORNER_RADIUS_RANGE))
                .changed()
            {
                action = ControlPanelAction::Update(ConfigUpdate::CornerRadius(
                    self.draft.corner_radius,
                ));
            }
        });

        ui.horizontal(|ui| {
            ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new("Bar Width:"));
            if ui
                .add(Slider::new(&mut self.draft.bar_width, BAR_WIDTH_RANGE))
                .changed()
            {
                action = ControlPanelAction::Update(ConfigUpdate::BarWidth(self.draft.bar_width));
            }
        });

        ui.horizontal(|ui| {
            ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new("Opacity:"));
            if ui
                .add(Slider::new(&mut self.draft.opacity, OPACITY_RANGE).fixed_decimals(2))
                .changed()
            {
                action = ControlPanelAction::Update(ConfigUpdate::Opacity(self.draft.opacity));
            }
        });

        ui.horizontal(|ui| {
            ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new("Line Style:"));
            ComboBox::from_id_salt("dash_style")
                .selected_text(self.draft.dash.label())
                .show_ui(ui, |ui| {
                    for dash in DashStyle::ALL {
                        if ui
                            .selectable_value(&mut self.draft.dash, dash, dash.label())
                            .clicked()
                        {
                            action = ControlPanelAction::Update(ConfigUpdate::Dash(dash));
                        }
                    }
                });
        });

        ui.horizontal(|ui| {
            ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new("Orientation:"));
            for (orientation, name) in [
                (Orientation::Vertical, "Vertical"),
                (Orientation::Horizontal, "Horizontal"),
            ] {
                if ui
                    .radio_value(&mut self.draft.orientation, orientation, name)
                    .changed()
                {
                    action = ControlPanelAction::Update(ConfigUpdate::Orientation(orientation));
                }
            }
        });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.checkbox(&mut self.draft.show_legend, "Legend").changed() {
                action =
                    ControlPanelAction::Update(ConfigUpdate::ShowLegend(self.draft.show_legend));
            }
            if ui.checkbox(&mut self.draft.show_x_axis, "X Axis").changed() {
                action =
                    ControlPanelAction::Update(ConfigUpdate::ShowXAxis(self.draft.show_x_axis));
            }
            if ui.checkbox(&mut self.draft.show_y_axis, "Y Axis").changed() {
                action =
                    ControlPanelAction::Update(ConfigUpdate::ShowYAxis(self.draft.show_y_axis));
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export Section =====
        ui.label(RichText::new("💾 Export").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            for format in ExportFormat::ALL {
                let button = egui::Button::new(RichText::new(format.label()).size(14.0))
                    .min_size(egui::vec2(70.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::Export(format);
                }
            }
        });
        ui.add_space(5.0);
        if ui.small_button("Save Settings").clicked() {
            action = ControlPanelAction::SaveSettings;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        let status_color = if self.status_is_error {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Labeled single-line text field; true when edited this frame.
fn text_row(ui: &mut egui::Ui, name: &str, value: &mut String) -> bool {
    ui.horizontal(|ui| {
        ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new(name));
        ui.text_edit_singleline(value).changed()
    })
    .inner
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    ImportCsv,
    SourceEdited,
    ApplyData,
    ModeChanged(DataMode),
    Update(ConfigUpdate),
    Export(ExportFormat),
    SaveSettings,
}
