use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use egui::{self, Color32, ComboBox, Layout, Rounding, Stroke};

use pulse_charts::audio::{AudioError, LevelInput, list_input_device_names};
use pulse_charts::egui_surface::{EguiSurface, color32, rgba};
use pulse_charts::levels::{LevelTap, drain_tap, level_bands};
use pulse_charts::line_chart::LineChart;
use pulse_charts::ring_chart::{RingChart, RingStyle};
use pulse_charts::settings::{AppSettings, ThemeKind};

const ACCENT: Color32 = Color32::from_rgb(10, 132, 255);
const POLL_INTERVAL: Duration = Duration::from_millis(33);
const LINE_CHART_HEIGHT: f32 = 140.0;
const RING_SIZE: f32 = 120.0;

pub struct PulseApp {
    tap: Arc<Mutex<LevelTap>>,
    input: Option<LevelInput>,
    line: LineChart,
    ring: RingChart,
    settings_path: PathBuf,
    settings: AppSettings,
    input_devices: Vec<String>,
    audio_error: Option<String>,
}

impl PulseApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        tap: Arc<Mutex<LevelTap>>,
        input: Result<LevelInput, AudioError>,
        settings_path: PathBuf,
        mut settings: AppSettings,
    ) -> Self {
        apply_theme(&cc.egui_ctx, settings.theme);

        let mut line = LineChart::new(
            settings.history_len,
            settings.transparent,
            settings.line_color,
        );
        line.on_data_changed(repaint_when_visible(cc.egui_ctx.clone()));

        let mut ring = RingChart::new(Vec::new());
        ring.set_style(ring_style(&cc.egui_ctx, settings.theme));
        ring.on_data_changed(repaint_when_visible(cc.egui_ctx.clone()));

        let (input, audio_error) = match input {
            Ok(input) => {
                if settings.input_device.is_none() {
                    settings.input_device = Some(input.device_name.clone());
                }
                (Some(input), None)
            }
            Err(err) => {
                log::warn!("running without audio input: {err}");
                (None, Some(err.to_string()))
            }
        };

        Self {
            tap,
            input,
            line,
            ring,
            settings_path,
            settings,
            input_devices: list_input_device_names(),
            audio_error,
        }
    }

    fn switch_input_device(&mut self) -> Result<(), AudioError> {
        let target = self.settings.input_device.clone();
        let input = LevelInput::new_with_device(Arc::clone(&self.tap), target.as_deref())?;
        self.input_devices = list_input_device_names();
        self.settings.input_device = Some(input.device_name.clone());
        self.input = Some(input);
        self.audio_error = None;
        Ok(())
    }

    /// Moves pending levels from the audio thread into the charts.
    fn pull_levels(&mut self) {
        let levels = drain_tap(&self.tap);
        if levels.is_empty() {
            return;
        }
        for level in levels {
            self.line.append(level);
        }
        let history = self.line.buffer();
        let bands = level_bands(history.values());
        let latest = history.latest();
        self.ring.replace_segments(bands);
        self.ring.set_center_value(latest);
    }
}

impl eframe::App for PulseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.pull_levels();
        ctx.request_repaint_after(POLL_INTERVAL);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(4.0);
            let mut theme_changed = false;
            let mut device_changed = false;
            let mut style_changed = false;
            ui.horizontal(|ui| {
                ui.strong("Pulse");
                ui.label("Input level monitor");
                ui.separator();
                theme_changed = theme_selector(ui, ctx, &mut self.settings);
                ui.separator();
                device_changed = input_selector(
                    ui,
                    &self.input_devices,
                    &mut self.settings.input_device,
                    &mut self.audio_error,
                );
                ui.separator();
                style_changed = line_style_controls(ui, &mut self.settings);
                ui.with_layout(Layout::right_to_left(egui::Align::Center), |ui| {
                    match &self.input {
                        Some(input) => ui.label(format!("Listening: {}", input.device_name)),
                        None => ui.label("No input"),
                    };
                });
            });
            ui.add_space(6.0);

            if theme_changed {
                self.ring.set_style(ring_style(ctx, self.settings.theme));
            }
            if style_changed {
                self.line.set_color(self.settings.line_color);
                self.line.set_transparent(self.settings.transparent);
            }

            card(ui, "Level History", |ui| draw_line_chart(ui, &self.line));
            ui.add_space(8.0);
            card(ui, "Level Bands", |ui| {
                ui.horizontal(|ui| {
                    draw_ring_chart(ui, &self.ring);
                    ui.add_space(12.0);
                    ui.vertical(|ui| band_legend(ui));
                });
            });

            if device_changed {
                if let Err(err) = self.switch_input_device() {
                    log::warn!("input switch failed: {err}");
                    self.audio_error = Some(err.to_string());
                }
            }

            if theme_changed || device_changed || style_changed {
                if let Some(input) = &self.input {
                    self.settings.input_device = Some(input.device_name.clone());
                }
                self.settings.save(&self.settings_path);
            }

            if let Some(err) = &self.audio_error {
                ui.colored_label(Color32::RED, format!("Audio: {err}"));
            }
        });
    }
}

/// Change listener that only asks for a repaint while the window is shown.
fn repaint_when_visible(ctx: egui::Context) -> impl FnMut() + Send + 'static {
    move || {
        let minimized = ctx.input(|i| i.viewport().minimized.unwrap_or(false));
        if !minimized {
            ctx.request_repaint();
        }
    }
}

fn ring_style(ctx: &egui::Context, theme: ThemeKind) -> RingStyle {
    RingStyle {
        dark_mode: theme.is_dark(),
        text_color: rgba(ctx.style().visuals.text_color()),
        ..RingStyle::default()
    }
}

fn draw_line_chart(ui: &mut egui::Ui, chart: &LineChart) {
    let desired = egui::vec2(ui.available_width().max(200.0), LINE_CHART_HEIGHT);
    let (rect, _) = ui.allocate_exact_size(desired, egui::Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect(
        rect,
        Rounding::same(6.0),
        ui.visuals().faint_bg_color,
        Stroke::new(1.0, ui.visuals().weak_text_color()),
    );
    let mut surface = EguiSurface::new(&painter, rect);
    let bounds = surface.bounds();
    chart.draw(&mut surface, bounds);
}

fn draw_ring_chart(ui: &mut egui::Ui, chart: &RingChart) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(RING_SIZE, RING_SIZE), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let mut surface = EguiSurface::new(&painter, rect);
    let bounds = surface.bounds();
    chart.draw(&mut surface, bounds);
}

fn band_legend(ui: &mut egui::Ui) {
    use pulse_charts::levels::{LOUD_COLOR, MODERATE_COLOR, QUIET_COLOR};
    for (label, color) in [
        ("Quiet", QUIET_COLOR),
        ("Moderate", MODERATE_COLOR),
        ("Loud", LOUD_COLOR),
    ] {
        ui.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
            ui.painter().rect_filled(rect, Rounding::same(2.0), color32(color));
            ui.label(label);
        });
    }
}

fn line_style_controls(ui: &mut egui::Ui, settings: &mut AppSettings) -> bool {
    let mut changed = ui.checkbox(&mut settings.transparent, "Transparent").changed();
    let mut color = color32(settings.line_color);
    if ui.color_edit_button_srgba(&mut color).changed() {
        settings.line_color = rgba(color);
        changed = true;
    }
    changed
}

fn input_selector(
    ui: &mut egui::Ui,
    devices: &[String],
    selected: &mut Option<String>,
    audio_error: &mut Option<String>,
) -> bool {
    let before = selected.clone();
    ComboBox::from_id_source("input_selector")
        .width(180.0)
        .selected_text(selected.as_deref().unwrap_or("Default input"))
        .show_ui(ui, |ui| {
            ui.selectable_value(selected, None, "Default input");
            for name in devices {
                ui.selectable_value(selected, Some(name.clone()), name);
            }
        });
    let changed = before != *selected;
    if changed {
        *audio_error = None;
    }
    changed
}

fn card(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(ui.visuals().extreme_bg_color)
        .stroke(Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
        .rounding(Rounding::same(8.0))
        .inner_margin(egui::Margin::same(12.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(ACCENT, title);
                ui.add_space(6.0);
                ui.separator();
            });
            ui.add_space(6.0);
            add_contents(ui);
        });
}

fn theme_selector(ui: &mut egui::Ui, ctx: &egui::Context, settings: &mut AppSettings) -> bool {
    let mut selected = settings.theme;
    ComboBox::from_id_source("theme_selector")
        .selected_text(selected.label())
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut selected, ThemeKind::Dark, ThemeKind::Dark.label());
            ui.selectable_value(&mut selected, ThemeKind::Light, ThemeKind::Light.label());
        });

    if selected != settings.theme {
        settings.theme = selected;
        apply_theme(ctx, selected);
        true
    } else {
        false
    }
}

fn apply_theme(ctx: &egui::Context, theme: ThemeKind) {
    let mut style = (*ctx.style()).clone();
    style.visuals = match theme {
        ThemeKind::Dark => egui::Visuals::dark(),
        ThemeKind::Light => egui::Visuals::light(),
    };
    style.visuals.selection.bg_fill = ACCENT;
    style.visuals.selection.stroke = Stroke::new(1.0, Color32::WHITE);
    ctx.set_style(style);
}
