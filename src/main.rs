//! attitude-rs - Artificial horizon viewer
//!
//! Shows the attitude indicator driven either by a demo LFO source running
//! on a background thread or by manual sliders.
//!
//! ## Features
//! - Demo source with adjustable roll/pitch LFOs
//! - Manual attitude, including pasted IMU state JSON
//! - Pitch ladder zoom, palette and line width
//! - Level trim capture
//! - SVG export of the current pose
//! - Settings persisted between runs

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use eframe::egui;
use serde::{Deserialize, Serialize};

use attitude_rs::instrument::{AttitudeIndicator, InstrumentConfig, InstrumentError, MAX_ZOOM, MIN_ZOOM};
use attitude_rs::render::AttitudeWidget;
use attitude_rs::scene::Color;
use attitude_rs::telemetry::{
    decode_attitude, AttitudeSample, DemoAttitude, DemoConfig, LatestSample, LevelTrim,
    LfoWaveform,
};

mod settings;

use settings::AppSettings;

/// How often the demo thread publishes a sample
const DEMO_RATE_HZ: f32 = 50.0;

fn main() -> eframe::Result<()> {
    env_logger::init();
    log::info!("Starting attitude-rs");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([860.0, 600.0])
            .with_title("attitude-rs"),
        ..Default::default()
    };

    eframe::run_native(
        "attitude-rs",
        options,
        Box::new(|cc| Ok(Box::new(AttitudeApp::new(cc)?))),
    )
}

/// Where the displayed attitude comes from
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum SourceMode {
    Demo,
    Manual,
}

impl SourceMode {
    fn all() -> &'static [SourceMode] {
        &[SourceMode::Demo, SourceMode::Manual]
    }

    fn name(&self) -> &'static str {
        match self {
            SourceMode::Demo => "Demo",
            SourceMode::Manual => "Manual",
        }
    }
}

/// Background thread publishing demo samples into a `LatestSample`
struct DemoSource {
    config: Arc<Mutex<DemoConfig>>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl DemoSource {
    fn start(config: DemoConfig, feed: LatestSample) -> Self {
        let config = Arc::new(Mutex::new(config));
        let running = Arc::new(AtomicBool::new(true));

        let thread_config = Arc::clone(&config);
        let thread_running = Arc::clone(&running);
        let handle = thread::spawn(move || {
            let start = Instant::now();
            let period = Duration::from_secs_f32(1.0 / DEMO_RATE_HZ);
            log::debug!("Demo source running at {} Hz", DEMO_RATE_HZ);

            while thread_running.load(Ordering::Relaxed) {
                let config = match thread_config.lock() {
                    Ok(config) => *config,
                    Err(poisoned) => *poisoned.into_inner(),
                };
                let demo = DemoAttitude::new(&config);
                feed.publish(demo.sample(start.elapsed().as_secs_f32()));
                thread::sleep(period);
            }

            log::debug!(
                "Demo source stopped after {} samples ({} coalesced)",
                feed.published(),
                feed.coalesced()
            );
        });

        Self {
            config,
            running,
            handle: Some(handle),
        }
    }

    fn set_config(&self, config: DemoConfig) {
        match self.config.lock() {
            Ok(mut current) => *current = config,
            Err(poisoned) => *poisoned.into_inner() = config,
        }
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Demo source thread panicked");
            }
        }
    }
}

impl Drop for DemoSource {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Main application state
pub struct AttitudeApp {
    indicator: AttitudeIndicator,
    widget: AttitudeWidget,
    feed: LatestSample,
    demo: DemoSource,
    demo_config: DemoConfig,
    source: SourceMode,
    show_settings: bool,

    // Manual attitude
    manual_roll: f32,
    manual_pitch: f32,
    json_input: String,

    /// Newest sample before trim
    raw: AttitudeSample,
    trim: LevelTrim,

    status: String,
}

impl AttitudeApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Result<Self, InstrumentError> {
        let feed = LatestSample::new();
        let demo_config = DemoConfig::default();

        let mut app = Self {
            indicator: AttitudeIndicator::new(InstrumentConfig::default())?,
            widget: AttitudeWidget::new(),
            demo: DemoSource::start(demo_config, feed.clone_ref()),
            feed,
            demo_config,
            source: SourceMode::Demo,
            show_settings: true,
            manual_roll: 0.0,
            manual_pitch: 0.0,
            json_input: r#"{"imu": {"gyro": {"x": 0, "y": 0, "z": 0}}}"#.to_string(),
            raw: AttitudeSample::level(),
            trim: LevelTrim::none(),
            status: String::from("Ready"),
        };

        AppSettings::load().apply(&mut app);
        Ok(app)
    }

    /// Change the demo parameters, picked up by the running thread
    pub(crate) fn set_demo_config(&mut self, config: DemoConfig) {
        self.demo_config = config;
        self.demo.set_config(config);
    }

    /// Pull the newest sample from the active source and apply it
    fn poll_source(&mut self) {
        let sample = match self.source {
            SourceMode::Demo => self.feed.take(),
            SourceMode::Manual => Some(AttitudeSample::from_raw(
                self.manual_roll,
                self.manual_pitch,
            )),
        };

        if let Some(raw) = sample {
            self.raw = raw;
            self.indicator.update_attitude(self.trim.apply(raw));
        }
    }

    fn reconfigure(&mut self, config: InstrumentConfig) {
        if let Err(e) = self.indicator.reconfigure(config) {
            log::warn!("Rejected instrument settings: {}", e);
            self.status = e.to_string();
        }
    }

    fn export_svg(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("SVG", &["svg"])
            .set_file_name("attitude.svg")
            .save_file()
        else {
            return;
        };

        match self.indicator.write_svg(&path) {
            Ok(()) => self.status = format!("Exported {}", path.display()),
            Err(e) => {
                log::error!("{}", e);
                self.status = e.to_string();
            }
        }
    }

    fn source_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Source");
        ui.separator();

        egui::ComboBox::from_label("Mode")
            .selected_text(self.source.name())
            .show_ui(ui, |ui| {
                for mode in SourceMode::all() {
                    ui.selectable_value(&mut self.source, *mode, mode.name());
                }
            });

        match self.source {
            SourceMode::Manual => {
                ui.add(egui::Slider::new(&mut self.manual_roll, -180.0..=180.0).text("Roll"));
                ui.add(egui::Slider::new(&mut self.manual_pitch, -90.0..=90.0).text("Pitch"));
                if ui.button("Wings level").clicked() {
                    self.manual_roll = 0.0;
                    self.manual_pitch = 0.0;
                }

                ui.label("Telemetry JSON:");
                ui.text_edit_multiline(&mut self.json_input);
                if ui.button("Apply JSON").clicked() {
                    match decode_attitude(&self.json_input) {
                        Ok(sample) => {
                            self.manual_roll = sample.roll;
                            self.manual_pitch = sample.pitch;
                            self.status = String::from("Applied telemetry JSON");
                        }
                        Err(e) => {
                            log::warn!("{}", e);
                            self.status = e.to_string();
                        }
                    }
                }
            }
            SourceMode::Demo => {
                let mut config = self.demo_config;
                ui.add(
                    egui::Slider::new(&mut config.roll_frequency, 0.01..=2.0)
                        .logarithmic(true)
                        .text("Roll Hz"),
                );
                ui.add(egui::Slider::new(&mut config.roll_amplitude, 0.0..=180.0).text("Roll °"));
                ui.add(
                    egui::Slider::new(&mut config.pitch_frequency, 0.01..=2.0)
                        .logarithmic(true)
                        .text("Pitch Hz"),
                );
                ui.add(egui::Slider::new(&mut config.pitch_amplitude, 0.0..=90.0).text("Pitch °"));

                egui::ComboBox::from_label("Waveform")
                    .selected_text(config.waveform.name())
                    .show_ui(ui, |ui| {
                        for waveform in LfoWaveform::all() {
                            ui.selectable_value(&mut config.waveform, *waveform, waveform.name());
                        }
                    });

                if config != self.demo_config {
                    self.set_demo_config(config);
                }
            }
        }
    }

    fn instrument_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Instrument");
        ui.separator();

        let mut zoom = self.indicator.zoom();
        if ui
            .add(egui::Slider::new(&mut zoom, MIN_ZOOM..=MAX_ZOOM).text("Ladder zoom"))
            .changed()
        {
            self.indicator.set_zoom(zoom);
        }

        let mut config = self.indicator.config().clone();
        ui.add(egui::Slider::new(&mut config.line_width, 1.0..=10.0).text("Line width"));
        ui.horizontal(|ui| {
            color_edit(ui, &mut config.palette.ground, "Ground");
            color_edit(ui, &mut config.palette.sky, "Sky");
        });
        ui.horizontal(|ui| {
            color_edit(ui, &mut config.palette.markings, "Marks");
            color_edit(ui, &mut config.palette.symbol, "Symbol");
        });
        if &config != self.indicator.config() {
            self.reconfigure(config);
        }

        let mut background = self.widget.settings.background;
        ui.horizontal(|ui| {
            ui.color_edit_button_srgba(&mut background);
            ui.label("Background");
        });
        self.widget.settings.background = background;

        ui.separator();
        ui.label(format!(
            "Trim: roll {:.1}°, pitch {:.1}°",
            self.trim.roll, self.trim.pitch
        ));
        ui.horizontal(|ui| {
            if ui.button("Set level").clicked() {
                self.trim.capture(self.indicator.attitude());
            }
            if ui
                .add_enabled(!self.trim.is_none(), egui::Button::new("Clear"))
                .clicked()
            {
                self.trim = LevelTrim::none();
                log::info!("Level trim cleared");
            }
        });

        ui.separator();
        if ui.button("Export SVG…").clicked() {
            self.export_svg();
        }
    }
}

fn color_edit(ui: &mut egui::Ui, color: &mut Color, label: &str) {
    let mut rgb = [color.r, color.g, color.b];
    if ui.color_edit_button_srgb(&mut rgb).changed() {
        *color = Color::rgb(rgb[0], rgb[1], rgb[2]);
    }
    ui.label(label);
}

impl eframe::App for AttitudeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint();

        self.poll_source();

        // Top panel
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("attitude-rs");
                ui.separator();
                ui.toggle_value(&mut self.show_settings, "⚙ Settings");
                ui.separator();
                let shown = self.indicator.attitude();
                ui.label(format!(
                    "Roll {:+.1}°  Pitch {:+.1}°  (raw {:+.1}°, {:+.1}°)",
                    shown.roll, shown.pitch, self.raw.roll, self.raw.pitch
                ));
                ui.separator();
                ui.label(&self.status);
            });
        });

        // Settings panel
        if self.show_settings {
            egui::SidePanel::left("settings_panel")
                .min_width(240.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        self.source_ui(ui);
                        ui.add_space(12.0);
                        self.instrument_ui(ui);
                    });
                });
        }

        // Instrument
        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let side = available.x.min(available.y);
            ui.vertical_centered(|ui| {
                self.widget
                    .show(ui, &self.indicator, Some(egui::Vec2::splat(side)));
            });
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        AppSettings::from_app(self).save();
        self.demo.stop();
    }
}
