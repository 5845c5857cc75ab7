use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use attitude_rs::instrument::InstrumentConfig;
use attitude_rs::telemetry::{DemoConfig, LevelTrim};

use crate::{AttitudeApp, SourceMode};

/// Returns the path to the settings file: `~/.config/attitude-rs/settings.json`
fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("attitude-rs");
    path.push("settings.json");
    path
}

/// Persisted viewer settings.
///
/// Serialized as JSON to the platform config directory.
/// Fields use `#[serde(default)]` so that adding new settings
/// won't break existing config files.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    // Viewer
    pub show_settings: bool,
    pub source: SourceMode,

    // Manual attitude
    pub manual_roll: f32,
    pub manual_pitch: f32,

    // Demo source
    pub demo: DemoConfig,

    // Instrument
    pub instrument: InstrumentConfig,
    pub trim: LevelTrim,

    // Background color (stored as u8 triples since Color32 isn't serde-friendly)
    pub background_r: u8,
    pub background_g: u8,
    pub background_b: u8,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            show_settings: true,
            source: SourceMode::Demo,

            manual_roll: 0.0,
            manual_pitch: 0.0,

            demo: DemoConfig::default(),

            instrument: InstrumentConfig::default(),
            trim: LevelTrim::none(),

            background_r: 24,
            background_g: 24,
            background_b: 28,
        }
    }
}

impl AppSettings {
    /// Load settings from disk, falling back to defaults on any error.
    pub fn load() -> Self {
        let path = settings_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Failed to parse settings ({}), using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("No settings file found ({}), using defaults", e);
                Self::default()
            }
        }
    }

    fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    /// Save settings to disk as pretty JSON.
    pub fn save(&self) {
        let path = settings_path();
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("Failed to create config directory: {}", e);
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    log::warn!("Failed to write settings: {}", e);
                } else {
                    log::info!("Saved settings to {}", path.display());
                }
            }
            Err(e) => {
                log::warn!("Failed to serialize settings: {}", e);
            }
        }
    }

    /// Extract current settings from the running application.
    pub fn from_app(app: &AttitudeApp) -> Self {
        let background = app.widget.settings.background;
        Self {
            show_settings: app.show_settings,
            source: app.source,

            manual_roll: app.manual_roll,
            manual_pitch: app.manual_pitch,

            demo: app.demo_config,

            instrument: app.indicator.config().clone(),
            trim: app.trim,

            background_r: background.r(),
            background_g: background.g(),
            background_b: background.b(),
        }
    }

    /// Apply loaded settings to the running application.
    pub fn apply(&self, app: &mut AttitudeApp) {
        app.show_settings = self.show_settings;
        app.source = self.source;

        app.manual_roll = self.manual_roll;
        app.manual_pitch = self.manual_pitch;

        app.set_demo_config(self.demo);

        if let Err(e) = app.indicator.reconfigure(self.instrument.clone()) {
            log::warn!("Ignoring saved instrument settings: {}", e);
        }
        app.trim = self.trim;

        app.widget.settings.background = eframe::egui::Color32::from_rgb(
            self.background_r,
            self.background_g,
            self.background_b,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = AppSettings::from_json(r#"{"manual_roll": 12.5, "source": "Manual"}"#)
            .unwrap();
        assert_eq!(settings.manual_roll, 12.5);
        assert_eq!(settings.source, SourceMode::Manual);
        assert_eq!(settings.instrument, InstrumentConfig::default());
        assert!(settings.show_settings);
    }

    #[test]
    fn test_round_trip_through_json() {
        let mut settings = AppSettings::default();
        settings.instrument.zoom = 2.5;
        settings.trim.capture(attitude_rs::telemetry::AttitudeSample::new(3.0, -1.0));

        let json = serde_json::to_string_pretty(&settings).unwrap();
        let loaded = AppSettings::from_json(&json).unwrap();
        assert_eq!(loaded.instrument.zoom, 2.5);
        assert_eq!(loaded.trim, settings.trim);
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(AppSettings::from_json("not json").is_err());
    }
}
