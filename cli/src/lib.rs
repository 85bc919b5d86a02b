//! Pipeline wiring for the `aarshjul` binary.
//!
//! Inputs flow strictly forward: settings and events are loaded, events get
//! their colours, the renderer composes the rings and writes one image.

use std::path::{Path, PathBuf};

use aarshjul_core::{Palette, Result, colour_events, load_events, load_settings};

pub const DEFAULT_SETTINGS: &str = "settings.json";
pub const DEFAULT_EVENTS: &str = "events.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "plots";
pub const DEFAULT_STEM: &str = "aarshjul";

/// Where to read inputs and write the chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub settings_path: PathBuf,
    pub events_path: PathBuf,
    pub output_dir: PathBuf,
    pub stem: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            settings_path: PathBuf::from(DEFAULT_SETTINGS),
            events_path: PathBuf::from(DEFAULT_EVENTS),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            stem: DEFAULT_STEM.to_string(),
        }
    }
}

impl RunConfig {
    /// Same file names, resolved against `base`
    pub fn in_dir(base: &Path) -> Self {
        let defaults = Self::default();
        Self {
            settings_path: base.join(defaults.settings_path),
            events_path: base.join(defaults.events_path),
            output_dir: base.join(defaults.output_dir),
            stem: defaults.stem,
        }
    }
}

/// Run the whole pipeline once and return the path of the written chart
pub fn run(config: &RunConfig) -> Result<PathBuf> {
    let out_path = aarshjul_core::resolve_output_path(&config.output_dir, &config.stem)?;

    let settings = load_settings(&config.settings_path)?;
    let palette = Palette::from_settings(&settings, &config.settings_path)?;

    let records = load_events(&config.events_path)?;
    let events = colour_events(records, &palette)?;

    aarshjul_render::render_chart(&settings, &events, &palette, &out_path)?;
    Ok(out_path)
}

/// The line printed after a successful run
pub fn success_message(path: &Path) -> String {
    format!("Plot successfully saved to {}.", path.display())
}
