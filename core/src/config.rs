//! Settings loading
//!
//! The settings document is JSON by default. A `.toml` extension selects the
//! TOML decoder; the schema is identical. The whole document must decode
//! before anything else happens.

use std::fs;
use std::path::Path;

use aarshjul_types::Settings;

use crate::error::{Error, Result};

const EXPECTED_MONTHS: usize = 12;

/// Supported settings encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    Json,
    Toml,
}

impl SettingsFormat {
    /// Pick the decoder from the file extension, JSON unless `.toml`
    pub fn from_path(path: &Path) -> Self {
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
        {
            Self::Toml
        } else {
            Self::Json
        }
    }
}

/// Load and validate the settings document at `path`
pub fn load_settings(path: &Path) -> Result<Settings> {
    let contents = fs::read_to_string(path).map_err(|e| Error::from_input_io(path, e))?;
    let format = SettingsFormat::from_path(path);
    let settings = parse_settings(&contents, format).map_err(|message| Error::InputMalformed {
        path: path.to_path_buf(),
        message,
    })?;

    tracing::info!(
        path = %path.display(),
        activities = settings.activities.len(),
        months = settings.months.names.len(),
        "Loaded settings"
    );
    Ok(settings)
}

/// Decode and validate settings text. Errors are returned as messages so the
/// caller can attach the source path.
pub fn parse_settings(contents: &str, format: SettingsFormat) -> Result<Settings, String> {
    let settings: Settings = match format {
        SettingsFormat::Json => serde_json::from_str(contents).map_err(|e| e.to_string())?,
        SettingsFormat::Toml => toml::from_str(contents).map_err(|e| e.to_string())?,
    };
    validate(&settings)?;
    Ok(settings)
}

fn validate(settings: &Settings) -> Result<(), String> {
    let months = &settings.months;
    if months.names.len() != months.weights.len() {
        return Err(format!(
            "months has {} names but {} weights",
            months.names.len(),
            months.weights.len()
        ));
    }
    if months.names.len() != EXPECTED_MONTHS {
        tracing::warn!(
            count = months.names.len(),
            "Calendar ring does not have {} months",
            EXPECTED_MONTHS
        );
    }

    let layout = &settings.layout;
    for (field, value) in [
        ("size", layout.size),
        ("width", layout.width),
        ("offset", layout.offset),
        ("event_adjustment", layout.event_adjustment),
    ] {
        if !value.is_finite() {
            return Err(format!("layout.{field} must be a finite number"));
        }
    }
    if layout.size <= 0.0 || layout.width <= 0.0 {
        return Err("layout.size and layout.width must be positive".to_string());
    }

    let render = &settings.render;
    if render.pixels_per_unit <= 0.0 || render.dpi <= 0.0 {
        return Err("render.pixels_per_unit and render.dpi must be positive".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r##"{
        "layout": {"size": 1.4, "width": 0.2, "offset": 0.0, "event_adjustment": 0.05},
        "colours": {"background": "white"},
        "months": {"names": ["J","F","M","A","M","J","J","A","S","O","N","D"],
                   "weights": [31,28,31,30,31,30,31,31,30,31,30,31]},
        "activities": [],
        "title": "2025"
    }"##;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SettingsFormat::from_path(Path::new("a.toml")), SettingsFormat::Toml);
        assert_eq!(SettingsFormat::from_path(Path::new("a.TOML")), SettingsFormat::Toml);
        assert_eq!(SettingsFormat::from_path(Path::new("a.json")), SettingsFormat::Json);
        assert_eq!(SettingsFormat::from_path(Path::new("settings")), SettingsFormat::Json);
    }

    #[test]
    fn test_parse_minimal_json() {
        let settings = parse_settings(MINIMAL, SettingsFormat::Json).unwrap();
        assert_eq!(settings.months.names.len(), 12);
        assert_eq!(settings.title, "2025");
    }

    #[test]
    fn test_mismatched_month_lengths_rejected() {
        let broken = MINIMAL.replace("[31,28,31,30,31,30,31,31,30,31,30,31]", "[31,28]");
        let err = parse_settings(&broken, SettingsFormat::Json).unwrap_err();
        assert!(err.contains("12 names but 2 weights"), "{err}");
    }

    #[test]
    fn test_missing_field_rejected() {
        let broken = MINIMAL.replace("\"title\": \"2025\"", "\"name\": \"2025\"");
        assert!(parse_settings(&broken, SettingsFormat::Json).is_err());
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_settings(&dir.path().join("settings.json")).unwrap_err();
        assert!(matches!(err, Error::InputNotFound { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = load_settings(&path).unwrap_err();
        assert!(matches!(err, Error::InputMalformed { .. }));
    }

    #[test]
    fn test_load_non_utf8_file_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, [0xff, 0xfe, 0x00, b'{']).unwrap();

        let err = load_settings(&path).unwrap_err();
        assert!(matches!(err, Error::InputMalformed { .. }), "{err}");
    }

    #[test]
    fn test_load_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, MINIMAL).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.layout.width, 0.2);
    }
}
