//! Colour palette lookups.

use std::collections::BTreeMap;
use std::path::Path;

use aarshjul_types::{ColourValue, Rgba, Settings};

use crate::error::{Error, Result};

/// Resolved colour table, keyed by category or reserved name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    colours: BTreeMap<String, Rgba>,
}

impl Palette {
    /// Resolve every entry of a `colours` table. `source` names the settings
    /// file for error reporting.
    pub fn from_colours(colours: &BTreeMap<String, ColourValue>, source: &Path) -> Result<Self> {
        let colours = colours
            .iter()
            .map(|(key, value)| {
                value
                    .to_rgba()
                    .map(|rgba| (key.clone(), rgba))
                    .map_err(|e| Error::malformed(source, format!("colours.{key}: {e}")))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;
        Ok(Self { colours })
    }

    pub fn from_settings(settings: &Settings, source: &Path) -> Result<Self> {
        let palette = Self::from_colours(&settings.colours, source)?;
        let missing = palette.missing_keys(settings);
        if !missing.is_empty() {
            // Lookups fail at render time; flag it early in the log.
            tracing::warn!(?missing, "Palette lacks colours the chart needs");
        }
        Ok(palette)
    }

    /// Look up a colour by key
    pub fn get(&self, key: &str) -> Result<Rgba> {
        self.colours
            .get(key)
            .copied()
            .ok_or_else(|| Error::PaletteKeyMissing(key.to_string()))
    }

    /// Keys the settings need that this palette does not define
    pub fn missing_keys<'a>(&self, settings: &'a Settings) -> Vec<&'a str> {
        settings
            .required_colour_keys()
            .into_iter()
            .filter(|key| !self.colours.contains_key(*key))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &str)]) -> BTreeMap<String, ColourValue> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), ColourValue::from(*v)))
            .collect()
    }

    #[test]
    fn test_lookup_and_missing_key() {
        let palette =
            Palette::from_colours(&table(&[("events", "#ff0000")]), Path::new("s.json")).unwrap();
        assert_eq!(palette.get("events").unwrap(), [255, 0, 0, 255]);

        let err = palette.get("background").unwrap_err();
        assert!(matches!(err, Error::PaletteKeyMissing(ref k) if k == "background"));
    }

    #[test]
    fn test_invalid_colour_names_key() {
        let err = Palette::from_colours(&table(&[("work", "#12")]), Path::new("s.json"))
            .unwrap_err();
        match err {
            Error::InputMalformed { message, .. } => assert!(message.contains("colours.work")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
