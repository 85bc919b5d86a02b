//! Settings document schema
//!
//! Mirrors the on-disk layout of `settings.json` (or its TOML equivalent).
//! Loading and validation live in `aarshjul-core`; this module only defines
//! the shape and the defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::colour::ColourValue;

/// Colour keys every palette must define besides the activity categories.
pub const RESERVED_COLOUR_KEYS: [&str; 6] = [
    "background",
    "events",
    "text_contrast",
    "month1",
    "month2",
    "centre",
];

/// Activity label drawn horizontally unless the settings override the list.
pub const DEFAULT_HORIZONTAL_LABEL: &str = "Sommerferie";

/// The whole settings document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub layout: Layout,
    pub colours: BTreeMap<String, ColourValue>,
    pub months: Months,
    pub activities: Vec<Activity>,
    pub title: String,
    #[serde(default)]
    pub render: RenderOptions,
}

impl Settings {
    /// Every colour key the renderer will look up, reserved keys first,
    /// then each distinct activity category in declaration order.
    pub fn required_colour_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = RESERVED_COLOUR_KEYS.to_vec();
        for activity in &self.activities {
            if !keys.contains(&activity.category.as_str()) {
                keys.push(activity.category.as_str());
            }
        }
        keys
    }
}

/// Ring sizing parameters, in pie radius units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Outer radius reference for the ring stack
    pub size: f64,
    /// Thickness of one full ring
    pub width: f64,
    /// Rotation of the activities ring as a fraction of a full turn
    pub offset: f64,
    /// Extra radius and thickness given to the events ring
    pub event_adjustment: f64,
}

/// Calendar ring segments, stored as parallel sequences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Months {
    pub names: Vec<String>,
    pub weights: Vec<f64>,
}

/// A weekly recurring activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    pub week_duration: f64,
    pub category: String,
}

/// Rasterization options. Every field has a default so the section may be
/// omitted entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Pixels per pie radius unit
    pub pixels_per_unit: f32,
    pub dpi: f32,
    /// Padding kept around the cropped chart
    pub pad_inches: f32,
    pub facecolor: ColourValue,
    pub font_family: Option<String>,
    pub font_dir: Option<String>,
    pub event_font_size: f32,
    pub activity_font_size: f32,
    pub calendar_font_size: f32,
    pub title_font_size: f32,
    /// Wedge separator width in points
    pub edge_width_pt: f32,
    /// Activity names whose labels stay horizontal instead of following
    /// the ring's tangent
    pub horizontal_labels: Vec<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pixels_per_unit: 150.0,
            dpi: 100.0,
            pad_inches: 0.1,
            facecolor: ColourValue::from("white"),
            font_family: None,
            font_dir: None,
            event_font_size: 12.0,
            activity_font_size: 14.0,
            calendar_font_size: 10.0,
            title_font_size: 28.0,
            edge_width_pt: 1.0,
            horizontal_labels: vec![DEFAULT_HORIZONTAL_LABEL.to_string()],
        }
    }
}

impl RenderOptions {
    /// Convert a size in points to pixels at the configured dpi
    #[inline]
    pub fn points_to_pixels(&self, points: f32) -> f32 {
        points * self.dpi / 72.0
    }

    /// Whether an activity label keeps horizontal orientation
    pub fn is_horizontal_label(&self, name: &str) -> bool {
        self.horizontal_labels.iter().any(|label| label == name)
    }
}
