//! Shared data model for the aarshjul radial calendar.
//!
//! The settings document, its colour values and the small formatting helpers
//! used when composing labels live here so that the loader, renderer and CLI
//! agree on a single definition.

pub mod colour;
pub mod formatting;
pub mod settings;

pub use colour::{ColourError, ColourValue, Rgba, parse_colour};
pub use settings::{
    Activity, DEFAULT_HORIZONTAL_LABEL, Layout, Months, RESERVED_COLOUR_KEYS, RenderOptions,
    Settings,
};
