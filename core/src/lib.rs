//! Input loading and output naming for the aarshjul radial calendar.
//!
//! - [`config`] decodes the settings document
//! - [`events`] reads the event log and derives each event's colour
//! - [`palette`] resolves colour keys to RGBA
//! - [`output`] picks a non-colliding numbered output path

pub mod config;
pub mod error;
pub mod events;
pub mod output;
pub mod palette;

pub use config::load_settings;
pub use error::{Error, Result};
pub use events::{Event, EventRecord, colour_events, load_events};
pub use output::{MAX_OUTPUT_INDEX, resolve_output_path, resolve_output_path_bounded};
pub use palette::Palette;
