//! Radial calendar renderer
//!
//! Builds the chart as a [`Figure`] of concentric pie rings, rasterizes it
//! with tiny-skia and cosmic-text and writes a tightly cropped PNG.

pub mod canvas;
pub mod figure;
pub mod geometry;
pub mod rings;
pub mod utils;

use std::path::Path;

use aarshjul_core::{Error, Event, Palette, Result};
use aarshjul_types::Settings;

pub use canvas::{Canvas, load_font_system, required_half_extent, save_png};
pub use figure::{Figure, HAlign, LabelStyle, Pie, PieOutput, TextId, TextItem, VAlign, WedgePatch};
pub use geometry::{WedgeSpan, calendar_rotation, pie_spans, tangent_rotation};
pub use rings::{LabelOrientation, compose_chart};

/// Render the chart for `settings` and `events` to a PNG at `out_path`.
///
/// The file is written only after every ring has been composed and painted.
pub fn render_chart(
    settings: &Settings,
    events: &[Event],
    palette: &Palette,
    out_path: &Path,
) -> Result<()> {
    let options = &settings.render;
    let facecolor = options
        .facecolor
        .to_rgba()
        .map_err(|e| Error::RenderFailure(format!("render.facecolor: {e}")))?;

    let figure = compose_chart(settings, events, palette)?;

    let mut canvas = Canvas::new(&figure, options, load_font_system(options))?;
    canvas.draw_figure(&figure);
    let image = canvas.into_cropped(facecolor)?;

    save_png(&image, out_path)?;
    tracing::info!(
        path = %out_path.display(),
        width = image.width(),
        height = image.height(),
        "Saved chart"
    );
    Ok(())
}
