//! Rasterization of a [`Figure`] into a PNG
//!
//! `Canvas` owns the pixmap and the text shaping state. Data coordinates are
//! mapped so the chart centre sits in the middle of the pixmap with y flipped
//! to point down. Wedges are filled first, then every text item is shaped
//! into an offscreen pixmap and composited with its rotation.

use std::path::Path;

use aarshjul_core::{Error, Result};
use aarshjul_types::{RenderOptions, Rgba};
use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache, fontdb};
use tiny_skia::{
    FillRule, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke, Transform,
};

use crate::figure::{Figure, HAlign, TextItem, VAlign, WedgePatch};
use crate::utils::{color_from_rgba, content_bounds};

/// Line height as a multiple of the font size
const LINE_HEIGHT: f32 = 1.2;

/// Slack kept around the furthest patch or text box, in pixels
const CANVAS_MARGIN_PX: f32 = 8.0;

/// Arc segments are split so no cubic spans more than this many degrees
const MAX_ARC_SEGMENT: f64 = 90.0;

/// Build the font system: system fonts plus an optional extra directory
pub fn load_font_system(options: &RenderOptions) -> FontSystem {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    if let Some(dir) = &options.font_dir {
        db.load_fonts_dir(dir);
    }
    if db.is_empty() {
        tracing::warn!("No fonts found; labels will not be drawn");
    } else {
        tracing::debug!(faces = db.len(), "Loaded font database");
    }

    let locale = sys_locale::get_locale().unwrap_or_else(|| "en-US".to_string());
    FontSystem::new_with_locale_and_db(locale, db)
}

pub struct Canvas {
    pixmap: Pixmap,
    font_system: FontSystem,
    swash_cache: SwashCache,
    font_family: Option<String>,
    centre: (f32, f32),
    pixels_per_unit: f32,
    options: RenderOptions,
}

impl Canvas {
    /// Create a transparent canvas that holds every patch and every text
    /// box of `figure`, whatever its rotation, centred on the chart.
    pub fn new(figure: &Figure, options: &RenderOptions, font_system: FontSystem) -> Result<Self> {
        let placeholder = Pixmap::new(1, 1)
            .ok_or_else(|| Error::RenderFailure("cannot allocate a canvas".to_string()))?;
        let mut canvas = Self {
            pixmap: placeholder,
            font_system,
            swash_cache: SwashCache::new(),
            font_family: options.font_family.clone(),
            centre: (0.0, 0.0),
            pixels_per_unit: options.pixels_per_unit,
            options: options.clone(),
        };

        let half = required_half_extent(figure, options.pixels_per_unit, |item| {
            let font_size_px = options.points_to_pixels(item.size_pt);
            canvas.measure_text(&item.text, font_size_px)
        });
        let stroke = options.points_to_pixels(options.edge_width_pt);
        let side = (2.0 * (half + CANVAS_MARGIN_PX.max(stroke))).ceil();
        if !(side.is_finite() && side >= 1.0) {
            return Err(Error::RenderFailure(format!("invalid canvas size {side}")));
        }

        canvas.pixmap = Pixmap::new(side as u32, side as u32).ok_or_else(|| {
            Error::RenderFailure(format!("cannot allocate a {side}x{side} canvas"))
        })?;
        canvas.centre = (side / 2.0, side / 2.0);
        tracing::debug!(side, "Allocated canvas");
        Ok(canvas)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Map a data-space point to pixel space
    #[inline]
    pub fn to_pixel(&self, x: f64, y: f64) -> (f32, f32) {
        let (cx, cy) = self.centre;
        (
            cx + x as f32 * self.pixels_per_unit,
            cy - y as f32 * self.pixels_per_unit,
        )
    }

    /// Paint the whole figure: patches in order, then text on top
    pub fn draw_figure(&mut self, figure: &Figure) {
        for patch in figure.patches() {
            self.fill_wedge(patch);
        }
        for item in figure.texts() {
            self.draw_text(item);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Wedges
    // ─────────────────────────────────────────────────────────────────────────

    pub fn fill_wedge(&mut self, patch: &WedgePatch) {
        let Some(path) = self.wedge_path(patch) else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(color_from_rgba(patch.fill));
        paint.anti_alias = true;
        self.pixmap
            .fill_path(&path, &paint, FillRule::EvenOdd, Transform::identity(), None);

        if let Some(edge) = patch.edge {
            let stroke = Stroke {
                width: self.options.points_to_pixels(self.options.edge_width_pt),
                ..Stroke::default()
            };
            paint.set_color(color_from_rgba(edge));
            self.pixmap
                .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    fn wedge_path(&self, patch: &WedgePatch) -> Option<tiny_skia::Path> {
        let (cx, cy) = self.centre;
        let ppu = self.pixels_per_unit as f64;
        let outer = patch.outer_radius * ppu;
        let inner = patch.inner_radius * ppu;
        let span = patch.span;
        let mut pb = PathBuilder::new();

        if span.is_full_turn() {
            pb.push_circle(cx, cy, outer as f32);
            if inner > 0.0 {
                pb.push_circle(cx, cy, inner as f32);
            }
            return pb.finish();
        }

        let start = self.polar(outer, span.theta1);
        pb.move_to(start.0, start.1);
        append_arc(&mut pb, self.centre, outer, span.theta1, span.theta2);
        if inner > 0.0 {
            let back = self.polar(inner, span.theta2);
            pb.line_to(back.0, back.1);
            append_arc(&mut pb, self.centre, inner, span.theta2, span.theta1);
        } else {
            pb.line_to(cx, cy);
        }
        pb.close();
        pb.finish()
    }

    fn polar(&self, radius_px: f64, degrees: f64) -> (f32, f32) {
        polar(self.centre, radius_px, degrees)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Text
    // ─────────────────────────────────────────────────────────────────────────

    /// Shape `text` and measure it in pixels
    pub fn measure_text(&mut self, text: &str, font_size_px: f32) -> (f32, f32) {
        let buffer = self.shape(text, font_size_px);
        buffer_size(&buffer, font_size_px)
    }

    /// Draw a text item: the aligned text box is placed relative to the
    /// anchor and the whole box is rotated around the anchor.
    pub fn draw_text(&mut self, item: &TextItem) {
        if item.text.trim().is_empty() {
            return;
        }
        let font_size_px = self.options.points_to_pixels(item.size_pt);
        let Some(glyphs) = self.rasterize_text(&item.text, font_size_px, item.colour) else {
            return;
        };

        let (width, height) = (glyphs.width() as f32, glyphs.height() as f32);
        let dx = match item.ha {
            HAlign::Left => 0.0,
            HAlign::Center => -width / 2.0,
            HAlign::Right => -width,
        };
        let dy = match item.va {
            VAlign::Top => 0.0,
            VAlign::Center => -height / 2.0,
            VAlign::Bottom => -height,
        };

        let (ax, ay) = self.to_pixel(item.x, item.y);
        // Rotation is counter-clockwise in data space, y is flipped in pixels
        let transform = Transform::from_translate(ax, ay)
            .pre_concat(Transform::from_rotate(-(item.rotation as f32)))
            .pre_concat(Transform::from_translate(dx, dy));
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, glyphs.as_ref(), &paint, transform, None);
    }

    fn shape(&mut self, text: &str, font_size_px: f32) -> Buffer {
        let metrics = Metrics::new(font_size_px, font_size_px * LINE_HEIGHT);
        let family = match &self.font_family {
            Some(name) => Family::Name(name.as_str()),
            None => Family::SansSerif,
        };
        let attrs = Attrs::new().family(family);

        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, None, None);
        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(&mut self.font_system, false);
        buffer
    }

    /// Render text into its own tightly sized pixmap
    fn rasterize_text(&mut self, text: &str, font_size_px: f32, colour: Rgba) -> Option<Pixmap> {
        let buffer = self.shape(text, font_size_px);
        let (width, height) = buffer_size(&buffer, font_size_px);
        if width <= 0.0 || height <= 0.0 {
            return None;
        }

        let mut glyphs = Pixmap::new(width.ceil() as u32 + 1, height.ceil() as u32 + 1)?;
        let mut paint = Paint {
            anti_alias: false,
            ..Paint::default()
        };
        let base = cosmic_text::Color::rgba(colour[0], colour[1], colour[2], colour[3]);
        buffer.draw(
            &mut self.font_system,
            &mut self.swash_cache,
            base,
            |x, y, w, h, color| {
                let Some(rect) = Rect::from_xywh(x as f32, y as f32, w as f32, h as f32) else {
                    return;
                };
                paint.set_color_rgba8(color.r(), color.g(), color.b(), color.a());
                glyphs.fill_rect(rect, &paint, Transform::identity(), None);
            },
        );
        Some(glyphs)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Output
    // ─────────────────────────────────────────────────────────────────────────

    /// Crop to the painted area plus padding and flatten onto `facecolor`
    pub fn into_cropped(self, facecolor: Rgba) -> Result<Pixmap> {
        let pad = (self.options.pad_inches * self.options.dpi).round().max(0.0) as u32;
        let Some(bounds) = content_bounds(&self.pixmap) else {
            tracing::warn!("Chart is empty; saving the blank canvas");
            let mut blank = self.pixmap.clone();
            blank.fill(color_from_rgba(facecolor));
            return Ok(blank);
        };

        let width = bounds.width() + 2 * pad;
        let height = bounds.height() + 2 * pad;
        let mut out = Pixmap::new(width, height).ok_or_else(|| {
            Error::RenderFailure(format!("cannot allocate a {width}x{height} output image"))
        })?;
        out.fill(color_from_rgba(facecolor));
        out.draw_pixmap(
            pad as i32 - bounds.left as i32,
            pad as i32 - bounds.top as i32,
            self.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        Ok(out)
    }
}

/// Encode `pixmap` and write it to `path`
pub fn save_png(pixmap: &Pixmap, path: &Path) -> Result<()> {
    let bytes = pixmap
        .encode_png()
        .map_err(|e| Error::RenderFailure(format!("PNG encoding failed: {e}")))?;
    std::fs::write(path, bytes)
        .map_err(|e| Error::RenderFailure(format!("cannot write {}: {e}", path.display())))
}

/// Pixel distance from the chart centre that the figure can reach.
///
/// A text box may be rotated any way around its anchor, so each label
/// reaches at most its anchor distance plus the box diagonal.
pub fn required_half_extent(
    figure: &Figure,
    pixels_per_unit: f32,
    mut measure: impl FnMut(&TextItem) -> (f32, f32),
) -> f32 {
    let patches = figure
        .patches()
        .iter()
        .map(|p| p.outer_radius as f32 * pixels_per_unit)
        .fold(0.0f32, f32::max);

    figure
        .texts()
        .iter()
        .filter(|item| !item.text.trim().is_empty())
        .map(|item| {
            let (width, height) = measure(item);
            item.x.hypot(item.y) as f32 * pixels_per_unit + width.hypot(height)
        })
        .fold(patches, f32::max)
}

fn buffer_size(buffer: &Buffer, font_size_px: f32) -> (f32, f32) {
    let (width, lines) = buffer
        .layout_runs()
        .fold((0.0f32, 0usize), |(w, n), run| (w.max(run.line_w), n + 1));
    (width, lines as f32 * font_size_px * LINE_HEIGHT)
}

/// Pixel position of `degrees` on a circle of `radius_px` around `centre`
fn polar(centre: (f32, f32), radius_px: f64, degrees: f64) -> (f32, f32) {
    let theta = degrees.to_radians();
    (
        centre.0 + (radius_px * theta.cos()) as f32,
        centre.1 - (radius_px * theta.sin()) as f32,
    )
}

/// Append a circular arc from `from` to `to` degrees as cubic segments.
/// The path's current point must already be at the arc's start.
fn append_arc(pb: &mut PathBuilder, centre: (f32, f32), radius_px: f64, from: f64, to: f64) {
    let sweep = to - from;
    let segments = (sweep.abs() / MAX_ARC_SEGMENT).ceil().max(1.0) as usize;
    let step = sweep / segments as f64;

    for i in 0..segments {
        let a0 = from + step * i as f64;
        let a1 = a0 + step;
        let (t0, t1) = (a0.to_radians(), a1.to_radians());
        // Control arm length for a cubic approximating this arc
        let k = 4.0 / 3.0 * ((t1 - t0) / 4.0).tan() * radius_px;

        let p0 = polar(centre, radius_px, a0);
        let p1 = polar(centre, radius_px, a1);
        let c1 = (p0.0 - (k * t0.sin()) as f32, p0.1 - (k * t0.cos()) as f32);
        let c2 = (p1.0 + (k * t1.sin()) as f32, p1.1 + (k * t1.cos()) as f32);
        pb.cubic_to(c1.0, c1.1, c2.0, c2.1, p1.0, p1.1);
    }
}
