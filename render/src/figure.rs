//! Rendering context
//!
//! A [`Figure`] collects wedge patches and text items in data coordinates.
//! Ring builders receive the figure explicitly, add a pie to it and adjust the
//! returned label handles. Nothing is rasterized until the finished figure is
//! handed to a [`Canvas`](crate::canvas::Canvas).

use aarshjul_core::{Error, Result};
use aarshjul_types::Rgba;

use crate::geometry::{WedgeSpan, label_anchor, pie_spans, tangent_rotation};

/// One filled annular sector
#[derive(Debug, Clone, PartialEq)]
pub struct WedgePatch {
    pub outer_radius: f64,
    /// Zero for a solid sector
    pub inner_radius: f64,
    pub span: WedgeSpan,
    pub fill: Rgba,
    /// Separator stroke colour, none for an unstroked wedge
    pub edge: Option<Rgba>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

/// A text label anchored at a data-space point.
///
/// The alignment places the text box relative to the anchor and the
/// rotation (degrees, counter-clockwise) pivots around the anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub x: f64,
    pub y: f64,
    /// Font size in points
    pub size_pt: f32,
    pub colour: Rgba,
    pub rotation: f64,
    pub ha: HAlign,
    pub va: VAlign,
}

impl TextItem {
    /// Centred, unrotated text
    pub fn centred(text: impl Into<String>, x: f64, y: f64, size_pt: f32, colour: Rgba) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            size_pt,
            colour,
            rotation: 0.0,
            ha: HAlign::Center,
            va: VAlign::Center,
        }
    }

    pub fn set_alignment(&mut self, ha: HAlign, va: VAlign) {
        self.ha = ha;
        self.va = va;
    }
}

/// Handle to a text item inside a [`Figure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextId(usize);

/// Text styling shared by all labels of one pie
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStyle {
    pub size_pt: f32,
    pub colour: Rgba,
    /// Overrides the vertical alignment the pie would pick
    pub va: Option<VAlign>,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            size_pt: 10.0,
            colour: [0, 0, 0, 255],
            va: None,
        }
    }
}

/// Description of one pie ring
#[derive(Debug, Clone)]
pub struct Pie<'a> {
    pub weights: &'a [f64],
    pub labels: Vec<String>,
    /// Fill colours, cycled when shorter than the weights
    pub colours: Vec<Rgba>,
    pub radius: f64,
    /// Ring thickness; `None` draws solid sectors
    pub width: Option<f64>,
    pub start_angle: f64,
    pub counterclock: bool,
    /// Label position as a fraction of `radius`
    pub label_distance: f64,
    pub rotate_labels: bool,
    pub edge: Option<Rgba>,
    pub label_style: LabelStyle,
}

impl<'a> Pie<'a> {
    pub fn new(weights: &'a [f64], radius: f64) -> Self {
        Self {
            weights,
            labels: Vec::new(),
            colours: Vec::new(),
            radius,
            width: None,
            start_angle: 0.0,
            counterclock: true,
            label_distance: 1.1,
            rotate_labels: false,
            edge: None,
            label_style: LabelStyle::default(),
        }
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_colours(mut self, colours: Vec<Rgba>) -> Self {
        self.colours = colours;
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Start at `angle` and wind clockwise
    pub fn clockwise_from(mut self, angle: f64) -> Self {
        self.start_angle = angle;
        self.counterclock = false;
        self
    }

    pub fn with_label_distance(mut self, distance: f64) -> Self {
        self.label_distance = distance;
        self
    }

    pub fn with_rotated_labels(mut self, rotate: bool) -> Self {
        self.rotate_labels = rotate;
        self
    }

    pub fn with_edge(mut self, colour: Rgba) -> Self {
        self.edge = Some(colour);
        self
    }

    pub fn with_label_style(mut self, style: LabelStyle) -> Self {
        self.label_style = style;
        self
    }
}

/// Wedge spans and label handles produced by [`Figure::pie`]
#[derive(Debug, Clone, Default)]
pub struct PieOutput {
    pub spans: Vec<WedgeSpan>,
    pub labels: Vec<TextId>,
}

/// Explicit drawing context for the whole chart
#[derive(Debug, Clone, Default)]
pub struct Figure {
    patches: Vec<WedgePatch>,
    texts: Vec<TextItem>,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pie ring. Returns the wedge spans and one label handle per
    /// wedge when labels were given.
    pub fn pie(&mut self, pie: &Pie<'_>) -> Result<PieOutput> {
        if !(pie.radius.is_finite() && pie.radius > 0.0) {
            return Err(Error::RenderFailure(format!(
                "pie radius must be positive, got {}",
                pie.radius
            )));
        }
        if !pie.labels.is_empty() && pie.labels.len() != pie.weights.len() {
            return Err(Error::RenderFailure(format!(
                "{} labels for {} wedges",
                pie.labels.len(),
                pie.weights.len()
            )));
        }
        if pie.colours.is_empty() && !pie.weights.is_empty() {
            return Err(Error::RenderFailure("pie has no fill colours".to_string()));
        }

        let spans = pie_spans(pie.weights, pie.start_angle, pie.counterclock)?;
        let inner_radius = pie
            .width
            .map(|w| (pie.radius - w).max(0.0))
            .unwrap_or(0.0);

        for (i, span) in spans.iter().enumerate() {
            self.patches.push(WedgePatch {
                outer_radius: pie.radius,
                inner_radius,
                span: *span,
                fill: pie.colours[i % pie.colours.len()],
                edge: pie.edge,
            });
        }

        let labels = pie
            .labels
            .iter()
            .zip(&spans)
            .map(|(label, span)| {
                let (x, y) = label_anchor(span, pie.radius, pie.label_distance);
                let ha = if x > 0.0 { HAlign::Left } else { HAlign::Right };
                let (rotation, va) = if pie.rotate_labels {
                    let va = if y > 0.0 { VAlign::Bottom } else { VAlign::Top };
                    (tangent_rotation(span, x), va)
                } else {
                    (0.0, VAlign::Center)
                };
                self.add_text(TextItem {
                    text: label.clone(),
                    x,
                    y,
                    size_pt: pie.label_style.size_pt,
                    colour: pie.label_style.colour,
                    rotation,
                    ha,
                    va: pie.label_style.va.unwrap_or(va),
                })
            })
            .collect();

        Ok(PieOutput { spans, labels })
    }

    pub fn add_text(&mut self, item: TextItem) -> TextId {
        self.texts.push(item);
        TextId(self.texts.len() - 1)
    }

    pub fn text(&self, id: TextId) -> &TextItem {
        &self.texts[id.0]
    }

    pub fn text_mut(&mut self, id: TextId) -> &mut TextItem {
        &mut self.texts[id.0]
    }

    /// Patches in paint order
    pub fn patches(&self) -> &[WedgePatch] {
        &self.patches
    }

    /// Text items in paint order; all text paints above all patches
    pub fn texts(&self) -> &[TextItem] {
        &self.texts
    }
}
