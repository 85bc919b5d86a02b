//! The four ring layers of the chart, outermost first.
//!
//! Every ring starts from 12 o'clock (the activities ring shifted by the
//! configured offset) and winds clockwise so wedges of different rings line
//! up as concentric segments.

use aarshjul_core::{Event, Palette, Result};
use aarshjul_types::formatting::format_percent_template;
use aarshjul_types::{Rgba, Settings};

use crate::figure::{Figure, HAlign, LabelStyle, Pie, PieOutput, TextItem, VAlign};
use crate::geometry::calendar_rotation;

/// Twelve o'clock
const START_ANGLE: f64 = 90.0;

const EVENT_LABEL_DISTANCE: f64 = 0.78;
const ACTIVITY_LABEL_DISTANCE: f64 = 0.87;
const CALENDAR_LABEL_DISTANCE: f64 = 0.9;

const CALENDAR_TEXT: Rgba = [0, 0, 0, 255];

/// How an activity label is oriented on its wedge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelOrientation {
    /// Follows the wedge's direction, flipped on the left half
    Tangent,
    /// Always level; used for long names that read badly when rotated
    Horizontal,
}

impl LabelOrientation {
    pub fn for_activity(name: &str, settings: &Settings) -> Self {
        if settings.render.is_horizontal_label(name) {
            Self::Horizontal
        } else {
            Self::Tangent
        }
    }
}

/// Compose all rings into a new figure
pub fn compose_chart(settings: &Settings, events: &[Event], palette: &Palette) -> Result<Figure> {
    let mut figure = Figure::new();
    draw_events_ring(&mut figure, settings, events, palette)?;
    draw_activities_ring(&mut figure, settings, palette)?;
    draw_calendar_ring(&mut figure, settings, palette)?;
    draw_centre(&mut figure, settings, palette)?;
    tracing::debug!(
        patches = figure.patches().len(),
        labels = figure.texts().len(),
        "Composed chart"
    );
    Ok(figure)
}

/// Outer border ring of ad-hoc events, in event log order
pub fn draw_events_ring(
    figure: &mut Figure,
    settings: &Settings,
    events: &[Event],
    palette: &Palette,
) -> Result<PieOutput> {
    let layout = &settings.layout;
    let background = palette.get("background")?;
    let weights: Vec<f64> = events.iter().map(|e| e.weight).collect();

    let pie = Pie::new(&weights, layout.size + layout.event_adjustment)
        .with_width(layout.width + layout.event_adjustment)
        .with_labels(events.iter().map(|e| e.name.clone()).collect())
        .with_colours(events.iter().map(|e| e.colour).collect())
        .with_edge(background)
        .clockwise_from(START_ANGLE)
        .with_label_distance(EVENT_LABEL_DISTANCE)
        .with_rotated_labels(true)
        .with_label_style(LabelStyle {
            size_pt: settings.render.event_font_size,
            colour: background,
            va: Some(VAlign::Center),
        });
    figure.pie(&pie)
}

/// Weekly activities ring, coloured by category
pub fn draw_activities_ring(
    figure: &mut Figure,
    settings: &Settings,
    palette: &Palette,
) -> Result<PieOutput> {
    let layout = &settings.layout;
    let activities = &settings.activities;
    let weights: Vec<f64> = activities.iter().map(|a| a.week_duration).collect();
    let colours = activities
        .iter()
        .map(|a| palette.get(&a.category))
        .collect::<Result<Vec<_>>>()?;

    let pie = Pie::new(&weights, layout.size - layout.width)
        .with_width(layout.width)
        .with_labels(activities.iter().map(|a| a.name.clone()).collect())
        .with_colours(colours)
        .with_edge(palette.get("background")?)
        .clockwise_from(START_ANGLE - layout.offset * 360.0)
        .with_label_distance(ACTIVITY_LABEL_DISTANCE)
        .with_rotated_labels(true)
        .with_label_style(LabelStyle {
            size_pt: settings.render.activity_font_size,
            colour: palette.get("text_contrast")?,
            va: Some(VAlign::Center),
        });
    let output = figure.pie(&pie)?;

    for (activity, id) in activities.iter().zip(&output.labels) {
        let orientation = LabelOrientation::for_activity(&activity.name, settings);
        let label = figure.text_mut(*id);
        if orientation == LabelOrientation::Horizontal {
            label.rotation = 0.0;
        }
        label.set_alignment(HAlign::Center, VAlign::Center);
    }

    Ok(output)
}

/// Month ring with alternating colours and upright labels
pub fn draw_calendar_ring(
    figure: &mut Figure,
    settings: &Settings,
    palette: &Palette,
) -> Result<PieOutput> {
    let layout = &settings.layout;
    let months = &settings.months;

    let pie = Pie::new(&months.weights, layout.size - layout.width * 2.0)
        .with_width(layout.width / 2.0)
        .with_labels(months.names.clone())
        .with_colours(vec![palette.get("month1")?, palette.get("month2")?])
        .with_edge(palette.get("background")?)
        .clockwise_from(START_ANGLE)
        .with_label_distance(CALENDAR_LABEL_DISTANCE)
        .with_rotated_labels(false)
        .with_label_style(LabelStyle {
            size_pt: settings.render.calendar_font_size,
            colour: CALENDAR_TEXT,
            va: None,
        });
    let output = figure.pie(&pie)?;

    for (span, id) in output.spans.iter().zip(&output.labels) {
        let label = figure.text_mut(*id);
        label.rotation = calendar_rotation(span);
        label.set_alignment(HAlign::Center, VAlign::Center);
    }

    Ok(output)
}

/// Solid centre disc carrying the title
pub fn draw_centre(figure: &mut Figure, settings: &Settings, palette: &Palette) -> Result<PieOutput> {
    let layout = &settings.layout;
    let weights = [1.0];

    let pie = Pie::new(&weights, layout.size - layout.width * 3.0)
        .with_colours(vec![palette.get("centre")?]);
    let output = figure.pie(&pie)?;

    let share = output
        .spans
        .first()
        .map(|span| span.sweep() / 360.0 * 100.0)
        .unwrap_or(100.0);
    figure.add_text(TextItem::centred(
        format_percent_template(&settings.title, share),
        0.0,
        0.0,
        settings.render.title_font_size,
        palette.get("background")?,
    ));

    Ok(output)
}
