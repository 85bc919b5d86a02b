//! Event log loading
//!
//! The event log is a CSV file with a header row and at least the columns
//! `name` and `weight`. Row order is preserved because it decides where each
//! wedge lands on the ring. An empty `name` marks a background filler wedge.

use std::fs::File;
use std::path::Path;

use aarshjul_types::Rgba;

use crate::error::{Error, Result};
use crate::palette::Palette;

const NAME_COLUMN: &str = "name";
const WEIGHT_COLUMN: &str = "weight";

/// A row of the event log as read from disk
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    /// Event name, empty for background rows
    pub name: String,
    /// Share of the events ring
    pub weight: f64,
}

impl EventRecord {
    /// Active events carry a name; the rest pad the ring with background
    pub fn is_active(&self) -> bool {
        !self.name.is_empty()
    }
}

/// An event with its derived wedge colour
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub name: String,
    pub weight: f64,
    pub colour: Rgba,
}

/// Read the event log at `path`
pub fn load_events(path: &Path) -> Result<Vec<EventRecord>> {
    let file = File::open(path).map_err(|e| Error::from_input_io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| Error::malformed(path, e))?
        .clone();
    let column = |wanted: &str| {
        headers
            .iter()
            .position(|h| h == wanted)
            .ok_or_else(|| Error::malformed(path, format!("missing column {wanted:?}")))
    };
    let name_idx = column(NAME_COLUMN)?;
    let weight_idx = column(WEIGHT_COLUMN)?;

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row_number = index + 1;
        let row = row.map_err(|e| Error::malformed(path, format!("row {row_number}: {e}")))?;

        // Absent cells become empty names rather than a null marker
        let name = row.get(name_idx).unwrap_or_default().to_string();
        let raw_weight = row.get(weight_idx).unwrap_or_default().trim();
        let weight = raw_weight.parse::<f64>().map_err(|_| {
            Error::malformed(
                path,
                format!("row {row_number}: weight {raw_weight:?} is not a number"),
            )
        })?;

        records.push(EventRecord { name, weight });
    }

    let active = records.iter().filter(|r| r.is_active()).count();
    let total: f64 = records.iter().map(|r| r.weight).sum();
    tracing::info!(
        path = %path.display(),
        rows = records.len(),
        active,
        "Loaded events"
    );
    tracing::debug!(total_weight = total, "Event weights");
    if records.is_empty() {
        tracing::warn!(path = %path.display(), "Event log has no rows, events ring is empty");
    } else if active == 0 {
        tracing::warn!(
            path = %path.display(),
            "No event has a name, events ring is all background"
        );
    }

    Ok(records)
}

/// Colour for a single event: `events` when it has a name, `background` otherwise
#[inline]
pub fn event_colour(record: &EventRecord, events: Rgba, background: Rgba) -> Rgba {
    if record.is_active() { events } else { background }
}

/// Attach the derived colour to every record, preserving order
pub fn colour_events(records: Vec<EventRecord>, palette: &Palette) -> Result<Vec<Event>> {
    let events_colour = palette.get("events")?;
    let background = palette.get("background")?;

    Ok(records
        .into_iter()
        .map(|record| {
            let colour = event_colour(&record, events_colour, background);
            Event {
                name: record.name,
                weight: record.weight,
                colour,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aarshjul_types::ColourValue;
    use std::collections::BTreeMap;

    fn write_csv(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.csv");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    fn palette() -> Palette {
        let colours: BTreeMap<String, ColourValue> = [
            ("events".to_string(), ColourValue::from("#d62728")),
            ("background".to_string(), ColourValue::from("#ffffff")),
        ]
        .into_iter()
        .collect();
        Palette::from_colours(&colours, Path::new("settings.json")).unwrap()
    }

    #[test]
    fn test_missing_name_becomes_empty() {
        let (_dir, path) = write_csv("name,weight\nHoliday,1\n,3\nExam,0.5\n");
        let records = load_events(&path).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[1].name, "");
        assert_eq!(records[1].weight, 3.0);
        assert!(records[0].is_active());
        assert!(!records[1].is_active());
    }

    #[test]
    fn test_column_order_and_extra_columns() {
        let (_dir, path) = write_csv("weight,note,name\n2,x,Camp\n1,,\n");
        let records = load_events(&path).unwrap();
        assert_eq!(
            records,
            vec![
                EventRecord { name: "Camp".into(), weight: 2.0 },
                EventRecord { name: "".into(), weight: 1.0 },
            ]
        );
    }

    #[test]
    fn test_short_row_treated_as_missing_name() {
        let (_dir, path) = write_csv("weight,name\n4\n");
        let records = load_events(&path).unwrap();
        assert_eq!(records[0].name, "");
    }

    #[test]
    fn test_missing_column_rejected() {
        let (_dir, path) = write_csv("title,weight\nA,1\n");
        let err = load_events(&path).unwrap_err();
        match err {
            Error::InputMalformed { message, .. } => assert!(message.contains("\"name\"")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_weight_reports_row() {
        let (_dir, path) = write_csv("name,weight\nA,1\nB,\n");
        let err = load_events(&path).unwrap_err();
        assert!(err.to_string().contains("row 2"), "{err}");
    }

    #[test]
    fn test_header_only_log_is_empty() {
        let (_dir, path) = write_csv("name,weight\n");
        let records = load_events(&path).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_unnamed_events_load_as_inactive() {
        let (_dir, path) = write_csv("name,weight\n,1\n,2\n");
        let records = load_events(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| !r.is_active()));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_events(&dir.path().join("events.csv")).unwrap_err();
        assert!(matches!(err, Error::InputNotFound { .. }));
    }

    #[test]
    fn test_colour_events_by_activity() {
        let records = vec![
            EventRecord { name: "Holiday".into(), weight: 1.0 },
            EventRecord { name: "".into(), weight: 6.0 },
            EventRecord { name: "Trip".into(), weight: 2.0 },
        ];
        let events = colour_events(records, &palette()).unwrap();

        assert_eq!(events[0].colour, [214, 39, 40, 255]);
        assert_eq!(events[1].colour, [255, 255, 255, 255]);
        assert_eq!(events[2].colour, [214, 39, 40, 255]);
        assert_eq!(events[2].name, "Trip");
    }

    #[test]
    fn test_colour_events_requires_palette_keys() {
        let empty = Palette::default();
        let err = colour_events(Vec::new(), &empty).unwrap_err();
        assert!(matches!(err, Error::PaletteKeyMissing(_)));
    }
}
