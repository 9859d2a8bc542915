use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::limits::MAX_CSV_ROWS;
use crate::model::{CalendarEntry, RoomId};

/// Result of one CSV import: the parsed entries plus how many malformed
/// rows were dropped on the floor.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    pub entries: Vec<CalendarEntry>,
    pub dropped: usize,
}

/// Parse an availability CSV into calendar entries.
///
/// Two layouts are accepted: `room_id,date,no_of_room` (global import) and
/// `date,no_of_room` when `fixed_room` supplies the room out-of-band. A
/// header row is auto-detected from the expected column names and skipped.
/// Parsing is lenient: rows with a non-numeric room id or count, a
/// missing/unparseable date, or too few columns are silently dropped — only
/// a fully empty result is an error.
pub fn parse_csv(
    data: &str,
    fixed_room: Option<RoomId>,
) -> Result<ImportSummary, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());

    let mut entries: Vec<CalendarEntry> = Vec::new();
    let mut dropped = 0usize;
    let mut first = true;

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!("dropped unreadable CSV row: {e}");
                dropped += 1;
                continue;
            }
        };
        if first {
            first = false;
            if is_header(&record) {
                continue;
            }
        }
        if entries.len() >= MAX_CSV_ROWS {
            return Err(ImportError::TooManyRows);
        }
        match parse_record(&record, fixed_room) {
            Some(entry) => entries.push(entry),
            None => {
                tracing::debug!("dropped malformed CSV row: {record:?}");
                dropped += 1;
            }
        }
    }

    if entries.is_empty() {
        return Err(ImportError::NoValidRows);
    }

    metrics::counter!(crate::observability::CSV_ROWS_IMPORTED_TOTAL)
        .increment(entries.len() as u64);
    metrics::counter!(crate::observability::CSV_ROWS_DROPPED_TOTAL).increment(dropped as u64);

    Ok(ImportSummary { entries, dropped })
}

fn is_header(record: &csv::StringRecord) -> bool {
    let has = |name: &str| record.iter().any(|f| f.eq_ignore_ascii_case(name));
    has("date") && has("no_of_room")
}

fn parse_record(record: &csv::StringRecord, fixed_room: Option<RoomId>) -> Option<CalendarEntry> {
    let (room_id, date_field, count_field) = match fixed_room {
        Some(room_id) => {
            if record.len() < 2 {
                return None;
            }
            (room_id, record.get(0)?, record.get(1)?)
        }
        None => {
            if record.len() < 3 {
                return None;
            }
            let room_id: RoomId = record.get(0)?.parse().ok()?;
            (room_id, record.get(1)?, record.get(2)?)
        }
    };
    if date_field.is_empty() {
        return None;
    }
    let date = NaiveDate::parse_from_str(date_field, "%Y-%m-%d").ok()?;
    let no_of_room: u32 = count_field.parse().ok()?;
    Some(CalendarEntry {
        room_id,
        date,
        no_of_room,
    })
}

/// Minimal example file for user guidance.
pub fn sample_csv(fixed_room: Option<RoomId>) -> String {
    match fixed_room {
        Some(_) => "date,no_of_room\n2025-01-01,10\n2025-01-02,8\n".to_string(),
        None => "room_id,date,no_of_room\n101,2025-01-01,10\n101,2025-01-02,8\n".to_string(),
    }
}

/// Merge entries into an existing per-room calendar. Dates present in
/// `entries` are overwritten; all other dates are left untouched.
pub fn merge_entries(
    calendar: &mut HashMap<RoomId, BTreeMap<NaiveDate, u32>>,
    entries: &[CalendarEntry],
) {
    for entry in entries {
        calendar
            .entry(entry.room_id)
            .or_default()
            .insert(entry.date, entry.no_of_room);
    }
}

// ── Errors ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// Nothing in the file survived lenient parsing.
    NoValidRows,
    TooManyRows,
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::NoValidRows => write!(f, "no valid rows found in CSV"),
            ImportError::TooManyRows => write!(f, "CSV has too many rows"),
        }
    }
}

impl std::error::Error for ImportError {}
