use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::layout::ColumnSpec;

/// One document-level metadata value picked up from a header row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderField {
    pub name: String,
    pub value: String,
    pub seq: u32,
}

/// One normalized case entry: column key → trimmed value. Every column key of
/// the layout is present, with an empty string where the source had nothing.
pub type CauseListRecord = BTreeMap<String, String>;

/// The outcome of scanning one cause-list document.
///
/// `scan` fills `header`, `columns` and `rows` only; it is a pure function of
/// the markup and the layout, so identical input yields an identical value.
/// The orchestrator stamps capture metadata afterwards via [`annotate`].
///
/// [`annotate`]: ParseResult::annotate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseResult {
    pub header: BTreeMap<String, HeaderField>,
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<CauseListRecord>,
    pub captured: Option<DateTime<Utc>>,
    pub court_code: String,
    pub date_code: String,
    pub source: String,
}

impl ParseResult {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self {
            header: BTreeMap::new(),
            columns,
            rows: Vec::new(),
            captured: None,
            court_code: String::new(),
            date_code: String::new(),
            source: String::new(),
        }
    }

    /// Attach the identifiers and capture timestamp after a successful parse.
    pub fn annotate(&mut self, date_code: &str, court_code: &str, source: &str) {
        self.date_code = date_code.to_string();
        self.court_code = court_code.to_string();
        self.source = source.to_string();
        self.captured = Some(Utc::now());
    }
}
