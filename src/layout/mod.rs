//! Layout descriptors: the declarative configuration that drives the row
//! scanner. Each court's cause-list page belongs to one of a small closed set
//! of layout families; everything that differs between families (which table
//! to read, cell indices, carry-forward fields, header label patterns) lives
//! here as data, so the scanner itself has a single code path.

use regex::Regex;
use serde::Serialize;

mod registry;

pub use registry::resolve;

/// One export column: stable key, display name, and the ascending sort
/// position it takes in the tabularized grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSpec {
    pub key: &'static str,
    pub name: &'static str,
    pub seq: u32,
}

/// How `{time, publicity}` are pulled out of the time cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeStrategy {
    /// The cell holds sub-paragraphs: the second is the time, the third
    /// through sixth (space-joined) form the publicity annotation.
    Paragraphs,
    /// The cell is a flat text block; day-period markers are stripped and
    /// no publicity is extracted.
    FlatText,
}

/// Where a carry-forward field reads its value from.
#[derive(Debug, Clone)]
pub enum CarrySource {
    /// A fixed cell index; a non-empty trimmed cell overwrites the carried
    /// value, an empty one retains it.
    Cell(usize),
    /// A label pattern tested against the whole row text; on a match the
    /// carried value becomes the row's second subline. The magistrates'
    /// layout prints court number and magistrate this way, on rows of their
    /// own above each block of cases.
    LabeledRow(Regex),
}

/// A document-level metadata label: rows whose text contains the pattern
/// populate `ParseResult::header` under `key`.
#[derive(Debug, Clone)]
pub struct HeaderPattern {
    pub pattern: Regex,
    pub key: &'static str,
    pub name: &'static str,
    pub seq: u32,
}

/// A per-row field taken verbatim from one cell.
#[derive(Debug, Clone)]
pub struct DirectField {
    pub key: &'static str,
    pub cell: usize,
    /// Squash runs of whitespace to a single space (multi-line cells).
    pub collapse: bool,
}

/// Full scanning configuration for one layout family.
#[derive(Debug, Clone)]
pub struct LayoutDescriptor {
    /// Zero-based index of the table to read (some pages put the cause list
    /// in their second table).
    pub table_index: usize,
    /// Export column schema, keys unique, ordered by `seq` at flatten time.
    pub columns: Vec<ColumnSpec>,
    /// A row is a data entry only if this cell is present and non-empty.
    pub anchor_cell: usize,
    /// The cell tested against the time pattern.
    pub time_cell: usize,
    pub time_strategy: TimeStrategy,
    /// Rows with fewer cells are skipped outright, before any matching.
    pub min_cells: Option<usize>,
    pub header_patterns: Vec<HeaderPattern>,
    /// Carry-forward fields other than the time/publicity pair, each with
    /// its own source; they update independently of one another.
    pub carry_fields: Vec<(&'static str, CarrySource)>,
    pub direct_fields: Vec<DirectField>,
}
