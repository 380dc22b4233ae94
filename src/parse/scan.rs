// src/parse/scan.rs
//
// The carry-forward row scanner. Cause-list tables print time blocks, court
// numbers and hearing officers once per group of rows; the rows below inherit
// them until the next group starts. The scanner walks one table under a
// LayoutDescriptor, keeps that sparse state, and emits one fully-populated
// record per case entry.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::ParseError;
use crate::layout::{CarrySource, LayoutDescriptor, TimeStrategy};
use crate::parse::header::apply_header_patterns;
use crate::parse::result::{CauseListRecord, ParseResult};

/// Matches an hour:minute token, 1-2 digit hour, optional leading zero.
static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]?[0-9]:[0-9][0-9]").expect("time pattern"));

/// Runs of two or more whitespace characters, squashed in multi-line cells.
static WS_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s\s+").expect("whitespace pattern"));

/// Scan the cause-list table of `html` under `layout`.
///
/// Carried state lives entirely within this call; the function is a pure
/// mapping from `(markup, layout)` to a result and is safe to invoke from any
/// number of tasks at once.
pub fn scan(html: &str, layout: &LayoutDescriptor) -> Result<ParseResult, ParseError> {
    let document = Html::parse_document(html);
    let table_sel = Selector::parse("table").expect("table selector");
    let tr_sel = Selector::parse("tr").expect("tr selector");
    let td_sel = Selector::parse("td").expect("td selector");

    let table = document
        .select(&table_sel)
        .nth(layout.table_index)
        .ok_or(ParseError::MissingTable {
            index: layout.table_index,
        })?;

    let mut result = ParseResult::new(layout.columns.clone());

    // Carried state, reset per document. An empty carried time means no time
    // block has opened yet.
    let mut carried_time = String::new();
    let mut carried_publicity = String::new();
    let mut carried: BTreeMap<&'static str, String> = layout
        .carry_fields
        .iter()
        .map(|(key, _)| (*key, String::new()))
        .collect();

    for row in table.select(&tr_sel) {
        let cells: Vec<ElementRef> = row.select(&td_sel).collect();
        if let Some(min) = layout.min_cells {
            if cells.len() < min {
                continue;
            }
        }

        let row_text = element_text(&row);

        if !layout.header_patterns.is_empty() {
            apply_header_patterns(&row_text, &layout.header_patterns, &mut result.header);
        }

        // Labeled carry rows (court number / officer printed on a row of
        // their own): the value is the row's second subline.
        for (key, source) in &layout.carry_fields {
            if let CarrySource::LabeledRow(pattern) = source {
                let trimmed = row_text.trim();
                if pattern.is_match(trimmed) {
                    let value = trimmed.split('\n').nth(1).unwrap_or("").trim();
                    carried.insert(*key, value.to_string());
                }
            }
        }

        // Anchor: blank means spacer row or header-only row, no record.
        let anchor = cells
            .get(layout.anchor_cell)
            .map(element_text)
            .unwrap_or_default();
        if anchor.trim().is_empty() {
            continue;
        }

        // Time gate: a matching cell opens a new time block; without a match
        // the row inherits the open block, and a data row cannot exist before
        // the first block.
        let time_text = cells
            .get(layout.time_cell)
            .map(element_text)
            .unwrap_or_default();
        let has_time = TIME_PATTERN.is_match(&time_text);
        if !has_time && carried_time.is_empty() {
            continue;
        }
        if has_time {
            if let Some(cell) = cells.get(layout.time_cell) {
                let (time, publicity) = match layout.time_strategy {
                    TimeStrategy::Paragraphs => time_from_paragraphs(cell),
                    TimeStrategy::FlatText => (strip_day_period(&time_text), String::new()),
                };
                carried_time = time;
                carried_publicity = publicity;
            }
        }

        // Cell-based carries update after the time gate, each independently.
        for (key, source) in &layout.carry_fields {
            if let CarrySource::Cell(index) = source {
                if let Some(cell) = cells.get(*index) {
                    let value = element_text(cell).trim().to_string();
                    if !value.is_empty() {
                        carried.insert(*key, value);
                    }
                }
            }
        }

        let mut record: CauseListRecord = layout
            .columns
            .iter()
            .map(|c| (c.key.to_string(), String::new()))
            .collect();
        if let Some(slot) = record.get_mut("time") {
            *slot = carried_time.clone();
        }
        if let Some(slot) = record.get_mut("publicity") {
            *slot = carried_publicity.clone();
        }
        for (key, _) in &layout.carry_fields {
            if let (Some(slot), Some(value)) = (record.get_mut(*key), carried.get(key)) {
                *slot = value.clone();
            }
        }
        for field in &layout.direct_fields {
            let raw = cells.get(field.cell).map(element_text).unwrap_or_default();
            let value = if field.collapse {
                WS_RUN.replace_all(raw.trim(), " ").into_owned()
            } else {
                raw.trim().to_string()
            };
            if let Some(slot) = record.get_mut(field.key) {
                *slot = value;
            }
        }

        result.rows.push(record);
    }

    Ok(result)
}

fn element_text(el: &ElementRef) -> String {
    el.text().collect()
}

/// Structured time cell: sub-paragraphs, the second being the time and the
/// third through sixth forming the publicity annotation.
fn time_from_paragraphs(cell: &ElementRef) -> (String, String) {
    let p_sel = Selector::parse("p").expect("p selector");
    let paragraphs: Vec<String> = cell.select(&p_sel).map(|p| element_text(&p)).collect();

    let time = paragraphs
        .get(1)
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    let mut publicity = paragraphs
        .get(2)
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    for extra in paragraphs.iter().skip(3).take(3) {
        publicity.push(' ');
        publicity.push_str(extra.trim());
    }
    (time, publicity.trim().to_string())
}

/// Flat time cell: strip the forenoon/afternoon markers (first occurrence of
/// each) and trim.
fn strip_day_period(text: &str) -> String {
    text.trim()
        .replacen("上午", "", 1)
        .replacen("下午", "", 1)
        .trim()
        .to_string()
}
