// src/layout/registry.rs
//
// The closed set of known layout families and the court codes that use them.
// New courts or label variants are additive configuration here, not scanner
// changes.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{
    CarrySource, ColumnSpec, DirectField, HeaderPattern, LayoutDescriptor, TimeStrategy,
};

fn col(key: &'static str, name: &'static str, seq: u32) -> ColumnSpec {
    ColumnSpec { key, name, seq }
}

fn direct(key: &'static str, cell: usize) -> DirectField {
    DirectField {
        key,
        cell,
        collapse: false,
    }
}

fn collapsed(key: &'static str, cell: usize) -> DirectField {
    DirectField {
        key,
        cell,
        collapse: true,
    }
}

/// Court number / hearing-officer labels printed in the page preamble rows.
fn chambers_header_patterns() -> Vec<HeaderPattern> {
    vec![
        HeaderPattern {
            pattern: Regex::new(r"(?i)Court No.:").expect("court-no pattern"),
            key: "court_no",
            name: "Court No",
            seq: 0,
        },
        HeaderPattern {
            pattern: Regex::new("聆案官 :").expect("master pattern"),
            key: "master",
            name: "Master",
            seq: 1,
        },
    ]
}

/// High Court chambers lists (incl. personal-injuries) and the mentions list.
static HIGH_COURT_CHAMBERS: Lazy<LayoutDescriptor> = Lazy::new(|| LayoutDescriptor {
    table_index: 0,
    columns: vec![
        col("time", "Time", 0),
        col("publicity", "Publicity", 1),
        col("case_no", "Case No", 2),
        col("parties", "Parties", 3),
        col("offences", "Offences/Nature", 4),
        col("representative", "Representative", 5),
    ],
    anchor_cell: 1,
    time_cell: 0,
    time_strategy: TimeStrategy::Paragraphs,
    min_cells: None,
    header_patterns: chambers_header_patterns(),
    carry_fields: vec![],
    direct_fields: vec![
        direct("case_no", 1),
        direct("parties", 2),
        direct("offences", 3),
        direct("representative", 4),
    ],
});

/// Bailiff summonses: same shape as the chambers list minus the offences
/// column.
static BAILIFF_SUMMONS: Lazy<LayoutDescriptor> = Lazy::new(|| LayoutDescriptor {
    table_index: 0,
    columns: vec![
        col("time", "Time", 0),
        col("publicity", "Publicity", 1),
        col("case_no", "Case No", 2),
        col("parties", "Parties", 3),
        col("representative", "Representative", 4),
    ],
    anchor_cell: 1,
    time_cell: 0,
    time_strategy: TimeStrategy::Paragraphs,
    min_cells: None,
    header_patterns: chambers_header_patterns(),
    carry_fields: vec![],
    direct_fields: vec![
        direct("case_no", 1),
        direct("parties", 2),
        direct("representative", 3),
    ],
});

/// District Court criminal/civil lists. Court number and judge are leading
/// cells printed once per block and carried forward.
static DISTRICT_COURT: Lazy<LayoutDescriptor> = Lazy::new(|| LayoutDescriptor {
    table_index: 0,
    columns: vec![
        col("court_no", "Court No", 0),
        col("master", "Judge", 1),
        col("time", "Time", 2),
        col("publicity", "Publicity", 3),
        col("case_no", "Case No", 4),
        col("parties", "Parties", 5),
        col("offences", "Offences/Nature", 6),
        col("representative", "Representative", 7),
    ],
    anchor_cell: 3,
    time_cell: 2,
    time_strategy: TimeStrategy::Paragraphs,
    min_cells: None,
    header_patterns: vec![],
    carry_fields: vec![
        ("court_no", CarrySource::Cell(0)),
        ("master", CarrySource::Cell(1)),
    ],
    direct_fields: vec![
        direct("case_no", 3),
        direct("parties", 4),
        direct("offences", 5),
        direct("representative", 6),
    ],
});

/// High Court masters' list: district-court shape, but the cause list is the
/// page's second table.
static HIGH_COURT_MASTERS: Lazy<LayoutDescriptor> = Lazy::new(|| LayoutDescriptor {
    table_index: 1,
    ..DISTRICT_COURT.clone()
});

/// Coroner's Court: second table, coroner instead of judge, and the deceased's
/// name in place of parties. Rows with fewer than six cells are decoration.
static CORONERS_COURT: Lazy<LayoutDescriptor> = Lazy::new(|| LayoutDescriptor {
    table_index: 1,
    columns: vec![
        col("court_no", "Court No", 0),
        col("master", "Coroner", 1),
        col("time", "Time", 2),
        col("publicity", "Publicity", 3),
        col("case_no", "Case No", 4),
        col("deceased", "Name of Deceased", 5),
        col("nature", "Nature", 6),
    ],
    anchor_cell: 3,
    time_cell: 2,
    time_strategy: TimeStrategy::Paragraphs,
    min_cells: Some(6),
    header_patterns: vec![],
    carry_fields: vec![
        ("court_no", CarrySource::Cell(0)),
        ("master", CarrySource::Cell(1)),
    ],
    direct_fields: vec![
        direct("case_no", 3),
        direct("deceased", 4),
        direct("nature", 5),
    ],
});

/// Magistrates' courts. Court number and magistrate appear on labeled rows of
/// their own above each block; the time cell is flat bilingual text with a
/// day-period marker.
static MAGISTRATES: Lazy<LayoutDescriptor> = Lazy::new(|| LayoutDescriptor {
    table_index: 0,
    columns: vec![
        col("court_no", "Court No", 0),
        col("master", "Magistrate", 1),
        col("time", "Time", 2),
        col("publicity", "Publicity", 3),
        col("case_no", "Case No", 4),
        col("parties", "Defendant/Respondent", 5),
        col("offences", "Offences/Nature", 6),
        col("hearing", "Hearing", 7),
    ],
    anchor_cell: 4,
    time_cell: 3,
    time_strategy: TimeStrategy::FlatText,
    min_cells: Some(4),
    header_patterns: vec![],
    carry_fields: vec![
        (
            "court_no",
            CarrySource::LabeledRow(Regex::new("(?i)法庭 Court").expect("court-row pattern")),
        ),
        (
            "master",
            CarrySource::LabeledRow(Regex::new("裁判官").expect("magistrate-row pattern")),
        ),
    ],
    direct_fields: vec![
        direct("case_no", 4),
        collapsed("parties", 5),
        collapsed("offences", 6),
        collapsed("hearing", 7),
    ],
});

/// Map a court code to its layout. Unknown codes are explicitly unsupported;
/// the caller surfaces that as its own outcome, distinct from parse failures.
pub fn resolve(court_code: &str) -> Option<&'static LayoutDescriptor> {
    match court_code {
        "CLPI" | "MCL" => Some(&HIGH_COURT_CHAMBERS),
        "BP" => Some(&BAILIFF_SUMMONS),
        // DCMC's upstream page has a minor structural irregularity; it parses
        // under the same descriptor as DC, reproduced as-is.
        "DC" | "DCMC" => Some(&DISTRICT_COURT),
        "HCMC" => Some(&HIGH_COURT_MASTERS),
        "CRC" => Some(&CORONERS_COURT),
        "KTMAG" | "TMMAG" | "FLMAG" | "WKMAG" | "STMAG" | "ETNMAG" | "KCMAG" => {
            Some(&MAGISTRATES)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_code_resolves() {
        for code in [
            "CLPI", "MCL", "BP", "DC", "DCMC", "HCMC", "CRC", "KTMAG", "TMMAG", "FLMAG",
            "WKMAG", "STMAG", "ETNMAG", "KCMAG",
        ] {
            assert!(resolve(code).is_some(), "no layout for {code}");
        }
    }

    #[test]
    fn unknown_codes_are_unsupported() {
        assert!(resolve("LANDS").is_none());
        assert!(resolve("").is_none());
    }

    #[test]
    fn masters_list_reads_second_table() {
        let hcmc = resolve("HCMC").unwrap();
        assert_eq!(hcmc.table_index, 1);
        // otherwise identical to the district-court family
        let dc = resolve("DC").unwrap();
        assert_eq!(hcmc.anchor_cell, dc.anchor_cell);
        assert_eq!(hcmc.columns, dc.columns);
    }

    #[test]
    fn column_keys_unique_per_layout() {
        for code in ["CLPI", "BP", "DC", "HCMC", "CRC", "KTMAG"] {
            let layout = resolve(code).unwrap();
            let mut keys: Vec<_> = layout.columns.iter().map(|c| c.key).collect();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), layout.columns.len(), "duplicate key in {code}");
        }
    }
}
