//! Flattening a parse result into an export-ready grid, plus the CSV and JSON
//! writers that persist it.

pub mod csv;
pub mod json;

use crate::parse::ParseResult;

/// Fixed precedence of the document-level header fields that lead each grid
/// row: court number first, then the hearing officer.
const HEADER_ORDER: &[&str] = &["court_no", "master"];

/// Flatten a parse result into a header row plus data rows.
///
/// Header fields are document-level, so their values repeat identically on
/// every data row. Every row has the same cell count as the header row.
pub fn tabularize(result: &ParseResult) -> Vec<Vec<String>> {
    let mut columns = result.columns.clone();
    columns.sort_by_key(|c| c.seq);

    let mut grid = Vec::with_capacity(result.rows.len() + 1);

    let mut header_row = Vec::new();
    for key in HEADER_ORDER {
        if let Some(field) = result.header.get(*key) {
            header_row.push(field.name.clone());
        }
    }
    for column in &columns {
        header_row.push(column.name.to_string());
    }
    grid.push(header_row);

    for row in &result.rows {
        let mut cells = Vec::new();
        for key in HEADER_ORDER {
            if let Some(field) = result.header.get(*key) {
                cells.push(field.value.clone());
            }
        }
        for column in &columns {
            cells.push(row.get(column.key).cloned().unwrap_or_default());
        }
        grid.push(cells);
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout;
    use crate::parse::scan;

    const CHAMBERS_PAGE: &str = r#"<html><body><table>
<tr><td>Court No.: 3
聆案官 : Master Chan</td></tr>
<tr><td><p>1.</p>
<p>10:30</p></td><td>HCA 123/2021</td><td>A v B</td><td>Breach of contract</td><td>Mr. X</td></tr>
<tr><td></td><td>HCA 124/2021</td><td>C v D</td><td>Negligence</td><td>Ms. Y</td></tr>
</table></body></html>"#;

    fn chambers_result() -> crate::parse::ParseResult {
        scan(CHAMBERS_PAGE, layout::resolve("CLPI").unwrap()).unwrap()
    }

    #[test]
    fn header_fields_lead_then_columns_by_seq() {
        let grid = tabularize(&chambers_result());
        assert_eq!(
            grid[0],
            vec![
                "Court No",
                "Master",
                "Time",
                "Publicity",
                "Case No",
                "Parties",
                "Offences/Nature",
                "Representative"
            ]
        );
    }

    #[test]
    fn header_values_repeat_on_every_data_row() {
        let grid = tabularize(&chambers_result());
        assert_eq!(grid.len(), 3);
        for row in &grid[1..] {
            assert_eq!(row[0], "Court No.: 3");
            assert_eq!(row[1], "聆案官 : Master Chan");
        }
        assert_eq!(grid[1][4], "HCA 123/2021");
        assert_eq!(grid[2][4], "HCA 124/2021");
    }

    #[test]
    fn grid_is_rectangular() {
        let grid = tabularize(&chambers_result());
        let width = grid[0].len();
        for row in &grid {
            assert_eq!(row.len(), width);
        }
    }

    #[test]
    fn absent_header_fields_are_simply_omitted() {
        // district-court pages carry no header metadata rows
        let result = scan(
            "<html><body><table></table></body></html>",
            layout::resolve("DC").unwrap(),
        )
        .unwrap();
        let grid = tabularize(&result);
        assert_eq!(grid[0][0], "Court No");
        assert_eq!(grid[0].len(), result.columns.len());
    }
}
