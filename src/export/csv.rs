use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::datecode;
use crate::parse::ParseResult;

use super::tabularize;

/// Write the tabularized grid as `<YYYYMMDD>-<COURT>.csv` under `dest_dir`.
/// Returns the path of the written file.
pub fn write_csv(result: &ParseResult, dest_dir: impl AsRef<Path>) -> Result<PathBuf> {
    if result.date_code.is_empty() || result.court_code.is_empty() {
        bail!("result is missing date/court identifiers; annotate it first");
    }
    let filename = format!(
        "{}-{}.csv",
        datecode::to_sortable_code(&result.date_code),
        result.court_code
    );
    let path = dest_dir.as_ref().join(filename);

    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in tabularize(result) {
        writer.write_record(&row).context("writing grid row")?;
    }
    writer.flush().context("flushing csv writer")?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout;
    use crate::parse::scan;
    use std::fs;

    #[test]
    fn writes_sortable_filename_and_header_row() {
        let page = r#"<html><body><table>
<tr><td><p>1.</p>
<p>10:30</p></td><td>HCA 123/2021</td><td>A v B</td><td>n</td><td>r</td></tr>
</table></body></html>"#;
        let mut result = scan(page, layout::resolve("CLPI").unwrap()).unwrap();
        result.annotate("16042021", "CLPI", "test");

        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&result, dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "20210416-CLPI.csv");

        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Time,Publicity,Case No,Parties,Offences/Nature,Representative"
        );
        assert!(lines.next().unwrap().contains("HCA 123/2021"));
    }

    #[test]
    fn unannotated_results_are_rejected() {
        let result = scan(
            "<html><body><table></table></body></html>",
            layout::resolve("DC").unwrap(),
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        assert!(write_csv(&result, dir.path()).is_err());
    }
}
