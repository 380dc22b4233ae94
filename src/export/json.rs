use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::datecode;
use crate::parse::ParseResult;

/// Dump the full parse result as pretty-printed JSON under `dest_dir`, named
/// `<YYYYMMDD>-<COURT>.json`.
pub fn write_json(result: &ParseResult, dest_dir: impl AsRef<Path>) -> Result<PathBuf> {
    if result.date_code.is_empty() || result.court_code.is_empty() {
        bail!("result is missing date/court identifiers; annotate it first");
    }
    let filename = format!(
        "{}-{}.json",
        datecode::to_sortable_code(&result.date_code),
        result.court_code
    );
    let path = dest_dir.as_ref().join(filename);

    let text = serde_json::to_string_pretty(result).context("serializing parse result")?;
    fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout;
    use crate::parse::scan;

    #[test]
    fn dump_round_trips_as_json() {
        let page = r#"<html><body><table>
<tr><td><p>1.</p>
<p>10:30</p></td><td>HCA 123/2021</td><td>A v B</td><td>n</td><td>r</td></tr>
</table></body></html>"#;
        let mut result = scan(page, layout::resolve("MCL").unwrap()).unwrap();
        result.annotate("16042021", "MCL", "test");

        let dir = tempfile::tempdir().unwrap();
        let path = write_json(&result, dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "20210416-MCL.json");

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["court_code"], "MCL");
        assert_eq!(value["rows"][0]["case_no"], "HCA 123/2021");
    }
}
