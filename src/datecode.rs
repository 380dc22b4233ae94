//! Date-code transforms. The portal identifies a cause-list date by an
//! 8-character `DDMMYYYY` code, used verbatim in its query strings.

/// `"16042021"` → `"2021-04-16"`.
/// Codes that are not 8 ASCII characters pass through unchanged.
pub fn to_display_date(code: &str) -> String {
    match (code.get(0..2), code.get(2..4), code.get(4..8)) {
        (Some(dd), Some(mm), Some(yyyy)) => format!("{}-{}-{}", yyyy, mm, dd),
        _ => code.to_string(),
    }
}

/// `"16042021"` → `"20210416"`, the sortable form used in output filenames.
pub fn to_sortable_code(code: &str) -> String {
    match (code.get(0..2), code.get(2..4), code.get(4..8)) {
        (Some(dd), Some(mm), Some(yyyy)) => format!("{}{}{}", yyyy, mm, dd),
        _ => code.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_date_reorders_substrings() {
        assert_eq!(to_display_date("16042021"), "2021-04-16");
    }

    #[test]
    fn sortable_code_reorders_substrings() {
        assert_eq!(to_sortable_code("16042021"), "20210416");
    }

    #[test]
    fn malformed_codes_pass_through() {
        assert_eq!(to_display_date("2021"), "2021");
        assert_eq!(to_sortable_code(""), "");
    }
}
