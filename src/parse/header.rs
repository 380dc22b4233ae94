use std::collections::BTreeMap;

use crate::layout::HeaderPattern;
use crate::parse::result::HeaderField;

/// Test each subline of a row's text against the layout's header label
/// patterns and record matches as document-level header fields.
///
/// A later matching subline overwrites an earlier one for the same field key;
/// there is deliberately no first-match lock, so a document with several
/// qualifying lines ends up with the last.
pub fn apply_header_patterns(
    row_text: &str,
    patterns: &[HeaderPattern],
    header: &mut BTreeMap<String, HeaderField>,
) {
    for subline in row_text.trim().split('\n') {
        for hp in patterns {
            if hp.pattern.is_match(subline) {
                header.insert(
                    hp.key.to_string(),
                    HeaderField {
                        name: hp.name.to_string(),
                        value: subline.trim().to_string(),
                        seq: hp.seq,
                    },
                );
            }
        }
    }
}
