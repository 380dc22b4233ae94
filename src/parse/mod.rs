//! The parsing core: layout-aware row scanning of cause-list tables.

pub mod header;
pub mod result;
pub mod scan;

pub use result::{CauseListRecord, HeaderField, ParseResult};
pub use scan::scan;

use crate::error::ParseError;
use crate::layout;

/// Resolve the layout for `court_code` and scan `html` under it. Unregistered
/// codes fail with [`ParseError::UnsupportedLayout`] before any scan happens.
pub fn parse_causes(html: &str, court_code: &str) -> Result<ParseResult, ParseError> {
    let layout = layout::resolve(court_code)
        .ok_or_else(|| ParseError::UnsupportedLayout(court_code.to_string()))?;
    scan::scan(html, layout)
}
