use thiserror::Error;

/// Ways a single cause-list parse can fail. Callers branch on the variant:
/// unsupported layouts are tallied separately from genuine failures, and one
/// document's error never aborts the rest of a run.
#[derive(Debug, Error)]
pub enum ParseError {
    /// No layout is registered for this court code.
    #[error("not-implemented: no layout registered for court {0}")]
    UnsupportedLayout(String),

    /// The document does not contain the table the layout expects.
    #[error("expected table at index {index} not present in document")]
    MissingTable { index: usize },
}
