use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewerError {
    #[error("offsets {start}..{end} are outside a buffer of {len} characters")]
    OffsetOutOfRange { start: usize, end: usize, len: usize },
    #[error("unknown tag: {0}")]
    UnknownTag(String),
    #[error("row {row} is outside a table of {len} rows")]
    RowOutOfRange { row: usize, len: usize },
    #[error("column {0} is not editable")]
    ColumnNotEditable(&'static str),
    #[error("pane {0} is read-only")]
    ReadOnly(String),
    #[error("action not configured: {0}")]
    ActionUnavailable(&'static str),
    #[error("viewer is disabled")]
    Disabled,
}
