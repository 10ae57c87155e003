mod config;
mod error;
mod header_table;
mod pane;
mod render;
mod surface;
mod tabs;
mod text_area;
mod viewer;
mod window;

pub use config::{SeverityColorMap, ViewerConfig};
pub use error::ViewerError;
pub use header_table::{HeaderColumn, HeaderRow, HeaderTable, RowAction, TabularEditor};
pub use pane::{
    ContentWatcher, HighlightSpan, MessagePane, RequestPane, RequestResponsePane, ResponsePane,
    split_head_body,
};
pub use render::{HtmlRenderer, PlainTextRenderer, PreviewDocument, PreviewSlot, RenderError};
pub use surface::{TagSpan, TextBuffer, TextSurface};
pub use tabs::{PaneTab, TabSet, TabbedContainer};
pub use text_area::{SearchOptions, SearchableTextArea, TextIter};
pub use viewer::{
    ActionButton, ActionKind, ForwardTarget, ForwardedRequest, RequestResponseViewer, ViewerSide,
};
pub use window::StandaloneViewerWindow;
