use std::fmt;
use std::sync::Arc;

use reqview_codec::{
    bytes_to_string_lossy, decode_content_encoding, html_escape_str, to_display_text,
};
use reqview_core::{HttpRequest, HttpResponse, Severity};

use crate::config::SeverityColorMap;
use crate::error::ViewerError;
use crate::header_table::HeaderTable;
use crate::render::{HtmlRenderer, PreviewDocument, PreviewSlot};
use crate::tabs::{PaneTab, TabSet, TabbedContainer};
use crate::text_area::SearchableTextArea;

const DEFAULT_PREVIEW_MIME: &str = "text/html";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    pub severity: Severity,
    pub tab: PaneTab,
}

/// Splits raw pane text at the first blank line. The head keeps its final
/// newline; a body made only of whitespace comes back empty.
pub fn split_head_body(text: &str) -> (String, String) {
    match text.find("\n\n") {
        Some(index) => {
            let head = text[..index + 1].to_string();
            let body = &text[index + 2..];
            let body = if body.trim().is_empty() {
                String::new()
            } else {
                body.to_string()
            };
            (head, body)
        }
        None => (text.to_string(), String::new()),
    }
}

pub type ContentWatcher = Box<dyn FnMut(bool)>;

/// State shared by both sides of the viewer: the raw tab, the headers tab
/// and the tab strip holding them. Only [`RequestPane`] and [`ResponsePane`]
/// can build one.
pub struct RequestResponsePane {
    raw: SearchableTextArea,
    headers: HeaderTable,
    tabs: TabSet<PaneTab>,
    widget_name: String,
    watchers: Vec<ContentWatcher>,
}

impl fmt::Debug for RequestResponsePane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestResponsePane")
            .field("raw", &self.raw)
            .field("headers", &self.headers)
            .field("tabs", &self.tabs)
            .field("widget_name", &self.widget_name)
            .field("watchers", &self.watchers.len())
            .finish()
    }
}

impl RequestResponsePane {
    fn new(editable: bool, widget_name: String, extra_tabs: Vec<PaneTab>) -> Self {
        let mut raw = SearchableTextArea::new();
        raw.set_editable(editable);
        Self {
            raw,
            headers: HeaderTable::new(),
            tabs: TabSet::new(PaneTab::Raw, [PaneTab::Headers].into_iter().chain(extra_tabs)),
            widget_name,
            watchers: Vec::new(),
        }
    }

    pub fn raw(&self) -> &SearchableTextArea {
        &self.raw
    }

    pub fn headers(&self) -> &HeaderTable {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderTable {
        &mut self.headers
    }

    pub fn tabs(&self) -> &TabSet<PaneTab> {
        &self.tabs
    }

    pub fn select_tab(&mut self, tab: PaneTab) -> bool {
        self.tabs.select(tab)
    }

    pub fn widget_name(&self) -> &str {
        &self.widget_name
    }

    pub fn is_editable(&self) -> bool {
        self.raw.is_editable()
    }

    pub fn set_sensitive(&mut self, sensitive: bool) {
        self.tabs.set_sensitive(sensitive);
    }

    pub fn is_sensitive(&self) -> bool {
        self.tabs.is_sensitive()
    }

    /// Panes reach this through `MessagePane::clear`, which may clear more.
    pub(crate) fn clear(&mut self) {
        self.set_raw("");
    }

    /// Replaces the raw view with `text`. The headers tab keeps whatever it
    /// showed before.
    pub fn show_error(&mut self, text: &str) {
        self.raw.clear();
        self.raw.insert_at_end(text);
        self.notify_watchers();
    }

    pub fn both_texts(&self) -> (String, String) {
        split_head_body(self.raw.text())
    }

    pub fn to_display_text(raw: &[u8]) -> String {
        to_display_text(raw)
    }

    /// User edit of the raw view. The headers tab is not re-parsed.
    pub fn edit_raw(&mut self, text: &str) -> Result<(), ViewerError> {
        if !self.raw.is_editable() {
            return Err(ViewerError::ReadOnly(self.widget_name.clone()));
        }
        self.set_raw(text);
        Ok(())
    }

    /// Registers a callback told whether the raw view holds any text. It runs
    /// once right away and again after every change of the raw view.
    pub fn watch_content(&mut self, watcher: impl FnMut(bool) + 'static) {
        let mut watcher: ContentWatcher = Box::new(watcher);
        watcher(!self.raw.is_empty());
        self.watchers.push(watcher);
    }

    fn set_raw(&mut self, text: &str) {
        self.raw.set_text(text);
        self.notify_watchers();
    }

    fn notify_watchers(&mut self) {
        let has_text = !self.raw.is_empty();
        for watcher in &mut self.watchers {
            watcher(has_text);
        }
    }
}

mod private {
    pub trait Sealed {}
}

/// The closed set of panes a viewer shows.
pub trait MessagePane: private::Sealed {
    fn base(&self) -> &RequestResponsePane;
    fn base_mut(&mut self) -> &mut RequestResponsePane;

    fn clear(&mut self) {
        self.base_mut().clear();
    }

    fn show_error(&mut self, text: &str) {
        self.base_mut().show_error(text);
    }

    fn both_texts(&self) -> (String, String) {
        self.base().both_texts()
    }

    fn set_sensitive(&mut self, sensitive: bool) {
        self.base_mut().set_sensitive(sensitive);
    }

    fn is_sensitive(&self) -> bool {
        self.base().is_sensitive()
    }
}

#[derive(Debug)]
pub struct RequestPane {
    base: RequestResponsePane,
    showing: Option<Arc<HttpRequest>>,
}

impl RequestPane {
    pub fn new(editable: bool, widget_name: impl Into<String>) -> Self {
        Self {
            base: RequestResponsePane::new(editable, widget_name.into(), Vec::new()),
            showing: None,
        }
    }

    pub fn show_object(&mut self, request: Arc<HttpRequest>) {
        let raw = join_head_body(&request.head(), &request.body);
        self.base.set_raw(&to_display_text(&raw));
        self.base.headers.load(&request.headers);
        self.showing = Some(request);
    }

    /// Shows already formatted text without touching the headers tab.
    pub fn raw_show(&mut self, head: &str, body: &str) {
        self.base.set_raw(&format!("{head}\n\n{body}"));
    }

    pub fn showing(&self) -> Option<&Arc<HttpRequest>> {
        self.showing.as_ref()
    }
}

impl private::Sealed for RequestPane {}

impl MessagePane for RequestPane {
    fn base(&self) -> &RequestResponsePane {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RequestResponsePane {
        &mut self.base
    }
}

#[derive(Debug)]
pub struct ResponsePane {
    base: RequestResponsePane,
    showing: Option<Arc<HttpResponse>>,
    rendered: SearchableTextArea,
    preview: PreviewSlot,
    colors: SeverityColorMap,
}

impl ResponsePane {
    pub fn new(
        editable: bool,
        widget_name: impl Into<String>,
        colors: SeverityColorMap,
        renderer: Option<Box<dyn HtmlRenderer>>,
    ) -> Self {
        let preview = PreviewSlot::new(renderer);
        let mut tabs = Vec::new();
        if preview.is_installed() {
            tabs.push(PaneTab::Rendered);
        }
        let mut base =
            RequestResponsePane::new(editable, format!("{}response", widget_name.into()), tabs);
        let mut rendered = SearchableTextArea::new();
        for severity in Severity::ALL {
            base.raw.create_tag(severity.as_str(), colors.color(severity));
            rendered.create_tag(severity.as_str(), colors.color(severity));
        }
        Self {
            base,
            showing: None,
            rendered,
            preview,
            colors,
        }
    }

    pub fn show_object(&mut self, response: Arc<HttpResponse>) {
        let raw = join_head_body(&response.head(), &response.body);
        self.base.set_raw(&to_display_text(&raw));
        self.base.headers.load(&response.headers);
        self.rendered.clear();
        if !response.body.is_empty() && self.preview.is_available() {
            let document = preview_document(&response);
            if let Some(text) = self.preview.render(&document) {
                self.rendered.set_text(&text);
            }
        }
        self.showing = Some(response);
    }

    /// Tags every occurrence of `text` in the raw and rendered views. Matches
    /// may overlap.
    pub fn highlight(&mut self, text: &str, severity: Severity) -> Vec<HighlightSpan> {
        let mut spans = Vec::new();
        let tag = severity.as_str();
        for (tab, area) in [
            (PaneTab::Raw, &mut self.base.raw),
            (PaneTab::Rendered, &mut self.rendered),
        ] {
            for (start, end) in area.find_all(text) {
                if area.apply_tag(tag, start, end).is_ok() {
                    spans.push(HighlightSpan {
                        start,
                        end,
                        severity,
                        tab,
                    });
                }
            }
        }
        spans
    }

    pub fn clear_highlights(&mut self) {
        self.base.raw.clear_tags();
        self.rendered.clear_tags();
    }

    pub fn showing(&self) -> Option<&Arc<HttpResponse>> {
        self.showing.as_ref()
    }

    pub fn rendered(&self) -> &SearchableTextArea {
        &self.rendered
    }

    pub fn colors(&self) -> &SeverityColorMap {
        &self.colors
    }

    pub fn preview_disabled(&self) -> bool {
        self.preview.is_disabled()
    }
}

impl private::Sealed for ResponsePane {}

impl MessagePane for ResponsePane {
    fn base(&self) -> &RequestResponsePane {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RequestResponsePane {
        &mut self.base
    }

    fn clear(&mut self) {
        self.base.clear();
        self.rendered.clear();
    }
}

fn join_head_body(head: &str, body: &[u8]) -> Vec<u8> {
    let mut raw = Vec::with_capacity(head.len() + 2 + body.len());
    raw.extend_from_slice(head.as_bytes());
    raw.extend_from_slice(b"\n\n");
    raw.extend_from_slice(body);
    raw
}

fn preview_document(response: &HttpResponse) -> PreviewDocument {
    let body = match response.header("content-encoding") {
        Some(encoding) => decode_content_encoding(&response.body, encoding).unwrap_or_else(|err| {
            tracing::debug!(error = %err, "showing undecoded body in preview");
            response.body.clone()
        }),
        None => response.body.clone(),
    };
    let mime_type = response
        .content_type()
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_PREVIEW_MIME.to_string());

    if mime_type.contains("image") {
        return PreviewDocument {
            body: format!(
                "The response type is: <i>{}</i>. Images are not rendered in the preview.",
                html_escape_str(&mime_type)
            ),
            mime_type: DEFAULT_PREVIEW_MIME.to_string(),
            base_uri: response.uri.clone(),
        };
    }

    PreviewDocument {
        body: bytes_to_string_lossy(&body),
        mime_type,
        base_uri: response.uri.clone(),
    }
}
