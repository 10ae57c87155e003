use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use iced::widget::{Space, button, checkbox, column, container, row, text_editor, text_input};
use iced::{Alignment, Element, Length, Task, Theme};
use reqview_core::{HttpResponse, PairLookup, Severity, StoredPair};
use reqview_storage::SqliteStore;
use reqview_viewer::{
    ActionKind, ForwardTarget, ForwardedRequest, HeaderColumn, HighlightSpan, MessagePane,
    PaneTab, RequestResponsePane, RequestResponseViewer, RowAction, SearchOptions,
    StandaloneViewerWindow, TabbedContainer, TabularEditor, ViewerSide,
};

use crate::config::{GuiConfig, save_gui_config};
use crate::theme::{
    ThemePalette, action_button, background_style, header_bar_style, tab_button_style,
    text_danger, text_input_style, text_muted, text_primary,
};
use crate::ui::panes::{NewHeaderDraft, format_bytes, header_rows_view, highlights_view, raw_view};

const FORWARD_LOG_LIMIT: usize = 50;

#[derive(Debug, Clone)]
pub enum Message {
    SelectSide(ViewerSide),
    SelectPaneTab(PaneTab),
    RawEdited(ViewerSide, text_editor::Action),
    HeaderValueChanged(ViewerSide, usize, String),
    HeaderRowAction(ViewerSide, usize, RowAction),
    NewHeaderNameChanged(String),
    NewHeaderValueChanged(String),
    AddHeader(ViewerSide),
    SearchChanged(String),
    SearchMatchCase(bool),
    SearchWrap(bool),
    FindNext,
    FindPrevious,
    Highlight(Severity),
    ClearHighlights,
    ToggleEnabled(bool),
    Forward(ActionKind),
    ConfigSaved(Result<(), String>),
}

/// Stands in for the manual editor, fuzzy editor and compare tool by keeping
/// a log of what was sent to them.
#[derive(Debug, Default)]
pub struct ForwardLog {
    entries: Vec<String>,
}

impl ForwardLog {
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    fn record(&mut self, tool: &str, request: &ForwardedRequest, extra: Option<String>) {
        let first_line = request.head.lines().next().unwrap_or("(empty request)");
        let mut entry = format!(
            "{tool}: {first_line} ({} body)",
            format_bytes(request.body.len())
        );
        if let Some(extra) = extra {
            entry.push_str(", ");
            entry.push_str(&extra);
        }
        tracing::info!(%entry, "request forwarded");
        self.entries.push(entry);
        if self.entries.len() > FORWARD_LOG_LIMIT {
            self.entries.remove(0);
        }
    }
}

impl ForwardTarget for ForwardLog {
    fn manual_editor(&mut self, request: ForwardedRequest) {
        self.record("Manual editor", &request, None);
    }

    fn fuzzy_editor(&mut self, request: ForwardedRequest) {
        self.record("Fuzzy editor", &request, None);
    }

    fn compare_tool(&mut self, request: ForwardedRequest, response: Option<Arc<HttpResponse>>) {
        let extra = response.map(|response| {
            format!(
                "response {} ({})",
                response.status_line(),
                format_bytes(response.body.len())
            )
        });
        self.record("Compare tool", &request, extra);
    }
}

/// Lookup used when the database cannot be opened, so the window still
/// comes up empty.
struct UnavailableStore {
    reason: String,
}

impl PairLookup for UnavailableStore {
    fn find_by_id(&self, _id: i64) -> Result<Vec<StoredPair>, String> {
        Err(self.reason.clone())
    }
}

#[derive(Debug, Default)]
struct SearchBar {
    query: String,
    options: SearchOptions,
    cursor: usize,
    found: Option<(usize, usize)>,
    searched: bool,
}

impl SearchBar {
    /// Forgets the last match so the next find starts from the top.
    fn restart(&mut self) {
        self.cursor = 0;
        self.found = None;
        self.searched = false;
    }
}

pub struct AppState {
    window: StandaloneViewerWindow,
    config: GuiConfig,
    theme: ThemePalette,
    request_raw: text_editor::Content,
    response_raw: text_editor::Content,
    rendered: text_editor::Content,
    request_has_text: Rc<Cell<bool>>,
    search: SearchBar,
    highlights: Vec<HighlightSpan>,
    new_header_name: String,
    new_header_value: String,
    forwards: ForwardLog,
    error: Option<String>,
}

impl AppState {
    pub fn new(
        config: GuiConfig,
        config_path: PathBuf,
        database: Option<PathBuf>,
        request_id: i64,
    ) -> (Self, Task<Message>) {
        let mut save_task = Task::none();
        let mut config = config;
        if let Some(path) = database {
            if config.database.as_ref() != Some(&path) {
                config.database = Some(path);
                save_task = Task::perform(
                    save_gui_config(config_path, config.clone()),
                    Message::ConfigSaved,
                );
            }
        }

        let (window, error) = match config.database.as_ref() {
            Some(path) => match SqliteStore::open(path) {
                Ok(store) => (
                    StandaloneViewerWindow::open(&store, request_id, &config.viewer),
                    None,
                ),
                Err(err) => {
                    tracing::error!(path = %path.display(), error = %err, "failed to open database");
                    let store = UnavailableStore { reason: err.clone() };
                    (
                        StandaloneViewerWindow::open(&store, request_id, &config.viewer),
                        Some(format!("Could not open {}: {err}", path.display())),
                    )
                }
            },
            None => {
                let store = UnavailableStore {
                    reason: "no database configured".to_string(),
                };
                (
                    StandaloneViewerWindow::open(&store, request_id, &config.viewer),
                    Some("No database given; pass --database or set it in gui.toml".to_string()),
                )
            }
        };
        let error = error.or_else(|| {
            (!window.is_loaded()).then(|| format!("No single stored pair matches id {request_id}"))
        });

        let request_has_text = Rc::new(Cell::new(false));
        let mut state = Self {
            window,
            theme: ThemePalette::from_config(&config.theme),
            config,
            request_raw: text_editor::Content::new(),
            response_raw: text_editor::Content::new(),
            rendered: text_editor::Content::new(),
            request_has_text: Rc::clone(&request_has_text),
            search: SearchBar::default(),
            highlights: Vec::new(),
            new_header_name: String::new(),
            new_header_value: String::new(),
            forwards: ForwardLog::default(),
            error,
        };
        state
            .window
            .viewer_mut()
            .request_mut()
            .base_mut()
            .watch_content(move |has_text| request_has_text.set(has_text));
        state.refresh_contents();
        (state, save_task)
    }

    pub fn title(&self) -> String {
        format!("{} #{}", self.window.title(), self.window.request_id())
    }

    pub fn theme(&self) -> Theme {
        Theme::Light
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SelectSide(side) => {
                self.viewer_mut().select(side);
                self.search.restart();
            }
            Message::SelectPaneTab(tab) => {
                let side = self.active_side();
                self.pane_base_mut(side).select_tab(tab);
            }
            Message::RawEdited(side, action) => {
                let is_edit = action.is_edit();
                self.content_mut(side).perform(action);
                if is_edit {
                    let text = self.content_mut(side).text();
                    if let Err(err) = self.pane_base_mut(side).edit_raw(&text) {
                        tracing::warn!(error = %err, "raw edit rejected");
                    }
                    if side == ViewerSide::Response {
                        self.highlights.clear();
                    }
                }
            }
            Message::HeaderValueChanged(side, row, value) => {
                if let Err(err) =
                    self.pane_base_mut(side)
                        .headers_mut()
                        .set_cell(row, HeaderColumn::Value, &value)
                {
                    tracing::warn!(error = %err, "header edit rejected");
                }
            }
            Message::HeaderRowAction(side, row, action) => {
                if let Err(err) = self.pane_base_mut(side).headers_mut().apply(row, action) {
                    tracing::warn!(error = %err, "header row action rejected");
                }
            }
            Message::NewHeaderNameChanged(name) => self.new_header_name = name,
            Message::NewHeaderValueChanged(value) => self.new_header_value = value,
            Message::AddHeader(side) => {
                let name = std::mem::take(&mut self.new_header_name);
                let value = std::mem::take(&mut self.new_header_value);
                if !name.trim().is_empty() {
                    self.pane_base_mut(side)
                        .headers_mut()
                        .add(name.trim(), value.trim());
                }
            }
            Message::SearchChanged(query) => {
                self.search.query = query;
                self.search.restart();
            }
            Message::SearchMatchCase(match_case) => self.search.options.match_case = match_case,
            Message::SearchWrap(wrap) => self.search.options.wrap = wrap,
            Message::FindNext => {
                let side = self.active_side();
                let found = self.pane_base(side).raw().find_next(
                    &self.search.query,
                    self.search.cursor,
                    self.search.options,
                );
                self.finish_search(found, |(start, _)| start + 1);
            }
            Message::FindPrevious => {
                let side = self.active_side();
                let before = self
                    .search
                    .found
                    .map(|(start, _)| start)
                    .unwrap_or(self.search.cursor);
                let found = self.pane_base(side).raw().find_previous(
                    &self.search.query,
                    before,
                    self.search.options,
                );
                self.finish_search(found, |(start, _)| start);
            }
            Message::Highlight(severity) => {
                let query = self.search.query.clone();
                let spans = self.viewer_mut().response_mut().highlight(&query, severity);
                tracing::debug!(%query, severity = severity.name(), found = spans.len(), "highlight");
                self.highlights.extend(spans);
            }
            Message::ClearHighlights => {
                self.highlights.clear();
                self.viewer_mut().response_mut().clear_highlights();
            }
            Message::ToggleEnabled(enabled) => self.viewer_mut().set_enabled(enabled),
            Message::Forward(kind) => {
                if let Err(err) = self.window.viewer().trigger(kind, &mut self.forwards) {
                    tracing::warn!(error = %err, "forward refused");
                    self.error = Some(err.to_string());
                }
            }
            Message::ConfigSaved(result) => {
                if let Err(err) = result {
                    tracing::warn!(error = %err, "failed to save gui config");
                }
            }
        }
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let theme = self.theme;
        let side = self.active_side();

        let content = column![
            self.top_bar(),
            self.side_tabs(),
            self.search_bar(),
            self.pane_view(side),
            self.highlight_bar(),
            self.action_bar(),
            self.status_view(),
        ]
        .spacing(8)
        .padding(8);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_| background_style(theme))
            .into()
    }

    fn top_bar(&self) -> Element<'_, Message> {
        let theme = self.theme;
        let viewer = self.window.viewer();
        let database = self
            .config
            .database
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "(no database)".to_string());
        container(
            row![
                text_primary(format!("Request #{}", self.window.request_id()), 16, theme),
                text_muted(database, 12, theme),
                Space::with_width(Length::Fill),
                checkbox("Enabled", viewer.is_enabled())
                    .on_toggle(Message::ToggleEnabled)
                    .size(14),
            ]
            .spacing(12)
            .align_y(Alignment::Center),
        )
        .padding(8)
        .width(Length::Fill)
        .style(move |_| header_bar_style(theme))
        .into()
    }

    fn side_tabs(&self) -> Element<'_, Message> {
        let theme = self.theme;
        let viewer = self.window.viewer();
        let mut tabs = row![].spacing(6);
        for side in viewer.tabs().tabs() {
            let selected = viewer.tabs().active() == *side;
            tabs = tabs.push(
                button(text_primary(side.title(), 13, theme))
                    .on_press(Message::SelectSide(*side))
                    .style(move |_theme, status| tab_button_style(theme, status, selected)),
            );
        }
        let base = self.pane_base(self.active_side());
        tabs = tabs.push(Space::with_width(Length::Fixed(24.0)));
        for tab in base.tabs().tabs() {
            let selected = base.tabs().active() == *tab;
            tabs = tabs.push(
                button(text_primary(tab.title(), 12, theme))
                    .on_press_maybe(base.is_sensitive().then_some(Message::SelectPaneTab(*tab)))
                    .style(move |_theme, status| tab_button_style(theme, status, selected)),
            );
        }
        tabs.align_y(Alignment::Center).into()
    }

    fn search_bar(&self) -> Element<'_, Message> {
        let theme = self.theme;
        let has_query = !self.search.query.is_empty();
        row![
            text_input("Search raw text", &self.search.query)
                .on_input(Message::SearchChanged)
                .on_submit(Message::FindNext)
                .padding(6)
                .size(13)
                .style(move |_theme, status| text_input_style(theme, status)),
            action_button("Previous", has_query.then_some(Message::FindPrevious), theme),
            action_button("Next", has_query.then_some(Message::FindNext), theme),
            checkbox("Match case", self.search.options.match_case)
                .on_toggle(Message::SearchMatchCase)
                .size(14),
            checkbox("Wrap", self.search.options.wrap)
                .on_toggle(Message::SearchWrap)
                .size(14),
        ]
        .spacing(8)
        .align_y(Alignment::Center)
        .into()
    }

    fn pane_view(&self, side: ViewerSide) -> Element<'_, Message> {
        let theme = self.theme;
        let base = self.pane_base(side);
        let editable = base.is_editable() && base.is_sensitive();
        match base.tabs().active() {
            PaneTab::Raw => raw_view(self.content(side), side, editable, theme),
            PaneTab::Headers => header_rows_view(
                base.headers(),
                side,
                editable,
                NewHeaderDraft {
                    name: &self.new_header_name,
                    value: &self.new_header_value,
                },
                theme,
            ),
            PaneTab::Rendered => raw_view(&self.rendered, side, false, theme),
        }
    }

    fn highlight_bar(&self) -> Element<'_, Message> {
        let theme = self.theme;
        let viewer = self.window.viewer();
        let response = viewer.response();
        let can_highlight = !self.search.query.is_empty() && response.is_sensitive();

        let mut buttons = row![text_muted("Highlight:", 12, theme)]
            .spacing(6)
            .align_y(Alignment::Center);
        for severity in Severity::ALL {
            buttons = buttons.push(action_button(
                severity.name(),
                can_highlight.then_some(Message::Highlight(severity)),
                theme,
            ));
        }
        buttons = buttons.push(action_button(
            "Clear",
            (!self.highlights.is_empty()).then_some(Message::ClearHighlights),
            theme,
        ));

        let matches = self
            .highlights
            .iter()
            .map(|span| {
                let area = match span.tab {
                    PaneTab::Rendered => response.rendered(),
                    _ => response.base().raw(),
                };
                let matched = area.get_text(span.start, span.end).unwrap_or_default();
                (*span, matched)
            })
            .collect();

        column![
            buttons,
            highlights_view(matches, response.colors(), theme),
        ]
        .spacing(6)
        .into()
    }

    fn action_bar(&self) -> Element<'_, Message> {
        let theme = self.theme;
        let viewer = self.window.viewer();
        let has_request = self.request_has_text.get();
        let mut actions = row![].spacing(8).align_y(Alignment::Center);
        for action in viewer.buttons() {
            let ready = action.sensitive && has_request;
            actions = actions.push(action_button(
                action.kind.label(),
                ready.then_some(Message::Forward(action.kind)),
                theme,
            ));
        }
        actions.into()
    }

    fn status_view(&self) -> Element<'_, Message> {
        let theme = self.theme;
        let mut status = column![].spacing(2);
        if let Some(error) = &self.error {
            status = status.push(text_danger(error.clone(), 12, theme));
        }
        if let Some(last) = self.forwards.entries().last() {
            status = status.push(text_muted(last.clone(), 12, theme));
        }
        if self.search.searched {
            let line = match self.search.found {
                Some((start, end)) => {
                    let iter = self.pane_base(self.active_side()).raw().iter_at_offset(start);
                    format!(
                        "Match at {start}..{end} (line {}, column {})",
                        iter.line + 1,
                        iter.column + 1
                    )
                }
                None => format!("\"{}\" not found", self.search.query),
            };
            status = status.push(text_muted(line, 12, theme));
        }
        status.into()
    }

    fn finish_search(
        &mut self,
        found: Option<(usize, usize)>,
        next_cursor: impl Fn((usize, usize)) -> usize,
    ) {
        self.search.searched = true;
        self.search.found = found;
        if let Some(span) = found {
            self.search.cursor = next_cursor(span);
        }
    }

    fn viewer_mut(&mut self) -> &mut RequestResponseViewer {
        self.window.viewer_mut()
    }

    fn active_side(&self) -> ViewerSide {
        self.window.viewer().tabs().active()
    }

    fn pane_base(&self, side: ViewerSide) -> &RequestResponsePane {
        let viewer = self.window.viewer();
        match side {
            ViewerSide::Request => viewer.request().base(),
            ViewerSide::Response => viewer.response().base(),
        }
    }

    fn pane_base_mut(&mut self, side: ViewerSide) -> &mut RequestResponsePane {
        let viewer = self.window.viewer_mut();
        match side {
            ViewerSide::Request => viewer.request_mut().base_mut(),
            ViewerSide::Response => viewer.response_mut().base_mut(),
        }
    }

    fn content(&self, side: ViewerSide) -> &text_editor::Content {
        match side {
            ViewerSide::Request => &self.request_raw,
            ViewerSide::Response => &self.response_raw,
        }
    }

    fn content_mut(&mut self, side: ViewerSide) -> &mut text_editor::Content {
        match side {
            ViewerSide::Request => &mut self.request_raw,
            ViewerSide::Response => &mut self.response_raw,
        }
    }

    fn refresh_contents(&mut self) {
        let viewer = self.window.viewer();
        self.request_raw = text_editor::Content::with_text(viewer.request().base().raw().text());
        self.response_raw = text_editor::Content::with_text(viewer.response().base().raw().text());
        self.rendered = text_editor::Content::with_text(viewer.response().rendered().text());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqview_core::{HeaderEntry, HttpRequest};

    fn request_text(head: &str, body: &str) -> ForwardedRequest {
        ForwardedRequest {
            head: head.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn forward_log_summarises_requests() {
        let mut log = ForwardLog::default();
        log.manual_editor(request_text("GET / HTTP/1.1\nHost: a\n", "abc"));
        log.fuzzy_editor(request_text("", ""));
        assert_eq!(
            log.entries(),
            &[
                "Manual editor: GET / HTTP/1.1 (3 B body)".to_string(),
                "Fuzzy editor: (empty request) (0 B body)".to_string(),
            ]
        );
    }

    #[test]
    fn forward_log_mentions_compared_response() {
        let mut log = ForwardLog::default();
        let response = Arc::new(HttpResponse {
            http_version: "HTTP/1.1".to_string(),
            status_code: 404,
            reason: "Not Found".to_string(),
            uri: "/".to_string(),
            headers: vec![HeaderEntry::new("Server", "x")],
            body: vec![0; 10],
        });
        log.compare_tool(request_text("GET / HTTP/1.1\n", ""), Some(response));
        assert_eq!(
            log.entries()[0],
            "Compare tool: GET / HTTP/1.1 (0 B body), response HTTP/1.1 404 Not Found (10 B)"
        );
    }

    #[test]
    fn forward_log_is_bounded() {
        let mut log = ForwardLog::default();
        for _ in 0..FORWARD_LOG_LIMIT + 5 {
            log.manual_editor(request_text("GET / HTTP/1.1\n", ""));
        }
        assert_eq!(log.entries().len(), FORWARD_LOG_LIMIT);
    }

    #[test]
    fn stored_pair_opens_from_sqlite() {
        let store = SqliteStore::open_in_memory().unwrap();
        let request = HttpRequest {
            method: "GET".to_string(),
            uri: "/".to_string(),
            http_version: "HTTP/1.1".to_string(),
            headers: vec![HeaderEntry::new("Host", "a")],
            body: Vec::new(),
        };
        let response = HttpResponse {
            http_version: "HTTP/1.1".to_string(),
            status_code: 200,
            reason: "OK".to_string(),
            uri: "/".to_string(),
            headers: Vec::new(),
            body: b"hi".to_vec(),
        };
        let id = store
            .insert_pair(&request, &response, "2024-01-01T00:00:00Z")
            .unwrap();
        let window =
            StandaloneViewerWindow::open(&store, id, &reqview_viewer::ViewerConfig::default());
        assert!(window.is_loaded());
    }

    #[test]
    fn unavailable_store_opens_empty_window() {
        let store = UnavailableStore {
            reason: "gone".to_string(),
        };
        let window = StandaloneViewerWindow::open(&store, 1, &reqview_viewer::ViewerConfig::default());
        assert!(!window.is_loaded());
        assert!(window.viewer().request().base().raw().is_empty());
    }

    #[test]
    fn new_query_or_side_restarts_search() {
        let (mut state, _) = AppState::new(
            GuiConfig::default(),
            PathBuf::from("gui.toml"),
            None,
            1,
        );
        state.search.cursor = 12;
        state.search.found = Some((11, 14));
        let _ = state.update(Message::SearchChanged("host".to_string()));
        assert_eq!(state.search.cursor, 0);
        assert_eq!(state.search.found, None);

        state.search.cursor = 7;
        let _ = state.update(Message::SelectSide(ViewerSide::Response));
        assert_eq!(state.search.cursor, 0);
        assert!(!state.search.searched);
    }
}
