use std::sync::Arc;

use reqview_core::{HttpRequest, HttpResponse};

use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::pane::{MessagePane, RequestPane, ResponsePane};
use crate::render::{HtmlRenderer, PlainTextRenderer};
use crate::tabs::{TabSet, TabbedContainer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerSide {
    Request,
    Response,
}

impl ViewerSide {
    pub fn title(self) -> &'static str {
        match self {
            ViewerSide::Request => "Request",
            ViewerSide::Response => "Response",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    ManualEditor,
    FuzzyEditor,
    CompareTool,
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] = [
        ActionKind::ManualEditor,
        ActionKind::FuzzyEditor,
        ActionKind::CompareTool,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ActionKind::ManualEditor => "Send Request to Manual Editor",
            ActionKind::FuzzyEditor => "Send Request to Fuzzy Editor",
            ActionKind::CompareTool => "Send Request and Response to Compare Tool",
        }
    }

    fn side(self) -> ViewerSide {
        match self {
            ActionKind::ManualEditor | ActionKind::FuzzyEditor => ViewerSide::Request,
            ActionKind::CompareTool => ViewerSide::Response,
        }
    }

    fn enabled_in(self, config: &ViewerConfig) -> bool {
        match self {
            ActionKind::ManualEditor => config.enable_manual_button,
            ActionKind::FuzzyEditor => config.enable_fuzzy_button,
            ActionKind::CompareTool => config.enable_compare_button,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionButton {
    pub kind: ActionKind,
    pub side: ViewerSide,
    pub sensitive: bool,
}

/// Request text as it currently reads in the request pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardedRequest {
    pub head: String,
    pub body: String,
}

/// Tools that can receive the pane contents.
pub trait ForwardTarget {
    fn manual_editor(&mut self, request: ForwardedRequest);
    fn fuzzy_editor(&mut self, request: ForwardedRequest);
    fn compare_tool(&mut self, request: ForwardedRequest, response: Option<Arc<HttpResponse>>);
}

#[derive(Debug)]
pub struct RequestResponseViewer {
    request: RequestPane,
    response: ResponsePane,
    tabs: TabSet<ViewerSide>,
    buttons: Vec<ActionButton>,
    enabled: bool,
}

impl RequestResponseViewer {
    pub fn new(config: &ViewerConfig) -> Self {
        Self::with_renderer(config, Some(Box::new(PlainTextRenderer)))
    }

    pub fn with_renderer(config: &ViewerConfig, renderer: Option<Box<dyn HtmlRenderer>>) -> Self {
        let request = RequestPane::new(config.request_editable, config.widget_name.clone());
        let response = ResponsePane::new(
            config.response_editable,
            config.widget_name.clone(),
            config.severity_colors.clone(),
            renderer,
        );
        let buttons = ActionKind::ALL
            .into_iter()
            .filter(|kind| kind.enabled_in(config))
            .map(|kind| ActionButton {
                kind,
                side: kind.side(),
                sensitive: true,
            })
            .collect();
        Self {
            request,
            response,
            tabs: TabSet::new(ViewerSide::Request, [ViewerSide::Response]),
            buttons,
            enabled: true,
        }
    }

    pub fn request(&self) -> &RequestPane {
        &self.request
    }

    pub fn request_mut(&mut self) -> &mut RequestPane {
        &mut self.request
    }

    pub fn response(&self) -> &ResponsePane {
        &self.response
    }

    pub fn response_mut(&mut self) -> &mut ResponsePane {
        &mut self.response
    }

    pub fn tabs(&self) -> &TabSet<ViewerSide> {
        &self.tabs
    }

    pub fn select(&mut self, side: ViewerSide) {
        self.tabs.select(side);
    }

    pub fn buttons(&self) -> &[ActionButton] {
        &self.buttons
    }

    pub fn has_action(&self, kind: ActionKind) -> bool {
        self.buttons.iter().any(|button| button.kind == kind)
    }

    pub fn show(&mut self, request: Arc<HttpRequest>, response: Arc<HttpResponse>) {
        self.request.show_object(request);
        self.response.show_object(response);
    }

    /// Switches both panes and every configured button together.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.request.set_sensitive(enabled);
        self.response.set_sensitive(enabled);
        for button in &mut self.buttons {
            button.sensitive = enabled;
        }
        self.tabs.set_sensitive(enabled);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Switches one pane together with the buttons that belong to it.
    pub fn set_pane_sensitive(&mut self, side: ViewerSide, sensitive: bool) {
        match side {
            ViewerSide::Request => self.request.set_sensitive(sensitive),
            ViewerSide::Response => self.response.set_sensitive(sensitive),
        }
        for button in self.buttons.iter_mut().filter(|button| button.side == side) {
            button.sensitive = sensitive;
        }
    }

    pub fn is_pane_sensitive(&self, side: ViewerSide) -> bool {
        match side {
            ViewerSide::Request => self.request.is_sensitive(),
            ViewerSide::Response => self.response.is_sensitive(),
        }
    }

    pub fn trigger(
        &self,
        kind: ActionKind,
        target: &mut dyn ForwardTarget,
    ) -> Result<(), ViewerError> {
        let button = self
            .buttons
            .iter()
            .find(|button| button.kind == kind)
            .ok_or(ViewerError::ActionUnavailable(kind.label()))?;
        if !self.enabled || !button.sensitive || !self.is_pane_sensitive(button.side) {
            return Err(ViewerError::Disabled);
        }
        let (head, body) = self.request.both_texts();
        let request = ForwardedRequest { head, body };
        tracing::debug!(action = kind.label(), "forwarding request");
        match kind {
            ActionKind::ManualEditor => target.manual_editor(request),
            ActionKind::FuzzyEditor => target.fuzzy_editor(request),
            ActionKind::CompareTool => {
                target.compare_tool(request, self.response.showing().cloned())
            }
        }
        Ok(())
    }
}
