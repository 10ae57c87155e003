use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use scraper::{ElementRef, Html, Node};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("unsupported content type: {0}")]
    Unsupported(String),
    #[error("renderer failure: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewDocument {
    pub body: String,
    pub mime_type: String,
    pub base_uri: String,
}

/// Backend that turns a response body into preview text.
pub trait HtmlRenderer {
    fn render(&mut self, document: &PreviewDocument) -> Result<String, RenderError>;
}

/// Checked boundary around an optional renderer. Reported errors are logged
/// and dropped; a panicking renderer is switched off for good.
pub struct PreviewSlot {
    renderer: Option<Box<dyn HtmlRenderer>>,
    disabled: bool,
}

impl fmt::Debug for PreviewSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewSlot")
            .field("installed", &self.renderer.is_some())
            .field("disabled", &self.disabled)
            .finish()
    }
}

impl PreviewSlot {
    pub fn new(renderer: Option<Box<dyn HtmlRenderer>>) -> Self {
        Self {
            renderer,
            disabled: false,
        }
    }

    pub fn is_installed(&self) -> bool {
        self.renderer.is_some()
    }

    pub fn is_available(&self) -> bool {
        self.renderer.is_some() && !self.disabled
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn render(&mut self, document: &PreviewDocument) -> Option<String> {
        if self.disabled {
            return None;
        }
        let renderer = self.renderer.as_mut()?;
        match catch_unwind(AssertUnwindSafe(|| renderer.render(document))) {
            Ok(Ok(text)) => Some(text),
            Ok(Err(RenderError::Unsupported(mime))) => {
                tracing::debug!(%mime, uri = %document.base_uri, "preview skipped");
                None
            }
            Ok(Err(err)) => {
                tracing::warn!(error = %err, uri = %document.base_uri, "preview failed");
                None
            }
            Err(_) => {
                tracing::warn!(uri = %document.base_uri, "renderer panicked, preview disabled");
                self.disabled = true;
                None
            }
        }
    }
}

/// Renders HTML as readable text: tags dropped, block elements on their own
/// lines, entities decoded, script and style content removed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

const BLOCK_TAGS: [&str; 16] = [
    "p", "div", "br", "li", "tr", "table", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "hr",
    "title",
];

const SKIPPED_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

impl HtmlRenderer for PlainTextRenderer {
    fn render(&mut self, document: &PreviewDocument) -> Result<String, RenderError> {
        let mime = document.mime_type.to_ascii_lowercase();
        match mime.as_str() {
            "text/html" | "application/xhtml+xml" => Ok(html_to_text(&document.body)),
            "text/plain" => Ok(document.body.clone()),
            _ => Err(RenderError::Unsupported(document.mime_type.clone())),
        }
    }
}

fn html_to_text(body: &str) -> String {
    let document = Html::parse_document(body);
    let mut output = String::new();
    walk(document.root_element(), &mut output);
    output.trim().to_string()
}

fn walk(element: ElementRef<'_>, output: &mut String) {
    let name = element.value().name();
    if SKIPPED_TAGS.contains(&name) {
        return;
    }
    let block = BLOCK_TAGS.contains(&name);
    if block {
        break_line(output);
    }
    for child in element.children() {
        if let Some(child) = ElementRef::wrap(child) {
            walk(child, output);
        } else if let Node::Text(text) = child.value() {
            push_text(output, text);
        }
    }
    if block {
        break_line(output);
    }
}

fn break_line(output: &mut String) {
    if !output.is_empty() && !output.ends_with('\n') {
        while output.ends_with(' ') {
            output.pop();
        }
        output.push('\n');
    }
}

fn push_text(output: &mut String, fragment: &str) {
    let mut last_space = output.is_empty() || output.ends_with(char::is_whitespace);
    for ch in fragment.chars() {
        if ch.is_whitespace() {
            if !last_space {
                output.push(' ');
                last_space = true;
            }
        } else {
            output.push(ch);
            last_space = false;
        }
    }
}
