use reqview_core::PairLookup;

use crate::config::ViewerConfig;
use crate::viewer::RequestResponseViewer;

const WINDOW_TITLE: &str = "reqview - Request and Response";

/// A viewer showing the one stored pair that matches an id. Any other
/// lookup outcome leaves both panes empty.
#[derive(Debug)]
pub struct StandaloneViewerWindow {
    viewer: RequestResponseViewer,
    request_id: i64,
    loaded: bool,
}

impl StandaloneViewerWindow {
    pub fn open(lookup: &dyn PairLookup, request_id: i64, config: &ViewerConfig) -> Self {
        Self::open_with_viewer(lookup, request_id, RequestResponseViewer::new(config))
    }

    pub fn open_with_viewer(
        lookup: &dyn PairLookup,
        request_id: i64,
        mut viewer: RequestResponseViewer,
    ) -> Self {
        let loaded = match lookup.find_by_id(request_id) {
            Ok(mut pairs) if pairs.len() == 1 => {
                let pair = pairs.remove(0);
                viewer.show(pair.request, pair.response);
                tracing::info!(request_id, "pair loaded");
                true
            }
            Ok(pairs) => {
                tracing::warn!(
                    request_id,
                    found = pairs.len(),
                    "expected exactly one stored pair"
                );
                false
            }
            Err(err) => {
                tracing::warn!(request_id, error = %err, "pair lookup failed");
                false
            }
        };
        Self {
            viewer,
            request_id,
            loaded,
        }
    }

    pub fn viewer(&self) -> &RequestResponseViewer {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut RequestResponseViewer {
        &mut self.viewer
    }

    pub fn request_id(&self) -> i64 {
        self.request_id
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn title(&self) -> &'static str {
        WINDOW_TITLE
    }

    pub fn layout_id(&self) -> &'static str {
        "reqResWin"
    }
}
