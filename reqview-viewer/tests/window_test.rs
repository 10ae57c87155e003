use std::sync::Arc;

use reqview_core::{HeaderEntry, HttpRequest, HttpResponse, PairLookup, StoredPair};
use reqview_viewer::*;

struct FixedLookup(Result<Vec<StoredPair>, String>);

impl PairLookup for FixedLookup {
    fn find_by_id(&self, _id: i64) -> Result<Vec<StoredPair>, String> {
        self.0.clone()
    }
}

fn stored(id: i64) -> StoredPair {
    StoredPair {
        id,
        request: Arc::new(HttpRequest {
            method: "GET".to_string(),
            uri: "/".to_string(),
            http_version: "HTTP/1.1".to_string(),
            headers: vec![HeaderEntry::new("Host", "a")],
            body: Vec::new(),
        }),
        response: Arc::new(HttpResponse {
            http_version: "HTTP/1.1".to_string(),
            status_code: 200,
            reason: "OK".to_string(),
            uri: "/".to_string(),
            headers: vec![HeaderEntry::new("Content-Type", "text/plain")],
            body: b"hello".to_vec(),
        }),
    }
}

fn assert_empty(window: &StandaloneViewerWindow) {
    let viewer = window.viewer();
    assert!(!window.is_loaded());
    assert!(viewer.request().base().raw().is_empty());
    assert!(viewer.request().base().headers().is_empty());
    assert!(viewer.response().base().raw().is_empty());
    assert!(viewer.response().showing().is_none());
}

#[test]
fn single_match_is_shown() {
    let lookup = FixedLookup(Ok(vec![stored(7)]));
    let window = StandaloneViewerWindow::open(&lookup, 7, &ViewerConfig::default());

    assert!(window.is_loaded());
    assert_eq!(window.request_id(), 7);
    let viewer = window.viewer();
    assert_eq!(viewer.request().base().raw().text(), "GET / HTTP/1.1\nHost: a\n\n");
    assert_eq!(
        viewer.response().both_texts(),
        (
            "HTTP/1.1 200 OK\nContent-Type: text/plain\n".to_string(),
            "hello".to_string()
        )
    );
    assert_eq!(viewer.response().rendered().text(), "hello");
}

#[test]
fn zero_matches_leave_panes_empty() {
    let lookup = FixedLookup(Ok(Vec::new()));
    let window = StandaloneViewerWindow::open(&lookup, 42, &ViewerConfig::default());
    assert_empty(&window);
}

#[test]
fn several_matches_leave_panes_empty() {
    let lookup = FixedLookup(Ok(vec![stored(1), stored(1)]));
    let window = StandaloneViewerWindow::open(&lookup, 1, &ViewerConfig::default());
    assert_empty(&window);
}

#[test]
fn lookup_error_leaves_panes_empty() {
    let lookup = FixedLookup(Err("database is locked".to_string()));
    let window = StandaloneViewerWindow::open(&lookup, 1, &ViewerConfig::default());
    assert_empty(&window);
    assert_eq!(window.title(), "reqview - Request and Response");
}

#[test]
fn prepared_viewer_is_reused() {
    let config = ViewerConfig {
        enable_fuzzy_button: false,
        ..ViewerConfig::default()
    };
    let lookup = FixedLookup(Ok(vec![stored(3)]));
    let mut window =
        StandaloneViewerWindow::open_with_viewer(&lookup, 3, RequestResponseViewer::new(&config));
    assert!(!window.viewer().has_action(ActionKind::FuzzyEditor));
    window.viewer_mut().set_enabled(false);
    assert!(!window.viewer().is_enabled());
}
