use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use assert_matches::assert_matches;
use reqview_codec::gzip_compress;
use reqview_core::{HeaderEntry, HttpRequest, HttpResponse, Severity};
use reqview_viewer::*;

fn request(body: &[u8]) -> Arc<HttpRequest> {
    Arc::new(HttpRequest {
        method: "POST".to_string(),
        uri: "http://example.com/login".to_string(),
        http_version: "HTTP/1.1".to_string(),
        headers: vec![
            HeaderEntry::new("Host", "example.com"),
            HeaderEntry::new("Content-Type", "application/x-www-form-urlencoded"),
        ],
        body: body.to_vec(),
    })
}

fn response(headers: Vec<HeaderEntry>, body: &[u8]) -> Arc<HttpResponse> {
    Arc::new(HttpResponse {
        http_version: "HTTP/1.1".to_string(),
        status_code: 200,
        reason: "OK".to_string(),
        uri: "http://example.com/login".to_string(),
        headers,
        body: body.to_vec(),
    })
}

fn html_headers() -> Vec<HeaderEntry> {
    vec![HeaderEntry::new("Content-Type", "text/html; charset=utf-8")]
}

fn response_pane(editable: bool) -> ResponsePane {
    ResponsePane::new(
        editable,
        "default",
        SeverityColorMap::default(),
        Some(Box::new(PlainTextRenderer)),
    )
}

#[test]
fn request_show_object_fills_raw_and_headers() {
    let mut pane = RequestPane::new(false, "default");
    pane.show_object(request(b"user=admin&pass=x"));

    assert_eq!(
        pane.base().raw().text(),
        "POST http://example.com/login HTTP/1.1\nHost: example.com\n\
         Content-Type: application/x-www-form-urlencoded\n\nuser=admin&pass=x"
    );
    assert_eq!(pane.base().headers().len(), 2);
    assert_eq!(
        pane.base().headers().cell(0, HeaderColumn::Name),
        Some("Host")
    );
    assert_eq!(
        pane.both_texts(),
        (
            "POST http://example.com/login HTTP/1.1\nHost: example.com\n\
             Content-Type: application/x-www-form-urlencoded\n"
                .to_string(),
            "user=admin&pass=x".to_string()
        )
    );
    assert!(pane.showing().is_some());
}

#[test]
fn request_raw_show_skips_header_table() {
    let mut pane = RequestPane::new(false, "default");
    pane.raw_show("GET / HTTP/1.1\nHost: a", "q=1");
    assert_eq!(pane.base().raw().text(), "GET / HTTP/1.1\nHost: a\n\nq=1");
    assert!(pane.base().headers().is_empty());
    assert!(pane.showing().is_none());
}

#[test]
fn binary_body_is_escaped_for_display() {
    let mut pane = RequestPane::new(false, "default");
    pane.show_object(request(&[b'a', 0xff, b'\t', 0x01, b'\r', b'\n', b'z']));
    let (_, body) = pane.both_texts();
    assert_eq!(body, "a\\xff\t\\x01\r\nz");
}

#[test]
fn clear_is_repeatable() {
    let mut pane = RequestPane::new(false, "default");
    pane.clear();
    pane.show_object(request(b""));
    pane.clear();
    pane.clear();
    assert!(pane.base().raw().is_empty());
}

#[test]
fn show_error_leaves_headers_alone() {
    let mut pane = RequestPane::new(false, "default");
    pane.show_object(request(b"x"));
    pane.show_error("Connection refused");
    assert_eq!(pane.base().raw().text(), "Connection refused");
    assert_eq!(pane.base().headers().len(), 2);
}

#[test]
fn read_only_pane_rejects_edits() {
    let mut pane = RequestPane::new(false, "default");
    assert_matches!(
        pane.base_mut().edit_raw("GET / HTTP/1.1"),
        Err(ViewerError::ReadOnly(name)) if name == "default"
    );
}

#[test]
fn raw_edits_do_not_touch_headers() {
    let mut pane = RequestPane::new(true, "default");
    pane.show_object(request(b"a=1"));
    pane.base_mut()
        .edit_raw("GET /other HTTP/1.1\nX-New: 1\n\n")
        .unwrap();
    assert_eq!(
        pane.both_texts(),
        ("GET /other HTTP/1.1\nX-New: 1\n".to_string(), String::new())
    );
    assert_eq!(
        pane.base().headers().entries(),
        request(b"").headers.clone()
    );

    pane.base_mut().headers_mut().edit(0, "other.example").unwrap();
    assert!(pane.base().raw().text().starts_with("GET /other"));
}

#[test]
fn content_watchers_follow_raw_view() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut pane = RequestPane::new(true, "default");
    let log = Rc::clone(&seen);
    pane.base_mut()
        .watch_content(move |has_text| log.borrow_mut().push(has_text));

    pane.show_object(request(b"a"));
    pane.base_mut().edit_raw("").unwrap();
    pane.raw_show("GET / HTTP/1.1", "");
    pane.clear();

    assert_eq!(*seen.borrow(), vec![false, true, false, true, false]);
}

#[test]
fn sensitivity_covers_whole_pane() {
    let mut pane = response_pane(false);
    assert!(pane.is_sensitive());
    pane.set_sensitive(false);
    assert!(!pane.is_sensitive());
    assert!(!pane.base().tabs().is_sensitive());
}

#[test]
fn response_pane_adds_rendered_tab_when_renderer_present() {
    let pane = response_pane(false);
    assert_eq!(pane.base().widget_name(), "defaultresponse");
    assert_eq!(
        pane.base().tabs().tabs(),
        &[PaneTab::Raw, PaneTab::Headers, PaneTab::Rendered]
    );

    let bare = ResponsePane::new(false, "default", SeverityColorMap::default(), None);
    assert_eq!(bare.base().tabs().tabs(), &[PaneTab::Raw, PaneTab::Headers]);
}

#[test]
fn response_show_object_renders_preview() {
    let mut pane = response_pane(false);
    pane.show_object(response(html_headers(), b"<p>Hi there</p>"));
    assert_eq!(pane.rendered().text(), "Hi there");
    assert_eq!(pane.base().headers().len(), 1);
    assert_eq!(
        pane.both_texts().0,
        "HTTP/1.1 200 OK\nContent-Type: text/html; charset=utf-8\n"
    );
}

#[test]
fn gzip_bodies_are_decoded_for_preview() {
    let mut headers = html_headers();
    headers.push(HeaderEntry::new("Content-Encoding", "gzip"));
    let body = gzip_compress(b"<h1>Welcome</h1>").unwrap();

    let mut pane = response_pane(false);
    pane.show_object(response(headers, &body));
    assert_eq!(pane.rendered().text(), "Welcome");
}

#[test]
fn empty_body_skips_preview() {
    let mut pane = response_pane(false);
    pane.show_object(response(html_headers(), b"<p>old</p>"));
    pane.show_object(response(html_headers(), b""));
    assert!(pane.rendered().is_empty());
}

#[test]
fn unsupported_types_leave_preview_empty() {
    let mut pane = response_pane(false);
    pane.show_object(response(
        vec![HeaderEntry::new("Content-Type", "application/json")],
        b"{\"ok\":true}",
    ));
    assert!(pane.rendered().is_empty());
    assert!(!pane.preview_disabled());
}

#[test]
fn highlight_tags_overlapping_matches() {
    let mut pane = response_pane(true);
    pane.base_mut().edit_raw("aaa").unwrap();

    let spans = pane.highlight("aa", Severity::High);
    let ranges: Vec<_> = spans.iter().map(|span| (span.start, span.end)).collect();
    assert_eq!(ranges, vec![(0, 2), (1, 3)]);
    assert!(spans.iter().all(|span| span.severity == Severity::High));
    assert!(spans.iter().all(|span| span.tab == PaneTab::Raw));

    let tags = pane.base().raw().tags();
    assert_eq!(tags.len(), 2);
    assert!(tags.iter().all(|tag| tag.name == "high"));
    assert_eq!(pane.base().raw().tag_background("high"), Some("#ff0000"));
}

#[test]
fn highlight_covers_rendered_view() {
    let mut pane = response_pane(false);
    pane.show_object(response(html_headers(), b"<p>Hi there</p>"));

    let spans = pane.highlight("there", Severity::Low);
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].tab, PaneTab::Raw);
    assert_eq!(
        spans[1],
        HighlightSpan {
            start: 3,
            end: 8,
            severity: Severity::Low,
            tab: PaneTab::Rendered,
        }
    );
    assert_eq!(pane.rendered().tag_background("low"), Some("#0000ff"));
}

#[test]
fn highlight_ignores_empty_query_and_is_reset_by_show() {
    let mut pane = response_pane(false);
    pane.show_object(response(html_headers(), b"<p>abc</p>"));
    assert!(pane.highlight("", Severity::Medium).is_empty());

    assert_eq!(pane.highlight("abc", Severity::Medium).len(), 2);
    pane.show_object(response(html_headers(), b"<p>abc</p>"));
    assert!(pane.base().raw().tags().is_empty());
    assert!(pane.rendered().tags().is_empty());
}

#[test]
fn injected_colours_reach_tags() {
    let colors = SeverityColorMap {
        information: "#123456".to_string(),
        ..SeverityColorMap::default()
    };
    let pane = ResponsePane::new(false, "default", colors, None);
    assert_eq!(pane.base().raw().tag_background("information"), Some("#123456"));
    assert_eq!(pane.colors().color(Severity::Information), "#123456");
}

#[test]
fn display_text_helper_matches_codec() {
    assert_eq!(
        RequestResponsePane::to_display_text(b"ok\x00"),
        "ok\\x00"
    );
}

#[test]
fn clear_highlights_keeps_text() {
    let mut pane = response_pane(false);
    pane.show_object(response(html_headers(), b"<p>token</p>"));
    pane.highlight("token", Severity::Information);
    pane.clear_highlights();
    assert!(pane.base().raw().tags().is_empty());
    assert!(pane.rendered().tags().is_empty());
    assert_eq!(pane.rendered().text(), "token");
}

#[test]
fn response_clear_drops_preview_and_tags() {
    let mut pane = response_pane(false);
    pane.show_object(response(html_headers(), b"<p>secret</p>"));
    pane.highlight("secret", Severity::High);

    pane.clear();
    assert!(pane.base().raw().is_empty());
    assert!(pane.rendered().is_empty());
    assert!(pane.rendered().tags().is_empty());
}

#[test]
fn preview_survives_stray_angle_brackets() {
    let mut pane = response_pane(false);
    pane.show_object(response(
        html_headers(),
        b"<p>if a < b then <a title=\"x>y\">win</a></p>",
    ));
    assert_eq!(pane.rendered().text(), "if a < b then win");
}
