use serde::{Deserialize, Serialize};

use crate::headers::{HeaderEntry, find_header};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    pub uri: String,
    pub http_version: String,
    pub headers: Vec<HeaderEntry>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    pub fn request_line(&self) -> String {
        format!("{} {} {}", self.method, self.uri, self.http_version)
    }

    /// Request line followed by one line per header, without a trailing
    /// newline.
    pub fn head(&self) -> String {
        head_text(self.request_line(), &self.headers)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpResponse {
    pub http_version: String,
    pub status_code: u16,
    pub reason: String,
    pub uri: String,
    pub headers: Vec<HeaderEntry>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn status_line(&self) -> String {
        if self.reason.is_empty() {
            format!("{} {}", self.http_version, self.status_code)
        } else {
            format!("{} {} {}", self.http_version, self.status_code, self.reason)
        }
    }

    pub fn head(&self) -> String {
        head_text(self.status_line(), &self.headers)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }
}

fn head_text(first_line: String, headers: &[HeaderEntry]) -> String {
    let mut head = first_line;
    for header in headers {
        head.push('\n');
        head.push_str(&header.name);
        head.push_str(": ");
        head.push_str(&header.value);
    }
    head
}
