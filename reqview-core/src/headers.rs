use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeaderEntry {
    pub name: String,
    pub value: String,
}

impl HeaderEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Parses a `Name: value` block. Lines without a colon are skipped, the
/// first blank line ends the block.
pub fn parse_header_block(raw: &[u8]) -> Vec<HeaderEntry> {
    let text = String::from_utf8_lossy(raw);
    let mut headers = Vec::new();
    for line in text.split('\n') {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            if headers.is_empty() {
                continue;
            }
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            headers.push(HeaderEntry::new(name, value.trim()));
        }
    }
    headers
}

pub fn format_header_block(headers: &[HeaderEntry]) -> Vec<u8> {
    let mut output = String::new();
    for header in headers {
        output.push_str(&header.name);
        output.push_str(": ");
        output.push_str(&header.value);
        output.push_str("\r\n");
    }
    output.into_bytes()
}

pub fn find_header<'a>(headers: &'a [HeaderEntry], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|header| header.name.eq_ignore_ascii_case(name))
        .map(|header| header.value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_block_in_order_with_duplicates() {
        let raw = b"Set-Cookie: a=1\r\nHost: example.com\r\nSet-Cookie: b=2\r\n\r\nignored: yes";
        let headers = parse_header_block(raw);
        assert_eq!(
            headers,
            vec![
                HeaderEntry::new("Set-Cookie", "a=1"),
                HeaderEntry::new("Host", "example.com"),
                HeaderEntry::new("Set-Cookie", "b=2"),
            ]
        );
    }

    #[test]
    fn skips_lines_without_colon() {
        let headers = parse_header_block(b"garbage\nX-Test:  spaced  \n");
        assert_eq!(headers, vec![HeaderEntry::new("X-Test", "spaced")]);
    }

    #[test]
    fn value_keeps_inner_colons() {
        let headers = parse_header_block(b"Referer: http://example.com:8080/\r\n");
        assert_eq!(headers[0].value, "http://example.com:8080/");
    }

    #[test]
    fn format_then_find_is_case_insensitive() {
        let headers = vec![HeaderEntry::new("Content-Type", "text/html")];
        assert_eq!(format_header_block(&headers), b"Content-Type: text/html\r\n".to_vec());
        assert_eq!(find_header(&headers, "content-type"), Some("text/html"));
        assert_eq!(find_header(&headers, "content-length"), None);
    }
}
