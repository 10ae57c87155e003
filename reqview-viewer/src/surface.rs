use std::collections::BTreeMap;
use std::fmt;

use crate::error::ViewerError;

/// A named span over character offsets of a surface's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSpan {
    pub name: String,
    pub start: usize,
    pub end: usize,
}

/// Text storage behind a [`crate::SearchableTextArea`]. Offsets are
/// character offsets. Replacing the text drops every applied tag, the tag
/// table survives.
pub trait TextSurface: fmt::Debug {
    fn text(&self) -> &str;
    fn char_count(&self) -> usize;
    fn replace(&mut self, text: &str);
    fn append(&mut self, text: &str);
    fn create_tag(&mut self, name: &str, background: &str);
    fn tag_background(&self, name: &str) -> Option<&str>;
    fn apply_tag(&mut self, name: &str, start: usize, end: usize) -> Result<(), ViewerError>;
    fn tags(&self) -> &[TagSpan];
    fn clear_tags(&mut self);
}

#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
    chars: usize,
    tag_table: BTreeMap<String, String>,
    tags: Vec<TagSpan>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextSurface for TextBuffer {
    fn text(&self) -> &str {
        &self.text
    }

    fn char_count(&self) -> usize {
        self.chars
    }

    fn replace(&mut self, text: &str) {
        self.text = text.to_string();
        self.chars = text.chars().count();
        self.tags.clear();
    }

    fn append(&mut self, text: &str) {
        self.text.push_str(text);
        self.chars += text.chars().count();
    }

    fn create_tag(&mut self, name: &str, background: &str) {
        self.tag_table
            .insert(name.to_string(), background.to_string());
    }

    fn tag_background(&self, name: &str) -> Option<&str> {
        self.tag_table.get(name).map(String::as_str)
    }

    fn apply_tag(&mut self, name: &str, start: usize, end: usize) -> Result<(), ViewerError> {
        if !self.tag_table.contains_key(name) {
            return Err(ViewerError::UnknownTag(name.to_string()));
        }
        if start > end || end > self.chars {
            return Err(ViewerError::OffsetOutOfRange {
                start,
                end,
                len: self.chars,
            });
        }
        self.tags.push(TagSpan {
            name: name.to_string(),
            start,
            end,
        });
        Ok(())
    }

    fn tags(&self) -> &[TagSpan] {
        &self.tags
    }

    fn clear_tags(&mut self) {
        self.tags.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_characters_not_bytes() {
        let mut buffer = TextBuffer::new();
        buffer.replace("h\u{e9}llo");
        assert_eq!(buffer.char_count(), 5);
        buffer.append("\u{2713}");
        assert_eq!(buffer.char_count(), 6);
    }

    #[test]
    fn apply_tag_requires_known_tag() {
        let mut buffer = TextBuffer::new();
        buffer.replace("abc");
        assert_eq!(
            buffer.apply_tag("high", 0, 1),
            Err(ViewerError::UnknownTag("high".to_string()))
        );
    }

    #[test]
    fn replace_drops_tags_but_keeps_table() {
        let mut buffer = TextBuffer::new();
        buffer.create_tag("high", "#ff0000");
        buffer.replace("abc");
        buffer.apply_tag("high", 1, 3).unwrap();
        assert_eq!(buffer.tags().len(), 1);

        buffer.replace("xyz");
        assert!(buffer.tags().is_empty());
        assert_eq!(buffer.tag_background("high"), Some("#ff0000"));
    }

    #[test]
    fn apply_tag_rejects_out_of_range() {
        let mut buffer = TextBuffer::new();
        buffer.create_tag("low", "#0000ff");
        buffer.replace("ab");
        assert_eq!(
            buffer.apply_tag("low", 1, 3),
            Err(ViewerError::OffsetOutOfRange {
                start: 1,
                end: 3,
                len: 2
            })
        );
    }
}
