use crate::error::ViewerError;
use crate::surface::{TagSpan, TextBuffer, TextSurface};

/// A position in the buffer, clamped to its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextIter {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub match_case: bool,
    pub wrap: bool,
}

#[derive(Debug)]
pub struct SearchableTextArea {
    surface: Box<dyn TextSurface>,
    editable: bool,
}

impl Default for SearchableTextArea {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchableTextArea {
    pub fn new() -> Self {
        Self::with_surface(Box::new(TextBuffer::new()))
    }

    pub fn with_surface(surface: Box<dyn TextSurface>) -> Self {
        Self {
            surface,
            editable: false,
        }
    }

    pub fn surface(&self) -> &dyn TextSurface {
        self.surface.as_ref()
    }

    pub fn bounds(&self) -> (usize, usize) {
        (0, self.surface.char_count())
    }

    pub fn text(&self) -> &str {
        self.surface.text()
    }

    pub fn is_empty(&self) -> bool {
        self.surface.text().is_empty()
    }

    pub fn get_text(&self, start: usize, end: usize) -> Result<String, ViewerError> {
        let len = self.surface.char_count();
        if start > end || end > len {
            return Err(ViewerError::OffsetOutOfRange { start, end, len });
        }
        Ok(self
            .surface
            .text()
            .chars()
            .skip(start)
            .take(end - start)
            .collect())
    }

    pub fn iter_at_offset(&self, position: usize) -> TextIter {
        let offset = position.min(self.surface.char_count());
        let mut line = 0;
        let mut column = 0;
        for ch in self.surface.text().chars().take(offset) {
            if ch == '\n' {
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }
        TextIter {
            offset,
            line,
            column,
        }
    }

    pub fn create_tag(&mut self, name: &str, background: &str) {
        self.surface.create_tag(name, background);
    }

    pub fn tag_background(&self, name: &str) -> Option<&str> {
        self.surface.tag_background(name)
    }

    pub fn apply_tag(&mut self, name: &str, start: usize, end: usize) -> Result<(), ViewerError> {
        self.surface.apply_tag(name, start, end)
    }

    pub fn tags(&self) -> &[TagSpan] {
        self.surface.tags()
    }

    pub fn clear_tags(&mut self) {
        self.surface.clear_tags();
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn set_text(&mut self, text: &str) {
        self.surface.replace(text);
    }

    pub fn insert_at_end(&mut self, text: &str) {
        self.surface.append(text);
    }

    pub fn clear(&mut self) {
        self.surface.replace("");
    }

    /// Every occurrence of `needle` as character spans. The scan restarts one
    /// character after each match start, so overlapping occurrences are all
    /// reported.
    pub fn find_all(&self, needle: &str) -> Vec<(usize, usize)> {
        find_spans(self.surface.text(), needle)
    }

    pub fn find_next(
        &self,
        query: &str,
        from: usize,
        options: SearchOptions,
    ) -> Option<(usize, usize)> {
        let matches = self.search(query, options);
        matches
            .iter()
            .copied()
            .find(|(start, _)| *start >= from)
            .or_else(|| {
                if options.wrap {
                    matches.first().copied()
                } else {
                    None
                }
            })
    }

    pub fn find_previous(
        &self,
        query: &str,
        before: usize,
        options: SearchOptions,
    ) -> Option<(usize, usize)> {
        let matches = self.search(query, options);
        matches
            .iter()
            .rev()
            .copied()
            .find(|(start, _)| *start < before)
            .or_else(|| {
                if options.wrap {
                    matches.last().copied()
                } else {
                    None
                }
            })
    }

    fn search(&self, query: &str, options: SearchOptions) -> Vec<(usize, usize)> {
        if options.match_case {
            find_spans(self.surface.text(), query)
        } else {
            // ASCII folding keeps byte lengths, so offsets stay valid.
            find_spans(
                &self.surface.text().to_ascii_lowercase(),
                &query.to_ascii_lowercase(),
            )
        }
    }
}

fn find_spans(haystack: &str, needle: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    if needle.is_empty() {
        return spans;
    }
    let needle_chars = needle.chars().count();
    let mut byte_pos = 0;
    let mut counted_byte = 0;
    let mut counted_chars = 0;
    while let Some(found) = haystack[byte_pos..].find(needle) {
        let start_byte = byte_pos + found;
        counted_chars += haystack[counted_byte..start_byte].chars().count();
        counted_byte = start_byte;
        spans.push((counted_chars, counted_chars + needle_chars));
        let step = haystack[start_byte..]
            .chars()
            .next()
            .map(char::len_utf8)
            .unwrap_or(1);
        byte_pos = start_byte + step;
    }
    spans
}
