use std::str::CharIndices;

#[derive(Debug, Clone, Copy)]
pub struct SourceChar {
    pub value: char,
    pub offset: usize,
}

impl SourceChar {
    pub fn next_offset(&self) -> usize {
        self.offset + self.value.len_utf8()
    }
}

/// Character scanner with a single character of lookahead.
#[derive(Debug)]
pub struct Cursor<'src> {
    source: &'src str,
    chars: CharIndices<'src>,
    lookahead: Option<SourceChar>,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices(),
            lookahead: None,
        }
    }

    pub fn peek(&mut self) -> Option<SourceChar> {
        if self.lookahead.is_none() {
            self.lookahead = self
                .chars
                .next()
                .map(|(offset, value)| SourceChar { value, offset });
        }
        self.lookahead
    }

    pub fn next_char(&mut self) -> Option<SourceChar> {
        let c = self.peek();
        self.lookahead = None;
        c
    }

    /// Byte offset of the next unread character.
    pub fn offset(&mut self) -> usize {
        self.peek()
            .map(|c| c.offset)
            .unwrap_or(self.source.len())
    }

    pub fn skip_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !predicate(c.value) {
                break;
            }
            self.next_char();
        }
    }
}
