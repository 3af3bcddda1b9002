//! Forward cursor over an immutable input string.
//!
//! The scanner is shared by the HTML tree builder and the selector parser.
//! Positions are byte offsets into the input and always sit on a UTF-8
//! character boundary. Every read returns a slice of the original input, so
//! scanning never allocates.

/// Characters treated as whitespace by both markup and selector scanning.
pub const WHITESPACE: &[char] = &[' ', '\t', '\n', '\r', '\x0C'];

/// A position-addressable forward cursor over a string.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a scanner positioned at the start of `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Current byte offset.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Move the cursor to `pos`, clamped to the input length and moved
    /// forward to the next character boundary if needed.
    pub fn seek(&mut self, pos: usize) {
        let mut pos = pos.min(self.input.len());
        while !self.input.is_char_boundary(pos) {
            pos += 1;
        }
        self.pos = pos;
    }

    /// True once every character has been consumed.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// The unconsumed remainder of the input.
    #[must_use]
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// The next character, without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// True iff `literal` appears at the current position.
    #[must_use]
    pub fn peek_matches(&self, literal: &str) -> bool {
        self.rest().starts_with(literal)
    }

    /// Consume one character. Returns `None` at end of input.
    pub fn read_char(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume everything up to the first occurrence of `literal` that is not
    /// inside a quoted run.
    ///
    /// A `'` or `"` met while scanning swallows everything through its
    /// matching closing quote as one unit, so `<a title="x>y">` is read as a
    /// single tag. If `literal` never appears, the rest of the input is
    /// consumed and returned. With `inclusive`, a found terminator is consumed
    /// and included in the result.
    pub fn read_until(&mut self, literal: &str, inclusive: bool) -> &'a str {
        let start = self.pos;
        while !self.is_eof() && !self.peek_matches(literal) {
            let Some(c) = self.read_char() else {
                break;
            };
            if c == '"' || c == '\'' {
                let mut buf = [0u8; 4];
                let _ = self.read_until_literal(c.encode_utf8(&mut buf), true);
            }
        }
        self.finish_read(start, literal, inclusive)
    }

    /// Like [`Scanner::read_until`], but quotes have no special meaning.
    pub fn read_until_literal(&mut self, literal: &str, inclusive: bool) -> &'a str {
        let start = self.pos;
        match self.rest().find(literal) {
            Some(offset) => self.pos += offset,
            None => self.pos = self.input.len(),
        }
        self.finish_read(start, literal, inclusive)
    }

    fn finish_read(&mut self, start: usize, literal: &str, inclusive: bool) -> &'a str {
        if inclusive && !literal.is_empty() && self.peek_matches(literal) {
            self.pos += literal.len();
        }
        &self.input[start..self.pos]
    }

    /// Consume up to (not including) the first character in `chars`.
    ///
    /// The cursor is left on that character so it is read next. At end of
    /// input everything read so far is returned.
    pub fn read_until_any_of(&mut self, chars: &[char]) -> &'a str {
        let start = self.pos;
        let offset = self.rest().find(chars).unwrap_or(self.input.len() - start);
        self.pos += offset;
        &self.input[start..self.pos]
    }

    /// Advance past a run of characters that all belong to `chars`.
    pub fn skip_while(&mut self, chars: &[char]) {
        while let Some(c) = self.peek() {
            if !chars.contains(&c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    /// Read the inner span of an element whose opening tag was just consumed.
    ///
    /// Tracks a nesting counter that goes up on `<tag_name` and down on
    /// `</tag_name`, so `<a><b><a></a></b></a>` read from just inside the outer
    /// `<a>` yields `<b><a></a></b>`. The closing tag that ends the span is
    /// consumed through its `>`.
    ///
    /// If the input ends before the element is closed, the cursor is restored
    /// and an empty string is returned.
    pub fn read_balanced_node(&mut self, tag_name: &str) -> &'a str {
        let start = self.pos;
        let open = format!("<{tag_name}");
        let close = format!("</{tag_name}");
        let mut depth = 0usize;

        loop {
            if self.is_eof() {
                self.pos = start;
                return "";
            }

            if self.at_tag(&close) {
                if depth == 0 {
                    let inner = &self.input[start..self.pos];
                    let _ = self.read_until(">", true);
                    return inner;
                }
                depth -= 1;
            } else if self.at_tag(&open) {
                depth += 1;
            }

            let _ = self.read_char();
        }
    }

    /// True if `prefix` (`<name` or `</name`) is here and followed by a tag
    /// name boundary, so `<a` does not match `<abbr`.
    fn at_tag(&self, prefix: &str) -> bool {
        let rest = self.rest();
        rest.starts_with(prefix)
            && rest[prefix.len()..]
                .chars()
                .next()
                .is_none_or(|c| c == '>' || c == '/' || WHITESPACE.contains(&c))
    }
}
