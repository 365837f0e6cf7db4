// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Extension methods for CSS-subset only operations.
pub(crate) trait ByteExt {
    /// Checks if a byte is a space.
    ///
    /// `[ \r\n\t\x0C]`
    fn is_space(&self) -> bool;

    fn is_quote(&self) -> bool;

    /// Checks if a byte is an ASCII char.
    ///
    /// `[A-Za-z]`
    fn is_letter(&self) -> bool;

    /// Checks if a byte is an ASCII ident char.
    ///
    /// `[A-Za-z0-9_-]`
    fn is_ascii_ident(&self) -> bool;
}

impl ByteExt for u8 {
    #[inline]
    fn is_space(&self) -> bool {
        matches!(*self, b' ' | b'\t' | b'\n' | b'\r' | 0x0C)
    }

    #[inline]
    fn is_quote(&self) -> bool {
        matches!(*self, b'\'' | b'"')
    }

    #[inline]
    fn is_letter(&self) -> bool {
        matches!(*self, b'A'..=b'Z' | b'a'..=b'z')
    }

    #[inline]
    fn is_ascii_ident(&self) -> bool {
        matches!(*self, b'0'..=b'9' | b'A'..=b'Z' | b'a'..=b'z' | b'-' | b'_')
    }
}

/// A streaming text parsing interface.
///
/// All structural bytes are ASCII, so any position right before or right after
/// an ASCII byte is a valid char boundary and can be used for slicing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct Stream<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> From<&'a str> for Stream<'a> {
    #[inline]
    fn from(text: &'a str) -> Self {
        Stream { text, pos: 0 }
    }
}

impl<'a> Stream<'a> {
    /// Returns the current position in bytes.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Checks if the stream is reached the end.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Returns a byte from a current stream position.
    ///
    /// # Panics
    ///
    /// - if the current position is after the end of the data
    #[inline]
    pub fn curr_byte_unchecked(&self) -> u8 {
        self.text.as_bytes()[self.pos]
    }

    /// Checks that current byte is equal to provided.
    ///
    /// Returns `false` if no bytes left.
    #[inline]
    pub fn is_curr_byte_eq(&self, c: u8) -> bool {
        if !self.at_end() {
            self.curr_byte_unchecked() == c
        } else {
            false
        }
    }

    /// Advances by `n` bytes.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        debug_assert!(self.pos + n <= self.text.len());
        self.pos += n;
    }

    /// Skips whitespaces.
    pub fn skip_spaces(&mut self) {
        while !self.at_end() && self.curr_byte_unchecked().is_space() {
            self.advance(1);
        }
    }

    /// Skips whitespaces and comments.
    pub fn skip_trivia(&mut self) {
        loop {
            self.skip_spaces();
            if self.starts_with(b"/*") {
                self.skip_comment();
            } else {
                break;
            }
        }
    }

    /// Checks that the stream starts with a selected text.
    #[inline]
    pub fn starts_with(&self, text: &[u8]) -> bool {
        self.text.as_bytes()[self.pos..].starts_with(text)
    }

    /// Skips a `/* */` comment.
    ///
    /// An unterminated comment runs to the end of the stream.
    pub fn skip_comment(&mut self) {
        debug_assert!(self.starts_with(b"/*"));
        self.advance(2);
        match self.text[self.pos..].find("*/") {
            Some(idx) => self.advance(idx + 2),
            None => self.jump_to_end(),
        }
    }

    /// Skips a quoted string, including quotes.
    ///
    /// Backslash escapes are honoured.
    /// An unterminated string runs to the end of the stream.
    pub fn skip_string(&mut self) {
        let quote = self.curr_byte_unchecked();
        debug_assert!(quote.is_quote());
        self.advance(1);

        while !self.at_end() {
            let c = self.curr_byte_unchecked();
            if c == b'\\' {
                self.skip_escape();
            } else if c == quote {
                self.advance(1);
                return;
            } else {
                self.advance(1);
            }
        }
    }

    /// Skips a backslash and the escaped char.
    pub fn skip_escape(&mut self) {
        debug_assert!(self.is_curr_byte_eq(b'\\'));
        self.advance(1);
        // The escaped char can be a non-ASCII one.
        if let Some(c) = self.slice_tail().chars().next() {
            self.advance(c.len_utf8());
        }
    }

    /// Checks that an ident cannot continue at the current position.
    ///
    /// Escapes and non-ASCII chars are valid ident chars in CSS,
    /// but they are not supported by [`consume_ascii_ident`](Self::consume_ascii_ident).
    pub fn at_ident_end(&self) -> bool {
        if self.at_end() {
            return true;
        }

        let c = self.curr_byte_unchecked();
        c.is_ascii() && !c.is_ascii_ident() && c != b'\\'
    }

    /// Consumes a single ident consisting of ASCII characters, if available.
    pub fn consume_ascii_ident(&mut self) -> &'a str {
        let start = self.pos;
        self.skip_bytes(|_, c| c.is_ascii_ident());
        self.slice_back(start)
    }

    /// Consumes bytes by the predicate.
    pub fn skip_bytes<F>(&mut self, f: F)
    where
        F: Fn(&Stream, u8) -> bool,
    {
        while !self.at_end() {
            let c = self.curr_byte_unchecked();
            if f(self, c) {
                self.advance(1);
            } else {
                break;
            }
        }
    }

    /// Sets current position equal to the end.
    #[inline]
    pub fn jump_to_end(&mut self) {
        self.pos = self.text.len();
    }

    /// Slices data from `pos` to the current position.
    #[inline]
    pub fn slice_back(&self, pos: usize) -> &'a str {
        &self.text[pos..self.pos]
    }

    /// Slices data from the current position to the end.
    #[inline]
    pub fn slice_tail(&self) -> &'a str {
        &self.text[self.pos..]
    }
}
