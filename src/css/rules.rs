// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::stream::Stream;

/// A stylesheet rule.
///
/// Both parts are slices of the source text and are not trimmed,
/// so writing all rules one after another reproduces the stylesheet.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Rule<'a> {
    /// Selector text, including leading whitespaces and comments.
    pub prelude: &'a str,
    /// Declaration block, including braces.
    ///
    /// For a statement at-rule, like `@import`, contains only the closing `;`.
    /// For a stray closing brace, contains only `}`.
    pub block: &'a str,
}

impl Rule<'_> {
    /// Checks that the rule ends with an unmatched `}`.
    #[inline]
    pub fn is_stray_brace(&self) -> bool {
        self.block == "}"
    }
}

/// An iterator over stylesheet rules.
#[derive(Clone, Debug)]
pub struct Rules<'a> {
    stream: Stream<'a>,
    tail: &'a str,
}

impl<'a> From<&'a str> for Rules<'a> {
    fn from(text: &'a str) -> Self {
        Rules {
            stream: Stream::from(text),
            tail: "",
        }
    }
}

impl<'a> Rules<'a> {
    /// Returns the text after the last rule.
    ///
    /// Usually whitespaces and comments. Valid only after the iterator was exhausted.
    #[inline]
    pub fn tail(&self) -> &'a str {
        self.tail
    }
}

impl<'a> Iterator for Rules<'a> {
    type Item = Rule<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let s = &mut self.stream;
        if s.at_end() {
            return None;
        }

        let start = s.pos();
        while !s.at_end() {
            match s.curr_byte_unchecked() {
                b'/' if s.starts_with(b"/*") => s.skip_comment(),
                b'"' | b'\'' => s.skip_string(),
                b'\\' => s.skip_escape(),
                b'{' => {
                    let prelude = s.slice_back(start);
                    let block_start = s.pos();
                    skip_block(s);
                    return Some(Rule {
                        prelude,
                        block: s.slice_back(block_start),
                    });
                }
                b';' | b'}' => {
                    let prelude = s.slice_back(start);
                    let block_start = s.pos();
                    s.advance(1);
                    return Some(Rule {
                        prelude,
                        block: s.slice_back(block_start),
                    });
                }
                _ => s.advance(1),
            }
        }

        self.tail = s.slice_back(start);
        None
    }
}

/// Skips a `{}` block with all nested blocks.
///
/// An unclosed block runs to the end of the stream.
fn skip_block(s: &mut Stream) {
    debug_assert!(s.is_curr_byte_eq(b'{'));

    let mut depth = 0u32;
    while !s.at_end() {
        match s.curr_byte_unchecked() {
            b'/' if s.starts_with(b"/*") => s.skip_comment(),
            b'"' | b'\'' => s.skip_string(),
            b'\\' => s.skip_escape(),
            b'{' => {
                depth += 1;
                s.advance(1);
            }
            b'}' => {
                depth -= 1;
                s.advance(1);
                if depth == 0 {
                    return;
                }
            }
            _ => s.advance(1),
        }
    }
}
