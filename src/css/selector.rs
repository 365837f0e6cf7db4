// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::ops::Range;

use super::stream::{ByteExt, Stream};

/// A reason why a stylesheet rule was dropped.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DiscardReason {
    /// `* {}`
    Universal,
    /// `path {}`
    TypeSelector,
    /// `[fill] {}`
    AttributeSelector,
    /// `@media {}`
    AtRule,
    /// `.café {}`
    InvalidClassName,
    /// `} .a {}`
    UnexpectedBrace,
    /// Anything else, like `:root {}` or `> a {}`.
    Unsupported,
}

impl std::fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match *self {
            DiscardReason::Universal => "universal selector",
            DiscardReason::TypeSelector => "type selector",
            DiscardReason::AttributeSelector => "attribute selector",
            DiscardReason::AtRule => "at-rule",
            DiscardReason::InvalidClassName => "invalid class name",
            DiscardReason::UnexpectedBrace => "unexpected closing brace",
            DiscardReason::Unsupported => "unsupported selector",
        };

        write!(f, "{}", s)
    }
}

/// A selector kind, defined by its first token.
#[derive(Clone, PartialEq, Debug)]
pub(crate) enum Selector<'a> {
    /// Whitespaces and comments only.
    Empty,
    /// Starts with a class.
    Class {
        name: &'a str,
        /// Name position inside the prelude.
        range: Range<usize>,
    },
    /// Starts with an ID.
    Id,
    Discarded(DiscardReason),
}

pub(crate) fn classify(prelude: &str) -> Selector {
    let mut s = Stream::from(prelude);
    s.skip_trivia();

    if s.at_end() {
        return Selector::Empty;
    }

    match s.curr_byte_unchecked() {
        b'*' => Selector::Discarded(DiscardReason::Universal),
        b'.' => {
            s.advance(1);
            let start = s.pos();
            let name = s.consume_ascii_ident();
            if name.is_empty() || !s.at_ident_end() {
                Selector::Discarded(DiscardReason::InvalidClassName)
            } else {
                Selector::Class {
                    name,
                    range: start..s.pos(),
                }
            }
        }
        b'#' => Selector::Id,
        b'@' => Selector::Discarded(DiscardReason::AtRule),
        b'[' => Selector::Discarded(DiscardReason::AttributeSelector),
        c if c.is_letter() => Selector::Discarded(DiscardReason::TypeSelector),
        _ => Selector::Discarded(DiscardReason::Unsupported),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test {
        ($name:ident, $text:expr, $result:expr) => (
            #[test]
            fn $name() {
                assert_eq!(classify($text), $result);
            }
        )
    }

    test!(empty, "", Selector::Empty);
    test!(spaces, " \n\t", Selector::Empty);
    test!(comment, " /* .a */ ", Selector::Empty);
    test!(class, ".foo", Selector::Class { name: "foo", range: 1..4 });
    test!(class_with_trivia, "\n  /**/ .a-b_1 .c", Selector::Class { name: "a-b_1", range: 9..14 });
    test!(class_pseudo, ".a:hover", Selector::Class { name: "a", range: 1..2 });
    test!(class_non_ascii, ".café", Selector::Discarded(DiscardReason::InvalidClassName));
    test!(class_escaped, ".a\\:b", Selector::Discarded(DiscardReason::InvalidClassName));
    test!(class_empty, ". a", Selector::Discarded(DiscardReason::InvalidClassName));
    test!(id, "#a", Selector::Id);
    test!(universal, "* ", Selector::Discarded(DiscardReason::Universal));
    test!(universal_child, "*.a", Selector::Discarded(DiscardReason::Universal));
    test!(tag, "path", Selector::Discarded(DiscardReason::TypeSelector));
    test!(tag_with_class, "rect.a", Selector::Discarded(DiscardReason::TypeSelector));
    test!(attribute, "[fill]", Selector::Discarded(DiscardReason::AttributeSelector));
    test!(at_rule, "@media print", Selector::Discarded(DiscardReason::AtRule));
    test!(pseudo, ":root", Selector::Discarded(DiscardReason::Unsupported));
    test!(combinator, "> a", Selector::Discarded(DiscardReason::Unsupported));
}
