// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Stylesheet rewriting.
//!
//! The stylesheet is not parsed into a tree. A small tokenizer splits it into
//! rules, and only the selector part of each rule is inspected.
//! Everything else is copied as is.

use std::borrow::Cow;
use std::ops::Range;

mod rules;
mod selector;
mod stream;

pub use rules::{Rule, Rules};
pub use selector::DiscardReason;

use crate::{ClassMapping, IdMapping, NameMap, Options, ScopeId};
use selector::Selector;
use stream::{ByteExt, Stream};

/// A dropped stylesheet rule.
#[derive(Clone, PartialEq, Debug)]
pub struct DiscardedRule {
    /// Trimmed selector text.
    pub selector: String,
    /// Why the rule was dropped.
    pub reason: DiscardReason,
}

/// A stylesheet rewriting result.
#[derive(Clone, Debug)]
pub struct StyleSheetRewrite {
    /// New stylesheet text.
    pub text: String,
    /// Renamed classes.
    pub classes: ClassMapping,
    /// Dropped rules in order of appearance.
    pub discarded: Vec<DiscardedRule>,
}

/// Scopes a stylesheet.
///
/// IDs are substituted first, using the `ids` mapping. Then each rule is
/// either kept, kept with its first class renamed, or dropped.
/// See [`DiscardReason`] for the list of dropped selectors.
pub fn rewrite_stylesheet(
    css: &str,
    ids: &IdMapping,
    scope: &ScopeId,
    opt: &Options,
) -> StyleSheetRewrite {
    let css = substitute_ids(css, ids);

    // The whole class mapping is required before writing,
    // because nested classes can refer to any rule.
    let mut rules = Rules::from(&*css);
    let mut classified = Vec::new();
    let mut classes = ClassMapping::new();
    let mut discarded = Vec::new();
    for rule in &mut rules {
        let selector = if rule.is_stray_brace() {
            Selector::Discarded(DiscardReason::UnexpectedBrace)
        } else {
            selector::classify(rule.prelude)
        };
        match selector {
            Selector::Class { name, .. } => {
                classes.insert(name, scope.scoped(name));
            }
            Selector::Discarded(reason) => {
                let text = rule.prelude.trim();
                log::debug!("Rule '{}' was removed: {}.", text, reason);
                discarded.push(DiscardedRule {
                    selector: text.to_string(),
                    reason,
                });
            }
            Selector::Empty | Selector::Id => {}
        }

        classified.push((rule, selector));
    }

    let mut text = String::with_capacity(css.len());
    for (rule, selector) in classified {
        match selector {
            Selector::Empty => {
                text.push_str(rule.prelude);
            }
            Selector::Id => {
                write_tail(rule.prelude, &classes, opt, &mut text);
            }
            Selector::Class { name, range } => {
                write_class_selector(rule.prelude, name, range, &classes, opt, &mut text);
            }
            Selector::Discarded(_) => continue,
        }

        text.push_str(rule.block);
    }
    text.push_str(rules.tail());

    StyleSheetRewrite {
        text,
        classes,
        discarded,
    }
}

fn write_class_selector(
    prelude: &str,
    name: &str,
    range: Range<usize>,
    classes: &ClassMapping,
    opt: &Options,
    out: &mut String,
) {
    out.push_str(&prelude[..range.start]);
    out.push_str(classes.get(name).unwrap_or(name));
    write_tail(&prelude[range.end..], classes, opt, out);
}

/// Writes the selector part after the first token.
fn write_tail(text: &str, classes: &ClassMapping, opt: &Options, out: &mut String) {
    if opt.rename_nested_classes {
        replace_prefixed_idents(text, b'.', classes, out);
    } else {
        out.push_str(text);
    }
}

/// Replaces ID references with scoped ones.
///
/// In selectors, all `#id` tokens are replaced. Inside declaration blocks
/// only `url(#id)` references are, so colors like `#fff` are left untouched.
pub fn substitute_ids<'a>(css: &'a str, ids: &IdMapping) -> Cow<'a, str> {
    if ids.is_empty() {
        return Cow::Borrowed(css);
    }

    let mut text = String::with_capacity(css.len());
    let mut rules = Rules::from(css);
    for rule in &mut rules {
        replace_prefixed_idents(rule.prelude, b'#', ids, &mut text);
        match substitute_url_refs(rule.block, ids) {
            Some(block) => text.push_str(&block),
            None => text.push_str(rule.block),
        }
    }
    replace_prefixed_idents(rules.tail(), b'#', ids, &mut text);

    Cow::Owned(text)
}

/// Replaces `url(#id)` references with scoped ones.
///
/// Quoted URLs are supported. Returns `None` when nothing was replaced.
pub fn substitute_url_refs(text: &str, ids: &IdMapping) -> Option<String> {
    if ids.is_empty() {
        return None;
    }

    let mut out = String::new();
    let mut copied = 0;
    let mut s = Stream::from(text);
    while !s.at_end() {
        match s.curr_byte_unchecked() {
            b'/' if s.starts_with(b"/*") => s.skip_comment(),
            b'"' | b'\'' => s.skip_string(),
            b'\\' => s.skip_escape(),
            b'u' | b'U' if is_url_start(&s, text) => {
                s.advance(4);
                if let Some((range, new_id)) = parse_url_ref(&mut s, ids) {
                    out.push_str(&text[copied..range.start]);
                    out.push_str(new_id);
                    copied = range.end;
                }
            }
            _ => s.advance(1),
        }
    }

    if copied == 0 {
        return None;
    }

    out.push_str(&text[copied..]);
    Some(out)
}

fn is_url_start(s: &Stream, text: &str) -> bool {
    let pos = s.pos();
    if pos > 0 && text.as_bytes()[pos - 1].is_ascii_ident() {
        return false;
    }

    text.as_bytes()[pos..]
        .get(..4)
        .map(|b| b.eq_ignore_ascii_case(b"url("))
        .unwrap_or(false)
}

/// Parses `#id)`, `'#id')` or `"#id")` and returns the ID range and its new value.
fn parse_url_ref<'m>(s: &mut Stream, ids: &'m IdMapping) -> Option<(Range<usize>, &'m str)> {
    s.skip_spaces();

    let mut quote = None;
    if !s.at_end() && s.curr_byte_unchecked().is_quote() {
        quote = Some(s.curr_byte_unchecked());
        s.advance(1);
    }

    if !s.is_curr_byte_eq(b'#') {
        return None;
    }
    s.advance(1);

    let start = s.pos();
    let name = s.consume_ascii_ident();
    if name.is_empty() || !s.at_ident_end() {
        return None;
    }
    let end = s.pos();

    if let Some(quote) = quote {
        if !s.is_curr_byte_eq(quote) {
            return None;
        }
        s.advance(1);
    }

    s.skip_spaces();
    if !s.is_curr_byte_eq(b')') {
        return None;
    }

    let new_id = ids.get(name)?;
    Some((start..end, new_id))
}

/// Replaces `{prefix}{name}` tokens using the map and writes the result to `out`.
///
/// Only whole tokens are replaced, so `#a` doesn't match `#ab`.
/// Comments and strings are left untouched.
fn replace_prefixed_idents(text: &str, prefix: u8, map: &NameMap, out: &mut String) {
    let mut copied = 0;
    let mut s = Stream::from(text);
    while !s.at_end() {
        let c = s.curr_byte_unchecked();
        if c == prefix {
            s.advance(1);
            let start = s.pos();
            let name = s.consume_ascii_ident();
            if !s.at_ident_end() {
                continue;
            }

            if let Some(new_name) = map.get(name) {
                out.push_str(&text[copied..start]);
                out.push_str(new_name);
                copied = s.pos();
            }
        } else if c == b'/' && s.starts_with(b"/*") {
            s.skip_comment();
        } else if c.is_quote() {
            s.skip_string();
        } else if c == b'\\' {
            s.skip_escape();
        } else {
            s.advance(1);
        }
    }

    out.push_str(&text[copied..]);
}
