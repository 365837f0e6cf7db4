// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::{Attribute, Document, Namespace, NodeData, NodeId, NodeKind};
use crate::options::Limits;
use crate::{Error, Options};

impl Document {
    /// Parses a [`Document`] from a string.
    ///
    /// Any XML error is fatal. There is no error recovery.
    pub fn parse_str(text: &str, opt: &Options) -> Result<Document, Error> {
        parse(text, opt.limits())
    }
}

fn parse(text: &str, limits: Limits) -> Result<Document, Error> {
    if let Some(max) = limits.bytes {
        if text.len() > max {
            return Err(Error::SizeLimitReached);
        }
    }

    // `roxmltree` is recursive, so nesting must be checked before parsing.
    check_nesting(text, limits.depth)?;

    let mut xml_opt = roxmltree::ParsingOptions::default();
    // Internal entities are valid XML. `roxmltree` guards against entity loops on its own.
    xml_opt.allow_dtd = true;
    xml_opt.nodes_limit = limits.nodes;

    let xml = roxmltree::Document::parse_with_options(text, xml_opt)?;

    let mut doc = Document {
        nodes: Vec::new(),
        prolog: String::new(),
        epilogue: String::new(),
    };

    // Add a root node.
    doc.nodes.push(NodeData {
        parent: None,
        prev_sibling: None,
        next_sibling: None,
        children: None,
        kind: NodeKind::Root,
    });

    let root_element = xml.root_element();
    let range = root_element.range();
    doc.prolog = text[..range.start].to_string();
    doc.epilogue = text[range.end..].to_string();

    parse_xml_element(root_element, NodeId(0), 0, limits.depth, &mut doc)?;

    Ok(doc)
}

/// Checks elements nesting without parsing a document.
///
/// Start tags of the DTD are added to the document depth, since entities
/// can produce elements too. Overestimates rather than underestimates.
fn check_nesting(text: &str, max_depth: u32) -> Result<(), Error> {
    let mut depth: u32 = 0;
    let mut dtd_tags: u32 = 0;
    let mut rest = text;
    while let Some(idx) = rest.find('<') {
        rest = &rest[idx..];
        if rest.starts_with("<!--") {
            rest = skip_past(rest, "-->");
        } else if rest.starts_with("<![CDATA[") {
            rest = skip_past(rest, "]]>");
        } else if rest.starts_with("<?") {
            rest = skip_past(rest, "?>");
        } else if rest.starts_with("<!") {
            let (len, tags) = scan_doctype(rest);
            dtd_tags = dtd_tags.saturating_add(tags);
            rest = &rest[len..];
        } else if rest.starts_with("</") {
            depth = depth.saturating_sub(1);
            rest = skip_past(rest, ">");
        } else {
            if depth.saturating_add(dtd_tags) > max_depth {
                return Err(Error::DepthLimitReached);
            }

            let (len, is_empty) = scan_start_tag(rest);
            if !is_empty {
                depth += 1;
            }
            rest = &rest[len..];
        }
    }

    Ok(())
}

/// Returns the text after the first `pattern`, or an empty string.
fn skip_past<'a>(text: &'a str, pattern: &str) -> &'a str {
    match text.find(pattern) {
        Some(idx) => &text[idx + pattern.len()..],
        None => "",
    }
}

/// Returns a start tag length and whether it's self-closing.
fn scan_start_tag(text: &str) -> (usize, bool) {
    let bytes = text.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'"' | b'\'') => i = find_byte(bytes, i + 1, quote) + 1,
            b'>' => return (i + 1, bytes[i - 1] == b'/'),
            _ => i += 1,
        }
    }

    (bytes.len(), false)
}

/// Returns a DTD length and the number of possible start tags inside its literals.
fn scan_doctype(text: &str) -> (usize, u32) {
    let bytes = text.as_bytes();
    let mut tags: u32 = 0;
    let mut in_subset = false;
    let mut i = 2;
    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'"' | b'\'') => {
                let end = find_byte(bytes, i + 1, quote);
                tags = tags.saturating_add(count_markup(&bytes[i + 1..end]));
                i = end + 1;
            }
            b'<' if bytes[i..].starts_with(b"<!--") => {
                i = match text[i..].find("-->") {
                    Some(idx) => i + idx + 3,
                    None => bytes.len(),
                };
            }
            b'[' => {
                in_subset = true;
                i += 1;
            }
            b']' => {
                in_subset = false;
                i += 1;
            }
            b'>' if !in_subset => return (i + 1, tags),
            _ => i += 1,
        }
    }

    (bytes.len(), tags)
}

/// Counts start tags and character references, which can expand to `<`.
fn count_markup(literal: &[u8]) -> u32 {
    let mut count: u32 = 0;
    for (i, c) in literal.iter().enumerate() {
        let next = literal.get(i + 1).copied();
        let is_tag = *c == b'<' && !matches!(next, Some(b'/' | b'!' | b'?'));
        let is_ref = *c == b'&' && next == Some(b'#');
        if is_tag || is_ref {
            count = count.saturating_add(1);
        }
    }

    count
}

/// Returns a position of the byte, or the slice length.
fn find_byte(bytes: &[u8], from: usize, c: u8) -> usize {
    match bytes.get(from..).and_then(|tail| tail.iter().position(|b| *b == c)) {
        Some(idx) => from + idx,
        None => bytes.len(),
    }
}

fn parse_xml_node(
    node: roxmltree::Node,
    parent_id: NodeId,
    depth: u32,
    max_depth: u32,
    doc: &mut Document,
) -> Result<(), Error> {
    match node.node_type() {
        roxmltree::NodeType::Element => {
            parse_xml_element(node, parent_id, depth, max_depth, doc)?;
        }
        roxmltree::NodeType::Text => {
            if let Some(text) = node.text() {
                doc.append(parent_id, NodeKind::Text(text.to_string()));
            }
        }
        roxmltree::NodeType::Comment => {
            if let Some(text) = node.text() {
                doc.append(parent_id, NodeKind::Comment(text.to_string()));
            }
        }
        roxmltree::NodeType::PI => {
            log::warn!("Processing instructions inside the root element are not supported.");
        }
        roxmltree::NodeType::Root => {}
    }

    Ok(())
}

fn parse_xml_element(
    node: roxmltree::Node,
    parent_id: NodeId,
    depth: u32,
    max_depth: u32,
    doc: &mut Document,
) -> Result<(), Error> {
    if depth > max_depth {
        return Err(Error::DepthLimitReached);
    }

    let name = element_qname(node);
    let namespaces = declared_namespaces(node);

    let mut attributes = Vec::new();
    for attr in node.attributes() {
        attributes.push(Attribute {
            name: attribute_qname(node, &attr),
            value: attr.value().to_string(),
        });
    }

    let node_id = doc.append(
        parent_id,
        NodeKind::Element {
            name,
            namespaces,
            attributes,
        },
    );

    for child in node.children() {
        parse_xml_node(child, node_id, depth + 1, max_depth, doc)?;
    }

    Ok(())
}

/// Returns namespaces that are in scope of the current element,
/// but not of its parent.
fn declared_namespaces(node: roxmltree::Node) -> Vec<Namespace> {
    let parent_namespaces: Vec<_> = match node.parent_element() {
        Some(parent) => parent.namespaces().collect(),
        None => Vec::new(),
    };

    node.namespaces()
        .filter(|ns| ns.uri() != roxmltree::NS_XML_URI)
        .filter(|ns| !parent_namespaces.contains(ns))
        .map(|ns| Namespace {
            prefix: ns.name().map(str::to_string),
            uri: ns.uri().to_string(),
        })
        .collect()
}

/// Returns element's qualified name as written in the input.
fn element_qname(node: roxmltree::Node) -> String {
    let local = node.tag_name().name();

    // `<prefix:name ...`
    let text = node.document().input_text();
    let start = node.range().start + 1;
    if let Some(tail) = text.get(start..) {
        let end = tail
            .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
            .unwrap_or(tail.len());
        let qname = &tail[..end];
        if qname == local || qname.ends_with(&format!(":{}", local)) {
            return qname.to_string();
        }
    }

    match node.tag_name().namespace().and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, local),
        _ => local.to_string(),
    }
}

/// Returns attribute's qualified name as written in the input.
fn attribute_qname(node: roxmltree::Node, attr: &roxmltree::Attribute) -> String {
    let local = attr.name();

    let text = node.document().input_text();
    if let Some(qname) = text.get(attr.range_qname()) {
        if qname == local || qname.ends_with(&format!(":{}", local)) {
            return qname.to_string();
        }
    }

    match attr.namespace().and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, local),
        _ => local.to_string(),
    }
}
