// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use xmlwriter::{Indent, XmlWriter};

use super::{Document, Node, NodeKind};

/// XML writing options.
#[derive(Clone, Copy, Default, Debug)]
pub struct WriteOptions {
    /// Use single quotes for attribute values.
    ///
    /// Default: false
    pub use_single_quote: bool,
}

impl Document {
    /// Writes the document back to a string.
    ///
    /// No indentation is added. Whitespace text nodes of the input are kept,
    /// so the output preserves the original layout.
    pub fn to_string(&self, opt: &WriteOptions) -> String {
        let root = match self.root_element() {
            Some(v) => v,
            None => return String::new(),
        };

        let mut xml = XmlWriter::new(xmlwriter::Options {
            use_single_quote: opt.use_single_quote,
            indent: Indent::None,
            attributes_indent: Indent::None,
        });
        xml.set_preserve_whitespaces(true);

        write_element(root, &mut xml);

        let body = xml.end_document();
        let mut s = String::with_capacity(self.prolog.len() + body.len() + self.epilogue.len());
        s.push_str(&self.prolog);
        s.push_str(&body);
        s.push_str(&self.epilogue);
        s
    }
}

fn write_element(node: Node, xml: &mut XmlWriter) {
    let name = match node.tag_name() {
        Some(v) => v,
        None => return,
    };

    xml.start_element(name);

    for ns in node.namespaces() {
        let value = escape_attribute(&ns.uri);
        match ns.prefix {
            Some(ref prefix) => xml.write_attribute_fmt(
                &format!("xmlns:{}", prefix),
                format_args!("{}", value),
            ),
            None => xml.write_attribute("xmlns", &value),
        }
    }

    for attr in node.attributes() {
        xml.write_attribute(&attr.name, &escape_attribute(&attr.value));
    }

    for child in node.children() {
        match child.d.kind {
            NodeKind::Element { .. } => write_element(child, xml),
            NodeKind::Text(ref text) => {
                if !text.is_empty() {
                    xml.write_text(&escape_text(text));
                }
            }
            NodeKind::Comment(ref text) => xml.write_comment(text),
            NodeKind::Root => {}
        }
    }

    xml.end_element();
}

// `xmlwriter` escapes only quotes in attributes and only `<` in text.

fn escape_attribute(value: &str) -> String {
    let mut s = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => s.push_str("&amp;"),
            '<' => s.push_str("&lt;"),
            '\n' => s.push_str("&#10;"),
            '\r' => s.push_str("&#13;"),
            '\t' => s.push_str("&#9;"),
            _ => s.push(c),
        }
    }

    s
}

fn escape_text(text: &str) -> String {
    let mut s = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => s.push_str("&amp;"),
            '>' => s.push_str("&gt;"),
            '\r' => s.push_str("&#13;"),
            _ => s.push(c),
        }
    }

    s
}

#[cfg(test)]
mod tests {
    use crate::{Document, Options};

    fn round_trip(text: &str) -> String {
        let doc = Document::parse_str(text, &Options::default()).unwrap();
        doc.to_string(&super::WriteOptions::default())
    }

    #[test]
    fn preserves_layout() {
        let text = "\
<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 10 10\">
    <!-- comment -->
    <g id=\"g1\">
        <rect width=\"5\" height=\"5\"/>
    </g>
</svg>";
        assert_eq!(round_trip(text), text);
    }

    #[test]
    fn escaping() {
        let text = "<svg data-x=\"a &amp; b &lt; c &quot;d&quot;\"><text>1 &lt; 2 &amp;&amp; 3 &gt; 2</text></svg>";
        assert_eq!(round_trip(text), text);
    }

    #[test]
    fn empty_elements_are_collapsed() {
        assert_eq!(round_trip("<svg><g></g></svg>"), "<svg><g/></svg>");
    }

    #[test]
    fn cdata_is_written_as_text() {
        assert_eq!(
            round_trip("<svg><style><![CDATA[a > b]]></style></svg>"),
            "<svg><style>a &gt; b</style></svg>"
        );
    }

    #[test]
    fn nested_namespaces() {
        let text = "<svg xmlns=\"http://www.w3.org/2000/svg\">\
<foreignObject><div xmlns=\"http://www.w3.org/1999/xhtml\">text</div></foreignObject>\
</svg>";
        assert_eq!(round_trip(text), text);
    }

    #[test]
    fn single_quotes() {
        let doc = Document::parse_str("<svg id=\"a'b\"/>", &Options::default()).unwrap();
        let opt = super::WriteOptions { use_single_quote: true };
        assert_eq!(doc.to_string(&opt), "<svg id='a&apos;b'/>");
    }
}
