use std::borrow::Cow;
use std::fmt;

use pretty_assertions::assert_eq;
use svgscope::{scope_styles, scope_styles_opt, try_scope_styles, Error, Options, ScopeId};

#[derive(Clone, Copy, PartialEq)]
struct MStr<'a>(&'a str);

impl<'a> fmt::Debug for MStr<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compares the output with an expected one, where `{ID}` is the scope identifier
/// of the input.
macro_rules! test {
    ($name:ident, $input:expr, $output:expr) => {
        test!($name, Options::default(), $input, $output);
    };
    ($name:ident, $opt:expr, $input:expr, $output:expr) => {
        #[test]
        fn $name() {
            let input: &str = $input;
            let id = ScopeId::from_data(input.as_bytes());
            let expected = $output.replace("{ID}", id.as_str());
            let result = scope_styles(input, &$opt);
            assert_eq!(MStr(&result), MStr(&expected));
        }
    };
}

test!(class_round_trip,
"<svg xmlns='http://www.w3.org/2000/svg'>
    <style>.foo { fill: red; }</style>
    <rect class='foo' width='10' height='10'/>
</svg>",
"<svg xmlns=\"http://www.w3.org/2000/svg\">
    <style>.foo-{ID} { fill: red; }</style>
    <rect class=\"foo-{ID}\" width=\"10\" height=\"10\"/>
</svg>");

test!(id_rule,
"<svg><style>#bar { fill: red; }</style><rect id='bar'/></svg>",
"<svg><style>#bar-{ID} { fill: red; }</style><rect id=\"bar-{ID}\"/></svg>");

test!(universal_rule_is_removed,
"<svg><style>* { fill: red; } .a { fill: blue; }</style><rect class='a'/></svg>",
"<svg><style> .a-{ID} { fill: blue; }</style><rect class=\"a-{ID}\"/></svg>");

test!(type_rule_is_removed,
"<svg><style>path { stroke: blue; }</style><path d='M 0 0 L 10 10'/></svg>",
"<svg><style/><path d=\"M 0 0 L 10 10\"/></svg>");

test!(attribute_rule_is_removed,
"<svg><style>[fill] { stroke: blue; }\n.a { stroke: red; }</style></svg>",
"<svg><style>\n.a-{ID} { stroke: red; }</style></svg>");

test!(at_rule_is_removed,
"<svg><style>@media print { .a { fill: red } } .b { fill: blue }</style></svg>",
"<svg><style> .b-{ID} { fill: blue }</style></svg>");

test!(empty_selector_is_kept,
"<svg><style>{ fill: red }</style></svg>",
"<svg><style>{ fill: red }</style></svg>");

test!(invalid_class_name,
"<svg><style>.café { fill: red } .a { fill: blue }</style><g class='café a'/></svg>",
"<svg><style> .a-{ID} { fill: blue }</style><g class=\"café a-{ID}\"/></svg>");

test!(only_first_token_is_scoped,
"<svg><style>.a .b { fill: red }</style><g class='a'><g class='b'/></g></svg>",
"<svg><style>.a-{ID} .b { fill: red }</style><g class=\"a-{ID}\"><g class=\"b\"/></g></svg>");

test!(nested_classes,
Options { rename_nested_classes: true, ..Options::default() },
"<svg><style>.a .b { fill: red } .b { fill: blue } .a .c { fill: green }</style>\
<g class='a'><g class='b c'/></g></svg>",
"<svg><style>.a-{ID} .b-{ID} { fill: red } .b-{ID} { fill: blue } .a-{ID} .c { fill: green }</style>\
<g class=\"a-{ID}\"><g class=\"b-{ID} c\"/></g></svg>");

test!(class_list,
"<svg><style>.foo { fill: red }</style><g class=' foo\n bar '/><g class='  bar '/></svg>",
"<svg><style>.foo-{ID} { fill: red }</style><g class=\"foo-{ID} bar\"/><g class=\"  bar \"/></svg>");

test!(multiple_style_elements,
"<svg><style>.a { fill: red }</style><style>.b { fill: blue }</style><g class='a b'/></svg>",
"<svg><style>.a-{ID} { fill: red }</style><style>.b-{ID} { fill: blue }</style><g class=\"a-{ID} b-{ID}\"/></svg>");

test!(root_class,
"<svg class='icon'><style>.icon { fill: red }</style></svg>",
"<svg class=\"icon-{ID}\"><style>.icon-{ID} { fill: red }</style></svg>");

test!(sibling_roots,
"<div>\
<svg><style>.foo { fill: red }</style><g class='foo'/></svg>\
<svg><style>.foo { fill: blue }</style><g class='foo'/></svg>\
</div>",
"<div>\
<svg><style>.foo-{ID}-0 { fill: red }</style><g class=\"foo-{ID}-0\"/></svg>\
<svg><style>.foo-{ID}-1 { fill: blue }</style><g class=\"foo-{ID}-1\"/></svg>\
</div>");

test!(nested_roots,
"<svg><style>.a { fill: red }</style><g class='a'/>\
<svg><style>.a { fill: blue }</style><g class='a'/></svg>\
<g class='a'/></svg>",
"<svg><style>.a-{ID}-0 { fill: red }</style><g class=\"a-{ID}-0\"/>\
<svg><style>.a-{ID}-1 { fill: blue }</style><g class=\"a-{ID}-0 a-{ID}-1\"/></svg>\
<g class=\"a-{ID}-0\"/></svg>");

test!(nested_root_without_styles,
"<svg><style>.a { fill: red }</style><svg class='a'><rect class='a b'/></svg></svg>",
"<svg><style>.a-{ID}-0 { fill: red }</style><svg class=\"a-{ID}-0\"><rect class=\"a-{ID}-0 b\"/></svg></svg>");

test!(id_selector_into_nested_root,
"<svg><style>#x { fill: red }</style><svg><rect id='x'/></svg></svg>",
"<svg><style>#x-{ID}-1 { fill: red }</style><svg><rect id=\"x-{ID}-1\"/></svg></svg>");

test!(reference_from_nested_root,
"<svg xmlns:xlink='http://www.w3.org/1999/xlink'><linearGradient id='g'/>\
<svg><rect fill='url(#g)'/><use xlink:href='#g'/></svg></svg>",
"<svg xmlns:xlink=\"http://www.w3.org/1999/xlink\"><linearGradient id=\"g-{ID}-0\"/>\
<svg><rect fill=\"url(#g-{ID}-0)\"/><use xlink:href=\"#g-{ID}-0\"/></svg></svg>");

test!(closest_root_wins,
"<div>\
<svg><g id='a'/><use href='#a'/><use href='#b'/><svg><g id='a'/><use href='#a'/></svg></svg>\
<svg><g id='b'/><use href='#a'/></svg>\
</div>",
"<div>\
<svg><g id=\"a-{ID}-0\"/><use href=\"#a-{ID}-0\"/><use href=\"#b-{ID}-2\"/>\
<svg><g id=\"a-{ID}-1\"/><use href=\"#a-{ID}-1\"/></svg></svg>\
<svg><g id=\"b-{ID}-2\"/><use href=\"#a-{ID}-0\"/></svg>\
</div>");

test!(stray_braces,
"<svg><style>}}} .a { fill: red }</style><g class='a'/></svg>",
"<svg><style> .a-{ID} { fill: red }</style><g class=\"a-{ID}\"/></svg>");

test!(ids_without_styles,
"<svg xmlns:xlink='http://www.w3.org/1999/xlink'>\
<rect id='r'/><use xlink:href='#r'/><use href='#r'/><use href='#missing'/></svg>",
"<svg xmlns:xlink=\"http://www.w3.org/1999/xlink\">\
<rect id=\"r-{ID}\"/><use xlink:href=\"#r-{ID}\"/><use href=\"#r-{ID}\"/><use href=\"#missing\"/></svg>");

test!(url_refs_and_colors,
"<svg><style>#a { fill: #fff; } .b { fill: url(#g); }</style>\
<linearGradient id='g'/><rect id='a' class='b'/><rect fill='url(#g)'/></svg>",
"<svg><style>#a-{ID} { fill: #fff; } .b-{ID} { fill: url(#g-{ID}); }</style>\
<linearGradient id=\"g-{ID}\"/><rect id=\"a-{ID}\" class=\"b-{ID}\"/><rect fill=\"url(#g-{ID})\"/></svg>");

test!(ids_are_whole_tokens,
"<svg><style>#a, #ab { fill: red }</style><g id='a'/></svg>",
"<svg><style>#a-{ID}, #ab { fill: red }</style><g id=\"a-{ID}\"/></svg>");

test!(comments_in_stylesheet,
"<svg><style>/* .a {} */ .b { fill: red } /* tail */</style></svg>",
"<svg><style>/* .a {} */ .b-{ID} { fill: red } /* tail */</style></svg>");

test!(cdata,
"<svg><style><![CDATA[.a > .b { fill: red }]]></style><g class='a'/></svg>",
"<svg><style>.a-{ID} &gt; .b { fill: red }</style><g class=\"a-{ID}\"/></svg>");

test!(prolog_and_epilogue,
"<?xml version='1.0' encoding='UTF-8'?>\n<!-- Generator: test -->\n\
<svg><style>.a { fill: red }</style></svg>\n<!-- end -->\n",
"<?xml version='1.0' encoding='UTF-8'?>\n<!-- Generator: test -->\n\
<svg><style>.a-{ID} { fill: red }</style></svg>\n<!-- end -->\n");

test!(entities,
"<!DOCTYPE svg [<!ENTITY color 'red'>]><svg><style>.a { fill: &color; }</style></svg>",
"<!DOCTYPE svg [<!ENTITY color 'red'>]><svg><style>.a-{ID} { fill: red; }</style></svg>");

test!(escaped_attributes,
"<svg><style>.a { fill: red }</style><text class='a' data-x='1 &lt; 2 &amp; 3'>&lt;</text></svg>",
"<svg><style>.a-{ID} { fill: red }</style><text class=\"a-{ID}\" data-x=\"1 &lt; 2 &amp; 3\">&lt;</text></svg>");

test!(single_quotes,
Options { use_single_quote: true, ..Options::default() },
"<svg><style>.a { fill: red }</style><g class=\"a\"/></svg>",
"<svg><style>.a-{ID} { fill: red }</style><g class='a-{ID}'/></svg>");

test!(no_svg_elements,
"<html><style>.a { fill: red }</style></html>",
"<html><style>.a { fill: red }</style></html>");

#[test]
fn blank_input() {
    let opt = Options::default();
    assert!(matches!(scope_styles("", &opt), Cow::Borrowed("")));
    assert!(matches!(scope_styles(" \n\t", &opt), Cow::Borrowed(" \n\t")));
    assert_eq!(scope_styles_opt(None, &opt), None);
    assert_eq!(scope_styles_opt(Some(""), &opt), Some(Cow::Borrowed("")));
}

#[test]
fn malformed_input() {
    let opt = Options::default();
    for text in &[
        "<svg><style>.a { fill: red }</style>",
        "<svg><style>.a { fill: red }</style></g>",
        "not an svg",
        "<svg xlink:href='#a'/>",
        "<?xml version='1.0'?>",
    ] {
        let result = scope_styles(text, &opt);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, *text);
    }

    assert!(matches!(
        try_scope_styles("<svg>", &opt),
        Err(Error::ParsingFailed(_))
    ));
}

#[test]
fn too_deep() {
    let mut text = String::from("<svg><style>.a {}</style>");
    for _ in 0..300 {
        text.push_str("<g>");
    }
    for _ in 0..300 {
        text.push_str("</g>");
    }
    text.push_str("</svg>");

    assert_eq!(scope_styles(&text, &Options::default()), text.as_str());
    assert!(matches!(
        try_scope_styles(&text, &Options::default()),
        Err(Error::DepthLimitReached)
    ));

    let opt = Options {
        allow_huge_files: true,
        ..Options::default()
    };
    assert!(try_scope_styles(&text, &opt).unwrap().contains(".a-"));
}

#[test]
fn very_deep() {
    let mut text = String::from("<svg>");
    text.push_str(&"<g>".repeat(100_000));
    text.push_str(&"</g>".repeat(100_000));
    text.push_str("</svg>");

    assert!(matches!(scope_styles(&text, &Options::default()), Cow::Borrowed(_)));
    assert!(matches!(
        try_scope_styles(&text, &Options::default()),
        Err(Error::DepthLimitReached)
    ));

    let opt = Options {
        allow_huge_files: true,
        ..Options::default()
    };
    assert_eq!(scope_styles(&text, &opt), text.as_str());
}

#[test]
fn deep_entities() {
    let mut text = format!(
        "<!DOCTYPE svg [<!ENTITY e '{}{}'>]><svg>",
        "<g>".repeat(200),
        "</g>".repeat(200)
    );
    text.push_str(&"<g>".repeat(100));
    text.push_str("&e;");
    text.push_str(&"</g>".repeat(100));
    text.push_str("</svg>");

    assert!(matches!(
        try_scope_styles(&text, &Options::default()),
        Err(Error::DepthLimitReached)
    ));
}

#[test]
fn deterministic() {
    let text = "<svg><style>.a { fill: red }</style><g id='b' class='a'/></svg>";
    let opt = Options::default();
    assert_eq!(scope_styles(text, &opt), scope_styles(text, &opt));
}

#[test]
fn content_dependent() {
    let opt = Options::default();
    let a = scope_styles("<svg><style>.a { fill: red }</style></svg>", &opt);
    let b = scope_styles("<svg><style>.a { fill: blue }</style></svg>", &opt);
    let a_id = a.split("-").nth(1).unwrap().split(' ').next().unwrap();
    let b_id = b.split("-").nth(1).unwrap().split(' ').next().unwrap();
    assert_eq!(a_id.len(), 32);
    assert_ne!(a_id, b_id);
}

#[test]
fn rescoping_keeps_references() {
    let text = "<svg><style>.foo { fill: url(#g) } #r { stroke: red }</style>\
<linearGradient id='g'/><rect id='r' class='foo'/><use href='#r'/></svg>";
    let opt = Options::default();

    let first = scope_styles(text, &opt).into_owned();
    let id1 = ScopeId::from_data(text.as_bytes());
    let second = scope_styles(&first, &opt).into_owned();
    let id2 = ScopeId::from_data(first.as_bytes());

    let expected = format!(
        "<svg><style>.foo-{0}-{1} {{ fill: url(#g-{0}-{1}) }} #r-{0}-{1} {{ stroke: red }}</style>\
<linearGradient id=\"g-{0}-{1}\"/><rect id=\"r-{0}-{1}\" class=\"foo-{0}-{1}\"/><use href=\"#r-{0}-{1}\"/></svg>",
        id1, id2
    );
    assert_eq!(second, expected);
}
