// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`svgscope` scopes the embedded styles of an [SVG] document.

Stylesheets inside `style` elements are global. When several SVG images are
inlined into one HTML page, a rule from one image will style elements of
all the others. `svgscope` prevents this by renaming classes and IDs used
by stylesheet rules to unique ones, derived from the document content.

```text
<svg>                                   <svg>
  <style>.a { fill: red }</style>         <style>.a-{hash} { fill: red }</style>
  <rect class="a"/>              -->      <rect class="a-{hash}"/>
</svg>                                  </svg>
```

## Rules

- `.class` rules are scoped. The class is renamed in the stylesheet
  and in all `class` attributes of the same `svg` element.
- `#id` rules are kept. All IDs are renamed anyway, as are `href` and `url()`
  references to them.
- All other rules (`*`, `path`, `[attr]`, `@media`, etc.) are removed,
  since they cannot be scoped without changing the selector specificity.
- Only the first token of a selector is scoped. So `.a .b` becomes `.a-{hash} .b`.
  See [`Options::rename_nested_classes`].
- Each `svg` element, including nested ones, is scoped separately.
  When a document has more than one, the scope identifier has an index suffix.
  Classes renamed by a stylesheet are renamed in nested `svg` elements too,
  and references to IDs of other `svg` elements are kept intact.

## Fail-safe

[`scope_styles`] never fails. When an input cannot be parsed,
the original text is returned as is.

[SVG]: https://en.wikipedia.org/wiki/Scalable_Vector_Graphics
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

use std::borrow::Cow;

mod classes;
pub mod css;
mod error;
mod ids;
mod mapping;
mod options;
mod scope_id;
pub mod svgtree;

pub use crate::error::Error;
pub use crate::mapping::{ClassMapping, IdMapping, NameMap};
pub use crate::options::Options;
pub use crate::scope_id::ScopeId;
pub use crate::svgtree::{Document, NodeId, WriteOptions};

/// Scopes styles of an SVG document.
///
/// Returns the input as is when it's empty, blank or cannot be processed.
/// The reason is logged as a warning.
pub fn scope_styles<'a>(text: &'a str, opt: &Options) -> Cow<'a, str> {
    if text.trim().is_empty() {
        return Cow::Borrowed(text);
    }

    match try_scope_styles(text, opt) {
        Ok(s) => Cow::Owned(s),
        Err(e) => {
            log::warn!("Styles were not scoped cause {}.", e);
            Cow::Borrowed(text)
        }
    }
}

/// Same as [`scope_styles`], but accepts an optional input.
///
/// `None` is returned as is.
pub fn scope_styles_opt<'a>(text: Option<&'a str>, opt: &Options) -> Option<Cow<'a, str>> {
    text.map(|text| scope_styles(text, opt))
}

/// Scopes styles of an SVG document.
///
/// Unlike [`scope_styles`], reports why a document cannot be processed.
pub fn try_scope_styles(text: &str, opt: &Options) -> Result<String, Error> {
    let mut doc = Document::parse_str(text, opt)?;

    let scope = ScopeId::from_data(text.as_bytes());
    let roots = doc.svg_elements();
    let scopes: Vec<ScopeId> = (0..roots.len())
        .map(|idx| {
            if roots.len() > 1 {
                scope.with_index(idx)
            } else {
                scope.clone()
            }
        })
        .collect();

    // References can cross root boundaries, so all IDs are collected first.
    let owned: Vec<Vec<NodeId>> = roots
        .iter()
        .map(|root| ids::owned_elements(&doc, *root))
        .collect();
    let id_maps: Vec<IdMapping> = owned
        .iter()
        .zip(&scopes)
        .map(|(list, scope)| ids::collect_ids(&doc, list, scope))
        .collect();

    let mut class_maps = Vec::with_capacity(roots.len());
    for (idx, list) in owned.iter().enumerate() {
        let id_map = ids::resolve_ids(&doc, &roots, &id_maps, idx);
        let class_map = scope_root(&mut doc, list, &id_map, &scopes[idx], opt);
        class_maps.push(class_map);
    }

    classes::apply_classes(&mut doc, &roots, &class_maps);

    let s = doc.to_string(&WriteOptions {
        use_single_quote: opt.use_single_quote,
    });

    if s.is_empty() {
        return Err(Error::EmptyOutput);
    }

    Ok(s)
}

/// Renames IDs of the root's own elements and rewrites its stylesheets.
///
/// Returns classes renamed by all `style` elements of the root.
fn scope_root(
    doc: &mut Document,
    owned: &[NodeId],
    id_map: &IdMapping,
    scope: &ScopeId,
    opt: &Options,
) -> ClassMapping {
    log::debug!("Scoping an 'svg' element with '{}'.", scope);

    ids::apply_ids(doc, owned, id_map);

    let styles: Vec<NodeId> = owned
        .iter()
        .copied()
        .filter(|id| doc.get(*id).has_local_name("style"))
        .collect();

    let mut class_map = ClassMapping::new();
    for style_id in styles {
        let css = doc.get(style_id).text();
        let res = css::rewrite_stylesheet(&css, id_map, scope, opt);
        if res.text != css {
            doc.set_text(style_id, res.text);
        }

        class_map.extend(&res.classes);
    }

    class_map
}
