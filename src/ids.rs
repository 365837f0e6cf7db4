// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::svgtree::{Attribute, Document, NodeId};
use crate::{css, IdMapping, ScopeId};

/// Returns elements owned by an `svg` element in document order.
///
/// The list starts with the `svg` element itself. Nested `svg` elements
/// and their subtrees are skipped, since they are scoped separately.
pub fn owned_elements(doc: &Document, root: NodeId) -> Vec<NodeId> {
    let mut list = Vec::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        list.push(id);

        // Reversed, so the first child is popped first.
        for child in doc.get(id).children().rev() {
            if child.is_element() && !child.has_local_name("svg") {
                stack.push(child.id());
            }
        }
    }

    list
}

/// Returns indices of roots that contain the node, including the node itself.
///
/// The innermost root goes first.
pub fn enclosing_roots(doc: &Document, roots: &[NodeId], node: NodeId) -> Vec<usize> {
    doc.get(node)
        .ancestors()
        .filter_map(|n| roots.iter().position(|root| *root == n.id()))
        .collect()
}

/// Builds an ID mapping for the owned elements.
///
/// The tree is not modified.
pub fn collect_ids(doc: &Document, owned: &[NodeId], scope: &ScopeId) -> IdMapping {
    let mut ids = IdMapping::new();
    for id in owned {
        if let Some(value) = doc.get(*id).attribute("id") {
            if !value.is_empty() {
                ids.insert(value, scope.scoped(value));
            }
        }
    }

    ids
}

/// Builds the ID mapping used inside a root.
///
/// IDs are global to a document, so a reference can point to an element
/// owned by another root. The closest root defining an ID wins: the root itself,
/// then its ancestor roots, then the first one in document order.
pub fn resolve_ids(
    doc: &Document,
    roots: &[NodeId],
    maps: &[IdMapping],
    idx: usize,
) -> IdMapping {
    let mut ids = IdMapping::new();
    for map in maps.iter().rev() {
        ids.extend(map);
    }

    for i in enclosing_roots(doc, roots, roots[idx]).into_iter().rev() {
        ids.extend(&maps[i]);
    }

    ids
}

/// Renames IDs of the owned elements and updates references to them.
///
/// References are `href`/`xlink:href` attributes and `url(#id)` inside any attribute.
pub fn apply_ids(doc: &mut Document, owned: &[NodeId], ids: &IdMapping) {
    if ids.is_empty() {
        return;
    }

    for id in owned {
        let changes: Vec<(String, String)> = doc
            .get(*id)
            .attributes()
            .iter()
            .filter_map(|attr| rewrite_attribute(attr, ids).map(|v| (attr.name.clone(), v)))
            .collect();

        for (name, value) in changes {
            doc.set_attribute(*id, &name, value);
        }
    }
}

fn rewrite_attribute(attr: &Attribute, ids: &IdMapping) -> Option<String> {
    if attr.name == "id" {
        return ids.get(&attr.value).map(str::to_string);
    }

    if attr.local_name() == "href" {
        let link = attr.value.trim().strip_prefix('#')?;
        return ids.get(link).map(|v| format!("#{}", v));
    }

    css::substitute_url_refs(&attr.value, ids)
}
