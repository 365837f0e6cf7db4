// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::ids::enclosing_roots;
use crate::svgtree::{Document, NodeId};
use crate::ClassMapping;

/// Renames classes of all elements inside the roots.
///
/// A root's mapping covers its whole subtree, nested `svg` elements included.
/// When several enclosing roots rename the same class, the element gets
/// all of the scoped names, the outermost root first.
///
/// The `class` attribute is written only when at least one class was renamed.
pub fn apply_classes(doc: &mut Document, roots: &[NodeId], classes: &[ClassMapping]) {
    if classes.iter().all(|map| map.is_empty()) {
        return;
    }

    let mut changes = Vec::new();
    for node in doc.descendants() {
        let value = match node.attribute("class") {
            Some(v) => v,
            None => continue,
        };

        let maps: Vec<&ClassMapping> = enclosing_roots(doc, roots, node.id())
            .into_iter()
            .rev()
            .map(|idx| &classes[idx])
            .collect();

        if let Some(new_value) = map_class_list(value, &maps) {
            changes.push((node.id(), new_value));
        }
    }

    for (id, value) in changes {
        doc.set_attribute(id, "class", value);
    }
}

/// Maps a whitespace-separated class list.
///
/// Returns `None` when nothing was renamed. Otherwise the classes are joined
/// with a single space.
pub fn map_class_list<'a>(value: &'a str, maps: &[&'a ClassMapping]) -> Option<String> {
    let mut changed = false;
    let mut list: Vec<&'a str> = Vec::new();
    for name in value.split_ascii_whitespace() {
        let start = list.len();
        for &map in maps {
            if let Some(new_name) = map.get(name) {
                if !list[start..].contains(&new_name) {
                    list.push(new_name);
                }
            }
        }

        if list.len() == start {
            list.push(name);
        } else {
            changed = true;
        }
    }

    if changed {
        Some(list.join(" "))
    } else {
        None
    }
}
