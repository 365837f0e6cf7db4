// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A mutable XML tree.
//!
//! Unlike `roxmltree`, which is used for parsing, this tree allows attributes
//! and text content to be replaced and can be written back to a string.

mod parse;
mod writer;

pub use writer::WriteOptions;

/// An XML tree container.
///
/// Contains element, text and comment nodes.
pub struct Document {
    nodes: Vec<NodeData>,
    /// Everything before the root element, as written in the input.
    prolog: String,
    /// Everything after the root element, as written in the input.
    epilogue: String,
}

impl Document {
    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> Node {
        self.get(NodeId(0))
    }

    /// Returns the root element.
    #[inline]
    pub fn root_element(&self) -> Option<Node> {
        self.root().first_element_child()
    }

    /// Returns an iterator over document's descendant nodes.
    ///
    /// Shorthand for `doc.root().descendants()`.
    #[inline]
    pub fn descendants(&self) -> Descendants {
        self.root().descendants()
    }

    /// Returns a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> Node {
        Node {
            id,
            d: &self.nodes[id.0],
            doc: self,
        }
    }

    /// Returns all `svg` elements in document order.
    ///
    /// Includes nested ones.
    pub fn svg_elements(&self) -> Vec<NodeId> {
        self.descendants()
            .filter(|n| n.has_local_name("svg"))
            .map(|n| n.id())
            .collect()
    }

    /// Sets an attribute value.
    ///
    /// Overwrites an existing attribute with the same qualified name
    /// or appends a new one.
    ///
    /// Does nothing for non-element nodes.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: String) {
        if let NodeKind::Element { ref mut attributes, .. } = self.nodes[id.0].kind {
            match attributes.iter_mut().find(|a| a.name == name) {
                Some(attr) => attr.value = value,
                None => attributes.push(Attribute {
                    name: name.to_string(),
                    value,
                }),
            }
        }
    }

    /// Replaces element's children with a single text node.
    ///
    /// Detached nodes stay in the arena, but are no longer reachable.
    pub fn set_text(&mut self, id: NodeId, text: String) {
        if !self.get(id).is_element() {
            return;
        }

        self.nodes[id.0].children = None;
        self.append(id, NodeKind::Text(text));
    }

    fn append(&mut self, parent_id: NodeId, kind: NodeKind) -> NodeId {
        let new_child_id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            parent: Some(parent_id),
            prev_sibling: None,
            next_sibling: None,
            children: None,
            kind,
        });

        let last_child_id = self.nodes[parent_id.0].children.map(|(_, id)| id);
        self.nodes[new_child_id.0].prev_sibling = last_child_id;

        if let Some(id) = last_child_id {
            self.nodes[id.0].next_sibling = Some(new_child_id);
        }

        self.nodes[parent_id.0].children = Some(
            if let Some((first_child_id, _)) = self.nodes[parent_id.0].children {
                (first_child_id, new_child_id)
            } else {
                (new_child_id, new_child_id)
            },
        );

        new_child_id
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        if !self.root().has_children() {
            return write!(f, "Document []");
        }

        fn print_children(
            parent: Node,
            depth: usize,
            f: &mut std::fmt::Formatter,
        ) -> Result<(), std::fmt::Error> {
            for child in parent.children() {
                for _ in 0..depth {
                    write!(f, "    ")?;
                }
                writeln!(f, "{:?}", child)?;

                if child.has_children() {
                    print_children(child, depth + 1, f)?;
                }
            }

            Ok(())
        }

        writeln!(f, "Document [")?;
        print_children(self.root(), 1, f)?;
        writeln!(f, "]")?;

        Ok(())
    }
}

/// A node ID.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(usize);

enum NodeKind {
    Root,
    Element {
        /// Qualified name, as written in the input.
        name: String,
        /// Namespaces declared on this element.
        namespaces: Vec<Namespace>,
        attributes: Vec<Attribute>,
    },
    Text(String),
    Comment(String),
}

struct NodeData {
    parent: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
    children: Option<(NodeId, NodeId)>,
    kind: NodeKind,
}

/// A namespace declaration.
#[derive(Clone, PartialEq, Debug)]
pub struct Namespace {
    /// Namespace prefix. `None` for the default namespace.
    pub prefix: Option<String>,
    /// Namespace URI.
    pub uri: String,
}

/// An attribute.
#[derive(Clone, PartialEq, Debug)]
pub struct Attribute {
    /// Qualified name, as written in the input.
    pub name: String,
    /// Unescaped value.
    pub value: String,
}

impl Attribute {
    /// Returns the attribute name without a prefix.
    #[inline]
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }
}

#[inline]
fn local_name(qname: &str) -> &str {
    qname.rsplit(':').next().unwrap_or(qname)
}

/// An XML node.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    id: NodeId,
    doc: &'a Document,
    d: &'a NodeData,
}

impl Eq for Node<'_> {}

impl PartialEq for Node<'_> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::ptr::eq(self.doc, other.doc)
    }
}

impl<'a> Node<'a> {
    /// Returns node's ID.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Checks if the current node is an element.
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.d.kind, NodeKind::Element { .. })
    }

    /// Returns element's qualified name, unless the current node is not an element.
    #[inline]
    pub fn tag_name(&self) -> Option<&'a str> {
        match self.d.kind {
            NodeKind::Element { ref name, .. } => Some(name),
            _ => None,
        }
    }

    /// Checks that the current node is an element with a specified local name.
    #[inline]
    pub fn has_local_name(&self, name: &str) -> bool {
        self.tag_name().map(local_name) == Some(name)
    }

    /// Returns a list of all element's attributes.
    #[inline]
    pub fn attributes(&self) -> &'a [Attribute] {
        match self.d.kind {
            NodeKind::Element { ref attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Returns a list of namespaces declared on this element.
    #[inline]
    pub fn namespaces(&self) -> &'a [Namespace] {
        match self.d.kind {
            NodeKind::Element { ref namespaces, .. } => namespaces,
            _ => &[],
        }
    }

    /// Returns an attribute value by its qualified name.
    #[inline]
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.attributes()
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Returns node's text data.
    ///
    /// For text and comment nodes returns its content.
    /// For elements returns all child text nodes joined together.
    pub fn text(&self) -> String {
        match self.d.kind {
            NodeKind::Element { .. } => {
                let mut text = String::new();
                for child in self.children() {
                    if let NodeKind::Text(ref s) = child.d.kind {
                        text.push_str(s);
                    }
                }

                text
            }
            NodeKind::Text(ref text) | NodeKind::Comment(ref text) => text.clone(),
            NodeKind::Root => String::new(),
        }
    }

    /// Returns a parent node.
    #[inline]
    pub fn parent(&self) -> Option<Self> {
        self.d.parent.map(|id| self.doc.get(id))
    }

    /// Returns the previous sibling.
    #[inline]
    pub fn prev_sibling(&self) -> Option<Self> {
        self.d.prev_sibling.map(|id| self.doc.get(id))
    }

    /// Returns the next sibling.
    #[inline]
    pub fn next_sibling(&self) -> Option<Self> {
        self.d.next_sibling.map(|id| self.doc.get(id))
    }

    /// Returns the first child.
    #[inline]
    pub fn first_child(&self) -> Option<Self> {
        self.d.children.map(|(id, _)| self.doc.get(id))
    }

    /// Returns the first child element.
    #[inline]
    pub fn first_element_child(&self) -> Option<Self> {
        self.children().find(|n| n.is_element())
    }

    /// Returns the last child.
    #[inline]
    pub fn last_child(&self) -> Option<Self> {
        self.d.children.map(|(_, id)| self.doc.get(id))
    }

    /// Checks if the node has child nodes.
    #[inline]
    pub fn has_children(&self) -> bool {
        self.d.children.is_some()
    }

    /// Returns an iterator over ancestor nodes starting at this node.
    #[inline]
    pub fn ancestors(&self) -> Ancestors<'a> {
        Ancestors(Some(*self))
    }

    /// Returns an iterator over children nodes.
    #[inline]
    pub fn children(&self) -> Children<'a> {
        Children {
            front: self.first_child(),
            back: self.last_child(),
        }
    }

    /// Returns an iterator which traverses the subtree starting at this node.
    #[inline]
    pub fn traverse(&self) -> Traverse<'a> {
        Traverse {
            root: *self,
            edge: None,
        }
    }

    /// Returns an iterator over this node and its descendants.
    #[inline]
    pub fn descendants(&self) -> Descendants<'a> {
        Descendants(self.traverse())
    }
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        match self.d.kind {
            NodeKind::Root => write!(f, "Root"),
            NodeKind::Element { ref name, ref attributes, .. } => {
                write!(f, "Element {{ tag_name: {:?}, attributes: {:?} }}", name, attributes)
            }
            NodeKind::Text(ref text) => write!(f, "Text({:?})", text),
            NodeKind::Comment(ref text) => write!(f, "Comment({:?})", text),
        }
    }
}

/// An iterator over ancestor nodes.
#[derive(Clone, Debug)]
pub struct Ancestors<'a>(Option<Node<'a>>);

impl<'a> Iterator for Ancestors<'a> {
    type Item = Node<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.0.take();
        self.0 = node.as_ref().and_then(Node::parent);
        node
    }
}

/// An iterator over children nodes.
#[derive(Clone, Debug)]
pub struct Children<'a> {
    front: Option<Node<'a>>,
    back: Option<Node<'a>>,
}

impl<'a> Iterator for Children<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.front.take();
        if self.front == self.back {
            self.back = None;
        } else {
            self.front = node.as_ref().and_then(Node::next_sibling);
        }
        node
    }
}

impl<'a> DoubleEndedIterator for Children<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let node = self.back.take();
        if self.back == self.front {
            self.front = None;
        } else {
            self.back = node.as_ref().and_then(Node::prev_sibling);
        }
        node
    }
}

/// A tree traversal edge.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Edge<'a> {
    /// An element opening.
    Open(Node<'a>),
    /// An element closing.
    Close(Node<'a>),
}

/// A subtree traversal iterator.
#[derive(Clone, Debug)]
pub struct Traverse<'a> {
    root: Node<'a>,
    edge: Option<Edge<'a>>,
}

impl<'a> Iterator for Traverse<'a> {
    type Item = Edge<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.edge {
            Some(Edge::Open(node)) => {
                self.edge = Some(match node.first_child() {
                    Some(first_child) => Edge::Open(first_child),
                    None => Edge::Close(node),
                });
            }
            Some(Edge::Close(node)) => {
                if node == self.root {
                    self.edge = None;
                } else if let Some(next_sibling) = node.next_sibling() {
                    self.edge = Some(Edge::Open(next_sibling));
                } else {
                    self.edge = node.parent().map(Edge::Close);
                }
            }
            None => {
                self.edge = Some(Edge::Open(self.root));
            }
        }

        self.edge
    }
}

/// A descendants iterator.
#[derive(Clone, Debug)]
pub struct Descendants<'a>(Traverse<'a>);

impl<'a> Iterator for Descendants<'a> {
    type Item = Node<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        for edge in &mut self.0 {
            if let Edge::Open(node) = edge {
                return Some(node);
            }
        }

        None
    }
}
