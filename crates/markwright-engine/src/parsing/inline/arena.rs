use crate::parsing::MAX_NESTING;

use super::types::Inline;

/// Index of a working node in an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

/// Payload of a working node. Containers get their content from children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeValue {
    Root,
    Text(String),
    Code(String),
    SoftBreak,
    HardBreak,
    RawHtml(String),
    Entity { source: String, decoded: String },
    Autolink { destination: String, email: bool },
    Emphasis,
    Strong,
    Link { destination: String, title: String },
    Image { destination: String, title: String },
}

#[derive(Debug)]
struct Node {
    value: NodeValue,
    parent: Option<NodeId>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
}

/// Mutable doubly linked tree used while resolving one leaf block.
///
/// Emphasis and link resolution splice runs of siblings under new parents;
/// explicit sibling links make that O(1) per node. Ids are only ever handed
/// out by the arena itself, so indexing never fails.
#[derive(Debug)]
pub struct Arena {
    nodes: Vec<Node>,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Arena {
    pub fn new() -> Self {
        let mut arena = Self { nodes: Vec::new() };
        arena.alloc(NodeValue::Root);
        arena
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn alloc(&mut self, value: NodeValue) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            value,
            parent: None,
            prev: None,
            next: None,
            first_child: None,
            last_child: None,
        });
        id
    }

    pub fn value(&self, id: NodeId) -> &NodeValue {
        &self.nodes[id.0].value
    }

    pub fn value_mut(&mut self, id: NodeId) -> &mut NodeValue {
        &mut self.nodes[id.0].value
    }

    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].next
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].first_child
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].last_child
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        let last = self.nodes[parent.0].last_child;
        {
            let node = &mut self.nodes[child.0];
            node.parent = Some(parent);
            node.prev = last;
        }
        match last {
            Some(last) => self.nodes[last.0].next = Some(child),
            None => self.nodes[parent.0].first_child = Some(child),
        }
        self.nodes[parent.0].last_child = Some(child);
    }

    /// Places `node` directly after `sibling`.
    pub fn insert_after(&mut self, sibling: NodeId, node: NodeId) {
        self.detach(node);
        let parent = self.nodes[sibling.0].parent;
        let next = self.nodes[sibling.0].next;
        {
            let n = &mut self.nodes[node.0];
            n.parent = parent;
            n.prev = Some(sibling);
            n.next = next;
        }
        self.nodes[sibling.0].next = Some(node);
        match next {
            Some(next) => self.nodes[next.0].prev = Some(node),
            None => {
                if let Some(parent) = parent {
                    self.nodes[parent.0].last_child = Some(node);
                }
            }
        }
    }

    /// Unlinks `id` from its parent and siblings, keeping its own children.
    pub fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[id.0];
            (node.parent, node.prev, node.next)
        };
        match prev {
            Some(prev) => self.nodes[prev.0].next = next,
            None => {
                if let Some(parent) = parent {
                    self.nodes[parent.0].first_child = next;
                }
            }
        }
        match next {
            Some(next) => self.nodes[next.0].prev = prev,
            None => {
                if let Some(parent) = parent {
                    self.nodes[parent.0].last_child = prev;
                }
            }
        }
        let node = &mut self.nodes[id.0];
        node.parent = None;
        node.prev = None;
        node.next = None;
    }

    /// Moves every sibling after `start` (exclusive) up to `end` (exclusive,
    /// or the last sibling when `None`) under `parent`.
    pub fn move_siblings_after(&mut self, start: NodeId, end: Option<NodeId>, parent: NodeId) {
        let mut cursor = self.next(start);
        while let Some(node) = cursor {
            if Some(node) == end {
                break;
            }
            cursor = self.next(node);
            self.append_child(parent, node);
        }
    }

    /// Converts the tree under the root into owned inline nodes, merging
    /// adjacent text and dropping empty text.
    ///
    /// Wrappers nested deeper than [`MAX_NESTING`] are dropped and their
    /// content is kept in place.
    pub fn into_inlines(mut self) -> Vec<Inline> {
        let root = self.root();
        let mut out = Vec::new();
        self.collect(root, 0, &mut out);
        out
    }

    fn collect(&mut self, parent: NodeId, depth: usize, out: &mut Vec<Inline>) {
        let mut cursor = self.first_child(parent);
        while let Some(id) = cursor {
            cursor = self.next(id);
            let value = std::mem::replace(self.value_mut(id), NodeValue::Root);
            let wrapper = match leaf_inline(value) {
                Ok(Some(inline)) => {
                    push_inline(out, inline);
                    continue;
                }
                Ok(None) => continue,
                Err(wrapper) => wrapper,
            };
            if depth >= MAX_NESTING {
                self.collect_flat(id, out);
                continue;
            }
            let mut children = Vec::new();
            self.collect(id, depth + 1, &mut children);
            out.push(match wrapper {
                NodeValue::Strong => Inline::Strong(children),
                NodeValue::Link { destination, title } => Inline::Link {
                    destination,
                    title,
                    children,
                },
                NodeValue::Image { destination, title } => Inline::Image {
                    destination,
                    title,
                    children,
                },
                _ => Inline::Emphasis(children),
            });
        }
    }

    /// Appends the leaves below `wrapper` to `out` in document order.
    fn collect_flat(&mut self, wrapper: NodeId, out: &mut Vec<Inline>) {
        let mut stack = vec![self.first_child(wrapper)];
        while let Some(top) = stack.last_mut() {
            let Some(id) = *top else {
                stack.pop();
                continue;
            };
            *top = self.next(id);
            let value = std::mem::replace(self.value_mut(id), NodeValue::Root);
            match leaf_inline(value) {
                Ok(Some(inline)) => push_inline(out, inline),
                Ok(None) => {}
                Err(_) => stack.push(self.first_child(id)),
            }
        }
    }
}

/// Converts a node without children; wrappers are handed back.
fn leaf_inline(value: NodeValue) -> Result<Option<Inline>, NodeValue> {
    Ok(Some(match value {
        NodeValue::Text(text) => Inline::Text(text),
        NodeValue::Code(code) => Inline::Code(code),
        NodeValue::SoftBreak => Inline::SoftBreak,
        NodeValue::HardBreak => Inline::HardBreak,
        NodeValue::RawHtml(html) => Inline::RawHtml(html),
        NodeValue::Entity { source, decoded } => Inline::Entity { source, decoded },
        NodeValue::Autolink { destination, email } => Inline::Autolink { destination, email },
        NodeValue::Root => return Ok(None),
        wrapper @ (NodeValue::Emphasis
        | NodeValue::Strong
        | NodeValue::Link { .. }
        | NodeValue::Image { .. }) => return Err(wrapper),
    }))
}

fn push_inline(out: &mut Vec<Inline>, inline: Inline) {
    match inline {
        Inline::Text(text) if text.is_empty() => {}
        Inline::Text(text) => {
            if let Some(Inline::Text(prev)) = out.last_mut() {
                prev.push_str(&text);
            } else {
                out.push(Inline::Text(text));
            }
        }
        other => out.push(other),
    }
}
