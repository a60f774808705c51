//! Sparse byte-edge trie nodes.
//!
//! Each node owns its children in a vector kept strictly ascending by edge
//! byte, so a child is located by bisection. Nodes exist only for prefixes
//! some inserted key actually reached; there is no path compression and no
//! node is ever removed.
//!
//! A key of `n` bytes hangs `n` nodes in a single chain, so nothing here
//! recurses over the tree: walks, copies and teardown all keep their own
//! stack on the heap.

use std::mem;

/// A trie node.
pub(crate) struct Node<V> {
    /// Byte on the edge leading into this node (unused at the root).
    edge: u8,
    /// Value of the key whose byte stream ends here, if any.
    value: Option<V>,
    /// Children sorted strictly ascending by `edge`.
    children: Vec<Node<V>>,
}

impl<V> Node<V> {
    /// Create a childless, valueless node reached by `edge`.
    pub(crate) fn new(edge: u8, capacity: usize) -> Self {
        Self {
            edge,
            value: None,
            children: Vec::with_capacity(capacity),
        }
    }

    /// Follow `bytes` from this node and return the value stored where the
    /// stream ends.
    ///
    /// Fails as soon as a byte has no matching child; a stream ending on a
    /// valueless node is also a miss.
    pub(crate) fn find<I>(&self, bytes: I) -> Option<&V>
    where
        I: IntoIterator<Item = u8>,
    {
        let mut node = self;
        for byte in bytes {
            let idx = node.search(byte).ok()?;
            node = &node.children[idx];
        }
        node.value.as_ref()
    }

    /// Mutable counterpart of [`Node::find`].
    pub(crate) fn find_mut<I>(&mut self, bytes: I) -> Option<&mut V>
    where
        I: IntoIterator<Item = u8>,
    {
        let mut node = self;
        for byte in bytes {
            let idx = node.search(byte).ok()?;
            node = &mut node.children[idx];
        }
        node.value.as_mut()
    }

    /// Store `value` where `bytes` ends, creating missing nodes on the way.
    ///
    /// Returns `true` if this created a new entry, `false` if it overwrote an
    /// existing value in place.
    pub(crate) fn add<I>(&mut self, bytes: I, value: V, child_capacity: usize) -> bool
    where
        I: IntoIterator<Item = u8>,
    {
        let mut node = self;
        for byte in bytes {
            let idx = match node.search(byte) {
                Ok(idx) => idx,
                Err(_) => node.insert_child(byte, child_capacity),
            };
            node = &mut node.children[idx];
        }
        node.value.replace(value).is_none()
    }

    /// Bisect the children for `byte`.
    ///
    /// `Ok(idx)` on an exact match, `Err(idx)` with the insertion point
    /// otherwise.
    #[inline]
    fn search(&self, byte: u8) -> Result<usize, usize> {
        let mut lo = 0;
        let mut hi = self.children.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let edge = self.children[mid].edge;
            if edge == byte {
                return Ok(mid);
            }
            if edge > byte {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        Err(lo)
    }

    /// Insert a fresh child for `byte` and return its index.
    ///
    /// The insertion point is found by scanning back from the end, which is
    /// cheap when keys arrive in roughly ascending order. `byte` must not
    /// already be present.
    fn insert_child(&mut self, byte: u8, capacity: usize) -> usize {
        let mut idx = self.children.len();
        while idx > 0 && self.children[idx - 1].edge > byte {
            idx -= 1;
        }
        debug_assert!(idx == 0 || self.children[idx - 1].edge < byte);
        self.children.insert(idx, Node::new(byte, capacity));
        idx
    }

    /// Drop all values and children.
    pub(crate) fn clear(&mut self) {
        self.value = None;
        self.drop_children();
    }

    /// Tear down the subtree below this node one level at a time.
    fn drop_children(&mut self) {
        let mut stack = mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }

    /// A copy of this node's edge and value with room for its children.
    fn shell(&self) -> Self
    where
        V: Clone,
    {
        Self {
            edge: self.edge,
            value: self.value.clone(),
            children: Vec::with_capacity(self.children.len()),
        }
    }

    /// Walk the subtree rooted here, depth-first, calling `visit` with every
    /// node and its depth.
    pub(crate) fn walk(&self, mut visit: impl FnMut(&Node<V>, usize)) {
        let mut stack: Vec<(&Node<V>, usize)> = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            visit(node, depth);
            stack.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
    }

    #[cfg(test)]
    pub(crate) fn edge(&self) -> u8 {
        self.edge
    }

    pub(crate) fn has_value(&self) -> bool {
        self.value.is_some()
    }

    #[cfg(test)]
    pub(crate) fn children(&self) -> &[Node<V>] {
        &self.children
    }
}

impl<V> Drop for Node<V> {
    fn drop(&mut self) {
        self.drop_children();
    }
}

impl<V: Clone> Clone for Node<V> {
    fn clone(&self) -> Self {
        // Ancestors of `src` paired with their partially filled copies.
        let mut stack: Vec<(&Node<V>, Node<V>)> = Vec::new();
        let mut src = self;
        let mut copy = self.shell();
        loop {
            if let Some(child) = src.children.get(copy.children.len()) {
                stack.push((src, mem::replace(&mut copy, child.shell())));
                src = child;
                continue;
            }
            match stack.pop() {
                Some((parent, mut parent_copy)) => {
                    parent_copy.children.push(copy);
                    src = parent;
                    copy = parent_copy;
                }
                None => return copy,
            }
        }
    }
}

/// Shape of a node tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrieStats {
    /// Number of stored entries.
    pub entries: usize,
    /// Number of nodes, including the root.
    pub nodes: usize,
    /// Length of the longest stored byte path.
    pub max_depth: usize,
    /// Bytes held by node structures (approximate).
    pub node_bytes: usize,
}

impl<V> Node<V> {
    pub(crate) fn stats(&self) -> TrieStats {
        let mut stats = TrieStats::default();
        self.walk(|node, depth| {
            stats.nodes += 1;
            if node.has_value() {
                stats.entries += 1;
                stats.max_depth = stats.max_depth.max(depth);
            }
            stats.node_bytes += mem::size_of::<Node<V>>()
                + (node.children.capacity() - node.children.len()) * mem::size_of::<Node<V>>();
        });
        stats
    }
}
