use super::ordering::ItemOrdering;
use crate::transactions::{ItemId, TransactionStore};
use std::collections::HashMap;

/// Index of a node inside [`PrefixTree`]'s arena.
pub type NodeId = usize;

pub const ROOT: NodeId = 0;

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub item: Option<ItemId>,
    pub count: usize,
    /// Non-owning; `None` only at the root.
    pub parent: Option<NodeId>,
    pub children: HashMap<ItemId, NodeId>,
    /// Next node carrying the same item, in creation order.
    pub next_link: Option<NodeId>,
}

impl TreeNode {
    pub fn new_root() -> Self {
        Self {
            item: None,
            count: 0,
            parent: None,
            children: HashMap::new(),
            next_link: None,
        }
    }

    pub fn new_item(item: ItemId, count: usize, parent: NodeId) -> Self {
        Self {
            item: Some(item),
            count,
            parent: Some(parent),
            children: HashMap::new(),
            next_link: None,
        }
    }
}

/// Compressed trie of frequency-ordered transactions.
///
/// Nodes live in an arena owned by the tree; `parent` and `next_link` are
/// plain indices. The header table maps every item to the first node
/// created for it and is the head of that item's node-link chain. Both
/// indices are maintained by [`insert_transaction`](Self::insert_transaction)
/// only, so the tree must not be edited through other means.
#[derive(Debug, Clone)]
pub struct PrefixTree {
    nodes: Vec<TreeNode>,
    header_table: HashMap<ItemId, NodeId>,
    link_tails: HashMap<ItemId, NodeId>,
}

impl Default for PrefixTree {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![TreeNode::new_root()],
            header_table: HashMap::new(),
            link_tails: HashMap::new(),
        }
    }

    /// Inserts every transaction of `store`, filtered and sorted by `ordering`.
    pub fn build(store: &TransactionStore, ordering: &ItemOrdering) -> Self {
        let mut tree = Self::new();
        for transaction in store.transactions() {
            let canonical = ordering.canonicalize(transaction);
            tree.insert_transaction(&canonical, 1);
        }
        tree
    }

    /// Walks `transaction` (already in canonical order) down from the root,
    /// adding `weight` to every node on the path.
    pub fn insert_transaction(&mut self, transaction: &[ItemId], weight: usize) {
        let mut current = ROOT;

        for &item in transaction {
            if let Some(&child) = self.nodes[current].children.get(&item) {
                self.nodes[child].count += weight;
                current = child;
            } else {
                let child = self.nodes.len();
                self.nodes.push(TreeNode::new_item(item, weight, current));
                self.nodes[current].children.insert(item, child);

                self.header_table.entry(item).or_insert(child);
                if let Some(tail) = self.link_tails.insert(item, child) {
                    self.nodes[tail].next_link = Some(child);
                }
                current = child;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[ROOT].children.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    pub fn root(&self) -> &TreeNode {
        &self.nodes[ROOT]
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn header_table(&self) -> &HashMap<ItemId, NodeId> {
        &self.header_table
    }

    /// Child of `parent` labelled `item`.
    pub fn child(&self, parent: NodeId, item: ItemId) -> Option<NodeId> {
        self.nodes[parent].children.get(&item).copied()
    }

    /// Children of `id` in creation order.
    pub fn children_of(&self, id: NodeId) -> Vec<NodeId> {
        let mut children: Vec<NodeId> = self.nodes[id].children.values().copied().collect();
        children.sort_unstable();
        children
    }

    /// Every node carrying `item`, starting from its header entry.
    pub fn node_links(&self, item: ItemId) -> NodeLinks<'_> {
        NodeLinks {
            tree: self,
            next: self.header_table.get(&item).copied(),
        }
    }

    /// Total count of `item` across all branches.
    pub fn item_support(&self, item: ItemId) -> usize {
        self.node_links(item).map(|id| self.nodes[id].count).sum()
    }

    /// Items on the path from the root down to `id`, excluding `id` itself.
    pub fn path_to(&self, id: NodeId) -> Vec<ItemId> {
        let mut path = Vec::new();
        let mut current = self.nodes[id].parent;

        while let Some(idx) = current {
            if let Some(item) = self.nodes[idx].item {
                path.push(item);
            }
            current = self.nodes[idx].parent;
        }

        path.reverse();
        path
    }

    /// Conditional pattern base of `item`: the prefix path above each of its
    /// nodes, weighted by that node's count. Empty prefixes are skipped.
    pub fn prefix_paths(&self, item: ItemId) -> Vec<(Vec<ItemId>, usize)> {
        self.node_links(item)
            .filter_map(|id| {
                let path = self.path_to(id);
                (!path.is_empty()).then_some((path, self.nodes[id].count))
            })
            .collect()
    }

    pub fn has_single_path(&self) -> bool {
        let mut current = ROOT;

        loop {
            let children = &self.nodes[current].children;
            match children.len() {
                0 => return true,
                1 => match children.values().next() {
                    Some(&child) => current = child,
                    None => return true,
                },
                _ => return false,
            }
        }
    }

    /// `(item, count)` along the leftmost path; meaningful when
    /// [`has_single_path`](Self::has_single_path) holds.
    pub fn single_path(&self) -> Vec<(ItemId, usize)> {
        let mut path = Vec::new();
        let mut current = ROOT;

        while let Some(child) = self.children_of(current).first().copied() {
            let node = &self.nodes[child];
            if let Some(item) = node.item {
                path.push((item, node.count));
            }
            current = child;
        }
        path
    }
}

/// Iterator over an item's node-link chain.
pub struct NodeLinks<'t> {
    tree: &'t PrefixTree,
    next: Option<NodeId>,
}

impl Iterator for NodeLinks<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.nodes[current].next_link;
        Some(current)
    }
}
