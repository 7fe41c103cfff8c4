// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node store: arena, id index, construction, queries, and collapse tracking.

use alloc::{string::String, vec, vec::Vec};
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::error::TreeError;
use crate::types::{CheckState, NodeRecord};

/// Tri-state checkbox tree.
///
/// Owns every node exclusively. Nodes refer to each other only through the
/// store, by slot, so there is exactly one copy of each node's state and every
/// mutation goes through the store by id.
///
/// The id type `K` is chosen by the caller (the default is `u32`). Lookup by id
/// is constant time.
///
/// ## Example
///
/// ```rust
/// use understory_check_tree::{CheckState, CheckTree, NodeRecord};
///
/// let mut tree = CheckTree::build([
///     NodeRecord::new(1, "fruit", None),
///     NodeRecord::new(2, "apple", Some(1)),
///     NodeRecord::new(3, "pear", Some(1)),
/// ])
/// .unwrap();
///
/// tree.set_checked(2, true).unwrap();
/// assert_eq!(tree.checked(1), Some(CheckState::Indeterminate));
///
/// tree.set_checked(3, true).unwrap();
/// assert_eq!(tree.checked(1), Some(CheckState::Checked));
/// ```
#[derive(Clone)]
pub struct CheckTree<K = u32> {
    /// slots
    nodes: Vec<Option<Node<K>>>,
    free_list: Vec<usize>,
    /// id → slot
    index: HashMap<K, usize>,
    /// root slots in display order
    roots: Vec<usize>,
}

impl<K> Debug for CheckTree<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.index.len();
        f.debug_struct("CheckTree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("roots", &self.roots.len())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    pub(crate) id: K,
    pub(crate) label: String,
    pub(crate) parent: Option<usize>,
    pub(crate) children: SmallVec<[usize; 4]>,
    pub(crate) checked: CheckState,
    pub(crate) collapsed: bool,
}

impl<K> Node<K> {
    fn new(id: K, label: String, checked: CheckState) -> Self {
        Self {
            id,
            label,
            parent: None,
            children: SmallVec::new(),
            checked,
            collapsed: false,
        }
    }

    pub(crate) fn is_branch(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Read-only view of one node in a [`CheckTree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a, K> {
    tree: &'a CheckTree<K>,
    slot: usize,
}

impl<K: Debug> Debug for NodeRef<'_, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let node = self.tree.node(self.slot);
        f.debug_struct("NodeRef")
            .field("id", &node.id)
            .field("label", &node.label)
            .field("checked", &node.checked)
            .field("collapsed", &node.collapsed)
            .finish_non_exhaustive()
    }
}

impl<'a, K: Copy> NodeRef<'a, K> {
    fn node(self) -> &'a Node<K> {
        self.tree.node(self.slot)
    }

    /// The node's id.
    pub fn id(self) -> K {
        self.node().id
    }

    /// The node's display label.
    pub fn label(self) -> &'a str {
        &self.node().label
    }

    /// Current check state.
    pub fn checked(self) -> CheckState {
        self.node().checked
    }

    /// Whether the branch is collapsed. Only meaningful for branches.
    pub fn collapsed(self) -> bool {
        self.node().collapsed
    }

    /// Whether the node has at least one child.
    pub fn is_branch(self) -> bool {
        self.node().is_branch()
    }

    /// The parent id, or `None` for a root.
    pub fn parent(self) -> Option<K> {
        let tree = self.tree;
        self.node().parent.map(|p| tree.node(p).id)
    }

    /// Child ids in display order.
    pub fn children(self) -> impl ExactSizeIterator<Item = K> + 'a {
        let tree = self.tree;
        self.node().children.iter().map(move |&c| tree.node(c).id)
    }
}

impl<K> Default for CheckTree<K> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            free_list: Vec::new(),
            index: HashMap::new(),
            roots: Vec::new(),
        }
    }
}

impl<K> CheckTree<K> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Access a live slot; panics if the slot is free.
    pub(crate) fn node(&self, slot: usize) -> &Node<K> {
        let Some(node) = self.nodes[slot].as_ref() else {
            unreachable!("slot {slot} is not occupied");
        };
        node
    }

    pub(crate) fn node_mut(&mut self, slot: usize) -> &mut Node<K> {
        let Some(node) = self.nodes[slot].as_mut() else {
            unreachable!("slot {slot} is not occupied");
        };
        node
    }

    /// Slot capacity, live or free. Per-slot side tables are sized by this.
    pub(crate) fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn root_slots(&self) -> &[usize] {
        &self.roots
    }

    /// Depth-first walk from `start`, in display order.
    ///
    /// Children for which `visible` returns `false` are skipped along with
    /// their subtrees. When `honor_collapse` is set, children of collapsed
    /// branches are not entered.
    pub(crate) fn walk<V>(
        &self,
        start: &[usize],
        visible: V,
        honor_collapse: bool,
    ) -> Walk<'_, K, V>
    where
        V: Fn(usize) -> bool,
    {
        let stack = start.iter().rev().map(|&slot| (slot, 0)).collect();
        Walk {
            tree: self,
            stack,
            visible,
            honor_collapse,
        }
    }
}

/// Depth-first traversal state; yields `(slot, depth)`.
pub(crate) struct Walk<'a, K, V> {
    tree: &'a CheckTree<K>,
    stack: Vec<(usize, usize)>,
    visible: V,
    honor_collapse: bool,
}

impl<K, V> Iterator for Walk<'_, K, V>
where
    V: Fn(usize) -> bool,
{
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (slot, depth) = self.stack.pop()?;
        let node = self.tree.node(slot);
        if !(self.honor_collapse && node.collapsed) {
            // Reversed so children pop in display order.
            for &child in node.children.iter().rev() {
                if (self.visible)(child) {
                    self.stack.push((child, depth + 1));
                }
            }
        }
        Some((slot, depth))
    }
}

impl<K> CheckTree<K>
where
    K: Copy + Eq + Hash + Debug,
{
    /// Build a tree from flat records.
    ///
    /// Root-level records (`parent: None`) become roots in input order; every
    /// other record is appended to its parent's children in input order. A
    /// branch record with `checked: Some(true)` checks its whole subtree, and
    /// every branch's state is then derived from its children.
    ///
    /// # Errors
    ///
    /// - [`TreeError::DuplicateId`] if two records share an id.
    /// - [`TreeError::DanglingParent`] if a record names an unknown parent.
    /// - [`TreeError::Cycle`] if parent links loop.
    pub fn build<I>(records: I) -> Result<Self, TreeError<K>>
    where
        I: IntoIterator<Item = NodeRecord<K>>,
    {
        let records = records.into_iter();
        let mut tree = Self {
            nodes: Vec::with_capacity(records.size_hint().0),
            ..Self::default()
        };
        let mut parents: Vec<Option<K>> = Vec::with_capacity(records.size_hint().0);
        let mut seeds: Vec<bool> = Vec::with_capacity(records.size_hint().0);

        // Pass 1: one node per record.
        for record in records {
            if tree.index.contains_key(&record.id) {
                return Err(TreeError::DuplicateId(record.id));
            }
            let seed = record.checked.unwrap_or(false);
            tree.index.insert(record.id, tree.nodes.len());
            tree.nodes.push(Some(Node::new(
                record.id,
                record.label,
                CheckState::from_bool(seed),
            )));
            parents.push(record.parent);
            seeds.push(seed);
        }

        // Pass 2: wire children and roots.
        for (slot, parent) in parents.into_iter().enumerate() {
            let Some(parent) = parent else {
                tree.roots.push(slot);
                continue;
            };
            let id = tree.node(slot).id;
            let Some(&parent_slot) = tree.index.get(&parent) else {
                return Err(TreeError::DanglingParent { id, parent });
            };
            if parent_slot == slot {
                return Err(TreeError::Cycle(id));
            }
            tree.link(slot, parent_slot);
        }

        let reached = tree.walk(&tree.roots, |_| true, false).count();
        if reached != tree.nodes.len() {
            return Err(TreeError::Cycle(tree.slot_on_cycle()));
        }

        tree.seed_and_aggregate(&seeds);
        tracing::debug!(nodes = tree.len(), roots = tree.roots.len(), "built check tree");
        Ok(tree)
    }

    /// Find a node on a parent cycle. Only valid when some slot is unreachable
    /// from the roots, which in a single-parent structure means a cycle exists.
    fn slot_on_cycle(&self) -> K {
        let mut reached = vec![false; self.nodes.len()];
        for (slot, _) in self.walk(&self.roots, |_| true, false) {
            reached[slot] = true;
        }
        let Some(mut slot) = reached.iter().position(|r| !r) else {
            unreachable!("every slot is reachable from a root");
        };
        // Walking `len` parent links from an unreachable node must end on the cycle.
        for _ in 0..self.nodes.len() {
            let Some(parent) = self.node(slot).parent else {
                unreachable!("an unreachable node has no root ancestor");
            };
            slot = parent;
        }
        self.node(slot).id
    }

    /// Apply construction seeds down each subtree, then derive every branch.
    fn seed_and_aggregate(&mut self, seeds: &[bool]) {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(usize, bool)> =
            self.roots.iter().rev().map(|&r| (r, false)).collect();
        while let Some((slot, inherited)) = stack.pop() {
            let seeded = inherited || seeds[slot];
            let node = self.node_mut(slot);
            node.checked = CheckState::from_bool(seeded);
            for &child in node.children.iter().rev() {
                stack.push((child, seeded));
            }
            order.push(slot);
        }
        // Reverse pre-order visits every child before its parent.
        for &slot in order.iter().rev() {
            if let Some(state) = self.aggregate_children(slot) {
                self.node_mut(slot).checked = state;
            }
        }
    }

    /// Append `slot` to `parent`'s children.
    fn link(&mut self, slot: usize, parent: usize) {
        let p = self.node_mut(parent);
        if p.children.is_empty() {
            p.collapsed = false;
        }
        p.children.push(slot);
        self.node_mut(slot).parent = Some(parent);
    }

    pub(crate) fn slot(&self, id: K) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Slot for `id`, or [`TreeError::NodeNotFound`].
    pub(crate) fn lookup(&self, id: K) -> Result<usize, TreeError<K>> {
        self.slot(id).ok_or_else(|| {
            tracing::debug!(?id, "rejected operation on unknown node");
            TreeError::NodeNotFound(id)
        })
    }

    /// Returns `true` if a node with this id exists.
    pub fn contains(&self, id: K) -> bool {
        self.index.contains_key(&id)
    }

    /// View a node by id.
    pub fn get(&self, id: K) -> Option<NodeRef<'_, K>> {
        let slot = *self.index.get(&id)?;
        Some(NodeRef { tree: self, slot })
    }

    /// Check state of a node, or `None` for unknown ids.
    pub fn checked(&self, id: K) -> Option<CheckState> {
        self.get(id).map(|n| n.checked())
    }

    /// Parent of a node, or `None` for roots and unknown ids.
    pub fn parent_of(&self, id: K) -> Option<K> {
        self.get(id)?.parent()
    }

    /// Children of a node in display order; empty for leaves and unknown ids.
    pub fn children_of(&self, id: K) -> impl Iterator<Item = K> + '_ {
        self.get(id).into_iter().flat_map(|n| n.children())
    }

    /// Root ids in display order.
    pub fn roots(&self) -> impl ExactSizeIterator<Item = K> + '_ {
        self.roots.iter().map(|&r| self.node(r).id)
    }

    /// Ancestors of a node, from its parent up to its root.
    pub fn ancestors(&self, id: K) -> impl Iterator<Item = K> + '_ {
        let start = self.index.get(&id).and_then(|&s| self.node(s).parent);
        core::iter::successors(start, |&s| self.node(s).parent).map(|s| self.node(s).id)
    }

    /// Descendants of a node in depth-first display order, excluding the node.
    pub fn descendants(&self, id: K) -> impl Iterator<Item = K> + '_ {
        let start = self.index.get(&id).map(|&s| self.node(s).children.as_slice());
        self.walk(start.unwrap_or(&[]), |_| true, false)
            .map(|(s, _)| self.node(s).id)
    }

    /// Every node in depth-first display order.
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'_, K>> + '_ {
        self.walk(&self.roots, |_| true, false)
            .map(|(slot, _)| NodeRef { tree: self, slot })
    }

    /// Ids of every fully checked node, in depth-first display order.
    pub fn checked_ids(&self) -> impl Iterator<Item = K> + '_ {
        self.iter().filter(|n| n.checked().is_checked()).map(|n| n.id())
    }

    /// Ids of checked leaves, in depth-first display order.
    ///
    /// This is the selection a picker reports: branches are implied by their
    /// leaves.
    pub fn checked_leaves(&self) -> impl Iterator<Item = K> + '_ {
        self.iter()
            .filter(|n| !n.is_branch() && n.checked().is_checked())
            .map(|n| n.id())
    }

    /// Insert one node under an existing parent, or as the last root.
    ///
    /// The new node takes the record's check value and every ancestor is
    /// re-derived. A parent receiving its first child is expanded.
    ///
    /// # Errors
    ///
    /// - [`TreeError::DuplicateId`] if the id is already present.
    /// - [`TreeError::DanglingParent`] if the parent does not exist.
    pub fn insert(&mut self, record: NodeRecord<K>) -> Result<(), TreeError<K>> {
        if self.index.contains_key(&record.id) {
            tracing::debug!(id = ?record.id, "rejected duplicate insert");
            return Err(TreeError::DuplicateId(record.id));
        }
        let parent = match record.parent {
            Some(parent) => match self.index.get(&parent) {
                Some(&p) => Some(p),
                None => {
                    tracing::debug!(id = ?record.id, ?parent, "rejected insert under unknown parent");
                    return Err(TreeError::DanglingParent {
                        id: record.id,
                        parent,
                    });
                }
            },
            None => None,
        };

        let node = Node::new(
            record.id,
            record.label,
            CheckState::from_bool(record.checked.unwrap_or(false)),
        );
        let slot = if let Some(slot) = self.free_list.pop() {
            self.nodes[slot] = Some(node);
            slot
        } else {
            self.nodes.push(Some(node));
            self.nodes.len() - 1
        };
        self.index.insert(record.id, slot);

        match parent {
            Some(p) => {
                self.link(slot, p);
                self.reaggregate_from(p);
            }
            None => self.roots.push(slot),
        }
        tracing::debug!(id = ?record.id, "inserted node");
        Ok(())
    }

    /// Remove a node and its whole subtree; returns how many nodes were removed.
    ///
    /// Ancestors are re-derived from their remaining children. A parent left
    /// without children keeps its last state, except that an indeterminate
    /// leaf has no meaning and becomes unchecked.
    ///
    /// # Errors
    ///
    /// [`TreeError::NodeNotFound`] if the id is unknown.
    pub fn remove(&mut self, id: K) -> Result<usize, TreeError<K>> {
        let slot = self.lookup(id)?;
        let parent = self.node(slot).parent;
        match parent {
            Some(p) => self.node_mut(p).children.retain(|c| *c != slot),
            None => self.roots.retain(|r| *r != slot),
        }

        let doomed: Vec<usize> = self.walk(&[slot], |_| true, false).map(|(s, _)| s).collect();
        for &s in &doomed {
            if let Some(node) = self.nodes[s].take() {
                self.index.remove(&node.id);
            }
            self.free_list.push(s);
        }

        if let Some(p) = parent {
            let node = self.node_mut(p);
            if node.children.is_empty() {
                if node.checked.is_indeterminate() {
                    node.checked = CheckState::Unchecked;
                }
                if let Some(grandparent) = node.parent {
                    self.reaggregate_from(grandparent);
                }
            } else {
                self.reaggregate_from(p);
            }
        }
        tracing::debug!(?id, removed = doomed.len(), "removed subtree");
        Ok(doomed.len())
    }

    /// Set a node's collapsed flag. No cascade.
    ///
    /// The flag is tracked independently of filtering, so it survives a
    /// filter being applied and cleared.
    ///
    /// # Errors
    ///
    /// [`TreeError::NodeNotFound`] if the id is unknown.
    pub fn set_collapsed(&mut self, id: K, collapsed: bool) -> Result<(), TreeError<K>> {
        let slot = self.lookup(id)?;
        self.node_mut(slot).collapsed = collapsed;
        Ok(())
    }

    /// Flip a node's collapsed flag; returns the new value.
    ///
    /// # Errors
    ///
    /// [`TreeError::NodeNotFound`] if the id is unknown.
    pub fn toggle_collapsed(&mut self, id: K) -> Result<bool, TreeError<K>> {
        let slot = self.lookup(id)?;
        let node = self.node_mut(slot);
        node.collapsed = !node.collapsed;
        Ok(node.collapsed)
    }

    /// Collapsed flag of a node, or `None` for unknown ids.
    pub fn is_collapsed(&self, id: K) -> Option<bool> {
        self.get(id).map(|n| n.collapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CheckTree<u32> {
        CheckTree::build([
            NodeRecord::new(1, "banana", None),
            NodeRecord::new(2, "elephant", Some(1)),
            NodeRecord::new(3, "apple", Some(1)),
            NodeRecord::new(4, "jacket", Some(2)),
            NodeRecord::new(5, "dog", Some(2)),
            NodeRecord::new(8, "house", None),
            NodeRecord::new(9, "igloo", Some(8)),
        ])
        .unwrap()
    }

    #[test]
    fn build_preserves_input_order() {
        let tree = sample();
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.roots().collect::<Vec<_>>(), [1, 8]);
        assert_eq!(tree.children_of(1).collect::<Vec<_>>(), [2, 3]);
        assert_eq!(tree.children_of(2).collect::<Vec<_>>(), [4, 5]);
        assert_eq!(tree.parent_of(4), Some(2));
        assert_eq!(tree.parent_of(1), None);
        assert_eq!(
            tree.iter().map(|n| n.id()).collect::<Vec<_>>(),
            [1, 2, 4, 5, 3, 8, 9],
            "iteration is depth-first in display order"
        );
    }

    #[test]
    fn build_accepts_forward_parent_references() {
        let tree = CheckTree::build([
            NodeRecord::new(10, "child", Some(20)),
            NodeRecord::new(20, "parent", None),
        ])
        .unwrap();
        assert_eq!(tree.children_of(20).collect::<Vec<_>>(), [10]);
        assert_eq!(tree.roots().collect::<Vec<_>>(), [20]);
    }

    #[test]
    fn build_rejects_duplicates() {
        let err = CheckTree::build([
            NodeRecord::new(1, "a", None),
            NodeRecord::new(1, "b", None),
        ])
        .unwrap_err();
        assert_eq!(err, TreeError::DuplicateId(1));
    }

    #[test]
    fn build_rejects_dangling_parent() {
        let err = CheckTree::build([
            NodeRecord::new(1, "a", None),
            NodeRecord::new(2, "b", Some(7)),
        ])
        .unwrap_err();
        assert_eq!(err, TreeError::DanglingParent { id: 2, parent: 7 });
    }

    #[test]
    fn build_rejects_cycles() {
        let err = CheckTree::build([NodeRecord::new(1, "self", Some(1))]).unwrap_err();
        assert_eq!(err, TreeError::Cycle(1));

        let err = CheckTree::build([
            NodeRecord::new(1, "root", None),
            NodeRecord::new(2, "a", Some(3)),
            NodeRecord::new(3, "b", Some(2)),
            NodeRecord::new(4, "under the loop", Some(3)),
        ])
        .unwrap_err();
        assert!(
            matches!(err, TreeError::Cycle(2 | 3)),
            "reported id lies on the loop, got {err:?}"
        );
    }

    #[test]
    fn build_seeds_branch_subtrees_and_derives_ancestors() {
        let tree = CheckTree::build([
            NodeRecord::new(1, "root", None),
            NodeRecord::new(2, "branch", Some(1)).with_checked(true),
            NodeRecord::new(3, "leaf", Some(1)),
            NodeRecord::new(4, "a", Some(2)),
            NodeRecord::new(5, "b", Some(2)),
        ])
        .unwrap();
        assert_eq!(tree.checked(4), Some(CheckState::Checked));
        assert_eq!(tree.checked(5), Some(CheckState::Checked));
        assert_eq!(tree.checked(2), Some(CheckState::Checked));
        assert_eq!(tree.checked(1), Some(CheckState::Indeterminate));
    }

    #[test]
    fn build_derives_checked_root_from_leaves() {
        // The root's seed overrides the leaf's own value.
        let tree = CheckTree::build([
            NodeRecord::new(1, "root", None).with_checked(true),
            NodeRecord::new(2, "leaf", Some(1)).with_checked(false),
        ])
        .unwrap();
        assert_eq!(tree.checked(2), Some(CheckState::Checked));
        assert_eq!(tree.checked(1), Some(CheckState::Checked));
    }

    #[test]
    fn queries_on_unknown_ids() {
        let tree = sample();
        assert!(tree.get(42).is_none());
        assert_eq!(tree.checked(42), None);
        assert_eq!(tree.children_of(42).count(), 0);
        assert_eq!(tree.ancestors(42).count(), 0);
        assert_eq!(tree.descendants(42).count(), 0);
    }

    #[test]
    fn ancestors_and_descendants() {
        let tree = sample();
        assert_eq!(tree.ancestors(5).collect::<Vec<_>>(), [2, 1]);
        assert_eq!(tree.descendants(1).collect::<Vec<_>>(), [2, 4, 5, 3]);
        assert_eq!(tree.descendants(4).count(), 0);
    }

    #[test]
    fn collapse_is_a_plain_flag() {
        let mut tree = sample();
        assert_eq!(tree.is_collapsed(2), Some(false), "branches start expanded");
        tree.set_collapsed(2, true).unwrap();
        assert_eq!(tree.is_collapsed(2), Some(true));
        assert_eq!(tree.is_collapsed(4), Some(false), "no cascade to children");
        assert_eq!(tree.toggle_collapsed(2), Ok(false));
        assert_eq!(
            tree.set_collapsed(42, true),
            Err(TreeError::NodeNotFound(42))
        );
    }

    #[test]
    fn insert_under_parent_rederives_ancestors() {
        let mut tree = sample();
        tree.set_checked(2, true).unwrap();
        assert_eq!(tree.checked(2), Some(CheckState::Checked));

        tree.insert(NodeRecord::new(6, "flower", Some(2))).unwrap();
        assert_eq!(tree.children_of(2).collect::<Vec<_>>(), [4, 5, 6]);
        assert_eq!(tree.checked(2), Some(CheckState::Indeterminate));
        assert_eq!(tree.checked(1), Some(CheckState::Indeterminate));
    }

    #[test]
    fn insert_first_child_expands_parent() {
        let mut tree = sample();
        tree.set_collapsed(3, true).unwrap();
        tree.insert(NodeRecord::new(7, "cherry", Some(3))).unwrap();
        assert_eq!(tree.is_collapsed(3), Some(false));
        assert!(tree.get(3).unwrap().is_branch());
    }

    #[test]
    fn insert_rejects_bad_records_without_mutation() {
        let mut tree = sample();
        assert_eq!(
            tree.insert(NodeRecord::new(4, "again", None)),
            Err(TreeError::DuplicateId(4))
        );
        assert_eq!(
            tree.insert(NodeRecord::new(40, "orphan", Some(99))),
            Err(TreeError::DanglingParent { id: 40, parent: 99 })
        );
        assert_eq!(tree.len(), 7);
        assert!(!tree.contains(40));
    }

    #[test]
    fn insert_root_appends() {
        let mut tree = sample();
        tree.insert(NodeRecord::new(30, "zebra", None).with_checked(true))
            .unwrap();
        assert_eq!(tree.roots().collect::<Vec<_>>(), [1, 8, 30]);
        assert_eq!(tree.checked(30), Some(CheckState::Checked));
    }

    #[test]
    fn remove_subtree_and_reuse_slots() {
        let mut tree = sample();
        tree.set_checked(3, true).unwrap();
        assert_eq!(tree.checked(1), Some(CheckState::Indeterminate));

        assert_eq!(tree.remove(2), Ok(3));
        assert!(!tree.contains(4) && !tree.contains(5));
        assert_eq!(tree.children_of(1).collect::<Vec<_>>(), [3]);
        assert_eq!(
            tree.checked(1),
            Some(CheckState::Checked),
            "only the checked child remains"
        );

        tree.insert(NodeRecord::new(11, "kiwi", Some(1))).unwrap();
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.checked(1), Some(CheckState::Indeterminate));
    }

    #[test]
    fn remove_last_child_clears_indeterminate() {
        let mut tree = sample();
        tree.set_checked(4, true).unwrap();
        assert_eq!(tree.checked(2), Some(CheckState::Indeterminate));
        tree.remove(4).unwrap();
        assert_eq!(tree.checked(2), Some(CheckState::Unchecked));
        tree.remove(5).unwrap();
        assert_eq!(
            tree.checked(2),
            Some(CheckState::Unchecked),
            "a childless former branch is a leaf"
        );
        assert_eq!(tree.checked(1), Some(CheckState::Unchecked));
    }

    #[test]
    fn remove_root() {
        let mut tree = sample();
        assert_eq!(tree.remove(8), Ok(2));
        assert_eq!(tree.roots().collect::<Vec<_>>(), [1]);
        assert_eq!(tree.remove(8), Err(TreeError::NodeNotFound(8)));
    }

    #[test]
    fn checked_selection_queries() {
        let mut tree = sample();
        tree.set_checked(2, true).unwrap();
        assert_eq!(tree.checked_ids().collect::<Vec<_>>(), [2, 4, 5]);
        assert_eq!(tree.checked_leaves().collect::<Vec<_>>(), [4, 5]);
    }
}
