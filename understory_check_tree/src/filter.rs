// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Filter projection: the read-only view of a tree under a label search.
//!
//! A projection keeps every node whose label contains the search term, every
//! descendant of such a node, and every ancestor on the way to a root. Nodes
//! kept only as ancestors show just their visible children. The tree itself
//! is never touched; check and collapse values are read straight from it.

use alloc::{borrow::Cow, string::String, vec, vec::Vec};
use core::fmt::Debug;
use core::hash::Hash;

use crate::tree::CheckTree;
use crate::types::CheckState;

bitflags::bitflags! {
    /// Why a node is visible in a [`Projection`].
    ///
    /// A hidden node has no flags. A node can be visible for several reasons at once.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Inclusion: u8 {
        /// The label contains the search term.
        const MATCHED    = 0b0000_0001;
        /// Some ancestor's label contains the search term.
        const DESCENDANT = 0b0000_0010;
        /// Some descendant's label contains the search term.
        const ANCESTOR   = 0b0000_0100;
    }
}

/// Options controlling label matching.
///
/// The default is case-insensitive matching.
///
/// ```rust
/// use understory_check_tree::FilterOptions;
///
/// assert!(!FilterOptions::new().case_sensitive);
/// assert!(FilterOptions::new().case_sensitive().case_sensitive);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Compare labels and terms exactly instead of after Unicode lowercasing.
    pub case_sensitive: bool,
}

impl FilterOptions {
    /// Create the default options (case-insensitive).
    pub fn new() -> Self {
        Self::default()
    }

    /// Match case exactly.
    #[must_use]
    pub fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }

    /// Ignore case.
    #[must_use]
    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    /// Whether `label` contains `term` under these options.
    ///
    /// For case-insensitive matching `term` must already be lowercased.
    fn label_matches(self, label: &str, term: &str) -> bool {
        if self.case_sensitive {
            label.contains(term)
        } else {
            label.to_lowercase().contains(term)
        }
    }
}

/// Read-only projection of a [`CheckTree`] under a search term.
///
/// Built fresh by [`CheckTree::project`]. It borrows the tree, so the tree
/// cannot change while a projection is alive.
pub struct Projection<'a, K> {
    tree: &'a CheckTree<K>,
    term: String,
    options: FilterOptions,
    /// per-slot inclusion; empty means hidden
    inclusion: Vec<Inclusion>,
    roots: Vec<usize>,
    visible: usize,
}

impl<K> Debug for Projection<'_, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Projection")
            .field("term", &self.term)
            .field("options", &self.options)
            .field("visible", &self.visible)
            .field("roots", &self.roots.len())
            .finish_non_exhaustive()
    }
}

/// One visible node of a [`Projection`].
#[derive(Clone, Copy)]
pub struct ProjectedNode<'p, K> {
    tree: &'p CheckTree<K>,
    inclusion: &'p [Inclusion],
    slot: usize,
}

impl<K: Debug> Debug for ProjectedNode<'_, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let node = self.tree.node(self.slot);
        f.debug_struct("ProjectedNode")
            .field("id", &node.id)
            .field("label", &node.label)
            .field("checked", &node.checked)
            .field("inclusion", &self.inclusion[self.slot])
            .finish_non_exhaustive()
    }
}

impl<'p, K: Copy> ProjectedNode<'p, K> {
    /// The node's id.
    pub fn id(self) -> K {
        self.tree.node(self.slot).id
    }

    /// The node's display label.
    pub fn label(self) -> &'p str {
        &self.tree.node(self.slot).label
    }

    /// The node's live check state, identical to the unfiltered tree.
    pub fn checked(self) -> CheckState {
        self.tree.node(self.slot).checked
    }

    /// The node's collapsed flag as stored in the tree.
    pub fn collapsed(self) -> bool {
        self.tree.node(self.slot).collapsed
    }

    /// Whether the node has children in the underlying tree.
    pub fn is_branch(self) -> bool {
        self.tree.node(self.slot).is_branch()
    }

    /// Why the node is visible.
    pub fn inclusion(self) -> Inclusion {
        self.inclusion[self.slot]
    }

    /// Whether the node is shown only as context for a deeper match.
    pub fn is_ancestor_only(self) -> bool {
        self.inclusion() == Inclusion::ANCESTOR
    }

    /// Visible children in display order.
    pub fn children(self) -> impl Iterator<Item = K> + 'p {
        let Self {
            tree, inclusion, ..
        } = self;
        tree.node(self.slot)
            .children
            .iter()
            .filter(move |&&c| !inclusion[c].is_empty())
            .map(move |&c| tree.node(c).id)
    }
}

impl<K> CheckTree<K>
where
    K: Copy + Eq + Hash + Debug,
{
    /// Project the tree under a search term.
    ///
    /// A node is visible when its label contains `term`, when an ancestor's
    /// label does, or when a descendant's label does. An empty term matches
    /// every node, so the projection is the whole tree. Runs in time linear in
    /// the number of nodes.
    ///
    /// ```rust
    /// use understory_check_tree::{CheckTree, FilterOptions, NodeRecord};
    ///
    /// let tree = CheckTree::build([
    ///     NodeRecord::new(1, "Fruit", None),
    ///     NodeRecord::new(2, "Apple", Some(1)),
    ///     NodeRecord::new(3, "Pear", Some(1)),
    /// ])
    /// .unwrap();
    ///
    /// let view = tree.project("apple", FilterOptions::new());
    /// assert_eq!(view.visible_ids().collect::<Vec<_>>(), [1, 2]);
    /// assert_eq!(view.children_of(1).collect::<Vec<_>>(), [2]);
    ///
    /// let exact = tree.project("apple", FilterOptions::new().case_sensitive());
    /// assert!(exact.is_empty());
    /// ```
    pub fn project(&self, term: &str, options: FilterOptions) -> Projection<'_, K> {
        let needle: Cow<'_, str> = if options.case_sensitive {
            Cow::Borrowed(term)
        } else {
            Cow::Owned(term.to_lowercase())
        };
        let mut inclusion = vec![Inclusion::empty(); self.slot_count()];

        // Matches, and everything under a match.
        let mut stack: Vec<(usize, bool)> =
            self.root_slots().iter().rev().map(|&r| (r, false)).collect();
        let mut matched = Vec::new();
        while let Some((slot, under_match)) = stack.pop() {
            let node = self.node(slot);
            let is_match = options.label_matches(&node.label, &needle);
            if is_match {
                inclusion[slot] |= Inclusion::MATCHED;
                matched.push(slot);
            }
            if under_match {
                inclusion[slot] |= Inclusion::DESCENDANT;
            }
            for &child in node.children.iter().rev() {
                stack.push((child, under_match || is_match));
            }
        }

        // Every path from a match up to its root. A node already marked as an
        // ancestor has its whole chain marked.
        for &slot in &matched {
            let mut current = self.node(slot).parent;
            while let Some(p) = current {
                if inclusion[p].contains(Inclusion::ANCESTOR) {
                    break;
                }
                inclusion[p] |= Inclusion::ANCESTOR;
                current = self.node(p).parent;
            }
        }

        let roots: Vec<usize> = self
            .root_slots()
            .iter()
            .copied()
            .filter(|&r| !inclusion[r].is_empty())
            .collect();
        let visible = inclusion.iter().filter(|i| !i.is_empty()).count();
        tracing::trace!(term, visible, matched = matched.len(), "projected tree");

        Projection {
            tree: self,
            term: String::from(term),
            options,
            inclusion,
            roots,
            visible,
        }
    }
}

impl<'a, K> Projection<'a, K>
where
    K: Copy + Eq + Hash + Debug,
{
    /// The search term this projection was built for.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// The options this projection was built with.
    pub fn options(&self) -> FilterOptions {
        self.options
    }

    /// Whether a non-empty term is active.
    ///
    /// An empty term projects the whole tree.
    pub fn is_filtered(&self) -> bool {
        !self.term.is_empty()
    }

    /// Number of visible nodes.
    pub fn len(&self) -> usize {
        self.visible
    }

    /// Returns `true` if nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.visible == 0
    }

    /// The tree this projection views.
    pub fn tree(&self) -> &'a CheckTree<K> {
        self.tree
    }

    fn slot_of(&self, id: K) -> Option<usize> {
        let slot = self.tree.slot(id)?;
        (!self.inclusion[slot].is_empty()).then_some(slot)
    }

    pub(crate) fn is_visible_slot(&self, slot: usize) -> bool {
        !self.inclusion[slot].is_empty()
    }

    pub(crate) fn visible_root_slots(&self) -> &[usize] {
        &self.roots
    }

    /// Returns `true` if the node is visible.
    pub fn contains(&self, id: K) -> bool {
        self.slot_of(id).is_some()
    }

    /// View a visible node; `None` if it is hidden or unknown.
    pub fn get(&self, id: K) -> Option<ProjectedNode<'_, K>> {
        let slot = self.slot_of(id)?;
        Some(ProjectedNode {
            tree: self.tree,
            inclusion: &self.inclusion,
            slot,
        })
    }

    /// Visible root ids in display order.
    pub fn roots(&self) -> impl Iterator<Item = K> + '_ {
        self.roots.iter().map(|&r| self.tree.node(r).id)
    }

    /// Visible children of a node in display order; empty if it is hidden.
    pub fn children_of(&self, id: K) -> impl Iterator<Item = K> + '_ {
        self.get(id).into_iter().flat_map(|n| n.children())
    }

    /// Every visible node in depth-first display order.
    pub fn iter(&self) -> impl Iterator<Item = ProjectedNode<'_, K>> + '_ {
        self.tree
            .walk(&self.roots, |s| self.is_visible_slot(s), false)
            .map(|(slot, _)| ProjectedNode {
                tree: self.tree,
                inclusion: &self.inclusion,
                slot,
            })
    }

    /// Ids of every visible node in depth-first display order.
    pub fn visible_ids(&self) -> impl Iterator<Item = K> + '_ {
        self.iter().map(|n| n.id())
    }

    /// Ids of the nodes whose own label matched, in depth-first display order.
    pub fn matches(&self) -> impl Iterator<Item = K> + '_ {
        self.iter()
            .filter(|n| n.inclusion().contains(Inclusion::MATCHED))
            .map(|n| n.id())
    }
}
