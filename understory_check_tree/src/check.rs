// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Check propagation: downward cascade and upward aggregation.
//!
//! Setting a node to checked or unchecked applies the same value to its whole
//! subtree, then re-derives every ancestor from its immediate children, one
//! level at a time up to the root. Both walks are iterative.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use crate::error::TreeError;
use crate::tree::CheckTree;
use crate::types::CheckState;

impl<K> CheckTree<K> {
    /// Derived state of a branch, or `None` for a leaf.
    pub(crate) fn aggregate_children(&self, slot: usize) -> Option<CheckState> {
        let node = self.node(slot);
        CheckState::aggregate(node.children.iter().map(|&c| self.node(c).checked))
    }

    /// Re-derive `slot` and every ancestor above it.
    ///
    /// Always runs to the root; leaves on the path keep their own value.
    pub(crate) fn reaggregate_from(&mut self, slot: usize) {
        let mut current = Some(slot);
        while let Some(s) = current {
            if let Some(state) = self.aggregate_children(s) {
                self.node_mut(s).checked = state;
            }
            current = self.node(s).parent;
        }
    }

    /// Write `state` to every node in the subtree at `slot`; returns the subtree size.
    fn cascade(&mut self, slot: usize, state: CheckState) -> usize {
        let mut stack: Vec<usize> = Vec::from([slot]);
        let mut count = 0;
        while let Some(s) = stack.pop() {
            let node = self.node_mut(s);
            node.checked = state;
            stack.extend(node.children.iter().copied());
            count += 1;
        }
        count
    }

    /// Whether `slot` and each of its ancestors hold the aggregate of their children.
    fn chain_is_derived(&self, slot: usize) -> bool {
        core::iter::successors(Some(slot), |&s| self.node(s).parent).all(|s| {
            self.aggregate_children(s)
                .is_none_or(|state| state == self.node(s).checked)
        })
    }
}

impl<K> CheckTree<K>
where
    K: Copy + Eq + Hash + Debug,
{
    /// Check or uncheck a node.
    ///
    /// The value is applied to the node and its whole subtree, then every
    /// ancestor is re-derived from its children. Nodes outside the node's
    /// ancestor and descendant chains are untouched. Repeating the call with
    /// the same value leaves the tree unchanged.
    ///
    /// # Errors
    ///
    /// [`TreeError::NodeNotFound`] if the id is unknown; nothing is mutated.
    pub fn set_checked(&mut self, id: K, checked: bool) -> Result<(), TreeError<K>> {
        let slot = self.lookup(id)?;
        let state = CheckState::from_bool(checked);
        let touched = self.cascade(slot, state);
        if let Some(parent) = self.node(slot).parent {
            self.reaggregate_from(parent);
        }
        debug_assert!(
            self.chain_is_derived(slot),
            "ancestors of {id:?} are not derived from their children"
        );
        tracing::trace!(?id, ?state, touched, "set check state");
        Ok(())
    }

    /// Assign a check state.
    ///
    /// Same as [`CheckTree::set_checked`] for [`CheckState::Checked`] and
    /// [`CheckState::Unchecked`].
    ///
    /// # Errors
    ///
    /// - [`TreeError::NodeNotFound`] if the id is unknown.
    /// - [`TreeError::InvalidCheckValue`] for [`CheckState::Indeterminate`],
    ///   which only ever arises from aggregation.
    ///
    /// Either way nothing is mutated.
    pub fn set_state(&mut self, id: K, state: CheckState) -> Result<(), TreeError<K>> {
        match state {
            CheckState::Checked => self.set_checked(id, true),
            CheckState::Unchecked => self.set_checked(id, false),
            CheckState::Indeterminate => {
                self.lookup(id)?;
                tracing::debug!(?id, "rejected direct indeterminate assignment");
                Err(TreeError::InvalidCheckValue(id))
            }
        }
    }

    /// Apply a checkbox click; returns the node's new state.
    ///
    /// See [`CheckState::toggled`] for the mapping.
    ///
    /// # Errors
    ///
    /// [`TreeError::NodeNotFound`] if the id is unknown.
    pub fn toggle(&mut self, id: K) -> Result<CheckState, TreeError<K>> {
        let slot = self.lookup(id)?;
        let next = self.node(slot).checked.toggled();
        self.set_state(id, next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::{CheckState, CheckTree, NodeRecord, TreeError};

    // 1 banana
    // ├── 2 elephant
    // │   ├── 4 jacket
    // │   └── 5 dog
    // └── 3 apple
    //     ├── 6 grape
    //     └── 7 cherry
    // 8 house
    // └── 9 igloo
    fn sample() -> CheckTree<u32> {
        CheckTree::build([
            NodeRecord::new(1, "banana", None),
            NodeRecord::new(2, "elephant", Some(1)),
            NodeRecord::new(3, "apple", Some(1)),
            NodeRecord::new(4, "jacket", Some(2)),
            NodeRecord::new(5, "dog", Some(2)),
            NodeRecord::new(6, "grape", Some(3)),
            NodeRecord::new(7, "cherry", Some(3)),
            NodeRecord::new(8, "house", None),
            NodeRecord::new(9, "igloo", Some(8)),
        ])
        .unwrap()
    }

    fn state(tree: &CheckTree<u32>, id: u32) -> CheckState {
        tree.checked(id).unwrap()
    }

    #[test]
    fn cascade_reaches_every_descendant() {
        let mut tree = sample();
        tree.set_checked(1, true).unwrap();
        for id in 1..=7 {
            assert_eq!(state(&tree, id), CheckState::Checked, "node {id}");
        }
        assert_eq!(
            state(&tree, 8),
            CheckState::Unchecked,
            "other roots are untouched"
        );

        tree.set_checked(1, false).unwrap();
        assert!(
            (1..=7).all(|id| state(&tree, id) == CheckState::Unchecked),
            "unchecking clears the subtree"
        );
    }

    #[test]
    fn cascade_overwrites_mixed_subtree() {
        let mut tree = sample();
        tree.set_checked(4, true).unwrap();
        tree.set_checked(6, true).unwrap();
        assert_eq!(state(&tree, 1), CheckState::Indeterminate);

        tree.set_checked(1, true).unwrap();
        assert!((1..=7).all(|id| state(&tree, id) == CheckState::Checked));
    }

    #[test]
    fn aggregation_climbs_every_level() {
        let mut tree = sample();
        tree.set_checked(4, true).unwrap();
        assert_eq!(state(&tree, 2), CheckState::Indeterminate);
        assert_eq!(state(&tree, 1), CheckState::Indeterminate);

        tree.set_checked(4, false).unwrap();
        assert_eq!(state(&tree, 2), CheckState::Unchecked);
        assert_eq!(
            state(&tree, 1),
            CheckState::Unchecked,
            "all-unchecked children force the ancestor unchecked"
        );
    }

    #[test]
    fn indeterminate_child_propagates_up() {
        let mut tree = sample();
        tree.set_checked(3, true).unwrap();
        tree.set_checked(4, true).unwrap();
        // 2 is mixed, 3 is checked: 1 must still be mixed.
        assert_eq!(state(&tree, 2), CheckState::Indeterminate);
        assert_eq!(state(&tree, 1), CheckState::Indeterminate);

        tree.set_checked(5, true).unwrap();
        assert_eq!(state(&tree, 2), CheckState::Checked);
        assert_eq!(state(&tree, 1), CheckState::Checked);
    }

    #[test]
    fn repeated_set_is_idempotent() {
        let mut tree = sample();
        tree.set_checked(2, true).unwrap();
        let before: Vec<_> = tree.iter().map(|n| (n.id(), n.checked())).collect();
        tree.set_checked(2, true).unwrap();
        let after: Vec<_> = tree.iter().map(|n| (n.id(), n.checked())).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn unknown_id_is_rejected_without_mutation() {
        let mut tree = sample();
        tree.set_checked(4, true).unwrap();
        let before: Vec<_> = tree.iter().map(|n| n.checked()).collect();
        assert_eq!(tree.set_checked(99, true), Err(TreeError::NodeNotFound(99)));
        assert_eq!(tree.toggle(99), Err(TreeError::NodeNotFound(99)));
        let after: Vec<_> = tree.iter().map(|n| n.checked()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn indeterminate_cannot_be_assigned() {
        let mut tree = sample();
        assert_eq!(
            tree.set_state(2, CheckState::Indeterminate),
            Err(TreeError::InvalidCheckValue(2))
        );
        assert_eq!(
            tree.set_state(99, CheckState::Indeterminate),
            Err(TreeError::NodeNotFound(99)),
            "unknown ids are reported first"
        );
        assert!(tree.iter().all(|n| n.checked() == CheckState::Unchecked));

        tree.set_state(2, CheckState::Checked).unwrap();
        assert_eq!(state(&tree, 5), CheckState::Checked);
    }

    #[test]
    fn toggle_follows_click_semantics() {
        let mut tree = sample();
        assert_eq!(tree.toggle(4), Ok(CheckState::Checked));
        assert_eq!(state(&tree, 2), CheckState::Indeterminate);

        // Clicking the mixed branch clears it.
        assert_eq!(tree.toggle(2), Ok(CheckState::Unchecked));
        assert_eq!(state(&tree, 4), CheckState::Unchecked);

        assert_eq!(tree.toggle(2), Ok(CheckState::Checked));
        assert_eq!(tree.toggle(2), Ok(CheckState::Unchecked));
    }

    #[test]
    fn deep_chain_does_not_recurse() {
        let depth = 10_000_u32;
        let records = (0..depth).map(|i| NodeRecord::new(i, "n", i.checked_sub(1)));
        let mut tree = CheckTree::build(records).unwrap();
        tree.set_checked(depth - 1, true).unwrap();
        assert_eq!(state(&tree, 0), CheckState::Checked);
        tree.set_checked(0, false).unwrap();
        assert_eq!(state(&tree, depth - 1), CheckState::Unchecked);
    }
}
