// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flattening into display rows.
//!
//! A renderer typically draws one row per visible node, indented by depth.
//! [`CheckTree::rows`] skips the contents of collapsed branches.
//! [`Projection::rows`] ignores collapse while a search term is active, so
//! every match stays on screen, and honors it again once the term is cleared.

use core::fmt::Debug;
use core::hash::Hash;

use crate::filter::Projection;
use crate::tree::CheckTree;
use crate::types::CheckState;

/// One line of a flattened tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Row<K> {
    /// Node id.
    pub id: K,
    /// Nesting depth; roots are at 0.
    pub depth: usize,
    /// Check state to draw.
    pub checked: CheckState,
    /// Whether to draw an expand/collapse control.
    pub is_branch: bool,
    /// Stored collapsed flag of the node.
    pub collapsed: bool,
}

impl<K> CheckTree<K>
where
    K: Copy + Eq + Hash + Debug,
{
    /// Visible rows of the unfiltered tree, depth-first in display order.
    ///
    /// Descendants of collapsed branches are omitted; the branch row itself is kept.
    pub fn rows(&self) -> impl Iterator<Item = Row<K>> + '_ {
        self.walk(self.root_slots(), |_| true, true)
            .map(|(slot, depth)| self.row(slot, depth))
    }

    fn row(&self, slot: usize, depth: usize) -> Row<K> {
        let node = self.node(slot);
        Row {
            id: node.id,
            depth,
            checked: node.checked,
            is_branch: node.is_branch(),
            collapsed: node.collapsed,
        }
    }
}

impl<K> Projection<'_, K>
where
    K: Copy + Eq + Hash + Debug,
{
    /// Visible rows of the projection, depth-first in display order.
    ///
    /// With an active term every visible node gets a row regardless of
    /// collapse. With an empty term this matches [`CheckTree::rows`].
    pub fn rows(&self) -> impl Iterator<Item = Row<K>> + '_ {
        let tree = self.tree();
        tree.walk(
            self.visible_root_slots(),
            |s| self.is_visible_slot(s),
            !self.is_filtered(),
        )
        .map(move |(slot, depth)| tree.row(slot, depth))
    }
}
