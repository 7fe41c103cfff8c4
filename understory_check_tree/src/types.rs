// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the check tree: check states and input records.

use alloc::string::String;

/// Tri-state value of a node's checkbox.
///
/// [`CheckState::Indeterminate`] is never set directly by a caller. It only
/// arises when a branch aggregates children that are not uniformly checked.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum CheckState {
    /// Not checked. Every descendant is unchecked too.
    #[default]
    Unchecked,
    /// Checked. Every descendant is checked too.
    Checked,
    /// Mixed descendants.
    Indeterminate,
}

impl CheckState {
    /// Map a direct user choice onto a check state.
    pub const fn from_bool(checked: bool) -> Self {
        if checked { Self::Checked } else { Self::Unchecked }
    }

    /// Returns `true` only for [`CheckState::Checked`].
    pub const fn is_checked(self) -> bool {
        matches!(self, Self::Checked)
    }

    /// Returns `true` only for [`CheckState::Indeterminate`].
    pub const fn is_indeterminate(self) -> bool {
        matches!(self, Self::Indeterminate)
    }

    /// The state a click on the checkbox requests.
    ///
    /// Unchecked becomes checked. Checked and indeterminate both clear, so
    /// clicking a mixed branch unchecks its whole subtree.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Unchecked => Self::Checked,
            Self::Checked | Self::Indeterminate => Self::Unchecked,
        }
    }

    /// Aggregate the states of a branch's immediate children.
    ///
    /// - all children checked → [`CheckState::Checked`]
    /// - all children unchecked → [`CheckState::Unchecked`]
    /// - anything else → [`CheckState::Indeterminate`]
    ///
    /// Returns `None` when there are no children; a leaf has no derived state.
    ///
    /// ```rust
    /// use understory_check_tree::CheckState;
    ///
    /// let mixed = [CheckState::Checked, CheckState::Unchecked];
    /// assert_eq!(CheckState::aggregate(mixed), Some(CheckState::Indeterminate));
    ///
    /// let leaf: [CheckState; 0] = [];
    /// assert_eq!(CheckState::aggregate(leaf), None);
    /// ```
    pub fn aggregate<I>(children: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut iter = children.into_iter();
        let first = iter.next()?;
        if first.is_indeterminate() {
            return Some(Self::Indeterminate);
        }
        for state in iter {
            if state != first {
                return Some(Self::Indeterminate);
            }
        }
        Some(first)
    }
}

impl From<bool> for CheckState {
    fn from(checked: bool) -> Self {
        Self::from_bool(checked)
    }
}

/// One flat input record for [`CheckTree::build`](crate::CheckTree::build).
///
/// `parent` is `None` for root-level nodes. Records may reference parents that
/// appear later in the input.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeRecord<K> {
    /// Unique id of the node.
    pub id: K,
    /// Display label; filtering matches against it.
    pub label: String,
    /// Id of the owning node, or `None` for a root.
    #[cfg_attr(feature = "serde", serde(default, alias = "parentId"))]
    pub parent: Option<K>,
    /// Initial check value; `None` means unchecked.
    #[cfg_attr(feature = "serde", serde(default))]
    pub checked: Option<bool>,
}

impl<K> NodeRecord<K> {
    /// Create a record with no initial check value.
    pub fn new(id: K, label: impl Into<String>, parent: Option<K>) -> Self {
        Self {
            id,
            label: label.into(),
            parent,
            checked: None,
        }
    }

    /// Set the initial check value.
    #[must_use]
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }
}
