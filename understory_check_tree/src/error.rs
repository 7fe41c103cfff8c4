// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by tree construction and mutation.

/// Error returned by [`CheckTree`](crate::CheckTree) operations.
///
/// Construction errors (`DuplicateId`, `DanglingParent`, `Cycle`) mean no
/// store was created. Operation errors leave the store exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError<K> {
    /// Two records, or a record and an existing node, share an id.
    #[error("duplicate node id {0:?}")]
    DuplicateId(K),
    /// A record names a parent that does not exist.
    #[error("node {id:?} references unknown parent {parent:?}")]
    DanglingParent {
        /// The record carrying the bad reference.
        id: K,
        /// The missing parent.
        parent: K,
    },
    /// Parent links loop back on themselves; the carried id lies on the loop.
    #[error("parent links through node {0:?} form a cycle")]
    Cycle(K),
    /// No node has this id.
    #[error("node {0:?} not found")]
    NodeNotFound(K),
    /// A caller tried to assign the indeterminate state directly.
    #[error("node {0:?} cannot be set indeterminate; that state is derived from children")]
    InvalidCheckValue(K),
}
