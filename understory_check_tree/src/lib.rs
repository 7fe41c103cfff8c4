// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_check_tree --heading-base-level=0

//! Understory Check Tree: headless state for tri-state checkbox trees.
//!
//! This crate is the state engine behind a hierarchical picker (files, categories, scopes) where
//! each row has a checkbox that can be checked, unchecked, or indeterminate. It keeps three pieces
//! of derived state consistent under mutation:
//!
//! - **Check state**: checking a node applies to its whole subtree, and every ancestor is derived
//!   from its children (all checked, all unchecked, or indeterminate).
//! - **Filter visibility**: a label search yields a read-only [`Projection`] containing every
//!   match, every descendant of a match, and the ancestor path of each match.
//! - **Collapse**: a per-node flag, tracked independently so that clearing a filter restores the
//!   previous collapse view exactly.
//!
//! It does not render anything, handle keys, or load data. Hosts convert their source list into
//! [`NodeRecord`]s, call into the tree in response to user actions, and redraw from
//! [`CheckTree::rows`] or [`Projection::rows`].
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_check_tree::{CheckState, CheckTree, FilterOptions, NodeRecord};
//!
//! let mut tree = CheckTree::build([
//!     NodeRecord::new(1, "banana", None),
//!     NodeRecord::new(2, "elephant", Some(1)),
//!     NodeRecord::new(3, "apple", Some(1)),
//!     NodeRecord::new(4, "jacket", Some(2)),
//!     NodeRecord::new(5, "dog", Some(2)),
//! ])
//! .unwrap();
//!
//! tree.set_checked(4, true).unwrap();
//! assert_eq!(tree.checked(2), Some(CheckState::Indeterminate));
//! assert_eq!(tree.checked(1), Some(CheckState::Indeterminate));
//!
//! // Filtering reads the same check values and never changes them.
//! let view = tree.project("apple", FilterOptions::new());
//! assert_eq!(view.visible_ids().collect::<Vec<_>>(), [1, 3]);
//! assert_eq!(view.get(1).unwrap().checked(), CheckState::Indeterminate);
//! ```
//!
//! ## API overview
//!
//! - [`CheckTree`]: the node store. Build it with [`CheckTree::build`]; mutate it with
//!   [`CheckTree::set_checked`], [`CheckTree::toggle`], [`CheckTree::set_collapsed`],
//!   [`CheckTree::insert`], and [`CheckTree::remove`].
//! - [`CheckState`]: the tri-state value. [`CheckState::Indeterminate`] only ever comes from
//!   aggregation; [`CheckTree::set_state`] rejects it with [`TreeError::InvalidCheckValue`].
//! - [`Projection`]: the filtered view from [`CheckTree::project`], configured by
//!   [`FilterOptions`]. Each visible node reports its [`Inclusion`] reasons.
//! - [`Row`]: a flattened, depth-annotated line for rendering.
//! - [`TreeError`]: every fallible operation either succeeds or leaves the tree unchanged.
//!
//! ## Concurrency
//!
//! All operations are synchronous and run to completion. A [`Projection`] borrows its tree, so
//! the borrow checker rules out mutation while a projection is being read. Hosts sharing a tree
//! across threads wrap it in a single lock.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support in dependencies.
//! - `serde`: derives `Serialize`/`Deserialize` for [`NodeRecord`] and [`CheckState`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod check;
mod error;
mod filter;
mod rows;
mod tree;
mod types;

pub use error::TreeError;
pub use filter::{FilterOptions, Inclusion, ProjectedNode, Projection};
pub use rows::Row;
pub use tree::{CheckTree, NodeRef};
pub use types::{CheckState, NodeRecord};
