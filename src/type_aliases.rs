// SPDX-License-Identifier: MPL-2.0

//! Crate-wide type aliases.

/// Addresses of the handles visited during one traversal.
pub(crate) type Visited = rustc_hash::FxHashSet<usize>;

/// Pairs of set addresses whose comparison is in progress.
pub(crate) type PendingPairs = rustc_hash::FxHashSet<(usize, usize)>;

/// Canonical renderings already met while building a set.
pub(crate) type Rendered = rustc_hash::FxHashSet<String>;
