// SPDX-License-Identifier: MPL-2.0

//! Sets with structural membership.
//!
//! A native hash set decides membership by identity for anything that is not a primitive:
//! two distinct lists `[1, 2]` are two elements, and so are two sets holding the same values.
//! An [ExtendedSet](set::ExtendedSet) decides membership by structure instead,
//! which makes sets of sets behave like they do in mathematics,
//! and brings the usual set algebra on top of it.
//!
//! # Values
//!
//! Elements are [Values](value::Value), a closed type covering
//! primitives (numbers, strings, booleans, null and undefined),
//! and shared handles to lists, records, functions, and other sets.
//! Handles may form cycles, including sets containing themselves.
//!
//! Two elements are the same member if:
//!  - they are primitives with the same value (`NaN` is equal to itself, `0` to `-0`),
//!  - they are the same handle,
//!  - they are sets with the same members,
//!  - they are lists, records, or functions with the same [canonical form](resolve).
//!
//! # Basic example
//!
//! ```
//! use extended_set::set::ExtendedSet;
//! use extended_set::value::{List, Record, Value};
//!
//! let a = ExtendedSet::from_values([1, 2, 3]);
//! let b = ExtendedSet::from_values([2, 3, 4]);
//! assert_eq!(a.union(&b).len(), 4);
//! assert_eq!(a.intersect(&b), ExtendedSet::from_values([3, 2]));
//!
//! // Structurally equal records are one element.
//! let records = ExtendedSet::from_values([
//!     Record::new([("a", 1), ("b", 2)]),
//!     Record::new([("b", 2), ("a", 1)]),
//! ]);
//! assert_eq!(records.len(), 1);
//!
//! let pairs = ExtendedSet::from_values([1, 2]).cartesian_product(&b);
//! assert!(pairs.has(&List::new([1, 4]).into()));
//! assert_eq!(ExtendedSet::from_values([1, 2, 3]).power_set().len(), 8);
//! ```
//!
//! # Rules
//!
//! A set may be guarded by a [Rule](rule::Rule), a predicate checked on every insertion.
//! Values that do not pass it are rejected with a [SetError](error::SetError),
//! leaving the set unchanged.
//!
//! ```
//! use extended_set::error::SetError;
//! use extended_set::rule::Rule;
//! use extended_set::set::ExtendedSet;
//! use extended_set::value::Value;
//!
//! let integers = Rule::new(|v| matches!(v, Value::Number(n) if n.fract() == 0.0));
//! let set = ExtendedSet::with_rule([1, 2], Some(integers)).unwrap();
//! assert!(matches!(set.add(2.5), Err(SetError::RuleViolation { .. })));
//! assert_eq!(set.len(), 2);
//! ```
//!
//! # Dynamic arguments
//!
//! Associated functions like [union_all](set::ExtendedSet::union_all)
//! or [complement](set::ExtendedSet::complement) take their arguments as [Values](value::Value),
//! the way a dynamically typed caller would pass them,
//! and fail with a [TypeMismatch](error::SetError::TypeMismatch)
//! naming the first argument that is not a set.
//!
//! # Cost
//!
//! Membership is linear in the size of the set, and comparing non-primitive elements
//! resolves them, which is linear in their size.
//! Cartesian products resolve each tuple once, so they stay linear in the size of the result.
//! The power set of `n` elements holds `2^n` subsets:
//! callers are responsible for bounding the size of its input.
//!
//! # Handles and threads
//!
//! Handles are reference counted and not thread safe.
//! Cycles of handles are never freed.

#![warn(missing_docs)]

pub mod algebra;
pub mod error;
pub mod relation;
pub mod resolve;
pub mod rule;
pub mod set;
pub mod value;

mod membership;
mod type_aliases;
