// SPDX-License-Identifier: MPL-2.0

//! Membership and set equality.
//!
//! Both are mutually recursive: a set is a member of another set
//! if it equals one of its elements, and two sets are equal
//! if they have the same size and one is a subset of the other.
//!
//! For each element `e` compared with a candidate `v`, the first matching rule decides:
//!  1. primitives compare by value, `NaN` equal to `NaN` and `0` equal to `-0`,
//!  2. the same reference matches,
//!  3. two sets match if they are equal,
//!  4. two functions, two lists, or two records match if they resolve to the same
//!     canonical representation,
//!  5. values of different kinds never match.
//!
//! Sets may contain themselves, directly or through other sets.
//! Comparing such sets would recurse forever, so each comparison keeps track of the pairs
//! of sets being compared, and a pair met again while its own comparison is in progress
//! is assumed equal.

use canonical_form::Canonical;
use log::trace;

use crate::resolve::resolve;
use crate::set::ExtendedSet;
use crate::type_aliases::PendingPairs;
use crate::value::{primitive_eq, Value};

/// State of one top-level membership or equality query.
#[derive(Default)]
pub(crate) struct Comparison {
    pending: PendingPairs,
}

impl Comparison {
    /// Whether `set` holds `value`.
    pub(crate) fn has(&mut self, set: &ExtendedSet, value: &Value) -> bool {
        self.position(set, value).is_some()
    }

    /// Index of the element of `set` matching `value`, if any.
    pub(crate) fn position(&mut self, set: &ExtendedSet, value: &Value) -> Option<usize> {
        let elements = set.elements();
        if value.is_primitive() {
            return elements
                .iter()
                .position(|element| primitive_eq(element, value) == Some(true));
        }

        // Resolved at most once, and only if some element needs it.
        let mut candidate: Option<Canonical> = None;
        for (idx, element) in elements.iter().enumerate() {
            if element.same_reference(value) {
                return Some(idx);
            }
            let matched = match (element, value) {
                (Value::Set(e), Value::Set(v)) => self.equal(e, v),
                (Value::Function(_), Value::Function(_))
                | (Value::List(_), Value::List(_))
                | (Value::Record(_), Value::Record(_)) => {
                    let candidate = candidate.get_or_insert_with(|| resolve(value));
                    resolve(element).same_representation(candidate)
                }
                _ => false,
            };
            if matched {
                return Some(idx);
            }
        }
        None
    }

    /// Whether `set` holds every element of `other`.
    pub(crate) fn is_superset(&mut self, set: &ExtendedSet, other: &ExtendedSet) -> bool {
        other.elements().iter().all(|value| self.has(set, value))
    }

    /// Whether both sets have the same elements.
    pub(crate) fn equal(&mut self, a: &ExtendedSet, b: &ExtendedSet) -> bool {
        if a.ptr_eq(b) {
            return true;
        }
        if a.len() != b.len() {
            return false;
        }
        let key = ordered_pair(a.address(), b.address());
        if !self.pending.insert(key) {
            trace!("sets {:#x} and {:#x} already under comparison", key.0, key.1);
            return true;
        }
        // Same size, so one inclusion is enough.
        let result = self.is_superset(b, a);
        self.pending.remove(&key);
        result
    }
}

fn ordered_pair(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Whether `set` holds `value`.
pub(crate) fn has(set: &ExtendedSet, value: &Value) -> bool {
    Comparison::default().has(set, value)
}

/// Index of the element of `set` matching `value`, if any.
pub(crate) fn position(set: &ExtendedSet, value: &Value) -> Option<usize> {
    Comparison::default().position(set, value)
}

/// Whether `set` holds every element of `other`.
pub(crate) fn is_superset(set: &ExtendedSet, other: &ExtendedSet) -> bool {
    Comparison::default().is_superset(set, other)
}

/// Whether both sets have the same elements.
pub(crate) fn equal(a: &ExtendedSet, b: &ExtendedSet) -> bool {
    Comparison::default().equal(a, b)
}
