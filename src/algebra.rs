// SPDX-License-Identifier: MPL-2.0

//! Set algebra.
//!
//! Every operation builds a new set and leaves its operands untouched.
//! Results never carry a rule, whatever the rules of the operands.
//!
//! Operations come in two flavors:
//!  - instance methods taking typed operands, which cannot fail,
//!  - associated functions taking [Values](Value), as a dynamic caller would pass them.
//!    They check that every argument is a set before computing anything,
//!    and report the position of the first one that is not.

use log::debug;

use crate::error::SetError;
use crate::resolve::resolve;
use crate::set::ExtendedSet;
use crate::type_aliases::Rendered;
use crate::value::{List, Value};

/// The set in `value`, or a [SetError::TypeMismatch] naming its position.
pub(crate) fn expect_set(value: &Value, position: usize) -> Result<&ExtendedSet, SetError> {
    match value {
        Value::Set(set) => Ok(set),
        other => Err(SetError::TypeMismatch {
            position,
            found: other.kind(),
        }),
    }
}

fn expect_sets(values: &[Value]) -> Result<Vec<&ExtendedSet>, SetError> {
    values
        .iter()
        .enumerate()
        .map(|(position, value)| expect_set(value, position))
        .collect()
}

/// Operations that only make sense between exactly two sets,
/// when called through [ExtendedSet::invoke].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// [ExtendedSet::union]
    Union,
    /// [ExtendedSet::intersect]
    Intersect,
    /// [ExtendedSet::cartesian_product]
    CartesianProduct,
}

/// Typed operations.
impl ExtendedSet {
    /// Elements of either set.
    pub fn union(&self, other: &ExtendedSet) -> ExtendedSet {
        let result = self.shallow_copy();
        for value in other.iter() {
            result.insert_unchecked(value);
        }
        result
    }

    /// Elements of both sets.
    pub fn intersect(&self, other: &ExtendedSet) -> ExtendedSet {
        let (small, big) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        let result = ExtendedSet::new();
        for value in small.iter() {
            if big.has(&value) {
                result.push_distinct(value);
            }
        }
        result
    }

    /// Elements of this set that are not in `other`.
    pub fn minus(&self, other: &ExtendedSet) -> ExtendedSet {
        let result = ExtendedSet::new();
        for value in self.iter() {
            if !other.has(&value) {
                result.push_distinct(value);
            }
        }
        result
    }

    /// Elements of exactly one of both sets.
    pub fn symmetric_difference(&self, other: &ExtendedSet) -> ExtendedSet {
        let result = self.minus(other);
        // Both halves are disjoint.
        for value in other.minus(self).iter() {
            result.push_distinct(value);
        }
        result
    }

    /// Ordered pairs `[a, b]` of an element of this set and an element of `other`.
    ///
    /// Not commutative: the pairs of `A × B` and `B × A` are reversed.
    pub fn cartesian_product(&self, other: &ExtendedSet) -> ExtendedSet {
        let others = other.to_vec();
        set_of_tuples(
            self.iter()
                .flat_map(|a| others.iter().map(move |b| vec![a.clone(), b.clone()])),
        )
    }

    /// Every subset of this set, from the empty set to the set itself.
    ///
    /// A set of `n` elements has `2^n` subsets,
    /// so both time and memory are exponential in the size of the set.
    pub fn power_set(&self) -> ExtendedSet {
        debug!(
            "power set of {} elements, 2^{} subsets",
            self.len(),
            self.len()
        );
        power_set_of(self)
    }

    /// Call a binary operation with a dynamic argument list,
    /// which must be made of exactly one set.
    pub fn invoke(&self, op: BinaryOp, args: &[Value]) -> Result<ExtendedSet, SetError> {
        let [other] = args else {
            return Err(SetError::ArityMismatch {
                expected: 1,
                found: args.len(),
            });
        };
        let other = expect_set(other, 0)?;
        Ok(match op {
            BinaryOp::Union => self.union(other),
            BinaryOp::Intersect => self.intersect(other),
            BinaryOp::CartesianProduct => self.cartesian_product(other),
        })
    }
}

/// Build a set of fresh lists, one per tuple.
///
/// Fresh lists never share a reference, so two of them are the same member exactly when
/// they render alike: each tuple is resolved once instead of being compared to every other.
fn set_of_tuples(tuples: impl IntoIterator<Item = Vec<Value>>) -> ExtendedSet {
    let mut seen = Rendered::default();
    let result = ExtendedSet::new();
    for tuple in tuples {
        let tuple = Value::from(List::new(tuple));
        if seen.insert(resolve(&tuple).to_string()) {
            result.push_distinct(tuple);
        }
    }
    result
}

/// P(S) = P(T) ∪ { X ∪ {e} | X ∈ P(T) } where T = S \ {e}.
fn power_set_of(set: &ExtendedSet) -> ExtendedSet {
    let Some(element) = set.any() else {
        return ExtendedSet::from_values([ExtendedSet::new()]);
    };
    let rest = set.shallow_copy();
    rest.remove(&element);

    let without = power_set_of(&rest);
    let result = without.shallow_copy();
    for subset in without.iter() {
        if let Value::Set(subset) = subset {
            let with = subset.shallow_copy();
            // No subset of T holds e, and each one gives a distinct subset holding e.
            with.push_distinct(element.clone());
            result.push_distinct(with.into());
        }
    }
    result
}

/// Dynamic operations.
impl ExtendedSet {
    /// Elements of any of the given sets. No set at all gives the empty set.
    pub fn union_all(sets: &[Value]) -> Result<ExtendedSet, SetError> {
        let sets = expect_sets(sets)?;
        let Some((first, others)) = sets.split_first() else {
            return Ok(ExtendedSet::new());
        };
        let result = first.shallow_copy();
        for set in others {
            for value in set.iter() {
                result.insert_unchecked(value);
            }
        }
        Ok(result)
    }

    /// Elements common to all the given sets.
    ///
    /// Fails without sets, since there is no universe to intersect.
    pub fn intersection(sets: &[Value]) -> Result<ExtendedSet, SetError> {
        let sets = expect_sets(sets)?;
        let Some(smallest) = sets.iter().min_by_key(|set| set.len()) else {
            return Err(SetError::UnsupportedCardinality {
                operation: "intersection",
                minimum: 1,
                found: 0,
            });
        };
        let result = ExtendedSet::new();
        for value in smallest.iter() {
            if sets.iter().all(|set| set.has(&value)) {
                result.push_distinct(value);
            }
        }
        Ok(result)
    }

    /// Relative complement `a \ b`.
    pub fn difference(a: &Value, b: &Value) -> Result<ExtendedSet, SetError> {
        let a = expect_set(a, 0)?;
        let b = expect_set(b, 1)?;
        Ok(a.minus(b))
    }

    /// Complement of `set` in `universe`.
    ///
    /// Fails if `set` has an element outside of `universe`.
    pub fn complement(universe: &Value, set: &Value) -> Result<ExtendedSet, SetError> {
        let universe = expect_set(universe, 0)?;
        let set = expect_set(set, 1)?;
        if let Some(outsider) = set.iter().find(|value| !universe.has(value)) {
            debug!("complement refused, {outsider} is outside of the universe");
            return Err(SetError::UniverseViolation { value: outsider });
        }
        Ok(universe.minus(set))
    }

    /// Symmetric difference of at least two sets, reduced from left to right.
    ///
    /// The result holds the elements present in an odd number of the sets.
    pub fn sym_diff(sets: &[Value]) -> Result<ExtendedSet, SetError> {
        let sets = expect_sets(sets)?;
        let [first, second, rest @ ..] = sets.as_slice() else {
            return Err(SetError::UnsupportedCardinality {
                operation: "symmetric difference",
                minimum: 2,
                found: sets.len(),
            });
        };
        let mut result = first.symmetric_difference(second);
        for set in rest {
            result = result.symmetric_difference(set);
        }
        Ok(result)
    }

    /// Binary cartesian product `a × b`.
    pub fn cartesian(a: &Value, b: &Value) -> Result<ExtendedSet, SetError> {
        let a = expect_set(a, 0)?;
        let b = expect_set(b, 1)?;
        Ok(a.cartesian_product(b))
    }

    /// Tuples taking their i-th element from the i-th set.
    ///
    /// No set at all gives the set of the empty tuple, and a single set gives singleton tuples.
    /// Nesting binary products is not equivalent: `(A × B) × C` holds pairs whose first
    /// element is itself a pair.
    pub fn cartesian_product_all(sets: &[Value]) -> Result<ExtendedSet, SetError> {
        let sets = expect_sets(sets)?;
        let mut tuples: Vec<Vec<Value>> = vec![Vec::new()];
        for set in sets {
            let elements = set.to_vec();
            tuples = tuples
                .iter()
                .flat_map(|tuple| {
                    elements.iter().map(move |element| {
                        let mut longer = tuple.clone();
                        longer.push(element.clone());
                        longer
                    })
                })
                .collect();
        }
        Ok(set_of_tuples(tuples))
    }

    /// Every subset of the given set. See [power_set](ExtendedSet::power_set).
    pub fn power(set: &Value) -> Result<ExtendedSet, SetError> {
        Ok(expect_set(set, 0)?.power_set())
    }
}
