// SPDX-License-Identifier: MPL-2.0

//! Inclusion and equality between sets.

use crate::algebra::expect_set;
use crate::error::SetError;
use crate::membership;
use crate::set::ExtendedSet;
use crate::value::Value;

impl ExtendedSet {
    /// Whether every element of `other` is an element of this set.
    pub fn is_superset_of(&self, other: &ExtendedSet) -> bool {
        membership::is_superset(self, other)
    }

    /// Whether every element of this set is an element of `other`.
    pub fn is_subset_of(&self, other: &ExtendedSet) -> bool {
        other.is_superset_of(self)
    }

    /// Superset, but not equal.
    pub fn proper_superset_of(&self, other: &ExtendedSet) -> bool {
        self.len() != other.len() && self.is_superset_of(other)
    }

    /// Subset, but not equal.
    pub fn proper_subset_of(&self, other: &ExtendedSet) -> bool {
        self.len() != other.len() && self.is_subset_of(other)
    }

    /// Whether both sets have the same elements, compared structurally.
    pub fn equal(&self, other: &ExtendedSet) -> bool {
        membership::equal(self, other)
    }

    /// Same as [equal](ExtendedSet::equal), for a value that may not be a set.
    pub fn try_equal(&self, other: &Value) -> Result<bool, SetError> {
        Ok(self.equal(expect_set(other, 0)?))
    }
}

impl PartialEq for ExtendedSet {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}
