// SPDX-License-Identifier: MPL-2.0

//! The [ExtendedSet] container.
//!
//! An extended set is an unordered collection of unique [Values](Value),
//! where uniqueness is decided by structural equality rather than by reference:
//! two distinct lists `[1, 2]` are the same element, and so are two distinct sets `{1, 2}`.
//! See [ExtendedSet::has] for the exact equality used.
//!
//! An [ExtendedSet] is a shared handle. Cloning it gives another handle to the same set,
//! which is what nesting a set inside another one does.
//! Use [ExtendedSet::shallow_copy] for a new set with the same elements.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use log::debug;
use rand::Rng;

use crate::error::SetError;
use crate::membership;
use crate::rule::Rule;
use crate::value::Value;

#[derive(Default)]
struct SetInner {
    /// Insertion order is kept, but carries no meaning.
    elements: Vec<Value>,
    rule: Option<Rule>,
}

/// A set with structural membership, set algebra, and an optional rule gating insertions.
#[derive(Clone, Default)]
pub struct ExtendedSet(Rc<RefCell<SetInner>>);

/// Construction.
impl ExtendedSet {
    /// The empty set Ø.
    pub fn new() -> Self {
        Self::default()
    }

    /// A set of the given elements, guarded by an optional rule.
    ///
    /// The rule is attached before the elements are added,
    /// so construction fails if one of them does not pass it.
    pub fn with_rule<I, V>(elements: I, rule: Option<Rule>) -> Result<Self, SetError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let set = Self::new();
        if let Some(rule) = rule {
            set.set_rules(rule);
        }
        for element in elements {
            set.add(element)?;
        }
        Ok(set)
    }

    /// A set of the given values, without rule.
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let set = Self::new();
        for value in values {
            set.insert_unchecked(value.into());
        }
        set
    }

    /// Wrap a value in a singleton set, unless it already is a set.
    ///
    /// Lists are not converted element-wise: a list becomes the single element of the new set.
    pub fn to_set(value: impl Into<Value>) -> Self {
        match value.into() {
            Value::Set(set) => set,
            other => Self::from_values([other]),
        }
    }

    /// A new set holding the elements of the given set, without its rule.
    ///
    /// Elements are shared, not copied: a nested set is the same handle in both sets.
    pub fn copy(source: &Value) -> Result<Self, SetError> {
        Ok(crate::algebra::expect_set(source, 0)?.shallow_copy())
    }

    /// A new set holding the elements of this one, without its rule.
    pub fn shallow_copy(&self) -> Self {
        Self(Rc::new(RefCell::new(SetInner {
            elements: self.0.borrow().elements.clone(),
            rule: None,
        })))
    }
}

/// Basic operations.
impl ExtendedSet {
    /// Add a value to the set.
    ///
    /// Returns whether the value was inserted,
    /// `false` meaning that an equal element was already present.
    /// Fails, leaving the set unchanged, if the value does not pass the rule of the set.
    pub fn add(&self, value: impl Into<Value>) -> Result<bool, SetError> {
        let value = value.into();
        if let Some(rule) = self.rules() {
            if !rule.check(&value) {
                debug!("rejected {value} from a ruled set");
                return Err(SetError::RuleViolation { value });
            }
        }
        Ok(self.insert_unchecked(value))
    }

    /// Insert without consulting the rule. Still deduplicates.
    pub(crate) fn insert_unchecked(&self, value: Value) -> bool {
        if self.has(&value) {
            return false;
        }
        self.0.borrow_mut().elements.push(value);
        true
    }

    /// Push without consulting the rule nor checking membership.
    ///
    /// The caller guarantees that `value` is not already an element.
    pub(crate) fn push_distinct(&self, value: Value) {
        self.0.borrow_mut().elements.push(value);
    }

    /// Remove the element equal to the given value, returning whether there was one.
    pub fn remove(&self, value: &Value) -> bool {
        match membership::position(self, value) {
            Some(idx) => {
                self.0.borrow_mut().elements.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove every element.
    pub fn clear(&self) {
        self.0.borrow_mut().elements.clear();
    }

    /// Whether the set holds the given value.
    ///
    /// Primitives match by value, `NaN` matching `NaN` and `0` matching `-0`.
    /// Handles match if they are the same reference, or if they are sets with the same members,
    /// or lists, records, or functions with the same [canonical form](crate::resolve).
    /// Values of different kinds never match.
    pub fn has(&self, value: &Value) -> bool {
        membership::has(self, value)
    }

    /// Cardinality of the set.
    pub fn len(&self) -> usize {
        self.0.borrow().elements.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().elements.is_empty()
    }

    /// The elements, in arbitrary order.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().elements.clone()
    }

    /// Iterate over a snapshot of the elements, in arbitrary order.
    pub fn iter(&self) -> std::vec::IntoIter<Value> {
        self.to_vec().into_iter()
    }

    /// Call a function on every element.
    pub fn for_each<F: FnMut(&Value)>(&self, mut f: F) {
        for value in self.iter() {
            f(&value);
        }
    }

    /// An arbitrary element, `None` if the set is empty.
    ///
    /// The same element is returned as long as the set is not modified.
    pub fn any(&self) -> Option<Value> {
        self.0.borrow().elements.first().cloned()
    }

    /// An element chosen uniformly at random, `None` if the set is empty.
    pub fn random_element(&self) -> Option<Value> {
        self.random_element_with(&mut rand::rng())
    }

    /// An element chosen uniformly at random with the given generator.
    pub fn random_element_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Value> {
        let inner = self.0.borrow();
        if inner.elements.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..inner.elements.len());
        Some(inner.elements[idx].clone())
    }

    /// Whether both handles point to the same set.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn address(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    pub(crate) fn elements(&self) -> Ref<'_, Vec<Value>> {
        Ref::map(self.0.borrow(), |inner| &inner.elements)
    }
}

/// Rules.
impl ExtendedSet {
    /// The rule attached to the set, if any.
    pub fn rules(&self) -> Option<Rule> {
        self.0.borrow().rule.clone()
    }

    /// Attach a rule to the set, replacing the previous one.
    ///
    /// Elements already in the set are not checked against the new rule.
    pub fn set_rules(&self, rule: Rule) {
        self.0.borrow_mut().rule = Some(rule);
    }

    /// Attach a function value as the rule of the set.
    ///
    /// Fails if the value is not a function.
    pub fn try_set_rules(&self, rule: &Value) -> Result<(), SetError> {
        self.set_rules(Rule::try_from(rule)?);
        Ok(())
    }

    /// A set of the given elements guarded by a function value.
    pub fn with_function_rule<I, V>(elements: I, rule: &Value) -> Result<Self, SetError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::with_rule(elements, Some(Rule::try_from(rule)?))
    }
}

impl<V: Into<Value>> FromIterator<V> for ExtendedSet {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl IntoIterator for &ExtendedSet {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<&ExtendedSet> for Value {
    fn from(set: &ExtendedSet) -> Self {
        Value::Set(set.clone())
    }
}

impl fmt::Display for ExtendedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Set(self.clone()))
    }
}

impl fmt::Debug for ExtendedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExtendedSet{self}")
    }
}
