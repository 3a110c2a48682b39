// SPDX-License-Identifier: MPL-2.0

//! Rules gate which values may enter a set.
//!
//! A rule is a predicate attached to one set and consulted on every insertion.
//! It is not applied retroactively: attaching a rule to a set that already has elements
//! does not check, nor remove, the elements already there.

use std::fmt;
use std::rc::Rc;

use crate::error::SetError;
use crate::set::ExtendedSet;
use crate::value::Value;

/// A membership predicate.
#[derive(Clone)]
pub struct Rule(Rc<dyn Fn(&Value) -> bool>);

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

impl Rule {
    /// A rule from a Rust predicate.
    pub fn new<F: Fn(&Value) -> bool + 'static>(pred: F) -> Self {
        Self(Rc::new(pred))
    }

    /// Whether the value passes the rule.
    pub fn check(&self, value: &Value) -> bool {
        (self.0)(value)
    }

    /// A rule passed by values passing at least one of the given rules.
    /// No rule at all rejects everything.
    pub fn any_of(rules: impl IntoIterator<Item = Rule>) -> Self {
        let rules: Vec<Rule> = rules.into_iter().collect();
        Self::new(move |value| rules.iter().any(|rule| rule.check(value)))
    }

    /// A rule passed by values passing all of the given rules.
    /// No rule at all accepts everything.
    ///
    /// Beware that mutually exclusive rules make a rule no value can pass.
    pub fn all_of(rules: impl IntoIterator<Item = Rule>) -> Self {
        let rules: Vec<Rule> = rules.into_iter().collect();
        Self::new(move |value| rules.iter().all(|rule| rule.check(value)))
    }

    /// Whether both rules are the same predicate.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// A function value used as a rule is called with the candidate as single argument,
/// and the candidate passes if the returned value is truthy.
impl TryFrom<&Value> for Rule {
    type Error = SetError;

    fn try_from(value: &Value) -> Result<Self, SetError> {
        match value {
            Value::Function(func) => {
                let func = func.clone();
                Ok(Self::new(move |candidate| {
                    func.call(std::slice::from_ref(candidate)).is_truthy()
                }))
            }
            other => Err(SetError::InvalidRule {
                position: 0,
                found: other.kind(),
            }),
        }
    }
}

/// Convert every value into a rule, reporting the position of the first invalid one.
fn rules_from_values(values: &[Value]) -> Result<Vec<Rule>, SetError> {
    values
        .iter()
        .enumerate()
        .map(|(position, value)| {
            Rule::try_from(value).map_err(|_| SetError::InvalidRule {
                position,
                found: value.kind(),
            })
        })
        .collect()
}

/// Rule merging.
impl ExtendedSet {
    /// Merge function values into a rule passed by values passing any of them (logical OR).
    pub fn merge_rules(rules: &[Value]) -> Result<Rule, SetError> {
        Ok(Rule::any_of(rules_from_values(rules)?))
    }

    /// Merge function values into a rule passed by values passing all of them (logical AND).
    pub fn merge_rules_strict(rules: &[Value]) -> Result<Rule, SetError> {
        Ok(Rule::all_of(rules_from_values(rules)?))
    }
}
