// SPDX-License-Identifier: MPL-2.0

//! Handling set errors.
//!
//! Every error is a contract violation by the caller.
//! None of them is transient, and no operation is partially applied when one is returned:
//! arguments are validated before anything is mutated.

use thiserror::Error;

use crate::value::{Kind, Value};

/// Errors that may occur while building or combining sets.
#[derive(Error, Debug, Clone)]
pub enum SetError {
    /// An argument expected to be a set is not.
    /// Positions are counted from 0 in the argument list of the operation.
    #[error("expected argument {position} to be a set, got {found}")]
    TypeMismatch {
        /// Position of the offending argument.
        position: usize,
        /// Kind of the offending argument.
        found: Kind,
    },

    /// A value was rejected by the rule attached to a set.
    /// The set was left unchanged.
    #[error("value {value} does not match ruleset")]
    RuleViolation {
        /// The rejected value.
        value: Value,
    },

    /// A value used as a rule is not a function.
    #[error("expected rule {position} to be a function, got {found}")]
    InvalidRule {
        /// Position of the offending rule.
        position: usize,
        /// Kind of the offending rule.
        found: Kind,
    },

    /// A binary operation was called with the wrong number of arguments.
    #[error("the operation must be given exactly {expected} argument, got {found}")]
    ArityMismatch {
        /// Number of arguments the operation takes.
        expected: usize,
        /// Number of arguments given.
        found: usize,
    },

    /// The set to complement has an element outside of the universe.
    #[error("{value} is not an element of the universe")]
    UniverseViolation {
        /// First element found outside of the universe.
        value: Value,
    },

    /// An n-ary operation was given too few sets to be well defined.
    #[error("{operation} needs at least {minimum} set(s), got {found}")]
    UnsupportedCardinality {
        /// Name of the operation.
        operation: &'static str,
        /// Minimum number of sets.
        minimum: usize,
        /// Number of sets given.
        found: usize,
    },
}
