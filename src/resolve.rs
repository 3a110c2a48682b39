// SPDX-License-Identifier: MPL-2.0

//! Canonicalization of values into their [Canonical] form.
//!
//! Resolution walks a value depth first and produces a form that can be compared
//! by representation, even when the value contains cycles or functions:
//!  - primitives map to themselves,
//!  - lists are resolved element-wise,
//!  - records are resolved in sorted key order,
//!  - functions become their whitespace-free source plus their own properties,
//!    in sorted property name order,
//!  - sets are resolved like lists of their elements, sorted by representation,
//!    so that two equal sets resolve alike whatever their insertion order.
//!    Each element of a set is resolved from the visited set as it was on entering the set,
//!    so a handle shared by two elements is resolved fully in both.
//!
//! Every handle is recorded in a visited set before its children are resolved.
//! A child already visited, by reference, is replaced by [Canonical::Circular].
//! The visited set lives for one top-level call and is never cleared during it,
//! so a handle reached twice through different paths of a list or record
//! is also marked circular the second time.

use std::collections::BTreeMap;

use canonical_form::Canonical;
use log::trace;

use crate::type_aliases::Visited;
use crate::value::Value;

/// Resolve a value into its canonical form.
pub fn resolve(value: &Value) -> Canonical {
    let mut visited = Visited::default();
    if let Some(address) = value.address() {
        visited.insert(address);
    }
    resolve_with(value, &mut visited)
}

/// Whether two values resolve to the same canonical representation.
pub fn same_structure(a: &Value, b: &Value) -> bool {
    resolve(a).same_representation(&resolve(b))
}

fn resolve_with(value: &Value, visited: &mut Visited) -> Canonical {
    match value {
        Value::Undefined => Canonical::Undefined,
        Value::Null => Canonical::Null,
        Value::Bool(b) => Canonical::Bool(*b),
        Value::Number(n) => Canonical::Number(*n),
        Value::String(s) => Canonical::String(s.clone()),
        Value::Function(func) => {
            visited.insert(func.address());
            let properties = func.properties();
            let mut names: Vec<&String> = properties.keys().collect();
            names.sort();
            let refs = names
                .into_iter()
                .map(|name| resolve_child(&properties[name.as_str()], visited))
                .collect();
            Canonical::Function {
                body: func.normalized_source(),
                refs,
            }
        }
        Value::List(list) => {
            visited.insert(list.address());
            let items = list.borrow();
            Canonical::List(
                items
                    .iter()
                    .map(|item| resolve_child(item, visited))
                    .collect(),
            )
        }
        Value::Record(record) => {
            visited.insert(record.address());
            let fields = record.borrow();
            let mut keys: Vec<&String> = fields.keys().collect();
            keys.sort();
            let mut resolved = BTreeMap::new();
            for key in keys {
                let child = resolve_child(&fields[key.as_str()], visited);
                resolved.insert(key.clone(), child);
            }
            Canonical::Record(resolved)
        }
        Value::Set(set) => {
            visited.insert(set.address());
            // Siblings must not see each other's handles, or the form would depend on
            // insertion order.
            let mut items: Vec<(String, Canonical)> = set
                .to_vec()
                .iter()
                .map(|item| {
                    let form = resolve_child(item, &mut visited.clone());
                    (form.to_string(), form)
                })
                .collect();
            items.sort_by(|(a, _), (b, _)| a.cmp(b));
            Canonical::List(items.into_iter().map(|(_, form)| form).collect())
        }
    }
}

fn resolve_child(value: &Value, visited: &mut Visited) -> Canonical {
    match value.address() {
        Some(address) if visited.contains(&address) => {
            trace!("circular reference to {} resolved as marker", value.kind());
            Canonical::Circular
        }
        _ => resolve_with(value, visited),
    }
}
