// SPDX-License-Identifier: MPL-2.0

//! This crate contains the canonical, comparable form of a structured value.
//!
//! A [`Canonical`] is what remains of a value once everything that should not influence
//! structural equality has been stripped away:
//!  - record keys are kept sorted, so `{a: 1, b: 2}` and `{b: 2, a: 1}` have the same form,
//!  - functions are reduced to their whitespace-free source text plus their own properties,
//!  - back references into the value being canonicalized are replaced by [`Canonical::Circular`].
//!
//! Two canonical forms are compared by *representation*: both are rendered through their
//! [`Display`] implementation and the resulting strings are compared, see
//! [`Canonical::same_representation`]. The rendering is deterministic and JSON-like, with a few
//! deliberate departures from JSON so that distinct values never render alike:
//!  - `NaN`, `Infinity` and `-Infinity` are rendered as such instead of `null`,
//!  - `undefined` is kept instead of being dropped,
//!  - `-0` is rendered as `0`,
//!  - the circular marker renders as `<circular>`, which no quoted string can produce.
//!
//! ## Optional features
//!
//! * `serde`: serialization and deserialization for [`Canonical`].
//! * `proptest`: Exports a proptest strategy for [`Canonical`].

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter, Write};

#[cfg(any(feature = "proptest", test))]
use proptest::prelude::*;

/// Rendering of [`Canonical::Circular`].
pub const CIRCULAR_MARKER: &str = "<circular>";

/// A cycle-safe, order-independent form of a structured value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Canonical {
    /// The absent value.
    Undefined,
    /// The null value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number. Rendering normalizes `-0` to `0`.
    Number(f64),
    /// A string.
    String(String),
    /// An ordered list of canonical forms.
    List(Vec<Canonical>),
    /// A keyed record. The map keeps its keys sorted.
    Record(BTreeMap<String, Canonical>),
    /// A function reduced to its normalized source and its own properties.
    Function {
        /// Source text with all whitespace removed.
        body: String,
        /// Canonical forms of the own properties, in property name order.
        refs: Vec<Canonical>,
    },
    /// A reference to a value already visited higher up in the same traversal.
    Circular,
}

impl Canonical {
    /// Whether two forms render to the same canonical string.
    ///
    /// This is the equality used for set membership. It differs from [`PartialEq`] on numbers:
    /// `NaN` has the same representation as `NaN`, and `-0` the same as `0`.
    pub fn same_representation(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }

    /// Whether this is the circular marker.
    pub fn is_circular(&self) -> bool {
        matches!(self, Self::Circular)
    }

    /// Builds a record form from unsorted fields.
    pub fn record<K: Into<String>>(fields: impl IntoIterator<Item = (K, Canonical)>) -> Self {
        Self::Record(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<bool> for Canonical {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Canonical {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Canonical {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

// DISPLAY #####################################################################

fn write_number(f: &mut Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        // Covers -0 as well.
        f.write_char('0')
    } else {
        write!(f, "{n}")
    }
}

fn write_list(f: &mut Formatter<'_>, items: &[Canonical]) -> fmt::Result {
    f.write_char('[')?;
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            f.write_char(',')?;
        }
        write!(f, "{item}")?;
    }
    f.write_char(']')
}

impl Display for Canonical {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write_number(f, *n),
            Self::String(s) => write!(f, "{s:?}"),
            Self::List(items) => write_list(f, items),
            Self::Record(fields) => {
                f.write_char('{')?;
                for (idx, (key, value)) in fields.iter().enumerate() {
                    if idx > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{key:?}:{value}")?;
                }
                f.write_char('}')
            }
            Self::Function { body, refs } => {
                write!(f, "function{{\"body\":{body:?},\"refs\":")?;
                write_list(f, refs)?;
                f.write_char('}')
            }
            Self::Circular => f.write_str(CIRCULAR_MARKER),
        }
    }
}

/// Generate bounded canonical trees mixing every variant.
#[cfg(any(feature = "proptest", test))]
pub fn proptest_strategy() -> impl Strategy<Value = Canonical> {
    let leaf = prop_oneof![
        Just(Canonical::Undefined),
        Just(Canonical::Null),
        Just(Canonical::Circular),
        any::<bool>().prop_map(Canonical::Bool),
        any::<f64>().prop_map(Canonical::Number),
        "[a-z<>]{0,4}".prop_map(Canonical::String),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Canonical::List),
            prop::collection::btree_map("[a-z]{1,3}", inner.clone(), 0..4)
                .prop_map(Canonical::Record),
            ("[a-z(){}=>]{0,8}", prop::collection::vec(inner, 0..3))
                .prop_map(|(body, refs)| Canonical::Function { body, refs }),
        ]
    })
}

#[cfg(test)]
pub mod tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {

        // Testing serde ----------------------------------

        #[cfg(feature = "serde")]
        #[test]
        fn serde_round_trip(form in proptest_strategy()) {
            let s = ron::ser::to_string(&form).unwrap();
            let r: Canonical = ron::de::from_str(&s).unwrap();
            assert!(form.same_representation(&r));
        }

        // Testing representation -------------------------

        #[test]
        fn representation_is_reflexive(form in proptest_strategy()) {
            assert!(form.same_representation(&form.clone()));
        }

        #[test]
        fn representation_is_symmetric(f1 in proptest_strategy(), f2 in proptest_strategy()) {
            assert_eq!(f1.same_representation(&f2), f2.same_representation(&f1));
        }

        #[test]
        fn list_distinguishes_order(f1 in proptest_strategy(), f2 in proptest_strategy()) {
            let forward = Canonical::List(vec![f1.clone(), f2.clone()]);
            let backward = Canonical::List(vec![f2.clone(), f1.clone()]);
            assert_eq!(forward.same_representation(&backward), f1.same_representation(&f2));
        }

        #[test]
        fn record_ignores_insertion_order(
            fields in prop::collection::btree_map("[a-z]{1,3}", proptest_strategy(), 0..5)
        ) {
            let forward = Canonical::record(fields.clone());
            let backward = Canonical::record(fields.into_iter().rev());
            assert!(forward.same_representation(&backward));
        }

        #[test]
        fn circular_is_not_a_string(s in "[a-z<>]{0,12}") {
            assert!(!Canonical::Circular.same_representation(&Canonical::String(s)));
        }

        #[test]
        fn numbers_follow_value(n in any::<f64>()) {
            let same = Canonical::Number(n).same_representation(&Canonical::Number(n));
            assert!(same);
        }
    }

    #[test]
    fn zero_has_no_sign() {
        assert!(Canonical::Number(0.0).same_representation(&Canonical::Number(-0.0)));
        assert_eq!(Canonical::Number(-0.0).to_string(), "0");
    }

    #[test]
    fn nan_is_kept() {
        assert!(Canonical::Number(f64::NAN).same_representation(&Canonical::Number(f64::NAN)));
        assert!(!Canonical::Number(f64::NAN).same_representation(&Canonical::Null));
        assert_eq!(Canonical::Number(f64::NEG_INFINITY).to_string(), "-Infinity");
    }

    #[test]
    fn rendering() {
        let form = Canonical::record([
            ("b", Canonical::List(vec![1.0_f64.into(), "x".into(), Canonical::Circular])),
            ("a", Canonical::Undefined),
        ]);
        assert_eq!(form.to_string(), r#"{"a":undefined,"b":[1,"x",<circular>]}"#);

        let func = Canonical::Function {
            body: "x=>x>0".to_owned(),
            refs: vec![true.into()],
        };
        assert_eq!(func.to_string(), r#"function{"body":"x=>x>0","refs":[true]}"#);
    }

    #[test]
    fn function_is_not_a_record() {
        let func = Canonical::Function {
            body: "f".to_owned(),
            refs: vec![],
        };
        let record = Canonical::record([
            ("body", Canonical::from("f")),
            ("refs", Canonical::List(vec![])),
        ]);
        assert!(!func.same_representation(&record));
    }
}
