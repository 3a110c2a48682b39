// SPDX-License-Identifier: MPL-2.0

//! Values that can be stored in an [ExtendedSet].
//!
//! A [Value] is a closed sum type: primitives are stored inline,
//! while functions, lists, records and sets are shared handles.
//! Cloning a handle does not copy what it points to,
//! so two clones are "the same reference" for membership purposes,
//! and self-referential graphs can be built by inserting a handle into itself.
//!
//! Reference counted cycles are never freed.
//! This is acceptable for the short-lived graphs built to compare values,
//! but long-running callers should break their cycles by hand.

use std::cell::{Ref, RefCell};
use std::fmt::{self, Debug, Display};
use std::rc::Rc;

use indexmap::IndexMap;

use crate::set::ExtendedSet;

/// The tag of a [Value].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Kind {
    /// [Value::Undefined].
    Undefined,
    /// [Value::Null].
    Null,
    /// [Value::Bool].
    Bool,
    /// [Value::Number].
    Number,
    /// [Value::String].
    String,
    /// [Value::Function].
    Function,
    /// [Value::List].
    List,
    /// [Value::Record].
    Record,
    /// [Value::Set].
    Set,
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Function => "function",
            Self::List => "list",
            Self::Record => "record",
            Self::Set => "set",
        })
    }
}

/// Any value that can be an element of an [ExtendedSet].
#[derive(Clone)]
pub enum Value {
    /// The absent value.
    Undefined,
    /// The null value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// A string.
    String(String),
    /// A function, see [Function].
    Function(Function),
    /// An ordered list, see [List].
    List(List),
    /// A keyed record, see [Record].
    Record(Record),
    /// A nested set.
    Set(ExtendedSet),
}

impl Value {
    /// The tag of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Self::Undefined => Kind::Undefined,
            Self::Null => Kind::Null,
            Self::Bool(_) => Kind::Bool,
            Self::Number(_) => Kind::Number,
            Self::String(_) => Kind::String,
            Self::Function(_) => Kind::Function,
            Self::List(_) => Kind::List,
            Self::Record(_) => Kind::Record,
            Self::Set(_) => Kind::Set,
        }
    }

    /// Whether the value is stored inline rather than behind a handle.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::Undefined | Self::Null | Self::Bool(_) | Self::Number(_) | Self::String(_)
        )
    }

    /// Truthiness of the value.
    ///
    /// `undefined`, `null`, `false`, `0`, `-0`, `NaN` and the empty string are falsy,
    /// every other value is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => !(n.is_nan() || *n == 0.0),
            Self::String(s) => !s.is_empty(),
            Self::Function(_) | Self::List(_) | Self::Record(_) | Self::Set(_) => true,
        }
    }

    /// The set behind this value, if it is one.
    pub fn as_set(&self) -> Option<&ExtendedSet> {
        match self {
            Self::Set(set) => Some(set),
            _ => None,
        }
    }

    /// Address of the shared referent, `None` for primitives.
    ///
    /// Two handles have the same address if and only if they are the same reference.
    pub(crate) fn address(&self) -> Option<usize> {
        match self {
            Self::Function(func) => Some(func.address()),
            Self::List(list) => Some(list.address()),
            Self::Record(record) => Some(record.address()),
            Self::Set(set) => Some(set.address()),
            _ => None,
        }
    }

    /// Reference identity: both values are the same handle.
    ///
    /// Primitives never share a reference.
    pub fn same_reference(&self, other: &Value) -> bool {
        match (self.address(), other.address()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// Number equality where `NaN` equals `NaN` and `0` equals `-0`.
pub(crate) fn same_value_zero(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Value equality restricted to primitives.
///
/// Returns `None` if either side is not a primitive.
pub(crate) fn primitive_eq(a: &Value, b: &Value) -> Option<bool> {
    Some(match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => same_value_zero(*x, *y),
        (Value::String(x), Value::String(y)) => x == y,
        _ if a.is_primitive() && b.is_primitive() => false,
        _ => return None,
    })
}

impl Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// Short human form used in reports and error messages.
///
/// Nested handles are printed one level deep only, so that cyclic values can be displayed.
impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Function(func) => write!(f, "function {:?}", func.source()),
            Self::List(list) => {
                write!(f, "[")?;
                for (idx, item) in list.borrow().iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    shallow(f, item)?;
                }
                write!(f, "]")
            }
            Self::Record(record) => {
                write!(f, "{{")?;
                for (idx, (key, item)) in record.borrow().iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: ")?;
                    shallow(f, item)?;
                }
                write!(f, "}}")
            }
            Self::Set(set) => {
                write!(f, "{{")?;
                for (idx, item) in set.to_vec().iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    shallow(f, item)?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Displays primitives fully and handles by kind only.
fn shallow(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::List(_) => f.write_str("[..]"),
        Value::Record(_) | Value::Set(_) => f.write_str("{..}"),
        Value::Function(_) => f.write_str("function"),
        primitive => write!(f, "{primitive}"),
    }
}

// CONVERSIONS #################################################################

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self {
        Self::Function(value)
    }
}

impl From<List> for Value {
    fn from(value: List) -> Self {
        Self::List(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Self::Record(value)
    }
}

impl From<ExtendedSet> for Value {
    fn from(value: ExtendedSet) -> Self {
        Self::Set(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

// LIST ########################################################################

/// A shared, ordered list of values.
#[derive(Clone, Default)]
pub struct List(Rc<RefCell<Vec<Value>>>);

impl List {
    /// A new list holding the given items.
    pub fn new<I: IntoIterator<Item = V>, V: Into<Value>>(items: I) -> Self {
        Self(Rc::new(RefCell::new(items.into_iter().map(Into::into).collect())))
    }

    /// Append an item at the end of the list.
    pub fn push(&self, item: impl Into<Value>) {
        self.0.borrow_mut().push(item.into());
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Whether the list has no item.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Item at the given index.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    /// Borrow the items.
    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    /// Whether both handles point to the same list.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn address(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

// RECORD ######################################################################

/// A shared record of named values.
///
/// Fields keep their insertion order.
#[derive(Clone, Default)]
pub struct Record(Rc<RefCell<IndexMap<String, Value>>>);

impl Record {
    /// A new record holding the given fields.
    pub fn new<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self(Rc::new(RefCell::new(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )))
    }

    /// Set a field, returning its previous value.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.borrow_mut().insert(key.into(), value.into())
    }

    /// Value of a field.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Whether the record has no field.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Borrow the fields.
    pub fn borrow(&self) -> Ref<'_, IndexMap<String, Value>> {
        self.0.borrow()
    }

    /// Whether both handles point to the same record.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn address(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

// FUNCTION ####################################################################

type Body = dyn Fn(&[Value]) -> Value;

struct FunctionInner {
    source: String,
    body: Box<Body>,
    properties: RefCell<IndexMap<String, Value>>,
}

/// A shared callable value.
///
/// Rust closures do not carry their source text, so it is given at construction.
/// Structural comparison of functions looks at that text with whitespace removed,
/// and at the function's own properties.
/// Two functions with the same behavior but different text, comments included, are different.
#[derive(Clone)]
pub struct Function(Rc<FunctionInner>);

impl Function {
    /// A new function with the given source text and body.
    pub fn new<F>(source: impl Into<String>, body: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Self(Rc::new(FunctionInner {
            source: source.into(),
            body: Box::new(body),
            properties: RefCell::new(IndexMap::new()),
        }))
    }

    /// A function of one argument returning a boolean, usable as a rule.
    pub fn predicate<F>(source: impl Into<String>, pred: F) -> Self
    where
        F: Fn(&Value) -> bool + 'static,
    {
        Self::new(source, move |args: &[Value]| {
            Value::Bool(pred(args.first().unwrap_or(&Value::Undefined)))
        })
    }

    /// Call the function.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.0.body)(args)
    }

    /// The source text, as given.
    pub fn source(&self) -> &str {
        &self.0.source
    }

    /// The source text with every whitespace character removed.
    pub fn normalized_source(&self) -> String {
        self.0
            .source
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect()
    }

    /// Attach an own property to the function.
    pub fn set_property(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.properties.borrow_mut().insert(key.into(), value.into())
    }

    /// Value of an own property.
    pub fn property(&self, key: &str) -> Option<Value> {
        self.0.properties.borrow().get(key).cloned()
    }

    /// Borrow the own properties.
    pub fn properties(&self) -> Ref<'_, IndexMap<String, Value>> {
        self.0.properties.borrow()
    }

    /// Whether both handles point to the same function.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn address(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}
