// SPDX-License-Identifier: MPL-2.0

use extended_set::algebra::BinaryOp;
use extended_set::error::SetError;
use extended_set::resolve::same_structure;
use extended_set::rule::Rule;
use extended_set::set::ExtendedSet;
use extended_set::value::{Function, Kind, List, Record, Value};

fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

fn ints<const N: usize>(values: [i32; N]) -> ExtendedSet {
    ExtendedSet::from_values(values)
}

fn val<const N: usize>(values: [i32; N]) -> Value {
    ints(values).into()
}

#[test]
fn union_of_overlapping_sets() {
    init_log();
    let union = ints([1, 2, 3]).union(&ints([2, 3, 4]));
    assert_eq!(union.len(), 4);
    assert_eq!(union, ints([1, 2, 3, 4]));
}

#[test]
fn intersection_of_overlapping_sets() {
    init_log();
    assert_eq!(ints([1, 2, 3]).intersect(&ints([2, 3, 4])), ints([2, 3]));
}

#[test]
fn relative_complement() {
    init_log();
    let diff = ExtendedSet::difference(&val([1, 2, 3, 4]), &val([1, 3])).unwrap();
    assert_eq!(diff, ints([2, 4]));
}

#[test]
fn symmetric_difference() {
    init_log();
    let sd = ExtendedSet::sym_diff(&[val([1, 2, 3]), val([3, 4])]).unwrap();
    assert_eq!(sd, ints([1, 2, 4]));
}

#[test]
fn cartesian_product_keeps_tuple_order() {
    init_log();
    let product = ExtendedSet::cartesian(&val([1, 2]), &val([3, 4])).unwrap();
    assert_eq!(product.len(), 4);
    let expected = ExtendedSet::from_values([
        List::new([1, 3]),
        List::new([1, 4]),
        List::new([2, 3]),
        List::new([2, 4]),
    ]);
    assert_eq!(product, expected);

    let reversed = ExtendedSet::cartesian(&val([3, 4]), &val([1, 2])).unwrap();
    assert_ne!(product, reversed);
}

#[test]
fn power_set_of_three_elements() {
    init_log();
    let power = ExtendedSet::power(&val([1, 2, 3])).unwrap();
    let expected = ExtendedSet::from_values([
        ints([]),
        ints([1]),
        ints([2]),
        ints([3]),
        ints([1, 2]),
        ints([1, 3]),
        ints([2, 3]),
        ints([1, 2, 3]),
    ]);
    assert_eq!(power.len(), 8);
    assert_eq!(power, expected);
}

#[test]
fn differently_ordered_records_are_equal() {
    init_log();
    let a = ExtendedSet::from_values([Record::new([("a", 1), ("b", 2)])]);
    let b = ExtendedSet::from_values([Record::new([("b", 2), ("a", 1)])]);
    assert!(a.equal(&b));
    assert!(b.equal(&a));
}

#[test]
fn self_referential_record_terminates() {
    init_log();
    let make = || {
        let record = Record::new([("a", 1)]);
        record.insert("me", record.clone());
        record
    };
    let set = ExtendedSet::from_values([make()]);
    assert!(set.has(&make().into()));
    assert!(set.equal(&ExtendedSet::from_values([make()])));

    // The marker is not the string it renders as.
    let impostor = Record::new([("a", Value::from(1)), ("me", Value::from("<circular>"))]);
    assert!(!set.has(&impostor.into()));
}

#[test]
fn sets_of_sets_are_deduplicated() {
    init_log();
    let set = ExtendedSet::new();
    assert!(set.add(ints([1, 2])).unwrap());
    assert!(!set.add(ints([2, 1])).unwrap());
    assert!(set.add(ints([1])).unwrap());
    assert_eq!(set.len(), 2);
}

#[test]
fn deeply_nested_values() {
    init_log();
    let deep = || {
        List::new([
            Value::from(Record::new([
                ("xs", Value::from(List::new([1, 2]))),
                ("s", Value::from(ints([3, 4]))),
            ])),
            Value::from(ExtendedSet::from_values([ints([5])])),
        ])
    };
    let set = ExtendedSet::from_values([deep()]);
    assert!(set.has(&deep().into()));
    assert!(same_structure(&deep().into(), &deep().into()));
}

#[test]
fn functions_compare_by_source() {
    init_log();
    let set = ExtendedSet::from_values([Function::new("(a, b) => a + b", |args| {
        match (args.first(), args.get(1)) {
            (Some(Value::Number(a)), Some(Value::Number(b))) => Value::from(a + b),
            _ => Value::Undefined,
        }
    })]);
    assert!(set.has(&Function::new("(a,b)=>a+b", |_| Value::Undefined).into()));
    assert!(!set.has(&Function::new("(a, b) => b + a", |_| Value::Undefined).into()));
}

#[test]
fn guarded_sets() {
    init_log();
    let is_number = Function::predicate("v => typeof v === 'number'", |v| {
        matches!(v, Value::Number(_))
    });
    let is_string = Function::predicate("v => typeof v === 'string'", |v| {
        matches!(v, Value::String(_))
    });
    let rule = ExtendedSet::merge_rules(&[is_number.clone().into(), is_string.into()]).unwrap();
    let set = ExtendedSet::with_rule([Value::from(1), Value::from("a")], Some(rule)).unwrap();
    assert!(matches!(
        set.add(Value::Null),
        Err(SetError::RuleViolation { value: Value::Null })
    ));
    assert_eq!(set.len(), 2);

    let strict = ExtendedSet::merge_rules_strict(&[
        is_number.into(),
        Function::predicate("v => v > 0", |v| matches!(v, Value::Number(n) if *n > 0.0)).into(),
    ])
    .unwrap();
    let positive = ExtendedSet::with_rule(Vec::<Value>::new(), Some(strict)).unwrap();
    assert!(positive.add(2).is_ok());
    assert!(positive.add(-2).is_err());
    assert!(positive.add("2").is_err());
}

#[test]
fn rule_failing_on_initial_elements() {
    init_log();
    let positive = Rule::new(|v| matches!(v, Value::Number(n) if *n > 0.0));
    let err = ExtendedSet::with_rule([1, -1, 2], Some(positive)).unwrap_err();
    assert_eq!(err.to_string(), "value -1 does not match ruleset");
}

#[test]
fn non_function_rules_are_rejected() {
    init_log();
    let set = ExtendedSet::new();
    assert!(matches!(
        set.try_set_rules(&Value::from(ints([1]))),
        Err(SetError::InvalidRule {
            found: Kind::Set,
            ..
        })
    ));
    assert!(set.rules().is_none());
}

#[test]
fn complement_requires_a_universe() {
    init_log();
    let universe = val([1, 2, 3, 4]);
    let complement = ExtendedSet::complement(&universe, &val([1, 4])).unwrap();
    assert_eq!(complement, ints([2, 3]));

    let err = ExtendedSet::complement(&universe, &val([1, 9])).unwrap_err();
    assert_eq!(err.to_string(), "9 is not an element of the universe");
}

#[test]
fn error_messages_name_the_argument() {
    init_log();
    let err = ExtendedSet::intersection(&[val([1]), Value::from("x")]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "expected argument 1 to be a set, got string"
    );

    let err = ExtendedSet::intersection(&[]).unwrap_err();
    assert_eq!(err.to_string(), "intersection needs at least 1 set(s), got 0");

    let err = ints([1]).invoke(BinaryOp::Union, &[]).unwrap_err();
    assert!(matches!(
        err,
        SetError::ArityMismatch {
            expected: 1,
            found: 0
        }
    ));
}

#[test]
fn operands_are_never_mutated() {
    init_log();
    let a = ints([1, 2, 3]);
    let b = ints([3, 4]);
    let args = [Value::from(&a), Value::from(&b)];
    let _ = ExtendedSet::union_all(&args).unwrap();
    let _ = ExtendedSet::intersection(&args).unwrap();
    let _ = ExtendedSet::sym_diff(&args).unwrap();
    let _ = ExtendedSet::cartesian_product_all(&args).unwrap();
    let _ = a.power_set();
    assert_eq!(a, ints([1, 2, 3]));
    assert_eq!(a.len(), 3);
    assert_eq!(b, ints([4, 3]));
}

#[test]
fn factory() {
    init_log();
    let from: ExtendedSet = [1, 2, 2, 3].into_iter().collect();
    assert_eq!(from.len(), 3);

    let list = List::new([1, 2]);
    let wrapped = ExtendedSet::to_set(list.clone());
    assert_eq!(wrapped.len(), 1);
    assert!(wrapped.has(&list.into()));

    let copy = ExtendedSet::copy(&Value::from(&from)).unwrap();
    assert_eq!(copy, from);
    copy.clear();
    assert_eq!(from.len(), 3);
}

#[test]
fn self_containing_sets() {
    init_log();
    let make = |x: i32| {
        let set = ints([x]);
        // A set may become an element of itself.
        set.add(set.clone()).unwrap();
        set
    };
    let (a, b, c) = (make(1), make(1), make(2));
    assert_eq!(a.len(), 2);
    assert!(a.equal(&b));
    assert!(!a.equal(&c));
    assert!(a.has(&Value::from(&b)));
}
