//! End-to-end evaluation semantics of `Validator::validate`.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use fieldcheck_validator::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn validator(rules: RuleSet) -> Validator {
    Validator::new(rules).expect("rules are valid")
}

fn failing_rule(v: &Validator, record: &Record) -> Option<RuleKind> {
    v.validate(record).err().map(|e| e.rule)
}

// ============================================================================
// PRESENCE VS TYPE
// ============================================================================

#[test]
fn required_then_numeric() {
    let mut rules = RuleSet::new();
    rules.add_field("f").required().numeric();
    let v = validator(rules);

    assert_eq!(failing_rule(&v, &Record::new()), Some(RuleKind::Required));
    assert_eq!(
        failing_rule(&v, &Record::new().with("f", "x")),
        Some(RuleKind::Numeric)
    );
    assert_eq!(failing_rule(&v, &Record::new().with("f", "12")), None);
}

#[test]
fn optional_only_field_always_passes() {
    let mut rules = RuleSet::new();
    rules.add_field("f").optional();
    let v = validator(rules);

    assert!(v.validate(&Record::new()).is_ok());
    assert!(v.validate(&Record::new().with("f", "anything")).is_ok());
    assert!(v.validate(&Record::new().with("f", Value::Null)).is_ok());
}

#[test]
fn optional_registered_last_still_skips() {
    let mut rules = RuleSet::new();
    rules.add_field("f").numeric().min(3).optional();
    let v = validator(rules);

    assert!(v.validate(&Record::new()).is_ok());
    assert_eq!(
        failing_rule(&v, &Record::new().with("f", 2)),
        Some(RuleKind::Min)
    );
}

// ============================================================================
// BOUNDS
// ============================================================================

#[rstest]
#[case(5, true)]
#[case(10, true)]
#[case(4, false)]
#[case(11, false)]
fn between_is_inclusive(#[case] n: i64, #[case] passes: bool) {
    let mut rules = RuleSet::new();
    rules.add_field("n").between(5, 10);
    assert_eq!(validator(rules).is_valid(&Record::new().with("n", n)), passes);
}

#[rstest]
#[case(9, true)]
#[case(10, false)]
#[case(11, false)]
fn max_is_exclusive(#[case] n: i64, #[case] passes: bool) {
    let mut rules = RuleSet::new();
    rules.add_field("n").max(10);
    assert_eq!(validator(rules).is_valid(&Record::new().with("n", n)), passes);
}

#[rstest]
#[case(Value::from("abc"), true)]
#[case(Value::from(vec![1, 2, 3]), true)]
#[case(Value::from("abcd"), false)]
fn exact_length(#[case] value: Value, #[case] passes: bool) {
    let mut rules = RuleSet::new();
    rules.add_field("s").length(3);
    assert_eq!(validator(rules).is_valid(&Record::new().with("s", value)), passes);
}

// ============================================================================
// REGISTRATION SEMANTICS
// ============================================================================

#[test]
fn second_registration_of_a_rule_overwrites_the_first() {
    let mut rules = RuleSet::new();
    rules.add_field("n").between(1, 5).between(10, 20);
    let v = validator(rules);

    assert!(!v.is_valid(&Record::new().with("n", 3)));
    assert!(v.is_valid(&Record::new().with("n", 15)));

    let err = v.validate(&Record::new().with("n", 3)).unwrap_err();
    assert_eq!(err.message, "n must be between 10 and 20");
}

#[test]
fn overwrite_keeps_original_position() {
    let mut rules = RuleSet::new();
    rules.add_field("n").numeric().max(100).numeric();
    let order: Vec<_> = rules
        .field("n")
        .unwrap()
        .checks()
        .keys()
        .copied()
        .collect();
    assert_eq!(order, [RuleKind::Numeric, RuleKind::Max]);
}

#[test]
fn re_adding_a_field_replaces_its_rule() {
    let mut rules = RuleSet::new();
    rules.add_field("a").required();
    rules.add_field("b").required();
    rules.add_field("a").optional();
    let v = validator(rules);

    let names: Vec<_> = v.rules().fields().map(|(name, _, _)| name).collect();
    assert_eq!(names, ["a", "b"]);
    assert!(v.is_valid(&Record::new().with("b", 1)));
}

// ============================================================================
// SHORT-CIRCUIT
// ============================================================================

#[test]
fn later_checks_are_not_invoked_after_a_failure() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);

    let mut rules = RuleSet::new();
    rules.add_field("f").required().func(move |_, _| {
        seen.fetch_add(1, Ordering::SeqCst);
        true
    });
    let v = validator(rules);

    assert!(v.validate(&Record::new()).is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    assert!(v.validate(&Record::new().with("f", 1)).is_ok());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn later_fields_are_not_invoked_after_a_failure() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);

    let mut rules = RuleSet::new();
    rules.add_field("first").required();
    rules.add_field("second").func(move |_, _| {
        seen.fetch_add(1, Ordering::SeqCst);
        false
    });
    let v = validator(rules);

    let err = v.validate(&Record::new()).unwrap_err();
    assert_eq!(err.field, "first");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

// ============================================================================
// ERROR PAYLOAD
// ============================================================================

#[test]
fn error_carries_alias_value_rule_message_and_arg() {
    let mut rules = RuleSet::new();
    rules
        .add_field_as("role", "Role")
        .in_array(["admin", "viewer"])
        .with_message("{field} cannot be {value}");
    let v = validator(rules);

    let err = v.validate(&Record::new().with("role", "root")).unwrap_err();
    assert_eq!(err.field, "role");
    assert_eq!(err.label(), "Role");
    assert_eq!(err.value, Value::from("root"));
    assert_eq!(err.code(), "inArray");
    assert_eq!(err.message, "Role cannot be root");
    assert_eq!(err.to_string(), "[role] inArray: Role cannot be root");
    assert_eq!(
        err.to_json_value(),
        serde_json::json!({
            "field": "role",
            "alias": "Role",
            "value": "root",
            "rule": "inArray",
            "message": "Role cannot be root",
            "arg": ["admin", "viewer"],
        })
    );
}

#[test]
fn default_message_uses_field_name_without_alias() {
    let mut rules = RuleSet::new();
    rules.add_field("zip").required();
    let err = validator(rules).validate(&Record::new()).unwrap_err();
    assert_eq!(err.alias, None);
    assert_eq!(err.value, Value::Null);
    assert_eq!(err.message, "zip is required");
}

#[test]
fn configured_template_replaces_default() {
    let mut rules = RuleSet::new();
    rules.add_field_as("zip", "ZIP code").required();
    let v = Validator::builder(rules)
        .config(ValidatorConfig::new().with_message(RuleKind::Required, "please fill in {field}"))
        .build()
        .unwrap();

    let err = v.validate(&Record::new()).unwrap_err();
    assert_eq!(err.message, "please fill in ZIP code");
}

// ============================================================================
// CONFIGURATION ERRORS
// ============================================================================

#[test]
fn invalid_date_bound_is_a_rule_error() {
    let mut rules = RuleSet::new();
    rules.add_field("d").date_before("the day after never");
    let err = Validator::new(rules).unwrap_err();
    assert_eq!(
        err,
        RuleError::InvalidDate {
            field: "d".to_owned(),
            input: "the day after never".to_owned(),
        }
    );
}

#[test]
fn mismatched_argument_is_a_rule_error() {
    let mut rules = RuleSet::new();
    rules
        .add_field("n")
        .add_check(RuleKind::Min, Arg::Value(Value::from("ten")), None);
    let err = Validator::new(rules).unwrap_err();
    assert!(matches!(err, RuleError::ArgumentMismatch { rule: RuleKind::Min, .. }));
}

#[test]
fn add_check_with_message_overrides_template() {
    let mut rules = RuleSet::new();
    rules
        .add_field_as("code", "Code")
        .add_check(RuleKind::Length, Arg::Size(4), Some("{field} needs {arg} chars".into()));
    let v = validator(rules);

    let check = &v.rules().field("code").unwrap().checks()[&RuleKind::Length];
    assert_eq!(check.message(), Some("{field} needs {arg} chars"));

    let err = v.validate(&Record::new().with("code", "abc")).unwrap_err();
    assert_eq!(err.message, "Code needs 4 chars");
}

#[test]
fn bool_accepts_missing_flag_unless_required() {
    let mut loose = RuleSet::new();
    loose.add_field("flag").boolean();
    let mut strict = RuleSet::new();
    strict.add_field("flag").required().boolean();

    assert!(validator(loose).is_valid(&Record::new()));
    let err = validator(strict).validate(&Record::new()).unwrap_err();
    assert_eq!(err.rule, RuleKind::Required);
}
