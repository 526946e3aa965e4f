//! Property-based tests for fieldcheck-validator.

use std::time::Duration;

use chrono::NaiveDate;
use fieldcheck_validator::prelude::*;
use fieldcheck_validator::validators::predicate;
use proptest::prelude::*;

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-1.0e9..1.0e9f64).prop_map(Value::Float),
        ".{0,12}".prop_map(Value::Text),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(2, 16, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(Value::List)
    })
}

/// Text shaped like the inputs the catalog parses: numbers, dates, URLs,
/// addresses and relative offsets, plus arbitrary noise.
fn arb_shaped_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[+-]?[0-9]{1,20}(\\.[0-9]{0,4})?([eE][+-]?[0-9]{1,4})?",
        " ?0x[0-9a-f]{1,4}|inf|NaN|-?[0-9]+\\.",
        "[0-9]{4}-[01][0-9]-[0-3][0-9]( [0-2][0-9]:[0-5][0-9](:[0-5][0-9])?)?",
        "@-?[0-9]{1,20}",
        "[+-]?[0-9]{1,20} (sec|min|hour|day|week|month|year)s?( ago)?",
        "(now|today|tomorrow|yesterday|midnight)",
        "(https?|ftp|ws|file|mailto):(//)?[a-z0-9.-]{0,12}(:[0-9]{1,6})?(/[a-z]{0,5})?",
        "[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}|[0-9a-f:]{2,20}",
        "\\PC{0,16}",
    ]
}

/// Like [`arb_value`], with non-finite floats, extreme integers and shaped
/// text mixed in.
fn arb_wide_value() -> impl Strategy<Value = Value> {
    let scalar = prop_oneof![
        arb_scalar(),
        any::<f64>().prop_map(Value::Float),
        prop_oneof![Just(i64::MIN), Just(i64::MAX), Just(0i64), Just(1i64)].prop_map(Value::Int),
        arb_shaped_text().prop_map(Value::Text),
    ];
    scalar.prop_recursive(2, 16, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(Value::List)
    })
}

/// Answers without touching the network.
struct OfflineResolver;

impl HostResolver for OfflineResolver {
    fn resolves(&self, host: &str, _timeout: Duration) -> bool {
        host.ends_with(".com")
    }
}

/// A well-formed argument for each rule.
fn arg_for(kind: RuleKind) -> Arg {
    match kind {
        RuleKind::Length | RuleKind::LengthMin | RuleKind::LengthMax => Arg::Size(3),
        RuleKind::Min | RuleKind::Max => Arg::Number(10.0),
        RuleKind::Between => Arg::Bounds(Value::Int(1), Value::Int(10)),
        RuleKind::Equal => Arg::Value(Value::from("x")),
        RuleKind::InArray | RuleKind::NotInArray => {
            Arg::Set(vec![Value::Int(1), Value::from("a"), Value::Float(2.5)])
        }
        RuleKind::Regex => Arg::pattern("v", "^[a-z0-9]+$").unwrap(),
        RuleKind::DateBefore => Arg::Date(DateBound::Today),
        RuleKind::DateAfter => Arg::Date(DateBound::parse("v", "2020-01-01").unwrap()),
        RuleKind::Func => Arg::Func(CustomFn::new(|record, field| record.contains(field))),
        _ => Arg::None,
    }
}

fn arb_record() -> impl Strategy<Value = Record> {
    prop::collection::vec(("[a-z]{1,6}", arb_value()), 0..6)
        .prop_map(|pairs| pairs.into_iter().collect())
}

// ============================================================================
// DRIVER PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn empty_rule_set_accepts_every_record(record in arb_record()) {
        let v = Validator::new(RuleSet::new()).unwrap();
        prop_assert!(v.validate(&record).is_ok());
    }

    #[test]
    fn optional_only_fields_accept_every_record(record in arb_record(), name in "[a-z]{1,6}") {
        let mut rules = RuleSet::new();
        rules.add_field(name).optional();
        let v = Validator::new(rules).unwrap();
        prop_assert!(v.validate(&record).is_ok());
    }

    #[test]
    fn validate_is_idempotent(record in arb_record()) {
        let mut rules = RuleSet::new();
        rules.add_field("a").required().numeric();
        rules.add_field("b").optional().length_max(5);
        let v = Validator::new(rules).unwrap();

        let first = v.validate(&record).err().map(|e| (e.field, e.rule));
        let second = v.validate(&record).err().map(|e| (e.field, e.rule));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn required_fails_exactly_when_absent(record in arb_record()) {
        let mut rules = RuleSet::new();
        rules.add_field("a").required();
        let v = Validator::new(rules).unwrap();
        prop_assert_eq!(v.is_valid(&record), record.contains("a"));
    }

    #[test]
    fn error_value_is_what_the_record_holds(value in arb_value()) {
        let mut rules = RuleSet::new();
        rules.add_field("x").func(|_, _| false);
        let v = Validator::new(rules).unwrap();

        let record = Record::new().with("x", value.clone());
        let err = v.validate(&record).unwrap_err();
        prop_assert_eq!(err.value, value);
    }
}

// ============================================================================
// PREDICATE PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn integers_are_numeric_and_integer(n in any::<i64>()) {
        let mut rules = RuleSet::new();
        rules.add_field("n").numeric().integer();
        let v = Validator::new(rules).unwrap();
        prop_assert!(v.is_valid(&Record::new().with("n", n)));
        prop_assert!(v.is_valid(&Record::new().with("n", n.to_string())));
    }

    #[test]
    fn min_and_max_are_strict(n in -1_000i64..1_000, bound in -1_000i64..1_000) {
        let mut above = RuleSet::new();
        above.add_field("n").min(bound as f64);
        let mut below = RuleSet::new();
        below.add_field("n").max(bound as f64);

        let record = Record::new().with("n", n);
        prop_assert_eq!(Validator::new(above).unwrap().is_valid(&record), n > bound);
        prop_assert_eq!(Validator::new(below).unwrap().is_valid(&record), n < bound);
    }

    #[test]
    fn between_agrees_with_range(n in -100i64..100, lo in -100i64..100, span in 0i64..50) {
        let hi = lo + span;
        let mut rules = RuleSet::new();
        rules.add_field("n").between(lo, hi);
        let v = Validator::new(rules).unwrap();
        prop_assert_eq!(v.is_valid(&Record::new().with("n", n)), (lo..=hi).contains(&n));
    }

    #[test]
    fn length_counts_chars(s in "\\PC{0,20}") {
        let len = s.chars().count();
        let mut rules = RuleSet::new();
        rules.add_field("s").length(len).length_min(len).length_max(len);
        let v = Validator::new(rules).unwrap();
        prop_assert!(v.is_valid(&Record::new().with("s", s)));
    }

    #[test]
    fn in_array_and_not_in_array_are_complements(
        value in arb_scalar(),
        set in prop::collection::vec(arb_scalar(), 0..5),
    ) {
        let mut inside = RuleSet::new();
        inside.add_field("v").in_array(set.clone());
        let mut outside = RuleSet::new();
        outside.add_field("v").not_in_array(set);

        let record = Record::new().with("v", value);
        let a = Validator::new(inside).unwrap().is_valid(&record);
        let b = Validator::new(outside).unwrap().is_valid(&record);
        prop_assert_ne!(a, b);
    }

    #[test]
    fn every_predicate_is_total_and_deterministic(
        record in arb_record(),
        value in arb_wide_value(),
    ) {
        let now = NaiveDate::from_ymd_opt(2024, 3, 10)
            .and_then(|d| d.and_hms_opt(15, 30, 0))
            .unwrap();
        let ctx = EvalContext::new(now, Duration::from_millis(10), &OfflineResolver);
        let record = record.with("v", value);

        for kind in RuleKind::ALL {
            let arg = arg_for(kind);
            prop_assert!(kind.accepts(&arg), "{}", kind);

            let check = predicate(kind);
            for field in ["v", "absent"] {
                let first = check(&record, field, &arg, &ctx);
                let second = check(&record, field, &arg, &ctx);
                prop_assert_eq!(first, second, "{} on {}", kind, field);
            }
        }
    }

    #[test]
    fn absent_field_fails_value_rules(record in arb_record()) {
        let now = NaiveDate::from_ymd_opt(2024, 3, 10)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();
        let ctx = EvalContext::new(now, Duration::from_millis(10), &OfflineResolver);
        let record = record.with("v", Value::Null);

        for kind in [
            RuleKind::Required,
            RuleKind::NotEmpty,
            RuleKind::Numeric,
            RuleKind::Integer,
            RuleKind::Alpha,
            RuleKind::Url,
            RuleKind::IsIp,
            RuleKind::Timestamp,
        ] {
            prop_assert!(!predicate(kind)(&record, "v", &Arg::None, &ctx), "{}", kind);
        }
        prop_assert!(predicate(RuleKind::Bool)(&record, "v", &Arg::None, &ctx));
    }
}
