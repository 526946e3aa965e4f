//! The predicate catalog.
//!
//! Every rule of [`RuleKind`] maps to one function with the [`Predicate`]
//! signature. Predicates never panic or error on malformed input; a value of
//! the wrong shape, an absent field, or an argument of the wrong variant all
//! evaluate to `false`.
//!
//! # Categories
//!
//! - **Presence**: `required`, `optional`, `notEmpty`
//! - **Numeric**: `numeric`, `integer`, `float`, `bool`, `min`, `max`, `between`
//! - **Length**: `length`, `lengthMin`, `lengthMax`
//! - **Content**: `equal`, `inArray`, `notInArray`, `regex`, `alpha`
//! - **Network**: `url`, `activeUrl`, `isIp`
//! - **Time**: `timestamp`, `dateBefore`, `dateAfter`
//! - **Custom**: `func`
//!
//! # Examples
//!
//! ```
//! use fieldcheck_validator::prelude::*;
//! use fieldcheck_validator::validators::predicate;
//!
//! let record = Record::new().with("age", 42);
//! let ctx = EvalContext::new(
//!     chrono::Utc::now().naive_utc(),
//!     std::time::Duration::from_secs(1),
//!     &SystemResolver,
//! );
//!
//! let numeric = predicate(RuleKind::Numeric);
//! assert!(numeric(&record, "age", &Arg::None, &ctx));
//! assert!(!numeric(&record, "name", &Arg::None, &ctx));
//! ```

pub mod content;
pub mod custom;
pub mod length;
pub mod network;
pub mod numeric;
pub mod presence;
pub mod time;

use crate::foundation::{EvalContext, Record};
use crate::rules::{Arg, RuleKind};

/// Signature shared by every catalog predicate.
pub type Predicate = fn(&Record, &str, &Arg, &EvalContext<'_>) -> bool;

/// Returns the catalog function for a rule.
#[must_use]
pub fn predicate(kind: RuleKind) -> Predicate {
    match kind {
        RuleKind::Required => presence::required,
        RuleKind::Optional => presence::optional,
        RuleKind::NotEmpty => presence::not_empty,
        RuleKind::Numeric => numeric::numeric,
        RuleKind::Integer => numeric::integer,
        RuleKind::Float => numeric::float,
        RuleKind::Bool => numeric::boolean,
        RuleKind::Length => length::length,
        RuleKind::LengthMin => length::length_min,
        RuleKind::LengthMax => length::length_max,
        RuleKind::Min => numeric::min,
        RuleKind::Max => numeric::max,
        RuleKind::Between => numeric::between,
        RuleKind::Equal => content::equal,
        RuleKind::InArray => content::in_array,
        RuleKind::NotInArray => content::not_in_array,
        RuleKind::Regex => content::regex,
        RuleKind::Alpha => content::alpha,
        RuleKind::Url => network::url,
        RuleKind::ActiveUrl => network::active_url,
        RuleKind::IsIp => network::is_ip,
        RuleKind::Timestamp => time::timestamp,
        RuleKind::DateBefore => time::date_before,
        RuleKind::DateAfter => time::date_after,
        RuleKind::Func => custom::func,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Helpers for predicate unit tests. The field under test is always `"f"`.

    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use chrono::{NaiveDate, NaiveDateTime};

    use super::Predicate;
    use crate::foundation::{EvalContext, HostResolver, Record, SystemResolver, Value};
    use crate::rules::Arg;

    pub(crate) const FIELD: &str = "f";

    /// 2024-03-10 15:30:00, a Sunday afternoon.
    pub(crate) fn reference_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 10)
            .and_then(|d| d.and_hms_opt(15, 30, 0))
            .expect("valid reference time")
    }

    pub(crate) fn context(resolver: &dyn HostResolver) -> EvalContext<'_> {
        EvalContext::new(reference_time(), Duration::from_millis(500), resolver)
    }

    pub(crate) fn check(p: Predicate, record: &Record, arg: &Arg) -> bool {
        p(record, FIELD, arg, &context(&SystemResolver))
    }

    pub(crate) fn check_value(p: Predicate, value: Value, arg: &Arg) -> bool {
        check(p, &Record::new().with(FIELD, value), arg)
    }

    pub(crate) fn check_value_with(
        p: Predicate,
        value: Value,
        arg: &Arg,
        resolver: &dyn HostResolver,
    ) -> bool {
        p(&Record::new().with(FIELD, value), FIELD, arg, &context(resolver))
    }

    /// Resolver answering from a fixed host list and counting lookups.
    #[derive(Debug, Default)]
    pub(crate) struct FakeResolver {
        known: HashSet<String>,
        lookups: AtomicUsize,
    }

    impl FakeResolver {
        pub(crate) fn knowing(hosts: &[&str]) -> Self {
            Self {
                known: hosts.iter().map(|h| (*h).to_owned()).collect(),
                lookups: AtomicUsize::new(0),
            }
        }

        pub(crate) fn lookups(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }
    }

    impl HostResolver for FakeResolver {
        fn resolves(&self, host: &str, _timeout: Duration) -> bool {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.known.contains(host)
        }
    }
}
