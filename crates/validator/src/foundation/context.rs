//! Evaluation context handed to every predicate.
//!
//! Predicates are pure functions of the record, the field name and the check
//! argument. The two exceptions, date comparisons against "today" and DNS
//! resolution, read what they need from the [`EvalContext`] so that a
//! validation run sees one consistent reference time and one resolver.

use std::net::ToSocketAddrs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use chrono::NaiveDateTime;

// ============================================================================
// HOST RESOLVER
// ============================================================================

/// Resolves host names for the `activeUrl` rule.
///
/// Implementations must not block past `timeout`; a lookup that fails or
/// times out resolves to `false`.
pub trait HostResolver: Send + Sync {
    /// Returns `true` if `host` resolves to at least one address.
    fn resolves(&self, host: &str, timeout: Duration) -> bool;
}

/// Upper bound on `getaddrinfo` threads alive at once, across all
/// [`SystemResolver`] calls in the process.
pub const MAX_PENDING_LOOKUPS: usize = 64;

static PENDING_LOOKUPS: LookupSlots = LookupSlots::new(MAX_PENDING_LOOKUPS);

/// Counting limiter for lookup threads.
#[derive(Debug)]
struct LookupSlots {
    pending: AtomicUsize,
    max: usize,
}

impl LookupSlots {
    const fn new(max: usize) -> Self {
        Self {
            pending: AtomicUsize::new(0),
            max,
        }
    }

    fn try_acquire(&self) -> Option<LookupSlot<'_>> {
        self.pending
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < self.max).then_some(n + 1)
            })
            .ok()
            .map(|_| LookupSlot { slots: self })
    }

    fn pending(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }
}

/// Held by a lookup thread until `getaddrinfo` returns.
#[derive(Debug)]
struct LookupSlot<'a> {
    slots: &'a LookupSlots,
}

impl Drop for LookupSlot<'_> {
    fn drop(&mut self) {
        self.slots.pending.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Resolver backed by the operating system's `getaddrinfo`.
///
/// The lookup runs on a helper thread so the caller can stop waiting after
/// the timeout. `getaddrinfo` cannot be cancelled, so a lookup that outlives
/// its timeout keeps its thread until the OS answers and the answer is
/// dropped. At most [`MAX_PENDING_LOOKUPS`] such threads exist at once; while
/// all are busy, further lookups fail immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl HostResolver for SystemResolver {
    fn resolves(&self, host: &str, timeout: Duration) -> bool {
        let Some(slot) = PENDING_LOOKUPS.try_acquire() else {
            tracing::warn!(
                host,
                pending = PENDING_LOOKUPS.pending(),
                "too many dns lookups in flight"
            );
            return false;
        };

        let (tx, rx) = mpsc::channel();
        let target = host.to_owned();

        let spawned = thread::Builder::new()
            .name("fieldcheck-dns".to_owned())
            .spawn(move || {
                let _slot = slot;
                let found = (target.as_str(), 0)
                    .to_socket_addrs()
                    .is_ok_and(|mut addrs| addrs.next().is_some());
                // The receiver is gone once the caller timed out.
                let _ = tx.send(found);
            });

        if let Err(error) = spawned {
            tracing::debug!(host, %error, "failed to spawn dns lookup thread");
            return false;
        }

        match rx.recv_timeout(timeout) {
            Ok(found) => {
                tracing::trace!(host, found, "dns lookup finished");
                found
            }
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(host, ?timeout, "dns lookup timed out");
                false
            }
            Err(RecvTimeoutError::Disconnected) => false,
        }
    }
}

// ============================================================================
// EVAL CONTEXT
// ============================================================================

/// Per-run state shared by all predicates of one `validate` call.
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    now: NaiveDateTime,
    dns_timeout: Duration,
    resolver: &'a dyn HostResolver,
}

impl<'a> EvalContext<'a> {
    /// Creates a context.
    pub fn new(now: NaiveDateTime, dns_timeout: Duration, resolver: &'a dyn HostResolver) -> Self {
        Self {
            now,
            dns_timeout,
            resolver,
        }
    }

    /// Reference time for relative dates (UTC).
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Upper bound on a single DNS lookup.
    pub fn dns_timeout(&self) -> Duration {
        self.dns_timeout
    }

    /// Resolver used by `activeUrl`.
    pub fn resolver(&self) -> &'a dyn HostResolver {
        self.resolver
    }
}

impl std::fmt::Debug for EvalContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvalContext")
            .field("now", &self.now)
            .field("dns_timeout", &self.dns_timeout)
            .field("resolver", &"<resolver>")
            .finish()
    }
}
