//! Identifier generation for sections and child blocks.
//!
//! Ids have the shape `{prefix}-{suffix}` and never contain the selection
//! separator (`:`), so they can always be embedded in a child reference.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::selection::SEPARATOR;

/// Source of fresh ids for newly created sections and child blocks
pub trait IdSource: Send {
    /// Produce an id that is unique within the open document
    fn next_id(&mut self, prefix: &str) -> String;
}

impl<F> IdSource for F
where
    F: FnMut(&str) -> String + Send,
{
    fn next_id(&mut self, prefix: &str) -> String {
        sanitize_id(&self(prefix))
    }
}

/// Last timestamp handed out in this process (monotonic guard)
static LAST_TIMESTAMP: AtomicU64 = AtomicU64::new(0);

/// `{prefix}-{nanos}` ids from the wall clock
///
/// Two calls in the same nanosecond (or after a clock step backwards) still
/// get distinct suffixes: the suffix is bumped past the last one issued.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimestampIds;

impl TimestampIds {
    pub fn new() -> Self {
        Self
    }
}

impl IdSource for TimestampIds {
    fn next_id(&mut self, prefix: &str) -> String {
        format!("{}-{}", sanitize_id(prefix), next_timestamp())
    }
}

fn next_timestamp() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();

    let mut last = LAST_TIMESTAMP.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(last + 1);
        match LAST_TIMESTAMP.compare_exchange_weak(last, candidate, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return candidate,
            Err(observed) => last = observed,
        }
    }
}

/// Deterministic `{prefix}-{n}` ids
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    count: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self { count: 0 }
    }

    /// Continue numbering after `count` (e.g. when replaying onto a loaded page)
    pub fn starting_at(count: u64) -> Self {
        Self { count }
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self, prefix: &str) -> String {
        self.count += 1;
        format!("{}-{}", sanitize_id(prefix), self.count)
    }
}

/// Draws from a source before falling back to a numbered suffix
const MAX_DRAWS: usize = 16;

/// Fresh id from `ids` that `taken` does not already hold
///
/// Sources that know nothing about the open page (a sequential counter
/// started at zero, a fixed closure) can hand out ids a loaded page already
/// uses. Those are redrawn; a source that keeps colliding gets `-2`, `-3`, ...
/// appended to its last candidate until the id is free.
pub fn fresh_id(ids: &mut dyn IdSource, prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    let mut candidate = ids.next_id(prefix);
    for _ in 1..MAX_DRAWS {
        if !taken(&candidate) {
            return candidate;
        }
        candidate = ids.next_id(prefix);
    }
    if !taken(&candidate) {
        return candidate;
    }

    let mut n = 2;
    loop {
        let suffixed = format!("{}-{}", candidate, n);
        if !taken(&suffixed) {
            return suffixed;
        }
        n += 1;
    }
}

/// Replace the selection separator so an id can be embedded in a child ref
pub fn sanitize_id(raw: &str) -> String {
    raw.replace(SEPARATOR, "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_timestamp_ids_are_unique() {
        let mut ids = TimestampIds::new();
        let generated: HashSet<String> = (0..1000).map(|_| ids.next_id("section")).collect();
        assert_eq!(generated.len(), 1000);
        assert!(generated.iter().all(|id| id.starts_with("section-")));
    }

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::new();

        assert_eq!(ids.next_id("slide"), "slide-1");
        assert_eq!(ids.next_id("slide"), "slide-2");
        assert_eq!(ids.next_id("column"), "column-3");
        assert_eq!(ids.count(), 3);
    }

    #[test]
    fn test_ids_never_contain_separator() {
        let mut ids = SequentialIds::new();
        let id = ids.next_id("bad:prefix");
        assert!(!id.contains(':'));

        let mut custom = |_: &str| "a:b".to_string();
        assert_eq!(custom.next_id("x"), "a-b");
    }

    #[test]
    fn test_fresh_id_skips_taken_ids() {
        let taken: HashSet<&str> = ["rich_text-1", "rich_text-2", "column-4"].into_iter().collect();
        let mut ids = SequentialIds::new();

        assert_eq!(fresh_id(&mut ids, "rich_text", |id| taken.contains(id)), "rich_text-3");
        assert_eq!(fresh_id(&mut ids, "column", |id| taken.contains(id)), "column-5");
    }

    #[test]
    fn test_fresh_id_suffixes_a_source_that_keeps_colliding() {
        let mut fixed = |_: &str| "c1".to_string();
        let taken: HashSet<&str> = ["c1", "c1-2"].into_iter().collect();

        assert_eq!(fresh_id(&mut fixed, "child", |id| taken.contains(id)), "c1-3");
        assert_eq!(fresh_id(&mut fixed, "child", |_| false), "c1");
    }
}
