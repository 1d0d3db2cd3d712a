//! Widget identifier generation.

use chrono::Utc;

use crate::domain::entities::WidgetId;

type Clock = Box<dyn Fn() -> i64 + Send + Sync>;

/// Issues `w<millis>` identifiers that stay unique under rapid creation.
///
/// Each issued value is at least one greater than the previous one, so two
/// widgets created within the same millisecond get distinct IDs. Candidates
/// already present in the tree are skipped.
pub struct WidgetIdGenerator {
    clock: Clock,
    last: i64,
}

impl WidgetIdGenerator {
    /// Creates a generator driven by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(|| Utc::now().timestamp_millis())
    }

    /// Creates a generator driven by a custom millisecond clock.
    #[must_use]
    pub fn with_clock(clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            last: 0,
        }
    }

    /// Returns the next identifier for which `is_taken` is false.
    pub fn next_id(&mut self, is_taken: impl Fn(&WidgetId) -> bool) -> WidgetId {
        let mut candidate = (self.clock)().max(self.last.saturating_add(1));
        loop {
            let id = WidgetId::from_sequence(candidate);
            if !is_taken(&id) {
                self.last = candidate;
                return id;
            }
            candidate = candidate.saturating_add(1);
        }
    }
}

impl Default for WidgetIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WidgetIdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetIdGenerator")
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_same_millisecond_does_not_collide() {
        let mut ids = WidgetIdGenerator::with_clock(|| 1_700_000_000_000);

        let first = ids.next_id(|_| false);
        let second = ids.next_id(|_| false);

        assert_eq!(first.as_str(), "w1700000000000");
        assert_eq!(second.as_str(), "w1700000000001");
    }

    #[test]
    fn test_skips_taken_ids() {
        let mut ids = WidgetIdGenerator::with_clock(|| 5);
        let taken: HashSet<WidgetId> = ["w5", "w6"].into_iter().map(WidgetId::from).collect();

        let id = ids.next_id(|candidate| taken.contains(candidate));

        assert_eq!(id.as_str(), "w7");
    }

    #[test]
    fn test_clock_going_backwards_stays_monotonic() {
        let mut ids = WidgetIdGenerator::with_clock(|| 0);
        let _ = ids.next_id(|_| false);
        let mut seen = HashSet::new();

        for _ in 0..100 {
            assert!(seen.insert(ids.next_id(|_| false)));
        }
    }
}
