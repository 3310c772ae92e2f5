//! Scene-scoped timers
//!
//! Every scene owns one `TimerSet` on a virtual millisecond clock that starts
//! at zero when the scene mounts. Nothing fires unless the owning scene pumps
//! it, and dropping the set cancels everything still pending, so a replaced
//! scene can never receive a late callback.

/// Handle for a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u32);

#[derive(Debug, Clone)]
struct Timer<E> {
    id: TimerId,
    due_ms: u64,
    /// Re-arm period for intervals
    period_ms: Option<u64>,
    /// Scheduling order, breaks ties between equal due times
    seq: u64,
    event: E,
}

/// Pending one-shot and interval timers of a single scene
#[derive(Debug)]
pub struct TimerSet<E> {
    label: &'static str,
    now_ms: u64,
    timers: Vec<Timer<E>>,
    next_id: u32,
    next_seq: u64,
}

impl<E> TimerSet<E> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            now_ms: 0,
            timers: Vec::new(),
            next_id: 1,
            next_seq: 0,
        }
    }

    /// Milliseconds since the owning scene mounted
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of timers still pending
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Schedule a one-shot timer `delay_ms` from now
    pub fn after(&mut self, delay_ms: u64, event: E) -> TimerId {
        self.insert(delay_ms, None, event)
    }

    /// Schedule an interval timer, first firing one period from now
    pub fn every(&mut self, period_ms: u64, event: E) -> TimerId {
        // A zero period would never let the clock move forward
        let period_ms = period_ms.max(1);
        self.insert(period_ms, Some(period_ms), event)
    }

    fn insert(&mut self, delay_ms: u64, period_ms: Option<u64>, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.bump_seq();
        self.timers.push(Timer {
            id,
            due_ms: self.now_ms + delay_ms,
            period_ms,
            seq,
            event,
        });
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Cancel one timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Cancel every pending timer. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.timers.len();
        self.timers.clear();
        if cancelled > 0 {
            log::debug!("{}: cancelled {} pending timer(s)", self.label, cancelled);
        }
        cancelled
    }

    /// Move the clock forward to `until_ms` once all due timers are drained
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}

impl<E: Clone> TimerSet<E> {
    /// Pop the earliest timer due at or before `until_ms`.
    ///
    /// The clock jumps to the timer's due time, so anything the caller
    /// schedules while handling the event is measured from that instant.
    /// Intervals are re-armed and may fire several times within one window.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<E> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.seq))
            .map(|(i, _)| i)?;

        self.now_ms = self.now_ms.max(self.timers[idx].due_ms);

        match self.timers[idx].period_ms {
            Some(period) => {
                let seq = self.bump_seq();
                let timer = &mut self.timers[idx];
                timer.due_ms += period;
                timer.seq = seq;
                Some(timer.event.clone())
            }
            None => Some(self.timers.remove(idx).event),
        }
    }
}

impl<E> Drop for TimerSet<E> {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn drain(timers: &mut TimerSet<&'static str>, until: u64) -> Vec<&'static str> {
        let mut fired = Vec::new();
        while let Some(ev) = timers.pop_due(until) {
            fired.push(ev);
        }
        timers.settle(until);
        fired
    }

    #[test]
    fn test_one_shots_fire_in_due_order() {
        let mut timers = TimerSet::new("test");
        timers.after(2300, "button");
        timers.after(600, "message");
        timers.after(1500, "greeting");

        assert!(drain(&mut timers, 599).is_empty());
        assert_eq!(drain(&mut timers, 600), vec!["message"]);
        assert_eq!(drain(&mut timers, 5000), vec!["greeting", "button"]);
        assert_eq!(timers.pending(), 0);
        assert_eq!(timers.now_ms(), 5000);
    }

    #[test]
    fn test_equal_due_times_keep_scheduling_order() {
        let mut timers = TimerSet::new("test");
        timers.after(100, "a");
        timers.after(100, "b");
        timers.after(100, "c");
        assert_eq!(drain(&mut timers, 100), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_interval_fires_repeatedly_in_one_window() {
        let mut timers = TimerSet::new("test");
        timers.every(60, "tick");
        assert_eq!(drain(&mut timers, 180).len(), 3);
        assert_eq!(timers.pending(), 1);
        assert_eq!(drain(&mut timers, 239).len(), 0);
        assert_eq!(drain(&mut timers, 240).len(), 1);
    }

    #[test]
    fn test_cancel_inside_drain_stops_interval() {
        let mut timers = TimerSet::new("test");
        let id = timers.every(10, "tick");
        let mut count = 0;
        while let Some(_) = timers.pop_due(1000) {
            count += 1;
            if count == 3 {
                assert!(timers.cancel(id));
            }
        }
        assert_eq!(count, 3);
        assert_eq!(timers.pending(), 0);
        assert!(!timers.cancel(id));
    }

    #[test]
    fn test_schedule_from_handler_measures_from_due_time() {
        let mut timers = TimerSet::new("test");
        timers.after(100, "first");
        assert_eq!(timers.pop_due(1000), Some("first"));
        assert_eq!(timers.now_ms(), 100);
        timers.after(50, "second");
        assert_eq!(timers.pop_due(149), None);
        assert_eq!(timers.pop_due(150), Some("second"));
    }

    #[test]
    fn test_cancel_all() {
        let mut timers = TimerSet::new("test");
        timers.after(10, "a");
        timers.every(20, "b");
        assert_eq!(timers.cancel_all(), 2);
        assert_eq!(timers.pending(), 0);
        assert!(drain(&mut timers, 1000).is_empty());
    }

    proptest! {
        #[test]
        fn prop_fire_order_is_sorted_by_delay(
            delays in proptest::collection::vec(0u64..5000, 1..40)
        ) {
            let mut timers = TimerSet::new("prop");
            for (i, delay) in delays.iter().enumerate() {
                timers.after(*delay, i);
            }
            let mut fired = Vec::new();
            while let Some(i) = timers.pop_due(u64::MAX) {
                fired.push(i);
            }
            prop_assert_eq!(fired.len(), delays.len());
            for pair in fired.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                prop_assert!((delays[a], a) < (delays[b], b));
            }
        }
    }
}
