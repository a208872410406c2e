//! Caller-driven timers.
//!
//! Nothing runs on its own: the host calls [`Scheduler::advance_to`] with the
//! current page time and every task that has come due runs in order of due
//! time, then registration order. While a task runs, [`Scheduler::now`]
//! reports that task's due time, so follow-up delays are measured from when
//! the task was meant to fire rather than from when the host got around to it.

use std::collections::BTreeMap;
use std::fmt;

use crate::dom::Document;

/// A scheduled callback.
pub type Task = Box<dyn FnMut(&mut Document, &mut Scheduler)>;

/// Identifies a timeout or interval for [`Scheduler::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

struct Timer {
    handle: TimerHandle,
    period: Option<u64>,
    task: Task,
}

/// Timeouts and intervals advanced by the caller's clock.
///
/// Tasks run in due order, ties in scheduling order. While a task runs,
/// [`now`](Self::now) reads its due time.
#[derive(Default)]
pub struct Scheduler {
    now_ms: u64,
    next_seq: u64,
    next_handle: u64,
    queue: BTreeMap<(u64, u64), Timer>,
    running: Option<TimerHandle>,
    running_cleared: bool,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("now_ms", &self.now_ms)
            .field("pending", &self.queue.len())
            .finish()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current page time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Run `task` once, `delay_ms` from now.
    pub fn set_timeout(
        &mut self,
        delay_ms: u64,
        task: impl FnMut(&mut Document, &mut Scheduler) + 'static,
    ) -> TimerHandle {
        self.schedule(delay_ms, None, Box::new(task))
    }

    /// Run `task` every `period_ms`, first after one period. A zero period is
    /// treated as 1 ms.
    pub fn set_interval(
        &mut self,
        period_ms: u64,
        task: impl FnMut(&mut Document, &mut Scheduler) + 'static,
    ) -> TimerHandle {
        let period = period_ms.max(1);
        self.schedule(period, Some(period), Box::new(task))
    }

    /// Cancel a timer. Clearing an interval from inside its own task stops it
    /// from re-arming. Unknown or already fired handles are ignored.
    pub fn clear(&mut self, handle: TimerHandle) {
        if self.running == Some(handle) {
            self.running_cleared = true;
        }
        let key = self
            .queue
            .iter()
            .find(|(_, timer)| timer.handle == handle)
            .map(|(key, _)| *key);
        if let Some(key) = key {
            self.queue.remove(&key);
        }
    }

    /// Number of timers waiting to fire.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.queue.values().any(|timer| timer.handle == handle)
    }

    /// Due time of the next timer, if any.
    pub fn next_due(&self) -> Option<u64> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Run every task due at or before `now_ms`.
    ///
    /// Time never moves backwards; an earlier `now_ms` runs nothing.
    pub fn advance_to(&mut self, now_ms: u64, doc: &mut Document) {
        while let Some(entry) = self.queue.first_entry() {
            let (due, _) = *entry.key();
            if due > now_ms {
                break;
            }
            let mut timer = entry.remove();
            self.now_ms = self.now_ms.max(due);
            self.running = Some(timer.handle);
            self.running_cleared = false;

            (timer.task)(doc, self);

            self.running = None;
            if let Some(period) = timer.period
                && !self.running_cleared
            {
                let seq = self.next_seq();
                self.queue.insert((due + period, seq), timer);
            }
        }
        self.now_ms = self.now_ms.max(now_ms);
    }

    fn schedule(&mut self, delay_ms: u64, period: Option<u64>, task: Task) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        let seq = self.next_seq();
        self.queue.insert(
            (self.now_ms.saturating_add(delay_ms), seq),
            Timer {
                handle,
                period,
                task,
            },
        );
        handle
    }

    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    type Log = Rc<RefCell<Vec<(&'static str, u64)>>>;

    fn recorder(
        log: &Log,
        name: &'static str,
    ) -> impl FnMut(&mut Document, &mut Scheduler) + 'static {
        let log = Rc::clone(log);
        move |_, s| log.borrow_mut().push((name, s.now()))
    }

    #[test]
    fn test_timeouts_fire_in_due_order() {
        let log = Log::default();
        let mut doc = Document::new();
        let mut s = Scheduler::new();
        s.set_timeout(300, recorder(&log, "late"));
        s.set_timeout(100, recorder(&log, "early"));
        s.set_timeout(100, recorder(&log, "early-second"));

        s.advance_to(99, &mut doc);
        assert!(log.borrow().is_empty());

        s.advance_to(1000, &mut doc);
        assert_eq!(
            *log.borrow(),
            vec![("early", 100), ("early-second", 100), ("late", 300)]
        );
        assert_eq!(s.now(), 1000);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn test_interval_catches_up() {
        let log = Log::default();
        let mut doc = Document::new();
        let mut s = Scheduler::new();
        let handle = s.set_interval(2000, recorder(&log, "tick"));

        s.advance_to(6500, &mut doc);
        assert_eq!(
            *log.borrow(),
            vec![("tick", 2000), ("tick", 4000), ("tick", 6000)]
        );
        assert!(s.is_pending(handle));
        assert_eq!(s.next_due(), Some(8000));

        s.clear(handle);
        s.advance_to(20_000, &mut doc);
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn test_nested_timeout_measured_from_due_time() {
        let log = Log::default();
        let mut doc = Document::new();
        let mut s = Scheduler::new();
        let inner = recorder(&log, "inner");
        let mut inner = Some(inner);
        s.set_timeout(3000, move |_, s| {
            if let Some(task) = inner.take() {
                s.set_timeout(1000, task);
            }
        });

        // A single late advance still fires the follow-up at 4000.
        s.advance_to(10_000, &mut doc);
        assert_eq!(*log.borrow(), vec![("inner", 4000)]);
    }

    #[test]
    fn test_interval_cleared_from_inside() {
        let count = Rc::new(RefCell::new(0));
        let mut doc = Document::new();
        let mut s = Scheduler::new();
        let handle = Rc::new(RefCell::new(None));
        let id = {
            let count = Rc::clone(&count);
            let handle = Rc::clone(&handle);
            s.set_interval(10, move |_, s| {
                *count.borrow_mut() += 1;
                if *count.borrow() == 2
                    && let Some(h) = *handle.borrow()
                {
                    s.clear(h);
                }
            })
        };
        *handle.borrow_mut() = Some(id);

        s.advance_to(100, &mut doc);
        assert_eq!(*count.borrow(), 2);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn test_zero_period_interval() {
        let log = Log::default();
        let mut doc = Document::new();
        let mut s = Scheduler::new();
        s.set_interval(0, recorder(&log, "tick"));
        s.advance_to(3, &mut doc);
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn test_time_does_not_move_backwards() {
        let log = Log::default();
        let mut doc = Document::new();
        let mut s = Scheduler::new();
        s.advance_to(500, &mut doc);
        s.advance_to(100, &mut doc);
        assert_eq!(s.now(), 500);
        s.set_timeout(10, recorder(&log, "t"));
        s.advance_to(510, &mut doc);
        assert_eq!(*log.borrow(), vec![("t", 510)]);
    }

    #[test]
    fn test_clear_unknown_handle_is_ignored() {
        let mut s = Scheduler::new();
        let a = s.set_timeout(5, |_, _| {});
        s.clear(TimerHandle(99));
        assert!(s.is_pending(a));
        s.clear(a);
        s.clear(a);
        assert_eq!(s.pending(), 0);
    }
}
