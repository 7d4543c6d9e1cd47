/// Single-threaded deferred task queue driven by a virtual clock.
///
/// Tasks fire in order of fire time; ties fire in scheduling order.
/// Nothing runs until the owner calls `advance`, so deferred work never
/// overlaps a frame update.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    /// Current virtual time in seconds.
    now: f64,
    /// Monotonic counter breaking ties between equal fire times.
    next_seq: u64,
    pending: Vec<Timer<T>>,
}

#[derive(Debug, Clone)]
struct Timer<T> {
    fire_at: f64,
    seq: u64,
    task: T,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    /// Current virtual time in seconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedule `task` to fire `delay` seconds from now.
    pub fn schedule(&mut self, delay: f64, task: T) {
        let timer = Timer {
            fire_at: self.now + delay.max(0.0),
            seq: self.next_seq,
            task,
        };
        self.next_seq += 1;
        self.pending.push(timer);
    }

    /// Move the clock forward by `dt` seconds and return every task that came due,
    /// earliest first.
    pub fn advance(&mut self, dt: f64) -> Vec<T> {
        self.now += dt.max(0.0);
        let now = self.now;

        let mut due: Vec<Timer<T>> = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].fire_at <= now {
                due.push(self.pending.swap_remove(i));
            } else {
                i += 1;
            }
        }

        due.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|t| t.task).collect()
    }

    /// Cancel every pending task.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_fires_before_due() {
        let mut q = TimerQueue::new();
        q.schedule(0.5, "connect");
        assert!(q.advance(0.4).is_empty());
        assert_eq!(q.advance(0.1), vec!["connect"]);
        assert!(q.is_empty());
    }

    #[test]
    fn fires_in_time_order_then_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule(0.3, "c");
        q.schedule(0.2, "a");
        q.schedule(0.2, "b");
        assert_eq!(q.advance(1.0), vec!["a", "b", "c"]);
    }

    #[test]
    fn delays_are_relative_to_current_time() {
        let mut q = TimerQueue::new();
        q.advance(10.0);
        q.schedule(0.05, 1);
        assert!(q.advance(0.04).is_empty());
        assert_eq!(q.advance(0.02), vec![1]);
    }

    #[test]
    fn clear_cancels_pending() {
        let mut q = TimerQueue::new();
        q.schedule(0.1, 1);
        q.schedule(0.2, 2);
        q.clear();
        assert!(q.advance(1.0).is_empty());
    }
}
