// core/schedule.rs
//
// Cancellable deferred actions driven by the fixed timestep.
// Replaces fire-and-forget timeouts: every scheduled action has a handle,
// and cancelling a handle that already fired (or never existed) is a no-op.
//
// Usage:
//   let mut schedule = Scheduler::new();
//   let tick = schedule.schedule(1.0, Action::Tick);
//   schedule.cancel(tick);
//   for (_, action) in schedule.advance(dt) { ... }

/// Slack for float accumulation when comparing against the due time.
const DUE_EPSILON: f32 = 1e-4;

/// Handle to a scheduled action for later cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(pub u32);

#[derive(Debug, Clone)]
struct ScheduledTask<A> {
    handle: TaskHandle,
    remaining: f32,
    action: A,
}

/// Single-threaded queue of delayed actions.
///
/// Tasks fire in due order; ties keep insertion order. Actions scheduled while
/// processing fired actions wait for the next `advance` call.
#[derive(Debug, Clone)]
pub struct Scheduler<A> {
    tasks: Vec<ScheduledTask<A>>,
    next_id: u32,
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule `action` to fire after `delay` seconds.
    pub fn schedule(&mut self, delay: f32, action: A) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.tasks.push(ScheduledTask {
            handle,
            remaining: delay.max(0.0),
            action,
        });
        handle
    }

    /// Cancel a pending action. Returns whether anything was removed.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.handle != handle);
        self.tasks.len() != before
    }

    /// Cancel through an optional slot, leaving it empty.
    pub fn cancel_slot(&mut self, slot: &mut Option<TaskHandle>) {
        if let Some(handle) = slot.take() {
            self.cancel(handle);
        }
    }

    /// Whether `handle` is still waiting to fire.
    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|t| t.handle == handle)
    }

    /// Seconds until `handle` fires, if it is pending.
    pub fn remaining(&self, handle: TaskHandle) -> Option<f32> {
        self.tasks
            .iter()
            .find(|t| t.handle == handle)
            .map(|t| t.remaining)
    }

    /// Advance time and return every action that came due, in due order.
    pub fn advance(&mut self, dt: f32) -> Vec<(TaskHandle, A)> {
        for task in &mut self.tasks {
            task.remaining -= dt;
        }

        let mut due = Vec::new();
        let mut i = 0;
        while i < self.tasks.len() {
            if self.tasks[i].remaining <= DUE_EPSILON {
                due.push(self.tasks.remove(i));
            } else {
                i += 1;
            }
        }
        // Stable sort keeps insertion order among equal deadlines.
        due.sort_by(|a, b| a.remaining.total_cmp(&b.remaining));
        due.into_iter().map(|t| (t.handle, t.action)).collect()
    }

    /// Drop every pending action.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_delay() {
        let mut s = Scheduler::new();
        s.schedule(1.0, "tick");
        assert!(s.advance(0.5).is_empty());
        let fired = s.advance(0.5);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].1, "tick");
        assert!(s.is_empty());
    }

    #[test]
    fn accumulated_fixed_steps_reach_deadline() {
        let mut s = Scheduler::new();
        s.schedule(1.0, 7u8);
        let mut fired = Vec::new();
        for _ in 0..60 {
            fired.extend(s.advance(1.0 / 60.0));
        }
        assert_eq!(fired.len(), 1);
    }

    #[test]
    fn cancel_prevents_firing() {
        let mut s = Scheduler::new();
        let h = s.schedule(0.5, ());
        assert!(s.is_pending(h));
        assert!(s.cancel(h));
        assert!(!s.is_pending(h));
        assert!(s.advance(1.0).is_empty());
    }

    #[test]
    fn cancel_is_noop_for_fired_or_unknown() {
        let mut s = Scheduler::new();
        let h = s.schedule(0.1, ());
        assert_eq!(s.advance(0.2).len(), 1);
        assert!(!s.cancel(h));
        assert!(!s.cancel(TaskHandle(999)));

        let mut slot = None;
        s.cancel_slot(&mut slot);
        assert!(slot.is_none());
    }

    #[test]
    fn due_order_then_insertion_order() {
        let mut s = Scheduler::new();
        s.schedule(0.5, "late");
        s.schedule(0.2, "early");
        s.schedule(0.2, "early-second");
        let fired: Vec<_> = s.advance(1.0).into_iter().map(|(_, a)| a).collect();
        assert_eq!(fired, vec!["early", "early-second", "late"]);
    }

    #[test]
    fn remaining_and_clear() {
        let mut s = Scheduler::new();
        let h = s.schedule(2.0, ());
        s.advance(0.5);
        let left = s.remaining(h).unwrap();
        assert!((left - 1.5).abs() < 1e-6);
        s.clear();
        assert_eq!(s.len(), 0);
        assert_eq!(s.remaining(h), None);
    }
}
