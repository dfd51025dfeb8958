use std::time::Duration;

/// Single-shot delayed tasks driven by the host's frame clock.
///
/// Each entry is the time left until that task is due. Tasks never repeat on
/// their own; whoever handles a fired task schedules the next one.
#[derive(Debug, Clone, Default)]
pub struct TickScheduler {
    pending: Vec<Duration>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a task that becomes due after `delay`
    pub fn schedule(&mut self, delay: Duration) {
        self.pending.push(delay);
    }

    /// Advance every queued task by `elapsed`, removing and counting the due ones
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let mut fired = 0;
        self.pending.retain_mut(|remaining| {
            if *remaining <= elapsed {
                fired += 1;
                false
            } else {
                *remaining -= elapsed;
                true
            }
        });
        fired
    }

    /// Drop every queued task without firing it
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Number of tasks still waiting
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
