//! Delayed tasks owned by the shell
//!
//! Times are offsets from the shell's clock origin. Session-bound tasks carry
//! the generation current when they were scheduled; bumping the generation
//! (category/language change, exit to home) turns them stale and they are
//! dropped instead of fired. Detached tasks (ad retries) always fire.

use std::time::Duration;

#[derive(Debug, Clone)]
struct Scheduled<T> {
    due: Duration,
    /// None for detached tasks
    generation: Option<u64>,
    /// Insertion order, breaks ties between equal `due`
    seq: u64,
    task: T,
}

/// Queue of pending delayed tasks
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    pending: Vec<Scheduled<T>>,
    generation: u64,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            generation: 0,
            next_seq: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a new generation; everything session-bound so far goes stale
    pub fn invalidate(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Schedule a task tied to the current generation
    pub fn schedule(&mut self, now: Duration, delay: Duration, task: T) {
        let generation = Some(self.generation);
        self.push(now + delay, generation, task);
    }

    /// Schedule a task that survives generation changes
    pub fn schedule_detached(&mut self, now: Duration, delay: Duration, task: T) {
        self.push(now + delay, None, task);
    }

    fn push(&mut self, due: Duration, generation: Option<u64>, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Scheduled {
            due,
            generation,
            seq,
            task,
        });
    }

    /// Remove and return every task due at `now`, earliest first.
    /// Stale session-bound tasks are discarded.
    pub fn take_due(&mut self, now: Duration) -> Vec<T> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.due <= now);
        self.pending = rest;
        due.sort_by_key(|s| (s.due, s.seq));

        let current = self.generation;
        due.into_iter()
            .filter(|s| match s.generation {
                Some(g) if g != current => {
                    log::debug!("Dropping stale task from generation {g} (current {current})");
                    false
                }
                _ => true,
            })
            .map(|s| s.task)
            .collect()
    }

    /// When the earliest pending task falls due
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|s| s.due).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
