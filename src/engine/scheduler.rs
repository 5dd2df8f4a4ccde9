// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Timer queue standing in for the platform's timeout/animation-frame
//! primitives.
//!
//! The host drives time by calling `Slideshow::tick(now)`. Every pending
//! animation completion is a task here, which makes cancellation trivial:
//! a cancelled task is removed and can never fire.

use std::collections::BTreeMap;
use std::time::Duration;

/// Handle to a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    tasks: BTreeMap<TaskId, (Duration, T)>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 1,
            tasks: BTreeMap::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock forward; never backwards
    pub fn advance_clock(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }
    }

    pub fn schedule(&mut self, delay: Duration, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.insert(id, (self.now + delay, task));
        id
    }

    /// Remove a task. Cancelling a finished or unknown task is a no-op.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        self.tasks.remove(&id).is_some()
    }

    /// Take the earliest task due at or before the current clock. Ties fire
    /// in scheduling order.
    pub fn pop_due(&mut self) -> Option<(TaskId, T)> {
        let id = self
            .tasks
            .iter()
            .filter(|(_, (due, _))| *due <= self.now)
            .min_by_key(|(id, (due, _))| (*due, **id))
            .map(|(id, _)| *id)?;
        self.tasks.remove(&id).map(|(_, task)| (id, task))
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
