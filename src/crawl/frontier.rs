// src/crawl/frontier.rs
// =============================================================================
// The frontier queue shared by every worker.
//
// How it works:
// - A VecDeque behind a Mutex holds the tasks (FIFO)
// - A Semaphore counts how many tasks are in the deque, so pop() can wait
//   without spinning: one permit per queued task
// - A pending counter tracks crawl tasks that were pushed but are not
//   finished yet (finished = processed, including pushing its follow-ups)
//
// When the pending counter drops to zero nothing is queued and nothing is
// running, so nothing can ever be queued again: the crawl is over and every
// worker gets a Stop task.
// =============================================================================

use super::task::Task;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Semaphore;

#[derive(Debug)]
pub struct Frontier {
    queue: Mutex<VecDeque<Task>>,
    available: Semaphore,
    pending: AtomicUsize,
}

impl Frontier {
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            available: Semaphore::new(0),
            pending: AtomicUsize::new(0),
        }
    }

    // Adds a task to the back of the queue. Never blocks, never fails.
    pub fn push(&self, task: Task) {
        // Count before the task becomes visible, so a fast consumer can't
        // finish it and drive the counter below zero
        if matches!(task, Task::Crawl(_)) {
            self.pending.fetch_add(1, Ordering::SeqCst);
        }

        self.lock().push_back(task);
        self.available.add_permits(1);
    }

    // Waits until a task is available and removes it from the front
    pub async fn pop(&self) -> Task {
        match self.available.acquire().await {
            // The permit stands for the task we're about to take
            Ok(permit) => permit.forget(),
            // Only a closed semaphore fails, and closed means stop
            Err(_) => return Task::Stop,
        }

        // One permit per queued task, so the deque can't be empty here
        self.lock().pop_front().unwrap_or(Task::Stop)
    }

    // Called once a popped crawl task is completely done
    //
    // Returns true when that was the last pending task.
    pub fn task_done(&self) -> bool {
        self.pending.fetch_sub(1, Ordering::SeqCst) == 1
    }

    // Queues one Stop per worker
    pub fn shutdown(&self, workers: usize) {
        for _ in 0..workers {
            self.push(Task::Stop);
        }
    }

    // Tasks currently sitting in the queue (Stop tasks included)
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    // Crawl tasks queued or being processed
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    // A panicking worker can't leave the deque half-updated,
    // so a poisoned lock is still safe to use
    fn lock(&self) -> MutexGuard<'_, VecDeque<Task>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a std Mutex in async code?
//    - The lock is only held for a push_back or pop_front, never across .await
//    - A tokio::sync::Mutex is only needed when you must hold it while awaiting
//
// 2. What does the Semaphore do here?
//    - Each permit means "one task is in the deque"
//    - acquire().await parks the worker until a permit exists
//    - forget() consumes the permit instead of handing it back on drop
//
// 3. Why SeqCst on the pending counter?
//    - The last fetch_sub must see every fetch_add that came before it,
//      otherwise a worker could stop the pool while a task is still queued
// -----------------------------------------------------------------------------

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}
