//! Ordered deferred-dispatch buffer
//!
//! A FIFO queue drained sequentially: each item's handler is awaited before
//! the next item is removed. Items pushed while a drain is running are
//! picked up by the same drain ("late joiners win"), because the loop
//! re-checks for a head item on every iteration.
//!
//! Every operation takes the same lock, so "check empty, read head, remove
//! head" is one critical section and never interleaves with a push. The
//! lock is never held across an await.
//!
//! Draining is not guarded against reentrancy: a handler that itself calls
//! `flush` on the same queue will steal items from the outer drain.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
struct QueueState<T> {
    items: VecDeque<T>,
    sealed: bool,
}

/// FIFO buffer of deferred items with sequential drain
#[derive(Debug)]
pub struct DeferredQueue<T> {
    state: Mutex<QueueState<T>>,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                items: VecDeque::new(),
                sealed: false,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an item to the tail
    ///
    /// # Errors
    ///
    /// Returns the item unchanged once the queue has been sealed by
    /// [`flush_and_seal`](Self::flush_and_seal); the caller is expected to
    /// dispatch it directly.
    pub fn push(&self, item: T) -> Result<(), T> {
        let mut state = self.lock();
        if state.sealed {
            return Err(item);
        }
        state.items.push_back(item);
        Ok(())
    }

    /// Append several items, keeping their order
    ///
    /// # Errors
    ///
    /// Returns all items unchanged if the queue is sealed.
    pub fn extend<I: IntoIterator<Item = T>>(&self, items: I) -> Result<(), Vec<T>> {
        let mut state = self.lock();
        if state.sealed {
            return Err(items.into_iter().collect());
        }
        state.items.extend(items);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    pub fn is_sealed(&self) -> bool {
        self.lock().sealed
    }

    /// Copy of the pending items, head first
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.lock().items.iter().cloned().collect()
    }

    fn take_head(&self, seal_when_empty: bool) -> Option<T> {
        let mut state = self.lock();
        let head = state.items.pop_front();
        if head.is_none() && seal_when_empty {
            state.sealed = true;
        }
        head
    }

    async fn drain<F, Fut>(&self, mut handler: F, seal: bool) -> usize
    where
        F: FnMut(T) -> Fut,
        Fut: Future<Output = ()>,
    {
        let mut drained = 0;
        while let Some(item) = self.take_head(seal) {
            handler(item).await;
            drained += 1;
        }
        drained
    }

    /// Remove and handle items head first until the queue is empty
    ///
    /// Returns the number of items handled. An empty queue returns 0
    /// without calling the handler.
    pub async fn flush<F, Fut>(&self, handler: F) -> usize
    where
        F: FnMut(T) -> Fut,
        Fut: Future<Output = ()>,
    {
        self.drain(handler, false).await
    }

    /// Like [`flush`](Self::flush), then seal the queue
    ///
    /// Sealing happens under the same lock as the final emptiness check, so
    /// an item is either drained here or rejected by `push`.
    pub async fn flush_and_seal<F, Fut>(&self, handler: F) -> usize
    where
        F: FnMut(T) -> Fut,
        Fut: Future<Output = ()>,
    {
        self.drain(handler, true).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_flush_empty_is_noop() {
        let queue: DeferredQueue<u32> = DeferredQueue::new();
        let mut calls = 0;
        let drained = queue
            .flush(|_| {
                calls += 1;
                async {}
            })
            .await;
        assert_eq!(drained, 0);
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn test_flush_preserves_push_order() {
        let queue = DeferredQueue::new();
        queue.push(1).unwrap();
        queue.extend([2, 3]).unwrap();
        queue.push(4).unwrap();

        let mut seen = Vec::new();
        queue
            .flush(|n| {
                seen.push(n);
                async {}
            })
            .await;

        assert_eq!(seen, vec![1, 2, 3, 4]);
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_late_joiners_are_drained_in_same_flush() {
        let queue = DeferredQueue::new();
        queue.push(1).unwrap();
        queue.push(2).unwrap();

        let mut seen = Vec::new();
        let drained = queue
            .flush(|n| {
                if n == 1 {
                    queue.push(10).unwrap();
                }
                seen.push(n);
                async {}
            })
            .await;

        assert_eq!(seen, vec![1, 2, 10]);
        assert_eq!(drained, 3);
    }

    #[tokio::test]
    async fn test_handler_completes_before_next_item() {
        let queue = DeferredQueue::new();
        queue.extend(0..5).unwrap();
        let log = Arc::new(Mutex::new(Vec::new()));

        queue
            .flush(|n| {
                let log = Arc::clone(&log);
                async move {
                    log.lock().unwrap().push(format!("start {}", n));
                    tokio::task::yield_now().await;
                    log.lock().unwrap().push(format!("end {}", n));
                }
            })
            .await;

        let log = log.lock().unwrap();
        for (i, pair) in log.chunks(2).enumerate() {
            assert_eq!(pair[0], format!("start {}", i));
            assert_eq!(pair[1], format!("end {}", i));
        }
    }

    #[tokio::test]
    async fn test_plain_flush_leaves_queue_open() {
        let queue = DeferredQueue::new();
        queue.push("a").unwrap();
        queue.flush(|_| async {}).await;
        assert!(!queue.is_sealed());
        assert!(queue.push("b").is_ok());
    }

    #[tokio::test]
    async fn test_sealed_queue_hands_items_back() {
        let queue = DeferredQueue::new();
        queue.push("a").unwrap();
        let drained = queue.flush_and_seal(|_| async {}).await;

        assert_eq!(drained, 1);
        assert!(queue.is_sealed());
        assert_eq!(queue.push("b"), Err("b"));
        assert_eq!(queue.extend(["c", "d"]), Err(vec!["c", "d"]));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_snapshot_does_not_consume() {
        let queue = DeferredQueue::new();
        queue.extend(["x", "y"]).unwrap();
        assert_eq!(queue.snapshot(), vec!["x", "y"]);
        assert_eq!(queue.len(), 2);
    }
}
