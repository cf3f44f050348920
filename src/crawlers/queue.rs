use std::collections::VecDeque;
use std::pin::pin;
use tokio::sync::{Mutex, Notify};

#[derive(Debug, Default)]
struct QueueState {
    items: VecDeque<String>,
    closed: bool,
}

/// Bounded FIFO of pending URLs shared by the producer and the dispatcher
///
/// Appending past `max_size` evicts from the head, keeping only the most
/// recent `max_size` URLs. Evicted URLs are never fetched. Once the queue is
/// closed no more URLs are accepted and [`WorkQueue::next`] returns `None`
/// as soon as it is empty.
#[derive(Debug)]
pub struct WorkQueue {
    state: Mutex<QueueState>,
    available: Notify,
    max_size: usize,
}

impl WorkQueue {
    /// Create an empty, open queue
    pub fn new(max_size: usize) -> Self {
        Self::with_items(Vec::new(), max_size)
    }

    /// Create an open queue pre-filled with `items`, trimmed to `max_size`
    pub fn with_items<I>(items: I, max_size: usize) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut items = items.into_iter().collect::<VecDeque<String>>();
        evict_excess(&mut items, max_size);

        Self {
            state: Mutex::new(QueueState {
                items,
                closed: false,
            }),
            available: Notify::new(),
            max_size,
        }
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Append `urls` in order, then evict from the head down to `max_size`
    ///
    /// Returns the number of URLs dropped. Appending to a closed queue drops
    /// every URL.
    pub async fn append(&self, urls: Vec<String>) -> usize {
        let count = urls.len();
        let evicted = {
            let mut state = self.state.lock().await;
            if state.closed {
                ::log::warn!("Dropping {} URLs appended after the queue closed", count);
                return count;
            }
            state.items.extend(urls);
            evict_excess(&mut state.items, self.max_size)
        };

        if evicted > 0 {
            ::log::warn!(
                "Work queue over capacity ({}), evicted {} oldest URLs",
                self.max_size,
                evicted
            );
        }
        ::log::trace!("Appended {} URLs to work queue", count);

        self.available.notify_waiters();
        evicted
    }

    /// Remove and return the head URL without waiting
    pub async fn pop_front(&self) -> Option<String> {
        self.state.lock().await.items.pop_front()
    }

    /// Wait for the next URL
    ///
    /// Returns `None` only once the queue is closed and empty. While the
    /// queue is open and empty the caller is parked, not spinning.
    pub async fn next(&self) -> Option<String> {
        loop {
            // Register interest before checking so a concurrent append or
            // close between the check and the await is not missed.
            let mut notified = pin!(self.available.notified());
            notified.as_mut().enable();

            {
                let mut state = self.state.lock().await;
                if let Some(url) = state.items.pop_front() {
                    return Some(url);
                }
                if state.closed {
                    return None;
                }
            }

            notified.await;
        }
    }

    /// Mark that no more URLs will be appended
    pub async fn close(&self) {
        self.state.lock().await.closed = true;
        self.available.notify_waiters();
    }

    pub async fn is_closed(&self) -> bool {
        self.state.lock().await.closed
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.items.is_empty()
    }

    /// Pending URLs, head first
    pub async fn snapshot(&self) -> Vec<String> {
        self.state.lock().await.items.iter().cloned().collect()
    }
}

/// Drop head entries until `items` fits; returns how many were dropped
fn evict_excess(items: &mut VecDeque<String>, max_size: usize) -> usize {
    let excess = items.len().saturating_sub(max_size);
    items.drain(..excess);
    excess
}
