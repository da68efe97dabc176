//! Fixed-size worker pool over a bounded work queue.
//!
//! N tokio tasks pull `(index, item)` pairs from a bounded async-channel and
//! push `(index, result)` pairs into an unbounded mpsc channel. Results
//! arrive in completion order; the index lets the caller restore
//! submission order.
//!
//! `async-channel` receivers are `Clone`, so every worker holds its own
//! handle and no worker can starve the others by holding a lock across
//! `recv()`.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct WorkerPool<R: Send + 'static> {
    result_rx: mpsc::UnboundedReceiver<(usize, R)>,
    _handles: Vec<JoinHandle<()>>,
}

impl<R: Send + 'static> WorkerPool<R> {
    /// Spawn `workers` tasks (at least one) and queue every item.
    /// `process` receives each item together with its submission index.
    ///
    /// The work queue holds at most `workers` items, so submission waits
    /// while every worker is busy. Submission runs in its own task, letting
    /// the caller drain results immediately. Must be called from within a
    /// tokio runtime.
    pub fn start<W, F, Fut>(workers: usize, items: Vec<W>, process: F) -> Self
    where
        W: Send + 'static,
        F: Fn(usize, W) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        let workers = workers.max(1);
        let (work_tx, work_rx) = async_channel::bounded::<(usize, W)>(workers);
        let (result_tx, result_rx) = mpsc::unbounded_channel::<(usize, R)>();
        let process = Arc::new(process);

        let handles: Vec<JoinHandle<()>> = (0..workers)
            .map(|_| {
                let work_rx = work_rx.clone();
                let result_tx = result_tx.clone();
                let process = process.clone();
                tokio::spawn(async move {
                    while let Ok((index, item)) = work_rx.recv().await {
                        let result = process(index, item).await;
                        if result_tx.send((index, result)).is_err() {
                            break; // Receiver dropped
                        }
                    }
                })
            })
            .collect();

        // The result channel closes once every worker has exited.
        drop(result_tx);

        tokio::spawn(async move {
            for pair in items.into_iter().enumerate() {
                if work_tx.send(pair).await.is_err() {
                    break;
                }
            }
        });

        Self {
            result_rx,
            _handles: handles,
        }
    }

    /// Next `(index, result)` in completion order, or `None` once every
    /// item has been processed.
    pub async fn recv(&mut self) -> Option<(usize, R)> {
        self.result_rx.recv().await
    }

    /// Drain every result and return them in submission order, calling
    /// `on_result` as each one completes.
    pub async fn collect_ordered(mut self, mut on_result: impl FnMut(usize, &R)) -> Vec<R> {
        let mut results = Vec::new();
        while let Some((index, result)) = self.recv().await {
            on_result(index, &result);
            results.push((index, result));
        }
        results.sort_by_key(|(index, _)| *index);
        results.into_iter().map(|(_, result)| result).collect()
    }
}
