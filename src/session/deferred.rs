//! One-shot delayed deliveries tied to the lifetime of a view.
//!
//! Each [`Deferred::schedule`] call spawns an independent timer task; calls
//! are neither debounced nor serialized, so with uneven delays deliveries
//! may land out of scheduling order. Every pending task is aborted when the
//! owner drops the `Deferred`, so nothing is delivered to a torn-down view.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinSet;
use tracing::debug;

pub struct Deferred<T> {
    sink: UnboundedSender<T>,
    tasks: JoinSet<()>,
}

impl<T: Send + 'static> Deferred<T> {
    pub fn new(sink: UnboundedSender<T>) -> Self {
        Self {
            sink,
            tasks: JoinSet::new(),
        }
    }

    /// Deliver `value` to the sink after `delay`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, delay: Duration, value: T) {
        // reap finished timers so the set does not grow without bound
        while self.tasks.try_join_next().is_some() {}

        let sink = self.sink.clone();
        self.tasks.spawn(async move {
            tokio::time::sleep(delay).await;
            if sink.send(value).is_err() {
                debug!("deferred delivery dropped: receiver closed");
            }
        });
    }

}

impl<T> Drop for Deferred<T> {
    fn drop(&mut self) {
        self.tasks.abort_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_delivers_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut deferred = Deferred::new(tx);
        deferred.schedule(Duration::from_millis(1000), "reply");

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.recv().await, Some("reply"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_independent_schedules_may_reorder() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut deferred = Deferred::new(tx);
        deferred.schedule(Duration::from_millis(300), 1);
        deferred.schedule(Duration::from_millis(100), 2);

        assert_eq!(rx.recv().await, Some(2));
        assert_eq!(rx.recv().await, Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_pending() {
        let (tx, mut rx) = mpsc::unbounded_channel::<u32>();
        {
            let mut deferred = Deferred::new(tx);
            deferred.schedule(Duration::from_millis(500), 7);
        }

        // All senders are gone once the aborted task is dropped.
        assert_eq!(rx.recv().await, None);
    }
}
