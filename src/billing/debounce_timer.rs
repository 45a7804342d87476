use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Cancellable one-shot timer with a fixed quiescence window. Scheduling
/// again before the window elapses replaces the pending task, so only the
/// last scheduled task runs.
pub struct DebounceTimer {
    window: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl DebounceTimer {
    pub fn new(window: Duration) -> Self {
        DebounceTimer {
            window,
            pending: Mutex::new(None),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedules `task` to run after the quiescence window, cancelling any
    /// previously scheduled task.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let window = self.window;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            task.await;
        });

        let mut pending = self.pending.lock().expect("debounce timer lock poisoned");
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }

    /// Discards the pending task, if any, without running it.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().expect("debounce timer lock poisoned");
        if let Some(previous) = pending.take() {
            previous.abort();
        }
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn only_the_last_scheduled_task_runs() {
        let timer = DebounceTimer::new(Duration::from_millis(30));
        let hits = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(AtomicUsize::new(0));

        for value in 1..=3 {
            let hits = hits.clone();
            let last = last.clone();
            timer.schedule(async move {
                hits.fetch_add(1, Ordering::SeqCst);
                last.store(value, Ordering::SeqCst);
            });
        }

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(last.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn cancel_discards_the_pending_task() {
        let timer = DebounceTimer::new(Duration::from_millis(30));
        let hits = Arc::new(AtomicUsize::new(0));

        {
            let hits = hits.clone();
            timer.schedule(async move {
                hits.fetch_add(1, Ordering::SeqCst);
            });
        }
        timer.cancel();

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
