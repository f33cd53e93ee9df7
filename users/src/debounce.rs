use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

/// Runs only the most recent of a burst of calls, once `delay` has passed
/// without another call.
///
/// Every [`Debouncer::call`] aborts the pending task and schedules a new one,
/// so the quiet period restarts on each call. Must be called from within a
/// tokio runtime.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn call<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let delay = self.delay;
        // Spawn under the lock so the stored task is always the newest call.
        let mut pending = self.pending.lock();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            f();
        });

        if let Some(previous) = pending.replace(task) {
            previous.abort();
        }
    }

    pub fn cancel(&self) {
        if let Some(pending) = self.pending.lock().take() {
            pending.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<&'static str>>>, impl Fn(&'static str) + Clone) {
        let calls: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = calls.clone();
        (calls, move |v: &'static str| sink.lock().push(v))
    }

    #[tokio::test(start_paused = true)]
    async fn only_the_last_call_in_a_burst_runs() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let (calls, record) = recorder();

        for value in ["a", "ab", "abc"] {
            let record = record.clone();
            debouncer.call(move || record(value));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(calls.lock().is_empty());
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(250)).await;

        assert_eq!(*calls.lock(), vec!["abc"]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn calls_separated_by_the_quiet_period_all_run() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let (calls, record) = recorder();

        let first = record.clone();
        debouncer.call(move || first("first"));
        tokio::time::sleep(Duration::from_millis(400)).await;

        debouncer.call(move || record("second"));
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(*calls.lock(), vec!["first", "second"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn calls_from_other_threads_keep_the_newest() {
        let debouncer = Arc::new(Debouncer::new(Duration::from_millis(50)));
        let (calls, record) = recorder();

        for value in ["a", "ab", "abc"] {
            let debouncer = debouncer.clone();
            let record = record.clone();
            tokio::task::spawn_blocking(move || debouncer.call(move || record(value)))
                .await
                .unwrap();
        }
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(*calls.lock(), vec!["abc"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_calls_run_exactly_once() {
        let debouncer = Arc::new(Debouncer::new(Duration::from_millis(50)));
        let (calls, record) = recorder();
        let barrier = Arc::new(std::sync::Barrier::new(8));

        let callers: Vec<_> = ["a", "b", "c", "d", "e", "f", "g", "h"]
            .into_iter()
            .map(|value| {
                let debouncer = debouncer.clone();
                let record = record.clone();
                let barrier = barrier.clone();
                tokio::task::spawn_blocking(move || {
                    barrier.wait();
                    debouncer.call(move || record(value));
                })
            })
            .collect();
        for caller in callers {
            caller.await.unwrap();
        }
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(calls.lock().len(), 1);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_the_pending_call() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let (calls, record) = recorder();

        debouncer.call(move || record("never"));
        debouncer.cancel();
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert!(calls.lock().is_empty());
        assert!(!debouncer.is_pending());
    }
}
