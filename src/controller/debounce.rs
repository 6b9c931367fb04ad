use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Delays free-text input until it has stopped changing.
///
/// Every call to [`Debouncer::settle`] starts a new quiet period; only the
/// call that is still the latest once its period elapses gets its value
/// back, the rest resolve to `None`.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: AtomicU64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn settle<T>(&self, value: T) -> Option<T> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        (self.generation.load(Ordering::SeqCst) == ticket).then_some(value)
    }

    /// Drop whatever input is still waiting
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn only_last_keystroke_survives() {
        let debouncer = Arc::new(Debouncer::new(Duration::from_millis(500)));

        let first = tokio::spawn({
            let debouncer = debouncer.clone();
            async move { debouncer.settle("p").await }
        });
        tokio::time::sleep(Duration::from_millis(200)).await;
        let second = tokio::spawn({
            let debouncer = debouncer.clone();
            async move { debouncer.settle("piz").await }
        });

        assert_eq!(first.await.unwrap(), None);
        assert_eq!(second.await.unwrap(), Some("piz"));
    }

    #[tokio::test(start_paused = true)]
    async fn quiet_input_passes_through() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        assert_eq!(debouncer.settle(3).await, Some(3));
        assert_eq!(debouncer.settle(4).await, Some(4));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_input() {
        let debouncer = Arc::new(Debouncer::new(Duration::from_millis(500)));
        let pending = tokio::spawn({
            let debouncer = debouncer.clone();
            async move { debouncer.settle("cafe").await }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.cancel();
        assert_eq!(pending.await.unwrap(), None);
    }
}
