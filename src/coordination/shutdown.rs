//! Process-wide stop signal shared by every background task.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

/// Cloneable one-way stop flag with blocking waits.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl ShutdownSignal {
    /// Create an untriggered signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every task to stop. Idempotent.
    pub fn trigger(&self) {
        let (flag, condvar) = &*self.inner;
        *flag.lock().unwrap_or_else(PoisonError::into_inner) = true;
        condvar.notify_all();
    }

    /// Whether stop was requested.
    pub fn is_triggered(&self) -> bool {
        *self
            .inner
            .0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until triggered.
    pub fn wait(&self) {
        let (flag, condvar) = &*self.inner;
        let guard = flag.lock().unwrap_or_else(PoisonError::into_inner);
        let _guard = condvar
            .wait_while(guard, |stopped| !*stopped)
            .unwrap_or_else(PoisonError::into_inner);
    }

    /// Block until triggered or `timeout` elapses. Returns whether triggered.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (flag, condvar) = &*self.inner;
        let guard = flag.lock().unwrap_or_else(PoisonError::into_inner);
        let (guard, _) = condvar
            .wait_timeout_while(guard, timeout, |stopped| !*stopped)
            .unwrap_or_else(PoisonError::into_inner);
        *guard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn starts_untriggered() {
        let signal = ShutdownSignal::new();
        assert!(!signal.is_triggered());
        assert!(!signal.wait_timeout(Duration::from_millis(1)));
    }

    #[test]
    fn trigger_is_visible_through_clones() {
        let signal = ShutdownSignal::new();
        let clone = signal.clone();

        clone.trigger();

        assert!(signal.is_triggered());
        assert!(signal.wait_timeout(Duration::from_millis(1)));
    }

    #[test]
    fn wait_returns_after_trigger_from_other_thread() {
        let signal = ShutdownSignal::new();
        let remote = signal.clone();

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            remote.trigger();
        });

        signal.wait();
        assert!(signal.is_triggered());
        handle.join().unwrap();
    }
}
