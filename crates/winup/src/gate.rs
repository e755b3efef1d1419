use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Re-entrancy gate for a workflow: at most one holder at a time.
///
/// `try_start` claims the gate with a compare-and-set; the returned guard
/// releases it on drop, so the gate reopens on every exit path, early
/// returns and panics included.
#[derive(Default)]
pub struct WorkflowGate {
    running: Arc<AtomicBool>,
}

impl WorkflowGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn try_start(&self) -> Option<WorkflowGuard> {
        self.running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| WorkflowGuard {
                running: Arc::clone(&self.running),
            })
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

pub struct WorkflowGuard {
    running: Arc<AtomicBool>,
}

impl Drop for WorkflowGuard {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::WorkflowGate;

    #[test]
    fn second_start_is_refused_while_guard_lives() {
        let gate = WorkflowGate::new();

        let guard = gate.try_start().expect("fresh gate should open");
        assert!(gate.is_running());
        assert!(gate.try_start().is_none());

        drop(guard);
        assert!(!gate.is_running());
        assert!(gate.try_start().is_some());
    }

    #[test]
    fn gate_reopens_after_a_panic() {
        let gate = WorkflowGate::new();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = gate.try_start().expect("fresh gate should open");
            panic!("workflow blew up");
        }));

        assert!(result.is_err());
        assert!(!gate.is_running());
        assert!(gate.try_start().is_some());
    }
}
