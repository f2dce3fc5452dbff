//! Shutdown signal shared between the Ctrl+C handler and the game loop.

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct ShutdownSignal {
    triggered: AtomicBool,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.triggered.store(true, Ordering::SeqCst);
    }

    pub fn is_shutdown(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_initial_state() {
        assert!(!ShutdownSignal::new().is_shutdown());
    }

    #[test]
    fn test_trigger_from_other_thread() {
        let signal = Arc::new(ShutdownSignal::new());
        let handle = {
            let signal = Arc::clone(&signal);
            thread::spawn(move || signal.trigger())
        };
        handle.join().unwrap();
        assert!(signal.is_shutdown());
    }
}
