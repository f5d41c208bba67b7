use bd_sbom::prelude::*;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Waiter that returns immediately and records the requested delays
#[derive(Default, Clone)]
pub struct InstantWaiter {
    pub waits: Arc<Mutex<Vec<Duration>>>,
}

impl InstantWaiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wait_count(&self) -> usize {
        self.waits.lock().unwrap().len()
    }

    pub fn total_waited(&self) -> Duration {
        self.waits.lock().unwrap().iter().sum()
    }
}

impl Waiter for InstantWaiter {
    fn wait(&self, duration: Duration) {
        self.waits.lock().unwrap().push(duration);
    }
}
