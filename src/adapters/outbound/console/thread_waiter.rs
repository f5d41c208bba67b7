use crate::ports::outbound::Waiter;
use std::time::Duration;

/// Waiter adapter that blocks the calling thread
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadWaiter;

impl Waiter for ThreadWaiter {
    fn wait(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_thread_waiter_blocks_for_duration() {
        let start = Instant::now();
        ThreadWaiter.wait(Duration::from_millis(20));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
