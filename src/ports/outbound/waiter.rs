use std::time::Duration;

/// Waiter port for blocking between readiness checks
///
/// Abstracted so the polling loop can run without real delays in tests.
pub trait Waiter {
    fn wait(&self, duration: Duration);
}
