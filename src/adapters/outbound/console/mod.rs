/// Console adapters: progress output and blocking waits
mod progress_reporter;
mod thread_waiter;

pub use progress_reporter::StderrProgressReporter;
pub use thread_waiter::ThreadWaiter;
