/// Mock implementations for testing
mod instant_waiter;
mod mock_progress_reporter;
mod mock_service_session;

pub use instant_waiter::InstantWaiter;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_service_session::{MockServiceSession, RecordedRequest};
