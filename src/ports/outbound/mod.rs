/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (server, file system, console, clock).
pub mod archive_extractor;
pub mod progress_reporter;
pub mod service_session;
pub mod waiter;

pub use archive_extractor::ArchiveExtractor;
pub use progress_reporter::ProgressReporter;
pub use service_session::{ApiResponse, ServiceSession};
pub use waiter::Waiter;
