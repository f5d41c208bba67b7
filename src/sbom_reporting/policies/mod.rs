pub mod archive_naming;
pub mod poll_policy;

pub use archive_naming::local_archive_name;
pub use poll_policy::{PollPolicy, PollSchedule};
