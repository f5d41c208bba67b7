/// ProgressReporter port for human-facing progress output
///
/// Separate from structured logging: these are the short messages a person
/// watching the terminal reads while a report is requested and downloaded.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress of a bounded wait
    ///
    /// # Arguments
    /// * `current` - Seconds waited so far
    /// * `total` - Maximum seconds the wait may take
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
