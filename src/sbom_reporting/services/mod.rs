pub mod report_selector;

pub use report_selector::latest_report;
