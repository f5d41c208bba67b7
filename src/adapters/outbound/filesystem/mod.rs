/// Filesystem adapters for report archives
mod zip_flattener;

pub use zip_flattener::ZipFlattener;
