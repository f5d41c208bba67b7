/// Result alias used at the application seams, where errors of different
/// layers are combined and reported together.
pub type Result<T, E = anyhow::Error> = std::result::Result<T, E>;
