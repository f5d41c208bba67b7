/// Network adapters for the composition-analysis server
mod blackduck_session;

pub use blackduck_session::BlackDuckSession;
