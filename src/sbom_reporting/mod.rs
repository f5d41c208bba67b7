//! Domain layer for SBOM report retrieval: the server's resources as seen by
//! this tool, polling and naming policies, and pure selection services.
pub mod domain;
pub mod policies;
pub mod services;
