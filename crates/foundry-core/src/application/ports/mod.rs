//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `foundry-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Generator`: Scaffold a file set for one target technology
//!   - `ArchivePackager`: Compress a file set into a downloadable archive
//!   - `Clock`: Wall-clock time for the valuation certificate
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (`StageEngine` and `ProjectOrchestrator`, driven by the CLI)

pub mod output;

pub use output::{ArchivePackager, Clock, Generator};

#[cfg(test)]
pub use output::MockGenerator;
