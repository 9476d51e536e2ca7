//! Infrastructure adapters for Foundry.
//!
//! This crate implements the ports defined in `foundry-core::application::ports`.
//! It contains every external dependency: template generators, the ZIP
//! packager and clocks.

pub mod clock;
pub mod generators;
pub mod packager;

// Re-export commonly used adapters
pub use clock::{FixedClock, SystemClock};
pub use generators::{
    FrontendGenerator, JavaGenerator, NodeGenerator, PythonGenerator, builtin_registry,
};
pub use packager::{DEFAULT_COMPRESSION_LEVEL, ZipPackager};
