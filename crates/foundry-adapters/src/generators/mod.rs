//! Built-in template generators.
//!
//! | Key | Stack | Manifest |
//! |-----|-------|----------|
//! | `node` (default) | Express + TypeScript | `package.json` |
//! | `java` | Spring Boot 3 / Maven | `pom.xml` |
//! | `python` | FastAPI | `requirements.txt` |
//! | `frontend` | React + Vite | `package.json` |
//!
//! Every generator is a pure function of the [`ProjectConfig`]: same config,
//! same bytes.
//!
//! [`ProjectConfig`]: foundry_core::domain::ProjectConfig

mod common;
mod frontend;
mod java;
mod node;
mod python;

use std::sync::Arc;

use foundry_core::application::GeneratorRegistry;

pub use frontend::FrontendGenerator;
pub use java::{BASE_PACKAGE, JAVA_KEY, JavaGenerator};
pub use node::{NODE_KEY, NodeGenerator};
pub use python::{PYTHON_KEY, PythonGenerator};

/// Registry with all four built-in generators, `node` as the default.
pub fn builtin_registry() -> GeneratorRegistry {
    GeneratorRegistry::new(Arc::new(NodeGenerator::new()))
        .register(Arc::new(JavaGenerator::new()))
        .register(Arc::new(PythonGenerator::new()))
        .register(Arc::new(FrontendGenerator::new()))
}
