//! Application layer for incgen.
//!
//! This layer contains:
//! - **Services**: Config Resolver, Dependency-Chain Builder, File Writer and
//!   the `GenerateService` that runs them in order
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer. Naming rules and plan
//! invariants live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    ChainBuilder, ConfigResolver, FileWriter, GenerateService, GenerationReport, RawFlags,
    RenderedFile,
};

// Re-export port traits (for adapter implementation)
pub use ports::{FileHandle, Filesystem};

pub use error::ApplicationError;
