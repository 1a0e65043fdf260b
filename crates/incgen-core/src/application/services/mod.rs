//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the
//! high-level use case: "generate the header chain for a module".

pub mod config_resolver;
pub mod file_writer;
pub mod generate_service;
pub mod plan_builder;

pub use config_resolver::{ConfigResolver, RawFlags};
pub use file_writer::{FileWriter, render_include, render_source};
pub use generate_service::{GenerateService, GenerationReport, RenderedFile};
pub use plan_builder::ChainBuilder;
