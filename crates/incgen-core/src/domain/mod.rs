// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for incgen.
//!
//! This module contains pure generation logic with no I/O. File creation,
//! working-directory lookup and every other side effect goes through the
//! ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem or process calls
//! - **No external crates**: Only std library + thiserror + serde derives
//! - **Immutable entities**: `ModuleContext` is built once and only read
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod naming;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    file_spec::FileSpec,
    module_context::{ModuleContext, ModuleContextBuilder, Scope, Style},
    plan::{GenerationPlan, PlanTemplate, TierDescriptor},
};

pub use error::{DomainError, ErrorCategory};

pub use naming::Namer;

pub use value_objects::{FileKind, FileRole, GuardRule, Layout, ModuleName, Prefix, Stage};

pub use validation::DomainValidator;
