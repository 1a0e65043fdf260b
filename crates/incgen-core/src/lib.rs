//! Incgen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for incgen, a
//! generator for layered C header chains, following hexagonal (ports and
//! adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           incgen-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (ConfigResolver, ChainBuilder,          │
//! │  FileWriter, GenerateService)           │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │            (Filesystem)                 │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    incgen-adapters (Infrastructure)     │
//! │  (LocalFilesystem, MemoryFilesystem)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (ModuleContext, GenerationPlan, Namer)  │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use incgen_core::prelude::*;
//!
//! let service = GenerateService::new(filesystem); // Box<dyn Filesystem>
//! let flags = RawFlags {
//!     name: Some("foo".into()),
//!     ..RawFlags::default()
//! };
//! let report = service.run(&flags, Style::default())?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, GenerateService, GenerationReport, RawFlags, RenderedFile,
        ports::{FileHandle, Filesystem},
    };
    pub use crate::domain::{
        FileKind, FileRole, GenerationPlan, GuardRule, Layout, ModuleContext, ModuleName, Prefix,
        Scope, Stage, Style,
    };
    pub use crate::error::{IncgenError, IncgenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
