//! Generate Service - main application orchestrator.
//!
//! This service coordinates one generation run:
//! 1. Resolve raw flags into a `ModuleContext`
//! 2. Build the ordered plan
//! 3. Validate the plan
//! 4. Write every file in order, stopping at the first failure

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ports::Filesystem,
        services::{ChainBuilder, ConfigResolver, FileWriter, RawFlags},
    },
    domain::{DomainValidator as validator, FileRole, GenerationPlan, ModuleContext, Style},
    error::IncgenResult,
};

/// Files created by a successful run, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub created: Vec<PathBuf>,
}

impl GenerationReport {
    pub fn len(&self) -> usize {
        self.created.len()
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
    }
}

/// A planned file rendered in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedFile {
    pub file_name: String,
    pub disk_name: String,
    pub role: FileRole,
    pub content: String,
}

/// Main generation service.
pub struct GenerateService {
    filesystem: Box<dyn Filesystem>,
}

impl GenerateService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Resolve raw flags against this service's working directory.
    pub fn resolve(&self, flags: &RawFlags, style: Style) -> IncgenResult<ModuleContext> {
        ConfigResolver::new(self.filesystem.as_ref()).resolve(flags, style)
    }

    /// Build and validate the plan for `ctx`.
    pub fn plan(&self, ctx: &ModuleContext) -> IncgenResult<GenerationPlan> {
        let plan = ChainBuilder::build_for(ctx);
        validator::validate_plan(&plan, &ctx.namer(), ctx.style().strict_guards)?;
        debug!(files = plan.len(), "Plan validated");
        Ok(plan)
    }

    /// Create every planned file.
    ///
    /// Files created before a failure are left in place; only the file being
    /// written when the failure happened is removed.
    #[instrument(
        skip_all,
        fields(
            scope = ?ctx.scope(),
            prefix = %ctx.prefix(),
        )
    )]
    pub fn generate(&self, ctx: &ModuleContext) -> IncgenResult<GenerationReport> {
        let plan = self.plan(ctx)?;
        let namer = ctx.namer();
        let writer = FileWriter::new(self.filesystem.as_ref(), &namer, ctx.once_guard());

        let mut report = GenerationReport::default();
        for spec in &plan {
            match writer.write_spec(spec) {
                Ok(path) => {
                    debug!(path = %path.display(), "Created file");
                    report.created.push(path);
                }
                Err(e) => {
                    if !report.is_empty() {
                        info!(
                            created = ?report.created,
                            "Run stopped; files created so far are kept"
                        );
                    }
                    return Err(e);
                }
            }
        }

        info!(files = report.len(), "Generation completed");
        Ok(report)
    }

    /// Render the plan without touching the file system.
    pub fn preview(&self, ctx: &ModuleContext) -> IncgenResult<Vec<RenderedFile>> {
        let plan = self.plan(ctx)?;
        let namer = ctx.namer();
        let writer = FileWriter::new(self.filesystem.as_ref(), &namer, ctx.once_guard());

        Ok(plan
            .iter()
            .map(|spec| RenderedFile {
                file_name: spec.file_name().to_string(),
                disk_name: spec.disk_name(),
                role: spec.role(),
                content: writer.render(spec),
            })
            .collect())
    }

    /// Resolve and generate in one call.
    pub fn run(&self, flags: &RawFlags, style: Style) -> IncgenResult<GenerationReport> {
        let ctx = self.resolve(flags, style)?;
        self.generate(&ctx)
    }
}
