pub mod file_spec;
pub mod module_context;
pub mod plan;

pub use crate::domain::DomainError;
pub use file_spec::FileSpec;
pub use module_context::{ModuleContext, ModuleContextBuilder, Scope, Style};
pub use plan::{GenerationPlan, PlanTemplate, TierDescriptor};
