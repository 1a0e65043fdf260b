//! Dependency-Chain Builder.
//!
//! Turns a [`PlanTemplate`] into an ordered [`GenerationPlan`]. Every file
//! includes the file planned right before it, with one exception: the first
//! stage of a bridged tier includes the previous tier's last stage instead.
//! The first stage of an unbridged tier includes nothing.

use tracing::trace;

use crate::domain::{FileRole, FileSpec, GenerationPlan, ModuleContext, PlanTemplate};

pub struct ChainBuilder;

impl ChainBuilder {
    /// Build the plan for a resolved context.
    pub fn build_for(ctx: &ModuleContext) -> GenerationPlan {
        Self::build(&PlanTemplate::for_context(ctx))
    }

    /// Single forward pass over the template.
    pub fn build(template: &PlanTemplate) -> GenerationPlan {
        let mut plan = GenerationPlan::new();
        let mut previous: Option<String> = None;
        let mut tier_tail: Option<String> = None;

        for tier in &template.tiers {
            for (i, stage) in tier.stages.iter().enumerate() {
                let file = stage.file_name(&tier.prefix);
                let parent = match (i, tier.bridged) {
                    (0, true) => tier_tail.clone(),
                    (0, false) => None,
                    _ => previous.clone(),
                };
                trace!(file = %file, parent = ?parent, "planned tier file");
                plan.push(FileSpec::new(
                    FileRole::Tier(*stage),
                    file.clone(),
                    parent.into_iter().collect(),
                ));
                previous = Some(file);
            }

            let tail = previous.clone();
            if let Some(header) = &tier.export_header {
                plan.push(FileSpec::new(
                    FileRole::ExportHeader,
                    header.clone(),
                    tail.clone().into_iter().collect(),
                ));
                previous = Some(header.clone());
            }
            tier_tail = tail;
        }

        if let Some(source) = &template.source {
            plan.push(FileSpec::new(
                FileRole::Source,
                source.clone(),
                previous.into_iter().collect(),
            ));
        }

        plan
    }
}
