//! Plan templates and the plans built from them.
//!
//! A [`PlanTemplate`] is a small table describing the shape of a run: the
//! ordered tiers, which of them bridge onto the previous tier, where export
//! headers go, and whether a source template closes the chain. The chain
//! builder in the application layer turns any template into a
//! [`GenerationPlan`]; both historical generator variants are just different
//! templates.

use serde::Serialize;

use crate::domain::{
    entities::{
        file_spec::FileSpec,
        module_context::{ModuleContext, Scope},
    },
    value_objects::{FileKind, Layout, ModuleName, Prefix, Stage},
};

/// One tier of a plan template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierDescriptor {
    pub prefix: Prefix,
    pub stages: &'static [Stage],
    /// First stage includes the previous tier's last include file.
    pub bridged: bool,
    /// Logical filename of the header exporting this tier, planned right
    /// after the tier's last stage.
    pub export_header: Option<String>,
}

/// Shape of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanTemplate {
    pub tiers: Vec<TierDescriptor>,
    /// Logical filename of the source template. It includes the file planned
    /// immediately before it.
    pub source: Option<String>,
}

impl PlanTemplate {
    /// Public tier (+ export header), then optionally the bridged private
    /// tier and the module source template.
    pub fn pyramid(layout: Layout, name: Option<&ModuleName>, public_only: bool) -> Self {
        let mut tiers = vec![TierDescriptor {
            prefix: Prefix::public(),
            stages: layout.stages(),
            bridged: false,
            export_header: name.map(|n| format!("{n}.h")),
        }];

        if !public_only {
            tiers.push(TierDescriptor {
                prefix: Prefix::private(),
                stages: layout.stages(),
                bridged: true,
                export_header: None,
            });
        }

        let source = match (public_only, name) {
            (false, Some(n)) => Some(format!("{n}.c")),
            _ => None,
        };

        Self { tiers, source }
    }

    /// Single custom-prefix tier closed by `<prefix>.h` and `<prefix>.c`.
    ///
    /// Add mode always uses the three-stage tier shape.
    pub fn add(prefix: &Prefix) -> Self {
        Self {
            tiers: vec![TierDescriptor {
                prefix: prefix.clone(),
                stages: Layout::Compact.stages(),
                bridged: false,
                export_header: Some(format!("{prefix}.h")),
            }],
            source: Some(format!("{prefix}.c")),
        }
    }

    pub fn for_context(ctx: &ModuleContext) -> Self {
        match ctx.scope() {
            Scope::Add => Self::add(ctx.prefix()),
            Scope::PublicOnly => Self::pyramid(ctx.style().layout, ctx.name(), true),
            Scope::Full => Self::pyramid(ctx.style().layout, ctx.name(), false),
        }
    }
}

/// Ordered list of files to create, in dependency order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GenerationPlan {
    files: Vec<FileSpec>,
}

impl GenerationPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, spec: FileSpec) {
        self.files.push(spec);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileSpec> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn last(&self) -> Option<&FileSpec> {
        self.files.last()
    }

    pub fn get(&self, file_name: &str) -> Option<&FileSpec> {
        self.files.iter().find(|f| f.file_name() == file_name)
    }

    pub fn include_files(&self) -> impl Iterator<Item = &FileSpec> {
        self.files.iter().filter(|f| f.kind() == FileKind::Include)
    }
}

impl<'a> IntoIterator for &'a GenerationPlan {
    type Item = &'a FileSpec;
    type IntoIter = std::slice::Iter<'a, FileSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::module_context::Style;

    fn foo() -> ModuleName {
        ModuleName::new("foo").unwrap()
    }

    #[test]
    fn pyramid_has_two_tiers_and_source_with_name() {
        let t = PlanTemplate::pyramid(Layout::Compact, Some(&foo()), false);
        assert_eq!(t.tiers.len(), 2);
        assert!(!t.tiers[0].bridged);
        assert!(t.tiers[1].bridged);
        assert_eq!(t.tiers[0].export_header.as_deref(), Some("foo.h"));
        assert_eq!(t.tiers[1].export_header, None);
        assert_eq!(t.source.as_deref(), Some("foo.c"));
    }

    #[test]
    fn pyramid_without_name_has_no_header_or_source() {
        let t = PlanTemplate::pyramid(Layout::Collector, None, false);
        assert_eq!(t.tiers.len(), 2);
        assert!(t.tiers.iter().all(|tier| tier.export_header.is_none()));
        assert!(t.source.is_none());
        assert_eq!(t.tiers[0].stages.len(), 4);
    }

    #[test]
    fn public_only_drops_private_tier_and_source() {
        let t = PlanTemplate::pyramid(Layout::Compact, Some(&foo()), true);
        assert_eq!(t.tiers.len(), 1);
        assert!(t.source.is_none());
    }

    #[test]
    fn add_template_ignores_layout() {
        let ctx = ModuleContext::builder()
            .add_prefix(Prefix::new("xxx").unwrap())
            .style(Style {
                layout: Layout::Collector,
                ..Style::default()
            })
            .build();
        let t = PlanTemplate::for_context(&ctx);
        assert_eq!(t.tiers.len(), 1);
        assert_eq!(t.tiers[0].stages, Layout::Compact.stages());
        assert_eq!(t.tiers[0].export_header.as_deref(), Some("xxx.h"));
        assert_eq!(t.source.as_deref(), Some("xxx.c"));
    }
}
