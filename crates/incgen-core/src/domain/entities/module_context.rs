use serde::{Deserialize, Serialize};

use crate::domain::{
    naming::Namer,
    value_objects::{GuardRule, Layout, ModuleName, Prefix},
};

/// Presentation choices that do not change *which* module is generated,
/// only the shape of its tiers and guards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub layout: Layout,
    pub guard_rule: GuardRule,
    /// Reject plans where two include files share a guard token.
    pub strict_guards: bool,
}

/// Which tiers a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Public tier, export header, private tier, source template.
    Full,
    /// Public tier and export header only.
    PublicOnly,
    /// One custom-prefix tier with its own header and source.
    Add,
}

/// Resolved, immutable input of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleContext {
    name: Option<ModuleName>,
    once_guard: bool,
    public_only: bool,
    prefix: Prefix,
    custom_prefix: bool,
    style: Style,
}

impl ModuleContext {
    pub fn builder() -> ModuleContextBuilder {
        ModuleContextBuilder::default()
    }

    pub fn name(&self) -> Option<&ModuleName> {
        self.name.as_ref()
    }

    pub fn once_guard(&self) -> bool {
        self.once_guard
    }

    pub fn public_only(&self) -> bool {
        self.public_only
    }

    /// First-tier prefix: `pub` unless a custom prefix was given.
    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn scope(&self) -> Scope {
        if self.custom_prefix {
            Scope::Add
        } else if self.public_only {
            Scope::PublicOnly
        } else {
            Scope::Full
        }
    }

    pub fn namer(&self) -> Namer {
        Namer::new(self.name.clone(), self.style.guard_rule)
    }
}

#[derive(Debug, Default)]
pub struct ModuleContextBuilder {
    name: Option<ModuleName>,
    once_guard: bool,
    public_only: bool,
    add_prefix: Option<Prefix>,
    style: Style,
}

impl ModuleContextBuilder {
    pub fn name(mut self, name: ModuleName) -> Self {
        self.name = Some(name);
        self
    }

    pub fn maybe_name(mut self, name: Option<ModuleName>) -> Self {
        self.name = name;
        self
    }

    pub fn once_guard(mut self, once: bool) -> Self {
        self.once_guard = once;
        self
    }

    pub fn public_only(mut self, public_only: bool) -> Self {
        self.public_only = public_only;
        self
    }

    /// Switch to add mode with the given prefix.
    pub fn add_prefix(mut self, prefix: Prefix) -> Self {
        self.add_prefix = Some(prefix);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn build(self) -> ModuleContext {
        let custom_prefix = self.add_prefix.is_some();
        ModuleContext {
            name: self.name,
            once_guard: self.once_guard,
            public_only: self.public_only,
            prefix: self.add_prefix.unwrap_or_default(),
            custom_prefix,
            style: self.style,
        }
    }
}
