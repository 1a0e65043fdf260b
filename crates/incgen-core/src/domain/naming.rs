//! Include-path, guard-token and on-disk name derivation.
//!
//! Everything here is a pure function of the module name, the guard rule and
//! the logical filename. Nothing reads the file system.
//!
//! # Known limitation
//!
//! Guard normalization is not injective: `a-b.h` and `a_b.h` both become
//! `__A_B_H__`. Collisions are accepted silently unless the plan is validated
//! in strict mode (see `DomainValidator::validate_plan`).

use crate::domain::value_objects::{GuardRule, ModuleName};

/// Derives include paths and guard tokens for one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namer {
    module: Option<ModuleName>,
    rule: GuardRule,
}

impl Namer {
    pub fn new(module: Option<ModuleName>, rule: GuardRule) -> Self {
        Self { module, rule }
    }

    /// String written inside `#include "..."`.
    ///
    /// `"<name>/<file>"` when a module name is known, `file` otherwise.
    pub fn include_path(&self, file: &str) -> String {
        match &self.module {
            Some(name) => format!("{name}/{file}"),
            None => file.to_string(),
        }
    }

    /// Include-guard macro for a logical filename.
    ///
    /// Built from the include path (module segment and `/` included), wrapped
    /// in two leading and two trailing underscores.
    pub fn guard_token(&self, file: &str) -> String {
        let path = self.include_path(file);
        let mut token = String::with_capacity(path.len() + 4);
        token.push_str("__");
        token.extend(path.bytes().map(|b| char::from(self.rule.map_byte(b))));
        token.push_str("__");
        token
    }

    /// Name the file is created under, relative to the working directory.
    pub fn disk_name(file: &str) -> String {
        file.to_lowercase()
    }
}
