use std::collections::{HashMap, HashSet};

use crate::domain::{entities::GenerationPlan, error::DomainError, naming::Namer};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    /// Check the invariants every plan must satisfy before anything is
    /// written.
    ///
    /// - the plan is not empty
    /// - no two files share an on-disk name
    /// - every include refers to a file planned earlier in the same run
    /// - with `strict_guards`, no two include files share a guard token
    pub fn validate_plan(
        plan: &GenerationPlan,
        namer: &Namer,
        strict_guards: bool,
    ) -> Result<(), DomainError> {
        if plan.is_empty() {
            return Err(DomainError::EmptyPlan);
        }

        let mut planned: HashSet<&str> = HashSet::new();
        let mut disk_names: HashSet<String> = HashSet::new();

        for spec in plan {
            for include in spec.includes() {
                if !planned.contains(include.as_str()) {
                    return Err(DomainError::DanglingInclude {
                        file: spec.file_name().to_string(),
                        include: include.clone(),
                    });
                }
            }

            if !disk_names.insert(spec.disk_name()) {
                return Err(DomainError::DuplicateFile {
                    file: spec.file_name().to_string(),
                });
            }
            planned.insert(spec.file_name());
        }

        if strict_guards {
            Self::check_guard_collisions(plan, namer)?;
        }

        Ok(())
    }

    fn check_guard_collisions(plan: &GenerationPlan, namer: &Namer) -> Result<(), DomainError> {
        let mut owners: HashMap<String, &str> = HashMap::new();
        for spec in plan.include_files() {
            let token = namer.guard_token(spec.file_name());
            if let Some(first) = owners.get(&token) {
                return Err(DomainError::GuardCollision {
                    token,
                    first: (*first).to_string(),
                    second: spec.file_name().to_string(),
                });
            }
            owners.insert(token, spec.file_name());
        }
        Ok(())
    }
}
